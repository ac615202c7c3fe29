// src/lib.rs

//! One-shot MongoDB initializer for the wallet service.
//!
//! Provisions the `wallet_user` application principal (`readWrite` on
//! `wallet_db`) and declares the index set on the `wallets` and
//! `wallet_transactions` collections, then prints a single success notice.
//!
//! Re-running against an already-initialized instance fails on the duplicate
//! principal and aborts before any index request; this is deliberate so a
//! double-provisioned environment is visible rather than silently absorbed.
//! Re-issuing an identical index declaration is a server-side no-op, while a
//! conflicting declaration fails.

use anyhow::Result;

// Public exports (visible outside this module)
pub mod domain;

// Internal-only exports (sibling access within this module)
mod config;
mod infrastructure;

pub use config::*;

// Publicly expose the infrastructure creation function
pub use infrastructure::create_mongo_initializer;

use domain::{run_initialization, InitReport};

/// Loads configuration, builds the administrative client, and runs the full
/// initialization sequence.
///
/// The client lives for the duration of this call and is dropped on every
/// exit path, including failure.
///
/// # Errors
/// Returns an error if configuration is incomplete or any provisioning
/// request is rejected; the remaining sequence is aborted.
pub async fn run_from_env() -> Result<InitReport> {
    // ---
    let config = AppConfig::from_env()?;

    let initializer = create_mongo_initializer(&config.mongo).await?;
    let report = run_initialization(initializer.as_ref()).await?;

    Ok(report)
}
