mod error;
mod initializer;
mod provisioning;

// Publicly expose the error taxonomy
pub use error::{CredentialCreationError, IndexCreationError, InitError};

// Publicly expose the Initializer abstraction and the run entry point
pub use initializer::{run_initialization, InitReport, Initializer, InitializerPtr};

// Publicly expose the provisioning plan
pub use provisioning::{
    AppUserSpec, IndexSpec, Order, RoleGrant, APP_USER, INDEX_PLAN, TARGET_DATABASE, WALLETS,
    WALLET_TRANSACTIONS,
};
