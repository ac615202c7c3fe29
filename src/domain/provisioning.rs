//! The provisioning plan: the application principal and the index
//! declarations issued by the initializer.
//!
//! Everything here is literal constant data. The plan is the contract of this
//! tool; nothing in it is configurable at runtime.
//!
//! Indexes declared on `wallets`:
//! - `{ "userId": 1 }` unique — one wallet per user
//! - `{ "createdAt": 1 }`
//! - `{ "updatedAt": 1 }`
//!
//! Indexes declared on `wallet_transactions`:
//! - `{ "walletId": 1 }`
//! - `{ "timestamp": 1 }`
//! - `{ "correlationId": 1 }`
//! - `{ "walletId": 1, "timestamp": 1 }` — per-wallet history queries

/// Database the application user is scoped to and the collections live in.
pub const TARGET_DATABASE: &str = "wallet_db";

/// Collection holding one document per wallet.
pub const WALLETS: &str = "wallets";

/// Collection holding the transaction ledger.
pub const WALLET_TRANSACTIONS: &str = "wallet_transactions";

/// A single authorization grant: a role scoped to one database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleGrant {
    pub role: &'static str,
    pub db: &'static str,
}

/// The application principal requested from the external database.
#[derive(Debug, Clone, Copy)]
pub struct AppUserSpec {
    pub username: &'static str,
    pub password: &'static str,
    pub grants: &'static [RoleGrant],
}

/// Sort direction of one field inside an index key specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Ascending,
    Descending,
}

impl Order {
    /// The wire representation MongoDB expects in a key document.
    pub fn as_i32(self) -> i32 {
        // ---
        match self {
            Order::Ascending => 1,
            Order::Descending => -1,
        }
    }
}

/// One index declaration. Key order is significant for compound indexes.
#[derive(Debug, Clone, Copy)]
pub struct IndexSpec {
    pub collection: &'static str,
    pub keys: &'static [(&'static str, Order)],
    pub unique: bool,
}

/// The application user: `readWrite` on the wallet database, nothing else.
pub const APP_USER: AppUserSpec = AppUserSpec {
    username: "wallet_user",
    password: "wallet_pass",
    grants: &[RoleGrant {
        role: "readWrite",
        db: TARGET_DATABASE,
    }],
};

/// Index declarations in the order they are issued.
///
/// Each declaration is independent; none depends on another succeeding.
pub const INDEX_PLAN: &[IndexSpec] = &[
    IndexSpec {
        collection: WALLETS,
        keys: &[("userId", Order::Ascending)],
        unique: true,
    },
    IndexSpec {
        collection: WALLETS,
        keys: &[("createdAt", Order::Ascending)],
        unique: false,
    },
    IndexSpec {
        collection: WALLETS,
        keys: &[("updatedAt", Order::Ascending)],
        unique: false,
    },
    IndexSpec {
        collection: WALLET_TRANSACTIONS,
        keys: &[("walletId", Order::Ascending)],
        unique: false,
    },
    IndexSpec {
        collection: WALLET_TRANSACTIONS,
        keys: &[("timestamp", Order::Ascending)],
        unique: false,
    },
    IndexSpec {
        collection: WALLET_TRANSACTIONS,
        keys: &[("correlationId", Order::Ascending)],
        unique: false,
    },
    IndexSpec {
        collection: WALLET_TRANSACTIONS,
        keys: &[("walletId", Order::Ascending), ("timestamp", Order::Ascending)],
        unique: false,
    },
];

impl IndexSpec {
    /// Human-readable `collection{field,field}` label used in logs and errors.
    pub fn describe(&self) -> String {
        // ---
        let fields: Vec<&str> = self.keys.iter().map(|(f, _)| *f).collect();
        format!("{}{{{}}}", self.collection, fields.join(","))
    }
}
