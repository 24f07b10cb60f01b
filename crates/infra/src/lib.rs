//! Infrastructure layer: flat record files and store configuration.

pub mod codec;
pub mod config;
pub mod files;

pub use codec::{LedgerEntry, LedgerItem, LineError, ParseError, Record, decode_lines};
pub use config::StoreConfig;
pub use files::{
    FileOrderJournal, load_ledger, load_products, load_users, save_products, save_users,
};
