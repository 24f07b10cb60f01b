//! Sales domain module: carts, orders and the order ledger.
//!
//! Carts and orders are deterministic domain logic; persistence is reached only
//! through the [`OrderJournal`] seam, which the infra crate implements over files.

pub mod cart;
pub mod ledger;
pub mod order;

pub use cart::{Cart, CartLine};
pub use ledger::{CommitError, InMemoryJournal, OrderJournal, OrderLedger, OrderOwner};
pub use order::{CustomerRef, Order, OrderLine};
