//! `autoshop-shop`: the store facade and its login sessions.

pub mod error;
pub mod seed;
pub mod session;
pub mod shop;

pub use error::{ShopError, ShopResult};
pub use session::{AdminSession, CustomerSession, Session};
pub use shop::Shop;
