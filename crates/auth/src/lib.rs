//! `autoshop-auth`: user identities and authentication.
//!
//! This crate is intentionally decoupled from storage and presentation.

pub mod directory;
pub mod user;

pub use directory::UserDirectory;
pub use user::{AccessLevel, Admin, Customer, User};
