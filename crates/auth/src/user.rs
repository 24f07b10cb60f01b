//! User variants for identity management.
//!
//! Stored secrets are compared by plain string equality. That is only acceptable for
//! a closed, single-operator shop; it is not a security property to preserve.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use autoshop_core::{Entity, UserId};
use autoshop_sales::{Order, OrderOwner};

// ─────────────────────────────────────────────────────────────────────────────
// Access Level
// ─────────────────────────────────────────────────────────────────────────────

/// Access level tag carried by every user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessLevel {
    Customer,
    Admin,
}

impl core::fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AccessLevel::Customer => write!(f, "Customer"),
            AccessLevel::Admin => write!(f, "Admin"),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Customer
// ─────────────────────────────────────────────────────────────────────────────

/// A shopper. Owns its order history exclusively; the ledger appends to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub user_id: UserId,
    pub name: String,
    pub address: String,
    pub phone: String,
    secret: String,
    order_history: Vec<Order>,
}

impl Customer {
    pub fn new(user_id: UserId, secret: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            user_id,
            name: name.into(),
            address: String::new(),
            phone: String::new(),
            secret: secret.into(),
            order_history: Vec::new(),
        }
    }

    pub fn with_contact(mut self, address: impl Into<String>, phone: impl Into<String>) -> Self {
        self.address = address.into();
        self.phone = phone.into();
        self
    }

    pub fn order_history(&self) -> &[Order] {
        &self.order_history
    }

    pub fn stored_secret(&self) -> &str {
        &self.secret
    }
}

impl OrderOwner for Customer {
    fn customer_id(&self) -> &UserId {
        &self.user_id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn record_order(&mut self, order: Order) {
        self.order_history.push(order);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Admin
// ─────────────────────────────────────────────────────────────────────────────

/// A catalog administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Admin {
    pub user_id: UserId,
    pub name: String,
    pub admin_level: u32,
    secret: String,
    last_login_at: Option<DateTime<Utc>>,
}

impl Admin {
    pub const DEFAULT_LEVEL: u32 = 1;

    pub fn new(user_id: UserId, secret: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            user_id,
            name: name.into(),
            admin_level: Self::DEFAULT_LEVEL,
            secret: secret.into(),
            last_login_at: None,
        }
    }

    pub fn with_level(mut self, admin_level: u32) -> Self {
        self.admin_level = admin_level;
        self
    }

    /// Stamp a successful authentication.
    pub fn record_login(&mut self, at: DateTime<Utc>) {
        self.last_login_at = Some(at);
    }

    pub fn last_login_at(&self) -> Option<DateTime<Utc>> {
        self.last_login_at
    }

    pub fn stored_secret(&self) -> &str {
        &self.secret
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// User
// ─────────────────────────────────────────────────────────────────────────────

/// Closed set of user variants. Capabilities are decided by matching the variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum User {
    Customer(Customer),
    Admin(Admin),
}

impl User {
    pub fn user_id(&self) -> &UserId {
        match self {
            User::Customer(c) => &c.user_id,
            User::Admin(a) => &a.user_id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            User::Customer(c) => &c.name,
            User::Admin(a) => &a.name,
        }
    }

    pub fn access_level(&self) -> AccessLevel {
        match self {
            User::Customer(_) => AccessLevel::Customer,
            User::Admin(_) => AccessLevel::Admin,
        }
    }

    /// Customers shop; admins manage the catalog and never hold a cart.
    pub fn can_order_products(&self) -> bool {
        matches!(self, User::Customer(_))
    }

    pub fn verify_password(&self, candidate: &str) -> bool {
        let secret = match self {
            User::Customer(c) => &c.secret,
            User::Admin(a) => &a.secret,
        };
        secret == candidate
    }
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> &Self::Id {
        self.user_id()
    }
}

impl From<Customer> for User {
    fn from(value: Customer) -> Self {
        User::Customer(value)
    }
}

impl From<Admin> for User {
    fn from(value: Admin) -> Self {
        User::Admin(value)
    }
}
