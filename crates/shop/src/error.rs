use thiserror::Error;

use autoshop_core::{DomainError, PersistenceError};
use autoshop_sales::{CommitError, Order};

pub type ShopResult<T> = Result<T, ShopError>;

/// Failure surfaced by the shop facade and its sessions.
#[derive(Debug, Error)]
pub enum ShopError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// The order was committed in memory (stock taken, history updated) but the
    /// ledger append failed.
    #[error("order {} was placed but not recorded: {source}", .order.order_id())]
    OrderNotRecorded {
        order: Box<Order>,
        #[source]
        source: PersistenceError,
    },

    /// The order was committed and recorded but the products file could not be
    /// rewritten with the new stock levels.
    #[error("order {} was placed but stock levels were not saved: {source}", .order.order_id())]
    CatalogNotSaved {
        order: Box<Order>,
        #[source]
        source: PersistenceError,
    },
}

impl From<CommitError> for ShopError {
    fn from(value: CommitError) -> Self {
        match value {
            CommitError::Rejected(err) => Self::Domain(err),
            CommitError::NotRecorded { order, source } => Self::OrderNotRecorded { order, source },
        }
    }
}

impl ShopError {
    /// The committed order carried by a post-commit failure.
    pub fn placed_order(&self) -> Option<&Order> {
        match self {
            Self::OrderNotRecorded { order, .. } | Self::CatalogNotSaved { order, .. } => Some(&**order),
            _ => None,
        }
    }

    /// The domain rule that rejected the operation, if that is what failed.
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            Self::Domain(err) => Some(err),
            _ => None,
        }
    }
}
