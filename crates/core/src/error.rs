//! Domain error model.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// invariants, stock checks). Infrastructure concerns live in [`PersistenceError`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An unknown product code, cart line or user was referenced.
    #[error("not found: {0}")]
    NotFound(String),

    /// A product was created with a code that is already live in the catalog.
    #[error("duplicate product code: {0}")]
    DuplicateCode(String),

    /// A quantity or stock target was zero, negative or above the available stock.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    /// The requested quantity exceeds the stock available for a product.
    #[error("insufficient stock for {code}: requested {requested}, available {available}")]
    InsufficientStock {
        code: String,
        requested: i64,
        available: i64,
    },

    /// An order commit was attempted with no cart lines.
    #[error("cart is empty")]
    EmptyCart,

    /// Authentication failed (unknown user id or wrong password).
    #[error("invalid credentials")]
    InvalidCredentials,
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn duplicate_code(code: impl Into<String>) -> Self {
        Self::DuplicateCode(code.into())
    }

    pub fn invalid_quantity(msg: impl Into<String>) -> Self {
        Self::InvalidQuantity(msg.into())
    }

    pub fn insufficient_stock(code: impl Into<String>, requested: i64, available: i64) -> Self {
        Self::InsufficientStock {
            code: code.into(),
            requested,
            available,
        }
    }
}

/// Failure while reading or writing one of the flat record files.
///
/// A missing file is kept distinct from other I/O failures: callers typically fall
/// back to an empty or default data set when a file does not exist yet.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("file not found: {}", .path.display())]
    Missing { path: PathBuf },

    #[error("i/o failure on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PersistenceError {
    /// Classify an I/O error raised while touching `path`.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        let path = path.as_ref().to_path_buf();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::Missing { path }
        } else {
            Self::Io { path, source }
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing { .. })
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Missing { path } | Self::Io { path, .. } => path,
        }
    }
}
