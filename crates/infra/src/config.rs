//! Store configuration: where the record files live.

use std::path::{Path, PathBuf};

pub const DATA_DIR_VAR: &str = "AUTOSHOP_DATA_DIR";
pub const USERS_FILE_VAR: &str = "AUTOSHOP_USERS_FILE";
pub const PRODUCTS_FILE_VAR: &str = "AUTOSHOP_PRODUCTS_FILE";
pub const ORDERS_FILE_VAR: &str = "AUTOSHOP_ORDERS_FILE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    pub users_file: String,
    pub products_file: String,
    pub orders_file: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::in_dir(".")
    }
}

impl StoreConfig {
    /// Default file names inside `data_dir`.
    pub fn in_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            users_file: "users.txt".to_string(),
            products_file: "products.txt".to_string(),
            orders_file: "orders.txt".to_string(),
        }
    }

    /// Read the configuration from `AUTOSHOP_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data_dir = lookup(DATA_DIR_VAR).unwrap_or_else(|| {
            tracing::debug!("{DATA_DIR_VAR} not set; using the working directory");
            ".".to_string()
        });

        let mut config = Self::in_dir(data_dir);
        if let Some(name) = lookup(USERS_FILE_VAR) {
            config.users_file = name;
        }
        if let Some(name) = lookup(PRODUCTS_FILE_VAR) {
            config.products_file = name;
        }
        if let Some(name) = lookup(ORDERS_FILE_VAR) {
            config.orders_file = name;
        }
        config
    }

    pub fn users_path(&self) -> PathBuf {
        self.data_dir.join(&self.users_file)
    }

    pub fn products_path(&self) -> PathBuf {
        self.data_dir.join(&self.products_file)
    }

    pub fn orders_path(&self) -> PathBuf {
        self.data_dir.join(&self.orders_file)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
