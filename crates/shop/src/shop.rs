use chrono::{DateTime, Utc};

use autoshop_auth::{User, UserDirectory};
use autoshop_catalog::Catalog;
use autoshop_core::{OrderId, PersistenceError};
use autoshop_infra::{FileOrderJournal, LedgerEntry, StoreConfig, load_products, load_users};
use autoshop_sales::{Cart, OrderLedger};

use crate::error::ShopResult;
use crate::seed;
use crate::session::{AdminSession, CustomerSession, Session};

/// A single store: its catalog, users and order ledger, backed by record files.
#[derive(Debug)]
pub struct Shop {
    config: StoreConfig,
    catalog: Catalog,
    users: UserDirectory,
    ledger: OrderLedger<FileOrderJournal>,
}

impl Shop {
    /// Load the store described by `config`.
    ///
    /// Missing products or users files fall back to the default data set; any other
    /// I/O failure is returned.
    pub fn open(config: StoreConfig) -> ShopResult<Self> {
        let catalog = match load_products(config.products_path()) {
            Ok(products) => Catalog::from_products(products),
            Err(err) if err.is_missing() => {
                tracing::warn!(path = %err.path().display(), "products file not found; using default catalog");
                Catalog::from_products(seed::default_products()?)
            }
            Err(err) => return Err(err.into()),
        };

        let users = match load_users(config.users_path()) {
            Ok(users) => UserDirectory::new(users),
            Err(err) if err.is_missing() => {
                tracing::warn!(path = %err.path().display(), "users file not found; using default users");
                UserDirectory::new(seed::default_users()?)
            }
            Err(err) => return Err(err.into()),
        };

        let ledger = OrderLedger::open(FileOrderJournal::new(config.orders_path()))?;

        tracing::info!(
            products = catalog.len(),
            users = users.len(),
            next_order_id = %ledger.next_order_id(),
            "shop opened"
        );
        Ok(Self {
            config,
            catalog,
            users,
            ledger,
        })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn users(&self) -> &UserDirectory {
        &self.users
    }

    pub fn next_order_id(&self) -> OrderId {
        self.ledger.next_order_id()
    }

    /// Every order recorded in the ledger file, oldest first.
    pub fn ledger_entries(&self) -> Result<Vec<LedgerEntry>, PersistenceError> {
        self.ledger.journal().entries()
    }

    pub fn login(&mut self, user_id: &str, password: &str) -> ShopResult<Session<'_>> {
        self.login_at(user_id, password, Utc::now())
    }

    /// Authenticate and hand out the session for the user's access level.
    pub fn login_at(
        &mut self,
        user_id: &str,
        password: &str,
        at: DateTime<Utc>,
    ) -> ShopResult<Session<'_>> {
        let Self {
            config,
            catalog,
            users,
            ledger,
        } = self;
        let products_path = config.products_path();

        let session = match users.authenticate(user_id, password, at)? {
            User::Customer(customer) => Session::Customer(CustomerSession {
                customer,
                catalog,
                ledger,
                cart: Cart::new(),
                products_path,
            }),
            User::Admin(admin) => Session::Admin(AdminSession {
                admin,
                catalog,
                products_path,
            }),
        };
        Ok(session)
    }
}
