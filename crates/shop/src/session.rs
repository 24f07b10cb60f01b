//! Capability sessions.
//!
//! A login yields either a [`CustomerSession`] or an [`AdminSession`]; each exposes
//! only the operations its access level allows.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use autoshop_auth::{AccessLevel, Admin, Customer};
use autoshop_catalog::{Catalog, Product};
use autoshop_core::PersistenceError;
use autoshop_infra::{FileOrderJournal, save_products};
use autoshop_sales::{Cart, CartLine, Order, OrderLedger};

use crate::error::{ShopError, ShopResult};

#[derive(Debug)]
pub enum Session<'a> {
    Customer(CustomerSession<'a>),
    Admin(AdminSession<'a>),
}

impl Session<'_> {
    pub fn user_name(&self) -> &str {
        match self {
            Session::Customer(s) => &s.customer.name,
            Session::Admin(s) => &s.admin.name,
        }
    }

    pub fn access_level(&self) -> AccessLevel {
        match self {
            Session::Customer(_) => AccessLevel::Customer,
            Session::Admin(_) => AccessLevel::Admin,
        }
    }
}

fn persist_catalog(path: &Path, catalog: &Catalog) -> Result<(), PersistenceError> {
    save_products(path, catalog.products())
}

// ─────────────────────────────────────────────────────────────────────────────
// Customer
// ─────────────────────────────────────────────────────────────────────────────

/// Shopping session. The cart lives as long as the session.
#[derive(Debug)]
pub struct CustomerSession<'a> {
    pub(crate) customer: &'a mut Customer,
    pub(crate) catalog: &'a mut Catalog,
    pub(crate) ledger: &'a mut OrderLedger<FileOrderJournal>,
    pub(crate) cart: Cart,
    pub(crate) products_path: PathBuf,
}

impl CustomerSession<'_> {
    pub fn customer(&self) -> &Customer {
        &*self.customer
    }

    /// In-stock products of a category (`parts`, `services`, ...).
    pub fn browse(&self, category: &str) -> Vec<&Product> {
        self.catalog.list_by_category(category)
    }

    pub fn find(&self, code: &str) -> ShopResult<&Product> {
        Ok(self.catalog.find(code)?)
    }

    /// Add `quantity` of a product; returns the line's quantity after merging.
    pub fn add_to_cart(&mut self, code: &str, quantity: i64) -> ShopResult<i64> {
        let product = self.catalog.find(code)?;
        let merged = self.cart.add_line(product, quantity)?;
        tracing::debug!(user_id = %self.customer.user_id, code, quantity, merged, "added to cart");
        Ok(merged)
    }

    pub fn remove_from_cart(&mut self, code: &str) -> ShopResult<CartLine> {
        Ok(self.cart.remove_line(code)?)
    }

    /// Abandon the pending selection.
    pub fn cancel_order(&mut self) {
        self.cart.clear();
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Commit the cart, then rewrite the products file with the new stock levels.
    ///
    /// Once the commit has gone through, every failure still carries the order:
    /// [`ShopError::OrderNotRecorded`] when the ledger append failed (the products file
    /// is saved regardless) and [`ShopError::CatalogNotSaved`] when only the products
    /// file could not be written.
    pub fn place_order(&mut self) -> ShopResult<Order> {
        let committed = self
            .ledger
            .commit(&mut self.cart, &mut *self.customer, &mut *self.catalog, Utc::now())
            .map_err(ShopError::from);

        match committed {
            Ok(order) => {
                if let Err(source) = persist_catalog(&self.products_path, &*self.catalog) {
                    tracing::error!(order_id = %order.order_id(), error = %source, "stock levels not saved");
                    return Err(ShopError::CatalogNotSaved {
                        order: Box::new(order),
                        source,
                    });
                }
                tracing::info!(
                    order_id = %order.order_id(),
                    user_id = %self.customer.user_id,
                    total = %order.total_amount(),
                    "order placed"
                );
                Ok(order)
            }
            Err(err @ ShopError::OrderNotRecorded { .. }) => {
                if let Err(source) = persist_catalog(&self.products_path, &*self.catalog) {
                    tracing::error!(error = %source, "stock levels not saved");
                }
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    pub fn order_history(&self) -> &[Order] {
        self.customer.order_history()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Admin
// ─────────────────────────────────────────────────────────────────────────────

/// Catalog management session.
///
/// Every mutation rewrites the products file. When that save fails the in-memory
/// change stays applied and the persistence error is returned.
#[derive(Debug)]
pub struct AdminSession<'a> {
    pub(crate) admin: &'a mut Admin,
    pub(crate) catalog: &'a mut Catalog,
    pub(crate) products_path: PathBuf,
}

impl AdminSession<'_> {
    pub fn admin(&self) -> &Admin {
        &*self.admin
    }

    pub fn last_login_at(&self) -> Option<DateTime<Utc>> {
        self.admin.last_login_at()
    }

    pub fn browse(&self, category: &str) -> Vec<&Product> {
        self.catalog.list_by_category(category)
    }

    /// Every product, including those out of stock.
    pub fn products(&self) -> Vec<&Product> {
        self.catalog.products().collect()
    }

    pub fn create_product(&mut self, product: Product) -> ShopResult<()> {
        let code = product.code().clone();
        self.catalog.create(product)?;
        tracing::info!(admin = %self.admin.user_id, %code, "product created");
        self.save()
    }

    pub fn update_stock(&mut self, code: &str, new_stock: i64) -> ShopResult<()> {
        self.catalog.update_stock(code, new_stock)?;
        tracing::info!(admin = %self.admin.user_id, code, new_stock, "stock updated");
        self.save()
    }

    pub fn delete_product(&mut self, code: &str) -> ShopResult<Product> {
        let removed = self.catalog.delete(code)?;
        tracing::info!(admin = %self.admin.user_id, code, "product deleted");
        self.save()?;
        Ok(removed)
    }

    fn save(&self) -> ShopResult<()> {
        persist_catalog(&self.products_path, &*self.catalog)?;
        Ok(())
    }
}
