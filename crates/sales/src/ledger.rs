//! Order ledger: turns a committed cart into an immutable [`Order`].

use chrono::{DateTime, Utc};
use thiserror::Error;

use autoshop_catalog::Catalog;
use autoshop_core::{DomainError, OrderId, PersistenceError, UserId};

use crate::cart::Cart;
use crate::order::{CustomerRef, Order, OrderLine};

/// Append-only persistence for committed orders.
pub trait OrderJournal {
    fn append(&mut self, order: &Order) -> Result<(), PersistenceError>;

    /// Highest order id already recorded, if any.
    fn last_order_id(&self) -> Result<Option<OrderId>, PersistenceError>;
}

/// The customer side of a commit: identity snapshot + exclusive order history.
pub trait OrderOwner {
    fn customer_id(&self) -> &UserId;

    fn display_name(&self) -> &str;

    fn record_order(&mut self, order: Order);
}

/// In-memory append-only journal.
///
/// Intended for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryJournal {
    orders: Vec<Order>,
}

impl InMemoryJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }
}

impl OrderJournal for InMemoryJournal {
    fn append(&mut self, order: &Order) -> Result<(), PersistenceError> {
        self.orders.push(order.clone());
        Ok(())
    }

    fn last_order_id(&self) -> Result<Option<OrderId>, PersistenceError> {
        Ok(self.orders.iter().map(Order::order_id).max())
    }
}

#[derive(Debug, Error)]
pub enum CommitError {
    /// Nothing happened: the cart was empty or failed re-validation.
    #[error(transparent)]
    Rejected(#[from] DomainError),

    /// Stock was consumed and the order exists in memory, but the journal append
    /// failed. The order is not crash-safe.
    #[error("order {} was placed but not recorded: {source}", .order.order_id())]
    NotRecorded {
        order: Box<Order>,
        #[source]
        source: PersistenceError,
    },
}

/// Owns the order id counter and the journal.
#[derive(Debug)]
pub struct OrderLedger<J> {
    journal: J,
    next_id: OrderId,
}

impl<J: OrderJournal> OrderLedger<J> {
    /// Open a ledger over `journal`, resuming ids after the highest one recorded.
    pub fn open(journal: J) -> Result<Self, PersistenceError> {
        let next_id = journal
            .last_order_id()?
            .map_or(OrderId::FIRST, OrderId::next);
        tracing::debug!(next_order_id = %next_id, "order ledger opened");
        Ok(Self { journal, next_id })
    }

    pub fn next_order_id(&self) -> OrderId {
        self.next_id
    }

    pub fn journal(&self) -> &J {
        &self.journal
    }

    /// Commit `cart` for `customer`.
    ///
    /// Every line is re-validated against current stock before anything changes;
    /// either all lines are taken or none are. On success stock is decreased once per
    /// line, the order is journaled and recorded in the customer's history, and the
    /// cart is cleared.
    pub fn commit<C: OrderOwner>(
        &mut self,
        cart: &mut Cart,
        customer: &mut C,
        catalog: &mut Catalog,
        placed_at: DateTime<Utc>,
    ) -> Result<Order, CommitError> {
        if cart.is_empty() {
            return Err(DomainError::EmptyCart.into());
        }

        let mut lines = Vec::with_capacity(cart.lines().len());
        for cart_line in cart.lines() {
            let product = catalog.find(cart_line.code.as_str())?;
            if cart_line.quantity <= 0 {
                return Err(DomainError::invalid_quantity(format!(
                    "{}: line quantity must be positive (got {})",
                    cart_line.code, cart_line.quantity
                ))
                .into());
            }
            if cart_line.quantity > product.stock() {
                return Err(DomainError::insufficient_stock(
                    cart_line.code.as_str(),
                    cart_line.quantity,
                    product.stock(),
                )
                .into());
            }
            lines.push(OrderLine {
                product_code: product.code().clone(),
                description: product.description().to_string(),
                kind: product.kind(),
                quantity: cart_line.quantity,
                unit_price: product.unit_price(),
                discount: product.discount(cart_line.quantity),
            });
        }

        // Lines hold distinct codes and were all checked above, so each decrease
        // succeeds while we hold the exclusive borrow.
        for line in &lines {
            catalog.decrease_stock(line.product_code.as_str(), line.quantity)?;
        }

        let id = self.next_id;
        self.next_id = id.next();

        let order = Order::new(
            id,
            CustomerRef {
                user_id: customer.customer_id().clone(),
                name: customer.display_name().to_string(),
            },
            placed_at,
            lines,
        );

        let journaled = self.journal.append(&order);
        customer.record_order(order.clone());
        cart.clear();

        match journaled {
            Ok(()) => {
                tracing::info!(
                    order_id = %order.order_id(),
                    customer = %order.customer().user_id,
                    total = %order.total_amount(),
                    lines = order.lines().len(),
                    "order committed"
                );
                Ok(order)
            }
            Err(source) => {
                tracing::error!(order_id = %order.order_id(), error = %source, "order not journaled");
                Err(CommitError::NotRecorded {
                    order: Box::new(order),
                    source,
                })
            }
        }
    }
}
