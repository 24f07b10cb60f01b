use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use autoshop_catalog::ProductKind;
use autoshop_core::{DomainError, DomainResult, Entity, OrderId, ProductCode, UserId, ValueObject};

/// Order line: product snapshot, quantity, unit price and discount at purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_code: ProductCode,
    pub description: String,
    pub kind: ProductKind,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub discount: Decimal,
}

impl OrderLine {
    /// `unit_price * quantity`, before discount.
    pub fn gross(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }

    pub fn subtotal(&self) -> Decimal {
        self.gross() - self.discount
    }
}

impl ValueObject for OrderLine {}

/// Who placed an order, captured by value at commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRef {
    pub user_id: UserId,
    pub name: String,
}

/// A committed order. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "OrderFields")]
pub struct Order {
    id: OrderId,
    customer: CustomerRef,
    placed_at: DateTime<Utc>,
    lines: Vec<OrderLine>,
    total_amount: Decimal,
}

/// Serialized shape of [`Order`]. Lines are checked and the stored total must match
/// the one recomputed from them.
#[derive(Deserialize)]
struct OrderFields {
    id: OrderId,
    customer: CustomerRef,
    placed_at: DateTime<Utc>,
    lines: Vec<OrderLine>,
    total_amount: Decimal,
}

impl TryFrom<OrderFields> for Order {
    type Error = DomainError;

    fn try_from(fields: OrderFields) -> DomainResult<Self> {
        if fields.lines.is_empty() {
            return Err(DomainError::validation(format!("order {} has no lines", fields.id)));
        }
        for line in &fields.lines {
            if line.quantity <= 0
                || line.unit_price <= Decimal::ZERO
                || line.discount < Decimal::ZERO
                || line.discount > line.gross()
            {
                return Err(DomainError::validation(format!(
                    "order {}: invalid line for {}",
                    fields.id, line.product_code
                )));
            }
        }

        let order = Self::new(fields.id, fields.customer, fields.placed_at, fields.lines);
        if order.total_amount != fields.total_amount {
            return Err(DomainError::validation(format!(
                "order {}: total {} does not match lines ({})",
                order.id, fields.total_amount, order.total_amount
            )));
        }
        Ok(order)
    }
}

impl Order {
    /// Assemble an order; the total is computed here once and stored.
    pub(crate) fn new(
        id: OrderId,
        customer: CustomerRef,
        placed_at: DateTime<Utc>,
        lines: Vec<OrderLine>,
    ) -> Self {
        let total_amount = lines.iter().map(OrderLine::subtotal).sum();
        Self {
            id,
            customer,
            placed_at,
            lines,
            total_amount,
        }
    }

    pub fn order_id(&self) -> OrderId {
        self.id
    }

    pub fn customer(&self) -> &CustomerRef {
        &self.customer
    }

    pub fn placed_at(&self) -> DateTime<Utc> {
        self.placed_at
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn total_amount(&self) -> Decimal {
        self.total_amount
    }

    pub fn total_discount(&self) -> Decimal {
        self.lines.iter().map(|l| l.discount).sum()
    }

    /// Lines of one kind, for split part/service summaries on checkout.
    pub fn lines_of(&self, kind: ProductKind) -> impl Iterator<Item = &OrderLine> {
        self.lines.iter().filter(move |l| l.kind == kind)
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
