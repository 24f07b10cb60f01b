//! Session-scoped shopping cart.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use autoshop_catalog::{Product, ProductKind};
use autoshop_core::{DomainError, DomainResult, ProductCode, ValueObject};

/// One product selection in a cart.
///
/// Description, kind and unit price are snapshotted when the line is first added for
/// display; the ledger re-reads the live price at commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub code: ProductCode,
    pub description: String,
    pub kind: ProductKind,
    pub unit_price: Decimal,
    pub quantity: i64,
}

impl CartLine {
    /// Pre-discount line amount.
    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

impl ValueObject for CartLine {}

/// Pending selection of products for one login session.
///
/// # Invariants
/// - At most one line per product code (adds merge by summing quantity).
/// - A line's quantity never exceeds the product's stock at the time of the add.
///
/// No cart operation touches catalog stock.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` units of `product`, merging into an existing line for the same
    /// code. Returns the line's resulting quantity.
    pub fn add_line(&mut self, product: &Product, quantity: i64) -> DomainResult<i64> {
        if quantity <= 0 {
            return Err(DomainError::invalid_quantity(format!(
                "quantity must be positive (got {quantity})"
            )));
        }

        let existing = self.line(product.code().as_str()).map_or(0, |l| l.quantity);
        let requested = existing
            .checked_add(quantity)
            .filter(|total| *total <= product.stock())
            .ok_or_else(|| {
                DomainError::insufficient_stock(
                    product.code().as_str(),
                    existing.saturating_add(quantity),
                    product.stock(),
                )
            })?;

        match self.lines.iter_mut().find(|l| &l.code == product.code()) {
            Some(line) => line.quantity = requested,
            None => self.lines.push(CartLine {
                code: product.code().clone(),
                description: product.description().to_string(),
                kind: product.kind(),
                unit_price: product.unit_price(),
                quantity,
            }),
        }
        Ok(requested)
    }

    /// Drop the whole line for `code`.
    pub fn remove_line(&mut self, code: &str) -> DomainResult<CartLine> {
        let idx = self
            .lines
            .iter()
            .position(|l| l.code.as_str() == code)
            .ok_or_else(|| DomainError::not_found(format!("cart line {code}")))?;
        Ok(self.lines.remove(idx))
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Running pre-discount total shown while shopping.
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, code: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.code.as_str() == code)
    }

    /// Total units across all lines.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoshop_catalog::{ComplexityTier, PartDetails, ServiceDetails};
    use rust_decimal_macros::dec;

    fn oil_filter(stock: i64) -> Product {
        Product::part(
            ProductCode::new("BP001").unwrap(),
            "Oil Filter",
            dec!(12.99),
            stock,
            PartDetails {
                manufacturer: "Bosch".to_string(),
                model_compatibility: "Toyota Camry/Corolla".to_string(),
                warranty_months: 12,
                is_original_equipment: true,
            },
        )
        .unwrap()
    }

    fn oil_change() -> Product {
        Product::service(
            ProductCode::new("SV001").unwrap(),
            "Oil Change",
            dec!(39.99),
            20,
            ServiceDetails {
                estimated_hours: 1,
                complexity: ComplexityTier::Basic,
                requires_certification: false,
            },
        )
        .unwrap()
    }

    #[test]
    fn repeated_adds_merge_into_one_line() {
        let product = oil_filter(25);
        let mut cart = Cart::new();
        assert_eq!(cart.add_line(&product, 2).unwrap(), 2);
        assert_eq!(cart.add_line(&product, 3).unwrap(), 5);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.line("BP001").unwrap().quantity, 5);
    }

    #[test]
    fn add_beyond_stock_fails_and_keeps_existing_line() {
        let product = oil_filter(25);
        let mut cart = Cart::new();
        cart.add_line(&product, 5).unwrap();

        let err = cart.add_line(&product, 30).unwrap_err();
        assert_eq!(err, DomainError::insufficient_stock("BP001", 35, 25));
        assert_eq!(cart.line("BP001").unwrap().quantity, 5);
    }

    #[test]
    fn huge_second_add_is_insufficient_stock_not_overflow() {
        let product = oil_filter(25);
        let mut cart = Cart::new();
        cart.add_line(&product, 5).unwrap();

        let err = cart.add_line(&product, i64::MAX).unwrap_err();
        assert_eq!(err, DomainError::insufficient_stock("BP001", i64::MAX, 25));
        assert_eq!(cart.line("BP001").unwrap().quantity, 5);
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn non_positive_quantities_are_rejected() {
        let product = oil_filter(25);
        let mut cart = Cart::new();
        assert!(matches!(cart.add_line(&product, 0), Err(DomainError::InvalidQuantity(_))));
        assert!(matches!(cart.add_line(&product, -4), Err(DomainError::InvalidQuantity(_))));
        assert!(cart.is_empty());
    }

    #[test]
    fn remove_line_drops_whole_line() {
        let mut cart = Cart::new();
        cart.add_line(&oil_filter(25), 4).unwrap();
        cart.add_line(&oil_change(), 1).unwrap();

        let removed = cart.remove_line("BP001").unwrap();
        assert_eq!(removed.quantity, 4);
        assert!(cart.line("BP001").is_none());
        assert!(matches!(cart.remove_line("BP001"), Err(DomainError::NotFound(_))));
    }

    #[test]
    fn subtotal_and_item_count_cover_all_lines() {
        let mut cart = Cart::new();
        cart.add_line(&oil_filter(25), 5).unwrap();
        cart.add_line(&oil_change(), 2).unwrap();
        assert_eq!(cart.subtotal(), dec!(64.95) + dec!(79.98));
        assert_eq!(cart.item_count(), 7);

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Decimal::ZERO);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: two successful adds of the same code always yield one line
            /// holding the summed quantity, never two lines.
            #[test]
            fn adds_of_same_code_merge(first in 1i64..50, second in 1i64..50) {
                let product = oil_filter(100);
                let mut cart = Cart::new();
                cart.add_line(&product, first).unwrap();
                cart.add_line(&product, second).unwrap();

                prop_assert_eq!(cart.lines().len(), 1);
                prop_assert_eq!(cart.line("BP001").unwrap().quantity, first + second);
            }
        }
    }
}
