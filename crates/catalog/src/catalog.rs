//! The authoritative, in-memory product set.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use autoshop_core::{DomainError, DomainResult, ProductCode};

use crate::product::{Product, ProductKind};

/// Products keyed by code.
///
/// The catalog owns every [`Product`]; callers only ever see shared borrows, and all
/// mutation goes through the methods below so the stock invariants hold in one place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    products: BTreeMap<ProductCode, Product>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from loaded records. Repeated codes keep the first record.
    pub fn from_products(products: impl IntoIterator<Item = Product>) -> Self {
        let mut catalog = Self::new();
        for product in products {
            if catalog.products.contains_key(product.code()) {
                tracing::warn!(code = %product.code(), "duplicate product code skipped");
                continue;
            }
            catalog.products.insert(product.code().clone(), product);
        }
        catalog
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.products.contains_key(code)
    }

    pub fn find(&self, code: &str) -> DomainResult<&Product> {
        self.products
            .get(code)
            .ok_or_else(|| DomainError::not_found(format!("product {code}")))
    }

    /// Every product, in code order, including those out of stock.
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    /// In-stock products of one kind.
    pub fn list(&self, kind: ProductKind) -> Vec<&Product> {
        self.products
            .values()
            .filter(|p| p.kind() == kind && p.is_available())
            .collect()
    }

    /// In-stock products for a browsing category; unknown categories are simply empty.
    pub fn list_by_category(&self, category: &str) -> Vec<&Product> {
        ProductKind::from_category(category)
            .map(|kind| self.list(kind))
            .unwrap_or_default()
    }

    pub fn create(&mut self, product: Product) -> DomainResult<()> {
        if self.products.contains_key(product.code()) {
            return Err(DomainError::duplicate_code(product.code().as_str()));
        }
        product.validate_listing()?;

        tracing::debug!(code = %product.code(), kind = %product.kind(), "product created");
        self.products.insert(product.code().clone(), product);
        Ok(())
    }

    pub fn update_stock(&mut self, code: &str, new_stock: i64) -> DomainResult<()> {
        let product = self.find_mut(code)?;
        if new_stock < 0 {
            return Err(DomainError::invalid_quantity(format!(
                "stock for {code} cannot be negative (got {new_stock})"
            )));
        }

        product.set_stock(new_stock);
        tracing::debug!(%code, stock = new_stock, "stock updated");
        Ok(())
    }

    /// Subtract `quantity` units and return the remaining stock.
    ///
    /// The order ledger calls this exactly once per committed order line; it is the
    /// only path through which an order consumes stock.
    pub fn decrease_stock(&mut self, code: &str, quantity: i64) -> DomainResult<i64> {
        let product = self.find_mut(code)?;
        let available = product.stock();
        if quantity <= 0 || quantity > available {
            return Err(DomainError::invalid_quantity(format!(
                "cannot take {quantity} of {code} (in stock: {available})"
            )));
        }

        let remaining = available - quantity;
        product.set_stock(remaining);
        Ok(remaining)
    }

    /// Remove a product. Orders already placed keep their own snapshots.
    pub fn delete(&mut self, code: &str) -> DomainResult<Product> {
        let removed = self
            .products
            .remove(code)
            .ok_or_else(|| DomainError::not_found(format!("product {code}")))?;
        tracing::debug!(%code, "product deleted");
        Ok(removed)
    }

    pub fn discount(&self, code: &str, quantity: i64) -> DomainResult<Decimal> {
        Ok(self.find(code)?.discount(quantity))
    }

    fn find_mut(&mut self, code: &str) -> DomainResult<&mut Product> {
        self.products
            .get_mut(code)
            .ok_or_else(|| DomainError::not_found(format!("product {code}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::{ComplexityTier, PartDetails, ServiceDetails};
    use rust_decimal_macros::dec;

    fn part(code: &str, stock: i64) -> Product {
        Product::part(
            ProductCode::new(code).unwrap(),
            "Air Filter",
            dec!(15.99),
            stock,
            PartDetails {
                manufacturer: "K&N".to_string(),
                model_compatibility: "Honda Accord/Civic".to_string(),
                warranty_months: 24,
                is_original_equipment: false,
            },
        )
        .unwrap()
    }

    fn service(code: &str, stock: i64) -> Product {
        Product::service(
            ProductCode::new(code).unwrap(),
            "Tire Rotation",
            dec!(25.00),
            stock,
            ServiceDetails {
                estimated_hours: 1,
                complexity: ComplexityTier::Basic,
                requires_certification: false,
            },
        )
        .unwrap()
    }

    fn sample() -> Catalog {
        Catalog::from_products([part("BP001", 25), part("BP002", 0), service("SV001", 20)])
    }

    #[test]
    fn find_returns_not_found_for_unknown_codes() {
        let catalog = sample();
        assert_eq!(catalog.find("BP001").unwrap().stock(), 25);
        assert!(matches!(catalog.find("ZZ999"), Err(DomainError::NotFound(_))));
    }

    #[test]
    fn create_rejects_duplicate_codes() {
        let mut catalog = sample();
        let err = catalog.create(part("BP001", 3)).unwrap_err();
        assert_eq!(err, DomainError::DuplicateCode("BP001".to_string()));
        assert_eq!(catalog.find("BP001").unwrap().stock(), 25);

        catalog.create(part("BP003", 3)).unwrap();
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn from_products_keeps_first_of_repeated_codes() {
        let catalog = Catalog::from_products([part("BP001", 1), part("BP001", 99)]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.find("BP001").unwrap().stock(), 1);
    }

    #[test]
    fn listing_filters_by_kind_and_stock() {
        let catalog = sample();
        let parts: Vec<_> = catalog.list_by_category("parts").iter().map(|p| p.code().to_string()).collect();
        assert_eq!(parts, vec!["BP001".to_string()]);
        assert_eq!(catalog.list(ProductKind::Service).len(), 1);
        assert!(catalog.list_by_category("gift cards").is_empty());
    }

    #[test]
    fn update_stock_validates_target() {
        let mut catalog = sample();
        assert!(matches!(catalog.update_stock("BP001", -1), Err(DomainError::InvalidQuantity(_))));
        assert!(matches!(catalog.update_stock("NOPE", 1), Err(DomainError::NotFound(_))));
        catalog.update_stock("BP002", 7).unwrap();
        assert_eq!(catalog.find("BP002").unwrap().stock(), 7);
    }

    #[test]
    fn decrease_stock_returns_remaining_level() {
        let mut catalog = sample();
        assert_eq!(catalog.decrease_stock("BP001", 5).unwrap(), 20);
        assert_eq!(catalog.decrease_stock("BP001", 20).unwrap(), 0);
        assert!(matches!(catalog.decrease_stock("BP001", 1), Err(DomainError::InvalidQuantity(_))));
        assert!(matches!(catalog.decrease_stock("BP001", 0), Err(DomainError::InvalidQuantity(_))));
    }

    #[test]
    fn delete_removes_product() {
        let mut catalog = sample();
        let removed = catalog.delete("SV001").unwrap();
        assert_eq!(removed.code().as_str(), "SV001");
        assert!(!catalog.contains("SV001"));
        assert!(matches!(catalog.delete("SV001"), Err(DomainError::NotFound(_))));
    }

    #[test]
    fn discount_is_delegated_to_the_product_variant() {
        let catalog = sample();
        assert_eq!(catalog.discount("BP001", 10).unwrap(), dec!(15.99) * dec!(10) * dec!(0.08));
        assert_eq!(catalog.discount("SV001", 3).unwrap(), dec!(25.00) * dec!(3) * dec!(0.10));
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: decrease_stock never leaves stock negative, and a rejected
            /// request leaves the stock untouched.
            #[test]
            fn decrease_stock_never_goes_negative(stock in 0i64..200, quantity in -50i64..300) {
                let mut catalog = Catalog::from_products([part("BP001", stock)]);
                match catalog.decrease_stock("BP001", quantity) {
                    Ok(remaining) => {
                        prop_assert!(quantity > 0 && quantity <= stock);
                        prop_assert_eq!(remaining, stock - quantity);
                        prop_assert_eq!(catalog.find("BP001").unwrap().stock(), remaining);
                    }
                    Err(err) => {
                        prop_assert!(quantity <= 0 || quantity > stock);
                        prop_assert!(matches!(err, DomainError::InvalidQuantity(_)));
                        prop_assert_eq!(catalog.find("BP001").unwrap().stock(), stock);
                    }
                }
                prop_assert!(catalog.find("BP001").unwrap().stock() >= 0);
            }
        }
    }
}
