//! Data the shop starts with when its record files do not exist yet.

use rust_decimal_macros::dec;

use autoshop_auth::{Admin, Customer, User};
use autoshop_catalog::{ComplexityTier, PartDetails, Product, ServiceDetails};
use autoshop_core::{DomainResult, ProductCode, UserId};

pub fn default_products() -> DomainResult<Vec<Product>> {
    Ok(vec![
        Product::part(
            ProductCode::new("BP001")?,
            "Oil Filter",
            dec!(12.99),
            25,
            PartDetails {
                manufacturer: "Bosch".into(),
                model_compatibility: "Toyota Camry/Corolla".into(),
                warranty_months: 12,
                is_original_equipment: true,
            },
        )?,
        Product::part(
            ProductCode::new("BP002")?,
            "Air Filter",
            dec!(15.99),
            30,
            PartDetails {
                manufacturer: "K&N".into(),
                model_compatibility: "Honda Accord/Civic".into(),
                warranty_months: 24,
                is_original_equipment: false,
            },
        )?,
        Product::service(
            ProductCode::new("SV001")?,
            "Oil Change",
            dec!(39.99),
            20,
            ServiceDetails {
                estimated_hours: 1,
                complexity: ComplexityTier::Basic,
                requires_certification: false,
            },
        )?,
        // Half-hour jobs are recorded as zero whole hours.
        Product::service(
            ProductCode::new("SV002")?,
            "Tire Rotation",
            dec!(25.00),
            15,
            ServiceDetails {
                estimated_hours: 0,
                complexity: ComplexityTier::Basic,
                requires_certification: false,
            },
        )?,
    ])
}

pub fn default_users() -> DomainResult<Vec<User>> {
    Ok(vec![
        Admin::new(UserId::new("admin")?, "admin", "Administrator")
            .with_level(Admin::DEFAULT_LEVEL)
            .into(),
        Customer::new(UserId::new("cathy")?, "cathy", "Cathy Customer")
            .with_contact("123 Main St", "555-1234")
            .into(),
    ])
}
