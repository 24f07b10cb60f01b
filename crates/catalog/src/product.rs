use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use autoshop_core::{DomainError, DomainResult, Entity, ProductCode};

/// Upper bound (exclusive) for a listed unit price.
pub const MAX_UNIT_PRICE: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

/// Characters that would split a stored record.
const RECORD_BREAKS: [char; 3] = [',', '\n', '\r'];

/// The closed set of sellable product shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductKind {
    /// A physical auto part held in stock.
    Part,
    /// A billable workshop service; stock counts bookable slots.
    Service,
}

impl ProductKind {
    /// Resolve a browsing category name. Unrecognised names resolve to `None`.
    pub fn from_category(category: &str) -> Option<Self> {
        match category.trim().to_ascii_lowercase().as_str() {
            "part" | "parts" | "autopart" | "autoparts" => Some(Self::Part),
            "service" | "services" | "serviceitem" | "serviceitems" => Some(Self::Service),
            _ => None,
        }
    }
}

impl core::fmt::Display for ProductKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ProductKind::Part => f.write_str("Part"),
            ProductKind::Service => f.write_str("Service"),
        }
    }
}

/// Skill tier a service requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ComplexityTier {
    #[default]
    Basic,
    Intermediate,
    Advanced,
}

impl core::fmt::Display for ComplexityTier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ComplexityTier::Basic => f.write_str("Basic"),
            ComplexityTier::Intermediate => f.write_str("Intermediate"),
            ComplexityTier::Advanced => f.write_str("Advanced"),
        }
    }
}

impl FromStr for ComplexityTier {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(Self::Basic),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            other => Err(DomainError::validation(format!(
                "unknown complexity tier '{other}'"
            ))),
        }
    }
}

/// Part-only attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartDetails {
    pub manufacturer: String,
    pub model_compatibility: String,
    pub warranty_months: u32,
    pub is_original_equipment: bool,
}

/// Service-only attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDetails {
    pub estimated_hours: u32,
    pub complexity: ComplexityTier,
    pub requires_certification: bool,
}

/// Per-variant payload of a [`Product`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductDetails {
    Part(PartDetails),
    Service(ServiceDetails),
}

/// Volume discount schedules.
///
/// Tiers inside a schedule are mutually exclusive and evaluated high to low; the
/// variant schedules replace the standard rule rather than stacking on top of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiscountSchedule {
    /// 5% from 10 units.
    Standard,
    /// 15% from 20 units, else 8% from 10 units.
    PartVolume,
    /// 10% for more than one booking.
    ServiceBundle,
}

impl DiscountSchedule {
    /// Discount rate for a purchase quantity (0.08 = 8%).
    pub fn rate(self, quantity: i64) -> Decimal {
        match self {
            DiscountSchedule::Standard if quantity >= 10 => Decimal::new(5, 2),
            DiscountSchedule::PartVolume if quantity >= 20 => Decimal::new(15, 2),
            DiscountSchedule::PartVolume if quantity >= 10 => Decimal::new(8, 2),
            DiscountSchedule::ServiceBundle if quantity > 1 => Decimal::new(10, 2),
            _ => Decimal::ZERO,
        }
    }

    /// Discount amount on `unit_price * quantity`.
    pub fn discount(self, unit_price: Decimal, quantity: i64) -> Decimal {
        let rate = self.rate(quantity);
        if rate.is_zero() {
            return Decimal::ZERO;
        }
        unit_price * Decimal::from(quantity) * rate
    }
}

/// A sellable catalog item.
///
/// # Invariants
/// - `unit_price > 0`
/// - `stock >= 0` (enforced here and by every catalog mutation)
/// - `code` is immutable once constructed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProductFields")]
pub struct Product {
    code: ProductCode,
    description: String,
    unit_price: Decimal,
    stock: i64,
    details: ProductDetails,
}

/// Serialized shape of [`Product`]; decoding goes through the validating constructor.
#[derive(Deserialize)]
struct ProductFields {
    code: ProductCode,
    description: String,
    unit_price: Decimal,
    stock: i64,
    details: ProductDetails,
}

impl TryFrom<ProductFields> for Product {
    type Error = DomainError;

    fn try_from(fields: ProductFields) -> DomainResult<Self> {
        Self::new(
            fields.code,
            fields.description,
            fields.unit_price,
            fields.stock,
            fields.details,
        )
    }
}

impl Product {
    pub fn part(
        code: ProductCode,
        description: impl Into<String>,
        unit_price: Decimal,
        stock: i64,
        details: PartDetails,
    ) -> DomainResult<Self> {
        Self::new(code, description.into(), unit_price, stock, ProductDetails::Part(details))
    }

    pub fn service(
        code: ProductCode,
        description: impl Into<String>,
        unit_price: Decimal,
        stock: i64,
        details: ServiceDetails,
    ) -> DomainResult<Self> {
        Self::new(
            code,
            description.into(),
            unit_price,
            stock,
            ProductDetails::Service(details),
        )
    }

    fn new(
        code: ProductCode,
        description: String,
        unit_price: Decimal,
        stock: i64,
        details: ProductDetails,
    ) -> DomainResult<Self> {
        if unit_price <= Decimal::ZERO {
            return Err(DomainError::validation(format!(
                "{code}: unit price must be positive, got {unit_price}"
            )));
        }
        if stock < 0 {
            return Err(DomainError::validation(format!(
                "{code}: stock cannot be negative, got {stock}"
            )));
        }

        Ok(Self {
            code,
            description,
            unit_price,
            stock,
            details,
        })
    }

    pub fn code(&self) -> &ProductCode {
        &self.code
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    pub fn stock(&self) -> i64 {
        self.stock
    }

    pub fn details(&self) -> &ProductDetails {
        &self.details
    }

    pub fn kind(&self) -> ProductKind {
        match self.details {
            ProductDetails::Part(_) => ProductKind::Part,
            ProductDetails::Service(_) => ProductKind::Service,
        }
    }

    pub fn is_available(&self) -> bool {
        self.stock > 0
    }

    pub fn discount_schedule(&self) -> DiscountSchedule {
        match self.details {
            ProductDetails::Part(_) => DiscountSchedule::PartVolume,
            ProductDetails::Service(_) => DiscountSchedule::ServiceBundle,
        }
    }

    /// Volume discount for buying `quantity` units at the current unit price.
    pub fn discount(&self, quantity: i64) -> Decimal {
        self.discount_schedule().discount(self.unit_price, quantity)
    }

    /// Stock writes go through the catalog, which enforces the non-negative invariant.
    pub(crate) fn set_stock(&mut self, stock: i64) {
        debug_assert!(stock >= 0);
        self.stock = stock;
    }

    /// Listing rules applied when an administrator creates a product.
    pub(crate) fn validate_listing(&self) -> DomainResult<()> {
        let code = self.code.as_str();
        if code.len() < 3 || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(DomainError::validation(format!(
                "product code '{code}' must be at least 3 alphanumeric characters"
            )));
        }
        if self.description.trim().is_empty() {
            return Err(DomainError::validation("description cannot be empty"));
        }
        if self.unit_price >= MAX_UNIT_PRICE {
            return Err(DomainError::validation(format!(
                "unit price must be below {MAX_UNIT_PRICE}"
            )));
        }

        let mut text_fields = vec![self.description.as_str()];
        if let ProductDetails::Part(part) = &self.details {
            text_fields.push(&part.manufacturer);
            text_fields.push(&part.model_compatibility);
        }
        if text_fields.iter().any(|field| field.contains(RECORD_BREAKS)) {
            return Err(DomainError::validation(
                "text fields cannot contain ',' or line breaks",
            ));
        }
        Ok(())
    }
}

impl Entity for Product {
    type Id = ProductCode;

    fn id(&self) -> &Self::Id {
        &self.code
    }
}

impl core::fmt::Display for Product {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} - {} - ${}", self.code, self.description, self.unit_price)?;
        match &self.details {
            ProductDetails::Part(part) => write!(
                f,
                " - {} - Fits: {} - Warranty: {} months - {} - In Stock: {}",
                part.manufacturer,
                part.model_compatibility,
                part.warranty_months,
                if part.is_original_equipment { "OEM" } else { "Aftermarket" },
                self.stock
            ),
            ProductDetails::Service(service) => write!(
                f,
                " - Est. Hours: {} - Complexity: {} - {} - Available Slots: {}",
                service.estimated_hours,
                service.complexity,
                if service.requires_certification {
                    "Requires Certification"
                } else {
                    "No Certification Required"
                },
                self.stock
            ),
        }
    }
}
