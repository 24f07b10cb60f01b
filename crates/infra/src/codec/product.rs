use rust_decimal::Decimal;

use autoshop_catalog::{ComplexityTier, PartDetails, Product, ProductDetails, ServiceDetails};
use autoshop_core::ProductCode;

use super::{ParseError, Record, encode_bool, parse_bool, parse_field, require_fields, split_fields};

const PART_TAG: &str = "AutoPart";
const SERVICE_TAG: &str = "ServiceItem";

const COMMON_FIELDS: usize = 5;
const PART_FIELDS: usize = 9;
const SERVICE_FIELDS: usize = 8;

impl Record for Product {
    fn encode(&self) -> String {
        let common = format!(
            "{},{},{},{}",
            self.code(),
            self.description(),
            self.unit_price(),
            self.stock()
        );
        match self.details() {
            ProductDetails::Part(p) => format!(
                "{PART_TAG},{common},{},{},{},{}",
                p.manufacturer,
                p.model_compatibility,
                p.warranty_months,
                encode_bool(p.is_original_equipment)
            ),
            ProductDetails::Service(s) => format!(
                "{SERVICE_TAG},{common},{},{},{}",
                s.estimated_hours,
                s.complexity,
                encode_bool(s.requires_certification)
            ),
        }
    }

    fn decode(line: &str) -> Result<Self, ParseError> {
        let fields = split_fields(line, COMMON_FIELDS)?;
        let tag = fields[0];
        let code = ProductCode::new(fields[1])?;
        let description = fields[2];
        let unit_price: Decimal = parse_field("price", fields[3])?;
        let stock: i64 = parse_field("stock", fields[4])?;

        if tag.eq_ignore_ascii_case(PART_TAG) {
            require_fields(&fields, PART_FIELDS)?;
            let details = PartDetails {
                manufacturer: fields[5].to_string(),
                model_compatibility: fields[6].to_string(),
                warranty_months: parse_field("warranty months", fields[7])?,
                is_original_equipment: parse_bool("OEM flag", fields[8])?,
            };
            Ok(Product::part(code, description, unit_price, stock, details)?)
        } else if tag.eq_ignore_ascii_case(SERVICE_TAG) {
            require_fields(&fields, SERVICE_FIELDS)?;
            let details = ServiceDetails {
                estimated_hours: parse_field("estimated hours", fields[5])?,
                complexity: parse_field::<ComplexityTier>("complexity", fields[6])?,
                requires_certification: parse_bool("certification flag", fields[7])?,
            };
            Ok(Product::service(code, description, unit_price, stock, details)?)
        } else {
            Err(ParseError::UnknownType(tag.to_string()))
        }
    }
}
