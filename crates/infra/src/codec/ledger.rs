use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use autoshop_core::{OrderId, ProductCode};
use autoshop_sales::Order;

use super::{ParseError, Record, parse_field, split_fields};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";
const ITEM_SEPARATOR: &str = "; ";

/// One `code(quantity)` entry of a ledger line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerItem {
    pub code: ProductCode,
    pub quantity: i64,
}

/// Historical order as recorded in the ledger file.
///
/// The ledger keeps a summary only: customer display name, minute-precision date,
/// the total rounded to cents and the quantity per product code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub order_id: OrderId,
    pub customer_name: String,
    pub placed_at: DateTime<Utc>,
    pub total_amount: Decimal,
    pub items: Vec<LedgerItem>,
}

impl From<&Order> for LedgerEntry {
    fn from(order: &Order) -> Self {
        Self {
            order_id: order.order_id(),
            customer_name: order.customer().name.clone(),
            placed_at: order.placed_at(),
            total_amount: order.total_amount().round_dp(2),
            items: order
                .lines()
                .iter()
                .map(|line| LedgerItem {
                    code: line.product_code.clone(),
                    quantity: line.quantity,
                })
                .collect(),
        }
    }
}

impl Record for LedgerEntry {
    const HEADER: Option<&'static str> = Some("OrderID,Customer,Date,TotalAmount,Items");

    fn encode(&self) -> String {
        let items: Vec<String> = self
            .items
            .iter()
            .map(|item| format!("{}({})", item.code, item.quantity))
            .collect();
        format!(
            "{},{},{},{:.2},{}",
            self.order_id,
            self.customer_name,
            self.placed_at.format(DATE_FORMAT),
            self.total_amount.round_dp(2),
            items.join(ITEM_SEPARATOR)
        )
    }

    fn decode(line: &str) -> Result<Self, ParseError> {
        let fields = split_fields(line, 5)?;
        let placed_at = NaiveDateTime::parse_from_str(fields[2], DATE_FORMAT)
            .map_err(|_| ParseError::InvalidField {
                field: "date",
                value: fields[2].to_string(),
            })?
            .and_utc();

        Ok(Self {
            order_id: parse_field("order id", fields[0])?,
            customer_name: fields[1].to_string(),
            placed_at,
            total_amount: parse_field("total amount", fields[3])?,
            items: decode_items(fields[4])?,
        })
    }
}

fn decode_items(raw: &str) -> Result<Vec<LedgerItem>, ParseError> {
    raw.split(';')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| -> Result<LedgerItem, ParseError> {
            let invalid = || ParseError::InvalidField {
                field: "item",
                value: item.to_string(),
            };
            let (code, rest) = item.split_once('(').ok_or_else(invalid)?;
            let quantity = rest.strip_suffix(')').ok_or_else(invalid)?;
            Ok(LedgerItem {
                code: ProductCode::new(code)?,
                quantity: parse_field("item quantity", quantity.trim())?,
            })
        })
        .collect()
}
