use autoshop_auth::{Admin, Customer, User};
use autoshop_core::UserId;

use super::{ParseError, Record, parse_field, split_fields};

const ADMIN_TAG: &str = "Admin";
const CUSTOMER_TAG: &str = "Customer";

const MIN_FIELDS: usize = 4;

impl Record for User {
    fn encode(&self) -> String {
        match self {
            User::Admin(a) => format!(
                "{ADMIN_TAG},{},{},{},{}",
                a.user_id,
                a.stored_secret(),
                a.name,
                a.admin_level
            ),
            User::Customer(c) => format!(
                "{CUSTOMER_TAG},{},{},{},{},{}",
                c.user_id,
                c.stored_secret(),
                c.name,
                c.address,
                c.phone
            ),
        }
    }

    fn decode(line: &str) -> Result<Self, ParseError> {
        let fields = split_fields(line, MIN_FIELDS)?;
        let tag = fields[0];
        let user_id = UserId::new(fields[1])?;
        let secret = fields[2];
        let name = fields[3];
        let optional = |idx: usize| fields.get(idx).copied().unwrap_or_default();

        if tag.eq_ignore_ascii_case(ADMIN_TAG) {
            let level = match fields.get(4) {
                Some(raw) => parse_field("admin level", raw)?,
                None => Admin::DEFAULT_LEVEL,
            };
            Ok(Admin::new(user_id, secret, name).with_level(level).into())
        } else if tag.eq_ignore_ascii_case(CUSTOMER_TAG) {
            Ok(Customer::new(user_id, secret, name)
                .with_contact(optional(4), optional(5))
                .into())
        } else {
            Err(ParseError::UnknownType(tag.to_string()))
        }
    }
}
