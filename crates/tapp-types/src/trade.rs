use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::coerce;
use crate::error::{FieldError, Loc, ValidationErrors};
use crate::schema::{ge, one_of, ObjectReader, Schema, SchemaOptions};

/// Sides accepted when [`SchemaOptions::strict_side`] is set.
pub const KNOWN_SIDES: [&str; 2] = ["buy", "sell"];

/// Lower bound on `Trade.price`, inclusive.
pub const MIN_PRICE: i64 = 0;

/// A single executed trade. Trades are append-only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub id: i64,
    /// Reference to `User.id`; not checked against the user store.
    pub user_id: i64,
    pub currency: String,
    pub side: String,
    pub price: f64,
    pub amount: f64,
}

impl Schema for Trade {
    fn validate(input: &Value, loc: &Loc, options: &SchemaOptions) -> Result<Self, ValidationErrors> {
        let mut r = ObjectReader::new(input, loc)?;
        let id = r.required("id", coerce::int);
        let user_id = r.required("user_id", coerce::int);
        let currency = r.required("currency", coerce::string);
        let side = r.required("side", |v, l| {
            let side = coerce::string(v, l)?;
            if options.strict_side {
                one_of(&side, &KNOWN_SIDES, l)?;
            }
            Ok(side)
        });
        let price = r.required("price", |v, l| {
            let price = coerce::float(v, l)?;
            ge(price, MIN_PRICE, l)?;
            Ok(price)
        });
        let amount = r.required("amount", coerce::float);
        r.finish()?;

        match (id, user_id, currency, side, price, amount) {
            (Some(id), Some(user_id), Some(currency), Some(side), Some(price), Some(amount)) => {
                Ok(Self {
                    id,
                    user_id,
                    currency,
                    side,
                    price,
                    amount,
                })
            }
            _ => Err(FieldError::missing(loc.clone()).into()),
        }
    }
}
