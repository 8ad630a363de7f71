use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::coerce;
use crate::error::{FieldError, Loc, ValidationErrors};
use crate::schema::{enum_error, ObjectReader, Schema, SchemaOptions};

/// Qualification level recorded on a degree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DegreeType {
    Newbie,
    Expert,
}

impl DegreeType {
    pub const ALL: [&'static str; 2] = ["newbie", "expert"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Newbie => "newbie",
            Self::Expert => "expert",
        }
    }

    fn parse(value: &Value, loc: &Loc) -> Result<Self, FieldError> {
        match value.as_str() {
            Some("newbie") => Ok(Self::Newbie),
            Some("expert") => Ok(Self::Expert),
            _ => Err(enum_error(value.clone(), &Self::ALL, loc)),
        }
    }
}

impl fmt::Display for DegreeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A qualification record owned by exactly one user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Degree {
    pub id: i64,
    pub created_at: NaiveDateTime,
    pub type_degree: DegreeType,
}

impl Schema for Degree {
    fn validate(input: &Value, loc: &Loc, _options: &SchemaOptions) -> Result<Self, ValidationErrors> {
        let mut r = ObjectReader::new(input, loc)?;
        let id = r.required("id", coerce::int);
        let created_at = r.required("created_at", coerce::datetime);
        let type_degree = r.required("type_degree", DegreeType::parse);
        r.finish()?;

        match (id, created_at, type_degree) {
            (Some(id), Some(created_at), Some(type_degree)) => Ok(Self {
                id,
                created_at,
                type_degree,
            }),
            _ => Err(FieldError::missing(loc.clone()).into()),
        }
    }
}
