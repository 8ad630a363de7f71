use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::coerce;
use crate::degree::Degree;
use crate::error::{FieldError, Loc, ValidationErrors};
use crate::schema::{one_of, validate_list, ObjectReader, Schema, SchemaOptions};

/// Roles accepted when [`SchemaOptions::strict_role`] is set.
pub const KNOWN_ROLES: [&str; 3] = ["admin", "investor", "trader"];

/// A user record. `name` is the only field mutated after seeding.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub role: String,
    pub name: String,
    /// Zero or more degrees; `None` when the record was created without any.
    pub degree: Option<Vec<Degree>>,
}

impl User {
    pub fn new(id: i64, role: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            role: role.into(),
            name: name.into(),
            degree: None,
        }
    }

    pub fn with_degrees(mut self, degrees: Vec<Degree>) -> Self {
        self.degree = Some(degrees);
        self
    }

    /// Degrees as a slice, empty when none were recorded.
    pub fn degrees(&self) -> &[Degree] {
        self.degree.as_deref().unwrap_or_default()
    }
}

impl Schema for User {
    fn validate(input: &Value, loc: &Loc, options: &SchemaOptions) -> Result<Self, ValidationErrors> {
        let mut r = ObjectReader::new(input, loc)?;
        let id = r.required("id", coerce::int);
        let role = r.required("role", coerce::string);
        let name = r.required("name", coerce::string);
        let degree = r.optional("degree", |v, l| validate_list::<Degree>(v, l, options, None));

        if options.strict_role {
            if let Some(role) = &role {
                let role_loc = r.loc().child("role");
                if let Err(e) = one_of(role, &KNOWN_ROLES, &role_loc) {
                    r.push(e);
                }
            }
        }
        r.finish()?;

        match (id, role, name, degree) {
            (Some(id), Some(role), Some(name), Some(degree)) => Ok(Self {
                id,
                role,
                name,
                degree,
            }),
            _ => Err(FieldError::missing(loc.clone()).into()),
        }
    }
}
