//! Entity schemas for the trading app.
//!
//! Every record that enters the service, whether from a request body or
//! from the seed file, passes through a [`Schema`] implementation that
//! reports every problem at once as a list of [`FieldError`]s.
//!
//! # Key Types
//!
//! - [`User`] with optional nested [`Degree`] records
//! - [`Trade`] with a non-negative `price`
//! - [`Page`] — limit/offset window used by trade listing
//! - [`ValidationErrors`] — structured, per-field failure

pub mod coerce;
pub mod degree;
pub mod error;
pub mod page;
pub mod schema;
pub mod trade;
pub mod user;

pub use degree::{Degree, DegreeType};
pub use error::{ErrorKind, FieldError, Loc, LocItem, ValidationErrors};
pub use page::{Page, DEFAULT_LIMIT, DEFAULT_OFFSET};
pub use schema::{validate_list, Schema, SchemaOptions};
pub use trade::{Trade, KNOWN_SIDES, MIN_PRICE};
pub use user::{User, KNOWN_ROLES};
