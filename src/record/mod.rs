//! Record registration and field access
//!
//! Record types register their filterable fields explicitly through
//! [`Record::schema`]; the cache turns that registration into a
//! case-insensitive name lookup built once per type.

pub mod cache;
mod schema;
mod value;

pub use cache::{accessor_for, field_map, FieldMap};
pub use schema::*;
pub use value::*;
