//! Domain layer: content types, their field schema, and the records the API returns.

pub mod entities;
pub mod schema;
pub mod types;
