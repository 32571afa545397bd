//! e-URA record types, schema, validation and payload serialization.
//!
//! The pipeline is validate-then-serialize: a raw [`InvoiceRecord`] is
//! checked against the process-wide [`Schema`] and turned into a
//! [`FormattedRecord`], which [`compose`] writes as the newline-delimited
//! payload scanned by e-URA readers.

mod builder;
mod error;
mod payload;
mod schema;
mod types;
mod validation;

pub use builder::*;
pub use error::*;
pub use payload::*;
pub use schema::*;
pub use types::*;
pub use validation::*;
