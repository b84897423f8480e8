//! Lookup domain model
//!
//! - **Aggregates**: `PhoneNumberInfo`, the per-request input/display record
//! - **Value Objects**: `Caller`, `FieldId`, `FormError`

pub mod value_objects;
pub mod aggregates;

pub use value_objects::*;
pub use aggregates::*;
