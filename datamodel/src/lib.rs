//! FILENAME: datamodel/src/lib.rs
//! PURPOSE: Library entry point for data model descriptions.
//! CONTEXT: A data model is a server-side schema of typed fields arranged in
//! an inheritance hierarchy of objects. This crate parses the description the
//! server returns and exposes each object's resolved field catalog, which the
//! pivot builder validates against.

pub mod error;
pub mod field;
pub mod logging;
pub mod model;
pub mod object;

// Re-export commonly used types at the crate root
pub use error::DataModelError;
pub use field::{Field, FieldType, BASE_EVENT};
pub use model::{flag_value, AccelerationSettings, DataModel};
pub use object::{Calculation, Constraint, DataModelObject};
