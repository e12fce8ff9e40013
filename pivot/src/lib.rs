//! FILENAME: pivot/src/lib.rs
//! Pivot specifications for data model objects.
//!
//! This crate builds the JSON document the server's pivot endpoint accepts,
//! checking every element against the field catalog of the data model object
//! it is built from. It depends on `datamodel` for the catalog and on nothing
//! that talks to the network: submission goes through the `PivotService`
//! trait, which the `service` crate implements.
//!
//! Layers:
//! - `functions`: Token tables and the allowed-function tables (what is LEGAL)
//! - `filter`, `split`, `cell_value`: Validated pivot elements
//! - `specification`: The aggregate and its wire form (what gets SENT)
//! - `result`: Submission seam and the generated queries (what COMES BACK)

pub mod cell_value;
pub mod error;
pub mod field_ref;
pub mod filter;
pub mod functions;
pub mod result;
pub mod specification;
pub mod split;

pub use cell_value::CellValue;
pub use error::{PivotError, PivotResult};
pub use field_ref::FieldRef;
pub use filter::{
    BooleanFilter, Comparison, ComparisonFilter, Ipv4Filter, LimitFilter, NumberFilter,
    PivotFilter, StringFilter,
};
pub use functions::*;
pub use result::{Pivot, PivotRequest, PivotService};
pub use specification::PivotSpecification;
pub use split::{ColumnSplit, NumberRanges, RowSplit, Split, SplitShape};
