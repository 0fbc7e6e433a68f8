//! The route table: an immutable, name-keyed set of route definitions.

mod definition;
mod pattern;
mod table;

pub use definition::{RouteDefinition, Validator};
pub use pattern::{PathTemplate, Segment};
pub use table::{INTERNAL_ERROR, NOT_FOUND, RouteTable, RouteTableBuilder};
