pub mod geometry;
pub mod layout;
pub mod tree;

pub use geometry::{Sibling, resolve_insertion_point};
pub use layout::{LayoutMetrics, layout};
pub use tree::{Bounds, CardElement, ColumnElement, ElementId, VisualTree};
