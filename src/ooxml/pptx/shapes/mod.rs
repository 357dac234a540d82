/// Shapes module for PowerPoint presentations.
///
/// This module provides views over the shapes of a slide:
/// - Text shapes with text frames
/// - Graphic frames holding tables
/// - Pictures, connectors and groups, recognized by type
///
/// The design follows the python-pptx library structure.
pub mod base;
pub mod table;
pub mod textframe;

pub use base::{BaseShape, BaseShapeMut, ShapeType};
pub use table::{Table, TableCellMut, TableMut};
pub use textframe::{LINE_BREAK, TextFrame, TextFrameMut};
