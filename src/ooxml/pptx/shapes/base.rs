/// Base shape types for PowerPoint presentations.
use crate::common::xml::XmlElement;
use crate::ooxml::pptx::shapes::table::{Table, TableMut};
use crate::ooxml::pptx::shapes::textframe::{TextFrame, TextFrameMut};

/// Shape type enumeration.
///
/// Indicates what kind of shape this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeType {
    /// A text shape (p:sp)
    Shape,
    /// A picture shape (p:pic)
    Picture,
    /// A graphic frame containing a table or chart (p:graphicFrame)
    GraphicFrame,
    /// A group shape (p:grpSp)
    GroupShape,
    /// A connector shape (p:cxnSp)
    Connector,
}

impl ShapeType {
    /// Map a shape tree child to its shape type; `None` for non-shape
    /// children such as the tree's own properties or extension lists.
    pub fn from_local_name(local: &str) -> Option<Self> {
        match local {
            "sp" => Some(ShapeType::Shape),
            "pic" => Some(ShapeType::Picture),
            "graphicFrame" => Some(ShapeType::GraphicFrame),
            "grpSp" => Some(ShapeType::GroupShape),
            "cxnSp" => Some(ShapeType::Connector),
            _ => None,
        }
    }
}

/// Name from the shape's non-visual properties (`p:nvXxxPr/p:cNvPr/@name`).
fn shape_name(element: &XmlElement) -> Option<String> {
    element
        .child_elements()
        .find(|e| e.local_name().starts_with("nv"))
        .and_then(|nv| nv.child("cNvPr"))
        .and_then(|c| c.attribute("name"))
}

const TABLE_PATH: [&str; 3] = ["graphic", "graphicData", "tbl"];

/// A shape on a slide, borrowed from the slide's XML tree.
///
/// # Examples
///
/// ```rust,ignore
/// for shape in slide.shapes() {
///     if let Some(text) = shape.text() {
///         println!("{}: {}", shape.name().unwrap_or_default(), text);
///     }
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BaseShape<'a> {
    element: &'a XmlElement,
    shape_type: ShapeType,
}

impl<'a> BaseShape<'a> {
    pub fn new(element: &'a XmlElement, shape_type: ShapeType) -> Self {
        Self {
            element,
            shape_type,
        }
    }

    #[inline]
    pub fn shape_type(&self) -> ShapeType {
        self.shape_type
    }

    pub fn name(&self) -> Option<String> {
        shape_name(self.element)
    }

    /// Check if this shape has a text frame.
    pub fn has_text_frame(&self) -> bool {
        self.text_frame().is_some()
    }

    pub fn text_frame(&self) -> Option<TextFrame<'a>> {
        if self.shape_type != ShapeType::Shape {
            return None;
        }
        self.element.child("txBody").map(TextFrame::new)
    }

    /// Text of the shape's text frame; `None` for shapes without one.
    pub fn text(&self) -> Option<String> {
        self.text_frame().map(|tf| tf.text())
    }

    /// Check if this shape contains a table.
    pub fn has_table(&self) -> bool {
        self.table().is_some()
    }

    pub fn table(&self) -> Option<Table<'a>> {
        if self.shape_type != ShapeType::GraphicFrame {
            return None;
        }
        self.element.find_path(&TABLE_PATH).map(Table::new)
    }

    #[inline]
    pub fn element(&self) -> &'a XmlElement {
        self.element
    }
}

/// A shape on a slide with mutable access to its text and table content.
#[derive(Debug)]
pub struct BaseShapeMut<'a> {
    element: &'a mut XmlElement,
    shape_type: ShapeType,
}

impl<'a> BaseShapeMut<'a> {
    pub fn new(element: &'a mut XmlElement, shape_type: ShapeType) -> Self {
        Self {
            element,
            shape_type,
        }
    }

    #[inline]
    pub fn shape_type(&self) -> ShapeType {
        self.shape_type
    }

    /// Read-only view of the same shape.
    pub fn as_shape(&self) -> BaseShape<'_> {
        BaseShape::new(&*self.element, self.shape_type)
    }

    pub fn name(&self) -> Option<String> {
        shape_name(&*self.element)
    }

    pub fn text_frame_mut(&mut self) -> Option<TextFrameMut<'_>> {
        if self.shape_type != ShapeType::Shape {
            return None;
        }
        self.element.child_mut("txBody").map(TextFrameMut::new)
    }

    pub fn table_mut(&mut self) -> Option<TableMut<'_>> {
        if self.shape_type != ShapeType::GraphicFrame {
            return None;
        }
        self.element.find_path_mut(&TABLE_PATH).map(TableMut::new)
    }
}
