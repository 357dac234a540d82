/// Slide objects: an owned, editable XML tree per slide part.
use crate::common::xml::{XmlDocument, XmlElement};
use crate::ooxml::opc::packuri::PackURI;
use crate::ooxml::pptx::shapes::base::{BaseShape, BaseShapeMut, ShapeType};

/// A slide in a presentation.
///
/// The slide part is parsed once when the presentation is loaded. Mutable
/// access marks the slide as modified so it is written back on save.
///
/// # Examples
///
/// ```rust,no_run
/// use pptx_templater::ooxml::pptx::Package;
///
/// let pres = Package::open("templates/default.pptx")?.into_presentation()?;
/// for slide in pres.slides() {
///     for shape in slide.shapes() {
///         println!("{:?} {:?}", shape.shape_type(), shape.name());
///     }
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Slide {
    partname: PackURI,
    document: XmlDocument,
    modified: bool,
}

impl Slide {
    pub(crate) fn new(partname: PackURI, document: XmlDocument) -> Self {
        Self {
            partname,
            document,
            modified: false,
        }
    }

    #[inline]
    pub fn partname(&self) -> &PackURI {
        &self.partname
    }

    /// The optional slide name (`p:cSld/@name`).
    pub fn name(&self) -> Option<String> {
        self.document.root().child("cSld")?.attribute("name")
    }

    /// Shapes in document order, with group members flattened in place of
    /// their group.
    pub fn shapes(&self) -> Vec<BaseShape<'_>> {
        let mut shapes = Vec::new();
        if let Some(tree) = self.document.root().find_path(&["cSld", "spTree"]) {
            collect_shapes(tree, &mut shapes);
        }
        shapes
    }

    /// Mutable counterpart of [`Slide::shapes`]; marks the slide modified.
    pub fn shapes_mut(&mut self) -> Vec<BaseShapeMut<'_>> {
        self.modified = true;
        let mut shapes = Vec::new();
        if let Some(tree) = self.document.root_mut().find_path_mut(&["cSld", "spTree"]) {
            collect_shapes_mut(tree, &mut shapes);
        }
        shapes
    }

    /// Text of every text frame on the slide, one frame per line.
    pub fn text(&self) -> String {
        self.shapes()
            .iter()
            .filter_map(BaseShape::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[inline]
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    #[inline]
    pub fn document(&self) -> &XmlDocument {
        &self.document
    }
}

fn collect_shapes<'a>(container: &'a XmlElement, out: &mut Vec<BaseShape<'a>>) {
    for child in container.child_elements() {
        match ShapeType::from_local_name(child.local_name()) {
            Some(ShapeType::GroupShape) => collect_shapes(child, out),
            Some(shape_type) => out.push(BaseShape::new(child, shape_type)),
            None => {},
        }
    }
}

fn collect_shapes_mut<'a>(container: &'a mut XmlElement, out: &mut Vec<BaseShapeMut<'a>>) {
    for child in container.child_elements_mut() {
        match ShapeType::from_local_name(child.local_name()) {
            Some(ShapeType::GroupShape) => collect_shapes_mut(child, out),
            Some(shape_type) => out.push(BaseShapeMut::new(child, shape_type)),
            None => {},
        }
    }
}
