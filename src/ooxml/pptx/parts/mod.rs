/// Parts for PowerPoint presentation documents.
///
/// Wrapper types for the XML parts of a .pptx package that are read without
/// being edited.
pub mod presentation;

pub use presentation::PresentationPart;
