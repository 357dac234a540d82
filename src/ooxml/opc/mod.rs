/// Open Packaging Conventions (OPC) implementation.
///
/// The structure and packaging format underneath every Office Open XML
/// document:
///
/// - Package structure (parts, relationships)
/// - Content type management
/// - ZIP-based physical packaging
///
/// Parts are loaded by walking the relationship graph from the package root
/// and are written back in a deterministic order.
pub mod constants;
pub mod error;
pub mod package;
pub mod packuri;
pub mod part;
pub mod phys_pkg;
pub mod pkgreader;
pub mod pkgwriter;
pub mod rel;

pub use package::OpcPackage;
pub use packuri::PackURI;
pub use part::{BlobPart, Part, XmlPart, parse_xml_part};
pub use rel::{Relationship, Relationships};
