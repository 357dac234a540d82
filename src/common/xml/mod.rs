//! XML helpers shared by the package and presentation layers.

pub mod escape;
pub mod tree;

pub use escape::{decode_control_chars, encode_control_chars, escape_xml, unescape_xml};
pub use tree::{XmlDocument, XmlElement, XmlError, XmlNode};
