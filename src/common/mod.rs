//! Common types and utilities shared across the package and template layers.

pub mod xml;

pub use xml::{XmlDocument, XmlElement, XmlNode};
