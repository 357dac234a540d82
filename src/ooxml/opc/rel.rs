//! Relationship-related objects for OPC packages.
//!
//! Relationships connect a source (the package or a part) to its targets, either
//! other parts or external URLs, and are serialized to `.rels` parts.

use crate::common::xml::escape_xml;
use crate::ooxml::opc::constants::namespace;
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::PackURI;
use std::collections::HashMap;

/// A single relationship from a source part to a target.
#[derive(Debug, Clone)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1", "rId2")
    r_id: String,

    /// Relationship type URI
    reltype: String,

    /// Target reference - either a part URI or external URL
    target_ref: String,

    /// Base URI for resolving relative references
    base_uri: String,

    /// Whether this is an external relationship
    is_external: bool,
}

impl Relationship {
    pub fn new(
        r_id: String,
        reltype: String,
        target_ref: String,
        base_uri: String,
        is_external: bool,
    ) -> Self {
        Self {
            r_id,
            reltype,
            target_ref,
            base_uri,
            is_external,
        }
    }

    #[inline]
    pub fn r_id(&self) -> &str {
        &self.r_id
    }

    #[inline]
    pub fn reltype(&self) -> &str {
        &self.reltype
    }

    /// Relative part reference for internal relationships, URL for external ones.
    #[inline]
    pub fn target_ref(&self) -> &str {
        &self.target_ref
    }

    #[inline]
    pub fn is_external(&self) -> bool {
        self.is_external
    }

    /// Get the absolute target partname for internal relationships.
    ///
    /// Returns an error if this is an external relationship.
    pub fn target_partname(&self) -> Result<PackURI> {
        if self.is_external {
            return Err(OpcError::InvalidRelationship(format!(
                "Cannot get target_partname for external relationship {}",
                self.r_id
            )));
        }
        PackURI::from_rel_ref(&self.base_uri, &self.target_ref).map_err(OpcError::InvalidPackUri)
    }
}

/// Collection of relationships from a single source, keyed by rId.
#[derive(Debug)]
pub struct Relationships {
    /// Base URI for resolving relative references
    base_uri: String,

    /// Map of relationship ID to Relationship
    rels: HashMap<String, Relationship>,
}

impl Relationships {
    pub fn new(base_uri: String) -> Self {
        Self {
            base_uri,
            rels: HashMap::new(),
        }
    }

    /// Add a relationship to the collection, replacing any with the same rId.
    pub fn add_relationship(
        &mut self,
        reltype: String,
        target_ref: String,
        r_id: String,
        is_external: bool,
    ) {
        let rel = Relationship::new(
            r_id.clone(),
            reltype,
            target_ref,
            self.base_uri.clone(),
            is_external,
        );
        self.rels.insert(r_id, rel);
    }

    /// Get a relationship by its ID.
    #[inline]
    pub fn get(&self, r_id: &str) -> Option<&Relationship> {
        self.rels.get(r_id)
    }

    /// Get the single relationship of a specific type.
    ///
    /// Returns an error if no relationship of the type is found,
    /// or if multiple relationships of the type exist.
    pub fn part_with_reltype(&self, reltype: &str) -> Result<&Relationship> {
        let mut matching = self.rels.values().filter(|rel| rel.reltype() == reltype);

        match (matching.next(), matching.next()) {
            (None, _) => Err(OpcError::RelationshipNotFound(format!(
                "No relationship of type '{}'",
                reltype
            ))),
            (Some(rel), None) => Ok(rel),
            (Some(_), Some(_)) => Err(OpcError::InvalidRelationship(format!(
                "Multiple relationships of type '{}'",
                reltype
            ))),
        }
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.rels.values()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rels.is_empty()
    }

    /// Serialize relationships to a `.rels` part, sorted by rId.
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(1024);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<Relationships xmlns="{}">"#, namespace::OPC_RELATIONSHIPS));

        let mut rels: Vec<&Relationship> = self.rels.values().collect();
        rels.sort_by(|a, b| {
            (a.r_id().len(), a.r_id()).cmp(&(b.r_id().len(), b.r_id()))
        });

        for rel in rels {
            let target_mode = if rel.is_external() {
                r#" TargetMode="External""#
            } else {
                ""
            };

            xml.push_str(&format!(
                r#"<Relationship Id="{}" Type="{}" Target="{}"{}/>"#,
                escape_xml(rel.r_id()),
                escape_xml(rel.reltype()),
                escape_xml(rel.target_ref()),
                target_mode
            ));
        }

        xml.push_str("</Relationships>");

        xml
    }
}

impl Default for Relationships {
    fn default() -> Self {
        Self::new("/".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::relationship_type as rt;

    #[test]
    fn test_target_partname_resolution() {
        let mut rels = Relationships::new("/ppt".to_string());
        rels.add_relationship(
            rt::SLIDE.to_string(),
            "slides/slide1.xml".to_string(),
            "rId2".to_string(),
            false,
        );

        let rel = rels.get("rId2").unwrap();
        assert_eq!(rel.target_partname().unwrap().as_str(), "/ppt/slides/slide1.xml");
    }

    #[test]
    fn test_external_has_no_partname() {
        let mut rels = Relationships::new("/ppt/slides".to_string());
        rels.add_relationship(
            "http://example.com/hyperlink".to_string(),
            "https://example.com".to_string(),
            "rId1".to_string(),
            true,
        );
        assert!(rels.get("rId1").unwrap().target_partname().is_err());
    }

    #[test]
    fn test_part_with_reltype() {
        let mut rels = Relationships::default();
        assert!(rels.part_with_reltype(rt::OFFICE_DOCUMENT).is_err());

        rels.add_relationship(
            rt::OFFICE_DOCUMENT.to_string(),
            "ppt/presentation.xml".to_string(),
            "rId1".to_string(),
            false,
        );
        assert_eq!(rels.part_with_reltype(rt::OFFICE_DOCUMENT).unwrap().r_id(), "rId1");

        rels.add_relationship(
            rt::OFFICE_DOCUMENT.to_string(),
            "ppt/other.xml".to_string(),
            "rId2".to_string(),
            false,
        );
        assert!(rels.part_with_reltype(rt::OFFICE_DOCUMENT).is_err());
    }

    #[test]
    fn test_to_xml_orders_numerically() {
        let mut rels = Relationships::default();
        for id in ["rId10", "rId2", "rId1"] {
            rels.add_relationship("t".to_string(), format!("{}.xml", id), id.to_string(), false);
        }
        let xml = rels.to_xml();
        let p1 = xml.find(r#"Id="rId1""#).unwrap();
        let p2 = xml.find(r#"Id="rId2""#).unwrap();
        let p10 = xml.find(r#"Id="rId10""#).unwrap();
        assert!(p1 < p2 && p2 < p10);
    }
}
