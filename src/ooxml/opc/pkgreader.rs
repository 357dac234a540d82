//! Low-level, read-only API to a serialized Open Packaging Convention (OPC) package.
//!
//! This module provides the PackageReader for parsing OPC packages, including
//! content type mapping, relationship resolution, and part loading.

use crate::ooxml::opc::constants::target_mode;
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::{CONTENT_TYPES_URI, PACKAGE_URI, PackURI};
use crate::ooxml::opc::phys_pkg::PhysPkgReader;
use quick_xml::Reader;
use quick_xml::events::Event;
use smallvec::SmallVec;
use std::collections::{HashMap, HashSet};
use std::io::{Read, Seek};

/// Serialized part with its content and relationships, before being turned
/// into a Part object.
#[derive(Debug)]
pub struct SerializedPart {
    pub partname: PackURI,
    pub content_type: String,
    /// The relationship type that first referred to this part
    pub reltype: String,
    pub blob: Vec<u8>,
    pub srels: SmallVec<[SerializedRelationship; 8]>,
}

/// Serialized relationship as read from a .rels file.
#[derive(Debug, Clone)]
pub struct SerializedRelationship {
    /// Base URI for resolving relative references
    pub base_uri: String,
    pub r_id: String,
    pub reltype: String,
    /// Target reference (relative URI or external URL)
    pub target_ref: String,
    /// Target mode (Internal or External)
    pub target_mode: String,
}

impl SerializedRelationship {
    #[inline]
    pub fn is_external(&self) -> bool {
        self.target_mode == target_mode::EXTERNAL
    }

    /// Resolve the target reference against the base URI.
    pub fn target_partname(&self) -> Result<PackURI> {
        if self.is_external() {
            return Err(OpcError::InvalidRelationship(
                "Cannot get target_partname for external relationship".to_string(),
            ));
        }
        PackURI::from_rel_ref(&self.base_uri, &self.target_ref).map_err(OpcError::InvalidPackUri)
    }
}

/// Content type map built from the Default and Override elements of
/// [Content_Types].xml.
struct ContentTypeMap {
    /// Maps lowercase file extensions to default content types
    defaults: HashMap<String, String>,

    /// Maps specific partnames to override content types
    overrides: HashMap<String, String>,
}

impl ContentTypeMap {
    fn from_xml(xml: &[u8]) -> Result<Self> {
        let mut map = Self {
            defaults: HashMap::new(),
            overrides: HashMap::new(),
        };
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                    let is_default = match e.local_name().as_ref() {
                        b"Default" => true,
                        b"Override" => false,
                        _ => {
                            buf.clear();
                            continue;
                        },
                    };

                    // <Default Extension="xml" ContentType="..."/>
                    // <Override PartName="/ppt/presentation.xml" ContentType="..."/>
                    let mut key = None;
                    let mut content_type = None;

                    for attr in e.attributes() {
                        let attr = attr?;
                        match attr.key.as_ref() {
                            b"Extension" if is_default => {
                                key = Some(attr.unescape_value()?.to_lowercase());
                            },
                            b"PartName" if !is_default => {
                                key = Some(attr.unescape_value()?.to_string());
                            },
                            b"ContentType" => {
                                content_type = Some(attr.unescape_value()?.to_string());
                            },
                            _ => {},
                        }
                    }

                    if let (Some(key), Some(ct)) = (key, content_type) {
                        if is_default {
                            map.defaults.insert(key, ct);
                        } else {
                            map.overrides.insert(key, ct);
                        }
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(OpcError::XmlError(format!("Content types parse error: {}", e)));
                },
                _ => {},
            }
            buf.clear();
        }

        Ok(map)
    }

    /// Override first, then the default for the (case-insensitive) extension.
    fn get(&self, pack_uri: &PackURI) -> Result<String> {
        if let Some(ct) = self.overrides.get(pack_uri.as_str()) {
            return Ok(ct.clone());
        }

        let ext = pack_uri.ext().to_lowercase();
        self.defaults
            .get(&ext)
            .cloned()
            .ok_or_else(|| OpcError::ContentTypeNotFound(pack_uri.to_string()))
    }
}

/// Package reader that provides access to serialized parts and relationships.
///
/// Only parts reachable from the package relationships are loaded.
pub struct PackageReader {
    pkg_srels: SmallVec<[SerializedRelationship; 8]>,
    sparts: Vec<SerializedPart>,
}

impl PackageReader {
    /// Open and parse an OPC package:
    /// 1. Decompress every archive member
    /// 2. Parse content types and package relationships from memory
    /// 3. Walk the relationship graph, taking ownership of each part's blob
    pub fn from_phys_reader<R: Read + Seek>(phys_reader: &mut PhysPkgReader<R>) -> Result<Self> {
        let mut all_files = phys_reader.read_all()?;

        let content_types_path = CONTENT_TYPES_URI.trim_start_matches('/');
        let content_types_xml = all_files
            .get(content_types_path)
            .ok_or_else(|| OpcError::PartNotFound(content_types_path.to_string()))?;
        let content_types = ContentTypeMap::from_xml(content_types_xml)?;

        let package_uri = PackURI::new(PACKAGE_URI).map_err(OpcError::InvalidPackUri)?;
        let pkg_srels = Self::load_rels_from_cache(&all_files, &package_uri)?;

        let sparts = Self::load_parts_from_cache(&mut all_files, &pkg_srels, &content_types)?;

        Ok(Self { pkg_srels, sparts })
    }

    fn load_rels_from_cache(
        cache: &HashMap<String, Vec<u8>>,
        source_uri: &PackURI,
    ) -> Result<SmallVec<[SerializedRelationship; 8]>> {
        let rels_uri = source_uri.rels_uri().map_err(OpcError::InvalidPackUri)?;

        match cache.get(rels_uri.membername()) {
            Some(xml) => Self::parse_rels_xml(xml, source_uri.base_uri()),
            None => Ok(SmallVec::new()),
        }
    }

    fn parse_rels_xml(
        rels_xml: &[u8],
        base_uri: &str,
    ) -> Result<SmallVec<[SerializedRelationship; 8]>> {
        let mut srels = SmallVec::new();
        let mut reader = Reader::from_reader(rels_xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                    if e.local_name().as_ref() == b"Relationship" =>
                {
                    let mut r_id = None;
                    let mut reltype = None;
                    let mut target_ref = None;
                    let mut target_mode = target_mode::INTERNAL.to_string();

                    for attr in e.attributes() {
                        let attr = attr?;
                        match attr.key.as_ref() {
                            b"Id" => r_id = Some(attr.unescape_value()?.to_string()),
                            b"Type" => reltype = Some(attr.unescape_value()?.to_string()),
                            b"Target" => target_ref = Some(attr.unescape_value()?.to_string()),
                            b"TargetMode" => target_mode = attr.unescape_value()?.to_string(),
                            _ => {},
                        }
                    }

                    if let (Some(id), Some(rt), Some(tr)) = (r_id, reltype, target_ref) {
                        srels.push(SerializedRelationship {
                            base_uri: base_uri.to_string(),
                            r_id: id,
                            reltype: rt,
                            target_ref: tr,
                            target_mode,
                        });
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(OpcError::XmlError(format!("Rels parse error: {}", e))),
                _ => {},
            }
            buf.clear();
        }

        Ok(srels)
    }

    /// Traverse the relationship graph over pre-decompressed data, moving each
    /// blob out of the cache.
    fn load_parts_from_cache(
        cache: &mut HashMap<String, Vec<u8>>,
        pkg_srels: &[SerializedRelationship],
        content_types: &ContentTypeMap,
    ) -> Result<Vec<SerializedPart>> {
        let mut sparts = Vec::with_capacity(32);
        let mut visited = HashSet::with_capacity(32);
        let mut work_queue: Vec<(PackURI, String)> = Vec::with_capacity(pkg_srels.len());

        let enqueue = |srels: &[SerializedRelationship],
                       visited: &mut HashSet<String>,
                       work_queue: &mut Vec<(PackURI, String)>| {
            for srel in srels.iter().filter(|srel| !srel.is_external()) {
                if let Ok(partname) = srel.target_partname()
                    && visited.insert(partname.to_string())
                {
                    work_queue.push((partname, srel.reltype.clone()));
                }
            }
        };

        enqueue(pkg_srels, &mut visited, &mut work_queue);

        while let Some((partname, reltype)) = work_queue.pop() {
            // Dangling internal targets are tolerated; the referencing part keeps its rel
            let Some(blob) = cache.remove(partname.membername()) else {
                continue;
            };

            let part_srels = Self::load_rels_from_cache(cache, &partname)?;
            enqueue(&part_srels, &mut visited, &mut work_queue);

            let content_type = content_types.get(&partname)?;

            sparts.push(SerializedPart {
                partname,
                content_type,
                reltype,
                blob,
                srels: part_srels,
            });
        }

        Ok(sparts)
    }

    /// Get package-level relationships.
    pub fn pkg_srels(&self) -> &[SerializedRelationship] {
        &self.pkg_srels
    }

    /// Take ownership of all serialized parts.
    pub fn take_sparts(&mut self) -> Vec<SerializedPart> {
        std::mem::take(&mut self.sparts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::content_type as ct;

    #[test]
    fn test_content_type_map() {
        let xml = br#"<?xml version="1.0"?>
            <Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
                <Default Extension="XML" ContentType="application/xml"/>
                <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
                <Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>
            </Types>"#;

        let ct_map = ContentTypeMap::from_xml(xml).unwrap();

        let uri = PackURI::new("/ppt/tableStyles.xml").unwrap();
        assert_eq!(ct_map.get(&uri).unwrap(), ct::XML);

        let uri = PackURI::new("/ppt/presentation.xml").unwrap();
        assert_eq!(ct_map.get(&uri).unwrap(), ct::PML_PRESENTATION_MAIN);

        let uri = PackURI::new("/ppt/media/image1.png").unwrap();
        assert!(matches!(ct_map.get(&uri), Err(OpcError::ContentTypeNotFound(_))));
    }

    #[test]
    fn test_parse_rels_xml() {
        let xml = br#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
            <Relationship Id="rId1" Type="http://x/slideLayout" Target="../slideLayouts/slideLayout1.xml"/>
            <Relationship Id="rId2" Type="http://x/hyperlink" Target="https://example.com/?a=1&amp;b=2" TargetMode="External"/>
        </Relationships>"#;

        let srels = PackageReader::parse_rels_xml(xml, "/ppt/slides").unwrap();
        assert_eq!(srels.len(), 2);
        assert_eq!(
            srels[0].target_partname().unwrap().as_str(),
            "/ppt/slideLayouts/slideLayout1.xml"
        );
        assert!(srels[1].is_external());
        assert_eq!(srels[1].target_ref, "https://example.com/?a=1&b=2");
    }
}
