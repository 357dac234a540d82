//! The in-memory OPC package.
//!
//! OpcPackage owns every reachable part together with the package-level
//! relationships, and can be serialized back into a ZIP archive.

use crate::ooxml::opc::constants::relationship_type;
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::{PACKAGE_URI, PackURI};
use crate::ooxml::opc::part::{Part, PartFactory};
use crate::ooxml::opc::phys_pkg::PhysPkgReader;
use crate::ooxml::opc::pkgreader::PackageReader;
use crate::ooxml::opc::pkgwriter::PackageWriter;
use crate::ooxml::opc::rel::Relationships;
use std::collections::HashMap;
use std::io::{Read, Seek};
use std::path::Path;

/// Main API type for working with OPC packages.
#[derive(Debug)]
pub struct OpcPackage {
    /// Package-level relationships
    rels: Relationships,

    /// All parts in the package, indexed by partname
    parts: HashMap<String, Box<dyn Part>>,
}

impl OpcPackage {
    /// Create a new empty OPC package.
    pub fn new() -> Self {
        Self {
            rels: Relationships::new(PACKAGE_URI.to_string()),
            parts: HashMap::new(),
        }
    }

    /// Open an OPC package from a file.
    ///
    /// # Example
    /// ```no_run
    /// use pptx_templater::ooxml::opc::OpcPackage;
    ///
    /// let pkg = OpcPackage::open("templates/default.pptx")?;
    /// println!("{} parts", pkg.part_count());
    /// # Ok::<(), pptx_templater::ooxml::opc::error::OpcError>(())
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut phys_reader = PhysPkgReader::open(path)?;
        Self::from_phys_reader(&mut phys_reader)
    }

    /// Load an OPC package from an owned byte buffer.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let mut phys_reader = PhysPkgReader::from_bytes(data)?;
        Self::from_phys_reader(&mut phys_reader)
    }

    /// Load an OPC package from a reader.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut phys_reader = PhysPkgReader::new(reader)?;
        Self::from_phys_reader(&mut phys_reader)
    }

    fn from_phys_reader<R: Read + Seek>(phys_reader: &mut PhysPkgReader<R>) -> Result<Self> {
        let pkg_reader = PackageReader::from_phys_reader(phys_reader)?;
        Self::unmarshal(pkg_reader)
    }

    /// Convert serialized parts and relationships into the in-memory graph.
    fn unmarshal(mut pkg_reader: PackageReader) -> Result<Self> {
        let mut package = Self::new();

        for srel in pkg_reader.pkg_srels() {
            package.rels.add_relationship(
                srel.reltype.clone(),
                srel.target_ref.clone(),
                srel.r_id.clone(),
                srel.is_external(),
            );
        }

        for spart in pkg_reader.take_sparts() {
            let key = spart.partname.to_string();
            let mut part = PartFactory::load(spart.partname, spart.content_type, spart.blob)?;

            for srel in spart.srels {
                let is_external = srel.is_external();
                part.rels_mut().add_relationship(
                    srel.reltype,
                    srel.target_ref,
                    srel.r_id,
                    is_external,
                );
            }

            package.parts.insert(key, part);
        }

        Ok(package)
    }

    /// The part targeted by the package's officeDocument relationship.
    pub fn main_document_part(&self) -> Result<&dyn Part> {
        self.part_by_reltype(relationship_type::OFFICE_DOCUMENT)
    }

    /// Get a part by its partname.
    pub fn get_part(&self, partname: &PackURI) -> Result<&dyn Part> {
        self.parts
            .get(partname.as_str())
            .map(|b| &**b as &dyn Part)
            .ok_or_else(|| OpcError::PartNotFound(partname.to_string()))
    }

    /// Get a mutable reference to a part by its partname.
    pub fn get_part_mut(&mut self, partname: &PackURI) -> Result<&mut dyn Part> {
        self.parts
            .get_mut(partname.as_str())
            .map(|b| &mut **b as &mut dyn Part)
            .ok_or_else(|| OpcError::PartNotFound(partname.to_string()))
    }

    /// Get a part by relationship type from the package level.
    pub fn part_by_reltype(&self, reltype: &str) -> Result<&dyn Part> {
        let rel = self.rels.part_with_reltype(reltype)?;
        let partname = rel.target_partname()?;
        self.get_part(&partname)
    }

    pub fn iter_parts(&self) -> impl Iterator<Item = &dyn Part> {
        self.parts.values().map(|b| &**b as &dyn Part)
    }

    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    pub fn rels(&self) -> &Relationships {
        &self.rels
    }

    pub fn contains_part(&self, partname: &PackURI) -> bool {
        self.parts.contains_key(partname.as_str())
    }

    /// Serialize the package, including any blobs replaced since loading.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        PackageWriter::to_bytes(self)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        PackageWriter::write(path, self)
    }
}

impl Default for OpcPackage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::content_type as ct;
    use std::io::{Cursor, Write};
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    fn create_minimal_pptx() -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();

        writer.start_file("[Content_Types].xml", options).unwrap();
        writer
            .write_all(
                br#"<?xml version="1.0"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>
</Types>"#,
            )
            .unwrap();

        writer.start_file("_rels/.rels", options).unwrap();
        writer
            .write_all(
                br#"<?xml version="1.0"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/>
</Relationships>"#,
            )
            .unwrap();

        writer.start_file("ppt/presentation.xml", options).unwrap();
        writer
            .write_all(br#"<p:presentation xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"/>"#)
            .unwrap();

        // Not reachable from any relationship
        writer.start_file("ppt/orphan.xml", options).unwrap();
        writer.write_all(b"<orphan/>").unwrap();

        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_open_package() {
        let pkg = OpcPackage::from_bytes(create_minimal_pptx()).unwrap();

        assert_eq!(pkg.part_count(), 1);
        assert!(pkg.contains_part(&PackURI::new("/ppt/presentation.xml").unwrap()));
        assert!(!pkg.contains_part(&PackURI::new("/ppt/orphan.xml").unwrap()));
    }

    #[test]
    fn test_main_document_part() {
        let pkg = OpcPackage::from_reader(Cursor::new(create_minimal_pptx())).unwrap();

        let main_part = pkg.main_document_part().unwrap();
        assert_eq!(main_part.content_type(), ct::PML_PRESENTATION_MAIN);
    }

    #[test]
    fn test_modified_blob_survives_save() {
        let mut pkg = OpcPackage::from_bytes(create_minimal_pptx()).unwrap();
        let partname = PackURI::new("/ppt/presentation.xml").unwrap();
        pkg.get_part_mut(&partname)
            .unwrap()
            .set_blob(b"<p:presentation/>".to_vec());

        let reopened = OpcPackage::from_bytes(pkg.to_bytes().unwrap()).unwrap();
        assert_eq!(reopened.get_part(&partname).unwrap().blob(), b"<p:presentation/>");
        assert_eq!(reopened.rels().len(), 1);
    }
}
