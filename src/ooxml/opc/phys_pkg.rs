//! Provides a general interface to a physical OPC package (ZIP file).
//!
//! This module handles the low-level reading and writing of OPC packages as ZIP
//! archives. Everything above it deals in PackURIs and byte blobs only.

use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::PackURI;
use std::collections::HashMap;
use std::io::{Cursor, Read, Seek, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Physical package reader that provides access to the members of a ZIP-based
/// OPC package.
pub struct PhysPkgReader<R: Read + Seek> {
    /// The underlying ZIP archive
    archive: ZipArchive<R>,
}

impl PhysPkgReader<Cursor<Vec<u8>>> {
    /// Open an OPC package from a file path.
    ///
    /// # Errors
    /// Returns `PackageNotFound` if the file doesn't exist, or a ZIP error if
    /// it isn't a valid archive.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(OpcError::PackageNotFound(path.display().to_string()));
        }

        let data = std::fs::read(path)?;
        Self::from_bytes(data)
    }

    /// Create a reader over an owned byte buffer.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::new(Cursor::new(data))
    }
}

impl<R: Read + Seek> PhysPkgReader<R> {
    /// Create a new PhysPkgReader, validating the archive's central directory.
    pub fn new(reader: R) -> Result<Self> {
        let archive = ZipArchive::new(reader)?;
        Ok(Self { archive })
    }

    /// Get the decompressed content of a member by its PackURI.
    pub fn blob_for(&mut self, pack_uri: &PackURI) -> Result<Vec<u8>> {
        let mut file = match self.archive.by_name(pack_uri.membername()) {
            Ok(file) => file,
            Err(zip::result::ZipError::FileNotFound) => {
                return Err(OpcError::PartNotFound(pack_uri.to_string()));
            },
            Err(e) => return Err(e.into()),
        };

        let mut blob = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut blob)?;
        Ok(blob)
    }

    /// Decompress every file member (directories are skipped), keyed by member name.
    pub fn read_all(&mut self) -> Result<HashMap<String, Vec<u8>>> {
        let mut files = HashMap::with_capacity(self.archive.len());

        for index in 0..self.archive.len() {
            let mut file = self.archive.by_index(index)?;
            if file.is_dir() {
                continue;
            }
            let name = file.name().to_string();
            let mut blob = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut blob)?;
            files.insert(name, blob);
        }

        Ok(files)
    }

    /// Get the number of entries in the archive.
    #[inline]
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.archive.is_empty()
    }

    /// List all member names in the package.
    pub fn member_names(&self) -> Vec<String> {
        self.archive.file_names().map(String::from).collect()
    }

    /// Check if a specific member exists in the package.
    pub fn contains(&self, pack_uri: &PackURI) -> bool {
        let membername = pack_uri.membername();
        self.archive.file_names().any(|name| name == membername)
    }
}

/// Physical package writer producing an in-memory ZIP archive.
pub struct PhysPkgWriter {
    /// The underlying ZIP archive writer
    archive: ZipWriter<Cursor<Vec<u8>>>,
}

impl PhysPkgWriter {
    /// Create a new package writer that writes to memory.
    pub fn new() -> Self {
        Self {
            archive: ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    /// Write a part to the package with Deflate compression.
    pub fn write(&mut self, pack_uri: &PackURI, blob: &[u8]) -> Result<()> {
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        self.archive.start_file(pack_uri.membername(), options)?;
        self.archive.write_all(blob)?;
        Ok(())
    }

    /// Finish writing and return the package bytes.
    pub fn finish(self) -> Result<Vec<u8>> {
        let cursor = self.archive.finish()?;
        Ok(cursor.into_inner())
    }
}

impl Default for PhysPkgWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read_members() {
        let mut writer = PhysPkgWriter::new();

        let content_types = PackURI::new("/[Content_Types].xml").unwrap();
        let rels = PackURI::new("/_rels/.rels").unwrap();
        let presentation = PackURI::new("/ppt/presentation.xml").unwrap();

        writer.write(&content_types, b"<Types/>").unwrap();
        writer.write(&rels, b"<Relationships/>").unwrap();
        writer.write(&presentation, b"<p:presentation/>").unwrap();

        let zip_data = writer.finish().unwrap();
        let mut reader = PhysPkgReader::from_bytes(zip_data).unwrap();

        assert_eq!(reader.len(), 3);
        assert!(reader.contains(&content_types));
        assert!(reader.contains(&rels));
        assert_eq!(reader.blob_for(&presentation).unwrap(), b"<p:presentation/>");

        let all = reader.read_all().unwrap();
        assert_eq!(all.get("_rels/.rels").map(Vec::as_slice), Some(&b"<Relationships/>"[..]));
    }

    #[test]
    fn test_missing_member_is_part_not_found() {
        let zip_data = PhysPkgWriter::new().finish().unwrap();
        let mut reader = PhysPkgReader::from_bytes(zip_data).unwrap();
        let missing = PackURI::new("/ppt/presentation.xml").unwrap();

        assert!(reader.is_empty());
        assert!(matches!(reader.blob_for(&missing), Err(OpcError::PartNotFound(_))));
    }

    #[test]
    fn test_open_missing_file() {
        let result = PhysPkgReader::open("/definitely/not/here.pptx");
        assert!(matches!(result, Err(OpcError::PackageNotFound(_))));
    }

    #[test]
    fn test_rejects_non_zip_bytes() {
        assert!(PhysPkgReader::from_bytes(b"not a zip archive".to_vec()).is_err());
    }
}
