/// Package implementation for PowerPoint presentations.
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::OpcPackage;
use crate::ooxml::opc::constants::content_type as ct;
use crate::ooxml::pptx::presentation::Presentation;
use std::io::{Read, Seek};
use std::path::Path;

/// Main-part content types accepted as a presentation.
const PRESENTATION_CONTENT_TYPES: [&str; 4] = [
    ct::PML_PRESENTATION_MAIN,
    ct::PML_PRES_MACRO_MAIN,
    ct::PML_TEMPLATE_MAIN,
    ct::PML_SLIDESHOW_MAIN,
];

/// A PowerPoint (.pptx) package.
///
/// This is the main entry point for working with PowerPoint presentations.
/// It wraps an OPC package and checks that its main part is a presentation.
///
/// # Examples
///
/// ```rust,no_run
/// use pptx_templater::ooxml::pptx::Package;
///
/// let pkg = Package::open("templates/default.pptx")?;
/// let pres = pkg.into_presentation()?;
/// println!("Presentation has {} slides", pres.slide_count());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Package {
    /// The underlying OPC package
    opc: OpcPackage,
}

impl Package {
    /// Open a .pptx package from a file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_opc(OpcPackage::open(path)?)
    }

    /// Create a .pptx package from an owned byte buffer.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::from_opc(OpcPackage::from_bytes(data)?)
    }

    /// Create a .pptx package from a reader.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        Self::from_opc(OpcPackage::from_reader(reader)?)
    }

    fn from_opc(opc: OpcPackage) -> Result<Self> {
        let main_part = opc
            .main_document_part()
            .map_err(|e| OoxmlError::PartNotFound(format!("main presentation part: {}", e)))?;

        let content_type = main_part.content_type();
        if !PRESENTATION_CONTENT_TYPES.contains(&content_type) {
            return Err(OoxmlError::InvalidContentType {
                expected: PRESENTATION_CONTENT_TYPES.join(" or "),
                got: content_type.to_string(),
            });
        }

        Ok(Self { opc })
    }

    /// Load the slides for editing, handing the package over to the
    /// presentation.
    pub fn into_presentation(self) -> Result<Presentation> {
        Presentation::load(self.opc)
    }

    /// Get the underlying OPC package.
    #[inline]
    pub fn opc_package(&self) -> &OpcPackage {
        &self.opc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::pptx::testing::{PptxBuilder, text_shape};

    #[test]
    fn test_open_valid_package() {
        let bytes = PptxBuilder::new().slide(&[text_shape("T", "x")]).build();
        let pkg = Package::from_bytes(bytes).unwrap();
        // presentation, its slide and the shared layout
        assert_eq!(pkg.opc_package().part_count(), 3);
    }

    #[test]
    fn test_template_content_type_accepted() {
        let bytes = PptxBuilder::new()
            .main_content_type(ct::PML_TEMPLATE_MAIN)
            .build();
        assert!(Package::from_bytes(bytes).is_ok());
    }

    #[test]
    fn test_wrong_content_type_rejected() {
        let bytes = PptxBuilder::new()
            .main_content_type("application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml")
            .build();
        assert!(matches!(
            Package::from_bytes(bytes),
            Err(OoxmlError::InvalidContentType { .. })
        ));
    }

    #[test]
    fn test_not_a_zip() {
        assert!(matches!(
            Package::from_bytes(b"plain text".to_vec()),
            Err(OoxmlError::Opc(_))
        ));
    }
}
