/// Main presentation object - the high-level API for editing presentations.
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::OpcPackage;
use crate::ooxml::opc::part::parse_xml_part;
use crate::ooxml::pptx::parts::PresentationPart;
use crate::ooxml::pptx::slide::Slide;
use std::path::Path;

/// A PowerPoint presentation loaded for editing.
///
/// Owns the package and one parsed [`Slide`] per slide, in presentation
/// order. Slides are edited in memory and written back when the presentation
/// is serialized; every other part is saved from its original bytes.
///
/// # Examples
///
/// ```rust,no_run
/// use pptx_templater::ooxml::pptx::Package;
///
/// let mut pres = Package::open("templates/default.pptx")?.into_presentation()?;
/// println!("{} slides", pres.slide_count());
/// let bytes = pres.into_bytes()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Presentation {
    package: OpcPackage,
    slides: Vec<Slide>,
}

impl Presentation {
    /// Parse every slide reachable through the presentation's slide list.
    pub(crate) fn load(package: OpcPackage) -> Result<Self> {
        let main_part = package.main_document_part()?;
        let pres_part = PresentationPart::from_part(main_part);

        let slide_rids = pres_part.slide_rids()?;
        let mut slides = Vec::with_capacity(slide_rids.len());

        for rid in slide_rids {
            let partname = main_part.related_partname(&rid)?;
            let part = package.get_part(&partname).map_err(|_| {
                OoxmlError::PartNotFound(format!("slide {} ({})", partname, rid))
            })?;
            let document = parse_xml_part(part)?;
            slides.push(Slide::new(partname, document));
        }

        Ok(Self { package, slides })
    }

    #[inline]
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    #[inline]
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    #[inline]
    pub fn slide(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    #[inline]
    pub fn slide_mut(&mut self, index: usize) -> Option<&mut Slide> {
        self.slides.get_mut(index)
    }

    /// Write modified slides back into their parts.
    fn flush(&mut self) -> Result<()> {
        for slide in self.slides.iter().filter(|s| s.is_modified()) {
            self.package
                .get_part_mut(slide.partname())?
                .set_blob(slide.document().to_bytes());
        }
        Ok(())
    }

    /// Serialize the presentation, consuming it.
    pub fn into_bytes(mut self) -> Result<Vec<u8>> {
        self.flush()?;
        Ok(self.package.to_bytes()?)
    }

    pub fn save<P: AsRef<Path>>(mut self, path: P) -> Result<()> {
        self.flush()?;
        Ok(self.package.save(path)?)
    }
}
