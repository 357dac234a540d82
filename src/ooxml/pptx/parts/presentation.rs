/// Presentation part - the main part in a .pptx package.
///
/// Corresponds to `/ppt/presentation.xml` in the package.
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::part::Part;
use quick_xml::Reader;
use quick_xml::events::Event;

/// The main presentation part.
///
/// Holds the ordered slide list (`p:sldIdLst`) through which slides are
/// reached in presentation order.
pub struct PresentationPart<'a> {
    /// The underlying OPC part
    part: &'a dyn Part,
}

impl<'a> PresentationPart<'a> {
    pub fn from_part(part: &'a dyn Part) -> Self {
        Self { part }
    }

    /// Get the relationship IDs of all slides in presentation order.
    ///
    /// Only `p:sldId` entries inside `p:sldIdLst` are considered; the
    /// relationship ID is the prefixed `id` attribute (`r:id`), not the
    /// numeric slide `id`.
    pub fn slide_rids(&self) -> Result<Vec<String>> {
        let mut reader = Reader::from_reader(self.part.blob());
        reader.config_mut().trim_text(true);

        let mut rids = Vec::new();
        let mut in_list = false;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) if e.local_name().as_ref() == b"sldIdLst" => {
                    in_list = true;
                },
                Ok(Event::End(e)) if e.local_name().as_ref() == b"sldIdLst" => {
                    in_list = false;
                },
                Ok(Event::Start(e)) | Ok(Event::Empty(e))
                    if in_list && e.local_name().as_ref() == b"sldId" =>
                {
                    for attr in e.attributes() {
                        let attr = attr.map_err(|e| OoxmlError::Xml(e.to_string()))?;
                        if attr.key.prefix().is_some() && attr.key.local_name().as_ref() == b"id" {
                            let rid = std::str::from_utf8(&attr.value)
                                .map_err(|e| OoxmlError::Xml(e.to_string()))?;
                            rids.push(rid.to_string());
                            break;
                        }
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e.to_string())),
                _ => {},
            }
            buf.clear();
        }

        Ok(rids)
    }

    /// Get the underlying OPC part.
    #[inline]
    pub fn part(&self) -> &'a dyn Part {
        self.part
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::content_type as ct;
    use crate::ooxml::opc::{PackURI, XmlPart};

    #[test]
    fn test_slide_rids_in_order() {
        let xml = br#"<p:presentation xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
            <p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>
            <p:sldIdLst>
                <p:sldId id="257" r:id="rId3"/>
                <p:sldId id="256" r:id="rId2"/>
            </p:sldIdLst>
        </p:presentation>"#;
        let part = XmlPart::new(
            PackURI::new("/ppt/presentation.xml").unwrap(),
            ct::PML_PRESENTATION_MAIN.to_string(),
            xml.to_vec(),
        );

        let rids = PresentationPart::from_part(&part).slide_rids().unwrap();
        assert_eq!(rids, vec!["rId3", "rId2"]);
    }

    #[test]
    fn test_no_slides() {
        let part = XmlPart::new(
            PackURI::new("/ppt/presentation.xml").unwrap(),
            ct::PML_PRESENTATION_MAIN.to_string(),
            b"<p:presentation/>".to_vec(),
        );
        assert!(PresentationPart::from_part(&part).slide_rids().unwrap().is_empty());
    }
}
