//! In-memory `.pptx` fixtures for unit tests.

use crate::common::xml::escape_xml;
use crate::ooxml::opc::constants::{content_type as ct, relationship_type as rt};
use std::io::{Cursor, Write};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const NS: &str = r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#;
const DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// Builds a minimal presentation: one slide layout plus the given slides.
pub struct PptxBuilder {
    slides: Vec<String>,
    reverse: bool,
    main_content_type: String,
}

impl PptxBuilder {
    pub fn new() -> Self {
        Self {
            slides: Vec::new(),
            reverse: false,
            main_content_type: ct::PML_PRESENTATION_MAIN.to_string(),
        }
    }

    /// Add a slide whose shape tree holds the given shapes.
    pub fn slide(mut self, shapes: &[String]) -> Self {
        self.slides.push(shapes.concat());
        self
    }

    /// List the slides in `p:sldIdLst` in reverse part order.
    pub fn reverse_order(mut self) -> Self {
        self.reverse = true;
        self
    }

    pub fn main_content_type(mut self, content_type: &str) -> Self {
        self.main_content_type = content_type.to_string();
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        let mut put = |name: &str, body: String| {
            zip.start_file(name, options).unwrap();
            zip.write_all(body.as_bytes()).unwrap();
        };

        let mut overrides = format!(
            r#"<Override PartName="/ppt/presentation.xml" ContentType="{}"/><Override PartName="/ppt/slideLayouts/slideLayout1.xml" ContentType="{}"/>"#,
            self.main_content_type,
            ct::PML_SLIDE_LAYOUT
        );
        for n in 1..=self.slides.len() {
            overrides.push_str(&format!(
                r#"<Override PartName="/ppt/slides/slide{}.xml" ContentType="{}"/>"#,
                n,
                ct::PML_SLIDE
            ));
        }
        put(
            "[Content_Types].xml",
            format!(
                r#"{DECL}<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="{}"/><Default Extension="xml" ContentType="{}"/>{}</Types>"#,
                ct::OPC_RELATIONSHIPS,
                ct::XML,
                overrides
            ),
        );

        put(
            "_rels/.rels",
            format!(
                r#"{DECL}<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="{}" Target="ppt/presentation.xml"/></Relationships>"#,
                rt::OFFICE_DOCUMENT
            ),
        );

        let mut order: Vec<usize> = (1..=self.slides.len()).collect();
        if self.reverse {
            order.reverse();
        }
        let sld_ids: String = order
            .iter()
            .map(|n| format!(r#"<p:sldId id="{}" r:id="rId{}"/>"#, 255 + n, n + 1))
            .collect();
        put(
            "ppt/presentation.xml",
            format!(
                r#"{DECL}<p:presentation {NS}><p:sldIdLst>{}</p:sldIdLst><p:sldSz cx="9144000" cy="6858000"/></p:presentation>"#,
                sld_ids
            ),
        );

        let mut pres_rels = format!(
            r#"<Relationship Id="rId1" Type="{}" Target="slideLayouts/slideLayout1.xml"/>"#,
            rt::SLIDE_LAYOUT
        );
        for n in 1..=self.slides.len() {
            pres_rels.push_str(&format!(
                r#"<Relationship Id="rId{}" Type="{}" Target="slides/slide{}.xml"/>"#,
                n + 1,
                rt::SLIDE,
                n
            ));
        }
        put(
            "ppt/_rels/presentation.xml.rels",
            format!(
                r#"{DECL}<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{}</Relationships>"#,
                pres_rels
            ),
        );

        put(
            "ppt/slideLayouts/slideLayout1.xml",
            format!(r#"{DECL}<p:sldLayout {NS}><p:cSld><p:spTree/></p:cSld></p:sldLayout>"#),
        );

        for (i, shapes) in self.slides.iter().enumerate() {
            let n = i + 1;
            put(
                format!("ppt/slides/slide{}.xml", n).as_str(),
                format!(
                    r#"{DECL}<p:sld {NS}><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>{}</p:spTree></p:cSld></p:sld>"#,
                    shapes
                ),
            );
            put(
                format!("ppt/slides/_rels/slide{}.xml.rels", n).as_str(),
                format!(
                    r#"{DECL}<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="{}" Target="../slideLayouts/slideLayout1.xml"/></Relationships>"#,
                    rt::SLIDE_LAYOUT
                ),
            );
        }

        zip.finish().unwrap().into_inner()
    }
}

fn paragraphs(text: &str) -> String {
    text.split('\n')
        .map(|line| format!(r#"<a:p><a:r><a:rPr lang="en-US"/><a:t>{}</a:t></a:r></a:p>"#, escape_xml(line)))
        .collect()
}

/// A text shape (`p:sp`); `\n` in `text` separates paragraphs.
pub fn text_shape(name: &str, text: &str) -> String {
    format!(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="2" name="{}"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr><p:spPr/><p:txBody><a:bodyPr/><a:lstStyle/>{}</p:txBody></p:sp>"#,
        escape_xml(name),
        paragraphs(text)
    )
}

/// A graphic frame holding a table; the first row fixes the column count.
pub fn table_shape<'s, R: AsRef<[&'s str]>>(name: &str, rows: &[R]) -> String {
    let cols = rows.first().map_or(0, |r| r.as_ref().len());
    let grid: String = (0..cols).map(|_| r#"<a:gridCol w="1000000"/>"#).collect();
    let body: String = rows
        .iter()
        .map(|row| {
            let cells: String = row
                .as_ref()
                .iter()
                .map(|text| {
                    format!(
                        r#"<a:tc><a:txBody><a:bodyPr/><a:lstStyle/>{}</a:txBody><a:tcPr/></a:tc>"#,
                        paragraphs(text)
                    )
                })
                .collect();
            format!(r#"<a:tr h="370840">{}</a:tr>"#, cells)
        })
        .collect();

    format!(
        r#"<p:graphicFrame><p:nvGraphicFramePr><p:cNvPr id="3" name="{}"/><p:cNvGraphicFramePr/><p:nvPr/></p:nvGraphicFramePr><p:xfrm/><a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/table"><a:tbl><a:tblPr/><a:tblGrid>{}</a:tblGrid>{}</a:tbl></a:graphicData></a:graphic></p:graphicFrame>"#,
        escape_xml(name),
        grid,
        body
    )
}

/// A group shape wrapping other shapes.
pub fn group_shape(name: &str, members: &[String]) -> String {
    format!(
        r#"<p:grpSp><p:nvGrpSpPr><p:cNvPr id="4" name="{}"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>{}</p:grpSp>"#,
        escape_xml(name),
        members.concat()
    )
}
