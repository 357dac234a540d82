/// Text frame for accessing and rewriting text content in shapes and cells.
use crate::common::xml::{XmlElement, decode_control_chars, encode_control_chars};

/// Line break inside a paragraph (`a:br`), as it appears in frame text.
pub const LINE_BREAK: char = '\u{b}';

/// Read-only view of a text body (`p:txBody` or `a:txBody`).
///
/// # Examples
///
/// ```rust,ignore
/// if let Some(frame) = shape.text_frame() {
///     println!("Text: {}", frame.text());
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TextFrame<'a> {
    tx_body: &'a XmlElement,
}

impl<'a> TextFrame<'a> {
    pub fn new(tx_body: &'a XmlElement) -> Self {
        Self { tx_body }
    }

    /// All text in the frame: paragraphs joined by `\n`, line breaks as `\u{b}`.
    pub fn text(&self) -> String {
        frame_text(self.tx_body)
    }

    pub fn paragraph_count(&self) -> usize {
        self.tx_body.children_named("p").count()
    }
}

/// Mutable view of a text body.
#[derive(Debug)]
pub struct TextFrameMut<'a> {
    tx_body: &'a mut XmlElement,
}

impl<'a> TextFrameMut<'a> {
    pub fn new(tx_body: &'a mut XmlElement) -> Self {
        Self { tx_body }
    }

    pub fn text(&self) -> String {
        frame_text(self.tx_body)
    }

    /// Replace the frame's text.
    ///
    /// Every existing paragraph is removed and one paragraph is written per
    /// `\n`-separated line, with `\u{b}` becoming a line break. New paragraphs
    /// take the first paragraph's properties and end-of-paragraph run
    /// properties; new runs take the first run's properties. Body properties
    /// and list styles are left alone.
    pub fn set_text(&mut self, text: &str) {
        let style = ParagraphStyle::capture(self.tx_body);

        self.tx_body.remove_children_named("p");
        for line in text.split('\n') {
            self.tx_body.push_element(style.paragraph(line));
        }
    }
}

fn frame_text(tx_body: &XmlElement) -> String {
    let mut text = String::new();
    for (i, paragraph) in tx_body.children_named("p").enumerate() {
        if i > 0 {
            text.push('\n');
        }
        for child in paragraph.child_elements() {
            match child.local_name() {
                "r" | "fld" => {
                    if let Some(t) = child.child("t") {
                        text.push_str(&decode_control_chars(&t.text()));
                    }
                },
                "br" => text.push(LINE_BREAK),
                _ => {},
            }
        }
    }
    text
}

/// Qualified name for `local` using the namespace prefix of `sibling`.
pub(crate) fn prefixed_name(sibling: &XmlElement, local: &str) -> String {
    match sibling.name().rsplit_once(':') {
        Some((prefix, _)) => format!("{}:{}", prefix, local),
        None => local.to_string(),
    }
}

/// Formatting captured from the original paragraphs before they are removed.
struct ParagraphStyle {
    /// Element template carrying the DrawingML prefix
    prefix_source: XmlElement,
    p_pr: Option<XmlElement>,
    end_para_r_pr: Option<XmlElement>,
    r_pr: Option<XmlElement>,
}

impl ParagraphStyle {
    fn capture(tx_body: &XmlElement) -> Self {
        let first = tx_body.child("p");
        let r_pr = tx_body
            .children_named("p")
            .flat_map(|p| p.children_named("r"))
            .find_map(|r| r.child("rPr"))
            .cloned();

        let prefix_source = first
            .or_else(|| tx_body.child("bodyPr"))
            .map(|e| XmlElement::new(e.name()))
            .unwrap_or_else(|| XmlElement::new("a:p"));

        Self {
            prefix_source,
            p_pr: first.and_then(|p| p.child("pPr")).cloned(),
            end_para_r_pr: first.and_then(|p| p.child("endParaRPr")).cloned(),
            r_pr,
        }
    }

    fn element(&self, local: &str) -> XmlElement {
        XmlElement::new(prefixed_name(&self.prefix_source, local))
    }

    fn paragraph(&self, line: &str) -> XmlElement {
        let mut paragraph = self.element("p");
        if let Some(p_pr) = &self.p_pr {
            paragraph.push_element(p_pr.clone());
        }

        for (i, segment) in line.split(LINE_BREAK).enumerate() {
            if i > 0 {
                let mut br = self.element("br");
                if let Some(r_pr) = &self.r_pr {
                    br.push_element(r_pr.clone());
                }
                paragraph.push_element(br);
            }
            if !segment.is_empty() {
                paragraph.push_element(self.run(segment));
            }
        }

        if let Some(end) = &self.end_para_r_pr {
            paragraph.push_element(end.clone());
        }
        paragraph
    }

    fn run(&self, text: &str) -> XmlElement {
        let mut run = self.element("r");
        if let Some(r_pr) = &self.r_pr {
            run.push_element(r_pr.clone());
        }
        let mut t = self.element("t");
        t.set_text(&encode_control_chars(text));
        run.with_child(t)
    }
}
