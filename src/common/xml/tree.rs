//! Owned, mutable XML element tree.
//!
//! Parts that are edited in place (slides) are loaded into this tree, mutated,
//! and serialized back. Character data and attribute values are stored in their
//! raw (escaped) form so that untouched content is written back exactly as it
//! was read, including entity and character references.

use crate::common::xml::escape::{escape_xml, unescape_xml};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use smallvec::SmallVec;
use thiserror::Error;

/// Errors raised while building an [`XmlDocument`].
#[derive(Error, Debug)]
pub enum XmlError {
    #[error("XML syntax error: {0}")]
    Syntax(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    Attribute(String),

    #[error("UTF-8 conversion error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("Malformed document: {0}")]
    Structure(String),
}

impl From<quick_xml::events::attributes::AttrError> for XmlError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        XmlError::Attribute(err.to_string())
    }
}

/// A node in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    /// Character data, raw (still escaped)
    Text(String),
    CData(String),
    Comment(String),
    ProcessingInstruction(String),
    DocType(String),
}

/// An element with its qualified name, raw attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    /// (qualified name, raw value) in document order
    attributes: SmallVec<[(String, String); 4]>,
    children: Vec<XmlNode>,
}

impl XmlElement {
    /// Create an empty element with a qualified name such as `a:p`.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            attributes: SmallVec::new(),
            children: Vec::new(),
        }
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Self, XmlError> {
        let mut element = Self::new(std::str::from_utf8(start.name().as_ref())?);
        for attr in start.attributes() {
            let attr = attr?;
            let key = std::str::from_utf8(attr.key.as_ref())?;
            let value = std::str::from_utf8(&attr.value)?;
            element.attributes.push((key.to_string(), value.to_string()));
        }
        Ok(element)
    }

    /// Qualified name, e.g. `p:sp`.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name without namespace prefix, e.g. `sp` for `p:sp`.
    #[inline]
    pub fn local_name(&self) -> &str {
        match self.name.rfind(':') {
            Some(pos) => &self.name[pos + 1..],
            None => &self.name,
        }
    }

    /// Get an attribute value (unescaped) by its qualified name.
    pub fn attribute(&self, key: &str) -> Option<String> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| unescape_xml(v))
    }

    /// Get an attribute value (unescaped) by local name, ignoring any prefix.
    pub fn attribute_local(&self, local: &str) -> Option<String> {
        self.attributes
            .iter()
            .find(|(k, _)| k.rsplit(':').next() == Some(local))
            .map(|(_, v)| unescape_xml(v))
    }

    #[inline]
    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    /// Iterate over element children only.
    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(e) => Some(e),
            _ => None,
        })
    }

    /// Iterate mutably over element children only.
    pub fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut XmlElement> {
        self.children.iter_mut().filter_map(|node| match node {
            XmlNode::Element(e) => Some(e),
            _ => None,
        })
    }

    /// First child element with the given local name.
    pub fn child(&self, local: &str) -> Option<&XmlElement> {
        self.child_elements().find(|e| e.local_name() == local)
    }

    /// First child element with the given local name, mutably.
    pub fn child_mut(&mut self, local: &str) -> Option<&mut XmlElement> {
        self.child_elements_mut().find(|e| e.local_name() == local)
    }

    /// All child elements with the given local name.
    pub fn children_named<'a>(&'a self, local: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.child_elements().filter(move |e| e.local_name() == local)
    }

    /// All child elements with the given local name, mutably.
    pub fn children_named_mut<'a>(
        &'a mut self,
        local: &'a str,
    ) -> impl Iterator<Item = &'a mut XmlElement> {
        self.child_elements_mut().filter(move |e| e.local_name() == local)
    }

    /// Follow a chain of local names through first-match children.
    pub fn find_path(&self, path: &[&str]) -> Option<&XmlElement> {
        path.iter().try_fold(self, |el, local| el.child(local))
    }

    /// Mutable counterpart of [`XmlElement::find_path`].
    pub fn find_path_mut(&mut self, path: &[&str]) -> Option<&mut XmlElement> {
        let mut current = self;
        for local in path {
            current = current.child_mut(local)?;
        }
        Some(current)
    }

    /// First descendant (depth-first, document order) with the given local name.
    pub fn descendant(&self, local: &str) -> Option<&XmlElement> {
        for child in self.child_elements() {
            if child.local_name() == local {
                return Some(child);
            }
            if let Some(found) = child.descendant(local) {
                return Some(found);
            }
        }
        None
    }

    /// Mutable counterpart of [`XmlElement::descendant`].
    pub fn descendant_mut(&mut self, local: &str) -> Option<&mut XmlElement> {
        for child in self.child_elements_mut() {
            if child.local_name() == local {
                return Some(child);
            }
            if let Some(found) = child.descendant_mut(local) {
                return Some(found);
            }
        }
        None
    }

    /// Unescaped character data of the direct text children.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for node in &self.children {
            match node {
                XmlNode::Text(raw) => text.push_str(&unescape_xml(raw)),
                XmlNode::CData(raw) => text.push_str(raw),
                _ => {},
            }
        }
        text
    }

    /// Replace all children with a single (escaped) text node.
    pub fn set_text(&mut self, text: &str) {
        self.children.clear();
        if !text.is_empty() {
            self.children.push(XmlNode::Text(escape_xml(text)));
        }
    }

    /// Append an element child.
    pub fn push_element(&mut self, element: XmlElement) {
        self.children.push(XmlNode::Element(element));
    }

    /// Insert an element child at a node position.
    pub fn insert_element(&mut self, index: usize, element: XmlElement) {
        let index = index.min(self.children.len());
        self.children.insert(index, XmlNode::Element(element));
    }

    /// Builder-style child append.
    pub fn with_child(mut self, element: XmlElement) -> Self {
        self.push_element(element);
        self
    }

    /// Remove every element child with the given local name.
    ///
    /// Whitespace-only text nodes between children are kept.
    pub fn remove_children_named(&mut self, local: &str) {
        self.children.retain(|node| match node {
            XmlNode::Element(e) => e.local_name() != local,
            _ => true,
        });
    }

    /// Node position of the first element child with the given local name.
    pub fn position_of(&self, local: &str) -> Option<usize> {
        self.children.iter().position(|node| match node {
            XmlNode::Element(e) => e.local_name() == local,
            _ => false,
        })
    }

    fn write_to(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (key, value) in &self.attributes {
            // Raw values were read from either quote style
            let quote = if value.contains('"') { '\'' } else { '"' };
            out.push(' ');
            out.push_str(key);
            out.push('=');
            out.push(quote);
            out.push_str(value);
            out.push(quote);
        }

        if self.children.is_empty() {
            out.push_str("/>");
            return;
        }

        out.push('>');
        for child in &self.children {
            child.write_to(out);
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }
}

impl XmlNode {
    fn write_to(&self, out: &mut String) {
        match self {
            XmlNode::Element(e) => e.write_to(out),
            XmlNode::Text(raw) => out.push_str(raw),
            XmlNode::CData(raw) => {
                out.push_str("<![CDATA[");
                out.push_str(raw);
                out.push_str("]]>");
            },
            XmlNode::Comment(raw) => {
                out.push_str("<!--");
                out.push_str(raw);
                out.push_str("-->");
            },
            XmlNode::ProcessingInstruction(raw) => {
                out.push_str("<?");
                out.push_str(raw);
                out.push_str("?>");
            },
            XmlNode::DocType(raw) => {
                out.push_str("<!DOCTYPE ");
                out.push_str(raw);
                out.push('>');
            },
        }
    }
}

/// A parsed XML part: optional declaration, root element and the nodes
/// surrounding it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    declaration: Option<String>,
    prolog: Vec<XmlNode>,
    root: XmlElement,
    epilog: Vec<XmlNode>,
}

impl XmlDocument {
    /// Parse a document from raw bytes.
    ///
    /// Whitespace is preserved; `a:t` elements depend on it.
    pub fn parse(xml: &[u8]) -> Result<Self, XmlError> {
        let mut reader = Reader::from_reader(xml);

        let mut declaration = None;
        let mut prolog = Vec::new();
        let mut epilog = Vec::new();
        let mut root: Option<XmlElement> = None;
        let mut stack: Vec<XmlElement> = Vec::new();

        loop {
            let node = match reader.read_event()? {
                Event::Decl(decl) => {
                    declaration = Some(std::str::from_utf8(decl.as_ref())?.to_string());
                    continue;
                },
                Event::Start(start) => {
                    stack.push(XmlElement::from_start(&start)?);
                    continue;
                },
                Event::Empty(start) => XmlNode::Element(XmlElement::from_start(&start)?),
                Event::End(_) => {
                    let element = stack.pop().ok_or_else(|| {
                        XmlError::Structure("closing tag without matching open tag".to_string())
                    })?;
                    XmlNode::Element(element)
                },
                Event::Text(text) => XmlNode::Text(std::str::from_utf8(text.as_ref())?.to_string()),
                Event::GeneralRef(reference) => {
                    XmlNode::Text(format!("&{};", std::str::from_utf8(reference.as_ref())?))
                },
                Event::CData(data) => XmlNode::CData(std::str::from_utf8(data.as_ref())?.to_string()),
                Event::Comment(text) => {
                    XmlNode::Comment(std::str::from_utf8(text.as_ref())?.to_string())
                },
                Event::PI(pi) => {
                    XmlNode::ProcessingInstruction(std::str::from_utf8(pi.as_ref())?.to_string())
                },
                Event::DocType(text) => {
                    XmlNode::DocType(std::str::from_utf8(text.as_ref())?.to_string())
                },
                Event::Eof => break,
            };

            if let Some(parent) = stack.last_mut() {
                append_node(&mut parent.children, node);
            } else {
                match (node, root.is_some()) {
                    (XmlNode::Element(element), false) => root = Some(element),
                    (XmlNode::Element(_), true) => {
                        return Err(XmlError::Structure("multiple root elements".to_string()));
                    },
                    (other, false) => append_node(&mut prolog, other),
                    (other, true) => append_node(&mut epilog, other),
                }
            }
        }

        if !stack.is_empty() {
            return Err(XmlError::Structure("unclosed element at end of input".to_string()));
        }
        let root = root.ok_or_else(|| XmlError::Structure("no root element".to_string()))?;

        Ok(Self {
            declaration,
            prolog,
            root,
            epilog,
        })
    }

    #[inline]
    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    #[inline]
    pub fn root_mut(&mut self) -> &mut XmlElement {
        &mut self.root
    }

    /// Serialize the document to a string.
    pub fn to_xml_string(&self) -> String {
        let mut out = String::with_capacity(4096);
        if let Some(decl) = &self.declaration {
            out.push_str("<?");
            out.push_str(decl);
            out.push_str("?>");
        }
        for node in &self.prolog {
            node.write_to(&mut out);
        }
        self.root.write_to(&mut out);
        for node in &self.epilog {
            node.write_to(&mut out);
        }
        out
    }

    /// Serialize the document to UTF-8 bytes.
    #[inline]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_xml_string().into_bytes()
    }
}

/// Append a node, merging adjacent text so references stay inside their run of text.
fn append_node(nodes: &mut Vec<XmlNode>, node: XmlNode) {
    if let XmlNode::Text(more) = &node
        && let Some(XmlNode::Text(existing)) = nodes.last_mut()
    {
        existing.push_str(more);
        return;
    }
    nodes.push(node);
}
