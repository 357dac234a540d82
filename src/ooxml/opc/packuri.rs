/// The PackURI value type: a partname within an OPC package.
///
/// PackURIs always begin with a forward slash and use forward slashes as path
/// separators. ZIP member names are the same string without the leading slash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackURI {
    /// The full pack URI string (e.g., "/ppt/slides/slide1.xml")
    uri: String,
}

impl PackURI {
    /// Create a new PackURI from a string that must begin with a forward slash.
    pub fn new<S: Into<String>>(uri: S) -> Result<Self, String> {
        let uri = uri.into();
        if !uri.starts_with('/') {
            return Err(format!("PackURI must begin with slash, got '{}'", uri));
        }
        Ok(PackURI { uri })
    }

    /// Create a PackURI from a ZIP member name such as `ppt/slides/slide1.xml`.
    pub fn from_membername(membername: &str) -> Self {
        PackURI {
            uri: format!("/{}", membername.trim_start_matches('/')),
        }
    }

    /// Resolve a relative reference (like "../slideLayouts/slideLayout1.xml")
    /// against a base URI (like "/ppt/slides") into an absolute PackURI.
    pub fn from_rel_ref(base_uri: &str, relative_ref: &str) -> Result<Self, String> {
        let joined = if relative_ref.starts_with('/') {
            relative_ref.to_string()
        } else if base_uri.ends_with('/') {
            format!("{}{}", base_uri, relative_ref)
        } else {
            format!("{}/{}", base_uri, relative_ref)
        };
        Self::new(Self::normalize_path(&joined))
    }

    /// Directory portion, e.g. "/ppt/slides" for "/ppt/slides/slide1.xml".
    ///
    /// For the package pseudo-partname "/", returns "/".
    pub fn base_uri(&self) -> &str {
        match self.uri.rfind('/') {
            Some(0) | None => "/",
            Some(pos) => &self.uri[..pos],
        }
    }

    /// Filename portion, e.g. "slide1.xml"; empty for "/".
    pub fn filename(&self) -> &str {
        self.uri
            .rfind('/')
            .map(|pos| &self.uri[pos + 1..])
            .unwrap_or("")
    }

    /// Extension without the leading period, e.g. "xml".
    pub fn ext(&self) -> &str {
        let filename = self.filename();
        filename
            .rfind('.')
            .map(|pos| &filename[pos + 1..])
            .unwrap_or("")
    }

    /// ZIP member name (URI with leading slash stripped); empty for "/".
    pub fn membername(&self) -> &str {
        &self.uri[1..]
    }

    /// The PackURI of the .rels part for this PackURI,
    /// e.g. "/ppt/slides/_rels/slide1.xml.rels" for "/ppt/slides/slide1.xml".
    pub fn rels_uri(&self) -> Result<PackURI, String> {
        let rels_filename = format!("{}.rels", self.filename());
        match self.base_uri() {
            "/" => Self::new(format!("/_rels/{}", rels_filename)),
            base => Self::new(format!("{}/_rels/{}", base, rels_filename)),
        }
    }

    /// Get the full URI string.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.uri
    }

    /// Resolve "." and ".." segments; ".." never climbs above the root.
    fn normalize_path(path: &str) -> String {
        let mut parts: Vec<&str> = Vec::new();
        for segment in path.split('/') {
            match segment {
                "" | "." => {},
                ".." => {
                    parts.pop();
                },
                other => parts.push(other),
            }
        }
        format!("/{}", parts.join("/"))
    }
}

impl std::fmt::Display for PackURI {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.uri)
    }
}

impl AsRef<str> for PackURI {
    fn as_ref(&self) -> &str {
        &self.uri
    }
}

/// The package pseudo-partname, representing the package itself
pub const PACKAGE_URI: &str = "/";

/// The URI for the [Content_Types].xml part
pub const CONTENT_TYPES_URI: &str = "/[Content_Types].xml";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packuri_new() {
        assert!(PackURI::new("/ppt/presentation.xml").is_ok());
        assert!(PackURI::new("ppt/presentation.xml").is_err());
    }

    #[test]
    fn test_from_rel_ref() {
        let uri = PackURI::from_rel_ref("/ppt/slides", "../slideLayouts/slideLayout1.xml").unwrap();
        assert_eq!(uri.as_str(), "/ppt/slideLayouts/slideLayout1.xml");

        let uri = PackURI::from_rel_ref("/ppt", "slides/slide1.xml").unwrap();
        assert_eq!(uri.as_str(), "/ppt/slides/slide1.xml");

        let uri = PackURI::from_rel_ref("/", "ppt/presentation.xml").unwrap();
        assert_eq!(uri.as_str(), "/ppt/presentation.xml");

        let uri = PackURI::from_rel_ref("/ppt/slides", "/ppt/media/image1.png").unwrap();
        assert_eq!(uri.as_str(), "/ppt/media/image1.png");
    }

    #[test]
    fn test_components() {
        let uri = PackURI::new("/ppt/slides/slide1.xml").unwrap();
        assert_eq!(uri.base_uri(), "/ppt/slides");
        assert_eq!(uri.filename(), "slide1.xml");
        assert_eq!(uri.ext(), "xml");
        assert_eq!(uri.membername(), "ppt/slides/slide1.xml");

        let root = PackURI::new(PACKAGE_URI).unwrap();
        assert_eq!(root.base_uri(), "/");
        assert_eq!(root.filename(), "");
        assert_eq!(root.membername(), "");
    }

    #[test]
    fn test_rels_uri() {
        let uri = PackURI::new("/ppt/slides/slide1.xml").unwrap();
        assert_eq!(uri.rels_uri().unwrap().as_str(), "/ppt/slides/_rels/slide1.xml.rels");

        let root = PackURI::new(PACKAGE_URI).unwrap();
        assert_eq!(root.rels_uri().unwrap().as_str(), "/_rels/.rels");
    }

    #[test]
    fn test_from_membername() {
        assert_eq!(
            PackURI::from_membername("ppt/presentation.xml").as_str(),
            "/ppt/presentation.xml"
        );
    }
}
