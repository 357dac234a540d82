/// Error types for template rendering.
use crate::ooxml::error::OoxmlError;
use crate::template::locator::SlideTarget;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for template rendering.
pub type Result<T> = std::result::Result<T, TemplateError>;

/// Table dimension named by [`TemplateError::TableCapacityExceeded`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableDimension {
    Rows,
    Columns,
}

impl std::fmt::Display for TableDimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableDimension::Rows => f.write_str("rows"),
            TableDimension::Columns => f.write_str("columns"),
        }
    }
}

/// Everything that can abort a render.
#[derive(Error, Debug)]
pub enum TemplateError {
    /// The payload is not a well-formed render request
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// No template file with that name in the templates directory
    #[error("Template '{name}' was not found in '{}'", directory.display())]
    TemplateNotFound { name: String, directory: PathBuf },

    /// A slide instruction carries neither `id` nor `index`
    #[error("Slide instruction #{position}: either 'id' or 'index' must be provided")]
    InvalidSlideInstruction { position: usize },

    /// No slide carries the `{id:...}` marker
    #[error("Slide with id '{id}' was not found")]
    SlideNotFound { id: String },

    /// `index` is negative or past the last slide
    #[error("Slide index {index} is out of range (presentation has {slide_count} slides)")]
    SlideIndexOutOfRange { index: i64, slide_count: usize },

    /// No table shape with that name on the resolved slide
    #[error("Table '{shape}' was not found on slide {slide}")]
    TableNotFound { shape: String, slide: SlideTarget },

    /// The instruction needs a larger grid than the template table has
    #[error("Table '{shape}' requires {required} {dimension}, but only {available} are present in the template")]
    TableCapacityExceeded {
        shape: String,
        dimension: TableDimension,
        required: usize,
        available: usize,
    },

    /// Loading, editing or serializing the document failed
    #[error("Render failure: {0}")]
    RenderFailure(#[from] OoxmlError),
}

impl TemplateError {
    /// Whether the caller's request is at fault, as opposed to the template
    /// store or the document itself.
    pub fn is_client_fault(&self) -> bool {
        matches!(
            self,
            TemplateError::InvalidPayload(_)
                | TemplateError::InvalidSlideInstruction { .. }
                | TemplateError::SlideNotFound { .. }
                | TemplateError::SlideIndexOutOfRange { .. }
                | TemplateError::TableNotFound { .. }
                | TemplateError::TableCapacityExceeded { .. }
        )
    }
}

impl From<serde_json::Error> for TemplateError {
    fn from(err: serde_json::Error) -> Self {
        TemplateError::InvalidPayload(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_classification() {
        assert!(TemplateError::InvalidPayload("x".into()).is_client_fault());
        assert!(TemplateError::SlideNotFound { id: "intro".into() }.is_client_fault());
        assert!(
            !TemplateError::TemplateNotFound {
                name: "default".into(),
                directory: PathBuf::from("templates"),
            }
            .is_client_fault()
        );
        assert!(
            !TemplateError::RenderFailure(OoxmlError::InvalidFormat("bad".into())).is_client_fault()
        );
    }

    #[test]
    fn test_messages_carry_context() {
        let err = TemplateError::TableCapacityExceeded {
            shape: "Sales".into(),
            dimension: TableDimension::Rows,
            required: 5,
            available: 3,
        };
        assert_eq!(
            err.to_string(),
            "Table 'Sales' requires 5 rows, but only 3 are present in the template"
        );

        let err = TemplateError::TemplateNotFound {
            name: "missing".into(),
            directory: PathBuf::from("templates"),
        };
        assert_eq!(err.to_string(), "Template 'missing' was not found in 'templates'");
    }
}
