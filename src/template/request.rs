//! Render requests: which template to use, the global context, and what to
//! do on each slide.
//!
//! ```json
//! {
//!   "template": "default",
//!   "context": {"title": "Q1 Report"},
//!   "slides": [
//!     {"index": 0},
//!     {"id": "sales", "replacements": {"region": "EMEA"},
//!      "tables": [{"shape": "Sales", "header": ["Month", "Total"],
//!                  "data": [["Jan", 10], ["Feb", 12]]}]}
//!   ],
//!   "output": {"file_name": "q1"}
//! }
//! ```

use crate::template::error::{Result, TemplateError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A complete render request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderRequest {
    /// Template name; the engine's default template when absent
    #[serde(default)]
    pub template: Option<String>,
    /// Values visible to every slide
    #[serde(default)]
    pub context: Map<String, Value>,
    #[serde(default)]
    pub slides: Vec<SlideInstruction>,
    /// Transport options such as `file_name`; never read by the engine
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,
}

impl RenderRequest {
    /// Parse a request from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(text)?)
    }

    /// Interpret an already parsed JSON value as a request.
    pub fn from_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(TemplateError::InvalidPayload(
                "payload must be a JSON object".to_string(),
            ));
        }
        Ok(serde_json::from_value(value)?)
    }
}

/// What to do on one slide.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlideInstruction {
    /// Name of a `{id:name}` marker on the target slide; wins over `index`
    #[serde(default)]
    pub id: Option<String>,
    /// Zero-based slide position
    #[serde(default)]
    pub index: Option<i64>,
    /// Per-slide values laid over the global context
    #[serde(default)]
    pub replacements: Map<String, Value>,
    #[serde(default)]
    pub tables: Vec<TableInstruction>,
}

impl SlideInstruction {
    /// The marker name to look for; an empty `id` counts as absent.
    pub fn marker_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    /// The model used on this slide: a copy of `global` with every
    /// replacement key overriding the global one.
    pub fn effective_model(&self, global: &Map<String, Value>) -> Value {
        let mut model = global.clone();
        model.extend(
            self.replacements
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );
        Value::Object(model)
    }
}

/// Fill one table shape with rows of literal values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableInstruction {
    /// Name of the graphic frame holding the table
    pub shape: String,
    #[serde(default)]
    pub data: Vec<Vec<Value>>,
    /// Row written above `data`; an empty header is ignored
    #[serde(default)]
    pub header: Option<Vec<Value>>,
    /// Blank template rows below the written ones
    #[serde(default = "default_clear_extra_rows")]
    pub clear_extra_rows: bool,
}

fn default_clear_extra_rows() -> bool {
    true
}

impl TableInstruction {
    /// Header (when present and non-empty) followed by the data rows.
    pub fn rows(&self) -> Vec<&[Value]> {
        self.header
            .as_deref()
            .filter(|header| !header.is_empty())
            .into_iter()
            .chain(self.data.iter().map(Vec::as_slice))
            .collect()
    }
}
