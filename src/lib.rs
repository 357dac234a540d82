//! pptx-templater - Render PowerPoint templates from JSON instructions
//!
//! This library opens a pre-authored `.pptx` template, substitutes `{path}`
//! placeholders with values from a JSON context, fills named tables with
//! row data, and returns the bytes of the rendered presentation.
//!
//! # Features
//!
//! - **Placeholders**: `{title}`, `{company.name}` or `{items.0}` in any text
//!   shape or table cell, resolved through nested objects and arrays
//! - **Slide addressing**: by position, or by a `{id:name}` marker on the slide
//! - **Tables**: fill a template table by shape name without resizing its grid
//! - **Formatting kept**: paragraph and run properties of rewritten text
//!   survive, and untouched parts are saved byte-for-byte
//!
//! # Example
//!
//! ```no_run
//! use pptx_templater::TemplateEngine;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = TemplateEngine::new("templates");
//! let bytes = engine.render_json(r#"{
//!     "template": "default",
//!     "context": {"title": "Q1 Report"},
//!     "slides": [
//!         {"index": 0},
//!         {"id": "sales", "tables": [{"shape": "Sales", "data": [["Jan", 10]]}]}
//!     ]
//! }"#)?;
//! std::fs::write("q1.pptx", bytes)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Editing a presentation directly
//!
//! ```no_run
//! use pptx_templater::ooxml::pptx::Package;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pres = Package::open("templates/default.pptx")?.into_presentation()?;
//! for slide in pres.slides() {
//!     println!("{}: {}", slide.partname(), slide.text());
//! }
//! # Ok(())
//! # }
//! ```

/// Shared XML utilities
pub mod common;

/// OOXML (Office Open XML) package and PresentationML support
///
/// Loads, edits and saves `.pptx` packages.
pub mod ooxml;

/// Template rendering engine
pub mod template;

// Re-export commonly used types for convenience
pub use template::{EngineConfig, RenderRequest, TemplateEngine, TemplateError};
