//! Template rendering: fill a `.pptx` template from JSON instructions.
//!
//! A render opens the named template, and for each slide instruction:
//!
//! 1. locates the slide by `{id:name}` marker or by index ([`locator`]),
//! 2. replaces `{path}` placeholders in every text shape and table cell with
//!    values from the global context overlaid by the slide's replacements
//!    ([`placeholder`], [`resolver`]),
//! 3. writes explicit table data into named tables ([`table`]).
//!
//! The result is serialized into the bytes of a new document.
//!
//! # Example
//!
//! ```rust,no_run
//! use pptx_templater::template::{EngineConfig, TemplateEngine};
//!
//! let engine = TemplateEngine::with_config(EngineConfig::from_env());
//! let bytes = engine.render_json(r#"{"context": {"title": "Q1"}, "slides": [{"index": 0}]}"#)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod config;
pub mod engine;
pub mod error;
pub mod locator;
pub mod output;
pub mod placeholder;
pub mod request;
pub mod resolver;
pub mod table;

pub use config::EngineConfig;
pub use engine::TemplateEngine;
pub use error::{Result, TableDimension, TemplateError};
pub use locator::SlideTarget;
pub use request::{RenderRequest, SlideInstruction, TableInstruction};
