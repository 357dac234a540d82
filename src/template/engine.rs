/// The render pipeline: load a template, apply each slide instruction, and
/// serialize the result.
use crate::ooxml::error::OoxmlError;
use crate::ooxml::pptx::shapes::TextFrameMut;
use crate::ooxml::pptx::{Package, Presentation, Slide};
use crate::template::config::EngineConfig;
use crate::template::error::{Result, TemplateError};
use crate::template::locator::locate;
use crate::template::placeholder::substitute;
use crate::template::request::RenderRequest;
use crate::template::table::populate;
use serde_json::Value;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Renders presentations from JSON instructions.
///
/// The engine holds only configuration. Each render loads its own copy of
/// the template, so one engine can serve concurrent renders.
///
/// # Examples
///
/// ```rust,no_run
/// use pptx_templater::template::TemplateEngine;
///
/// let engine = TemplateEngine::new("templates");
/// let bytes = engine.render_json(r#"{
///     "template": "default",
///     "context": {"title": "Q1 Report"},
///     "slides": [{"index": 0}]
/// }"#)?;
/// std::fs::write("q1.pptx", bytes)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct TemplateEngine {
    config: EngineConfig,
}

impl TemplateEngine {
    /// Engine reading templates from `templates_dir`.
    pub fn new<P: Into<PathBuf>>(templates_dir: P) -> Self {
        Self::with_config(EngineConfig::new(templates_dir))
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Render a request given as JSON text.
    pub fn render_json(&self, payload: &str) -> Result<Vec<u8>> {
        self.render(&RenderRequest::from_json(payload)?)
    }

    /// Render a request given as a parsed JSON value.
    pub fn render_value(&self, payload: Value) -> Result<Vec<u8>> {
        self.render(&RenderRequest::from_value(payload)?)
    }

    /// Render `request` into the bytes of a new `.pptx` document.
    ///
    /// Any failure aborts the whole render; nothing is written anywhere.
    pub fn render(&self, request: &RenderRequest) -> Result<Vec<u8>> {
        let name = request
            .template
            .as_deref()
            .unwrap_or(self.config.default_template.as_str());
        let mut presentation = self.load_template(name)?;

        for (position, instruction) in request.slides.iter().enumerate() {
            let target = locate(&presentation, instruction, position).inspect_err(|err| {
                warn!(position, error = %err, "rejected slide instruction");
            })?;
            debug!(
                position,
                slide = %target,
                tables = instruction.tables.len(),
                "applying slide instruction"
            );

            let model = instruction.effective_model(&request.context);
            let slide = presentation.slide_mut(target.index).ok_or_else(|| {
                OoxmlError::InvalidFormat(format!("slide {} is not loaded", target))
            })?;

            substitute_slide(slide, &model);

            for table in &instruction.tables {
                populate(slide, &target, table).inspect_err(|err| {
                    warn!(position, shape = %table.shape, error = %err, "rejected table instruction");
                })?;
            }
        }

        let bytes = presentation.into_bytes()?;
        info!(
            template = name,
            slides = request.slides.len(),
            bytes = bytes.len(),
            "rendered presentation"
        );
        Ok(bytes)
    }

    fn load_template(&self, name: &str) -> Result<Presentation> {
        let not_found = || TemplateError::TemplateNotFound {
            name: name.to_string(),
            directory: self.config.templates_dir.clone(),
        };

        let path = self.config.template_path(name).ok_or_else(not_found)?;
        if !path.is_file() {
            return Err(not_found());
        }

        debug!(path = %path.display(), "loading template");
        Ok(Package::open(&path)?.into_presentation()?)
    }
}

/// Run placeholder substitution over every text shape and every table cell
/// on `slide`.
fn substitute_slide(slide: &mut Slide, model: &Value) {
    for mut shape in slide.shapes_mut() {
        if let Some(mut frame) = shape.text_frame_mut() {
            substitute_frame(&mut frame, model);
        }
        if let Some(mut table) = shape.table_mut() {
            for mut cell in table.cells_mut() {
                if let Some(mut frame) = cell.text_frame_mut() {
                    substitute_frame(&mut frame, model);
                }
            }
        }
    }
}

/// Rewrite the frame only when substitution changes its text.
fn substitute_frame(frame: &mut TextFrameMut<'_>, model: &Value) {
    let text = frame.text();
    if let Some(replaced) = substitute(&text, model) {
        if replaced != text {
            frame.set_text(&replaced);
        }
    }
}
