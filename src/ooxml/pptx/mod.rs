//! PowerPoint (.pptx) presentation support.
//!
//! This module provides loading, in-memory editing and saving of Microsoft
//! PowerPoint presentations in the Office Open XML (OOXML) format.
//!
//! - `Package`: The overall .pptx file package
//! - `Presentation`: The slides of a package, in presentation order
//! - `Slide`: Individual slide content as an editable XML tree
//! - `shapes`: Text frames and tables on a slide
//!
//! # Example
//!
//! ```rust,no_run
//! use pptx_templater::ooxml::pptx::Package;
//!
//! let mut pres = Package::open("templates/default.pptx")?.into_presentation()?;
//! if let Some(slide) = pres.slide_mut(0) {
//!     for mut shape in slide.shapes_mut() {
//!         if let Some(mut frame) = shape.text_frame_mut() {
//!             frame.set_text("Hello");
//!         }
//!     }
//! }
//! std::fs::write("out.pptx", pres.into_bytes()?)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod package;
pub mod parts;
pub mod presentation;
pub mod shapes;
pub mod slide;

#[cfg(test)]
pub(crate) mod testing;

pub use package::Package;
pub use presentation::Presentation;
pub use slide::Slide;
