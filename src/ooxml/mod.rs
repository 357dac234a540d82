//! Office Open XML (OOXML) format implementation.
//!
//! The implementation is based on the Open Packaging Conventions (OPC) and
//! follows the structure of the python-pptx library, adapted for Rust.
//!
//! # Architecture
//!
//! 1. **OPC Layer** (`opc`): Low-level package handling (ZIP, parts, relationships)
//! 2. **Errors** (`error`): The error type shared by the format modules
//! 3. **PresentationML** (`pptx`): Slides, shapes, text frames and tables of a
//!    `.pptx` package, editable in memory and savable back to bytes
//!
//! # Example
//!
//! ```rust,no_run
//! use pptx_templater::ooxml::pptx::Package;
//!
//! let pres = Package::open("templates/default.pptx")?.into_presentation()?;
//! for slide in pres.slides() {
//!     println!("{}: {}", slide.partname(), slide.text());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod error;
pub mod opc;
pub mod pptx;

pub use error::{OoxmlError, Result};
pub use opc::{OpcPackage, PackURI};
