//! # Pergamino - Certificate Template Rendering Engine
//!
//! Pergamino renders a reusable visual template (a background image plus
//! positioned, styled text boxes) once per row of a tabular dataset,
//! producing one output image per row. It provides:
//!
//! - **Template model**: positioned text elements with placeholder tokens
//! - **Coordinate spaces**: edit-space ⇄ preview-space ⇄ native-space
//! - **Text layout**: measurement, auto-sizing and line wrapping
//! - **Placeholder substitution**: `{{column}}` tokens with spreadsheet
//!   date-serial decoding
//! - **Batch rendering**: sequential native-resolution output per row
//!
//! ## Quick Start
//!
//! ```
//! use pergamino::data::{Headers, Row, Value};
//! use pergamino::render::render_all;
//! use pergamino::{FontStack, TemplateModel};
//!
//! // The driving layer supplies a decoded background image.
//! let fonts = FontStack::builtin();
//! let mut template = TemplateModel::new();
//! template.set_background(image::DynamicImage::new_rgba8(400, 300));
//!
//! // Lay out a text box holding a placeholder token.
//! template.add_text_element(&fonts);
//! template.insert_placeholder(&fonts, "Name");
//!
//! // One render per data row, named after the first column.
//! let headers = Headers::new(vec!["Name".into()])?;
//! let row = Row::from_iter([("Name", Value::Text("Alice".into()))]);
//! let certificates = render_all(&template, &fonts, &headers, &[row])?;
//!
//! assert_eq!(certificates[0].name, "Alice");
//! # Ok::<(), pergamino::PergaminoError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`template`] | Template model: elements, background, selection |
//! | [`geometry`] | Coordinate-space transforms |
//! | [`text`] | Fonts, measurement and line breaking |
//! | [`data`] | Headers, rows and placeholder substitution |
//! | [`render`] | Raster surfaces, the render pipeline, batch driver |
//! | [`error`] | Error types |
//!
//! The engine is deliberately free of UI, file-parsing and packaging
//! concerns: a driving layer feeds it parsed rows and a decoded
//! background image, and collects the finished rasters.

pub mod data;
pub mod error;
pub mod geometry;
pub mod render;
pub mod template;
pub mod text;

// Re-exports for convenience
pub use error::PergaminoError;
pub use template::TemplateModel;
pub use text::FontStack;
