//! Sequential batch driver: one native-resolution render per data row.

use image::RgbaImage;
use log::debug;

use super::renderer::render_native;
use crate::data::{Headers, Row, format_value};
use crate::error::PergaminoError;
use crate::template::TemplateModel;
use crate::text::FontStack;

/// One finished output image plus its artifact name (no extension).
///
/// Packaging the images into an archive, and resolving any name
/// collisions, is the caller's concern.
#[derive(Debug)]
pub struct RenderedCertificate {
    pub name: String,
    pub image: RgbaImage,
}

/// Iterator driving one native render per row, strictly in row order.
///
/// Each row gets a fresh surface, so no mutable render state is shared
/// between rows and at most one native-resolution surface is in flight.
/// A caller can stop between rows by simply dropping the iterator; a row
/// render in progress is never interrupted.
pub struct BatchRenderer<'a> {
    model: &'a TemplateModel,
    fonts: &'a FontStack,
    headers: &'a Headers,
    rows: std::slice::Iter<'a, Row>,
    index: usize,
    total: usize,
}

impl<'a> BatchRenderer<'a> {
    pub fn new(
        model: &'a TemplateModel,
        fonts: &'a FontStack,
        headers: &'a Headers,
        rows: &'a [Row],
    ) -> Self {
        Self {
            model,
            fonts,
            headers,
            rows: rows.iter(),
            index: 0,
            total: rows.len(),
        }
    }
}

impl Iterator for BatchRenderer<'_> {
    type Item = Result<RenderedCertificate, PergaminoError>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.rows.next()?;
        let index = self.index;
        self.index += 1;

        let result = render_native(self.model, self.fonts, self.headers, row).map(|image| {
            let name = output_name(self.headers, row, index);
            debug!("rendered certificate {}/{} ({name})", index + 1, self.total);
            RenderedCertificate { name, image }
        });
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}

/// Artifact name for one row: the first column's formatted value, or a
/// 1-based ordinal fallback when that value is empty.
fn output_name(headers: &Headers, row: &Row, index: usize) -> String {
    let name = headers
        .first()
        .map(|h| format_value(row.get(h)))
        .unwrap_or_default();
    if name.is_empty() {
        format!("certificate_{}", index + 1)
    } else {
        name
    }
}

/// Render every row at native resolution, in row order.
///
/// The background must be set before any render is attempted. The batch
/// stops at the first fatal per-row failure and reports the failing row's
/// index; an empty row list yields an empty result.
pub fn render_all(
    model: &TemplateModel,
    fonts: &FontStack,
    headers: &Headers,
    rows: &[Row],
) -> Result<Vec<RenderedCertificate>, PergaminoError> {
    if model.background().is_none() {
        return Err(PergaminoError::MissingBackground);
    }

    let mut out = Vec::with_capacity(rows.len());
    for (index, result) in BatchRenderer::new(model, fonts, headers, rows).enumerate() {
        match result {
            Ok(certificate) => out.push(certificate),
            Err(source) => {
                return Err(PergaminoError::Batch {
                    index,
                    source: Box::new(source),
                });
            }
        }
    }
    Ok(out)
}
