//! Plain-text export.

use crate::error::ExportResult;
use crate::letter::Letter;
use crate::{ExportFormat, Exporter};

/// Exporter writing the rendered letter verbatim as UTF-8 text.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextExporter;

impl Exporter for TextExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Text
    }

    fn to_bytes(&self, letter: &Letter) -> ExportResult<Vec<u8>> {
        Ok(letter.content.as_bytes().to_vec())
    }
}
