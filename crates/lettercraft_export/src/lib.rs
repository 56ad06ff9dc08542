//! # lettercraft_export
//!
//! Export collaborators for rendered cover letters.
//!
//! Exporters receive the engine's rendered text plus sender metadata and
//! write a file. They add layout only; the letter text is never changed.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use lettercraft_export::{Exporter, Letter, PdfExporter, SenderMetadata};
//!
//! let letter = Letter::new("Dear Hiring Manager,", SenderMetadata::default());
//! PdfExporter::default()
//!     .export(&letter, Path::new("cover-letter.pdf"))
//!     .unwrap();
//! ```

use std::fs;
use std::path::Path;

use tracing::info;

pub mod error;
pub mod layout;
pub mod letter;
pub mod pdf;
pub mod text;

pub use error::{ExportError, ExportResult};
pub use layout::PageLayout;
pub use letter::{export_filename, Letter, SenderMetadata};
pub use pdf::PdfExporter;
pub use text::TextExporter;

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    Pdf,
}

impl ExportFormat {
    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn from_str(s: &str) -> ExportResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(ExportFormat::Text),
            "pdf" => Ok(ExportFormat::Pdf),
            other => Err(ExportError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Exporter for this format with default settings.
    pub fn exporter(&self) -> Box<dyn Exporter> {
        match self {
            ExportFormat::Text => Box::new(TextExporter),
            ExportFormat::Pdf => Box::new(PdfExporter::default()),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Writes letters in one file format.
pub trait Exporter {
    fn format(&self) -> ExportFormat;

    /// Encode the letter as file contents.
    fn to_bytes(&self, letter: &Letter) -> ExportResult<Vec<u8>>;

    /// Write the letter to `path`, creating parent directories.
    fn export(&self, letter: &Letter, path: &Path) -> ExportResult<()> {
        if path.is_dir() {
            return Err(ExportError::TargetIsDirectory(path.to_path_buf()));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let bytes = self.to_bytes(letter)?;
        fs::write(path, &bytes)?;
        info!(
            "Exported {} letter to {:?} ({} bytes)",
            self.format(),
            path,
            bytes.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!(ExportFormat::from_str("PDF").unwrap(), ExportFormat::Pdf);
        assert_eq!(ExportFormat::from_str("txt").unwrap(), ExportFormat::Text);
        assert!(matches!(
            ExportFormat::from_str("docx"),
            Err(ExportError::UnsupportedFormat(f)) if f == "docx"
        ));
    }

    #[test]
    fn test_exporter_for_format() {
        assert_eq!(ExportFormat::Pdf.exporter().format(), ExportFormat::Pdf);
        assert_eq!(ExportFormat::Text.exporter().format().extension(), "txt");
    }
}
