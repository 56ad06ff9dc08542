//! PDF export.
//!
//! Documents are built with `printpdf` and an embedded TrueType font, so
//! text is drawn exactly as rendered for every character the font covers.
//! The bundled font is DejaVu Sans (Latin, Greek, Cyrillic); letters in
//! other scripts need a covering font passed to [`PdfExporter::with_font`].

use std::borrow::Cow;
use std::fmt;

use printpdf::{Mm, PdfDocument};
use tracing::debug;

use crate::error::{ExportError, ExportResult};
use crate::layout::PageLayout;
use crate::letter::{Letter, SenderMetadata};
use crate::{ExportFormat, Exporter};

/// DejaVu Sans, embedded in every PDF unless another font is given.
pub const DEFAULT_FONT: &[u8] = include_bytes!("../fonts/DejaVuSans.ttf");

const LAYER_NAME: &str = "Letter";

/// Exporter producing paged PDF documents.
#[derive(Clone)]
pub struct PdfExporter {
    layout: PageLayout,
    font: Cow<'static, [u8]>,
}

impl Default for PdfExporter {
    fn default() -> Self {
        Self::new(PageLayout::default())
    }
}

impl fmt::Debug for PdfExporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PdfExporter")
            .field("layout", &self.layout)
            .field("font_bytes", &self.font.len())
            .finish()
    }
}

impl PdfExporter {
    pub fn new(layout: PageLayout) -> Self {
        Self {
            layout,
            font: Cow::Borrowed(DEFAULT_FONT),
        }
    }

    /// Use a TrueType font instead of the bundled one.
    pub fn with_font(mut self, font: Vec<u8>) -> Self {
        self.font = Cow::Owned(font);
        self
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }
}

impl Exporter for PdfExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Pdf
    }

    fn to_bytes(&self, letter: &Letter) -> ExportResult<Vec<u8>> {
        let pages = self.layout.paginate(&letter.content);
        if letter.sender.signature.is_some() {
            debug!("Signature image is not drawn in PDF output");
        }

        let width = Mm(self.layout.page_width_mm as f32);
        let height = Mm(self.layout.page_height_mm as f32);
        let (doc, first_page, first_layer) =
            PdfDocument::new(letter.sender.title(), width, height, LAYER_NAME);
        let doc = doc
            .with_author(letter.sender.full_name.clone())
            .with_subject(contact_line(&letter.sender))
            .with_creator("LetterCraft");

        let font = doc
            .add_external_font(self.font.as_ref())
            .map_err(|e| ExportError::Pdf(format!("failed to load font: {}", e)))?;

        let mut targets = vec![(first_page, first_layer)];
        for _ in 1..pages.len() {
            targets.push(doc.add_page(width, height, LAYER_NAME));
        }

        let font_size = self.layout.font_size_pt as f32;
        let left = Mm(self.layout.margin_mm as f32);
        for ((page, layer), lines) in targets.into_iter().zip(&pages) {
            let layer = doc.get_page(page).get_layer(layer);
            for (row, line) in lines.iter().enumerate() {
                if line.is_empty() {
                    continue;
                }
                let baseline = Mm(self.layout.baseline_mm(row) as f32);
                layer.use_text(line.as_str(), font_size, left, baseline, &font);
            }
        }

        debug!("Laid out PDF with {} page(s)", pages.len());
        doc.save_to_bytes()
            .map_err(|e| ExportError::Pdf(e.to_string()))
    }
}

/// Email and phone joined for the document subject.
fn contact_line(sender: &SenderMetadata) -> String {
    [sender.email.as_str(), sender.phone.as_str()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letter(content: &str) -> Letter {
        let sender = SenderMetadata {
            full_name: "A. Lee".to_string(),
            email: "lee@example.com".to_string(),
            company_name: Some("Acme".to_string()),
            position: Some("Engineer".to_string()),
            ..Default::default()
        };
        Letter::new(content, sender)
    }

    fn page_count(bytes: &[u8]) -> usize {
        lopdf::Document::load_mem(bytes).unwrap().get_pages().len()
    }

    #[test]
    fn test_single_page_document() {
        let bytes = PdfExporter::default()
            .to_bytes(&letter("Dear Hiring Manager,\n\nHello (world)."))
            .unwrap();

        assert!(bytes.starts_with(b"%PDF-"));
        assert_eq!(page_count(&bytes), 1);
        let doc = String::from_utf8_lossy(&bytes);
        assert!(doc.contains("Cover letter - Engineer at Acme"));
    }

    #[test]
    fn test_non_latin_and_indented_text() {
        let exporter = PdfExporter::default();
        let content = "Re: Łódź office, Ελλάδα team, Київ\n    indented  double  space";

        let lines = exporter.layout().wrap(content);
        assert_eq!(lines.join("\n"), content);

        let bytes = exporter.to_bytes(&letter(content)).unwrap();
        assert_eq!(page_count(&bytes), 1);
    }

    #[test]
    fn test_long_letter_paginates() {
        let content = vec!["line"; 80].join("\n");
        let bytes = PdfExporter::default().to_bytes(&letter(&content)).unwrap();
        assert_eq!(page_count(&bytes), 3);
    }

    #[test]
    fn test_empty_letter_has_one_page() {
        let bytes = PdfExporter::default().to_bytes(&letter("")).unwrap();
        assert_eq!(page_count(&bytes), 1);
    }

    #[test]
    fn test_custom_font_is_used() {
        let exporter = PdfExporter::default().with_font(DEFAULT_FONT.to_vec());
        assert!(format!("{:?}", exporter).contains("font_bytes"));
        let bytes = exporter.to_bytes(&letter("Hello")).unwrap();
        assert_eq!(page_count(&bytes), 1);
    }

    #[test]
    fn test_contact_line() {
        let sender = SenderMetadata {
            email: "a@example.com".to_string(),
            phone: "555".to_string(),
            ..Default::default()
        };
        assert_eq!(contact_line(&sender), "a@example.com | 555");
        assert_eq!(contact_line(&SenderMetadata::default()), "");
    }
}
