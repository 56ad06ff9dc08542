//! Export command - Write a filled-in letter to a file.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use tracing::{info, warn};

use lettercraft_export::{
    export_filename, ExportFormat, Exporter, Letter, PdfExporter, SenderMetadata,
};

use super::{resolve_form, GlobalArgs, ValueArgs};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Pdf,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => ExportFormat::Text,
            FormatArg::Pdf => ExportFormat::Pdf,
        }
    }
}

#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    values: ValueArgs,

    /// Output format
    #[arg(long, value_enum, default_value = "pdf")]
    format: FormatArg,

    /// Directory to write into (defaults to current directory)
    #[arg(short, long, conflicts_with = "file")]
    output: Option<PathBuf>,

    /// Exact file path to write
    #[arg(long)]
    file: Option<PathBuf>,

    /// Leave the saved signature out of the export
    #[arg(long)]
    no_signature: bool,

    /// TrueType font for PDF output (defaults to the bundled DejaVu Sans)
    #[arg(long, value_name = "FILE")]
    font: Option<PathBuf>,
}

pub fn execute(global: &GlobalArgs, args: ExportArgs) -> Result<()> {
    let content = global.content()?;
    let store = global.store()?;
    let details = store.load().to_details();
    let form = resolve_form(&content, details, &args.values)?;

    let signature = if args.no_signature {
        None
    } else {
        store.load_signature()
    };
    let sender = SenderMetadata::from_values(&form.values, &form.details, signature);
    let letter = Letter::new(form.render(), sender);

    let format = ExportFormat::from(args.format);
    let path = match args.file {
        Some(file) => file,
        None => {
            let dir = match args.output {
                Some(dir) => dir,
                None => std::env::current_dir().context("Failed to resolve current directory")?,
            };
            dir.join(export_filename(
                &form.values,
                format.extension(),
                letter.created_at,
            ))
        }
    };

    let exporter: Box<dyn Exporter> = match (format, &args.font) {
        (ExportFormat::Pdf, Some(font)) => {
            let bytes = fs::read(font)
                .with_context(|| format!("Failed to read font file {:?}", font))?;
            Box::new(PdfExporter::default().with_font(bytes))
        }
        (_, Some(_)) => {
            warn!("--font only applies to PDF export; ignoring it");
            format.exporter()
        }
        (_, None) => format.exporter(),
    };

    info!("Exporting template {} as {}", form.template.id, format);
    exporter
        .export(&letter, &path)
        .with_context(|| format!("Failed to export letter to {:?}", path))?;

    println!("✅ Exported {}", path.display());

    Ok(())
}
