//! Variables command - Show placeholder names and check templates.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use lettercraft_templates::{check_template, extract_variable_names, Template};

use super::GlobalArgs;
use crate::error::CliError;

#[derive(Args)]
pub struct VariablesArgs {
    /// Template to inspect (checks all templates if not specified)
    #[arg(short, long, conflicts_with = "content")]
    template: Option<String>,

    /// Scan a raw template file instead of a known template
    #[arg(short, long, value_name = "FILE")]
    content: Option<PathBuf>,
}

pub fn execute(global: &GlobalArgs, args: VariablesArgs) -> Result<()> {
    if let Some(path) = &args.content {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read template file {:?}", path))?;
        for name in extract_variable_names(&raw) {
            println!("{}", name);
        }
        return Ok(());
    }

    let loaded = global.content()?;
    let templates: Vec<&Template> = match &args.template {
        Some(id) => vec![loaded
            .library
            .get(id)
            .ok_or_else(|| CliError::UnknownTemplate(id.clone()))?],
        None => loaded.library.list().iter().collect(),
    };

    info!("Checking {} template(s)", templates.len());

    let mut failed = 0;
    for template in &templates {
        let names = extract_variable_names(&template.content);
        println!("📄 {} ({})", template.name, template.id);
        println!(
            "   placeholders: {}",
            names.into_iter().collect::<Vec<_>>().join(", ")
        );

        let check = check_template(template, &loaded.catalogue);
        if check.valid {
            println!("   ✅ Check passed");
        } else {
            failed += 1;
            println!("   ❌ Check failed:");
            for error in &check.errors {
                println!("      - {}", error);
            }
        }
        for warning in &check.warnings {
            println!("   ⚠️  {}", warning);
        }
    }

    if failed > 0 {
        anyhow::bail!("Template validation failed for {} template(s)", failed);
    }

    Ok(())
}
