//! Templates command - List available templates.

use anyhow::Result;
use clap::Args;
use tracing::info;

use super::GlobalArgs;

#[derive(Args)]
pub struct TemplatesArgs {
    /// Also print each template's declared variables
    #[arg(short, long)]
    long: bool,
}

pub fn execute(global: &GlobalArgs, args: TemplatesArgs) -> Result<()> {
    let content = global.content()?;
    let library = &content.library;
    info!("Listing {} template(s)", library.list().len());

    if library.list().is_empty() {
        println!("⚠️  No templates found");
        return Ok(());
    }

    let active = library.active().map(|t| t.id.as_str());
    for template in library.list() {
        let marker = if Some(template.id.as_str()) == active { "*" } else { " " };
        println!("{} {:<24} {}", marker, template.id, template.name);
        if args.long {
            if !template.description.is_empty() {
                println!("    {}", template.description);
            }
            println!("    variables: {}", template.variables.join(", "));
        }
    }

    Ok(())
}
