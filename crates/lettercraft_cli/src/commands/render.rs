//! Render command - Print a filled-in letter.

use anyhow::Result;
use clap::Args;
use tracing::info;

use super::{resolve_form, GlobalArgs, ValueArgs};

#[derive(Args)]
pub struct RenderArgs {
    #[command(flatten)]
    values: ValueArgs,
}

pub fn execute(global: &GlobalArgs, args: RenderArgs) -> Result<()> {
    let content = global.content()?;
    let details = global.store()?.load().to_details();
    let form = resolve_form(&content, details, &args.values)?;

    info!("Rendering template {}", form.template.id);
    println!("{}", form.render());

    Ok(())
}
