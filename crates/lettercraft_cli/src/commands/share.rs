//! Share command - Print a URL that reopens the form with the current values.

use anyhow::Result;
use clap::Args;

use lettercraft_store::shareable_url;

use super::{resolve_form, GlobalArgs, ValueArgs};
use crate::error::CliError;

#[derive(Args)]
pub struct ShareArgs {
    #[command(flatten)]
    values: ValueArgs,

    /// Base URL of the letter page
    #[arg(long, env = "LETTERCRAFT_BASE_URL", default_value = "http://localhost:5173/")]
    base: String,
}

pub fn execute(global: &GlobalArgs, args: ShareArgs) -> Result<()> {
    let content = global.content()?;
    let details = global.store()?.load().to_details();
    let form = resolve_form(&content, details, &args.values)?;

    let url = shareable_url(&args.base, &form.values, Some(form.template.id.as_str()))
        .map_err(|e| CliError::InvalidValue {
            flag: "--base".to_string(),
            message: format!("'{}': {}", args.base, e),
        })?;
    println!("{}", url);

    Ok(())
}
