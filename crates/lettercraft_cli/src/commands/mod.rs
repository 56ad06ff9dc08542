//! CLI command definitions.
//!
//! This module defines the command structure for the LetterCraft CLI and
//! the form resolution shared by the commands that render a letter.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, warn};

use lettercraft_store::{parse_query, DefaultsStore, TEMPLATE_PARAM};
use lettercraft_templates::form::{apply_details, initial_values, join_selection, missing_required};
use lettercraft_templates::{
    render, Content, ContentLoader, SenderDetails, Template, ValueMap, VariableDefinition,
};

use crate::error::CliError;

pub mod defaults;
pub mod export;
pub mod render;
pub mod share;
pub mod templates;
pub mod variables;

/// LetterCraft - fill, preview and export cover letters
#[derive(Parser)]
#[command(name = "lettercraft")]
#[command(version, about = "LetterCraft - fill, preview and export cover letters")]
#[command(long_about = r#"
LetterCraft fills cover-letter templates with your values, previews the
result and exports it as text or PDF.

COMMANDS:
  templates   → List available templates
  variables   → Show placeholders a template uses and check it
  render      → Print a filled-in letter
  export      → Write a filled-in letter to a .txt or .pdf file
  defaults    → Manage saved sender details and signature
  share       → Print a URL that reopens the form with your values

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Validation failure
  4 - Template error
  5 - Export error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Directory holding saved defaults (defaults to current directory)
    #[arg(long, global = true, env = "LETTERCRAFT_HOME")]
    pub data_dir: Option<PathBuf>,

    /// Directory with extra variables.yaml and templates/ (optional)
    #[arg(long, global = true, env = "LETTERCRAFT_CONTENT")]
    pub content_dir: Option<PathBuf>,
}

impl GlobalArgs {
    /// Store for saved defaults.
    pub fn store(&self) -> Result<DefaultsStore> {
        let root = match &self.data_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().context("Failed to resolve current directory")?,
        };
        Ok(DefaultsStore::new(root))
    }

    /// Built-in content, layered with the content directory if given.
    pub fn content(&self) -> Result<Content> {
        match &self.content_dir {
            Some(dir) => ContentLoader::new(dir)
                .load()
                .with_context(|| format!("Failed to load template content from {:?}", dir)),
            None => Content::builtin().context("Failed to load built-in template content"),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List available templates
    Templates(templates::TemplatesArgs),

    /// Show placeholder names and check templates
    Variables(variables::VariablesArgs),

    /// Print a filled-in letter
    Render(render::RenderArgs),

    /// Export a filled-in letter to a file
    Export(export::ExportArgs),

    /// Manage saved sender details and signature
    Defaults(defaults::DefaultsArgs),

    /// Print a shareable URL for the current values
    Share(share::ShareArgs),
}

/// Template selection and form values.
#[derive(Args, Debug, Clone, Default)]
pub struct ValueArgs {
    /// Template to use (defaults to the URL's template, then the active one)
    #[arg(short, long)]
    pub template: Option<String>,

    /// Set a value: KEY=VALUE (repeatable)
    #[arg(short, long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,

    /// Set a list value from comma-separated items: KEY=A,B,C (repeatable)
    #[arg(short, long = "list", value_name = "KEY=ITEMS")]
    pub list: Vec<String>,

    /// Prefill values from a shared URL or query string
    #[arg(long, value_name = "URL")]
    pub query: Option<String>,
}

/// A template with its variables and current values.
#[derive(Debug)]
pub struct Form {
    pub template: Template,
    pub variables: Vec<VariableDefinition>,
    pub values: ValueMap,
    pub details: SenderDetails,
}

impl Form {
    /// Render the letter text.
    pub fn render(&self) -> String {
        render(&self.template.content, &self.variables, &self.values)
    }
}

/// Build the form from content, saved details and command-line values.
///
/// Values resolve as: `--set`/`--list`, then the query string, then saved
/// details, then variable defaults. Name, email and phone left empty after
/// that are refilled from saved details.
pub fn resolve_form(content: &Content, details: SenderDetails, args: &ValueArgs) -> Result<Form> {
    let query = args.query.as_deref().map(parse_query).unwrap_or_default();

    let template = match &args.template {
        Some(id) => content
            .library
            .get(id)
            .ok_or_else(|| CliError::UnknownTemplate(id.clone()))?,
        None => query
            .get(TEMPLATE_PARAM)
            .and_then(|id| content.library.get(id))
            .or_else(|| content.library.active())
            .context("No templates available")?,
    };
    debug!("Using template {}", template.id);

    let variables = content.catalogue.for_template(template);
    let mut values = initial_values(&variables, &query, &details);

    for pair in &args.set {
        let (key, value) = split_pair(pair)?;
        ensure_declared(&variables, key, &template.id)?;
        values.insert(key.to_string(), value.to_string());
    }

    for pair in &args.list {
        let (key, items) = split_pair(pair)?;
        ensure_declared(&variables, key, &template.id)?;
        values.insert(key.to_string(), join_selection(items.split(',')));
    }

    apply_details(&mut values, &details);

    for var in missing_required(&variables, &values) {
        warn!("Required field is empty: {} ({})", var.label, var.id);
    }

    Ok(Form {
        template: template.clone(),
        variables,
        values,
        details,
    })
}

/// Split a `KEY=VALUE` argument.
pub fn split_pair(pair: &str) -> Result<(&str, &str)> {
    match pair.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value)),
        _ => Err(CliError::InvalidPair(pair.to_string()).into()),
    }
}

fn ensure_declared(variables: &[VariableDefinition], key: &str, template_id: &str) -> Result<()> {
    if variables.iter().any(|v| v.id == key) {
        Ok(())
    } else {
        Err(CliError::UnknownVariable {
            variable: key.to_string(),
            template: template_id.to_string(),
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> SenderDetails {
        SenderDetails {
            full_name: "Saved Name".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_split_pair() {
        assert_eq!(split_pair("a=b").unwrap(), ("a", "b"));
        assert_eq!(split_pair("a=b=c").unwrap(), ("a", "b=c"));
        assert_eq!(split_pair("a=").unwrap(), ("a", ""));
        assert!(split_pair("novalue").is_err());
        assert!(split_pair("=x").is_err());
    }

    #[test]
    fn test_resolve_form_precedence() {
        let content = Content::builtin().unwrap();
        let args = ValueArgs {
            template: None,
            set: vec!["position=Engineer".to_string()],
            list: vec!["techStack=Rust, Tokio ,".to_string()],
            query: Some("?template=upwork&position=Ignored&email=q%40example.com".to_string()),
        };

        let form = resolve_form(&content, details(), &args).unwrap();
        assert_eq!(form.template.id, "upwork");
        assert_eq!(form.values["position"], "Engineer");
        assert_eq!(form.values["techStack"], "Rust, Tokio");
        assert_eq!(form.values["email"], "q@example.com");
        assert_eq!(form.values["fullName"], "Saved Name");
        assert!(!form.values.contains_key("companyName"));

        let letter = form.render();
        assert!(letter.contains("job posting for Engineer and"));
        assert!(letter.contains("experience, particularly in Rust, Tokio make me"));
    }

    #[test]
    fn test_resolve_form_defaults_to_active_template() {
        let content = Content::builtin().unwrap();
        let form = resolve_form(&content, details(), &ValueArgs::default()).unwrap();
        assert_eq!(form.template.id, "regular");
        assert_eq!(form.variables.len(), 6);
    }

    #[test]
    fn test_resolve_form_rejects_unknown_input() {
        let content = Content::builtin().unwrap();

        let unknown_template = ValueArgs {
            template: Some("nope".to_string()),
            ..Default::default()
        };
        assert!(resolve_form(&content, details(), &unknown_template).is_err());

        let undeclared = ValueArgs {
            template: Some("upwork".to_string()),
            set: vec!["companyName=Acme".to_string()],
            ..Default::default()
        };
        let err = resolve_form(&content, details(), &undeclared).unwrap_err();
        assert!(err.to_string().contains("Unknown variable 'companyName'"));
    }

    #[test]
    fn test_blank_sender_fields_fall_back_to_saved_details() {
        let content = Content::builtin().unwrap();
        let args = ValueArgs {
            set: vec!["fullName=".to_string(), "position=QA".to_string()],
            ..Default::default()
        };

        let form = resolve_form(&content, details(), &args).unwrap();
        assert_eq!(form.values["fullName"], "Saved Name");
        assert_eq!(form.values["position"], "QA");
        assert_eq!(form.values["email"], "");
    }
}
