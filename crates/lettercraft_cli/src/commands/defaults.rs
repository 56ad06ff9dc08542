//! Defaults command - Manage saved sender details and signature.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use tracing::info;

use lettercraft_store::{Defaults, DefaultsStore};

use super::GlobalArgs;
use crate::error::CliError;

#[derive(Args)]
pub struct DefaultsArgs {
    #[command(subcommand)]
    action: DefaultsAction,
}

#[derive(Subcommand)]
enum DefaultsAction {
    /// Show saved details
    Show,

    /// Save details used to prefill new letters
    Set(SetArgs),

    /// Save or clear the signature image
    Signature(SignatureArgs),
}

#[derive(Args)]
struct SetArgs {
    /// Full name
    #[arg(long)]
    full_name: Option<String>,

    /// Email address
    #[arg(long)]
    email: Option<String>,

    /// Phone number
    #[arg(long)]
    phone: Option<String>,
}

#[derive(Args)]
struct SignatureArgs {
    /// File holding the signature as a data URL
    #[arg(long, conflicts_with = "clear", required_unless_present = "clear")]
    file: Option<PathBuf>,

    /// Remove the saved signature
    #[arg(long)]
    clear: bool,
}

pub fn execute(global: &GlobalArgs, args: DefaultsArgs) -> Result<()> {
    let store = global.store()?;

    match args.action {
        DefaultsAction::Show => show(&store),
        DefaultsAction::Set(set) => save(&store, set),
        DefaultsAction::Signature(sig) => signature(&store, sig),
    }
}

fn show(store: &DefaultsStore) -> Result<()> {
    let defaults = store.load();
    if defaults.is_empty() {
        println!("⚠️  No saved defaults in {}", store.store_dir().display());
    }
    println!("Full name: {}", defaults.full_name);
    println!("Email:     {}", defaults.email);
    println!("Phone:     {}", defaults.phone);
    let signature = if store.load_signature().is_some() {
        "saved"
    } else {
        "none"
    };
    println!("Signature: {}", signature);
    Ok(())
}

fn save(store: &DefaultsStore, args: SetArgs) -> Result<()> {
    let current = store.load();
    let updated = merge(current, args);
    store.save(&updated).context("Failed to save defaults")?;
    info!("Defaults updated");
    println!("✅ Defaults saved to {}", store.store_dir().display());
    Ok(())
}

fn merge(mut defaults: Defaults, args: SetArgs) -> Defaults {
    if let Some(full_name) = args.full_name {
        defaults.full_name = full_name;
    }
    if let Some(email) = args.email {
        defaults.email = email;
    }
    if let Some(phone) = args.phone {
        defaults.phone = phone;
    }
    defaults
}

fn signature(store: &DefaultsStore, args: SignatureArgs) -> Result<()> {
    if args.clear {
        store.clear_signature().context("Failed to clear signature")?;
        println!("✅ Signature cleared");
        return Ok(());
    }

    if let Some(path) = args.file {
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read signature file {:?}", path))?;
        if !raw.trim_start().starts_with("data:image/") {
            return Err(CliError::InvalidValue {
                flag: "--file".to_string(),
                message: "signature must be an image data URL".to_string(),
            }
            .into());
        }
        store.save_signature(&raw).context("Failed to save signature")?;
        println!("✅ Signature saved");
    }

    Ok(())
}
