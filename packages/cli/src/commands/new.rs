use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use custard_editor::templates;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Template name (default_qwerty, japanese_flick)
    pub template: String,

    /// Where to write the new keyboard
    #[arg(short, long)]
    pub output: PathBuf,
}

pub fn new(args: NewArgs) -> Result<()> {
    let keyboard = templates::get(&args.template).ok_or_else(|| {
        anyhow!(
            "Unknown template '{}'. Available: {}",
            args.template,
            templates::names().join(", ")
        )
    })?;

    let canonical = custard_normalizer::normalize(&keyboard);
    let rendered = serde_json::to_string_pretty(&canonical)?;
    fs::write(&args.output, rendered)
        .with_context(|| format!("Cannot write {}", args.output.display()))?;

    println!(
        "  {} created {} from template {}",
        "✓".green(),
        args.output.display(),
        args.template.bold()
    );
    Ok(())
}
