use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use custard_model::document::Keyboard;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct NormalizeArgs {
    /// Keyboard JSON file in any accepted shape
    pub file: PathBuf,

    /// Write the canonical form here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn normalize(args: NormalizeArgs) -> Result<()> {
    let source = fs::read_to_string(&args.file)
        .with_context(|| format!("Cannot read {}", args.file.display()))?;
    let keyboard: Keyboard = serde_json::from_str(&source)
        .with_context(|| format!("{} is not a keyboard document", args.file.display()))?;

    let canonical = custard_normalizer::normalize(&keyboard);
    let rendered = serde_json::to_string_pretty(&canonical)?;

    match &args.output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("Cannot write {}", path.display()))?;
            println!(
                "  {} {} → {}",
                "✓".green(),
                args.file.display(),
                path.display()
            );
        }
        None => println!("{rendered}"),
    }
    Ok(())
}
