use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use custard_validator::is_acceptable;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Keyboard JSON files to check
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

pub fn validate(args: ValidateArgs) -> Result<()> {
    let mut rejected = 0;

    for path in &args.files {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Cannot read {}", path.display()))?;
        let doc: serde_json::Value = serde_json::from_str(&source)
            .with_context(|| format!("{} is not valid JSON", path.display()))?;

        if is_acceptable(&doc) {
            println!("  {} {}", "✓".green(), path.display());
        } else {
            rejected += 1;
            eprintln!("  {} {} {}", "✗".red(), path.display(), "rejected".red());
        }
    }

    if rejected > 0 {
        return Err(anyhow!("{} of {} files rejected", rejected, args.files.len()));
    }
    println!("{}", "All files acceptable".green().bold());
    Ok(())
}
