use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use custard_editor::{Document, Operation};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Keyboard JSON file to edit
    pub file: PathBuf,

    /// JSON array of operations
    #[arg(long)]
    pub ops: PathBuf,

    /// Write the result here instead of editing in place
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn apply(args: ApplyArgs) -> Result<()> {
    let ops_source = fs::read_to_string(&args.ops)
        .with_context(|| format!("Cannot read {}", args.ops.display()))?;
    let ops: Vec<Operation> = serde_json::from_str(&ops_source)
        .with_context(|| format!("{} is not an operation batch", args.ops.display()))?;

    let mut doc = Document::load(args.file.clone())
        .with_context(|| format!("Cannot load {}", args.file.display()))?;

    let log = doc.apply(&ops);
    for line in &log {
        println!("  {} {}", "·".blue(), line);
    }
    println!("{}", custard_editor::summarize(&log).bold());

    match &args.output {
        Some(path) => {
            let rendered = doc.export().context("Edited document failed validation")?;
            fs::write(path, rendered)
                .with_context(|| format!("Cannot write {}", path.display()))?;
            println!("  {} wrote {}", "✓".green(), path.display());
        }
        None => {
            doc.save().context("Edited document failed validation")?;
            println!("  {} updated {}", "✓".green(), args.file.display());
        }
    }
    Ok(())
}
