mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{apply, new, normalize, validate, ApplyArgs, NewArgs, NormalizeArgs, ValidateArgs};

/// Custard CLI - keyboard layout document toolkit
#[derive(Parser, Debug)]
#[command(name = "custard")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check files against the structural validator
    Validate(ValidateArgs),

    /// Rewrite a document into the canonical wire form
    Normalize(NormalizeArgs),

    /// Apply a batch of edit operations to a document
    Apply(ApplyArgs),

    /// Create a keyboard from a built-in template
    New(NewArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Validate(args) => validate(args),
        Command::Normalize(args) => normalize(args),
        Command::Apply(args) => apply(args),
        Command::New(args) => new(args),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
