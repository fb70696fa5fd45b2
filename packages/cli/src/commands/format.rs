use super::load_document;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use etergroup_parser::GroupConfig;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct FormatArgs {
    /// Group file to rewrite in canonical form
    pub input: PathBuf,

    /// Write to this file instead of overwriting the input
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print to stdout instead of writing a file
    #[arg(long)]
    pub stdout: bool,
}

pub fn format(args: FormatArgs, config: GroupConfig) -> Result<()> {
    let reader = load_document(&args.input, config)?;

    if args.stdout {
        println!("{}", reader.generate_tree());
        return Ok(());
    }

    let output = args.output.unwrap_or_else(|| args.input.clone());
    reader.save_to_file(&output)?;
    println!(
        "{} {} → {}",
        "✓".green(),
        args.input.display(),
        output.display()
    );
    Ok(())
}
