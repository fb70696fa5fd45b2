use super::load_document;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use etergroup_parser::{GroupConfig, Value};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Args)]
pub struct SetArgs {
    /// Group file to edit
    pub input: PathBuf,

    /// Path of group names ending with the key to edit
    #[arg(required = true)]
    pub path: Vec<String>,

    /// New value, tokenized like a value in the file (`"4 4 4"`, `'"quoted text"'`)
    #[arg(short, long)]
    pub value: String,

    /// Write to this file instead of overwriting the input
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn set(args: SetArgs, config: GroupConfig) -> Result<()> {
    let value = Value::parse(&args.value).ok_or_else(|| anyhow!("Value must not be empty"))?;

    let mut reader = load_document(&args.input, config)?;
    let leaf = reader.find_leaf_mut(&args.path)?;
    let previous = std::mem::replace(&mut leaf.value, value);
    info!(key = %leaf.key, previous = %previous, current = %leaf.value, "Updated entry");

    let output = args.output.unwrap_or_else(|| args.input.clone());
    reader.save_to_file(&output)?;

    println!(
        "{} {} = {} ({})",
        "✓".green(),
        args.path.join(" / "),
        args.value,
        output.display()
    );
    Ok(())
}
