use super::load_document;
use anyhow::{anyhow, Result};
use clap::Args;
use etergroup_parser::GroupConfig;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct TreeArgs {
    /// Group file to display
    pub input: PathBuf,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

pub fn tree(args: TreeArgs, config: GroupConfig) -> Result<()> {
    let reader = load_document(&args.input, config)?;

    match args.format.as_str() {
        "text" => println!("{}", reader.print_tree()),
        "json" => println!("{}", serde_json::to_string_pretty(reader.tree())?),
        other => return Err(anyhow!("Invalid format: {}. Use: text or json", other)),
    }
    Ok(())
}
