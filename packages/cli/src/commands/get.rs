use super::load_document;
use anyhow::Result;
use clap::Args;
use etergroup_parser::{GroupConfig, NodeKind};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct GetArgs {
    /// Group file to read
    pub input: PathBuf,

    /// Path of group names and a key, e.g. `ApplyNumSettings Default basis`
    pub path: Vec<String>,
}

pub fn get(args: GetArgs, config: GroupConfig) -> Result<()> {
    let reader = load_document(&args.input, config)?;
    let id = reader.tree().find(&args.path)?;

    match &reader.tree().node(id).kind {
        NodeKind::Leaf(leaf) => println!("{}", leaf.value),
        NodeKind::Group(_) => println!("{}", reader.outline(id)),
    }
    Ok(())
}
