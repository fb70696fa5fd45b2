pub mod check;
pub mod format;
pub mod get;
pub mod set;
pub mod tree;

pub use check::{check, CheckArgs};
pub use format::{format, FormatArgs};
pub use get::{get, GetArgs};
pub use set::{set, SetArgs};
pub use tree::{tree, TreeArgs};

use anyhow::{anyhow, Context, Result};
use etergroup_parser::{format_errors, GroupConfig, GroupError, GroupReader, ParseErrors};
use std::fs;
use std::path::Path;

/// Read and parse a group file. Skipped lines are reported on stderr; a
/// fatal parse error is rendered against the source and returned.
pub(crate) fn load_document(path: &Path, config: GroupConfig) -> Result<GroupReader> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let filename = path.display().to_string();

    let mut reader = GroupReader::new(config);
    match reader.load_from_data(&source) {
        Ok(()) => {
            if !reader.diagnostics().is_empty() {
                eprint!("{}", format_errors(&source, &filename, reader.diagnostics()));
            }
            Ok(reader)
        }
        Err(GroupError::Parse(err)) => {
            eprint!("{}", format_errors(&source, &filename, &ParseErrors::from(err.clone())));
            Err(anyhow!("Failed to parse {}: {}", filename, err))
        }
        Err(err) => Err(err.into()),
    }
}
