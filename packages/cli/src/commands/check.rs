use anyhow::Result;
use clap::Args;
use colored::Colorize;
use etergroup_parser::{format_errors, GroupConfig, GroupError, GroupReader, ParseErrors};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Group file or directory to check
    pub input: PathBuf,

    /// Also list files without problems
    #[arg(short, long)]
    pub verbose: bool,
}

/// Per-file outcome
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CheckSummary {
    pub warnings: usize,
    pub errors: usize,
}

pub fn check(args: CheckArgs, config: GroupConfig, extension: &str) -> Result<()> {
    println!("🔍 {} group file check", "Starting".green().bold());
    println!("   Input: {}", args.input.display());
    println!();

    let files = if args.input.is_file() {
        vec![args.input.clone()]
    } else if args.input.is_dir() {
        let files = find_group_files(&args.input, extension);
        println!("   Found {} .{} files", files.len(), extension);
        println!();
        files
    } else {
        return Err(anyhow::anyhow!(
            "Input path does not exist: {}",
            args.input.display()
        ));
    };

    let mut total = CheckSummary::default();
    for file in &files {
        let summary = check_file(file, config)?;
        if summary == CheckSummary::default() && args.verbose {
            println!("{} {}", "✓".green(), file.display());
        }
        total.warnings += summary.warnings;
        total.errors += summary.errors;
    }

    println!();
    println!(
        "✨ {} Check complete!",
        if total.errors > 0 {
            "Done".red().bold()
        } else {
            "Done".green().bold()
        }
    );
    println!("   Files checked: {}", files.len());
    if total.errors > 0 {
        println!("   {} {}", "Errors:".red(), total.errors);
    }
    if total.warnings > 0 {
        println!("   {} {}", "Warnings:".yellow(), total.warnings);
    }
    if total.errors == 0 && total.warnings == 0 {
        println!("   {} No issues found!", "✓".green());
    }

    if total.errors > 0 {
        std::process::exit(1);
    }
    Ok(())
}

pub fn check_file(path: &Path, config: GroupConfig) -> Result<CheckSummary> {
    let source = fs::read_to_string(path)?;
    let filename = path.display().to_string();
    let mut reader = GroupReader::new(config);

    match reader.load_from_data(&source) {
        Ok(()) => {
            let warnings = reader.diagnostics().len();
            if warnings > 0 {
                eprint!("{}", format_errors(&source, &filename, reader.diagnostics()));
            }
            Ok(CheckSummary {
                warnings,
                errors: 0,
            })
        }
        Err(GroupError::Parse(err)) => {
            eprintln!("{} Failed to parse {}", "✗".red(), filename);
            eprint!("{}", format_errors(&source, &filename, &ParseErrors::from(err)));
            Ok(CheckSummary {
                warnings: 0,
                errors: 1,
            })
        }
        Err(err) => Err(err.into()),
    }
}

fn find_group_files(dir: &Path, extension: &str) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.is_file() && path.extension().map(|e| e == extension).unwrap_or(false)
        })
        .collect();
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_file_counts_problems() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.txt");
        let warned = dir.path().join("warned.txt");
        let broken = dir.path().join("broken.txt");
        fs::write(&good, "Group A\n{\nx 1\n}").unwrap();
        fs::write(&warned, "Group A\n{\nlonely\n}").unwrap();
        fs::write(&broken, "Group A\n{\nx 1").unwrap();

        let config = GroupConfig::default();
        assert_eq!(check_file(&good, config).unwrap(), CheckSummary::default());
        assert_eq!(check_file(&warned, config).unwrap().warnings, 1);
        assert_eq!(check_file(&broken, config).unwrap().errors, 1);
    }

    #[test]
    fn test_find_group_files_filters_extension() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("a.txt"), "x 1").unwrap();
        fs::write(dir.path().join("nested").join("b.txt"), "x 1").unwrap();
        fs::write(dir.path().join("c.json"), "{}").unwrap();

        let files = find_group_files(dir.path(), "txt");
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.extension().unwrap() == "txt"));
    }
}
