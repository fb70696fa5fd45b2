mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{check, format, get, set, tree, CheckArgs, FormatArgs, GetArgs, SetArgs, TreeArgs};
use config::Config;
use tracing_subscriber::EnvFilter;

/// etergroup - inspect, edit and reformat EterPack group files
#[derive(Parser, Debug)]
#[command(name = "etergroup")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Drop comment lines instead of carrying them through
    #[arg(long, global = true)]
    no_comments: bool,

    /// Emit an empty line after every closed group
    #[arg(long, global = true)]
    padding: bool,

    /// Log parser activity (overridden by RUST_LOG)
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rewrite a group file in canonical form
    Format(FormatArgs),

    /// Print the value or outline found at a path
    Get(GetArgs),

    /// Replace the value of an entry and save the file
    Set(SetArgs),

    /// Show the whole file as an outline or JSON
    Tree(TreeArgs),

    /// Report malformed lines and unbalanced braces
    Check(CheckArgs),
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let cwd = std::env::current_dir().expect("Cannot get current directory");

    let result = Config::load(&cwd).and_then(|mut config| {
        if cli.no_comments {
            config.group.preserve_comments = false;
        }
        if cli.padding {
            config.group.group_padding = true;
        }

        match cli.command {
            Command::Format(args) => format(args, config.group),
            Command::Get(args) => get(args, config.group),
            Command::Set(args) => set(args, config.group),
            Command::Tree(args) => tree(args, config.group),
            Command::Check(args) => check(args, config.group, &config.extension),
        }
    });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
