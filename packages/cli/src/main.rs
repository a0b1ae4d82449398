mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{compile, init, template, tree, CompileArgs, InitArgs, TemplateArgs, TreeArgs};
use tracing::Level;

/// Protypo CLI - page trees from the visual constructor to template source
#[derive(Parser, Debug)]
#[command(name = "protypo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a new Protypo project
    Init(InitArgs),

    /// Compile page trees to template source
    Compile(CompileArgs),

    /// Print the visual tree of a page
    Tree(TreeArgs),

    /// Print a starter template instance as JSON
    Template(TemplateArgs),
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| {
            let cwd = cwd.display().to_string();
            match cli.command {
                Command::Init(args) => init(args, &cwd),
                Command::Compile(args) => compile(args, &cwd),
                Command::Tree(args) => tree(args, &cwd),
                Command::Template(args) => template(args, &cwd),
            }
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
