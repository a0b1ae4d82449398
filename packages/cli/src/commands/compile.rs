use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use protypo_compiler::{generate_with_diagnostics, CompileOptions, CompileOutput};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

#[derive(Debug, Args)]
pub struct CompileArgs {
    /// Page tree file or directory (defaults to the configured source directory)
    pub path: Option<String>,

    /// Output to stdout instead of files
    #[arg(long)]
    pub stdout: bool,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<String>,

    /// Strip trailing whitespace from generated lines (overrides config)
    #[arg(long)]
    pub trim: bool,
}

pub fn compile(args: CompileArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let src_dir = match &args.path {
        Some(path) => PathBuf::from(cwd).join(path),
        None => config.get_src_dir(cwd),
    };

    if !src_dir.exists() {
        return Err(anyhow!("Source path does not exist: {:?}", src_dir));
    }

    let mut options = config.compile_options();
    options.trim_trailing_whitespace |= args.trim;

    if !args.stdout {
        println!("{}", "🔨 Compiling Protypo pages...".bright_blue().bold());
    }

    let files = find_page_files(&src_dir);
    if files.is_empty() {
        println!("{}", "⚠️  No .json page files found".yellow());
        return Ok(());
    }
    debug!("Found {} page files under {:?}", files.len(), src_dir);

    let out_dir = match &args.out_dir {
        Some(out) => PathBuf::from(cwd).join(out),
        None => config.get_out_dir(cwd),
    };
    let base = if src_dir.is_file() {
        src_dir.parent().map(Path::to_path_buf).unwrap_or_default()
    } else {
        src_dir.clone()
    };

    let mut success_count = 0;
    let mut error_count = 0;

    for file in &files {
        let relative_path = file.strip_prefix(&base).unwrap_or(file);
        match compile_file(file, options.clone()) {
            Ok(output) => {
                success_count += 1;
                for diagnostic in &output.diagnostics {
                    eprintln!(
                        "  {} {} - {}",
                        "⚠".yellow(),
                        relative_path.display(),
                        diagnostic.to_string().yellow()
                    );
                }

                if args.stdout {
                    println!("{}", output.source);
                    continue;
                }

                let output_file = out_dir.join(relative_path).with_extension(&config.extension);
                write_output(&output_file, &output.source)?;
                println!(
                    "  {} {} → {}",
                    "✓".green(),
                    relative_path.display(),
                    output_file.display()
                );
            }
            Err(e) => {
                error_count += 1;
                eprintln!(
                    "  {} {} - {}",
                    "✗".red(),
                    relative_path.display(),
                    format!("{:#}", e).red()
                );
            }
        }
    }

    if args.stdout {
        return Ok(());
    }

    println!();
    if error_count == 0 {
        println!("{} Compiled {} pages successfully", "✅".green(), success_count);
    } else {
        println!(
            "{} Compiled {} pages, {} errors",
            "⚠️".yellow(),
            success_count,
            error_count
        );
    }

    Ok(())
}

/// A single file is taken as-is; directories are searched for `.json` files
fn find_page_files(path: &Path) -> Vec<PathBuf> {
    if path.is_file() {
        return vec![path.to_path_buf()];
    }

    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("json"))
        .collect();
    files.sort();
    files
}

fn compile_file(file_path: &Path, options: CompileOptions) -> Result<CompileOutput> {
    let source = fs::read_to_string(file_path)?;
    let nodes = protypo_tree::parse(&source).with_context(|| format!("invalid page tree in {}", file_path.display()))?;
    Ok(generate_with_diagnostics(&nodes, options))
}

fn write_output(output_file: &Path, source: &str) -> Result<()> {
    if let Some(parent) = output_file.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(output_file, source)?;
    Ok(())
}
