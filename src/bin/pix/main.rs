//! PIX CLI - Tool for inspecting and normalizing PIX text files.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pix::core::Section;
use pix::reader;
use pix::writer::{self, PixWriter, WriteOptions};

/// Inspect and reformat PIX files
#[derive(Parser)]
#[command(name = "pix")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a summary of each top-level section
    Info(FileArgs),

    /// Show the section hierarchy
    Tree(FileArgs),

    /// Read a file and write it back in canonical layout
    Fmt(FmtArgs),
}

#[derive(Args)]
struct FileArgs {
    /// Path to the PIX file
    file: PathBuf,
}

#[derive(Args)]
struct FmtArgs {
    /// Input PIX file
    input: PathBuf,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Spaces per indent level
    #[arg(long, default_value_t = 4)]
    indent: usize,

    /// Indent with tabs
    #[arg(long, conflicts_with = "indent")]
    tabs: bool,

    /// Log progress after each top-level section
    #[arg(long)]
    progress: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Info(args) => cmd_info(&args.file),
        Commands::Tree(args) => cmd_tree(&args.file),
        Commands::Fmt(args) => cmd_fmt(&args),
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn,pix=info",
        1 => "debug",
        _ => "trace",
    };
    let filter = if verbose == 0 {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
    } else {
        EnvFilter::new(default)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn read(path: &Path) -> Result<Vec<Section>> {
    reader::read_file(path).with_context(|| format!("failed to read {}", path.display()))
}

fn cmd_info(path: &Path) -> Result<()> {
    let sections = read(path)?;
    let total: usize = sections.iter().map(Section::tree_size).sum();

    println!("File: {}", path.display());
    println!("Top-level sections: {} ({} total)", sections.len(), total);
    println!();

    for (i, section) in sections.iter().enumerate() {
        println!(
            "[{}] {:<24} props: {:<4} rows: {:<6} children: {}",
            i,
            section.kind,
            section.props.len(),
            section.data.len(),
            section.sections.len()
        );
    }
    Ok(())
}

fn cmd_tree(path: &Path) -> Result<()> {
    let sections = read(path)?;
    println!("{}", path.display());
    for section in &sections {
        print_tree(section, 1);
    }
    Ok(())
}

fn print_tree(section: &Section, depth: usize) {
    let mut line = format!("{}{}", "  ".repeat(depth), section.kind);
    if !section.props.is_empty() {
        line.push_str(&format!(" [{} props]", section.props.len()));
    }
    if !section.data.is_empty() {
        line.push_str(&format!(" [{} rows]", section.data.len()));
    }
    println!("{}", line);

    for child in &section.sections {
        print_tree(child, depth + 1);
    }
}

fn cmd_fmt(args: &FmtArgs) -> Result<()> {
    let sections = read(&args.input)?;

    let options = if args.tabs {
        WriteOptions::new().with_tabs()
    } else {
        WriteOptions::new().with_spaces(args.indent)
    }
    .with_progress(args.progress);

    match &args.output {
        Some(output) => {
            writer::write_file(output, &sections, &options)
                .with_context(|| format!("failed to write {}", output.display()))?;
            info!("Wrote {} sections to {}", sections.len(), output.display());
        }
        None => {
            let stdout = io::stdout();
            let mut out = PixWriter::new(stdout.lock(), options);
            out.write_document(&sections).context("failed to write to stdout")?;
            out.flush()?;
        }
    }

    debug!(sections = sections.len(), "fmt done");
    Ok(())
}
