//! content-pipeline CLI - Generates content pipeline sources from a declaration graph
//!
//! Commands:
//! - `content-pipeline generate` - Write every artifact and the lock file
//! - `content-pipeline check` - Fail when generated files are out of date
//! - `content-pipeline resolve` - Print the resolved classes as JSON

use clap::{Args, Parser, Subcommand};
use content_pipeline_cli::{Flags, Invocation, check, generate, logging, resolve};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "content-pipeline")]
#[command(author, version, about = "Generator for content pipeline models and steps", long_about = None)]
struct Cli {
    /// Log filter, e.g. `debug` or `content_pipeline_codegen=trace` (overrides RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Common {
    /// Declaration graph (.json or .toml)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Path to content-pipeline.toml manifest
    #[arg(short, long)]
    manifest: Option<PathBuf>,

    /// Include the form container class
    #[arg(long)]
    forms: bool,

    /// Root namespace of the generated code
    #[arg(long)]
    namespace: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate every artifact into a directory
    Generate {
        #[command(flatten)]
        common: Common,

        /// Output directory for generated code
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Verify that generated files match the declaration graph
    Check {
        #[command(flatten)]
        common: Common,

        /// Directory holding the generated code
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the resolved content classes as JSON
    Resolve {
        #[command(flatten)]
        common: Common,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
}

fn invocation(common: Common, output: Option<PathBuf>) -> anyhow::Result<Invocation> {
    Invocation::resolve(Flags {
        input: common.input,
        output,
        manifest: common.manifest,
        forms: common.forms,
        namespace: common.namespace,
    })
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_level.as_deref())?;

    match cli.command {
        Commands::Generate { common, output } => {
            let invocation = invocation(common, output)?;
            let summary = generate::run(&invocation)?;
            println!(
                "✓ Generated {} files into {}",
                summary.written,
                invocation.output_dir()?.display()
            );
            if !summary.removed.is_empty() {
                println!("✓ Removed {} stale files", summary.removed.len());
            }
        }
        Commands::Check { common, output } => {
            let report = check::run(&invocation(common, output)?)?;
            println!("✓ {} generated files are up to date", report.checked);
        }
        Commands::Resolve { common, pretty } => {
            let json = resolve::run(&invocation(common, None)?, pretty)?;
            println!("{json}");
        }
    }

    Ok(())
}
