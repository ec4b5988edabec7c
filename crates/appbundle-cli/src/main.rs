//! appbundle CLI - app bundle packager
//!
//! Commands:
//! - `appbundle build` - Validate a manifest and write its `.spiraapp` bundle
//! - `appbundle check` - Validate a manifest without building
//! - `appbundle inspect` - Decode and print an existing bundle

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod build;
mod config;
mod inspect;
mod logging;
mod manifest;

#[derive(Parser)]
#[command(name = "appbundle")]
#[command(author, version, about = "Packager for app bundles", long_about = None)]
struct Cli {
    /// Show debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a bundle from a manifest.yaml and the files it references
    Build {
        /// Folder containing manifest.yaml (default: current directory)
        #[arg(short, long, env = "APPBUNDLE_INPUT", default_value = ".")]
        input: PathBuf,

        /// Folder the bundle is written to (default: from appbundle.toml, else current directory)
        #[arg(short, long, env = "APPBUNDLE_OUTPUT")]
        output: Option<PathBuf>,

        /// Embed scripts as written instead of minifying them
        #[arg(long, env = "APPBUNDLE_NO_MINIFY")]
        no_minify: bool,
    },

    /// Validate a manifest.yaml without building
    Check {
        /// Folder containing manifest.yaml (default: current directory)
        #[arg(short, long, env = "APPBUNDLE_INPUT", default_value = ".")]
        input: PathBuf,
    },

    /// Print the manifest carried by a .spiraapp bundle
    Inspect {
        /// Path to the bundle file
        bundle: PathBuf,

        /// Only print the summary, not the full manifest
        #[arg(short, long)]
        summary: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Build {
            input,
            output,
            no_minify,
        } => {
            build::run(&input, output, no_minify)?;
        }
        Commands::Check { input } => {
            manifest::check(&input)?;
        }
        Commands::Inspect { bundle, summary } => {
            inspect::run(&bundle, summary)?;
        }
    }

    Ok(())
}
