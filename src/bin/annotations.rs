//! Descriptor Annotations CLI
//!
//! Lists version annotations across a directory of JSON schema descriptor
//! files.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use descriptor_versions::{registry_annotations, DescriptorRegistry};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "descriptor-annotations")]
#[command(about = "List version annotations declared by schema descriptors")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every annotation in the registry, in traversal order
    List {
        /// Directory of *.json descriptor files
        dir: PathBuf,
        /// Package names to skip entirely (repeatable)
        #[arg(short, long)]
        exclude: Vec<String>,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List package names known to the registry
    Packages {
        /// Directory of *.json descriptor files
        dir: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::List { dir, exclude, json } => {
            let registry = DescriptorRegistry::load_dir(&dir)
                .with_context(|| format!("loading descriptors from {}", dir.display()))?;

            let (annotations, err) = registry_annotations(&registry, &exclude);

            if json {
                println!("{}", serde_json::to_string_pretty(&annotations)?);
            } else {
                for a in &annotations {
                    match &a.version {
                        Some(v) => println!("{}: {}", a.full_name, v),
                        None => println!("{}: -", a.full_name),
                    }
                }
            }

            // Partial results above, then the failure that cut the scan short.
            if let Some(err) = err {
                return Err(err).context("annotation scan aborted");
            }
            Ok(())
        }

        Commands::Packages { dir } => {
            let registry = DescriptorRegistry::load_dir(&dir)
                .with_context(|| format!("loading descriptors from {}", dir.display()))?;
            for package in registry.packages() {
                println!("{package}");
            }
            Ok(())
        }
    }
}
