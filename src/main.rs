use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use scipyen::{init_logging, inspect, PlanarConfig, PlanarDocument};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "scipyen", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Summarize a saved planar-graphics document
    Inspect {
        /// Document file (JSON)
        #[arg(value_name = "DOCUMENT")]
        document: PathBuf,

        /// Configuration file (TOML or JSON)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Number of frames to report visibility for
        #[arg(short, long, value_name = "N")]
        frames: Option<usize>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn load_config(path: Option<PathBuf>) -> Result<PlanarConfig> {
    let path = path.or_else(|| PlanarConfig::default_path().filter(|p| p.exists()));
    match path {
        Some(path) => PlanarConfig::load_from_file(&path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => Ok(PlanarConfig::default()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging()?;

    match cli.command {
        Command::Inspect {
            document,
            config,
            frames,
            json,
        } => {
            let config = load_config(config)?;
            let doc = PlanarDocument::load_from_file(&document)
                .with_context(|| format!("Failed to open document: {}", document.display()))?;
            let report = inspect(&doc, &config, frames)?;

            for object in &report.objects {
                info!(
                    kind = %object.kind,
                    name = %object.name,
                    frames = ?object.frame_indices,
                    curve_length = object.curve_length,
                    approximate_length = object.approximate_length,
                    "Object"
                );
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{} ({} objects)", report.document, report.objects.len());
                for frame in &report.frames {
                    println!("frame {}: {}", frame.frame, frame.objects.join(", "));
                }
            }
        }
    }

    Ok(())
}
