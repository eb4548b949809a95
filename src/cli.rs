use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::formats::read_image;
use crate::session::Session;

#[derive(Debug, Parser)]
#[command(
    name = "fluorocount",
    version,
    about = "Annotation and counting engine for fluorescence microscopy images"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Prints image dimensions and channel layout as JSON.
    Info {
        input: PathBuf,
    },
    /// Loads an image plus an annotation document and prints the count table.
    Count {
        #[arg(long)]
        image: PathBuf,
        #[arg(long)]
        annotations: PathBuf,
    },
    /// Writes the selected export artifacts for an annotated image.
    Export {
        #[arg(long)]
        image: PathBuf,
        #[arg(long)]
        annotations: PathBuf,
        #[arg(long)]
        csv: Option<PathBuf>,
        #[arg(long)]
        json: Option<PathBuf>,
        #[arg(long)]
        overlay: Option<PathBuf>,
    },
}

#[derive(Debug, Serialize)]
struct ImageSummary {
    width: usize,
    height: usize,
    channels: Vec<String>,
}

pub fn run_cli() -> Result<(), String> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Info { input } => {
            let image = read_image(&input).map_err(|error| error.to_string())?;
            let summary = ImageSummary {
                width: image.width(),
                height: image.height(),
                channels: image
                    .channels()
                    .iter()
                    .map(|channel| channel.name().to_string())
                    .collect(),
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&summary).map_err(|error| error.to_string())?
            );
        }
        Commands::Count { image, annotations } => {
            let session = load_session(&image, &annotations)?;
            print!("{}", session.export_csv().map_err(|error| error.to_string())?);
        }
        Commands::Export {
            image,
            annotations,
            csv,
            json,
            overlay,
        } => {
            let mut session = load_session(&image, &annotations)?;
            if let Some(path) = csv {
                session.write_csv(&path).map_err(|error| error.to_string())?;
            }
            if let Some(path) = json {
                session.write_json(&path).map_err(|error| error.to_string())?;
            }
            if let Some(path) = overlay {
                session
                    .write_overlay(&path)
                    .map_err(|error| error.to_string())?;
            }
        }
    }

    Ok(())
}

fn load_session(image: &PathBuf, annotations: &PathBuf) -> Result<Session, String> {
    let decoded = read_image(image).map_err(|error| error.to_string())?;
    let raw = std::fs::read_to_string(annotations).map_err(|error| error.to_string())?;
    let mut session = Session::with_default_types();
    session.attach_image(decoded);
    session
        .import_annotations(&raw)
        .map_err(|error| error.to_string())?;
    Ok(session)
}
