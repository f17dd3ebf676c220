mod embed;
mod model;
mod parser;

use std::io::Read;
use std::path::PathBuf;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Parse a saved mentor-lookbook page (source or visible text) into a JSON
/// array of mentor records.
///
/// The extraction summary goes to stderr; stdout carries only the JSON.
#[derive(Parser)]
#[command(name = "lookbook-extract", version, about)]
struct Cli {
    /// Page dump to read; stdin when omitted
    input: Option<PathBuf>,
    /// Also write the JSON to a file (best effort; failure is not fatal)
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();

    let text = match &cli.input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    // The embedded-data probe and the text-segmentation pass both always
    // run; the probe result is informational, the segmentation is the
    // output.
    let embedded = embed::probe_embedded_data(&text);
    let anchors = parser::count_anchors(&text);
    let mentors = parser::parse_mentor_text(&text);

    match &embedded {
        Some((name, _)) => info!(global = name, "embedded data object found"),
        None => info!("no embedded data object found"),
    }
    info!(
        full_name_anchors = anchors,
        parsed_mentors = mentors.len(),
        input_chars = text.chars().count(),
        "extraction summary"
    );
    if mentors.is_empty() {
        warn!("no mentor records parsed; the dump may be truncated or from the wrong page");
    }

    let json = serde_json::to_string_pretty(&mentors)?;
    println!("{json}");

    if let Some(out) = &cli.out {
        if let Err(e) = std::fs::write(out, &json) {
            warn!(path = %out.display(), error = %e, "could not write output file");
        } else {
            info!(path = %out.display(), records = mentors.len(), "wrote output file");
        }
    }

    Ok(())
}
