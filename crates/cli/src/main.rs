//! CLI tool for exporting slide decks to PowerPoint files.

use anyhow::{Context, Result};
use clap::Parser;
use deck_core::{ExportOptions, Slide};
use deck_pptx::{Exporter, FileSink, VerifyingSink};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Export editor slide decks (JSON) to .pptx files.
#[derive(Parser, Debug)]
#[command(name = "deck-export")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input slide deck(s): a JSON array of slides
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Output directory (default: same as input file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output filename (default: presentation-YYYY-MM-DD.pptx).
    /// Only valid with a single input.
    #[arg(short, long)]
    filename: Option<String>,

    /// Document title written to the package properties
    #[arg(short, long)]
    title: Option<String>,

    /// Document author written to the package properties
    #[arg(short, long)]
    author: Option<String>,

    /// Read each package back and check its integrity before writing
    #[arg(long)]
    verify: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    if args.filename.is_some() && args.input.len() > 1 {
        anyhow::bail!("--filename can only be used with a single input");
    }

    let mut failures = 0usize;
    for input_path in &args.input {
        if args.verbose {
            eprintln!("Processing: {}", input_path.display());
        }

        match process_file(input_path, &args) {
            Ok(written) => {
                for path in written {
                    println!("{}", path.display());
                }
            }
            Err(e) => {
                failures += 1;
                eprintln!("Error processing {}: {:#}", input_path.display(), e);
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} export(s) failed", failures, args.input.len());
    }
    Ok(())
}

/// Export a single deck file, returning the written paths.
fn process_file(input_path: &Path, args: &Args) -> Result<Vec<PathBuf>> {
    let slides = read_slides(input_path)?;

    if args.verbose {
        eprintln!("  Found {} slides", slides.len());
    }

    let output_dir = get_output_dir(input_path, args.output.as_ref())?;
    let options = build_options(args);
    log::debug!("Exporting to {}", output_dir.display());
    let sink = FileSink::new(output_dir);

    if args.verify {
        let mut exporter = Exporter::new(options, VerifyingSink::new(sink));
        exporter.export(&slides)?;
        Ok(exporter.into_sink().into_inner().written().to_vec())
    } else {
        let mut exporter = Exporter::new(options, sink);
        exporter.export(&slides)?;
        Ok(exporter.into_sink().written().to_vec())
    }
}

/// Parse a JSON slide array.
fn read_slides(input_path: &Path) -> Result<Vec<Slide>> {
    let file = File::open(input_path)
        .with_context(|| format!("Failed to open {}", input_path.display()))?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader)
        .with_context(|| format!("{} is not a JSON slide array", input_path.display()))
}

fn build_options(args: &Args) -> ExportOptions {
    let mut options = ExportOptions::new();
    if let Some(title) = &args.title {
        options = options.with_title(title);
    }
    if let Some(author) = &args.author {
        options = options.with_author(author);
    }
    if let Some(filename) = &args.filename {
        options = options.with_filename(filename);
    }
    options
}

/// Determine the output directory for an exported file.
fn get_output_dir(input_path: &Path, output_dir: Option<&PathBuf>) -> Result<PathBuf> {
    match output_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
            Ok(dir.clone())
        }
        None => Ok(input_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_dir_defaults_to_input_parent() {
        let dir = get_output_dir(Path::new("decks/talk.json"), None).unwrap();
        assert_eq!(dir, PathBuf::from("decks"));

        let dir = get_output_dir(Path::new("talk.json"), None).unwrap();
        assert_eq!(dir, PathBuf::from("."));
    }

    #[test]
    fn test_build_options_from_flags() {
        let args = Args::parse_from(["deck-export", "in.json", "-t", "Roadmap", "-f", "roadmap"]);
        let options = build_options(&args);
        assert_eq!(options.title(), Some("Roadmap"));
        assert_eq!(options.author(), "deck");
        assert_eq!(options.resolve_filename(Default::default()), "roadmap.pptx");
    }

    #[test]
    fn test_reject_non_array_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.json");
        std::fs::write(&path, r#"{"slides": "nope"}"#).unwrap();

        let err = read_slides(&path).unwrap_err();
        assert!(err.to_string().contains("not a JSON slide array"));
    }
}
