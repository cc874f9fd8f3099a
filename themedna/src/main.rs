use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{error, info};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use themedna_lib::{LightningParser, ThemeDna};

const DEFAULT_OUTPUT: &str = "diff.css";

#[derive(Parser)]
#[command(name = "ThemeDNA")]
#[command(about = "Find the CSS rules a theme adds or changes relative to a base stylesheet")]
struct Args {
    /// Base stylesheet to diff against.
    #[arg(short, long)]
    base: PathBuf,

    /// Stylesheets compared against the base, merged left to right.
    files: Vec<PathBuf>,

    /// Output file name.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Skip invalid rules instead of failing.
    #[arg(long)]
    lenient: bool,

    /// Write the compacted base instead of a diff.
    #[arg(long)]
    compact: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // parse the args given in terminal
    let args: Args = Args::parse();

    if let Err(err) = run(&args) {
        error!("{:#}", err);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    if !args.compact && args.files.is_empty() {
        bail!("You must include files to diff against");
    }

    let output = args.output.clone().unwrap_or_else(|| {
        info!("No output file selected, will output to ./{}", DEFAULT_OUTPUT);
        PathBuf::from(DEFAULT_OUTPUT)
    });

    let parser = if args.lenient {
        LightningParser::lenient()
    } else {
        LightningParser::new()
    };
    let dna = ThemeDna::new(parser);

    let base = read(&args.base)?;
    let stylesheet = if args.compact {
        dna.compact(&base)
    } else {
        let others = args
            .files
            .iter()
            .map(|path| read(path))
            .collect::<Result<Vec<_>>>()?;
        dna.difference(&base, &others)
    }?;

    fs::write(&output, stylesheet.to_canonical_text())
        .with_context(|| format!("Error writing {}", output.display()))?;
    info!("You may find your output at {}", output.display());
    Ok(())
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Error reading {}", path.display()))
}
