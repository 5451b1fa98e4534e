use crate::config::{Config, load_config};
use crate::ir::{Deck, Document};
use crate::layout::{Strategy, prepare_slide};
use crate::layout_dump::{write_document, write_report};
use crate::parser::{apply_deck_defaults, parse_document};
use anyhow::Result;
use clap::Parser;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "slalign",
    version,
    about = "Resolve overlapping components on presentation slides"
)]
pub struct Args {
    /// Input deck or slide (.json) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file for the resolved document. Defaults to stdout.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Write the alignment report (JSON) to this file
    #[arg(short = 'r', long = "report")]
    pub report: Option<PathBuf>,

    /// Config file (JSON5)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Strategy used when neither the deck nor a slide names one
    #[arg(short = 's', long = "strategy", value_enum)]
    pub strategy: Option<Strategy>,

    /// Resolution passes per slide before giving up
    #[arg(long = "max-iterations")]
    pub max_iterations: Option<usize>,

    /// Relative comparison tolerance
    #[arg(long = "epsilon")]
    pub epsilon: Option<f32>,

    /// Fail when any slide keeps overlaps after the last pass
    #[arg(long = "strict")]
    pub strict: bool,

    /// Report overlaps and out-of-bounds components without moving anything
    #[arg(long = "check")]
    pub check: bool,

    /// Compact JSON output
    #[arg(long = "compact-json")]
    pub compact_json: bool,

    /// More logging (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = apply_args(load_config(args.config.as_deref())?, &args);
    config.align.validate()?;

    let input = read_input(args.input.as_deref())?;
    let mut document = parse_document(&input)?;

    if args.check {
        return check_document(&document, &config);
    }

    let report = crate::align_document(&mut document, &config.align)?;
    write_document(args.output.as_deref(), &document, config.output.pretty)?;
    if let Some(path) = args.report.as_deref() {
        write_report(path, &report, &document, config.output.pretty)?;
    }
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // RUST_LOG takes precedence over -v.
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .try_init();
}

fn apply_args(mut config: Config, args: &Args) -> Config {
    if let Some(strategy) = args.strategy {
        config.align.strategy = strategy;
    }
    if let Some(max) = args.max_iterations {
        config.align.max_iterations = max;
    }
    if let Some(epsilon) = args.epsilon {
        config.align.epsilon = epsilon;
    }
    if args.strict {
        config.align.strict = true;
    }
    if args.compact_json {
        config.output.pretty = false;
    }
    config
}

fn check_document(document: &Document, config: &Config) -> Result<()> {
    let mut deck = match document {
        Document::Deck(deck) => deck.clone(),
        Document::Slide(slide) => Deck::from_slide(slide.clone()),
    };
    apply_deck_defaults(&mut deck)?;

    let mut problems = 0;
    for (index, slide) in deck.slides.iter().enumerate() {
        let layout = prepare_slide(slide, &config.align).map_err(|err| err.in_slide(index))?;
        for pair in layout.overlaps() {
            println!(
                "slide {index}: `{}` overlaps `{}` ({:.1}x{:.1})",
                pair.a, pair.b, pair.rect.w, pair.rect.h
            );
            problems += 1;
        }
        for id in layout.out_of_bounds() {
            println!("slide {index}: `{id}` is outside the content area");
            problems += 1;
        }
    }

    if problems > 0 {
        return Err(anyhow::anyhow!("{problems} layout problem(s) found"));
    }
    println!("{} slide(s) clean", deck.slides.len());
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return Ok(std::fs::read_to_string(path)?);
        }
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}
