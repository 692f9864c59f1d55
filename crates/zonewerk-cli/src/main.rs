// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// zonewerk — fit a drawn zone onto a scanned page image from the command line.
//
// Loads the page, classifies its pixels, runs the requested fit and prints the
// resulting zones as JSON on stdout. Logs go to stderr.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use zonewerk_core::error::Result as FitOutcome;
use zonewerk_core::human_errors::{humanize_empty_fit, humanize_error};
use zonewerk_core::{
    FitConfig, FitMode, PageId, Point, SpatialZone, ThresholdPolicy, ZonewerkError,
};
use zonewerk_fit::{BitmapClassifier, FitResult, ZoneFitter};

/// How the drawn zone is fitted.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    /// Keep the zone exactly as drawn
    Raw,
    /// Shrink to the tight box around the ink
    Block,
    /// One tight zone per line of text
    Line,
}

impl From<ModeArg> for FitMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Raw => FitMode::Raw,
            ModeArg::Block => FitMode::Block,
            ModeArg::Line => FitMode::Line,
        }
    }
}

/// How page pixels are split into ink and paper.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ThresholdArg {
    /// Pixels darker than --level are ink
    Fixed,
    /// Pick the level from the page histogram
    Otsu,
    /// Compare each pixel with its neighbourhood mean
    Adaptive,
}

/// Fit a zone drawn over a scanned page onto the ink beneath it.
#[derive(Parser, Debug)]
#[command(name = "zonewerk")]
#[command(author, version, about, long_about = None)]
#[command(allow_negative_numbers = true)]
struct Args {
    /// Page image (PNG, TIFF, JPEG, ...)
    image: PathBuf,

    /// Start of the zone's centre line, as X,Y
    #[arg(long, value_parser = parse_point)]
    start: Point,

    /// End of the zone's centre line, as X,Y
    #[arg(long, value_parser = parse_point)]
    end: Point,

    /// Zone thickness, perpendicular to the centre line
    #[arg(long)]
    height: f64,

    /// Page number recorded on the zones
    #[arg(long, default_value_t = 0)]
    page: u32,

    /// Fit mode [default: from config, else block]
    #[arg(short, long, value_enum)]
    mode: Option<ModeArg>,

    /// Smallest zone height worth keeping, in pixels
    #[arg(long)]
    min_split_height: Option<u32>,

    /// Ink/paper classification
    #[arg(long, value_enum)]
    threshold: Option<ThresholdArg>,

    /// Grey level for --threshold fixed
    #[arg(long, default_value_t = 128)]
    level: u8,

    /// Neighbourhood radius for --threshold adaptive
    #[arg(long, default_value_t = 15)]
    block_radius: u32,

    /// Offset below the neighbourhood mean for --threshold adaptive
    #[arg(long, default_value_t = 10)]
    offset: i32,

    /// JSON settings file; command-line options override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the effective settings to this file and continue
    #[arg(long)]
    save_config: Option<PathBuf>,

    /// Log every fitting step (same as RUST_LOG=debug)
    #[arg(short, long)]
    verbose: bool,
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{s}'"))?;
    let x: f64 = x.trim().parse().map_err(|err| format!("bad X in '{s}': {err}"))?;
    let y: f64 = y.trim().parse().map_err(|err| format!("bad Y in '{s}': {err}"))?;
    Ok(Point::new(x, y))
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Settings file (or defaults) with command-line overrides applied.
fn effective_config(args: &Args) -> FitOutcome<FitConfig> {
    let mut config = match &args.config {
        Some(path) => FitConfig::load(path)?,
        None => FitConfig::default(),
    };
    if let Some(mode) = args.mode {
        config.default_mode = mode.into();
    }
    if let Some(min) = args.min_split_height {
        config.min_split_height = min;
    }
    if let Some(threshold) = args.threshold {
        config.threshold = match threshold {
            ThresholdArg::Fixed => ThresholdPolicy::Fixed(args.level),
            ThresholdArg::Otsu => ThresholdPolicy::Otsu,
            ThresholdArg::Adaptive => ThresholdPolicy::Adaptive {
                block_radius: args.block_radius,
                c: args.offset,
            },
        };
    }
    config.validate()?;
    if let Some(path) = &args.save_config {
        config.save(path)?;
        info!(path = %path.display(), "Settings saved");
    }
    Ok(config)
}

/// What the user is told when a fit fails. The technical error goes to the
/// log instead.
fn failure_message(err: &ZonewerkError) -> String {
    let human = humanize_error(err);
    format!("{}\n{}", human.message, human.suggestion)
}

fn run(args: &Args) -> FitOutcome<FitResult> {
    let config = effective_config(args)?;
    let page = PageId(args.page);
    let zone = SpatialZone::new(page, args.start, args.end, args.height);
    zone.validate()?;

    let classifier = BitmapClassifier::open(page, &args.image, config.threshold)?;
    info!(
        image = %args.image.display(),
        ink = classifier.ink_count(),
        policy = ?classifier.policy(),
        "Page classified"
    );

    ZoneFitter::from_config(&config).fit(&zone, config.default_mode, &classifier)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let result = match run(&args) {
        Ok(result) => result,
        Err(err) => {
            error!(error = %err, "Zone fit failed");
            bail!(failure_message(&err));
        }
    };

    if result.is_empty() {
        let human = humanize_empty_fit(result.mode);
        warn!(mode = ?result.mode, "{}", human.message);
    }

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &result).context("writing fit result")?;
    writeln!(stdout)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_points() {
        assert_eq!(parse_point("10,20.5").unwrap(), Point::new(10.0, 20.5));
        assert_eq!(parse_point(" -3 , 4 ").unwrap(), Point::new(-3.0, 4.0));
        assert!(parse_point("10").is_err());
        assert!(parse_point("a,b").is_err());
    }

    #[test]
    fn command_line_overrides_defaults() {
        let args = Args::parse_from([
            "zonewerk",
            "page.png",
            "--start",
            "0,10",
            "--end",
            "100,10",
            "--height",
            "20",
            "--mode",
            "line",
            "--min-split-height",
            "4",
            "--threshold",
            "adaptive",
            "--block-radius",
            "7",
        ]);
        let config = effective_config(&args).unwrap();
        assert_eq!(config.default_mode, FitMode::Line);
        assert_eq!(config.min_split_height, 4);
        assert_eq!(
            config.threshold,
            ThresholdPolicy::Adaptive {
                block_radius: 7,
                c: 10
            }
        );
    }

    #[test]
    fn failure_is_reported_once_in_plain_words() {
        let err = ZonewerkError::ImageError("failed to decode page image: bad magic".into());
        let message = failure_message(&err);
        let human = humanize_error(&err);
        assert_eq!(message, format!("{}\n{}", human.message, human.suggestion));
        assert!(!message.contains("bad magic"));
    }

    #[test]
    fn zero_block_radius_is_rejected() {
        let args = Args::parse_from([
            "zonewerk",
            "page.png",
            "--start",
            "0,10",
            "--end",
            "100,10",
            "--height",
            "20",
            "--threshold",
            "adaptive",
            "--block-radius",
            "0",
        ]);
        assert!(effective_config(&args).is_err());
    }
}
