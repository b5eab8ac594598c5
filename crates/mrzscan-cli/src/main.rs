// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// mrzscan — command-line front end for the MRZ reader and the capture
// rectangle check.
//
// Entry point. Initialises logging, loads configuration, and runs one
// subcommand. Results go to stdout as JSON; logs go to stderr.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use mrzscan_core::error::Result;
use mrzscan_core::{DocumentKind, Quad, Rect, ScanConfig};
use mrzscan_document::geometry::{self, NormalizedOrigin, RectangleAssessment};
use mrzscan_document::mrz::CheckDigitReport;
use mrzscan_document::{MrzDocument, MrzLineClassifier, MrzRecord, RectangleObservation};

#[derive(Parser, Debug)]
#[command(name = "mrzscan", version, about = "Read passport/ID-card MRZ text and check capture rectangles")]
struct Cli {
    /// JSON configuration file (expected issuing country, tolerances).
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract and parse the MRZ from OCR text.
    Mrz {
        /// Document layout to parse as.
        #[arg(short = 'k', long = "kind", value_enum, default_value = "auto")]
        kind: KindArg,
        /// OCR text file; stdin when omitted.
        input: Option<PathBuf>,
    },
    /// Check a detected rectangle against a capture frame.
    Rect {
        /// JSON request file; stdin when omitted.
        input: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum KindArg {
    Auto,
    IdCard,
    Passport,
}

impl KindArg {
    fn fixed(self) -> Option<DocumentKind> {
        match self {
            Self::Auto => None,
            Self::IdCard => Some(DocumentKind::IdCard),
            Self::Passport => Some(DocumentKind::Passport),
        }
    }
}

/// Input document for `mrzscan rect`.
#[derive(Debug, Deserialize)]
struct RectRequest {
    corners: Quad,
    mask: Rect,
    /// When present, `corners` are normalised and scaled into this viewport.
    #[serde(default)]
    viewport: Option<Viewport>,
}

#[derive(Debug, Deserialize)]
struct Viewport {
    width: f64,
    height: f64,
    #[serde(default)]
    origin: NormalizedOrigin,
}

#[derive(Serialize)]
struct MrzOutput<'a> {
    record: &'a MrzRecord,
    fields: Vec<(&'static str, String)>,
    check_digits: CheckDigitReport,
}

#[derive(Serialize)]
struct RectOutput {
    accepted: bool,
    assessment: RectangleAssessment,
    tilt_degrees: f64,
    bounding_box: Rect,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let outcome = run(cli);
    if let Err(err) = &outcome {
        tracing::error!(%err, "mrzscan failed");
        eprintln!("error: {err}");
    }
    ExitCode::from(exit_status(&outcome))
}

/// 0 for a valid record or accepted rectangle, 1 for a rejection, 2 for
/// I/O, parse or configuration errors.
fn exit_status(outcome: &Result<bool>) -> u8 {
    match outcome {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(_) => 2,
    }
}

/// Run the selected subcommand; `Ok(true)` means a valid record or an
/// accepted rectangle.
fn run(cli: Cli) -> Result<bool> {
    let config = match &cli.config {
        Some(path) => ScanConfig::load(path)?,
        None => ScanConfig::default(),
    };

    match cli.command {
        Command::Mrz { kind, input } => run_mrz(&config, kind, input.as_deref()),
        Command::Rect { input } => run_rect(&config, input.as_deref()),
    }
}

fn run_mrz(config: &ScanConfig, kind: KindArg, input: Option<&Path>) -> Result<bool> {
    let text = read_input(input)?;
    let classifier = MrzLineClassifier::new()?;
    let lines = classifier.extract_mrz_lines(&text);
    let kind = kind
        .fixed()
        .unwrap_or_else(|| classifier.detect_kind(&lines));
    tracing::info!(%kind, lines = lines.len(), "parsing MRZ");

    let record = MrzRecord::parse(kind, &lines, &config.expected_issuing_country);
    let output = MrzOutput {
        record: &record,
        fields: record.fields(),
        check_digits: record.check_digits(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(record.is_valid())
}

fn run_rect(config: &ScanConfig, input: Option<&Path>) -> Result<bool> {
    let request: RectRequest = serde_json::from_str(&read_input(input)?)?;
    let observation = match request.viewport {
        Some(viewport) => RectangleObservation::from_normalized(
            request.corners,
            viewport.width,
            viewport.height,
            viewport.origin,
        ),
        None => RectangleObservation::new(request.corners),
    };

    let assessment = geometry::evaluate(&observation, &request.mask, &config.tolerances);
    let output = RectOutput {
        accepted: assessment.is_acceptable(),
        assessment,
        tilt_degrees: observation.tilt_degrees(),
        bounding_box: observation.bounding_box,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(output.accepted)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}
