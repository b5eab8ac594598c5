// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for the MRZ scanner.
//
// Noisy OCR input never produces an error: parsing degrades to an empty,
// invalid record instead. Only fixed-pattern compilation, configuration and
// the command-line surface can fail.

use thiserror::Error;

/// Top-level error type for all scanner operations.
#[derive(Debug, Error)]
pub enum MrzScanError {
    // -- Programming errors --
    #[error("line pattern {pattern} failed to compile: {source}")]
    PatternCompile {
        pattern: &'static str,
        #[source]
        source: regex::Error,
    },

    // -- Configuration --
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, MrzScanError>;
