// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// MRZ line classification — picks the machine-readable zone out of a block of
// raw OCR text.

use mrzscan_core::error::Result;
use mrzscan_core::DocumentKind;
use tracing::{debug, instrument, trace};

use super::patterns::{PatternCatalog, TextPattern};

/// Shortest OCR line considered as an MRZ candidate.
pub const MIN_LINE_LEN: usize = 25;
/// Longest OCR line considered as an MRZ candidate.
pub const MAX_LINE_LEN: usize = 44;

/// Filters OCR text down to MRZ-shaped lines.
///
/// Holds only compiled patterns, so a single classifier can be shared across
/// threads and reused for every OCR result.
#[derive(Debug, Clone)]
pub struct MrzLineClassifier {
    catalog: PatternCatalog,
}

impl MrzLineClassifier {
    /// Build a classifier with a freshly compiled pattern catalog.
    pub fn new() -> Result<Self> {
        Ok(Self::with_catalog(PatternCatalog::new()?))
    }

    pub fn with_catalog(catalog: PatternCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &PatternCatalog {
        &self.catalog
    }

    /// A line is a candidate when its length is within
    /// [`MIN_LINE_LEN`, `MAX_LINE_LEN`] and it contains any MRZ line shape.
    pub fn is_candidate_line(&self, line: &str) -> bool {
        let len = line.chars().count();
        (MIN_LINE_LEN..=MAX_LINE_LEN).contains(&len) && self.catalog.matches_line_shape(line)
    }

    /// Return the first contiguous run of candidate lines in `raw_text`.
    ///
    /// Lines are trimmed and blank lines dropped before scanning. Later runs
    /// are ignored even if they look more complete.
    #[instrument(skip_all, fields(text_len = raw_text.len()))]
    pub fn extract_mrz_lines(&self, raw_text: &str) -> Vec<String> {
        let run: Vec<String> = raw_text
            .split(is_line_break)
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .skip_while(|line| {
                let skip = !self.is_candidate_line(line);
                if skip {
                    trace!(line = *line, "skipping non-MRZ line");
                }
                skip
            })
            .take_while(|line| self.is_candidate_line(line))
            .map(str::to_owned)
            .collect();

        debug!(run_len = run.len(), "MRZ line run extracted");
        run
    }

    /// Guess the layout of a line run.
    ///
    /// A run of three or more lines is TD1 when either of its first two lines
    /// has an ID-card shape, or when both are closer to 30 characters than to
    /// 44. A single misread digit therefore does not push an ID card into the
    /// passport layout. Anything else is treated as TD3.
    pub fn detect_kind<S: AsRef<str>>(&self, lines: &[S]) -> DocumentKind {
        let [first, second, _, ..] = lines else {
            return DocumentKind::Passport;
        };
        let (first, second) = (first.as_ref(), second.as_ref());

        let id_card_pattern = self.catalog.is_match(TextPattern::IdCardLine1, first)
            || self.catalog.is_match(TextPattern::IdCardLine2, second);
        let id_card_widths = [first, second]
            .iter()
            .all(|line| nearer_id_card_width(line.chars().count()));

        if id_card_pattern || id_card_widths {
            DocumentKind::IdCard
        } else {
            DocumentKind::Passport
        }
    }
}

/// True when `len` is closer to the TD1 width than to the TD3 width.
fn nearer_id_card_width(len: usize) -> bool {
    let td1 = DocumentKind::IdCard.line_width();
    let td3 = DocumentKind::Passport.line_width();
    len.abs_diff(td1) < len.abs_diff(td3)
}

/// Every Unicode newline character splits OCR lines, not just `\n`.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{000B}' | '\u{000C}' | '\u{0085}' | '\u{2028}' | '\u{2029}'
    )
}
