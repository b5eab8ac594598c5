// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Fixed regular-expression templates describing the shapes of MRZ lines.

use mrzscan_core::error::{MrzScanError, Result};
use regex::Regex;

/// Named MRZ text shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextPattern {
    /// Two letters followed by seven digits (national document numbers).
    DocumentNumber,
    PassportLine1,
    PassportLine2,
    IdCardLine1,
    IdCardLine2,
    IdCardLine3,
}

impl TextPattern {
    /// Every pattern, in catalog order.
    pub const ALL: [Self; 6] = [
        Self::DocumentNumber,
        Self::PassportLine1,
        Self::PassportLine2,
        Self::IdCardLine1,
        Self::IdCardLine2,
        Self::IdCardLine3,
    ];

    /// Patterns used to recognise MRZ lines. `DocumentNumber` validates a
    /// standalone field and is not a line shape.
    pub const LINE_SHAPES: [Self; 5] = [
        Self::PassportLine1,
        Self::PassportLine2,
        Self::IdCardLine1,
        Self::IdCardLine2,
        Self::IdCardLine3,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::DocumentNumber => "documentNumber",
            Self::PassportLine1 => "passportLine1",
            Self::PassportLine2 => "passportLine2",
            Self::IdCardLine1 => "idCardLine1",
            Self::IdCardLine2 => "idCardLine2",
            Self::IdCardLine3 => "idCardLine3",
        }
    }

    /// The regular-expression source. `|` inside the sex and document-code
    /// classes is matched literally, as in the deployed readers.
    pub fn template(&self) -> &'static str {
        match self {
            Self::DocumentNumber => r"^[A-Z]{2}\d{7}$",
            Self::PassportLine1 => r"(P[A-Z0-9<]{1})([A-Z]{3})([A-Z0-9<]{39})",
            Self::PassportLine2 => {
                r"([A-Z0-9<]{9})([0-9]{1})([A-Z]{3})([0-9]{6})([0-9]{1})([M|F|X|<]{1})([0-9]{6})([0-9]{1})([A-Z0-9<]{14})([0-9]{1})([0-9]{1})"
            }
            Self::IdCardLine1 => {
                r"([A|C|I][A-Z0-9<]{1})([A-Z]{3})([A-Z0-9<]{9})([0-9]{1})([A-Z0-9<]{15})"
            }
            Self::IdCardLine2 => {
                r"([0-9]{6})([0-9]{1})([M|F|X|<]{1})([0-9]{6})([0-9]{1})([A-Z]{3})([A-Z0-9<]{11})([0-9]{1})"
            }
            Self::IdCardLine3 => r"([A-Z0-9<]{30})",
        }
    }

    /// Compile the template. Failure means the constant itself is broken.
    pub fn compile(&self) -> Result<Regex> {
        Regex::new(self.template()).map_err(|source| MrzScanError::PatternCompile {
            pattern: self.name(),
            source,
        })
    }

    fn index(&self) -> usize {
        match self {
            Self::DocumentNumber => 0,
            Self::PassportLine1 => 1,
            Self::PassportLine2 => 2,
            Self::IdCardLine1 => 3,
            Self::IdCardLine2 => 4,
            Self::IdCardLine3 => 5,
        }
    }
}

impl std::fmt::Display for TextPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// All patterns compiled once. Cloning shares the compiled programs.
#[derive(Debug, Clone)]
pub struct PatternCatalog {
    matchers: Vec<Regex>,
}

impl PatternCatalog {
    /// Compile every template, failing on the first malformed one.
    pub fn new() -> Result<Self> {
        let matchers = TextPattern::ALL
            .iter()
            .map(TextPattern::compile)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { matchers })
    }

    pub fn matcher(&self, pattern: TextPattern) -> &Regex {
        &self.matchers[pattern.index()]
    }

    /// Unanchored match: the pattern may occur anywhere within `text`.
    pub fn is_match(&self, pattern: TextPattern, text: &str) -> bool {
        self.matcher(pattern).is_match(text)
    }

    /// True if `text` contains any MRZ line shape.
    pub fn matches_line_shape(&self, text: &str) -> bool {
        TextPattern::LINE_SHAPES
            .iter()
            .any(|pattern| self.is_match(*pattern, text))
    }

    /// True if `text` is exactly a two-letter, seven-digit document number.
    pub fn is_document_number(&self, text: &str) -> bool {
        self.is_match(TextPattern::DocumentNumber, text)
    }
}
