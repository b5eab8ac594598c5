// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// ICAO 9303 check-digit arithmetic.
//
// Verification is reported separately and never affects `is_valid`; callers
// that want strict checking inspect the report themselves.

use serde::Serialize;

use super::layout::{span_chars, CheckSpec, FILLER};

/// Repeating weights applied to successive characters.
const WEIGHTS: [u32; 3] = [7, 3, 1];

/// Numeric value of one MRZ character, or `None` outside the MRZ alphabet.
pub fn char_value(c: char) -> Option<u32> {
    match c {
        '0'..='9' => c.to_digit(10),
        'A'..='Z' => Some(c as u32 - 'A' as u32 + 10),
        FILLER => Some(0),
        _ => None,
    }
}

/// Compute the 7-3-1 weighted check digit over `chars`.
pub fn compute<I>(chars: I) -> Option<u8>
where
    I: IntoIterator<Item = char>,
{
    let mut sum = 0u32;
    for (i, c) in chars.into_iter().enumerate() {
        sum += char_value(c)? * WEIGHTS[i % WEIGHTS.len()];
    }
    Some((sum % 10) as u8)
}

/// Outcome of verifying one check digit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckDigitResult {
    pub label: &'static str,
    /// Digit computed from the protected field, `None` if it held a non-MRZ character.
    pub expected: Option<u8>,
    /// Digit printed in the MRZ, `None` if it was not a digit.
    pub found: Option<u8>,
    pub ok: bool,
}

/// Every check digit of a record, in layout order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckDigitReport {
    pub results: Vec<CheckDigitResult>,
}

impl CheckDigitReport {
    /// True when at least one digit was checked and all of them matched.
    pub fn all_ok(&self) -> bool {
        !self.results.is_empty() && self.results.iter().all(|r| r.ok)
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckDigitResult> {
        self.results.iter().filter(|r| !r.ok)
    }
}

/// Verify every check in `checks` against a padded line run.
pub fn verify(checks: &[CheckSpec], padded: &[Vec<char>]) -> CheckDigitReport {
    let results = checks
        .iter()
        .map(|check| {
            let expected = compute(
                check
                    .data
                    .iter()
                    .flat_map(|span| span_chars(padded, *span).iter().copied()),
            );
            let found = span_chars(padded, check.digit)
                .first()
                .and_then(|&c| match c {
                    FILLER if check.filler_is_zero => Some(0),
                    _ => c.to_digit(10).map(|d| d as u8),
                });
            CheckDigitResult {
                label: check.label,
                expected,
                found,
                ok: expected.is_some() && expected == found,
            }
        })
        .collect();
    CheckDigitReport { results }
}
