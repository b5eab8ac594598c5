// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Fixed-width MRZ field layouts for TD1 (ID card) and TD3 (passport).
//
// Each layout is a table of (field, line, offset, length) entries read by a
// single extractor, so a width change is a one-line table edit.

use std::collections::BTreeMap;

use mrzscan_core::DocumentKind;

/// Filler character used to pad MRZ fields.
pub const FILLER: char = '<';

/// Every field an MRZ layout can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    DocumentType,
    CountryCode,
    DocumentNumber,
    DocumentNumberCheckDigit,
    PersonalNumber,
    PersonalNumberCheckDigit,
    DateOfBirth,
    DateOfBirthCheckDigit,
    Sex,
    ExpiryDate,
    ExpiryDateCheckDigit,
    Nationality,
    FinalCheckDigit,
    /// Raw surname/given-names region, split by the record parser.
    Names,
}

/// Location of one field inside a padded line run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub field: Field,
    /// Zero-based line index within the run.
    pub line: usize,
    pub offset: usize,
    pub len: usize,
    /// Remove every `<` from the extracted value.
    pub strip_filler: bool,
}

const fn spec(field: Field, line: usize, offset: usize, len: usize) -> FieldSpec {
    FieldSpec {
        field,
        line,
        offset,
        len,
        strip_filler: false,
    }
}

const fn stripped(field: Field, line: usize, offset: usize, len: usize) -> FieldSpec {
    FieldSpec {
        field,
        line,
        offset,
        len,
        strip_filler: true,
    }
}

/// TD1: three lines of 30 characters.
pub const TD1_LAYOUT: &[FieldSpec] = &[
    spec(Field::DocumentType, 0, 0, 2),
    spec(Field::CountryCode, 0, 2, 3),
    stripped(Field::DocumentNumber, 0, 5, 9),
    spec(Field::DocumentNumberCheckDigit, 0, 14, 1),
    stripped(Field::PersonalNumber, 0, 15, 14),
    spec(Field::DateOfBirth, 1, 0, 6),
    spec(Field::DateOfBirthCheckDigit, 1, 6, 1),
    spec(Field::Sex, 1, 7, 1),
    spec(Field::ExpiryDate, 1, 8, 6),
    spec(Field::ExpiryDateCheckDigit, 1, 14, 1),
    spec(Field::Nationality, 1, 15, 3),
    spec(Field::FinalCheckDigit, 1, 29, 1),
    spec(Field::Names, 2, 0, 30),
];

/// TD3: two lines of 44 characters.
pub const TD3_LAYOUT: &[FieldSpec] = &[
    spec(Field::DocumentType, 0, 0, 1),
    spec(Field::CountryCode, 0, 2, 3),
    spec(Field::Names, 0, 5, 39),
    stripped(Field::DocumentNumber, 1, 0, 9),
    spec(Field::DocumentNumberCheckDigit, 1, 9, 1),
    spec(Field::Nationality, 1, 10, 3),
    spec(Field::DateOfBirth, 1, 13, 6),
    spec(Field::DateOfBirthCheckDigit, 1, 19, 1),
    spec(Field::Sex, 1, 20, 1),
    spec(Field::ExpiryDate, 1, 21, 6),
    spec(Field::ExpiryDateCheckDigit, 1, 27, 1),
    stripped(Field::PersonalNumber, 1, 28, 14),
    spec(Field::PersonalNumberCheckDigit, 1, 42, 1),
    spec(Field::FinalCheckDigit, 1, 43, 1),
];

/// A contiguous slice of one line: (line, offset, len).
pub type Span = (usize, usize, usize);

/// A check digit and the character ranges it protects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckSpec {
    pub label: &'static str,
    pub data: &'static [Span],
    pub digit: Span,
    /// Whether a `<` in the digit position stands for zero (optional fields).
    pub filler_is_zero: bool,
}

pub const TD1_CHECKS: &[CheckSpec] = &[
    CheckSpec {
        label: "Document Number",
        data: &[(0, 5, 9)],
        digit: (0, 14, 1),
        filler_is_zero: false,
    },
    CheckSpec {
        label: "Date of Birth",
        data: &[(1, 0, 6)],
        digit: (1, 6, 1),
        filler_is_zero: false,
    },
    CheckSpec {
        label: "Expiry Date",
        data: &[(1, 8, 6)],
        digit: (1, 14, 1),
        filler_is_zero: false,
    },
    CheckSpec {
        label: "Composite",
        data: &[(0, 5, 25), (1, 0, 7), (1, 8, 7), (1, 18, 11)],
        digit: (1, 29, 1),
        filler_is_zero: false,
    },
];

pub const TD3_CHECKS: &[CheckSpec] = &[
    CheckSpec {
        label: "Document Number",
        data: &[(1, 0, 9)],
        digit: (1, 9, 1),
        filler_is_zero: false,
    },
    CheckSpec {
        label: "Date of Birth",
        data: &[(1, 13, 6)],
        digit: (1, 19, 1),
        filler_is_zero: false,
    },
    CheckSpec {
        label: "Expiry Date",
        data: &[(1, 21, 6)],
        digit: (1, 27, 1),
        filler_is_zero: false,
    },
    CheckSpec {
        label: "Personal Number",
        data: &[(1, 28, 14)],
        digit: (1, 42, 1),
        filler_is_zero: true,
    },
    CheckSpec {
        label: "Composite",
        data: &[(1, 0, 10), (1, 13, 7), (1, 21, 22)],
        digit: (1, 43, 1),
        filler_is_zero: false,
    },
];

pub fn layout_for(kind: DocumentKind) -> &'static [FieldSpec] {
    match kind {
        DocumentKind::IdCard => TD1_LAYOUT,
        DocumentKind::Passport => TD3_LAYOUT,
    }
}

pub fn checks_for(kind: DocumentKind) -> &'static [CheckSpec] {
    match kind {
        DocumentKind::IdCard => TD1_CHECKS,
        DocumentKind::Passport => TD3_CHECKS,
    }
}

/// Right-pad with `<` or truncate so the line is exactly `width` characters.
pub fn pad_line(line: &str, width: usize) -> Vec<char> {
    let mut chars: Vec<char> = line.chars().take(width).collect();
    chars.resize(width, FILLER);
    chars
}

/// Pad the leading `kind.line_count()` lines, or `None` if the run is short.
pub fn pad_lines<S: AsRef<str>>(lines: &[S], kind: DocumentKind) -> Option<Vec<Vec<char>>> {
    if lines.len() < kind.line_count() {
        return None;
    }
    Some(
        lines[..kind.line_count()]
            .iter()
            .map(|line| pad_line(line.as_ref(), kind.line_width()))
            .collect(),
    )
}

/// Characters covered by `span`. Out-of-range spans yield an empty slice.
pub fn span_chars(padded: &[Vec<char>], (line, offset, len): Span) -> &[char] {
    padded
        .get(line)
        .and_then(|chars| chars.get(offset..offset + len))
        .unwrap_or(&[])
}

/// Extracted field values, keyed by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValues(BTreeMap<Field, String>);

impl FieldValues {
    /// Value of `field`, or `""` if the layout does not carry it.
    pub fn get(&self, field: Field) -> &str {
        self.0.get(&field).map(String::as_str).unwrap_or_default()
    }

    /// Move the value out, leaving nothing behind.
    pub fn take(&mut self, field: Field) -> String {
        self.0.remove(&field).unwrap_or_default()
    }
}

/// Read every field of `layout` out of a padded line run.
pub fn extract(layout: &[FieldSpec], padded: &[Vec<char>]) -> FieldValues {
    let values = layout
        .iter()
        .map(|spec| {
            let chars = span_chars(padded, (spec.line, spec.offset, spec.len));
            let value: String = if spec.strip_filler {
                chars.iter().filter(|&&c| c != FILLER).collect()
            } else {
                chars.iter().collect()
            };
            (spec.field, value)
        })
        .collect();
    FieldValues(values)
}

/// Convert `YYMMDD` into `DD/MM/YYYY`.
///
/// Years up to 30 are placed in the 2000s, later ones in the 1900s. Anything
/// that is not exactly six ASCII digits is returned unchanged.
pub fn normalize_date(raw: &str) -> String {
    if raw.len() != 6 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return raw.to_owned();
    }
    let (yy, mm, dd) = (&raw[0..2], &raw[2..4], &raw[4..6]);
    let century = if yy <= "30" { "20" } else { "19" };
    format!("{dd}/{mm}/{century}{yy}")
}

/// Split a TD1 name line: fillers become spaces and runs separated by a
/// double space are name components. The first is the surname.
pub fn split_td1_names(region: &str) -> (String, String) {
    let spaced = region.replace(FILLER, " ");
    let mut parts = spaced
        .split("  ")
        .map(str::trim)
        .filter(|part| !part.is_empty());
    let surname = parts.next().unwrap_or_default().to_owned();
    let given_names = parts.collect::<Vec<_>>().join(" ");
    (surname, given_names)
}

/// Split a TD3 name region at the first `<<` into surname and given names.
pub fn split_td3_names(region: &str) -> (String, String) {
    match region.split_once("<<") {
        Some((surname, given)) => (
            surname.replace(FILLER, ""),
            given.replace(FILLER, " ").trim().to_owned(),
        ),
        None => (region.replace(FILLER, ""), String::new()),
    }
}
