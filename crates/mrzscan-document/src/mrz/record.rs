// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// MRZ records — structured fields parsed from a TD1 or TD3 line run.
//
// Parsing never fails. A run that is too short produces a record whose
// string fields are all empty and whose `is_valid` is false.

use mrzscan_core::config::DEFAULT_ISSUING_COUNTRY;
use mrzscan_core::DocumentKind;
use serde::Serialize;
use tracing::debug;

use super::check_digit::{self, CheckDigitReport};
use super::layout::{self, Field, FieldValues};

/// Sex codes that count towards validity.
const RECOGNISED_SEX_CODES: [&str; 2] = ["M", "F"];

/// Field accessors shared by both record kinds.
pub trait MrzDocument {
    fn kind(&self) -> DocumentKind;
    fn document_type(&self) -> &str;
    fn country_code(&self) -> &str;
    fn document_number(&self) -> &str;
    fn nationality(&self) -> &str;
    /// `DD/MM/YYYY`, or the raw value if it was not six digits.
    fn date_of_birth(&self) -> &str;
    fn expiry_date(&self) -> &str;
    fn sex(&self) -> &str;
    fn personal_number(&self) -> &str;
    fn surname(&self) -> &str;
    fn given_names(&self) -> &str;
    fn is_valid(&self) -> bool;
    fn raw_lines(&self) -> &[String];

    /// Ordered (label, value) pairs for display.
    fn fields(&self) -> Vec<(&'static str, String)> {
        [
            ("Document Type", self.document_type()),
            ("Country Code", self.country_code()),
            ("Document Number", self.document_number()),
            ("Surname", self.surname()),
            ("Given Names", self.given_names()),
            ("Date of Birth", self.date_of_birth()),
            ("Sex", self.sex()),
            ("Expiry Date", self.expiry_date()),
            ("Nationality", self.nationality()),
            ("Personal Number", self.personal_number()),
        ]
        .into_iter()
        .map(|(label, value)| (label, value.to_owned()))
        .collect()
    }

    /// Recompute every check digit from the raw lines.
    fn check_digits(&self) -> CheckDigitReport {
        let kind = self.kind();
        match layout::pad_lines(self.raw_lines(), kind) {
            Some(padded) => check_digit::verify(layout::checks_for(kind), &padded),
            None => CheckDigitReport::default(),
        }
    }
}

/// Conditions shared by both layouts.
fn has_required_fields(
    document_number: &str,
    date_of_birth: &str,
    surname: &str,
    country_code: &str,
    sex: &str,
    expected_country: &str,
) -> bool {
    !document_number.is_empty()
        && !date_of_birth.is_empty()
        && !surname.is_empty()
        && country_code == expected_country
        && RECOGNISED_SEX_CODES.contains(&sex)
}

fn owned_lines<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    lines.iter().map(|line| line.as_ref().to_owned()).collect()
}

/// Pad the run for `kind` and read its layout, or `None` if it is too short.
fn read_fields<S: AsRef<str>>(lines: &[S], kind: DocumentKind) -> Option<FieldValues> {
    let Some(padded) = layout::pad_lines(lines, kind) else {
        debug!(%kind, lines = lines.len(), "line run too short; returning empty record");
        return None;
    };
    Some(layout::extract(layout::layout_for(kind), &padded))
}

// -- TD1 ----------------------------------------------------------------------

/// ID-card (TD1, 3x30) record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IdCardRecord {
    pub document_type: String,
    pub country_code: String,
    pub document_number: String,
    pub document_number_check_digit: String,
    pub personal_number: String,
    pub date_of_birth: String,
    pub date_of_birth_check_digit: String,
    pub sex: String,
    pub expiry_date: String,
    pub expiry_date_check_digit: String,
    pub nationality: String,
    pub final_check_digit: String,
    pub surname: String,
    pub given_names: String,
    pub is_valid: bool,
    pub raw_lines: Vec<String>,
}

impl IdCardRecord {
    /// Parse against the default issuing country.
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        Self::from_lines_with(lines, DEFAULT_ISSUING_COUNTRY)
    }

    pub fn from_lines_with<S: AsRef<str>>(lines: &[S], expected_country: &str) -> Self {
        let raw_lines = owned_lines(lines);
        let Some(mut values) = read_fields(lines, DocumentKind::IdCard) else {
            return Self {
                raw_lines,
                ..Self::default()
            };
        };

        let (surname, given_names) = layout::split_td1_names(values.get(Field::Names));
        let mut record = Self {
            document_type: values.take(Field::DocumentType),
            country_code: values.take(Field::CountryCode),
            document_number: values.take(Field::DocumentNumber),
            document_number_check_digit: values.take(Field::DocumentNumberCheckDigit),
            personal_number: values.take(Field::PersonalNumber),
            date_of_birth: layout::normalize_date(values.get(Field::DateOfBirth)),
            date_of_birth_check_digit: values.take(Field::DateOfBirthCheckDigit),
            sex: values.take(Field::Sex),
            expiry_date: layout::normalize_date(values.get(Field::ExpiryDate)),
            expiry_date_check_digit: values.take(Field::ExpiryDateCheckDigit),
            nationality: values.take(Field::Nationality),
            final_check_digit: values.take(Field::FinalCheckDigit),
            surname,
            given_names,
            is_valid: false,
            raw_lines,
        };
        record.is_valid = has_required_fields(
            &record.document_number,
            &record.date_of_birth,
            &record.surname,
            &record.country_code,
            &record.sex,
            expected_country,
        );
        debug!(is_valid = record.is_valid, "ID card record parsed");
        record
    }
}

impl MrzDocument for IdCardRecord {
    fn kind(&self) -> DocumentKind {
        DocumentKind::IdCard
    }
    fn document_type(&self) -> &str {
        &self.document_type
    }
    fn country_code(&self) -> &str {
        &self.country_code
    }
    fn document_number(&self) -> &str {
        &self.document_number
    }
    fn nationality(&self) -> &str {
        &self.nationality
    }
    fn date_of_birth(&self) -> &str {
        &self.date_of_birth
    }
    fn expiry_date(&self) -> &str {
        &self.expiry_date
    }
    fn sex(&self) -> &str {
        &self.sex
    }
    fn personal_number(&self) -> &str {
        &self.personal_number
    }
    fn surname(&self) -> &str {
        &self.surname
    }
    fn given_names(&self) -> &str {
        &self.given_names
    }
    fn is_valid(&self) -> bool {
        self.is_valid
    }
    fn raw_lines(&self) -> &[String] {
        &self.raw_lines
    }
}

// -- TD3 ----------------------------------------------------------------------

/// Passport (TD3, 2x44) record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PassportRecord {
    pub document_type: String,
    pub country_code: String,
    pub surname: String,
    pub given_names: String,
    pub document_number: String,
    pub document_number_check_digit: String,
    pub nationality: String,
    pub date_of_birth: String,
    pub date_of_birth_check_digit: String,
    pub sex: String,
    pub expiry_date: String,
    pub expiry_date_check_digit: String,
    pub personal_number: String,
    pub personal_number_check_digit: String,
    pub final_check_digit: String,
    pub is_valid: bool,
    pub raw_lines: Vec<String>,
}

impl PassportRecord {
    /// Parse against the default issuing country.
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        Self::from_lines_with(lines, DEFAULT_ISSUING_COUNTRY)
    }

    pub fn from_lines_with<S: AsRef<str>>(lines: &[S], expected_country: &str) -> Self {
        let raw_lines = owned_lines(lines);
        let Some(mut values) = read_fields(lines, DocumentKind::Passport) else {
            return Self {
                raw_lines,
                ..Self::default()
            };
        };

        let (surname, given_names) = layout::split_td3_names(values.get(Field::Names));
        let mut record = Self {
            document_type: values.take(Field::DocumentType),
            country_code: values.take(Field::CountryCode),
            surname,
            given_names,
            document_number: values.take(Field::DocumentNumber),
            document_number_check_digit: values.take(Field::DocumentNumberCheckDigit),
            nationality: values.take(Field::Nationality),
            date_of_birth: layout::normalize_date(values.get(Field::DateOfBirth)),
            date_of_birth_check_digit: values.take(Field::DateOfBirthCheckDigit),
            sex: values.take(Field::Sex),
            expiry_date: layout::normalize_date(values.get(Field::ExpiryDate)),
            expiry_date_check_digit: values.take(Field::ExpiryDateCheckDigit),
            personal_number: values.take(Field::PersonalNumber),
            personal_number_check_digit: values.take(Field::PersonalNumberCheckDigit),
            final_check_digit: values.take(Field::FinalCheckDigit),
            is_valid: false,
            raw_lines,
        };
        record.is_valid = record.document_type == "P"
            && has_required_fields(
                &record.document_number,
                &record.date_of_birth,
                &record.surname,
                &record.country_code,
                &record.sex,
                expected_country,
            );
        debug!(is_valid = record.is_valid, "passport record parsed");
        record
    }
}

impl MrzDocument for PassportRecord {
    fn kind(&self) -> DocumentKind {
        DocumentKind::Passport
    }
    fn document_type(&self) -> &str {
        &self.document_type
    }
    fn country_code(&self) -> &str {
        &self.country_code
    }
    fn document_number(&self) -> &str {
        &self.document_number
    }
    fn nationality(&self) -> &str {
        &self.nationality
    }
    fn date_of_birth(&self) -> &str {
        &self.date_of_birth
    }
    fn expiry_date(&self) -> &str {
        &self.expiry_date
    }
    fn sex(&self) -> &str {
        &self.sex
    }
    fn personal_number(&self) -> &str {
        &self.personal_number
    }
    fn surname(&self) -> &str {
        &self.surname
    }
    fn given_names(&self) -> &str {
        &self.given_names
    }
    fn is_valid(&self) -> bool {
        self.is_valid
    }
    fn raw_lines(&self) -> &[String] {
        &self.raw_lines
    }
}

// -- Either kind --------------------------------------------------------------

/// A parsed record of either layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum MrzRecord {
    IdCard(IdCardRecord),
    Passport(PassportRecord),
}

impl MrzRecord {
    /// Parse `lines` with the layout for `kind`.
    pub fn parse<S: AsRef<str>>(kind: DocumentKind, lines: &[S], expected_country: &str) -> Self {
        match kind {
            DocumentKind::IdCard => {
                Self::IdCard(IdCardRecord::from_lines_with(lines, expected_country))
            }
            DocumentKind::Passport => {
                Self::Passport(PassportRecord::from_lines_with(lines, expected_country))
            }
        }
    }

    pub fn as_document(&self) -> &dyn MrzDocument {
        match self {
            Self::IdCard(record) => record,
            Self::Passport(record) => record,
        }
    }
}

impl MrzDocument for MrzRecord {
    fn kind(&self) -> DocumentKind {
        self.as_document().kind()
    }
    fn document_type(&self) -> &str {
        self.as_document().document_type()
    }
    fn country_code(&self) -> &str {
        self.as_document().country_code()
    }
    fn document_number(&self) -> &str {
        self.as_document().document_number()
    }
    fn nationality(&self) -> &str {
        self.as_document().nationality()
    }
    fn date_of_birth(&self) -> &str {
        self.as_document().date_of_birth()
    }
    fn expiry_date(&self) -> &str {
        self.as_document().expiry_date()
    }
    fn sex(&self) -> &str {
        self.as_document().sex()
    }
    fn personal_number(&self) -> &str {
        self.as_document().personal_number()
    }
    fn surname(&self) -> &str {
        self.as_document().surname()
    }
    fn given_names(&self) -> &str {
        self.as_document().given_names()
    }
    fn is_valid(&self) -> bool {
        self.as_document().is_valid()
    }
    fn raw_lines(&self) -> &[String] {
        self.as_document().raw_lines()
    }
}

impl From<IdCardRecord> for MrzRecord {
    fn from(record: IdCardRecord) -> Self {
        Self::IdCard(record)
    }
}

impl From<PassportRecord> for MrzRecord {
    fn from(record: PassportRecord) -> Self {
        Self::Passport(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UZB_ID: [&str; 3] = [
        "IUUZBAD29049034301295591",
        "9512092M3303296UZBUZB<0",
        "SURNAME  GIVEN NAMES",
    ];

    const UTO_PASSPORT: [&str; 2] = [
        "P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<",
        "L898902C36UTO7408122F1204159ZE184226B<<<<<10",
    ];

    #[test]
    fn id_card_fields() {
        let record = IdCardRecord::from_lines(&UZB_ID);
        assert_eq!(record.document_type, "IU");
        assert_eq!(record.country_code, "UZB");
        assert_eq!(record.document_number, "AD2904903");
        assert_eq!(record.document_number_check_digit, "4");
        assert_eq!(record.personal_number, "301295591");
        assert_eq!(record.date_of_birth, "09/12/1995");
        assert_eq!(record.date_of_birth_check_digit, "2");
        assert_eq!(record.sex, "M");
        assert_eq!(record.expiry_date, "29/03/2033");
        assert_eq!(record.expiry_date_check_digit, "6");
        assert_eq!(record.nationality, "UZB");
        assert_eq!(record.final_check_digit, "<");
        assert_eq!(record.surname, "SURNAME");
        assert_eq!(record.given_names, "GIVEN NAMES");
        assert!(record.is_valid);
        assert_eq!(record.raw_lines, UZB_ID.to_vec());
    }

    #[test]
    fn id_card_wrong_country_is_invalid() {
        let record = IdCardRecord::from_lines(&[
            "I<UTOD231458907<<<<<<<<<<<<<<<",
            "7408122F1204159UTO<<<<<<<<<<<6",
            "ERIKSSON<<ANNA<MARIA<<<<<<<<<<",
        ]);
        assert_eq!(record.surname, "ERIKSSON");
        assert_eq!(record.given_names, "ANNA MARIA");
        assert!(!record.is_valid);

        let record = IdCardRecord::from_lines_with(&record.raw_lines, "UTO");
        assert!(record.is_valid);
    }

    #[test]
    fn id_card_unrecognised_sex_is_invalid() {
        let record = IdCardRecord::from_lines(&[
            UZB_ID[0],
            "9512092X3303296UZBUZB<0",
            UZB_ID[2],
        ]);
        assert_eq!(record.sex, "X");
        assert!(!record.is_valid);
    }

    #[test]
    fn short_id_card_run_is_empty() {
        let record = IdCardRecord::from_lines(&UZB_ID[..2]);
        assert!(!record.is_valid);
        for (label, value) in record.fields() {
            assert_eq!(value, "", "{label} should be empty");
        }
        assert_eq!(record.document_number_check_digit, "");
        assert_eq!(record.final_check_digit, "");
    }

    #[test]
    fn passport_fields() {
        let record = PassportRecord::from_lines_with(&UTO_PASSPORT, "UTO");
        assert_eq!(record.document_type, "P");
        assert_eq!(record.country_code, "UTO");
        assert_eq!(record.surname, "ERIKSSON");
        assert_eq!(record.given_names, "ANNA MARIA");
        assert_eq!(record.document_number, "L898902C3");
        assert_eq!(record.document_number_check_digit, "6");
        assert_eq!(record.nationality, "UTO");
        assert_eq!(record.date_of_birth, "12/08/1974");
        assert_eq!(record.sex, "F");
        assert_eq!(record.expiry_date, "15/04/2012");
        assert_eq!(record.personal_number, "ZE184226B");
        assert_eq!(record.personal_number_check_digit, "1");
        assert_eq!(record.final_check_digit, "0");
        assert!(record.is_valid);
    }

    /// Only document type `P` is accepted for passports.
    #[test]
    fn passport_requires_p_document_type() {
        let record = PassportRecord::from_lines_with(
            &[
                "V<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<",
                UTO_PASSPORT[1],
            ],
            "UTO",
        );
        assert_eq!(record.document_type, "V");
        assert!(!record.is_valid);
    }

    #[test]
    fn passport_with_surname_only() {
        let record = PassportRecord::from_lines(&["P<UZBSMITH", UTO_PASSPORT[1]]);
        assert_eq!(record.surname, "SMITH");
        assert_eq!(record.given_names, "");
    }

    #[test]
    fn short_passport_run_is_empty() {
        let record = PassportRecord::from_lines(&UTO_PASSPORT[..1]);
        assert!(!record.is_valid);
        assert!(record.fields().iter().all(|(_, value)| value.is_empty()));
        assert_eq!(record.personal_number_check_digit, "");
        assert!(record.check_digits().results.is_empty());
    }

    /// Parsing is a pure function of its input.
    #[test]
    fn parsing_is_idempotent() {
        assert_eq!(IdCardRecord::from_lines(&UZB_ID), IdCardRecord::from_lines(&UZB_ID));
        assert_eq!(
            PassportRecord::from_lines(&UTO_PASSPORT),
            PassportRecord::from_lines(&UTO_PASSPORT)
        );
    }

    #[test]
    fn enum_dispatches_to_variant() {
        let record = MrzRecord::parse(DocumentKind::Passport, &UTO_PASSPORT, "UTO");
        assert_eq!(record.kind(), DocumentKind::Passport);
        assert_eq!(record.surname(), "ERIKSSON");
        assert!(record.is_valid());
        assert!(record.check_digits().all_ok());

        let record = MrzRecord::parse(DocumentKind::IdCard, &UZB_ID, "UZB");
        assert!(matches!(record, MrzRecord::IdCard(_)));
        assert_eq!(record.date_of_birth(), "09/12/1995");
    }

    #[test]
    fn fields_are_labelled_in_display_order() {
        let record = IdCardRecord::from_lines(&UZB_ID);
        let labels: Vec<_> = record.fields().into_iter().map(|(label, _)| label).collect();
        assert_eq!(
            labels,
            [
                "Document Type",
                "Country Code",
                "Document Number",
                "Surname",
                "Given Names",
                "Date of Birth",
                "Sex",
                "Expiry Date",
                "Nationality",
                "Personal Number",
            ]
        );
    }

    /// A record with correct digits everywhere but the composite still counts
    /// as valid: check digits are reported, not enforced.
    #[test]
    fn check_digits_do_not_affect_validity() {
        let record = IdCardRecord::from_lines(&UZB_ID);
        let report = record.check_digits();
        assert!(record.is_valid);
        assert!(!report.all_ok());
        assert_eq!(report.results.len(), 4);
    }

    #[test]
    fn record_serializes_with_kind_tag() {
        let record = MrzRecord::from(IdCardRecord::from_lines(&UZB_ID));
        let json = serde_json::to_value(&record).expect("serialize");
        assert_eq!(json["kind"], "id-card");
        assert_eq!(json["surname"], "SURNAME");
        assert_eq!(json["is_valid"], true);
    }
}
