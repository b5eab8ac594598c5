// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Machine-readable zone reading — line-shape patterns, candidate line
// extraction, fixed-width field layouts, record parsing and check digits.

pub mod check_digit;
pub mod classifier;
pub mod layout;
pub mod patterns;
pub mod record;

pub use check_digit::{CheckDigitReport, CheckDigitResult};
pub use classifier::MrzLineClassifier;
pub use patterns::{PatternCatalog, TextPattern};
pub use record::{IdCardRecord, MrzDocument, MrzRecord, PassportRecord};
