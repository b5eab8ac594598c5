// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// mrzscan-document — Identity-document reading for the MRZ scanner.
//
// Provides MRZ line extraction and TD1/TD3 record parsing from raw OCR text,
// the geometric acceptance test for a detected document rectangle, and a
// one-shot scan session that ties both to a capture flow.

pub mod geometry;
pub mod mrz;
pub mod scan;

// Re-export the primary types so callers can use `mrzscan_document::MrzRecord` etc.
pub use geometry::{RectangleAssessment, RectangleObservation};
pub use mrz::{IdCardRecord, MrzDocument, MrzLineClassifier, MrzRecord, PassportRecord};
pub use scan::ScanSession;
