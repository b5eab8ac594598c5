// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Capture geometry — deciding whether a detected document rectangle is good
// enough to photograph.

pub mod rectangle;

pub use rectangle::{
    evaluate, is_acceptable, NormalizedOrigin, RectangleAssessment, RectangleObservation,
};
