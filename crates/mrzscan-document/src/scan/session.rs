// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scan session — feeds successive OCR results and rectangle detections
// through the pure readers and acts on the first success only.

use chrono::{DateTime, Utc};
use mrzscan_core::error::Result;
use mrzscan_core::{DocumentKind, Rect, ScanConfig};
use tracing::{debug, info, instrument, trace};
use uuid::Uuid;

use crate::geometry::rectangle::{self, RectangleObservation};
use crate::mrz::classifier::MrzLineClassifier;
use crate::mrz::record::{MrzDocument, MrzRecord};

/// State for one scanning attempt.
///
/// At most one MRZ record and one capture trigger are produced per session.
/// Anything submitted after that is ignored until [`ScanSession::reset`].
#[derive(Debug, Clone)]
pub struct ScanSession {
    id: Uuid,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    classifier: MrzLineClassifier,
    config: ScanConfig,
    /// Fixed layout, or `None` to detect it from each line run.
    kind: Option<DocumentKind>,
    result: Option<MrzRecord>,
    capture_triggered: bool,
    attempts: u64,
}

impl ScanSession {
    /// Start a session, validating `config` and compiling the line patterns.
    pub fn new(config: ScanConfig, kind: Option<DocumentKind>) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_classifier(MrzLineClassifier::new()?, config, kind))
    }

    /// Start a session that shares an existing classifier.
    pub fn with_classifier(
        classifier: MrzLineClassifier,
        config: ScanConfig,
        kind: Option<DocumentKind>,
    ) -> Self {
        let id = Uuid::new_v4();
        debug!(%id, ?kind, "scan session started");
        Self {
            id,
            started_at: Utc::now(),
            completed_at: None,
            classifier,
            config,
            kind,
            result: None,
            capture_triggered: false,
            attempts: 0,
        }
    }

    // -- Accessors ------------------------------------------------------------

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// When the first valid record arrived.
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// True once a valid record has been accepted.
    pub fn is_complete(&self) -> bool {
        self.result.is_some()
    }

    pub fn result(&self) -> Option<&MrzRecord> {
        self.result.as_ref()
    }

    pub fn capture_triggered(&self) -> bool {
        self.capture_triggered
    }

    /// Number of OCR results submitted, including the one that completed the
    /// session.
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    // -- Submission -----------------------------------------------------------

    /// Classify and parse one OCR result.
    ///
    /// Returns the record only if it is valid and the session had not yet
    /// produced one. Invalid reads are dropped silently.
    #[instrument(skip_all, fields(session = %self.id))]
    pub fn submit_text(&mut self, raw_text: &str) -> Option<MrzRecord> {
        if self.is_complete() {
            trace!("session already complete; ignoring OCR result");
            return None;
        }
        self.attempts += 1;

        let lines = self.classifier.extract_mrz_lines(raw_text);
        if lines.is_empty() {
            return None;
        }
        let kind = self
            .kind
            .unwrap_or_else(|| self.classifier.detect_kind(&lines));
        let record = MrzRecord::parse(kind, &lines, &self.config.expected_issuing_country);
        if !record.is_valid() {
            debug!(%kind, attempts = self.attempts, "MRZ read rejected");
            return None;
        }

        let completed_at = Utc::now();
        info!(
            %kind,
            attempts = self.attempts,
            elapsed_ms = (completed_at - self.started_at).num_milliseconds(),
            "MRZ scan complete"
        );
        self.completed_at = Some(completed_at);
        self.result = Some(record.clone());
        Some(record)
    }

    /// Decide whether to trigger capture for a detected rectangle.
    ///
    /// Returns `true` for the first acceptable rectangle only.
    pub fn submit_rectangle(&mut self, observation: &RectangleObservation, mask: &Rect) -> bool {
        if self.capture_triggered {
            return false;
        }
        if rectangle::is_acceptable(observation, mask, &self.config.tolerances) {
            info!(session = %self.id, "document rectangle accepted; triggering capture");
            self.capture_triggered = true;
            return true;
        }
        false
    }

    /// Discard any result and begin a fresh session with a new id.
    pub fn reset(&mut self) {
        debug!(previous = %self.id, "scan session reset");
        self.id = Uuid::new_v4();
        self.started_at = Utc::now();
        self.completed_at = None;
        self.result = None;
        self.capture_triggered = false;
        self.attempts = 0;
    }
}
