// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scanner configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{MrzScanError, Result};
use crate::types::ValidationTolerances;

/// Issuing country a record must carry to be considered valid.
pub const DEFAULT_ISSUING_COUNTRY: &str = "UZB";

/// Settings shared by the parser, the rectangle validator and scan sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Three-letter ICAO country code a valid record must carry.
    pub expected_issuing_country: String,
    /// Capture-rectangle acceptance tolerances.
    pub tolerances: ValidationTolerances,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            expected_issuing_country: DEFAULT_ISSUING_COUNTRY.to_owned(),
            tolerances: ValidationTolerances::default(),
        }
    }
}

impl ScanConfig {
    /// Parse and validate a JSON config document. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&json)
    }

    /// Reject values that would make every scan fail or every rectangle pass.
    pub fn validate(&self) -> Result<()> {
        let country = &self.expected_issuing_country;
        if country.len() != 3 || !country.bytes().all(|b| b.is_ascii_uppercase()) {
            warn!(country = %country, "rejecting config: bad issuing country");
            return Err(MrzScanError::InvalidConfig(format!(
                "expected_issuing_country must be three uppercase letters, got {country:?}"
            )));
        }

        let t = &self.tolerances;
        for (name, value) in [
            ("max_tilt_degrees", t.max_tilt_degrees),
            ("aspect_ratio_tolerance", t.aspect_ratio_tolerance),
            ("size_tolerance", t.size_tolerance),
        ] {
            if !value.is_finite() || value < 0.0 {
                warn!(field = name, value, "rejecting config: bad tolerance");
                return Err(MrzScanError::InvalidConfig(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ScanConfig::default();
        assert_eq!(config.expected_issuing_country, "UZB");
        assert!(config.validate().is_ok());
    }

    /// Fields absent from the JSON fall back to their defaults.
    #[test]
    fn partial_json_uses_defaults() {
        let config = ScanConfig::from_json_str(r#"{"tolerances": {"max_tilt_degrees": 10.0}}"#)
            .expect("valid config");
        assert_eq!(config.expected_issuing_country, "UZB");
        assert_eq!(config.tolerances.max_tilt_degrees, 10.0);
        assert_eq!(config.tolerances.size_tolerance, 0.2);
    }

    #[test]
    fn lowercase_country_rejected() {
        let result = ScanConfig::from_json_str(r#"{"expected_issuing_country": "uzb"}"#);
        assert!(matches!(result, Err(MrzScanError::InvalidConfig(_))));
    }

    #[test]
    fn negative_tolerance_rejected() {
        let result = ScanConfig::from_json_str(r#"{"tolerances": {"size_tolerance": -0.1}}"#);
        assert!(matches!(result, Err(MrzScanError::InvalidConfig(_))));
    }

    #[test]
    fn malformed_json_is_serialization_error() {
        let result = ScanConfig::from_json_str("{not json");
        assert!(matches!(result, Err(MrzScanError::Serialization(_))));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"expected_issuing_country": "KAZ"}"#).expect("write config");

        let config = ScanConfig::load(&path).expect("load config");
        assert_eq!(config.expected_issuing_country, "KAZ");
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let result = ScanConfig::load("/nonexistent/mrzscan/config.json");
        assert!(matches!(result, Err(MrzScanError::Io(_))));
    }
}
