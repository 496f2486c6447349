//! Assembler options.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{Error, Result};

/// Compression applied to archive entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    #[default]
    Deflated,
    Stored,
}

/// Options controlling package metadata and container encoding.
///
/// Timestamps are left out unless given, so repeated runs over the same model
/// produce identical bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageOptions {
    /// Generator name written to the application properties
    pub application: String,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
    /// Applied to the sink when the assembler seals
    pub compression: Compression,
    /// Title used when the presentation has none
    pub title_fallback: Option<String>,
}

impl Default for PackageOptions {
    fn default() -> Self {
        Self {
            application: format!("deckpack/{}", env!("CARGO_PKG_VERSION")),
            created: None,
            modified: None,
            compression: Compression::Deflated,
            title_fallback: None,
        }
    }
}

impl PackageOptions {
    /// Load options from a YAML document. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// `Config` when the YAML is malformed or a value has the wrong type.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_saphyr::from_str(yaml)
            .map_err(|e| Error::Config(format!("Failed to parse options: {}", e)))
    }

    /// Serialize to YAML.
    pub fn to_yaml_string(&self) -> Result<String> {
        serde_saphyr::to_string(self)
            .map_err(|e| Error::Config(format!("Failed to serialize options: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_yaml() {
        let yaml = "application: Slides Service\ncompression: stored\ncreated: 2024-03-01T10:00:00Z\n";
        let options = PackageOptions::from_yaml_str(yaml).unwrap();

        assert_eq!(options.application, "Slides Service");
        assert_eq!(options.compression, Compression::Stored);
        assert_eq!(
            options.created.unwrap().to_rfc3339(),
            "2024-03-01T10:00:00+00:00"
        );
        assert!(options.modified.is_none());
    }

    #[test]
    fn test_yaml_round_trip_keeps_values() {
        let options = PackageOptions {
            application: "Exporter".to_string(),
            compression: Compression::Stored,
            title_fallback: Some("Untitled".to_string()),
            ..PackageOptions::default()
        };
        let yaml = options.to_yaml_string().unwrap();
        assert!(yaml.contains("compression: stored"));
        assert_eq!(PackageOptions::from_yaml_str(&yaml).unwrap(), options);
    }

    #[test]
    fn test_malformed_yaml() {
        let err = PackageOptions::from_yaml_str("compression: [1, 2").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_defaults_have_no_timestamps() {
        let options = PackageOptions::default();
        assert!(options.created.is_none());
        assert!(options.application.starts_with("deckpack/"));
    }
}
