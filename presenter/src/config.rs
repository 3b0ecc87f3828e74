//! Runtime configuration of the dashboard.
//!
//! Every field has a default matching the analysis server's deployment, so an
//! empty JSON object is a valid configuration.

use crate::error::DashboardError;
use log::LevelFilter;
use serde::Deserialize;
use std::f64::consts::PI;

const MIB: u64 = 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Prefix prepended to every API path. Empty means same origin.
    pub api_base: String,
    /// Largest file accepted for upload, checked before any request.
    pub max_upload_bytes: u64,
    /// Rows per affected-rows page.
    pub page_size: u32,
    /// Radius of the quality gauge circle, in SVG user units.
    pub gauge_radius: f64,
    pub min_password_len: usize,
    /// `log` level name (`error`, `warn`, `info`, `debug`, `trace`, `off`).
    pub log_level: String,
    pub section_headers: SectionHeaders,
}

/// Literal `###` headers locating each part of a generated issue analysis.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SectionHeaders {
    pub summary: String,
    pub impact: String,
    pub recommendations: String,
    pub context: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            max_upload_bytes: 50 * MIB,
            page_size: 50,
            gauge_radius: 85.0,
            min_password_len: 6,
            log_level: "info".to_string(),
            section_headers: SectionHeaders::default(),
        }
    }
}

impl Default for SectionHeaders {
    fn default() -> Self {
        Self {
            summary: "Executive Summary".to_string(),
            impact: "Impact Analysis".to_string(),
            recommendations: "Recommended Actions".to_string(),
            context: "Healthcare Context".to_string(),
        }
    }
}

impl DashboardConfig {
    pub fn from_json(json: &str) -> Result<Self, DashboardError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| DashboardError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), DashboardError> {
        if self.page_size == 0 {
            return Err(DashboardError::Config("page_size must be positive".into()));
        }
        if self.gauge_radius <= 0.0 {
            return Err(DashboardError::Config("gauge_radius must be positive".into()));
        }
        Ok(())
    }

    /// Stroke length of the gauge circle.
    pub fn gauge_circumference(&self) -> f64 {
        2.0 * PI * self.gauge_radius
    }

    /// Upload limit in whole binary megabytes, for messages.
    pub fn max_upload_mb(&self) -> u64 {
        self.max_upload_bytes / MIB
    }

    /// Absolute URL of an API path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base.trim_end_matches('/'), path)
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config = DashboardConfig::from_json("{}").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.max_upload_mb(), 50);
    }

    #[test]
    fn gauge_circumference_follows_radius() {
        let config = DashboardConfig::default();
        // r = 85 gives the 534-unit stroke of the gauge artwork
        assert_eq!(config.gauge_circumference().round(), 534.0);
    }

    #[test]
    fn partial_headers_keep_other_defaults() {
        let config = DashboardConfig::from_json(
            r#"{"api_base": "https://dq.example.org/", "section_headers": {"context": "Domain Context"}}"#,
        )
        .unwrap();

        assert_eq!(config.url("/api/history"), "https://dq.example.org/api/history");
        assert_eq!(config.section_headers.context, "Domain Context");
        assert_eq!(config.section_headers.summary, "Executive Summary");
    }

    #[test]
    fn rejects_zero_page_size() {
        let err = DashboardConfig::from_json(r#"{"page_size": 0}"#).unwrap_err();
        assert!(matches!(err, DashboardError::Config(_)));
    }

    #[test]
    fn unknown_log_level_falls_back_to_info() {
        let config = DashboardConfig {
            log_level: "chatty".into(),
            ..DashboardConfig::default()
        };
        assert_eq!(config.log_level(), LevelFilter::Info);
    }
}
