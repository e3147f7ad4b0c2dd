use super::ClusterLister;
use crate::Result;
use camino::Utf8Path;
use ohno::IntoAppError;
use serde::{Deserialize, Serialize};
use std::fs;

/// Log target for fact snapshots
const LOG_TARGET: &str = "     facts";

/// Control-plane version as reported by the API server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerVersion {
    pub major: String,
    pub minor: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_version: Option<String>,
}

/// A point-in-time snapshot of cluster facts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSnapshot {
    pub server_version: ServerVersion,

    #[serde(default)]
    pub metrics_available: bool,
}

impl ClusterSnapshot {
    #[must_use]
    pub fn new(major: impl Into<String>, minor: impl Into<String>, metrics_available: bool) -> Self {
        Self {
            server_version: ServerVersion {
                major: major.into(),
                minor: minor.into(),
                git_version: None,
            },
            metrics_available,
        }
    }

    /// Parse a snapshot from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid snapshot document
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).into_app_err("parsing cluster facts")
    }

    /// Load a snapshot from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let text = fs::read_to_string(path).into_app_err_with(|| format!("reading cluster facts file '{path}'"))?;
        let snapshot = Self::from_json(&text).into_app_err_with(|| format!("loading cluster facts file '{path}'"))?;

        log::debug!(
            target: LOG_TARGET,
            "Loaded cluster facts from '{path}': version {}.{}, metrics available: {}",
            snapshot.server_version.major,
            snapshot.server_version.minor,
            snapshot.metrics_available
        );

        Ok(snapshot)
    }
}

impl ClusterLister for ClusterSnapshot {
    fn list_version(&self) -> (String, String) {
        (self.server_version.major.clone(), self.server_version.minor.clone())
    }

    fn has_metrics(&self) -> bool {
        self.metrics_available
    }
}
