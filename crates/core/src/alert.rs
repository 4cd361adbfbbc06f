//! Alert severity classification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity of a threshold breach.
///
/// Serialized in uppercase (`"WARNING"` / `"CRITICAL"`) -- this is the wire
/// format of both the ingestion response and the `alerts.severity` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// At least one metric exceeded its warning threshold.
    Warning,
    /// At least one metric reached its critical threshold.
    Critical,
}

impl Severity {
    /// The uppercase string form stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Warning => "WARNING",
            Severity::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
