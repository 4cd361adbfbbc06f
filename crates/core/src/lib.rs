//! Domain logic for the vigil alert pipeline.
//!
//! Pure types and functions only -- no database or network access. The
//! threshold evaluator, severity model, and address validation live here so
//! the storage and HTTP layers can share them.

pub mod alert;
pub mod error;
pub mod thresholds;
pub mod types;
pub mod validation;

pub use alert::Severity;
pub use error::CoreError;
pub use thresholds::{evaluate, Breach, ReadingMetrics};
