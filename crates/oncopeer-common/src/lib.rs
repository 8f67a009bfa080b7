//! oncopeer-common — Shared patient types, errors, and configuration used across all Oncopeer crates.

pub mod error;
pub mod patient;
pub mod config;

// Re-export commonly used types
pub use error::{OncopeerError, Result};
pub use patient::{Attribute, FieldValue, PatientId, PatientRecord, Population, NA};
pub use config::{OncopeerConfig, DatasetConfig, RankingConfig, TieBreak};
