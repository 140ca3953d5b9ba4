//! Rule-based detection of high-risk patterns in warranty and
//! service-contract claims.
//!
//! Claims are normalized once into [`ClaimRecord`]s, seven independent
//! detectors run over them, and a [`Summary`] aggregates the results into a
//! single [`DetectionReport`].

pub mod cli;
pub mod commands;
pub mod common;
pub mod config;
pub mod core;
pub mod detectors;
pub mod errors;
pub mod io;
pub mod output;
pub mod summary;

// Re-export commonly used types
pub use crate::core::{
    fields, normalize_row, normalize_rows, normalize_value, ClaimRecord, RawRow, LUXURY_BRANDS,
    NOT_IDENTIFIED, NOT_SPECIFIED,
};

pub use crate::common::{group_by, mean, std_dev, Group};

pub use crate::config::{ClaimguardConfig, DetectionSettings};

pub use crate::detectors::{
    detect, detect_value, AnalyzerKind, DetectionEngine, DetectionReport, Findings, GroupStats,
};

pub use crate::errors::{Error, Result};

pub use crate::summary::{summarize, PatternSummary, Summary};
