//! Per-batch reports and the `Reporter` hook that receives per-item outcomes.
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::core::processing::pipeline::Placement;
use crate::error::{Error, Result};

#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Fetch,
    Normalize,
}

/// A successfully handled item.
#[derive(Debug, Clone, Serialize)]
pub struct ItemOutcome {
    pub stage: Stage,
    /// Identifier (fetch) or input path (normalize)
    pub input: String,
    pub output: PathBuf,
    /// Sequential output number, normalize only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placement: Option<Placement>,
}

/// An item that produced no output, with the reason.
#[derive(Debug, Clone, Serialize)]
pub struct ItemFailure {
    pub stage: Stage,
    pub input: String,
    pub kind: &'static str,
    pub message: String,
}

impl ItemFailure {
    pub fn from_error(stage: Stage, input: impl Into<String>, error: &Error) -> Self {
        Self {
            stage,
            input: input.into(),
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

/// Receives every item outcome as the batch runs.
pub trait Reporter {
    fn item_succeeded(&mut self, outcome: &ItemOutcome);
    fn item_failed(&mut self, failure: &ItemFailure);
}

/// Default reporter: one log line per item.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn item_succeeded(&mut self, outcome: &ItemOutcome) {
        match outcome.stage {
            Stage::Fetch => info!("Image successfully downloaded: {:?}", outcome.output),
            Stage::Normalize => info!("Saved {} -> {:?}", outcome.input, outcome.output),
        }
    }

    fn item_failed(&mut self, failure: &ItemFailure) {
        warn!("[{}] {}", failure.kind, failure.message);
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NormalizeReport {
    pub processed: usize,
    /// Entries that could not be decoded as images
    pub skipped: usize,
    /// Decoded images whose output could not be produced
    pub errors: usize,
    pub outputs: Vec<ItemOutcome>,
    pub failures: Vec<ItemFailure>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl NormalizeReport {
    pub(crate) fn start() -> Self {
        let now = Utc::now();
        Self {
            processed: 0,
            skipped: 0,
            errors: 0,
            outputs: Vec::new(),
            failures: Vec::new(),
            started_at: now,
            finished_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FetchReport {
    pub downloaded: usize,
    /// Transport failures and non-200 responses
    pub failed: usize,
    pub malformed: usize,
    pub files: Vec<ItemOutcome>,
    pub failures: Vec<ItemFailure>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl FetchReport {
    pub(crate) fn start() -> Self {
        let now = Utc::now();
        Self {
            downloaded: 0,
            failed: 0,
            malformed: 0,
            files: Vec::new(),
            failures: Vec::new(),
            started_at: now,
            finished_at: now,
        }
    }
}

/// Write any report as pretty JSON.
pub fn write_report_json<T: Serialize>(report: &T, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report).map_err(|e| Error::persist(path, e))?;
    std::fs::write(path, json).map_err(|e| Error::persist(path, e))?;
    Ok(())
}
