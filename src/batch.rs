//! Batch runner around the single-record normalizer.
//!
//! The runner owns everything the core deliberately ignores: accepting one
//! record or an array of them, dropping records without an identifying
//! `urn`, applying the per-record failure policy, and reporting counts and
//! timing for the whole batch.
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use profilenorm::{run_batch, BatchConfig, BatchInput, NormalizeConfig};
//! use serde_json::json;
//!
//! let input = BatchInput::from_value(json!([
//!     {"urn": "u1", "headline": "Rust Rust"},
//!     {"headline": "no urn, filtered"}
//! ]))
//! .unwrap();
//! let now = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
//!
//! let report = run_batch(input, &BatchConfig::default(), &NormalizeConfig::default(), now).unwrap();
//! assert_eq!(report.total_received, 2);
//! assert_eq!(report.filtered, 1);
//! assert_eq!(report.results[0].keywords, "Rust");
//! ```
use std::time::Instant;

use chrono::{DateTime, Utc};
use normalize::{normalize, NormalizeConfig, NormalizeError, NormalizedProfile};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn, Level};

use crate::MetricsSpan;

/// Errors that abort a whole batch.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum BatchError {
    /// Top-level input is neither a record nor an array of records.
    #[error("structural error: {0}")]
    Structural(String),

    /// A record failed under the `fail` policy.
    #[error("record {index} ({urn}) failed: {source}")]
    Record {
        index: usize,
        urn: String,
        #[source]
        source: NormalizeError,
    },
}

impl BatchError {
    pub fn http_status_code(&self) -> u16 {
        match self {
            BatchError::Structural(_) => 400,
            BatchError::Record { source, .. } => source.http_status_code(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            BatchError::Structural(_) => "STRUCTURAL_ERROR",
            BatchError::Record { source, .. } => source.code(),
        }
    }
}

/// What to do when a single record fails to normalize.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordErrorPolicy {
    /// Keep going and list the failure in [`BatchReport::errors`].
    #[default]
    Flag,
    /// Abort the batch with the first failure in input order.
    Fail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Normalize on the rayon pool instead of the calling thread.
    pub parallel: bool,
    pub on_record_error: RecordErrorPolicy,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            on_record_error: RecordErrorPolicy::Flag,
        }
    }
}

/// Accepted shapes of batch input.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchInput {
    Single(Value),
    Batch(Vec<Value>),
}

impl BatchInput {
    /// An object is one record, an array is a batch.
    ///
    /// # Errors
    ///
    /// [`BatchError::Structural`] for any other JSON value.
    pub fn from_value(value: Value) -> Result<Self, BatchError> {
        match value {
            Value::Object(_) => Ok(BatchInput::Single(value)),
            Value::Array(records) => Ok(BatchInput::Batch(records)),
            other => Err(BatchError::Structural(format!(
                "expected a record or an array of records, found {}",
                kind(&other)
            ))),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            BatchInput::Single(_) => 1,
            BatchInput::Batch(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_records(self) -> Vec<Value> {
        match self {
            BatchInput::Single(record) => vec![record],
            BatchInput::Batch(records) => records,
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A record that failed under the `flag` policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFailure {
    /// Position in the received input, counting filtered records.
    pub index: usize,
    pub urn: String,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub total_received: usize,
    pub filtered: usize,
    pub processed: usize,
    pub failed: usize,
    pub elapsed_micros: u64,
    /// Successful records, in input order.
    pub results: Vec<NormalizedProfile>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<RecordFailure>,
}

/// The record's `urn` when it is a non-blank string.
fn record_urn(record: &Value) -> Option<&str> {
    record
        .get("urn")
        .and_then(Value::as_str)
        .filter(|urn| !urn.trim().is_empty())
}

fn normalize_one(
    record: &Value,
    now: DateTime<Utc>,
    cfg: &NormalizeConfig,
) -> Result<NormalizedProfile, NormalizeError> {
    let metrics = MetricsSpan::start();
    let result = normalize(record, now, cfg);
    if let Some(span) = metrics {
        span.record_normalize(result.as_ref().map(|_| ()).map_err(Clone::clone));
    }
    result
}

/// Normalizes every identifiable record of `input` against one `now`.
///
/// # Errors
///
/// [`BatchError::Record`] for the first failing record when the policy is
/// [`RecordErrorPolicy::Fail`]. Under [`RecordErrorPolicy::Flag`] the batch
/// itself never fails.
pub fn run_batch(
    input: BatchInput,
    batch_cfg: &BatchConfig,
    cfg: &NormalizeConfig,
    now: DateTime<Utc>,
) -> Result<BatchReport, BatchError> {
    let start = Instant::now();
    let records = input.into_records();
    let total_received = records.len();

    let span = tracing::span!(
        Level::INFO,
        "batch.run",
        total_received,
        parallel = batch_cfg.parallel
    );
    let _guard = span.enter();

    let accepted: Vec<(usize, &str, &Value)> = records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| record_urn(record).map(|urn| (index, urn, record)))
        .collect();
    let filtered = total_received - accepted.len();

    let outcomes: Vec<Result<NormalizedProfile, NormalizeError>> = if batch_cfg.parallel {
        // rayon workers do not inherit the caller's entered span
        accepted
            .par_iter()
            .map(|(_, _, record)| span.in_scope(|| normalize_one(record, now, cfg)))
            .collect()
    } else {
        accepted
            .iter()
            .map(|(_, _, record)| normalize_one(record, now, cfg))
            .collect()
    };

    let mut results = Vec::with_capacity(outcomes.len());
    let mut errors = Vec::new();
    for ((index, urn, _), outcome) in accepted.into_iter().zip(outcomes) {
        match outcome {
            Ok(record) => results.push(record),
            Err(source) if batch_cfg.on_record_error == RecordErrorPolicy::Fail => {
                warn!(index, urn, error = %source, "batch_aborted");
                return Err(BatchError::Record {
                    index,
                    urn: urn.to_string(),
                    source,
                });
            }
            Err(err) => errors.push(RecordFailure {
                index,
                urn: urn.to_string(),
                error: err.to_string(),
            }),
        }
    }

    let elapsed_micros = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);
    let report = BatchReport {
        total_received,
        filtered,
        processed: results.len(),
        failed: errors.len(),
        elapsed_micros,
        results,
        errors,
    };
    info!(
        total_received,
        filtered,
        processed = report.processed,
        failed = report.failed,
        elapsed_micros,
        "batch_complete"
    );
    Ok(report)
}
