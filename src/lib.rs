//! Workspace umbrella crate for profile normalization.
//!
//! This crate wraps the pure single-record normalizer with the plumbing a
//! caller needs to use it on real exports: batch input handling, a failure
//! policy, YAML configuration and an optional metrics observer.

pub use normalize::{
    ConfigError, CurrentPosition, EducationEntry, ExperienceGroup, Job, LocaleLanguage,
    NormalizeConfig, NormalizeError, NormalizedProfile, PartialDate, Profile,
    UNKNOWN_YEARS_OF_EXPERIENCE, normalize, normalize_profile,
};

mod batch;
pub mod config;

pub use batch::{
    BatchConfig, BatchError, BatchInput, BatchReport, RecordErrorPolicy, RecordFailure, run_batch,
};
pub use config::{AppConfig, ConfigLoadError, load_config_from_file, load_config_from_str};

use std::sync::{Arc, OnceLock, RwLock};
use std::time::{Duration, Instant};

/// Metrics observer for normalized records.
pub trait BatchMetrics: Send + Sync {
    fn record_normalize(&self, latency: Duration, result: Result<(), NormalizeError>);
}

/// Install or clear the global batch metrics recorder.
pub fn set_batch_metrics(recorder: Option<Arc<dyn BatchMetrics>>) {
    let mut guard = metrics_lock()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn BatchMetrics>>> {
    static METRICS: OnceLock<RwLock<Option<Arc<dyn BatchMetrics>>>> = OnceLock::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

fn metrics_recorder() -> Option<Arc<dyn BatchMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

pub(crate) struct MetricsSpan {
    recorder: Arc<dyn BatchMetrics>,
    start: Instant,
}

impl MetricsSpan {
    pub(crate) fn start() -> Option<Self> {
        metrics_recorder().map(|recorder| Self {
            recorder,
            start: Instant::now(),
        })
    }

    pub(crate) fn record_normalize(self, result: Result<(), NormalizeError>) {
        self.recorder.record_normalize(self.start.elapsed(), result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use serde_json::json;
    use std::sync::Mutex;

    fn fixed_now() -> DateTime<Utc> {
        let Some(now) = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).single() else {
            panic!("invalid timestamp components");
        };
        now
    }

    #[derive(Default)]
    struct CountingMetrics {
        events: Mutex<Vec<&'static str>>,
    }

    impl CountingMetrics {
        fn snapshot(&self) -> Vec<&'static str> {
            self.events.lock().unwrap().clone()
        }
    }

    impl BatchMetrics for CountingMetrics {
        fn record_normalize(&self, _latency: Duration, result: Result<(), NormalizeError>) {
            let label = if result.is_ok() {
                "normalize_ok"
            } else {
                "normalize_err"
            };
            self.events.lock().unwrap().push(label);
        }
    }

    #[test]
    fn metrics_recorder_tracks_record_outcomes() {
        let metrics = Arc::new(CountingMetrics::default());
        set_batch_metrics(Some(metrics.clone()));

        let input = BatchInput::from_value(json!([
            {"urn": "metrics-ok"},
            {"urn": "metrics-err", "username": "%%"},
            {"headline": "filtered before normalization"}
        ]))
        .unwrap();
        let batch_cfg = BatchConfig {
            parallel: false,
            ..Default::default()
        };
        let report = run_batch(input, &batch_cfg, &NormalizeConfig::default(), fixed_now())
            .expect("flag policy keeps the batch");

        set_batch_metrics(None);

        assert_eq!(report.processed, 1);
        let events = metrics.snapshot();
        assert!(events.contains(&"normalize_ok"));
        assert!(events.contains(&"normalize_err"));
    }
}
