use crate::config::ServerConfig;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Running totals since start-up
    pub counters: Arc<Counters>,
}

impl ServerState {
    /// Create new server state
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config: Arc::new(config),
            counters: Arc::new(Counters::default()),
        }
    }
}

/// Request and record totals reported by `/debug`.
#[derive(Debug, Default)]
pub struct Counters {
    requests: AtomicU64,
    records_received: AtomicU64,
    records_filtered: AtomicU64,
    records_processed: AtomicU64,
    records_failed: AtomicU64,
}

impl Counters {
    pub fn record_request(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_batch(&self, received: usize, filtered: usize, processed: usize, failed: usize) {
        self.records_received
            .fetch_add(received as u64, Ordering::Relaxed);
        self.records_filtered
            .fetch_add(filtered as u64, Ordering::Relaxed);
        self.records_processed
            .fetch_add(processed as u64, Ordering::Relaxed);
        self.records_failed
            .fetch_add(failed as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            requests: self.requests.load(Ordering::Relaxed),
            records_received: self.records_received.load(Ordering::Relaxed),
            records_filtered: self.records_filtered.load(Ordering::Relaxed),
            records_processed: self.records_processed.load(Ordering::Relaxed),
            records_failed: self.records_failed.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CounterSnapshot {
    pub requests: u64,
    pub records_received: u64,
    pub records_filtered: u64,
    pub records_processed: u64,
    pub records_failed: u64,
}

/// Server metadata for health checks
#[derive(Debug, Serialize)]
pub struct ServerMetadata {
    pub version: String,
    pub uptime_seconds: u64,
}
