use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub contexts_loaded: u64,
    pub checks_run: u64,
    pub checks_failed: u64,
    pub issues_critical: u64,
    pub issues_major: u64,
    pub issues_minor: u64,
    pub semantic_calls: u64,
    pub semantic_failures: u64,
}

pub trait Metrics: Send + Sync {
    fn inc_context_loaded(&self);
    fn inc_check_run(&self);
    fn inc_check_failed(&self);
    fn record_issue(&self, severity: crate::domain::Severity);
    fn inc_semantic_call(&self);
    fn inc_semantic_failure(&self);
    fn snapshot(&self) -> MetricsSnapshot;
}

pub struct InMemoryMetrics {
    contexts_loaded: AtomicU64,
    checks_run: AtomicU64,
    checks_failed: AtomicU64,
    issues_critical: AtomicU64,
    issues_major: AtomicU64,
    issues_minor: AtomicU64,
    semantic_calls: AtomicU64,
    semantic_failures: AtomicU64,
}

impl InMemoryMetrics {
    pub fn new() -> Self {
        Self {
            contexts_loaded: AtomicU64::new(0),
            checks_run: AtomicU64::new(0),
            checks_failed: AtomicU64::new(0),
            issues_critical: AtomicU64::new(0),
            issues_major: AtomicU64::new(0),
            issues_minor: AtomicU64::new(0),
            semantic_calls: AtomicU64::new(0),
            semantic_failures: AtomicU64::new(0),
        }
    }
}

impl Default for InMemoryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics for InMemoryMetrics {
    fn inc_context_loaded(&self) {
        self.contexts_loaded.fetch_add(1, Ordering::Relaxed);
    }
    fn inc_check_run(&self) {
        self.checks_run.fetch_add(1, Ordering::Relaxed);
    }
    fn inc_check_failed(&self) {
        self.checks_failed.fetch_add(1, Ordering::Relaxed);
    }
    fn record_issue(&self, severity: crate::domain::Severity) {
        match severity {
            crate::domain::Severity::Critical => {
                self.issues_critical.fetch_add(1, Ordering::Relaxed);
            }
            crate::domain::Severity::Major => {
                self.issues_major.fetch_add(1, Ordering::Relaxed);
            }
            crate::domain::Severity::Minor => {
                self.issues_minor.fetch_add(1, Ordering::Relaxed);
            }
        }
    }
    fn inc_semantic_call(&self) {
        self.semantic_calls.fetch_add(1, Ordering::Relaxed);
    }
    fn inc_semantic_failure(&self) {
        self.semantic_failures.fetch_add(1, Ordering::Relaxed);
    }
    fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            contexts_loaded: self.contexts_loaded.load(Ordering::Relaxed),
            checks_run: self.checks_run.load(Ordering::Relaxed),
            checks_failed: self.checks_failed.load(Ordering::Relaxed),
            issues_critical: self.issues_critical.load(Ordering::Relaxed),
            issues_major: self.issues_major.load(Ordering::Relaxed),
            issues_minor: self.issues_minor.load(Ordering::Relaxed),
            semantic_calls: self.semantic_calls.load(Ordering::Relaxed),
            semantic_failures: self.semantic_failures.load(Ordering::Relaxed),
        }
    }
}
