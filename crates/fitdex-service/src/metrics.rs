//! Prometheus metrics for the cache layer.
//!
//! Recorded through the `metrics` facade; nothing is exported unless the
//! binary installs a recorder.

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use std::time::Duration;

/// Metric names for the exercise cache layer.
pub mod names {
    /// Requests answered from the cache.
    pub const CACHE_HITS_TOTAL: &str = "fitdex_cache_hits_total";
    /// Requests that needed the remote source.
    pub const CACHE_MISSES_TOTAL: &str = "fitdex_cache_misses_total";
    /// Queries sent to the remote source, failed ones included.
    pub const REMOTE_QUERIES_TOTAL: &str = "fitdex_remote_queries_total";
    /// Remote queries that failed.
    pub const REMOTE_ERRORS_TOTAL: &str = "fitdex_remote_errors_total";
    /// Remote query duration in seconds.
    pub const REMOTE_QUERY_DURATION_SECONDS: &str = "fitdex_remote_query_duration_seconds";
    /// Entries currently stored in the cache.
    pub const CACHE_ENTRIES: &str = "fitdex_cache_entries";
}

/// Register all metric descriptions.
pub fn register_metrics() {
    describe_counter!(
        names::CACHE_HITS_TOTAL,
        "Total number of requests served from the cache"
    );
    describe_counter!(
        names::CACHE_MISSES_TOTAL,
        "Total number of requests that missed the cache"
    );
    describe_counter!(
        names::REMOTE_QUERIES_TOTAL,
        "Total number of queries sent to the exercise source, including failed ones"
    );
    describe_counter!(
        names::REMOTE_ERRORS_TOTAL,
        "Total number of failed exercise source queries"
    );
    describe_histogram!(
        names::REMOTE_QUERY_DURATION_SECONDS,
        "Exercise source query duration in seconds"
    );
    describe_gauge!(
        names::CACHE_ENTRIES,
        "Current number of cached query results"
    );
}

/// Cache metrics recorder.
#[derive(Clone)]
pub struct CacheMetrics;

impl CacheMetrics {
    /// Record a cache hit.
    pub fn hit(operation: &'static str) {
        counter!(names::CACHE_HITS_TOTAL, "operation" => operation).increment(1);
    }

    /// Record a cache miss.
    pub fn miss(operation: &'static str) {
        counter!(names::CACHE_MISSES_TOTAL, "operation" => operation).increment(1);
    }

    /// Record a query about to be sent to the source.
    pub fn remote_query(operation: &'static str, source: &'static str) {
        counter!(
            names::REMOTE_QUERIES_TOTAL,
            "operation" => operation,
            "source" => source
        )
        .increment(1);
    }

    /// Record how long a remote query took, whatever its outcome.
    pub fn remote_latency(operation: &'static str, source: &'static str, duration: Duration) {
        histogram!(
            names::REMOTE_QUERY_DURATION_SECONDS,
            "operation" => operation,
            "source" => source
        )
        .record(duration.as_secs_f64());
    }

    /// Record a failed remote query.
    pub fn remote_error(operation: &'static str, error_code: &'static str) {
        counter!(
            names::REMOTE_ERRORS_TOTAL,
            "operation" => operation,
            "error_code" => error_code
        )
        .increment(1);
    }

    /// Update the stored-entries gauge.
    #[allow(clippy::cast_precision_loss)]
    pub fn entries(count: usize) {
        gauge!(names::CACHE_ENTRIES).set(count as f64);
    }
}
