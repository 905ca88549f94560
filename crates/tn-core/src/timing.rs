//! Opt-in query timing.
//!
//! Measurement is off unless [`enable_timing`] was called or the
//! `TRANSITNET_TIMING` environment variable is set. Each finished query adds
//! to per-kind counters that [`log_summary`] reports at debug level.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

pub const TIMING_ENV: &str = "TRANSITNET_TIMING";

static ENABLED: AtomicBool = AtomicBool::new(false);

pub fn enable_timing() {
    ENABLED.store(true, Ordering::Relaxed);
}

pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed) || std::env::var_os(TIMING_ENV).is_some()
}

/// What kind of query is being timed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    Route,
    SpanningTree,
}

impl QueryKind {
    pub const ALL: [QueryKind; 2] = [QueryKind::Route, QueryKind::SpanningTree];

    fn label(self) -> &'static str {
        match self {
            QueryKind::Route => "route",
            QueryKind::SpanningTree => "spanning_tree",
        }
    }

    fn counters(self) -> &'static Counters {
        match self {
            QueryKind::Route => &ROUTE,
            QueryKind::SpanningTree => &SPANNING_TREE,
        }
    }
}

struct Counters {
    calls: AtomicU64,
    total_ns: AtomicU64,
    max_ns: AtomicU64,
}

impl Counters {
    const fn new() -> Self {
        Self {
            calls: AtomicU64::new(0),
            total_ns: AtomicU64::new(0),
            max_ns: AtomicU64::new(0),
        }
    }
}

static ROUTE: Counters = Counters::new();
static SPANNING_TREE: Counters = Counters::new();

/// Totals for one query kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueryStats {
    pub calls: u64,
    pub total: Duration,
    pub slowest: Duration,
}

impl QueryStats {
    pub fn average(&self) -> Duration {
        let nanos = self
            .total
            .as_nanos()
            .checked_div(u128::from(self.calls))
            .unwrap_or(0);
        Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
    }
}

/// Stopwatch for a single query; does nothing when timing is off.
#[must_use = "call finish() to record the measurement"]
pub struct QueryTimer {
    kind: QueryKind,
    start: Option<Instant>,
}

impl QueryTimer {
    pub fn start(kind: QueryKind) -> Self {
        Self {
            kind,
            start: is_enabled().then(Instant::now),
        }
    }

    /// Record the elapsed time under the query kind and return it.
    pub fn finish(self) -> Option<Duration> {
        let elapsed = self.start?.elapsed();
        record(self.kind, elapsed);
        tracing::debug!(
            query = self.kind.label(),
            elapsed_us = elapsed.as_micros() as u64,
            "query timed"
        );
        Some(elapsed)
    }
}

pub fn record(kind: QueryKind, elapsed: Duration) {
    let ns = u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX);
    let counters = kind.counters();
    counters.calls.fetch_add(1, Ordering::Relaxed);
    counters.total_ns.fetch_add(ns, Ordering::Relaxed);
    counters.max_ns.fetch_max(ns, Ordering::Relaxed);
}

pub fn stats(kind: QueryKind) -> QueryStats {
    let counters = kind.counters();
    QueryStats {
        calls: counters.calls.load(Ordering::Relaxed),
        total: Duration::from_nanos(counters.total_ns.load(Ordering::Relaxed)),
        slowest: Duration::from_nanos(counters.max_ns.load(Ordering::Relaxed)),
    }
}

pub fn reset() {
    for kind in QueryKind::ALL {
        let counters = kind.counters();
        counters.calls.store(0, Ordering::Relaxed);
        counters.total_ns.store(0, Ordering::Relaxed);
        counters.max_ns.store(0, Ordering::Relaxed);
    }
}

/// Debug-level line per query kind that ran at least once.
pub fn log_summary() {
    if !is_enabled() {
        return;
    }
    for kind in QueryKind::ALL {
        let s = stats(kind);
        if s.calls == 0 {
            continue;
        }
        tracing::debug!(
            query = kind.label(),
            calls = s.calls,
            total_ms = s.total.as_secs_f64() * 1e3,
            avg_us = s.average().as_micros() as u64,
            slowest_us = s.slowest.as_micros() as u64,
            "query timing summary"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_accumulate() {
        reset();
        record(QueryKind::SpanningTree, Duration::from_millis(4));
        record(QueryKind::SpanningTree, Duration::from_millis(2));
        let s = stats(QueryKind::SpanningTree);
        assert_eq!(s.calls, 2);
        assert_eq!(s.total, Duration::from_millis(6));
        assert_eq!(s.slowest, Duration::from_millis(4));
        assert_eq!(s.average(), Duration::from_millis(3));
    }

    #[test]
    fn empty_stats_average_is_zero() {
        assert_eq!(QueryStats::default().average(), Duration::ZERO);
    }

    #[test]
    fn average_handles_call_counts_past_u32() {
        let calls = u64::from(u32::MAX) + 1;
        let stats = QueryStats {
            calls,
            total: Duration::from_nanos(calls * 3),
            slowest: Duration::from_nanos(5),
        };
        assert_eq!(stats.average(), Duration::from_nanos(3));
    }

    #[test]
    fn enabled_timer_measures() {
        enable_timing();
        let elapsed = QueryTimer::start(QueryKind::Route).finish();
        assert!(elapsed.is_some());
    }
}
