// ABOUTME: Timing helpers for engine operations such as tree indexing
// ABOUTME: PerfTimer records elapsed time on a span and warns about slow runs

use std::time::{Duration, Instant};
use tracing::{Level, Span, field, span, warn};

/// Timer guard that records elapsed time on its span when dropped
pub struct PerfTimer {
    span: Span,
    start: Instant,
    operation: &'static str,
    warn_threshold: Option<Duration>,
}

impl PerfTimer {
    pub fn new(operation: &'static str) -> Self {
        let span = span!(
            Level::DEBUG,
            "perf_timer",
            operation = operation,
            items = field::Empty,
            elapsed_ms = field::Empty
        );

        Self {
            span,
            start: Instant::now(),
            operation,
            warn_threshold: None,
        }
    }

    /// Operations slower than `threshold` log a warning when the timer drops
    pub fn with_warn_threshold(mut self, threshold: Duration) -> Self {
        self.warn_threshold = Some(threshold);
        self
    }

    /// Number of items the timed operation processed
    pub fn record_items(&self, items: usize) {
        self.span.record("items", items);
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn span(&self) -> &Span {
        &self.span
    }
}

impl Drop for PerfTimer {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        let elapsed_ms = elapsed.as_secs_f64() * 1000.0;
        self.span.record("elapsed_ms", elapsed_ms);

        if let Some(threshold) = self.warn_threshold
            && elapsed > threshold
        {
            warn!(
                operation = self.operation,
                elapsed_ms = elapsed_ms,
                threshold_ms = threshold.as_secs_f64() * 1000.0,
                "Slow operation detected"
            );
        }
    }
}

/// Time a block with a [`PerfTimer`]
#[macro_export]
macro_rules! timed {
    ($name:expr, $code:block) => {{
        let _timer = $crate::performance::PerfTimer::new($name);
        $code
    }};
    ($name:expr, warn_threshold: $threshold:expr, $code:block) => {{
        let _timer = $crate::performance::PerfTimer::new($name).with_warn_threshold($threshold);
        $code
    }};
}
