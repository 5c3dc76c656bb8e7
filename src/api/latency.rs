//! Histogram of model evaluation time (scale + predict + inverse transform), in microseconds.

use std::sync::Mutex;
use std::time::Duration;

pub struct LatencyStats {
    inner: Mutex<hdrhistogram::Histogram<u64>>,
}

impl LatencyStats {
    /// 1us to 60s at 3 significant figures.
    pub fn new() -> Self {
        let histogram = hdrhistogram::Histogram::new_with_bounds(1, 60_000_000, 3)
            .expect("valid histogram bounds");
        Self {
            inner: Mutex::new(histogram),
        }
    }

    pub fn record(&self, d: Duration) {
        let us = d.as_micros().clamp(1, 60_000_000) as u64;
        if let Ok(mut h) = self.inner.lock() {
            let _ = h.record(us);
        }
    }

    /// (p50, p95, p99) in microseconds. None until the first sample.
    pub fn percentiles(&self) -> Option<(u64, u64, u64)> {
        let h = self.inner.lock().ok()?;
        if h.len() == 0 {
            return None;
        }
        Some((
            h.value_at_quantile(0.5),
            h.value_at_quantile(0.95),
            h.value_at_quantile(0.99),
        ))
    }

    pub fn len(&self) -> u64 {
        self.inner.lock().map(|h| h.len()).unwrap_or(0)
    }
}

impl Default for LatencyStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_has_no_percentiles() {
        let stats = LatencyStats::new();
        assert_eq!(stats.len(), 0);
        assert!(stats.percentiles().is_none());
    }

    #[test]
    fn records_samples() {
        let stats = LatencyStats::new();
        for us in [100, 200, 300, 400] {
            stats.record(Duration::from_micros(us));
        }
        assert_eq!(stats.len(), 4);
        let (p50, _, p99) = stats.percentiles().unwrap();
        assert!((190..=210).contains(&p50), "p50={p50}");
        assert!((390..=410).contains(&p99), "p99={p99}");
    }

    #[test]
    fn sub_microsecond_is_clamped_to_one() {
        let stats = LatencyStats::new();
        stats.record(Duration::from_nanos(10));
        assert_eq!(stats.len(), 1);
    }
}
