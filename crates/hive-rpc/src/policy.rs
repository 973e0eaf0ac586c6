//! Endpoint rotation and per-endpoint bookkeeping.
//!
//! The pool asks a [`RotationPolicy`] for the order to try endpoints in and
//! reports outcomes to a [`StatsRecorder`]. The two are independent: the
//! default policy ignores the stats entirely.

use serde::Serialize;

/// Success/failure counters for one endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct NodeStats {
    /// Calls this endpoint answered.
    pub success_count: u64,
    /// Attempts this endpoint failed.
    pub failure_count: u64,
    /// `success_count / (success_count + failure_count)`, 0 before any call.
    pub rolling_avg: f64,
}

impl NodeStats {
    fn recompute(&mut self) {
        let total = self.success_count + self.failure_count;
        self.rolling_avg = if total == 0 {
            0.0
        } else {
            self.success_count as f64 / total as f64
        };
    }
}

/// Per-endpoint counters, indexed like the endpoint list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsRecorder {
    stats: Vec<NodeStats>,
}

impl StatsRecorder {
    /// Zeroed counters for `endpoints` endpoints.
    pub fn new(endpoints: usize) -> Self {
        Self {
            stats: vec![NodeStats::default(); endpoints],
        }
    }

    /// Count a success; out-of-range indices are ignored.
    pub fn record_success(&mut self, index: usize) {
        if let Some(s) = self.stats.get_mut(index) {
            s.success_count += 1;
            s.recompute();
        }
    }

    /// Count a failure; out-of-range indices are ignored.
    pub fn record_failure(&mut self, index: usize) {
        if let Some(s) = self.stats.get_mut(index) {
            s.failure_count += 1;
            s.recompute();
        }
    }

    /// Copy of the current counters.
    pub fn snapshot(&self) -> Vec<NodeStats> {
        self.stats.clone()
    }

    /// Borrow the counters in endpoint order.
    pub fn as_slice(&self) -> &[NodeStats] {
        &self.stats
    }
}

/// Decides which endpoints a call tries, and in what order.
pub trait RotationPolicy: Send {
    /// Endpoint indices to attempt for one call. Each index should appear at
    /// most once.
    fn order(&self, endpoints: usize, stats: &[NodeStats]) -> Vec<usize>;

    /// Called once per call with the endpoint that succeeded.
    fn on_success(&mut self, index: usize);

    /// Endpoint the next call starts from.
    fn current_index(&self) -> usize;
}

/// Round-robin starting from the last endpoint that succeeded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StickyRoundRobin {
    current: usize,
}

impl StickyRoundRobin {
    /// Start from the first endpoint.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from endpoint `index`.
    pub fn starting_at(index: usize) -> Self {
        Self { current: index }
    }
}

impl RotationPolicy for StickyRoundRobin {
    fn order(&self, endpoints: usize, _stats: &[NodeStats]) -> Vec<usize> {
        if endpoints == 0 {
            return Vec::new();
        }
        let start = self.current % endpoints;
        (0..endpoints).map(|i| (start + i) % endpoints).collect()
    }

    fn on_success(&mut self, index: usize) {
        self.current = index;
    }

    fn current_index(&self) -> usize {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_wraps_from_current() {
        let policy = StickyRoundRobin::starting_at(2);
        assert_eq!(policy.order(4, &[]), vec![2, 3, 0, 1]);
        assert_eq!(StickyRoundRobin::new().order(3, &[]), vec![0, 1, 2]);
        assert!(policy.order(0, &[]).is_empty());
    }

    #[test]
    fn test_order_ignores_stats() {
        let mut stats = StatsRecorder::new(3);
        stats.record_failure(1);
        stats.record_success(2);
        stats.record_success(2);
        let policy = StickyRoundRobin::starting_at(1);
        assert_eq!(policy.order(3, stats.as_slice()), vec![1, 2, 0]);
    }

    #[test]
    fn test_rolling_avg() {
        let mut stats = StatsRecorder::new(2);
        stats.record_success(0);
        stats.record_failure(0);
        stats.record_failure(0);
        stats.record_success(0);
        let s = stats.snapshot();
        assert_eq!(s[0].success_count, 2);
        assert_eq!(s[0].failure_count, 2);
        assert!((s[0].rolling_avg - 0.5).abs() < f64::EPSILON);
        assert_eq!(s[1], NodeStats::default());
    }

    #[test]
    fn test_out_of_range_index_is_ignored() {
        let mut stats = StatsRecorder::new(1);
        stats.record_failure(5);
        assert_eq!(stats.snapshot(), vec![NodeStats::default()]);
    }
}
