//! Streaming trailing-window statistics.
//!
//! A fixed-size window over the most recent observations. Mean and sample
//! standard deviation are only reported once the window is full; until then
//! the statistic is undefined, never approximated from partial history.

use statrs::statistics::Statistics;
use std::collections::VecDeque;

/// Trailing-window accumulator for mean and sample standard deviation.
pub struct RollingStats {
    /// Window size in observations.
    window: usize,
    /// Most recent observations, oldest first.
    values: VecDeque<f64>,
}

impl RollingStats {
    /// Create an accumulator for the given window size.
    pub fn new(window: usize) -> Self {
        Self {
            window,
            values: VecDeque::with_capacity(window),
        }
    }

    /// Add an observation, evicting the oldest if the window is full.
    pub fn push(&mut self, value: f64) {
        if self.values.len() >= self.window {
            self.values.pop_front();
        }
        self.values.push_back(value);
    }

    /// Whether the window holds `window` observations.
    pub fn is_full(&self) -> bool {
        self.values.len() >= self.window
    }

    /// Number of observations currently held.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the window holds no observations.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Trailing-window mean; `None` until the window is full.
    pub fn mean(&self) -> Option<f64> {
        if !self.is_full() {
            return None;
        }
        Some(self.values.iter().mean())
    }

    /// Trailing-window sample standard deviation (n-1 denominator);
    /// `None` until the window is full.
    pub fn std_dev(&self) -> Option<f64> {
        if !self.is_full() || self.window < 2 {
            return None;
        }
        Some(self.values.iter().std_dev())
    }

    /// Discard all observations.
    pub fn clear(&mut self) {
        self.values.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_not_full_is_undefined() {
        let mut stats = RollingStats::new(3);
        stats.push(100.0);
        stats.push(101.0);
        assert!(!stats.is_full());
        assert!(stats.mean().is_none());
        assert!(stats.std_dev().is_none());
    }

    #[test]
    fn test_mean_when_full() {
        let mut stats = RollingStats::new(3);
        for v in [100.0, 101.0, 99.0] {
            stats.push(v);
        }
        assert_relative_eq!(stats.mean().unwrap(), 100.0);
    }

    #[test]
    fn test_sample_std_dev() {
        let mut stats = RollingStats::new(3);
        for v in [1.0, 2.0, 3.0] {
            stats.push(v);
        }
        // Sample variance: ((1-2)^2 + 0 + (3-2)^2) / (3-1) = 1.0
        assert_relative_eq!(stats.std_dev().unwrap(), 1.0);
    }

    #[test]
    fn test_window_evicts_oldest() {
        let mut stats = RollingStats::new(3);
        for v in [100.0, 101.0, 99.0, 102.0] {
            stats.push(v);
        }
        assert_eq!(stats.len(), 3);
        // Window is now [101, 99, 102]
        assert_relative_eq!(stats.mean().unwrap(), (101.0 + 99.0 + 102.0) / 3.0);
    }

    #[test]
    fn test_constant_values_exact_zero_std() {
        let mut stats = RollingStats::new(5);
        for _ in 0..5 {
            stats.push(100.0);
        }
        assert_eq!(stats.std_dev().unwrap(), 0.0);
    }

    #[test]
    fn test_clear() {
        let mut stats = RollingStats::new(2);
        stats.push(1.0);
        stats.push(2.0);
        stats.clear();
        assert!(stats.is_empty());
        assert!(stats.mean().is_none());
    }
}
