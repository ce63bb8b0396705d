//! Benchmark correlation guard.

use crate::domain::risk_management::constants::{
    CORRELATION_LOOKBACK_DAYS, CORRELATION_THRESHOLD,
};
use crate::domain::risk_management::value_objects::CorrelationCheck;

/// Flags candidates whose daily returns track the benchmark too closely.
///
/// Missing or short data is neutral: it never triggers a restriction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrelationGuard {
    lookback: usize,
    threshold: f64,
}

impl Default for CorrelationGuard {
    fn default() -> Self {
        Self::new(CORRELATION_LOOKBACK_DAYS, CORRELATION_THRESHOLD)
    }
}

impl CorrelationGuard {
    /// Create a guard. `lookback` is clamped to at least two observations.
    #[must_use]
    pub const fn new(lookback: usize, threshold: f64) -> Self {
        Self {
            lookback: if lookback < 2 { 2 } else { lookback },
            threshold,
        }
    }

    /// Required number of aligned observations.
    #[must_use]
    pub const fn lookback(&self) -> usize {
        self.lookback
    }

    /// Correlate the trailing window of both series.
    ///
    /// Series are aligned on their most recent observation. Pairs containing
    /// a non-finite value are dropped before the window is taken.
    #[must_use]
    pub fn should_reduce(&self, candidate: &[f64], benchmark: &[f64]) -> CorrelationCheck {
        if candidate.len() < self.lookback || benchmark.len() < self.lookback {
            return CorrelationCheck::neutral(candidate.len().min(benchmark.len()));
        }

        let aligned = candidate.len().min(benchmark.len());
        let pairs: Vec<(f64, f64)> = candidate[candidate.len() - aligned..]
            .iter()
            .zip(&benchmark[benchmark.len() - aligned..])
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .map(|(x, y)| (*x, *y))
            .collect();

        if pairs.len() < self.lookback {
            return CorrelationCheck::neutral(pairs.len());
        }

        let window = &pairs[pairs.len() - self.lookback..];
        let (xs, ys): (Vec<f64>, Vec<f64>) = window.iter().copied().unzip();

        match pearson(&xs, &ys) {
            Some(correlation) => CorrelationCheck {
                correlation,
                reduce: correlation > self.threshold,
                observations: window.len(),
            },
            None => CorrelationCheck::neutral(window.len()),
        }
    }
}

/// Pearson correlation coefficient.
///
/// Returns `None` for mismatched or too-short inputs and when either series
/// has zero variance.
#[must_use]
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x <= f64::EPSILON || var_y <= f64::EPSILON {
        return None;
    }
    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}
