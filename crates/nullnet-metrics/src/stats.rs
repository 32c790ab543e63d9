//! Z-scores of observed metrics against null-model distributions.
//!
//! Spread is the **population** standard deviation (divide by `N`, not
//! `N - 1`).
//!
//! Both moments are accumulated in two passes (mean first, then squared
//! deviations from it) to avoid the cancellation of the one-pass
//! `E[x²] - E[x]²` form.

use serde::Serialize;

use crate::error::AnalysisError;

/// Arithmetic mean; 0.0 for an empty slice.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation; 0.0 for an empty slice.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn population_std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let sum_sq: f64 = values.iter().map(|x| (x - m) * (x - m)).sum();
    (sum_sq / values.len() as f64).sqrt()
}

/// Standard score of `observed` against `distribution`.
///
/// # Errors
///
/// Returns [`AnalysisError::DegenerateDistribution`] when the distribution
/// is empty or has zero spread (every value equal, which includes a single
/// sample).
#[allow(clippy::float_cmp)]
pub fn z_score(observed: f64, distribution: &[f64]) -> Result<f64, AnalysisError> {
    let degenerate = || AnalysisError::DegenerateDistribution {
        len: distribution.len(),
    };

    let Some(&first) = distribution.first() else {
        return Err(degenerate());
    };
    if distribution.iter().all(|&x| x == first) {
        return Err(degenerate());
    }

    let sd = population_std(distribution);
    if !(sd.is_finite() && sd > 0.0) {
        return Err(degenerate());
    }

    Ok((observed - mean(distribution)) / sd)
}

// ---------------------------------------------------------------------------
// ZScore
// ---------------------------------------------------------------------------

/// Outcome of one metric's z-score in a result record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum ZScore {
    /// A finite z-score.
    Defined(f64),
    /// The null distribution had zero spread.
    Degenerate,
    /// No null model was run (empty graph).
    NotComputed,
}

impl ZScore {
    /// Compute a [`ZScore`], folding a degenerate distribution into
    /// [`ZScore::Degenerate`].
    #[must_use]
    pub fn against(observed: f64, distribution: &[f64]) -> Self {
        match z_score(observed, distribution) {
            Ok(z) => Self::Defined(z),
            Err(_) => Self::Degenerate,
        }
    }

    /// The numeric value, if defined.
    #[must_use]
    pub const fn value(self) -> Option<f64> {
        match self {
            Self::Defined(z) => Some(z),
            Self::Degenerate | Self::NotComputed => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
