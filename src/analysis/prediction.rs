//! Prediction intervals for future view counts.
//!
//! Fits a two-parameter log-normal distribution to historical view
//! counts by maximum likelihood (location fixed at zero) and reads
//! interval bounds off the fitted quantile function. View counts are
//! strictly positive and right-skewed, which is the log-normal's
//! native territory.

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, LogNormal};

use crate::error::{BrandLensError, Result};

/// Which side(s) of the distribution the interval bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IntervalMode {
    /// One-sided floor: the next observation exceeds the lower bound
    /// with probability equal to the confidence level.
    Lower,
    /// One-sided ceiling: the next observation stays under the upper
    /// bound with probability equal to the confidence level.
    Upper,
    /// Central interval capturing the confidence level of probability
    /// mass, split evenly between the tails.
    TwoSided,
}

impl IntervalMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntervalMode::Lower => "lower",
            IntervalMode::Upper => "upper",
            IntervalMode::TwoSided => "two-sided",
        }
    }
}

impl std::fmt::Display for IntervalMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for IntervalMode {
    type Err = BrandLensError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "lower" => Ok(IntervalMode::Lower),
            "upper" => Ok(IntervalMode::Upper),
            "two-sided" => Ok(IntervalMode::TwoSided),
            other => Err(BrandLensError::InvalidInput(format!(
                "unknown interval mode '{}' (expected lower, upper, or two-sided)",
                other
            ))),
        }
    }
}

/// Log-normal parameters fit to an observation series.
///
/// `shape` is the log-space standard deviation; `scale` is the
/// exponentiated log-space mean, which is also the fitted median.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FittedLogNormal {
    shape: f64,
    scale: f64,
}

impl FittedLogNormal {
    /// Fits by maximum likelihood with the location parameter fixed
    /// at zero. Rejects empty series and series containing values
    /// outside the distribution's support.
    pub fn fit(views: &[f64]) -> Result<Self> {
        if views.is_empty() {
            return Err(BrandLensError::InvalidInput(
                "view series is empty".to_string(),
            ));
        }
        if let Some(bad) = views.iter().find(|v| !v.is_finite() || **v <= 0.0) {
            return Err(BrandLensError::InvalidInput(format!(
                "view counts must be strictly positive, got {}",
                bad
            )));
        }

        let logs: Vec<f64> = views.iter().map(|v| v.ln()).collect();
        let n = logs.len() as f64;
        let mu = logs.iter().sum::<f64>() / n;
        let variance = logs.iter().map(|l| (l - mu).powi(2)).sum::<f64>() / n;

        Ok(Self {
            shape: variance.sqrt(),
            scale: mu.exp(),
        })
    }

    /// Log-space standard deviation.
    pub fn shape(&self) -> f64 {
        self.shape
    }

    /// Fitted median.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Quantile function of the fitted distribution for an interior
    /// probability. A zero-variance fit is a point mass at the scale,
    /// so every interior quantile collapses to it.
    pub fn quantile(&self, p: f64) -> f64 {
        if self.shape == 0.0 {
            return self.scale;
        }
        // Parameters are validated at fit time, so construction only
        // fails on inputs that cannot reach this point.
        match LogNormal::new(self.scale.ln(), self.shape) {
            Ok(dist) => dist.inverse_cdf(p),
            Err(_) => f64::NAN,
        }
    }
}

/// A prediction interval for the next observation.
///
/// One bound is infinite in the one-sided modes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionInterval {
    pub lower: f64,
    pub upper: f64,
    pub confidence_level: f64,
    pub mode: IntervalMode,
}

/// Estimates prediction intervals for the next view count of a
/// channel given its recent history.
pub struct ViewIntervalEstimator {
    confidence_level: f64,
    mode: IntervalMode,
}

impl Default for ViewIntervalEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewIntervalEstimator {
    pub fn new() -> Self {
        Self {
            confidence_level: 0.90,
            mode: IntervalMode::TwoSided,
        }
    }

    pub fn with_config(confidence_level: f64, mode: IntervalMode) -> Self {
        Self {
            confidence_level,
            mode,
        }
    }

    /// Fits the series and returns the interval for the configured
    /// confidence level and mode.
    pub fn estimate(&self, views: &[f64]) -> Result<PredictionInterval> {
        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(BrandLensError::InvalidInput(format!(
                "confidence level must be strictly between 0 and 1, got {}",
                self.confidence_level
            )));
        }

        let fitted = FittedLogNormal::fit(views)?;
        let alpha = 1.0 - self.confidence_level;

        let (lower, upper) = match self.mode {
            IntervalMode::Lower => (fitted.quantile(alpha), f64::INFINITY),
            IntervalMode::Upper => (
                f64::NEG_INFINITY,
                fitted.quantile(self.confidence_level),
            ),
            IntervalMode::TwoSided => (
                fitted.quantile(alpha / 2.0),
                fitted.quantile(1.0 - alpha / 2.0),
            ),
        };

        Ok(PredictionInterval {
            lower,
            upper,
            confidence_level: self.confidence_level,
            mode: self.mode,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_series_rejected() {
        let estimator = ViewIntervalEstimator::new();
        let result = estimator.estimate(&[]);
        assert!(matches!(result, Err(BrandLensError::InvalidInput(_))));
    }

    #[test]
    fn test_zero_view_count_rejected() {
        let estimator = ViewIntervalEstimator::new();
        let result = estimator.estimate(&[1000.0, 0.0, 2000.0]);
        assert!(matches!(result, Err(BrandLensError::InvalidInput(_))));
    }

    #[test]
    fn test_negative_view_count_rejected() {
        let estimator = ViewIntervalEstimator::new();
        let result = estimator.estimate(&[1000.0, -5.0]);
        assert!(matches!(result, Err(BrandLensError::InvalidInput(_))));
    }

    #[test]
    fn test_nan_view_count_rejected() {
        let estimator = ViewIntervalEstimator::new();
        let result = estimator.estimate(&[1000.0, f64::NAN]);
        assert!(matches!(result, Err(BrandLensError::InvalidInput(_))));
    }

    #[test]
    fn test_confidence_level_must_be_interior() {
        for bad in [0.0, 1.0, 1.5, -0.3] {
            let estimator = ViewIntervalEstimator::with_config(bad, IntervalMode::TwoSided);
            let result = estimator.estimate(&[100.0, 200.0, 300.0]);
            assert!(matches!(result, Err(BrandLensError::InvalidInput(_))));
        }
    }

    #[test]
    fn test_fit_recovers_log_space_parameters() {
        let views = [std::f64::consts::E.powi(1), std::f64::consts::E.powi(3)];
        let fitted = FittedLogNormal::fit(&views).unwrap();
        // Log-space mean is 2, so the median is e^2; the biased MLE
        // standard deviation of [1, 3] is 1.
        assert!((fitted.scale() - std::f64::consts::E.powi(2)).abs() < 1e-9);
        assert!((fitted.shape() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_constant_series_collapses_to_point() {
        let estimator = ViewIntervalEstimator::with_config(0.90, IntervalMode::TwoSided);
        let interval = estimator
            .estimate(&[1000.0, 1000.0, 1000.0, 1000.0])
            .unwrap();
        assert!((interval.lower - 1000.0).abs() < 1e-6);
        assert!((interval.upper - 1000.0).abs() < 1e-6);
    }

    #[test]
    fn test_lower_mode_is_unbounded_above() {
        let estimator = ViewIntervalEstimator::with_config(0.90, IntervalMode::Lower);
        let views = [500.0, 1000.0, 2000.0, 4000.0, 8000.0];
        let interval = estimator.estimate(&views).unwrap();
        assert_eq!(interval.upper, f64::INFINITY);
        assert!(interval.lower.is_finite());
        assert!(interval.lower > 0.0);
        // Geometric series, so the fitted median is the middle element.
        let fitted = FittedLogNormal::fit(&views).unwrap();
        assert!((fitted.scale() - 2000.0).abs() < 1e-9);
        assert!(interval.lower < fitted.scale());
    }

    #[test]
    fn test_upper_mode_is_unbounded_below() {
        let estimator = ViewIntervalEstimator::with_config(0.90, IntervalMode::Upper);
        let interval = estimator
            .estimate(&[500.0, 1000.0, 2000.0, 4000.0, 8000.0])
            .unwrap();
        assert_eq!(interval.lower, f64::NEG_INFINITY);
        assert!(interval.upper.is_finite());
        assert!(interval.upper > 0.0);
    }

    #[test]
    fn test_two_sided_bounds_are_ordered() {
        let estimator = ViewIntervalEstimator::new();
        let interval = estimator
            .estimate(&[120.0, 340.0, 560.0, 780.0, 910.0])
            .unwrap();
        assert!(interval.lower <= interval.upper);
        assert!(interval.lower > 0.0);
    }

    #[test]
    fn test_higher_confidence_widens_interval() {
        let views = [500.0, 1000.0, 2000.0, 4000.0, 8000.0];
        let narrow = ViewIntervalEstimator::with_config(0.80, IntervalMode::TwoSided)
            .estimate(&views)
            .unwrap();
        let wide = ViewIntervalEstimator::with_config(0.99, IntervalMode::TwoSided)
            .estimate(&views)
            .unwrap();
        assert!(wide.lower < narrow.lower);
        assert!(wide.upper > narrow.upper);
    }

    #[test]
    fn test_estimate_is_deterministic() {
        let estimator = ViewIntervalEstimator::new();
        let views = [321.0, 654.0, 987.0, 1234.0];
        let first = estimator.estimate(&views).unwrap();
        let second = estimator.estimate(&views).unwrap();
        assert_eq!(first.lower.to_bits(), second.lower.to_bits());
        assert_eq!(first.upper.to_bits(), second.upper.to_bits());
    }

    #[test]
    fn test_interval_mode_parses_from_str() {
        assert_eq!("lower".parse::<IntervalMode>().unwrap(), IntervalMode::Lower);
        assert_eq!("upper".parse::<IntervalMode>().unwrap(), IntervalMode::Upper);
        assert_eq!(
            "two-sided".parse::<IntervalMode>().unwrap(),
            IntervalMode::TwoSided
        );
        assert!("median".parse::<IntervalMode>().is_err());
    }

    #[test]
    fn test_interval_mode_round_trips_as_str() {
        for mode in [IntervalMode::Lower, IntervalMode::Upper, IntervalMode::TwoSided] {
            assert_eq!(mode.as_str().parse::<IntervalMode>().unwrap(), mode);
        }
    }
}
