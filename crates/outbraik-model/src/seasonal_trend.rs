//! The shipped model: least-squares trend plus seasonal offsets.

use outbraik_types::{GroupError, Series};
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::model::{FittedModel, ForecastModel, Prediction};

/// Interval widths below this residual scale collapse to zero: the model
/// reproduced the series exactly.
const PERFECT_FIT_EPS: f64 = 1e-10;

/// Configuration for [`SeasonalTrendModel`].
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    /// Credible-interval mass, e.g. `0.95` for a 95% interval.
    pub confidence_level: f64,
    /// Seasonal period in observations (12 for monthly data with a yearly
    /// cycle). The seasonal component engages only when the series covers at
    /// least two full periods.
    pub season_length: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            confidence_level: 0.95,
            season_length: 12,
        }
    }
}

/// Least-squares linear trend with additive seasonal offsets.
///
/// The trend is ordinary least squares over the observation index. When
/// enough history exists, per-phase means of the detrended series form the
/// seasonal component (the non-daily seasonal structure of the contract).
/// Credible intervals scale the residual standard error by a Student's t
/// quantile, widening with distance from the training window.
#[derive(Debug, Clone, Default)]
pub struct SeasonalTrendModel {
    config: ModelConfig,
}

impl SeasonalTrendModel {
    /// Creates a model with the given configuration.
    #[must_use]
    pub const fn new(config: ModelConfig) -> Self {
        Self { config }
    }

    /// Returns the model configuration.
    #[must_use]
    pub const fn config(&self) -> &ModelConfig {
        &self.config
    }
}

impl ForecastModel for SeasonalTrendModel {
    type Fitted = FittedSeasonalTrend;

    fn min_observations(&self) -> usize {
        // Two parameters plus one residual degree of freedom.
        3
    }

    fn fit(&self, series: &Series) -> Result<FittedSeasonalTrend, GroupError> {
        let y = series.values();
        let n = y.len();
        if n < self.min_observations() {
            return Err(GroupError::InsufficientData {
                required: self.min_observations(),
                actual: n,
            });
        }
        if y.iter().any(|v| !v.is_finite()) {
            return Err(fit_failed("series contains non-finite values"));
        }
        if is_constant(y) {
            return Err(fit_failed(
                "series is constant; no trend or seasonal structure to fit",
            ));
        }
        let confidence = self.config.confidence_level;
        if confidence <= 0.0 || confidence >= 1.0 {
            return Err(fit_failed(&format!(
                "confidence level {confidence} is outside (0, 1)"
            )));
        }

        // Trend: OLS of value on observation index.
        let nf = n as f64;
        let x_mean = (nf - 1.0) / 2.0;
        let y_mean = y.iter().sum::<f64>() / nf;
        let mut sxx = 0.0;
        let mut sxy = 0.0;
        for (i, &value) in y.iter().enumerate() {
            let dx = i as f64 - x_mean;
            sxx += dx * dx;
            sxy += dx * (value - y_mean);
        }
        let slope = sxy / sxx;
        let intercept = y_mean - slope * x_mean;

        let detrended: Vec<f64> = y
            .iter()
            .enumerate()
            .map(|(i, &value)| value - (intercept + slope * i as f64))
            .collect();

        // Seasonal offsets: per-phase means of the detrended series, centered
        // so the component carries no level of its own.
        let period = self.config.season_length;
        let seasonal = if period >= 2 && n >= 2 * period {
            let mut sums = vec![0.0; period];
            let mut counts = vec![0usize; period];
            for (i, &r) in detrended.iter().enumerate() {
                sums[i % period] += r;
                counts[i % period] += 1;
            }
            let mut offsets: Vec<f64> = sums
                .iter()
                .zip(&counts)
                .map(|(&s, &c)| if c > 0 { s / c as f64 } else { 0.0 })
                .collect();
            let mean = offsets.iter().sum::<f64>() / period as f64;
            for offset in &mut offsets {
                *offset -= mean;
            }
            Some(offsets)
        } else {
            None
        };

        let residuals: Vec<f64> = detrended
            .iter()
            .enumerate()
            .map(|(i, &r)| r - seasonal.as_ref().map_or(0.0, |s| s[i % period]))
            .collect();

        let params = 2 + seasonal.as_ref().map_or(0, |s| s.len() - 1);
        let df = n.saturating_sub(params).max(1);
        let sse: f64 = residuals.iter().map(|e| e * e).sum();
        let residual_se = (sse / df as f64).sqrt();

        let t_quantile = if residual_se < PERFECT_FIT_EPS {
            0.0
        } else {
            StudentsT::new(0.0, 1.0, df as f64)
                .map_err(|e| fit_failed(&format!("t-distribution setup failed: {e}")))?
                .inverse_cdf((1.0 + confidence) / 2.0)
        };

        Ok(FittedSeasonalTrend {
            intercept,
            slope,
            seasonal,
            n,
            x_mean,
            sxx,
            residual_se,
            t_quantile,
        })
    }
}

/// A trained [`SeasonalTrendModel`].
#[derive(Debug, Clone, PartialEq)]
pub struct FittedSeasonalTrend {
    intercept: f64,
    slope: f64,
    seasonal: Option<Vec<f64>>,
    n: usize,
    x_mean: f64,
    sxx: f64,
    residual_se: f64,
    t_quantile: f64,
}

impl FittedSeasonalTrend {
    /// Predicts at observation index `index` (in-sample for `index < n`,
    /// future beyond that).
    fn predict_at(&self, index: usize) -> Prediction {
        let x = index as f64;
        let seasonal = self
            .seasonal
            .as_ref()
            .map_or(0.0, |offsets| offsets[index % offsets.len()]);
        let yhat = self.intercept + self.slope * x + seasonal;

        let half_width = if self.residual_se < PERFECT_FIT_EPS {
            0.0
        } else {
            let nf = self.n as f64;
            let leverage = 1.0 + 1.0 / nf + (x - self.x_mean).powi(2) / self.sxx;
            self.t_quantile * self.residual_se * leverage.sqrt()
        };

        Prediction {
            yhat,
            yhat_lower: yhat - half_width,
            yhat_upper: yhat + half_width,
        }
    }
}

impl FittedModel for FittedSeasonalTrend {
    fn fitted(&self) -> Vec<Prediction> {
        (0..self.n).map(|i| self.predict_at(i)).collect()
    }

    fn forecast(&self, horizon: usize) -> Vec<Prediction> {
        (self.n..self.n + horizon)
            .map(|i| self.predict_at(i))
            .collect()
    }
}

fn fit_failed(reason: &str) -> GroupError {
    GroupError::FitFailed {
        reason: reason.to_string(),
    }
}

fn is_constant(values: &[f64]) -> bool {
    let first = values[0];
    values.iter().all(|&v| (v - first).abs() < PERFECT_FIT_EPS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn monthly_series(values: &[f64]) -> Series {
        let start = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
        Series::from_observations(
            values
                .iter()
                .enumerate()
                .map(|(i, &v)| (start + chrono::Months::new(i as u32), Some(v)))
                .collect(),
        )
    }

    #[test]
    fn linear_series_forecasts_its_continuation() {
        let values: Vec<f64> = (0..24).map(f64::from).collect();
        let fitted = SeasonalTrendModel::default()
            .fit(&monthly_series(&values))
            .unwrap();

        let forecast = fitted.forecast(7);
        assert_eq!(forecast.len(), 7);
        for (k, prediction) in forecast.iter().enumerate() {
            assert_relative_eq!(prediction.yhat, (24 + k) as f64, epsilon = 1e-6);
        }
    }

    #[test]
    fn perfect_fit_collapses_intervals_to_zero_width() {
        let values: Vec<f64> = (0..24).map(f64::from).collect();
        let fitted = SeasonalTrendModel::default()
            .fit(&monthly_series(&values))
            .unwrap();

        let prediction = fitted.forecast(1)[0];
        assert_relative_eq!(prediction.yhat_lower, prediction.yhat, epsilon = 1e-6);
        assert_relative_eq!(prediction.yhat_upper, prediction.yhat, epsilon = 1e-6);
    }

    #[test]
    fn constant_series_is_degenerate() {
        let err = SeasonalTrendModel::default()
            .fit(&monthly_series(&[5.0; 24]))
            .unwrap_err();
        assert!(matches!(err, GroupError::FitFailed { .. }));
    }

    #[test]
    fn noisy_series_brackets_the_point_estimate() {
        // A trend with deterministic "noise" that is not seasonal at lag 12.
        let values: Vec<f64> = (0..30)
            .map(|i| 10.0 + 0.5 * f64::from(i) + if i % 5 == 0 { 2.0 } else { -0.5 })
            .collect();
        let fitted = SeasonalTrendModel::default()
            .fit(&monthly_series(&values))
            .unwrap();

        for prediction in fitted.fitted().into_iter().chain(fitted.forecast(7)) {
            assert!(prediction.yhat_lower < prediction.yhat);
            assert!(prediction.yhat < prediction.yhat_upper);
        }
    }

    #[test]
    fn intervals_widen_with_forecast_distance() {
        let values: Vec<f64> = (0..30)
            .map(|i| f64::from(i) + if i % 2 == 0 { 1.0 } else { -1.0 })
            .collect();
        let fitted = SeasonalTrendModel::default()
            .fit(&monthly_series(&values))
            .unwrap();

        let forecast = fitted.forecast(7);
        let width = |p: &Prediction| p.yhat_upper - p.yhat_lower;
        assert!(width(&forecast[6]) > width(&forecast[0]));
    }

    #[test]
    fn seasonal_pattern_is_carried_into_the_forecast() {
        // Two full years of a 12-month cycle: one spike month per year.
        let values: Vec<f64> = (0..24)
            .map(|i| if i % 12 == 6 { 50.0 } else { 10.0 })
            .collect();
        let fitted = SeasonalTrendModel::default()
            .fit(&monthly_series(&values))
            .unwrap();

        // Forecast indices 24..31; index 30 has phase 6, the spike month.
        let forecast = fitted.forecast(7);
        let spike = forecast[6].yhat;
        let typical = forecast[0].yhat;
        assert!(
            spike > typical + 20.0,
            "expected seasonal spike, got spike={spike} typical={typical}"
        );
    }

    #[test]
    fn short_history_skips_the_seasonal_component() {
        // 18 points cannot cover two full 12-month periods.
        let values: Vec<f64> = (0..18)
            .map(|i| f64::from(i) + if i % 12 == 6 { 5.0 } else { 0.0 })
            .collect();
        let fitted = SeasonalTrendModel::default()
            .fit(&monthly_series(&values))
            .unwrap();
        assert!(fitted.seasonal.is_none());
    }
}
