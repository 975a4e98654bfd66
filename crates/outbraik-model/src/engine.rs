//! Horizon projection and the trailing output window.

use outbraik_series::Cadence;
use outbraik_types::{ForecastPoint, GroupError, Series};

use crate::model::{FittedModel, ForecastModel};

/// Configuration for [`Engine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Periods projected beyond the last observation.
    pub horizon: usize,
    /// Trailing points of the combined in-sample + forecast sequence exposed
    /// to callers. Keeps payloads small and recent-focused.
    pub window: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            horizon: 7,
            window: 10,
        }
    }
}

/// Fits a model to one group's series and produces its dated output window.
#[derive(Debug, Clone)]
pub struct Engine<M> {
    model: M,
    config: EngineConfig,
}

impl<M: ForecastModel> Engine<M> {
    /// Creates an engine around a model.
    pub const fn new(model: M, config: EngineConfig) -> Self {
        Self { model, config }
    }

    /// The engine configuration.
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The underlying model's minimum series length.
    pub fn min_observations(&self) -> usize {
        self.model.min_observations()
    }

    /// Fits the model and returns the trailing window of dated predictions:
    /// the most recent `min(window, history + horizon)` points of the
    /// combined in-sample + projected sequence, oldest first. Projected
    /// dates advance from the last observation by the series cadence.
    ///
    /// # Errors
    ///
    /// Propagates the model's [`GroupError`]; the failure is local to this
    /// group.
    pub fn forecast_series(&self, series: &Series) -> Result<Vec<ForecastPoint>, GroupError> {
        let fitted = self.model.fit(series)?;
        let last_date = series.last_date().ok_or_else(|| GroupError::FitFailed {
            reason: "series has no observations".to_string(),
        })?;
        let cadence = Cadence::detect(series.dates());

        let mut points: Vec<ForecastPoint> = series
            .dates()
            .iter()
            .zip(fitted.fitted())
            .map(|(&date, p)| ForecastPoint::new(date, p.yhat, p.yhat_lower, p.yhat_upper))
            .collect();
        points.extend(
            fitted
                .forecast(self.config.horizon)
                .into_iter()
                .enumerate()
                .map(|(k, p)| {
                    let date = cadence.advance(last_date, k as u32 + 1);
                    ForecastPoint::new(date, p.yhat, p.yhat_lower, p.yhat_upper)
                }),
        );

        let keep = self.config.window.min(points.len());
        Ok(points.split_off(points.len() - keep))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seasonal_trend::SeasonalTrendModel;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn monthly_series(n: usize) -> Series {
        let start = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
        Series::from_observations(
            (0..n)
                .map(|i| (start + chrono::Months::new(i as u32), Some(i as f64)))
                .collect(),
        )
    }

    fn engine() -> Engine<SeasonalTrendModel> {
        Engine::new(SeasonalTrendModel::default(), EngineConfig::default())
    }

    #[test]
    fn window_is_ten_with_the_last_seven_strictly_future() {
        let series = monthly_series(24);
        let last_observed = series.last_date().unwrap();
        let points = engine().forecast_series(&series).unwrap();

        assert_eq!(points.len(), 10);
        for point in &points[..3] {
            assert!(point.date <= last_observed);
        }
        for point in &points[3..] {
            assert!(point.date > last_observed);
        }
    }

    #[test]
    fn projected_dates_increase_monthly() {
        let points = engine().forecast_series(&monthly_series(24)).unwrap();

        for pair in points.windows(2) {
            let gap = (pair[1].date - pair[0].date).num_days();
            assert!((28..=31).contains(&gap), "gap of {gap} days");
        }
        assert_eq!(
            points.last().unwrap().date,
            NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
        );
    }

    #[test]
    fn short_history_yields_a_partial_window() {
        // 3 observations + 7 projected = exactly the window; 3 observations
        // with a smaller horizon gives fewer points.
        let config = EngineConfig {
            horizon: 2,
            window: 10,
        };
        let points = Engine::new(SeasonalTrendModel::default(), config)
            .forecast_series(&monthly_series(3))
            .unwrap();
        assert_eq!(points.len(), 5);
    }

    #[test]
    fn in_sample_points_carry_fitted_values() {
        let points = engine().forecast_series(&monthly_series(24)).unwrap();
        // History is linear 0..24; the first window point is index 21.
        assert_relative_eq!(points[0].yhat, 21.0, epsilon = 1e-6);
    }

    #[test]
    fn model_failure_is_returned_not_panicked() {
        let start = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
        let constant = Series::from_observations(
            (0..24)
                .map(|i| (start + chrono::Months::new(i), Some(1.0)))
                .collect(),
        );
        assert!(matches!(
            engine().forecast_series(&constant),
            Err(GroupError::FitFailed { .. })
        ));
    }
}
