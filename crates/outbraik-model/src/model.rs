//! The model capability contract.

use outbraik_types::{GroupError, Series};

/// One predicted period: central estimate plus credible interval, not yet
/// attached to a calendar date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// Central estimate.
    pub yhat: f64,
    /// Lower credible bound.
    pub yhat_lower: f64,
    /// Upper credible bound.
    pub yhat_upper: f64,
}

/// A univariate forecasting model.
///
/// The pipeline depends only on this capability set, not on a specific
/// algorithm family: any model that can fit a series and predict with
/// uncertainty can be substituted for the shipped one.
pub trait ForecastModel {
    /// The trained model produced by [`Self::fit`].
    type Fitted: FittedModel;

    /// The minimum series length this model can fit.
    ///
    /// The series builder checks this explicitly before fitting, so short
    /// groups fail with a clear error instead of an opaque one.
    fn min_observations(&self) -> usize;

    /// Trains the model on a series.
    ///
    /// # Errors
    ///
    /// Returns [`GroupError::FitFailed`] for degenerate input (a constant
    /// series, non-finite values) or non-convergence. The failure is local
    /// to the group being fitted.
    fn fit(&self, series: &Series) -> Result<Self::Fitted, GroupError>;
}

/// A trained model ready to predict.
pub trait FittedModel {
    /// In-sample predictions, one per training observation, oldest first.
    fn fitted(&self) -> Vec<Prediction>;

    /// Predictions for `horizon` periods beyond the last training
    /// observation, nearest first.
    fn forecast(&self, horizon: usize) -> Vec<Prediction>;
}
