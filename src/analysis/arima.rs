use std::fmt;

use serde::Deserialize;

use super::AnalysisError;
use super::diff::{difference, integrate};
use super::optim::{NelderMeadOptions, nelder_mead};

// ---------------------------------------------------------------------------
// Model order
// ---------------------------------------------------------------------------

/// The `(p, d, q)` triple: AR lags, differencing rounds, MA lags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ArimaOrder {
    pub p: usize,
    pub d: usize,
    pub q: usize,
}

impl ArimaOrder {
    pub const fn new(p: usize, d: usize, q: usize) -> Self {
        Self { p, d, q }
    }
}

impl Default for ArimaOrder {
    fn default() -> Self {
        Self::new(1, 1, 1)
    }
}

impl fmt::Display for ArimaOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.p, self.d, self.q)
    }
}

// ---------------------------------------------------------------------------
// Parameter transforms
// ---------------------------------------------------------------------------

/// Map unconstrained reals to the coefficients of a stationary AR polynomial.
///
/// Each input becomes a partial autocorrelation in (-1, 1) and the
/// Durbin-Levinson recursion turns those into lag coefficients.
fn constrain_stationary(unconstrained: &[f64]) -> Vec<f64> {
    let n = unconstrained.len();
    if n == 0 {
        return Vec::new();
    }
    let r: Vec<f64> = unconstrained
        .iter()
        .map(|x| x / (1.0 + x * x).sqrt())
        .collect();
    let mut y = vec![vec![0.0; n]; n];
    for k in 0..n {
        for i in 0..k {
            y[k][i] = y[k - 1][i] + r[k] * y[k - 1][k - i - 1];
        }
        y[k][k] = r[k];
    }
    y[n - 1].iter().map(|v| -v).collect()
}

fn split_params(x: &[f64], order: ArimaOrder) -> (Vec<f64>, Vec<f64>) {
    let ar = constrain_stationary(&x[..order.p]);
    // MA(q) is invertible iff the mirrored AR polynomial is stationary.
    let ma = constrain_stationary(&x[order.p..])
        .into_iter()
        .map(|v| -v)
        .collect();
    (ar, ma)
}

// ---------------------------------------------------------------------------
// Conditional sum of squares
// ---------------------------------------------------------------------------

/// One-step-ahead innovations of an ARMA(p, q) with zero pre-sample errors.
///
/// The first `p` entries are zero: they are conditioned on, not predicted.
fn innovations(w: &[f64], ar: &[f64], ma: &[f64]) -> Vec<f64> {
    let p = ar.len();
    let mut e = vec![0.0; w.len()];
    for t in p..w.len() {
        let mut pred = 0.0;
        for (i, phi) in ar.iter().enumerate() {
            pred += phi * w[t - i - 1];
        }
        for (j, theta) in ma.iter().enumerate() {
            if t > j {
                pred += theta * e[t - j - 1];
            }
        }
        e[t] = w[t] - pred;
    }
    e
}

fn conditional_sum_of_squares(w: &[f64], ar: &[f64], ma: &[f64]) -> f64 {
    innovations(w, ar, ma)[ar.len()..]
        .iter()
        .map(|e| e * e)
        .sum()
}

// ---------------------------------------------------------------------------
// Model and fit
// ---------------------------------------------------------------------------

/// Coefficients at or beyond this magnitude count as being on the edge of the
/// stationary/invertible region.
pub const BOUNDARY_TOLERANCE: f64 = 0.999;

/// An ARIMA specification that can be fitted to a series.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArimaModel {
    pub order: ArimaOrder,
}

/// A fitted ARIMA model.
#[derive(Debug, Clone, PartialEq)]
pub struct ArimaFit {
    pub order: ArimaOrder,
    /// AR coefficients φ₁..φₚ.
    pub ar: Vec<f64>,
    /// MA coefficients θ₁..θ_q.
    pub ma: Vec<f64>,
    /// Mean removed before fitting; always 0 when `d > 0`.
    pub mean: f64,
    /// Innovation variance estimate.
    pub sigma2: f64,
    pub css: f64,
    pub residuals: Vec<f64>,
    pub iterations: usize,
    pub converged: bool,
    history: Vec<f64>,
    working: Vec<f64>,
}

impl ArimaModel {
    pub fn new(order: ArimaOrder) -> Self {
        Self { order }
    }

    /// Estimate coefficients by conditional sum of squares.
    pub fn fit(&self, series: &[f64]) -> Result<ArimaFit, AnalysisError> {
        let order = self.order;
        if let Some(position) = series.iter().position(|v| !v.is_finite()) {
            return Err(AnalysisError::NonFinite { position });
        }
        let required = order.d + order.p + 1;
        if series.len() < required {
            return Err(AnalysisError::InsufficientData {
                order,
                required,
                actual: series.len(),
            });
        }

        let differenced = difference(series, order.d);
        let mean = if order.d == 0 {
            differenced.iter().sum::<f64>() / differenced.len() as f64
        } else {
            0.0
        };
        let working: Vec<f64> = differenced.iter().map(|v| v - mean).collect();

        let objective = |x: &[f64]| {
            let (ar, ma) = split_params(x, order);
            conditional_sum_of_squares(&working, &ar, &ma)
        };
        let start = vec![0.0; order.p + order.q];
        let min = nelder_mead(objective, &start, NelderMeadOptions::default());
        if !min.converged {
            log::warn!(
                "ARIMA{order} did not converge after {} iterations (css = {:.6})",
                min.iterations,
                min.value
            );
        }

        let (ar, ma) = split_params(&min.point, order);
        let residuals = innovations(&working, &ar, &ma);
        let n_eff = (working.len() - order.p) as f64;
        let css = min.value;

        log::debug!(
            "ARIMA{order} fit: ar = {ar:?}, ma = {ma:?}, css = {css:.6}, {} iterations",
            min.iterations
        );

        Ok(ArimaFit {
            order,
            ar,
            ma,
            mean,
            sigma2: css / n_eff,
            css,
            residuals,
            iterations: min.iterations,
            converged: min.converged,
            history: series.to_vec(),
            working,
        })
    }
}

impl ArimaFit {
    /// True when any AR or MA coefficient is within [`BOUNDARY_TOLERANCE`] of
    /// the unit circle. Short series often push CSS there; the forecast is
    /// still produced but should be read with care.
    pub fn at_boundary(&self) -> bool {
        self.ar
            .iter()
            .chain(&self.ma)
            .any(|c| c.abs() >= BOUNDARY_TOLERANCE)
    }

    /// Point forecasts for the next `steps` periods on the original scale.
    pub fn forecast(&self, steps: usize) -> Result<Vec<f64>, AnalysisError> {
        if steps == 0 {
            return Err(AnalysisError::ZeroHorizon);
        }
        let mut w = self.working.clone();
        let mut e = self.residuals.clone();
        for _ in 0..steps {
            let t = w.len();
            let mut next = 0.0;
            for (i, phi) in self.ar.iter().enumerate() {
                if t > i {
                    next += phi * w[t - i - 1];
                }
            }
            for (j, theta) in self.ma.iter().enumerate() {
                if t > j {
                    next += theta * e[t - j - 1];
                }
            }
            w.push(next);
            // Future innovations have zero expectation.
            e.push(0.0);
        }

        let ahead: Vec<f64> = w[self.working.len()..]
            .iter()
            .map(|v| v + self.mean)
            .collect();
        Ok(integrate(&ahead, &self.history, self.order.d))
    }
}
