//! Statistics over the observation table.
//!
//! This module provides:
//! - ARIMA(p, d, q) fitting and point forecasts per index
//! - Pearson correlation matrix across indices

pub mod arima;
pub mod correlation;
pub mod diff;
pub mod optim;

use thiserror::Error;

use crate::data::model::{ObservationTable, SpectralIndex};
use arima::{ArimaModel, ArimaOrder};

pub use correlation::CorrelationMatrix;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("ARIMA{order} needs at least {required} observations, got {actual}")]
    InsufficientData {
        order: ArimaOrder,
        required: usize,
        actual: usize,
    },
    #[error("value at position {position} is not a finite number")]
    NonFinite { position: usize },
    #[error("forecast horizon must be at least one step")]
    ZeroHorizon,
    #[error("a {horizon}-year forecast after {last_year} runs past the supported year range")]
    YearOverflow { last_year: i32, horizon: usize },
}

/// Forecast of one index, labelled by the years it covers.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexForecast {
    pub index: SpectralIndex,
    pub order: ArimaOrder,
    /// `(year, value)` pairs following the last observed year.
    pub outcome: Result<Vec<(i32, f64)>, AnalysisError>,
    /// The fitted coefficients sit on the stationarity/invertibility edge,
    /// so the forecast is less trustworthy.
    pub at_boundary: bool,
}

/// Years `last_year + 1 ..= last_year + horizon`, if they fit in an `i32`.
pub fn forecast_years(last_year: i32, horizon: usize) -> Result<Vec<i32>, AnalysisError> {
    let end = i32::try_from(horizon)
        .ok()
        .and_then(|h| last_year.checked_add(h))
        .ok_or(AnalysisError::YearOverflow { last_year, horizon })?;
    Ok((last_year..end).map(|y| y + 1).collect())
}

/// Fit `order` separately to every index column and forecast `horizon` years.
pub fn forecast_indices(
    table: &ObservationTable,
    order: ArimaOrder,
    horizon: usize,
) -> Vec<IndexForecast> {
    let last_year = table.last_year();
    SpectralIndex::ALL
        .into_iter()
        .map(|index| {
            let mut at_boundary = false;
            let outcome: Result<Vec<(i32, f64)>, AnalysisError> =
                forecast_years(last_year, horizon).and_then(|years| {
                    let fit = ArimaModel::new(order).fit(&table.column(index))?;
                    at_boundary = fit.at_boundary();
                    let values = fit.forecast(horizon)?;
                    Ok(years.into_iter().zip(values).collect())
                });
            match &outcome {
                Err(e) => log::error!("{index} forecast failed: {e}"),
                Ok(_) if at_boundary => {
                    log::warn!("{index} ARIMA{order} coefficients are at the admissible boundary")
                }
                Ok(_) => {}
            }
            IndexForecast {
                index,
                order,
                outcome,
                at_boundary,
            }
        })
        .collect()
}
