//! Peatland site dashboard: spectral index history, ARIMA forecasts and
//! index correlations, rendered with egui.

pub mod analysis;
pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod state;
pub mod theme;
pub mod ui;
pub mod view;
