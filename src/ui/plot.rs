use eframe::egui::Ui;
use egui_plot::{Legend, Line, LineStyle, Plot, PlotPoints, Points};

use crate::analysis::IndexForecast;
use crate::color::IndexPalette;
use crate::data::model::ObservationTable;

// ---------------------------------------------------------------------------
// Index history + forecast plot
// ---------------------------------------------------------------------------

/// Observed values as solid lines, forecasts as dashed continuations.
pub fn forecast_plot(
    ui: &mut Ui,
    table: &ObservationTable,
    forecasts: &[IndexForecast],
    palette: &IndexPalette,
) {
    Plot::new("forecast_plot")
        .legend(Legend::default())
        .height(320.0)
        .x_axis_label("Year")
        .y_axis_label("Index value")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for forecast in forecasts {
                let index = forecast.index;
                let color = palette.color_for(index);

                let observed: Vec<[f64; 2]> = table
                    .rows()
                    .iter()
                    .map(|r| [r.year as f64, r.value(index)])
                    .collect();

                plot_ui.line(
                    Line::new(PlotPoints::from(observed.clone()))
                        .name(index.label())
                        .color(color)
                        .width(2.0),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from(observed.clone()))
                        .name(index.label())
                        .color(color)
                        .radius(3.5),
                );

                let Ok(values) = &forecast.outcome else {
                    continue;
                };
                // Start the dashed segment at the last observation so it connects.
                let projected: Vec<[f64; 2]> = observed
                    .last()
                    .copied()
                    .into_iter()
                    .chain(values.iter().map(|&(year, v)| [year as f64, v]))
                    .collect();
                plot_ui.line(
                    Line::new(PlotPoints::from(projected))
                        .name(format!("{} forecast", index.label()))
                        .color(color)
                        .style(LineStyle::dashed_loose())
                        .width(2.0),
                );
            }
        });
}
