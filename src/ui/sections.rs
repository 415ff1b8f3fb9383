use eframe::egui::{self, RichText, Stroke, Ui};
use egui_extras::{Column, TableBuilder};

use crate::analysis::{CorrelationMatrix, IndexForecast};
use crate::color::{correlation_color, correlation_text_color};
use crate::data::model::ObservationTable;
use crate::state::AppState;
use crate::theme;
use crate::ui::plot;
use crate::view::{ContentBlock, Figure};

// ---------------------------------------------------------------------------
// Central panel – the selected section's content
// ---------------------------------------------------------------------------

/// Render whatever the router produced for the current section.
pub fn content(ui: &mut Ui, state: &AppState) {
    match &state.content {
        ContentBlock::Hero { title, image, blurb } => {
            ui.vertical_centered(|ui: &mut Ui| {
                ui.add_space(20.0);
                ui.label(RichText::new(*title).size(theme::TITLE_SIZE).color(theme::TITLE));
                ui.add_space(12.0);
            });
            figure(ui, image);
            ui.add_space(8.0);
            ui.label(*blurb);
        }
        ContentBlock::Text { heading, body } => {
            header(ui, heading);
            ui.label(*body);
        }
        ContentBlock::Forecasts { heading, forecasts } => {
            header(ui, heading);
            callout(ui, "Forecast Results:");
            forecast_table(ui, forecasts);
            ui.add_space(12.0);
            plot::forecast_plot(ui, &state.table, forecasts, &state.palette);
            ui.add_space(12.0);
            subheader(ui, "Observations");
            observation_table(ui, &state.table);
        }
        ContentBlock::Correlation { heading, matrix } => {
            header(ui, heading);
            ui.label("Correlation Matrix:");
            ui.add_space(6.0);
            correlation_grid(ui, matrix);
        }
        ContentBlock::Figures { heading, figures } => {
            header(ui, heading);
            for f in figures {
                figure(ui, f);
                ui.add_space(12.0);
            }
        }
    }
}

fn header(ui: &mut Ui, text: &str) {
    ui.add_space(20.0);
    ui.label(RichText::new(text).size(theme::HEADER_SIZE).color(theme::HEADER));
    ui.add_space(8.0);
}

fn subheader(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).size(theme::SUBHEADER_SIZE).color(theme::SUBHEADER));
}

/// Bordered green box for result headings.
fn callout(ui: &mut Ui, text: &str) {
    egui::Frame::default()
        .fill(theme::CALLOUT_FILL)
        .stroke(Stroke::new(1.0, theme::CALLOUT_BORDER))
        .inner_margin(10.0)
        .show(ui, |ui: &mut Ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(text).strong());
        });
    ui.add_space(8.0);
}

// ---------------------------------------------------------------------------
// Images
// ---------------------------------------------------------------------------

fn figure(ui: &mut Ui, figure: &Figure) {
    if !figure.path.exists() {
        ui.label(
            RichText::new(format!("Image not found: {}", figure.path.display()))
                .color(theme::ERROR_TEXT),
        );
    } else {
        let uri = format!("file://{}", figure.path.display());
        ui.add(egui::Image::new(uri).max_width(ui.available_width()));
    }
    if let Some(caption) = &figure.caption {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.label(RichText::new(caption).italics().color(theme::SUBHEADER));
        });
    }
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

fn forecast_table(ui: &mut Ui, forecasts: &[IndexForecast]) {
    let horizon = forecasts
        .iter()
        .filter_map(|f| f.outcome.as_ref().ok())
        .map(|v| v.len())
        .max()
        .unwrap_or(0);
    let years: Vec<i32> = forecasts
        .iter()
        .filter_map(|f| f.outcome.as_ref().ok())
        .find(|v| v.len() == horizon)
        .map(|v| v.iter().map(|(y, _)| *y).collect())
        .unwrap_or_default();

    TableBuilder::new(ui)
        .id_salt("forecast_table")
        .striped(true)
        .vscroll(false)
        .column(Column::auto().at_least(160.0))
        .columns(Column::auto().at_least(90.0), horizon.max(1))
        .header(22.0, |mut header| {
            header.col(|ui| {
                ui.strong("Index");
            });
            if years.is_empty() {
                header.col(|ui| {
                    ui.strong("Forecast");
                });
            }
            for year in &years {
                header.col(|ui| {
                    ui.strong(year.to_string());
                });
            }
        })
        .body(|mut body| {
            for f in forecasts {
                body.row(20.0, |mut row| {
                    row.col(|ui| {
                        let name = format!("{} ARIMA{}", f.index.label(), f.order);
                        if f.at_boundary {
                            ui.label(RichText::new(format!("{name} ⚠")).color(theme::ERROR_TEXT))
                                .on_hover_text(format!(
                                    "{}: fitted coefficients sit on the unit circle, \
                                     so this forecast is unreliable",
                                    f.index.long_name()
                                ));
                        } else {
                            ui.label(name).on_hover_text(f.index.long_name());
                        }
                    });
                    match &f.outcome {
                        Ok(values) => {
                            for (_, v) in values {
                                row.col(|ui| {
                                    ui.monospace(format!("{v:.6}"));
                                });
                            }
                        }
                        Err(e) => {
                            row.col(|ui| {
                                ui.label(RichText::new(e.to_string()).color(theme::ERROR_TEXT));
                            });
                        }
                    }
                });
            }
        });
}

fn observation_table(ui: &mut Ui, table: &ObservationTable) {
    TableBuilder::new(ui)
        .id_salt("observation_table")
        .striped(true)
        .vscroll(false)
        .column(Column::auto().at_least(60.0))
        .columns(Column::auto().at_least(90.0), 3)
        .header(22.0, |mut header| {
            for title in ["Year", "NDVI", "NDWI", "NDMI"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for r in table.rows() {
                body.row(20.0, |mut row| {
                    row.col(|ui| {
                        ui.label(r.year.to_string());
                    });
                    for v in [r.ndvi, r.ndwi, r.ndmi] {
                        row.col(|ui| {
                            ui.monospace(format!("{v:.6}"));
                        });
                    }
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Correlation heatmap
// ---------------------------------------------------------------------------

fn correlation_grid(ui: &mut Ui, matrix: &CorrelationMatrix) {
    egui::Grid::new("correlation_grid")
        .spacing([4.0, 4.0])
        .show(ui, |ui: &mut Ui| {
            ui.label("");
            for label in &matrix.labels {
                ui.vertical_centered(|ui: &mut Ui| {
                    ui.strong(label.label());
                });
            }
            ui.end_row();

            for (label, row) in matrix.labels.iter().zip(&matrix.values) {
                ui.strong(label.label());
                for &r in row {
                    egui::Frame::default()
                        .fill(correlation_color(r))
                        .inner_margin(10.0)
                        .show(ui, |ui: &mut Ui| {
                            ui.set_min_width(70.0);
                            let text = if r.is_nan() { "NaN".to_string() } else { format!("{r:.4}") };
                            ui.label(RichText::new(text).monospace().color(correlation_text_color(r)));
                        });
                }
                ui.end_row();
            }
        });
}
