use eframe::egui::{self, RichText, Ui};

use crate::state::AppState;
use crate::theme;
use crate::view::Section;

// ---------------------------------------------------------------------------
// Left side panel – navigation
// ---------------------------------------------------------------------------

/// Render the navigation sidebar.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.add_space(8.0);
    ui.heading(RichText::new("Navigation").color(theme::TITLE).strong());
    ui.separator();

    ui.label("Select a section:");
    ui.add_space(4.0);

    let mut selected = state.section;
    for section in Section::ALL {
        ui.radio_value(&mut selected, section, section.label());
    }
    state.select(selected);

    ui.add_space(12.0);
    ui.separator();
    ui.label(
        RichText::new(format!(
            "{} observations, {}–{}",
            state.table.row_count(),
            state.table.first_year(),
            state.table.last_year()
        ))
        .small()
        .color(theme::SUBHEADER),
    );
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open table…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(state.source.is_some(), egui::Button::new("Use built-in site table"))
                .clicked()
            {
                log::info!("Restored built-in site table");
                state.reset_table();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Set image folder…").clicked() {
                pick_image_dir(state);
                ui.close_menu();
            }
        });

        ui.separator();

        let source = state
            .source
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "built-in site table".to_string());
        ui.label(format!("Data: {source}"));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(theme::ERROR_TEXT));
        }
    });
}

// ---------------------------------------------------------------------------
// Footer
// ---------------------------------------------------------------------------

pub fn footer(ui: &mut Ui) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.horizontal(|ui: &mut Ui| {
            let white = |text: &str| RichText::new(text).color(theme::FOOTER_TEXT);
            ui.label(white("©2024 Peatland Monitoring Project |"));
            ui.hyperlink_to(white("Contact Us"), "mailto:swastika21csu450@ncuindia.edu");
            ui.label(white("|"));
            ui.hyperlink_to(white("LinkedIn"), "https://www.linkedin.com/in/swastika30/");
        });
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open observation table")
        .add_filter("Supported files", &["parquet", "pq", "json", "csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(table) => {
                log::info!(
                    "Loaded {} observations ({}–{}) from {}",
                    table.row_count(),
                    table.first_year(),
                    table.last_year(),
                    path.display()
                );
                state.set_table(table, path);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

pub fn pick_image_dir(state: &mut AppState) {
    let dir = rfd::FileDialog::new()
        .set_title("Choose image folder")
        .set_directory(&state.config.image_dir)
        .pick_folder();

    if let Some(dir) = dir {
        log::info!("Reading images from {}", dir.display());
        state.set_image_dir(dir);
    }
}
