use eframe::egui;

use crate::config::DashboardConfig;
use crate::state::AppState;
use crate::theme;
use crate::ui::{panels, sections};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PeatlandApp {
    pub state: AppState,
}

impl PeatlandApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: DashboardConfig) -> Self {
        theme::apply(&cc.egui_ctx);
        Self {
            state: AppState::new(config),
        }
    }
}

impl eframe::App for PeatlandApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Bottom panel: footer ----
        egui::TopBottomPanel::bottom("footer")
            .frame(egui::Frame::default().fill(theme::FOOTER_BG).inner_margin(12.0))
            .show(ctx, |ui| {
                panels::footer(ui);
            });

        // ---- Left side panel: navigation ----
        egui::SidePanel::left("navigation")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: selected section ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    sections::content(ui, &self.state);
                });
        });
    }
}
