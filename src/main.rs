use eframe::egui;
use peatland_monitor::app::PeatlandApp;
use peatland_monitor::config::DashboardConfig;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::load_or_default();
    let title = config.window_title.clone();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(&title)
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            // Install image loaders so egui can render png/jpg from file:// URIs.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(PeatlandApp::new(cc, config)))
        }),
    )
}
