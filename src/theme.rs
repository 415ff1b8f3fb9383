use eframe::egui::{self, Color32, FontId, Stroke, TextStyle};

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// Page title (#2E8B57, sea green).
pub const TITLE: Color32 = Color32::from_rgb(0x2E, 0x8B, 0x57);
/// Section headers (#3CB371, medium sea green).
pub const HEADER: Color32 = Color32::from_rgb(0x3C, 0xB3, 0x71);
/// Sub-headers (#556B2F, dark olive green).
pub const SUBHEADER: Color32 = Color32::from_rgb(0x55, 0x6B, 0x2F);
pub const PAGE_BG: Color32 = Color32::from_rgb(0xF0, 0xF9, 0xF4);
pub const CALLOUT_FILL: Color32 = Color32::from_rgb(0xE6, 0xF7, 0xE6);
pub const CALLOUT_BORDER: Color32 = TITLE;
pub const FOOTER_BG: Color32 = HEADER;
pub const FOOTER_TEXT: Color32 = Color32::WHITE;
pub const ERROR_TEXT: Color32 = Color32::from_rgb(0xB0, 0x20, 0x20);

pub const TITLE_SIZE: f32 = 48.0;
pub const HEADER_SIZE: f32 = 36.0;
pub const SUBHEADER_SIZE: f32 = 24.0;

/// Install the green light theme on the context.
pub fn apply(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::light();
    visuals.panel_fill = PAGE_BG;
    visuals.window_fill = PAGE_BG;
    visuals.hyperlink_color = TITLE;
    visuals.selection.bg_fill = HEADER;
    visuals.selection.stroke = Stroke::new(1.0, Color32::WHITE);
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, HEADER);
    visuals.widgets.active.bg_fill = CALLOUT_FILL;
    ctx.set_visuals(visuals);

    ctx.style_mut(|style| {
        style
            .text_styles
            .insert(TextStyle::Heading, FontId::proportional(22.0));
        style
            .text_styles
            .insert(TextStyle::Body, FontId::proportional(15.0));
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    });
}
