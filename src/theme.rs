use eframe::egui;
use egui::{Color32, CornerRadius, Margin, Stroke};

/// Harbour blue, used for headings and the active widget fill.
pub const ACCENT_COLOR: Color32 = Color32::from_rgb(2, 119, 189);
pub const WARNING_COLOR: Color32 = Color32::from_rgb(255, 179, 0);
pub const ERROR_COLOR: Color32 = Color32::from_rgb(229, 57, 53);

pub const SPACING_SMALL: f32 = 8.0;
pub const SPACING_LARGE: f32 = 20.0;

pub const MARGIN_CARD: f32 = 15.0;
pub const PANEL_HORIZONTAL: f32 = 20.0;
pub const PANEL_VERTICAL: f32 = 10.0;

pub fn apply_portcall_theme(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::dark();

    visuals.widgets.active.bg_fill = ACCENT_COLOR;
    visuals.widgets.active.fg_stroke = Stroke::new(1.0, Color32::WHITE);

    visuals.widgets.hovered.bg_fill = Color32::from_rgb(1, 87, 155);
    visuals.widgets.hovered.corner_radius = CornerRadius::same(6);

    visuals.widgets.inactive.bg_fill = Color32::from_rgb(38, 50, 56);
    visuals.widgets.inactive.corner_radius = CornerRadius::same(6);

    visuals.widgets.noninteractive.corner_radius = CornerRadius::same(6);

    visuals.selection.bg_fill = ACCENT_COLOR.linear_multiply(0.4);
    visuals.faint_bg_color = Color32::from_rgb(30, 38, 43);
    visuals.extreme_bg_color = Color32::from_rgb(16, 22, 26);

    ctx.set_visuals(visuals);

    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
    ctx.set_fonts(fonts);
}

/// Rounded panel that groups one dashboard section.
pub fn card_frame(ui: &egui::Ui) -> egui::Frame {
    egui::Frame::new()
        .fill(ui.visuals().faint_bg_color)
        .corner_radius(CornerRadius::same(10))
        .inner_margin(Margin::same(MARGIN_CARD as i8))
        .stroke(Stroke::new(
            1.0,
            ui.visuals().widgets.noninteractive.bg_stroke.color,
        ))
}

pub fn top_bar_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(Color32::from_rgb(21, 30, 36))
        .inner_margin(Margin::symmetric(
            PANEL_HORIZONTAL as i8,
            PANEL_VERTICAL as i8,
        ))
        .stroke(Stroke::new(1.0, Color32::from_rgb(38, 50, 56)))
}
