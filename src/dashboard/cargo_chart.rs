use crate::pipeline::CargoByCall;
use eframe::egui;
use egui_plot::{Bar, BarChart, Plot};

/// Bars sit at x = 0, 1, 2...; the axis labels map those positions back to
/// call ids.
pub fn render_cargo_chart(ui: &mut egui::Ui, chart: &CargoByCall) {
    if chart.bars.is_empty() {
        ui.label(egui::RichText::new("No call ids to chart.").weak());
        return;
    }

    let (r, g, b) = CargoByCall::BAR_RGB;
    let alpha = (CargoByCall::BAR_ALPHA * 255.0) as u8;
    let fill = egui::Color32::from_rgba_unmultiplied(r, g, b, alpha);
    let edge = egui::Stroke::new(1.0, egui::Color32::BLACK);

    let bars: Vec<Bar> = chart
        .bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            Bar::new(i as f64, bar.tonnage)
                .name(bar.call_id.to_string())
                .width(0.8)
                .fill(fill)
                .stroke(edge)
        })
        .collect();

    let call_ids: Vec<i64> = chart.bars.iter().map(|b| b.call_id).collect();
    let (fig_w, fig_h) = CargoByCall::FIGURE_SIZE;
    let height = ui.available_width() * fig_h / fig_w;

    ui.label(egui::RichText::new(CargoByCall::TITLE).strong());
    if chart.skipped_groups > 0 {
        ui.label(
            egui::RichText::new(format!(
                "{} non-integer call id group(s) not shown",
                chart.skipped_groups
            ))
            .weak()
            .small(),
        );
    }

    Plot::new("cargo_by_call")
        .height(height.max(200.0))
        .x_axis_label(CargoByCall::X_LABEL)
        .y_axis_label(CargoByCall::Y_LABEL)
        .x_axis_formatter(move |mark, _range| {
            let position = mark.value.round();
            if (mark.value - position).abs() > f64::EPSILON || position < 0.0 {
                return String::new();
            }
            call_ids
                .get(position as usize)
                .map(ToString::to_string)
                .unwrap_or_default()
        })
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new("Cargo tonnage", bars).element_formatter(Box::new(|bar, _| {
                    format!("Call {}\n{:.2} MT", bar.name, bar.value)
                })),
            );
        });
}
