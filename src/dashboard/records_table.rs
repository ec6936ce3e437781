use crate::config::ReportConfig;
use crate::utils::{cell_text, truncate_cell};
use eframe::egui;
use egui_extras::{Column, TableBuilder};
use polars::prelude::DataFrame;

const ROW_HEIGHT: f32 = 20.0;
const MAX_TABLE_HEIGHT: f32 = 320.0;

/// Scrollable, striped view of a whole frame. Long cells are cut to
/// `max_cell_width` characters and shown in full on hover.
pub fn render_records_table(
    ui: &mut egui::Ui,
    id_salt: &str,
    df: &DataFrame,
    config: &ReportConfig,
) {
    let columns = df.get_columns();
    if columns.is_empty() {
        ui.label(egui::RichText::new("No columns.").weak());
        return;
    }

    ui.push_id(id_salt, |ui| {
        egui::ScrollArea::horizontal().show(ui, |ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .columns(
                    Column::initial(130.0).at_least(60.0).clip(true),
                    columns.len(),
                )
                .max_scroll_height(MAX_TABLE_HEIGHT)
                .min_scrolled_height(0.0)
                .header(ROW_HEIGHT + 4.0, |mut header| {
                    for column in columns {
                        header.col(|ui| {
                            ui.strong(column.name().as_str());
                        });
                    }
                })
                .body(|body| {
                    body.rows(ROW_HEIGHT, df.height(), |mut row| {
                        let index = row.index();
                        for column in columns {
                            row.col(|ui| {
                                let text = cell_text(column, index);
                                let shown = truncate_cell(&text, config.max_cell_width);
                                if shown == text {
                                    ui.label(text);
                                } else {
                                    ui.label(shown).on_hover_text(text);
                                }
                            });
                        }
                    });
                });
        });
    });
}
