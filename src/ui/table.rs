use std::path::Path;

use anyhow::{Context, Result};
use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};

use crate::data::filter::SortKey;
use crate::data::model::Table;
use crate::data::writer::write_csv;
use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;
const PREVIEW_HEIGHT: f32 = 320.0;

// ---------------------------------------------------------------------------
// Data preview (central panel, above the charts)
// ---------------------------------------------------------------------------

/// Scrollable preview of every row, with search, click-to-sort headers
/// and CSV export.
pub fn data_preview(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Data Preview");

    ui.horizontal(|ui: &mut Ui| {
        ui.label("Search:");
        let mut query = state.table_view.query.clone();
        if ui.text_edit_singleline(&mut query).changed() {
            state.set_query(query);
        }
        if ui.button("Export table (CSV)…").clicked() {
            export_table_dialog(state);
        }
    });

    let Some(analysis) = &state.analysis else {
        return;
    };
    let table = &analysis.table;
    let sort = state.table_view.sort;
    let mut clicked_column = None;

    egui::ScrollArea::horizontal()
        .id_salt("preview_scroll")
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .id_salt("preview_table")
                .striped(true)
                .resizable(true)
                .max_scroll_height(PREVIEW_HEIGHT)
                .columns(TableColumn::auto().at_least(60.0), table.column_count())
                .header(ROW_HEIGHT + 4.0, |mut header| {
                    for (idx, name) in table.column_names().iter().enumerate() {
                        header.col(|ui: &mut Ui| {
                            let text = format!("{name}{}", sort_marker(sort, idx));
                            if ui.button(RichText::new(text).strong()).clicked() {
                                clicked_column = Some(idx);
                            }
                        });
                    }
                })
                .body(|body| {
                    body.rows(ROW_HEIGHT, state.visible_rows.len(), |mut row| {
                        let source = state.visible_rows[row.index()];
                        for (_, col) in table.columns() {
                            row.col(|ui: &mut Ui| {
                                if let Some(cell) = col.cell(source) {
                                    ui.label(cell.to_string());
                                }
                            });
                        }
                    });
                });
        });

    ui.label(
        RichText::new(format!(
            "The table above contains all {} data points ({} shown). \
             Click a column header to sort.",
            table.row_count(),
            state.visible_rows.len()
        ))
        .italics(),
    );

    if let Some(idx) = clicked_column {
        state.toggle_sort(idx);
    }
}

fn sort_marker(sort: Option<SortKey>, column: usize) -> &'static str {
    match sort {
        Some(SortKey {
            column: c,
            descending,
        }) if c == column => {
            if descending {
                " ⏷"
            } else {
                " ⏶"
            }
        }
        _ => "",
    }
}

fn export_table_dialog(state: &mut AppState) {
    let Some(analysis) = &state.analysis else {
        return;
    };
    let Some(path) = rfd::FileDialog::new()
        .set_title("Export table")
        .set_file_name("linescan_table.csv")
        .add_filter("CSV", &["csv"])
        .save_file()
    else {
        return;
    };

    match save_table(&analysis.table, &state.visible_rows, &path) {
        Ok(()) => log::info!("Exported table to {}", path.display()),
        Err(e) => {
            log::error!("Table export failed: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

fn save_table(table: &Table, rows: &[usize], path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_csv(table, rows, file).context("writing CSV")?;
    Ok(())
}
