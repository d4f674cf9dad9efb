use std::path::Path;

use anyhow::{Context, Result};
use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::color::ElementColor;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – file and colour settings
// ---------------------------------------------------------------------------

/// Render the left settings panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Settings");
    ui.separator();

    if ui.button("Choose a CSV file…").clicked() {
        open_file_dialog(state);
    }
    match &state.file_name {
        Some(name) => ui.label(RichText::new(name).weak()),
        None => ui.label("No file loaded."),
    };
    ui.separator();

    let elements = match &state.analysis {
        Some(analysis) => analysis.elements.clone(),
        None => return,
    };

    ui.strong("Element Colors");
    if elements.is_empty() {
        ui.label("No element columns between Distance and SED.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, true])
        .show(ui, |ui: &mut Ui| {
            for el in &elements {
                let current = state.colors.color_for(el);
                let mut rgb = current.to_array();
                ui.horizontal(|ui: &mut Ui| {
                    if ui.color_edit_button_srgb(&mut rgb).changed() {
                        state.set_color(el, ElementColor::from(rgb));
                    }
                    let label = format!("Color for {el}");
                    if state.colors.is_overridden(el) {
                        ui.label(RichText::new(label).strong());
                    } else {
                        ui.label(label);
                    }
                    ui.label(RichText::new(current.to_string()).monospace().weak());
                });
            }
        });

    ui.add_space(4.0);
    if ui.button("Reset colors").clicked() {
        state.reset_colors();
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();
        ui.strong("EDS Line Scan Analyzer");
        ui.separator();

        if let Some(analysis) = &state.analysis {
            ui.label(format!(
                "{} data points, {} elements",
                analysis.table.row_count(),
                analysis.elements.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File input
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open EDS line scan")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        if let Err(e) = load_path(state, &path) {
            log::error!("Failed to read file: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

fn load_path(state: &mut AppState, path: &Path) -> Result<()> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    log::info!("Loading {} ({} bytes)", path.display(), bytes.len());
    state.load_bytes(&name, &bytes);
    Ok(())
}

/// Load the first file dropped onto the window, if any.
pub fn handle_dropped_files(ctx: &egui::Context, state: &mut AppState) {
    let dropped = ctx.input(|i| i.raw.dropped_files.first().cloned());
    let Some(file) = dropped else {
        return;
    };

    let result = match (&file.bytes, &file.path) {
        (Some(bytes), _) => {
            state.load_bytes(&file.name, bytes);
            Ok(())
        }
        (None, Some(path)) => load_path(state, path),
        (None, None) => Ok(()),
    };
    if let Err(e) = result {
        log::error!("Failed to read dropped file: {e:#}");
        state.status_message = Some(format!("Error: {e:#}"));
    }
}
