use std::path::Path;

use anyhow::{Context, Result};
use eframe::egui::{RichText, Ui};
use egui_plot::{Line, Plot, PlotPoints};

use crate::chart::render::ChartArtifact;
use crate::pipeline::encode_png;
use crate::state::AppState;

const CHART_HEIGHT: f32 = 320.0;

// ---------------------------------------------------------------------------
// Charts (central panel, below the table)
// ---------------------------------------------------------------------------

/// Shown in place of table and charts until a file is loaded.
pub fn placeholder(ui: &mut Ui, state: &AppState) {
    ui.centered_and_justified(|ui: &mut Ui| {
        if state.status_message.is_some() {
            ui.heading("Fix the problem above and load the file again  (File → Open…)");
        } else {
            ui.heading("Please upload a CSV file in the sidebar to start analysis.");
        }
    });
}

/// One plot plus a download button per element.
pub fn chart_list(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Generated Charts");
    ui.separator();

    let mut download = None;
    for (idx, chart) in state.charts.iter().enumerate() {
        chart_plot(ui, chart);
        if ui
            .button(format!("Download {} chart (PNG)", chart.element))
            .clicked()
        {
            download = Some(idx);
        }
        ui.separator();
    }

    if let Some(idx) = download {
        save_chart_dialog(state, idx);
    }
}

fn chart_plot(ui: &mut Ui, chart: &ChartArtifact) {
    ui.label(RichText::new(&chart.title).heading().strong());

    let color = chart.color.to_color32();
    Plot::new(format!("chart_{}", chart.element))
        .height(CHART_HEIGHT)
        .x_axis_label(chart.style.x_label.clone())
        .y_axis_label(chart.style.y_label.clone())
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            // Non-finite samples split the profile into separate lines.
            for segment in chart.segments() {
                let points: PlotPoints = segment.iter().map(|&(x, y)| [x, y]).collect();
                plot_ui.line(
                    Line::new(points)
                        .name(&chart.element)
                        .color(color)
                        .width(chart.style.line_width as f32),
                );
            }
        });
}

fn save_chart_dialog(state: &mut AppState, idx: usize) {
    let Some(chart) = state.charts.get(idx) else {
        return;
    };
    let Some(path) = rfd::FileDialog::new()
        .set_title(format!("Save {} chart", chart.element))
        .set_file_name(chart.file_name())
        .add_filter("PNG", &["png"])
        .save_file()
    else {
        return;
    };

    match save_chart(chart, state.config.export_dpi, &path) {
        Ok(()) => log::info!("Saved {} to {}", chart.element, path.display()),
        Err(e) => {
            log::error!("Chart export failed: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

fn save_chart(chart: &ChartArtifact, dpi: u32, path: &Path) -> Result<()> {
    let png = encode_png(chart, dpi).with_context(|| format!("rendering {}", chart.file_name()))?;
    std::fs::write(path, png).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
