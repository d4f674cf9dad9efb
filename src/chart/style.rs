use serde::{Deserialize, Serialize};

/// Fixed look of every exported chart. Sizes are in points (1/72 inch) and
/// the figure size is in inches, so the raster size follows the export DPI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    /// Figure width and height in inches.
    pub figure_size: (f64, f64),
    pub line_width: f64,
    pub title_prefix: String,
    pub x_label: String,
    pub y_label: String,
    pub title_size: f64,
    /// Gap between the title and the plot area.
    pub title_pad: f64,
    pub label_size: f64,
    pub tick_size: f64,
    pub grid_alpha: f64,
    /// Dash and gap length of grid lines.
    pub grid_dash: (f64, f64),
    pub grid_width: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            figure_size: (12.0, 5.0),
            line_width: 2.0,
            title_prefix: "Line Scan Profile: ".to_string(),
            x_label: "Distance [µm]".to_string(),
            y_label: "Concentration [at.%]".to_string(),
            title_size: 18.0,
            title_pad: 15.0,
            label_size: 14.0,
            tick_size: 12.0,
            grid_alpha: 0.6,
            grid_dash: (2.96, 1.28),
            grid_width: 0.8,
        }
    }
}

impl ChartStyle {
    pub fn title_for(&self, element: &str) -> String {
        format!("{}{element}", self.title_prefix)
    }

    /// Raster size in pixels at the given resolution.
    pub fn pixel_size(&self, dpi: u32) -> (u32, u32) {
        let (w, h) = self.figure_size;
        (
            (w * dpi as f64).round() as u32,
            (h * dpi as f64).round() as u32,
        )
    }
}

/// Converts point sizes to pixels at a given resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointScale {
    dpi: f64,
}

impl PointScale {
    pub fn new(dpi: u32) -> Self {
        Self { dpi: dpi as f64 }
    }

    pub fn px(&self, points: f64) -> f64 {
        points * self.dpi / 72.0
    }

    /// Pixel size rounded to a whole, non-zero pixel count.
    pub fn px_u32(&self, points: f64) -> u32 {
        self.px(points).round().max(1.0) as u32
    }
}
