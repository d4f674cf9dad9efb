use std::ops::Range;

use super::style::ChartStyle;
use crate::color::ElementColor;
use crate::data::model::Table;
use crate::error::RenderError;

// ---------------------------------------------------------------------------
// ChartArtifact – one element's concentration profile
// ---------------------------------------------------------------------------

/// Everything needed to draw one element's chart, on screen or as PNG.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartArtifact {
    pub element: String,
    pub color: ElementColor,
    /// (distance, concentration) in file order; may contain non-finite values.
    pub points: Vec<(f64, f64)>,
    pub title: String,
    pub style: ChartStyle,
}

fn numeric_column<'a>(table: &'a Table, name: &str) -> Result<&'a [f64], RenderError> {
    table
        .column(name)
        .ok_or_else(|| RenderError::MissingColumn(name.to_string()))?
        .as_numeric()
        .ok_or_else(|| RenderError::NonNumericColumn(name.to_string()))
}

/// Build the chart for `element` against the distance column.
pub fn render_chart(
    table: &Table,
    distance_column: &str,
    element: &str,
    color: ElementColor,
    style: &ChartStyle,
) -> Result<ChartArtifact, RenderError> {
    let x = numeric_column(table, distance_column)?;
    let y = numeric_column(table, element)?;

    let chart = ChartArtifact {
        element: element.to_string(),
        color,
        points: x.iter().copied().zip(y.iter().copied()).collect(),
        title: style.title_for(element),
        style: style.clone(),
    };
    chart.bounds()?;
    Ok(chart)
}

impl ChartArtifact {
    /// Download name of the exported PNG.
    pub fn file_name(&self) -> String {
        export_file_name(&self.element)
    }

    /// Runs of consecutive finite points; a NaN or infinity breaks the line.
    pub fn segments(&self) -> Vec<&[(f64, f64)]> {
        self.points
            .split(|(x, y)| !x.is_finite() || !y.is_finite())
            .filter(|run| !run.is_empty())
            .collect()
    }

    /// Axis ranges covering all finite points with a 5% margin. Fails when
    /// the padded range no longer fits in an `f64`.
    pub fn bounds(&self) -> Result<(Range<f64>, Range<f64>), RenderError> {
        let finite = || {
            self.points
                .iter()
                .filter(|(x, y)| x.is_finite() && y.is_finite())
        };
        let x = padded_range(finite().map(|p| p.0))
            .ok_or_else(|| RenderError::AxisRange(self.style.x_label.clone()))?;
        let y = padded_range(finite().map(|p| p.1))
            .ok_or_else(|| RenderError::AxisRange(self.element.clone()))?;
        Ok((x, y))
    }
}

pub fn export_file_name(element: &str) -> String {
    format!("Chart_{element}.png")
}

const MARGIN: f64 = 0.05;

fn padded_range(values: impl Iterator<Item = f64>) -> Option<Range<f64>> {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if lo > hi {
        // No finite data at all.
        return Some(0.0..1.0);
    }
    let pad = match (lo == hi, lo == 0.0) {
        (true, true) => 0.5,
        (true, false) => lo.abs() * MARGIN,
        (false, _) => (hi - lo) * MARGIN,
    };
    let (start, end) = (lo - pad, hi + pad);
    (start.is_finite() && end.is_finite() && (end - start).is_finite()).then_some(start..end)
}
