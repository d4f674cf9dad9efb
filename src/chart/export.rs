use std::ops::Range;

use plotters::coord::ranged1d::Ranged;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontDesc, FontFamily, FontStyle};
use plotters_backend::{
    BackendColor, BackendCoord, BackendStyle, BackendTextStyle, DrawingBackend, DrawingErrorKind,
};

use super::fonts::FAMILY;
use super::render::ChartArtifact;
use super::style::PointScale;
use crate::error::RenderError;

/// Resolution of downloaded charts.
pub const DEFAULT_DPI: u32 = 300;

const X_TICKS: usize = 10;
const Y_TICKS: usize = 8;
/// matplotlib's default grid colour.
const GRID_COLOR: RGBColor = RGBColor(0xb0, 0xb0, 0xb0);
const METRES_PER_INCH: f64 = 0.0254;

// ---------------------------------------------------------------------------
// PNG encoding
// ---------------------------------------------------------------------------

/// Rasterize a chart and encode it as PNG. The pixel size is the figure
/// size in inches times `dpi`.
pub fn encode_png(chart: &ChartArtifact, dpi: u32) -> Result<Vec<u8>, RenderError> {
    let (width, height) = chart.style.pixel_size(dpi);
    if width == 0 || height == 0 {
        return Err(RenderError::Buffer { width, height });
    }
    let bounds = chart.bounds()?;

    let mut buffer = vec![0u8; width as usize * height as usize * 3];
    {
        let backend = BitMapBackend::with_buffer(&mut buffer, (width, height));
        let root = TextSafeBackend::new(backend).into_drawing_area();
        draw_chart(&root, chart, bounds, PointScale::new(dpi))
            .map_err(|e| RenderError::Draw(e.to_string()))?;
        root.present()
            .map_err(|e| RenderError::Draw(e.to_string()))?;
    }

    let png = write_png(&buffer, width, height, dpi)?;

    log::debug!(
        "encoded {} at {width}x{height} px ({} bytes)",
        chart.file_name(),
        png.len()
    );
    Ok(png)
}

/// Encode an RGB buffer, recording `dpi` in the pHYs chunk.
fn write_png(rgb: &[u8], width: u32, height: u32, dpi: u32) -> Result<Vec<u8>, RenderError> {
    let pixels_per_metre = (f64::from(dpi) / METRES_PER_INCH).round() as u32;
    let mut out = Vec::new();
    let mut encoder = png::Encoder::new(&mut out, width, height);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_pixel_dims(Some(png::PixelDimensions {
        xppu: pixels_per_metre,
        yppu: pixels_per_metre,
        unit: png::Unit::Meter,
    }));
    let mut writer = encoder.write_header()?;
    writer.write_image_data(rgb)?;
    writer.finish()?;
    Ok(out)
}

fn draw_chart<DB>(
    root: &DrawingArea<DB, Shift>,
    chart: &ChartArtifact,
    (x_range, y_range): (Range<f64>, Range<f64>),
    scale: PointScale,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>>
where
    DB: DrawingBackend,
{
    let style = &chart.style;
    root.fill(&WHITE)?;

    let font = |points: f64, weight: FontStyle| {
        FontDesc::new(FontFamily::Name(FAMILY), scale.px(points), weight)
    };
    let title_font = font(style.title_size, FontStyle::Bold);
    let label_font = font(style.label_size, FontStyle::Normal);
    let tick_font = font(style.tick_size, FontStyle::Normal);

    // Title strip on top, chart body below it.
    let edge = scale.px_u32(style.tick_size) as i32;
    let title_height = edge + scale.px_u32(style.title_size + style.title_pad) as i32;
    let (title_area, body) = root.split_vertically(title_height);
    let (title_width, _) = title_area.dim_in_pixel();
    title_area.draw_text(
        &chart.title,
        &title_font
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Top)),
        (title_width as i32 / 2, edge),
    )?;

    let mut cartesian = ChartBuilder::on(&body)
        .margin_right(scale.px_u32(2.0 * style.tick_size))
        .margin_bottom(scale.px_u32(style.tick_size / 2.0))
        .x_label_area_size(scale.px_u32(2.0 * style.tick_size + style.label_size))
        .y_label_area_size(scale.px_u32(4.0 * style.tick_size + style.label_size))
        .build_cartesian_2d(x_range.clone(), y_range.clone())?;

    let (plot_w, plot_h) = cartesian.plotting_area().dim_in_pixel();
    let grid_style = Color::stroke_width(
        &GRID_COLOR.mix(style.grid_alpha),
        scale.px_u32(style.grid_width),
    );
    let (dash, gap) = (scale.px(style.grid_dash.0), scale.px(style.grid_dash.1));

    for x in RangedCoordf64::from(x_range.clone()).key_points(X_TICKS) {
        let dashes = dash_segments(y_range.clone(), plot_h, dash, gap);
        cartesian.draw_series(
            dashes
                .into_iter()
                .map(|(a, b)| PathElement::new(vec![(x, a), (x, b)], grid_style)),
        )?;
    }
    for y in RangedCoordf64::from(y_range.clone()).key_points(Y_TICKS) {
        let dashes = dash_segments(x_range.clone(), plot_w, dash, gap);
        cartesian.draw_series(
            dashes
                .into_iter()
                .map(|(a, b)| PathElement::new(vec![(a, y), (b, y)], grid_style)),
        )?;
    }

    cartesian
        .configure_mesh()
        .disable_mesh()
        .x_labels(X_TICKS)
        .y_labels(Y_TICKS)
        .x_desc(style.x_label.clone())
        .y_desc(style.y_label.clone())
        .label_style(tick_font)
        .axis_desc_style(label_font)
        .axis_style(Color::stroke_width(&BLACK, scale.px_u32(0.8)))
        .draw()?;

    let [r, g, b] = chart.color.to_array();
    let line_style = Color::stroke_width(&RGBColor(r, g, b), scale.px_u32(style.line_width));
    for segment in chart.segments() {
        cartesian.draw_series(LineSeries::new(segment.iter().copied(), line_style))?;
    }

    Ok(())
}

/// Split `range`, drawn `length_px` pixels long, into dashes of `dash_px`
/// separated by `gap_px`. The last dash is clipped to the range end.
fn dash_segments(range: Range<f64>, length_px: u32, dash_px: f64, gap_px: f64) -> Vec<(f64, f64)> {
    let solid = !dash_px.is_finite() || dash_px <= 0.0 || !gap_px.is_finite() || gap_px < 0.0;
    if solid || length_px == 0 {
        return vec![(range.start, range.end)];
    }
    let length = f64::from(length_px);
    let period = dash_px + gap_px;
    let per_px = (range.end - range.start) / length;
    let count = (length / period).ceil() as usize;
    (0..count)
        .map(|i| {
            let from = i as f64 * period;
            let to = (from + dash_px).min(length);
            (range.start + from * per_px, range.start + to * per_px)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Backend wrapper tolerating missing fonts
// ---------------------------------------------------------------------------

/// Passes everything through to `inner`, except that font errors do not
/// abort the drawing: text is skipped and its size estimated.
struct TextSafeBackend<DB> {
    inner: DB,
    warned: bool,
}

impl<DB> TextSafeBackend<DB> {
    fn new(inner: DB) -> Self {
        Self {
            inner,
            warned: false,
        }
    }
}

impl<DB: DrawingBackend> DrawingBackend for TextSafeBackend<DB> {
    type ErrorType = DB::ErrorType;

    fn get_size(&self) -> (u32, u32) {
        self.inner.get_size()
    }

    fn ensure_prepared(&mut self) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.ensure_prepared()
    }

    fn present(&mut self) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.present()
    }

    fn draw_pixel(
        &mut self,
        point: BackendCoord,
        color: BackendColor,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.draw_pixel(point, color)
    }

    fn draw_line<S: BackendStyle>(
        &mut self,
        from: BackendCoord,
        to: BackendCoord,
        style: &S,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.draw_line(from, to, style)
    }

    fn draw_rect<S: BackendStyle>(
        &mut self,
        upper_left: BackendCoord,
        bottom_right: BackendCoord,
        style: &S,
        fill: bool,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.draw_rect(upper_left, bottom_right, style, fill)
    }

    fn draw_path<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        path: I,
        style: &S,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.draw_path(path, style)
    }

    fn draw_circle<S: BackendStyle>(
        &mut self,
        center: BackendCoord,
        radius: u32,
        style: &S,
        fill: bool,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.draw_circle(center, radius, style, fill)
    }

    fn fill_polygon<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        vert: I,
        style: &S,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.fill_polygon(vert, style)
    }

    fn blit_bitmap(
        &mut self,
        pos: BackendCoord,
        (iw, ih): (u32, u32),
        src: &[u8],
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.blit_bitmap(pos, (iw, ih), src)
    }

    fn draw_text<TStyle: BackendTextStyle>(
        &mut self,
        text: &str,
        style: &TStyle,
        pos: BackendCoord,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        match self.inner.draw_text(text, style, pos) {
            Err(DrawingErrorKind::FontError(e)) => {
                if !self.warned {
                    log::warn!("chart text skipped: {e}");
                    self.warned = true;
                }
                Ok(())
            }
            other => other,
        }
    }

    fn estimate_text_size<TStyle: BackendTextStyle>(
        &self,
        text: &str,
        style: &TStyle,
    ) -> Result<(u32, u32), DrawingErrorKind<Self::ErrorType>> {
        match self.inner.estimate_text_size(text, style) {
            Err(DrawingErrorKind::FontError(_)) => {
                let size = style.size().max(1.0);
                let width = text.chars().count() as f64 * size * 0.55;
                Ok((width.ceil() as u32, size.ceil() as u32))
            }
            other => other,
        }
    }
}
