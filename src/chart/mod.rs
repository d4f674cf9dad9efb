/// Chart layer: per-element profiles and their PNG export.
///
/// `render` turns a table column into a [`render::ChartArtifact`]; the UI
/// draws artifacts with egui_plot, `export` rasterizes them with plotters.

pub mod export;
pub mod fonts;
pub mod render;
pub mod style;
