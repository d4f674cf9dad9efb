use crate::chart::render::ChartArtifact;
use crate::color::{ColorAssignment, ColorDefaults, ElementColor};
use crate::config::AppConfig;
use crate::data::filter::{visible_rows, TableView};
use crate::error::PipelineError;
use crate::pipeline::{self, Analysis};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: AppConfig,

    /// Name of the loaded file, for the status line.
    pub file_name: Option<String>,

    /// Parsed table and element list (None until a file loads cleanly).
    pub analysis: Option<Analysis>,

    /// Per-element colours for the current file.
    pub colors: ColorAssignment,

    /// One chart per element, rebuilt whenever colours change.
    pub charts: Vec<ChartArtifact>,

    /// Search / sort of the data preview.
    pub table_view: TableView,

    /// Rows of the preview in display order (cached).
    pub visible_rows: Vec<usize>,

    /// Error or status message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let colors = ColorAssignment::new(ColorDefaults::with_extra(&config.default_colors));
        Self {
            config,
            file_name: None,
            analysis: None,
            colors,
            charts: Vec::new(),
            table_view: TableView::default(),
            visible_rows: Vec::new(),
            status_message: None,
        }
    }

    /// Run the whole pipeline on a newly uploaded file.
    ///
    /// Any failure clears the previous results and leaves a single error
    /// message; nothing partial is shown.
    pub fn load_bytes(&mut self, name: &str, bytes: &[u8]) {
        self.file_name = Some(name.to_string());
        self.colors.reset();
        self.table_view = TableView::default();

        match pipeline::analyze(bytes, &self.config.parse) {
            Ok(analysis) => {
                self.analysis = Some(analysis);
                self.status_message = None;
                self.refresh_rows();
                self.refresh_charts();
            }
            Err(e) => self.fail(e),
        }
    }

    /// Rebuild every chart from the table and the current colours.
    pub fn refresh_charts(&mut self) {
        let Some(analysis) = &self.analysis else {
            self.charts.clear();
            return;
        };
        match pipeline::render_all(analysis, &self.config.parse, &self.colors, &self.config.chart) {
            Ok(charts) => self.charts = charts,
            Err(e) => self.fail(e.into()),
        }
    }

    /// Recompute `visible_rows` after a search or sort change.
    pub fn refresh_rows(&mut self) {
        self.visible_rows = match &self.analysis {
            Some(a) => visible_rows(&a.table, &self.table_view),
            None => Vec::new(),
        };
    }

    /// Apply a colour pick, re-rendering only if the colour actually changed.
    pub fn set_color(&mut self, element: &str, color: ElementColor) {
        if self.colors.set(element, color) {
            log::debug!("{element} colour set to {color}");
            self.refresh_charts();
        }
    }

    pub fn reset_colors(&mut self) {
        self.colors.reset();
        self.refresh_charts();
    }

    pub fn toggle_sort(&mut self, column: usize) {
        self.table_view.toggle_sort(column);
        self.refresh_rows();
    }

    pub fn set_query(&mut self, query: String) {
        self.table_view.query = query;
        self.refresh_rows();
    }

    fn fail(&mut self, error: PipelineError) {
        log::error!("processing {:?} failed: {error}", self.file_name);
        self.analysis = None;
        self.charts.clear();
        self.visible_rows.clear();
        self.status_message = Some(format!("Error processing file: {error}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn export(header: &str, rows: &[&str]) -> Vec<u8> {
        let mut text = "preamble\n".repeat(14);
        text.push_str(header);
        text.push('\n');
        for row in rows {
            text.push_str(row);
            text.push('\n');
        }
        text.into_bytes()
    }

    fn good_file() -> Vec<u8> {
        export(
            "Point,Distance,FeK,NiK,SED",
            &["1,0.0,12.3,3.0,45.0", "2,1.0,14.1,2.0,46.2"],
        )
    }

    #[test]
    fn good_file_populates_table_and_charts() {
        let mut state = AppState::new(AppConfig::default());
        state.load_bytes("scan.csv", &good_file());
        assert!(state.status_message.is_none());
        assert_eq!(state.visible_rows, [0, 1]);
        assert_eq!(state.charts.len(), 2);
        assert_eq!(state.charts[1].color.to_string(), "#008000");
    }

    #[test]
    fn failure_clears_previous_results() {
        let mut state = AppState::new(AppConfig::default());
        state.load_bytes("scan.csv", &good_file());
        state.load_bytes("short.csv", b"only\nten\nlines\n");

        assert!(state.analysis.is_none());
        assert!(state.charts.is_empty());
        assert!(state.visible_rows.is_empty());
        let msg = state.status_message.unwrap();
        assert!(msg.starts_with("Error processing file:"), "{msg}");
    }

    #[test]
    fn missing_sed_shows_single_error() {
        let mut state = AppState::new(AppConfig::default());
        state.load_bytes("bad.csv", &export("Point,Distance,FeK", &["1,0.0,1.0"]));
        assert_eq!(
            state.status_message.as_deref(),
            Some("Error processing file: column 'SED' not found in the data")
        );
        assert!(state.charts.is_empty());
    }

    #[test]
    fn colour_change_rerenders_and_new_file_resets() {
        let mut state = AppState::new(AppConfig::default());
        state.load_bytes("scan.csv", &good_file());
        state.set_color("FeK", ElementColor::from_rgb(1, 2, 3));
        assert_eq!(state.charts[0].color.to_string(), "#010203");

        state.load_bytes("scan.csv", &good_file());
        assert_eq!(state.charts[0].color.to_string(), "#FF0000");
    }

    #[test]
    fn configured_default_colours_apply() {
        let mut config = AppConfig::default();
        config
            .default_colors
            .insert("NiK".to_string(), "#ABCDEF".to_string());
        let mut state = AppState::new(config);
        state.load_bytes("scan.csv", &good_file());
        assert_eq!(state.charts[1].color.to_string(), "#ABCDEF");
    }

    #[test]
    fn search_and_sort_update_visible_rows() {
        let mut state = AppState::new(AppConfig::default());
        state.load_bytes("scan.csv", &good_file());
        // Column 2 is NiK once Point is dropped.
        state.toggle_sort(2);
        assert_eq!(state.visible_rows, [1, 0]);
        state.set_query("14.1".to_string());
        assert_eq!(state.visible_rows, [1]);
    }
}
