use crate::chart::render::{self, ChartArtifact};
use crate::chart::style::ChartStyle;
use crate::color::ColorAssignment;
use crate::data::elements;
use crate::data::model::Table;
use crate::data::parser::{parse_rows, ParseOptions};
use crate::data::reader::RawDocument;
use crate::data::table::build_table;
use crate::error::{DetectionError, ParseError, PipelineError, RenderError};

pub use crate::chart::export::encode_png;

// ---------------------------------------------------------------------------
// Pipeline stages
// ---------------------------------------------------------------------------

/// Decode, parse and coerce an uploaded file into a table.
pub fn parse(bytes: &[u8], options: &ParseOptions) -> Result<Table, ParseError> {
    let doc = RawDocument::decode(bytes);
    let parsed = parse_rows(&doc, options)?;
    Ok(build_table(parsed, &options.dropped_columns))
}

pub fn detect_elements(table: &Table, options: &ParseOptions) -> Result<Vec<String>, DetectionError> {
    elements::detect_elements(table, &options.distance_column, &options.end_column)
}

pub fn render_chart(
    table: &Table,
    options: &ParseOptions,
    element: &str,
    colors: &ColorAssignment,
    style: &ChartStyle,
) -> Result<ChartArtifact, RenderError> {
    render::render_chart(
        table,
        &options.distance_column,
        element,
        colors.color_for(element),
        style,
    )
}

// ---------------------------------------------------------------------------
// Whole run
// ---------------------------------------------------------------------------

/// A parsed file and its detected element channels.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub table: Table,
    pub elements: Vec<String>,
}

/// Parse and detect elements in one go.
pub fn analyze(bytes: &[u8], options: &ParseOptions) -> Result<Analysis, PipelineError> {
    let table = parse(bytes, options)?;
    let elements = detect_elements(&table, options)?;
    log::info!(
        "parsed {} rows x {} columns, elements {:?}",
        table.row_count(),
        table.column_count(),
        elements
    );
    Ok(Analysis { table, elements })
}

/// One chart per element, in element order. Fails on the first chart that
/// cannot be built.
pub fn render_all(
    analysis: &Analysis,
    options: &ParseOptions,
    colors: &ColorAssignment,
    style: &ChartStyle,
) -> Result<Vec<ChartArtifact>, RenderError> {
    analysis
        .elements
        .iter()
        .map(|el| render_chart(&analysis.table, options, el, colors, style))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Column;

    fn export(header: &str, rows: &[&str]) -> Vec<u8> {
        let mut text = String::new();
        for i in 0..14 {
            text.push_str(&format!("Meta{i},value\r\n"));
        }
        text.push_str(header);
        text.push_str("\r\n");
        for row in rows {
            text.push_str(row);
            text.push_str("\r\n");
        }
        text.into_bytes()
    }

    #[test]
    fn end_to_end_single_element() {
        let bytes = export("Point,Distance,FeK,SED", &["1,0.0,12.3,45.0", "2,1.0,14.1,46.2"]);
        let options = ParseOptions::default();
        let analysis = analyze(&bytes, &options).unwrap();

        assert_eq!(analysis.table.column_names(), ["Distance", "FeK", "SED"]);
        assert_eq!(analysis.table.row_count(), 2);
        assert_eq!(analysis.elements, ["FeK"]);

        let charts = render_all(
            &analysis,
            &options,
            &ColorAssignment::default(),
            &ChartStyle::default(),
        )
        .unwrap();
        assert_eq!(charts.len(), 1);
        assert_eq!(charts[0].file_name(), "Chart_FeK.png");
        assert_eq!(charts[0].color.to_string(), "#FF0000");
        assert_eq!(charts[0].points, [(0.0, 12.3), (1.0, 14.1)]);

        let png = encode_png(&charts[0], 30).unwrap();
        assert!(png.starts_with(b"\x89PNG"));
    }

    #[test]
    fn row_and_column_counts_follow_header() {
        let bytes = export(
            "Point,Distance,PdL,NiK,SED",
            &["1,0,1,2,3", "2,1,1", "3,2,1,2,3,extra", "", "4,3,1,2,3"],
        );
        let table = parse(&bytes, &ParseOptions::default()).unwrap();
        assert_eq!(table.column_count(), 4);
        assert_eq!(table.row_count(), 3);
    }

    #[test]
    fn every_element_gets_one_chart() {
        let bytes = export(
            "Point,Distance,PdL,AgL,MgK,SED,Extra",
            &["1,0.0,1,2,3,4,x", "2,0.5,2,3,4,5,y"],
        );
        let options = ParseOptions::default();
        let analysis = analyze(&bytes, &options).unwrap();
        let charts = render_all(
            &analysis,
            &options,
            &ColorAssignment::default(),
            &ChartStyle::default(),
        )
        .unwrap();
        let names: Vec<String> = charts.iter().map(ChartArtifact::file_name).collect();
        assert_eq!(names, ["Chart_PdL.png", "Chart_AgL.png", "Chart_MgK.png"]);
        assert_eq!(charts[2].color.to_string(), "#000000");
        assert!(matches!(
            analysis.table.column("Extra"),
            Some(Column::Text(_))
        ));
    }

    #[test]
    fn ten_line_file_is_a_parse_error() {
        let bytes = "a,b,c\n".repeat(10).into_bytes();
        let err = analyze(&bytes, &ParseOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Parse(ParseError::TooFewLines { found: 10, .. })
        ));
    }

    #[test]
    fn missing_sed_is_a_detection_error() {
        let bytes = export("Point,Distance,FeK", &["1,0.0,12.3"]);
        let err = analyze(&bytes, &ParseOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Detection(DetectionError::MissingColumn(ref c)) if c == "SED"
        ));
        assert_eq!(err.to_string(), "column 'SED' not found in the data");
    }

    #[test]
    fn non_numeric_element_fails_rendering() {
        let bytes = export("Distance,FeK,SED", &["0.0,12.3,1", "1.0,n/a,2"]);
        let options = ParseOptions::default();
        let analysis = analyze(&bytes, &options).unwrap();
        let err = render_all(
            &analysis,
            &options,
            &ColorAssignment::default(),
            &ChartStyle::default(),
        )
        .unwrap_err();
        assert!(matches!(err, RenderError::NonNumericColumn(ref c) if c == "FeK"));
    }

    #[test]
    fn user_colour_reaches_the_chart() {
        let bytes = export("Distance,FeK,SED", &["0.0,12.3,1"]);
        let options = ParseOptions::default();
        let analysis = analyze(&bytes, &options).unwrap();
        let mut colors = ColorAssignment::default();
        colors.set("FeK", "#123456".parse().unwrap());
        let charts = render_all(&analysis, &options, &colors, &ChartStyle::default()).unwrap();
        assert_eq!(charts[0].color.to_string(), "#123456");
    }
}
