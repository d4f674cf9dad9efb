use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::reader::RawDocument;
use crate::error::ParseError;

// ---------------------------------------------------------------------------
// Parse options
// ---------------------------------------------------------------------------

/// Layout of an EDS line-scan export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// 0-based index of the header line; data starts on the next line.
    pub header_line: usize,
    pub delimiter: char,
    /// Columns removed from the table after coercion.
    pub dropped_columns: Vec<String>,
    /// Marker column holding the x axis; elements start after it.
    pub distance_column: String,
    /// Marker column closing the element block.
    pub end_column: String,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            header_line: 14,
            delimiter: ',',
            dropped_columns: vec!["Point".to_string()],
            distance_column: "Distance".to_string(),
            end_column: "SED".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Header / row extraction
// ---------------------------------------------------------------------------

/// Header plus the data rows that survived the field-count check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRows {
    pub header: Vec<String>,
    /// Every row holds exactly `header.len()` fields.
    pub rows: Vec<Vec<String>>,
    /// Candidate lines dropped for having too few fields.
    pub skipped: usize,
}

fn split_fields(line: &str, delimiter: char) -> Vec<String> {
    line.trim()
        .split(delimiter)
        .map(|f| f.trim().to_string())
        .collect()
}

/// Extract the header and data rows from a decoded document.
///
/// Rows shorter than the header are skipped; longer rows are truncated.
pub fn parse_rows(doc: &RawDocument, options: &ParseOptions) -> Result<ParsedRows, ParseError> {
    let lines = doc.lines();
    let header_line = lines
        .get(options.header_line)
        .ok_or(ParseError::TooFewLines {
            found: lines.len(),
            expected: options.header_line + 1,
        })?;

    if header_line.trim().is_empty() {
        return Err(ParseError::EmptyHeader {
            line: options.header_line + 1,
        });
    }

    let header = split_fields(header_line, options.delimiter);
    let mut seen = BTreeSet::new();
    for name in &header {
        if !seen.insert(name.as_str()) {
            return Err(ParseError::DuplicateColumn(name.clone()));
        }
    }

    let mut rows = Vec::new();
    let mut skipped = 0;
    for line in &lines[options.header_line + 1..] {
        let mut fields = split_fields(line, options.delimiter);
        if fields.len() < header.len() {
            skipped += 1;
            continue;
        }
        fields.truncate(header.len());
        rows.push(fields);
    }

    if skipped > 0 {
        log::debug!("skipped {skipped} rows with fewer than {} fields", header.len());
    }

    Ok(ParsedRows {
        header,
        rows,
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(header: &str, rows: &[&str]) -> RawDocument {
        let mut text = String::new();
        for i in 0..14 {
            text.push_str(&format!("Preamble {i}\n"));
        }
        text.push_str(header);
        text.push('\n');
        for row in rows {
            text.push_str(row);
            text.push('\n');
        }
        RawDocument::decode(text.as_bytes())
    }

    #[test]
    fn reads_header_from_line_fourteen() {
        let doc = document(" Point , Distance,FeK ,SED ", &["1,0.0,12.3,45.0"]);
        let parsed = parse_rows(&doc, &ParseOptions::default()).unwrap();
        assert_eq!(parsed.header, ["Point", "Distance", "FeK", "SED"]);
        assert_eq!(parsed.rows, vec![vec!["1", "0.0", "12.3", "45.0"]]);
    }

    #[test]
    fn short_rows_are_skipped_and_long_rows_truncated() {
        let doc = document(
            "A,B,C",
            &["1,2,3", "1,2", "", "4, 5 ,6,7,8", "9,10,11"],
        );
        let parsed = parse_rows(&doc, &ParseOptions::default()).unwrap();
        assert_eq!(parsed.rows.len(), 3);
        assert_eq!(parsed.rows[1], ["4", "5", "6"]);
        assert_eq!(parsed.skipped, 2);
    }

    #[test]
    fn too_few_lines_is_a_structural_error() {
        let text = "line\n".repeat(10);
        let doc = RawDocument::decode(text.as_bytes());
        let err = parse_rows(&doc, &ParseOptions::default()).unwrap_err();
        assert_eq!(
            err,
            ParseError::TooFewLines {
                found: 10,
                expected: 15
            }
        );
    }

    #[test]
    fn header_only_file_has_no_rows() {
        let doc = document("Distance,FeK,SED", &[]);
        let parsed = parse_rows(&doc, &ParseOptions::default()).unwrap();
        assert!(parsed.rows.is_empty());
    }

    #[test]
    fn blank_header_is_rejected() {
        let doc = document("   ", &["1,2"]);
        let err = parse_rows(&doc, &ParseOptions::default()).unwrap_err();
        assert_eq!(err, ParseError::EmptyHeader { line: 15 });
    }

    #[test]
    fn duplicate_header_names_are_rejected() {
        let doc = document("Distance,FeK,FeK,SED", &[]);
        let err = parse_rows(&doc, &ParseOptions::default()).unwrap_err();
        assert_eq!(err, ParseError::DuplicateColumn("FeK".to_string()));
    }

    #[test]
    fn custom_header_line_and_delimiter() {
        let doc = RawDocument::decode(b"title\nDistance;FeK;SED\n0;1;2\n");
        let options = ParseOptions {
            header_line: 1,
            delimiter: ';',
            ..ParseOptions::default()
        };
        let parsed = parse_rows(&doc, &options).unwrap();
        assert_eq!(parsed.header, ["Distance", "FeK", "SED"]);
        assert_eq!(parsed.rows.len(), 1);
    }
}
