use thiserror::Error;

// ---------------------------------------------------------------------------
// Pipeline error taxonomy
// ---------------------------------------------------------------------------

/// Structural problems with the uploaded file (header position, header shape).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// Fewer lines than needed to reach the header line.
    #[error("file has {found} lines, but the header is expected on line {expected}")]
    TooFewLines { found: usize, expected: usize },

    #[error("header line {line} is empty")]
    EmptyHeader { line: usize },

    #[error("duplicate column name '{0}' in header")]
    DuplicateColumn(String),
}

/// The element columns could not be located.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DetectionError {
    #[error("column '{0}' not found in the data")]
    MissingColumn(String),
}

/// Failures while building or rasterizing a chart.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("column '{0}' not found in the data")]
    MissingColumn(String),

    #[error("column '{0}' is not numeric and cannot be plotted")]
    NonNumericColumn(String),

    #[error("drawing chart failed: {0}")]
    Draw(String),

    #[error("values of '{0}' span too wide a range to plot")]
    AxisRange(String),

    #[error("encoding PNG failed: {0}")]
    Encode(#[from] png::EncodingError),

    #[error("figure size {width}x{height} px is not drawable")]
    Buffer { width: u32, height: u32 },
}

/// Anything the parse → detect → render pipeline can raise.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Detection(#[from] DetectionError),

    #[error(transparent)]
    Render(#[from] RenderError),
}
