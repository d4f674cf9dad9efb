// ---------------------------------------------------------------------------
// RawDocument – decoded lines of an uploaded file
// ---------------------------------------------------------------------------

/// The uploaded file as an ordered list of text lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    lines: Vec<String>,
}

impl RawDocument {
    /// Decode bytes as Latin-1 and split them into lines.
    ///
    /// Every byte maps to the code point of the same value, so this never
    /// fails; a file in another encoding just comes out garbled.
    pub fn decode(bytes: &[u8]) -> Self {
        let text: String = bytes.iter().map(|&b| char::from(b)).collect();
        Self {
            lines: split_lines(&text),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}'
    )
}

/// Split on line boundaries; `\r\n` counts as one break and a trailing
/// break does not produce an empty final line.
fn split_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if is_line_break(c) {
            if c == '\r' && chars.peek() == Some(&'\n') {
                chars.next();
            }
            lines.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
