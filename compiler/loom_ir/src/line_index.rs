//! Line start table for offset to line/column mapping.

/// Zero-based line and byte column.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct LineCol {
    pub line: u32,
    pub col: u32,
}

/// Start offsets of every line in a text.
///
/// Recognized line breaks are `\n`, `\r\n` and a lone `\r`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LineIndex {
    line_starts: Vec<u32>,
    len: u32,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let bytes = text.as_bytes();
        let mut line_starts = vec![0];
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\n' => line_starts.push((i + 1) as u32),
                b'\r' => {
                    if bytes.get(i + 1) == Some(&b'\n') {
                        i += 1;
                    }
                    line_starts.push((i + 1) as u32);
                }
                _ => {}
            }
            i += 1;
        }
        LineIndex {
            line_starts,
            len: bytes.len() as u32,
        }
    }

    /// Number of lines; an empty text has one.
    pub fn line_count(&self) -> u32 {
        self.line_starts.len() as u32
    }

    /// Line and column of `offset`, or `None` past the end of text.
    pub fn line_col(&self, offset: u32) -> Option<LineCol> {
        if offset > self.len {
            return None;
        }
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        Some(LineCol {
            line: line as u32,
            col: offset - self.line_starts[line],
        })
    }

    /// Offset of `line`/`col`, or `None` when the line does not exist or the
    /// column runs past the end of text.
    pub fn offset(&self, pos: LineCol) -> Option<u32> {
        let start = *self.line_starts.get(pos.line as usize)?;
        let offset = start.checked_add(pos.col)?;
        (offset <= self.len).then_some(offset)
    }

    /// Start offset of `line`.
    pub fn line_start(&self, line: u32) -> Option<u32> {
        self.line_starts.get(line as usize).copied()
    }
}
