//! Line/column positions for byte offsets.

use memchr::memchr_iter;

/// One-based line and column of a byte offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Location {
    pub line: u32,
    pub column: u32,
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Precomputed line start offsets for a source text.
#[derive(Clone, Debug)]
pub struct LineMap {
    line_starts: Vec<u32>,
}

impl LineMap {
    pub fn build(source: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(memchr_iter(b'\n', source.as_bytes()).map(|i| i as u32 + 1));
        LineMap { line_starts }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Location of `pos`. Columns count bytes, which matches what editors show for
    /// ASCII sources.
    pub fn location(&self, pos: u32) -> Location {
        let line = match self.line_starts.binary_search(&pos) {
            Ok(exact) => exact,
            Err(next) => next - 1,
        };
        Location {
            line: line as u32 + 1,
            column: pos - self.line_starts[line] + 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locations_are_one_based() {
        let map = LineMap::build("let a;\nlet b;\n\nc");
        assert_eq!(map.line_count(), 4);
        assert_eq!(map.location(0), Location { line: 1, column: 1 });
        assert_eq!(map.location(7), Location { line: 2, column: 1 });
        assert_eq!(map.location(11), Location { line: 2, column: 5 });
        assert_eq!(map.location(15), Location { line: 4, column: 1 });
    }
}
