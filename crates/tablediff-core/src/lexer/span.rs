//! Byte ranges into the DDL text.

/// A byte range in the statement being lexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

impl Span {
    /// Creates a new span.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns true if the span covers no bytes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns a span covering both `self` and `other`.
    #[must_use]
    pub const fn merge(self, other: Self) -> Self {
        let start = if self.start < other.start {
            self.start
        } else {
            other.start
        };
        let end = if self.end > other.end {
            self.end
        } else {
            other.end
        };
        Self { start, end }
    }

    /// Returns true if `other` starts exactly where `self` ends, i.e. the two
    /// lexemes were written without whitespace between them.
    #[must_use]
    pub const fn touches(&self, other: &Self) -> bool {
        self.end == other.start
    }

    /// Returns the source text covered by this span.
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_merge() {
        let merged = Span::new(5, 10).merge(Span::new(8, 15));
        assert_eq!(merged, Span::new(5, 15));
    }

    #[test]
    fn test_span_touches() {
        assert!(Span::new(0, 7).touches(&Span::new(7, 12)));
        assert!(!Span::new(0, 7).touches(&Span::new(8, 12)));
    }

    #[test]
    fn test_span_text() {
        let sql = "varchar(255) NOT NULL";
        assert_eq!(Span::new(0, 12).text(sql), "varchar(255)");
        assert!(Span::new(3, 3).is_empty());
    }
}
