//! Byte ranges in the statement text.

/// A half-open byte range `start..end` of the statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Joins `self` with a later span.
    #[must_use]
    pub const fn to(self, later: Self) -> Self {
        Self::new(self.start, later.end)
    }

    /// Returns the covered text of `source`, if the span lies inside it on
    /// character boundaries.
    #[must_use]
    pub fn text(self, source: &str) -> Option<&str> {
        source.get(self.start..self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_to() {
        assert_eq!(Span::new(0, 6).to(Span::new(14, 15)), Span::new(0, 15));
    }

    #[test]
    fn test_span_text() {
        let sql = "SELECT 'é'";
        assert_eq!(Span::new(7, 11).text(sql), Some("'é'"));
        assert_eq!(Span::new(7, 9).text(sql), None);
        assert_eq!(Span::new(7, 20).text(sql), None);
    }
}
