use serde::{Deserialize, Serialize};
use std::fmt;

/// Source location span.
///
/// Offsets are byte positions into the NFC-normalized source text, with
/// `end` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Create a new span.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Create a zero-width span at a single position.
    pub fn point(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    /// Merge two spans into one that covers both.
    pub fn merge(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }

    /// Number of bytes covered.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns `true` for a zero-width span.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Slice the covered text out of `source`, if the span is in range.
    pub fn slice<'a>(&self, source: &'a str) -> Option<&'a str> {
        source.get(self.start..self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_point() {
        let s = Span::point(5);
        assert_eq!(s.start, 5);
        assert_eq!(s.end, 5);
        assert!(s.is_empty());
    }

    #[test]
    fn test_span_merge() {
        let a = Span::new(5, 10);
        let b = Span::new(2, 8);
        let merged = a.merge(b);
        assert_eq!(merged, Span::new(2, 10));
        assert_eq!(merged.len(), 8);
    }

    #[test]
    fn test_span_merge_disjoint() {
        let a = Span::new(0, 1);
        let b = Span::new(7, 9);
        assert_eq!(a.merge(b), Span::new(0, 9));
        assert_eq!(b.merge(a), Span::new(0, 9));
    }

    #[test]
    fn test_span_display() {
        let s = Span::new(3, 7);
        assert_eq!(format!("{s}"), "3..7");
    }

    #[test]
    fn test_span_slice() {
        let src = "Math.sqrt(2)";
        assert_eq!(Span::new(5, 9).slice(src), Some("sqrt"));
        assert_eq!(Span::new(5, 99).slice(src), None);
    }

    #[test]
    fn test_span_determinism_100_iterations() {
        let input_a = Span::new(5, 10);
        let input_b = Span::new(2, 8);
        let first = input_a.merge(input_b);
        for i in 0..100 {
            let result = input_a.merge(input_b);
            assert_eq!(first, result, "Determinism failure at iteration {i}");
        }
    }
}
