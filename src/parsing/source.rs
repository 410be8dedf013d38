
use std::fmt::{self, Display, Formatter};
use std::ops::Add;

/// Thin wrapper around `usize` that represents a position in a parsed
/// string. Usually used for error reporting.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SourceOffset(pub usize);

/// A span of source offsets. Spans should be considered half-open
/// intervals, with `start` being included and `end` being excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
  pub start: SourceOffset,
  pub end: SourceOffset,
}

impl Span {
  pub fn new(start: SourceOffset, end: SourceOffset) -> Self {
    Self { start, end }
  }

  /// The span covering the single position `offset`.
  pub fn at(offset: SourceOffset) -> Self {
    Self { start: offset, end: offset + 1 }
  }

  pub fn len(&self) -> usize {
    self.end.0.saturating_sub(self.start.0)
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

impl From<usize> for SourceOffset {
  fn from(i: usize) -> Self {
    SourceOffset(i)
  }
}

impl From<SourceOffset> for usize {
  fn from(i: SourceOffset) -> Self {
    i.0
  }
}

impl Display for SourceOffset {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl Add<usize> for SourceOffset {
  type Output = Self;

  fn add(self, rhs: usize) -> Self::Output {
    Self(self.0 + rhs)
  }
}

impl Display for Span {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}-{}", self.start, self.end)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_span_display() {
    let span = Span::new(SourceOffset(2), SourceOffset(5));
    assert_eq!(span.to_string(), "2-5");
  }

  #[test]
  fn test_span_at() {
    let span = Span::at(SourceOffset(7));
    assert_eq!(span, Span::new(SourceOffset(7), SourceOffset(8)));
    assert_eq!(span.len(), 1);
  }

  #[test]
  fn test_span_len() {
    assert_eq!(Span::new(SourceOffset(2), SourceOffset(5)).len(), 3);
    assert!(Span::new(SourceOffset(2), SourceOffset(2)).is_empty());
  }
}
