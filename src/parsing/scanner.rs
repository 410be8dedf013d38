
use super::source::{SourceOffset, Span};

use regex::{Captures, Regex};

/// Cursor over the input string being tokenized. Tracks the absolute
/// position so matches can report spans into the original input.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
  whole_input: &'a str,
  input: &'a str,
  position: SourceOffset,
}

/// The substring consumed by a [`Scanner::advance`] call, together
/// with its position in the original input.
#[derive(Debug, Clone)]
pub struct ScannerMatch<'a> {
  matched_str: &'a str,
  start: SourceOffset,
  end: SourceOffset,
}

impl<'a> Scanner<'a> {
  pub fn new(input: &'a str) -> Self {
    Self {
      whole_input: input,
      input,
      position: SourceOffset(0),
    }
  }

  pub fn whole_input(&self) -> &'a str {
    self.whole_input
  }

  pub fn is_eof(&self) -> bool {
    self.input.is_empty()
  }

  pub fn peek(&self) -> Option<char> {
    self.input.chars().next()
  }

  pub fn current_pos(&self) -> SourceOffset {
    self.position
  }

  /// Runs a regex anchored at the cursor without consuming anything.
  /// The caller decides whether to [`advance`](Scanner::advance) past
  /// the match; this is what lets the tokenizer reject a tentative
  /// match and retry a later token class.
  ///
  /// The regex MUST be anchored at the start of the input. This
  /// function may panic if that precondition is not satisfied.
  pub fn captures(&self, regex: &Regex) -> Option<Captures<'a>> {
    let c = regex.captures(self.input)?;
    let m = c.get(0).expect("first capture group always exists");
    assert_eq!(m.start(), 0, "Regex must be anchored at the start of the input");
    Some(c)
  }

  /// Advances the position of `self` by `amount`. Returns a
  /// [`ScannerMatch`] indicating the substring skipped. This method
  /// will never advance beyond one-past-the-end of the input; if
  /// `amount` is too large, it stops at the end of the string.
  pub fn advance(&mut self, mut amount: usize) -> ScannerMatch<'a> {
    amount = amount.min(self.input.len());

    let match_pos = self.current_pos();
    let (prefix, suffix) = self.input.split_at(amount);
    self.position = self.position + amount;
    self.input = suffix;
    ScannerMatch {
      matched_str: prefix,
      start: match_pos,
      end: match_pos + amount,
    }
  }
}

impl<'a> ScannerMatch<'a> {
  pub fn as_str(&self) -> &'a str {
    self.matched_str
  }

  pub fn start(&self) -> SourceOffset {
    self.start
  }

  pub fn end(&self) -> SourceOffset {
    self.end
  }

  pub fn span(&self) -> Span {
    Span::new(self.start, self.end)
  }
}
