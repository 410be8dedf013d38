
//! Small helpers shared across the crate.

use itertools::Itertools;
use regex::escape;

use std::cmp::Reverse;

/// Builds the source fragment of a regex alternation matching any of
/// the given literal strings, longest first so greedy matching always
/// prefers the longest symbol. Returns `None` if `options` is empty,
/// since an empty alternation matches nothing useful.
///
/// Only the alternation fragment is returned (not a compiled regex),
/// so callers can splice it into a larger pattern before compiling.
pub fn regex_alternation<'a, I>(options: I) -> Option<String>
where I : IntoIterator<Item = &'a str> {
  let mut options: Vec<_> = options.into_iter().collect();
  if options.is_empty() {
    return None;
  }
  options.sort_by_key(|s| Reverse(s.len()));
  Some(options.into_iter().map(escape).join("|"))
}
