
/// The binding strength of a node in a partially built expression
/// tree. Binary operators register a small non-negative value; the
/// parser reserves the extremes for structural nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Precedence(i64);

impl Precedence {
  /// The root of a (sub)expression binds weaker than anything, so
  /// every climb stops there.
  pub const ROOT: Precedence = Precedence(i64::MIN);

  /// An atomic operand (a numeral, or a closed bracket group) binds
  /// stronger than anything.
  pub const ATOMIC: Precedence = Precedence(i64::MAX);

  /// Unary operators sit just below atomic: a following operand still
  /// attaches as their argument, but any binary operator out-ranks
  /// them during climbing.
  pub const UNARY: Precedence = Precedence(i64::MAX - 1);

  pub const fn new(n: i64) -> Precedence {
    Precedence(n)
  }
}

impl From<i64> for Precedence {
  fn from(n: i64) -> Precedence {
    Precedence::new(n)
  }
}
