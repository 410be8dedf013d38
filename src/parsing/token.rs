
use super::source::Span;

use std::fmt::{self, Display, Formatter};

/// The lexical class of a token. Classes are tried in this order
/// during tokenization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
  Bracket,
  Numeral,
  UnaryOp,
  BinaryOp,
}

/// A positioned lexical token. The symbol is the trimmed text as it
/// appeared in the input (or the symbol of a synthesized implicit
/// multiplication); the span is used only for error messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
  pub token_type: TokenType,
  pub symbol: String,
  pub span: Span,
}

impl Token {
  pub fn new(token_type: TokenType, symbol: impl Into<String>, span: Span) -> Self {
    Self { token_type, symbol: symbol.into(), span }
  }
}

impl Display for Token {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.symbol)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::parsing::source::SourceOffset;

  #[test]
  fn test_token_display_is_symbol() {
    let token = Token::new(TokenType::UnaryOp, "sin", Span::new(SourceOffset(0), SourceOffset(3)));
    assert_eq!(token.to_string(), "sin");
  }
}
