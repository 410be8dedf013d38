
//! Registry-driven tokenizer.
//!
//! At each position the token classes are tried in a fixed priority
//! order (bracket, numeral, unary op, binary op). The first class
//! whose pattern matches at the cursor is tentatively chosen; a
//! class-specific step may then reject the match (falling through to
//! the remaining classes) or insert an implicit multiplication token
//! first. This is how `-` is read as prefix negation or binary
//! subtraction depending on what precedes it, and how `2PI` becomes
//! `2 * PI`.

use super::scanner::Scanner;
use super::source::{SourceOffset, Span};
use super::token::{Token, TokenType};
use crate::registry::{Registry, UnaryOpKind};
use crate::util::regex_alternation;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Decimal literal with optional fraction and scientific exponent.
/// Signs are not part of the literal; `+`/`-` are operators.
const NUMERAL_LITERAL: &str = r"\d+(?:\.\d+)?(?:[eE][+-]?\d+)?";

const CLASS_ORDER: [TokenType; 4] = [
  TokenType::Bracket,
  TokenType::Numeral,
  TokenType::UnaryOp,
  TokenType::BinaryOp,
];

static BRACKET_RE: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"^\s*([()])\s*").unwrap());

/// Per-class patterns compiled from a registry's symbol tables.
/// Compile these once per registry state and reuse them across
/// `tokenize` calls; the unions are never rebuilt during a scan.
#[derive(Debug, Clone)]
pub struct TokenPatterns {
  numeral: Regex,
  unary: Option<Regex>,
  binary: Option<Regex>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TokenizeError {
  #[error("Unknown symbol at {0}")]
  UnknownSymbol(SourceOffset),
}

/// Borrows a registry and its compiled patterns for the duration of a
/// scan.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
  registry: &'a Registry,
  patterns: &'a TokenPatterns,
}

impl TokenPatterns {
  pub fn compile(registry: &Registry) -> Self {
    let numeral = match regex_alternation(registry.constant_symbols()) {
      // Constant symbols take priority over the literal pattern, and
      // longer symbols over shorter, so `4E2` lexes as one numeral
      // while `4E` is a numeral followed by the constant E.
      Some(constants) => format!("{constants}|{NUMERAL_LITERAL}"),
      None => NUMERAL_LITERAL.to_owned(),
    };
    Self {
      numeral: Self::class_pattern(&numeral),
      unary: regex_alternation(registry.unary_op_symbols())
        .map(|alternation| Self::class_pattern(&alternation)),
      binary: regex_alternation(registry.binary_op_symbols())
        .map(|alternation| Self::class_pattern(&alternation)),
    }
  }

  /// Wraps an alternation in optional whitespace, anchored at the
  /// cursor. Capture group 1 is the trimmed symbol.
  fn class_pattern(alternation: &str) -> Regex {
    let source = format!(r"^\s*({alternation})\s*");
    Regex::new(&source).unwrap_or_else(|_| {
      panic!("Invalid token class regex: {}", source);
    })
  }

  fn for_class(&self, token_type: TokenType) -> Option<&Regex> {
    match token_type {
      TokenType::Bracket => Some(&BRACKET_RE),
      TokenType::Numeral => Some(&self.numeral),
      TokenType::UnaryOp => self.unary.as_ref(),
      TokenType::BinaryOp => self.binary.as_ref(),
    }
  }
}

impl TokenizeError {
  pub fn span(&self) -> Span {
    match self {
      TokenizeError::UnknownSymbol(pos) => Span::at(*pos),
    }
  }
}

impl<'a> Tokenizer<'a> {
  pub fn new(registry: &'a Registry, patterns: &'a TokenPatterns) -> Self {
    Self { registry, patterns }
  }

  pub fn tokenize(&self, input: &str) -> Result<Vec<Token>, TokenizeError> {
    let mut scanner = Scanner::new(input);
    let mut tokens = Vec::new();
    while !scanner.is_eof() {
      self.next_token(&mut scanner, &mut tokens)?;
    }
    Ok(tokens)
  }

  fn next_token(
    &self,
    scanner: &mut Scanner<'_>,
    tokens: &mut Vec<Token>,
  ) -> Result<(), TokenizeError> {
    let pos = scanner.current_pos();
    for token_type in CLASS_ORDER {
      let Some(regex) = self.patterns.for_class(token_type) else { continue };
      let Some(caps) = scanner.captures(regex) else { continue };
      let whole_len = caps.get(0).expect("first capture group always exists").end();
      let symbol_match = caps.get(1).expect("token class patterns capture the symbol");
      let symbol = symbol_match.as_str();
      let span = Span::new(pos + symbol_match.start(), pos + symbol_match.end());
      let after_entry = tokens.last().is_some_and(|t| self.ends_expression(t));

      let accepted = match token_type {
        TokenType::Bracket => {
          if symbol == "(" && after_entry {
            self.push_implicit_mul(tokens, span);
          }
          true
        }
        TokenType::Numeral => {
          // A constant right after an entry multiplies it (`2PI`); a
          // raw digit run in the same place is left alone so the
          // parser can report the missing operator (`2 3`).
          if after_entry && self.registry.has_constant_with_symbol(symbol) {
            self.push_implicit_mul(tokens, span);
          }
          true
        }
        TokenType::UnaryOp => {
          let op = self.registry.unary_op_with_symbol(symbol)
            .expect("unary pattern only matches registered symbols");
          match op.kind {
            UnaryOpKind::Prefix => !after_entry,
            UnaryOpKind::Postfix => after_entry,
            UnaryOpKind::Function => {
              if after_entry {
                self.push_implicit_mul(tokens, span);
              }
              true
            }
          }
        }
        TokenType::BinaryOp => true,
      };
      if !accepted {
        continue;
      }

      tokens.push(Token::new(token_type, symbol, span));
      scanner.advance(whole_len);
      return Ok(());
    }
    Err(TokenizeError::UnknownSymbol(pos))
  }

  /// Whether a token can end an expression: a closing bracket, a
  /// numeral, or a postfix unary operator. The lookback that drives
  /// every disambiguation rule.
  fn ends_expression(&self, token: &Token) -> bool {
    match token.token_type {
      TokenType::Bracket => token.symbol == ")",
      TokenType::Numeral => true,
      TokenType::UnaryOp => {
        self.registry.unary_op_with_symbol(&token.symbol)
          .is_ok_and(|op| op.kind == UnaryOpKind::Postfix)
      }
      TokenType::BinaryOp => false,
    }
  }

  fn push_implicit_mul(&self, tokens: &mut Vec<Token>, span: Span) {
    if let Ok(op) = self.registry.binary_op("mul") {
      tokens.push(Token::new(TokenType::BinaryOp, op.symbol.clone(), span));
    }
  }
}
