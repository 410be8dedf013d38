
//! Tree evaluation.
//!
//! A straightforward post-order walk: children first, then the node's
//! registered callback. All arithmetic is IEEE 754 double precision;
//! division by zero and domain errors produce infinities and NaNs
//! rather than evaluation errors.

use crate::parsing::source::Span;
use crate::parsing::tree::{NodeData, NodeId, SyntaxTree};
use crate::registry::{Registry, RegistryError};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum EvalError {
  #[error("Evaluating empty tree")]
  EmptyTree,
  #[error("Unary operator lacks an argument at {0}")]
  MissingUnaryArgument(Span),
  #[error("Binary operator lacks an operand at {0}")]
  MissingBinaryOperand(Span),
  #[error("Cannot read numeral '{symbol}' at {span}")]
  InvalidNumeral { symbol: String, span: Span },
  #[error(transparent)]
  Registry(#[from] RegistryError),
}

impl EvalError {
  /// The input span the error refers to, when one is available.
  pub fn span(&self) -> Option<Span> {
    match self {
      EvalError::EmptyTree => None,
      EvalError::MissingUnaryArgument(span) => Some(*span),
      EvalError::MissingBinaryOperand(span) => Some(*span),
      EvalError::InvalidNumeral { span, .. } => Some(*span),
      EvalError::Registry(_) => None,
    }
  }
}

/// Evaluates a parsed expression tree to a single number.
pub fn evaluate(registry: &Registry, tree: &SyntaxTree) -> Result<f64, EvalError> {
  eval_node(registry, tree, tree.root())
}

fn eval_node(registry: &Registry, tree: &SyntaxTree, id: NodeId) -> Result<f64, EvalError> {
  match tree.data(id) {
    NodeData::Root { content } => match content {
      Some(content) => eval_node(registry, tree, *content),
      None => Err(EvalError::EmptyTree),
    },
    NodeData::Numeral { token } => {
      // Constants shadow the literal reading of a symbol, matching the
      // tokenizer's match priority.
      if registry.has_constant_with_symbol(&token.symbol) {
        Ok(registry.constant_with_symbol(&token.symbol)?.value)
      } else {
        token.symbol.parse().map_err(|_| EvalError::InvalidNumeral {
          symbol: token.symbol.clone(),
          span: token.span,
        })
      }
    }
    NodeData::UnaryOp { token, argument, .. } => {
      let argument = argument.ok_or(EvalError::MissingUnaryArgument(token.span))?;
      let op = registry.unary_op_with_symbol(&token.symbol)?;
      let value = eval_node(registry, tree, argument)?;
      Ok((op.callback)(value))
    }
    NodeData::BinaryOp { token, left, right } => {
      let left = left.ok_or(EvalError::MissingBinaryOperand(token.span))?;
      let right = right.ok_or(EvalError::MissingBinaryOperand(token.span))?;
      let op = registry.binary_op_with_symbol(&token.symbol)?;
      let left = eval_node(registry, tree, left)?;
      let right = eval_node(registry, tree, right)?;
      Ok((op.callback)(left, right))
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::parsing::parser;
  use crate::parsing::source::SourceOffset;
  use crate::parsing::token::{Token, TokenType};
  use crate::parsing::tokenizer::{TokenPatterns, Tokenizer};
  use crate::registry::UnaryOpKind;

  fn eval_str(input: &str) -> Result<f64, EvalError> {
    let registry = Registry::common();
    let patterns = TokenPatterns::compile(&registry);
    let tokens = Tokenizer::new(&registry, &patterns).tokenize(input).unwrap();
    let tree = parser::parse(&registry, &tokens).unwrap();
    evaluate(&registry, &tree)
  }

  fn span(start: usize, end: usize) -> Span {
    Span::new(SourceOffset(start), SourceOffset(end))
  }

  #[test]
  fn test_eval_numeral() {
    assert_eq!(eval_str("42").unwrap(), 42.0);
    assert_eq!(eval_str("2.5").unwrap(), 2.5);
    assert_eq!(eval_str("2e3").unwrap(), 2000.0);
  }

  #[test]
  fn test_eval_constant() {
    assert_eq!(eval_str("PI").unwrap(), std::f64::consts::PI);
    assert_eq!(eval_str("INF").unwrap(), f64::INFINITY);
  }

  #[test]
  fn test_eval_operators() {
    assert_eq!(eval_str("2+3*4").unwrap(), 14.0);
    assert_eq!(eval_str("-(1-2)").unwrap(), 1.0);
    assert_eq!(eval_str("4!").unwrap(), 24.0);
  }

  #[test]
  fn test_eval_empty_tree() {
    assert_eq!(eval_str("").unwrap_err(), EvalError::EmptyTree);
  }

  #[test]
  fn test_ieee_semantics() {
    assert_eq!(eval_str("1/0").unwrap(), f64::INFINITY);
    assert_eq!(eval_str("-1/0").unwrap(), f64::NEG_INFINITY);
    assert_eq!(eval_str("0^-1").unwrap(), f64::INFINITY);
    assert!(eval_str("(-1)^0.5").unwrap().is_nan());
  }

  #[test]
  fn test_eval_missing_unary_argument() {
    // Reachable only with a hand-built tree; the parser always fills
    // prefix arguments or rejects the input.
    let registry = Registry::common();
    let mut tree = SyntaxTree::new();
    let root = tree.root();
    let neg = tree.alloc_unary(
      Token::new(TokenType::UnaryOp, "-", span(0, 1)),
      UnaryOpKind::Prefix,
    );
    tree.attach(root, neg);
    assert_eq!(
      evaluate(&registry, &tree).unwrap_err(),
      EvalError::MissingUnaryArgument(span(0, 1)),
    );
  }

  #[test]
  fn test_eval_invalid_numeral() {
    let registry = Registry::common();
    let mut tree = SyntaxTree::new();
    let root = tree.root();
    let numeral = tree.alloc_numeral(Token::new(TokenType::Numeral, "bogus", span(0, 5)));
    tree.attach(root, numeral);
    assert_eq!(
      evaluate(&registry, &tree).unwrap_err(),
      EvalError::InvalidNumeral { symbol: "bogus".to_owned(), span: span(0, 5) },
    );
  }

  #[test]
  fn test_eval_unknown_operator() {
    let registry = Registry::common();
    let mut tree = SyntaxTree::new();
    let root = tree.root();
    let op = tree.alloc_unary(
      Token::new(TokenType::UnaryOp, "frobnicate", span(0, 10)),
      UnaryOpKind::Function,
    );
    tree.attach(root, op);
    let arg = tree.alloc_numeral(Token::new(TokenType::Numeral, "1", span(11, 12)));
    tree.attach(op, arg);
    assert!(matches!(
      evaluate(&registry, &tree).unwrap_err(),
      EvalError::Registry(RegistryError::UnknownSymbol(..)),
    ));
  }
}
