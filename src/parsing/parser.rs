
//! Precedence-climbing parser from a token stream to a [`SyntaxTree`].
//!
//! The parser walks the tokens left to right while keeping a pointer
//! at the most recently attached node. Operands attach into the open
//! slot of the pointer; operators first climb the parent chain until
//! they out-rank the pointer, then splice themselves in by cloning the
//! displaced operand and taking over its position.

use super::source::Span;
use super::token::{Token, TokenType};
use super::tree::{NodeData, NodeId, SyntaxTree};
use crate::registry::{Precedence, Registry, RegistryError, UnaryOpKind};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ParseError {
  #[error("Lone right bracket at {0}")]
  LoneRightBracket(Span),
  #[error("Unbalanced bracket at {0}")]
  UnbalancedBracket(Span),
  #[error("Empty brackets at {0}")]
  EmptyBrackets(Span),
  #[error("Missing operator before bracket at {0}")]
  MissingOperatorBeforeBracket(Span),
  #[error("Missing operator between numerals at {0}")]
  MissingOperatorBetweenNumerals(Span),
  #[error("Missing entry before postfix operator at {0}")]
  MissingEntryBeforePostfixOperator(Span),
  #[error("Missing entry before binary operator at {0}")]
  MissingEntryBeforeBinaryOperator(Span),
  #[error(transparent)]
  Registry(#[from] RegistryError),
}

impl ParseError {
  /// The input span the error refers to, when one is available.
  pub fn span(&self) -> Option<Span> {
    match self {
      ParseError::LoneRightBracket(span) => Some(*span),
      ParseError::UnbalancedBracket(span) => Some(*span),
      ParseError::EmptyBrackets(span) => Some(*span),
      ParseError::MissingOperatorBeforeBracket(span) => Some(*span),
      ParseError::MissingOperatorBetweenNumerals(span) => Some(*span),
      ParseError::MissingEntryBeforePostfixOperator(span) => Some(*span),
      ParseError::MissingEntryBeforeBinaryOperator(span) => Some(*span),
      ParseError::Registry(_) => None,
    }
  }
}

/// Parses a token stream into an expression tree. Operator symbols are
/// resolved against `registry` as they are encountered.
pub fn parse(registry: &Registry, tokens: &[Token]) -> Result<SyntaxTree, ParseError> {
  let mut tree = SyntaxTree::new();
  let root = tree.root();
  parse_into(&mut tree, root, registry, tokens)?;
  Ok(tree)
}

fn parse_into(
  tree: &mut SyntaxTree,
  root: NodeId,
  registry: &Registry,
  tokens: &[Token],
) -> Result<(), ParseError> {
  let mut pointer = root;
  let mut index = 0;
  while index < tokens.len() {
    let token = &tokens[index];
    match token.token_type {
      TokenType::Bracket => {
        handle_bracket(tree, &mut pointer, &mut index, registry, tokens)?;
      }
      TokenType::Numeral => handle_numeral(tree, &mut pointer, token)?,
      TokenType::UnaryOp => handle_unary_op(tree, &mut pointer, registry, token)?,
      TokenType::BinaryOp => handle_binary_op(tree, &mut pointer, registry, token)?,
    }
    index += 1;
  }
  Ok(())
}

/// Parses a bracket group by recursing on the tokens between the
/// brackets and attaching the resulting subexpression as a single
/// atomic operand. Advances `index` to the closing bracket.
fn handle_bracket(
  tree: &mut SyntaxTree,
  pointer: &mut NodeId,
  index: &mut usize,
  registry: &Registry,
  tokens: &[Token],
) -> Result<(), ParseError> {
  let token = &tokens[*index];
  if token.symbol == ")" {
    return Err(ParseError::LoneRightBracket(token.span));
  }
  if matches!(tree.data(*pointer), NodeData::Numeral { .. }) {
    return Err(ParseError::MissingOperatorBeforeBracket(token.span));
  }

  let open = *index;
  let mut depth = 1;
  let mut close = open;
  for (j, t) in tokens.iter().enumerate().skip(open + 1) {
    if t.token_type != TokenType::Bracket {
      continue;
    }
    depth += if t.symbol == "(" { 1 } else { -1 };
    if depth == 0 {
      close = j;
      break;
    }
  }
  if depth != 0 {
    return Err(ParseError::UnbalancedBracket(token.span));
  }
  if close == open + 1 {
    return Err(ParseError::EmptyBrackets(Span::new(token.span.start, tokens[close].span.end)));
  }
  *index = close;

  let sub_root = tree.alloc_root();
  parse_into(tree, sub_root, registry, &tokens[open + 1..close])?;
  let content = tree.slot(sub_root)
    .expect("non-empty bracket group always produces content");
  tree.set_precedence(content, Precedence::ATOMIC);
  tree.attach(*pointer, content);
  *pointer = content;
  Ok(())
}

fn handle_numeral(
  tree: &mut SyntaxTree,
  pointer: &mut NodeId,
  token: &Token,
) -> Result<(), ParseError> {
  if matches!(tree.data(*pointer), NodeData::Numeral { .. }) {
    return Err(ParseError::MissingOperatorBetweenNumerals(token.span));
  }
  let node = tree.alloc_numeral(token.clone());
  tree.attach(*pointer, node);
  *pointer = node;
  Ok(())
}

fn handle_unary_op(
  tree: &mut SyntaxTree,
  pointer: &mut NodeId,
  registry: &Registry,
  token: &Token,
) -> Result<(), ParseError> {
  // Step off atomic operands so the pointer sits at a node with an
  // open slot (or a completed operand we can wrap, for postfix).
  while tree.precedence(*pointer) > Precedence::UNARY {
    *pointer = tree.parent(*pointer).expect("atomic nodes always have a parent");
  }

  let op = registry.unary_op_with_symbol(&token.symbol)?;
  let kind = op.kind;
  if kind == UnaryOpKind::Postfix && tree.slot(*pointer).is_none() {
    return Err(ParseError::MissingEntryBeforePostfixOperator(token.span));
  }

  let node = tree.alloc_unary(token.clone(), kind);
  if kind == UnaryOpKind::Postfix {
    let operand = tree.slot(*pointer).expect("postfix operand checked above");
    let copy = tree.clone_node(operand);
    tree.attach(node, copy);
  }
  tree.attach(*pointer, node);
  *pointer = node;
  Ok(())
}

fn handle_binary_op(
  tree: &mut SyntaxTree,
  pointer: &mut NodeId,
  registry: &Registry,
  token: &Token,
) -> Result<(), ParseError> {
  let op = registry.binary_op_with_symbol(&token.symbol)?;
  let precedence = op.precedence;

  // Equal precedence climbs past the pointer, which is what makes
  // operators at the same level left-associative.
  while tree.precedence(*pointer) >= precedence {
    *pointer = tree.parent(*pointer).expect("climb stops at the root");
  }

  let operand = tree.slot(*pointer)
    .ok_or(ParseError::MissingEntryBeforeBinaryOperator(token.span))?;
  let node = tree.alloc_binary(token.clone(), precedence);
  let copy = tree.clone_node(operand);
  tree.attach_left(node, copy);
  tree.attach(*pointer, node);
  *pointer = node;
  Ok(())
}
