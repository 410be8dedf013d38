
//! Arena-backed expression tree.
//!
//! Nodes live in a flat vector and refer to each other by index. Each
//! non-root node keeps a back-reference to its parent so the parser
//! can climb upward during precedence resolution; ownership still
//! flows strictly top-down through the child slots. Reparenting works
//! by cloning a node into a fresh slot and redirecting the relevant
//! child slot, so no two live positions ever alias one another.

use super::token::Token;
use crate::registry::{Precedence, UnaryOpKind};

use std::fmt::{self, Display, Formatter};

/// Index of a node within its [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(u32);

#[derive(Debug, Clone)]
pub struct Node {
  parent: Option<NodeId>,
  precedence: Precedence,
  data: NodeData,
}

#[derive(Debug, Clone)]
pub enum NodeData {
  /// The top of a (sub)expression. Exactly one per parsed bracket
  /// group or top-level expression.
  Root { content: Option<NodeId> },
  Numeral { token: Token },
  UnaryOp { token: Token, kind: UnaryOpKind, argument: Option<NodeId> },
  BinaryOp { token: Token, left: Option<NodeId>, right: Option<NodeId> },
}

#[derive(Debug, Clone)]
pub struct SyntaxTree {
  nodes: Vec<Node>,
  root: NodeId,
}

impl NodeId {
  fn index(self) -> usize {
    self.0 as usize
  }
}

impl SyntaxTree {
  /// A tree holding only an empty root.
  pub fn new() -> Self {
    let root = Node {
      parent: None,
      precedence: Precedence::ROOT,
      data: NodeData::Root { content: None },
    };
    Self { nodes: vec![root], root: NodeId(0) }
  }

  pub fn root(&self) -> NodeId {
    self.root
  }

  pub fn data(&self, id: NodeId) -> &NodeData {
    &self.nodes[id.index()].data
  }

  pub fn parent(&self, id: NodeId) -> Option<NodeId> {
    self.nodes[id.index()].parent
  }

  pub fn precedence(&self, id: NodeId) -> Precedence {
    self.nodes[id.index()].precedence
  }

  /// The content of the open slot of `id`: `Root.content`,
  /// `UnaryOp.argument`, or `BinaryOp.right`. Numerals have no slot.
  pub fn slot(&self, id: NodeId) -> Option<NodeId> {
    match &self.nodes[id.index()].data {
      NodeData::Root { content } => *content,
      NodeData::UnaryOp { argument, .. } => *argument,
      NodeData::BinaryOp { right, .. } => *right,
      NodeData::Numeral { .. } => None,
    }
  }

  pub(crate) fn set_precedence(&mut self, id: NodeId, precedence: Precedence) {
    self.nodes[id.index()].precedence = precedence;
  }

  /// Allocates the root of a bracketed subexpression.
  pub(crate) fn alloc_root(&mut self) -> NodeId {
    self.alloc(Precedence::ROOT, NodeData::Root { content: None })
  }

  pub(crate) fn alloc_numeral(&mut self, token: Token) -> NodeId {
    self.alloc(Precedence::ATOMIC, NodeData::Numeral { token })
  }

  pub(crate) fn alloc_unary(&mut self, token: Token, kind: UnaryOpKind) -> NodeId {
    self.alloc(Precedence::UNARY, NodeData::UnaryOp { token, kind, argument: None })
  }

  pub(crate) fn alloc_binary(&mut self, token: Token, precedence: Precedence) -> NodeId {
    self.alloc(precedence, NodeData::BinaryOp { token, left: None, right: None })
  }

  fn alloc(&mut self, precedence: Precedence, data: NodeData) -> NodeId {
    let id = NodeId(self.nodes.len() as u32);
    self.nodes.push(Node { parent: None, precedence, data });
    id
  }

  /// Shallow-copies a node into a fresh slot. Children keep their
  /// identity but their parent links move to the copy, leaving the
  /// original detached from below; the caller is expected to attach
  /// the copy somewhere and overwrite the original's old position.
  pub(crate) fn clone_node(&mut self, id: NodeId) -> NodeId {
    let copy = self.nodes[id.index()].clone();
    let new_id = NodeId(self.nodes.len() as u32);
    self.nodes.push(copy);
    for child in self.child_slots(new_id).into_iter().flatten() {
      self.nodes[child.index()].parent = Some(new_id);
    }
    new_id
  }

  /// Fills the open slot of `parent` with `child` and records the
  /// back-reference. Panics if `parent` is a numeral, which has no
  /// children.
  pub(crate) fn attach(&mut self, parent: NodeId, child: NodeId) {
    let slot = match &mut self.nodes[parent.index()].data {
      NodeData::Root { content } => content,
      NodeData::UnaryOp { argument, .. } => argument,
      NodeData::BinaryOp { right, .. } => right,
      NodeData::Numeral { .. } => panic!("numerals have no child slot"),
    };
    *slot = Some(child);
    self.nodes[child.index()].parent = Some(parent);
  }

  /// Fills the left operand of a binary node. Panics if `parent` is
  /// not a binary operator.
  pub(crate) fn attach_left(&mut self, parent: NodeId, child: NodeId) {
    match &mut self.nodes[parent.index()].data {
      NodeData::BinaryOp { left, .. } => *left = Some(child),
      _ => panic!("only binary operators have a left operand"),
    }
    self.nodes[child.index()].parent = Some(parent);
  }

  fn child_slots(&self, id: NodeId) -> [Option<NodeId>; 2] {
    match &self.nodes[id.index()].data {
      NodeData::Root { content } => [*content, None],
      NodeData::Numeral { .. } => [None, None],
      NodeData::UnaryOp { argument, .. } => [*argument, None],
      NodeData::BinaryOp { left, right, .. } => [*left, *right],
    }
  }

  /// Reconstructs a fully parenthesized input string from the tree.
  /// Re-tokenizing and re-parsing the result yields a tree that
  /// evaluates to the same value.
  pub fn unparse(&self) -> String {
    let mut out = String::new();
    self.unparse_node(&mut out, self.root);
    out
  }

  fn unparse_node(&self, out: &mut String, id: NodeId) {
    match self.data(id) {
      NodeData::Root { content } => {
        if let Some(content) = content {
          self.unparse_node(out, *content);
        }
      }
      NodeData::Numeral { token } => out.push_str(&token.symbol),
      NodeData::UnaryOp { token, kind, argument } => {
        if *kind == UnaryOpKind::Postfix {
          out.push('(');
          if let Some(argument) = argument {
            self.unparse_node(out, *argument);
          }
          out.push(')');
          out.push_str(&token.symbol);
        } else {
          out.push_str(&token.symbol);
          out.push('(');
          if let Some(argument) = argument {
            self.unparse_node(out, *argument);
          }
          out.push(')');
        }
      }
      NodeData::BinaryOp { token, left, right } => {
        out.push('(');
        if let Some(left) = left {
          self.unparse_node(out, *left);
        }
        out.push(')');
        out.push_str(&token.symbol);
        out.push('(');
        if let Some(right) = right {
          self.unparse_node(out, *right);
        }
        out.push(')');
      }
    }
  }

  fn fmt_node(&self, f: &mut Formatter<'_>, id: NodeId, depth: usize) -> fmt::Result {
    let indent = "  ".repeat(depth);
    match self.data(id) {
      NodeData::Root { content } => {
        writeln!(f, "{indent}Root")?;
        match content {
          Some(content) => self.fmt_node(f, *content, depth + 1),
          None => writeln!(f, "{indent}  <empty>"),
        }
      }
      NodeData::Numeral { token } => {
        writeln!(f, "{indent}Numeral '{}' at {}", token.symbol, token.span)
      }
      NodeData::UnaryOp { token, argument, .. } => {
        writeln!(f, "{indent}UnaryOp '{}' at {}", token.symbol, token.span)?;
        match argument {
          Some(argument) => self.fmt_node(f, *argument, depth + 1),
          None => writeln!(f, "{indent}  <empty>"),
        }
      }
      NodeData::BinaryOp { token, left, right } => {
        writeln!(f, "{indent}BinaryOp '{}' at {}", token.symbol, token.span)?;
        match left {
          Some(left) => self.fmt_node(f, *left, depth + 1)?,
          None => writeln!(f, "{indent}  <empty>")?,
        }
        match right {
          Some(right) => self.fmt_node(f, *right, depth + 1),
          None => writeln!(f, "{indent}  <empty>"),
        }
      }
    }
  }
}

impl Default for SyntaxTree {
  fn default() -> Self {
    Self::new()
  }
}

impl Display for SyntaxTree {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    self.fmt_node(f, self.root, 0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::parsing::source::{SourceOffset, Span};
  use crate::parsing::token::TokenType;

  fn numeral_token(symbol: &str) -> Token {
    Token::new(TokenType::Numeral, symbol, Span::new(SourceOffset(0), SourceOffset(symbol.len())))
  }

  fn op_token(token_type: TokenType, symbol: &str) -> Token {
    Token::new(token_type, symbol, Span::new(SourceOffset(0), SourceOffset(symbol.len())))
  }

  #[test]
  fn test_new_tree_has_empty_root() {
    let tree = SyntaxTree::new();
    assert!(matches!(tree.data(tree.root()), NodeData::Root { content: None }));
    assert_eq!(tree.slot(tree.root()), None);
    assert_eq!(tree.parent(tree.root()), None);
    assert_eq!(tree.precedence(tree.root()), Precedence::ROOT);
  }

  #[test]
  fn test_attach_fills_slot_and_parent() {
    let mut tree = SyntaxTree::new();
    let root = tree.root();
    let numeral = tree.alloc_numeral(numeral_token("2"));
    tree.attach(root, numeral);

    assert_eq!(tree.slot(root), Some(numeral));
    assert_eq!(tree.parent(numeral), Some(root));
    assert_eq!(tree.precedence(numeral), Precedence::ATOMIC);
  }

  #[test]
  fn test_clone_node_rewires_children_to_copy() {
    let mut tree = SyntaxTree::new();
    let root = tree.root();
    let plus = tree.alloc_binary(op_token(TokenType::BinaryOp, "+"), Precedence::new(0));
    tree.attach(root, plus);
    let left = tree.alloc_numeral(numeral_token("2"));
    tree.attach_left(plus, left);
    let right = tree.alloc_numeral(numeral_token("3"));
    tree.attach(plus, right);

    let copy = tree.clone_node(plus);
    assert_ne!(copy, plus);
    // The copy shares its children by identity, and the children's
    // parent links now point at the copy.
    assert_eq!(tree.slot(copy), Some(right));
    assert_eq!(tree.parent(left), Some(copy));
    assert_eq!(tree.parent(right), Some(copy));
  }

  #[test]
  fn test_unparse_binary() {
    let mut tree = SyntaxTree::new();
    let root = tree.root();
    let plus = tree.alloc_binary(op_token(TokenType::BinaryOp, "+"), Precedence::new(0));
    tree.attach(root, plus);
    let left = tree.alloc_numeral(numeral_token("2"));
    tree.attach_left(plus, left);
    let right = tree.alloc_numeral(numeral_token("3"));
    tree.attach(plus, right);

    assert_eq!(tree.unparse(), "(2)+(3)");
  }

  #[test]
  fn test_unparse_unary_kinds() {
    let mut tree = SyntaxTree::new();
    let root = tree.root();
    let factorial = tree.alloc_unary(op_token(TokenType::UnaryOp, "!"), UnaryOpKind::Postfix);
    tree.attach(root, factorial);
    let arg = tree.alloc_numeral(numeral_token("3"));
    tree.attach(factorial, arg);
    assert_eq!(tree.unparse(), "(3)!");

    let mut tree = SyntaxTree::new();
    let root = tree.root();
    let neg = tree.alloc_unary(op_token(TokenType::UnaryOp, "-"), UnaryOpKind::Prefix);
    tree.attach(root, neg);
    let arg = tree.alloc_numeral(numeral_token("3"));
    tree.attach(neg, arg);
    assert_eq!(tree.unparse(), "-(3)");
  }

  #[test]
  fn test_display_shows_structure() {
    let mut tree = SyntaxTree::new();
    let root = tree.root();
    let numeral = tree.alloc_numeral(numeral_token("42"));
    tree.attach(root, numeral);

    let rendered = tree.to_string();
    assert!(rendered.contains("Root"));
    assert!(rendered.contains("Numeral '42'"));
  }
}
