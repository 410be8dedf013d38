
//! Tables of named constants and operators, each keyed both by a
//! stable identifier and by the symbol it is written as in input.
//!
//! A [`Registry`] is populated once at startup (usually via
//! [`Registry::common`]) and treated as read-only afterwards; the
//! tokenizer, parser, and evaluator all resolve symbols against it.

mod builtins;
pub mod functions;
mod precedence;

pub use precedence::Precedence;

use thiserror::Error;

use std::cmp::Reverse;
use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};

/// Evaluation callback for a unary operator.
pub type UnaryFn = fn(f64) -> f64;

/// Evaluation callback for a binary operator.
pub type BinaryFn = fn(f64, f64) -> f64;

/// A named constant, such as `PI`.
#[derive(Debug, Clone, PartialEq)]
pub struct Constant {
  pub id: String,
  pub symbol: String,
  pub value: f64,
}

/// Where a unary operator sits relative to its operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOpKind {
  /// Written before the operand, like the `-` in `-3`.
  Prefix,
  /// Written after the operand, like the `!` in `3!`.
  Postfix,
  /// A named call, like `sin`; consumes the operand to its right and
  /// participates in implicit multiplication.
  Function,
}

/// A unary operator or function of one argument.
#[derive(Debug, Clone)]
pub struct UnaryOp {
  pub id: String,
  pub symbol: String,
  pub kind: UnaryOpKind,
  pub callback: UnaryFn,
}

/// A binary operator or function of two arguments.
#[derive(Debug, Clone)]
pub struct BinaryOp {
  pub id: String,
  pub symbol: String,
  pub callback: BinaryFn,
  pub precedence: Precedence,
}

/// Which registry table an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
  Constant,
  UnaryOp,
  BinaryOp,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum RegistryError {
  #[error("{0} with id '{1}' already exists")]
  DuplicateId(EntryKind, String),
  #[error("{0} with symbol '{1}' already exists")]
  DuplicateSymbol(EntryKind, String),
  #[error("{0} with id '{1}' is not registered")]
  UnknownId(EntryKind, String),
  #[error("{0} with symbol '{1}' is not registered")]
  UnknownSymbol(EntryKind, String),
}

/// An entry that can live in a registry table.
trait Entry: Clone {
  const KIND: EntryKind;

  fn id(&self) -> &str;
  fn symbol(&self) -> &str;
}

/// One dual-keyed table. Entries are cloned into both maps; they are
/// small and registration is a startup-only concern.
#[derive(Debug, Clone)]
struct Table<T> {
  by_id: HashMap<String, T>,
  by_symbol: HashMap<String, T>,
}

// Not derived: the derive would demand T: Default.
impl<T> Default for Table<T> {
  fn default() -> Self {
    Self { by_id: HashMap::new(), by_symbol: HashMap::new() }
  }
}

/// Registry of constants, unary operators, and binary operators. No
/// two entries in the same table may share an id or a symbol.
#[derive(Debug, Clone, Default)]
pub struct Registry {
  constants: Table<Constant>,
  unary_ops: Table<UnaryOp>,
  binary_ops: Table<BinaryOp>,
}

impl Constant {
  pub fn new(id: impl Into<String>, symbol: impl Into<String>, value: f64) -> Self {
    Self { id: id.into(), symbol: symbol.into(), value }
  }
}

impl UnaryOp {
  pub fn new(
    id: impl Into<String>,
    symbol: impl Into<String>,
    kind: UnaryOpKind,
    callback: UnaryFn,
  ) -> Self {
    Self { id: id.into(), symbol: symbol.into(), kind, callback }
  }
}

impl BinaryOp {
  pub fn new(
    id: impl Into<String>,
    symbol: impl Into<String>,
    callback: BinaryFn,
    precedence: impl Into<Precedence>,
  ) -> Self {
    Self { id: id.into(), symbol: symbol.into(), callback, precedence: precedence.into() }
  }
}

impl Entry for Constant {
  const KIND: EntryKind = EntryKind::Constant;

  fn id(&self) -> &str {
    &self.id
  }
  fn symbol(&self) -> &str {
    &self.symbol
  }
}

impl Entry for UnaryOp {
  const KIND: EntryKind = EntryKind::UnaryOp;

  fn id(&self) -> &str {
    &self.id
  }
  fn symbol(&self) -> &str {
    &self.symbol
  }
}

impl Entry for BinaryOp {
  const KIND: EntryKind = EntryKind::BinaryOp;

  fn id(&self) -> &str {
    &self.id
  }
  fn symbol(&self) -> &str {
    &self.symbol
  }
}

impl<T: Entry> Table<T> {
  fn insert(&mut self, entry: T) -> Result<(), RegistryError> {
    if self.by_id.contains_key(entry.id()) {
      return Err(RegistryError::DuplicateId(T::KIND, entry.id().to_owned()));
    }
    if self.by_symbol.contains_key(entry.symbol()) {
      return Err(RegistryError::DuplicateSymbol(T::KIND, entry.symbol().to_owned()));
    }
    self.by_symbol.insert(entry.symbol().to_owned(), entry.clone());
    self.by_id.insert(entry.id().to_owned(), entry);
    Ok(())
  }

  fn get(&self, id: &str) -> Result<&T, RegistryError> {
    self.by_id.get(id)
      .ok_or_else(|| RegistryError::UnknownId(T::KIND, id.to_owned()))
  }

  fn get_by_symbol(&self, symbol: &str) -> Result<&T, RegistryError> {
    self.by_symbol.get(symbol)
      .ok_or_else(|| RegistryError::UnknownSymbol(T::KIND, symbol.to_owned()))
  }

  /// All registered symbols, longest first (ties alphabetical), so
  /// that greedy lexical matching prefers the longest symbol.
  fn symbols(&self) -> Vec<&str> {
    let mut symbols: Vec<&str> = self.by_symbol.keys().map(String::as_str).collect();
    symbols.sort_by_key(|s| (Reverse(s.len()), *s));
    symbols
  }
}

impl Registry {
  pub fn new() -> Registry {
    Registry::default()
  }

  pub fn register_constant(&mut self, constant: Constant) -> Result<(), RegistryError> {
    self.constants.insert(constant)
  }

  pub fn register_unary_op(&mut self, op: UnaryOp) -> Result<(), RegistryError> {
    self.unary_ops.insert(op)
  }

  pub fn register_binary_op(&mut self, op: BinaryOp) -> Result<(), RegistryError> {
    self.binary_ops.insert(op)
  }

  pub fn has_constant(&self, id: &str) -> bool {
    self.constants.by_id.contains_key(id)
  }

  pub fn has_constant_with_symbol(&self, symbol: &str) -> bool {
    self.constants.by_symbol.contains_key(symbol)
  }

  pub fn has_unary_op(&self, id: &str) -> bool {
    self.unary_ops.by_id.contains_key(id)
  }

  pub fn has_unary_op_with_symbol(&self, symbol: &str) -> bool {
    self.unary_ops.by_symbol.contains_key(symbol)
  }

  pub fn has_binary_op(&self, id: &str) -> bool {
    self.binary_ops.by_id.contains_key(id)
  }

  pub fn has_binary_op_with_symbol(&self, symbol: &str) -> bool {
    self.binary_ops.by_symbol.contains_key(symbol)
  }

  pub fn constant(&self, id: &str) -> Result<&Constant, RegistryError> {
    self.constants.get(id)
  }

  pub fn constant_with_symbol(&self, symbol: &str) -> Result<&Constant, RegistryError> {
    self.constants.get_by_symbol(symbol)
  }

  pub fn unary_op(&self, id: &str) -> Result<&UnaryOp, RegistryError> {
    self.unary_ops.get(id)
  }

  pub fn unary_op_with_symbol(&self, symbol: &str) -> Result<&UnaryOp, RegistryError> {
    self.unary_ops.get_by_symbol(symbol)
  }

  pub fn binary_op(&self, id: &str) -> Result<&BinaryOp, RegistryError> {
    self.binary_ops.get(id)
  }

  pub fn binary_op_with_symbol(&self, symbol: &str) -> Result<&BinaryOp, RegistryError> {
    self.binary_ops.get_by_symbol(symbol)
  }

  pub fn constant_symbols(&self) -> Vec<&str> {
    self.constants.symbols()
  }

  pub fn unary_op_symbols(&self) -> Vec<&str> {
    self.unary_ops.symbols()
  }

  pub fn binary_op_symbols(&self) -> Vec<&str> {
    self.binary_ops.symbols()
  }
}

impl Display for EntryKind {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      EntryKind::Constant => write!(f, "Constant"),
      EntryKind::UnaryOp => write!(f, "Unary operator"),
      EntryKind::BinaryOp => write!(f, "Binary operator"),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample_registry() -> Registry {
    let mut registry = Registry::new();
    registry.register_constant(Constant::new("pi", "PI", std::f64::consts::PI)).unwrap();
    registry.register_constant(Constant::new("e", "E", std::f64::consts::E)).unwrap();
    registry.register_unary_op(UnaryOp::new("neg", "-", UnaryOpKind::Prefix, |a| -a)).unwrap();
    registry.register_unary_op(UnaryOp::new("sin", "sin", UnaryOpKind::Function, f64::sin)).unwrap();
    registry.register_binary_op(BinaryOp::new("add", "+", |a, b| a + b, 0)).unwrap();
    registry.register_binary_op(BinaryOp::new("mul", "*", |a, b| a * b, 1)).unwrap();
    registry
  }

  #[test]
  fn test_lookup_by_id_and_symbol() {
    let registry = sample_registry();
    assert_eq!(registry.constant("pi").unwrap().symbol, "PI");
    assert_eq!(registry.constant_with_symbol("E").unwrap().id, "e");
    assert_eq!(registry.unary_op("sin").unwrap().kind, UnaryOpKind::Function);
    assert_eq!(registry.unary_op_with_symbol("-").unwrap().id, "neg");
    assert_eq!(registry.binary_op("mul").unwrap().precedence, Precedence::new(1));
    assert_eq!(registry.binary_op_with_symbol("+").unwrap().id, "add");
  }

  #[test]
  fn test_existence_probes() {
    let registry = sample_registry();
    assert!(registry.has_constant("pi"));
    assert!(!registry.has_constant("tau"));
    assert!(registry.has_unary_op_with_symbol("sin"));
    assert!(!registry.has_unary_op_with_symbol("cos"));
    assert!(registry.has_binary_op("mul"));
    assert!(!registry.has_binary_op_with_symbol("^"));
  }

  #[test]
  fn test_unknown_lookups_fail() {
    let registry = sample_registry();
    assert_eq!(
      registry.constant("tau").unwrap_err(),
      RegistryError::UnknownId(EntryKind::Constant, "tau".to_owned()),
    );
    assert_eq!(
      registry.binary_op_with_symbol("^").unwrap_err(),
      RegistryError::UnknownSymbol(EntryKind::BinaryOp, "^".to_owned()),
    );
  }

  #[test]
  fn test_duplicate_id_rejected() {
    let mut registry = sample_registry();
    let err = registry.register_constant(Constant::new("pi", "TAU", 6.28)).unwrap_err();
    assert_eq!(err, RegistryError::DuplicateId(EntryKind::Constant, "pi".to_owned()));
  }

  #[test]
  fn test_duplicate_symbol_rejected() {
    let mut registry = sample_registry();
    let err = registry.register_binary_op(BinaryOp::new("plus", "+", |a, b| a + b, 0)).unwrap_err();
    assert_eq!(err, RegistryError::DuplicateSymbol(EntryKind::BinaryOp, "+".to_owned()));
  }

  #[test]
  fn test_tables_are_independent() {
    let mut registry = sample_registry();
    // "-" exists as a unary op; the binary table is unaffected.
    registry.register_binary_op(BinaryOp::new("sub", "-", |a, b| a - b, 0)).unwrap();
  }

  #[test]
  fn test_symbols_sorted_by_descending_length() {
    let mut registry = sample_registry();
    registry.register_unary_op(UnaryOp::new("s", "s", UnaryOpKind::Function, |a| a)).unwrap();
    registry.register_unary_op(UnaryOp::new("sinh", "sinh", UnaryOpKind::Function, f64::sinh)).unwrap();
    assert_eq!(registry.unary_op_symbols(), vec!["sinh", "sin", "-", "s"]);
  }

  #[test]
  fn test_error_messages() {
    assert_eq!(
      RegistryError::DuplicateId(EntryKind::Constant, "pi".to_owned()).to_string(),
      "Constant with id 'pi' already exists",
    );
    assert_eq!(
      RegistryError::UnknownSymbol(EntryKind::UnaryOp, "cos".to_owned()).to_string(),
      "Unary operator with symbol 'cos' is not registered",
    );
  }
}
