
//! The builtin constants and operators installed by [`Registry::common`].

use super::functions;
use super::{BinaryOp, Constant, Precedence, Registry, RegistryError, UnaryOp, UnaryOpKind};

use std::f64::consts;

const ADDITIVE: Precedence = Precedence::new(0);
const MULTIPLICATIVE: Precedence = Precedence::new(1);
const EXPONENTIAL: Precedence = Precedence::new(2);

// Function-style binary operators share one precedence level, well
// above the symbolic operators, and chain left-associatively among
// themselves like every other equal-precedence pair.
const BINARY_FUNCTION: Precedence = Precedence::new(100);

impl Registry {
  /// A registry populated with the builtin constants and operators.
  pub fn common() -> Registry {
    let mut registry = Registry::new();
    registry.register_defaults().expect("builtin registry entries are consistent");
    registry
  }

  fn register_defaults(&mut self) -> Result<(), RegistryError> {
    self.register_constant(Constant::new("e", "E", consts::E))?;
    self.register_constant(Constant::new("pi", "PI", consts::PI))?;
    self.register_constant(Constant::new("inf", "INF", f64::INFINITY))?;

    self.register_unary_op(UnaryOp::new("pos", "+", UnaryOpKind::Prefix, |a| a))?;
    self.register_unary_op(UnaryOp::new("neg", "-", UnaryOpKind::Prefix, |a| -a))?;
    self.register_unary_op(UnaryOp::new("percent", "%", UnaryOpKind::Postfix, |a| 0.01 * a))?;
    self.register_unary_op(UnaryOp::new("factorial", "!", UnaryOpKind::Postfix, functions::factorial))?;
    self.register_unary_op(UnaryOp::new("degree", "d", UnaryOpKind::Postfix, functions::degrees_to_radians))?;

    self.register_unary_op(UnaryOp::new("abs", "abs", UnaryOpKind::Function, f64::abs))?;
    self.register_unary_op(UnaryOp::new("floor", "floor", UnaryOpKind::Function, f64::floor))?;
    self.register_unary_op(UnaryOp::new("ceil", "ceil", UnaryOpKind::Function, f64::ceil))?;
    self.register_unary_op(UnaryOp::new("round", "round", UnaryOpKind::Function, f64::round))?;
    self.register_unary_op(UnaryOp::new("sqrt", "sqrt", UnaryOpKind::Function, f64::sqrt))?;
    self.register_unary_op(UnaryOp::new("exp", "exp", UnaryOpKind::Function, f64::exp))?;
    self.register_unary_op(UnaryOp::new("log", "Ln", UnaryOpKind::Function, f64::ln))?;
    self.register_unary_op(UnaryOp::new("log10", "log", UnaryOpKind::Function, f64::log10))?;
    self.register_unary_op(UnaryOp::new("sin", "sin", UnaryOpKind::Function, f64::sin))?;
    self.register_unary_op(UnaryOp::new("cos", "cos", UnaryOpKind::Function, f64::cos))?;
    self.register_unary_op(UnaryOp::new("tan", "tan", UnaryOpKind::Function, f64::tan))?;
    self.register_unary_op(UnaryOp::new("asin", "asin", UnaryOpKind::Function, f64::asin))?;
    self.register_unary_op(UnaryOp::new("acos", "acos", UnaryOpKind::Function, f64::acos))?;
    self.register_unary_op(UnaryOp::new("atan", "atan", UnaryOpKind::Function, f64::atan))?;
    self.register_unary_op(UnaryOp::new("gamma", "Gamma", UnaryOpKind::Function, functions::gamma))?;

    self.register_binary_op(BinaryOp::new("add", "+", |a, b| a + b, ADDITIVE))?;
    self.register_binary_op(BinaryOp::new("sub", "-", |a, b| a - b, ADDITIVE))?;
    self.register_binary_op(BinaryOp::new("mul", "*", |a, b| a * b, MULTIPLICATIVE))?;
    self.register_binary_op(BinaryOp::new("div", "/", |a, b| a / b, MULTIPLICATIVE))?;
    self.register_binary_op(BinaryOp::new("int_div", "//", |a, b| (a / b).floor(), MULTIPLICATIVE))?;
    self.register_binary_op(BinaryOp::new("pow", "**", f64::powf, EXPONENTIAL))?;
    self.register_binary_op(BinaryOp::new("pow_alias", "^", f64::powf, EXPONENTIAL))?;
    self.register_binary_op(BinaryOp::new("mod", "mod", |a, b| a % b, EXPONENTIAL))?;

    self.register_binary_op(BinaryOp::new("min", "min", f64::min, BINARY_FUNCTION))?;
    self.register_binary_op(BinaryOp::new("max", "max", f64::max, BINARY_FUNCTION))?;
    self.register_binary_op(BinaryOp::new("permutation", "P", functions::permutation, BINARY_FUNCTION))?;
    self.register_binary_op(BinaryOp::new("combination", "C", functions::combination, BINARY_FUNCTION))?;
    self.register_binary_op(BinaryOp::new("gcd", "gcd", functions::gcd, BINARY_FUNCTION))?;

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_common_registry_builds() {
    let registry = Registry::common();
    assert!(registry.has_constant("pi"));
    assert!(registry.has_unary_op("factorial"));
    assert!(registry.has_binary_op("mul"));
  }

  #[test]
  fn test_pow_aliases_share_callback_but_not_symbol() {
    let registry = Registry::common();
    assert_eq!(registry.binary_op("pow").unwrap().symbol, "**");
    assert_eq!(registry.binary_op("pow_alias").unwrap().symbol, "^");
  }

  #[test]
  fn test_same_symbol_across_tables() {
    let registry = Registry::common();
    // "+" and "-" are both a prefix unary op and a binary op; "%" is
    // only a postfix unary op since modulo is spelled "mod".
    assert_eq!(registry.unary_op_with_symbol("+").unwrap().id, "pos");
    assert_eq!(registry.binary_op_with_symbol("+").unwrap().id, "add");
    assert_eq!(registry.unary_op_with_symbol("%").unwrap().kind, UnaryOpKind::Postfix);
    assert!(!registry.has_binary_op_with_symbol("%"));
  }

  #[test]
  fn test_builtin_precedences() {
    let registry = Registry::common();
    let prec = |id: &str| registry.binary_op(id).unwrap().precedence;
    assert!(prec("add") < prec("mul"));
    assert!(prec("mul") < prec("pow"));
    assert!(prec("pow") < prec("min"));
    assert_eq!(prec("add"), prec("sub"));
    assert_eq!(prec("min"), prec("gcd"));
  }
}
