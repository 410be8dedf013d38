
//! End-to-end calculation pipeline.

use crate::error::CalcError;
use crate::eval;
use crate::parsing::parser;
use crate::parsing::token::Token;
use crate::parsing::tokenizer::{TokenPatterns, Tokenizer};
use crate::parsing::tree::SyntaxTree;
use crate::registry::Registry;

/// Owns a registry together with the token patterns compiled from it,
/// and runs the tokenize / parse / evaluate pipeline over input
/// strings. Construct one and reuse it; the patterns are compiled only
/// once.
#[derive(Debug, Clone)]
pub struct Calculator {
  registry: Registry,
  patterns: TokenPatterns,
}

/// Every intermediate product of one calculation, for callers that
/// want more than the final value.
#[derive(Debug, Clone)]
pub struct Calculation {
  pub tokens: Vec<Token>,
  pub tree: SyntaxTree,
  pub value: f64,
}

impl Calculator {
  pub fn new(registry: Registry) -> Self {
    let patterns = TokenPatterns::compile(&registry);
    Self { registry, patterns }
  }

  /// A calculator over [`Registry::common`].
  pub fn common() -> Self {
    Self::new(Registry::common())
  }

  pub fn registry(&self) -> &Registry {
    &self.registry
  }

  pub fn calculate(&self, input: &str) -> Result<Calculation, CalcError> {
    let tokenizer = Tokenizer::new(&self.registry, &self.patterns);
    let tokens = tokenizer.tokenize(input)?;
    let tree = parser::parse(&self.registry, &tokens)?;
    let value = eval::evaluate(&self.registry, &tree)?;
    Ok(Calculation { tokens, tree, value })
  }

  /// Shorthand for callers that only want the final value.
  pub fn value(&self, input: &str) -> Result<f64, CalcError> {
    Ok(self.calculate(input)?.value)
  }
}

impl Default for Calculator {
  fn default() -> Self {
    Self::common()
  }
}
