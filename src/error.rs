
//! Unified error type for the whole calculation pipeline.

use crate::eval::EvalError;
use crate::parsing::parser::ParseError;
use crate::parsing::source::Span;
use crate::parsing::tokenizer::TokenizeError;

use thiserror::Error;

/// Any error produced while tokenizing, parsing, or evaluating an
/// expression.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum CalcError {
  #[error(transparent)]
  Tokenize(#[from] TokenizeError),
  #[error(transparent)]
  Parse(#[from] ParseError),
  #[error(transparent)]
  Eval(#[from] EvalError),
}

impl CalcError {
  /// The input span the error refers to, when one is available.
  pub fn span(&self) -> Option<Span> {
    match self {
      CalcError::Tokenize(err) => Some(err.span()),
      CalcError::Parse(err) => err.span(),
      CalcError::Eval(err) => err.span(),
    }
  }
}
