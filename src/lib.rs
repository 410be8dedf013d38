
//! Arithmetic expression evaluator.
//!
//! Input flows through three stages: a registry-driven tokenizer, a
//! precedence-climbing parser that builds an arena tree with parent
//! back-references, and a post-order evaluator. The set of constants
//! and operators is not baked in; everything is resolved against a
//! [`registry::Registry`], and [`Registry::common`] provides the usual
//! arithmetic suspects.
//!
//! Most callers only need [`calculator::Calculator`]:
//!
//! ```
//! use reckoner::calculator::Calculator;
//!
//! let calculator = Calculator::common();
//! assert_eq!(calculator.value("2+3*4").unwrap(), 14.0);
//! assert_eq!(calculator.value("-2(1+3)").unwrap(), -8.0);
//! ```
//!
//! [`Registry::common`]: registry::Registry::common

pub mod calculator;
pub mod error;
pub mod eval;
pub mod parsing;
pub mod registry;
pub mod util;
