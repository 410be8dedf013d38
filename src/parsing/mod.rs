
//! The text-to-tree pipeline: scanning, tokenization, and parsing.

pub mod parser;
pub mod scanner;
pub mod source;
pub mod token;
pub mod tokenizer;
pub mod tree;
