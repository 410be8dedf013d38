
//! Command-line front end.
//!
//! With arguments, evaluates them as a single expression and prints
//! the value. Without arguments, runs a small read-eval-print loop;
//! `:tokens EXPR` and `:tree EXPR` show the intermediate stages.

use anyhow::Result;
use itertools::Itertools;

use reckoner::calculator::Calculator;
use reckoner::error::CalcError;

use std::env;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
  let calculator = Calculator::common();
  let args: Vec<String> = env::args().skip(1).collect();
  if !args.is_empty() {
    let input = args.join(" ");
    return Ok(match calculator.value(&input) {
      Ok(value) => {
        println!("{value}");
        ExitCode::SUCCESS
      }
      Err(err) => {
        report_error(&input, &err);
        ExitCode::FAILURE
      }
    });
  }
  repl(&calculator)?;
  Ok(ExitCode::SUCCESS)
}

fn repl(calculator: &Calculator) -> Result<()> {
  let stdin = io::stdin();
  let mut stdout = io::stdout();
  loop {
    write!(stdout, "> ")?;
    stdout.flush()?;
    let mut line = String::new();
    if stdin.lock().read_line(&mut line)? == 0 {
      return Ok(());
    }
    let input = line.trim();
    if input.is_empty() {
      continue;
    }
    if input == "quit" || input == "exit" {
      return Ok(());
    }
    run_command(calculator, input);
  }
}

fn run_command(calculator: &Calculator, input: &str) {
  if let Some(rest) = input.strip_prefix(":tokens ") {
    match calculator.calculate(rest.trim()) {
      Ok(calculation) => println!("{}", calculation.tokens.iter().join(" ")),
      Err(err) => report_error(rest.trim(), &err),
    }
  } else if let Some(rest) = input.strip_prefix(":tree ") {
    match calculator.calculate(rest.trim()) {
      Ok(calculation) => print!("{}", calculation.tree),
      Err(err) => report_error(rest.trim(), &err),
    }
  } else {
    match calculator.value(input) {
      Ok(value) => println!("{value}"),
      Err(err) => report_error(input, &err),
    }
  }
}

/// Prints the error, and a caret line pointing at the offending span
/// when the error carries one.
fn report_error(input: &str, err: &CalcError) {
  eprintln!("error: {err}");
  if let Some(span) = err.span() {
    eprintln!("  {input}");
    eprintln!("  {}{}", " ".repeat(span.start.0), "^".repeat(span.len().max(1)));
  }
}
