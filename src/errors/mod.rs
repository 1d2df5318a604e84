//! Error types for the keymap tokenizer.
//!
//! Every failure is fatal for the lexer that produced it. Errors carry:
//!
//! - The byte offset and file name where scanning stopped
//! - The lexer mode and the buffered text at the time of failure
//! - A short suggestion for the command-line report

pub mod errors;

#[cfg(test)]
mod tests;
