//! Lexical analysis of keymap source files.
//!
//! This module turns an octet stream into a flat sequence of tokens. It handles:
//!
//! - Keywords, case-insensitive, with one octet of lookahead for prefixes
//! - Decimal, hex (`0x..`) and unicode (`U+XXXX`) literals
//! - Quoted strings with backslash escapes and `\nnn` character literals
//! - Comments, spacing and `\`-newline line continuations
//! - The line-scoped lexer mode that turns bare words into literals

pub mod lexer;
pub mod stream;
pub mod tokens;
