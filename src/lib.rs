#![allow(clippy::module_inception)]

use std::sync::Arc;

pub mod errors;
pub mod lexer;
pub mod macros;

extern crate regex;

/// Byte offset into a named input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position(pub u32, pub Arc<String>);

/// Finds the line containing byte `position` of `content`.
///
/// Returns the 1-based line number, the line text and the offset of
/// `position` within that line, or `None` when `position` lies past the end.
pub fn get_line_at_position(content: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;

    if pos >= content.len() {
        return None;
    }

    let mut start = 0;
    let mut line_number = 1;

    for line in content.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            let line_pos = pos - start;
            return Some((line_number, line.to_string(), line_pos));
        }

        start = end;
        line_number += 1;
    }

    None
}

#[cfg(test)]
mod tests {
    use super::get_line_at_position;

    #[test]
    fn test_line_at_position() {
        let content = "keymaps 0-2\nkeycode 1 = Escape\n";

        assert_eq!(get_line_at_position(content, 0), Some((1, "keymaps 0-2\n".to_string(), 0)));
        assert_eq!(get_line_at_position(content, 14), Some((2, "keycode 1 = Escape\n".to_string(), 2)));
        assert_eq!(get_line_at_position(content, 200), None);
    }
}
