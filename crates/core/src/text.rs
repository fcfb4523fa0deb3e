//! Sign text layout.
//!
//! Display surfaces hold a fixed number of fixed-width lines. Labels are normalized first
//! (whitespace collapsed, over-long words broken at the line width), then greedily packed
//! into lines. Anything that does not fit in the line budget is dropped.

use serde::{Deserialize, Serialize};

/// Line budget of a single display surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignBudget {
    /// Maximum number of lines on the surface.
    pub max_lines: usize,
    /// Maximum characters per line.
    pub line_width: usize,
}

impl SignBudget {
    /// Four lines of fifteen characters, the size of a wall sign.
    pub const WALL_SIGN: Self = Self {
        max_lines: 4,
        line_width: 15,
    };
}

impl Default for SignBudget {
    fn default() -> Self {
        Self::WALL_SIGN
    }
}

/// Split `message` into words no longer than `width` characters.
fn pieces(message: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    let mut out = Vec::new();
    for word in message.split_whitespace() {
        let chars: Vec<char> = word.chars().collect();
        for chunk in chars.chunks(width) {
            out.push(chunk.iter().collect());
        }
    }
    out
}

/// Normalized form of `message` for a surface `width` characters wide.
///
/// Whitespace runs collapse to a single space and words longer than `width` are broken into
/// `width`-sized pieces separated by spaces.
pub fn normalize(message: &str, width: usize) -> String {
    pieces(message, width).join(" ")
}

/// Wrap `message` into at most `budget.max_lines` lines of at most `budget.line_width` chars.
///
/// Joining the result with single spaces always yields a prefix of [`normalize`]d input.
pub fn wrap(message: &str, budget: SignBudget) -> Vec<String> {
    let width = budget.line_width;
    let mut lines = Vec::with_capacity(budget.max_lines);
    if budget.max_lines == 0 {
        return lines;
    }

    let mut current = String::new();
    let mut current_len = 0usize;
    for piece in pieces(message, width) {
        let piece_len = piece.chars().count();
        if current_len == 0 {
            current = piece;
            current_len = piece_len;
        } else if current_len + 1 + piece_len <= width {
            current.push(' ');
            current.push_str(&piece);
            current_len += 1 + piece_len;
        } else {
            lines.push(std::mem::take(&mut current));
            if lines.len() == budget.max_lines {
                return lines;
            }
            current = piece;
            current_len = piece_len;
        }
    }
    if current_len > 0 {
        lines.push(current);
    }
    lines
}
