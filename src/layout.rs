//! Layout of renderables into fixed-width framed lines.
//!
//! Pure functions, no I/O. Widths are terminal cells, so a wide CJK char
//! counts as two.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::types::{Colors, Justification, Renderable, ScreenStyle};

/// One framed output line, ready to be drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FramedLine {
    /// Left border; the right border is [`mirror_border`] of it.
    pub border: String,
    pub left_pad: usize,
    pub text: String,
    pub right_pad: usize,
    /// Colors for `text`. Border and padding use the screen's colors.
    pub colors: Colors,
}

/// Width left for content once `border` is drawn on both sides.
///
/// Zero when the border leaves no room.
pub fn available_width(terminal_width: u16, border: &str) -> usize {
    usize::from(terminal_width).saturating_sub(2 * border.width())
}

/// Cells taken by `c`; control chars take none.
fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Expand a tiling pattern into one line of exactly `width` chars per
/// pattern line.
pub fn expand_pattern(pattern: &str, width: usize) -> Vec<String> {
    split_lines(pattern)
        .map(|sub| repeat_to_width(sub, width))
        .collect()
}

/// Repeat `sub` until it covers `width` cells, then truncate to exactly
/// `width` cells.
///
/// An empty (or zero-width) pattern becomes `width` spaces. A wide char that
/// would straddle the last cell is replaced by spaces.
pub fn repeat_to_width(sub: &str, width: usize) -> String {
    if sub.width() == 0 {
        return " ".repeat(width);
    }

    let mut line = String::new();
    let mut used = 0;
    for c in sub.chars().cycle() {
        let w = char_width(c);
        if used + w > width {
            break;
        }
        line.push(c);
        used += w;
    }
    line.push_str(&" ".repeat(width - used));
    line
}

/// Cut literal text into lines of at most `width` cells.
///
/// Explicit line breaks are honored; longer segments are cut at the last
/// char that fits, with no regard for words. Zero-width chars stay with the
/// char before them. Empty segments produce no line. A char wider than the
/// whole line gets a line of its own.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }

    let mut lines = Vec::new();
    for segment in split_lines(text) {
        let mut line = String::new();
        let mut used = 0;
        for c in segment.chars() {
            let w = char_width(c);
            if used + w > width && !line.is_empty() {
                lines.push(std::mem::take(&mut line));
                used = 0;
            }
            line.push(c);
            used += w;
        }
        if !line.is_empty() {
            lines.push(line);
        }
    }
    lines
}

/// `(left, right)` padding for a line `len` cells wide in `width`.
///
/// Centering gives the odd cell to the right.
pub fn padding(len: usize, width: usize, justification: Justification) -> (usize, usize) {
    let total = width.saturating_sub(len);
    match justification {
        Justification::Left => (0, total),
        Justification::Center => (total / 2, total - total / 2),
    }
}

/// The right-hand border: the left border read backwards, so `"| "`
/// closes as `" |"`.
pub fn mirror_border(border: &str) -> String {
    border.chars().rev().collect()
}

/// Lay out one renderable for a terminal `terminal_width` columns wide.
pub fn lay_out(piece: &Renderable, style: &ScreenStyle, terminal_width: u16) -> Vec<FramedLine> {
    let border = piece.border.as_deref().unwrap_or(&style.border);
    let width = available_width(terminal_width, border);
    let colors = piece.resolve_colors(style.colors);

    let lines = if piece.tiling {
        expand_pattern(&piece.text, width)
    } else {
        wrap_text(&piece.text, width)
    };

    lines
        .into_iter()
        // A zero-width tile has nothing to show.
        .filter(|line| !line.is_empty())
        .map(|text| {
            let (left_pad, right_pad) = padding(text.width(), width, piece.justification);
            FramedLine {
                border: border.to_string(),
                left_pad,
                text,
                right_pad,
                colors,
            }
        })
        .collect()
}

/// A line with no text, spanning the full width in `piece`'s border and
/// colors. Gives an input with an empty prompt somewhere to be typed.
pub fn empty_line(piece: Option<&Renderable>, style: &ScreenStyle, terminal_width: u16) -> FramedLine {
    let border = piece
        .and_then(|p| p.border.as_deref())
        .unwrap_or(&style.border);
    FramedLine {
        border: border.to_string(),
        left_pad: 0,
        text: String::new(),
        right_pad: available_width(terminal_width, border),
        colors: piece.map_or(style.colors, |p| p.resolve_colors(style.colors)),
    }
}

/// Split on `\n`, dropping a `\r` left before it.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line))
}

// ============================================================================
// TESTS
// ============================================================================
