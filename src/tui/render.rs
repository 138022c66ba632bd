//! Drawing laid-out lines onto a surface.
//!
//! Colors switch three times per line: screen colors for the border and
//! left padding, the piece's colors for its text, and screen colors again
//! for the right padding and closing border.

use crate::error::ScreenResult;
use crate::layout::{FramedLine, empty_line, lay_out, mirror_border};
use crate::types::{Renderable, ScreenStyle};

use super::surface::{CursorPos, Surface};

/// Draw `pieces` one framed line at a time.
///
/// With `track_cursor`, returns the cell just after the last text drawn,
/// which is where a typed response should continue. Pieces with no text
/// still get one empty line, so the response has a row inside the frame.
pub fn draw_pieces(
    surface: &mut dyn Surface,
    pieces: &[Renderable],
    style: &ScreenStyle,
    terminal_width: u16,
    track_cursor: bool,
) -> ScreenResult<Option<CursorPos>> {
    let mut cursor = None;
    for piece in pieces {
        for line in lay_out(piece, style, terminal_width) {
            let end = draw_line(surface, &line, style, track_cursor)?;
            cursor = end.or(cursor);
        }
    }

    if track_cursor && cursor.is_none() {
        let blank = empty_line(pieces.first(), style, terminal_width);
        cursor = draw_line(surface, &blank, style, true)?;
    }
    Ok(cursor)
}

fn draw_line(
    surface: &mut dyn Surface,
    line: &FramedLine,
    style: &ScreenStyle,
    track_cursor: bool,
) -> ScreenResult<Option<CursorPos>> {
    surface.set_colors(style.colors)?;
    surface.write(&line.border)?;
    surface.write(&" ".repeat(line.left_pad))?;

    surface.set_colors(line.colors)?;
    surface.write(&line.text)?;
    let end = if track_cursor {
        Some(surface.cursor_position()?)
    } else {
        None
    };

    surface.set_colors(style.colors)?;
    surface.write(&" ".repeat(line.right_pad))?;
    surface.write(&mirror_border(&line.border))?;
    surface.end_line()?;
    Ok(end)
}
