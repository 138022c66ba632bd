//! Standard decorations built from renderables.
//!
//! The frame every screen is drawn in, blank spacer lines, and the heading
//! block that titles a screen.

use crate::tui::theme;
use crate::types::Renderable;

/// Tiled divider drawn under a heading.
const HEADING_WAVE: &str = "  _ \n_/ \\";

/// The top rule of every screen, followed by one blank line.
pub fn top() -> Vec<Renderable> {
    let mut pieces = vec![rule()];
    pieces.extend(blank_lines(1));
    pieces
}

/// One blank line, then the bottom rule of every screen.
pub fn bottom() -> Vec<Renderable> {
    let mut pieces = blank_lines(1);
    pieces.push(rule());
    pieces
}

/// `lines` empty rows.
pub fn blank_lines(lines: usize) -> Vec<Renderable> {
    if lines == 0 {
        return Vec::new();
    }
    vec![Renderable::tiled(vec![" "; lines].join("\n"))]
}

/// The wave divider between a heading and the screen's content.
pub fn border_heading() -> Vec<Renderable> {
    vec![Renderable::tiled(HEADING_WAVE)]
}

/// A heading: optional art, the centered title, and the divider with a
/// blank line on either side.
pub fn as_header(title: &str, art: &[Renderable]) -> Vec<Renderable> {
    let mut pieces = art.to_vec();
    pieces.push(Renderable::text(title).centered());
    pieces.extend(blank_lines(1));
    pieces.extend(border_heading());
    pieces.extend(blank_lines(1));
    pieces
}

fn rule() -> Renderable {
    Renderable::tiled(theme::RULE_TILE).with_border(theme::RULE_BORDER)
}
