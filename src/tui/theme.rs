//! Color semantics and frame constants.
//!
//! Centralized so every screen and dialog draws with the same palette.
//!
//! Color semantics:
//! - Green on black: ordinary screens
//! - Red on black: errors
//! - Yellow on black: questions that need a decision
//! - Black on green: "press enter" prompts

use crossterm::style::Color as TermColor;

use crate::types::{Color, Colors};

// ============================================================================
// SEMANTIC COLOR PAIRS
// ============================================================================

/// Default screen colors.
pub const SCREEN: Colors = Colors::new(Color::Black, Color::Green);

/// Error boxes.
pub const ERROR: Colors = Colors::new(Color::Black, Color::Red);

/// Confirmation boxes.
pub const CONFIRM: Colors = Colors::new(Color::Black, Color::Yellow);

/// The answer line of a confirmation box.
pub const ANSWER: Colors = Colors::new(Color::Black, Color::Green);

/// The "press enter" line of a message box.
pub const ACKNOWLEDGE: Colors = Colors::new(Color::Green, Color::Black);

// ============================================================================
// FRAME
// ============================================================================

/// Default left border of every line.
pub const BORDER: &str = "| ";

/// Border of the top and bottom rules.
pub const RULE_BORDER: &str = "+";

/// Tile of the top and bottom rules.
pub const RULE_TILE: &str = "=";

/// Mask glyph echoed for each password character.
pub const MASK: char = '*';

// ============================================================================
// TERMINAL MAPPING
// ============================================================================

impl From<Color> for TermColor {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => TermColor::Black,
            Color::DarkBlue => TermColor::DarkBlue,
            Color::DarkGreen => TermColor::DarkGreen,
            Color::DarkCyan => TermColor::DarkCyan,
            Color::DarkRed => TermColor::DarkRed,
            Color::DarkMagenta => TermColor::DarkMagenta,
            Color::DarkYellow => TermColor::DarkYellow,
            Color::Gray => TermColor::Grey,
            Color::DarkGray => TermColor::DarkGrey,
            Color::Blue => TermColor::Blue,
            Color::Green => TermColor::Green,
            Color::Cyan => TermColor::Cyan,
            Color::Red => TermColor::Red,
            Color::Magenta => TermColor::Magenta,
            Color::Yellow => TermColor::Yellow,
            Color::White => TermColor::White,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
