//! Error taxonomy for environment failures.
//!
//! Only things the user cannot fix by typing end up here. Validation
//! rejection and cancellation are ordinary values (`Validated`, `Outcome`),
//! and contract violations panic.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScreenError {
    /// The terminal could not be drawn to or read from.
    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),

    /// No room is left for content once the border is drawn on both sides.
    #[error("terminal is {width} columns wide, too narrow for a {border}-column border")]
    TerminalTooNarrow { width: u16, border: usize },

    /// Ctrl+C while keystrokes were being intercepted.
    #[error("input interrupted")]
    Interrupted,

    /// A caller-supplied validation pattern does not compile.
    #[error("invalid validation pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("cannot read config {}: {source}", path.display())]
    ConfigRead { path: PathBuf, source: io::Error },

    #[error("cannot parse config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("cannot write config {}: {source}", path.display())]
    ConfigWrite { path: PathBuf, source: io::Error },
}

/// Result type for screen operations.
pub type ScreenResult<T> = Result<T, ScreenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_narrow_message_names_both_widths() {
        let err = ScreenError::TerminalTooNarrow { width: 4, border: 2 };
        assert_eq!(
            err.to_string(),
            "terminal is 4 columns wide, too narrow for a 2-column border"
        );
    }

    #[test]
    fn io_errors_convert() {
        let err: ScreenError = io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed").into();
        assert!(matches!(err, ScreenError::Io(ref e) if e.kind() == io::ErrorKind::UnexpectedEof));
    }
}
