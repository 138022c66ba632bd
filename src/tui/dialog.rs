//! Standard modal boxes, each a nested screen run to completion.

use crate::error::ScreenResult;
use crate::types::Colors;
use crate::validate;

use super::screen::Screen;
use super::surface::Surface;
use super::theme;

const ACKNOWLEDGE_PROMPT: &str = "Press enter to continue...";
const DEFAULT_QUESTION: &str = "Would you like to proceed (y/n): ";

/// Show `message` until the user presses enter.
pub fn show_message(
    surface: &mut dyn Surface,
    header: &str,
    message: &str,
    colors: Colors,
) -> ScreenResult<()> {
    show_framed_message(surface, theme::BORDER, header, message, colors)
}

/// [`show_message`] inside `border` instead of the default frame.
pub fn show_framed_message(
    surface: &mut dyn Surface,
    border: &str,
    header: &str,
    message: &str,
    colors: Colors,
) -> ScreenResult<()> {
    let mut screen = Screen::titled(header).with_colors(colors).with_border(border);
    screen.add_text(message);
    screen.add_blank_lines(1);
    screen.add_input_with_colors(ACKNOWLEDGE_PROMPT, validate::text(), theme::ACKNOWLEDGE);
    screen.run(surface)?;
    Ok(())
}

/// A message box in error colors.
pub fn show_error(surface: &mut dyn Surface, header: &str, message: &str) -> ScreenResult<()> {
    show_message(surface, header, message, theme::ERROR)
}

/// A yes/no question in its own box.
///
/// ```no_run
/// # use consolescreen::tui::dialog::Confirmation;
/// # use consolescreen::tui::surface::CrosstermSurface;
/// # let mut surface = CrosstermSurface::new();
/// let delete = Confirmation::new("DELETE", "About to delete this record.")
///     .ask(&mut surface)?;
/// # Ok::<(), consolescreen::error::ScreenError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Confirmation {
    header: String,
    message: String,
    question: String,
    colors: Colors,
    border: String,
}

impl Confirmation {
    pub fn new(header: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            message: message.into(),
            question: DEFAULT_QUESTION.to_string(),
            colors: theme::CONFIRM,
            border: theme::BORDER.to_string(),
        }
    }

    pub fn question(mut self, question: impl Into<String>) -> Self {
        self.question = question.into();
        self
    }

    pub fn colors(mut self, colors: Colors) -> Self {
        self.colors = colors;
        self
    }

    pub fn border(mut self, border: impl Into<String>) -> Self {
        self.border = border.into();
        self
    }

    /// True only when the box completed with a "yes".
    pub fn ask(self, surface: &mut dyn Surface) -> ScreenResult<bool> {
        let mut screen = Screen::titled(&self.header)
            .with_colors(self.colors)
            .with_border(self.border);
        screen.add_text(self.message);
        screen.add_blank_lines(1);
        let answer = screen.add_input_with_colors(self.question, validate::yes_no(), theme::ANSWER);

        let completed = screen.run(surface)?.is_completed();
        Ok(completed && screen.response(answer).copied().unwrap_or(false))
    }
}
