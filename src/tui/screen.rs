//! Screens: an ordered list of fields and the loop that fills them in.
//!
//! Loop, per pass:
//! 1. Find the first field still accepting input; none left means done.
//! 2. Clear and redraw everything, frame to frame.
//! 3. Read that field's raw response and validate it.
//! 4. Valid moves on, Retry redraws and asks again (after an error box
//!    when there is a message), Cancel ends the screen at once.
//!
//! Validators may run their own screens in the middle of step 3; the outer
//! screen just waits on the call stack.

use std::fmt::Display;

use tracing::{debug, info};
use unicode_width::UnicodeWidthStr;

use crate::art;
use crate::error::{ScreenError, ScreenResult};
use crate::layout::available_width;
use crate::types::{Colors, Outcome, Renderable, ScreenStyle, Validated};
use crate::validate::{self, Validator};

use super::dialog;
use super::field::{Field, InputField, PasswordField, Response, TextField};
use super::render::draw_pieces;
use super::surface::Surface;
use super::theme;

pub struct Screen {
    fields: Vec<Field>,
    style: ScreenStyle,
    top: Vec<Renderable>,
    bottom: Vec<Renderable>,
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    /// An empty screen in the default style.
    pub fn new() -> Self {
        Self::with_style(ScreenStyle::default())
    }

    pub fn with_style(style: ScreenStyle) -> Self {
        Self {
            fields: Vec::new(),
            style,
            top: art::top(),
            bottom: art::bottom(),
        }
    }

    /// A screen opening with the standard heading for `title`.
    pub fn titled(title: &str) -> Self {
        Self::new().header(art::as_header(title, &[]))
    }

    /// Replace the default colors.
    pub fn with_colors(mut self, colors: Colors) -> Self {
        self.style.colors = colors;
        self
    }

    /// Replace the default border; the right border mirrors it.
    pub fn with_border(mut self, border: impl Into<String>) -> Self {
        self.style.border = border.into();
        self
    }

    /// Append decorative pieces, typically a heading from [`art::as_header`].
    pub fn header(mut self, pieces: impl IntoIterator<Item = Renderable>) -> Self {
        self.add_art(pieces);
        self
    }

    pub fn style(&self) -> &ScreenStyle {
        &self.style
    }

    // ------------------------------------------------------------------------
    // Building
    // ------------------------------------------------------------------------

    /// Left-justified text in the screen's colors.
    pub fn add_text(&mut self, text: impl Into<String>) {
        let piece = Renderable::text(text).with_colors(self.style.colors);
        self.add_piece(piece);
    }

    /// A single piece of text with its own justification, colors or border.
    pub fn add_piece(&mut self, piece: Renderable) {
        self.fields.push(Field::Text(TextField::new(vec![piece])));
    }

    pub fn add_art(&mut self, pieces: impl IntoIterator<Item = Renderable>) {
        self.fields
            .push(Field::Text(TextField::new(pieces.into_iter().collect())));
    }

    pub fn add_blank_lines(&mut self, lines: usize) {
        self.add_art(art::blank_lines(lines));
    }

    /// A tiled line, one row per line of `pattern`.
    pub fn add_separator(&mut self, pattern: &str) {
        self.add_art([Renderable::tiled(pattern)]);
    }

    /// A question answered through `validator`, e.g. `"Age: "`.
    pub fn add_input<T: Display + 'static>(
        &mut self,
        prompt: impl Into<String>,
        validator: Validator<T>,
    ) -> Response<T> {
        let colors = self.style.colors;
        self.add_input_with_colors(prompt, validator, colors)
    }

    pub fn add_input_with_colors<T: Display + 'static>(
        &mut self,
        prompt: impl Into<String>,
        validator: Validator<T>,
        colors: Colors,
    ) -> Response<T> {
        let field = InputField::new(prompt.into(), validator, colors);
        self.push_input(Field::Input(Box::new(field)))
    }

    /// A question whose answer is masked as it is typed.
    pub fn add_password(&mut self, prompt: impl Into<String>) -> Response<String> {
        self.add_password_checked(prompt, validate::text())
    }

    /// A masked question with its own validator, e.g. a configured length.
    pub fn add_password_checked(
        &mut self,
        prompt: impl Into<String>,
        validator: Validator<String>,
    ) -> Response<String> {
        let colors = self.style.colors;
        self.add_password_with_colors(prompt, validator, colors)
    }

    pub fn add_password_with_colors(
        &mut self,
        prompt: impl Into<String>,
        validator: Validator<String>,
        colors: Colors,
    ) -> Response<String> {
        let field = PasswordField::new(prompt.into(), validator, colors);
        self.push_input(Field::Password(field))
    }

    fn push_input<T>(&mut self, field: Field) -> Response<T> {
        self.fields.push(field);
        Response::new(self.fields.len() - 1)
    }

    /// The accepted answer behind `response`, if the field has one yet.
    ///
    /// # Panics
    ///
    /// If `response` was handed out by another screen.
    pub fn response<T: 'static>(&self, response: Response<T>) -> Option<&T> {
        let field = self
            .fields
            .get(response.index)
            .filter(|field| field.is_input())
            .unwrap_or_else(|| panic!("response handle {} is not an input of this screen", response.index));
        field.answer().map(|answer| {
            answer
                .downcast_ref::<T>()
                .unwrap_or_else(|| panic!("response handle {} has the wrong type", response.index))
        })
    }

    // ------------------------------------------------------------------------
    // Running
    // ------------------------------------------------------------------------

    /// Show the screen until every input is answered or a validator cancels.
    ///
    /// A screen without inputs completes at once, without blocking.
    pub fn run(&mut self, surface: &mut dyn Surface) -> ScreenResult<Outcome> {
        while let Some(index) = self.next_input() {
            self.render(surface)?;

            debug!(field = index, "reading response");
            match self.fields[index].read_and_validate(surface)? {
                Validated::Valid(()) => debug!(field = index, "response accepted"),
                Validated::Retry(message) => {
                    debug!(field = index, ?message, "response rejected");
                    if let Some(message) = message.filter(|m| !m.is_empty()) {
                        dialog::show_framed_message(
                            surface,
                            &self.style.border,
                            "Error",
                            &message,
                            theme::ERROR,
                        )?;
                    }
                }
                Validated::Cancel => {
                    info!(field = index, "screen cancelled");
                    return Ok(Outcome::Cancelled);
                }
            }
        }

        debug!("screen completed");
        Ok(Outcome::Completed)
    }

    fn next_input(&self) -> Option<usize> {
        self.fields.iter().position(Field::accepts_input)
    }

    /// Clear and draw the whole screen from its current field states.
    fn render(&mut self, surface: &mut dyn Surface) -> ScreenResult<()> {
        let width = surface.width()?;
        if available_width(width, &self.style.border) == 0 {
            return Err(ScreenError::TerminalTooNarrow {
                width,
                border: self.style.border.width(),
            });
        }

        debug!(width, fields = self.fields.len(), "render pass");
        surface.clear()?;
        draw_pieces(surface, &self.top, &self.style, width, false)?;
        for field in &mut self.fields {
            let track = field.is_input();
            if let Some(pos) = draw_pieces(surface, &field.pieces(), &self.style, width, track)? {
                field.set_cursor(pos);
            }
        }
        draw_pieces(surface, &self.bottom, &self.style, width, false)?;
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::tui::surface::{CursorPos, Key, ScriptedSurface};
    use crate::types::Color;

    #[test]
    fn screen_without_inputs_completes_without_blocking() {
        let mut screen = Screen::titled("Menu");
        screen.add_text("1. Create");
        let mut surface = ScriptedSurface::new(40);
        assert_eq!(screen.run(&mut surface).unwrap(), Outcome::Completed);
        assert!(surface.frames.is_empty());
        assert_eq!(surface.line_reads, 0);
    }

    #[test]
    fn frame_layout_top_to_bottom() {
        let mut screen = Screen::new();
        screen.add_text("hi");
        let mut surface = ScriptedSurface::new(10);
        screen.render(&mut surface).unwrap();
        assert_eq!(
            surface.last_frame(),
            ["+========+", "|        |", "| hi     |", "|        |", "+========+"]
        );
    }

    #[test]
    fn invalid_then_valid_renders_twice() {
        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        let validator = Validator::new(move |raw: &str| {
            seen.set(seen.get() + 1);
            match raw {
                "ok" => Validated::Valid(raw.to_string()),
                _ => Validated::retry("try ok"),
            }
        });

        let mut screen = Screen::new();
        screen.add_text("Intro");
        let answer = screen.add_input("Word: ", validator);

        // bad, acknowledge the error box, good
        let mut surface = ScriptedSurface::new(40).with_lines(["bad", "", "ok"]);
        assert_eq!(screen.run(&mut surface).unwrap(), Outcome::Completed);

        assert_eq!(surface.frames_containing("Intro"), 2);
        assert_eq!(surface.frames_containing("try ok"), 1);
        assert_eq!(calls.get(), 2);
        assert_eq!(screen.response(answer).map(String::as_str), Some("ok"));
    }

    #[test]
    fn silent_retry_shows_no_error_box() {
        let first = Rc::new(Cell::new(true));
        let validator = Validator::new(move |raw: &str| {
            if first.replace(false) {
                Validated::silent_retry()
            } else {
                Validated::Valid(raw.len())
            }
        });

        let mut screen = Screen::new();
        let answer = screen.add_input("Word: ", validator);
        let mut surface = ScriptedSurface::new(40).with_lines(["a", "abc"]);
        screen.run(&mut surface).unwrap();

        assert_eq!(surface.frames.len(), 2);
        assert_eq!(screen.response(answer), Some(&3));
    }

    #[test]
    fn answered_fields_are_not_revalidated() {
        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        let first = Validator::new(move |raw: &str| {
            seen.set(seen.get() + 1);
            Validated::Valid(raw.to_string())
        });

        let mut screen = Screen::new();
        let name = screen.add_input("Name: ", first);
        let age = screen.add_input("Age: ", validate::number_between(0, 130));
        let mut surface = ScriptedSurface::new(40).with_lines(["Jo", "200", "", "30"]);
        screen.run(&mut surface).unwrap();

        assert_eq!(calls.get(), 1);
        assert_eq!(screen.response(name).map(String::as_str), Some("Jo"));
        assert_eq!(screen.response(age), Some(&30));
        // Every redraw after the first answer still shows it.
        assert_eq!(surface.frames_containing("Name: Jo"), 2);
        assert!(surface.last_frame().iter().any(|l| l.contains("Age: ")));
    }

    #[test]
    fn cancel_stops_without_redrawing() {
        let mut screen = Screen::new();
        let first = screen.add_input("First: ", Validator::new(|_: &str| Validated::<String>::Cancel));
        let second = screen.add_input("Second: ", validate::text());
        let mut surface = ScriptedSurface::new(40).with_lines(["x", "y"]);

        assert_eq!(screen.run(&mut surface).unwrap(), Outcome::Cancelled);
        assert_eq!(surface.frames.len(), 1);
        assert_eq!(surface.line_reads, 1);
        assert!(screen.response(first).is_none());
        assert!(screen.response(second).is_none());
    }

    #[test]
    fn response_continues_where_prompt_ends() {
        let mut screen = Screen::new();
        screen.add_input("Name: ", validate::text());
        let mut surface = ScriptedSurface::new(40).with_lines(["Jo"]);
        screen.run(&mut surface).unwrap();
        // Top rule and blank line above; border "| " before the prompt.
        assert_eq!(surface.moves[0].row, 2);
        assert_eq!(surface.moves[0].column, 2 + "Name: ".len() as u16);
    }

    #[test]
    fn password_is_masked_on_redraw() {
        let mut screen = Screen::new();
        let password = screen.add_password("Password: ");
        let code = screen.add_input("Code: ", validate::number_between(1, 9));
        let keys = [Key::Char('p'), Key::Char('w'), Key::Enter];
        let mut surface = ScriptedSurface::new(40).with_keys(keys).with_lines(["5"]);
        screen.run(&mut surface).unwrap();

        assert_eq!(screen.response(password).map(String::as_str), Some("pw"));
        assert_eq!(screen.response(code), Some(&5));
        assert!(surface.last_frame().iter().any(|l| l.contains("Password: **")));
        assert_eq!(surface.frames_containing("pw"), 0);
    }

    #[test]
    fn nested_confirmation_runs_inside_a_validator() {
        let mut screen = Screen::titled("Find");
        let found = screen.add_input(
            "ID: ",
            validate::lookup("record", |id| (id == 7).then_some("seven")),
        );
        // miss -> try again (y) -> hit
        let mut surface = ScriptedSurface::new(50).with_lines(["3", "y", "7"]);
        assert_eq!(screen.run(&mut surface).unwrap(), Outcome::Completed);
        assert_eq!(screen.response(found), Some(&"seven"));
        assert_eq!(surface.frames_containing("Find"), 2);
        assert_eq!(surface.frames_containing("Not found"), 1);
    }

    #[test]
    fn declined_lookup_cancels_the_outer_screen() {
        let mut screen = Screen::new();
        screen.add_input("ID: ", validate::lookup("record", |_| None::<String>));
        screen.add_input("Amount: ", validate::money());
        let mut surface = ScriptedSurface::new(50).with_lines(["3", "n"]);
        assert_eq!(screen.run(&mut surface).unwrap(), Outcome::Cancelled);
        assert_eq!(surface.line_reads, 2);
    }

    #[test]
    fn screen_colors_frame_every_line() {
        let colors = Colors::new(Color::Yellow, Color::Red);
        let mut screen = Screen::new().with_colors(colors);
        screen.add_text("x");
        let mut surface = ScriptedSurface::new(20);
        screen.render(&mut surface).unwrap();
        assert_eq!(surface.colors[0], colors);
        assert!(surface.colors.iter().all(|c| *c == colors));
    }

    #[test]
    fn too_narrow_terminal_is_fatal() {
        let mut screen = Screen::new();
        screen.add_input("x", validate::text());
        let mut surface = ScriptedSurface::new(4);
        let err = screen.run(&mut surface).unwrap_err();
        assert!(matches!(err, ScreenError::TerminalTooNarrow { width: 4, border: 2 }));
    }

    #[test]
    fn too_narrow_reports_the_border_in_cells() {
        let mut screen = Screen::new().with_border("名 ");
        screen.add_input("x", validate::text());
        let mut surface = ScriptedSurface::new(6);
        let err = screen.run(&mut surface).unwrap_err();
        assert!(matches!(err, ScreenError::TerminalTooNarrow { width: 6, border: 3 }));
    }

    #[test]
    fn running_out_of_input_is_an_error() {
        let mut screen = Screen::new();
        screen.add_input("x", validate::text());
        let mut surface = ScriptedSurface::new(40);
        assert!(matches!(screen.run(&mut surface), Err(ScreenError::Io(_))));
    }

    #[test]
    fn separator_tiles_its_pattern() {
        let mut screen = Screen::new();
        screen.add_separator("-");
        let mut surface = ScriptedSurface::new(10);
        screen.render(&mut surface).unwrap();
        assert!(surface.last_frame().contains(&"| ------ |".to_string()));
    }

    #[test]
    fn wide_text_keeps_the_frame_width() {
        let mut screen = Screen::new();
        screen.add_text("名前名前");
        screen.add_text("名前名前名前");
        let mut surface = ScriptedSurface::new(12);
        screen.render(&mut surface).unwrap();

        let frame = surface.last_frame();
        assert!(frame.contains(&"| 名前名前 |".to_string()));
        assert!(frame.iter().all(|line| line.width() == 12), "{:?}", frame);
    }

    #[test]
    fn wide_answer_redraws_inside_the_frame() {
        let mut screen = Screen::new();
        screen.add_input("Name: ", validate::name());
        screen.add_input("Age: ", validate::number_between(0, 130));
        let mut surface = ScriptedSurface::new(16).with_lines(["名前", "30"]);
        screen.run(&mut surface).unwrap();

        let frame = surface.last_frame();
        assert!(frame.iter().any(|line| line.contains("Name: 名前")));
        assert!(frame.iter().all(|line| line.width() == 16), "{:?}", frame);
        // "| Age: " ends at column 7, on the row below the wide answer.
        assert_eq!(surface.moves[1], CursorPos { column: 7, row: 3 });
    }

    #[test]
    fn empty_prompt_reads_inside_the_frame() {
        let mut screen = Screen::new();
        let answer = screen.add_input("", validate::text());
        let mut surface = ScriptedSurface::new(10).with_lines(["x"]);
        screen.run(&mut surface).unwrap();

        assert_eq!(surface.moves, vec![CursorPos { column: 2, row: 2 }]);
        assert_eq!(
            surface.last_frame(),
            ["+========+", "|        |", "|        |", "|        |", "+========+"]
        );
        assert_eq!(screen.response(answer).map(String::as_str), Some("x"));
    }

    #[test]
    fn error_box_keeps_the_screen_border() {
        let mut screen = Screen::new().with_border("# ");
        screen.add_input("Age: ", validate::number_between(0, 9));
        let mut surface = ScriptedSurface::new(70).with_lines(["99", "", "5"]);
        screen.run(&mut surface).unwrap();

        let error_frame = &surface.frames[1];
        assert!(error_frame.iter().any(|l| l.starts_with("# Please input a number")));
        assert!(error_frame.iter().any(|l| l.starts_with("# Press enter to continue...")));
    }

    #[test]
    fn password_takes_a_custom_validator() {
        let mut screen = Screen::new();
        let password = screen.add_password_checked("PIN: ", validate::text_length(0, 4));
        let keys = [
            Key::Char('1'),
            Key::Char('2'),
            Key::Char('3'),
            Key::Char('4'),
            Key::Char('5'),
            Key::Enter,
            Key::Char('9'),
            Key::Enter,
        ];
        let mut surface = ScriptedSurface::new(60).with_keys(keys).with_lines([""]);
        screen.run(&mut surface).unwrap();

        assert_eq!(surface.frames_containing("at most 4"), 1);
        assert_eq!(screen.response(password).map(String::as_str), Some("9"));
    }

    #[test]
    #[should_panic(expected = "is not an input of this screen")]
    fn foreign_handle_panics() {
        let mut other = Screen::new();
        other.add_text("a");
        other.add_text("b");
        let handle = other.add_input("c", validate::text());

        let screen = Screen::new();
        let _ = screen.response(handle);
    }

    #[test]
    fn dialog_colors_come_from_theme() {
        let screen = Screen::titled("x").with_colors(theme::ERROR);
        assert_eq!(screen.style().colors, theme::ERROR);
    }
}
