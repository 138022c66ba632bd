//! Field model: the closed set of things a screen is made of.
//!
//! `Text` only displays. `Input` and `Password` own a validator and an
//! answer that moves one way, from unanswered to answered.

use std::any::Any;
use std::fmt::Display;
use std::marker::PhantomData;

use crate::error::{ScreenError, ScreenResult};
use crate::types::{Colors, Renderable, Validated};
use crate::validate::Validator;

use super::surface::{CursorPos, Key, Surface};
use super::theme;

// ============================================================================
// FIELD
// ============================================================================

pub(crate) enum Field {
    Text(TextField),
    Input(Box<dyn InputSlot>),
    Password(PasswordField),
}

impl Field {
    /// True for an input field still waiting for an accepted value.
    pub(crate) fn accepts_input(&self) -> bool {
        match self {
            Field::Text(_) => false,
            Field::Input(input) => input.accepts_input(),
            Field::Password(password) => password.input.accepts_input(),
        }
    }

    pub(crate) fn pieces(&self) -> Vec<Renderable> {
        match self {
            Field::Text(text) => text.pieces.clone(),
            Field::Input(input) => vec![input.piece()],
            Field::Password(password) => vec![password.piece()],
        }
    }

    /// Input and password fields; the renderer reports where their text ends.
    pub(crate) fn is_input(&self) -> bool {
        !matches!(self, Field::Text(_))
    }

    pub(crate) fn set_cursor(&mut self, pos: CursorPos) {
        match self {
            Field::Text(_) => {}
            Field::Input(input) => input.set_cursor(pos),
            Field::Password(password) => password.input.cursor = Some(pos),
        }
    }

    /// Acquire a raw response and run it through the validator.
    ///
    /// # Panics
    ///
    /// On a text field: only input fields can respond.
    pub(crate) fn read_and_validate(
        &mut self,
        surface: &mut dyn Surface,
    ) -> ScreenResult<Validated<()>> {
        match self {
            Field::Text(_) => panic!("a text field cannot respond"),
            Field::Input(input) => input.read_and_validate(surface),
            Field::Password(password) => password.read_and_validate(surface),
        }
    }

    pub(crate) fn answer(&self) -> Option<&dyn Any> {
        match self {
            Field::Text(_) => None,
            Field::Input(input) => input.answer(),
            Field::Password(password) => password.input.answer().map(|a| a as &dyn Any),
        }
    }
}

/// Handle to an input field's answer, returned when the field is added.
pub struct Response<T> {
    pub(crate) index: usize,
    _type: PhantomData<fn() -> T>,
}

impl<T> Response<T> {
    pub(crate) fn new(index: usize) -> Self {
        Self {
            index,
            _type: PhantomData,
        }
    }
}

impl<T> Clone for Response<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Response<T> {}

impl<T> std::fmt::Debug for Response<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Response").field("index", &self.index).finish()
    }
}

// ============================================================================
// TEXT
// ============================================================================

/// Display-only pieces.
pub(crate) struct TextField {
    pieces: Vec<Renderable>,
}

impl TextField {
    pub(crate) fn new(pieces: Vec<Renderable>) -> Self {
        Self { pieces }
    }
}

// ============================================================================
// INPUT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Answer<T> {
    Unanswered,
    Answered(T),
}

/// A prompt, its validator, and the answer so far.
pub(crate) struct InputField<T> {
    prompt: String,
    validator: Validator<T>,
    colors: Colors,
    answer: Answer<T>,
    /// Where the prompt ended on the last render.
    cursor: Option<CursorPos>,
}

impl<T: 'static> InputField<T> {
    pub(crate) fn new(prompt: String, validator: Validator<T>, colors: Colors) -> Self {
        Self {
            prompt,
            validator,
            colors,
            answer: Answer::Unanswered,
            cursor: None,
        }
    }

    fn accepts_input(&self) -> bool {
        matches!(self.answer, Answer::Unanswered)
    }

    fn answer(&self) -> Option<&T> {
        match &self.answer {
            Answer::Answered(value) => Some(value),
            Answer::Unanswered => None,
        }
    }

    /// Prompt and shown response as one piece, so they wrap together.
    fn piece_showing(&self, shown: &str) -> Renderable {
        Renderable::text(format!("{}{}", self.prompt, shown)).with_colors(self.colors)
    }

    fn move_to_response(&self, surface: &mut dyn Surface) -> ScreenResult<()> {
        if let Some(pos) = self.cursor {
            surface.move_cursor(pos)?;
        }
        Ok(())
    }

    /// Validate `raw` and record an accepted value.
    fn submit(&mut self, raw: &str, surface: &mut dyn Surface) -> ScreenResult<Validated<()>> {
        let result = self.validator.validate(raw, surface)?;
        Ok(result.map(|value| self.answer = Answer::Answered(value)))
    }
}

/// Type-erased view of an [`InputField`] so fields of any answer type sit
/// in one list.
pub(crate) trait InputSlot {
    fn accepts_input(&self) -> bool;
    fn piece(&self) -> Renderable;
    fn set_cursor(&mut self, pos: CursorPos);
    fn read_and_validate(&mut self, surface: &mut dyn Surface) -> ScreenResult<Validated<()>>;
    fn answer(&self) -> Option<&dyn Any>;
}

impl<T: Display + 'static> InputSlot for InputField<T> {
    fn accepts_input(&self) -> bool {
        InputField::accepts_input(self)
    }

    fn piece(&self) -> Renderable {
        let shown = InputField::answer(self)
            .map(ToString::to_string)
            .unwrap_or_default();
        self.piece_showing(&shown)
    }

    fn set_cursor(&mut self, pos: CursorPos) {
        self.cursor = Some(pos);
    }

    fn read_and_validate(&mut self, surface: &mut dyn Surface) -> ScreenResult<Validated<()>> {
        self.move_to_response(surface)?;
        let raw = surface.read_line()?;
        self.submit(&raw, surface)
    }

    fn answer(&self) -> Option<&dyn Any> {
        InputField::answer(self).map(|value| value as &dyn Any)
    }
}

// ============================================================================
// PASSWORD
// ============================================================================

/// A text input that never shows what was typed.
pub(crate) struct PasswordField {
    input: InputField<String>,
}

impl PasswordField {
    pub(crate) fn new(prompt: String, validator: Validator<String>, colors: Colors) -> Self {
        Self {
            input: InputField::new(prompt, validator, colors),
        }
    }

    fn piece(&self) -> Renderable {
        let len = self.input.answer().map_or(0, |p| p.chars().count());
        self.input
            .piece_showing(&theme::MASK.to_string().repeat(len))
    }

    fn read_and_validate(&mut self, surface: &mut dyn Surface) -> ScreenResult<Validated<()>> {
        self.input.move_to_response(surface)?;

        surface.begin_key_input()?;
        let raw = read_masked(surface);
        surface.end_key_input()?;

        self.input.submit(&raw?, surface)
    }
}

/// Collect keys up to Enter, echoing a mask glyph for each accepted char.
fn read_masked(surface: &mut dyn Surface) -> ScreenResult<String> {
    let mut buffer = String::new();
    loop {
        match surface.read_key()? {
            Key::Enter => return Ok(buffer),
            Key::Interrupt => return Err(ScreenError::Interrupted),
            Key::Backspace => {
                if buffer.pop().is_some() {
                    surface.write("\u{8} \u{8}")?;
                }
            }
            Key::Char(c) if is_password_char(c) => {
                buffer.push(c);
                surface.write(&theme::MASK.to_string())?;
            }
            Key::Char(_) => {}
        }
    }
}

/// Letters, digits, punctuation and whitespace; never control characters.
fn is_password_char(c: char) -> bool {
    c.is_alphanumeric() || c.is_ascii_punctuation() || c == ' ' || c == '\t'
}

// ============================================================================
// TESTS
// ============================================================================
