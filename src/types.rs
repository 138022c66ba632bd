//! Domain types for consolescreen.
//!
//! Plain data shared by the layout engine, the validators and the screen
//! loop. Nothing in here touches the terminal.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::tui::theme;

// ============================================================================
// PALETTE
// ============================================================================

/// The sixteen named console colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Black,
    DarkBlue,
    DarkGreen,
    DarkCyan,
    DarkRed,
    DarkMagenta,
    DarkYellow,
    Gray,
    DarkGray,
    Blue,
    Green,
    Cyan,
    Red,
    Magenta,
    Yellow,
    White,
}

/// A background/foreground pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Colors {
    pub background: Color,
    pub foreground: Color,
}

impl Colors {
    pub const fn new(background: Color, foreground: Color) -> Self {
        Self {
            background,
            foreground,
        }
    }
}

// ============================================================================
// RENDERABLE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Justification {
    #[default]
    Left,
    Center,
}

/// The smallest display unit.
///
/// With `tiling` set, `text` is not content but a pattern: each of its
/// lines is repeated and truncated to fill exactly one rendered line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Renderable {
    pub text: String,
    pub tiling: bool,
    /// Replaces the screen's border for the lines of this piece only.
    pub border: Option<String>,
    pub justification: Justification,
    pub background: Option<Color>,
    pub foreground: Option<Color>,
}

impl Renderable {
    /// Literal text, left-justified, in the screen's colors.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// A tiling pattern, one rendered line per pattern line.
    pub fn tiled(pattern: impl Into<String>) -> Self {
        Self {
            text: pattern.into(),
            tiling: true,
            ..Default::default()
        }
    }

    pub fn centered(mut self) -> Self {
        self.justification = Justification::Center;
        self
    }

    pub fn with_border(mut self, border: impl Into<String>) -> Self {
        self.border = Some(border.into());
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn with_foreground(mut self, color: Color) -> Self {
        self.foreground = Some(color);
        self
    }

    pub fn with_colors(self, colors: Colors) -> Self {
        self.with_background(colors.background)
            .with_foreground(colors.foreground)
    }

    /// Piece colors, falling back to the given defaults slot by slot.
    pub fn resolve_colors(&self, defaults: Colors) -> Colors {
        Colors {
            background: self.background.unwrap_or(defaults.background),
            foreground: self.foreground.unwrap_or(defaults.foreground),
        }
    }
}

// ============================================================================
// VALIDATION RESULTS
// ============================================================================

/// What a validator made of one raw response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validated<T> {
    /// Accepted; the field is answered with this value.
    Valid(T),
    /// Rejected; the same field is asked again. A message, when present,
    /// is shown in an error box first.
    Retry(Option<String>),
    /// Abandon the whole screen.
    Cancel,
}

impl<T> Validated<T> {
    pub fn retry(message: impl Into<String>) -> Self {
        Validated::Retry(Some(message.into()))
    }

    /// Retry without an error box, for when the user was already told why.
    pub fn silent_retry() -> Self {
        Validated::Retry(None)
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Validated::Valid(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Validated<U> {
        match self {
            Validated::Valid(value) => Validated::Valid(f(value)),
            Validated::Retry(message) => Validated::Retry(message),
            Validated::Cancel => Validated::Cancel,
        }
    }
}

/// How a screen's interaction loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every input field holds an accepted value.
    Completed,
    /// A validator cancelled.
    Cancelled,
}

impl Outcome {
    pub fn is_completed(self) -> bool {
        self == Outcome::Completed
    }
}

// ============================================================================
// MONEY
// ============================================================================

/// An exact amount in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoneyParseError(String);

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "not a whole number of cents: {:?}", self.0)
    }
}

impl std::error::Error for MoneyParseError {}

impl FromStr for Money {
    type Err = MoneyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::parse(s)
            .and_then(|d| d.to_money())
            .ok_or_else(|| MoneyParseError(s.to_string()))
    }
}

impl TryFrom<String> for Money {
    type Error = MoneyParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Money> for String {
    fn from(money: Money) -> Self {
        money.to_string()
    }
}

/// Most digits accepted in a typed amount; keeps the mantissa well inside i128.
const MAX_DECIMAL_DIGITS: usize = 28;

/// A typed decimal kept exactly as entered: `mantissa × 10^-scale`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Decimal {
    mantissa: i128,
    scale: u32,
}

impl Decimal {
    /// Parse `[+-]digits[.digits]`, surrounding whitespace allowed.
    pub(crate) fn parse(s: &str) -> Option<Decimal> {
        let s = s.trim();
        let (negative, unsigned) = match s.as_bytes().first()? {
            b'-' => (true, &s[1..]),
            b'+' => (false, &s[1..]),
            _ => (false, s),
        };

        let (whole, fraction) = match unsigned.split_once('.') {
            Some((w, f)) => (w, f),
            None => (unsigned, ""),
        };

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty())
            || !all_digits(whole)
            || !all_digits(fraction)
            || whole.len() + fraction.len() > MAX_DECIMAL_DIGITS
        {
            return None;
        }

        let digits = format!("{}{}", whole, fraction);
        let magnitude: i128 = digits.parse().ok()?;
        Some(Decimal {
            mantissa: if negative { -magnitude } else { magnitude },
            scale: fraction.len() as u32,
        })
    }

    pub(crate) fn is_positive(&self) -> bool {
        self.mantissa > 0
    }

    /// True when the value has a non-zero digit past the cents.
    pub(crate) fn has_sub_cent(&self) -> bool {
        self.scale > 2 && self.mantissa % 10i128.pow(self.scale - 2) != 0
    }

    pub(crate) fn exceeds(&self, max: Money) -> bool {
        let max = i128::from(max.cents());
        if self.scale > 2 {
            let unit = 10i128.pow(self.scale - 2);
            let cents = self.mantissa.div_euclid(unit);
            let rest = self.mantissa.rem_euclid(unit);
            cents > max || (cents == max && rest > 0)
        } else {
            self.mantissa * 10i128.pow(2 - self.scale) > max
        }
    }

    pub(crate) fn to_money(self) -> Option<Money> {
        if self.has_sub_cent() {
            return None;
        }
        let cents = if self.scale > 2 {
            self.mantissa / 10i128.pow(self.scale - 2)
        } else {
            self.mantissa * 10i128.pow(2 - self.scale)
        };
        i64::try_from(cents).ok().map(Money)
    }
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Default colors and border shared by every field of a screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenStyle {
    pub colors: Colors,
    /// Left border; the right border is its mirror image.
    pub border: String,
}

impl Default for ScreenStyle {
    fn default() -> Self {
        Self {
            colors: theme::SCREEN,
            border: theme::BORDER.to_string(),
        }
    }
}

/// Tunable bounds for the standard validators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Email domains accepted without asking the user to double-check.
    pub recognised_domains: Vec<String>,
    /// Largest amount the money validator accepts.
    pub max_amount: Money,
    /// Upper length bound for free text.
    pub max_text_length: usize,
}

/// Ceiling for monetary input: 103.5 billion.
pub const DEFAULT_MAX_AMOUNT: Money = Money::from_cents(103_500_000_000 * 100);

pub const DEFAULT_MAX_TEXT_LENGTH: usize = 1_000;

pub const DEFAULT_RECOGNISED_DOMAINS: &[&str] =
    &["outlook.com", "gmail.com", "uts.edu.au", "student.uts.edu.au"];

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            recognised_domains: DEFAULT_RECOGNISED_DOMAINS
                .iter()
                .map(|d| d.to_string())
                .collect(),
            max_amount: DEFAULT_MAX_AMOUNT,
            max_text_length: DEFAULT_MAX_TEXT_LENGTH,
        }
    }
}

/// Everything loadable from the config file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub style: ScreenStyle,
    pub validation: ValidationConfig,
}

// ============================================================================
// TESTS
// ============================================================================
