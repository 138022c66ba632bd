//! The validator contract and the standard validators.
//!
//! A validator turns the raw text the user typed into a [`Validated`]
//! outcome. Most are pure; a few ask the user a follow-up question through
//! a nested confirmation box before deciding.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ScreenResult;
use crate::tui::dialog::Confirmation;
use crate::tui::surface::Surface;
use crate::types::{
    DEFAULT_MAX_AMOUNT, DEFAULT_MAX_TEXT_LENGTH, DEFAULT_RECOGNISED_DOMAINS, Decimal, Money,
    Validated,
};

type Check<T> = dyn Fn(&str, &mut dyn Surface) -> ScreenResult<Validated<T>>;

/// A check run on each raw response to one input field.
pub struct Validator<T> {
    check: Box<Check<T>>,
}

impl<T: 'static> Validator<T> {
    /// A pure validator.
    pub fn new(check: impl Fn(&str) -> Validated<T> + 'static) -> Self {
        Self {
            check: Box::new(move |raw, _| Ok(check(raw))),
        }
    }

    /// A validator that may run nested screens on the surface before deciding.
    pub fn interactive(
        check: impl Fn(&str, &mut dyn Surface) -> ScreenResult<Validated<T>> + 'static,
    ) -> Self {
        Self {
            check: Box::new(check),
        }
    }

    pub fn validate(&self, raw: &str, surface: &mut dyn Surface) -> ScreenResult<Validated<T>> {
        (self.check)(raw, surface)
    }
}

// ============================================================================
// TEXT
// ============================================================================

/// Any text up to the default length limit.
pub fn text() -> Validator<String> {
    text_length(0, DEFAULT_MAX_TEXT_LENGTH)
}

/// Text whose length lies in `min..=max` chars.
pub fn text_length(min: usize, max: usize) -> Validator<String> {
    Validator::new(move |raw| {
        let len = raw.chars().count();
        if (min..=max).contains(&len) {
            Validated::Valid(raw.to_string())
        } else {
            Validated::retry(format!(
                "Please enter at least {} characters and at most {}",
                min, max
            ))
        }
    })
}

/// Text matched in full by `pattern`; `requirements` is shown on mismatch.
pub fn matching(pattern: &str, requirements: &str) -> ScreenResult<Validator<String>> {
    let regex = Regex::new(&format!("^(?:{})$", pattern))?;
    Ok(matching_regex(regex, requirements.to_string()))
}

fn matching_regex(regex: Regex, requirements: String) -> Validator<String> {
    Validator::new(move |raw| {
        if regex.is_match(raw) {
            Validated::Valid(raw.to_string())
        } else {
            Validated::retry(requirements.clone())
        }
    })
}

static NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w\-]{2,}$").expect("name pattern compiles"));

/// A personal name: two or more word characters or hyphens.
pub fn name() -> Validator<String> {
    matching_regex(
        NAME.clone(),
        "A name must have atleast two letters and contain only alphanumerics, underscores and hyphens"
            .to_string(),
    )
}

// ============================================================================
// NUMBERS
// ============================================================================

/// An integer in `min..=max`.
pub fn number_between(min: i64, max: i64) -> Validator<i64> {
    Validator::new(move |raw| match raw.parse::<i64>() {
        Ok(n) if (min..=max).contains(&n) => Validated::Valid(n),
        _ => Validated::retry(format!(
            "Please input a number without spaces between {} & {}",
            min, max
        )),
    })
}

/// A positive amount in whole cents, up to the default ceiling.
pub fn money() -> Validator<Money> {
    money_up_to(DEFAULT_MAX_AMOUNT)
}

/// A positive amount in whole cents, no more than `max`.
pub fn money_up_to(max: Money) -> Validator<Money> {
    Validator::new(move |raw| {
        let amount = match Decimal::parse(raw) {
            Some(amount) if amount.is_positive() => amount,
            _ => return Validated::retry("Please enter a valid, positive number."),
        };
        if amount.exceeds(max) {
            return Validated::retry(
                "Wow, that's a lot of money. Sorry, we can't process that transaction.",
            );
        }
        match amount.to_money() {
            Some(money) => Validated::Valid(money),
            None => Validated::retry("You cannot add partial cents."),
        }
    })
}

// ============================================================================
// ANSWERS
// ============================================================================

static YES_NO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(y|n|yes|no)$").expect("yes/no pattern compiles"));

/// `y`, `n`, `yes` or `no` in any case; true for yes.
pub fn yes_no() -> Validator<bool> {
    Validator::new(|raw| {
        if YES_NO.is_match(raw) {
            Validated::Valid(raw.starts_with(['y', 'Y']))
        } else {
            Validated::retry("Please enter 'y' or 'n'.")
        }
    })
}

// ============================================================================
// EMAIL
// ============================================================================

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w+.]+@[\w.]+$").expect("email pattern compiles"));

/// An email address; unknown domains are double-checked with the user.
pub fn email() -> Validator<String> {
    email_with_domains(DEFAULT_RECOGNISED_DOMAINS.iter().map(|d| d.to_string()).collect())
}

/// An email address; domains outside `recognised` are double-checked with
/// the user, and a "no" asks for the address again.
pub fn email_with_domains(recognised: Vec<String>) -> Validator<String> {
    Validator::interactive(move |raw, surface| {
        if !EMAIL.is_match(raw) {
            return Ok(Validated::retry(
                "Please enter a valid email in the form xyz@abc.com",
            ));
        }

        let domain = raw.rsplit('@').next().unwrap_or_default();
        let known = recognised.iter().any(|d| d.eq_ignore_ascii_case(domain));
        if !known {
            tracing::debug!(domain, "unrecognised email domain");
            let confirmed = Confirmation::new(
                "Unrecognised email domain",
                format!(
                    "That email address is not from a recognised domain. Is {} correct?",
                    raw
                ),
            )
            .ask(surface)?;
            if !confirmed {
                return Ok(Validated::silent_retry());
            }
        }

        Ok(Validated::Valid(raw.to_string()))
    })
}

// ============================================================================
// LOOKUP
// ============================================================================

/// A record found by integer ID through `find`.
///
/// On a miss the user is asked whether to try again; "no" cancels the screen.
pub fn lookup<T: 'static>(
    noun: &str,
    find: impl Fn(i64) -> Option<T> + 'static,
) -> Validator<T> {
    let noun = noun.to_string();
    Validator::interactive(move |raw, surface| {
        if let Some(found) = raw.parse::<i64>().ok().and_then(&find) {
            return Ok(Validated::Valid(found));
        }

        tracing::debug!(raw, noun = noun.as_str(), "lookup missed");
        let again = Confirmation::new(
            "Not found",
            format!("No {} with that ID could be found.", noun),
        )
        .question("Would you like to try again (y/n)? ")
        .ask(surface)?;

        Ok(if again {
            Validated::silent_retry()
        } else {
            Validated::Cancel
        })
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::surface::ScriptedSurface;

    fn check<T: 'static>(validator: &Validator<T>, raw: &str) -> Validated<T> {
        let mut surface = ScriptedSurface::new(60);
        validator.validate(raw, &mut surface).unwrap()
    }

    fn is_retry<T>(v: &Validated<T>) -> bool {
        matches!(v, Validated::Retry(Some(_)))
    }

    // --- numbers ---

    #[test]
    fn number_bounds_are_inclusive() {
        let v = number_between(1, 7);
        assert_eq!(check(&v, "1"), Validated::Valid(1));
        assert_eq!(check(&v, "7"), Validated::Valid(7));
        assert!(is_retry(&check(&v, "0")));
        assert!(is_retry(&check(&v, "8")));
    }

    #[test]
    fn number_message_names_bounds() {
        let v = number_between(1, 7);
        assert_eq!(
            check(&v, "abc"),
            Validated::retry("Please input a number without spaces between 1 & 7")
        );
        assert!(is_retry(&check(&v, " 3")));
    }

    // --- text ---

    #[test]
    fn text_length_bounds_are_inclusive() {
        let v = text_length(3, 5);
        assert!(is_retry(&check(&v, "ab")));
        assert_eq!(check(&v, "abc"), Validated::Valid("abc".to_string()));
        assert_eq!(check(&v, "abcde"), Validated::Valid("abcde".to_string()));
        assert_eq!(
            check(&v, "abcdef"),
            Validated::retry("Please enter at least 3 characters and at most 5")
        );
    }

    #[test]
    fn default_text_accepts_empty() {
        assert_eq!(check(&text(), ""), Validated::Valid(String::new()));
    }

    #[test]
    fn pattern_must_match_whole_input() {
        let v = matching("[0-9]{3}", "three digits").unwrap();
        assert_eq!(check(&v, "123"), Validated::Valid("123".to_string()));
        assert_eq!(check(&v, "1234"), Validated::retry("three digits"));
        assert_eq!(check(&v, "a123"), Validated::retry("three digits"));
    }

    #[test]
    fn pattern_alternation_is_anchored_as_a_group() {
        let v = matching("ab|cd", "ab or cd").unwrap();
        assert!(is_retry(&check(&v, "abx")));
        assert!(is_retry(&check(&v, "xcd")));
        assert!(check(&v, "cd").is_valid());
    }

    #[test]
    fn bad_pattern_is_an_error() {
        assert!(matching("(", "never").is_err());
    }

    #[test]
    fn names_need_two_word_chars() {
        assert!(check(&name(), "Jo").is_valid());
        assert!(check(&name(), "Mary-Jane").is_valid());
        assert!(is_retry(&check(&name(), "J")));
        assert!(is_retry(&check(&name(), "Jo Ann")));
    }

    // --- money ---

    #[test]
    fn money_accepts_whole_cents() {
        assert_eq!(check(&money(), "10.00"), Validated::Valid(Money::from_cents(1000)));
        assert_eq!(check(&money(), "0.01"), Validated::Valid(Money::from_cents(1)));
    }

    #[test]
    fn money_rejects_sub_cent() {
        assert_eq!(
            check(&money(), "10.005"),
            Validated::retry("You cannot add partial cents.")
        );
    }

    #[test]
    fn money_rejects_non_positive() {
        let msg = Validated::retry("Please enter a valid, positive number.");
        assert_eq!(check(&money(), "-5"), msg);
        assert_eq!(check(&money(), "0"), msg);
        assert_eq!(check(&money(), "lots"), msg);
    }

    #[test]
    fn money_ceiling_is_inclusive() {
        let v = money_up_to(Money::from_cents(50_000));
        assert!(check(&v, "500.00").is_valid());
        assert_eq!(
            check(&v, "500.01"),
            Validated::retry("Wow, that's a lot of money. Sorry, we can't process that transaction.")
        );
    }

    #[test]
    fn money_default_ceiling() {
        assert!(check(&money(), "103500000000").is_valid());
        assert!(is_retry(&check(&money(), "103500000000.01")));
    }

    // --- yes/no ---

    #[test]
    fn yes_no_is_case_insensitive() {
        for yes in ["y", "Y", "yes", "YES"] {
            assert_eq!(check(&yes_no(), yes), Validated::Valid(true), "{}", yes);
        }
        for no in ["n", "no", "NO"] {
            assert_eq!(check(&yes_no(), no), Validated::Valid(false), "{}", no);
        }
        assert_eq!(check(&yes_no(), "maybe"), Validated::retry("Please enter 'y' or 'n'."));
        assert!(is_retry(&check(&yes_no(), "")));
    }

    // --- email ---

    #[test]
    fn email_shape_is_checked_first() {
        let mut surface = ScriptedSurface::new(60);
        let result = email().validate("not-an-email", &mut surface).unwrap();
        assert_eq!(
            result,
            Validated::retry("Please enter a valid email in the form xyz@abc.com")
        );
        assert!(surface.frames.is_empty());
    }

    #[test]
    fn recognised_domain_needs_no_confirmation() {
        let mut surface = ScriptedSurface::new(60);
        let result = email().validate("jo.bloggs+bank@Gmail.com", &mut surface).unwrap();
        assert_eq!(result, Validated::Valid("jo.bloggs+bank@Gmail.com".to_string()));
        assert!(surface.frames.is_empty());
    }

    #[test]
    fn unknown_domain_confirmed_is_valid() {
        let mut surface = ScriptedSurface::new(60).with_lines(["y"]);
        let result = email().validate("jo@example.org", &mut surface).unwrap();
        assert_eq!(result, Validated::Valid("jo@example.org".to_string()));
        assert_eq!(surface.frames_containing("Unrecognised email domain"), 1);
    }

    #[test]
    fn unknown_domain_declined_retries_silently() {
        let mut surface = ScriptedSurface::new(60).with_lines(["n"]);
        let result = email().validate("jo@example.org", &mut surface).unwrap();
        assert_eq!(result, Validated::Retry(None));
    }

    #[test]
    fn custom_domain_list() {
        let v = email_with_domains(vec!["example.org".to_string()]);
        let mut surface = ScriptedSurface::new(60);
        assert!(v.validate("jo@example.org", &mut surface).unwrap().is_valid());
    }

    // --- lookup ---

    fn directory(id: i64) -> Option<String> {
        (id == 10000001).then(|| "Jo".to_string())
    }

    #[test]
    fn lookup_hit_is_valid() {
        let mut surface = ScriptedSurface::new(60);
        let result = lookup("account", directory).validate("10000001", &mut surface).unwrap();
        assert_eq!(result, Validated::Valid("Jo".to_string()));
        assert!(surface.frames.is_empty());
    }

    #[test]
    fn lookup_miss_try_again_retries_silently() {
        let mut surface = ScriptedSurface::new(60).with_lines(["y"]);
        let result = lookup("account", directory).validate("42", &mut surface).unwrap();
        assert_eq!(result, Validated::Retry(None));
        assert_eq!(surface.frames_containing("No account with that ID could be found."), 1);
    }

    #[test]
    fn lookup_miss_give_up_cancels() {
        let mut surface = ScriptedSurface::new(60).with_lines(["n"]);
        let result = lookup("account", directory).validate("oops", &mut surface).unwrap();
        assert_eq!(result, Validated::Cancel);
    }
}
