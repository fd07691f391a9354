//! Structural validators for user input.
//!
//! These are shape checks for form feedback, not full RFC validation.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex"));

static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9\s\-()]+$").expect("Invalid regex"));

/// Minimum number of digits a phone number must contain.
pub const MIN_PHONE_DIGITS: usize = 10;

/// `local@domain.tld` with no whitespace and a single `@`.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// Whether `url` parses as an absolute URL.
pub fn is_valid_url(url: &str) -> bool {
    Url::parse(url).is_ok()
}

/// Digits, spaces, dashes and parentheses with an optional leading `+`,
/// containing at least [`MIN_PHONE_DIGITS`] digits.
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE.is_match(phone) && phone.chars().filter(char::is_ascii_digit).count() >= MIN_PHONE_DIGITS
}
