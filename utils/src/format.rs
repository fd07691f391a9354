//! Number, currency and text formatting.

use std::fmt::Display;
use std::sync::LazyLock;

use regex::Regex;

static NUMBER_PARTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(-?)([0-9]+)(.*)$").expect("Invalid regex"));

const NBSP: &str = "\u{a0}";
const NARROW_NBSP: &str = "\u{202f}";

/// Locales with their own separators or currency symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Locale {
    EnUs,
    EnGb,
    DeDe,
    FrFr,
    JaJp,
}

impl Locale {
    /// Unknown tags fall back to `en-US`.
    fn from_tag(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "en-gb" => Self::EnGb,
            "de" | "de-de" | "de-at" => Self::DeDe,
            "fr" | "fr-fr" => Self::FrFr,
            "ja" | "ja-jp" => Self::JaJp,
            _ => Self::EnUs,
        }
    }

    fn group(self) -> &'static str {
        match self {
            Self::DeDe => ".",
            Self::FrFr => NARROW_NBSP,
            Self::EnUs | Self::EnGb | Self::JaJp => ",",
        }
    }

    fn decimal(self) -> &'static str {
        match self {
            Self::DeDe | Self::FrFr => ",",
            Self::EnUs | Self::EnGb | Self::JaJp => ".",
        }
    }

    fn symbol_after(self) -> bool {
        matches!(self, Self::DeDe | Self::FrFr)
    }

    /// Currency symbol as this locale writes it, `None` for unknown codes.
    fn currency_symbol(self, code: &str) -> Option<&'static str> {
        let symbol = match (self, code) {
            (Self::EnGb, "USD") => "US$",
            (Self::EnGb, "JPY") => "JP¥",
            (Self::DeDe, "AUD") => "AU$",
            (Self::FrFr, "USD") => "$US",
            (Self::FrFr, "GBP") => "£GB",
            (Self::FrFr, "JPY") => "JPY",
            (Self::FrFr, "CNY") => "CNY",
            (Self::FrFr, "CAD") => "$CA",
            (Self::FrFr, "AUD") => "$AU",
            (Self::JaJp, "JPY") => "￥",
            (Self::JaJp, "CNY") => "元",
            (_, "USD") => "$",
            (_, "EUR") => "€",
            (_, "GBP") => "£",
            (_, "JPY") => "¥",
            (_, "INR") => "₹",
            (_, "CNY") => "CN¥",
            (_, "KRW") => "₩",
            (_, "CAD") => "CA$",
            (_, "AUD") => "A$",
            _ => return None,
        };
        Some(symbol)
    }
}

/// Minor-unit digits for an ISO 4217 code.
fn minor_digits(code: &str) -> usize {
    match code {
        "JPY" | "KRW" => 0,
        _ => 2,
    }
}

/// Inserts `separator` between every group of three integer digits.
fn group_digits(digits: &str, separator: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3 * separator.len());

    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            grouped.push_str(separator);
        }
        grouped.push(ch);
    }

    grouped
}

/// Formats an amount of money for a locale.
///
/// Supported locales are `en-US`, `en-GB`, `de-DE`, `fr-FR` and `ja-JP`;
/// anything else is formatted as `en-US`. Symbols follow the locale, so
/// dollars are `$` in `en-US` but `US$` in `en-GB`. Unknown currency codes
/// are printed as the code itself.
///
/// ## Examples
///
/// ```rust
/// use rmkit_utils::format_currency;
///
/// assert_eq!(format_currency(1234.5, "USD", "en-US"), "$1,234.50");
/// assert_eq!(format_currency(1234.5, "EUR", "de-DE"), "1.234,50\u{a0}€");
/// assert_eq!(format_currency(1234.5, "JPY", "ja-JP"), "￥1,235");
/// ```
pub fn format_currency(amount: f64, currency: &str, locale: &str) -> String {
    let locale = Locale::from_tag(locale);
    let code = currency.to_ascii_uppercase();
    let digits = minor_digits(&code);
    let symbol = locale.currency_symbol(&code).map_or_else(|| code.clone(), str::to_string);

    let magnitude = if amount.is_nan() {
        "NaN".to_string()
    } else if amount.is_infinite() {
        "∞".to_string()
    } else {
        // Ties round away from zero; `{:.N}` alone would round them to even.
        let scale = 10f64.powi(digits as i32);
        let rounded = (amount.abs() * scale).round() / scale;
        let fixed = format!("{:.*}", digits, rounded);
        match fixed.split_once('.') {
            Some((int_part, fraction)) => {
                format!("{}{}{}", group_digits(int_part, locale.group()), locale.decimal(), fraction)
            }
            None => group_digits(&fixed, locale.group()),
        }
    };

    let sign = if amount < 0.0 { "-" } else { "" };

    if locale.symbol_after() {
        format!("{sign}{magnitude}{NBSP}{symbol}")
    } else if symbol.ends_with(|c: char| c.is_ascii_alphabetic()) {
        format!("{sign}{symbol}{NBSP}{magnitude}")
    } else {
        format!("{sign}{symbol}{magnitude}")
    }
}

/// [`format_currency`] with the `USD` / `en-US` defaults.
pub fn format_usd(amount: f64) -> String {
    format_currency(amount, "USD", "en-US")
}

/// Adds comma separators to the integer part of a number.
///
/// The sign and any fractional part are kept as they are.
///
/// ## Examples
///
/// ```rust
/// use rmkit_utils::format_number;
///
/// assert_eq!(format_number(1234567), "1,234,567");
/// assert_eq!(format_number(-9876.54321), "-9,876.54321");
/// assert_eq!(format_number(999), "999");
/// ```
pub fn format_number<N: Display>(num: N) -> String {
    let text = num.to_string();

    match NUMBER_PARTS.captures(&text) {
        Some(parts) => format!("{}{}{}", &parts[1], group_digits(&parts[2], ","), &parts[3]),
        None => text,
    }
}

/// Shortens `text` to `max_length` characters followed by `...`.
///
/// Text that already fits is returned unchanged. Lengths count Unicode
/// scalar values, so multi-byte characters are never split.
///
/// ## Examples
///
/// ```rust
/// use rmkit_utils::truncate;
///
/// assert_eq!(truncate("hello", 10), "hello");
/// assert_eq!(truncate("hello world", 5), "hello...");
/// ```
pub fn truncate(text: &str, max_length: usize) -> String {
    match text.char_indices().nth(max_length) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
