//! Formatting and validation helpers.
//!
//! Every function here is pure and total: formatters always return a
//! string and validators always return a `bool`.

pub mod date;
pub mod format;
pub mod validation;

pub use date::{DateStyle, format_date, format_relative_time, format_relative_time_at, is_same_day, is_today};
pub use format::{format_currency, format_number, format_usd, truncate};
pub use validation::{is_valid_email, is_valid_phone, is_valid_url};
