//! Field Validator
//!
//! One prompt-validate-retry primitive, `Console::prompt`, parameterized by a
//! `Field` that knows how to turn a raw line into a typed value. Invalid input
//! never aborts a workflow: the diagnostic is printed and the prompt repeats,
//! with no retry limit. Only the end of the input stream stops the loop.

use crate::core::{HotelError, Result};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::io::{BufRead, Write};
use thiserror::Error;
use tracing::debug;

/// `MM/DD/YY`, the only accepted date spelling.
static DATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{2}/\d{2}/\d{2}$").unwrap());

static PRICE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\$?(\d{1,4})(?:\.(\d{1,2}))?$").unwrap());

/// Why a raw line was rejected. Displayed verbatim before re-prompting.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("A value is required.")]
    Empty,

    #[error("Must be at most {max} characters long (got {len}).")]
    TooLong { max: usize, len: usize },

    #[error("'{0}' is not a whole number.")]
    NotANumber(String),

    #[error("Must be between {min} and {max}.")]
    OutOfRange { min: i64, max: i64 },

    #[error("'{0}' is not a date in MM/DD/YY format.")]
    BadDate(String),

    #[error("Must not be before {0}.")]
    TooEarly(String),

    #[error("Must not be after {0}.")]
    TooLate(String),

    #[error("'{0}' is not yes or no.")]
    NotABoolean(String),

    #[error("'{0}' is not a price between 0 and 9999.99.")]
    BadPrice(String),

    #[error("'{value}' is not one of: {options}.")]
    NotAChoice { value: String, options: String },

    #[error("'{0}' is not a phone number (digits only, no / or ()).")]
    BadPhone(String),

    #[error("Your input is invalid!")]
    InvalidSelection,
}

/// A constraint that parses one trimmed line into a typed value.
pub trait Field {
    type Value;

    fn parse(&self, raw: &str) -> std::result::Result<Self::Value, FieldError>;
}

/// Required text, optionally bounded in length (counted in characters).
#[derive(Debug, Clone, Copy)]
pub struct Text {
    max_len: Option<usize>,
}

impl Text {
    pub fn required(max_len: usize) -> Self {
        Text { max_len: Some(max_len) }
    }

    pub fn unbounded() -> Self {
        Text { max_len: None }
    }
}

impl Field for Text {
    type Value = String;

    fn parse(&self, raw: &str) -> std::result::Result<String, FieldError> {
        if raw.is_empty() {
            return Err(FieldError::Empty);
        }
        let len = raw.chars().count();
        match self.max_len {
            Some(max) if len > max => Err(FieldError::TooLong { max, len }),
            _ => Ok(raw.to_string()),
        }
    }
}

/// Whole number in an inclusive range.
#[derive(Debug, Clone, Copy)]
pub struct Integer {
    min: i64,
    max: i64,
}

impl Integer {
    pub fn range(min: i64, max: i64) -> Self {
        Integer { min, max }
    }

    /// Identifiers and counts: one or more.
    pub fn positive() -> Self {
        Integer::range(1, i64::MAX)
    }
}

impl Field for Integer {
    type Value = i64;

    fn parse(&self, raw: &str) -> std::result::Result<i64, FieldError> {
        if raw.is_empty() {
            return Err(FieldError::Empty);
        }
        let value: i64 = raw
            .parse()
            .map_err(|_| FieldError::NotANumber(raw.to_string()))?;
        if value < self.min || value > self.max {
            return Err(FieldError::OutOfRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(value)
    }
}

/// Calendar date in the fixed `MM/DD/YY` pattern.
#[derive(Debug, Clone, Copy, Default)]
pub struct Date {
    not_before: Option<NaiveDate>,
    not_after: Option<NaiveDate>,
}

impl Date {
    pub fn any() -> Self {
        Date::default()
    }

    /// Used for the end of a range, which may not precede its start.
    pub fn not_before(start: NaiveDate) -> Self {
        Date {
            not_before: Some(start),
            not_after: None,
        }
    }

    /// Used for dates of birth.
    pub fn not_after(limit: NaiveDate) -> Self {
        Date {
            not_before: None,
            not_after: Some(limit),
        }
    }
}

/// Parses `MM/DD/YY`. Two-digit years follow chrono's `%y` rule: 70-99 are
/// 19xx, 00-69 are 20xx.
pub fn parse_date(raw: &str) -> std::result::Result<NaiveDate, FieldError> {
    if !DATE_RE.is_match(raw) {
        return Err(FieldError::BadDate(raw.to_string()));
    }
    NaiveDate::parse_from_str(raw, "%m/%d/%y").map_err(|_| FieldError::BadDate(raw.to_string()))
}

/// Formats a date back into the prompt pattern.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%m/%d/%y").to_string()
}

impl Field for Date {
    type Value = NaiveDate;

    fn parse(&self, raw: &str) -> std::result::Result<NaiveDate, FieldError> {
        if raw.is_empty() {
            return Err(FieldError::Empty);
        }
        let date = parse_date(raw)?;
        match (self.not_before, self.not_after) {
            (Some(start), _) if date < start => Err(FieldError::TooEarly(format_date(start))),
            (_, Some(limit)) if date > limit => Err(FieldError::TooLate(format_date(limit))),
            _ => Ok(date),
        }
    }
}

/// Yes/no answer.
#[derive(Debug, Clone, Copy)]
pub struct Boolean;

impl Field for Boolean {
    type Value = bool;

    fn parse(&self, raw: &str) -> std::result::Result<bool, FieldError> {
        match raw.to_ascii_lowercase().as_str() {
            "" => Err(FieldError::Empty),
            "true" | "t" | "yes" | "y" | "1" => Ok(true),
            "false" | "f" | "no" | "n" | "0" => Ok(false),
            _ => Err(FieldError::NotABoolean(raw.to_string())),
        }
    }
}

/// A booking price, held in cents: 0 to 9999.99 with at most two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Price {
    cents: i64,
}

impl Price {
    pub const MAX_CENTS: i64 = 999_999;

    pub fn from_cents(cents: i64) -> Option<Self> {
        (0..=Self::MAX_CENTS).contains(&cents).then_some(Price { cents })
    }

    pub fn cents(&self) -> i64 {
        self.cents
    }

    pub fn as_f64(&self) -> f64 {
        self.cents as f64 / 100.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.cents / 100, self.cents % 100)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PriceField;

impl Field for PriceField {
    type Value = Price;

    fn parse(&self, raw: &str) -> std::result::Result<Price, FieldError> {
        if raw.is_empty() {
            return Err(FieldError::Empty);
        }
        let bad = || FieldError::BadPrice(raw.to_string());
        let caps = PRICE_RE.captures(raw).ok_or_else(bad)?;
        let whole: i64 = caps[1].parse().map_err(|_| bad())?;
        let fraction: i64 = match caps.get(2) {
            Some(m) if m.as_str().len() == 1 => m.as_str().parse::<i64>().map_err(|_| bad())? * 10,
            Some(m) => m.as_str().parse().map_err(|_| bad())?,
            None => 0,
        };
        Price::from_cents(whole * 100 + fraction).ok_or_else(bad)
    }
}

/// One of a fixed list of spellings, matched case-insensitively.
#[derive(Debug, Clone, Copy)]
pub struct Choice {
    options: &'static [&'static str],
}

impl Choice {
    pub fn of(options: &'static [&'static str]) -> Self {
        Choice { options }
    }
}

impl Field for Choice {
    type Value = String;

    fn parse(&self, raw: &str) -> std::result::Result<String, FieldError> {
        if raw.is_empty() {
            return Err(FieldError::Empty);
        }
        self.options
            .iter()
            .find(|option| option.eq_ignore_ascii_case(raw))
            .map(|option| option.to_string())
            .ok_or_else(|| FieldError::NotAChoice {
                value: raw.to_string(),
                options: self.options.join(", "),
            })
    }
}

/// Optional phone number; a blank line means "not given".
#[derive(Debug, Clone, Copy)]
pub struct Phone;

impl Field for Phone {
    type Value = Option<i64>;

    fn parse(&self, raw: &str) -> std::result::Result<Option<i64>, FieldError> {
        if raw.is_empty() {
            return Ok(None);
        }
        if !(7..=15).contains(&raw.len()) || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(FieldError::BadPhone(raw.to_string()));
        }
        raw.parse()
            .map(Some)
            .map_err(|_| FieldError::BadPhone(raw.to_string()))
    }
}

/// Menu selection: any whole number; range checking is the dispatcher's job.
#[derive(Debug, Clone, Copy)]
pub struct Selection;

impl Field for Selection {
    type Value = i64;

    fn parse(&self, raw: &str) -> std::result::Result<i64, FieldError> {
        raw.parse().map_err(|_| FieldError::InvalidSelection)
    }
}

/// The interactive input source and output sink of a session.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Console { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Reads one line without its line terminator.
    ///
    /// # Errors
    ///
    /// `HotelError::InputClosed` once the input stream is exhausted.
    pub fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(HotelError::InputClosed);
        }
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(line)
    }

    /// Shows `label`, reads a line and re-prompts until `field` accepts it.
    pub fn prompt<F: Field>(&mut self, label: &str, field: &F) -> Result<F::Value> {
        loop {
            write!(self.output, "{} ", label)?;
            self.output.flush()?;

            let line = self.read_line()?;
            match field.parse(line.trim()) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    debug!(label, "rejected input: {}", e);
                    writeln!(self.output, "{}", e)?;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output_of(console: Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(console.into_parts().1).unwrap()
    }

    #[test]
    fn test_text_rejects_empty_and_long_values() {
        let field = Text::required(5);
        assert_eq!(field.parse(""), Err(FieldError::Empty));
        assert_eq!(field.parse("abcdef"), Err(FieldError::TooLong { max: 5, len: 6 }));
        assert_eq!(field.parse("abcde").unwrap(), "abcde");
        // length counts characters, not bytes
        assert_eq!(field.parse("éèêëē").unwrap(), "éèêëē");
    }

    #[test]
    fn test_integer_range() {
        let field = Integer::range(1, 17);
        assert_eq!(field.parse("17").unwrap(), 17);
        assert_eq!(field.parse("0"), Err(FieldError::OutOfRange { min: 1, max: 17 }));
        assert_eq!(field.parse("1.5"), Err(FieldError::NotANumber("1.5".to_string())));
        assert_eq!(field.parse(""), Err(FieldError::Empty));
    }

    #[test]
    fn test_date_pattern_is_strict() {
        let field = Date::any();
        assert_eq!(
            field.parse("01/31/20").unwrap(),
            NaiveDate::from_ymd_opt(2020, 1, 31).unwrap()
        );
        assert_eq!(
            field.parse("07/04/76").unwrap(),
            NaiveDate::from_ymd_opt(1976, 7, 4).unwrap()
        );
        for bad in ["1/31/20", "01/31/2020", "2020-01-31", "13/01/20", "02/30/20", "01-31-20", "ab/cd/ef"] {
            assert!(matches!(field.parse(bad), Err(FieldError::BadDate(_))), "{}", bad);
        }
    }

    #[test]
    fn test_date_lower_bound() {
        let start = NaiveDate::from_ymd_opt(2020, 1, 10).unwrap();
        let field = Date::not_before(start);
        assert_eq!(field.parse("01/09/20"), Err(FieldError::TooEarly("01/10/20".to_string())));
        assert_eq!(field.parse("01/10/20").unwrap(), start);
    }

    #[test]
    fn test_date_upper_bound() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let field = Date::not_after(today);
        assert_eq!(field.parse("11/07/67"), Err(FieldError::TooLate("10/19/26".to_string())));
        assert_eq!(
            field.parse("11/07/85").unwrap(),
            NaiveDate::from_ymd_opt(1985, 11, 7).unwrap()
        );
        assert_eq!(field.parse("10/19/26").unwrap(), today);
    }

    #[test]
    fn test_two_digit_year_century() {
        let field = Date::any();
        assert_eq!(field.parse("01/01/69").unwrap(), NaiveDate::from_ymd_opt(2069, 1, 1).unwrap());
        assert_eq!(field.parse("01/01/70").unwrap(), NaiveDate::from_ymd_opt(1970, 1, 1).unwrap());
    }

    #[test]
    fn test_boolean_spellings() {
        for yes in ["true", "YES", "y", "T", "1"] {
            assert_eq!(Boolean.parse(yes), Ok(true), "{}", yes);
        }
        for no in ["false", "No", "n", "f", "0"] {
            assert_eq!(Boolean.parse(no), Ok(false), "{}", no);
        }
        assert!(matches!(Boolean.parse("maybe"), Err(FieldError::NotABoolean(_))));
    }

    #[test]
    fn test_price_bounds_and_precision() {
        assert_eq!(PriceField.parse("0").unwrap().cents(), 0);
        assert_eq!(PriceField.parse("9999.99").unwrap().cents(), 999_999);
        assert_eq!(PriceField.parse("$120.5").unwrap().cents(), 12_050);
        assert_eq!(PriceField.parse("120.05").unwrap().to_string(), "120.05");
        for bad in ["10000", "-1", "12.345", "abc", "1e3", "."] {
            assert!(matches!(PriceField.parse(bad), Err(FieldError::BadPrice(_))), "{}", bad);
        }
    }

    #[test]
    fn test_choice_normalizes_spelling() {
        let field = Choice::of(&["Male", "Female", "Other"]);
        assert_eq!(field.parse("female").unwrap(), "Female");
        match field.parse("robot") {
            Err(FieldError::NotAChoice { options, .. }) => assert_eq!(options, "Male, Female, Other"),
            other => panic!("Expected NotAChoice, got {:?}", other),
        }
    }

    #[test]
    fn test_phone_is_optional() {
        assert_eq!(Phone.parse("").unwrap(), None);
        assert_eq!(Phone.parse("9515551234").unwrap(), Some(9_515_551_234));
        assert!(Phone.parse("(951) 555-1234").is_err());
        assert!(Phone.parse("123").is_err());
    }

    #[test]
    fn test_prompt_retries_until_valid() {
        let mut console = console("\n   \nthis name is far too long for the field\nAda\n");
        let value = console.prompt("First name:", &Text::required(30)).unwrap();
        assert_eq!(value, "Ada");

        let output = output_of(console);
        assert_eq!(output.matches("First name:").count(), 4);
        assert_eq!(output.matches("A value is required.").count(), 2);
        assert!(output.contains("Must be at most 30 characters long"));
    }

    #[test]
    fn test_prompt_trims_surrounding_whitespace() {
        let mut console = console("  Suite \r\n");
        assert_eq!(console.prompt("Room type:", &Text::required(10)).unwrap(), "Suite");
    }

    #[test]
    fn test_prompt_reports_closed_input() {
        let mut console = console("not a date\n");
        let result = console.prompt("Booking date:", &Date::any());
        assert!(matches!(result, Err(HotelError::InputClosed)));
        assert!(output_of(console).contains("is not a date in MM/DD/YY format"));
    }

    #[test]
    fn test_selection_error_message() {
        let mut console = console("two\n2\n");
        assert_eq!(console.prompt("Please make your choice:", &Selection).unwrap(), 2);
        assert!(output_of(console).contains("Your input is invalid!"));
    }
}
