use std::{collections::BTreeMap, fmt};

use jiff::civil::Date;

use crate::entities::film_work::FilmType;

pub const NAME_MAX: usize = 255;
pub const TITLE_MAX: usize = 255;
pub const CERTIFICATE_MAX: usize = 512;
pub const RATING_MIN: f64 = 0.0;
pub const RATING_MAX: f64 = 100.0;

pub const REQUIRED: &str = "This field is required.";

/// Validation messages keyed by form field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    /// Records the error of `result`, if any, against `field`.
    pub fn check<T>(&mut self, field: &'static str, result: Result<T, String>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(message) => {
                self.add(field, message);
                None
            }
        }
    }

    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

pub fn required(value: &str) -> Result<(), String> {
    if value.trim().is_empty() { Err(REQUIRED.to_string()) } else { Ok(()) }
}

pub fn max_chars(value: &str, max: usize) -> Result<(), String> {
    let len = value.chars().count();
    if len > max {
        Err(format!("Ensure this value has at most {max} characters (it has {len})."))
    } else {
        Ok(())
    }
}

pub fn required_max(value: &str, max: usize) -> Result<(), String> {
    required(value)?;
    max_chars(value, max)
}

pub fn rating(value: f64) -> Result<(), String> {
    if !value.is_finite() {
        return Err("Enter a number.".to_string());
    }
    if value < RATING_MIN {
        return Err(format!("Ensure this value is greater than or equal to {RATING_MIN}."));
    }
    if value > RATING_MAX {
        return Err(format!("Ensure this value is less than or equal to {RATING_MAX}."));
    }
    Ok(())
}

/// Blank input means "no rating".
pub fn parse_rating(raw: &str) -> Result<Option<f64>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let value: f64 = raw.parse().map_err(|_| "Enter a number.".to_string())?;
    rating(value)?;
    Ok(Some(value))
}

/// Blank input means "no date".
pub fn parse_date(raw: &str) -> Result<Option<Date>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<Date>().map(Some).map_err(|_| "Enter a valid date (YYYY-MM-DD).".to_string())
}

pub fn parse_film_type(raw: &str) -> Result<FilmType, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(REQUIRED.to_string());
    }
    FilmType::from_code(raw)
        .ok_or_else(|| format!("Select a valid choice. {raw} is not one of the available choices."))
}
