//! Input validation helpers shared by the DTOs.
//!
//! DTOs derive `validator::Validate`; [`check`] runs the derive and turns
//! every failure into one `InvalidInput` error listing all fields.

use std::borrow::Cow;
use std::sync::LazyLock;

use portal_core::{AppError, AppResult, FieldError, FieldErrors};
use regex::Regex;
use validator::{Validate, ValidationError, ValidationErrors};

/// Any character in the Unicode punctuation categories (Pc, Pd, Ps, Pe,
/// Pi, Pf, Po). Symbols such as `$`, `+` and `~` are category S, not P.
static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\p{P}").expect("punctuation pattern is valid"));

/// Any decimal digit (Unicode category Nd).
static DECIMAL_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\p{Nd}").expect("digit pattern is valid"));

/// Run the derived validation and collect all failing fields.
pub fn check<T: Validate>(input: &T) -> AppResult<()> {
    match input.validate() {
        Ok(()) => Ok(()),
        Err(errors) => match to_field_errors(&errors) {
            Some(fields) => Err(AppError::invalid_fields(fields)),
            None => Err(AppError::invalid_input("validation failed")),
        },
    }
}

/// Flatten `ValidationErrors` into field errors sorted by field name.
pub fn to_field_errors(errors: &ValidationErrors) -> Option<FieldErrors> {
    let mut collected: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                FieldError::new(field.clone(), message)
            })
        })
        .collect();

    collected.sort_by(|a, b| a.field.cmp(&b.field));
    FieldErrors::new(collected)
}

/// Names may contain letters, hyphens and apostrophes only.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.chars().all(|c| c.is_alphabetic() || c == '-' || c == '\'') {
        Ok(())
    } else {
        Err(ValidationError::new("name").with_message(Cow::Borrowed(
            "must contain only letters, hyphens or apostrophes",
        )))
    }
}

/// Passwords need an upper-case letter, a lower-case letter, a decimal
/// digit and a Unicode punctuation character.
pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let has_upper = password.chars().any(char::is_uppercase);
    let has_lower = password.chars().any(char::is_lowercase);
    let has_digit = DECIMAL_DIGIT.is_match(password);
    let has_punct = PUNCTUATION.is_match(password);

    if has_upper && has_lower && has_digit && has_punct {
        Ok(())
    } else {
        Err(ValidationError::new("password_strength").with_message(Cow::Borrowed(
            "password must contain upper, lower, digit and special character",
        )))
    }
}
