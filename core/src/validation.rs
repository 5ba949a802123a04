//! Local validation of new-item text.
//!
//! Input is invalid when empty or when it contains any of
//! `FORBIDDEN_WORDS` anywhere, ignoring case. Substrings count, so
//! "who let the dogs out" and "cannot" are both rejected.

use thiserror::Error;

pub const FORBIDDEN_WORDS: [&str; 4] = ["cat", "dog", "yes", "no"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("A description is required.")]
    Required,

    #[error("Cannot contain the words cat, dog, yes or no.")]
    ForbiddenWord,
}

pub fn validate_description(text: &str) -> Result<(), ValidationError> {
    if text.is_empty() {
        return Err(ValidationError::Required);
    }
    let lowered = text.to_lowercase();
    if FORBIDDEN_WORDS.iter().any(|word| lowered.contains(word)) {
        return Err(ValidationError::ForbiddenWord);
    }
    Ok(())
}

/// The single text input of the new-item form.
///
/// Messages are only shown once the user has edited the control, so a
/// pristine empty form does not start out complaining.
#[derive(Debug, Clone, Default)]
pub struct FormControl {
    value: String,
    dirty: bool,
}

impl FormControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the text and mark the control as edited.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_description(&self.value)
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// User-facing message for the current value, empty while pristine or valid.
    pub fn validation_message(&self) -> String {
        match self.validate() {
            Err(err) if self.dirty => err.to_string(),
            _ => String::new(),
        }
    }

    /// Back to an empty, pristine control.
    pub fn reset(&mut self) {
        self.value.clear();
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_forbidden_words_anywhere() {
        for text in [
            "taco cat backwards spells taco cat",
            "who let the dogs out",
            "the man from delmonte he say yes",
            "computer says no",
            "category",
            "knowledge",
        ] {
            assert_eq!(validate_description(text), Err(ValidationError::ForbiddenWord), "{text}");
        }
    }

    #[test]
    fn rejection_ignores_case() {
        assert_eq!(validate_description("CAT"), Err(ValidationError::ForbiddenWord));
        assert_eq!(validate_description("Hot Dog"), Err(ValidationError::ForbiddenWord));
        assert_eq!(validate_description("YeS please"), Err(ValidationError::ForbiddenWord));
        assert_eq!(validate_description("NO"), Err(ValidationError::ForbiddenWord));
    }

    #[test]
    fn accepts_ordinary_text() {
        assert_eq!(validate_description("a todo item"), Ok(()));
        assert_eq!(validate_description("buy milk"), Ok(()));
    }

    #[test]
    fn empty_text_is_required() {
        assert_eq!(validate_description(""), Err(ValidationError::Required));
    }

    #[test]
    fn pristine_control_shows_no_message() {
        let control = FormControl::new();
        assert!(!control.is_valid());
        assert_eq!(control.validation_message(), "");
    }

    #[test]
    fn dirty_control_shows_message() {
        let mut control = FormControl::new();
        control.set_value("who let the dogs out");
        assert_eq!(
            control.validation_message(),
            "Cannot contain the words cat, dog, yes or no."
        );
        control.set_value("");
        assert_eq!(control.validation_message(), "A description is required.");
        control.set_value("water plants");
        assert_eq!(control.validation_message(), "");
    }

    #[test]
    fn reset_returns_to_pristine() {
        let mut control = FormControl::new();
        control.set_value("water plants");
        control.reset();
        assert_eq!(control.value(), "");
        assert!(!control.is_dirty());
    }
}
