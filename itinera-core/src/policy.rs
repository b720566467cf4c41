//! Password policy checker.
//!
//! Five independent rules, all required for a password to be accepted at
//! signup. The per-rule breakdown is a pure function of the password string
//! so the UI can recompute it on every keystroke for progressive feedback.
//!
//! The policy gates signup only. Login never re-checks strength: a password
//! accepted under an older, weaker policy must still authenticate.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// The fixed punctuation set accepted by the special-character rule.
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*()_+-=[]{}|;:'\",.<>/?`~\\";

/// Per-rule breakdown of a password against the signup policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordStrength {
    /// At least 8 characters.
    pub has_min_length: bool,
    /// Contains at least one A-Z.
    pub has_uppercase: bool,
    /// Contains at least one a-z.
    pub has_lowercase: bool,
    /// Contains at least one 0-9.
    pub has_digit: bool,
    /// Contains at least one character from [`SPECIAL_CHARACTERS`].
    pub has_special: bool,
}

impl PasswordStrength {
    /// True when every rule passes.
    pub fn is_satisfied(&self) -> bool {
        self.has_min_length
            && self.has_uppercase
            && self.has_lowercase
            && self.has_digit
            && self.has_special
    }
}

/// Evaluate a password against the signup policy. Pure and side-effect free.
pub fn check_password(password: &str) -> PasswordStrength {
    PasswordStrength {
        has_min_length: password.chars().count() >= 8,
        has_uppercase: password.chars().any(|c| c.is_ascii_uppercase()),
        has_lowercase: password.chars().any(|c| c.is_ascii_lowercase()),
        has_digit: password.chars().any(|c| c.is_ascii_digit()),
        has_special: password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)),
    }
}

/// Aggregate form used by the signup path.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::MissingField(
            "Password is required".to_string(),
        ));
    }

    if check_password(password).is_satisfied() {
        Ok(())
    } else {
        Err(ValidationError::WeakPassword)
    }
}
