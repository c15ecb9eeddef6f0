//! Login and registration forms.
//!
//! Forms hold raw user input. Validating a form either yields
//! [`Credentials`] ready to send to the backend, or every field problem at
//! once so they can all be shown to the user together.

use core::fmt;

use serde::Serialize;

/// Minimum username length for registration.
pub const MIN_USERNAME_LENGTH: usize = 6;

/// Minimum password length for registration.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// A single form field problem.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The username is empty.
    #[error("Username is a required field")]
    UsernameRequired,
    /// The username is shorter than the registration minimum.
    #[error("Username must be at least {min} characters")]
    UsernameTooShort {
        /// Minimum allowed length.
        min: usize,
    },
    /// The password is empty.
    #[error("Password is a required field")]
    PasswordRequired,
    /// The password is shorter than the registration minimum.
    #[error("Password must be at least {min} characters")]
    PasswordTooShort {
        /// Minimum allowed length.
        min: usize,
    },
    /// Password and confirmation differ.
    #[error("Passwords do not match")]
    PasswordMismatch,
}

/// All problems found in a form, in field order.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", format_validation_errors(.0))]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    /// The individual problems.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    /// Whether a specific problem was found.
    #[must_use]
    pub fn contains(&self, error: &ValidationError) -> bool {
        self.0.contains(error)
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Validated username and password, as sent to `/auth/login` and
/// `/auth/register`.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    /// Account username.
    pub username: String,
    /// Account password.
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Raw login form input.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    /// Create a login form.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Validate the form. Login only requires both fields to be present.
    ///
    /// # Errors
    ///
    /// Returns every missing field.
    pub fn validate(&self) -> Result<Credentials, ValidationErrors> {
        let mut errors = Vec::new();
        if self.username.is_empty() {
            errors.push(ValidationError::UsernameRequired);
        }
        if self.password.is_empty() {
            errors.push(ValidationError::PasswordRequired);
        }

        if !errors.is_empty() {
            return Err(ValidationErrors(errors));
        }

        Ok(Credentials {
            username: self.username.clone(),
            password: self.password.clone(),
        })
    }
}

/// Raw registration form input.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationForm {
    /// Create a registration form.
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            confirm_password: confirm_password.into(),
        }
    }

    /// Validate the form.
    ///
    /// # Errors
    ///
    /// Returns every problem found:
    /// - Username empty or shorter than [`MIN_USERNAME_LENGTH`]
    /// - Password empty or shorter than [`MIN_PASSWORD_LENGTH`]
    /// - Confirmation not equal to the password
    pub fn validate(&self) -> Result<Credentials, ValidationErrors> {
        let mut errors = Vec::new();

        if self.username.is_empty() {
            errors.push(ValidationError::UsernameRequired);
        } else if self.username.chars().count() < MIN_USERNAME_LENGTH {
            errors.push(ValidationError::UsernameTooShort {
                min: MIN_USERNAME_LENGTH,
            });
        }

        if self.password.is_empty() {
            errors.push(ValidationError::PasswordRequired);
        } else if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            errors.push(ValidationError::PasswordTooShort {
                min: MIN_PASSWORD_LENGTH,
            });
        }

        if self.password != self.confirm_password {
            errors.push(ValidationError::PasswordMismatch);
        }

        if !errors.is_empty() {
            return Err(ValidationErrors(errors));
        }

        Ok(Credentials {
            username: self.username.clone(),
            password: self.password.clone(),
        })
    }
}
