//! User-facing notices.
//!
//! A [`Notice`] is a short message with a severity, shown to the user after
//! an operation. Front ends decide how to render them.

use std::fmt;

pub const LOGGED_IN: &str = "Logged in successfully";
pub const REGISTERED: &str = "Registered successfully";
pub const LOGIN_REQUIRED: &str = "Login to add an item to the cart";
pub const ALREADY_IN_CART: &str =
    "Item already in cart. Use the cart sidebar to update quantity or remove item";
pub const USERNAME_TAKEN: &str = "Username is already taken";
pub const PRODUCTS_FAILED: &str =
    "Something went wrong. Check the backend console for more details";
pub const CART_FAILED: &str = "Could not fetch cart details. Check that the backend is running, reachable and returns valid JSON.";
pub const BACKEND_UNREACHABLE: &str = "Something went wrong. Check that the backend is running, reachable and returns valid JSON.";

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeVariant {
    Success,
    Info,
    Warning,
    Error,
}

impl NoticeVariant {
    /// Lowercase label, e.g. `"warning"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for NoticeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub variant: NoticeVariant,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn new(variant: NoticeVariant, message: impl Into<String>) -> Self {
        Self {
            variant,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeVariant::Success, message)
    }

    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeVariant::Info, message)
    }

    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeVariant::Warning, message)
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeVariant::Error, message)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.variant, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_display() {
        let notice = Notice::warning(LOGIN_REQUIRED);
        assert_eq!(
            notice.to_string(),
            "[warning] Login to add an item to the cart"
        );
        assert_eq!(Notice::success(LOGGED_IN).to_string(), "[success] Logged in successfully");
    }

    #[test]
    fn test_constructors_set_variant() {
        assert_eq!(Notice::info("x").variant, NoticeVariant::Info);
        assert_eq!(Notice::error("x").variant, NoticeVariant::Error);
    }
}
