//! Application-level errors and their user-facing notices.
//!
//! Every [`Shop`](crate::shop::Shop) operation returns `Result<T, ShopError>`.
//! [`ShopError::notices`] turns a failure into the messages shown to the
//! user; the `Display` impl stays technical and is meant for logs.

use qkart_core::ValidationErrors;
use thiserror::Error;

use crate::client::ApiError;
use crate::notice::{self, Notice};
use crate::session::SessionError;

/// Backend call that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListProducts,
    Search,
    FetchCart,
    UpdateCart,
    Login,
    Register,
}

impl Operation {
    const fn as_str(self) -> &'static str {
        match self {
            Self::ListProducts => "list products",
            Self::Search => "search",
            Self::FetchCart => "fetch cart",
            Self::UpdateCart => "update cart",
            Self::Login => "login",
            Self::Register => "register",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Storefront operation error.
#[derive(Debug, Error)]
pub enum ShopError {
    /// Form input was rejected before anything was sent.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// The operation needs a logged-in user.
    #[error("Not logged in")]
    NotLoggedIn,

    /// Duplicate add refused.
    #[error("Product already in cart")]
    AlreadyInCart,

    /// A backend call failed.
    #[error("Failed to {operation}: {source}")]
    Api {
        operation: Operation,
        #[source]
        source: ApiError,
    },

    /// The session file could not be read or written.
    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

impl ShopError {
    pub(crate) fn api(operation: Operation) -> impl FnOnce(ApiError) -> Self {
        move |source| Self::Api { operation, source }
    }

    /// Whether the backend answered with "not found".
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { source, .. } if source.status() == Some(404))
    }

    /// Messages to show the user for this failure.
    ///
    /// May be empty for failures that have no user-facing message, such as
    /// a catalog request that failed without a server error.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        match self {
            Self::Validation(errors) => errors
                .errors()
                .iter()
                .map(|e| Notice::warning(e.to_string()))
                .collect(),
            Self::NotLoggedIn => vec![Notice::warning(notice::LOGIN_REQUIRED)],
            Self::AlreadyInCart => vec![Notice::warning(notice::ALREADY_IN_CART)],
            Self::Api { operation, source } => api_notice(*operation, source).into_iter().collect(),
            Self::Session(e) => vec![Notice::error(e.to_string())],
        }
    }
}

/// Translate a failed backend call into its notice.
///
/// A `Status` error means the backend answered. Any other error means there
/// was no usable response.
fn api_notice(operation: Operation, error: &ApiError) -> Option<Notice> {
    let status = error.status();
    match operation {
        Operation::ListProducts => {
            (status == Some(500)).then(|| Notice::error(notice::PRODUCTS_FAILED))
        }
        Operation::Search => (status == Some(404))
            .then(|| error.status_text())
            .flatten()
            .map(Notice::error),
        Operation::FetchCart => Some(match (status, error.server_message()) {
            (Some(400), Some(message)) => Notice::error(message),
            _ => Notice::error(notice::CART_FAILED),
        }),
        Operation::UpdateCart => Some(match status {
            Some(_) => Notice::error(
                error
                    .server_message()
                    .or_else(|| error.status_text())
                    .unwrap_or(notice::CART_FAILED),
            ),
            None => Notice::error(notice::CART_FAILED),
        }),
        Operation::Login => Some(match (status, error.server_message()) {
            (Some(400), Some(message)) => Notice::error(message),
            _ => Notice::error(notice::BACKEND_UNREACHABLE),
        }),
        Operation::Register => Some(if status == Some(400) {
            Notice::error(notice::USERNAME_TAKEN)
        } else {
            Notice::error(notice::BACKEND_UNREACHABLE)
        }),
    }
}

/// Result type alias for `ShopError`.
pub type Result<T> = std::result::Result<T, ShopError>;
