//! Response bodies for the QKart REST API.
//!
//! Catalog and cart records live in `qkart-core`; these are the
//! authentication and error envelopes that only the client needs.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Successful `POST /auth/login` response.
///
/// ```json
/// { "success": true, "token": "testtoken", "username": "criodo", "balance": 5000 }
/// ```
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    /// Bearer token for authenticated requests.
    pub token: String,
    /// Username the backend logged in.
    pub username: String,
    /// Wallet balance.
    pub balance: Decimal,
}

impl std::fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginResponse")
            .field("success", &self.success)
            .field("token", &"[REDACTED]")
            .field("username", &self.username)
            .field("balance", &self.balance)
            .finish()
    }
}

/// Successful `POST /auth/register` response.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub success: bool,
}

/// Failure envelope returned with non-success statuses.
///
/// ```json
/// { "success": false, "message": "Password is incorrect" }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
