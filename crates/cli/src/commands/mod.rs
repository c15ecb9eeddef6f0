//! Command implementations.

pub mod account;
pub mod cart;
pub mod catalog;

use qkart_storefront::{ApiClient, ApiError, SessionStore, Shop, ShopError, StorefrontConfig};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// The HTTP client could not be created.
    #[error("Client error: {0}")]
    Client(#[from] ApiError),

    /// A storefront operation failed. Its notices are shown to the user.
    #[error(transparent)]
    Shop(#[from] ShopError),

    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

/// State shared by all commands: the shop and where its session is saved.
pub struct Context {
    pub shop: Shop,
    pub store: SessionStore,
}

impl Context {
    /// Build the client and restore the saved session, if any.
    ///
    /// An unreadable session file is a `ShopError::Session`, so the user
    /// gets its notice.
    pub fn new(config: &StorefrontConfig) -> Result<Self, CliError> {
        let store = SessionStore::new(config.session_file.clone());
        let session = store.load().map_err(ShopError::from)?;
        if let Some(session) = &session {
            tracing::debug!(username = session.username(), "Restored session");
        }

        let client = ApiClient::new(config)?;
        Ok(Self {
            shop: Shop::new(client, session),
            store,
        })
    }
}
