//! QKart storefront client library.
//!
//! Talks to the QKart REST backend and keeps the client-side state a
//! storefront needs: the catalog, the reconciled cart and the login session.
//!
//! - [`shop::Shop`] is the application shell front ends drive.
//! - [`search::SearchInput`] debounces live search input.
//! - [`error::ShopError::notices`] produces the messages shown to users.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod client;
pub mod config;
pub mod debounce;
pub mod error;
pub mod notice;
pub mod search;
pub mod session;
pub mod shop;

pub use client::{ApiClient, ApiError};
pub use config::{ConfigError, LogFormat, StorefrontConfig};
pub use error::{Operation, ShopError};
pub use notice::{Notice, NoticeVariant};
pub use search::SearchInput;
pub use session::{Session, SessionError, SessionStore};
pub use shop::{AddOptions, Shop};
