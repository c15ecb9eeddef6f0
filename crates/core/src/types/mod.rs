//! Core types for QKart.
//!
//! This module provides type-safe wrappers for the storefront's domain
//! records as they arrive from the backend.

pub mod account;
pub mod cart;
pub mod id;
pub mod price;
pub mod product;
pub mod rating;

pub use account::{
    Credentials, LoginForm, MIN_PASSWORD_LENGTH, MIN_USERNAME_LENGTH, RegistrationForm,
    ValidationError, ValidationErrors,
};
pub use cart::{CartEntry, CartLineItem, CartUpdate};
pub use id::ProductId;
pub use price::Price;
pub use product::Product;
pub use rating::{Rating, RatingError};
