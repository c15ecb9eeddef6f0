//! The storefront application shell.
//!
//! [`Shop`] owns the API client, the optional login session, the loaded
//! catalog and the reconciled cart. Front ends drive it and render its
//! state; failures come back as [`ShopError`] with notices attached.

use qkart_core::{
    CartEntry, CartLineItem, LoginForm, Price, Product, ProductId, RegistrationForm, cart,
};
use tracing::{info, instrument, warn};

use crate::client::ApiClient;
use crate::error::{Operation, Result, ShopError};
use crate::session::Session;

/// Options for [`Shop::add_to_cart`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddOptions {
    /// Refuse products that are already in the cart.
    pub prevent_duplicate: bool,
}

impl AddOptions {
    /// Options used by "add to cart" buttons: duplicates are refused.
    #[must_use]
    pub const fn prevent_duplicate() -> Self {
        Self {
            prevent_duplicate: true,
        }
    }
}

/// Storefront state and operations.
#[derive(Debug)]
pub struct Shop {
    client: ApiClient,
    session: Option<Session>,
    catalog: Vec<Product>,
    cart: Vec<CartLineItem>,
}

impl Shop {
    /// Create a shop with an empty catalog and cart.
    #[must_use]
    pub const fn new(client: ApiClient, session: Option<Session>) -> Self {
        Self {
            client,
            session,
            catalog: Vec::new(),
            cart: Vec::new(),
        }
    }

    /// The logged-in user, if any.
    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Products from the last [`load`](Self::load).
    #[must_use]
    pub fn catalog(&self) -> &[Product] {
        &self.catalog
    }

    /// Cart line items, in the backend's entry order.
    #[must_use]
    pub fn cart(&self) -> &[CartLineItem] {
        &self.cart
    }

    /// Sum of all line totals.
    #[must_use]
    pub fn cart_total(&self) -> Price {
        cart::cart_total(&self.cart)
    }

    /// Load the catalog and, when logged in, the cart.
    ///
    /// The catalog is kept even if the cart request fails; the cart is
    /// then empty.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::Api` if either request fails.
    #[instrument(skip(self))]
    pub async fn load(&mut self) -> Result<()> {
        self.catalog = self
            .client
            .list_products()
            .await
            .map_err(ShopError::api(Operation::ListProducts))?;
        self.cart.clear();

        if let Some(session) = &self.session {
            let entries = self
                .client
                .fetch_cart(session.token())
                .await
                .map_err(ShopError::api(Operation::FetchCart))?;
            self.replace_cart(&entries);
        }

        Ok(())
    }

    /// Search the catalog by name or category.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::Api` if the request fails. No match is a 404;
    /// check [`ShopError::is_not_found`].
    #[instrument(skip(self))]
    pub async fn search(&self, text: &str) -> Result<Vec<Product>> {
        self.client
            .search_products(text)
            .await
            .map_err(ShopError::api(Operation::Search))
    }

    /// Add `qty` of a product to the cart.
    ///
    /// Nothing is sent when logged out, or when `options.prevent_duplicate`
    /// is set and the product is already in the cart.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::NotLoggedIn`, `ShopError::AlreadyInCart`, or
    /// `ShopError::Api` if the update fails.
    #[instrument(skip(self, product_id), fields(product_id = %product_id))]
    pub async fn add_to_cart(
        &mut self,
        product_id: &ProductId,
        qty: u32,
        options: AddOptions,
    ) -> Result<&[CartLineItem]> {
        if self.session.is_none() {
            return Err(ShopError::NotLoggedIn);
        }
        if options.prevent_duplicate && cart::contains_product(&self.cart, product_id) {
            return Err(ShopError::AlreadyInCart);
        }
        self.update(product_id, qty).await
    }

    /// Set the quantity of a product already in the cart. Zero removes it.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::NotLoggedIn`, or `ShopError::Api` if the update
    /// fails.
    #[instrument(skip(self, product_id), fields(product_id = %product_id))]
    pub async fn set_quantity(
        &mut self,
        product_id: &ProductId,
        qty: u32,
    ) -> Result<&[CartLineItem]> {
        self.update(product_id, qty).await
    }

    async fn update(&mut self, product_id: &ProductId, qty: u32) -> Result<&[CartLineItem]> {
        let session = self.session.as_ref().ok_or(ShopError::NotLoggedIn)?;
        let entries = self
            .client
            .update_cart(session.token(), product_id, qty)
            .await
            .map_err(ShopError::api(Operation::UpdateCart))?;
        self.replace_cart(&entries);
        Ok(&self.cart)
    }

    fn replace_cart(&mut self, entries: &[CartEntry]) {
        self.cart = cart::reconcile(Some(entries), &self.catalog);

        let dropped = entries.len().saturating_sub(self.cart.len());
        if dropped > 0 {
            warn!(dropped, "Cart entries reference products missing from the catalog");
        }
    }

    /// Validate the form and log in. The session is kept on success.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::Validation` for invalid input, or
    /// `ShopError::Api` if the backend rejects the login.
    #[instrument(skip(self, form))]
    pub async fn login(&mut self, form: &LoginForm) -> Result<&Session> {
        let credentials = form.validate()?;
        let response = self
            .client
            .login(&credentials)
            .await
            .map_err(ShopError::api(Operation::Login))?;

        info!(username = %response.username, "Logged in");
        self.cart.clear();
        Ok(self.session.insert(Session::from(response)))
    }

    /// Validate the form and register a new account.
    ///
    /// Registering does not log in.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::Validation` for invalid input, or
    /// `ShopError::Api` if the backend rejects the registration.
    #[instrument(skip(self, form))]
    pub async fn register(&self, form: &RegistrationForm) -> Result<()> {
        let credentials = form.validate()?;
        self.client
            .register(&credentials)
            .await
            .map_err(ShopError::api(Operation::Register))?;

        info!(username = %credentials.username, "Registered");
        Ok(())
    }

    /// Forget the session and the cart. Returns the session that was active.
    pub fn logout(&mut self) -> Option<Session> {
        self.cart.clear();
        self.session.take()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::num::NonZeroU32;
    use std::time::Duration;

    use qkart_core::Rating;
    use rust_decimal::Decimal;
    use secrecy::SecretString;
    use url::Url;

    use super::*;

    // Nothing listens here; tests that reach the network would fail.
    fn client() -> ApiClient {
        let endpoint = Url::parse("http://127.0.0.1:9/api/v1/").unwrap();
        ApiClient::with_endpoint(endpoint, Duration::from_secs(1)).unwrap()
    }

    fn session() -> Session {
        Session::new(SecretString::from("testtoken"), "criodo", Decimal::from(5000))
    }

    fn product(id: &str, name: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            category: "Phones".to_string(),
            cost: Price::from(100),
            rating: Rating::new(5).unwrap(),
            image_url: format!("https://i.example.com/{id}.png"),
        }
    }

    fn shop_with_cart() -> Shop {
        let mut shop = Shop::new(client(), Some(session()));
        shop.catalog = vec![product("a", "iPhone XR"), product("b", "Basketball")];
        shop.replace_cart(&[
            CartEntry::new("a", NonZeroU32::new(3).unwrap()),
            CartEntry::new("z", NonZeroU32::new(1).unwrap()),
        ]);
        shop
    }

    #[test]
    fn test_replace_cart_drops_unknown_products() {
        let shop = shop_with_cart();
        assert_eq!(shop.cart().len(), 1);
        assert_eq!(shop.cart_total(), Price::from(300));
    }

    #[tokio::test]
    async fn test_add_requires_login() {
        let mut shop = Shop::new(client(), None);
        let err = shop
            .add_to_cart(&ProductId::new("a"), 1, AddOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ShopError::NotLoggedIn));
    }

    #[tokio::test]
    async fn test_set_quantity_requires_login() {
        let mut shop = Shop::new(client(), None);
        let err = shop.set_quantity(&ProductId::new("a"), 0).await.unwrap_err();
        assert!(matches!(err, ShopError::NotLoggedIn));
    }

    #[tokio::test]
    async fn test_duplicate_add_is_refused_without_request() {
        let mut shop = shop_with_cart();
        let err = shop
            .add_to_cart(&ProductId::new("a"), 1, AddOptions::prevent_duplicate())
            .await
            .unwrap_err();
        assert!(matches!(err, ShopError::AlreadyInCart));
        assert_eq!(shop.cart().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_login_form_sends_nothing() {
        let mut shop = Shop::new(client(), None);
        let err = shop.login(&LoginForm::new("", "")).await.unwrap_err();
        assert!(matches!(err, ShopError::Validation(ref e) if e.errors().len() == 2));
        assert!(shop.session().is_none());
    }

    #[test]
    fn test_logout_clears_cart() {
        let mut shop = shop_with_cart();
        let session = shop.logout().unwrap();
        assert_eq!(session.username(), "criodo");
        assert!(shop.session().is_none());
        assert!(shop.cart().is_empty());
        assert!(shop.logout().is_none());
    }
}
