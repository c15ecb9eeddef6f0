//! Integration tests for the QKart storefront client.
//!
//! Tests run against [`FakeBackend`], an in-process axum server that speaks
//! the QKart REST API on an ephemeral port. No external services are needed:
//!
//! ```bash
//! cargo test -p qkart-integration-tests
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! let backend = FakeBackend::start().await;
//! let client = backend.client();
//! let products = client.list_products().await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
    routing::post,
};
use qkart_storefront::ApiClient;
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::task::JoinHandle;
use url::Url;

/// Seeded user with a cart.
pub const USERNAME: &str = "crio.do";
/// Password of [`USERNAME`].
pub const PASSWORD: &str = "learnbydoing";
/// Wallet balance of every new user.
pub const BALANCE: u32 = 5000;

pub const IPHONE_ID: &str = "KCRwjF7lN97HnEaY";
pub const BASKETBALL_ID: &str = "BW0jAAeDJmlZCF8i";
pub const DUFFLE_ID: &str = "PmInA797xJhMIPti";

/// Catalog served by the fake backend, in the backend's wire format.
#[must_use]
pub fn catalog() -> Vec<Value> {
    vec![
        json!({
            "name": "iPhone XR",
            "category": "Phones",
            "cost": 100,
            "rating": 4,
            "image": "https://i.imgur.com/lulqWzW.jpg",
            "_id": IPHONE_ID
        }),
        json!({
            "name": "Basketball",
            "category": "Sports",
            "cost": 100,
            "rating": 5,
            "image": "https://i.imgur.com/lulqWzW.jpg",
            "_id": BASKETBALL_ID
        }),
        json!({
            "name": "Tan Leatherette Weekender Duffle",
            "category": "Fashion",
            "cost": 150,
            "rating": 4,
            "image": "https://crio-directus-assets.s3.ap-south-1.amazonaws.com/ff071a1c-1099-48f9-9b03-f858ccc53832.png",
            "_id": DUFFLE_ID
        }),
    ]
}

struct User {
    password: String,
    token: String,
    cart: Vec<(String, u32)>,
}

struct BackendState {
    products: Vec<Value>,
    users: HashMap<String, User>,
    products_failure: Option<StatusCode>,
    malformed_catalog: bool,
}

#[derive(Clone)]
struct Shared {
    state: Arc<Mutex<BackendState>>,
    cart_updates: Arc<AtomicUsize>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, BackendState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl BackendState {
    fn user_for_token(&mut self, headers: &HeaderMap) -> Option<&mut User> {
        let token = headers
            .get(header::AUTHORIZATION)?
            .to_str()
            .ok()?
            .strip_prefix("Bearer ")?;
        self.users.values_mut().find(|user| user.token == token)
    }

    fn has_product(&self, id: &str) -> bool {
        self.products.iter().any(|p| p["_id"] == id)
    }
}

/// An in-process QKart backend.
///
/// The server task is aborted when the backend is dropped.
pub struct FakeBackend {
    addr: SocketAddr,
    shared: Shared,
    server: JoinHandle<()>,
}

impl FakeBackend {
    /// Start a backend with [`catalog`] and one user, [`USERNAME`], whose
    /// cart holds two iPhones.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    #[allow(clippy::unwrap_used)]
    pub async fn start() -> Self {
        let mut users = HashMap::new();
        users.insert(
            USERNAME.to_string(),
            User {
                password: PASSWORD.to_string(),
                token: token_for(USERNAME),
                cart: vec![(IPHONE_ID.to_string(), 2)],
            },
        );

        let shared = Shared {
            state: Arc::new(Mutex::new(BackendState {
                products: catalog(),
                users,
                products_failure: None,
                malformed_catalog: false,
            })),
            cart_updates: Arc::new(AtomicUsize::new(0)),
        };

        let api = Router::new()
            .route("/products", get(list_products))
            .route("/products/search", get(search_products))
            .route("/cart", get(get_cart).post(update_cart))
            .route("/auth/login", post(login))
            .route("/auth/register", post(register));
        let app = Router::new()
            .nest("/api/v1", api)
            .with_state(shared.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(error = %e, "Fake backend stopped");
            }
        });

        Self {
            addr,
            shared,
            server,
        }
    }

    /// Base URL of the API, ending with `/`.
    ///
    /// # Panics
    ///
    /// Never in practice; the URL is built from a bound socket address.
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn endpoint(&self) -> Url {
        Url::parse(&format!("http://{}/api/v1/", self.addr)).unwrap()
    }

    /// A client pointed at this backend.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built.
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn client(&self) -> ApiClient {
        ApiClient::with_endpoint(self.endpoint(), Duration::from_secs(5)).unwrap()
    }

    /// Token the backend issues for `username` at login.
    #[must_use]
    pub fn token(username: &str) -> String {
        token_for(username)
    }

    /// Make `GET /products` fail with `status`.
    pub fn fail_products(&self, status: StatusCode) {
        self.shared.lock().products_failure = Some(status);
    }

    /// Make `GET /products` answer 200 with records missing required fields.
    pub fn serve_malformed_catalog(&self) {
        self.shared.lock().malformed_catalog = true;
    }

    /// Put an entry in a user's cart without checking the catalog.
    ///
    /// # Panics
    ///
    /// Panics if the user does not exist.
    #[allow(clippy::unwrap_used)]
    pub fn put_cart_entry(&self, username: &str, product_id: &str, qty: u32) {
        let mut state = self.shared.lock();
        let user = state.users.get_mut(username).unwrap();
        user.cart.push((product_id.to_string(), qty));
    }

    /// Number of `POST /cart` requests received.
    #[must_use]
    pub fn cart_updates(&self) -> usize {
        self.shared.cart_updates.load(Ordering::SeqCst)
    }
}

impl Drop for FakeBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}

fn token_for(username: &str) -> String {
    format!("token-{username}")
}

fn failure(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "success": false, "message": message }))).into_response()
}

fn cart_json(cart: &[(String, u32)]) -> Json<Value> {
    Json(
        cart.iter()
            .map(|(id, qty)| json!({ "productId": id, "qty": qty }))
            .collect(),
    )
}

// =============================================================================
// Handlers
// =============================================================================

async fn list_products(State(shared): State<Shared>) -> Response {
    let state = shared.lock();
    if let Some(status) = state.products_failure {
        return failure(status, "Internal server error");
    }
    if state.malformed_catalog {
        return Json(json!([{ "_id": "A", "name": "x" }])).into_response();
    }
    Json(Value::Array(state.products.clone())).into_response()
}

#[derive(Deserialize)]
struct SearchParams {
    #[serde(default)]
    value: String,
}

async fn search_products(
    State(shared): State<Shared>,
    Query(params): Query<SearchParams>,
) -> Response {
    let needle = params.value.to_lowercase();
    let matches: Vec<Value> = shared
        .lock()
        .products
        .iter()
        .filter(|p| {
            ["name", "category"].iter().any(|field| {
                p[*field]
                    .as_str()
                    .is_some_and(|v| v.to_lowercase().contains(&needle))
            })
        })
        .cloned()
        .collect();

    if matches.is_empty() {
        return (StatusCode::NOT_FOUND, Json(Value::Array(Vec::new()))).into_response();
    }
    Json(Value::Array(matches)).into_response()
}

async fn get_cart(State(shared): State<Shared>, headers: HeaderMap) -> Response {
    let mut state = shared.lock();
    let Some(user) = state.user_for_token(&headers) else {
        return failure(
            StatusCode::UNAUTHORIZED,
            "Protected route, Oauth2 Bearer token not found",
        );
    };
    cart_json(&user.cart).into_response()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CartUpdateBody {
    product_id: String,
    qty: u32,
}

async fn update_cart(
    State(shared): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<CartUpdateBody>,
) -> Response {
    shared.cart_updates.fetch_add(1, Ordering::SeqCst);

    let mut state = shared.lock();
    let known = state.has_product(&body.product_id);
    let Some(user) = state.user_for_token(&headers) else {
        return failure(
            StatusCode::UNAUTHORIZED,
            "Protected route, Oauth2 Bearer token not found",
        );
    };
    if !known {
        return failure(StatusCode::NOT_FOUND, "Product doesn't exist");
    }

    let position = user.cart.iter().position(|(id, _)| *id == body.product_id);
    match (position, body.qty) {
        (Some(i), 0) => {
            user.cart.remove(i);
        }
        (Some(i), qty) => {
            if let Some(entry) = user.cart.get_mut(i) {
                entry.1 = qty;
            }
        }
        (None, 0) => {
            return failure(StatusCode::BAD_REQUEST, "Product not in cart");
        }
        (None, qty) => user.cart.push((body.product_id, qty)),
    }
    cart_json(&user.cart).into_response()
}

#[derive(Deserialize)]
struct CredentialsBody {
    username: String,
    password: String,
}

async fn login(State(shared): State<Shared>, Json(body): Json<CredentialsBody>) -> Response {
    let state = shared.lock();
    let Some(user) = state.users.get(&body.username) else {
        return failure(StatusCode::BAD_REQUEST, "Username does not exist");
    };
    if user.password != body.password {
        return failure(StatusCode::BAD_REQUEST, "Password is incorrect");
    }

    (
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "token": user.token,
            "username": body.username,
            "balance": BALANCE
        })),
    )
        .into_response()
}

async fn register(State(shared): State<Shared>, Json(body): Json<CredentialsBody>) -> Response {
    let mut state = shared.lock();
    if state.users.contains_key(&body.username) {
        return failure(StatusCode::BAD_REQUEST, "Username is already taken");
    }

    let token = token_for(&body.username);
    state.users.insert(
        body.username,
        User {
            password: body.password,
            token,
            cart: Vec::new(),
        },
    );
    (StatusCode::CREATED, Json(json!({ "success": true }))).into_response()
}
