//! Integration tests for Matchday.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and run migrations
//! cargo run -p matchday-cli -- migrate
//! cargo run -p matchday-cli -- seed
//!
//! # Start the API
//! cargo run -p matchday-api
//!
//! # Run integration tests
//! cargo test -p matchday-integration-tests -- --ignored
//! ```
//!
//! Tests are `#[ignore]`d by default because they need a running server
//! and a seeded database.

use reqwest::Client;
use serde_json::Value;
use uuid::Uuid;

/// Base URL for the API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("MATCHDAY_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string())
}

/// A fresh HTTP client.
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .build()
        .expect("Failed to create HTTP client")
}

/// A unique email for test account registration.
#[must_use]
pub fn unique_email() -> String {
    format!("test-{}@example.com", Uuid::new_v4())
}

/// Register a fresh account and return `(user_id, token)`.
///
/// # Panics
///
/// Panics if registration or login fails.
pub async fn register_and_login(client: &Client) -> (i64, String) {
    let base_url = base_url();
    let email = unique_email();
    let password = "integration-test-pw";

    let resp = client
        .post(format!("{base_url}/api/auth/register"))
        .json(&serde_json::json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("Failed to register");
    assert_eq!(resp.status(), 201, "register should succeed");

    let resp = client
        .post(format!("{base_url}/api/auth/login"))
        .json(&serde_json::json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("Failed to login");
    assert_eq!(resp.status(), 200, "login should succeed");

    let body: Value = resp.json().await.expect("Failed to parse login response");
    let user_id = body["user"]["id"].as_i64().expect("user id in response");
    let token = body["token"].as_str().expect("token in response").to_string();

    (user_id, token)
}

/// Fetch the seeded catalog and return the first two products as
/// `(id, price)` pairs.
///
/// # Panics
///
/// Panics if the catalog has fewer than two products.
pub async fn two_products(client: &Client) -> ((i64, f64), (i64, f64)) {
    let base_url = base_url();
    let resp = client
        .get(format!("{base_url}/api/products"))
        .send()
        .await
        .expect("Failed to list products");
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.expect("Failed to parse products");
    let products = body["products"].as_array().expect("products array");
    assert!(
        products.len() >= 2,
        "catalog must be seeded (matchday-cli seed)"
    );

    let parse = |p: &Value| {
        let id = p["id"].as_i64().expect("product id");
        let price = p["price"]
            .as_str()
            .expect("price string")
            .parse::<f64>()
            .expect("numeric price");
        (id, price)
    };

    (parse(&products[0]), parse(&products[1]))
}
