//! Integration tests for the cart flow.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - A seeded catalog (cargo run -p matchday-cli -- seed)
//! - The API running (cargo run -p matchday-api)
//!
//! Run with: cargo test -p matchday-integration-tests -- --ignored

use serde_json::{Value, json};

use matchday_integration_tests::{base_url, client, register_and_login, two_products};

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_add_same_product_twice_accumulates_one_line() {
    let client = client();
    let base_url = base_url();
    let (user_id, _) = register_and_login(&client).await;
    let ((product_id, _), _) = two_products(&client).await;

    for _ in 0..2 {
        let resp = client
            .post(format!("{base_url}/api/cart/add"))
            .json(&json!({ "userId": user_id, "productId": product_id, "quantity": 1 }))
            .send()
            .await
            .expect("Failed to add to cart");
        assert_eq!(resp.status(), 200);
    }

    let resp = client
        .get(format!("{base_url}/api/cart/{user_id}"))
        .send()
        .await
        .expect("Failed to get cart");
    let body: Value = resp.json().await.expect("Failed to parse cart");
    let cart = body["cart"].as_array().expect("cart array");

    // One line, quantity 2 - not two lines
    assert_eq!(cart.len(), 1);
    assert_eq!(cart[0]["quantity"].as_u64(), Some(2));
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_add_unknown_product_is_404() {
    let client = client();
    let base_url = base_url();
    let (user_id, _) = register_and_login(&client).await;

    let resp = client
        .post(format!("{base_url}/api/cart/add"))
        .json(&json!({ "userId": user_id, "productId": 999_999, "quantity": 1 }))
        .send()
        .await
        .expect("Failed to call add");
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_add_zero_quantity_is_400() {
    let client = client();
    let base_url = base_url();
    let (user_id, _) = register_and_login(&client).await;
    let ((product_id, _), _) = two_products(&client).await;

    let resp = client
        .post(format!("{base_url}/api/cart/add"))
        .json(&json!({ "userId": user_id, "productId": product_id, "quantity": 0 }))
        .send()
        .await
        .expect("Failed to call add");
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_remove_missing_line_is_404_and_cart_unchanged() {
    let client = client();
    let base_url = base_url();
    let (user_id, _) = register_and_login(&client).await;
    let ((product_a, _), (product_b, _)) = two_products(&client).await;

    let resp = client
        .post(format!("{base_url}/api/cart/add"))
        .json(&json!({ "userId": user_id, "productId": product_a, "quantity": 1 }))
        .send()
        .await
        .expect("Failed to add");
    assert_eq!(resp.status(), 200);

    // product_b was never added
    let resp = client
        .post(format!("{base_url}/api/cart/remove"))
        .json(&json!({ "userId": user_id, "productId": product_b }))
        .send()
        .await
        .expect("Failed to call remove");
    assert_eq!(resp.status(), 404);

    let resp = client
        .get(format!("{base_url}/api/cart/{user_id}"))
        .send()
        .await
        .expect("Failed to get cart");
    let body: Value = resp.json().await.expect("Failed to parse cart");
    assert_eq!(body["cart"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_empty_cart_reads_as_empty_sequence() {
    let client = client();
    let base_url = base_url();
    let (user_id, _) = register_and_login(&client).await;

    // No cart exists yet - still a 200 with an empty sequence
    let resp = client
        .get(format!("{base_url}/api/cart/{user_id}"))
        .send()
        .await
        .expect("Failed to get cart");
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.expect("Failed to parse cart");
    assert_eq!(body["cart"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_clear_is_idempotent() {
    let client = client();
    let base_url = base_url();
    let (user_id, _) = register_and_login(&client).await;

    // Clearing a cart that never existed still succeeds
    for _ in 0..2 {
        let resp = client
            .post(format!("{base_url}/api/cart/clear"))
            .json(&json!({ "userId": user_id }))
            .send()
            .await
            .expect("Failed to clear cart");
        assert_eq!(resp.status(), 200);
    }
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_update_quantity_below_one_removes_line() {
    let client = client();
    let base_url = base_url();
    let (user_id, _) = register_and_login(&client).await;
    let ((product_id, _), _) = two_products(&client).await;

    let resp = client
        .post(format!("{base_url}/api/cart/add"))
        .json(&json!({ "userId": user_id, "productId": product_id, "quantity": 3 }))
        .send()
        .await
        .expect("Failed to add");
    assert_eq!(resp.status(), 200);

    let resp = client
        .post(format!("{base_url}/api/cart/update"))
        .json(&json!({ "userId": user_id, "productId": product_id, "quantity": 0 }))
        .send()
        .await
        .expect("Failed to update");
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.expect("Failed to parse cart");
    assert_eq!(body["cart"].as_array().map(Vec::len), Some(0));
}
