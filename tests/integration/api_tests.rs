//! API integration tests
//!
//! These run against a live dev server with a seeded administrator
//! (admin@lectern.local / admin). Run with: cargo test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Helper to get an admin token
async fn get_admin_token(client: &Client) -> String {
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "email": "admin@lectern.local",
            "password": "admin"
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

/// Register a fresh member and return (token, user_id)
async fn register_member(client: &Client, tag: &str) -> (String, i64) {
    let email = format!("member-{}-{}@example.com", tag, std::process::id());

    let response = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&json!({
            "first_name": "Test",
            "last_name": "Member",
            "email": email,
            "password": "password"
        }))
        .send()
        .await
        .expect("Failed to send register request");
    assert_eq!(response.status(), 201);

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "email": email,
            "password": "password"
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    let token = body["token"].as_str().expect("No token").to_string();
    let user_id = body["identity"]["id"].as_i64().expect("No identity id");
    (token, user_id)
}

/// Create a book as admin and return its id
async fn create_book(client: &Client, admin_token: &str, availability: i64) -> i64 {
    let response = client
        .post(format!("{}/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", admin_token))
        .json(&json!({
            "title": "Integration Test Book",
            "author": "Test Author",
            "genre": "Fiction",
            "availability": availability
        }))
        .send()
        .await
        .expect("Failed to create book");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse book response");
    body["id"].as_i64().expect("No book id")
}

async fn get_availability(client: &Client, book_id: i64) -> i64 {
    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to get book");
    let body: Value = response.json().await.expect("Failed to parse book");
    body["availability"].as_i64().expect("No availability")
}

#[tokio::test]
#[ignore]
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "email": "admin@lectern.local",
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_duplicate_registration_conflicts() {
    let client = Client::new();
    let email = format!("dup-{}@example.com", std::process::id());
    let payload = json!({
        "first_name": "Dup",
        "last_name": "Licate",
        "email": email,
        "password": "password"
    });

    let first = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(first.status(), 201);

    let second = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(second.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_create_book_requires_admin() {
    let client = Client::new();
    let (member_token, _) = register_member(&client, "nonadmin").await;

    let response = client
        .post(format!("{}/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", member_token))
        .json(&json!({
            "title": "Forbidden",
            "author": "Nobody"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 403);
}

#[tokio::test]
#[ignore]
async fn test_empty_title_rejected() {
    let client = Client::new();
    let admin_token = get_admin_token(&client).await;

    let response = client
        .post(format!("{}/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", admin_token))
        .json(&json!({
            "title": "",
            "author": "Smith"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_borrow_sets_due_date_and_decrements_availability() {
    let client = Client::new();
    let admin_token = get_admin_token(&client).await;
    let (member_token, _) = register_member(&client, "borrow").await;
    let book_id = create_book(&client, &admin_token, 1).await;

    let response = client
        .post(format!("{}/loans", BASE_URL))
        .header("Authorization", format!("Bearer {}", member_token))
        .json(&json!({ "book_id": book_id }))
        .send()
        .await
        .expect("Failed to borrow");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse loan");
    let due = body["due_date"].as_str().expect("No due date");
    let expected = (chrono::Utc::now().date_naive() + chrono::Duration::days(7)).to_string();
    assert_eq!(due, expected);

    assert_eq!(get_availability(&client, book_id).await, 0);
}

#[tokio::test]
#[ignore]
async fn test_borrow_exhausted_book_fails_without_side_effects() {
    let client = Client::new();
    let admin_token = get_admin_token(&client).await;
    let (first_token, first_id) = register_member(&client, "first").await;
    let (second_token, second_id) = register_member(&client, "second").await;
    let book_id = create_book(&client, &admin_token, 1).await;

    let response = client
        .post(format!("{}/loans", BASE_URL))
        .header("Authorization", format!("Bearer {}", first_token))
        .json(&json!({ "book_id": book_id }))
        .send()
        .await
        .expect("Failed to borrow");
    assert_eq!(response.status(), 201);

    // Second borrower sees no copies
    let response = client
        .post(format!("{}/loans", BASE_URL))
        .header("Authorization", format!("Bearer {}", second_token))
        .json(&json!({ "book_id": book_id }))
        .send()
        .await
        .expect("Failed to borrow");
    assert_eq!(response.status(), 409);

    // No loan row was created for the failed borrow
    let response = client
        .get(format!("{}/users/{}/loans", BASE_URL, second_id))
        .header("Authorization", format!("Bearer {}", second_token))
        .send()
        .await
        .expect("Failed to list loans");
    let loans: Value = response.json().await.expect("Failed to parse loans");
    assert_eq!(loans.as_array().expect("Not an array").len(), 0);

    // First borrower holds exactly one active loan
    let response = client
        .get(format!("{}/users/{}/loans", BASE_URL, first_id))
        .header("Authorization", format!("Bearer {}", first_token))
        .send()
        .await
        .expect("Failed to list loans");
    let loans: Value = response.json().await.expect("Failed to parse loans");
    assert_eq!(loans.as_array().expect("Not an array").len(), 1);
}

#[tokio::test]
#[ignore]
async fn test_return_restores_availability() {
    let client = Client::new();
    let admin_token = get_admin_token(&client).await;
    let (member_token, _) = register_member(&client, "return").await;
    let book_id = create_book(&client, &admin_token, 2).await;

    let response = client
        .post(format!("{}/loans", BASE_URL))
        .header("Authorization", format!("Bearer {}", member_token))
        .json(&json!({ "book_id": book_id }))
        .send()
        .await
        .expect("Failed to borrow");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse loan");
    let loan_id = body["id"].as_i64().expect("No loan id");

    assert_eq!(get_availability(&client, book_id).await, 1);

    let response = client
        .post(format!("{}/loans/{}/return", BASE_URL, loan_id))
        .header("Authorization", format!("Bearer {}", member_token))
        .send()
        .await
        .expect("Failed to return");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse return");
    assert_eq!(body["loan"]["returned"], true);
    assert!(body["loan"]["actual_return_date"].is_string());

    // Round trip restores the pre-borrow availability
    assert_eq!(get_availability(&client, book_id).await, 2);
}

#[tokio::test]
#[ignore]
async fn test_double_return_conflicts_and_keeps_availability() {
    let client = Client::new();
    let admin_token = get_admin_token(&client).await;
    let (member_token, _) = register_member(&client, "double").await;
    let book_id = create_book(&client, &admin_token, 1).await;

    let response = client
        .post(format!("{}/loans", BASE_URL))
        .header("Authorization", format!("Bearer {}", member_token))
        .json(&json!({ "book_id": book_id }))
        .send()
        .await
        .expect("Failed to borrow");
    let body: Value = response.json().await.expect("Failed to parse loan");
    let loan_id = body["id"].as_i64().expect("No loan id");

    let first = client
        .post(format!("{}/loans/{}/return", BASE_URL, loan_id))
        .header("Authorization", format!("Bearer {}", member_token))
        .send()
        .await
        .expect("Failed to return");
    assert_eq!(first.status(), 200);

    let second = client
        .post(format!("{}/loans/{}/return", BASE_URL, loan_id))
        .header("Authorization", format!("Bearer {}", member_token))
        .send()
        .await
        .expect("Failed to return");
    assert_eq!(second.status(), 409);

    // Availability was incremented exactly once
    assert_eq!(get_availability(&client, book_id).await, 1);
}

#[tokio::test]
#[ignore]
async fn test_concurrent_borrows_of_last_copy() {
    let client = Client::new();
    let admin_token = get_admin_token(&client).await;
    let (first_token, _) = register_member(&client, "race-a").await;
    let (second_token, _) = register_member(&client, "race-b").await;
    let book_id = create_book(&client, &admin_token, 1).await;

    let borrow = |token: String| {
        let client = client.clone();
        async move {
            client
                .post(format!("{}/loans", BASE_URL))
                .header("Authorization", format!("Bearer {}", token))
                .json(&json!({ "book_id": book_id }))
                .send()
                .await
                .expect("Failed to borrow")
                .status()
                .as_u16()
        }
    };

    let (a, b) = tokio::join!(borrow(first_token), borrow(second_token));

    // Exactly one succeeds, the other observes no copies available
    let mut statuses = [a, b];
    statuses.sort();
    assert_eq!(statuses, [201, 409]);

    assert_eq!(get_availability(&client, book_id).await, 0);
}

#[tokio::test]
#[ignore]
async fn test_member_cannot_read_other_members_loans() {
    let client = Client::new();
    let (first_token, _) = register_member(&client, "peek-a").await;
    let (_, second_id) = register_member(&client, "peek-b").await;

    let response = client
        .get(format!("{}/users/{}/loans", BASE_URL, second_id))
        .header("Authorization", format!("Bearer {}", first_token))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 403);
}

#[tokio::test]
#[ignore]
async fn test_audit_log_requires_admin_and_records_actions() {
    let client = Client::new();
    let admin_token = get_admin_token(&client).await;
    let (member_token, _) = register_member(&client, "audit").await;

    let response = client
        .get(format!("{}/logs", BASE_URL))
        .header("Authorization", format!("Bearer {}", member_token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 403);

    let response = client
        .get(format!("{}/logs", BASE_URL))
        .header("Authorization", format!("Bearer {}", admin_token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse logs");
    assert!(!body.as_array().expect("Not an array").is_empty());
}
