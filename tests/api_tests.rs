//! API integration tests
//!
//! These run against a live server with a migrated database:
//! `cargo test -- --ignored`

use reqwest::Client;
use serde_json::{json, Value};
use std::time::{SystemTime, UNIX_EPOCH};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Unique-enough suffix so reruns don't collide on usernames and uids
fn suffix() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos()
}

/// Register a fresh account, returning the registration response body
async fn register(client: &Client, username: &str) -> Value {
    let response = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&json!({
            "username": username,
            "password": "reading-room-8"
        }))
        .send()
        .await
        .expect("Failed to send register request");

    assert_eq!(response.status(), 201);
    response.json().await.expect("Failed to parse register response")
}

/// Helper to get an authenticated client token
async fn get_auth_token(client: &Client) -> String {
    let username = format!("tester{}", suffix());
    register(client, &username).await;

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": username,
            "password": "reading-room-8"
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

async fn create_book(client: &Client, token: &str, title: &str) -> i64 {
    let response = client
        .post(format!("{}/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "title": title }))
        .send()
        .await
        .expect("Failed to send create book request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse book response");
    body["id"].as_i64().expect("No book id")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
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
async fn test_register_creates_student_profile() {
    let client = Client::new();
    let username = format!("borrower{}", suffix());

    let body = register(&client, &username).await;

    assert_eq!(body["user"]["username"], username.as_str());
    assert_eq!(body["student"]["user_id"], body["user"]["id"]);
    assert_eq!(body["student"]["username"], username.as_str());
}

#[tokio::test]
#[ignore]
async fn test_register_duplicate_username_conflict() {
    let client = Client::new();
    let username = format!("dup{}", suffix());

    register(&client, &username).await;

    let response = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&json!({
            "username": username,
            "password": "reading-room-8"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();
    let username = format!("locked{}", suffix());
    register(&client, &username).await;

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": username,
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_get_current_user() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .get(format!("{}/auth/me", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["username"].is_string());
}

#[tokio::test]
#[ignore]
async fn test_list_books() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .get(format!("{}/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["items"].is_array());
    assert!(body["total"].is_number());
}

#[tokio::test]
#[ignore]
async fn test_list_books_requires_auth() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_duplicate_copy_uid_conflict() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let book_id = create_book(&client, &token, &format!("Copies {}", suffix())).await;
    let uid = format!("copy-{}", suffix());

    let first = client
        .post(format!("{}/books/{}/copies", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "uid": uid }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(first.status(), 201);

    let second = client
        .post(format!("{}/books/{}/copies", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "uid": uid }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(second.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_shelf_delete_nulls_copy_reference() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let book_id = create_book(&client, &token, &format!("Shelved {}", suffix())).await;

    let shelf: Value = client
        .post(format!("{}/shelves", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "name": format!("Aisle {}", suffix()) }))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse shelf");
    let shelf_id = shelf["id"].as_i64().unwrap();

    let uid = format!("shelved-{}", suffix());
    let copy: Value = client
        .post(format!("{}/books/{}/copies", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "uid": uid, "shelf_id": shelf_id }))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse copy");
    assert_eq!(copy["shelf_id"].as_i64(), Some(shelf_id));

    let deleted = client
        .delete(format!("{}/shelves/{}", BASE_URL, shelf_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(deleted.status(), 204);

    let after: Value = client
        .get(format!("{}/copies/by-uid/{}", BASE_URL, uid))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse copy");
    assert!(after["shelf_id"].is_null());
}

#[tokio::test]
#[ignore]
async fn test_refresh_status_without_due_date_rejected() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let book_id = create_book(&client, &token, &format!("Dateless {}", suffix())).await;

    let copy: Value = client
        .post(format!("{}/books/{}/copies", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse copy");
    let copy_id = copy["id"].as_i64().unwrap();

    let response = client
        .post(format!("{}/copies/{}/refresh-status", BASE_URL, copy_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_refresh_status_marks_overdue_copy_due() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let book_id = create_book(&client, &token, &format!("Overdue {}", suffix())).await;

    let due_back = chrono_days_ago(20);
    let copy: Value = client
        .post(format!("{}/books/{}/copies", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "due_back": due_back, "status": "OnLoan" }))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse copy");
    let copy_id = copy["id"].as_i64().unwrap();

    let refreshed: Value = client
        .post(format!("{}/copies/{}/refresh-status", BASE_URL, copy_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse copy");

    assert_eq!(refreshed["status"], "d");
}

#[tokio::test]
#[ignore]
async fn test_refresh_status_leaves_recent_copy_unchanged() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let book_id = create_book(&client, &token, &format!("Recent {}", suffix())).await;

    let due_back = chrono_days_ago(14);
    let copy: Value = client
        .post(format!("{}/books/{}/copies", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "due_back": due_back, "status": "OnLoan" }))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse copy");
    let copy_id = copy["id"].as_i64().unwrap();

    let refreshed: Value = client
        .post(format!("{}/copies/{}/refresh-status", BASE_URL, copy_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse copy");

    assert_eq!(refreshed["status"], "o");
}

#[tokio::test]
#[ignore]
async fn test_admin_entities() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .get(format!("{}/admin/entities", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let slugs: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["slug"].as_str().unwrap())
        .collect();
    assert_eq!(slugs, vec!["author", "genre", "book", "book_copy"]);
}

#[tokio::test]
#[ignore]
async fn test_admin_book_listing_projects_configured_columns() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let title = format!("Projected {}", suffix());
    create_book(&client, &token, &title).await;

    let response: Value = client
        .get(format!("{}/admin/book/records", BASE_URL))
        .query(&[("search", title.as_str())])
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    let rows = response["items"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    let row = rows[0].as_object().unwrap();
    assert_eq!(row["title"], title.as_str());
    assert!(row.contains_key("display_author"));
    assert!(row.contains_key("display_genre"));
    assert!(row.contains_key("isbn"));
    assert!(!row.contains_key("nb_copies"));
}

#[tokio::test]
#[ignore]
async fn test_admin_unknown_entity() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .get(format!("{}/admin/loan/records", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

/// YYYY-MM-DD string for `days` days before today (UTC)
fn chrono_days_ago(days: i64) -> String {
    (chrono::Utc::now().date_naive() - chrono::Duration::days(days)).to_string()
}
