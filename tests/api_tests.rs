//! Integration tests for the user directory endpoints.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use userdir::config::Config;

async fn spawn_app() -> Router {
    let db_path =
        std::env::temp_dir().join(format!("userdir-api-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.database.url = format!("sqlite:{}", db_path.display());

    let state = userdir::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    userdir::api::router(state)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);

    let request = match body {
        Some(body) => builder
            .header("Content-Type", mime::APPLICATION_JSON.as_ref())
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, json)
}

fn user_body(email: &str) -> Value {
    json!({
        "firstname": "A",
        "lastname": "B",
        "email": email,
        "phone": "1",
        "age": 30,
        "dept": "eng"
    })
}

fn assert_envelope_agrees(status: StatusCode, body: &Value) {
    assert_eq!(
        body["success"].as_bool(),
        Some(status.is_success()),
        "status {status} disagrees with body {body}"
    );
    assert!(body["message"].is_string(), "missing message in {body}");
}

#[tokio::test]
async fn test_full_user_lifecycle() {
    let app = spawn_app().await;

    let (status, body) = send(&app, "POST", "/users", Some(user_body("a@x.com"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_envelope_agrees(status, &body);
    assert_eq!(body["message"], "User added successfully");
    assert_eq!(body["data"]["dept"], "eng");
    let id = body["data"]["id"].as_i64().expect("id must be an integer");
    assert!(id > 0);

    let (status, body) = send(&app, "GET", &format!("/users/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], id);
    assert_eq!(body["data"]["firstname"], "A");
    assert_eq!(body["data"]["lastname"], "B");
    assert_eq!(body["data"]["email"], "a@x.com");
    assert_eq!(body["data"]["phone"], "1");
    assert_eq!(body["data"]["age"], 30);
    assert_eq!(body["data"]["dept"], "eng");
    assert!(body["data"]["created_at"].is_string());

    let mut changed = user_body("a@x.com");
    changed["dept"] = json!("sales");
    let (status, body) = send(&app, "PUT", &format!("/users/{id}"), Some(changed)).await;
    assert_eq!(status, StatusCode::OK);
    assert_envelope_agrees(status, &body);
    assert_eq!(body["message"], "User updated successfully");
    assert_eq!(body["data"]["id"], id);
    assert_eq!(body["data"]["age"], 30);
    assert!(body["data"].get("dept").is_none(), "update must not echo dept");

    let (_, body) = send(&app, "GET", &format!("/users/{id}"), None).await;
    assert_eq!(body["data"]["dept"], "sales");

    let (status, body) = send(&app, "DELETE", &format!("/users/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_envelope_agrees(status, &body);
    assert_eq!(body["message"], "User deleted successfully");
    assert_eq!(body["deletedUser"]["id"], id);
    assert_eq!(body["deletedUser"]["email"], "a@x.com");
    assert!(body["deletedUser"].get("phone").is_none());
    assert!(body["deletedUser"].get("age").is_none());
    assert!(body["deletedUser"].get("dept").is_none());

    let (status, body) = send(&app, "GET", &format!("/users/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_envelope_agrees(status, &body);
    assert_eq!(body["message"], "User not found");
}

#[tokio::test]
async fn test_list_users() {
    let app = spawn_app().await;

    let (status, body) = send(&app, "GET", "/users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "No users found");
    assert_eq!(body["count"], 0);
    assert_eq!(body["data"], json!([]));

    send(&app, "POST", "/users", Some(user_body("first@x.com"))).await;
    send(&app, "POST", "/users", Some(user_body("second@x.com"))).await;

    let (status, body) = send(&app, "GET", "/users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Users fetched successfully");
    assert_eq!(body["count"], 2);
    assert_eq!(body["data"][0]["email"], "second@x.com");
    assert_eq!(body["data"][1]["email"], "first@x.com");
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    let app = spawn_app().await;

    let (first, _) = send(&app, "POST", "/users", Some(user_body("dup@x.com"))).await;
    let (second, body) = send(&app, "POST", "/users", Some(user_body("dup@x.com"))).await;

    assert_eq!(first, StatusCode::CREATED);
    assert_eq!(second, StatusCode::CONFLICT);
    assert_envelope_agrees(second, &body);
    assert_eq!(body["message"], "Email already exists");

    let (_, body) = send(&app, "GET", "/users", None).await;
    assert_eq!(body["count"], 1);
}

#[tokio::test]
async fn test_update_to_existing_email_conflicts() {
    let app = spawn_app().await;

    send(&app, "POST", "/users", Some(user_body("taken@x.com"))).await;
    let (_, body) = send(&app, "POST", "/users", Some(user_body("mine@x.com"))).await;
    let id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/users/{id}"),
        Some(user_body("taken@x.com")),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Email already exists");

    let (_, body) = send(&app, "GET", &format!("/users/{id}"), None).await;
    assert_eq!(body["data"]["email"], "mine@x.com");
}

#[tokio::test]
async fn test_create_validation() {
    let app = spawn_app().await;

    for field in ["firstname", "lastname", "email", "phone", "age", "dept"] {
        let mut body = user_body("v@x.com");
        body.as_object_mut().unwrap().remove(field);

        let (status, response) = send(&app, "POST", "/users", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "missing {field}");
        assert_envelope_agrees(status, &response);
        assert_eq!(
            response["message"],
            "First name, last name, email, phone, age and dept are required"
        );
    }

    let mut zero_age = user_body("v@x.com");
    zero_age["age"] = json!(0);
    let (status, _) = send(&app, "POST", "/users", Some(zero_age)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut empty_name = user_body("v@x.com");
    empty_name["firstname"] = json!("");
    let (status, _) = send(&app, "POST", "/users", Some(empty_name)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, "GET", "/users", None).await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_malformed_body_is_validation_error() {
    let app = spawn_app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/users")
        .header("Content-Type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_wrongly_typed_fields_are_validation_errors() {
    let app = spawn_app().await;

    let cases = [
        ("age", json!("30")),
        ("phone", json!(5551234)),
        ("age", json!(1.5)),
    ];

    for (field, value) in cases {
        let mut body = user_body("typed@x.com");
        body[field] = value.clone();

        let (status, response) = send(&app, "POST", "/users", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{field} = {value}");
        assert_envelope_agrees(status, &response);
        assert_eq!(
            response["message"],
            "First name, last name, email, phone, age and dept are required"
        );
        assert!(response["error"].is_string(), "parser detail expected in {response}");
    }

    // null reads as absent
    let mut body = user_body("typed@x.com");
    body["age"] = Value::Null;
    let (status, response) = send(&app, "POST", "/users", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_envelope_agrees(status, &response);

    let (_, body) = send(&app, "GET", "/users", None).await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_update_missing_field_leaves_row_unchanged() {
    let app = spawn_app().await;

    let (_, body) = send(&app, "POST", "/users", Some(user_body("keep@x.com"))).await;
    let id = body["data"]["id"].as_i64().unwrap();

    let mut incomplete = user_body("changed@x.com");
    incomplete.as_object_mut().unwrap().remove("age");

    let (status, body) = send(&app, "PUT", &format!("/users/{id}"), Some(incomplete)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_envelope_agrees(status, &body);

    let (_, body) = send(&app, "GET", &format!("/users/{id}"), None).await;
    assert_eq!(body["data"]["email"], "keep@x.com");
    assert_eq!(body["data"]["age"], 30);
}

#[tokio::test]
async fn test_update_unknown_user_is_not_found() {
    let app = spawn_app().await;

    let (status, body) = send(&app, "PUT", "/users/4242", Some(user_body("x@x.com"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");

    // validation runs before the existence check
    let (status, _) = send(&app, "PUT", "/users/4242", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_twice() {
    let app = spawn_app().await;

    let (_, body) = send(&app, "POST", "/users", Some(user_body("gone@x.com"))).await;
    let id = body["data"]["id"].as_i64().unwrap();

    let (first, _) = send(&app, "DELETE", &format!("/users/{id}"), None).await;
    let (second, body) = send(&app, "DELETE", &format!("/users/{id}"), None).await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::NOT_FOUND);
    assert_envelope_agrees(second, &body);
}

#[tokio::test]
async fn test_non_numeric_id_is_not_found() {
    let app = spawn_app().await;

    let (status, body) = send(&app, "GET", "/users/abc", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");

    let (status, _) = send(&app, "DELETE", "/users/abc", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_ids_are_unique() {
    let app = spawn_app().await;

    let mut ids = Vec::new();
    for i in 0..5 {
        let (status, body) =
            send(&app, "POST", "/users", Some(user_body(&format!("u{i}@x.com")))).await;
        assert_eq!(status, StatusCode::CREATED);
        ids.push(body["data"]["id"].as_i64().unwrap());
    }

    let mut deduped = ids.clone();
    deduped.sort_unstable();
    deduped.dedup();
    assert_eq!(deduped.len(), ids.len());
}
