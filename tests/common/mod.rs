#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use jobboard_backend::{
    database::memory::MemoryStore, routes, utils::token::TokenIssuer, AppState,
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;
use uuid::Uuid;

pub const SECRET: &str = "test_secret_key";

pub fn issuer() -> TokenIssuer {
    TokenIssuer::new(SECRET, chrono::Duration::hours(1))
}

pub fn app() -> Router {
    let state = AppState::new(Arc::new(MemoryStore::new()), issuer());
    routes::router(state)
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<JsonValue>,
) -> (StatusCode, JsonValue) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    let req = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let body = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null)
    };
    (status, body)
}

/// A registered and logged-in user.
pub struct Session {
    pub id: String,
    pub token: String,
}

impl Session {
    pub fn uuid(&self) -> Uuid {
        Uuid::parse_str(&self.id).unwrap()
    }
}

pub async fn register(app: &Router, name: &str, email: &str) -> Session {
    let (status, body) = send(
        app,
        "POST",
        "/users",
        None,
        Some(json!({ "name": name, "email": email, "password": "hunter2hunter2" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "register {}: {}", email, body);

    let (status, body) = send(
        app,
        "POST",
        "/users/login",
        None,
        Some(json!({ "email": email, "password": "hunter2hunter2" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login {}: {}", email, body);

    Session {
        id: body["user"]["id"].as_str().unwrap().to_string(),
        token: body["token"].as_str().unwrap().to_string(),
    }
}

pub async fn create_company(app: &Router, owner: &Session, name: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/companies",
        Some(&owner.token),
        Some(json!({ "name": name, "location": "Berlin" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create company: {}", body);
    body["id"].as_str().unwrap().to_string()
}

pub async fn create_vacancy(app: &Router, owner: &Session, company_id: &str, title: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/vacancies",
        Some(&owner.token),
        Some(json!({
            "title": title,
            "description": "Build and run backend services",
            "location": "Remote",
            "salaryFrom": 50000,
            "salaryTo": 70000,
            "skills": ["Rust", "SQL"],
            "remote": true,
            "companyId": company_id,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create vacancy: {}", body);
    body["id"].as_str().unwrap().to_string()
}
