mod common;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use common::{app, create_company, create_vacancy, issuer, register, send};
use jobboard_backend::models::user::Role;

#[tokio::test]
async fn creating_a_company_promotes_the_owner() {
    let app = app();
    let alice = register(&app, "Alice", "alice@example.com").await;

    let (status, body) = send(
        &app,
        "POST",
        "/companies",
        Some(&alice.token),
        Some(json!({ "name": "Acme", "description": "Anvils", "employerId": alice.id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Acme");
    assert_eq!(body["employerId"], alice.id.as_str());
    let company_id = body["id"].as_str().unwrap().to_string();

    let (_, user) = send(&app, "GET", &format!("/users/{}", alice.id), None, None).await;
    assert_eq!(user["role"], "EMPLOYER");

    let (status, detail) = send(&app, "GET", &format!("/companies/{}", company_id), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["employer"]["id"], alice.id.as_str());
    assert_eq!(detail["vacancies"], json!([]));
}

#[tokio::test]
async fn unknown_employer_is_a_reference_error() {
    let app = app();
    let ghost = issuer()
        .issue(Uuid::new_v4(), "ghost@example.com", Role::JobSeeker)
        .unwrap();

    let (status, body) = send(
        &app,
        "POST",
        "/companies",
        Some(&ghost),
        Some(json!({ "name": "Phantom Ltd" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Employer not found");

    let (_, companies) = send(&app, "GET", "/companies", None, None).await;
    assert_eq!(companies, json!([]));
}

#[tokio::test]
async fn companies_cannot_be_created_for_someone_else() {
    let app = app();
    let alice = register(&app, "Alice", "alice@example.com").await;
    let bob = register(&app, "Bob", "bob@example.com").await;

    let (status, _) = send(
        &app,
        "POST",
        "/companies",
        Some(&bob.token),
        Some(json!({ "name": "Acme", "employerId": alice.id })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, user) = send(&app, "GET", &format!("/users/{}", alice.id), None, None).await;
    assert_eq!(user["role"], "JOB_SEEKER");
}

#[tokio::test]
async fn only_the_owner_updates_and_transfers() {
    let app = app();
    let alice = register(&app, "Alice", "alice@example.com").await;
    let bob = register(&app, "Bob", "bob@example.com").await;
    let company_id = create_company(&app, &alice, "Acme").await;

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/companies/{}", company_id),
        Some(&bob.token),
        Some(json!({ "name": "Bob's now" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/companies/{}", company_id),
        Some(&alice.token),
        Some(json!({ "location": "Hamburg" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Acme");
    assert_eq!(body["location"], "Hamburg");

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/companies/{}", company_id),
        Some(&alice.token),
        Some(json!({ "employerId": bob.id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["employerId"], bob.id.as_str());

    let (_, user) = send(&app, "GET", &format!("/users/{}", bob.id), None, None).await;
    assert_eq!(user["role"], "EMPLOYER");

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/companies/{}", company_id),
        Some(&bob.token),
        Some(json!({ "employerId": Uuid::new_v4() })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Employer not found");
}

#[tokio::test]
async fn deleting_a_company_removes_its_vacancies() {
    let app = app();
    let alice = register(&app, "Alice", "alice@example.com").await;
    let company_id = create_company(&app, &alice, "Acme").await;
    let vacancy_id = create_vacancy(&app, &alice, &company_id, "Backend Engineer").await;

    let (status, body) = send(
        &app,
        "DELETE",
        &format!("/companies/{}", company_id),
        Some(&alice.token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());

    let (status, _) = send(&app, "GET", &format!("/companies/{}", company_id), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "GET", &format!("/vacancies/{}", vacancy_id), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn mutations_require_a_token() {
    let app = app();
    let (status, _) = send(&app, "POST", "/companies", None, Some(json!({ "name": "Acme" }))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/companies/{}", Uuid::new_v4()),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn malformed_requests_get_json_errors() {
    let app = app();
    let alice = register(&app, "Alice", "alice@example.com").await;

    let (status, body) = send(&app, "POST", "/companies", Some(&alice.token), Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send(
        &app,
        "POST",
        "/companies",
        Some(&alice.token),
        Some(json!({ "name": 42 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send(&app, "GET", "/companies/not-a-uuid", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send(
        &app,
        "PUT",
        "/companies/not-a-uuid",
        Some(&alice.token),
        Some(json!({ "name": "Acme" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}
