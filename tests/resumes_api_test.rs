mod common;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use common::{app, register, send};

#[tokio::test]
async fn resume_lifecycle() {
    let app = app();
    let bob = register(&app, "Bob", "bob@example.com").await;

    let (status, resume) = send(
        &app,
        "POST",
        "/resumes",
        Some(&bob.token),
        Some(json!({ "title": "Backend developer", "skills": ["Rust", "Postgres"] })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(resume["userId"], bob.id.as_str());
    let uri = format!("/resumes/{}", resume["id"].as_str().unwrap());

    let (status, updated) = send(
        &app,
        "PUT",
        &uri,
        Some(&bob.token),
        Some(json!({ "description": "Ten years of services" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Backend developer");
    assert_eq!(updated["description"], "Ten years of services");

    let (_, list) = send(&app, "GET", "/resumes", None, None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (_, profile) = send(&app, "GET", "/users/me", Some(&bob.token), None).await;
    assert_eq!(profile["resumes"].as_array().unwrap().len(), 1);

    let (status, _) = send(&app, "DELETE", &uri, Some(&bob.token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Resume not found");
}

#[tokio::test]
async fn resumes_belong_to_their_author() {
    let app = app();
    let bob = register(&app, "Bob", "bob@example.com").await;
    let eve = register(&app, "Eve", "eve@example.com").await;

    let (_, resume) = send(
        &app,
        "POST",
        "/resumes",
        Some(&bob.token),
        Some(json!({ "title": "Backend developer" })),
    )
    .await;
    let uri = format!("/resumes/{}", resume["id"].as_str().unwrap());

    let (status, _) = send(&app, "PUT", &uri, Some(&eve.token), Some(json!({ "title": "Mine now" }))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = send(&app, "DELETE", &uri, Some(&eve.token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/resumes/{}", Uuid::new_v4()),
        Some(&bob.token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, current) = send(&app, "GET", &uri, None, None).await;
    assert_eq!(current["title"], "Backend developer");
}
