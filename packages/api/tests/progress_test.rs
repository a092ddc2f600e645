mod common;

use axum::http::{Method, StatusCode};
use common::*;
use serde_json::json;

#[tokio::test]
async fn test_progress_upsert_then_append() {
    let app = test_app();
    let token = register(&app, "rockfan").await;

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/progress/rock-art-timeline",
        Some(&token),
        Some(json!({"level": 3})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "First progress post failed: {}", created);
    assert_eq!(created["level"], 3);
    assert_eq!(created["completedChallenges"], json!([]));

    let (_, first) = send(
        &app,
        Method::POST,
        "/api/progress/rock-art-timeline",
        Some(&token),
        Some(json!({"challengeId": "ice-age", "score": 150})),
    )
    .await;
    let (_, second) = send(
        &app,
        Method::POST,
        "/api/progress/rock-art-timeline",
        Some(&token),
        Some(json!({"challengeId": "bronze-age"})),
    )
    .await;

    assert_eq!(first["completedChallenges"].as_array().unwrap().len(), 1);
    assert_eq!(second["level"], 3, "Level must survive challenge-only updates");
    assert_eq!(second["version"], 3);
    let challenges = second["completedChallenges"].as_array().unwrap();
    assert_eq!(challenges.len(), 2);
    assert_eq!(challenges[0]["id"], "ice-age");
    assert_eq!(challenges[0]["score"], 150);
    assert_eq!(challenges[1]["id"], "bronze-age");

    let (status, stored) = send(
        &app,
        Method::GET,
        "/api/progress/rock-art-timeline",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stored, second);
}

#[tokio::test]
async fn test_progress_is_per_user_and_game() {
    let app = test_app();
    let token = register(&app, "rockfan").await;
    let other = register(&app, "someone-else").await;

    for game in ["symbols-quiz", "petroglyph-memory"] {
        send(
            &app,
            Method::POST,
            &format!("/api/progress/{}", game),
            Some(&token),
            Some(json!({"level": 2})),
        )
        .await;
    }

    let (status, mine) = send(&app, Method::GET, "/api/progress", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mine.as_array().unwrap().len(), 2);

    let (_, theirs) = send(&app, Method::GET, "/api/progress", Some(&other), None).await;
    assert_eq!(theirs, json!([]));

    let (missing, body) = send(
        &app,
        Method::GET,
        "/api/progress/symbols-quiz",
        Some(&other),
        None,
    )
    .await;
    assert_eq!(missing, StatusCode::NOT_FOUND);
    assert_eq!(body["msg"], "Progress not found");
}

#[tokio::test]
async fn test_progress_validation_and_auth() {
    let app = test_app();
    let token = register(&app, "rockfan").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/progress/symbols-quiz",
        Some(&token),
        Some(json!({"level": 0})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "Level must be at least 1");

    let (unauthorized, _) = send(
        &app,
        Method::POST,
        "/api/progress/symbols-quiz",
        None,
        Some(json!({"level": 2})),
    )
    .await;
    assert_eq!(unauthorized, StatusCode::UNAUTHORIZED);
}
