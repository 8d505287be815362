/// Router smoke tests
/// Drives the API end-to-end through `tower::ServiceExt::oneshot` without
/// binding a socket: create/list/get/update round trips, validation
/// rejections, reproducible ad-hoc scoring, and live stats.
use axum::{
    body::Body,
    http::{Request, StatusCode},
    routing::get,
    Router,
};
use moka::future::Cache;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

use fitlead_api::config::Config;
use fitlead_api::handlers::{self, AppState};
use fitlead_api::store::LeadStore;

fn test_state() -> Arc<AppState> {
    Arc::new(AppState {
        store: Arc::new(LeadStore::new()),
        config: Config {
            port: 0,
            stats_cache_ttl_secs: 60,
            seed_demo_data: false,
        },
        stats_cache: Cache::builder()
            .time_to_live(Duration::from_secs(60))
            .max_capacity(16)
            .build(),
    })
}

fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .merge(handlers::api_routes())
        .with_state(state)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn sample_create_payload() -> Value {
    json!({
        "full_name": "Sarah Johnson",
        "email": "sarah@example.com",
        "phone": "0412345678",
        "profile": {
            "age": 32,
            "current_activity_level": "lightly_active",
            "previous_gym_experience": false,
            "fitness_goals": ["weight_loss", "general_fitness"],
            "budget_range": "$100-200/week",
            "lead_source": "website"
        }
    })
}

#[tokio::test]
async fn test_health_ok() {
    let response = app(test_state())
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "fitlead-api");
}

#[tokio::test]
async fn test_create_and_get_roundtrip() {
    let state = test_state();

    let response = app(state.clone())
        .oneshot(post_json("/api/v1/leads", &sample_create_payload()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["id"].as_str().unwrap().to_string();
    assert!(created["score"].as_u64().unwrap() <= 100);
    assert!(created["tier"].is_string());

    // List shows the stored lead with the normalized phone.
    let response = app(state.clone())
        .oneshot(
            Request::builder()
                .uri("/api/v1/leads")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let leads = body_json(response).await;
    assert_eq!(leads.as_array().unwrap().len(), 1);
    assert_eq!(leads[0]["phone"], "+61412345678");
    assert_eq!(leads[0]["status"], "new");

    // Detail includes the full scoring result.
    let response = app(state)
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/leads/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let detail = body_json(response).await;
    assert_eq!(detail["lead"]["id"], id.as_str());
    assert!(detail["scoring"]["totalScore"].is_u64());
    assert!(detail["scoring"]["insights"].as_array().unwrap().len() > 1);
}

#[tokio::test]
async fn test_create_rejects_invalid_input() {
    let state = test_state();

    let mut bad_email = sample_create_payload();
    bad_email["email"] = json!("not-an-email");
    let response = app(state.clone())
        .oneshot(post_json("/api/v1/leads", &bad_email))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let mut blank_name = sample_create_payload();
    blank_name["full_name"] = json!("   ");
    let response = app(state.clone())
        .oneshot(post_json("/api/v1/leads", &blank_name))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let mut bad_phone = sample_create_payload();
    bad_phone["phone"] = json!("12345");
    let response = app(state.clone())
        .oneshot(post_json("/api/v1/leads", &bad_phone))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let mut bad_age = sample_create_payload();
    bad_age["profile"]["age"] = json!(151);
    let response = app(state)
        .oneshot(post_json("/api/v1/leads", &bad_age))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_status() {
    let state = test_state();

    let response = app(state.clone())
        .oneshot(post_json("/api/v1/leads", &sample_create_payload()))
        .await
        .unwrap();
    let id = body_json(response).await["id"].as_str().unwrap().to_string();

    let response = app(state.clone())
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri(format!("/api/v1/leads/{}", id))
                .header("content-type", "application/json")
                .body(Body::from(json!({"status": "contacted"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "contacted");

    // The status filter now matches the updated lead.
    let response = app(state)
        .oneshot(
            Request::builder()
                .uri("/api/v1/leads?status=contacted")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let leads = body_json(response).await;
    assert_eq!(leads.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_unknown_lead_is_404() {
    let response = app(test_state())
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/leads/{}", uuid::Uuid::new_v4()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_score_preview_is_reproducible() {
    // A sedentary newcomer profile pinned to a July evaluation date.
    let payload = json!({
        "profile": {
            "age": 28,
            "current_activity_level": "sedentary",
            "previous_gym_experience": false,
            "fitness_goals": ["weight_loss", "general_fitness"],
            "budget_range": "$100-150/week",
            "lead_source": "Website"
        },
        "evaluation_time": "2025-07-15T12:00:00Z"
    });

    let first = body_json(
        app(test_state())
            .oneshot(post_json("/api/v1/score", &payload))
            .await
            .unwrap(),
    )
    .await;
    let second = body_json(
        app(test_state())
            .oneshot(post_json("/api/v1/score", &payload))
            .await
            .unwrap(),
    )
    .await;

    assert_eq!(first, second);
    assert_eq!(first["totalScore"], 62);
    assert_eq!(first["tier"], "WARM");
    assert_eq!(first["breakdown"]["fitnessInterest"], 30.0);
}

#[tokio::test]
async fn test_rescore_updates_the_stored_score() {
    let state = test_state();

    let response = app(state.clone())
        .oneshot(post_json("/api/v1/leads", &sample_create_payload()))
        .await
        .unwrap();
    let created = body_json(response).await;
    let id = created["id"].as_str().unwrap().to_string();
    let initial_score = created["score"].as_u64().unwrap();

    let response = app(state.clone())
        .oneshot(post_json(
            &format!("/api/v1/leads/{}/rescore", id),
            &json!({
                "signals": {
                    "pricing_page_views": 3,
                    "demo_requests": 1,
                    "email_opens": 4,
                    "email_clicks": 2
                }
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let rescored = body_json(response).await;
    let new_score = rescored["scoring"]["totalScore"].as_u64().unwrap();
    assert_eq!(rescored["lead"]["score"].as_u64().unwrap(), new_score);
    assert!(new_score >= initial_score);
}

#[tokio::test]
async fn test_stats_reflect_the_store() {
    let state = test_state();

    for payload in [
        sample_create_payload(),
        json!({
            "full_name": "Mike Wilson",
            "email": "mike@example.com",
            "profile": {
                "age": 28,
                "current_activity_level": "moderately_active",
                "previous_gym_experience": true,
                "fitness_goals": ["muscle_gain", "strength"],
                "budget_range": "$200+/week",
                "lead_source": "referral"
            }
        }),
    ] {
        let response = app(state.clone())
            .oneshot(post_json("/api/v1/leads", &payload))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app(state)
        .oneshot(
            Request::builder()
                .uri("/api/v1/leads/stats")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let stats = body_json(response).await;

    assert_eq!(stats["total"], 2);
    assert_eq!(stats["by_status"]["new"], 2);
    assert!(stats["average_score"].as_f64().unwrap() > 0.0);
    // Both leads listed weight_loss or muscle_gain among their goals.
    assert_eq!(stats["top_fitness_goals"].as_array().unwrap().len(), 4);
}
