use crate::config::Config;
use crate::errors::{AppError, ResultExt};
use crate::models::{
    CreateLeadRequest, Lead, LeadListQuery, LeadStats, RescoreRequest, ScoreRequest,
    UpdateLeadRequest,
};
use crate::scoring::{self, ScoringResult};
use crate::store::LeadStore;
use crate::validation::{is_valid_email, validate_au_phone, validate_profile};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use moka::future::Cache;
use std::sync::Arc;
use uuid::Uuid;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Lead repository.
    pub store: Arc<LeadStore>,
    /// Application configuration.
    pub config: Config,
    /// Aggregate-stats cache so dashboard polling doesn't re-scan the store.
    pub stats_cache: Cache<&'static str, LeadStats>,
}

/// Health check endpoint.
///
/// Returns the service status, version, and health information.
///
/// # Returns
///
/// * `(StatusCode, Json<serde_json::Value>)` - HTTP 200 OK with health status JSON.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "healthy",
            "service": "fitlead-api",
            "version": "0.1.0"
        })),
    )
}

/// POST /api/v1/leads
///
/// Validates the intake payload, normalizes the phone number, computes the
/// initial score, and stores the lead.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `payload` - The intake form payload.
///
/// # Returns
///
/// * `Result<(StatusCode, Json<serde_json::Value>), AppError>` - 201 with the
///   new lead's id, score, and tier, or a 400 on invalid input.
pub async fn create_lead(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateLeadRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    tracing::info!("POST /api/v1/leads - email: {}", payload.email);

    if payload.full_name.trim().is_empty() {
        return Err(AppError::BadRequest("full_name is required".to_string()));
    }
    if !is_valid_email(&payload.email) {
        return Err(AppError::BadRequest(format!(
            "invalid email address: {}",
            payload.email
        )));
    }

    let phone = match payload.phone.as_deref().filter(|p| !p.trim().is_empty()) {
        Some(raw) => {
            let (valid, normalized) = validate_au_phone(raw);
            if !valid {
                return Err(AppError::BadRequest(format!("invalid phone: {}", normalized)));
            }
            Some(normalized)
        }
        None => None,
    };

    validate_profile(&payload.profile).context("invalid lead profile")?;

    let now = Utc::now();
    let mut profile = payload.profile;
    profile.created_at.get_or_insert(now);

    let result = scoring::score(&profile, None, now);

    let lead = Lead {
        id: Uuid::new_v4(),
        full_name: payload.full_name.trim().to_string(),
        email: payload.email,
        phone,
        status: crate::models::LeadStatus::New,
        score: result.total_score,
        profile,
        created_at: now,
        updated_at: now,
    };
    let id = lead.id;
    state.store.insert(lead).await;
    state.stats_cache.invalidate(&"stats").await;

    tracing::info!(
        "Created lead {} with score {} ({} {})",
        id,
        result.total_score,
        result.tier.icon(),
        result.tier.label()
    );

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "Lead created successfully",
            "id": id,
            "score": result.total_score,
            "tier": result.tier.label(),
        })),
    ))
}

/// GET /api/v1/leads
///
/// Lists stored leads newest-first with their scores.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `query` - Optional status / min_score / limit filters.
pub async fn list_leads(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LeadListQuery>,
) -> Result<Json<Vec<Lead>>, AppError> {
    tracing::debug!("GET /api/v1/leads - query: {:?}", query);
    let leads = state.store.list(&query).await;
    Ok(Json(leads))
}

/// GET /api/v1/leads/:id
///
/// Returns one lead together with its full scoring result (breakdown,
/// insights, recommendations), evaluated at request time.
pub async fn get_lead(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    tracing::debug!("GET /api/v1/leads/{}", id);

    let lead = state
        .store
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Lead with id {} not found", id)))?;

    let scoring = scoring::score_now(&lead.scoring_profile(), None);

    Ok(Json(serde_json::json!({
        "lead": lead,
        "scoring": scoring,
    })))
}

/// PATCH /api/v1/leads/:id
///
/// Updates a lead's pipeline status.
pub async fn update_lead(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateLeadRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    tracing::info!("PATCH /api/v1/leads/{} - {:?}", id, payload.status);

    let status = payload
        .status
        .ok_or_else(|| AppError::BadRequest("status is required".to_string()))?;

    let lead = state
        .store
        .update_status(id, status)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Lead with id {} not found", id)))?;
    state.stats_cache.invalidate(&"stats").await;

    Ok(Json(serde_json::json!({
        "message": "Lead updated successfully",
        "id": lead.id,
        "status": lead.status,
    })))
}

/// POST /api/v1/leads/:id/rescore
///
/// Re-scores a stored lead with freshly supplied engagement signals and
/// persists the new score.
pub async fn rescore_lead(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RescoreRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    tracing::info!("POST /api/v1/leads/{}/rescore", id);

    let lead = state
        .store
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Lead with id {} not found", id)))?;

    let scoring = scoring::score_now(&lead.scoring_profile(), Some(&payload.signals));
    let lead = state
        .store
        .update_score(id, scoring.total_score)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Lead with id {} not found", id)))?;
    state.stats_cache.invalidate(&"stats").await;

    tracing::info!(
        "Rescored lead {} -> {} ({})",
        id,
        scoring.total_score,
        scoring.tier.label()
    );

    Ok(Json(serde_json::json!({
        "lead": lead,
        "scoring": scoring,
    })))
}

/// POST /api/v1/score
///
/// Scores an ad-hoc profile without storing anything. An explicit
/// `evaluation_time` pins the recency/seasonal sub-scores for reproducible
/// output; otherwise the server clock is used.
pub async fn score_preview(
    Json(payload): Json<ScoreRequest>,
) -> Result<Json<ScoringResult>, AppError> {
    tracing::debug!("POST /api/v1/score");

    validate_profile(&payload.profile).context("invalid score request")?;

    let evaluation_time = payload.evaluation_time.unwrap_or_else(Utc::now);
    let result = scoring::score(&payload.profile, payload.signals.as_ref(), evaluation_time);

    Ok(Json(result))
}

/// GET /api/v1/leads/stats
///
/// Aggregate statistics over the stored leads, cached for a short TTL since
/// the dashboard polls it.
pub async fn lead_stats(State(state): State<Arc<AppState>>) -> Result<Json<LeadStats>, AppError> {
    if let Some(stats) = state.stats_cache.get(&"stats").await {
        tracing::debug!("GET /api/v1/leads/stats - cache hit");
        return Ok(Json(stats));
    }

    let stats = state.store.stats().await;
    state.stats_cache.insert("stats", stats.clone()).await;
    tracing::debug!(
        "GET /api/v1/leads/stats - computed for {} leads, cached for {}s",
        stats.total,
        state.config.stats_cache_ttl_secs
    );

    Ok(Json(stats))
}

/// The /api/v1 route table, without middleware or state.
///
/// `main` wraps this in the rate-limit and body-limit layers and merges the
/// unprotected health route next to it; router tests mount it directly.
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/v1/leads", post(create_lead).get(list_leads))
        .route("/api/v1/leads/stats", get(lead_stats))
        .route("/api/v1/leads/:id", get(get_lead).patch(update_lead))
        .route("/api/v1/leads/:id/rescore", post(rescore_lead))
        .route("/api/v1/score", post(score_preview))
}
