use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============ Domain Models ============

/// Self-reported activity level of a prospect.
///
/// Scoring weights these inversely: the more sedentary the prospect, the
/// larger the transformation potential and therefore the higher the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    VeryActive,
    ExtremelyActive,
}

/// Gender of a prospect.
///
/// Collected on intake forms and carried through the data model, but it is
/// deliberately never used by the scoring engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Type of fitness business the lead was captured for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessType {
    PersonalTrainer,
    Gym,
    Physiotherapy,
    YogaStudio,
    Nutrition,
}

/// Pipeline status of a stored lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    New,
    Contacted,
    Qualified,
    Converted,
    Lost,
}

/// Normalized prospect profile, the primary input to the scoring engine.
///
/// Every field is optional: absence means "contributes zero" to the relevant
/// scoring category, never an error. Free-text fields (`budget_range`,
/// `lead_source`) are classified by the boundary adapters in
/// [`crate::scoring::classify`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeadProfile {
    /// Age in years.
    pub age: Option<u8>,
    /// Australian postcode (4 digits).
    pub postcode: Option<String>,
    /// Free-text suburb/city. Only consulted when no postcode is given.
    pub location: Option<String>,
    // Unused by scoring; kept so the intake contract stays complete.
    pub gender: Option<Gender>,
    pub current_activity_level: Option<ActivityLevel>,
    #[serde(default)]
    pub fitness_goals: Vec<String>,
    /// Three-valued: unknown / true / false are each scored differently.
    pub previous_gym_experience: Option<bool>,
    #[serde(default)]
    pub health_conditions: Vec<String>,
    /// Free-text budget bucket label, e.g. `"$150-200/week"`.
    pub budget_range: Option<String>,
    pub preferred_contact_method: Option<String>,
    #[serde(default)]
    pub preferred_workout_times: Vec<String>,
    /// Free-text acquisition channel, e.g. `"Instagram ad"`, `"Referral"`.
    pub lead_source: Option<String>,
    pub business_type: Option<BusinessType>,
    /// When the lead was captured; drives the recency sub-score.
    pub created_at: Option<DateTime<Utc>>,
}

/// Behavioral engagement signals accumulated after capture.
///
/// Supplied separately from the profile because they arrive from tracking
/// systems rather than the intake form. Absent signals contribute zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngagementSignals {
    pub email_opens: Option<u32>,
    pub email_clicks: Option<u32>,
    pub website_visits: Option<u32>,
    /// Total time on site, in minutes.
    pub time_on_site_minutes: Option<f64>,
    pub pricing_page_views: Option<u32>,
    pub demo_requests: Option<u32>,
    #[serde(default)]
    pub urgency_keywords: Vec<String>,
}

/// A stored lead record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    /// Unique identifier for the lead.
    pub id: Uuid,
    /// Full name of the prospect.
    pub full_name: String,
    /// Contact email (validated at the boundary).
    pub email: String,
    /// Contact phone in E.164, normalized at the boundary.
    pub phone: Option<String>,
    /// Pipeline status.
    pub status: LeadStatus,
    /// Last computed priority score, 0-100.
    pub score: u8,
    /// Prospect attributes used for scoring.
    pub profile: LeadProfile,
    /// Timestamp of creation.
    pub created_at: DateTime<Utc>,
    /// Timestamp of last update.
    pub updated_at: DateTime<Utc>,
}

impl Lead {
    /// Profile as seen by the scorer: the stored record's creation time
    /// backfills `profile.created_at` so the recency sub-score works even
    /// when the intake payload omitted it.
    pub fn scoring_profile(&self) -> LeadProfile {
        let mut profile = self.profile.clone();
        profile.created_at.get_or_insert(self.created_at);
        profile
    }
}

// ============ API Payloads ============

/// POST /api/v1/leads request body.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLeadRequest {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    #[serde(default)]
    pub profile: LeadProfile,
}

/// PATCH /api/v1/leads/:id request body.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateLeadRequest {
    pub status: Option<LeadStatus>,
}

/// POST /api/v1/score request body: score an ad-hoc profile without storing.
///
/// `evaluation_time` pins the clock-dependent sub-scores (recency, seasonal)
/// for reproducible output; when omitted the server clock is used.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoreRequest {
    #[serde(default)]
    pub profile: LeadProfile,
    pub signals: Option<EngagementSignals>,
    pub evaluation_time: Option<DateTime<Utc>>,
}

/// POST /api/v1/leads/:id/rescore request body.
#[derive(Debug, Clone, Deserialize)]
pub struct RescoreRequest {
    #[serde(default)]
    pub signals: EngagementSignals,
}

/// GET /api/v1/leads query parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeadListQuery {
    /// Only return leads with this status.
    pub status: Option<LeadStatus>,
    /// Only return leads scoring at least this value.
    pub min_score: Option<u8>,
    /// Maximum number of leads to return.
    pub limit: Option<usize>,
}

// ============ Stats ============

/// Lead counts per pipeline status.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatusCounts {
    pub new: usize,
    pub contacted: usize,
    pub qualified: usize,
    pub converted: usize,
    pub lost: usize,
}

/// Lead counts per score tier.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TierCounts {
    pub hot: usize,
    pub qualified: usize,
    pub warm: usize,
    pub developing: usize,
    pub cold: usize,
}

/// Lead counts per activity level, plus those who did not answer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ActivityLevelCounts {
    pub sedentary: usize,
    pub lightly_active: usize,
    pub moderately_active: usize,
    pub very_active: usize,
    pub extremely_active: usize,
    pub unknown: usize,
}

/// One entry of the most-common-goals ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalCount {
    pub goal: String,
    pub count: usize,
}

/// Aggregate statistics over the stored leads, computed from live data.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LeadStats {
    pub total: usize,
    pub by_status: StatusCounts,
    /// Mean score across all leads; 0 when the store is empty.
    pub average_score: f64,
    pub tier_counts: TierCounts,
    /// Most common fitness goals, descending by count (top 5).
    pub top_fitness_goals: Vec<GoalCount>,
    pub activity_levels: ActivityLevelCounts,
}
