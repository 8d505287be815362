/// Lead scoring engine.
///
/// Maps a prospect profile (plus optional behavioral signals) to a 0-100
/// priority score, a per-category breakdown, and ordered insight and
/// recommendation lists. The computation is pure: identical inputs,
/// including `evaluation_time`, always produce identical output. The clock
/// is an explicit parameter so the recency and seasonal sub-scores stay
/// reproducible under test; only [`score_now`] reaches for the wall clock.
///
/// Category contributions are capped independently *before* summation so
/// the breakdown stays meaningful on its own, then the total is clamped to
/// 100.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{EngagementSignals, LeadProfile};

pub mod classify;
pub mod tier;

mod categories;

pub use tier::LeadTier;

/// Maximum demographics contribution.
pub const DEMOGRAPHICS_CAP: f64 = 25.0;
/// Maximum fitness-interest contribution.
pub const FITNESS_INTEREST_CAP: f64 = 30.0;
/// Maximum engagement contribution.
pub const ENGAGEMENT_CAP: f64 = 25.0;
/// Maximum purchase-intent contribution.
pub const PURCHASE_INTENT_CAP: f64 = 20.0;
/// Maximum urgency contribution.
pub const URGENCY_CAP: f64 = 15.0;
/// Maximum market-factors contribution.
pub const MARKET_FACTORS_CAP: f64 = 15.0;

/// Per-category score components. Each lies in `[0, cap]` for its category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub demographics: f64,
    pub fitness_interest: f64,
    pub engagement: f64,
    pub purchase_intent: f64,
    pub urgency: f64,
    pub market_factors: f64,
}

impl ScoreBreakdown {
    /// Sum of all six components, before the 100-point clamp.
    pub fn sum(&self) -> f64 {
        self.demographics
            + self.fitness_interest
            + self.engagement
            + self.purchase_intent
            + self.urgency
            + self.market_factors
    }
}

/// Result of one scoring invocation.
///
/// `insights[0]` and `recommendations[0]` always carry the overall tier
/// verdict; category-level entries follow in category order (demographics
/// through market factors). Serializes camelCase for direct inclusion in
/// API response bodies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringResult {
    /// Total priority score in `[0, 100]`.
    pub total_score: u8,
    /// Tier classification of `total_score`.
    pub tier: LeadTier,
    pub breakdown: ScoreBreakdown,
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Score a prospect at an explicit evaluation time.
///
/// Total over its documented domain: absent optional fields contribute
/// zero, never an error. Input-shape validation (age range, contact
/// formats) is the caller's job; see [`crate::validation`].
pub fn score(
    profile: &LeadProfile,
    signals: Option<&EngagementSignals>,
    evaluation_time: DateTime<Utc>,
) -> ScoringResult {
    let demographics = categories::demographics(profile);
    let fitness_interest = categories::fitness_interest(profile);
    let engagement = categories::engagement(signals);
    let purchase_intent = categories::purchase_intent(profile, signals);
    let urgency = categories::urgency(profile, signals, evaluation_time);
    let market_factors = categories::market_factors(profile, evaluation_time);

    let breakdown = ScoreBreakdown {
        demographics: demographics.points,
        fitness_interest: fitness_interest.points,
        engagement: engagement.points,
        purchase_intent: purchase_intent.points,
        urgency: urgency.points,
        market_factors: market_factors.points,
    };

    let total_score = breakdown.sum().min(100.0).round() as u8;
    let tier = LeadTier::from_score(total_score);

    // Tier verdict first, then category entries in category order.
    let mut insights = vec![tier.insight().to_string()];
    let mut recommendations = vec![tier.recommendation().to_string()];
    for category in [
        demographics,
        fitness_interest,
        engagement,
        purchase_intent,
        urgency,
        market_factors,
    ] {
        insights.extend(category.insights);
        recommendations.extend(category.recommendations);
    }

    ScoringResult {
        total_score,
        tier,
        breakdown,
        insights,
        recommendations,
    }
}

/// Score a prospect against the current wall clock.
///
/// The only place the clock is read implicitly; everything below takes
/// `evaluation_time` as data.
pub fn score_now(profile: &LeadProfile, signals: Option<&EngagementSignals>) -> ScoringResult {
    score(profile, signals, Utc::now())
}
