/// Property-based tests using proptest
/// Tests invariants that should hold for every profile/signal combination:
/// bounds, per-category caps, determinism, and monotonicity.
use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;

use fitlead_api::models::{ActivityLevel, BusinessType, EngagementSignals, LeadProfile};
use fitlead_api::scoring::{
    self, DEMOGRAPHICS_CAP, ENGAGEMENT_CAP, FITNESS_INTEREST_CAP, MARKET_FACTORS_CAP,
    PURCHASE_INTENT_CAP, URGENCY_CAP,
};

fn eval_at(month: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, month, 15, 12, 0, 0).unwrap()
}

fn activity_level() -> impl Strategy<Value = ActivityLevel> {
    prop::sample::select(vec![
        ActivityLevel::Sedentary,
        ActivityLevel::LightlyActive,
        ActivityLevel::ModeratelyActive,
        ActivityLevel::VeryActive,
        ActivityLevel::ExtremelyActive,
    ])
}

fn business_type() -> impl Strategy<Value = BusinessType> {
    prop::sample::select(vec![
        BusinessType::PersonalTrainer,
        BusinessType::Gym,
        BusinessType::Physiotherapy,
        BusinessType::YogaStudio,
        BusinessType::Nutrition,
    ])
}

/// Arbitrary profiles, including hostile free text in every string field.
fn profile_strategy() -> impl Strategy<Value = LeadProfile> {
    (
        (
            prop::option::of(0u8..=150),
            prop::option::of("\\PC{0,10}"),
            prop::option::of("\\PC{0,20}"),
            prop::option::of(activity_level()),
            prop::collection::vec("\\PC{0,15}", 0..5),
        ),
        (
            prop::option::of(any::<bool>()),
            prop::option::of("\\PC{0,20}"),
            prop::option::of("\\PC{0,20}"),
            prop::option::of(business_type()),
            prop::option::of(0i64..=90),
        ),
    )
        .prop_map(
            |(
                (age, postcode, location, current_activity_level, fitness_goals),
                (previous_gym_experience, budget_range, lead_source, business_type, days_old),
            )| LeadProfile {
                age,
                postcode,
                location,
                current_activity_level,
                fitness_goals,
                previous_gym_experience,
                budget_range,
                lead_source,
                business_type,
                created_at: days_old.map(|days| eval_at(6) - chrono::Duration::days(days)),
                ..LeadProfile::default()
            },
        )
}

fn signals_strategy() -> impl Strategy<Value = EngagementSignals> {
    (
        prop::option::of(0u32..=100),
        prop::option::of(0u32..=100),
        prop::option::of(0u32..=200),
        prop::option::of(0.0f64..=1000.0),
        prop::option::of(0u32..=50),
        prop::option::of(0u32..=10),
        prop::collection::vec("\\PC{0,12}", 0..4),
    )
        .prop_map(
            |(
                email_opens,
                email_clicks,
                website_visits,
                time_on_site_minutes,
                pricing_page_views,
                demo_requests,
                urgency_keywords,
            )| EngagementSignals {
                email_opens,
                email_clicks,
                website_visits,
                time_on_site_minutes,
                pricing_page_views,
                demo_requests,
                urgency_keywords,
            },
        )
}

// Property: scoring never panics and the total stays in [0, 100]
proptest! {
    #[test]
    fn score_total_always_bounded(
        profile in profile_strategy(),
        signals in signals_strategy(),
        month in 1u32..=12,
    ) {
        let result = scoring::score(&profile, Some(&signals), eval_at(month));
        prop_assert!(result.total_score <= 100);
    }

    #[test]
    fn breakdown_components_respect_their_caps(
        profile in profile_strategy(),
        signals in signals_strategy(),
        month in 1u32..=12,
    ) {
        let b = scoring::score(&profile, Some(&signals), eval_at(month)).breakdown;
        prop_assert!(b.demographics >= 0.0 && b.demographics <= DEMOGRAPHICS_CAP);
        prop_assert!(b.fitness_interest >= 0.0 && b.fitness_interest <= FITNESS_INTEREST_CAP);
        prop_assert!(b.engagement >= 0.0 && b.engagement <= ENGAGEMENT_CAP);
        prop_assert!(b.purchase_intent >= 0.0 && b.purchase_intent <= PURCHASE_INTENT_CAP);
        prop_assert!(b.urgency >= 0.0 && b.urgency <= URGENCY_CAP);
        prop_assert!(b.market_factors >= 0.0 && b.market_factors <= MARKET_FACTORS_CAP);
    }

    #[test]
    fn total_is_the_clamped_component_sum(
        profile in profile_strategy(),
        signals in signals_strategy(),
        month in 1u32..=12,
    ) {
        let result = scoring::score(&profile, Some(&signals), eval_at(month));
        let expected = result.breakdown.sum().min(100.0).round();
        prop_assert_eq!(f64::from(result.total_score), expected);
    }
}

// Property: identical inputs (including evaluation time) give identical output
proptest! {
    #[test]
    fn scoring_is_deterministic(
        profile in profile_strategy(),
        signals in signals_strategy(),
        month in 1u32..=12,
    ) {
        let first = scoring::score(&profile, Some(&signals), eval_at(month));
        let second = scoring::score(&profile, Some(&signals), eval_at(month));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn verdict_always_leads_the_lists(
        profile in profile_strategy(),
        signals in signals_strategy(),
        month in 1u32..=12,
    ) {
        let result = scoring::score(&profile, Some(&signals), eval_at(month));
        prop_assert_eq!(result.insights[0].as_str(), result.tier.insight());
        prop_assert_eq!(result.recommendations[0].as_str(), result.tier.recommendation());
    }
}

// Property: capped step functions never decrease as activity grows
proptest! {
    #[test]
    fn more_email_opens_never_lower_engagement(
        profile in profile_strategy(),
        signals in signals_strategy(),
        opens in 0u32..=100,
    ) {
        let eval = eval_at(6);
        let before = EngagementSignals { email_opens: Some(opens), ..signals.clone() };
        let after = EngagementSignals { email_opens: Some(opens + 1), ..signals };

        let low = scoring::score(&profile, Some(&before), eval).breakdown.engagement;
        let high = scoring::score(&profile, Some(&after), eval).breakdown.engagement;
        prop_assert!(high >= low);
    }

    #[test]
    fn more_pricing_views_never_lower_purchase_intent(
        profile in profile_strategy(),
        signals in signals_strategy(),
        views in 0u32..=50,
    ) {
        let eval = eval_at(6);
        let before = EngagementSignals { pricing_page_views: Some(views), ..signals.clone() };
        let after = EngagementSignals { pricing_page_views: Some(views + 1), ..signals };

        let low = scoring::score(&profile, Some(&before), eval).breakdown.purchase_intent;
        let high = scoring::score(&profile, Some(&after), eval).breakdown.purchase_intent;
        prop_assert!(high >= low);
    }
}

// Property: absent signals behave exactly like zeroed contributions
proptest! {
    #[test]
    fn missing_signals_never_beat_present_ones(
        profile in profile_strategy(),
        month in 1u32..=12,
    ) {
        let eval = eval_at(month);
        let without = scoring::score(&profile, None, eval);
        let zeroed = scoring::score(&profile, Some(&EngagementSignals::default()), eval);
        prop_assert_eq!(without.total_score, zeroed.total_score);
    }
}
