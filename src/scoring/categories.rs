/// Category sub-scorers.
///
/// Each function computes one capped component of the breakdown together
/// with its insight and recommendation strings. Caps are applied here, per
/// category, so the aggregate in [`super::score`] never has to clamp a
/// component after the fact.
use chrono::{DateTime, Datelike, Utc};

use crate::models::{ActivityLevel, BusinessType, EngagementSignals, LeadProfile};
use crate::scoring::classify::{recognized_urgency_count, BudgetTier, GoalFocus, SourceQuality};
use crate::scoring::{
    DEMOGRAPHICS_CAP, ENGAGEMENT_CAP, FITNESS_INTEREST_CAP, MARKET_FACTORS_CAP,
    PURCHASE_INTENT_CAP, URGENCY_CAP,
};

/// Australian postcodes with high disposable-income profiles (inner Sydney,
/// Melbourne, Brisbane, Perth and Adelaide premium areas).
const HIGH_VALUE_POSTCODES: &[&str] = &[
    // Sydney premium areas
    "2000", "2007", "2008", "2010", "2011", "2021", "2023", "2024", "2025", "2027", "2028",
    "2029", "2030", "2031", "2061", "2062", "2063", "2064", "2065", "2066", "2067", "2068",
    "2069", "2070", "2071", "2072", "2073", "2074", "2075", "2076", "2077", "2078", "2079",
    "2080", "2081", "2082", "2083", "2084", "2085", "2086", "2087", "2088", "2089", "2090",
    "2091", "2092", "2093", "2094", "2095", "2096", "2097", "2099",
    // Melbourne premium areas
    "3000", "3001", "3002", "3003", "3004", "3005", "3006", "3008", "3121", "3122", "3123",
    "3124", "3125", "3126", "3127", "3128", "3129", "3141", "3142", "3143", "3144", "3161",
    "3162", "3163", "3181", "3182", "3183", "3184", "3185", "3186", "3187", "3188", "3189",
    // Brisbane premium areas
    "4000", "4001", "4005", "4006", "4007", "4059", "4064", "4065", "4066", "4067", "4068",
    "4069", "4070",
    // Perth premium areas
    "6000", "6001", "6004", "6005", "6006", "6007", "6008", "6009", "6010", "6011", "6012",
    "6014", "6015",
    // Adelaide premium areas
    "5000", "5001", "5006", "5007", "5008", "5034", "5035", "5037", "5061", "5062", "5063",
    "5064", "5065",
];

/// Outer suburban postcodes with good fitness potential.
const MEDIUM_VALUE_POSTCODES: &[&str] = &[
    "2100", "2101", "2102", "2103", "2104", "2105", "2106", "2107", "2108", "2109", "2110",
    "2111", "2112", "2113", "2114", "2115", "2116", "2117", "2118", "2119", "2120", "2121",
    "2122", "2130", "2131", "2132",
];

/// One category's capped contribution plus its narrative output.
pub(super) struct CategoryScore {
    pub points: f64,
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
}

impl CategoryScore {
    fn new() -> Self {
        Self {
            points: 0.0,
            insights: Vec::new(),
            recommendations: Vec::new(),
        }
    }

    fn add(&mut self, points: f64) {
        self.points += points;
    }

    fn insight(&mut self, message: impl Into<String>) {
        self.insights.push(message.into());
    }

    fn recommend(&mut self, message: impl Into<String>) {
        self.recommendations.push(message.into());
    }

    fn capped(mut self, cap: f64) -> Self {
        self.points = self.points.min(cap);
        self
    }
}

/// Demographics: age band plus postcode intelligence (cap 25).
pub(super) fn demographics(profile: &LeadProfile) -> CategoryScore {
    let mut category = CategoryScore::new();

    if let Some(age) = profile.age {
        match age {
            25..=45 => {
                category.add(15.0);
                category.insight("Prime fitness age bracket for long-term commitment");
            }
            18..=24 => {
                category.add(12.0);
                category.insight("Young adult - suits strength and muscle building programs");
            }
            46..=60 => {
                category.add(12.0);
                category.insight("Mature adult - suits wellness and mobility programs");
            }
            61..=75 => {
                category.add(8.0);
                category.insight("Senior prospect - focus on health maintenance and mobility");
                category.recommend("Recommend low-impact programs and a health screening");
            }
            _ => category.add(5.0),
        }
    }

    if let Some(postcode) = profile.postcode.as_deref() {
        let postcode = postcode.trim();
        if HIGH_VALUE_POSTCODES.contains(&postcode) {
            category.add(10.0);
            category.insight("Premium postcode - high disposable income area");
            category.recommend("Present premium packages and personal training options");
        } else if MEDIUM_VALUE_POSTCODES.contains(&postcode) {
            category.add(7.0);
            category.insight("Good suburban postcode - family-oriented fitness potential");
            category.recommend("Lead with family packages and flexible scheduling");
        } else {
            category.add(4.0);
            category.insight("Standard postcode - price-sensitive approach recommended");
            category.recommend("Emphasize value and community aspects");
        }
    } else if profile.location.is_some() {
        // Free-text location without a postcode still signals local intent.
        category.add(5.0);
        category.insight("Location provided - local intent");
    }

    category.capped(DEMOGRAPHICS_CAP)
}

/// Fitness interest: activity level, gym history, stated goals (cap 30).
///
/// The table is deliberately inverted on activity level: sedentary
/// prospects carry the biggest transformation narrative and convert best.
pub(super) fn fitness_interest(profile: &LeadProfile) -> CategoryScore {
    let mut category = CategoryScore::new();

    if let Some(level) = profile.current_activity_level {
        match level {
            ActivityLevel::Sedentary => {
                category.add(15.0);
                category.insight("Sedentary lifestyle - major transformation potential");
                category.recommend("Start with beginner-friendly programs and habit building");
            }
            ActivityLevel::LightlyActive => {
                category.add(12.0);
                category.insight("Lightly active - ready to level up");
                category.recommend("Progressive training programs with clear milestones");
            }
            ActivityLevel::ModeratelyActive => {
                category.add(10.0);
                category.insight("Moderately active - seeking structured improvement");
                category.recommend("Intermediate programs with a specific goal focus");
            }
            ActivityLevel::VeryActive => {
                category.add(8.0);
                category.insight("Very active - wants optimization and performance");
                category.recommend("Advanced training and performance tracking");
            }
            ActivityLevel::ExtremelyActive => {
                category.add(6.0);
                category.insight("Extremely active - potential training partner or ambassador");
                category.recommend("Elite programs, consider ambassador potential");
            }
        }
    }

    // Novelty is weighted as opportunity: first-timers outscore returners.
    match profile.previous_gym_experience {
        Some(false) => {
            category.add(12.0);
            category.insight("New to the gym - strong growth potential");
            category.recommend("Emphasize beginner support and a non-intimidating environment");
        }
        Some(true) => {
            category.add(8.0);
            category.insight("Has gym experience - understands the value of fitness");
            category.recommend("Highlight unique differentiators and community aspects");
        }
        None => {}
    }

    if !profile.fitness_goals.is_empty() {
        category.add((profile.fitness_goals.len() as f64 * 3.0).min(10.0));
        let focus = GoalFocus::classify(&profile.fitness_goals);
        category.insight(focus.insight());
        category.recommend(focus.recommendation());
    }

    category.capped(FITNESS_INTEREST_CAP)
}

/// Engagement: form completion base plus email and website behavior (cap 25).
pub(super) fn engagement(signals: Option<&EngagementSignals>) -> CategoryScore {
    let mut category = CategoryScore::new();

    // Completing the intake form is itself a behavioral signal.
    category.add(10.0);

    let Some(signals) = signals else {
        return category.capped(ENGAGEMENT_CAP);
    };

    if signals.email_opens.is_some() || signals.email_clicks.is_some() {
        let opens = f64::from(signals.email_opens.unwrap_or(0));
        let clicks = f64::from(signals.email_clicks.unwrap_or(0));
        let email_points = (opens * 2.0 + clicks * 3.0).min(10.0);
        category.add(email_points);

        if email_points >= 8.0 {
            category.insight("Highly engaged with email content");
        } else if email_points >= 5.0 {
            category.insight("Moderate email engagement");
            category.recommend("Try more personalized email content");
        } else {
            category.insight("Low email engagement");
            category.recommend("Switch to phone or social media outreach");
        }
    }

    if signals.website_visits.is_some() || signals.time_on_site_minutes.is_some() {
        let visits = f64::from(signals.website_visits.unwrap_or(0));
        let minutes = signals.time_on_site_minutes.unwrap_or(0.0);
        category.add((visits * 2.0 + (minutes / 60.0) * 3.0).min(15.0));

        if minutes > 5.0 {
            category.insight("Deep website exploration - serious interest");
        } else if minutes > 2.0 {
            category.insight("Good website engagement");
        } else {
            category.insight("Quick website visits only");
            category.recommend("Improve landing page relevance and load speed");
        }
    }

    category.capped(ENGAGEMENT_CAP)
}

/// Purchase intent: pricing research, demo requests, budget (cap 20).
pub(super) fn purchase_intent(
    profile: &LeadProfile,
    signals: Option<&EngagementSignals>,
) -> CategoryScore {
    let mut category = CategoryScore::new();

    if let Some(signals) = signals {
        let pricing_views = signals.pricing_page_views.unwrap_or(0);
        if pricing_views > 0 {
            category.add((f64::from(pricing_views) * 3.0).min(8.0));
            category.insight("Actively researching pricing - high purchase intent");
            category.recommend("Follow up with a pricing discussion within 24 hours");
        }

        if signals.demo_requests.unwrap_or(0) > 0 {
            category.add(8.0);
            category.insight("Requested a demo - ready to experience the service");
            category.recommend("Schedule the demo immediately and prepare a conversion close");
        }
    }

    if let Some(budget) = profile.budget_range.as_deref() {
        let tier = BudgetTier::classify(budget);
        category.add(tier.points());
        category.insight(tier.insight());
        category.recommend(tier.recommendation());
    }

    category.capped(PURCHASE_INTENT_CAP)
}

/// Urgency: expressed urgency keywords and lead freshness (cap 15).
pub(super) fn urgency(
    profile: &LeadProfile,
    signals: Option<&EngagementSignals>,
    evaluation_time: DateTime<Utc>,
) -> CategoryScore {
    let mut category = CategoryScore::new();

    if let Some(signals) = signals {
        let keyword_count = recognized_urgency_count(&signals.urgency_keywords);
        if keyword_count > 0 {
            category.add((keyword_count as f64 * 3.0).min(10.0));
            category.insight("Expressed urgency - wants to start soon");
            category.recommend("Prioritize immediate contact and fast onboarding");
        }
    }

    if let Some(created_at) = profile.created_at {
        let days_old = (evaluation_time - created_at).num_seconds() as f64 / 86_400.0;
        if days_old <= 1.0 {
            category.add(5.0);
            category.insight("Fresh lead - strike while the iron is hot");
            category.recommend("Contact within 2 hours for maximum conversion");
        } else if days_old <= 7.0 {
            category.add(3.0);
            category.insight("Recent lead - still warm");
        }
    }

    category.capped(URGENCY_CAP)
}

/// Market factors: Australian seasonal calendar, source quality, and
/// business-type alignment (cap 15).
pub(super) fn market_factors(
    profile: &LeadProfile,
    evaluation_time: DateTime<Utc>,
) -> CategoryScore {
    let mut category = CategoryScore::new();

    match evaluation_time.month() {
        // New Year resolution period.
        1 | 2 => {
            category.add(5.0);
            category.insight("New Year motivation - resolution season");
            category.recommend("Lead with fresh-start transformation packages");
        }
        // Summer-body preparation, southern hemisphere.
        10..=12 => {
            category.add(4.0);
            category.insight("Summer body preparation season");
            category.recommend("Focus on transformation and beach-ready programs");
        }
        // Post-holiday reset.
        3 => {
            category.add(3.0);
            category.insight("Post-holiday health focus");
            category.recommend("Emphasize getting back on track");
        }
        _ => {}
    }

    if let Some(source) = profile.lead_source.as_deref() {
        let quality = SourceQuality::classify(source);
        category.add(quality.points());
        category.insight(quality.insight());
    }

    if let Some(business_type) = profile.business_type {
        let (points, insight, recommendation) = business_alignment(business_type, profile);
        category.add(points);
        category.insight(insight);
        category.recommend(recommendation);
    }

    category.capped(MARKET_FACTORS_CAP)
}

/// Ideal-client alignment between the lead and the stated business type.
fn business_alignment(
    business_type: BusinessType,
    profile: &LeadProfile,
) -> (f64, &'static str, &'static str) {
    let goal_contains = |needle: &str| {
        profile
            .fitness_goals
            .iter()
            .any(|goal| goal.to_lowercase().contains(needle))
    };

    match business_type {
        BusinessType::PersonalTrainer
            if goal_contains("weight_loss") || goal_contains("muscle_gain") =>
        {
            (
                4.0,
                "Strong personal training fit - specific transformation goals",
                "Emphasize one-on-one attention and customized programming",
            )
        }
        BusinessType::Gym
            if matches!(
                profile.current_activity_level,
                Some(ActivityLevel::Sedentary) | Some(ActivityLevel::LightlyActive)
            ) =>
        {
            (
                4.0,
                "Strong gym fit - needs a structured environment",
                "Highlight beginner programs and a supportive community",
            )
        }
        BusinessType::YogaStudio if goal_contains("flexibility") || goal_contains("stress") => (
            4.0,
            "Strong yoga fit - seeking mindfulness and flexibility",
            "Focus on wellness benefits and studio atmosphere",
        ),
        _ => (
            2.0,
            "General fitness alignment",
            "Standard approach playing to business strengths",
        ),
    }
}
