//! Free-text classification adapters.
//!
//! The intake forms collect budget, lead source, and goals as free text, so
//! classification is case-insensitive substring matching. All of that
//! fragility is quarantined here at the boundary; the sub-scorers only ever
//! see the resulting enums.

/// Budget bucket derived from a free-text range label.
///
/// Match order is most-specific-first: "100-200" must be recognized before
/// the bare "100" check, or "$100-200/week" would land a tier too low.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetTier {
    /// "200+" or unlimited budgets.
    Premium,
    /// Mid-range, around $100-200 per week.
    Standard,
    /// Around $100 per week.
    Moderate,
    /// Anything below, or unparseable.
    Entry,
}

impl BudgetTier {
    /// Classify a free-text budget label such as `"$150-200/week"`.
    pub fn classify(raw: &str) -> Self {
        let budget = raw.to_lowercase();
        if budget.contains("200+") || budget.contains("unlimited") {
            BudgetTier::Premium
        } else if budget.contains("150") || budget.contains("100-200") {
            BudgetTier::Standard
        } else if budget.contains("100") {
            BudgetTier::Moderate
        } else {
            BudgetTier::Entry
        }
    }

    pub fn points(self) -> f64 {
        match self {
            BudgetTier::Premium => 4.0,
            BudgetTier::Standard => 3.0,
            BudgetTier::Moderate => 2.0,
            BudgetTier::Entry => 1.0,
        }
    }

    pub fn insight(self) -> &'static str {
        match self {
            BudgetTier::Premium => "Premium budget - little price sensitivity",
            BudgetTier::Standard => "Solid budget - standard package target",
            BudgetTier::Moderate => "Moderate budget - price conscious",
            BudgetTier::Entry => "Limited budget - needs convincing on value",
        }
    }

    pub fn recommendation(self) -> &'static str {
        match self {
            BudgetTier::Premium => "Present top-tier packages with premium services",
            BudgetTier::Standard => "Focus on value and results with mid-tier packages",
            BudgetTier::Moderate => "Emphasize group classes and flexible payment plans",
            BudgetTier::Entry => "Start with trial offers and payment plans",
        }
    }
}

/// Acquisition-channel quality derived from a free-text lead source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceQuality {
    Referral,
    Organic,
    Social,
    Search,
    Paid,
    Unknown,
}

impl SourceQuality {
    /// Classify a free-text source label such as `"Instagram ad"`.
    pub fn classify(raw: &str) -> Self {
        let source = raw.to_lowercase();
        if source.contains("referral") || source.contains("friend") {
            SourceQuality::Referral
        } else if source.contains("website") || source.contains("organic") {
            SourceQuality::Organic
        } else if source.contains("social")
            || source.contains("facebook")
            || source.contains("instagram")
        {
            SourceQuality::Social
        } else if source.contains("google") || source.contains("search") {
            SourceQuality::Search
        } else if source.contains("ad") || source.contains("paid") {
            SourceQuality::Paid
        } else {
            SourceQuality::Unknown
        }
    }

    pub fn points(self) -> f64 {
        match self {
            SourceQuality::Referral => 5.0,
            SourceQuality::Organic | SourceQuality::Search => 4.0,
            SourceQuality::Social => 3.0,
            SourceQuality::Paid => 2.0,
            SourceQuality::Unknown => 1.0,
        }
    }

    pub fn insight(self) -> &'static str {
        match self {
            SourceQuality::Referral => "Referral lead - highest quality source",
            SourceQuality::Organic => "Organic website traffic - actively searching",
            SourceQuality::Social => "Social media lead - engaged audience",
            SourceQuality::Search => "Search engine lead - high intent",
            SourceQuality::Paid => "Paid advertising lead - needs nurturing",
            SourceQuality::Unknown => "Unknown source - track for attribution",
        }
    }
}

/// Dominant theme of a prospect's stated fitness goals.
///
/// Precedence mirrors commercial value: weight loss, then muscle gain, then
/// health, with lifestyle as the catch-all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalFocus {
    WeightLoss,
    MuscleGain,
    Health,
    Lifestyle,
}

const WEIGHT_LOSS_TERMS: &[&str] = &["weight_loss", "lose_weight", "fat_loss"];
const MUSCLE_GAIN_TERMS: &[&str] = &["muscle_gain", "build_muscle", "strength", "bodybuilding"];
const HEALTH_TERMS: &[&str] = &["health", "wellness", "medical", "rehabilitation"];

impl GoalFocus {
    /// Classify a goal list by case-insensitive substring matching.
    pub fn classify(goals: &[String]) -> Self {
        let matches_any = |terms: &[&str]| {
            goals
                .iter()
                .any(|goal| terms.iter().any(|term| goal.to_lowercase().contains(term)))
        };

        if matches_any(WEIGHT_LOSS_TERMS) {
            GoalFocus::WeightLoss
        } else if matches_any(MUSCLE_GAIN_TERMS) {
            GoalFocus::MuscleGain
        } else if matches_any(HEALTH_TERMS) {
            GoalFocus::Health
        } else {
            GoalFocus::Lifestyle
        }
    }

    pub fn insight(self) -> &'static str {
        match self {
            GoalFocus::WeightLoss => "Weight loss goal - high motivation market",
            GoalFocus::MuscleGain => "Muscle building focus - committed to training",
            GoalFocus::Health => "Health-focused - values professional guidance",
            GoalFocus::Lifestyle => "Lifestyle improvement goals",
        }
    }

    pub fn recommendation(self) -> &'static str {
        match self {
            GoalFocus::WeightLoss => {
                "Emphasize transformation success stories and nutrition support"
            }
            GoalFocus::MuscleGain => "Highlight strength programs and experienced trainers",
            GoalFocus::Health => "Emphasize qualified trainers and health partnerships",
            GoalFocus::Lifestyle => "Focus on community and sustainable habit building",
        }
    }
}

/// Urgency phrases the scorer recognizes in extracted keyword lists.
const URGENCY_TERMS: &[&str] = &[
    "asap",
    "urgent",
    "immediately",
    "right away",
    "now",
    "today",
    "tomorrow",
    "this week",
    "soon",
    "ready to start",
];

/// Count the supplied keywords that match a recognized urgency phrase,
/// case-insensitively. Unrecognized strings are ignored rather than scored.
pub fn recognized_urgency_count(keywords: &[String]) -> usize {
    keywords
        .iter()
        .filter(|keyword| {
            let keyword = keyword.to_lowercase();
            URGENCY_TERMS.iter().any(|term| keyword.contains(term))
        })
        .count()
}
