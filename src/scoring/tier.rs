/// Score tier classification.
///
/// One authoritative table mapping a total score to its tier, display
/// label, icon glyph, and overall insight/recommendation strings. Both the
/// scorer and the display/stats layers consume this table; the thresholds
/// exist nowhere else.
use serde::{Deserialize, Serialize};

/// Priority tier for a 0-100 lead score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LeadTier {
    Hot,
    Qualified,
    Warm,
    Developing,
    Cold,
}

impl LeadTier {
    /// Classify a total score. Thresholds: 85 / 70 / 50 / 30.
    pub fn from_score(score: u8) -> Self {
        if score >= 85 {
            LeadTier::Hot
        } else if score >= 70 {
            LeadTier::Qualified
        } else if score >= 50 {
            LeadTier::Warm
        } else if score >= 30 {
            LeadTier::Developing
        } else {
            LeadTier::Cold
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LeadTier::Hot => "HOT",
            LeadTier::Qualified => "QUALIFIED",
            LeadTier::Warm => "WARM",
            LeadTier::Developing => "DEVELOPING",
            LeadTier::Cold => "COLD",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            LeadTier::Hot => "🔥",
            LeadTier::Qualified => "🎯",
            LeadTier::Warm => "⚡",
            LeadTier::Developing => "🌱",
            LeadTier::Cold => "❄️",
        }
    }

    /// Overall verdict; always `insights[0]` of a scoring result.
    pub fn insight(self) -> &'static str {
        match self {
            LeadTier::Hot => "HOT LEAD - extremely high conversion potential",
            LeadTier::Qualified => "QUALIFIED LEAD - strong conversion potential",
            LeadTier::Warm => "WARM LEAD - good potential with nurturing",
            LeadTier::Developing => "DEVELOPING LEAD - needs nurturing",
            LeadTier::Cold => "COLD LEAD - low immediate potential",
        }
    }

    /// Overall next action; always `recommendations[0]` of a scoring result.
    pub fn recommendation(self) -> &'static str {
        match self {
            LeadTier::Hot => "Contact within 2 hours and prepare premium packages",
            LeadTier::Qualified => "High priority - contact within 4 hours",
            LeadTier::Warm => "Follow up with educational content, then contact",
            LeadTier::Developing => "Add to nurture campaign and focus on education",
            LeadTier::Cold => "Long-term nurture or disqualify",
        }
    }
}
