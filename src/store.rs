/// In-memory lead repository.
///
/// The scoring engine's only collaborator: it supplies lead records and
/// keeps the computed score for sorting and display. Backed by a
/// `tokio::sync::RwLock` so handlers can share it through `AppState`;
/// newest leads sit at the front, matching how the dashboard lists them.
use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{
    ActivityLevel, ActivityLevelCounts, GoalCount, Lead, LeadListQuery, LeadProfile, LeadStats,
    LeadStatus, StatusCounts, TierCounts,
};
use crate::scoring::{self, LeadTier};

#[derive(Default)]
pub struct LeadStore {
    leads: RwLock<Vec<Lead>>,
}

impl LeadStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new lead at the front of the list.
    pub async fn insert(&self, lead: Lead) {
        self.leads.write().await.insert(0, lead);
    }

    pub async fn get(&self, id: Uuid) -> Option<Lead> {
        self.leads.read().await.iter().find(|l| l.id == id).cloned()
    }

    /// List leads newest-first, applying the query's status, minimum-score,
    /// and limit filters.
    pub async fn list(&self, query: &LeadListQuery) -> Vec<Lead> {
        let leads = self.leads.read().await;
        leads
            .iter()
            .filter(|lead| query.status.map_or(true, |status| lead.status == status))
            .filter(|lead| query.min_score.map_or(true, |min| lead.score >= min))
            .take(query.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect()
    }

    /// Update a lead's pipeline status. Returns the updated record, or
    /// `None` when the id is unknown.
    pub async fn update_status(&self, id: Uuid, status: LeadStatus) -> Option<Lead> {
        let mut leads = self.leads.write().await;
        let lead = leads.iter_mut().find(|l| l.id == id)?;
        lead.status = status;
        lead.updated_at = Utc::now();
        Some(lead.clone())
    }

    /// Replace a lead's stored score after a re-scoring pass.
    pub async fn update_score(&self, id: Uuid, score: u8) -> Option<Lead> {
        let mut leads = self.leads.write().await;
        let lead = leads.iter_mut().find(|l| l.id == id)?;
        lead.score = score;
        lead.updated_at = Utc::now();
        Some(lead.clone())
    }

    /// Aggregate statistics over the current store contents.
    ///
    /// Everything is computed from live data; there are no canned numbers.
    pub async fn stats(&self) -> LeadStats {
        let leads = self.leads.read().await;

        let mut by_status = StatusCounts::default();
        let mut tier_counts = TierCounts::default();
        let mut activity_levels = ActivityLevelCounts::default();
        let mut goal_counts: HashMap<String, usize> = HashMap::new();
        let mut score_sum: u64 = 0;

        for lead in leads.iter() {
            match lead.status {
                LeadStatus::New => by_status.new += 1,
                LeadStatus::Contacted => by_status.contacted += 1,
                LeadStatus::Qualified => by_status.qualified += 1,
                LeadStatus::Converted => by_status.converted += 1,
                LeadStatus::Lost => by_status.lost += 1,
            }

            match LeadTier::from_score(lead.score) {
                LeadTier::Hot => tier_counts.hot += 1,
                LeadTier::Qualified => tier_counts.qualified += 1,
                LeadTier::Warm => tier_counts.warm += 1,
                LeadTier::Developing => tier_counts.developing += 1,
                LeadTier::Cold => tier_counts.cold += 1,
            }

            match lead.profile.current_activity_level {
                Some(ActivityLevel::Sedentary) => activity_levels.sedentary += 1,
                Some(ActivityLevel::LightlyActive) => activity_levels.lightly_active += 1,
                Some(ActivityLevel::ModeratelyActive) => activity_levels.moderately_active += 1,
                Some(ActivityLevel::VeryActive) => activity_levels.very_active += 1,
                Some(ActivityLevel::ExtremelyActive) => activity_levels.extremely_active += 1,
                None => activity_levels.unknown += 1,
            }

            for goal in &lead.profile.fitness_goals {
                *goal_counts.entry(goal.clone()).or_default() += 1;
            }

            score_sum += u64::from(lead.score);
        }

        let total = leads.len();
        let average_score = if total > 0 {
            score_sum as f64 / total as f64
        } else {
            0.0
        };

        // Descending by count, then by name so equal counts order stably.
        let mut top_fitness_goals: Vec<GoalCount> = goal_counts
            .into_iter()
            .map(|(goal, count)| GoalCount { goal, count })
            .collect();
        top_fitness_goals.sort_by(|a, b| b.count.cmp(&a.count).then(a.goal.cmp(&b.goal)));
        top_fitness_goals.truncate(5);

        LeadStats {
            total,
            by_status,
            average_score,
            tier_counts,
            top_fitness_goals,
            activity_levels,
        }
    }

    /// Seed the two demo leads the dashboard ships with. Scores are
    /// computed, not canned, so they stay consistent with the engine.
    pub async fn seed_demo(&self) {
        let now = Utc::now();

        let demo: [(&str, &str, &str, LeadProfile, LeadStatus, DateTime<Utc>); 2] = [
            (
                "Sarah Johnson",
                "sarah@example.com",
                "+61400123456",
                LeadProfile {
                    age: Some(32),
                    gender: Some(crate::models::Gender::Female),
                    fitness_goals: vec!["weight_loss".to_string(), "general_fitness".to_string()],
                    current_activity_level: Some(ActivityLevel::LightlyActive),
                    previous_gym_experience: Some(false),
                    budget_range: Some("$100-200/week".to_string()),
                    lead_source: Some("website".to_string()),
                    ..LeadProfile::default()
                },
                LeadStatus::New,
                now,
            ),
            (
                "Mike Wilson",
                "mike@example.com",
                "+61400654321",
                LeadProfile {
                    age: Some(28),
                    gender: Some(crate::models::Gender::Male),
                    fitness_goals: vec!["muscle_gain".to_string(), "strength".to_string()],
                    current_activity_level: Some(ActivityLevel::ModeratelyActive),
                    previous_gym_experience: Some(true),
                    budget_range: Some("$200+/week".to_string()),
                    lead_source: Some("referral".to_string()),
                    ..LeadProfile::default()
                },
                LeadStatus::Contacted,
                now - Duration::days(1),
            ),
        ];

        let seeded = demo.len();
        for (name, email, phone, mut profile, status, created_at) in demo {
            profile.created_at = Some(created_at);
            let result = scoring::score(&profile, None, now);
            self.insert(Lead {
                id: Uuid::new_v4(),
                full_name: name.to_string(),
                email: email.to_string(),
                phone: Some(phone.to_string()),
                status,
                score: result.total_score,
                profile,
                created_at,
                updated_at: created_at,
            })
            .await;
        }

        tracing::info!("Seeded {} demo leads", seeded);
    }
}
