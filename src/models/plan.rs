use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum TimeSlot {
    Morning,
    Afternoon,
    Evening,
}

impl Default for TimeSlot {
    fn default() -> Self {
        TimeSlot::Morning
    }
}

impl TimeSlot {
    pub fn label(&self) -> &'static str {
        match self {
            TimeSlot::Morning => "Morning",
            TimeSlot::Afternoon => "Afternoon",
            TimeSlot::Evening => "Evening",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Activity {
    pub name: String,
    pub description: String,
    pub duration_hours: f64,
    pub activity_type: String,
    pub time_slot: TimeSlot,
    pub emoji: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DayPlan {
    pub day_number: u32,
    pub activities: Vec<Activity>,
}

/// Deterministic money figures for the trip. Every value in here comes from
/// the cost estimator, never from the AI response.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct CostBreakdown {
    pub travel_cost: f64,
    pub hotel_cost: f64,
    pub activities_budget: f64,
    pub total: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PlanMetadata {
    pub id: Uuid,
    pub destination_city: String,
    pub origin_city: Option<String>,
    pub num_days: u32,
    pub adults: u32,
    pub children: u32,
    pub preferences: Vec<String>,
    pub budget: f64,
    pub remaining: f64,
    pub utilization: f64,
    pub budget_warning: Option<String>,
    pub budget_exceeded: bool,
    pub summary: String,
    /// False when the AI response could not be parsed into day records and
    /// the free-text fallback was used instead.
    pub structured: bool,
    pub model: String,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ItineraryPlan {
    pub days: Vec<DayPlan>,
    pub cost_breakdown: CostBreakdown,
    pub metadata: PlanMetadata,
}

pub fn emoji_for_activity(activity_type: &str) -> &'static str {
    match activity_type {
        "sightseeing" => "\u{1F3DB}\u{FE0F}",
        "adventure" => "\u{1F3A2}",
        "cultural" => "\u{1F3AD}",
        "food" => "\u{1F37D}\u{FE0F}",
        "relaxation" => "\u{1F9D8}",
        "shopping" => "\u{1F6CD}\u{FE0F}",
        "nightlife" => "\u{1F319}",
        _ => "\u{1F4CD}",
    }
}
