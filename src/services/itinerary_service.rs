use chrono::Utc;
use regex::Regex;
use serde::Deserialize;
use uuid::Uuid;

use crate::models::plan::{
    emoji_for_activity, Activity, DayPlan, ItineraryPlan, PlanMetadata, TimeSlot,
};
use crate::models::trip::TripRequest;
use crate::services::ai_client::{AiClient, AiClientError};
use crate::services::cost_service;

const SYSTEM_PROMPT: &str = "You are a travel planner. Respond ONLY with valid JSON. \
Create activities priced in Indian Rupees. JSON format: \
{\"days\": [{\"day_number\": 1, \"activities\": [{\"name\": \"string\", \"description\": \"short\", \
\"duration_hours\": 2.0, \"cost\": 100.0, \
\"activity_type\": \"sightseeing|adventure|cultural|food|relaxation|shopping|nightlife\", \
\"time_slot\": \"morning|afternoon|evening\"}]}]}";

// Day and activity records as the model emits them. Parsing is tolerant:
// missing fields take defaults and malformed entries are skipped.
#[derive(Debug, Deserialize)]
struct RawItinerary {
    #[serde(default)]
    days: Vec<RawDay>,
}

#[derive(Debug, Deserialize)]
struct RawDay {
    #[serde(default)]
    day_number: Option<f64>,
    #[serde(default)]
    activities: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct RawActivity {
    #[serde(default = "default_activity_name")]
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default = "default_duration_hours")]
    duration_hours: f64,
    // Accepted from the model, never used: prices come from the estimator.
    #[serde(rename = "cost", default)]
    _cost: serde_json::Value,
    #[serde(default = "default_activity_type")]
    activity_type: String,
    #[serde(default = "default_time_slot")]
    time_slot: String,
}

fn default_activity_name() -> String {
    "Unknown Activity".to_string()
}

fn default_duration_hours() -> f64 {
    2.0
}

fn default_activity_type() -> String {
    "sightseeing".to_string()
}

fn default_time_slot() -> String {
    "morning".to_string()
}

pub struct ItineraryPlanner {
    ai: AiClient,
}

impl ItineraryPlanner {
    pub fn new(ai: AiClient) -> Self {
        Self { ai }
    }

    /// Build a complete plan for the request. The cost breakdown is computed
    /// first and independently of the AI call; the AI only contributes the
    /// day-by-day narrative.
    pub async fn build_itinerary(
        &self,
        request: &TripRequest,
    ) -> Result<ItineraryPlan, AiClientError> {
        let assessment = cost_service::assess_budget(request);
        let prompt = build_user_prompt(request, assessment.breakdown.activities_budget);

        let response = self.ai.request_itinerary(SYSTEM_PROMPT, &prompt).await?;
        let (days, structured) = parse_days(&response, request.days);
        let summary = generate_summary(request, &days, assessment.remaining);

        Ok(ItineraryPlan {
            metadata: PlanMetadata {
                id: Uuid::new_v4(),
                destination_city: request.destination_city.clone(),
                origin_city: request.origin_city.clone(),
                num_days: request.days,
                adults: request.adults,
                children: request.children,
                preferences: request.preferences.clone(),
                budget: request.budget,
                remaining: assessment.remaining,
                utilization: assessment.utilization,
                budget_warning: assessment.budget_warning,
                budget_exceeded: assessment.budget_exceeded,
                summary,
                structured,
                model: self.ai.model().to_string(),
                generated_at: Utc::now(),
            },
            days,
            cost_breakdown: assessment.breakdown,
        })
    }
}

fn build_user_prompt(request: &TripRequest, activities_budget: f64) -> String {
    format!(
        "Plan a {}-day trip to {}. Activity budget for the whole trip: Rs. {:.0}. \
         Preferences: {}. Generate 3-4 activities per day and avoid repeating \
         activities across days. Respond with JSON only: \
         {{\"days\": [{{\"day_number\": 1, \"activities\": [...]}}]}}",
        request.days,
        request.destination_city,
        activities_budget,
        request.preferences.join(", "),
    )
}

/// Pull the first JSON object or array embedded in free-form model output.
fn extract_json_block(text: &str) -> Option<serde_json::Value> {
    for pattern in [r"\{[\s\S]*\}", r"\[[\s\S]*\]"] {
        if let Ok(re) = Regex::new(pattern) {
            if let Some(found) = re.find(text) {
                if let Ok(value) = serde_json::from_str(found.as_str()) {
                    return Some(value);
                }
            }
        }
    }
    None
}

/// Parse the raw response into ordered day plans. Returns the days and
/// whether structured parsing succeeded; when it did not, the whole response
/// becomes a single free-text block on day 1 and nothing is fabricated for
/// the remaining days.
fn parse_days(response: &str, requested_days: u32) -> (Vec<DayPlan>, bool) {
    if let Some(value) = extract_json_block(response) {
        let raw: Option<RawItinerary> = if value.is_array() {
            serde_json::from_value(serde_json::json!({ "days": value })).ok()
        } else {
            serde_json::from_value(value).ok()
        };

        if let Some(raw) = raw {
            let days = normalize_days(raw, requested_days);
            if !days.is_empty() {
                return (days, true);
            }
        }
    }

    (free_text_fallback(response), false)
}

fn normalize_days(raw: RawItinerary, requested_days: u32) -> Vec<DayPlan> {
    let mut days = Vec::new();

    for (index, raw_day) in raw.days.into_iter().enumerate() {
        let day_number = raw_day
            .day_number
            .map(|n| n.max(1.0) as u32)
            .unwrap_or(index as u32 + 1);

        let mut activities = Vec::new();
        for value in raw_day.activities {
            match serde_json::from_value::<RawActivity>(value) {
                Ok(raw_activity) => activities.push(into_activity(raw_activity)),
                Err(err) => eprintln!("Skipping unparsable activity: {}", err),
            }
        }

        if activities.is_empty() {
            continue;
        }
        activities.sort_by_key(|activity| activity.time_slot);
        days.push(DayPlan {
            day_number,
            activities,
        });
    }

    days.sort_by_key(|day| day.day_number);
    days.truncate(requested_days as usize);
    days
}

fn into_activity(raw: RawActivity) -> Activity {
    Activity {
        emoji: emoji_for_activity(&raw.activity_type).to_string(),
        time_slot: parse_time_slot(&raw.time_slot),
        name: raw.name,
        description: raw.description,
        duration_hours: raw.duration_hours,
        activity_type: raw.activity_type,
    }
}

fn parse_time_slot(slot: &str) -> TimeSlot {
    match slot.trim().to_lowercase().as_str() {
        "afternoon" => TimeSlot::Afternoon,
        "evening" => TimeSlot::Evening,
        _ => TimeSlot::Morning,
    }
}

fn free_text_fallback(response: &str) -> Vec<DayPlan> {
    let text = response.trim();
    if text.is_empty() {
        return Vec::new();
    }

    vec![DayPlan {
        day_number: 1,
        activities: vec![Activity {
            name: "Suggested itinerary".to_string(),
            description: text.to_string(),
            duration_hours: 0.0,
            activity_type: "sightseeing".to_string(),
            time_slot: TimeSlot::Morning,
            emoji: emoji_for_activity("sightseeing").to_string(),
        }],
    }]
}

/// Build the trip summary locally, without another API round trip.
fn generate_summary(request: &TripRequest, days: &[DayPlan], remaining: f64) -> String {
    let mut activity_types: Vec<String> = Vec::new();
    let mut highlights: Vec<String> = Vec::new();

    for day in days {
        for activity in &day.activities {
            if !activity_types.contains(&activity.activity_type) {
                activity_types.push(activity.activity_type.clone());
            }
            if highlights.len() < 3 {
                highlights.push(activity.name.clone());
            }
        }
    }

    let types_text = activity_types
        .iter()
        .take(3)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    let budget_text = if remaining > 0.0 {
        format!("You'll save Rs. {:.0} from your budget!", remaining)
    } else {
        "Your budget is fully optimized for this trip!".to_string()
    };

    format!(
        "Get ready for an amazing {}-day adventure in {}! Experience {} with highlights like {}. {}",
        request.days,
        request.destination_city,
        types_text,
        highlights.join(", "),
        budget_text
    )
}
