use actix_web::web;
use chrono::Utc;
use uuid::Uuid;

use travel_planner_api::config::AppConfig;
use travel_planner_api::models::plan::{
    emoji_for_activity, Activity, CostBreakdown, DayPlan, ItineraryPlan, PlanMetadata, TimeSlot,
};
use travel_planner_api::services::ai_client::AiClient;
use travel_planner_api::services::itinerary_service::ItineraryPlanner;

pub fn test_config(api_base: &str, max_retries: u32) -> AppConfig {
    AppConfig {
        api_key: "test-key-1234567890".to_string(),
        api_base: api_base.trim_end_matches('/').to_string(),
        model: "test-model".to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        debug: false,
        request_timeout_secs: 5,
        max_retries,
        pdf_font_dir: None,
    }
}

/// App data for wiring the real handlers into a test App.
pub fn test_state(
    api_base: &str,
    max_retries: u32,
) -> (web::Data<AppConfig>, web::Data<ItineraryPlanner>) {
    let config = test_config(api_base, max_retries);
    let ai_client = AiClient::new(&config).expect("failed to build AI client");
    (
        web::Data::new(config),
        web::Data::new(ItineraryPlanner::new(ai_client)),
    )
}

pub fn goa_trip_json() -> serde_json::Value {
    serde_json::json!({
        "budget": 50000.0,
        "days": 3,
        "destination_city": "Goa",
        "origin_city": "Mumbai",
        "adults": 2,
        "children": 1,
        "preferences": ["sightseeing", "food"],
        "include_hotel": true,
        "hotel_rating": 4,
        "room_type": "ac"
    })
}

pub fn sample_plan(day_count: u32) -> ItineraryPlan {
    let days = (1..=day_count)
        .map(|day_number| DayPlan {
            day_number,
            activities: vec![Activity {
                name: format!("Walking tour {}", day_number),
                description: "A guided walk through the old town".to_string(),
                duration_hours: 2.0,
                activity_type: "sightseeing".to_string(),
                time_slot: TimeSlot::Morning,
                emoji: emoji_for_activity("sightseeing").to_string(),
            }],
        })
        .collect();

    ItineraryPlan {
        days,
        cost_breakdown: CostBreakdown {
            travel_cost: 8625.0,
            hotel_cost: 38220.0,
            activities_budget: 3155.0,
            total: 50000.0,
        },
        metadata: PlanMetadata {
            id: Uuid::new_v4(),
            destination_city: "Goa".to_string(),
            origin_city: Some("Mumbai".to_string()),
            num_days: day_count,
            adults: 2,
            children: 1,
            preferences: vec!["sightseeing".to_string(), "food".to_string()],
            budget: 50000.0,
            remaining: 0.0,
            utilization: 100.0,
            budget_warning: None,
            budget_exceeded: false,
            summary: "A beach getaway".to_string(),
            structured: true,
            model: "test-model".to_string(),
            generated_at: Utc::now(),
        },
    }
}
