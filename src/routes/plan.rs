use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::models::trip::TripRequest;
use crate::services::itinerary_service::ItineraryPlanner;

/*
    POST /plan
*/
pub async fn create_plan(
    planner: web::Data<ItineraryPlanner>,
    input: web::Json<TripRequest>,
) -> impl Responder {
    let request = input.into_inner();

    // Validation happens before any upstream call.
    if let Err(issues) = request.validate() {
        return HttpResponse::BadRequest().json(json!({
            "error": "Invalid trip request",
            "fields": issues,
        }));
    }

    match planner.build_itinerary(&request).await {
        Ok(plan) => HttpResponse::Ok().json(plan),
        Err(err) => {
            eprintln!(
                "Failed to plan trip to {} ({} days, budget Rs. {:.0}): {}",
                request.destination_city, request.days, request.budget, err
            );
            HttpResponse::ServiceUnavailable().json(json!({
                "error": "Trip planning is temporarily unavailable. Please try again shortly."
            }))
        }
    }
}
