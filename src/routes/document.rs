use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::config::AppConfig;
use crate::models::plan::ItineraryPlan;
use crate::services::document_service::{self, RenderError};

/*
    POST /download-pdf
*/
pub async fn download_pdf(
    config: web::Data<AppConfig>,
    input: web::Json<ItineraryPlan>,
) -> impl Responder {
    let plan = input.into_inner();

    match document_service::render_document(&plan, config.pdf_font_dir.as_deref()) {
        Ok(bytes) => {
            let filename = format!(
                "Travel_Itinerary_{}_{}days.pdf",
                plan.metadata.destination_city.replace(' ', "_"),
                plan.metadata.num_days
            );
            HttpResponse::Ok()
                .content_type("application/pdf")
                .insert_header((
                    "Content-Disposition",
                    format!("attachment; filename={}", filename),
                ))
                .body(bytes)
        }
        Err(RenderError::EmptyPlan) => HttpResponse::BadRequest().json(json!({
            "error": "The itinerary has no days, nothing to export"
        })),
        Err(err) => {
            eprintln!(
                "Failed to render itinerary document for {}: {}",
                plan.metadata.destination_city, err
            );
            HttpResponse::InternalServerError().json(json!({
                "error": "Failed to generate the itinerary document"
            }))
        }
    }
}
