use std::collections::HashMap;
use std::env;

use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;

use crate::config::AppConfig;
use crate::services::document_service;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: HashMap<String, ServiceStatus>,
    environment: String,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

pub async fn health_check(config: web::Data<AppConfig>) -> impl Responder {
    let mut health = HealthStatus {
        status: "ok".to_string(),
        services: HashMap::new(),
        environment: env::var("RUST_ENV").unwrap_or("development".to_string()),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let ai_result = check_ai_provider(&config);
    health
        .services
        .insert("ai_provider".to_string(), ai_result.clone());

    let fonts_result = check_pdf_fonts(&config);
    health
        .services
        .insert("pdf_fonts".to_string(), fonts_result.clone());

    // Any degraded dependency degrades the overall status.
    if ai_result.status != "ok" || fonts_result.status != "ok" {
        health.status = "degraded".to_string();
    }

    HttpResponse::Ok().json(health)
}

fn check_ai_provider(config: &AppConfig) -> ServiceStatus {
    if config.api_key.is_empty() {
        ServiceStatus {
            status: "error".to_string(),
            details: Some("OPENROUTER_API_KEY not configured".to_string()),
        }
    } else {
        ServiceStatus {
            status: "ok".to_string(),
            details: Some(format!(
                "Model {} configured (key {})",
                config.model,
                config.masked_api_key()
            )),
        }
    }
}

fn check_pdf_fonts(config: &AppConfig) -> ServiceStatus {
    if document_service::fonts_available(config.pdf_font_dir.as_deref()) {
        ServiceStatus {
            status: "ok".to_string(),
            details: Some("PDF fonts available".to_string()),
        }
    } else {
        ServiceStatus {
            status: "error".to_string(),
            details: Some("No usable PDF font found; set PDF_FONT_DIR".to_string()),
        }
    }
}
