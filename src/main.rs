use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use travel_planner_api::config::AppConfig;
use travel_planner_api::routes;
use travel_planner_api::services::ai_client::AiClient;
use travel_planner_api::services::itinerary_service::ItineraryPlanner;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    println!("Application starting...");

    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Configuration error: {}", err);
            std::process::exit(1);
        }
    };

    let default_filter = if config.debug { "debug" } else { "info" };
    env_logger::init_from_env(Env::default().default_filter_or(default_filter));
    println!(
        "AI provider configured: model {} (key {})",
        config.model,
        config.masked_api_key()
    );

    let ai_client = match AiClient::new(&config) {
        Ok(client) => client,
        Err(err) => {
            eprintln!("Failed to build AI client: {}", err);
            std::process::exit(1);
        }
    };
    let planner = web::Data::new(ItineraryPlanner::new(ai_client));
    let config_data = web::Data::new(config.clone());

    println!("Attempting to bind to {}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .app_data(config_data.clone())
            .app_data(planner.clone())
            .route("/health", web::get().to(routes::health::health_check))
            .route("/plan", web::post().to(routes::plan::create_plan))
            .route("/download-pdf", web::post().to(routes::document::download_pdf))
    })
    .bind((config.host.clone(), config.port))?
    .run()
    .await
}
