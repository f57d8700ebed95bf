pub mod ai_client;
pub mod cost_service;
pub mod document_service;
pub mod itinerary_service;
