// src/handlers.rs
use actix_web::HttpResponse;
use serde::Serialize;

// ==================== COMMON STRUCTURES ====================

/// Uniform response envelope. Every endpoint answers with a `message` and,
/// when there is a payload, a `data` object.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            message: "success".to_string(),
            data: Some(data),
        }
    }

}

impl ApiResponse<()> {
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
        }
    }
}

// ==================== HEALTH ====================

pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::message_only("OK"))
}

pub async fn welcome() -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::message_only(
        "Availability search API. See /api/v1/search and /api/v1/hotels/{hotel_id}.",
    ))
}

// ==================== TESTS ====================
