// src/error.rs - API error taxonomy and HTTP mapping
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    InternalServerError(String),
    ValidationError(String),
    DatabaseError(sqlx::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Serialize)]
struct ErrorResponse {
    message: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            ApiError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            ApiError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            ApiError::DatabaseError(err) => write!(f, "Database Error: {}", err),
        }
    }
}

impl ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::BadRequest(msg) => HttpResponse::BadRequest().json(ErrorResponse {
                message: msg.clone(),
            }),
            ApiError::ValidationError(msg) => HttpResponse::BadRequest().json(ErrorResponse {
                message: msg.clone(),
            }),
            ApiError::NotFound(msg) => HttpResponse::NotFound().json(ErrorResponse {
                message: msg.clone(),
            }),
            // Data-source failures are never surfaced verbatim to clients.
            ApiError::DatabaseError(err) => {
                log::error!("Database error: {}", err);
                HttpResponse::InternalServerError().json(ErrorResponse {
                    message: "Server Error".to_string(),
                })
            }
            ApiError::InternalServerError(msg) => {
                log::error!("Internal error: {}", msg);
                HttpResponse::InternalServerError().json(ErrorResponse {
                    message: "Server Error".to_string(),
                })
            }
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::DatabaseError(err)
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::ValidationError(err.to_string())
    }
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        ApiError::BadRequest(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        ApiError::NotFound(msg.into())
    }

    pub fn hotel_not_found() -> Self {
        ApiError::NotFound("Hotel not found".to_string())
    }

    pub fn no_rooms_for_hotel() -> Self {
        ApiError::NotFound("No rooms available for this hotel".to_string())
    }
}
