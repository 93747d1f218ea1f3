// src/search_handlers.rs - Availability search and hotel detail endpoints
use actix_web::{web, HttpResponse};
use serde::Serialize;
use std::sync::Arc;

use crate::availability::{search_availability, SearchOutcome};
use crate::error::{ApiError, ApiResult};
use crate::handlers::ApiResponse;
use crate::models::{HotelAvailability, HotelDetailsData, RoomTypeGroups, SearchRequest};
use crate::AppState;

/// Hotel whose images are served from a dedicated host.
pub const IMAGE_REWRITE_HOTEL_ID: i64 = 23;
pub const IMAGE_REWRITE_BASE_URL: &str =
    "https://sanabeachresort.bookurstay.in/assets/images/hotelImage/";

const NO_HOTELS_MESSAGE: &str = "No hotels found for the given destination.";
const NO_ROOMS_MESSAGE: &str = "No available rooms found for the given hotels.";
const NO_AVAILABILITY_MESSAGE: &str = "No available hotels found for the given criteria.";

// ==================== SEARCH ====================

#[derive(Debug, Serialize)]
pub struct SearchData {
    pub response: Vec<HotelAvailability>,
}

pub async fn search(
    app_state: web::Data<Arc<AppState>>,
    body: web::Json<SearchRequest>,
) -> ApiResult<HttpResponse> {
    let params = body.into_inner().into_params()?;

    log::debug!(
        "Search: destination='{}' {} to {} adults={} children={}",
        params.destination,
        params.check_in,
        params.check_out,
        params.adults,
        params.children
    );

    let hotels = app_state
        .store
        .hotels_by_destination(&params.destination)
        .await?;
    if hotels.is_empty() {
        return Ok(HttpResponse::Ok().json(ApiResponse::message_only(NO_HOTELS_MESSAGE)));
    }

    let hotel_ids: Vec<i64> = hotels.iter().map(|h| h.id).collect();
    let rooms = app_state.store.occupiable_rooms(&hotel_ids).await?;
    if rooms.is_empty() {
        return Ok(HttpResponse::Ok().json(ApiResponse::message_only(NO_ROOMS_MESSAGE)));
    }

    let room_ids: Vec<i64> = rooms.iter().map(|r| r.id).collect();
    let bookings = app_state
        .store
        .bookings_for(&room_ids, params.check_in, params.check_out)
        .await?;

    match search_availability(&params, &hotels, &rooms, &bookings) {
        SearchOutcome::NoHotels => {
            Ok(HttpResponse::Ok().json(ApiResponse::message_only(NO_HOTELS_MESSAGE)))
        }
        SearchOutcome::NoRooms => {
            Ok(HttpResponse::Ok().json(ApiResponse::message_only(NO_ROOMS_MESSAGE)))
        }
        SearchOutcome::NoAvailability => {
            Ok(HttpResponse::Ok().json(ApiResponse::message_only(NO_AVAILABILITY_MESSAGE)))
        }
        SearchOutcome::Available(mut results) => {
            for hotel in &mut results {
                rewrite_hotel_image(hotel);
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success(SearchData { response: results })))
        }
    }
}

/// One hotel stores bare filenames instead of full URLs; prefix them with
/// its image host before they leave the API.
fn rewrite_hotel_image(hotel: &mut HotelAvailability) {
    if hotel.hotel_id != IMAGE_REWRITE_HOTEL_ID {
        return;
    }
    if let Some(image) = hotel.image.take() {
        hotel.image = Some(format!("{}{}", IMAGE_REWRITE_BASE_URL, image));
    }
}

// ==================== HOTEL DETAILS ====================

pub async fn get_hotel_details(
    app_state: web::Data<Arc<AppState>>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let hotel_id = path.into_inner();

    let hotel = app_state
        .store
        .hotel_by_id(hotel_id)
        .await?
        .ok_or_else(ApiError::hotel_not_found)?;

    let detail_rooms = app_state.store.detail_rooms(hotel_id).await?;
    if detail_rooms.is_empty() {
        return Err(ApiError::no_rooms_for_hotel());
    }

    let mut rooms = RoomTypeGroups::default();
    for room in detail_rooms {
        rooms.push(room);
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(HotelDetailsData { hotel, rooms })))
}

// ==================== TESTS ====================
