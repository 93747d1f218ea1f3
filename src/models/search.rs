// src/models/search.rs - Search request validation and result types
use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};
use validator::Validate;

use crate::error::ApiError;
use crate::models::Room;

/// Request dates arrive as day-month-year text, e.g. "25-12-2025".
pub const REQUEST_DATE_FORMAT: &str = "%d-%m-%Y";

const REQUIRED_FIELDS_MESSAGE: &str =
    "Destination, check-in date, and check-out date are required.";

// ==================== SEARCH REQUEST ====================

/// Raw search body as posted by clients. Field names mirror the public API.
#[derive(Debug, Deserialize, Validate, Clone)]
pub struct SearchRequest {
    pub destination: String,
    pub checkin_date: String,
    pub checkout_date: String,

    #[validate(range(min = 1, message = "Requested room count must be positive"))]
    pub room_no: Option<u32>,

    #[serde(default = "default_adults")]
    pub adultno: u32,

    #[serde(default)]
    pub child_no: u32,
}

fn default_adults() -> u32 {
    1
}

/// Validated search parameters handed to the availability engine.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    pub destination: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub room_no: Option<usize>,
    pub adults: i64,
    pub children: i64,
}

impl SearchRequest {
    /// Explicit validation step: mandatory fields, parseable dates and a
    /// chronological range, or a client-input rejection.
    pub fn into_params(self) -> Result<SearchParams, ApiError> {
        if self.destination.trim().is_empty()
            || self.checkin_date.trim().is_empty()
            || self.checkout_date.trim().is_empty()
        {
            return Err(ApiError::bad_request(REQUIRED_FIELDS_MESSAGE));
        }

        self.validate()?;

        let check_in = parse_request_date(&self.checkin_date)?;
        let check_out = parse_request_date(&self.checkout_date)?;

        if check_out < check_in {
            return Err(ApiError::bad_request(
                "Check-out date cannot be before check-in date",
            ));
        }

        Ok(SearchParams {
            destination: self.destination,
            check_in,
            check_out,
            room_no: self.room_no.map(|n| n as usize),
            adults: i64::from(self.adultno),
            children: i64::from(self.child_no),
        })
    }
}

pub fn parse_request_date(raw: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(raw.trim(), REQUEST_DATE_FORMAT).map_err(|_| {
        ApiError::bad_request(format!(
            "Invalid date '{}': expected day-month-year (e.g. 25-12-2025)",
            raw
        ))
    })
}

// ==================== AVAILABILITY RESULT ====================

/// Available rooms of one hotel keyed by room-type identifier, in
/// first-encounter order. Serializes as a JSON object.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct GroupedRooms(pub Vec<(i64, Vec<Room>)>);

impl GroupedRooms {
    pub fn push_room(&mut self, room: Room) {
        match self.0.iter_mut().find(|(id, _)| *id == room.room_type_id) {
            Some((_, rooms)) => rooms.push(room),
            None => self.0.push((room.room_type_id, vec![room])),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, room_type_id: i64) -> Option<&[Room]> {
        self.0
            .iter()
            .find(|(id, _)| *id == room_type_id)
            .map(|(_, rooms)| rooms.as_slice())
    }
}

impl Serialize for GroupedRooms {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (room_type_id, rooms) in &self.0 {
            map.serialize_entry(&room_type_id.to_string(), rooms)?;
        }
        map.end()
    }
}

/// One qualifying hotel in the search response.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct HotelAvailability {
    pub hotel_id: i64,
    pub hotel_name: String,
    pub image: Option<String>,
    pub total_available_rooms: usize,
    pub min_price: f64,
    pub max_price: f64,
    pub available_rooms: GroupedRooms,
}

// ==================== TESTS ====================
