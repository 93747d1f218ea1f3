// src/models/booking.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==================== BOOKING ====================

/// One occupied night. A room is booked for a date if any record exists for
/// that (room, date) pair.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone, PartialEq)]
pub struct Booking {
    pub room_id: i64,
    pub booked_for: NaiveDate,
}
