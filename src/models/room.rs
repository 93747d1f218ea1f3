// src/models/room.rs
use serde::{Deserialize, Serialize};

// ==================== ROOM ====================

/// A physical room joined with its room type. Capacity (`total_adult`,
/// `total_child`) and nightly `price` are inherited from the room type; the
/// `image` is the room type's display image.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone, PartialEq)]
pub struct Room {
    pub id: i64,
    pub hotel_id: i64,
    pub room_type_id: i64,
    pub room_number: String,
    pub status: String,
    pub total_adult: i64,
    pub total_child: i64,
    pub price: f64,
    pub image: Option<String>,
}

impl Room {
    /// Combined seats, the sort key of the greedy minimum-rooms heuristic.
    pub fn total_capacity(&self) -> i64 {
        self.total_adult + self.total_child
    }
}
