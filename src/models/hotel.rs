// src/models/hotel.rs
use serde::{Deserialize, Serialize, Serializer};

// ==================== HOTEL ====================

/// A hotel row as fetched for destination search: identity plus the banner
/// image joined in from hotel_infos.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone, PartialEq)]
pub struct Hotel {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub image: Option<String>,
}

/// Hotel row for the detail view, with the long-form description.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct HotelDetails {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub image: Option<String>,
    pub description: Option<String>,
}

// ==================== DETAIL VIEW ROOM GROUPING ====================

/// Room row for the detail view. `images` carries the GROUP_CONCAT of the
/// room type's images; only the first one is shown per type.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct DetailRoom {
    pub id: i64,
    pub room_number: String,
    pub room_type: String,
    pub total_adult: i64,
    pub total_child: i64,
    pub price: f64,
    pub images: Option<String>,
}

#[derive(Debug, Serialize, Clone)]
pub struct RoomRef {
    pub id: i64,
    pub room_no: String,
}

#[derive(Debug, Serialize, Clone)]
pub struct RoomTypeSummary {
    pub room_type: String,
    pub total_adult: i64,
    pub total_child: i64,
    pub price: f64,
    pub image: Option<String>,
    pub rooms: Vec<RoomRef>,
    pub room_count: usize,
}

/// Rooms grouped by room-type name, in first-encounter order. Serializes as
/// a JSON object keyed by the type name.
#[derive(Debug, Default, Clone)]
pub struct RoomTypeGroups(pub Vec<RoomTypeSummary>);

impl RoomTypeGroups {
    pub fn push(&mut self, room: DetailRoom) {
        let entry = RoomRef {
            id: room.id,
            room_no: room.room_number,
        };

        match self.0.iter_mut().find(|g| g.room_type == room.room_type) {
            Some(group) => {
                group.rooms.push(entry);
                group.room_count += 1;
            }
            None => {
                let image = room
                    .images
                    .as_deref()
                    .and_then(|imgs| imgs.split(',').next())
                    .map(str::to_string);

                self.0.push(RoomTypeSummary {
                    room_type: room.room_type,
                    total_adult: room.total_adult,
                    total_child: room.total_child,
                    price: room.price,
                    image,
                    rooms: vec![entry],
                    room_count: 1,
                });
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl Serialize for RoomTypeGroups {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for group in &self.0 {
            map.serialize_entry(&group.room_type, group)?;
        }
        map.end()
    }
}

/// Payload of the hotel-detail endpoint.
#[derive(Debug, Serialize)]
pub struct HotelDetailsData {
    pub hotel: HotelDetails,
    pub rooms: RoomTypeGroups,
}
