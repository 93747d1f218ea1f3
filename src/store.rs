// src/store.rs - Inventory data access
//! Read-side access to the booking inventory. The engine never touches SQL;
//! everything it needs is fetched here and handed over as plain records.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::error::ApiResult;
use crate::models::{Booking, DetailRoom, Hotel, HotelDetails, Room};

/// Hotel permanently excluded from destination search results.
pub const EXCLUDED_HOTEL_ID: i64 = 9;

/// Room status marking a room as sellable inventory.
pub const OCCUPIABLE_STATUS: &str = "1";

// ==================== STORE TRAIT ====================

#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Hotels whose address matches the destination, minus the excluded one.
    async fn hotels_by_destination(&self, destination: &str) -> ApiResult<Vec<Hotel>>;

    /// Occupiable rooms of the given hotels, joined with their room type.
    async fn occupiable_rooms(&self, hotel_ids: &[i64]) -> ApiResult<Vec<Room>>;

    /// Booked nights of the given rooms that fall inside the stay window.
    async fn bookings_for(
        &self,
        room_ids: &[i64],
        from: NaiveDate,
        to: NaiveDate,
    ) -> ApiResult<Vec<Booking>>;

    async fn hotel_by_id(&self, hotel_id: i64) -> ApiResult<Option<HotelDetails>>;

    /// Occupiable rooms of one hotel for the detail view, with the room
    /// type's images concatenated per row.
    async fn detail_rooms(&self, hotel_id: i64) -> ApiResult<Vec<DetailRoom>>;
}

// ==================== SQL STORE ====================

pub struct SqlStore {
    pool: SqlitePool,
}

impl SqlStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// SQLite cannot bind a slice, so IN lists get one placeholder per element.
fn placeholders(count: usize) -> String {
    let mut out = String::new();
    for i in 0..count {
        if i > 0 {
            out.push_str(", ");
        }
        out.push('?');
    }
    out
}

#[async_trait]
impl InventoryStore for SqlStore {
    async fn hotels_by_destination(&self, destination: &str) -> ApiResult<Vec<Hotel>> {
        let pattern = format!("%{}%", destination.trim());

        let hotels = sqlx::query_as::<_, Hotel>(
            r#"
            SELECT h.id, h.name, h.address, hi.bannerimg AS image
            FROM hotels h
            LEFT JOIN hotel_infos hi ON hi.hotel_id = h.id
            WHERE h.address LIKE ? AND h.id != ?
            ORDER BY h.id
            "#,
        )
        .bind(pattern)
        .bind(EXCLUDED_HOTEL_ID)
        .fetch_all(&self.pool)
        .await?;

        Ok(hotels)
    }

    async fn occupiable_rooms(&self, hotel_ids: &[i64]) -> ApiResult<Vec<Room>> {
        if hotel_ids.is_empty() {
            return Ok(Vec::new());
        }

        // Inner join on room_types: a room without a type has no capacity or
        // fare and cannot be sold.
        let query = format!(
            r#"
            SELECT r.id, r.hotel_id, r.room_type_id, r.room_number, r.status,
                   rt.total_adult, rt.total_child, rt.fare AS price,
                   (SELECT rti.image FROM room_type_images rti
                    WHERE rti.room_type_id = rt.id
                    ORDER BY rti.id LIMIT 1) AS image
            FROM rooms r
            JOIN room_types rt ON rt.id = r.room_type_id
            WHERE r.hotel_id IN ({}) AND r.status = ?
            ORDER BY r.id
            "#,
            placeholders(hotel_ids.len())
        );

        let mut rooms_query = sqlx::query_as::<_, Room>(&query);
        for hotel_id in hotel_ids {
            rooms_query = rooms_query.bind(hotel_id);
        }
        let rooms = rooms_query
            .bind(OCCUPIABLE_STATUS)
            .fetch_all(&self.pool)
            .await?;

        Ok(rooms)
    }

    async fn bookings_for(
        &self,
        room_ids: &[i64],
        from: NaiveDate,
        to: NaiveDate,
    ) -> ApiResult<Vec<Booking>> {
        if room_ids.is_empty() {
            return Ok(Vec::new());
        }

        let query = format!(
            r#"
            SELECT room_id, booked_for
            FROM booked_rooms
            WHERE room_id IN ({}) AND booked_for BETWEEN ? AND ?
            "#,
            placeholders(room_ids.len())
        );

        let mut bookings_query = sqlx::query_as::<_, Booking>(&query);
        for room_id in room_ids {
            bookings_query = bookings_query.bind(room_id);
        }
        let bookings = bookings_query
            .bind(from)
            .bind(to)
            .fetch_all(&self.pool)
            .await?;

        Ok(bookings)
    }

    async fn hotel_by_id(&self, hotel_id: i64) -> ApiResult<Option<HotelDetails>> {
        let hotel = sqlx::query_as::<_, HotelDetails>(
            r#"
            SELECT h.id, h.name, h.address, hi.bannerimg AS image, hi.description
            FROM hotels h
            LEFT JOIN hotel_infos hi ON hi.hotel_id = h.id
            WHERE h.id = ?
            "#,
        )
        .bind(hotel_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(hotel)
    }

    async fn detail_rooms(&self, hotel_id: i64) -> ApiResult<Vec<DetailRoom>> {
        let rooms = sqlx::query_as::<_, DetailRoom>(
            r#"
            SELECT r.id, r.room_number, rt.name AS room_type,
                   rt.total_adult, rt.total_child, rt.fare AS price,
                   GROUP_CONCAT(DISTINCT rti.image) AS images
            FROM rooms r
            JOIN room_types rt ON rt.id = r.room_type_id
            LEFT JOIN room_type_images rti ON rti.room_type_id = rt.id
            WHERE r.hotel_id = ? AND r.status = ?
            GROUP BY r.id
            ORDER BY r.id
            "#,
        )
        .bind(hotel_id)
        .bind(OCCUPIABLE_STATUS)
        .fetch_all(&self.pool)
        .await?;

        Ok(rooms)
    }
}

// ==================== TESTS ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::run_migrations;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn seeded_store() -> SqlStore {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        run_migrations(&pool).await.unwrap();

        let fixtures = [
            "INSERT INTO hotels (id, name, address) VALUES (1, 'Sea View', 'Calangute, Goa')",
            "INSERT INTO hotels (id, name, address) VALUES (2, 'Hill Crest', 'Manali, Himachal')",
            "INSERT INTO hotels (id, name, address) VALUES (9, 'Blocked Palace', 'Baga, Goa')",
            "INSERT INTO hotel_infos (hotel_id, bannerimg, description) \
             VALUES (1, 'seaview.jpg', 'Beachfront property')",
            "INSERT INTO room_types (id, hotel_id, name, total_adult, total_child, fare) \
             VALUES (1, 1, 'Deluxe', 2, 1, 1500.0)",
            "INSERT INTO room_types (id, hotel_id, name, total_adult, total_child, fare) \
             VALUES (2, 1, 'Suite', 3, 2, 3000.0)",
            "INSERT INTO room_type_images (room_type_id, image) VALUES (1, 'deluxe-a.jpg')",
            "INSERT INTO room_type_images (room_type_id, image) VALUES (1, 'deluxe-b.jpg')",
            "INSERT INTO rooms (id, hotel_id, room_type_id, room_number, status) \
             VALUES (1, 1, 1, '101', '1')",
            "INSERT INTO rooms (id, hotel_id, room_type_id, room_number, status) \
             VALUES (2, 1, 1, '102', '0')",
            "INSERT INTO rooms (id, hotel_id, room_type_id, room_number, status) \
             VALUES (3, 1, 2, '201', '1')",
            "INSERT INTO booked_rooms (room_id, booked_for) VALUES (1, '2025-03-10')",
            "INSERT INTO booked_rooms (room_id, booked_for) VALUES (1, '2025-03-20')",
            "INSERT INTO booked_rooms (room_id, booked_for) VALUES (3, '2025-04-01')",
        ];
        for sql in fixtures {
            sqlx::query(sql).execute(&pool).await.unwrap();
        }

        SqlStore::new(pool)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_destination_match_is_substring_and_skips_excluded_hotel() {
        let store = seeded_store().await;

        let hotels = store.hotels_by_destination("Goa").await.unwrap();
        // Hotel 9 is in Goa but never comes back
        assert_eq!(hotels.len(), 1);
        assert_eq!(hotels[0].id, 1);
        assert_eq!(hotels[0].image.as_deref(), Some("seaview.jpg"));
    }

    #[tokio::test]
    async fn test_unknown_destination_matches_nothing() {
        let store = seeded_store().await;
        let hotels = store.hotels_by_destination("Atlantis").await.unwrap();
        assert!(hotels.is_empty());
    }

    #[tokio::test]
    async fn test_occupiable_rooms_filters_status_and_joins_type() {
        let store = seeded_store().await;

        let rooms = store.occupiable_rooms(&[1]).await.unwrap();
        // Room 2 has status '0' and is not sellable
        let ids: Vec<i64> = rooms.iter().map(|r| r.id).collect();
        assert_eq!(ids, [1, 3]);

        let deluxe = &rooms[0];
        assert_eq!(deluxe.total_adult, 2);
        assert_eq!(deluxe.total_child, 1);
        assert_eq!(deluxe.price, 1500.0);
        assert_eq!(deluxe.image.as_deref(), Some("deluxe-a.jpg"));

        // Suite type has no images
        assert_eq!(rooms[1].image, None);
    }

    #[tokio::test]
    async fn test_occupiable_rooms_empty_hotel_list() {
        let store = seeded_store().await;
        assert!(store.occupiable_rooms(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_bookings_restricted_to_window() {
        let store = seeded_store().await;

        let bookings = store
            .bookings_for(&[1, 3], date(2025, 3, 9), date(2025, 3, 12))
            .await
            .unwrap();
        assert_eq!(bookings.len(), 1);
        assert_eq!(bookings[0].room_id, 1);
        assert_eq!(bookings[0].booked_for, date(2025, 3, 10));
    }

    #[tokio::test]
    async fn test_hotel_by_id_includes_info_columns() {
        let store = seeded_store().await;

        let hotel = store.hotel_by_id(1).await.unwrap().unwrap();
        assert_eq!(hotel.name, "Sea View");
        assert_eq!(hotel.description.as_deref(), Some("Beachfront property"));

        // Hotel without an info row still resolves
        let bare = store.hotel_by_id(2).await.unwrap().unwrap();
        assert_eq!(bare.image, None);

        assert!(store.hotel_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_detail_rooms_carry_concatenated_images() {
        let store = seeded_store().await;

        let rooms = store.detail_rooms(1).await.unwrap();
        assert_eq!(rooms.len(), 2);

        let deluxe = rooms.iter().find(|r| r.room_type == "Deluxe").unwrap();
        let images = deluxe.images.as_deref().unwrap();
        assert!(images.contains("deluxe-a.jpg"));
        assert!(images.contains("deluxe-b.jpg"));

        let suite = rooms.iter().find(|r| r.room_type == "Suite").unwrap();
        assert_eq!(suite.images, None);
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(placeholders(0), "");
        assert_eq!(placeholders(1), "?");
        assert_eq!(placeholders(3), "?, ?, ?");
    }
}
