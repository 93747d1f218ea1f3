// src/db.rs - Database migrations and setup

use anyhow::Result;
use sqlx::SqlitePool;

pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    // Enable foreign keys and WAL mode
    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(pool)
        .await?;

    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(pool)
        .await?;

    // Core hotel record; searchable text lives here
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS hotels (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL CHECK(length(name) > 0 AND length(name) <= 255),
            address TEXT NOT NULL CHECK(length(address) > 0 AND length(address) <= 500),
            status TEXT NOT NULL DEFAULT '1',
            created_at DATETIME NOT NULL DEFAULT (datetime('now')),
            updated_at DATETIME NOT NULL DEFAULT (datetime('now'))
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Presentation data kept apart from the hotel record
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS hotel_infos (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            hotel_id INTEGER NOT NULL UNIQUE,
            bannerimg TEXT,
            description TEXT CHECK(description IS NULL OR length(description) <= 5000),
            created_at DATETIME NOT NULL DEFAULT (datetime('now')),
            updated_at DATETIME NOT NULL DEFAULT (datetime('now')),
            FOREIGN KEY (hotel_id) REFERENCES hotels (id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Room categories per hotel; capacity and fare belong to the type
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS room_types (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            hotel_id INTEGER NOT NULL,
            name TEXT NOT NULL CHECK(length(name) > 0 AND length(name) <= 255),
            total_adult INTEGER NOT NULL DEFAULT 1 CHECK(total_adult >= 0),
            total_child INTEGER NOT NULL DEFAULT 0 CHECK(total_child >= 0),
            fare REAL NOT NULL CHECK(fare >= 0),
            created_at DATETIME NOT NULL DEFAULT (datetime('now')),
            updated_at DATETIME NOT NULL DEFAULT (datetime('now')),
            FOREIGN KEY (hotel_id) REFERENCES hotels (id) ON DELETE CASCADE,
            UNIQUE(hotel_id, name)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS room_type_images (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            room_type_id INTEGER NOT NULL,
            image TEXT NOT NULL CHECK(length(image) > 0),
            FOREIGN KEY (room_type_id) REFERENCES room_types (id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Physical rooms; status '1' marks a room as occupiable
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS rooms (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            hotel_id INTEGER NOT NULL,
            room_type_id INTEGER NOT NULL,
            room_number TEXT NOT NULL CHECK(length(room_number) > 0 AND length(room_number) <= 50),
            status TEXT NOT NULL DEFAULT '1',
            created_at DATETIME NOT NULL DEFAULT (datetime('now')),
            updated_at DATETIME NOT NULL DEFAULT (datetime('now')),
            FOREIGN KEY (hotel_id) REFERENCES hotels (id) ON DELETE CASCADE,
            FOREIGN KEY (room_type_id) REFERENCES room_types (id) ON DELETE CASCADE,
            UNIQUE(hotel_id, room_number)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // One row per occupied night
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS booked_rooms (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            room_id INTEGER NOT NULL,
            booked_for DATE NOT NULL,
            created_at DATETIME NOT NULL DEFAULT (datetime('now')),
            FOREIGN KEY (room_id) REFERENCES rooms (id) ON DELETE CASCADE,
            UNIQUE(room_id, booked_for)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // ==================== CREATE INDEXES ====================

    let _ = sqlx::query("CREATE INDEX IF NOT EXISTS idx_hotels_address ON hotels(address)")
        .execute(pool)
        .await;
    let _ = sqlx::query("CREATE INDEX IF NOT EXISTS idx_hotels_status ON hotels(status)")
        .execute(pool)
        .await;
    let _ = sqlx::query("CREATE INDEX IF NOT EXISTS idx_hotel_infos_hotel ON hotel_infos(hotel_id)")
        .execute(pool)
        .await;
    let _ = sqlx::query("CREATE INDEX IF NOT EXISTS idx_room_types_hotel ON room_types(hotel_id)")
        .execute(pool)
        .await;
    let _ = sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_room_type_images_type ON room_type_images(room_type_id)",
    )
    .execute(pool)
    .await;
    let _ = sqlx::query("CREATE INDEX IF NOT EXISTS idx_rooms_hotel ON rooms(hotel_id)")
        .execute(pool)
        .await;
    let _ = sqlx::query("CREATE INDEX IF NOT EXISTS idx_rooms_type ON rooms(room_type_id)")
        .execute(pool)
        .await;
    let _ = sqlx::query("CREATE INDEX IF NOT EXISTS idx_rooms_status ON rooms(status)")
        .execute(pool)
        .await;
    let _ = sqlx::query("CREATE INDEX IF NOT EXISTS idx_booked_rooms_room ON booked_rooms(room_id)")
        .execute(pool)
        .await;
    let _ = sqlx::query("CREATE INDEX IF NOT EXISTS idx_booked_rooms_date ON booked_rooms(booked_for)")
        .execute(pool)
        .await;

    Ok(())
}

// ==================== DATABASE RESET (DEVELOPMENT ONLY) ====================

pub async fn reset_database(pool: &SqlitePool) -> Result<()> {
    log::warn!("Resetting database - all data will be lost!");

    let drop_queries = [
        "DROP TABLE IF EXISTS booked_rooms",
        "DROP TABLE IF EXISTS rooms",
        "DROP TABLE IF EXISTS room_type_images",
        "DROP TABLE IF EXISTS room_types",
        "DROP TABLE IF EXISTS hotel_infos",
        "DROP TABLE IF EXISTS hotels",
    ];

    for query in drop_queries.iter() {
        let _ = sqlx::query(query).execute(pool).await;
    }

    // Recreate tables
    run_migrations(pool).await?;

    Ok(())
}

// ==================== TESTS ====================

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        // A single connection keeps the in-memory database alive
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_migrations_create_all_tables() {
        let pool = test_pool().await;
        run_migrations(&pool).await.unwrap();

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();
        let names: Vec<&str> = tables.iter().map(|t| t.0.as_str()).collect();

        for expected in [
            "booked_rooms",
            "hotel_infos",
            "hotels",
            "room_type_images",
            "room_types",
            "rooms",
        ] {
            assert!(names.contains(&expected), "missing table {}", expected);
        }
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let pool = test_pool().await;
        run_migrations(&pool).await.unwrap();
        run_migrations(&pool).await.unwrap();
    }

    #[tokio::test]
    async fn test_duplicate_booking_night_rejected() {
        let pool = test_pool().await;
        run_migrations(&pool).await.unwrap();

        sqlx::query("INSERT INTO hotels (id, name, address) VALUES (1, 'Sea View', 'Goa')")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query(
            "INSERT INTO room_types (id, hotel_id, name, total_adult, total_child, fare) \
             VALUES (1, 1, 'Deluxe', 2, 1, 1500.0)",
        )
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query(
            "INSERT INTO rooms (id, hotel_id, room_type_id, room_number) VALUES (1, 1, 1, '101')",
        )
        .execute(&pool)
        .await
        .unwrap();

        sqlx::query("INSERT INTO booked_rooms (room_id, booked_for) VALUES (1, '2025-03-10')")
            .execute(&pool)
            .await
            .unwrap();
        let dup = sqlx::query("INSERT INTO booked_rooms (room_id, booked_for) VALUES (1, '2025-03-10')")
            .execute(&pool)
            .await;
        assert!(dup.is_err());
    }

    #[tokio::test]
    async fn test_reset_database_recreates_schema() {
        let pool = test_pool().await;
        run_migrations(&pool).await.unwrap();

        sqlx::query("INSERT INTO hotels (name, address) VALUES ('Sea View', 'Goa')")
            .execute(&pool)
            .await
            .unwrap();

        reset_database(&pool).await.unwrap();

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM hotels")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count.0, 0);
    }
}
