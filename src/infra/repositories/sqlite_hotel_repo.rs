use crate::domain::{models::hotel::Hotel, ports::HotelRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::warn;

pub struct SqliteHotelRepo {
    pool: SqlitePool,
}

impl SqliteHotelRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HotelRepository for SqliteHotelRepo {
    async fn create(&self, hotel: &Hotel) -> Result<Hotel, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let touched = sqlx::query("UPDATE chains SET hotel_count = hotel_count + 1 WHERE id = ?")
            .bind(hotel.chain_id).execute(&mut *tx).await.map_err(AppError::Database)?;
        if touched.rows_affected() == 0 {
            return Err(AppError::NotFound("Chain not found".into()));
        }

        let created = sqlx::query_as::<_, Hotel>(
            "INSERT INTO hotels (chain_id, name, address, star_category, room_count, created_at)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(hotel.chain_id).bind(&hotel.name).bind(&hotel.address)
            .bind(hotel.star_category).bind(hotel.room_count).bind(hotel.created_at)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Hotel>, AppError> {
        match sqlx::query_as::<_, Hotel>("SELECT * FROM hotels WHERE id = ?").bind(id).fetch_optional(&self.pool).await {
            Ok(hotel) => Ok(hotel),
            Err(e) => {
                warn!("hotel lookup degraded to none: {:?}", e);
                Ok(None)
            }
        }
    }

    async fn list(&self, chain_id: Option<i64>) -> Result<Vec<Hotel>, AppError> {
        let result = match chain_id {
            Some(chain_id) => {
                sqlx::query_as::<_, Hotel>("SELECT * FROM hotels WHERE chain_id = ? ORDER BY name ASC")
                    .bind(chain_id).fetch_all(&self.pool).await
            }
            None => {
                sqlx::query_as::<_, Hotel>("SELECT * FROM hotels ORDER BY name ASC")
                    .fetch_all(&self.pool).await
            }
        };
        match result {
            Ok(hotels) => Ok(hotels),
            Err(e) => {
                warn!("hotel list degraded to empty: {:?}", e);
                Ok(Vec::new())
            }
        }
    }

    async fn update(&self, hotel: &Hotel) -> Result<Hotel, AppError> {
        sqlx::query_as::<_, Hotel>(
            "UPDATE hotels SET name = ?, address = ?, star_category = ?
             WHERE id = ?
             RETURNING *"
        )
            .bind(&hotel.name).bind(&hotel.address).bind(hotel.star_category).bind(hotel.id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound("Hotel not found".into()))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let hotel = sqlx::query_as::<_, Hotel>("SELECT * FROM hotels WHERE id = ?")
            .bind(id).fetch_optional(&mut *tx).await.map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound("Hotel not found".into()))?;

        sqlx::query("DELETE FROM hotels WHERE id = ?")
            .bind(id).execute(&mut *tx).await.map_err(AppError::Database)?;
        sqlx::query("UPDATE chains SET hotel_count = hotel_count - 1 WHERE id = ?")
            .bind(hotel.chain_id).execute(&mut *tx).await.map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(())
    }
}
