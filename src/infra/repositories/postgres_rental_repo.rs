use crate::domain::{models::{client::Client, payment::Payment, rental::Rental}, ports::RentalRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::warn;

const CONFLICT_COUNT_SQL: &str =
    "SELECT (SELECT COUNT(*) FROM reservations
             WHERE room_number = $1 AND status IN ('PENDING', 'CONFIRMED')
               AND start_date <= $3 AND end_date >= $2)
          + (SELECT COUNT(*) FROM rentals
             WHERE room_number = $1 AND start_date <= $3 AND end_date >= $2)";

pub struct PostgresRentalRepo {
    pool: PgPool,
}

impl PostgresRentalRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RentalRepository for PostgresRentalRepo {
    async fn create_walk_in(
        &self,
        rental: &Rental,
        payment: &Payment,
        new_client: &Client,
    ) -> Result<Rental, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        sqlx::query("SELECT number FROM rooms WHERE number = $1 FOR UPDATE")
            .bind(rental.room_number)
            .fetch_optional(&mut *tx).await.map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound("Room not found".into()))?;

        let conflicts: i64 = sqlx::query_scalar(CONFLICT_COUNT_SQL)
            .bind(rental.room_number).bind(rental.start_date).bind(rental.end_date)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;
        if conflicts > 0 {
            return Err(AppError::Conflict("Room is already booked for this period".into()));
        }

        // Walk-in guests unknown to the system get registered on the spot.
        sqlx::query(
            "INSERT INTO clients (nas, full_name, address, registered_on)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (nas) DO NOTHING"
        )
            .bind(&new_client.nas).bind(&new_client.full_name)
            .bind(&new_client.address).bind(new_client.registered_on)
            .execute(&mut *tx).await.map_err(AppError::Database)?;

        let paid = sqlx::query_as::<_, Payment>(
            "INSERT INTO payments (amount, method, paid_on) VALUES ($1, $2, $3) RETURNING *"
        )
            .bind(payment.amount).bind(&payment.method).bind(payment.paid_on)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;

        let created = sqlx::query_as::<_, Rental>(
            "INSERT INTO rentals (room_number, client_nas, employee_nas, payment_id, start_date, end_date, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING *"
        )
            .bind(rental.room_number).bind(&rental.client_nas).bind(&rental.employee_nas)
            .bind(paid.id).bind(rental.start_date).bind(rental.end_date).bind(rental.created_at)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Rental>, AppError> {
        match sqlx::query_as::<_, Rental>("SELECT * FROM rentals WHERE id = $1").bind(id).fetch_optional(&self.pool).await {
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
            "SELECT * FROM rentals WHERE start_date <= $2 AND end_date >= $1"
        )
            .bind(start).bind(end)
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
