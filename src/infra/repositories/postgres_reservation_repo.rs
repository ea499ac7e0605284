use crate::domain::{models::{rental::Rental, reservation::Reservation}, ports::ReservationRepository};
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

pub struct PostgresReservationRepo {
    pool: PgPool,
}

impl PostgresReservationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReservationRepository for PostgresReservationRepo {
    async fn create_if_available(&self, reservation: &Reservation) -> Result<Reservation, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        // Row lock serializes concurrent bookings for the same room.
        sqlx::query("SELECT number FROM rooms WHERE number = $1 FOR UPDATE")
            .bind(reservation.room_number)
            .fetch_optional(&mut *tx).await.map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound("Room not found".into()))?;

        let conflicts: i64 = sqlx::query_scalar(CONFLICT_COUNT_SQL)
            .bind(reservation.room_number).bind(reservation.start_date).bind(reservation.end_date)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;
        if conflicts > 0 {
            return Err(AppError::Conflict("Room is already booked for this period".into()));
        }

        let created = sqlx::query_as::<_, Reservation>(
            "INSERT INTO reservations (room_number, client_nas, start_date, end_date, guest_note, status, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING *"
        )
            .bind(reservation.room_number).bind(&reservation.client_nas)
            .bind(reservation.start_date).bind(reservation.end_date)
            .bind(&reservation.guest_note).bind(&reservation.status).bind(reservation.created_at)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Reservation>, AppError> {
        match sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = $1").bind(id).fetch_optional(&self.pool).await {
            Ok(reservation) => Ok(reservation),
            Err(e) => {
                warn!("reservation lookup degraded to none: {:?}", e);
                Ok(None)
            }
        }
    }

    async fn list(&self) -> Result<Vec<Reservation>, AppError> {
        match sqlx::query_as::<_, Reservation>("SELECT * FROM reservations ORDER BY id DESC").fetch_all(&self.pool).await {
            Ok(reservations) => Ok(reservations),
            Err(e) => {
                warn!("reservation list degraded to empty: {:?}", e);
                Ok(Vec::new())
            }
        }
    }

    async fn list_blocking_in_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Reservation>, AppError> {
        let result = sqlx::query_as::<_, Reservation>(
            "SELECT * FROM reservations
             WHERE status IN ('PENDING', 'CONFIRMED') AND start_date <= $2 AND end_date >= $1"
        )
            .bind(start).bind(end)
            .fetch_all(&self.pool).await;
        match result {
            Ok(reservations) => Ok(reservations),
            Err(e) => {
                warn!("blocking reservation scan degraded to empty: {:?}", e);
                Ok(Vec::new())
            }
        }
    }

    async fn confirm(&self, id: i64) -> Result<Reservation, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let reservation = sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = $1 FOR UPDATE")
            .bind(id).fetch_optional(&mut *tx).await.map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound("Reservation not found".into()))?;
        if reservation.status != "PENDING" {
            return Err(AppError::InvalidState("Only pending reservations can be confirmed".into()));
        }

        let confirmed = sqlx::query_as::<_, Reservation>(
            "UPDATE reservations SET status = 'CONFIRMED' WHERE id = $1 RETURNING *"
        )
            .bind(id).fetch_one(&mut *tx).await.map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(confirmed)
    }

    async fn cancel(&self, id: i64) -> Result<Reservation, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let reservation = sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = $1 FOR UPDATE")
            .bind(id).fetch_optional(&mut *tx).await.map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound("Reservation not found".into()))?;
        if reservation.is_terminal() {
            return Err(AppError::InvalidState("Reservation is already cancelled or converted".into()));
        }

        let cancelled = sqlx::query_as::<_, Reservation>(
            "UPDATE reservations SET status = 'CANCELLED' WHERE id = $1 RETURNING *"
        )
            .bind(id).fetch_one(&mut *tx).await.map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(cancelled)
    }

    async fn convert(&self, id: i64, employee_nas: &str, payment_id: i64) -> Result<Rental, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let reservation = sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = $1 FOR UPDATE")
            .bind(id).fetch_optional(&mut *tx).await.map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound("Reservation not found".into()))?;
        if reservation.status != "CONFIRMED" {
            return Err(AppError::InvalidState("Only confirmed reservations can be converted".into()));
        }

        let rental = sqlx::query_as::<_, Rental>(
            "INSERT INTO rentals (room_number, client_nas, employee_nas, payment_id, start_date, end_date, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, NOW())
             RETURNING *"
        )
            .bind(reservation.room_number).bind(&reservation.client_nas)
            .bind(employee_nas).bind(payment_id)
            .bind(reservation.start_date).bind(reservation.end_date)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;

        sqlx::query("UPDATE reservations SET status = 'CONVERTED' WHERE id = $1")
            .bind(id).execute(&mut *tx).await.map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(rental)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        // The archival trigger copies the row before the delete lands.
        let result = sqlx::query("DELETE FROM reservations WHERE id = $1").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Reservation not found".into())); }
        Ok(())
    }
}
