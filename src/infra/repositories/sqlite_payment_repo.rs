use crate::domain::{models::payment::Payment, ports::PaymentRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::warn;

pub struct SqlitePaymentRepo {
    pool: SqlitePool,
}

impl SqlitePaymentRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PaymentRepository for SqlitePaymentRepo {
    async fn create(&self, payment: &Payment) -> Result<Payment, AppError> {
        sqlx::query_as::<_, Payment>(
            "INSERT INTO payments (amount, method, paid_on) VALUES (?, ?, ?) RETURNING *"
        )
            .bind(payment.amount).bind(&payment.method).bind(payment.paid_on)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Payment>, AppError> {
        match sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE id = ?").bind(id).fetch_optional(&self.pool).await {
            Ok(payment) => Ok(payment),
            Err(e) => {
                warn!("payment lookup degraded to none: {:?}", e);
                Ok(None)
            }
        }
    }

    async fn list(&self) -> Result<Vec<Payment>, AppError> {
        match sqlx::query_as::<_, Payment>("SELECT * FROM payments ORDER BY id DESC").fetch_all(&self.pool).await {
            Ok(payments) => Ok(payments),
            Err(e) => {
                warn!("payment list degraded to empty: {:?}", e);
                Ok(Vec::new())
            }
        }
    }
}
