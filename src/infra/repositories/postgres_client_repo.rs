use crate::domain::{models::client::Client, ports::ClientRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::warn;

pub struct PostgresClientRepo {
    pool: PgPool,
}

impl PostgresClientRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClientRepository for PostgresClientRepo {
    async fn create(&self, client: &Client) -> Result<Client, AppError> {
        sqlx::query_as::<_, Client>(
            "INSERT INTO clients (nas, full_name, address, registered_on)
             VALUES ($1, $2, $3, $4)
             RETURNING *"
        )
            .bind(&client.nas).bind(&client.full_name).bind(&client.address).bind(client.registered_on)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_nas(&self, nas: &str) -> Result<Option<Client>, AppError> {
        match sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE nas = $1").bind(nas).fetch_optional(&self.pool).await {
            Ok(client) => Ok(client),
            Err(e) => {
                warn!("client lookup degraded to none: {:?}", e);
                Ok(None)
            }
        }
    }

    async fn list(&self) -> Result<Vec<Client>, AppError> {
        match sqlx::query_as::<_, Client>("SELECT * FROM clients ORDER BY full_name ASC").fetch_all(&self.pool).await {
            Ok(clients) => Ok(clients),
            Err(e) => {
                warn!("client list degraded to empty: {:?}", e);
                Ok(Vec::new())
            }
        }
    }

    async fn update(&self, client: &Client) -> Result<Client, AppError> {
        sqlx::query_as::<_, Client>(
            "UPDATE clients SET full_name = $1, address = $2 WHERE nas = $3 RETURNING *"
        )
            .bind(&client.full_name).bind(&client.address).bind(&client.nas)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound("Client not found".into()))
    }

    async fn delete(&self, nas: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM clients WHERE nas = $1").bind(nas).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Client not found".into())); }
        Ok(())
    }
}
