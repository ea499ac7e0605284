use crate::domain::{models::employee::Employee, ports::EmployeeRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::warn;

pub struct PostgresEmployeeRepo {
    pool: PgPool,
}

impl PostgresEmployeeRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeRepository for PostgresEmployeeRepo {
    async fn create(&self, employee: &Employee) -> Result<Employee, AppError> {
        sqlx::query_as::<_, Employee>(
            "INSERT INTO employees (nas, full_name, address, hotel_id, roles)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING *"
        )
            .bind(&employee.nas).bind(&employee.full_name).bind(&employee.address)
            .bind(employee.hotel_id).bind(&employee.roles)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_nas(&self, nas: &str) -> Result<Option<Employee>, AppError> {
        match sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE nas = $1").bind(nas).fetch_optional(&self.pool).await {
            Ok(employee) => Ok(employee),
            Err(e) => {
                warn!("employee lookup degraded to none: {:?}", e);
                Ok(None)
            }
        }
    }

    async fn list(&self, hotel_id: Option<i64>) -> Result<Vec<Employee>, AppError> {
        let result = match hotel_id {
            Some(hotel_id) => {
                sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE hotel_id = $1 ORDER BY full_name ASC")
                    .bind(hotel_id).fetch_all(&self.pool).await
            }
            None => {
                sqlx::query_as::<_, Employee>("SELECT * FROM employees ORDER BY full_name ASC")
                    .fetch_all(&self.pool).await
            }
        };
        match result {
            Ok(employees) => Ok(employees),
            Err(e) => {
                warn!("employee list degraded to empty: {:?}", e);
                Ok(Vec::new())
            }
        }
    }

    async fn update(&self, employee: &Employee) -> Result<Employee, AppError> {
        sqlx::query_as::<_, Employee>(
            "UPDATE employees SET full_name = $1, address = $2, hotel_id = $3, roles = $4
             WHERE nas = $5
             RETURNING *"
        )
            .bind(&employee.full_name).bind(&employee.address).bind(employee.hotel_id)
            .bind(&employee.roles).bind(&employee.nas)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound("Employee not found".into()))
    }

    async fn delete(&self, nas: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM employees WHERE nas = $1").bind(nas).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Employee not found".into())); }
        Ok(())
    }
}
