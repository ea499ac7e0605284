use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::{info, warn};
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::state::AppState;
use crate::infra::repositories::{
    postgres_chain_repo::PostgresChainRepo, postgres_hotel_repo::PostgresHotelRepo,
    postgres_room_repo::PostgresRoomRepo, postgres_client_repo::PostgresClientRepo,
    postgres_employee_repo::PostgresEmployeeRepo, postgres_reservation_repo::PostgresReservationRepo,
    postgres_rental_repo::PostgresRentalRepo, postgres_payment_repo::PostgresPaymentRepo,
    sqlite_chain_repo::SqliteChainRepo, sqlite_hotel_repo::SqliteHotelRepo,
    sqlite_room_repo::SqliteRoomRepo, sqlite_client_repo::SqliteClientRepo,
    sqlite_employee_repo::SqliteEmployeeRepo, sqlite_reservation_repo::SqliteReservationRepo,
    sqlite_rental_repo::SqliteRentalRepo, sqlite_payment_repo::SqlitePaymentRepo,
    memory::MemoryStore,
};

// Composition root. Nothing above this layer knows which backend is live;
// an unreachable database degrades to the in-memory store instead of
// taking the process down.
pub async fn bootstrap_state(config: &Config) -> AppState {
    match &config.database_url {
        Some(url) if url.starts_with("postgres://") || url.starts_with("postgresql://") => {
            match connect_postgres(url).await {
                Ok(pool) => postgres_state(config, pool),
                Err(e) => {
                    warn!("Postgres unavailable ({e}), falling back to in-memory store");
                    memory_state(config)
                }
            }
        }
        Some(url) => {
            match connect_sqlite(url).await {
                Ok(pool) => sqlite_state(config, pool),
                Err(e) => {
                    warn!("SQLite unavailable ({e}), falling back to in-memory store");
                    memory_state(config)
                }
            }
        }
        None => {
            info!("No database configured, using in-memory store");
            memory_state(config)
        }
    }
}

async fn connect_postgres(url: &str) -> Result<PgPool, sqlx::Error> {
    info!("Initializing PostgreSQL connection...");

    let mut opts: PgConnectOptions = url.parse()?;
    opts = opts.log_statements(LevelFilter::Debug)
        .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(opts)
        .await?;

    sqlx::migrate!("./migrations/postgres").run(&pool).await.map_err(|e| {
        sqlx::Error::Migrate(Box::new(e))
    })?;
    Ok(pool)
}

async fn connect_sqlite(url: &str) -> Result<SqlitePool, sqlx::Error> {
    info!("Initializing SQLite connection with WAL Mode...");

    let opts = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .foreign_keys(true)
        .log_statements(LevelFilter::Debug)
        .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(opts)
        .await?;

    sqlx::migrate!("./migrations/sqlite").run(&pool).await.map_err(|e| {
        sqlx::Error::Migrate(Box::new(e))
    })?;
    Ok(pool)
}

fn postgres_state(config: &Config, pool: PgPool) -> AppState {
    AppState {
        config: config.clone(),
        chain_repo: Arc::new(PostgresChainRepo::new(pool.clone())),
        hotel_repo: Arc::new(PostgresHotelRepo::new(pool.clone())),
        room_repo: Arc::new(PostgresRoomRepo::new(pool.clone())),
        client_repo: Arc::new(PostgresClientRepo::new(pool.clone())),
        employee_repo: Arc::new(PostgresEmployeeRepo::new(pool.clone())),
        reservation_repo: Arc::new(PostgresReservationRepo::new(pool.clone())),
        rental_repo: Arc::new(PostgresRentalRepo::new(pool.clone())),
        payment_repo: Arc::new(PostgresPaymentRepo::new(pool)),
    }
}

fn sqlite_state(config: &Config, pool: SqlitePool) -> AppState {
    AppState {
        config: config.clone(),
        chain_repo: Arc::new(SqliteChainRepo::new(pool.clone())),
        hotel_repo: Arc::new(SqliteHotelRepo::new(pool.clone())),
        room_repo: Arc::new(SqliteRoomRepo::new(pool.clone())),
        client_repo: Arc::new(SqliteClientRepo::new(pool.clone())),
        employee_repo: Arc::new(SqliteEmployeeRepo::new(pool.clone())),
        reservation_repo: Arc::new(SqliteReservationRepo::new(pool.clone())),
        rental_repo: Arc::new(SqliteRentalRepo::new(pool.clone())),
        payment_repo: Arc::new(SqlitePaymentRepo::new(pool)),
    }
}

fn memory_state(config: &Config) -> AppState {
    let store = Arc::new(MemoryStore::new());
    if config.seed_demo_data {
        store.seed_demo();
    }

    AppState {
        config: config.clone(),
        chain_repo: store.clone(),
        hotel_repo: store.clone(),
        room_repo: store.clone(),
        client_repo: store.clone(),
        employee_repo: store.clone(),
        reservation_repo: store.clone(),
        rental_repo: store.clone(),
        payment_repo: store,
    }
}
