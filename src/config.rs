use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: Option<String>,
    pub port: u16,
    pub seed_demo_data: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: database_url_from_env(),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            seed_demo_data: env::var("SEED_DEMO_DATA")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true),
        }
    }
}

// DATABASE_URL wins; otherwise a Postgres URL is assembled from the discrete
// DB_* variables. Neither present means the in-memory store.
fn database_url_from_env() -> Option<String> {
    if let Ok(url) = env::var("DATABASE_URL") {
        return Some(url);
    }

    let host = env::var("DB_HOST").ok()?;
    let port = env::var("DB_PORT").unwrap_or_else(|_| "5432".to_string());
    let user = env::var("DB_USER").unwrap_or_else(|_| "postgres".to_string());
    let password = env::var("DB_PASSWORD").unwrap_or_default();
    let name = env::var("DB_NAME").unwrap_or_else(|_| "hotel".to_string());

    Some(format!("postgres://{}:{}@{}:{}/{}", user, password, host, port, name))
}
