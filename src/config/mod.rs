use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Name of the positions table; created on startup if missing.
    pub table_name: String,
    /// Externally visible base URL, embedded in the openapi document.
    pub api_base_url: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let port: u16 = env::var("PORT").unwrap_or_else(|_| "8080".into()).parse()?;

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port,
            table_name: env::var("TABLE_NAME").unwrap_or_else(|_| "positions".into()),
            api_base_url: env::var("API_BASE_URL")
                .unwrap_or_else(|_| format!("http://localhost:{port}")),
        })
    }
}
