use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub service_token: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        // Issued out-of-band by the session shell; mint one with `cargo run --bin tokengen`.
        let service_token = env::var("SERVICE_TOKEN")?;

        Ok(Self {
            database_url,
            bind_addr,
            service_token,
        })
    }
}
