use std::env;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use axum::http::HeaderValue;

/// Which document store backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    MongoDb,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "mongodb" => Ok(StoreBackend::MongoDb),
            "memory" => Ok(StoreBackend::Memory),
            other => bail!("STORE_BACKEND must be one of: mongodb, memory, got '{}'", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub store_backend: StoreBackend,
    pub mongodb_uri: Option<String>,
    pub mongodb_database: String,
    pub service_port: u16,
    pub service_host: String,
    pub cors_origin: HeaderValue,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store_backend = lookup("STORE_BACKEND")
            .unwrap_or_else(|| "mongodb".to_string())
            .parse::<StoreBackend>()?;

        let mongodb_uri = lookup("MONGODB_URI");
        if store_backend == StoreBackend::MongoDb && mongodb_uri.is_none() {
            bail!("MONGODB_URI environment variable is required when STORE_BACKEND=mongodb");
        }

        let mongodb_database =
            lookup("MONGODB_DATABASE").unwrap_or_else(|| "workforce".to_string());

        let service_port = lookup("SERVICE_PORT")
            .unwrap_or_else(|| "8000".to_string())
            .parse::<u16>()
            .context("SERVICE_PORT must be a valid port number (0-65535)")?;

        let service_host = lookup("SERVICE_HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let cors_origin =
            lookup("CORS_ORIGIN").unwrap_or_else(|| "http://localhost:3000".to_string());
        let cors_origin = HeaderValue::from_str(&cors_origin)
            .context("CORS_ORIGIN must be a valid origin header value")?;

        Ok(Config {
            store_backend,
            mongodb_uri,
            mongodb_database,
            service_port,
            service_host,
            cors_origin,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.service_host, self.service_port)
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Store backend: {:?}", self.store_backend);
        if let Some(uri) = &self.mongodb_uri {
            tracing::info!("  MongoDB URI: {}", redact_credentials(uri));
        }
        tracing::info!("  MongoDB database: {}", self.mongodb_database);
        tracing::info!("  CORS origin: {:?}", self.cors_origin);
        tracing::info!("  Service listening on: {}", self.bind_addr());
    }
}

/// Hide the `user:password@` part of a connection string
fn redact_credentials(uri: &str) -> String {
    match (uri.find("://"), uri.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://***@{}", &uri[..scheme_end], &uri[at + 1..])
        }
        _ => uri.to_string(),
    }
}
