use std::env;
use thiserror::Error;

use crate::domain::services::id_allocator::{DEFAULT_BACKFILL_MAX_RETRIES, DEFAULT_MAX_RETRIES};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{0} must be a number, got {1:?}")]
    Invalid(&'static str, String),
}

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub id_max_retries: u32,
    pub backfill_max_retries: u32,
    pub paystack_secret_key: String,
    pub admin_api_key: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?,
            port: parse_or("PORT", 3000)?,
            id_max_retries: parse_or("ID_MAX_RETRIES", DEFAULT_MAX_RETRIES)?,
            backfill_max_retries: parse_or("BACKFILL_MAX_RETRIES", DEFAULT_BACKFILL_MAX_RETRIES)?,
            // Left empty, the webhook and operator routes reject every request.
            paystack_secret_key: env::var("PAYSTACK_SECRET_KEY").unwrap_or_default(),
            admin_api_key: env::var("ADMIN_API_KEY").unwrap_or_default(),
        })
    }
}

fn parse_or<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(key, raw)),
        Err(_) => Ok(default),
    }
}
