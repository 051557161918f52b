//! Runtime settings and fixed service constants.
//!
//! Settings come from the process environment (after `dotenv` has loaded any
//! `.env` file). Empty variables are treated the same as unset ones.

use std::env;
use std::time::Duration;

use crate::prices::CardmarketCredentials;

pub const PTCG_API_BASE: &str = "https://api.pokemontcg.io/v2";
pub const CARDMARKET_API_BASE: &str = "https://api.cardmarket.com/ws/v2.0";

/// Timeout applied to every upstream catalog request.
pub const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(20);

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_CARDS_PAGE_SIZE: i64 = 24;
pub const DEFAULT_SETS_PAGE_SIZE: i64 = 50;

pub const DEFAULT_PORT: u16 = 8000;

pub const ENV_PORT: &str = "PORT";
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_DATABASE_NAME: &str = "DATABASE_NAME";
pub const ENV_CARDMARKET_APP_TOKEN: &str = "CARDMARKET_APP_TOKEN";
pub const ENV_CARDMARKET_APP_SECRET: &str = "CARDMARKET_APP_SECRET";
pub const ENV_CARDMARKET_ACCESS_TOKEN: &str = "CARDMARKET_ACCESS_TOKEN";
pub const ENV_CARDMARKET_ACCESS_TOKEN_SECRET: &str = "CARDMARKET_ACCESS_TOKEN_SECRET";

/// Process-wide settings, read once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub database_url: Option<String>,
    pub database_name: Option<String>,
    pub cardmarket: CardmarketCredentials,
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup.
    ///
    /// Lets tests describe an environment without mutating the real one.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get(ENV_PORT) {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                log::warn!("Ignoring invalid {}={:?}; using {}", ENV_PORT, raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        Self {
            port,
            database_url: get(ENV_DATABASE_URL),
            database_name: get(ENV_DATABASE_NAME),
            cardmarket: CardmarketCredentials {
                app_token: get(ENV_CARDMARKET_APP_TOKEN),
                app_secret: get(ENV_CARDMARKET_APP_SECRET),
                access_token: get(ENV_CARDMARKET_ACCESS_TOKEN),
                access_token_secret: get(ENV_CARDMARKET_ACCESS_TOKEN_SECRET),
            },
        }
    }
}
