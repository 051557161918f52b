//! Cardmarket price lookup placeholder.
//!
//! Cardmarket requires OAuth 1.0a signed requests. No signing is implemented,
//! so every lookup fails with [`TcgError::NotImplemented`]; only the message
//! differs depending on whether credentials were supplied.

use serde_json::Value;

use crate::config::CARDMARKET_API_BASE;
use crate::error::{Result, TcgError};

pub const NOT_CONFIGURED: &str =
    "Cardmarket API not configured. Provide OAuth credentials to enable.";
pub const PENDING_IMPLEMENTATION: &str = "Cardmarket integration pending implementation.";

/// OAuth credentials for the Cardmarket API, each read from its own
/// environment variable.
#[derive(Clone, Default)]
pub struct CardmarketCredentials {
    pub app_token: Option<String>,
    pub app_secret: Option<String>,
    pub access_token: Option<String>,
    pub access_token_secret: Option<String>,
}

impl CardmarketCredentials {
    /// The app token alone decides whether the integration counts as configured.
    pub fn is_configured(&self) -> bool {
        self.app_token.is_some()
    }
}

impl std::fmt::Debug for CardmarketCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mask = |v: &Option<String>| if v.is_some() { "<set>" } else { "<unset>" };
        f.debug_struct("CardmarketCredentials")
            .field("app_token", &mask(&self.app_token))
            .field("app_secret", &mask(&self.app_secret))
            .field("access_token", &mask(&self.access_token))
            .field("access_token_secret", &mask(&self.access_token_secret))
            .finish()
    }
}

/// Price lookups against Cardmarket.
#[derive(Debug, Clone)]
pub struct CardmarketPrices {
    credentials: CardmarketCredentials,
}

impl CardmarketPrices {
    pub fn new(credentials: CardmarketCredentials) -> Self {
        Self { credentials }
    }

    pub fn is_configured(&self) -> bool {
        self.credentials.is_configured()
    }

    /// Look up prices for `card_id`. Always fails.
    pub fn price(&self, card_id: &str) -> Result<Value> {
        if !self.credentials.is_configured() {
            return Err(TcgError::NotImplemented(NOT_CONFIGURED.to_string()));
        }
        log::debug!(
            "Cardmarket lookup for {} not sent to {}: OAuth signing unavailable",
            card_id,
            CARDMARKET_API_BASE
        );
        Err(TcgError::NotImplemented(PENDING_IMPLEMENTATION.to_string()))
    }
}
