use crate::catalog::CatalogClient;
use crate::config::Settings;
use crate::prices::CardmarketPrices;
use crate::store::StoreHandle;

/// Shared application state available to all route handlers via Axum's
/// `State` extractor.
pub struct AppState {
    /// Client for the upstream card catalog.
    pub catalog: CatalogClient,

    /// Wishlist storage. May be unavailable, in which case wishlist routes
    /// fail and the diagnostic route reports it.
    pub store: StoreHandle,

    /// Cardmarket placeholder.
    pub prices: CardmarketPrices,

    /// Settings captured at startup.
    pub settings: Settings,
}

impl AppState {
    /// Assemble the state for a running service from its settings.
    pub fn from_settings(settings: Settings) -> crate::Result<Self> {
        Ok(Self {
            catalog: CatalogClient::new()?,
            store: StoreHandle::from_settings(&settings),
            prices: CardmarketPrices::new(settings.cardmarket.clone()),
            settings,
        })
    }
}
