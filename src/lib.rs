//! Backend for a Pokémon TCG tracker.
//!
//! Proxies card and set lookups to the public Pokémon TCG catalog API, reserves
//! a route for Cardmarket prices, and keeps user wishlist items in a document
//! store backed by DuckDB.
//!
//! # Quick start
//!
//! ```no_run
//! use std::sync::Arc;
//! use pokemon_tcg_checker::{server, AppState, Settings};
//!
//! # async fn run() -> pokemon_tcg_checker::Result<()> {
//! let settings = Settings::from_env();
//! let listener = tokio::net::TcpListener::bind(("0.0.0.0", settings.port)).await?;
//! let state = Arc::new(AppState::from_settings(settings)?);
//! server::serve(listener, state).await?;
//! # Ok(())
//! # }
//! ```
//!
//! The store can also be used directly:
//!
//! ```
//! use pokemon_tcg_checker::collection::Collection;
//! use pokemon_tcg_checker::models::{WishlistItem, WishlistStatus};
//! use pokemon_tcg_checker::store::{Filter, MemoryStore};
//!
//! let store = MemoryStore::new();
//! let wishlist = Collection::<WishlistItem>::new(&store);
//! let id = wishlist.create(&WishlistItem::new("sv3-1", "Oddish")).unwrap();
//!
//! let watching = wishlist
//!     .query(&Filter::all().eq("status", WishlistStatus::Watching.as_str()))
//!     .unwrap();
//! assert_eq!(watching[0].id, id);
//! ```

pub mod catalog;
pub mod collection;
pub mod config;
pub mod connection;
pub mod error;
pub mod models;
pub mod prices;
pub mod schema;
pub mod server;
pub mod sql_builder;
pub mod store;

pub use catalog::CatalogClient;
pub use config::Settings;
pub use connection::Connection;
pub use error::{Result, TcgError};
pub use server::AppState;
pub use sql_builder::SqlBuilder;
pub use store::{DocumentStore, DuckDbStore, MemoryStore, StoreHandle};
