//! # PDV Server
//!
//! HTTP/JSON API for the point-of-sale: operator login, the product catalog,
//! checkout, till movements and close-of-day.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         PDV API Server                                  │
//! │                                                                         │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────────┐│
//! │  │  auth          │  │  catalog       │  │  sales / cash              ││
//! │  │                │  │                │  │                            ││
//! │  │ • login        │  │ • categories   │  │ • checkout                 ││
//! │  │                │  │ • products     │  │ • history by date          ││
//! │  └────────────────┘  └────────────────┘  └────────────────────────────┘│
//! │                                                                         │
//! │  ┌────────────────┐                                                     │
//! │  │  register      │         AppState (cloned into every handler)        │
//! │  │                │         ├── Store        (Arc inside)               │
//! │  │ • summary      │         └── Credentials  (argon2)                   │
//! │  │ • close        │                                                     │
//! │  └────────────────┘                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables (or `pdv.toml`):
//! - `PDV_BIND_ADDR` - listen interface (default: 0.0.0.0)
//! - `PDV_HTTP_PORT` - HTTP port (default: 5000)
//! - `PDV_SEED_FIXTURES` - load demo data at startup (default: true)

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod routes;

use std::sync::Arc;

use axum::{http::Uri, Router};
use tracing::info;

use pdv_core::{CoreResult, Credentials};
use pdv_store::{fixtures, Store, StoreResult};

// Re-exports
pub use auth::Argon2Credentials;
pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub credentials: Arc<dyn Credentials>,
    /// Hash checked when a login names no known user, so both rejections
    /// cost one verification.
    pub decoy_hash: Arc<str>,
}

impl AppState {
    pub fn new(store: Store, credentials: Arc<dyn Credentials>) -> CoreResult<Self> {
        let decoy_hash = credentials.hash("pdv-decoy-password")?.into();
        Ok(AppState {
            store,
            credentials,
            decoy_hash,
        })
    }

    /// A fresh store, optionally loaded with the demo fixtures.
    pub async fn bootstrap(credentials: Arc<dyn Credentials>, seed: bool) -> StoreResult<Self> {
        let store = Store::new();
        if seed {
            let counts = fixtures::seed(&store, credentials.as_ref()).await?;
            info!(?counts, "Fixtures loaded");
        }
        Ok(AppState::new(store, credentials)?)
    }
}

/// The full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .nest("/api", routes::api_router())
        .fallback(not_found)
        .with_state(state)
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}
