//! # Stockroom API
//!
//! REST server for per-account inventory, clients and invoicing.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           API Routes                                    │
//! │                                                                         │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────────┐│
//! │  │  Accounts      │  │  Inventory     │  │  Clients                   ││
//! │  │                │  │                │  │                            ││
//! │  │ • register     │  │ • list / get   │  │ • list / get               ││
//! │  │ • login        │  │ • create       │  │ • create                   ││
//! │  │   (+ token)    │  │ • update       │  │ • update                   ││
//! │  │                │  │ • delete       │  │ • delete                   ││
//! │  └────────────────┘  └────────────────┘  └────────────────────────────┘│
//! │                                                                         │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────┐            │
//! │  │  Invoices      │  │  Reports       │  │  Health        │            │
//! │  │                │  │                │  │                │            │
//! │  │ • list / get   │  │ • sales        │  │ • /health      │            │
//! │  │ • create       │  │ • summary      │  │                │            │
//! │  └────────────────┘  └────────────────┘  └────────────────┘            │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                      Infrastructure                               │  │
//! │  │  stockroom-store (JSON documents)  •  JWT sessions  •  CORS      │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! See [`config::ApiConfig`]. Environment variables use the `STOCKROOM_`
//! prefix:
//! - `STOCKROOM_PORT` - HTTP port (default: 3000)
//! - `STOCKROOM_DATA_DIR` - Document directory (default: ./data)
//! - `STOCKROOM_JWT_SECRET` - Secret for session tokens
//! - `STOCKROOM_SESSION_LIFETIME_SECS` - Token lifetime (default: 86400)
//! - `STOCKROOM_REQUIRE_AUTH` - Make bearer tokens mandatory (default: false)

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use stockroom_store::Store;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

// Re-exports
pub use auth::JwtManager;
pub use config::ApiConfig;
pub use error::{ApiError, ErrorCode};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub jwt: Arc<JwtManager>,
    pub config: Arc<ApiConfig>,
}

impl AppState {
    /// Builds the state from an opened store and the loaded configuration.
    pub fn new(store: Store, config: ApiConfig) -> Self {
        let jwt = JwtManager::new(config.jwt_secret.clone(), config.session_lifetime_secs);

        AppState {
            store,
            jwt: Arc::new(jwt),
            config: Arc::new(config),
        }
    }
}

/// Builds the HTTP router.
pub fn build_router(state: AppState) -> Router {
    use handlers::{account, client, invoice, product, report};

    Router::new()
        .route("/health", get(handlers::health))
        // Accounts
        .route("/api/register", post(account::register))
        .route("/api/login", post(account::login))
        // Inventory
        .route(
            "/api/inventory/{user_id}",
            get(product::list_products).post(product::create_product),
        )
        .route(
            "/api/inventory/{user_id}/{product_id}",
            get(product::get_product)
                .put(product::update_product)
                .delete(product::delete_product),
        )
        // Clients
        .route(
            "/api/clients/{user_id}",
            get(client::list_clients).post(client::create_client),
        )
        .route(
            "/api/clients/{user_id}/{client_id}",
            get(client::get_client)
                .put(client::update_client)
                .delete(client::delete_client),
        )
        // Invoices
        .route(
            "/api/invoices/{user_id}",
            get(invoice::list_invoices).post(invoice::create_invoice),
        )
        .route("/api/invoices/{user_id}/{invoice_id}", get(invoice::get_invoice))
        // Reports
        .route("/api/reports/sales/{user_id}", get(report::sales_report))
        .route("/api/reports/summary/{user_id}", get(report::sales_summary))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
