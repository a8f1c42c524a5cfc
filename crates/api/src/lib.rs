//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes
//! - Tenant authentication middleware
//! - Error-to-response mapping

pub mod error;
pub mod middleware;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use ledgerlink_core::gateway::AccountingGateway;
use ledgerlink_core::import::ImportSynchronizer;
use ledgerlink_core::journal::JournalEntrySubmitter;
use ledgerlink_core::ledger::LedgerAccountStore;
use ledgerlink_shared::JwtService;

pub use error::ApiError;

/// Default upper bound for a single request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Stored ledger accounts.
    pub ledger_accounts: Arc<dyn LedgerAccountStore>,
    /// Chart-of-accounts import.
    pub importer: Arc<ImportSynchronizer>,
    /// Journal entry submission.
    pub submitter: Arc<JournalEntrySubmitter>,
    /// JWT service for resolving the tenant of a request.
    pub jwt_service: Arc<JwtService>,
    /// Upper bound for a single request.
    pub request_timeout: Duration,
}

impl AppState {
    /// Wires the import and submission flows over one gateway and store.
    #[must_use]
    pub fn new(
        gateway: Arc<dyn AccountingGateway>,
        store: Arc<dyn LedgerAccountStore>,
        jwt_service: Arc<JwtService>,
    ) -> Self {
        Self {
            importer: Arc::new(ImportSynchronizer::new(gateway.clone(), store.clone())),
            submitter: Arc::new(JournalEntrySubmitter::new(gateway)),
            ledger_accounts: store,
            jwt_service,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Replaces the importer, e.g. to change its page limit.
    #[must_use]
    pub fn with_importer(mut self, importer: ImportSynchronizer) -> Self {
        self.importer = Arc::new(importer);
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    let timeout = state.request_timeout;

    Router::new()
        .nest("/api", routes::api_routes_with_state(state.clone()))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
