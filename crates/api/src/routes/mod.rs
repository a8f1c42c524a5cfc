//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::auth::auth_middleware};

pub mod health;
pub mod journal_entries;
pub mod ledger_accounts;

/// Creates the API router with protected routes that need state for middleware.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    // Protected routes that require a resolved tenant
    let protected_routes = Router::new()
        .merge(ledger_accounts::routes())
        .merge(journal_entries::routes())
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(health::routes())
        .merge(protected_routes)
}
