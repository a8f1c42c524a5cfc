//! Integration platform client for LedgerLink.
//!
//! Implements [`ledgerlink_core::gateway::AccountingGateway`] over the
//! platform's REST API. Every request is authenticated with a short-lived
//! customer token minted from the workspace credentials, so the platform
//! scopes connections and actions to the tenant.

mod client;
mod token;

pub use client::IntegrationClient;
pub use token::{CustomerClaims, CustomerTokenIssuer};
