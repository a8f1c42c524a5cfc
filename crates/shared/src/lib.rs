//! Shared types and configuration for LedgerLink.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs and the tenant identity resolved from a request
//! - Bearer token claims and validation
//! - Configuration management

pub mod auth;
pub mod config;
pub mod jwt;
pub mod types;


pub use auth::Claims;
pub use config::AppConfig;
pub use jwt::{JwtConfig, JwtError, JwtService};
pub use types::{LedgerAccountId, Tenant, TenantId};
