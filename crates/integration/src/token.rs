//! Customer tokens for the integration platform.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};

use ledgerlink_core::gateway::GatewayError;
use ledgerlink_shared::Tenant;

/// Lifetime used when the configured one is out of range.
const DEFAULT_TTL_SECS: i64 = 7200;

/// Claims identifying the customer to the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerClaims {
    /// Customer id, the tenant identifier.
    pub id: String,
    /// Customer display name.
    pub name: String,
    /// Workspace key.
    pub iss: String,
    /// Expiration time (Unix timestamp).
    pub exp: i64,
}

/// Signs customer tokens with the workspace secret.
#[derive(Clone)]
pub struct CustomerTokenIssuer {
    workspace_key: String,
    encoding_key: EncodingKey,
    ttl: Duration,
}

impl std::fmt::Debug for CustomerTokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomerTokenIssuer")
            .field("workspace_key", &self.workspace_key)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl CustomerTokenIssuer {
    /// Creates an issuer for a workspace.
    #[must_use]
    pub fn new(workspace_key: &str, workspace_secret: &str, ttl_secs: u64) -> Self {
        Self {
            workspace_key: workspace_key.to_string(),
            encoding_key: EncodingKey::from_secret(workspace_secret.as_bytes()),
            ttl: i64::try_from(ttl_secs)
                .ok()
                .and_then(Duration::try_seconds)
                .unwrap_or_else(|| Duration::seconds(DEFAULT_TTL_SECS)),
        }
    }

    /// Builds the claims for `tenant`.
    #[must_use]
    pub fn claims_for(&self, tenant: &Tenant) -> CustomerClaims {
        CustomerClaims {
            id: tenant.id.as_str().to_string(),
            name: tenant.display_name().to_string(),
            iss: self.workspace_key.clone(),
            exp: (Utc::now() + self.ttl).timestamp(),
        }
    }

    /// Mints a token for `tenant`.
    ///
    /// # Errors
    ///
    /// Returns a status-less `GatewayError` if signing fails.
    pub fn issue(&self, tenant: &Tenant) -> Result<String, GatewayError> {
        encode(
            &Header::new(Algorithm::HS512),
            &self.claims_for(tenant),
            &self.encoding_key,
        )
        .map_err(|e| GatewayError::new(format!("Failed to sign integration token: {e}")))
    }
}
