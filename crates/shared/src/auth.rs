//! Bearer token claims identifying the tenant behind a request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Tenant, TenantId};

/// JWT claims for access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (customer/tenant ID).
    pub sub: String,
    /// Customer display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a tenant.
    #[must_use]
    pub fn new(tenant: &Tenant, expires_at: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            sub: tenant.id.to_string(),
            name: tenant.name.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Resolves the tenant named by these claims.
    ///
    /// Returns `None` when the subject is blank.
    #[must_use]
    pub fn tenant(&self) -> Option<Tenant> {
        let id = TenantId::new(&self.sub)?;
        Some(Tenant {
            id,
            name: self.name.clone().filter(|n| !n.trim().is_empty()),
        })
    }
}
