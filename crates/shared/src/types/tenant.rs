//! Tenant identity resolved from an authenticated request.

use serde::{Deserialize, Serialize};

use super::id::TenantId;

/// The customer on whose behalf a request runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    /// Customer identifier.
    pub id: TenantId,
    /// Display name, if the auth collaborator provided one.
    pub name: Option<String>,
}

impl Tenant {
    /// Creates a tenant without a display name.
    #[must_use]
    pub const fn new(id: TenantId) -> Self {
        Self { id, name: None }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Display name, falling back to the identifier.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or_else(|| self.id.as_str())
    }
}
