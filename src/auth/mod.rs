//! Caller authorization context.
//!
//! # Data Flow
//! ```text
//! Inbound request
//!     → external authenticator (API key / JWT verification)
//!     → AuthContext (application, API product names, scopes)
//!     → product::resolver (which products authorize this call)
//! ```
//!
//! Token validation is not performed here; the context is taken as given.

use serde::{Deserialize, Serialize};

/// Result of authenticating an inbound call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct AuthContext {
    /// Client (consumer key) that made the call.
    pub client_id: String,

    /// Developer application the client belongs to.
    pub application: String,

    pub developer_email: String,

    pub access_token: String,

    /// Names of the API products granted to the application, in grant order.
    pub api_products: Vec<String>,

    /// OAuth scopes granted to the token.
    pub scopes: Vec<String>,
}

impl AuthContext {
    /// Build a context that only carries product entitlements.
    pub fn with_products<I, S>(products: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            api_products: products.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}
