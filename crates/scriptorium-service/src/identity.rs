//! Identity resolution: verified token claims to a [`Principal`].
//!
//! Credential verification itself (signature, expiry) is the external
//! identity collaborator's job; this resolver only decides which
//! principal a set of verified claims denotes. A subject that resolves
//! to nothing is an authentication failure (`Unauthorized`), never a
//! "not found" on the resource being accessed.

use std::sync::Arc;

use uuid::Uuid;

use scriptorium_core::{
    AccountStore, Error, Principal, Result, Role, RootConfig, TokenClaims,
};

/// Resolves verified token claims into a principal. No side effects.
pub struct IdentityResolver {
    accounts: Arc<dyn AccountStore>,
    root: RootConfig,
}

impl IdentityResolver {
    pub fn new(accounts: Arc<dyn AccountStore>, root: RootConfig) -> Self {
        Self { accounts, root }
    }

    /// Resolve claims to a principal.
    ///
    /// The root principal requires BOTH the configured subject marker and
    /// the admin role in the claims; anything else must resolve to a
    /// stored account.
    pub async fn resolve(&self, claims: &TokenClaims) -> Result<Principal> {
        if claims.subject == self.root.subject {
            if claims.role == Role::Admin {
                return Ok(Principal::Root);
            }
            return Err(Error::Unauthorized(
                "root subject without admin role".to_string(),
            ));
        }

        let id = Uuid::parse_str(&claims.subject)
            .map_err(|_| Error::Unauthorized("malformed subject claim".to_string()))?;

        match self.accounts.fetch(id).await? {
            Some(account) => Ok(Principal::Account(account)),
            None => Err(Error::Unauthorized("unknown account".to_string())),
        }
    }
}
