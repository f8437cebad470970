//! Root principal configuration.
//!
//! The privileged principal's identity is asserted solely by token claims
//! matching credentials sourced from process configuration; it has no
//! stored account. The credentials live in one struct injected at startup
//! rather than being read from the environment at use sites.

use serde::{Deserialize, Serialize};
use std::env;

use crate::defaults;
use crate::error::{Error, Result};

/// Configuration for the privileged root principal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootConfig {
    /// Token subject that identifies the root principal.
    pub subject: String,
    /// Display name recorded in the activity trail.
    pub display_name: String,
    /// Login email, compared case-insensitively by the credential layer.
    /// `None` disables root login entirely.
    pub email: Option<String>,
    /// Login password for the credential layer.
    pub password: Option<String>,
}

impl Default for RootConfig {
    fn default() -> Self {
        Self {
            subject: defaults::ROOT_SUBJECT.to_string(),
            display_name: defaults::ROOT_DISPLAY_NAME.to_string(),
            email: None,
            password: None,
        }
    }
}

impl RootConfig {
    /// Load from `ADMIN_EMAIL`/`ADMIN_PASSWORD` environment variables.
    ///
    /// Both unset is valid: root access is then disabled and only stored
    /// admin accounts retain admin rights.
    pub fn from_env() -> Self {
        Self {
            subject: defaults::ROOT_SUBJECT.to_string(),
            display_name: defaults::ROOT_DISPLAY_NAME.to_string(),
            email: env::var("ADMIN_EMAIL").ok().filter(|v| !v.is_empty()),
            password: env::var("ADMIN_PASSWORD").ok().filter(|v| !v.is_empty()),
        }
    }

    /// True when root login is configured.
    pub fn enabled(&self) -> bool {
        self.email.is_some() && self.password.is_some()
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.subject.is_empty() {
            return Err(Error::Config("root subject cannot be empty".to_string()));
        }
        if self.email.is_some() != self.password.is_some() {
            return Err(Error::Config(
                "root email and password must be set together".to_string(),
            ));
        }
        Ok(())
    }

    /// True when `email` is the reserved root login email.
    ///
    /// Used by the registration layer to refuse account creation under
    /// the root identity.
    pub fn is_reserved_email(&self, email: &str) -> bool {
        self.email
            .as_deref()
            .is_some_and(|root| root.eq_ignore_ascii_case(email))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> RootConfig {
        RootConfig {
            subject: "admin".to_string(),
            display_name: "Administrator".to_string(),
            email: Some("root@example.com".to_string()),
            password: Some("hunter2".to_string()),
        }
    }

    #[test]
    fn test_default_is_disabled() {
        let config = RootConfig::default();
        assert!(!config.enabled());
        assert_eq!(config.subject, "admin");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_configured_is_enabled_and_valid() {
        let config = configured();
        assert!(config.enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_partial_credentials() {
        let mut config = configured();
        config.password = None;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_subject() {
        let mut config = configured();
        config.subject = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_reserved_email_is_case_insensitive() {
        let config = configured();
        assert!(config.is_reserved_email("ROOT@example.COM"));
        assert!(!config.is_reserved_email("other@example.com"));
    }

    #[test]
    fn test_reserved_email_when_disabled() {
        let config = RootConfig::default();
        assert!(!config.is_reserved_email("anything@example.com"));
    }
}
