//! API credential handling
//!
//! The Groq API key is read from the environment exactly once per process and
//! passed explicitly into the client. It is never persisted and never logged;
//! the `Debug` output is redacted.

use std::fmt;

use once_cell::sync::Lazy;
use thiserror::Error;

/// Environment variable holding the API key
pub const CREDENTIAL_ENV_VAR: &str = "GROQ_API_KEY";

/// Credential errors, shown to the user as configuration problems
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error("{CREDENTIAL_ENV_VAR} environment variable not found. Set it in your terminal before launching the app.")]
    NotSet,
    #[error("{CREDENTIAL_ENV_VAR} is set but empty.")]
    Empty,
}

/// The API key authorizing inference calls
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Read the credential from [`CREDENTIAL_ENV_VAR`]
    pub fn from_env() -> Result<Self, CredentialError> {
        Self::from_env_var(CREDENTIAL_ENV_VAR)
    }

    fn from_env_var(name: &str) -> Result<Self, CredentialError> {
        match std::env::var(name) {
            Ok(value) if value.trim().is_empty() => Err(CredentialError::Empty),
            Ok(value) => Ok(Self(value)),
            Err(_) => Err(CredentialError::NotSet),
        }
    }

    /// The raw secret, for the Authorization header only
    pub(crate) fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

static CREDENTIAL: Lazy<Result<Credential, CredentialError>> = Lazy::new(Credential::from_env);

/// Process-wide credential, read from the environment on first access
pub fn credential() -> Result<&'static Credential, CredentialError> {
    CREDENTIAL.as_ref().map_err(|e| e.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_var_is_not_set() {
        assert_eq!(
            Credential::from_env_var("DATALM_TEST_KEY_MISSING").unwrap_err(),
            CredentialError::NotSet
        );
    }

    #[test]
    fn test_empty_var_is_distinct_from_missing() {
        std::env::set_var("DATALM_TEST_KEY_EMPTY", "   ");
        assert_eq!(
            Credential::from_env_var("DATALM_TEST_KEY_EMPTY").unwrap_err(),
            CredentialError::Empty
        );
    }

    #[test]
    fn test_present_var_loads() {
        std::env::set_var("DATALM_TEST_KEY_SET", "gsk_test");
        let cred = Credential::from_env_var("DATALM_TEST_KEY_SET").unwrap();
        assert_eq!(cred.secret(), "gsk_test");
    }

    #[test]
    fn test_debug_never_leaks_the_key() {
        std::env::set_var("DATALM_TEST_KEY_DEBUG", "gsk_super_secret");
        let cred = Credential::from_env_var("DATALM_TEST_KEY_DEBUG").unwrap();
        let rendered = format!("{:?}", cred);
        assert_eq!(rendered, "Credential(***)");
        assert!(!rendered.contains("secret"));
    }
}
