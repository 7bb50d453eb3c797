//! Bearer-token access.
//!
//! Reads are synchronous and absence is a normal state, not an error.

use std::sync::{Arc, PoisonError, RwLock};

pub trait CredentialStore: Send + Sync {
    /// Current bearer token, or `None` when the user is not signed in.
    fn token(&self) -> Option<String>;
}

impl<T: CredentialStore + ?Sized> CredentialStore for Arc<T> {
    fn token(&self) -> Option<String> {
        (**self).token()
    }
}

/// Process-local token holder, settable at runtime.
#[derive(Debug, Default)]
pub struct MemoryCredentials {
    token: RwLock<Option<String>>,
}

impl MemoryCredentials {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }

    pub fn set(&self, token: impl Into<String>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token.into());
    }

    pub fn clear(&self) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl CredentialStore for MemoryCredentials {
    fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .filter(|t| !t.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_clear() {
        let creds = MemoryCredentials::new();
        assert_eq!(creds.token(), None);

        creds.set("abc");
        assert_eq!(creds.token().as_deref(), Some("abc"));

        creds.clear();
        assert_eq!(creds.token(), None);
    }

    #[test]
    fn blank_token_counts_as_absent() {
        let creds = MemoryCredentials::with_token("  ");
        assert_eq!(creds.token(), None);
    }
}
