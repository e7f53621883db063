use std::sync::{PoisonError, RwLock};

/// Session-credential capability consulted once per grading attempt.
pub trait CredentialSource: Send + Sync {
    fn is_authenticated(&self) -> bool;

    /// Bearer token for member requests, if any.
    fn bearer_token(&self) -> Option<String> {
        None
    }
}

/// In-memory holder for the signed-in user's bearer token.
#[derive(Debug, Default)]
pub struct SessionCredentials {
    token: RwLock<Option<String>>,
}

impl SessionCredentials {
    #[must_use]
    pub fn guest() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        let credentials = Self::default();
        credentials.sign_in(token);
        credentials
    }

    /// Blank tokens are treated as signing out.
    pub fn sign_in(&self, token: impl Into<String>) {
        let token = token.into();
        let mut guard = self.token.write().unwrap_or_else(PoisonError::into_inner);
        *guard = (!token.trim().is_empty()).then_some(token);
    }

    pub fn sign_out(&self) {
        let mut guard = self.token.write().unwrap_or_else(PoisonError::into_inner);
        *guard = None;
    }
}

impl CredentialSource for SessionCredentials {
    fn is_authenticated(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn bearer_token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
