//! Shared handler state: the credential store and the session issuer.

use crate::{accounts::Credentials, session::SessionIssuer};

#[derive(Debug)]
pub struct AuthState {
    credentials: Credentials,
    sessions: SessionIssuer,
}

impl AuthState {
    #[must_use]
    pub fn new(credentials: Credentials, sessions: SessionIssuer) -> Self {
        Self {
            credentials,
            sessions,
        }
    }

    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    #[must_use]
    pub fn sessions(&self) -> &SessionIssuer {
        &self.sessions
    }
}
