use std::fmt;

use crate::error::{Result, SignError};

/// Short-lived signing material for one operation.
///
/// Construction rejects empty fields, so a [`Credential`] in hand is always
/// complete — a request signed with partial material would be rejected by the
/// remote side with no useful diagnostics, so the failure surfaces here
/// instead. Never persisted; dropped with the operation that carried it.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    access_key_id:     String,
    secret_access_key: String,
    session_token:     String,
}

impl Credential {
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        session_token: impl Into<String>,
    ) -> Result<Self> {
        let access_key_id = access_key_id.into();
        let secret_access_key = secret_access_key.into();
        let session_token = session_token.into();

        if access_key_id.is_empty() {
            return Err(SignError::MissingCredential("access_key_id"));
        }
        if secret_access_key.is_empty() {
            return Err(SignError::MissingCredential("secret_access_key"));
        }
        if session_token.is_empty() {
            return Err(SignError::MissingCredential("session_token"));
        }

        Ok(Self {
            access_key_id,
            secret_access_key,
            session_token,
        })
    }

    pub fn access_key_id(&self) -> &str { &self.access_key_id }

    /// The session token is carried as an `x-amz-security-token` header by the
    /// caller; it never enters key derivation.
    pub fn session_token(&self) -> &str { &self.session_token }

    pub(crate) fn secret_access_key(&self) -> &str { &self.secret_access_key }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("session_token", &"<redacted>")
            .finish()
    }
}
