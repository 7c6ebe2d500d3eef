//! The credentials a client sends with every expense request.

use time::OffsetDateTime;

use crate::{auth::LogInResponse, client::ClientError};

/// A bearer token and the time it stops being accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    token: String,
    expires_at: OffsetDateTime,
}

impl Session {
    /// Create a session from a token issued by the server.
    pub fn new(token: impl Into<String>, expires_at: OffsetDateTime) -> Self {
        Self {
            token: token.into(),
            expires_at,
        }
    }

    /// When the server stops accepting the token.
    pub fn expires_at(&self) -> OffsetDateTime {
        self.expires_at
    }

    /// Whether the token has expired at `now`.
    pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
        now >= self.expires_at
    }

    /// Fail with [ClientError::SessionExpired] if the token has expired.
    pub fn ensure_active(&self) -> Result<(), ClientError> {
        if self.is_expired_at(OffsetDateTime::now_utc()) {
            return Err(ClientError::SessionExpired);
        }

        Ok(())
    }

    /// The token to send in the `Authorization` header.
    ///
    /// # Errors
    /// Returns [ClientError::SessionExpired] instead of a token the server would reject.
    pub fn bearer_token(&self) -> Result<&str, ClientError> {
        self.ensure_active()?;

        Ok(&self.token)
    }
}

impl From<LogInResponse> for Session {
    fn from(response: LogInResponse) -> Self {
        Self::new(response.token, response.expires_at)
    }
}

#[cfg(test)]
mod tests {
    use time::{Duration, OffsetDateTime, macros::datetime};

    use crate::client::{ClientError, Session};

    #[test]
    fn expires_at_the_expiry_time() {
        let session = Session::new("token", datetime!(2025-01-01 12:00 UTC));

        assert!(!session.is_expired_at(datetime!(2025-01-01 11:59:59 UTC)));
        assert!(session.is_expired_at(datetime!(2025-01-01 12:00 UTC)));
    }

    #[test]
    fn expired_session_has_no_token() {
        let session = Session::new("token", OffsetDateTime::now_utc() - Duration::minutes(1));

        let result = session.bearer_token();

        assert!(matches!(result, Err(ClientError::SessionExpired)));
    }

    #[test]
    fn active_session_gives_token() {
        let session = Session::new("token", OffsetDateTime::now_utc() + Duration::minutes(5));

        assert_eq!(session.bearer_token().unwrap(), "token");
    }
}
