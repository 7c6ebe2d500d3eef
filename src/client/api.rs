//! The transport seam between the expense list and the server.

use async_trait::async_trait;

use crate::{
    database_id::ExpenseId,
    client::{PreferencesError, Session},
    expense::{DeleteConfirmation, Expense, ExpensePage, ExpenseUpdate, NewExpense},
};

/// The errors a client call can fail with.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The session expired before the request was sent.
    #[error("the session has expired, please log in again")]
    SessionExpired,

    /// The server did not accept the credentials.
    #[error("not logged in or the credentials are invalid")]
    Unauthorized,

    /// The expense belongs to another user.
    #[error("not allowed to change this expense")]
    Forbidden,

    /// The expense does not exist.
    #[error("expense not found")]
    NotFound,

    /// The server or the form rejected a field.
    #[error("{0}")]
    Validation(String),

    /// The server reported a conflict, e.g. a duplicate email at registration.
    #[error("{0}")]
    Conflict(String),

    /// The server failed to handle the request.
    #[error("server error: {0}")]
    Server(String),

    /// The base URL of the server is not a valid URL.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// The request could not be sent or the response could not be read.
    #[error("could not reach the server: {0}")]
    Transport(#[from] reqwest::Error),

    /// The local preferences could not be read or written.
    #[error("{0}")]
    Preferences(#[from] PreferencesError),
}

impl ClientError {
    /// Whether the user has to log in again before retrying.
    pub fn requires_log_in(&self) -> bool {
        matches!(self, ClientError::SessionExpired | ClientError::Unauthorized)
    }
}

/// The expense operations a client can ask the server to perform.
#[async_trait]
pub trait ExpenseApi {
    /// Get one page of the session user's expenses.
    async fn list(
        &self,
        session: &Session,
        page: u64,
        limit: u64,
    ) -> Result<ExpensePage, ClientError>;

    /// Record a new expense.
    async fn create(
        &self,
        session: &Session,
        expense: &NewExpense,
    ) -> Result<Expense, ClientError>;

    /// Change some fields of an expense.
    async fn update(
        &self,
        session: &Session,
        id: ExpenseId,
        update: &ExpenseUpdate,
    ) -> Result<Expense, ClientError>;

    /// Delete an expense.
    async fn delete(
        &self,
        session: &Session,
        id: ExpenseId,
    ) -> Result<DeleteConfirmation, ClientError>;
}
