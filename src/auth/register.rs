//! The route for registering a new user.

use std::{
    str::FromStr,
    sync::{Arc, Mutex},
};

use axum::{
    Json,
    extract::{FromRef, State, rejection::JsonRejection},
    http::StatusCode,
};
use email_address::EmailAddress;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    auth::UserID,
    password::{PasswordHash, ValidatedPassword},
    user::create_user,
};

/// The state needed to register a user.
#[derive(Debug, Clone)]
pub struct RegistrationState {
    /// The bcrypt cost for hashing the new user's password.
    pub password_cost: u32,
    /// The database connection for storing users.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for RegistrationState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            password_cost: state.password_cost,
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The data sent to register a new user.
#[derive(Clone, Deserialize)]
pub struct RegisterData {
    /// The email the user will log in with.
    pub email: String,
    /// The password the user will log in with.
    pub password: String,
}

/// The user that was registered, minus the password hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisteredUser {
    /// The new user's ID.
    pub id: UserID,
    /// The new user's email.
    pub email: String,
}

/// A route handler for creating a new user.
///
/// Responds with `201 Created` and the new user's ID and email.
///
/// # Errors
///
/// Returns:
/// - [Error::InvalidEmail] if the email is not a valid address,
/// - [Error::TooWeak] if the password is too easy to guess,
/// - [Error::DuplicateEmail] if the email is already registered,
/// - [Error::Validation] if the body is not a valid [RegisterData],
/// - or a server error if the password could not be hashed or stored.
pub async fn register_user(
    State(state): State<RegistrationState>,
    payload: Result<Json<RegisterData>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisteredUser>), Error> {
    let Json(data) = payload?;
    let email = EmailAddress::from_str(data.email.trim())
        .map_err(|error| Error::InvalidEmail(error.to_string()))?;
    let password = ValidatedPassword::new(&data.password, &[email.as_str()])?;
    let password_hash = PasswordHash::new(password, state.password_cost)?;

    let connection = state.db_connection.lock().map_err(|error| {
        tracing::error!("could not acquire database lock: {error}");
        Error::DatabaseLockError
    })?;
    let user = create_user(email, password_hash, &connection)?;
    tracing::info!("Registered user {}", user.id);

    Ok((
        StatusCode::CREATED,
        Json(RegisteredUser {
            id: user.id,
            email: user.email.to_string(),
        }),
    ))
}
