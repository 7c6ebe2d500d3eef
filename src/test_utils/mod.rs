#![allow(missing_docs)]

use std::str::FromStr;

use email_address::EmailAddress;
use rusqlite::Connection;
use time::Duration;

use crate::{
    AppState, PaginationConfig, PasswordHash, ValidatedPassword,
    auth::issue_token,
    db::initialize,
    user::{User, create_user},
};

/// The lowest cost bcrypt accepts, so tests do not spend seconds hashing.
pub(crate) const TEST_PASSWORD_COST: u32 = 4;

pub(crate) fn must_create_test_connection() -> Connection {
    let connection =
        Connection::open_in_memory().expect("could not create in-memory SQLite database");
    initialize(&connection).expect("could not initialize test DB");

    connection
}

pub(crate) fn must_create_test_state() -> AppState {
    let connection =
        Connection::open_in_memory().expect("could not create in-memory SQLite database");
    let mut state = AppState::new(connection, "42", PaginationConfig::default())
        .expect("could not create app state");
    state.password_cost = TEST_PASSWORD_COST;

    state
}

/// Insert a user directly, skipping the password strength check.
pub(crate) fn must_insert_user(email: &str, password: &str, connection: &Connection) -> User {
    let password_hash = PasswordHash::new(
        ValidatedPassword::new_unchecked(password),
        TEST_PASSWORD_COST,
    )
    .expect("could not hash test password");

    create_user(
        EmailAddress::from_str(email).expect("invalid test email"),
        password_hash,
        connection,
    )
    .expect("could not create test user")
}

pub(crate) fn must_create_user(email: &str, password: &str, state: &AppState) -> User {
    let connection = state
        .db_connection
        .lock()
        .expect("could not acquire database lock");

    must_insert_user(email, password, &connection)
}

pub(crate) fn must_issue_token(user: &User, state: &AppState) -> String {
    issue_token(user.id, Duration::minutes(5), &state.jwt_keys)
        .expect("could not issue test token")
        .token
}
