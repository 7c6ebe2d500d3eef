//! The route for deleting an expense.

use axum::{
    Extension, Json,
    extract::{Path, State, rejection::PathRejection},
};

use crate::{
    Error,
    database_id::ExpenseId,
    expense::service::{DeleteConfirmation, ExpenseState, delete_expense},
    user::UserID,
};

/// Handler for `DELETE /expenses/{expense_id}`.
///
/// # Errors
/// Returns [Error::NotFound] for an unknown ID and [Error::NotAuthorized] if
/// the caller does not own the expense. A non-numeric ID is [Error::Validation].
pub async fn delete_expense_endpoint(
    State(state): State<ExpenseState>,
    Extension(user_id): Extension<UserID>,
    expense_id: Result<Path<ExpenseId>, PathRejection>,
) -> Result<Json<DeleteConfirmation>, Error> {
    let Path(expense_id) = expense_id?;
    let connection = state.connection()?;

    delete_expense(user_id, expense_id, &connection).map(Json)
}

#[cfg(test)]
mod tests {
    use axum::{Extension, Router, http::StatusCode, routing::delete};
    use axum_test::TestServer;

    use crate::{
        AppState, Error,
        database_id::ExpenseId,
        endpoints::{self, format_endpoint},
        expense::{
            core::{NewExpense, get_expense},
            delete_endpoint::delete_expense_endpoint,
            service::{DeleteConfirmation, ExpenseState, create_expense},
        },
        test_utils::{must_create_test_state, must_create_user},
        user::UserID,
    };

    /// Returns a server that acts as `caller_email` along with that user's ID.
    fn must_create_server(caller_email: &str, state: &AppState) -> (TestServer, UserID) {
        let caller = must_create_user(caller_email, "hunter2", state);
        let expense_state = ExpenseState {
            db_connection: state.db_connection.clone(),
            pagination_config: state.pagination_config.clone(),
        };
        let app = Router::new()
            .route(endpoints::EXPENSE, delete(delete_expense_endpoint))
            .layer(Extension(caller.id))
            .with_state(expense_state);

        (
            TestServer::try_new(app).expect("Could not create test server."),
            caller.id,
        )
    }

    fn must_create_expense(owner: UserID, state: &AppState) -> ExpenseId {
        let connection = state.db_connection.lock().unwrap();

        create_expense(
            owner,
            NewExpense {
                description: "Movie".to_owned(),
                amount: 15.0,
                category: "Entertainment".to_owned(),
                date: None,
            },
            &connection,
        )
        .unwrap()
        .id
    }

    #[tokio::test]
    async fn deletes_own_expense() {
        let state = must_create_test_state();
        let (server, caller_id) = must_create_server("bar@baz.qux", &state);
        let expense_id = must_create_expense(caller_id, &state);

        let response = server
            .delete(&format_endpoint(endpoints::EXPENSE, expense_id))
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.json::<DeleteConfirmation>().message,
            "Expense removed"
        );
        let connection = state.db_connection.lock().unwrap();
        assert_eq!(get_expense(expense_id, &connection), Err(Error::NotFound));
    }

    #[tokio::test]
    async fn other_users_expense_is_forbidden_and_kept() {
        let state = must_create_test_state();
        let (server, _) = must_create_server("bar@baz.qux", &state);
        let owner = must_create_user("foo@bar.baz", "hunter2", &state);
        let expense_id = must_create_expense(owner.id, &state);

        server
            .delete(&format_endpoint(endpoints::EXPENSE, expense_id))
            .await
            .assert_status(StatusCode::FORBIDDEN);

        let connection = state.db_connection.lock().unwrap();
        assert!(get_expense(expense_id, &connection).is_ok());
    }

    #[tokio::test]
    async fn non_numeric_id_is_bad_request() {
        let state = must_create_test_state();
        let (server, _) = must_create_server("bar@baz.qux", &state);

        let response = server.delete("/expenses/abc").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.json::<serde_json::Value>()["error"].is_string());
    }

    #[tokio::test]
    async fn unknown_expense_is_not_found() {
        let state = must_create_test_state();
        let (server, _) = must_create_server("bar@baz.qux", &state);

        server
            .delete(&format_endpoint(endpoints::EXPENSE, 404))
            .await
            .assert_status_not_found();
    }
}
