//! The route for recording a new expense.

use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{
    Error,
    expense::{
        core::{Expense, NewExpense},
        service::{ExpenseState, create_expense},
    },
    user::UserID,
};

/// Handler for `POST /expenses`.
///
/// The new expense always belongs to the caller, whatever the body says.
///
/// # Errors
/// Returns [Error::Validation] if the body is not a valid [NewExpense].
pub async fn create_expense_endpoint(
    State(state): State<ExpenseState>,
    Extension(user_id): Extension<UserID>,
    payload: Result<Json<NewExpense>, JsonRejection>,
) -> Result<(StatusCode, Json<Expense>), Error> {
    let Json(new_expense) = payload?;
    let connection = state.connection()?;
    let expense = create_expense(user_id, new_expense, &connection)?;

    Ok((StatusCode::CREATED, Json(expense)))
}
