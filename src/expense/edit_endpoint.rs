//! The route for changing an existing expense.

use axum::{
    Extension, Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};

use crate::{
    Error,
    database_id::ExpenseId,
    expense::{
        core::{Expense, ExpenseUpdate},
        service::{ExpenseState, update_expense},
    },
    user::UserID,
};

/// Handler for `PUT /expenses/{expense_id}`.
///
/// # Errors
/// Returns [Error::NotFound] for an unknown ID, [Error::NotAuthorized] if the
/// caller does not own the expense, and [Error::Validation] for a bad ID or body.
pub async fn edit_expense_endpoint(
    State(state): State<ExpenseState>,
    Extension(user_id): Extension<UserID>,
    expense_id: Result<Path<ExpenseId>, PathRejection>,
    payload: Result<Json<ExpenseUpdate>, JsonRejection>,
) -> Result<Json<Expense>, Error> {
    let Path(expense_id) = expense_id?;
    let Json(update) = payload?;
    let connection = state.connection()?;

    update_expense(user_id, expense_id, update, &connection).map(Json)
}
