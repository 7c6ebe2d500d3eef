//! Owner-scoped operations on expenses.
//!
//! Every function takes the caller's [UserID] from the auth guard. Listing only
//! ever reads the caller's rows, and changes go through the ownership guard.

use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::FromRef;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    AppState, Error,
    database_id::ExpenseId,
    expense::{
        core::{
            Expense, ExpenseUpdate, NewExpense, count_expenses, get_expense_page, insert_expense,
            remove_expense, save_expense, sum_expense_amounts,
        },
        guard::load_owned_expense,
    },
    pagination::{PageRequest, PaginationConfig},
    user::UserID,
};

/// The state needed by the expense endpoints.
#[derive(Debug, Clone)]
pub struct ExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The config that controls how to split expenses into pages.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for ExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

impl ExpenseState {
    /// Lock the database connection.
    ///
    /// # Errors
    /// Returns [Error::DatabaseLockError] if the lock is poisoned.
    pub fn connection(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.db_connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLockError
        })
    }
}

/// One page of a user's expenses plus totals over all of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpensePage {
    /// The expenses on this page, newest first.
    pub expenses: Vec<Expense>,
    /// The page number that was requested, starting from 1.
    pub current_page: u64,
    /// The number of pages at the requested page size. Zero if there are no expenses.
    pub total_pages: u64,
    /// The number of expenses the user has.
    pub total_items: u64,
    /// The sum of every expense the user has, not just this page.
    pub total_amount: f64,
}

/// The response body for a successful delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteConfirmation {
    /// A human readable confirmation.
    pub message: String,
}

/// Get one page of `owner`'s expenses.
///
/// A page past the end is not an error, it just has no expenses.
///
/// # Errors
/// Returns an [Error::SqlError] if a query fails.
pub fn list_expenses(
    owner: UserID,
    page: PageRequest,
    connection: &Connection,
) -> Result<ExpensePage, Error> {
    let total_items = count_expenses(owner, connection)?;
    let total_amount = sum_expense_amounts(owner, connection)?;
    let expenses = get_expense_page(owner, page, connection)?;

    Ok(ExpensePage {
        expenses,
        current_page: page.page(),
        total_pages: page.page_count(total_items),
        total_items,
        total_amount,
    })
}

/// Record a new expense for `owner`.
///
/// # Errors
/// Returns [Error::Validation] for invalid fields or an [Error::SqlError] if
/// the expense could not be saved.
pub fn create_expense(
    owner: UserID,
    new_expense: NewExpense,
    connection: &Connection,
) -> Result<Expense, Error> {
    let fields = new_expense.validate(OffsetDateTime::now_utc())?;
    let expense = insert_expense(owner, fields, connection)?;
    tracing::debug!("User {owner} created expense {}", expense.id);

    Ok(expense)
}

/// Change the supplied fields of one of `owner`'s expenses.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to an expense,
/// - [Error::NotAuthorized] if the expense belongs to someone else,
/// - [Error::Validation] if a supplied field is invalid,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn update_expense(
    owner: UserID,
    id: ExpenseId,
    update: ExpenseUpdate,
    connection: &Connection,
) -> Result<Expense, Error> {
    let owned = load_owned_expense(owner, id, connection)?;
    let fields = update.apply_to(owned.expense())?;

    save_expense(&owned, fields, connection)
}

/// Permanently delete one of `owner`'s expenses.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to an expense,
/// - [Error::NotAuthorized] if the expense belongs to someone else,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn delete_expense(
    owner: UserID,
    id: ExpenseId,
    connection: &Connection,
) -> Result<DeleteConfirmation, Error> {
    let owned = load_owned_expense(owner, id, connection)?;

    match remove_expense(owned, connection)? {
        0 => Err(Error::NotFound),
        _ => {
            tracing::debug!("User {owner} deleted expense {id}");
            Ok(DeleteConfirmation {
                message: "Expense removed".to_owned(),
            })
        }
    }
}
