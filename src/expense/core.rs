//! Defines the expense model, its validation rules and the database queries for expenses.

use rusqlite::{Connection, Row, params};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime, UtcOffset};

use crate::{
    Error, database_id::ExpenseId, expense::guard::OwnedExpense, pagination::PageRequest,
    user::UserID,
};

// ============================================================================
// MODELS
// ============================================================================

/// Money that a user spent on something.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// The ID of the expense.
    pub id: ExpenseId,
    /// The user who recorded the expense. Only this user may see or change it.
    pub owner: UserID,
    /// What the money was spent on.
    pub description: String,
    /// How much was spent. Always positive.
    pub amount: f64,
    /// A free-form label for grouping expenses, e.g. "Food".
    pub category: String,
    /// When the money was spent, in UTC with whole seconds.
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
}

/// The request body for creating an expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpense {
    /// What the money was spent on.
    pub description: String,
    /// How much was spent.
    pub amount: f64,
    /// A label for grouping expenses.
    pub category: String,
    /// When the money was spent. Defaults to the time the expense is created.
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<OffsetDateTime>,
}

/// The request body for changing an expense.
///
/// Only the fields that are present are changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseUpdate {
    /// The new description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The new amount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    /// The new category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// The new date.
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<OffsetDateTime>,
}

/// The field values of an expense after validation, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ExpenseFields {
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub date: OffsetDateTime,
}

impl NewExpense {
    /// Check the fields and fill in the date with `now` if it is missing.
    ///
    /// # Errors
    /// Returns [Error::Validation] if the description or category is blank, or
    /// the amount is not a positive number.
    pub(crate) fn validate(self, now: OffsetDateTime) -> Result<ExpenseFields, Error> {
        Ok(ExpenseFields {
            description: validate_text("description", &self.description)?,
            amount: validate_amount(self.amount)?,
            category: validate_text("category", &self.category)?,
            date: normalize_date(self.date.unwrap_or(now)),
        })
    }
}

impl ExpenseUpdate {
    /// Merge the supplied fields over `expense`, validating only the fields that changed.
    ///
    /// # Errors
    /// Returns [Error::Validation] if a supplied field is invalid.
    pub(crate) fn apply_to(self, expense: &Expense) -> Result<ExpenseFields, Error> {
        let description = match self.description {
            Some(description) => validate_text("description", &description)?,
            None => expense.description.clone(),
        };
        let amount = match self.amount {
            Some(amount) => validate_amount(amount)?,
            None => expense.amount,
        };
        let category = match self.category {
            Some(category) => validate_text("category", &category)?,
            None => expense.category.clone(),
        };
        let date = self.date.map(normalize_date).unwrap_or(expense.date);

        Ok(ExpenseFields {
            description,
            amount,
            category,
            date,
        })
    }
}

fn validate_text(field_name: &str, text: &str) -> Result<String, Error> {
    let text = text.trim();

    if text.is_empty() {
        return Err(Error::Validation(format!("{field_name} must not be empty")));
    }

    Ok(text.to_owned())
}

fn validate_amount(amount: f64) -> Result<f64, Error> {
    if amount.is_finite() && amount > 0.0 {
        Ok(amount)
    } else {
        Err(Error::Validation(
            "amount must be a positive number".to_owned(),
        ))
    }
}

/// Convert `date` to UTC and drop the sub-second part.
///
/// Dates are stored as text, so every stored date must use the same offset
/// and precision for the text order to match the time order.
pub(crate) fn normalize_date(date: OffsetDateTime) -> OffsetDateTime {
    let date = date.to_offset(UtcOffset::UTC);

    date - Duration::nanoseconds(date.nanosecond().into())
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

const EXPENSE_COLUMNS: &str = "id, owner_id, description, amount, category, date";

/// Create the expense table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expense (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                owner_id INTEGER NOT NULL,
                description TEXT NOT NULL,
                amount REAL NOT NULL,
                category TEXT NOT NULL,
                date TEXT NOT NULL,
                FOREIGN KEY(owner_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
                )",
        (),
    )?;

    // Used by the list query, which filters by owner and sorts by date.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_expense_owner_date ON expense(owner_id, date);",
        (),
    )?;

    Ok(())
}

/// Insert a new expense for `owner`.
///
/// # Errors
/// Returns an [Error::SqlError] if the insert failed, e.g. because `owner` is
/// not a registered user.
pub(crate) fn insert_expense(
    owner: UserID,
    fields: ExpenseFields,
    connection: &Connection,
) -> Result<Expense, Error> {
    connection
        .prepare(&format!(
            "INSERT INTO expense (owner_id, description, amount, category, date)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING {EXPENSE_COLUMNS}"
        ))?
        .query_row(
            params![
                owner.as_i64(),
                fields.description,
                fields.amount,
                fields.category,
                fields.date,
            ],
            map_expense_row,
        )
        .map_err(Error::from)
}

/// Retrieve an expense by its `id`, regardless of who owns it.
///
/// Callers must pass the result through [authorize](crate::expense::guard::authorize)
/// before showing or changing it.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid expense,
/// - or [Error::SqlError] there is some other SQL error.
pub(crate) fn get_expense(id: ExpenseId, connection: &Connection) -> Result<Expense, Error> {
    connection
        .prepare(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM expense WHERE id = :id"
        ))?
        .query_row(&[(":id", &id)], map_expense_row)
        .map_err(Error::from)
}

/// Get one page of `owner`'s expenses, newest first.
///
/// Expenses on the same date are ordered by descending ID so that the order
/// is stable across pages.
///
/// # Errors
/// Returns an [Error::SqlError] if the query fails.
pub(crate) fn get_expense_page(
    owner: UserID,
    page: PageRequest,
    connection: &Connection,
) -> Result<Vec<Expense>, Error> {
    let limit = i64::try_from(page.page_size()).unwrap_or(i64::MAX);
    let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);

    connection
        .prepare(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM expense
             WHERE owner_id = ?1
             ORDER BY date DESC, id DESC
             LIMIT ?2 OFFSET ?3"
        ))?
        .query_map(params![owner.as_i64(), limit, offset], map_expense_row)?
        .map(|expense_result| expense_result.map_err(Error::SqlError))
        .collect()
}

/// Get all of `owner`'s expenses, newest first.
///
/// # Errors
/// Returns an [Error::SqlError] if the query fails.
pub(crate) fn get_all_expenses(
    owner: UserID,
    connection: &Connection,
) -> Result<Vec<Expense>, Error> {
    connection
        .prepare(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM expense
             WHERE owner_id = ?1
             ORDER BY date DESC, id DESC"
        ))?
        .query_map([owner.as_i64()], map_expense_row)?
        .map(|expense_result| expense_result.map_err(Error::SqlError))
        .collect()
}

/// Get the number of expenses `owner` has recorded.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub(crate) fn count_expenses(owner: UserID, connection: &Connection) -> Result<u64, Error> {
    let count: i64 = connection.query_row(
        "SELECT COUNT(id) FROM expense WHERE owner_id = ?1",
        [owner.as_i64()],
        |row| row.get(0),
    )?;

    Ok(u64::try_from(count).unwrap_or_default())
}

/// Get the sum of all of `owner`'s expense amounts.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub(crate) fn sum_expense_amounts(owner: UserID, connection: &Connection) -> Result<f64, Error> {
    connection
        .query_row(
            "SELECT COALESCE(SUM(amount), 0.0) FROM expense WHERE owner_id = ?1",
            [owner.as_i64()],
            |row| row.get(0),
        )
        .map_err(Error::from)
}

/// Overwrite the fields of an expense the caller owns.
///
/// # Errors
/// Returns [Error::NotFound] if the expense was deleted in the meantime, or an
/// [Error::SqlError] if the update fails.
pub(crate) fn save_expense(
    expense: &OwnedExpense,
    fields: ExpenseFields,
    connection: &Connection,
) -> Result<Expense, Error> {
    connection
        .prepare(&format!(
            "UPDATE expense
             SET description = ?1, amount = ?2, category = ?3, date = ?4
             WHERE id = ?5
             RETURNING {EXPENSE_COLUMNS}"
        ))?
        .query_row(
            params![
                fields.description,
                fields.amount,
                fields.category,
                fields.date,
                expense.id(),
            ],
            map_expense_row,
        )
        .map_err(Error::from)
}

type RowsAffected = usize;

/// Permanently delete an expense the caller owns.
///
/// # Errors
/// Returns an [Error::SqlError] if the delete fails.
pub(crate) fn remove_expense(
    expense: OwnedExpense,
    connection: &Connection,
) -> Result<RowsAffected, Error> {
    connection
        .execute("DELETE FROM expense WHERE id = :id", &[(":id", &expense.id())])
        .map_err(Error::from)
}

/// Map a database row to an [Expense].
pub(crate) fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    Ok(Expense {
        id: row.get(0)?,
        owner: UserID::new(row.get(1)?),
        description: row.get(2)?,
        amount: row.get(3)?,
        category: row.get(4)?,
        date: row.get(5)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================
