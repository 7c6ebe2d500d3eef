//! The ownership check shared by every operation that changes an existing expense.

use rusqlite::Connection;

use crate::{
    Error,
    database_id::ExpenseId,
    expense::core::{Expense, get_expense},
    user::UserID,
};

/// An expense that has been checked to belong to the caller.
///
/// The only way to get one is through [authorize] or [load_owned_expense], so
/// functions that take an `OwnedExpense` cannot be called for someone else's
/// record.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnedExpense(Expense);

impl OwnedExpense {
    /// The ID of the checked expense.
    pub fn id(&self) -> ExpenseId {
        self.0.id
    }

    /// The checked expense as it was when it was loaded.
    pub fn expense(&self) -> &Expense {
        &self.0
    }
}

/// Check that `expense` belongs to `caller`.
///
/// # Errors
/// Returns [Error::NotAuthorized] if another user owns the expense.
pub fn authorize(caller: UserID, expense: Expense) -> Result<OwnedExpense, Error> {
    if expense.owner != caller {
        tracing::warn!(
            "User {caller} tried to access expense {} owned by user {}",
            expense.id,
            expense.owner
        );
        return Err(Error::NotAuthorized);
    }

    Ok(OwnedExpense(expense))
}

/// Load the expense with `id` and check that it belongs to `caller`.
///
/// # Errors
/// Returns [Error::NotFound] if there is no such expense and
/// [Error::NotAuthorized] if another user owns it.
pub fn load_owned_expense(
    caller: UserID,
    id: ExpenseId,
    connection: &Connection,
) -> Result<OwnedExpense, Error> {
    let expense = get_expense(id, connection)?;

    authorize(caller, expense)
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use crate::{
        Error,
        expense::{
            core::{Expense, ExpenseFields, insert_expense},
            guard::{authorize, load_owned_expense},
        },
        test_utils::{must_create_test_connection, must_insert_user},
        user::UserID,
    };

    fn expense_owned_by(owner: UserID) -> Expense {
        Expense {
            id: 7,
            owner,
            description: "Coffee".to_owned(),
            amount: 4.5,
            category: "Food".to_owned(),
            date: datetime!(2025-01-01 0:00 UTC),
        }
    }

    #[test]
    fn owner_is_authorized() {
        let owner = UserID::new(1);
        let expense = expense_owned_by(owner);

        let owned = authorize(owner, expense.clone()).unwrap();

        assert_eq!(owned.id(), 7);
        assert_eq!(owned.expense(), &expense);
    }

    #[test]
    fn other_user_is_not_authorized() {
        let expense = expense_owned_by(UserID::new(1));

        assert_eq!(
            authorize(UserID::new(2), expense),
            Err(Error::NotAuthorized)
        );
    }

    #[test]
    fn load_checks_existence_before_ownership() {
        let conn = must_create_test_connection();
        let user = must_insert_user("foo@bar.baz", "hunter2", &conn);

        assert_eq!(
            load_owned_expense(user.id, 1234, &conn),
            Err(Error::NotFound)
        );
    }

    #[test]
    fn load_rejects_other_users_expense() {
        let conn = must_create_test_connection();
        let owner = must_insert_user("foo@bar.baz", "hunter2", &conn);
        let intruder = must_insert_user("bar@baz.qux", "hunter2", &conn);
        let expense = insert_expense(
            owner.id,
            ExpenseFields {
                description: "Rent".to_owned(),
                amount: 500.0,
                category: "Utilities".to_owned(),
                date: datetime!(2025-01-01 0:00 UTC),
            },
            &conn,
        )
        .unwrap();

        assert_eq!(
            load_owned_expense(intruder.id, expense.id, &conn),
            Err(Error::NotAuthorized)
        );
        assert!(load_owned_expense(owner.id, expense.id, &conn).is_ok());
    }
}
