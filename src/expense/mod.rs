//! Expenses: the records a user keeps, the ownership rule that protects them,
//! and the routes for listing, creating, changing, deleting and downloading them.

mod core;
mod create_endpoint;
mod delete_endpoint;
mod download_endpoint;
mod edit_endpoint;
mod guard;
mod list_endpoint;
mod service;

pub use core::{Expense, ExpenseUpdate, NewExpense, create_expense_table};
pub use create_endpoint::create_expense_endpoint;
pub use delete_endpoint::delete_expense_endpoint;
pub use download_endpoint::download_expenses_endpoint;
pub use edit_endpoint::edit_expense_endpoint;
pub use list_endpoint::get_expenses_endpoint;
pub use service::{DeleteConfirmation, ExpensePage, create_expense};
