//! The route for downloading all of the caller's expenses as a CSV file.

use axum::{
    Extension,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use csv::WriterBuilder;
use rusqlite::Connection;
use serde::Serialize;
use time::format_description::well_known::Rfc3339;

use crate::{
    Error,
    expense::{core::get_all_expenses, service::ExpenseState},
    user::UserID,
};

const CSV_HEADER: [&str; 5] = ["id", "date", "description", "category", "amount"];

#[derive(Serialize)]
struct ExportRow<'a> {
    id: i64,
    date: String,
    description: &'a str,
    category: &'a str,
    amount: f64,
}

/// Write all of `owner`'s expenses as CSV, in the same order as the list route.
///
/// The header row is always written, even if there are no expenses.
///
/// # Errors
/// Returns an [Error::SqlError] if the expenses cannot be read or an
/// [Error::CsvError] if they cannot be written.
pub fn export_expenses_csv(owner: UserID, connection: &Connection) -> Result<Vec<u8>, Error> {
    let expenses = get_all_expenses(owner, connection)?;

    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(vec![]);
    writer
        .write_record(CSV_HEADER)
        .map_err(|error| Error::CsvError(error.to_string()))?;

    for expense in &expenses {
        let date = expense
            .date
            .format(&Rfc3339)
            .map_err(|error| Error::CsvError(error.to_string()))?;

        writer
            .serialize(ExportRow {
                id: expense.id,
                date,
                description: &expense.description,
                category: &expense.category,
                amount: expense.amount,
            })
            .map_err(|error| Error::CsvError(error.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|error| Error::CsvError(error.to_string()))
}

/// Handler for `GET /expenses/download`.
///
/// # Errors
/// Returns an error if the expenses cannot be read or written as CSV.
pub async fn download_expenses_endpoint(
    State(state): State<ExpenseState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Response, Error> {
    let csv = {
        let connection = state.connection()?;
        export_expenses_csv(user_id, &connection)?
    };

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"expenses.csv\"",
            ),
        ],
        csv,
    )
        .into_response())
}
