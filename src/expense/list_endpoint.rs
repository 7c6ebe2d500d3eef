//! The route for listing the caller's expenses one page at a time.

use axum::{
    Extension, Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::Deserialize;

use crate::{
    Error,
    expense::service::{ExpensePage, ExpenseState, list_expenses},
    pagination::PageRequest,
    user::UserID,
};

/// The query string for the list route, e.g. `?page=2&limit=20`.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// The page to get, starting from 1.
    pub page: Option<u64>,
    /// The number of expenses per page.
    pub limit: Option<u64>,
}

/// Handler for `GET /expenses`.
///
/// Missing query parameters fall back to the server's pagination config.
///
/// # Errors
/// Returns [Error::Validation] if `page` or `limit` is zero or not a number.
pub async fn get_expenses_endpoint(
    State(state): State<ExpenseState>,
    Extension(user_id): Extension<UserID>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<ExpensePage>, Error> {
    let Query(query) = query?;
    let page = PageRequest::from_query(query.page, query.limit, &state.pagination_config)?;
    let connection = state.connection()?;

    list_expenses(user_id, page, &connection).map(Json)
}
