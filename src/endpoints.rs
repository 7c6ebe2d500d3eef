//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/expenses/{expense_id}', use [format_endpoint].

/// The route to request a cup of coffee (experimental).
pub const COFFEE: &str = "/coffee";
/// The route for registering a new user.
pub const REGISTER: &str = "/auth/register";
/// The route for logging in a user and getting a bearer token.
pub const LOG_IN: &str = "/auth/login";
/// The route to list and create expenses.
pub const EXPENSES: &str = "/expenses";
/// The route to update or delete a single expense.
pub const EXPENSE: &str = "/expenses/{expense_id}";
/// The route to download all of a user's expenses as a CSV file.
pub const EXPENSES_DOWNLOAD: &str = "/expenses/download";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// Assumes that there is exactly one parameter in braces, e.g. '{expense_id}'.
/// If there is no parameter, the path is returned unchanged.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let (Some(param_start), Some(param_end)) = (endpoint_path.find('{'), endpoint_path.find('}'))
    else {
        return endpoint_path.to_owned();
    };

    format!(
        "{}{id}{}",
        &endpoint_path[..param_start],
        &endpoint_path[param_end + 1..]
    )
}
