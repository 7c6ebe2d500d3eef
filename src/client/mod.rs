//! A client for the expenses API.
//!
//! [ExpenseList] holds the page of expenses a user is looking at, the page
//! size they prefer and the expense they are editing. It talks to the server
//! through an [ExpenseApi], normally an [HttpClient].
//!
//! Every call takes the caller's [Session] explicitly. When a call fails with
//! an error where [ClientError::requires_log_in] is true, the caller should
//! send the user back to log in.

mod api;
mod controller;
mod form;
mod http;
mod indicators;
mod preferences;
mod session;

pub use api::{ClientError, ExpenseApi};
pub use controller::ExpenseList;
pub use form::{Category, ExpenseForm};
pub use http::HttpClient;
pub use indicators::{PageIndicator, page_indicators};
pub use preferences::{DEFAULT_ITEMS_PER_PAGE, Preferences, PreferencesError, PreferencesFile};
pub use session::Session;
