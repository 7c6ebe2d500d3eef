//! Bearer token authentication.
//!
//! Users register and log in through the JSON endpoints in this module. A
//! successful log-in returns a signed token that the client sends back in the
//! `Authorization: Bearer` header, which [auth_guard] turns into a [UserID]
//! for the protected routes.

mod log_in;
mod middleware;
mod register;
mod token;

pub use log_in::{LogInResponse, post_log_in};
pub use middleware::auth_guard;
pub use register::{RegisteredUser, register_user};
pub use token::{Claims, DEFAULT_TOKEN_DURATION, IssuedToken, JwtKeys, decode_token, issue_token};

use crate::user::UserID;
