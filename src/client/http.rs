//! An [ExpenseApi] that talks to the server over HTTP.

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode, Url};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{
    auth::{LogInResponse, RegisteredUser},
    client::{ClientError, ExpenseApi, Session},
    database_id::ExpenseId,
    endpoints::{self, format_endpoint},
    expense::{DeleteConfirmation, Expense, ExpensePage, ExpenseUpdate, NewExpense},
};

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

/// A client for the expenses REST API.
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: Url,
    http: reqwest::Client,
}

impl HttpClient {
    /// Create a client for the server at `base_url`, e.g. `http://localhost:3000`.
    ///
    /// Routes are resolved below any path in `base_url`, so
    /// `http://host/api` sends requests to `http://host/api/expenses` etc.
    ///
    /// # Errors
    /// Returns [ClientError::InvalidBaseUrl] if `base_url` cannot be parsed.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let mut base_url =
            Url::parse(base_url).map_err(|error| ClientError::InvalidBaseUrl(error.to_string()))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    /// Register a new user.
    ///
    /// # Errors
    /// Returns [ClientError::Conflict] if the email is taken and
    /// [ClientError::Validation] if the email or password is rejected.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
    ) -> Result<RegisteredUser, ClientError> {
        let request = self
            .http
            .post(self.endpoint(endpoints::REGISTER)?)
            .json(&Credentials { email, password });

        send(request).await
    }

    /// Log in and start a session.
    ///
    /// # Errors
    /// Returns [ClientError::Unauthorized] if the email or password is wrong.
    pub async fn log_in(&self, email: &str, password: &str) -> Result<Session, ClientError> {
        let request = self
            .http
            .post(self.endpoint(endpoints::LOG_IN)?)
            .json(&Credentials { email, password });

        send::<LogInResponse>(request).await.map(Session::from)
    }

    /// Download all of the session user's expenses as CSV text.
    ///
    /// # Errors
    /// Returns [ClientError::SessionExpired] without contacting the server if
    /// the session has expired.
    pub async fn download_csv(&self, session: &Session) -> Result<String, ClientError> {
        let response = self
            .http
            .get(self.endpoint(endpoints::EXPENSES_DOWNLOAD)?)
            .bearer_auth(session.bearer_token()?)
            .send()
            .await?;

        let response = check_status(response).await?;

        Ok(response.text().await?)
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|error| ClientError::InvalidBaseUrl(error.to_string()))
    }
}

#[async_trait]
impl ExpenseApi for HttpClient {
    async fn list(
        &self,
        session: &Session,
        page: u64,
        limit: u64,
    ) -> Result<ExpensePage, ClientError> {
        let request = self
            .http
            .get(self.endpoint(endpoints::EXPENSES)?)
            .bearer_auth(session.bearer_token()?)
            .query(&[("page", page), ("limit", limit)]);

        send(request).await
    }

    async fn create(
        &self,
        session: &Session,
        expense: &NewExpense,
    ) -> Result<Expense, ClientError> {
        let request = self
            .http
            .post(self.endpoint(endpoints::EXPENSES)?)
            .bearer_auth(session.bearer_token()?)
            .json(expense);

        send(request).await
    }

    async fn update(
        &self,
        session: &Session,
        id: ExpenseId,
        update: &ExpenseUpdate,
    ) -> Result<Expense, ClientError> {
        let request = self
            .http
            .put(self.endpoint(&format_endpoint(endpoints::EXPENSE, id))?)
            .bearer_auth(session.bearer_token()?)
            .json(update);

        send(request).await
    }

    async fn delete(
        &self,
        session: &Session,
        id: ExpenseId,
    ) -> Result<DeleteConfirmation, ClientError> {
        let request = self
            .http
            .delete(self.endpoint(&format_endpoint(endpoints::EXPENSE, id))?)
            .bearer_auth(session.bearer_token()?);

        send(request).await
    }
}

async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ClientError> {
    let response = check_status(request.send().await?).await?;

    Ok(response.json::<T>().await?)
}

/// Turn an error status into the matching [ClientError].
async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .json::<ErrorResponse>()
        .await
        .map(|body| body.error)
        .unwrap_or_else(|_| "unknown error".to_owned());
    tracing::debug!("Request failed with {status}: {message}");

    let error = match status {
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
        StatusCode::FORBIDDEN => ClientError::Forbidden,
        StatusCode::NOT_FOUND => ClientError::NotFound,
        StatusCode::CONFLICT => ClientError::Conflict(message),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            ClientError::Validation(message)
        }
        _ => ClientError::Server(message),
    };

    Err(error)
}

#[cfg(test)]
mod tests {
    use time::{Duration, OffsetDateTime};
    use tokio::net::TcpListener;

    use crate::{
        build_router,
        client::{ClientError, ExpenseApi, HttpClient, Session},
        endpoints::{self, format_endpoint},
        expense::{ExpenseUpdate, NewExpense},
        test_utils::must_create_test_state,
    };

    const PASSWORD: &str = "correct-horse-battery-staple-42";

    async fn must_start_server() -> HttpClient {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("could not bind test listener");
        let address = listener.local_addr().expect("listener has no address");
        let app = build_router(must_create_test_state());
        tokio::spawn(async move { axum::serve(listener, app).await });

        HttpClient::new(&format!("http://{address}")).expect("invalid test URL")
    }

    fn coffee() -> NewExpense {
        NewExpense {
            description: "Coffee".to_owned(),
            amount: 4.5,
            category: "Food".to_owned(),
            date: None,
        }
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(matches!(
            HttpClient::new("not a url"),
            Err(ClientError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn keeps_base_url_path() {
        for base_url in ["http://host/api", "http://host/api/"] {
            let client = HttpClient::new(base_url).unwrap();

            assert_eq!(
                client.endpoint(endpoints::EXPENSES).unwrap().as_str(),
                "http://host/api/expenses"
            );
            assert_eq!(
                client
                    .endpoint(&format_endpoint(endpoints::EXPENSE, 7))
                    .unwrap()
                    .as_str(),
                "http://host/api/expenses/7"
            );
        }
    }

    #[test]
    fn root_base_url_resolves_routes() {
        let client = HttpClient::new("http://localhost:3000").unwrap();

        assert_eq!(
            client.endpoint(endpoints::LOG_IN).unwrap().as_str(),
            "http://localhost:3000/auth/login"
        );
    }

    #[tokio::test]
    async fn manages_expenses_end_to_end() {
        let client = must_start_server().await;
        client.register("alice@example.com", PASSWORD).await.unwrap();
        let session = client.log_in("alice@example.com", PASSWORD).await.unwrap();

        let created = client.create(&session, &coffee()).await.unwrap();
        let page = client.list(&session, 1, 10).await.unwrap();
        assert_eq!(page.expenses, [created.clone()]);

        let update = ExpenseUpdate {
            amount: Some(6.0),
            ..Default::default()
        };
        let updated = client.update(&session, created.id, &update).await.unwrap();
        assert_eq!(updated.amount, 6.0);

        let csv = client.download_csv(&session).await.unwrap();
        assert!(csv.contains("Coffee,Food,6"));

        let confirmation = client.delete(&session, created.id).await.unwrap();
        assert_eq!(confirmation.message, "Expense removed");
        assert!(client.list(&session, 1, 10).await.unwrap().expenses.is_empty());
    }

    #[tokio::test]
    async fn maps_error_statuses() {
        let client = must_start_server().await;
        client.register("alice@example.com", PASSWORD).await.unwrap();
        client.register("bob@example.com", PASSWORD).await.unwrap();
        let alice = client.log_in("alice@example.com", PASSWORD).await.unwrap();
        let bob = client.log_in("bob@example.com", PASSWORD).await.unwrap();
        let created = client.create(&alice, &coffee()).await.unwrap();

        let duplicate = client.register("alice@example.com", PASSWORD).await;
        assert!(matches!(duplicate, Err(ClientError::Conflict(_))));

        let wrong_password = client.log_in("alice@example.com", "nope").await;
        assert!(wrong_password.unwrap_err().requires_log_in());

        let forbidden = client.delete(&bob, created.id).await;
        assert!(matches!(forbidden, Err(ClientError::Forbidden)));

        let missing = client.delete(&alice, created.id + 100).await;
        assert!(matches!(missing, Err(ClientError::NotFound)));

        let invalid = client
            .create(
                &alice,
                &NewExpense {
                    amount: -1.0,
                    ..coffee()
                },
            )
            .await;
        assert!(matches!(invalid, Err(ClientError::Validation(_))));

        let zero_limit = client.list(&alice, 1, 0).await;
        assert!(matches!(zero_limit, Err(ClientError::Validation(_))));
    }

    #[tokio::test]
    async fn forged_token_requires_log_in() {
        let client = must_start_server().await;
        let forged = Session::new("forged", OffsetDateTime::now_utc() + Duration::hours(1));

        let error = client.list(&forged, 1, 10).await.unwrap_err();

        assert!(matches!(error, ClientError::Unauthorized));
        assert!(error.requires_log_in());
    }

    #[tokio::test]
    async fn expired_session_fails_without_a_request() {
        // Nothing listens on this port, so reaching the network would be a transport error.
        let client = HttpClient::new("http://127.0.0.1:9").unwrap();
        let expired = Session::new("old", OffsetDateTime::now_utc() - Duration::minutes(1));

        let error = client.list(&expired, 1, 10).await.unwrap_err();

        assert!(matches!(error, ClientError::SessionExpired));
    }
}
