use derivative::Derivative;
use reqwest::header::{
    HeaderValue,
    ACCEPT,
    CONTENT_TYPE,
};
use reqwest::{
    Client,
    Method,
    Url,
};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::email_client::email::{
    Email,
    SendEmailResponse,
};
use crate::email_client::errors::EmailClientError;
use crate::email_client::request::{
    RequestParameters,
    TokenType,
};

pub const POSTMARK_BASE_URL: &str = "https://api.postmarkapp.com";

const JSON: &str = "application/json";

/// A Postmark API client.
///
/// Holds both credentials and a shared `reqwest::Client`. It is immutable once built and
/// cheap to clone, so a single instance can serve concurrent requests.
#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub struct EmailClient {
    http_client: Client,
    base_url: String,
    #[derivative(Debug = "ignore")]
    server_token: String,
    #[derivative(Debug = "ignore")]
    account_token: String,
}

impl EmailClient {
    pub fn new(server_token: impl Into<String>, account_token: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            base_url: POSTMARK_BASE_URL.to_string(),
            server_token: server_token.into(),
            account_token: account_token.into(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Replaces the transport. Timeouts and other deadlines belong on this client.
    pub fn with_http_client(mut self, http_client: Client) -> Self {
        self.http_client = http_client;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends one request and decodes the JSON response into `T`.
    ///
    /// The response is decoded whatever its HTTP status: a provider error comes back as a
    /// regular `T`, and recognising it is up to the caller. Failures are never retried.
    #[tracing::instrument(
    name = "Executing Postmark request",
    skip(self, parameters),
    fields(
    method = % parameters.method,
    path = % parameters.path,
    token_type = % parameters.token_type,
    )
    )]
    pub async fn execute<P, T>(
        &self,
        parameters: RequestParameters<'_, P>,
    ) -> Result<T, EmailClientError>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let method = Method::from_bytes(parameters.method.as_bytes()).map_err(|source| {
            EmailClientError::InvalidMethod {
                method: parameters.method.to_string(),
                source,
            }
        })?;
        let url = self.url(parameters.path)?;
        let (token_header, token) = self.credential(parameters.token_type);
        let token = HeaderValue::from_str(token).map_err(|source| EmailClientError::InvalidToken {
            token_type: parameters.token_type,
            source,
        })?;

        let mut request = self
            .http_client
            .request(method, url)
            .header(ACCEPT, JSON)
            .header(CONTENT_TYPE, JSON)
            .header(token_header, token);
        if let Some(payload) = parameters.payload {
            let body = serde_json::to_vec(payload)
                .map_err(|source| EmailClientError::Serialization { source })?;
            request = request.body(body);
        }

        let response = request
            .send()
            .await
            .map_err(|source| EmailClientError::Transport { source })?;
        tracing::debug!(status = %response.status(), "Postmark responded");

        let body = response
            .bytes()
            .await
            .map_err(|source| EmailClientError::BodyRead { source })?;
        serde_json::from_slice(&body).map_err(|source| EmailClientError::Deserialization { source })
    }

    /// Sends a single email with the server token.
    ///
    /// Unlike [`EmailClient::execute`], a non-zero `ErrorCode` in the response is returned as
    /// [`EmailClientError::Api`].
    #[tracing::instrument(
    name = "Sending email",
    skip(self, email),
    fields(
    subject = % email.subject,
    )
    )]
    pub async fn send_email(
        &self,
        email: &Email<'_>,
    ) -> Result<SendEmailResponse, EmailClientError> {
        let response: SendEmailResponse = self
            .execute(RequestParameters::new("POST", "email").payload(email))
            .await?;
        Ok(response.into_result()?)
    }

    fn url(&self, path: &str) -> Result<Url, EmailClientError> {
        // `Url::parse` resolves `.` and `..`, which would silently target another endpoint.
        if has_dot_segments(path) {
            return Err(EmailClientError::DotSegmentPath {
                path: path.to_string(),
            });
        }
        let url = format!("{}/{}", self.base_url, path);
        Url::parse(&url).map_err(|source| EmailClientError::InvalidUrl { url, source })
    }

    fn credential(&self, token_type: TokenType) -> (&'static str, &str) {
        let token = match token_type {
            TokenType::Account => &self.account_token,
            TokenType::Server => &self.server_token,
        };
        (token_type.header_name(), token)
    }
}

fn has_dot_segments(path: &str) -> bool {
    let path = path.split(|c: char| c == '?' || c == '#').next().unwrap_or_default();
    path.split(|c: char| c == '/' || c == '\\').any(|segment| {
        matches!(
            segment.to_ascii_lowercase().as_str(),
            "." | ".." | "%2e" | ".%2e" | "%2e." | "%2e%2e"
        )
    })
}
