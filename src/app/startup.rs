use std::time::Duration;

use reqwest::Client;

use crate::app::configuration::EmailClientSettings;
use crate::email_client::{
    EmailClient,
    EmailClientError,
};

/// Build an [`EmailClient`] bound to the configured base url, whose transport gives up
/// after `timeout_secs`.
pub fn build_email_client(
    client_config: EmailClientSettings,
) -> Result<EmailClient, EmailClientError> {
    let http_client = Client::builder()
        .timeout(Duration::from_secs(client_config.timeout_secs))
        .build()
        .map_err(|source| EmailClientError::Transport { source })?;

    Ok(
        EmailClient::new(client_config.server_token, client_config.account_token)
            .with_base_url(client_config.base_url)
            .with_http_client(http_client),
    )
}
