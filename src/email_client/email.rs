use serde::{
    Deserialize,
    Serialize,
};

use crate::email_client::errors::ApiError;

/// A single message for the `email` endpoint.
///
/// Addresses and bodies are passed through as-is; Postmark validates them.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Email<'a> {
    pub from: &'a str,
    pub to: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cc: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bcc: Option<&'a str>,
    pub subject: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_body: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_body: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<&'a str>,
}

impl<'a> Email<'a> {
    pub fn new(from: &'a str, to: &'a str, subject: &'a str) -> Self {
        Self {
            from,
            to,
            subject,
            ..Default::default()
        }
    }

    pub fn html_body(mut self, html_body: &'a str) -> Self {
        self.html_body = Some(html_body);
        self
    }

    pub fn text_body(mut self, text_body: &'a str) -> Self {
        self.text_body = Some(text_body);
        self
    }
}

/// Postmark's answer to a sent message.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct SendEmailResponse {
    pub error_code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(rename = "MessageID", default)]
    pub message_id: String,
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub submitted_at: String,
}

impl SendEmailResponse {
    /// Fails with the provider error when `ErrorCode` is non-zero.
    pub fn into_result(self) -> Result<Self, ApiError> {
        if self.error_code == 0 {
            Ok(self)
        } else {
            Err(ApiError {
                error_code: self.error_code,
                message: self.message,
            })
        }
    }
}
