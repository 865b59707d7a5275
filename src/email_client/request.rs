use std::fmt;

use serde::Serialize;

pub const ACCOUNT_TOKEN_HEADER: &str = "X-Postmark-Account-Token";
pub const SERVER_TOKEN_HEADER: &str = "X-Postmark-Server-Token";

/// Selects which credential authenticates a request.
///
/// Server tokens are scoped to a single sending server, account tokens to the whole
/// Postmark account. Anything that is not explicitly an account request uses the server
/// token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenType {
    Server,
    Account,
}

impl Default for TokenType {
    fn default() -> Self {
        TokenType::Server
    }
}

impl From<&str> for TokenType {
    fn from(token_type: &str) -> Self {
        match token_type {
            "account" => TokenType::Account,
            _ => TokenType::Server,
        }
    }
}

impl TokenType {
    pub fn header_name(self) -> &'static str {
        match self {
            TokenType::Account => ACCOUNT_TOKEN_HEADER,
            TokenType::Server => SERVER_TOKEN_HEADER,
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenType::Server => write!(f, "server"),
            TokenType::Account => write!(f, "account"),
        }
    }
}

/// The per-call parameters of [`EmailClient::execute`](crate::email_client::EmailClient::execute).
///
/// Built with [`RequestParameters::new`], which carries no payload. Attaching one with
/// [`RequestParameters::payload`] fixes the payload type.
#[derive(Debug)]
pub struct RequestParameters<'a, P: ?Sized = ()> {
    pub method: &'a str,
    pub path: &'a str,
    pub payload: Option<&'a P>,
    pub token_type: TokenType,
}

impl<'a> RequestParameters<'a, ()> {
    pub fn new(method: &'a str, path: &'a str) -> Self {
        Self {
            method,
            path,
            payload: None,
            token_type: TokenType::default(),
        }
    }
}

impl<'a, P: Serialize + ?Sized> RequestParameters<'a, P> {
    pub fn payload<Q: Serialize + ?Sized>(self, payload: &'a Q) -> RequestParameters<'a, Q> {
        RequestParameters {
            method: self.method,
            path: self.path,
            payload: Some(payload),
            token_type: self.token_type,
        }
    }

    pub fn token_type(mut self, token_type: TokenType) -> Self {
        self.token_type = token_type;
        self
    }
}
