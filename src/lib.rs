//! A client for the Postmark transactional email API.
//!
//! [`email_client::EmailClient::execute`] sends one authenticated JSON request and decodes
//! the response, while [`app`] wires configuration and tracing around it.

pub mod app;
pub mod email_client;
