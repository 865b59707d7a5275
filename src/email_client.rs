pub use client::{
    EmailClient,
    POSTMARK_BASE_URL,
};
pub use email::{
    Email,
    SendEmailResponse,
};
pub use errors::{
    ApiError,
    EmailClientError,
};
pub use request::{
    RequestParameters,
    TokenType,
    ACCOUNT_TOKEN_HEADER,
    SERVER_TOKEN_HEADER,
};

mod client;
mod email;
mod errors;
mod request;
