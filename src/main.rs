use std::env;

use anyhow::{
    bail,
    Context,
};
use serde_json::Value;
use tokio::io::AsyncReadExt;

use postmark::app::{
    build_email_client,
    load_configuration,
    setup_tracing,
};
use postmark::email_client::{
    RequestParameters,
    TokenType,
};

const USAGE: &str = "usage: postmark <METHOD> <PATH> [server|account] < payload.json";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let (method, path, token_type) = match args.as_slice() {
        [method, path] => (method, path, TokenType::default()),
        [method, path, token_type] => (method, path, TokenType::from(token_type.as_str())),
        _ => bail!(USAGE),
    };

    let configuration = load_configuration().context("Failed to load configuration")?;
    setup_tracing(
        configuration.application.name.clone(),
        configuration.application.log_level.clone(),
    );
    let email_client = build_email_client(configuration.email_client)
        .context("Failed to build the Postmark client")?;

    let mut input = String::new();
    tokio::io::stdin()
        .read_to_string(&mut input)
        .await
        .context("Failed to read the payload from stdin")?;

    let parameters = RequestParameters::new(method, path).token_type(token_type);
    let response: Result<Value, _> = if input.trim().is_empty() {
        email_client.execute(parameters).await
    } else {
        let payload: Value =
            serde_json::from_str(&input).context("The payload on stdin is not valid JSON")?;
        email_client.execute(parameters.payload(&payload)).await
    };
    let response = response.with_context(|| format!("{} {} failed", method, path))?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
