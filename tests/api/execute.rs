use serde::Deserialize;
use serde_json::{
    json,
    Value,
};
use tokio::io::{
    AsyncReadExt,
    AsyncWriteExt,
};
use tokio::net::TcpListener;
use wiremock::matchers::{
    method,
    path,
};
use wiremock::{
    Mock,
    ResponseTemplate,
};

use postmark::email_client::{
    EmailClient,
    EmailClientError,
    RequestParameters,
    TokenType,
    ACCOUNT_TOKEN_HEADER,
    SERVER_TOKEN_HEADER,
};

use crate::helpers::*;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SendResult {
    error_code: i64,
    #[serde(rename = "MessageID")]
    message_id: String,
}

#[tokio::test]
async fn execute_posts_an_email_with_the_server_token() {
    let test_client = spawn_client().await;
    let payload = json!({
        "From": "a@x.com",
        "To": "b@x.com",
        "Subject": "hi",
        "TextBody": "hello",
    });

    Mock::given(method("POST"))
        .and(path("/email"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"ErrorCode": 0, "MessageID": "abc"})),
        )
        .expect(1)
        .mount(&test_client.email_server)
        .await;

    let result: SendResult = test_client
        .email_client
        .execute(
            RequestParameters::new("POST", "email")
                .payload(&payload)
                .token_type(TokenType::Server),
        )
        .await
        .unwrap();

    assert_eq!(result.error_code, 0);
    assert_eq!(result.message_id, "abc");

    let requests = test_client.email_server.received_requests().await.unwrap();
    let request = requests.first().unwrap();
    assert_eq!(
        request.headers.get(SERVER_TOKEN_HEADER).unwrap().to_str().unwrap(),
        SERVER_TOKEN
    );
    assert!(request.headers.get(ACCOUNT_TOKEN_HEADER).is_none());
    assert_eq!(
        serde_json::from_slice::<Value>(&request.body).unwrap(),
        payload
    );
}

#[tokio::test]
async fn execute_uses_the_account_token_for_account_requests() {
    let test_client = spawn_client().await;

    Mock::given(method("GET"))
        .and(path("/servers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"TotalCount": 0})))
        .expect(1)
        .mount(&test_client.email_server)
        .await;

    let _: Value = test_client
        .email_client
        .execute(RequestParameters::new("GET", "servers").token_type(TokenType::from("account")))
        .await
        .unwrap();

    let requests = test_client.email_server.received_requests().await.unwrap();
    let request = requests.first().unwrap();
    assert_eq!(
        request.headers.get(ACCOUNT_TOKEN_HEADER).unwrap().to_str().unwrap(),
        ACCOUNT_TOKEN
    );
    assert!(request.headers.get(SERVER_TOKEN_HEADER).is_none());
    assert!(request.body.is_empty());
}

#[tokio::test]
async fn execute_passes_the_path_through_unescaped() {
    let test_client = spawn_client().await;

    Mock::given(method("GET"))
        .and(path("/templates/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"TemplateId": 42})))
        .expect(1)
        .mount(&test_client.email_server)
        .await;

    let template: Value = test_client
        .email_client
        .execute(RequestParameters::new("GET", "templates/42"))
        .await
        .unwrap();

    assert_eq!(template["TemplateId"], 42);
}

#[tokio::test]
async fn execute_reports_a_truncated_response_body() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buffer = [0u8; 4096];
        let _ = socket.read(&mut buffer).await.unwrap();
        socket
            .write_all(
                b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 100\r\n\r\n{\"Error",
            )
            .await
            .unwrap();
        socket.shutdown().await.unwrap();
    });

    let error = EmailClient::new(SERVER_TOKEN, ACCOUNT_TOKEN)
        .with_base_url(format!("http://{}", address))
        .execute::<_, Value>(RequestParameters::new("GET", "email"))
        .await
        .unwrap_err();

    assert!(matches!(error, EmailClientError::BodyRead { .. }));
}
