use reqwest::StatusCode;

use crate::error::{NotifyError, NotifyResult};

/// POST `payload_json` as the form field `payload` and return the response body.
///
/// Only a 200 counts as delivered; the body is read in full either way.
pub async fn post_slack(webhook_url: &str, payload_json: &str) -> NotifyResult<String> {
    let resp = reqwest::Client::new()
        .post(webhook_url)
        .form(&[("payload", payload_json)])
        .send()
        .await?;

    let status = resp.status();
    if status != StatusCode::OK {
        let body = resp.text().await.unwrap_or_default();
        return Err(NotifyError::DeliveryRejected { status, body });
    }
    Ok(resp.text().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use pretty_assertions::assert_eq;

    const PAYLOAD: &str = r#"{"text":"","attachments":[{"fallback":"t","color":"good","title":"t","title_link":"","text":""}]}"#;

    #[tokio::test]
    async fn posts_form_encoded_payload() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/services/hook")
            .match_header("content-type", "application/x-www-form-urlencoded")
            .match_body(Matcher::UrlEncoded("payload".into(), PAYLOAD.into()))
            .with_status(200)
            .with_body("ok")
            .create_async()
            .await;

        let body = post_slack(&format!("{}/services/hook", server.url()), PAYLOAD)
            .await
            .unwrap();

        assert_eq!(body, "ok");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn server_error_is_rejected_with_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(500)
            .with_body("invalid_payload")
            .create_async()
            .await;

        let err = post_slack(&server.url(), PAYLOAD).await.unwrap_err();
        match err {
            NotifyError::DeliveryRejected { status, body } => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(body, "invalid_payload");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_200_success_is_still_rejected() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(204)
            .create_async()
            .await;

        let err = post_slack(&server.url(), PAYLOAD).await.unwrap_err();
        assert!(matches!(err, NotifyError::DeliveryRejected { .. }));
    }

    /// Serves one request, answering 500 with a body shorter than its Content-Length.
    async fn truncated_error_server() -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&request).to_string();
                if let Some(header_end) = text.find("\r\n\r\n") {
                    let content_length = text[..header_end]
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())?
                        })
                        .unwrap_or(0);
                    if request.len() >= header_end + 4 + content_length {
                        break;
                    }
                }
            }
            socket
                .write_all(b"HTTP/1.1 500 Internal Server Error\r\nContent-Length: 100\r\n\r\npartial")
                .await
                .unwrap();
            socket.shutdown().await.unwrap();
        });
        format!("http://{addr}/hook")
    }

    #[tokio::test]
    async fn unreadable_error_body_is_still_rejected() {
        let url = truncated_error_server().await;

        let err = post_slack(&url, PAYLOAD).await.unwrap_err();
        match err {
            NotifyError::DeliveryRejected { status, .. } => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_host_is_transport_error() {
        let err = post_slack("http://127.0.0.1:1/hook", PAYLOAD)
            .await
            .unwrap_err();
        assert!(matches!(err, NotifyError::Transport(_)));
    }
}
