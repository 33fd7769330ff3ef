use super::{Credential, GatewaySettings, PersistedRef, PersistenceGateway, SaveRequest};
use crate::common::{Error, Result};
use reqwest::StatusCode;

/// [`PersistenceGateway`] backed by the document backend's HTTP API.
///
/// ```text
/// POST {base_url}/save_generated_document
/// Authorization: Bearer <credential>
/// { "content": "<base64>", "format": "pdf", "filename": "...", "isBase64": true }
/// ```
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    url: String,
    credential: Credential,
}

impl HttpGateway {
    pub fn new(settings: &GatewaySettings, credential: Credential) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            url: settings.save_url(),
            credential,
        })
    }

    #[inline]
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// The backend's `detail` message, falling back to the raw body or the status reason.
fn error_detail(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string))
        .or_else(|| (!body.trim().is_empty()).then(|| body.trim().to_string()))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string())
}

#[async_trait::async_trait]
impl PersistenceGateway for HttpGateway {
    async fn save_document(&self, request: SaveRequest) -> Result<PersistedRef> {
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(self.credential.token())
            .json(&request)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            if body.trim().is_empty() {
                return Ok(PersistedRef::default());
            }
            // The success body is opaque; keep plain-text acknowledgements verbatim.
            let value = serde_json::from_str(&body)
                .unwrap_or_else(|_| serde_json::Value::String(body.trim().to_string()));
            return Ok(PersistedRef(value));
        }

        let detail = error_detail(status, &body);
        if status == StatusCode::UNAUTHORIZED {
            Err(Error::AuthExpired { detail })
        } else {
            Err(Error::PersistenceFailed {
                status: status.as_u16(),
                detail,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::ExportFormat;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Serve exactly one request with a canned response; yields the raw request.
    async fn stub(status: u16, body: &'static str) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];
            let header_end = loop {
                let n = socket.read(&mut buf).await.unwrap();
                raw.extend_from_slice(&buf[..n]);
                if let Some(pos) = raw.windows(4).position(|w| w == b"\r\n\r\n") {
                    break pos + 4;
                }
            };
            let head = String::from_utf8_lossy(&raw[..header_end]).to_lowercase();
            let length: usize = head
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .map(|v| v.trim().parse().unwrap())
                .unwrap_or(0);
            while raw.len() < header_end + length {
                let n = socket.read(&mut buf).await.unwrap();
                raw.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = tx.send(String::from_utf8_lossy(&raw).into_owned());
        });
        (format!("http://{}", addr), rx)
    }

    fn gateway(base_url: String) -> HttpGateway {
        let settings = GatewaySettings::default().with_base_url(base_url);
        HttpGateway::new(&settings, Credential::bearer("tok-123")).unwrap()
    }

    fn request() -> SaveRequest {
        SaveRequest::new("JVBERi0=".to_string(), ExportFormat::Pdf, "Manual.pdf")
    }

    #[tokio::test]
    async fn test_success_posts_json_with_bearer() {
        let (url, seen) = stub(200, r#"{"id":"doc-1"}"#).await;
        let saved = gateway(url).save_document(request()).await.unwrap();
        assert_eq!(saved.get("id"), Some(&serde_json::json!("doc-1")));

        let raw = seen.await.unwrap();
        assert!(raw.starts_with("POST /save_generated_document HTTP/1.1\r\n"));
        assert!(raw.to_lowercase().contains("authorization: bearer tok-123"));
        let body = raw.split("\r\n\r\n").nth(1).unwrap();
        let json: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(json["format"], "pdf");
        assert_eq!(json["isBase64"], true);
        assert_eq!(json["filename"], "Manual.pdf");
    }

    #[tokio::test]
    async fn test_unauthorized_is_auth_expired() {
        let (url, _seen) = stub(401, r#"{"detail":"Token not found or expired"}"#).await;
        let err = gateway(url).save_document(request()).await.unwrap_err();
        match err {
            Error::AuthExpired { detail } => assert_eq!(detail, "Token not found or expired"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_server_error_carries_status_and_detail() {
        let (url, _seen) = stub(500, "storage offline").await;
        let err = gateway(url).save_document(request()).await.unwrap_err();
        match err {
            Error::PersistenceFailed { status, detail } => {
                assert_eq!(status, 500);
                assert_eq!(detail, "storage offline");
            },
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_success_body() {
        let (url, _seen) = stub(200, "").await;
        let saved = gateway(url).save_document(request()).await.unwrap();
        assert_eq!(saved, PersistedRef::default());
    }

    #[tokio::test]
    async fn test_plain_text_success_body_is_kept() {
        let (url, _seen) = stub(200, "saved").await;
        let saved = gateway(url).save_document(request()).await.unwrap();
        assert_eq!(saved, PersistedRef(serde_json::json!("saved")));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);
        let err = gateway(url).save_document(request()).await.unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
        assert!(err.is_persistence());
    }

    #[test]
    fn test_error_detail_fallbacks() {
        assert_eq!(error_detail(StatusCode::BAD_GATEWAY, ""), "Bad Gateway");
        assert_eq!(error_detail(StatusCode::BAD_REQUEST, r#"{"other":1}"#), r#"{"other":1}"#);
    }
}
