use std::time::Duration;

use async_trait::async_trait;
use lazy_translator::{TranslateError, Translation, Translator};
use serde::Serialize;

#[derive(Serialize)]
struct TranslateRequest<'a> {
    text: &'a str,
}

/// Client for a user-deployed translation script: `POST {"text"}` → `{"result"}`
#[derive(Clone)]
pub struct ScriptTranslator {
    client: reqwest::Client,
    api_url: String,
}

impl ScriptTranslator {
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> Result<Self, TranslateError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_url: api_url.into(),
        })
    }

    /// Send a test translation; succeeds when the endpoint answers with a truthy `result`
    pub async fn verify(&self) -> Result<(), TranslateError> {
        let json = self.post("test").await?;
        if is_truthy(&json["result"]) {
            Ok(())
        } else {
            Err(TranslateError::ApiError(
                "register failed, the url or the script parameters may be wrong".to_string(),
            ))
        }
    }

    async fn post(&self, text: &str) -> Result<serde_json::Value, TranslateError> {
        let response = self
            .client
            .post(&self.api_url)
            .header("Accept", "application/json")
            .json(&TranslateRequest { text })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(TranslateError::ApiError(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            TranslateError::InvalidResponse(format!("Failed to parse response: {}", e))
        })
    }
}

/// `result` string of a translation response
pub fn parse_result(json: &serde_json::Value) -> Result<String, TranslateError> {
    json["result"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| TranslateError::InvalidResponse("No result in response".to_string()))
}

fn is_truthy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        serde_json::Value::String(s) => !s.is_empty(),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => true,
    }
}

#[async_trait]
impl Translator for ScriptTranslator {
    async fn translate(&self, text: &str) -> Result<Translation, TranslateError> {
        let json = self.post(text).await?;
        let translated = parse_result(&json)?;

        Ok(Translation {
            source: text.to_string(),
            text: translated,
            provider: "script".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    /// Serve one request with a fixed status and body, returning the url
    async fn serve_once(status: &'static str, body: &'static str) -> String {
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
                if request_complete(&request) {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        format!("http://{addr}/exec")
    }

    fn request_complete(request: &[u8]) -> bool {
        let text = String::from_utf8_lossy(request);
        let Some(header_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let content_length = text[..header_end]
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        request.len() >= header_end + 4 + content_length
    }

    fn translator(url: String) -> ScriptTranslator {
        ScriptTranslator::new(url, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn result_must_be_a_string() {
        assert_eq!(parse_result(&json!({"result": "こんにちは"})).unwrap(), "こんにちは");
        assert!(matches!(
            parse_result(&json!({"error": "quota"})),
            Err(TranslateError::InvalidResponse(_))
        ));
    }

    #[test]
    fn truthiness() {
        assert!(is_truthy(&json!("テスト")));
        assert!(is_truthy(&json!(1)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(null)));
    }

    #[tokio::test]
    async fn translates_through_endpoint() {
        let url = serve_once("200 OK", r#"{"result":"原子爆弾"}"#).await;

        let translation = translator(url).translate("atomic bomb").await.unwrap();
        assert_eq!(translation.text, "原子爆弾");
        assert_eq!(translation.source, "atomic bomb");
    }

    #[tokio::test]
    async fn http_error_is_api_error() {
        let url = serve_once("500 Internal Server Error", "{}").await;

        let err = translator(url).translate("x").await.unwrap_err();
        assert!(matches!(err, TranslateError::ApiError(_)));
    }

    #[tokio::test]
    async fn non_json_body_is_invalid() {
        let url = serve_once("200 OK", "<html>login</html>").await;

        let err = translator(url).translate("x").await.unwrap_err();
        assert!(matches!(err, TranslateError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn verify_requires_truthy_result() {
        let ok = serve_once("200 OK", r#"{"result":"テスト"}"#).await;
        translator(ok).verify().await.unwrap();

        let empty = serve_once("200 OK", r#"{"result":""}"#).await;
        assert!(translator(empty).verify().await.is_err());
    }
}
