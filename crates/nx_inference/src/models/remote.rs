use std::fmt;
use std::time::Duration;
use nx_core::{EntityAnnotation, Error, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use super::EntityRecognizer;

#[derive(Serialize)]
struct NerRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct NerResponse {
    ents: Vec<NerSpan>,
}

#[derive(Deserialize)]
struct NerSpan {
    text: String,
    label: String,
}

/// Client for an NER model served over HTTP, such as a spaCy pipeline
/// behind a small web wrapper.
///
/// `POST {base_url}/ner` with `{"text": ...}` must answer
/// `{"ents": [{"text": ..., "label": ...}]}` with spans in text order.
pub struct RemoteRecognizer {
    client: Client,
    base_url: String,
}

impl RemoteRecognizer {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::Inference(format!("Failed to build NER client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

impl fmt::Debug for RemoteRecognizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteRecognizer")
            .field("client", &"<reqwest::Client>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait::async_trait]
impl EntityRecognizer for RemoteRecognizer {
    fn name(&self) -> &str {
        "Remote"
    }

    async fn recognize(&self, text: &str) -> Result<Vec<EntityAnnotation>> {
        let endpoint = format!("{}/ner", self.base_url);
        let response = self
            .client
            .post(&endpoint)
            .json(&NerRequest { text })
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| Error::Inference(format!("NER request to {} failed: {}", endpoint, e)))?
            .json::<NerResponse>()
            .await
            .map_err(|e| Error::Inference(format!("Invalid NER response from {}: {}", endpoint, e)))?;

        Ok(response
            .ents
            .into_iter()
            .map(|span| EntityAnnotation::new(span.text, span.label))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/", addr)
    }

    async fn fake_ner(Json(body): Json<Value>) -> Json<Value> {
        let text = body["text"].as_str().unwrap_or_default();
        let ents: Vec<Value> = text
            .split_whitespace()
            .map(|w| w.trim_matches('.'))
            .filter_map(|w| match w {
                "Amazon" => Some(json!({"text": w, "label": "ORG"})),
                "Bob" => Some(json!({"text": w, "label": "PERSON"})),
                "Friday" => Some(json!({"text": w, "label": "DATE"})),
                _ => None,
            })
            .collect();
        Json(json!({ "ents": ents }))
    }

    #[tokio::test]
    async fn test_recognize_over_http() {
        let base = serve(Router::new().route("/ner", post(fake_ner))).await;
        let model = RemoteRecognizer::new(base, Some(Duration::from_secs(5))).unwrap();

        let found = model.recognize("Bob joined Amazon on Friday.").await.unwrap();
        let tags: Vec<_> = found.iter().map(|a| (a.text.as_str(), a.label.as_tag())).collect();
        assert_eq!(tags, vec![("Bob", "PERSON"), ("Amazon", "ORG"), ("Friday", "DATE")]);
    }

    #[tokio::test]
    async fn test_server_error_is_inference_error() {
        let app = Router::new().route(
            "/ner",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "model not loaded") }),
        );
        let base = serve(app).await;
        let model = RemoteRecognizer::new(base, None).unwrap();
        let err = model.recognize("anything").await.unwrap_err();
        assert!(matches!(err, Error::Inference(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_unexpected_body_is_inference_error() {
        let app = Router::new().route("/ner", post(|| async { Json(json!({"entities": []})) }));
        let base = serve(app).await;
        let model = RemoteRecognizer::new(base, None).unwrap();
        assert!(matches!(model.recognize("x").await, Err(Error::Inference(_))));
    }

    #[test]
    fn test_debug_hides_client() {
        let model = RemoteRecognizer::new("http://localhost:8080/", None).unwrap();
        let debug = format!("{:?}", model);
        assert!(debug.contains("http://localhost:8080"));
        assert!(!debug.contains("8080/\""));
    }
}
