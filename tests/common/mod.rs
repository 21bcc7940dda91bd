//! Shared scaffolding for relay integration tests

use axum::Router;
use axum::body::Body;
use axum::http::{Request, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use wiremock::MockServer;

use voxbridge::api::{self, ApiState};
use voxbridge::providers::{GeminiClient, SpeechSynthesizer};

pub const TEST_MODEL: &str = "gemini-2.5-flash";
pub const BOUNDARY: &str = "voxbridge-test-boundary";

/// Build a relay router wired to fake upstream servers
pub fn relay_router(gemini: &MockServer, tts: &MockServer) -> Router {
    let state = ApiState {
        gemini: std::sync::Arc::new(
            GeminiClient::with_base_url(
                "test-gemini-key".to_string(),
                TEST_MODEL.to_string(),
                gemini.uri(),
            )
            .unwrap(),
        ),
        tts: std::sync::Arc::new(
            SpeechSynthesizer::with_base_url("test-tts-key".to_string(), tts.uri()).unwrap(),
        ),
    };
    api::router(state)
}

/// The upstream path the relay must call for generation
pub fn generate_path() -> String {
    format!("/v1beta/models/{TEST_MODEL}:generateContent")
}

/// A minimal successful generateContent response body
pub fn gemini_reply(text: &str) -> Value {
    json!({
        "candidates": [
            {"content": {"role": "model", "parts": [{"text": text}]}}
        ]
    })
}

/// Build a JSON POST request
pub fn json_request(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// One part of a hand-assembled multipart body
pub enum TestPart<'a> {
    File {
        name: &'a str,
        filename: &'a str,
        content_type: &'a str,
        bytes: &'a [u8],
    },
    Text {
        name: &'a str,
        value: &'a str,
    },
}

/// Build a multipart/form-data POST request
pub fn multipart_request(uri: &str, parts: &[TestPart<'_>]) -> Request<Body> {
    let mut body = Vec::new();

    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            TestPart::File {
                name,
                filename,
                content_type,
                bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
            TestPart::Text { name, value } => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Collect a response body as JSON
pub async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// The JSON bodies of all requests an upstream mock received
pub async fn upstream_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .collect()
}
