// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! REST transport for configuration bootstrap and event delivery.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Bounded timeout applied to every request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const HEADER_API_KEY: &str = "x-api-key";
const HEADER_PROJECT_ID: &str = "x-project-id";

/// Transport-level failures.
#[derive(Debug, Error)]
pub enum TransportError {
	/// The HTTP request could not be performed.
	#[error("request failed: {0}")]
	RequestFailed(#[from] reqwest::Error),

	/// The server answered with a non-200 status.
	#[error("unexpected status code {status}: {message}")]
	UnexpectedStatus { status: u16, message: String },

	/// The response body did not decode as the expected JSON.
	#[error("failed to decode response: {0}")]
	Decode(#[from] serde_json::Error),
}

/// Per-deployment settings returned by the configuration service.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
	/// Ingest endpoint events are POSTed to.
	pub host: String,
	/// PEM-encoded RSA public key, possibly with escaped newlines.
	pub public_key: String,
}

/// Thin client over a pooled [`reqwest::Client`].
///
/// Holds the credentials so every request carries the bearer Authorization
/// header; `send_event` additionally sets the `x-api-key` and
/// `x-project-id` headers the ingest endpoint expects. Cheap to share:
/// concurrent use only touches the underlying connection pool.
#[derive(Debug, Clone)]
pub struct RestClient {
	http: reqwest::Client,
	api_key: String,
	project_id: String,
}

impl RestClient {
	/// Creates a transport with the standard timeout and User-Agent.
	pub fn new(api_key: impl Into<String>, project_id: impl Into<String>) -> Self {
		let http = reqwest::Client::builder()
			.user_agent(user_agent())
			.timeout(REQUEST_TIMEOUT)
			.build()
			.expect("failed to build HTTP client");

		Self {
			http,
			api_key: api_key.into(),
			project_id: project_id.into(),
		}
	}

	/// Fetches the per-deployment settings.
	///
	/// GET `config_url?project=<project_id>`; expects HTTP 200 with a JSON
	/// body carrying `host` and `public_key`.
	pub async fn fetch_config(&self, config_url: &str) -> Result<Settings, TransportError> {
		debug!(url = %config_url, project_id = %self.project_id, "Fetching client configuration");

		let response = self
			.http
			.get(config_url)
			.query(&[("project", self.project_id.as_str())])
			.bearer_auth(&self.api_key)
			.send()
			.await?;

		let response = Self::expect_ok(response).await?;
		let body = response.text().await?;
		Ok(serde_json::from_str(&body)?)
	}

	/// Delivers one serialized encrypted envelope to the ingest host.
	pub async fn send_event(&self, host: &str, body: Vec<u8>) -> Result<(), TransportError> {
		debug!(host = %host, bytes = body.len(), "Sending encrypted event");

		let response = self
			.http
			.post(host)
			.header(HEADER_API_KEY, &self.api_key)
			.header(HEADER_PROJECT_ID, &self.project_id)
			.header(reqwest::header::CONTENT_TYPE, "application/json")
			.bearer_auth(&self.api_key)
			.body(body)
			.send()
			.await?;

		Self::expect_ok(response).await?;
		Ok(())
	}

	async fn expect_ok(response: reqwest::Response) -> Result<reqwest::Response, TransportError> {
		if response.status() != reqwest::StatusCode::OK {
			let status = response.status().as_u16();
			let message = response.text().await.unwrap_or_default();
			return Err(TransportError::UnexpectedStatus { status, message });
		}
		Ok(response)
	}
}

/// Returns the SDK User-Agent string, e.g. `telemetree-rust/0.1.0`.
pub(crate) fn user_agent() -> String {
	format!("telemetree-rust/{}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
	use super::*;
	use wiremock::matchers::{header, method, path, query_param};
	use wiremock::{Mock, MockServer, ResponseTemplate};

	#[test]
	fn user_agent_has_sdk_prefix_and_version() {
		let ua = user_agent();
		assert!(ua.starts_with("telemetree-rust/"));
		let parts: Vec<&str> = ua.split('/').collect();
		assert_eq!(parts.len(), 2);
		assert!(!parts[1].is_empty());
	}

	#[tokio::test]
	async fn fetch_config_sends_project_and_bearer() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(path("/v1/client/config"))
			.and(query_param("project", "proj_1"))
			.and(header("Authorization", "Bearer key_1"))
			.respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
				"host": "https://ingest.example.com",
				"public_key": "-----BEGIN RSA PUBLIC KEY-----\\nAAAA\\n-----END RSA PUBLIC KEY-----"
			})))
			.expect(1)
			.mount(&server)
			.await;

		let client = RestClient::new("key_1", "proj_1");
		let settings = client
			.fetch_config(&format!("{}/v1/client/config", server.uri()))
			.await
			.unwrap();

		assert_eq!(settings.host, "https://ingest.example.com");
		assert!(settings.public_key.contains("RSA PUBLIC KEY"));
	}

	#[tokio::test]
	async fn fetch_config_non_200_is_error() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
			.mount(&server)
			.await;

		let client = RestClient::new("key_1", "proj_1");
		let err = client.fetch_config(&server.uri()).await.unwrap_err();

		match err {
			TransportError::UnexpectedStatus { status, message } => {
				assert_eq!(status, 403);
				assert_eq!(message, "forbidden");
			}
			other => panic!("unexpected error: {other}"),
		}
	}

	#[tokio::test]
	async fn fetch_config_decode_failure_is_distinct() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.respond_with(ResponseTemplate::new(200).set_body_string("not json"))
			.mount(&server)
			.await;

		let client = RestClient::new("key_1", "proj_1");
		let err = client.fetch_config(&server.uri()).await.unwrap_err();

		assert!(matches!(err, TransportError::Decode(_)));
	}

	#[tokio::test]
	async fn send_event_sets_credential_headers() {
		let server = MockServer::start().await;
		Mock::given(method("POST"))
			.and(path("/events"))
			.and(header("x-api-key", "key_1"))
			.and(header("x-project-id", "proj_1"))
			.and(header("Authorization", "Bearer key_1"))
			.and(header("Content-Type", "application/json"))
			.respond_with(ResponseTemplate::new(200))
			.expect(1)
			.mount(&server)
			.await;

		let client = RestClient::new("key_1", "proj_1");
		client
			.send_event(&format!("{}/events", server.uri()), b"{}".to_vec())
			.await
			.unwrap();
	}

	#[tokio::test]
	async fn send_event_non_200_is_error() {
		let server = MockServer::start().await;
		Mock::given(method("POST"))
			.respond_with(ResponseTemplate::new(500).set_body_string("boom"))
			.mount(&server)
			.await;

		let client = RestClient::new("key_1", "proj_1");
		let err = client
			.send_event(&server.uri(), b"{}".to_vec())
			.await
			.unwrap_err();

		assert!(matches!(
			err,
			TransportError::UnexpectedStatus { status: 500, .. }
		));
	}
}
