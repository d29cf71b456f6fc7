// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The Telemetree client facade.

use std::sync::Arc;

use telemetree_core::Event;
use tracing::{debug, info};

use crate::config::{Config, DEFAULT_CONFIG_URL};
use crate::encrypt::prepare_encrypted_payload;
use crate::error::{Result, TelemetreeError};
use crate::transport::RestClient;

/// Builder for constructing a [`Client`].
pub struct ClientBuilder {
	api_key: Option<String>,
	project_id: Option<String>,
	config_url: String,
}

impl ClientBuilder {
	/// Creates a new builder with default settings.
	pub fn new() -> Self {
		Self {
			api_key: None,
			project_id: None,
			config_url: DEFAULT_CONFIG_URL.to_string(),
		}
	}

	/// Sets the API key issued for the project.
	pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
		self.api_key = Some(api_key.into());
		self
	}

	/// Sets the project identifier.
	pub fn project_id(mut self, project_id: impl Into<String>) -> Self {
		self.project_id = Some(project_id.into());
		self
	}

	/// Overrides the configuration service URL.
	///
	/// Defaults to [`DEFAULT_CONFIG_URL`]; self-hosted deployments and
	/// tests point this at their own endpoint.
	pub fn config_url(mut self, config_url: impl Into<String>) -> Self {
		self.config_url = config_url.into();
		self
	}

	/// Builds the client, fetching the remote configuration once.
	///
	/// Credentials are checked before any network call. A transport or
	/// decode failure during the fetch is fatal: no client is returned and
	/// nothing is retried.
	pub async fn build(self) -> Result<Client> {
		let api_key = self
			.api_key
			.filter(|k| !k.is_empty())
			.ok_or_else(|| TelemetreeError::Initialization("missing API key".to_string()))?;
		let project_id = self
			.project_id
			.filter(|p| !p.is_empty())
			.ok_or_else(|| TelemetreeError::Initialization("missing project id".to_string()))?;

		let transport = RestClient::new(api_key.clone(), project_id.clone());
		let config = Config::load(api_key, project_id, &self.config_url, &transport)
			.await
			.map_err(|e| TelemetreeError::Initialization(e.to_string()))?;

		info!(
			project_id = %config.project_id,
			api_host = %config.api_host,
			"Telemetree client initialized"
		);

		Ok(Client {
			inner: Arc::new(ClientInner { config, transport }),
		})
	}
}

impl Default for ClientBuilder {
	fn default() -> Self {
		Self::new()
	}
}

struct ClientInner {
	config: Config,
	transport: RestClient,
}

/// Client for tracking events against the Telemetree API.
///
/// Cheap to clone and safe for concurrent [`track`](Client::track) calls;
/// the configuration is immutable and the transport shares one connection
/// pool.
///
/// # Example
///
/// ```ignore
/// use telemetree::{Client, Event};
///
/// let client = Client::builder()
///     .api_key("your_api_key")
///     .project_id("your_project_id")
///     .build()
///     .await?;
///
/// client.track(Event::new(42, "start")).await?;
/// ```
#[derive(Clone)]
pub struct Client {
	inner: Arc<ClientInner>,
}

impl Client {
	/// Creates a new builder for constructing a Client.
	pub fn builder() -> ClientBuilder {
		ClientBuilder::new()
	}

	/// Tracks a single event: validate, encrypt, deliver.
	///
	/// Short-circuits at the first failure; validation failures never reach
	/// the network. Completes the full sequence before returning - there is
	/// no queueing or batching behind this call.
	pub async fn track(&self, event: Event) -> Result<()> {
		event.validate()?;

		let envelope = prepare_encrypted_payload(
			&self.inner.config.public_key,
			&self.inner.config.api_key,
			&event,
		)?;

		self.inner
			.transport
			.send_event(&self.inner.config.api_host, envelope)
			.await?;

		debug!(
			telegram_id = event.telegram_id,
			event_type = %event.event_type,
			"Event tracked"
		);

		Ok(())
	}
}
