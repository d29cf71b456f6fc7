// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Client configuration fetched once at construction.

use crate::transport::{RestClient, TransportError};

/// Default configuration service endpoint.
pub const DEFAULT_CONFIG_URL: &str = "https://config.ton.solutions/v1/client/config";

/// Resolved client configuration.
///
/// Loaded once when the client is built and owned immutably for its
/// lifetime; never refreshed. An explicit owned struct rather than process
/// state, so multiple clients with different configurations can coexist.
#[derive(Debug, Clone)]
pub struct Config {
	pub api_key: String,
	pub project_id: String,
	/// Ingest endpoint events are POSTed to.
	pub api_host: String,
	/// PEM-encoded RSA public key used to wrap event key material.
	pub public_key: String,
}

impl Config {
	/// Loads the configuration from the configuration service.
	pub async fn load(
		api_key: impl Into<String>,
		project_id: impl Into<String>,
		config_url: &str,
		transport: &RestClient,
	) -> Result<Self, TransportError> {
		let settings = transport.fetch_config(config_url).await?;

		Ok(Self {
			api_key: api_key.into(),
			project_id: project_id.into(),
			api_host: settings.host,
			public_key: settings.public_key,
		})
	}
}
