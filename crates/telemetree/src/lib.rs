// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Telemetree analytics Rust SDK.
//!
//! Tracks a single event per call: the event is validated, packed into the
//! canonical wire payload, hybrid-encrypted (AES-128-CBC body, RSA-wrapped
//! key material), and POSTed to the per-deployment ingest host. The host and
//! RSA public key are fetched once from the configuration service when the
//! client is built.
//!
//! # Example
//!
//! ```ignore
//! use telemetree::{Client, Event};
//!
//! let client = Client::builder()
//!     .api_key("your_api_key")
//!     .project_id("your_project_id")
//!     .build()
//!     .await?;
//!
//! client
//!     .track(Event::new(42, "start").with_username("alice"))
//!     .await?;
//! ```
//!
//! There is no queueing or batching: `track` performs the full
//! validate → encrypt → send sequence before returning, and every error is
//! surfaced to the caller without internal retries.

mod client;
mod config;
pub mod encrypt;
mod error;
mod transport;

pub use client::{Client, ClientBuilder};
pub use config::{Config, DEFAULT_CONFIG_URL};
pub use encrypt::{EncryptError, EncryptedEnvelope};
pub use error::{Result, TelemetreeError};
pub use telemetree_core::{Event, EventValidationError, Payload};
pub use transport::TransportError;
