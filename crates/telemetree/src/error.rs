// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error taxonomy for the Telemetree SDK.

use telemetree_core::EventValidationError;
use thiserror::Error;

use crate::encrypt::EncryptError;
use crate::transport::TransportError;

/// Errors surfaced by [`crate::Client`] construction and tracking.
///
/// Each variant is one failure category; callers match on the kind rather
/// than on message text. Messages carry field names and underlying reasons
/// but never ciphertext or key material.
#[derive(Debug, Error)]
pub enum TelemetreeError {
	/// Client construction failed: missing credentials or the one-time
	/// configuration fetch did not succeed.
	#[error("client initialization error: {0}")]
	Initialization(String),

	/// The event failed field validation; nothing was sent.
	#[error(transparent)]
	Validation(#[from] EventValidationError),

	/// Encrypting the event payload failed.
	#[error("event preparation error: {0}")]
	Preparation(#[from] EncryptError),

	/// Delivering the encrypted envelope failed.
	#[error("event send error: {0}")]
	Send(#[from] TransportError),
}

/// Result type alias for SDK operations.
pub type Result<T> = std::result::Result<T, TelemetreeError>;
