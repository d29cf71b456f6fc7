// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The canonical wire payload built from an [`Event`].
//!
//! Field names, field order, and the optional-field omission rules are a
//! byte-level contract shared with the other Telemetree SDKs: the backend
//! distinguishes an absent key ("unknown") from a key holding an empty
//! string, so empty event fields must not appear in the JSON at all.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::event::Event;

/// Tag identifying which SDK produced a payload.
pub const EVENT_SOURCE: &str = "Rust SDK";

/// The tracking payload serialized and encrypted for delivery.
///
/// Constructed per track call; never reused or retained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payload {
	pub application_id: String,
	/// Event time, seconds since the Unix epoch (UTC).
	pub datetime: i64,
	/// Derived from the same instant as `datetime`, at millisecond
	/// resolution. Recomputed on every call: each tracked event starts a
	/// fresh "session" value rather than sharing one across calls.
	pub session_id: i64,
	pub telegram_id: i64,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub referrer: Option<i64>,
	pub event_source: String,
	pub is_premium: bool,
	pub event_type: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub username: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub firstname: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub lastname: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub language: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub referrer_type: Option<String>,
}

impl Payload {
	/// Builds the payload for `event`, timestamped with the current UTC time.
	pub fn from_event(event: &Event, application_id: impl Into<String>) -> Self {
		Self::from_event_at(event, application_id, Utc::now())
	}

	/// Builds the payload with an explicit timestamp. Deterministic given
	/// `now`; the variant tests use.
	pub fn from_event_at(
		event: &Event,
		application_id: impl Into<String>,
		now: DateTime<Utc>,
	) -> Self {
		Self {
			application_id: application_id.into(),
			datetime: now.timestamp(),
			session_id: now.timestamp_millis(),
			telegram_id: event.telegram_id,
			// Validation already rejected non-numeric referrers; a parse
			// failure here degrades to "absent" instead of a new error path.
			referrer: non_empty(&event.referrer).and_then(|r| r.parse().ok()),
			event_source: EVENT_SOURCE.to_string(),
			is_premium: event.is_premium,
			event_type: event.event_type.clone(),
			username: non_empty(&event.username).map(str::to_string),
			firstname: non_empty(&event.firstname).map(str::to_string),
			lastname: non_empty(&event.lastname).map(str::to_string),
			language: non_empty(&event.language).map(str::to_string),
			referrer_type: non_empty(&event.referrer_type).map(str::to_string),
		}
	}
}

fn non_empty(s: &str) -> Option<&str> {
	if s.is_empty() {
		None
	} else {
		Some(s)
	}
}
