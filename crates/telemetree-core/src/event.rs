// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The client event model and its validation rules.

use thiserror::Error;

/// A single analytics event as supplied by the application.
///
/// Required fields are set at construction; the optional profile fields use
/// `with_*` builder methods. An empty optional string is treated as absent
/// everywhere downstream: it is never serialized and never validated.
///
/// # Example
///
/// ```
/// use telemetree_core::Event;
///
/// let event = Event::new(42, "start")
///     .with_username("alice")
///     .with_language("en");
/// assert!(event.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
	/// Telegram user identifier. Must be non-zero.
	pub telegram_id: i64,
	/// Event type name, e.g. `"start"`. Must be non-empty.
	pub event_type: String,
	/// Whether the user has Telegram Premium.
	pub is_premium: bool,
	pub username: String,
	pub firstname: String,
	pub lastname: String,
	pub language: String,
	pub referrer_type: String,
	/// Referring user identifier as a numeric string, e.g. `"190550"`.
	pub referrer: String,
}

impl Event {
	/// Creates an event with the required fields set and everything else empty.
	pub fn new(telegram_id: i64, event_type: impl Into<String>) -> Self {
		Self {
			telegram_id,
			event_type: event_type.into(),
			is_premium: false,
			username: String::new(),
			firstname: String::new(),
			lastname: String::new(),
			language: String::new(),
			referrer_type: String::new(),
			referrer: String::new(),
		}
	}

	pub fn with_premium(mut self, is_premium: bool) -> Self {
		self.is_premium = is_premium;
		self
	}

	pub fn with_username(mut self, username: impl Into<String>) -> Self {
		self.username = username.into();
		self
	}

	pub fn with_firstname(mut self, firstname: impl Into<String>) -> Self {
		self.firstname = firstname.into();
		self
	}

	pub fn with_lastname(mut self, lastname: impl Into<String>) -> Self {
		self.lastname = lastname.into();
		self
	}

	/// Sets the user's IETF language tag, e.g. `"en"`.
	pub fn with_language(mut self, language: impl Into<String>) -> Self {
		self.language = language.into();
		self
	}

	pub fn with_referrer_type(mut self, referrer_type: impl Into<String>) -> Self {
		self.referrer_type = referrer_type.into();
		self
	}

	/// Sets the referring user identifier. The value must be a numeric
	/// string; anything else fails [`Event::validate`].
	pub fn with_referrer(mut self, referrer: impl Into<String>) -> Self {
		self.referrer = referrer.into();
		self
	}

	/// Validates the event's fields.
	///
	/// Rules, in order (the first failing rule wins):
	/// 1. `telegram_id` must be non-zero.
	/// 2. `event_type` must be non-empty.
	/// 3. `referrer`, when non-empty, must parse as an integer. An empty
	///    referrer means "no referrer" and passes.
	pub fn validate(&self) -> Result<(), EventValidationError> {
		if self.telegram_id == 0 {
			return Err(EventValidationError::new("TelegramID"));
		}
		if self.event_type.is_empty() {
			return Err(EventValidationError::new("EventType"));
		}
		if !self.referrer.is_empty() && self.referrer.parse::<i64>().is_err() {
			return Err(EventValidationError::new("Referrer"));
		}
		Ok(())
	}
}

/// A field-level validation failure.
///
/// Carries the name of the first field that failed; the wording matches the
/// other Telemetree SDKs so callers can match on it across languages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("event validation error: field '{field}' invalid format")]
pub struct EventValidationError {
	/// Name of the offending field: `TelegramID`, `EventType` or `Referrer`.
	pub field: &'static str,
}

impl EventValidationError {
	pub(crate) fn new(field: &'static str) -> Self {
		Self { field }
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn valid_minimal_event() {
		let event = Event::new(42, "start");
		assert!(event.validate().is_ok());
	}

	#[test]
	fn zero_telegram_id_rejected() {
		let event = Event::new(0, "start");
		let err = event.validate().unwrap_err();
		assert_eq!(err.field, "TelegramID");
	}

	#[test]
	fn empty_event_type_rejected() {
		let event = Event::new(42, "");
		let err = event.validate().unwrap_err();
		assert_eq!(err.field, "EventType");
	}

	#[test]
	fn telegram_id_checked_before_event_type() {
		let event = Event::new(0, "");
		let err = event.validate().unwrap_err();
		assert_eq!(err.field, "TelegramID");
	}

	#[test]
	fn numeric_referrer_accepted() {
		let event = Event::new(42, "start").with_referrer("190550");
		assert!(event.validate().is_ok());
	}

	#[test]
	fn negative_referrer_accepted() {
		let event = Event::new(42, "start").with_referrer("-7");
		assert!(event.validate().is_ok());
	}

	#[test]
	fn non_numeric_referrer_rejected() {
		let event = Event::new(42, "start").with_referrer("not-a-number");
		let err = event.validate().unwrap_err();
		assert_eq!(err.field, "Referrer");
	}

	#[test]
	fn empty_referrer_accepted() {
		let event = Event::new(42, "start").with_referrer("");
		assert!(event.validate().is_ok());
	}

	#[test]
	fn validation_error_message() {
		let err = Event::new(0, "start").validate().unwrap_err();
		assert_eq!(
			err.to_string(),
			"event validation error: field 'TelegramID' invalid format"
		);
	}

	proptest! {
		#[test]
		fn any_nonzero_id_and_nonempty_type_is_valid(
			id in prop::num::i64::ANY.prop_filter("non-zero", |id| *id != 0),
			event_type in "[a-z_]{1,32}",
		) {
			let event = Event::new(id, event_type);
			prop_assert!(event.validate().is_ok());
		}

		#[test]
		fn any_integer_referrer_is_valid(referrer in prop::num::i64::ANY) {
			let event = Event::new(42, "start").with_referrer(referrer.to_string());
			prop_assert!(event.validate().is_ok());
		}

		#[test]
		fn non_numeric_referrer_always_fails(referrer in "[a-zA-Z][a-zA-Z ]{0,20}") {
			let event = Event::new(42, "start").with_referrer(referrer);
			let err = event.validate().unwrap_err();
			prop_assert_eq!(err.field, "Referrer");
		}
	}
}
