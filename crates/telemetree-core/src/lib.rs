// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types for the Telemetree Rust SDK.
//!
//! This crate defines the client-facing [`Event`] model with its field
//! validation rules, and the canonical wire [`Payload`] the backend expects.
//! It performs no I/O and no cryptography; the `telemetree` crate layers the
//! encryption pipeline and transport on top of these types.

pub mod event;
pub mod payload;

pub use event::{Event, EventValidationError};
pub use payload::{Payload, EVENT_SOURCE};
