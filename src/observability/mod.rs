// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Structured logging for the scheduler and graph builder.
//!
//! Every message type here implements:
//! * `Display` — human-readable text.
//! * `StructuredLog` — machine-readable `tracing` fields plus a `Span` for
//!   correlating an entire run under one trace.

pub mod messages;

use tracing::Span;

/// A loggable event with both a human-readable rendering and structured
/// fields for querying/alerting.
pub trait StructuredLog {
    /// Emit this event at its appropriate level, with structured fields
    /// alongside the human-readable message.
    fn log(&self);

    /// Build a span carrying this event's fields as attributes.
    fn span(&self, name: &str) -> Span;
}
