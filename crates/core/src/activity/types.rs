//! Activity feed types.

use std::fmt;

use chrono::{DateTime, Utc};
use rodabem_shared::types::ActivityId;
use serde::{Deserialize, Serialize};

/// Category of a business event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    /// A client was registered.
    ClientCreated,
    /// A booking contract was created.
    BookingCreated,
    /// A booking was cancelled.
    BookingCancelled,
    /// A payment was received for a booking.
    PaymentReceived,
    /// A destination was added.
    DestinationCreated,
}

impl ActivityKind {
    /// Returns the string representation of the kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ClientCreated => "client_created",
            Self::BookingCreated => "booking_created",
            Self::BookingCancelled => "booking_cancelled",
            Self::PaymentReceived => "payment_received",
            Self::DestinationCreated => "destination_created",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Immutable business event shown in the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEvent {
    /// Event ID.
    pub id: ActivityId,
    /// Event category.
    pub kind: ActivityKind,
    /// Display text.
    pub description: String,
    /// When the event happened.
    pub timestamp: DateTime<Utc>,
}

/// Bounded, newest-first view of the feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityFeedPage {
    /// Events, newest first.
    pub events: Vec<ActivityEvent>,
    /// True when the source failed and `events` is an empty fallback.
    pub degraded: bool,
}

impl ActivityFeedPage {
    /// Empty page signalling a failed fetch.
    #[must_use]
    pub fn degraded() -> Self {
        Self {
            events: Vec::new(),
            degraded: true,
        }
    }
}
