//! Raw business records served by the data source.

use chrono::{DateTime, Utc};
use rodabem_shared::types::{BookingId, ClientId, DestinationId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A registered client (passenger).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRecord {
    /// Client ID.
    pub id: ClientId,
    /// Full name.
    pub full_name: String,
    /// When the client was registered.
    pub registered_at: DateTime<Utc>,
}

/// A travel destination offered by the agency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationRecord {
    /// Destination ID.
    pub id: DestinationId,
    /// Display name.
    pub name: String,
    /// Whether the destination is currently offered.
    pub is_active: bool,
    /// Start of availability.
    pub available_from: DateTime<Utc>,
    /// End of availability; `None` means open-ended.
    pub available_until: Option<DateTime<Utc>>,
}

/// Booking status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Awaiting confirmation or payment.
    Pending,
    /// Confirmed; counts towards revenue.
    Confirmed,
    /// Cancelled; never counts towards revenue.
    Cancelled,
}

/// A booking contract between a client and a destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRecord {
    /// Booking ID.
    pub id: BookingId,
    /// Client who booked.
    pub client_id: ClientId,
    /// Destination booked.
    pub destination_id: DestinationId,
    /// Contract amount.
    pub amount: Decimal,
    /// Current status.
    pub status: BookingStatus,
    /// When the booking was made.
    pub booked_at: DateTime<Utc>,
}

impl BookingRecord {
    /// Amount this booking contributes to revenue.
    ///
    /// Only confirmed bookings with a positive amount contribute.
    #[must_use]
    pub fn revenue(&self) -> Decimal {
        if self.status == BookingStatus::Confirmed && self.amount > Decimal::ZERO {
            self.amount
        } else {
            Decimal::ZERO
        }
    }
}
