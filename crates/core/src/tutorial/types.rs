//! Tutorial step types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::TutorialError;

/// Named onboarding stage, one per console section.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum TutorialStep {
    /// Dashboard home.
    Dashboard,
    /// Client (passenger) registry.
    Clients,
    /// Booking contracts.
    Bookings,
    /// Destinations catalogue.
    Destinations,
    /// Reports.
    Reports,
}

impl TutorialStep {
    /// Every step of the tutorial, in onboarding order.
    pub const ALL: [Self; 5] = [
        Self::Dashboard,
        Self::Clients,
        Self::Bookings,
        Self::Destinations,
        Self::Reports,
    ];

    /// Returns the string representation of the step.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Clients => "clients",
            Self::Bookings => "bookings",
            Self::Destinations => "destinations",
            Self::Reports => "reports",
        }
    }

    /// Parses a step from its name.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "dashboard" => Some(Self::Dashboard),
            "clients" => Some(Self::Clients),
            "bookings" => Some(Self::Bookings),
            "destinations" => Some(Self::Destinations),
            "reports" => Some(Self::Reports),
            _ => None,
        }
    }

    /// Console route of the step's section.
    #[must_use]
    pub fn route(&self) -> &'static str {
        match self {
            Self::Dashboard => "/",
            Self::Clients => "/passageiros",
            Self::Bookings => "/contratos",
            Self::Destinations => "/destinos",
            Self::Reports => "/relatorios",
        }
    }

    /// Maps a console route to its step. Query strings, fragments and a
    /// trailing slash are ignored; sub-pages belong to their section.
    pub fn from_route(route: &str) -> Option<Self> {
        let path = route
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim_end_matches('/');
        let section = path.split('/').find(|s| !s.is_empty());

        match section {
            None | Some("dashboard") => Some(Self::Dashboard),
            Some("passageiros") => Some(Self::Clients),
            Some("contratos") => Some(Self::Bookings),
            Some("destinos") => Some(Self::Destinations),
            Some("relatorios") => Some(Self::Reports),
            Some(_) => None,
        }
    }
}

impl fmt::Display for TutorialStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TutorialStep {
    type Err = TutorialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| TutorialError::UnknownStep(s.to_string()))
    }
}
