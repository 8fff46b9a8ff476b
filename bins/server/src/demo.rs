//! Demo records for running the server without a backend.
//!
//! Everything is placed relative to the start time so every period has data.

use chrono::{DateTime, Duration, Utc};
use rodabem_core::activity::{ActivityEvent, ActivityKind};
use rodabem_core::notifications::Notification;
use rodabem_core::source::{
    BookingRecord, BookingStatus, ClientRecord, DestinationRecord, InMemorySource,
};
use rodabem_shared::types::{ActivityId, BookingId, ClientId, DestinationId, NotificationId};
use rust_decimal::Decimal;

const CLIENTS: [&str; 8] = [
    "Ana Souza",
    "Bruno Lima",
    "Carla Mendes",
    "Diego Rocha",
    "Elisa Prado",
    "Fábio Nunes",
    "Gabriela Reis",
    "Heitor Alves",
];

const DESTINATIONS: [(&str, bool); 5] = [
    ("Gramado", true),
    ("Porto de Galinhas", true),
    ("Fernando de Noronha", true),
    ("Bonito", true),
    ("Jericoacoara", false),
];

/// Builds the demo source as of `now`.
pub fn source(now: DateTime<Utc>) -> InMemorySource {
    let clients: Vec<ClientRecord> = (0..48_i64)
        .zip(CLIENTS.iter().cycle())
        .map(|(i, name)| ClientRecord {
            id: ClientId::new(),
            full_name: format!("{name} {}", i / 8 + 1),
            registered_at: now - Duration::days(i * 7 + 1) - Duration::hours(i % 5),
        })
        .collect();

    let destinations: Vec<DestinationRecord> = DESTINATIONS
        .iter()
        .map(|(name, active)| DestinationRecord {
            id: DestinationId::new(),
            name: (*name).to_string(),
            is_active: *active,
            available_from: now - Duration::days(365),
            available_until: None,
        })
        .collect();

    let bookings: Vec<BookingRecord> = clients
        .iter()
        .enumerate()
        .map(|(i, client)| {
            let status = match i % 6 {
                0 => BookingStatus::Cancelled,
                1 => BookingStatus::Pending,
                _ => BookingStatus::Confirmed,
            };
            BookingRecord {
                id: BookingId::new(),
                client_id: client.id,
                destination_id: destinations[i % destinations.len()].id,
                amount: Decimal::new(180_000, 2) + Decimal::new(45_050, 2) * Decimal::from(i % 7),
                status,
                booked_at: client.registered_at + Duration::hours(3),
            }
        })
        .collect();

    let activity: Vec<ActivityEvent> = clients
        .iter()
        .take(12)
        .flat_map(|client| {
            [
                ActivityEvent {
                    id: ActivityId::new(),
                    kind: ActivityKind::ClientCreated,
                    description: format!("{} cadastrado como passageiro", client.full_name),
                    timestamp: client.registered_at,
                },
                ActivityEvent {
                    id: ActivityId::new(),
                    kind: ActivityKind::BookingCreated,
                    description: format!("Novo contrato para {}", client.full_name),
                    timestamp: client.registered_at + Duration::hours(3),
                },
            ]
        })
        .collect();

    let notifications = vec![
        notification(
            "Pagamento confirmado",
            "O contrato de Ana Souza foi quitado.",
            false,
            now - Duration::minutes(20),
        ),
        notification(
            "Nova reserva",
            "Bruno Lima reservou Gramado.",
            false,
            now - Duration::hours(5),
        ),
        notification(
            "Bem-vindo ao painel",
            "Siga o tutorial para conhecer o sistema.",
            true,
            now - Duration::days(3),
        ),
    ];

    InMemorySource::new()
        .with_clients(clients)
        .with_destinations(destinations)
        .with_bookings(bookings)
        .with_activity(activity)
        .with_notifications(notifications)
}

fn notification(title: &str, message: &str, read: bool, created_at: DateTime<Utc>) -> Notification {
    Notification {
        id: NotificationId::new(),
        title: title.to_string(),
        message: message.to_string(),
        read,
        created_at,
    }
}
