//! Router fixtures for route tests.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use rodabem_core::activity::{ActivityEvent, ActivityKind};
use rodabem_core::dashboard::DashboardController;
use rodabem_core::notifications::Notification;
use rodabem_core::source::{
    BookingRecord, BookingStatus, ClientRecord, DestinationRecord, InMemorySource,
};
use rodabem_shared::AppConfig;
use rodabem_shared::types::{ActivityId, BookingId, ClientId, DestinationId, NotificationId};
use rust_decimal_macros::dec;
use serde_json::Value;
use tower::ServiceExt;

use crate::{AppState, create_router};

pub const UNREAD_ID: &str = "01890a5d-ac96-774b-bcce-b302099a8057";
pub const READ_ID: &str = "01890a5d-ac96-774b-bcce-b302099a8058";

fn config() -> AppConfig {
    let mut config = AppConfig::default();
    config.retry.max_attempts = 1;
    config
}

/// Source with one client, destination, booking and activity event, plus one
/// unread and one read notification.
pub fn seeded_source() -> InMemorySource {
    let now = Utc::now();
    InMemorySource::new()
        .with_clients([ClientRecord {
            id: ClientId::new(),
            full_name: "Carla Mendes".into(),
            registered_at: now - Duration::minutes(30),
        }])
        .with_destinations([DestinationRecord {
            id: DestinationId::new(),
            name: "Fernando de Noronha".into(),
            is_active: true,
            available_from: now - Duration::days(400),
            available_until: None,
        }])
        .with_bookings([BookingRecord {
            id: BookingId::new(),
            client_id: ClientId::new(),
            destination_id: DestinationId::new(),
            amount: dec!(1500.50),
            status: BookingStatus::Confirmed,
            booked_at: now - Duration::minutes(10),
        }])
        .with_activity([ActivityEvent {
            id: ActivityId::new(),
            kind: ActivityKind::BookingCreated,
            description: "Contrato de Carla Mendes".into(),
            timestamp: now - Duration::minutes(10),
        }])
        .with_notifications([
            Notification {
                id: UNREAD_ID.parse::<NotificationId>().unwrap(),
                title: "Pagamento recebido".into(),
                message: "Carla Mendes pagou a entrada".into(),
                read: false,
                created_at: now - Duration::minutes(5),
            },
            Notification {
                id: READ_ID.parse::<NotificationId>().unwrap(),
                title: "Bem-vindo".into(),
                message: "Conheça o painel".into(),
                read: true,
                created_at: now - Duration::days(2),
            },
        ])
}

/// Router over `source` with notifications already loaded.
pub async fn app_with(source: InMemorySource) -> (Router, AppState) {
    let config = config();
    let controller = Arc::new(DashboardController::new(Arc::new(source), &config));
    controller.load().await;
    let state = AppState {
        controller,
        config: Arc::new(config),
    };
    (create_router(state.clone()), state)
}

/// Router over [`seeded_source`].
pub async fn app() -> (Router, AppState) {
    app_with(seeded_source()).await
}

/// Sends one request and decodes the JSON body.
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}
