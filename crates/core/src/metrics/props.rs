//! Property-based tests for period statistics.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use rodabem_shared::types::{BookingId, ClientId, DestinationId};
use rust_decimal::Decimal;

use super::service::MetricsAggregator;
use crate::period::ReportingPeriod;
use crate::source::{BookingRecord, BookingStatus, ClientRecord, DestinationRecord};

fn reference() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
}

fn period_strategy() -> impl Strategy<Value = ReportingPeriod> {
    prop_oneof![
        Just(ReportingPeriod::Daily),
        Just(ReportingPeriod::Weekly),
        Just(ReportingPeriod::Monthly),
    ]
}

fn status_strategy() -> impl Strategy<Value = BookingStatus> {
    prop_oneof![
        Just(BookingStatus::Pending),
        Just(BookingStatus::Confirmed),
        Just(BookingStatus::Cancelled),
    ]
}

/// Bookings within roughly a year around the reference, including refunds.
fn booking_strategy() -> impl Strategy<Value = BookingRecord> {
    (-100_000_000i64..100_000_000i64, -400i64..30, status_strategy()).prop_map(
        |(cents, day, status)| BookingRecord {
            id: BookingId::new(),
            client_id: ClientId::new(),
            destination_id: DestinationId::new(),
            amount: Decimal::new(cents, 2),
            status,
            booked_at: reference() + Duration::hours(day * 24 + 3),
        },
    )
}

fn client_strategy() -> impl Strategy<Value = ClientRecord> {
    (-800i64..30).prop_map(|day| ClientRecord {
        id: ClientId::new(),
        full_name: String::new(),
        registered_at: reference() + Duration::days(day),
    })
}

fn destination_strategy() -> impl Strategy<Value = DestinationRecord> {
    (any::<bool>(), -400i64..30, prop::option::of(-400i64..400)).prop_map(
        |(is_active, from, until)| DestinationRecord {
            id: DestinationId::new(),
            name: String::new(),
            is_active,
            available_from: reference() + Duration::days(from),
            available_until: until.map(|d| reference() + Duration::days(d)),
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// For every period, all three statistics are non-negative.
    #[test]
    fn prop_stats_never_negative(
        period in period_strategy(),
        clients in prop::collection::vec(client_strategy(), 0..30),
        destinations in prop::collection::vec(destination_strategy(), 0..15),
        bookings in prop::collection::vec(booking_strategy(), 0..60),
    ) {
        let window = period.window(reference());
        let stats = MetricsAggregator::aggregate(&clients, &destinations, &bookings, &window);

        prop_assert!(stats.monthly_revenue >= Decimal::ZERO);
        prop_assert!(stats.total_clients <= clients.len() as u64);
        prop_assert!(stats.active_destinations <= destinations.len() as u64);
    }

    /// Revenue of a longer window is never below that of a window it contains.
    #[test]
    fn prop_monthly_revenue_covers_daily(
        bookings in prop::collection::vec(booking_strategy(), 0..60),
    ) {
        let daily = MetricsAggregator::aggregate(
            &[], &[], &bookings, &ReportingPeriod::Daily.window(reference()),
        );
        let monthly = MetricsAggregator::aggregate(
            &[], &[], &bookings, &ReportingPeriod::Monthly.window(reference()),
        );

        prop_assert!(monthly.monthly_revenue >= daily.monthly_revenue);
    }
}
