//! Property-based tests for chart series.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::service::ChartSeriesBuilder;
use crate::period::ReportingPeriod;

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

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Series length depends only on the period, never on data volume.
    #[test]
    fn prop_series_length_fixed(
        period in period_strategy(),
        offsets in prop::collection::vec(-500_000i64..10_000, 0..200),
    ) {
        let samples: Vec<_> = offsets
            .iter()
            .map(|m| (reference() + Duration::minutes(*m), Decimal::ONE))
            .collect();

        let series = ChartSeriesBuilder::bucketize(period.buckets(reference()), &samples);
        prop_assert_eq!(series.len(), period.bucket_count());
    }

    /// Each sample inside the series window is counted exactly once.
    #[test]
    fn prop_samples_counted_once(
        period in period_strategy(),
        offsets in prop::collection::vec(-500_000i64..10_000, 0..200),
    ) {
        let window = period.series_window(reference());
        let samples: Vec<_> = offsets
            .iter()
            .map(|m| (reference() + Duration::minutes(*m), Decimal::ONE))
            .collect();
        let inside = samples.iter().filter(|(at, _)| window.contains(*at)).count();

        let series = ChartSeriesBuilder::bucketize(period.buckets(reference()), &samples);
        let total: Decimal = series.iter().map(|p| p.value).sum();

        prop_assert_eq!(total, Decimal::from(inside));
    }
}
