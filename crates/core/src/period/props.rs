//! Property-based tests for period windows and chart buckets.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use std::collections::HashSet;

use super::types::ReportingPeriod;

/// Strategy for reference timestamps between 2000 and 2099.
fn reference_time() -> impl Strategy<Value = DateTime<Utc>> {
    (946_684_800i64..4_102_444_800i64).prop_map(|secs| Utc.timestamp_opt(secs, 0).unwrap())
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

    /// The stats window always contains the reference time.
    #[test]
    fn prop_window_contains_reference(
        period in period_strategy(),
        reference in reference_time(),
    ) {
        let window = period.window(reference);
        prop_assert!(window.contains(reference));
        prop_assert!(window.start < window.end);
    }

    /// Buckets have a fixed count, are contiguous and never share a label.
    #[test]
    fn prop_buckets_contiguous_and_unique(
        period in period_strategy(),
        reference in reference_time(),
    ) {
        let buckets: Vec<_> = period.buckets(reference).collect();
        prop_assert_eq!(buckets.len(), period.bucket_count());

        for pair in buckets.windows(2) {
            prop_assert_eq!(pair[0].window.end, pair[1].window.start);
        }

        let labels: HashSet<_> = buckets.iter().map(|b| b.label.clone()).collect();
        prop_assert_eq!(labels.len(), buckets.len());

        let series = period.series_window(reference);
        prop_assert_eq!(buckets[0].window.start, series.start);
        prop_assert_eq!(buckets[buckets.len() - 1].window.end, series.end);
    }

    /// Any instant inside the series window falls into exactly one bucket.
    #[test]
    fn prop_instant_in_exactly_one_bucket(
        period in period_strategy(),
        reference in reference_time(),
        offset_secs in 0i64..(400 * 86_400),
    ) {
        let series = period.series_window(reference);
        let span = (series.end - series.start).num_seconds();
        let at = series.start + Duration::seconds(offset_secs % span);

        let hits = period.buckets(reference).filter(|b| b.window.contains(at)).count();
        prop_assert_eq!(hits, 1);
    }

    /// Bucket boundaries depend only on the period and reference time.
    #[test]
    fn prop_buckets_deterministic(
        period in period_strategy(),
        reference in reference_time(),
    ) {
        let first: Vec<_> = period.buckets(reference).collect();
        let second: Vec<_> = period.buckets(reference).collect();
        prop_assert_eq!(first, second);
    }
}
