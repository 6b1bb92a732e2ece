//! Property-based tests for the campaign models
//!
//! Filtering and aggregation invariants that must hold for any record set.

use proptest::prelude::*;

use crate::{
    email_funnel, format_month_label, monthly_engagement, parse_month_label, CampaignRecord,
    FacetValues, FilterCriteria, KpiSummary,
};

prop_compose! {
    fn arb_month_label()(year in 1900i32..2100, month in 1u32..=12) -> String {
        format_month_label(year, month).unwrap()
    }
}

prop_compose! {
    fn arb_record()(
        month in prop_oneof![arb_month_label(), Just("Unknown".to_string())],
        business_unit in prop_oneof![Just(String::new()), "[A-Z][a-z]{2,8}"],
        nurture_name in "[A-Za-z ]{0,12}",
        nurture_type in prop_oneof![Just("Onboarding".to_string()), Just("Retention".to_string())],
        total_sent in 0u64..1_000_000,
        delivered in 0u64..1_000_000,
        bounces in 0u64..10_000,
        opens in 0u64..1_000_000,
        clicks in 0u64..1_000_000,
        unsubscribes in 0u64..1_000,
    ) -> CampaignRecord {
        CampaignRecord {
            month,
            business_unit,
            nurture_name,
            nurture_type,
            total_sent,
            delivered,
            bounces,
            opens,
            clicks,
            unsubscribes,
        }
    }
}

proptest! {
    #[test]
    fn prop_month_label_round_trip(year in 0i32..10000, month in 1u32..=12) {
        let label = format_month_label(year, month).unwrap();
        prop_assert_eq!(parse_month_label(&label), Some((year, month)));
    }

    #[test]
    fn prop_filter_preserves_order_and_subset(
        records in prop::collection::vec(arb_record(), 0..40),
        pick in any::<prop::sample::Index>(),
    ) {
        let criteria = if records.is_empty() {
            FilterCriteria::new()
        } else {
            FilterCriteria::new().with_month(records[pick.index(records.len())].month.clone())
        };

        let filtered = criteria.apply(&records);
        prop_assert!(filtered.iter().all(|r| criteria.matches(r)));

        let expected: Vec<CampaignRecord> =
            records.iter().filter(|r| criteria.matches(r)).cloned().collect();
        prop_assert_eq!(filtered, expected);
    }

    #[test]
    fn prop_facets_cover_every_non_empty_value(records in prop::collection::vec(arb_record(), 0..40)) {
        let facets = FacetValues::from_records(&records);
        for record in &records {
            prop_assert!(facets.months.contains(&record.month));
            if !record.business_unit.is_empty() {
                prop_assert!(facets.business_units.contains(&record.business_unit));
            }
        }
        prop_assert!(facets.business_units.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn prop_monthly_series_sums_match_funnel(records in prop::collection::vec(arb_record(), 0..40)) {
        let series = monthly_engagement(&records);
        let funnel = email_funnel(&records);

        let opens: u64 = series.iter().map(|m| m.opens).sum();
        let clicks: u64 = series.iter().map(|m| m.clicks).sum();
        prop_assert_eq!(opens, funnel[2].count);
        prop_assert_eq!(clicks, funnel[3].count);

        let kpis = KpiSummary::from_records(&records);
        prop_assert_eq!(kpis.total_sent, funnel[0].count);
        prop_assert!(kpis.bounce_rate >= 0.0);
    }
}
