//! Property-based tests for mgc
//!
//! Query construction and lenient decoding are checked over generated
//! inputs rather than a handful of fixtures.

#[cfg(test)]
mod tests {
    use crate::resources::audit::{EventFilter, ListEventsParams};
    use crate::resources::lbaas::{BackendTargets, InstanceTarget, RawTarget};
    use crate::resources::segment;
    use chrono::NaiveDate;
    use mgc_core::pagination::ListQuery;
    use proptest::collection::btree_map;
    use proptest::prelude::*;

    // ===== Strategy Generators =====

    fn arb_list_query() -> impl Strategy<Value = ListQuery> {
        (
            proptest::option::of(0u32..10_000),
            proptest::option::of(1u32..500),
            proptest::option::of("[a-z_]{1,12}:(asc|desc)"),
        )
            .prop_map(|(offset, limit, sort)| ListQuery { offset, limit, sort })
    }

    fn arb_filter_text() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9%._ -]{1,24}"
    }

    fn decode(encoded: &str) -> Vec<(String, String)> {
        url::form_urlencoded::parse(encoded.as_bytes())
            .into_owned()
            .collect()
    }

    // ===== Query Construction Properties =====

    proptest! {
        /// Property: pagination and filter parameters never clobber each other
        #[test]
        fn prop_event_params_keep_pagination_and_filters(
            query in arb_list_query(),
            type_like in proptest::option::of(arb_filter_text()),
            tenant in proptest::option::of("[a-z0-9-]{1,16}"),
            data in btree_map("[a-z_]{1,8}", arb_filter_text(), 0..4),
        ) {
            let mut filter = EventFilter::new();
            filter.type_like = type_like.clone();
            filter.tenant_id = tenant.clone();
            filter.data = data.clone();

            let params = ListEventsParams { filter, query: query.clone() }.to_query_params();
            let pairs = decode(&params.encode());
            let lookup = |key: &str| {
                pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
            };

            prop_assert_eq!(lookup("_offset"), query.offset.map(|v| v.to_string()));
            prop_assert_eq!(lookup("_limit"), query.limit.map(|v| v.to_string()));
            prop_assert_eq!(lookup("_sort"), query.sort.clone());
            prop_assert_eq!(lookup("type__like"), type_like);
            prop_assert_eq!(lookup("X-Tenant-ID"), tenant);
            for (key, value) in &data {
                prop_assert_eq!(lookup(&format!("data.{key}")), Some(value.clone()));
            }
        }

        /// Property: the same filter yields the same non-pagination parameters on every page
        #[test]
        fn prop_filters_constant_across_pages(
            data in btree_map("[a-z]{1,6}", arb_filter_text(), 1..4),
            first in 0u32..1_000,
            second in 0u32..1_000,
        ) {
            let mut filter = EventFilter::new().product_like("compute");
            filter.data = data;

            let strip = |offset: u32| {
                let params = ListEventsParams {
                    filter: filter.clone(),
                    query: ListQuery::new().offset(offset).limit(50),
                }
                .to_query_params();
                decode(&params.encode())
                    .into_iter()
                    .filter(|(k, _)| k != "_offset")
                    .collect::<Vec<_>>()
            };

            prop_assert_eq!(strip(first), strip(second));
        }

        /// Property: blank identifiers never reach a URL path
        #[test]
        fn prop_segment_rejects_whitespace(blank in "[ \t\n]{0,8}") {
            prop_assert!(segment("id", &blank).is_err());
        }

        /// Property: identifiers with content pass through untouched
        #[test]
        fn prop_segment_passes_identifiers(id in "[a-z0-9-]{1,36}") {
            prop_assert_eq!(segment("id", &id).unwrap(), id.as_str());
        }
    }

    // ===== Decoding Properties =====

    proptest! {
        /// Property: zone-less timestamps are read as UTC wall-clock time
        #[test]
        fn prop_naive_timestamps_are_utc(
            day in 0u32..20_000,
            secs in 0u32..86_400,
            micros in 0u32..1_000_000,
        ) {
            let date = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap()
                + chrono::Duration::days(day as i64);
            let naive = date
                .and_hms_micro_opt(secs / 3600, (secs / 60) % 60, secs % 60, micros)
                .unwrap();

            let with_t = naive.format("%Y-%m-%dT%H:%M:%S%.6f").to_string();
            let with_space = naive.format("%Y-%m-%d %H:%M:%S%.6f").to_string();

            prop_assert_eq!(crate::timestamp::parse(&with_t), Some(naive.and_utc()));
            prop_assert_eq!(crate::timestamp::parse(&with_space), Some(naive.and_utc()));
        }

        /// Property: backend targets carry a discriminant matching their variant
        #[test]
        fn prop_backend_targets_tagged(
            ports in proptest::collection::vec(1u16..u16::MAX, 0..6),
            raw in any::<bool>(),
        ) {
            let targets = if raw {
                BackendTargets::Raw(ports.iter().map(|p| RawTarget::new("10.0.0.1", *p)).collect())
            } else {
                BackendTargets::Instance(
                    ports.iter().map(|p| InstanceTarget::new("nic-1", *p)).collect(),
                )
            };
            let body = serde_json::to_value(&targets).unwrap();

            prop_assert_eq!(&body["targets_type"], if raw { "raw" } else { "instance" });
            prop_assert_eq!(body["targets"].as_array().map(Vec::len), Some(ports.len()));

            let decoded: BackendTargets = serde_json::from_value(body).unwrap();
            prop_assert_eq!(decoded, targets);
        }
    }
}
