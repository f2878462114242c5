use data_extractor::json_extractor::{discover_keys, extract_values, TraversalLimits};
use data_extractor::url_extractor::scanner::TRAILING_PUNCTUATION;
use data_extractor::url_extractor::{
    process_urls, scan_urls, sort_urls, FileTypeFilter, SortOption, UrlOptions,
};
use proptest::prelude::*;
use serde_json::{json, Value};
use std::collections::HashMap;

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|n| json!(n)),
        "[a-z]{0,6}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 64, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec(("[a-e]{1,2}", inner), 0..6)
                .prop_map(|entries| Value::Object(entries.into_iter().collect())),
        ]
    })
}

fn occurrences(value: &Value, key: &str) -> usize {
    match value {
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| usize::from(k == key) + occurrences(v, key))
            .sum(),
        Value::Array(items) => items.iter().map(|v| occurrences(v, key)).sum(),
        _ => 0,
    }
}

fn arb_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            "[a-z ]{0,5}",
            "(http|HTTPS|ftp|Http)://[a-z.]{1,6}(/[a-z.']{0,4})?[.,;:?!']?",
            "[ ,.<>\"'()\n]",
        ],
        0..10,
    )
    .prop_map(|parts| parts.concat())
}

fn arb_url() -> impl Strategy<Value = String> {
    prop_oneof![
        "https?://[a-c]\\.com/[a-z]{1,4}\\.(pdf|PDF|jpg|txt)(\\?x=[a-z]\\.pdf)?",
        "http://[a-c]\\.com/[a-z]{1,4}",
        Just("http://[::1/x.pdf".to_string()),
        Just("http://bad host/y.pdf".to_string()),
    ]
}

proptest! {
    #[test]
    fn keys_are_sorted_unique_and_deterministic(doc in arb_json()) {
        let keys = discover_keys(&doc, TraversalLimits::default()).unwrap();
        prop_assert!(keys.windows(2).all(|w| w[0] < w[1]));
        prop_assert_eq!(&keys, &discover_keys(&doc, TraversalLimits::default()).unwrap());
    }

    #[test]
    fn value_count_matches_occurrences(doc in arb_json(), key in "[a-e]{1,2}") {
        let values = extract_values(&doc, &key, TraversalLimits::default()).unwrap();
        prop_assert_eq!(values.len(), occurrences(&doc, &key));
    }

    #[test]
    fn pretty_values_reparse_equal(doc in arb_json(), key in "[a-e]{1,2}") {
        let values = extract_values(&doc, &key, TraversalLimits::default()).unwrap();
        let pretty = serde_json::to_string_pretty(&values).unwrap();
        let reparsed: Vec<Value> = serde_json::from_str(&pretty).unwrap();
        prop_assert_eq!(reparsed, values);
    }

    #[test]
    fn scanned_urls_are_well_formed(text in arb_text()) {
        for url in scan_urls(&text) {
            let lower = url.to_lowercase();
            prop_assert!(
                lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("ftp://")
            );
            let last = url.chars().last().unwrap();
            prop_assert!(!TRAILING_PUNCTUATION.contains(&last));
        }
    }

    #[test]
    fn uniqueness_toggle(urls in prop::collection::vec(arb_url(), 0..20)) {
        let unique = process_urls(&urls, &UrlOptions::default()).urls;
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for url in &unique {
            *counts.entry(url.as_str()).or_default() += 1;
        }
        prop_assert!(counts.values().all(|&n| n == 1));

        let all = process_urls(&urls, &UrlOptions { unique: false, ..UrlOptions::default() }).urls;
        for url in &urls {
            let expected = urls.iter().filter(|u| *u == url).count();
            let actual = all.iter().filter(|u| *u == url).count();
            prop_assert_eq!(expected, actual);
        }
    }

    #[test]
    fn file_type_survivors_match(urls in prop::collection::vec(arb_url(), 0..20)) {
        let options = UrlOptions {
            file_types: FileTypeFilter::new([".pdf"]),
            ..UrlOptions::default()
        };
        for url in process_urls(&urls, &options).urls {
            let parsed = url::Url::parse(&url);
            prop_assert!(parsed.is_ok());
            prop_assert!(parsed.unwrap().path().to_lowercase().ends_with(".pdf"));
        }
    }

    #[test]
    fn domain_sort_is_stable(hosts in prop::collection::vec(0usize..3, 0..20)) {
        let names = ["a.com", "b.com", "c.com"];
        let urls: Vec<String> = hosts
            .iter()
            .enumerate()
            .map(|(i, h)| format!("http://{}/{}", names[*h], i))
            .collect();

        let sorted = sort_urls(urls, SortOption::Domain);
        let index_of = |url: &String| -> usize { url.rsplit('/').next().unwrap().parse().unwrap() };
        for pair in sorted.windows(2) {
            let same_host = pair[0].split('/').nth(2) == pair[1].split('/').nth(2);
            if same_host {
                prop_assert!(index_of(&pair[0]) < index_of(&pair[1]));
            }
        }
    }
}
