//! Stress tests: concurrent use, cache churn and adversarial inputs.

use std::sync::Arc;
use std::thread;
use wildcard_param::{MatchConfig, WildcardMatcher};

#[test]
fn test_stress_concurrent_matching_and_registration() {
    let matcher = Arc::new(WildcardMatcher::new());

    let readers: Vec<_> = (0..8)
        .map(|t| {
            let matcher = Arc::clone(&matcher);
            thread::spawn(move || {
                for i in 0..200 {
                    let input = format!("t{t}-{i}");
                    let params = matcher
                        .test(&input, "t[digit:thread]-[digit:iteration]")
                        .expect("built-in digit filter must always match");
                    assert_eq!(params["thread"], t.to_string());
                    assert_eq!(params["iteration"], i.to_string());
                }
            })
        })
        .collect();

    let writer = {
        let matcher = Arc::clone(&matcher);
        thread::spawn(move || {
            for i in 0..50 {
                matcher.register_filter(&format!("dyn{i}"), "([a-z]+)");
            }
        })
    };

    for handle in readers {
        handle.join().unwrap();
    }
    writer.join().unwrap();

    for i in 0..50 {
        assert!(matcher.has_filter(&format!("dyn{i}")));
        assert!(matcher.test("abc", &format!("[dyn{i}:]")).is_some());
    }
}

#[test]
fn test_stress_cache_churn() {
    let matcher =
        WildcardMatcher::with_config(MatchConfig::new().with_cache_size(8)).unwrap();

    for i in 0..500 {
        let pattern = format!("item{}-[digit:n]", i % 40);
        let input = format!("item{}-{i}", i % 40);
        assert_eq!(matcher.test(&input, &pattern).unwrap()["n"], i.to_string());
    }

    let stats = matcher.cache_stats();
    assert_eq!(stats.total_lookups, 500);
    assert!(stats.evictions > 0);
}

#[test]
fn test_stress_pathological_input() {
    let matcher = WildcardMatcher::new();
    let input = "a".repeat(60_000);

    // Several lazy wildcards around a literal that never appears.
    assert!(matcher
        .test(&input, "[all:]b[all:]b[all:]b[all:]")
        .is_none());

    let params = matcher.test(&format!("{input}!"), "[all:body]!").unwrap();
    assert_eq!(params["body"].len(), 60_000);
}

#[test]
fn test_stress_many_placeholders() {
    let matcher = WildcardMatcher::new();
    let pattern = vec!["[digit:]"; 200].join(",");
    let input = (0..200).map(|i| i.to_string()).collect::<Vec<_>>().join(",");

    let params = matcher.test(&input, &pattern).unwrap();
    assert_eq!(params.len(), 200);
    assert_eq!(params["0"], "0");
    assert_eq!(params["199"], "199");
}

#[test]
fn test_stress_large_batch() {
    let matcher = WildcardMatcher::new();
    let inputs: Vec<String> = (0..10_000).map(|i| format!("user{i}@example.com")).collect();

    let results = matcher.test_batch(&inputs, "[alnum:user]@[all:domain]");
    assert_eq!(results.len(), inputs.len());
    assert!(results.iter().all(Option::is_some));
    assert_eq!(results[9_999].as_ref().unwrap()["user"], "user9999");
    assert_eq!(results[0].as_ref().unwrap()["domain"], "example.com");
}
