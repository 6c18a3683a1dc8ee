use regindex::{IntervalStore, IntervalStoreBuilder, RegionError};
use rstest::rstest;

/// Snapshot of every interval a builder would freeze.
fn snapshot(builder: &IntervalStoreBuilder<u32>) -> Vec<(u32, u32, Option<u32>)> {
    let store = builder.clone().build();
    store
        .iter()
        .map(|r| (r.start(), r.end(), r.key().copied()))
        .collect()
}

fn seeded() -> IntervalStoreBuilder<u32> {
    let mut builder = IntervalStore::builder();
    builder.add(Some(1), 0, 20).unwrap();
    builder.add(Some(2), 2, 10).unwrap();
    builder.add(Some(3), 2, 5).unwrap();
    builder
}

#[rstest]
#[case::straddles_parent(6, 12)]
#[case::straddles_root(15, 25)]
#[case::starts_before_previous(1, 3)]
#[case::empty(7, 7)]
#[case::inverted(9, 8)]
fn test_rejected_insertion_leaves_builder_unchanged(#[case] start: u32, #[case] end: u32) {
    let mut builder = seeded();
    let before = snapshot(&builder);
    let err = builder.add(Some(99), start, end).unwrap_err();
    assert!(matches!(
        err,
        RegionError::InvalidRange { .. } | RegionError::OutOfOrderInsertion { .. }
    ));
    assert_eq!(snapshot(&builder), before);
    // The builder still accepts a well-ordered continuation.
    builder.add(Some(4), 6, 9).unwrap();
    assert_eq!(builder.len(), 4);
}

#[test]
fn test_straddle_error_names_both_intervals() {
    let mut builder = seeded();
    let message = builder.add(None, 6, 12).unwrap_err().to_string();
    assert!(message.contains("6..12"), "{message}");
    assert!(message.contains("2..10"), "{message}");
}

#[test]
fn test_sibling_after_closed_scope_is_accepted() {
    let mut builder = seeded();
    builder.add(None, 5, 10).unwrap();
    builder.add(None, 10, 20).unwrap();
    builder.add(None, 20, 21).unwrap();
    let store = builder.build();
    store.check_invariants().unwrap();
    assert!(store.has_nesting());
    assert_eq!(store.outermost_regions().count(), 2);
}
