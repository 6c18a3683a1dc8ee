use regindex::{IntervalStore, TextEdit};
use rstest::rstest;

use crate::helpers::fixtures::nested_store;

#[rstest]
#[case(3, Some((2, 5)))]
#[case(7, Some((2, 10)))]
#[case(15, Some((12, 18)))]
#[case(11, Some((0, 20)))]
#[case(20, None)]
#[case(29, None)]
#[case(39, Some((30, 40)))]
fn test_at_returns_innermost(#[case] pos: u32, #[case] expected: Option<(u32, u32)>) {
    let store = nested_store();
    assert_eq!(store.at(pos).map(|r| (r.start(), r.end())), expected);
}

#[test]
fn test_every_covered_offset_resolves_to_innermost_container() {
    let store = nested_store();
    for region in &store {
        for pos in region.start()..region.end() {
            let found = store.at(pos).unwrap();
            assert!(found.contains(pos));
            assert!(region.encloses(found.start(), found.end()));
            // Nothing nested deeper than `found` also covers `pos`.
            for child in found.children() {
                assert!(!child.contains(pos));
            }
        }
    }
}

#[test]
fn test_containing_walks_outward() {
    let store = nested_store();
    let chain: Vec<_> = store.containing(3).map(|r| *r.key().unwrap()).collect();
    assert_eq!(chain, vec!["inner", "mid", "outer"]);
}

#[test]
fn test_navigation() {
    let store = nested_store();
    let outer = store.get(0).unwrap();
    let children: Vec<_> = outer.children().iter().map(|r| *r.key().unwrap()).collect();
    assert_eq!(children, vec!["mid", "tail"]);

    let inner = store.get(2).unwrap();
    assert_eq!(inner.parent().and_then(|r| r.key().copied()), Some("mid"));
    assert_eq!(inner.outermost().key().copied(), Some("outer"));
    assert_eq!(inner.depth(), 2);
    assert!(store.get(4).unwrap().is_top_level());

    let roots: Vec<_> = store
        .outermost_regions()
        .map(|r| *r.key().unwrap())
        .collect();
    assert_eq!(roots, vec!["outer", "last"]);
}

#[test]
fn test_key_index_lookup() {
    let store = nested_store();
    let index = store.index();
    assert_eq!(index.len(), 5);
    assert_eq!(index.get(&"tail").map(|r| r.start()), Some(12));
    assert_eq!(index.collisions(), 0);
}

#[test]
fn test_edit_keeps_store_valid() {
    let store = nested_store();
    let edited = store.apply_edit(TextEdit::insertion(3, 4)).unwrap();
    edited.check_invariants().unwrap();
    assert_eq!(
        edited.at(8).map(|r| (r.start(), r.end())),
        Some((2, 9)),
        "inner [2,5) grew to [2,9)"
    );
    assert_eq!(edited.last().map(|r| (r.start(), r.end())), Some((34, 44)));
}

#[test]
fn test_frozen_store_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<IntervalStore<&'static str>>();

    let store = std::sync::Arc::new(nested_store());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let store = store.clone();
            std::thread::spawn(move || store.at(7).map(|r| r.index()))
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), Some(1));
    }
}
