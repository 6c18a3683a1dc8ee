use std::sync::Arc;

use regindex::{DeclKind, NameIndex, RegionError};

use crate::helpers::fixtures::expr_grammar;

#[test]
fn test_round_trip_preserves_every_region() {
    let grammar = expr_grammar();
    for index in [&grammar.names, &grammar.bodies] {
        let bytes = index.to_bytes().unwrap();
        let decoded = NameIndex::<DeclKind>::from_bytes(&bytes).unwrap();
        assert_eq!(decoded.len(), index.len());
        for region in index.iter() {
            let other = decoded.region_for(region.name()).unwrap();
            assert_eq!(
                (other.kind(), other.start(), other.end()),
                (region.kind(), region.start(), region.end())
            );
        }
        assert_eq!(decoded.has_explicit_ends(), index.has_explicit_ends());
    }
}

#[test]
fn test_truncated_bytes_are_rejected() {
    let grammar = expr_grammar();
    let bytes = grammar.bodies.to_bytes().unwrap();
    for cut in [1, bytes.len() / 2, bytes.len() - 1] {
        let err = NameIndex::<DeclKind>::from_bytes(&bytes[..cut]).unwrap_err();
        assert!(matches!(err, RegionError::Decode(_)), "cut at {cut}: {err}");
    }
}

#[test]
fn test_decoded_index_is_shareable_before_first_position_query() {
    let grammar = expr_grammar();
    let bytes = grammar.names.to_bytes().unwrap();
    let decoded = Arc::new(NameIndex::<DeclKind>::from_bytes(&bytes).unwrap());
    let handles: Vec<_> = [14u32, 37, 49, 75]
        .into_iter()
        .map(|pos| {
            let index = decoded.clone();
            std::thread::spawn(move || index.at(pos).map(|r| r.name().to_owned()))
        })
        .collect();
    let found: Vec<_> = handles
        .into_iter()
        .map(|h| h.join().unwrap().unwrap())
        .collect();
    assert_eq!(found, vec!["expr", "term", "ID", "LETTER"]);
}
