use std::collections::BTreeSet;

use regindex::{DeclKind, IndexedCollection, NameIndex, RegionKind};
use rstest::rstest;

use crate::helpers::fixtures::expr_grammar;

#[test]
fn test_size_counts_distinct_names_and_duplicates_hold_the_rest() {
    let declarations = [
        ("expr", DeclKind::ParserRule, 0, 4),
        ("WS", DeclKind::LexerRule, 10, 12),
        ("expr", DeclKind::ParserRule, 20, 24),
        ("WS", DeclKind::TokensEntry, 30, 32),
        ("WS", DeclKind::Channel, 40, 42),
        ("DEFAULT", DeclKind::Mode, 50, 57),
    ];
    let mut builder = NameIndex::builder();
    for (name, kind, start, end) in declarations {
        builder.add(name, kind, start, end).unwrap();
    }
    let index = builder.build();

    let distinct: BTreeSet<_> = declarations.iter().map(|d| d.0).collect();
    assert_eq!(index.len(), distinct.len());

    for name in distinct {
        let all: Vec<_> = declarations.iter().filter(|d| d.0 == name).collect();
        let primary = index.region_for(name).unwrap();
        let best = all.iter().map(|d| d.1.ordinal()).min().unwrap();
        assert_eq!(primary.kind().ordinal(), best);
        assert_eq!(index.duplicates_of(name).len(), all.len() - 1);
    }

    // First occurrence wins ties.
    assert_eq!(index.region_for("expr").unwrap().start(), 0);
    assert_eq!(index.duplicates_of("expr")[0].start, 20);
    // WS: the lexer rule outranks the channel and tokens entries.
    assert_eq!(index.region_for("WS").unwrap().kind(), DeclKind::LexerRule);
    let secondary = index.secondary();
    assert_eq!(secondary.region_for("WS").unwrap().kind(), DeclKind::Channel);
}

#[rstest]
#[case(14, Some("expr"))]
#[case(17, Some("expr"))]
#[case(18, None)]
#[case(49, Some("ID"))]
#[case(80, Some("LETTER"))]
#[case(81, None)]
fn test_at_position(#[case] pos: u32, #[case] expected: Option<&str>) {
    let grammar = expr_grammar();
    assert_eq!(grammar.names.at(pos).map(|r| r.name()), expected);
}

#[test]
fn test_bodies_and_names_agree_on_ordinals() {
    let grammar = expr_grammar();
    for region in grammar.names.iter() {
        let body = grammar.bodies.region_for(region.name()).unwrap();
        assert_eq!(body.index(), region.index());
        assert!(body.start() <= region.start() && region.end() <= body.end());
    }
}

#[test]
fn test_lookup_through_collection_trait() {
    fn position<C>(items: &C, name: &str) -> Option<usize>
    where
        C: IndexedCollection<Item = str> + ?Sized,
    {
        items.index_of(name)
    }
    let grammar = expr_grammar();
    assert_eq!(position(&*grammar.names, "term"), grammar.names.index_of("term"));
    assert_eq!(position(&grammar.names, "missing"), None);
    assert_eq!(IndexedCollection::len(&*grammar.names), 4);
}

#[test]
fn test_did_you_mean() {
    let grammar = expr_grammar();
    let suggestions: Vec<_> = grammar
        .names
        .top_similar_names("trem", 2)
        .iter()
        .map(|r| r.name())
        .collect();
    assert_eq!(suggestions[0], "term");
    assert_eq!(suggestions.len(), 2);
}

#[test]
fn test_sans_drops_names_and_renumbers() {
    let grammar = expr_grammar();
    let smaller = grammar.names.sans(["term", "nope"]);
    assert_eq!(smaller.len(), 3);
    assert!(!smaller.contains("term"));
    let names: Vec<_> = smaller.names().iter().collect();
    assert_eq!(names, vec!["ID", "LETTER", "expr"]);
    // The original is untouched.
    assert!(grammar.names.contains("term"));
}

#[rstest]
#[case::insert_before_all(0, 5, &[("expr", 19, 23), ("LETTER", 80, 86)])]
#[case::insert_between(40, 3, &[("expr", 14, 18), ("ID", 52, 54)])]
#[case::delete_inside_name(15, -2, &[("expr", 14, 16), ("term", 35, 39)])]
fn test_shifted_by(
    #[case] at: u32,
    #[case] amount: i64,
    #[case] expected: &[(&str, u32, u32)],
) {
    let grammar = expr_grammar();
    let shifted = grammar.names.shifted_by(amount, at).unwrap();
    for &(name, start, end) in expected {
        let region = shifted.region_for(name).unwrap();
        assert_eq!((region.start(), region.end()), (start, end), "{name}");
    }
}

#[test]
fn test_shift_drops_swallowed_regions() {
    let grammar = expr_grammar();
    // Delete 36..52: swallows `term` and `ID` whole.
    let shifted = grammar.names.shifted_by(-16, 36).unwrap();
    assert!(!shifted.contains("term"));
    assert!(!shifted.contains("ID"));
    assert_eq!(shifted.len(), 2);
    let letter = shifted.region_for("LETTER").unwrap();
    assert_eq!((letter.start(), letter.end()), (59, 65));
    assert_eq!(shifted.at(60).map(|r| r.name()), Some("LETTER"));
}
