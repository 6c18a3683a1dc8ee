use std::sync::Arc;

use regindex::graph::ReferenceOutcome;
use regindex::{DeclKind, NameIndex, NamedRegion, ReferenceGraph, RegionError};

use crate::helpers::fixtures::expr_grammar;

fn region_names(regions: &[NamedRegion<'_, DeclKind>]) -> Vec<String> {
    regions.iter().map(|r| r.name().to_owned()).collect()
}

/// References of `expr : term '+' expr ; term : ID ; ID : LETTER+ ;` plus
/// one dangling `WS` reference inside `term`.
fn expr_references() -> ReferenceGraph<DeclKind> {
    let grammar = expr_grammar();
    let mut builder = ReferenceGraph::builder(grammar.names).with_bodies(grammar.bodies);
    builder.add_reference("term", 21, 25).unwrap();
    builder.add_reference("expr", 30, 34).unwrap();
    builder.add_reference("ID", 44, 46).unwrap();
    builder
        .add_reference_expecting("WS", 46, 48, Some(DeclKind::LexerRule))
        .unwrap();
    builder.add_reference("LETTER", 54, 60).unwrap();
    builder.build()
}

#[test]
fn test_foo_bar_scenario() {
    let mut names = NameIndex::builder();
    names.add("Foo", DeclKind::ParserRule, 0, 3).unwrap();
    names.add("Bar", DeclKind::ParserRule, 10, 13).unwrap();
    let mut bodies = NameIndex::builder();
    bodies.add("Bar", DeclKind::ParserRule, 9, 20).unwrap();
    let names = Arc::new(names.build());

    let bodies = Arc::new(bodies.build());
    let mut builder = ReferenceGraph::builder(names.clone()).with_bodies(bodies);
    builder.add_reference("Foo", 14, 17).unwrap();
    let outcome = builder.add_reference("Baz", 17, 20).unwrap();
    assert_eq!(outcome, ReferenceOutcome::Unknown { ordinal: 0 });
    let graph = builder.build();

    let foo = names.index_of("Foo").unwrap();
    let bar = names.index_of("Bar").unwrap();
    assert!(graph.graph().contains_edge(bar, foo));
    assert_eq!(graph.children(bar).unwrap().iter().collect::<Vec<_>>(), vec![foo]);
    assert_eq!(graph.parents(foo).unwrap().iter().collect::<Vec<_>>(), vec![bar]);
    let top = region_names(&graph.top_level_or_orphan_rules());
    assert!(top.contains(&"Bar".to_owned()));
    assert!(!top.contains(&"Foo".to_owned()));

    let baz = graph.unknown_references().get(0).unwrap();
    assert_eq!((baz.start(), baz.end()), (17, 20));
    assert_eq!(baz.key().unwrap().name, "Baz");
}

#[test]
fn test_expr_grammar_structure() {
    let graph = expr_references();
    assert!(graph.is_recursive_rule("expr"));
    assert_eq!(region_names(&graph.children_of_name("expr")), vec!["expr", "term"]);
    assert_eq!(
        region_names(&graph.closure_of_name("expr")),
        vec!["ID", "LETTER", "expr", "term"]
    );
    assert_eq!(
        region_names(&graph.reverse_closure_of_name("LETTER")),
        vec!["ID", "expr", "term"]
    );
    assert_eq!(region_names(&graph.top_level_or_orphan_rules()), vec!["expr"]);
    assert_eq!(region_names(&graph.bottom_level_rules()), vec!["LETTER"]);

    let index = graph.names();
    let expr = index.index_of("expr").unwrap();
    let letter = index.index_of("LETTER").unwrap();
    assert_eq!(graph.distance(expr, letter).unwrap(), Some(3));
    assert_eq!(graph.distance(letter, expr).unwrap(), None);
    assert_eq!(graph.distance(expr, expr).unwrap(), Some(0));
}

#[test]
fn test_closure_is_monotone_over_children() {
    let graph = expr_references();
    for node in 0..graph.names().len() {
        let closure = graph.closure_of(node).unwrap();
        let children = graph.children(node).unwrap();
        assert!(children.is_subset(&closure));
        for child in children {
            assert!(graph.closure_of(child).unwrap().is_subset(&closure));
        }
    }
}

#[test]
fn test_dangling_reference_is_data_not_error() {
    let graph = expr_references();
    let unknown = graph.unknown_at(47).unwrap();
    assert_eq!(unknown.name, "WS");
    assert_eq!(unknown.expected, Some(DeclKind::LexerRule));
    assert_eq!(unknown.container, graph.names().index_of("term"));
    let suggestions = region_names(&graph.suggestions_for(unknown, 1));
    assert_eq!(suggestions, vec!["ID"]);
}

#[test]
fn test_reference_sites() {
    let graph = expr_references();
    assert_eq!(graph.reference_at(22).map(|r| r.name()), Some("term"));
    assert_eq!(graph.reference_at(47), None);
    let uses: Vec<_> = graph
        .references_to("expr")
        .iter()
        .map(|r| (r.start(), r.end()))
        .collect();
    assert_eq!(uses, vec![(30, 34)]);
}

#[test]
fn test_out_of_range_node_is_an_error() {
    let graph = expr_references();
    let len = graph.names().len();
    assert_eq!(
        graph.closure_of(len).unwrap_err(),
        RegionError::IndexOutOfRange { index: len, len }
    );
    assert!(graph.distance(0, len + 3).is_err());
}
