use std::sync::Arc;

use regindex::graph::HeteroNode;
use regindex::{DeclKind, HeteroGraph, NameIndex};

/// Parser rules and lexer rules as two separately indexed collections.
fn rules_and_tokens() -> (Arc<NameIndex<DeclKind>>, Arc<NameIndex<DeclKind>>) {
    let mut rules = NameIndex::builder();
    rules.add_name("expr", DeclKind::ParserRule, 0).unwrap();
    rules.add_name("atom", DeclKind::ParserRule, 20).unwrap();
    let mut tokens = NameIndex::builder();
    tokens.add_name("INT", DeclKind::LexerRule, 40).unwrap();
    tokens.add_name("PLUS", DeclKind::LexerRule, 50).unwrap();
    tokens.add_name("DIGIT", DeclKind::Fragment, 60).unwrap();
    (Arc::new(rules.build()), Arc::new(tokens.build()))
}

#[test]
fn test_rules_and_tokens_share_one_matrix() {
    let (rules, tokens) = rules_and_tokens();
    let mut builder = HeteroGraph::builder(rules.clone(), tokens.clone());
    let expr = HeteroNode::Left(rules.index_of("expr").unwrap());
    let atom = HeteroNode::Left(rules.index_of("atom").unwrap());
    let int = HeteroNode::Right(tokens.index_of("INT").unwrap());
    let plus = HeteroNode::Right(tokens.index_of("PLUS").unwrap());
    let digit = HeteroNode::Right(tokens.index_of("DIGIT").unwrap());
    builder.add_edge(expr, atom).unwrap();
    builder.add_edge(expr, plus).unwrap();
    builder.add_edge(atom, int).unwrap();
    builder.add_edge(int, digit).unwrap();
    let graph = builder.build();

    assert_eq!(graph.graph().node_count(), 5);
    assert_eq!(graph.global(int).unwrap(), 2 + tokens.index_of("INT").unwrap());
    assert_eq!(graph.local(graph.global(digit).unwrap()).unwrap(), digit);
    assert_eq!(graph.left_node("atom"), Some(atom));
    assert_eq!(graph.right_node("atom"), None);
    assert_eq!(graph.item(plus), Some("PLUS"));

    let closure = graph.closure_of(expr).unwrap();
    assert_eq!(closure.left.count(), 1);
    assert_eq!(closure.right.count(), 3);
    assert_eq!(graph.distance(expr, digit).unwrap(), Some(3));

    let users = graph.reverse_closure_of(digit).unwrap();
    let user_rules: Vec<_> = users
        .left
        .iter()
        .filter_map(|i| rules.get(i))
        .map(|r| r.name())
        .collect();
    assert_eq!(user_rules, vec!["atom", "expr"]);
    assert!(graph.children(HeteroNode::Right(3)).is_err());
}
