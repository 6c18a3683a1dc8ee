//! Small grammars expressed as already-extracted declarations.

use std::sync::Arc;

use regindex::{DeclKind, IntervalStore, NameIndex};

/// Declaration sites (name text only) and whole-rule body regions of:
///
/// ```text
/// grammar Expr;          // 0..13
/// expr : term '+' expr ; // 14..36, expr @14
/// term : ID ;            // 37..48, term @37
/// ID   : LETTER+ ;       // 49..65, ID @49
/// fragment LETTER : [a-z] ; // 66..91, LETTER @75
/// ```
pub struct ExprGrammar {
    pub names: Arc<NameIndex<DeclKind>>,
    pub bodies: Arc<NameIndex<DeclKind>>,
}

pub fn expr_grammar() -> ExprGrammar {
    let decls = [
        ("expr", DeclKind::ParserRule, 14, 36),
        ("term", DeclKind::ParserRule, 37, 48),
        ("ID", DeclKind::LexerRule, 49, 65),
        ("LETTER", DeclKind::Fragment, 75, 91),
    ];
    let mut names = NameIndex::builder();
    let mut bodies = NameIndex::builder();
    for (name, kind, start, body_end) in decls {
        names.add_name(name, kind, start).unwrap();
        let body_start = if kind == DeclKind::Fragment { 66 } else { start };
        bodies.add(name, kind, body_start, body_end).unwrap();
    }
    ExprGrammar {
        names: Arc::new(names.build()),
        bodies: Arc::new(bodies.build()),
    }
}

/// `[0,20) > [2,10) > [2,5)`, then `[12,18)` inside the first, then `[30,40)`.
pub fn nested_store() -> IntervalStore<&'static str> {
    let mut builder = IntervalStore::builder();
    for (key, start, end) in [
        ("outer", 0, 20),
        ("mid", 2, 10),
        ("inner", 2, 5),
        ("tail", 12, 18),
        ("last", 30, 40),
    ] {
        builder.add(Some(key), start, end).unwrap();
    }
    builder.build()
}
