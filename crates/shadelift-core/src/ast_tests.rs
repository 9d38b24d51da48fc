use crate::{AstBuilder, BinaryOp, Literal, NodeKind};

#[test]
fn path_builds_nested_members() {
    let mut b = AstBuilder::new();
    let pos = b.path("this.attributes.position");
    let ret = b.ret(Some(pos));
    b.function("VertexPosition", &[], vec![ret]);
    let ast = b.finish();

    assert_eq!(ast.dotted_path(pos), None);
    let NodeKind::Member { object, .. } = ast.kind(pos) else {
        panic!("expected member");
    };
    let NodeKind::Member { object: this, .. } = ast.kind(*object) else {
        panic!("expected member");
    };
    assert_eq!(ast.kind(*this), &NodeKind::This);
}

#[test]
fn dotted_path_of_namespace_call() {
    let mut b = AstBuilder::new();
    let x = b.num("1");
    let callee = b.path("Math.cos");
    let call = b.call(callee, vec![x]);
    let ast = b.finish();

    assert_eq!(ast.dotted_path(callee).as_deref(), Some("Math.cos"));
    assert_eq!(ast.dotted_path(call), None);
    assert_eq!(ast.dotted_path(x), None);
}

#[test]
fn find_function_by_name() {
    let mut b = AstBuilder::new();
    let f = b.function("helper", &["a"], vec![]);
    let g = b.function("other", &[], vec![]);
    let ast = b.finish();

    assert_eq!(ast.find_function("helper"), Some(f));
    assert_eq!(ast.find_function("other"), Some(g));
    assert_eq!(ast.find_function("missing"), None);
    assert_eq!(ast.function_name(f), Some("helper"));
}

#[test]
fn rename_only_touches_identifiers() {
    let mut b = AstBuilder::new();
    let x = b.ident("x");
    let one = b.num("1");
    let mut ast = b.finish();

    ast.rename(x, "y");
    ast.rename(one, "z");
    assert_eq!(ast.ident_name(x), Some("y"));
    assert_eq!(ast.kind(one), &NodeKind::Literal(Literal::Number("1".into())));
}

#[test]
fn literal_index_parses_integers_only() {
    assert_eq!(Literal::Number("3".into()).as_index(), Some(3));
    assert_eq!(Literal::Number("1.5".into()).as_index(), None);
    assert_eq!(Literal::Bool(true).as_index(), None);
}

#[test]
fn strict_operators_collapse_in_target_spelling() {
    assert_eq!(BinaryOp::from_source("==="), Some(BinaryOp::StrictEq));
    assert_eq!(BinaryOp::StrictEq.as_glsl(), "==");
    assert_eq!(BinaryOp::StrictNotEq.as_glsl(), "!=");
    assert_eq!(BinaryOp::from_source("instanceof"), None);
}
