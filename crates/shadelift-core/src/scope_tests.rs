use crate::{AstBuilder, BinaryOp, NodeKind, Scopes};

#[test]
fn parameters_shadow_globals() {
    let mut b = AstBuilder::new();
    let inner = b.ident("x");
    let ret = b.ret(Some(inner));
    let f = b.function("f", &["x"], vec![ret]);
    let outer = b.ident("x");
    let ret = b.ret(Some(outer));
    b.function("g", &[], vec![ret]);
    let ast = b.finish();
    let scopes = Scopes::resolve(&ast);

    let NodeKind::Function { params, .. } = ast.kind(f) else {
        panic!("expected function");
    };
    let local = scopes.binding_of(inner).unwrap();
    assert_eq!(scopes.get(local).scope, f);
    assert_eq!(scopes.occurrences(inner), vec![params[0], inner]);

    let global = scopes.binding_of(outer).unwrap();
    assert_ne!(local, global);
    assert_eq!(scopes.get(global).scope, ast.root());
}

#[test]
fn var_declarations_bind_to_their_block() {
    let mut b = AstBuilder::new();
    let one = b.num("1");
    let decl = b.var("t", Some(one));
    let t = b.ident("t");
    let two = b.num("2");
    let product = b.binary(BinaryOp::Mul, t, two);
    let ret = b.ret(Some(product));
    let f = b.function("f", &[], vec![decl, ret]);
    let ast = b.finish();
    let scopes = Scopes::resolve(&ast);

    let NodeKind::Function { body, .. } = ast.kind(f) else {
        panic!("expected function");
    };
    let binding = scopes.get(scopes.binding_of(t).unwrap());
    assert_eq!(binding.scope, *body);
    assert_eq!(binding.occurrences.len(), 2);
    assert_eq!(binding.name, "t");
}

#[test]
fn for_init_declares_loop_variable() {
    let mut b = AstBuilder::new();
    let zero = b.num("0");
    let init = b.var("i", Some(zero));
    let i = b.ident("i");
    let four = b.num("4");
    let test = b.binary(BinaryOp::Lt, i, four);
    let body = b.block(vec![]);
    let for_loop = b.for_loop(Some(init), Some(test), None, body);
    b.function("f", &[], vec![for_loop]);
    let ast = b.finish();
    let scopes = Scopes::resolve(&ast);

    let binding = scopes.get(scopes.binding_of(i).unwrap());
    assert_eq!(binding.scope, for_loop);
}

#[test]
fn property_names_never_join_bindings() {
    let mut b = AstBuilder::new();
    let member = b.path("attributes.x");
    let x = b.ident("x");
    let s1 = b.expr_stmt(member);
    let s2 = b.expr_stmt(x);
    b.function("f", &[], vec![s1, s2]);
    let ast = b.finish();
    let scopes = Scopes::resolve(&ast);

    let NodeKind::Member { object, property, .. } = ast.kind(member) else {
        panic!("expected member");
    };
    assert_eq!(scopes.binding_of(*property), None);
    assert_eq!(scopes.occurrences(x), vec![x]);
    assert_eq!(scopes.occurrences(*property), vec![*property]);
    assert!(scopes.global(&ast, "attributes").is_some());
    assert_eq!(scopes.global(&ast, "attributes").unwrap().occurrences, vec![*object]);
}

#[test]
fn function_names_and_call_sites_share_a_global_binding() {
    let mut b = AstBuilder::new();
    let one = b.num("1");
    let ret = b.ret(Some(one));
    let f = b.function("helper", &[], vec![ret]);
    let callee = b.ident("helper");
    let call = b.call(callee, vec![]);
    let ret = b.ret(Some(call));
    b.function("main_like", &[], vec![ret]);
    let ast = b.finish();
    let scopes = Scopes::resolve(&ast);

    let NodeKind::Function { id, .. } = ast.kind(f) else {
        panic!("expected function");
    };
    assert_eq!(scopes.occurrences(callee), vec![*id, callee]);
}
