use shadelift_core::{AstBuilder, NodeKind};

use crate::Error;
use crate::codegen::render_expr;
use crate::remap::{CallTarget, apply_rewrites, resolve_calls};
use crate::test_utils::{infer, passthrough_vertex, white_fragment};

#[test]
fn user_functions_shadow_the_registry() {
    let mut b = AstBuilder::new();
    let x = b.ident("x");
    let ret = b.ret(Some(x));
    let sin = b.function("sin", &["x"], vec![ret]);
    let one = b.num("1");
    let call = b.call_path("sin", vec![one]);
    let cos = b.call_path("cos", vec![call]);
    let stmt = b.expr_stmt(cos);
    b.function("helper", &[], vec![stmt]);
    passthrough_vertex(&mut b);
    white_fragment(&mut b);

    let ast = b.finish();
    let calls = resolve_calls(&ast);
    assert!(matches!(calls.target(call), Some(CallTarget::User(f)) if f == sin));
    assert!(matches!(calls.target(cos), Some(CallTarget::Known(e)) if e.name == "cos"));
    assert_eq!(calls.error_count(), 0);
}

#[test]
fn unknown_callee_is_recorded_not_raised() {
    let mut b = AstBuilder::new();
    let x = b.ident("x");
    let call = b.call_path("banana", vec![x]);
    let stmt = b.expr_stmt(call);
    b.function("helper", &["x"], vec![stmt]);
    passthrough_vertex(&mut b);
    white_fragment(&mut b);

    let ast = b.finish();
    let mut calls = resolve_calls(&ast);
    assert!(calls.target(call).is_none());
    let message = calls.error(call).unwrap().to_string();
    assert!(message.starts_with(
        "functions must be on a whitelist to be acceptable; banana isn't on it. Available are: "
    ));
    assert!(message.contains("Math.atan2(float,float)"));
    assert!(matches!(calls.take_error(call), Some(Error::NotWhitelisted { .. })));
    assert_eq!(calls.error_count(), 0);
}

#[test]
fn vec3_scale_becomes_multiplication() {
    let mut b = AstBuilder::new();
    let c = b.path("attributes.c");
    let k = b.path("uniforms.k");
    let call = b.call_path("vec3.scale", vec![c, k]);
    let one = b.num("1");
    let position = b.call_path("vec4", vec![call, one]);
    let ret = b.ret(Some(position));
    b.function("VertexPosition", &[], vec![ret]);
    white_fragment(&mut b);

    let (mut ast, calls) = infer(b.finish()).unwrap();
    apply_rewrites(&mut ast, &calls);

    assert!(matches!(ast.kind(call), NodeKind::Binary { .. }));
    assert_eq!(render_expr(&ast, call), "(attributes_c * uniforms_k)");
    assert_eq!(render_expr(&ast, position), "vec4((attributes_c * uniforms_k), 1.)");
}

#[test]
fn math_namespace_is_renamed() {
    let mut b = AstBuilder::new();
    let y = b.path("uniforms.y");
    let x = b.path("uniforms.x");
    let call = b.call_path("Math.atan2", vec![y, x]);
    let stmt = b.expr_stmt(call);
    b.function("helper", &[], vec![stmt]);
    passthrough_vertex(&mut b);
    white_fragment(&mut b);

    let (mut ast, calls) = infer(b.finish()).unwrap();
    apply_rewrites(&mut ast, &calls);

    assert_eq!(render_expr(&ast, call), "atan(uniforms_y, uniforms_x)");
}

#[test]
fn output_argument_is_assigned_when_possible() {
    let mut b = AstBuilder::new();
    let create = b.call_path("vec3.create", vec![]);
    let local = b.var("p", Some(create));
    let out = b.ident("p");
    let a = b.path("attributes.a");
    let c = b.path("attributes.b");
    let add = b.call_path("vec3.add", vec![out, a, c]);
    let add = b.expr_stmt(add);
    let fresh = b.call_path("vec3.create", vec![]);
    let v = b.ident("p");
    let unit = b.call_path("vec3.normalize", vec![fresh, v]);
    let ret = b.ret(Some(unit));
    let helper = b.function("direction", &[], vec![local, add, ret]);
    passthrough_vertex(&mut b);
    white_fragment(&mut b);

    let (mut ast, calls) = infer(b.finish()).unwrap();
    apply_rewrites(&mut ast, &calls);

    insta::assert_snapshot!(render_expr(&ast, helper), @r"
    vec3 direction() {
        vec3 _local_p = vec3(0);
        _local_p = (attributes_a + attributes_b);
        return normalize(_local_p);
    }
    ");
}

#[test]
fn clone_collapses_to_its_argument() {
    let mut b = AstBuilder::new();
    let v = b.path("uniforms.v");
    let call = b.call_path("vec2.clone", vec![v]);
    let local = b.var("copy", Some(call));
    b.function("helper", &[], vec![local]);
    passthrough_vertex(&mut b);
    white_fragment(&mut b);

    let (mut ast, calls) = infer(b.finish()).unwrap();
    apply_rewrites(&mut ast, &calls);

    assert!(matches!(ast.kind(call), NodeKind::Sequence { exprs } if exprs.len() == 1));
    assert_eq!(render_expr(&ast, local), "vec2 _local_copy = uniforms_v;");
}
