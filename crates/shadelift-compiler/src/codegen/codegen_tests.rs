use shadelift_core::{AssignOp, AstBuilder, BinaryOp, Type, UnaryOp, UpdateOp};

use super::render_expr;
use crate::test_utils::{compile, compile_err, infer, passthrough_vertex, white_fragment};
use crate::{Error, ShaderDefinition};

#[test]
fn matrix_indices_split_into_column_and_row() {
    let mut b = AstBuilder::new();
    let view = b.path("uniforms.view");
    let m = b.var("m", Some(view));
    let five = b.num("5");
    let i = b.var("i", Some(five));
    let corner = {
        let m = b.ident("m");
        let k = b.num("15");
        b.index(m, k)
    };
    let dynamic = {
        let m = b.ident("m");
        let i = b.ident("i");
        b.index(m, i)
    };
    let zero = b.num("0");
    let one = b.num("1");
    let position = b.array(vec![corner, dynamic, zero, one]);
    let ret = b.ret(Some(position));
    b.function("VertexPosition", &[], vec![m, i, ret]);
    white_fragment(&mut b);

    let source = ShaderDefinition::from_ast(b.finish())
        .and_then(ShaderDefinition::compile)
        .unwrap();
    insta::assert_snapshot!(source.vertex.trim_end(), @r"
    precision mediump float;

    uniform mat4 view;

    vec4 VertexPosition() {
        mat4 m = view;
        int i = 5;
        return vec4(m[3][3], m[(i / 4)][(i - ((i / 4) * 4))], 0., 1.);
    }

    void main() {
        gl_Position = VertexPosition();
    }
    ");
}

#[test]
fn matrix_element_assignment() {
    let mut b = AstBuilder::new();
    passthrough_vertex(&mut b);
    white_fragment(&mut b);
    let view = b.path("uniforms.view");
    let m = b.var("m", Some(view));
    let set = {
        let m = b.ident("m");
        let k = b.num("5");
        let target = b.index(m, k);
        let one = b.num("1");
        let assign = b.assign_op(AssignOp::Assign, target, one);
        b.expr_stmt(assign)
    };
    let clear = {
        let m = b.ident("m");
        let i = b.ident("i");
        let target = b.index(m, i);
        let zero = b.num("0");
        let assign = b.assign_op(AssignOp::Assign, target, zero);
        b.expr_stmt(assign)
    };
    let corner = {
        let m = b.ident("m");
        let k = b.num("15");
        b.index(m, k)
    };
    let ret = b.ret(Some(corner));
    let helper = b.function("helper", &["i"], vec![m, set, clear, ret]);

    let (ast, _) = infer(b.finish()).unwrap();
    insta::assert_snapshot!(render_expr(&ast, helper), @r"
    float helper(int i) {
        mat4 _local_m = uniforms_view;
        _local_m[1][1] = 1.;
        _local_m[(i / 4)][(i - ((i / 4) * 4))] = 0.;
        return _local_m[3][3];
    }
    ");
}

#[test]
fn remainder_becomes_mod_call() {
    let mut b = AstBuilder::new();
    let x = b.ident("x");
    let two = b.num("2");
    let rem = b.binary(BinaryOp::Rem, x, two);
    let ast = b.finish();
    assert_eq!(render_expr(&ast, rem), "mod(x, 2)");
}

#[test]
fn remainder_in_compiled_fragment() {
    let mut b = AstBuilder::new();
    passthrough_vertex(&mut b);
    let t = b.path("uniforms.t");
    let one = b.num("1");
    let wrapped = b.binary(BinaryOp::Rem, t, one);
    let ret = b.ret(Some(wrapped));
    b.function("FragmentColor", &[], vec![ret]);

    let out = compile(b.finish());
    assert!(out.contains("return mod(t, 1"));
    assert!(!out.contains('%'));
}

#[test]
fn discard_returns_zeros_of_inferred_width() {
    let mut b = AstBuilder::new();
    passthrough_vertex(&mut b);
    let alpha = b.path("uniforms.alpha");
    let half = b.num("0.5");
    let test = b.binary(BinaryOp::Lt, alpha, half);
    let bail = b.ret(None);
    let bail = b.block(vec![bail]);
    let guard = b.if_else(test, bail, None);
    let red = ["1", "0", "0"].iter().map(|v| b.num(v)).collect();
    let red = b.array(red);
    let ret = b.ret(Some(red));
    b.function("FragmentColor", &[], vec![guard, ret]);

    let out = compile(b.finish());
    let fragment = out.split("---\n").nth(1).unwrap();
    insta::assert_snapshot!(fragment, @r"
    precision mediump float;

    uniform float alpha;

    vec3 FragmentColor() {
        if (alpha < 0.5) {
            discard;
            return vec3(0., 0., 0.);
        }
        return vec3(1., 0., 0.);
    }

    void main() {
        gl_FragColor = vec4(FragmentColor(), 1.0);
    }
    ");
}

#[test]
fn unbraced_bare_return_gets_a_block() {
    let mut b = AstBuilder::new();
    passthrough_vertex(&mut b);
    let flag = b.path("uniforms.flag");
    let bail = b.ret(None);
    let guard = b.if_else(flag, bail, None);
    let t = b.path("uniforms.t");
    let gray = b.call_path("Math.sin", vec![t]);
    let ret = b.ret(Some(gray));
    b.function("FragmentColor", &[], vec![guard, ret]);

    let out = compile(b.finish());
    assert!(out.contains("    if (flag) {\n        discard;\n        return 0.;\n    }\n"));
    assert!(out.contains("gl_FragColor = vec4(FragmentColor(), 0.0, 0.0, 1.0);"));
}

#[test]
fn control_flow_rendering() {
    let mut b = AstBuilder::new();
    let x = b.ident("x");
    let one = b.num("1");
    let first = b.binary(BinaryOp::StrictEq, x, one);
    let x = b.ident("x");
    let neg = b.unary(UnaryOp::Neg, x);
    let neg = b.unary(UnaryOp::Neg, neg);
    let neg = b.ret(Some(neg));
    let neg = b.block(vec![neg]);

    let x = b.ident("x");
    let two = b.num("2");
    let second = b.binary(BinaryOp::StrictNotEq, x, two);
    let x = b.ident("x");
    let plus = b.unary(UnaryOp::Plus, x);
    let plus = b.ret(Some(plus));
    let plus = b.block(vec![plus]);

    let x = b.ident("x");
    let zero = b.num("0");
    let one = b.num("1");
    let pick = b.conditional(x, zero, one);
    let pick = b.ret(Some(pick));
    let pick = b.block(vec![pick]);

    let inner = b.if_else(second, plus, Some(pick));
    let outer = b.if_else(first, neg, Some(inner));
    let helper = b.function("pick", &["x"], vec![outer]);

    let ast = b.finish();
    insta::assert_snapshot!(render_expr(&ast, helper), @r"
    float pick(float x) {
        if (x == 1) {
            return -(-x);
        } else if (x != 2) {
            return x;
        } else {
            return (x ? 0 : 1);
        }
    }
    ");
}

#[test]
fn loops_and_compound_assignment() {
    let mut b = AstBuilder::new();
    passthrough_vertex(&mut b);
    let zero = b.num("0");
    let total = b.var("total", Some(zero));
    let zero = b.num("0");
    let init = b.var("i", Some(zero));
    let i = b.ident("i");
    let three = b.num("3");
    let test = b.binary(BinaryOp::Lt, i, three);
    let i = b.ident("i");
    let step = b.update(UpdateOp::Increment, false, i);
    let acc = b.ident("total");
    let w = b.path("uniforms.w");
    let add = b.assign_op(AssignOp::Add, acc, w);
    let add = b.expr_stmt(add);
    let body = b.block(vec![add]);
    let lp = b.for_loop(Some(init), Some(test), Some(step), body);
    let mut channels: Vec<_> = (0..3).map(|_| b.ident("total")).collect();
    channels.push(b.num("1"));
    let color = b.array(channels);
    let ret = b.ret(Some(color));
    let fragment = b.function("FragmentColor", &[], vec![total, lp, ret]);

    let (ast, _) = infer(b.finish()).unwrap();
    insta::assert_snapshot!(render_expr(&ast, fragment), @r"
    vec4 FragmentColor() {
        float _local_total = 0.;
        for (float _local_i = 0.; (_local_i < 3.); _local_i++) {
            _local_total += uniforms_w;
        }
        return vec4(_local_total, _local_total, _local_total, 1.);
    }
    ");
}

#[test]
fn float_literals_gain_a_trailing_point() {
    let mut b = AstBuilder::new();
    let whole = b.num("2");
    let fraction = b.num("2.5");
    let exponent = b.num("1e3");
    let index = b.num("7");
    let mut ast = b.finish();
    for lit in [whole, fraction, exponent] {
        ast.node_mut(lit).ty = Some(Type::Float);
    }
    ast.node_mut(index).ty = Some(Type::Int);

    assert_eq!(render_expr(&ast, whole), "2.");
    assert_eq!(render_expr(&ast, fraction), "2.5");
    assert_eq!(render_expr(&ast, exponent), "1e3");
    assert_eq!(render_expr(&ast, index), "7");
}

#[test]
fn point_size_must_be_scalar() {
    let mut b = AstBuilder::new();
    passthrough_vertex(&mut b);
    white_fragment(&mut b);
    let x = b.num("1");
    let y = b.num("2");
    let size = b.array(vec![x, y]);
    let ret = b.ret(Some(size));
    b.function("PointSize", &[], vec![ret]);

    let err = compile_err(b.finish());
    assert!(matches!(
        err,
        Error::InvalidEntryPointType { name: "PointSize", ty: Type::Vec2 }
    ));
}
