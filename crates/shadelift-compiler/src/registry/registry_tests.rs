use shadelift_core::{BinaryOp, Type, UnaryOp};

use super::{Rewrite, registry};

#[test]
fn single_entry_matches_regardless_of_arity() {
    let sin = registry().lookup("sin", 3).unwrap();
    assert_eq!(sin.name, "sin");
    assert_eq!(sin.params, vec![Type::Float]);
}

#[test]
fn overloads_are_chosen_by_arity() {
    let one = registry().lookup("atan", 1).unwrap();
    let two = registry().lookup("atan", 2).unwrap();
    assert_eq!(one.arity(), 1);
    assert_eq!(two.arity(), 2);

    let scale = registry().lookup("vec3.scale", 2).unwrap();
    assert_eq!(scale.rewrite, Rewrite::Infix(BinaryOp::Mul));
    let scale_out = registry().lookup("vec3.scale", 3).unwrap();
    assert_eq!(scale_out.rewrite, Rewrite::OutInfix(BinaryOp::Mul));
    assert_eq!(scale_out.params, vec![Type::Vec3, Type::Vec3, Type::Float]);
}

#[test]
fn same_arity_overloads_take_the_first() {
    let vec3 = registry().lookup("vec3", 2).unwrap();
    assert_eq!(vec3.params, vec![Type::Vec2, Type::Float]);
    let vec4 = registry().lookup("vec4", 2).unwrap();
    assert_eq!(vec4.params, vec![Type::Vec3, Type::Float]);
}

#[test]
fn unmatched_arity_falls_back_to_first_entry() {
    let vec3 = registry().lookup("vec3", 7).unwrap();
    assert_eq!(vec3.arity(), 3);
}

#[test]
fn unknown_names_miss() {
    assert!(registry().lookup("banana", 1).is_none());
    assert!(registry().lookup("Math.banana", 1).is_none());
}

#[test]
fn math_namespace_renames_to_bare_builtin() {
    let cos = registry().lookup("Math.cos", 1).unwrap();
    assert_eq!(cos.rewrite, Rewrite::Rename("cos".into()));
    let atan2 = registry().lookup("Math.atan2", 2).unwrap();
    assert_eq!(atan2.rewrite, Rewrite::Rename("atan".into()));
    let random = registry().lookup("Math.random", 0).unwrap();
    assert!(matches!(random.rewrite, Rewrite::Reject(_)));
}

#[test]
fn gl_matrix_families_cover_every_size() {
    for n in 2..=4 {
        let create = registry().lookup(&format!("vec{n}.create"), 0).unwrap();
        assert_eq!(create.rewrite, Rewrite::Splice(format!("vec{n}(0)")));
        let mul = registry().lookup(&format!("mat{n}.mul"), 3).unwrap();
        assert_eq!(mul.rewrite, Rewrite::OutInfix(BinaryOp::Mul));
        let from = registry().lookup(&format!("vec{n}.fromValues"), n).unwrap();
        assert_eq!(from.params, vec![Type::Float; n]);
        assert_eq!(from.rewrite, Rewrite::Rename(format!("vec{n}")));
    }
    let negate = registry().lookup("vec2.negate", 2).unwrap();
    assert_eq!(negate.rewrite, Rewrite::OutUnary(UnaryOp::Neg));
    let len = registry().lookup("vec4.len", 1).unwrap();
    assert_eq!(len.ret, Type::Float);
    assert_eq!(len.rewrite, Rewrite::Rename("length".into()));
    assert!(registry().lookup("mat4.add", 3).is_none());
}

#[test]
fn signatures_list_every_entry() {
    let signatures = registry().signatures();
    assert!(signatures.starts_with("mat4.multiplyVec3(mat4,vec3),\nvec3.scale(vec3,float),\n"));
    assert!(signatures.contains("texture2D(sampler2D,vec2)"));
    assert_eq!(signatures.lines().count(), registry().entries().len());
}

#[test]
fn library_helpers_are_spliced_by_name() {
    let src = registry().library_source("_mat4_multiplyVec3").unwrap();
    assert!(src.starts_with("vec3 _mat4_multiplyVec3(mat4 m, vec3 v)"));
    assert!(registry().library_source("sin").is_none());
}

#[test]
fn reserved_names_include_keywords_and_builtins() {
    for name in ["out", "discard", "vec3", "sin", "length", "distance", "gl_Position"] {
        assert!(registry().is_reserved(name), "{name} should be reserved");
    }
    assert!(!registry().is_reserved("position"));
    assert!(!registry().is_reserved("uv"));
}
