//! Vector and matrix algebra under gl-matrix names (`vec3.add`, `mat4.mul`, ...).
//!
//! Most gl-matrix functions write into their first argument. Those map to the
//! output-parameter rewrites, which assign into the first argument when it is
//! assignable and otherwise drop it and produce the bare expression.

use shadelift_core::{BinaryOp, Type, UnaryOp};

use super::entry::{KnownFunction, Rewrite};

const SIZES: [usize; 3] = [2, 3, 4];

pub(super) fn push_all(out: &mut Vec<KnownFunction>) {
    for n in SIZES {
        for ty in [Type::mat(n), Type::vec(n)].into_iter().flatten() {
            push_shared(out, ty);
        }
    }
    for ty in SIZES.into_iter().filter_map(Type::vec) {
        push_vector(out, ty);
    }
}

/// Functions both vectors and matrices provide.
fn push_shared(out: &mut Vec<KnownFunction>, t: Type) {
    out.push(KnownFunction::new(
        format!("{t}.clone"),
        &[t],
        t,
        Rewrite::Identity,
    ));
    out.push(KnownFunction::new(
        format!("{t}.copy"),
        &[t, t],
        t,
        Rewrite::Assign,
    ));
    out.push(KnownFunction::new(
        format!("{t}.create"),
        &[],
        t,
        Rewrite::Splice(format!("{t}(0)")),
    ));
    for name in ["mul", "multiply"] {
        out.push(KnownFunction::new(
            format!("{t}.{name}"),
            &[t, t, t],
            t,
            Rewrite::OutInfix(BinaryOp::Mul),
        ));
    }
}

fn push_vector(out: &mut Vec<KnownFunction>, t: Type) {
    let width = t.width().unwrap_or_default();
    let out_infix = |name: &str, op| {
        KnownFunction::new(format!("{t}.{name}"), &[t, t, t], t, Rewrite::OutInfix(op))
    };
    let out_rename = |name: &str, params: &[Type]| {
        KnownFunction::new(
            format!("{t}.{name}"),
            params,
            t,
            Rewrite::OutRename(name.into()),
        )
    };
    let rename = |name: &str, params: &[Type], ret, to: &str| {
        KnownFunction::new(format!("{t}.{name}"), params, ret, Rewrite::Rename(to.into()))
    };

    out.push(out_infix("add", BinaryOp::Add));
    out.push(KnownFunction::new(
        format!("{t}.negate"),
        &[t, t],
        t,
        Rewrite::OutUnary(UnaryOp::Neg),
    ));
    out.push(out_infix("div", BinaryOp::Div));
    out.push(out_infix("divide", BinaryOp::Div));
    out.push(out_rename("cross", &[t, t, t]));
    out.push(out_rename("normalize", &[t, t]));
    out.push(rename("distance", &[t, t], Type::Float, "distance"));
    out.push(rename("dist", &[t, t], Type::Float, "distance"));
    out.push(out_infix("sub", BinaryOp::Sub));
    out.push(out_infix("subtract", BinaryOp::Sub));
    out.push(KnownFunction::new(
        format!("{t}.scale"),
        &[t, t, Type::Float],
        t,
        Rewrite::OutInfix(BinaryOp::Mul),
    ));
    out.push(rename("dot", &[t, t], Type::Float, "dot"));
    out.push(rename("length", &[t], Type::Float, "length"));
    out.push(rename("len", &[t], Type::Float, "length"));
    let components = vec![Type::Float; width];
    out.push(rename("fromValues", components.as_slice(), t, t.name()));
    out.push(out_rename("max", &[t, t, t]));
    out.push(out_rename("min", &[t, t, t]));
}
