//! Scalar math, constructors and texture sampling.

use shadelift_core::{BinaryOp, Type};

use super::entry::{KnownFunction, Rewrite};

use Type::{Float, Sampler2D, Vec2, Vec3, Vec4};

/// Single-argument math available both bare and as `Math.<name>`.
const SHARED_UNARY: &[&str] = &[
    "sin", "cos", "tan", "asin", "acos", "atan", "exp", "log", "sqrt", "abs", "sign", "floor",
    "ceil",
];

/// Two-argument math available both bare and as `Math.<name>`.
const SHARED_BINARY: &[&str] = &["pow", "min", "max"];

pub(super) fn push_all(out: &mut Vec<KnownFunction>) {
    out.push(KnownFunction::new(
        "mat4.multiplyVec3",
        &[Type::Mat4, Vec3],
        Vec3,
        Rewrite::Rename("_mat4_multiplyVec3".into()),
    ));
    out.push(KnownFunction::new(
        "vec3.scale",
        &[Vec3, Float],
        Vec3,
        Rewrite::Infix(BinaryOp::Mul),
    ));

    out.push(KnownFunction::new("vec2", &[Float; 2], Vec2, Rewrite::Keep));
    out.push(KnownFunction::new("vec3", &[Float; 3], Vec3, Rewrite::Keep));
    out.push(KnownFunction::new("vec3", &[Vec2, Float], Vec3, Rewrite::Keep));
    out.push(KnownFunction::new("vec4", &[Float; 4], Vec4, Rewrite::Keep));
    out.push(KnownFunction::new("vec4", &[Vec3, Float], Vec4, Rewrite::Keep));

    out.push(KnownFunction::new(
        "Math.atan2",
        &[Float; 2],
        Float,
        Rewrite::Rename("atan".into()),
    ));

    for &name in SHARED_UNARY {
        out.push(KnownFunction::new(name, &[Float], Float, Rewrite::Keep));
    }
    for &name in SHARED_BINARY {
        out.push(KnownFunction::new(name, &[Float; 2], Float, Rewrite::Keep));
    }
    out.push(KnownFunction::new("atan", &[Float; 2], Float, Rewrite::Keep));
    out.push(KnownFunction::new("texture2D", &[Sampler2D, Vec2], Vec4, Rewrite::Keep));
    out.push(KnownFunction::new("mod", &[Float; 2], Float, Rewrite::Keep));
    out.push(KnownFunction::new(
        "addVecs4",
        &[Vec4, Vec4],
        Vec4,
        Rewrite::Infix(BinaryOp::Add),
    ));
    out.push(KnownFunction::new("clamp", &[Float; 3], Float, Rewrite::Keep));

    for &name in SHARED_UNARY {
        out.push(KnownFunction::new(
            format!("Math.{name}"),
            &[Float],
            Float,
            Rewrite::Rename(name.into()),
        ));
    }
    for &name in SHARED_BINARY {
        out.push(KnownFunction::new(
            format!("Math.{name}"),
            &[Float; 2],
            Float,
            Rewrite::Rename(name.into()),
        ));
    }

    out.push(KnownFunction::new(
        "Math.random",
        &[],
        Float,
        Rewrite::Reject("shaders have no random number source".into()),
    ));
}
