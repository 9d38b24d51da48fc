use std::fmt;

use shadelift_core::{BinaryOp, Type, UnaryOp};

/// How a matched call site is lowered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rewrite {
    /// Already valid in the target language.
    Keep,
    /// `f(a, b)` becomes `to(a, b)`.
    Rename(String),
    /// `f(a, b)` becomes `(a op b)`.
    Infix(BinaryOp),
    /// `f(a)` becomes `op a`.
    Unary(UnaryOp),
    /// `f(a)` becomes `a`.
    Identity,
    /// `f(out, a)` becomes `out = a`.
    Assign,
    /// `f(out, a, b)` becomes `out = (a op b)`, or `(a op b)` when `out` is not assignable.
    OutInfix(BinaryOp),
    /// `f(out, a)` becomes `out = op a`, or `op a` when `out` is not assignable.
    OutUnary(UnaryOp),
    /// `f(out, a, b)` becomes `out = to(a, b)`, or `to(a, b)` when `out` is not assignable.
    OutRename(String),
    /// The call is replaced by literal target source.
    Splice(String),
    /// The call has no target equivalent.
    Reject(String),
}

/// A whitelisted callable.
#[derive(Clone, Debug)]
pub struct KnownFunction {
    /// Fully-qualified call-site name, e.g. `Math.cos` or `vec3.add`.
    pub name: String,
    pub params: Vec<Type>,
    pub ret: Type,
    pub rewrite: Rewrite,
}

impl KnownFunction {
    pub fn new(name: impl Into<String>, params: &[Type], ret: Type, rewrite: Rewrite) -> Self {
        Self {
            name: name.into(),
            params: params.to_vec(),
            ret,
            rewrite,
        }
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

impl fmt::Display for KnownFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{param}")?;
        }
        f.write_str(")")
    }
}
