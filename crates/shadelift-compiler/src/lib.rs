//! shadelift: compiles dynamically-typed shader functions into GLSL ES.
//!
//! # Example
//!
//! ```
//! use shadelift_compiler::ShaderDefinition;
//! use shadelift_core::AstBuilder;
//!
//! let mut b = AstBuilder::new();
//! let pos = b.path("attributes.position");
//! let ret = b.ret(Some(pos));
//! b.function("VertexPosition", &[], vec![ret]);
//! let color = b.path("uniforms.color");
//! let ret = b.ret(Some(color));
//! b.function("FragmentColor", &[], vec![ret]);
//!
//! let shader = ShaderDefinition::from_ast(b.finish())?.compile()?;
//! assert!(shader.vertex.contains("attribute vec4 position;"));
//! assert!(shader.fragment.contains("gl_FragColor = FragmentColor();"));
//! # Ok::<(), shadelift_compiler::Error>(())
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod codegen;
mod definition;
pub mod desugar;
pub mod infer;
mod invariants;
mod pipeline;
pub mod reach;
pub mod registry;
pub mod remap;

#[cfg(test)]
mod remap_tests;
#[cfg(test)]
mod test_utils;

pub use codegen::{CompileOptions, Precision};
pub use definition::{EntryPoints, FRAGMENT_COLOR, POINT_SIZE, ShaderDefinition, VERTEX_POSITION};
pub use pipeline::ShaderSource;

use shadelift_core::{AstError, Type};

/// Errors that abort a compilation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A mandatory entry point is not defined.
    #[error("could not find a definition for '{0}'; it is a required function")]
    MissingEntryPoint(&'static str),

    /// Two pieces of evidence fixed different types for one expression.
    #[error("type inference failed for '{expr}': it is both {first} and {second}")]
    TypeContradiction {
        expr: String,
        first: Type,
        second: Type,
    },

    /// A known function was called with the wrong number of arguments.
    #[error("{callee} should have {expected} arguments, it has {found}")]
    ArityMismatch {
        callee: String,
        expected: usize,
        found: usize,
    },

    /// A call to something that is neither user-defined nor whitelisted.
    #[error(
        "functions must be on a whitelist to be acceptable; {callee} isn't on it. \
         Available are: {accepted}."
    )]
    NotWhitelisted { callee: String, accepted: String },

    /// A whitelisted call whose rewrite rule refuses it.
    #[error("{callee} cannot be used in a shader: {reason}")]
    RejectedCall { callee: String, reason: String },

    /// A literal index too large for any vector or matrix.
    #[error("index {index} in '{expr}' is out of range for every vector and matrix type")]
    IndexOutOfRange { expr: String, index: u32 },

    /// An array literal with no matching vector type.
    #[error("'{expr}' has {len} elements; vector literals need 2 to 4")]
    InvalidVectorLiteral { expr: String, len: usize },

    /// An entry point resolved to something the stage output cannot take.
    #[error("{name} must return float or a vector, it returns {ty}")]
    InvalidEntryPointType { name: &'static str, ty: Type },

    #[error(transparent)]
    Ast(#[from] AstError),
}

/// Result type for compilation passes.
pub type Result<T> = std::result::Result<T, Error>;
