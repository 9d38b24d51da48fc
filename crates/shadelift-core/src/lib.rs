#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for shadelift.
//!
//! - [`Ast`]: arena of [`Node`]s addressed by [`NodeId`], built with
//!   [`AstBuilder`] or read from ESTree JSON
//! - [`Type`]: resolved types of the target shading language
//! - [`Scopes`]: identifier bindings for one snapshot of the tree

pub mod ast;
mod builder;
mod estree;
mod graph;
mod invariants;
pub mod scope;
mod types;

pub use ast::{
    AssignOp, Ast, BinaryOp, Literal, Node, NodeId, NodeKind, UnaryOp, UpdateOp,
};
pub use builder::AstBuilder;
pub use estree::AstError;
pub use scope::{Binding, BindingId, Scopes};
pub use types::{Type, UnknownType};

#[cfg(test)]
mod ast_tests;
#[cfg(test)]
mod scope_tests;
