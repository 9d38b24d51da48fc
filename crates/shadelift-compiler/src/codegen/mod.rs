//! GLSL ES generation from a typed, rewritten tree.

mod config;
mod discard;
mod emitter;
mod printer;

#[cfg(test)]
mod codegen_tests;

pub use config::{CompileOptions, Precision};
pub(crate) use discard::lower_discards;

use shadelift_core::{Ast, NodeId, NodeKind, Type};

use self::emitter::{Emitter, Stage};
use self::printer::Printer;
use crate::desugar::FieldDecl;
use crate::pipeline::ShaderSource;
use crate::reach::Stages;
use crate::{EntryPoints, Error, POINT_SIZE, Result};

/// Source text of any node, as it would appear in the output.
pub fn render_expr(ast: &Ast, node: NodeId) -> String {
    Printer::new(ast, "    ").node_text(node)
}

/// Stage outputs must fit their built-in: `PointSize` is a `float`, the
/// others anything up to a `vec4`.
pub(crate) fn check_entry_types(ast: &Ast, entries: &EntryPoints) -> Result<()> {
    for (name, func, _) in entries.iter() {
        let NodeKind::Function { id, .. } = *ast.kind(func) else {
            continue;
        };
        let ty = ast.ty(id).unwrap_or(Type::Float);
        let fits = if name == POINT_SIZE {
            ty == Type::Float
        } else {
            ty.width().is_some()
        };
        if !fits {
            return Err(Error::InvalidEntryPointType { name, ty });
        }
    }
    Ok(())
}

/// Emits the vertex and fragment programs.
pub(crate) fn generate(
    ast: &Ast,
    decls: &[FieldDecl],
    stages: &Stages,
    entries: &EntryPoints,
    options: &CompileOptions,
) -> ShaderSource {
    let vertex = Emitter::new(ast, entries, options).emit(Stage::Vertex, decls, &stages.vertex);
    let fragment =
        Emitter::new(ast, entries, options).emit(Stage::Fragment, decls, &stages.fragment);
    log::debug!(
        "emitted {} vertex and {} fragment bytes",
        vertex.len(),
        fragment.len()
    );
    ShaderSource { vertex, fragment }
}
