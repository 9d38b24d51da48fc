//! Test utilities shared by the compiler's test modules.

use shadelift_core::{Ast, AstBuilder};

use crate::remap::{CallTable, resolve_calls};
use crate::{EntryPoints, Error, ShaderDefinition, ShaderSource, desugar, infer};

/// Both programs, separated the way snapshots show them.
pub fn render(source: &ShaderSource) -> String {
    format!(
        "{}\n---\n{}",
        source.vertex.trim_end(),
        source.fragment.trim_end()
    )
}

pub fn compile(ast: Ast) -> String {
    let source = ShaderDefinition::from_ast(ast)
        .and_then(ShaderDefinition::compile)
        .unwrap_or_else(|e| panic!("expected the shader to compile, got: {e}"));
    render(&source)
}

pub fn compile_err(ast: Ast) -> Error {
    match ShaderDefinition::from_ast(ast).and_then(ShaderDefinition::compile) {
        Ok(source) => panic!("expected an error, got:\n{}", render(&source)),
        Err(e) => e,
    }
}

/// Runs the passes up to and including inference.
pub fn infer(mut ast: Ast) -> Result<(Ast, CallTable), Error> {
    let entries = EntryPoints::locate(&ast)?;
    desugar::desugar(&mut ast, &entries);
    entries.attach_hints(&mut ast);
    let calls = resolve_calls(&ast);
    infer::infer_types(&mut ast, &calls)?;
    Ok((ast, calls))
}

/// Adds `FragmentColor() { return [1, 1, 1, 1]; }`.
pub fn white_fragment(b: &mut AstBuilder) {
    let ones = (0..4).map(|_| b.num("1")).collect();
    let color = b.array(ones);
    let ret = b.ret(Some(color));
    b.function("FragmentColor", &[], vec![ret]);
}

/// Adds `VertexPosition() { return attributes.position; }`.
pub fn passthrough_vertex(b: &mut AstBuilder) {
    let pos = b.path("attributes.position");
    let ret = b.ret(Some(pos));
    b.function("VertexPosition", &[], vec![ret]);
}

/// Type name of the first identifier spelled `name`.
pub fn type_of(ast: &Ast, name: &str) -> Option<String> {
    ast.live_nodes()
        .into_iter()
        .filter(|&n| !ast.is_property_name(n))
        .find(|&n| ast.ident_name(n) == Some(name))
        .and_then(|n| ast.ty(n))
        .map(|t| t.to_string())
}
