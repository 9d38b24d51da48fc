//! The shader definition handed to the compiler.

use shadelift_core::{Ast, NodeId, NodeKind, Type};

use crate::codegen::CompileOptions;
use crate::pipeline::{self, ShaderSource};
use crate::{Error, Result};

pub const VERTEX_POSITION: &str = "VertexPosition";
pub const FRAGMENT_COLOR: &str = "FragmentColor";
pub const POINT_SIZE: &str = "PointSize";

/// Declarations of the entry-point functions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntryPoints {
    pub vertex_position: NodeId,
    pub fragment_color: NodeId,
    pub point_size: Option<NodeId>,
}

impl EntryPoints {
    /// Locates the entry points among the top-level functions.
    pub fn locate(ast: &Ast) -> Result<Self> {
        let vertex_position = ast
            .find_function(VERTEX_POSITION)
            .ok_or(Error::MissingEntryPoint(VERTEX_POSITION))?;
        let fragment_color = ast
            .find_function(FRAGMENT_COLOR)
            .ok_or(Error::MissingEntryPoint(FRAGMENT_COLOR))?;
        Ok(Self {
            vertex_position,
            fragment_color,
            point_size: ast.find_function(POINT_SIZE),
        })
    }

    /// `(name, declaration, type hint)` for every present entry point.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, NodeId, Type)> {
        [
            Some((VERTEX_POSITION, self.vertex_position, Type::Vec4)),
            Some((FRAGMENT_COLOR, self.fragment_color, Type::Vec4)),
            self.point_size.map(|p| (POINT_SIZE, p, Type::Float)),
        ]
        .into_iter()
        .flatten()
    }

    /// Records each entry point's expected type on its name, for inference to
    /// fall back on.
    pub fn attach_hints(&self, ast: &mut Ast) {
        for (_, func, hint) in self.iter() {
            if let NodeKind::Function { id, .. } = *ast.kind(func) {
                ast.node_mut(id).hint = Some(hint);
            }
        }
    }

    /// Roots of the vertex stage: `VertexPosition`, then `PointSize`.
    pub fn vertex_stage(&self) -> Vec<NodeId> {
        std::iter::once(self.vertex_position)
            .chain(self.point_size)
            .collect()
    }

    pub fn fragment_stage(&self) -> Vec<NodeId> {
        vec![self.fragment_color]
    }
}

/// Entry points plus helper functions, as one program.
///
/// The entry points take no parameters and return the stage outputs:
/// `VertexPosition` the clip-space position, `FragmentColor` the fragment
/// color, and the optional `PointSize` the rasterized point size. Every other
/// top-level function is a helper either stage may call.
#[derive(Clone, Debug)]
pub struct ShaderDefinition {
    ast: Ast,
    entries: EntryPoints,
}

impl ShaderDefinition {
    pub fn from_ast(ast: Ast) -> Result<Self> {
        let entries = EntryPoints::locate(&ast)?;
        Ok(Self { ast, entries })
    }

    /// Reads the program from ESTree JSON.
    pub fn from_estree_json(json: &str) -> Result<Self> {
        Self::from_ast(Ast::from_estree_json(json)?)
    }

    pub fn ast(&self) -> &Ast {
        &self.ast
    }

    pub fn entries(&self) -> EntryPoints {
        self.entries
    }

    /// Names of the helper functions, in declaration order.
    pub fn helpers(&self) -> impl Iterator<Item = &str> {
        self.ast
            .functions()
            .filter(|f| !self.entries.iter().any(|(_, e, _)| e == *f))
            .filter_map(|f| self.ast.function_name(f))
    }

    pub fn compile(self) -> Result<ShaderSource> {
        self.compile_with(&CompileOptions::default())
    }

    pub fn compile_with(self, options: &CompileOptions) -> Result<ShaderSource> {
        pipeline::compile(self.ast, self.entries, options)
    }
}
