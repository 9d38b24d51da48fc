//! Per-stage reachability and cosmetic prefix stripping.

use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};
use shadelift_core::{Ast, NodeId, NodeKind, Scopes};

use crate::desugar::{Bucket, FieldDecl, LOCAL_PREFIX};
use crate::registry::{Rewrite, registry};
use crate::remap::{CallTable, CallTarget};
use crate::{EntryPoints, Result};

/// A top-level item emitted into a stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StageItem {
    /// A user-defined function.
    Function(NodeId),
    /// A top-level `var` declaration some reachable code reads.
    Global(NodeId),
    /// A library helper, as literal target source.
    Library(&'static str),
}

/// Items each program needs, dependencies before dependents.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stages {
    pub vertex: Vec<StageItem>,
    pub fragment: Vec<StageItem>,
}

impl Stages {
    /// Vertex: `VertexPosition` and `PointSize`. Fragment: `FragmentColor`.
    pub fn extract(ast: &Ast, entries: &EntryPoints, calls: &CallTable) -> Self {
        Self {
            vertex: reachable(ast, &entries.vertex_stage(), calls),
            fragment: reachable(ast, &entries.fragment_stage(), calls),
        }
    }

    /// Raises the first error recorded inside reachable code, vertex stage first.
    pub fn raise_errors(&self, ast: &Ast, calls: &mut CallTable) -> Result<()> {
        for item in self.vertex.iter().chain(&self.fragment) {
            let (StageItem::Function(root) | StageItem::Global(root)) = *item else {
                continue;
            };
            for node in ast.descendants(root) {
                if let Some(err) = calls.take_error(node) {
                    return Err(err);
                }
            }
        }
        Ok(())
    }

    /// Every user function either stage emits.
    pub fn functions(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.vertex
            .iter()
            .chain(&self.fragment)
            .filter_map(|item| match *item {
                StageItem::Function(f) => Some(f),
                StageItem::Global(_) | StageItem::Library(_) => None,
            })
    }
}

/// Depth-first closure from `roots` over call targets and global reads,
/// each item visited once.
///
/// Call sites are followed by their classified target, so a known call keeps
/// pointing at the registry even when its rewrite shares a user function's name.
pub fn reachable(ast: &Ast, roots: &[NodeId], calls: &CallTable) -> Vec<StageItem> {
    let mut walk = Walk {
        ast,
        calls,
        scopes: Scopes::resolve(ast),
        globals: global_declarations(ast),
        seen: HashSet::new(),
        seen_globals: HashSet::new(),
        items: Vec::new(),
    };
    for &root in roots {
        walk.visit(root);
    }
    walk.items
}

struct Walk<'a> {
    ast: &'a Ast,
    calls: &'a CallTable,
    scopes: Scopes,
    /// Declared name to its top-level `var` statement.
    globals: IndexMap<&'a str, NodeId>,
    seen: HashSet<&'a str>,
    seen_globals: HashSet<NodeId>,
    items: Vec<StageItem>,
}

impl<'a> Walk<'a> {
    fn visit(&mut self, func: NodeId) {
        let ast = self.ast;
        let Some(name) = ast.function_name(func) else {
            return;
        };
        if !self.seen.insert(name) {
            return;
        }
        self.scan(func);
        self.items.push(StageItem::Function(func));
    }

    fn visit_global(&mut self, decl: NodeId) {
        if !self.seen_globals.insert(decl) {
            return;
        }
        self.scan(decl);
        self.items.push(StageItem::Global(decl));
    }

    fn scan(&mut self, root: NodeId) {
        let ast = self.ast;
        for node in ast.descendants(root) {
            if let NodeKind::Call { .. } = ast.kind(node) {
                self.follow_call(node);
                continue;
            }
            let Some(name) = ast.ident_name(node) else {
                continue;
            };
            if ast.is_property_name(node) || !self.is_global(node) {
                continue;
            }
            if let Some(&decl) = self.globals.get(name) {
                self.visit_global(decl);
            }
        }
    }

    fn follow_call(&mut self, call: NodeId) {
        match self.calls.target(call) {
            Some(CallTarget::User(func)) => self.visit(func),
            Some(CallTarget::Known(entry)) => {
                let (Rewrite::Rename(to) | Rewrite::OutRename(to)) = &entry.rewrite else {
                    return;
                };
                if let Some(source) = registry().library_source(to)
                    && self.seen.insert(to.as_str())
                {
                    self.items.push(StageItem::Library(source));
                }
            }
            None => {}
        }
    }

    fn is_global(&self, occurrence: NodeId) -> bool {
        self.scopes
            .binding_of(occurrence)
            .is_some_and(|b| self.scopes.get(b).scope == self.ast.root())
    }
}

fn global_declarations(ast: &Ast) -> IndexMap<&str, NodeId> {
    let NodeKind::Program { body } = ast.kind(ast.root()) else {
        return IndexMap::new();
    };
    let mut globals = IndexMap::new();
    for &stmt in body {
        let NodeKind::VarDecl { declarators } = ast.kind(stmt) else {
            continue;
        };
        for &d in declarators {
            if let NodeKind::Declarator { id, .. } = *ast.kind(d)
                && let Some(name) = ast.ident_name(id)
            {
                globals.insert(name, stmt);
            }
        }
    }
    globals
}

/// Drops the `attributes_`, `uniforms_` and `_local_` prefixes wherever the
/// bare name is free, and returns the declarations under their final names.
///
/// A bare name is taken when the tree already uses it, the target reserves
/// it, or another bucket declares the same field. Varyings keep their prefix.
pub fn strip_prefixes(ast: &mut Ast, decls: &[FieldDecl]) -> Vec<FieldDecl> {
    let mut used = identifier_names(ast);
    let mut renamed = Vec::with_capacity(decls.len());

    for decl in decls {
        let shared_field = decls
            .iter()
            .filter(|other| other.field == decl.field)
            .count()
            > 1;
        let strip = decl.bucket != Bucket::Varyings
            && !shared_field
            && !registry().is_reserved(&decl.field)
            && !used.contains(&decl.field);
        let mut decl = decl.clone();
        if strip {
            rename_all(ast, &decl.name, &decl.field);
            used.insert(decl.field.clone());
            decl.name = decl.field.clone();
        }
        renamed.push(decl);
    }

    let locals: IndexSet<String> = used
        .iter()
        .filter(|name| name.starts_with(LOCAL_PREFIX))
        .cloned()
        .collect();
    for local in locals {
        let bare = &local[LOCAL_PREFIX.len()..];
        if bare.is_empty() || registry().is_reserved(bare) || used.contains(bare) {
            continue;
        }
        rename_all(ast, &local, bare);
        used.insert(bare.to_owned());
    }
    renamed
}

/// Identifier names in use, in pre-order of first appearance.
fn identifier_names(ast: &Ast) -> IndexSet<String> {
    ast.live_nodes()
        .into_iter()
        .filter(|&n| !ast.is_property_name(n))
        .filter_map(|n| ast.ident_name(n).map(str::to_owned))
        .collect()
}

fn rename_all(ast: &mut Ast, from: &str, to: &str) {
    for node in ast.live_nodes() {
        if ast.ident_name(node) == Some(from) && !ast.is_property_name(node) {
            ast.rename(node, to);
        }
    }
}
