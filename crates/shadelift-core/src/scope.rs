//! Lexical scope resolution.
//!
//! An identifier occurrence resolves to the nearest enclosing node that
//! declares its name:
//! - a function whose parameter list holds the name,
//! - a block, program or `for` node directly containing a `var` declarator of it,
//! - otherwise the program itself (global scope).
//!
//! All occurrences resolving to the same (scope, name) pair form one binding.
//! Property names of non-computed member access are not variable occurrences.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::ast::{Ast, NodeId, NodeKind};
use crate::invariants::ensure_binding;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct BindingId(u32);

#[derive(Clone, Debug)]
pub struct Binding {
    pub name: String,
    /// Declaring node; the program root for globals.
    pub scope: NodeId,
    /// Occurrences in pre-order.
    pub occurrences: Vec<NodeId>,
}

/// Binding table for one snapshot of the tree.
///
/// Renaming a whole binding keeps the table valid; any other structural edit
/// requires resolving again.
#[derive(Clone, Debug, Default)]
pub struct Scopes {
    bindings: IndexMap<(NodeId, String), Binding>,
    by_occurrence: HashMap<NodeId, BindingId>,
}

impl Scopes {
    pub fn resolve(ast: &Ast) -> Self {
        let mut scopes = Self::default();
        for id in ast.live_nodes() {
            let Some(name) = ast.ident_name(id) else {
                continue;
            };
            if ast.is_property_name(id) {
                continue;
            }
            let scope = declaring_scope(ast, id, name);
            let entry = scopes.bindings.entry((scope, name.to_owned()));
            let index = entry.index();
            entry
                .or_insert_with(|| Binding {
                    name: name.to_owned(),
                    scope,
                    occurrences: Vec::new(),
                })
                .occurrences
                .push(id);
            scopes.by_occurrence.insert(id, BindingId(index as u32));
        }
        scopes
    }

    pub fn binding_of(&self, occurrence: NodeId) -> Option<BindingId> {
        self.by_occurrence.get(&occurrence).copied()
    }

    pub fn get(&self, id: BindingId) -> &Binding {
        let binding = self.bindings.get_index(id.0 as usize).map(|(_, b)| b);
        ensure_binding(binding, id)
    }

    /// All occurrences sharing a binding with `occurrence`, or just itself.
    pub fn occurrences(&self, occurrence: NodeId) -> Vec<NodeId> {
        match self.binding_of(occurrence) {
            Some(b) => self.get(b).occurrences.clone(),
            None => vec![occurrence],
        }
    }

    pub fn bindings(&self) -> impl Iterator<Item = (BindingId, &Binding)> {
        self.bindings
            .values()
            .enumerate()
            .map(|(i, b)| (BindingId(i as u32), b))
    }

    /// The global binding for `name`, if anything resolves to it.
    pub fn global(&self, ast: &Ast, name: &str) -> Option<&Binding> {
        self.bindings.get(&(ast.root(), name.to_owned()))
    }
}

fn declaring_scope(ast: &Ast, occurrence: NodeId, name: &str) -> NodeId {
    ast.ancestors(occurrence)
        .find(|&a| declares(ast, a, name))
        .unwrap_or_else(|| ast.root())
}

fn declares(ast: &Ast, scope: NodeId, name: &str) -> bool {
    match ast.kind(scope) {
        NodeKind::Function { params, .. } => {
            params.iter().any(|&p| ast.ident_name(p) == Some(name))
        }
        NodeKind::Program { body } | NodeKind::Block { body } => {
            body.iter().any(|&stmt| declares_var(ast, stmt, name))
        }
        NodeKind::For { init: Some(init), .. } => declares_var(ast, *init, name),
        _ => false,
    }
}

fn declares_var(ast: &Ast, stmt: NodeId, name: &str) -> bool {
    let NodeKind::VarDecl { declarators } = ast.kind(stmt) else {
        return false;
    };
    declarators.iter().any(|&d| match ast.kind(d) {
        NodeKind::Declarator { id, .. } => ast.ident_name(*id) == Some(name),
        _ => false,
    })
}
