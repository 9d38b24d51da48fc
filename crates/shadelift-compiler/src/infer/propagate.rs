//! Sharing rules between a freshly typed node and its neighbors.

use shadelift_core::{NodeId, NodeKind};

use super::InferencePass;
use crate::Result;
use crate::remap::CallTarget;

impl InferencePass<'_> {
    pub(super) fn propagate(&mut self, node: NodeId) -> Result<()> {
        self.propagate_into(node)?;
        if let Some(parent) = self.ast.parent(node) {
            self.propagate_from_child(node, parent)?;
        }
        Ok(())
    }

    /// Rules where `node` is the expression being formed.
    fn propagate_into(&mut self, node: NodeId) -> Result<()> {
        match *self.ast.kind(node) {
            NodeKind::Call { callee, .. } => self.share(node, callee),
            NodeKind::Binary { left, right, .. } | NodeKind::Assign { left, right, .. } => {
                self.share(left, right)?;
                self.share(node, left)
            }
            NodeKind::Unary { argument, .. } | NodeKind::Update { argument, .. } => {
                self.share(node, argument)
            }
            NodeKind::Conditional {
                consequent,
                alternate,
                ..
            } => {
                self.share(consequent, alternate)?;
                self.share(node, consequent)
            }
            _ => Ok(()),
        }
    }

    /// Rules where `node` sits under `parent`.
    fn propagate_from_child(&mut self, node: NodeId, parent: NodeId) -> Result<()> {
        match *self.ast.kind(parent) {
            NodeKind::Declarator {
                id,
                init: Some(init),
            } => self.share(id, init),
            NodeKind::Call { callee, .. } if callee == node => self.share(node, parent),
            NodeKind::Call { .. } => match self.calls.target(parent) {
                Some(CallTarget::User(func)) => self.link_function(func),
                _ => Ok(()),
            },
            NodeKind::Function { .. } => self.link_function(parent),
            NodeKind::Return {
                argument: Some(argument),
            } => match self.ast.enclosing_function(parent) {
                Some(func) => self.link_return(func, argument),
                None => Ok(()),
            },
            NodeKind::Conditional { test, .. } if test == node => Ok(()),
            NodeKind::Binary { .. }
            | NodeKind::Assign { .. }
            | NodeKind::Unary { .. }
            | NodeKind::Update { .. }
            | NodeKind::Conditional { .. } => self.propagate_into(parent),
            _ => Ok(()),
        }
    }

    /// A function's name shares with its call sites of matching arity and its
    /// returns; each parameter shares with the argument in its position.
    fn link_function(&mut self, func: NodeId) -> Result<()> {
        let NodeKind::Function { id, ref params, .. } = *self.ast.kind(func) else {
            return Ok(());
        };
        let params = params.clone();

        for occurrence in self.scopes.occurrences(id) {
            let Some(call) = self.ast.parent(occurrence) else {
                continue;
            };
            let NodeKind::Call { callee, ref args } = *self.ast.kind(call) else {
                continue;
            };
            if callee != occurrence || args.len() != params.len() {
                continue;
            }
            let args = args.clone();
            self.share(id, call)?;
            for (&param, &arg) in params.iter().zip(&args) {
                self.share(param, arg)?;
            }
        }

        for ret in self.ast.returns_of(func) {
            if let NodeKind::Return {
                argument: Some(argument),
            } = *self.ast.kind(ret)
            {
                self.share(id, argument)?;
            }
        }
        Ok(())
    }

    fn link_return(&mut self, func: NodeId, argument: NodeId) -> Result<()> {
        match *self.ast.kind(func) {
            NodeKind::Function { id, .. } => self.share(id, argument),
            _ => Ok(()),
        }
    }
}
