//! Fallbacks for nodes propagation could not reach.
//!
//! Each one types a single node and returns `true`, handing control back to
//! the worklist; `false` means it found no candidate.

use shadelift_core::{NodeId, NodeKind, Type};

use super::InferencePass;
use crate::codegen::render_expr;
use crate::{Error, Result};

impl InferencePass<'_> {
    /// Widens the untyped node with the largest literal index.
    pub(super) fn widen_indexed(&mut self) -> Result<bool> {
        let mut best: Option<(NodeId, u32)> = None;
        for &node in &self.order {
            if self.ast.ty(node).is_some() {
                continue;
            }
            if let Some(index) = self.min_size(node)
                && best.is_none_or(|(_, top)| index > top)
            {
                best = Some((node, index));
            }
        }
        let Some((node, index)) = best else {
            return Ok(false);
        };

        let ty = Type::for_min_index(index).ok_or_else(|| Error::IndexOutOfRange {
            expr: render_expr(self.ast, node),
            index,
        })?;
        log::debug!(
            "'{}' is indexed up to {index}, widening to {ty}",
            render_expr(self.ast, node)
        );
        self.assign(node, ty, false)?;
        Ok(true)
    }

    /// Applies the first pending author hint.
    pub(super) fn apply_hint(&mut self) -> Result<bool> {
        let pending = self.order.iter().find_map(|&node| {
            let slot = self.ast.node(node);
            match (slot.ty, slot.hint) {
                (None, Some(hint)) => Some((node, hint)),
                _ => None,
            }
        });
        let Some((node, hint)) = pending else {
            return Ok(false);
        };

        log::debug!("'{}' takes its hinted type {hint}", render_expr(self.ast, node));
        self.assign(node, hint, false)?;
        Ok(true)
    }

    /// Guesses a type for the first untyped identifier.
    pub(super) fn default_identifier(&mut self) -> Result<bool> {
        let Some(node) = self
            .order
            .iter()
            .copied()
            .find(|&n| self.ast.ty(n).is_none() && self.needs_type(n))
        else {
            return Ok(false);
        };

        let ty = self
            .min_size(node)
            .and_then(Type::for_min_index)
            .unwrap_or(Type::Float);
        log::warn!(
            "nothing determines the type of '{}', guessing {ty}",
            render_expr(self.ast, node)
        );
        self.assign(node, ty, true)?;
        Ok(true)
    }

    /// Largest literal index seen on `node` or anywhere in its binding.
    fn min_size(&self, node: NodeId) -> Option<u32> {
        self.scopes
            .occurrences(node)
            .into_iter()
            .filter_map(|n| self.ast.node(n).min_size)
            .max()
    }

    /// Identifiers that end up in emitted declarations or expressions.
    ///
    /// Namespace objects (`Math` in `Math.cos(x)`) and function names are
    /// never declared, so they are left alone.
    fn needs_type(&self, node: NodeId) -> bool {
        if self.ast.ident_name(node).is_none() || self.ast.is_property_name(node) {
            return false;
        }
        let Some(parent) = self.ast.parent(node) else {
            return true;
        };
        match *self.ast.kind(parent) {
            NodeKind::Function { id, .. } => id != node,
            NodeKind::Member {
                object,
                computed: false,
                ..
            } if object == node => !self.is_callee(parent),
            _ => true,
        }
    }

    fn is_callee(&self, node: NodeId) -> bool {
        self.ast
            .parent(node)
            .is_some_and(|p| matches!(*self.ast.kind(p), NodeKind::Call { callee, .. } if callee == node))
    }
}
