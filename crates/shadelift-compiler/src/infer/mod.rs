//! Type inference by constraint propagation.
//!
//! Evidence enters through seeds (array literals, known-function signatures,
//! indexing) and spreads along sharing rules until a fixpoint. When the
//! worklist drains with nodes still untyped, fallbacks fix one more node at a
//! time and propagation resumes:
//! 1. nodes indexed with literals widen to the smallest fitting type,
//! 2. author hints on the entry points apply,
//! 3. remaining identifiers default to `float`.

mod fallback;
mod propagate;


use shadelift_core::{Ast, NodeId, NodeKind, Scopes, Type};

use crate::codegen::render_expr;
use crate::remap::CallTable;
use crate::{Error, Result};

/// Assigns a resolved type to every identifier and to every expression
/// evidence reaches.
///
/// Running it again over a typed tree changes nothing.
pub fn infer_types(ast: &mut Ast, calls: &CallTable) -> Result<()> {
    let scopes = Scopes::resolve(ast);
    let order = ast.live_nodes();
    InferencePass {
        ast,
        calls,
        scopes,
        order,
        worklist: Vec::new(),
    }
    .run()
}

struct InferencePass<'a> {
    ast: &'a mut Ast,
    calls: &'a CallTable,
    scopes: Scopes,
    /// Live nodes in pre-order; fallbacks pick candidates in this order.
    order: Vec<NodeId>,
    worklist: Vec<NodeId>,
}

impl InferencePass<'_> {
    fn run(mut self) -> Result<()> {
        self.seed()?;
        loop {
            self.drain()?;
            if self.widen_indexed()? || self.apply_hint()? || self.default_identifier()? {
                continue;
            }
            return Ok(());
        }
    }

    fn drain(&mut self) -> Result<()> {
        while let Some(node) = self.worklist.pop() {
            self.propagate(node)?;
        }
        Ok(())
    }

    fn seed(&mut self) -> Result<()> {
        let order = self.order.clone();

        for &node in &order {
            if let NodeKind::Array { elements } = self.ast.kind(node) {
                let elements = elements.clone();
                let len = elements.len();
                let ty = Type::vec(len).ok_or_else(|| Error::InvalidVectorLiteral {
                    expr: render_expr(self.ast, node),
                    len,
                })?;
                self.assign(node, ty, false)?;
                for element in elements {
                    self.assign(element, Type::Float, false)?;
                }
            }
        }

        for &node in &order {
            let Some(entry) = self.calls.known(node) else {
                continue;
            };
            let NodeKind::Call { args, .. } = self.ast.kind(node).clone() else {
                continue;
            };
            self.assign(node, entry.ret, false)?;
            if args.len() != entry.arity() {
                return Err(Error::ArityMismatch {
                    callee: entry.name.clone(),
                    expected: entry.arity(),
                    found: args.len(),
                });
            }
            for (&arg, &ty) in args.iter().zip(&entry.params) {
                self.assign(arg, ty, false)?;
            }
        }

        for &node in &order {
            let NodeKind::Member {
                object,
                property,
                computed: true,
            } = *self.ast.kind(node)
            else {
                continue;
            };
            self.assign(property, Type::Int, false)?;
            self.assign(node, Type::Float, false)?;
            let literal_index = match self.ast.kind(property) {
                NodeKind::Literal(lit) => lit.as_index(),
                _ => None,
            };
            if let Some(index) = literal_index {
                let hint = &mut self.ast.node_mut(object).min_size;
                *hint = Some(hint.map_or(index, |h| h.max(index)));
            }
        }
        Ok(())
    }

    /// Types `node`, and its whole binding when it is an identifier.
    fn assign(&mut self, node: NodeId, ty: Type, guessed: bool) -> Result<()> {
        for occurrence in self.scopes.occurrences(node) {
            match self.ast.ty(occurrence) {
                Some(existing) if existing == ty => {}
                Some(existing) => return Err(self.contradiction(occurrence, existing, ty)),
                None => {
                    if log::log_enabled!(log::Level::Debug) {
                        log::debug!("{} : {ty}", render_expr(self.ast, occurrence));
                    }
                    let slot = self.ast.node_mut(occurrence);
                    slot.ty = Some(ty);
                    slot.guessed = guessed;
                    self.worklist.push(occurrence);
                }
            }
        }
        Ok(())
    }

    /// Makes `a` and `b` agree; a no-op while both are untyped.
    fn share(&mut self, a: NodeId, b: NodeId) -> Result<()> {
        let (ga, gb) = (self.ast.node(a).guessed, self.ast.node(b).guessed);
        match (self.ast.ty(a), self.ast.ty(b)) {
            (Some(ta), Some(tb)) if ta != tb => Err(self.contradiction(b, tb, ta)),
            (Some(ta), None) => self.assign(b, ta, ga),
            (None, Some(tb)) => self.assign(a, tb, gb),
            _ => Ok(()),
        }
    }

    fn contradiction(&self, node: NodeId, first: Type, second: Type) -> Error {
        Error::TypeContradiction {
            expr: render_expr(self.ast, node),
            first,
            second,
        }
    }
}
