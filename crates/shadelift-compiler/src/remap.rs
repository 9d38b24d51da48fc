//! Call-site classification and known-function rewriting.
//!
//! Classification runs before inference, since known signatures seed it.
//! Rewrites run after: folding `vec3.scale(v, s)` into `(v * s)` earlier would
//! hand inference a binary expression whose operands have different types.

use indexmap::IndexMap;
use shadelift_core::{AssignOp, Ast, NodeId, NodeKind, Type};

use crate::Error;
use crate::codegen::render_expr;
use crate::registry::{KnownFunction, Rewrite, registry};

/// What a call site invokes.
#[derive(Clone, Copy, Debug)]
pub enum CallTarget {
    /// A top-level function of the program.
    User(NodeId),
    Known(&'static KnownFunction),
}

/// Targets of every call site, plus errors held until reachability.
#[derive(Debug, Default)]
pub struct CallTable {
    targets: IndexMap<NodeId, CallTarget>,
    errors: IndexMap<NodeId, Error>,
}

impl CallTable {
    pub fn target(&self, call: NodeId) -> Option<CallTarget> {
        self.targets.get(&call).copied()
    }

    pub fn known(&self, call: NodeId) -> Option<&'static KnownFunction> {
        match self.target(call)? {
            CallTarget::Known(entry) => Some(entry),
            CallTarget::User(_) => None,
        }
    }

    /// Error recorded on `node`, if any.
    pub fn error(&self, node: NodeId) -> Option<&Error> {
        self.errors.get(&node)
    }

    /// Removes and returns the error recorded on `node`.
    pub fn take_error(&mut self, node: NodeId) -> Option<Error> {
        self.errors.shift_remove(&node)
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}

/// Classifies every call site as user-defined, known, or not whitelisted.
///
/// User-defined functions shadow registry entries of the same name.
pub fn resolve_calls(ast: &Ast) -> CallTable {
    let mut table = CallTable::default();
    for call in ast.live_nodes() {
        let NodeKind::Call { callee, args } = ast.kind(call) else {
            continue;
        };
        let path = ast.dotted_path(*callee);

        let user = ast
            .ident_name(*callee)
            .and_then(|name| ast.find_function(name));
        if let Some(func) = user {
            table.targets.insert(call, CallTarget::User(func));
            continue;
        }

        let known = path
            .as_deref()
            .and_then(|name| registry().lookup(name, args.len()));
        match known {
            Some(entry) => {
                if let Rewrite::Reject(reason) = &entry.rewrite {
                    table.errors.insert(
                        call,
                        Error::RejectedCall {
                            callee: entry.name.clone(),
                            reason: reason.clone(),
                        },
                    );
                }
                table.targets.insert(call, CallTarget::Known(entry));
            }
            None => {
                let callee = path.unwrap_or_else(|| render_expr(ast, *callee));
                log::debug!("call to '{callee}' is not whitelisted");
                table.errors.insert(
                    call,
                    Error::NotWhitelisted {
                        callee,
                        accepted: registry().signatures(),
                    },
                );
            }
        }
    }
    table
}

/// Applies the rewrite rule of every known call site, in source order.
pub fn apply_rewrites(ast: &mut Ast, calls: &CallTable) {
    for (&call, target) in &calls.targets {
        if let CallTarget::Known(entry) = target {
            rewrite_call(ast, call, entry);
        }
    }
    ast.link_parents();
}

fn rewrite_call(ast: &mut Ast, call: NodeId, entry: &KnownFunction) {
    let NodeKind::Call { args, .. } = ast.kind(call).clone() else {
        return;
    };
    if args.len() != entry.arity() {
        return;
    }
    let ty = ast.ty(call);

    let kind = match &entry.rewrite {
        Rewrite::Keep | Rewrite::Reject(_) => return,
        Rewrite::Rename(to) => NodeKind::Call {
            callee: typed_ident(ast, to, ty),
            args,
        },
        Rewrite::Infix(op) => NodeKind::Binary {
            op: *op,
            left: args[0],
            right: args[1],
        },
        Rewrite::Unary(op) => NodeKind::Unary {
            op: *op,
            argument: args[0],
        },
        Rewrite::Identity => NodeKind::Sequence {
            exprs: vec![args[0]],
        },
        Rewrite::Assign => NodeKind::Assign {
            op: AssignOp::Assign,
            left: args[0],
            right: args[1],
        },
        Rewrite::OutInfix(op) => out_form(ast, &args, ty, |rest| NodeKind::Binary {
            op: *op,
            left: rest[0],
            right: rest[1],
        }),
        Rewrite::OutUnary(op) => out_form(ast, &args, ty, |rest| NodeKind::Unary {
            op: *op,
            argument: rest[0],
        }),
        Rewrite::OutRename(to) => {
            let callee = typed_ident(ast, to, ty);
            out_form(ast, &args, ty, |rest| NodeKind::Call {
                callee,
                args: rest.to_vec(),
            })
        }
        Rewrite::Splice(source) => NodeKind::Raw {
            source: source.clone(),
        },
    };
    ast.replace(call, kind);
}

/// `f(out, rest..)` becomes `out = plain(rest)`, or `plain(rest)` when `out`
/// cannot be assigned to.
fn out_form(
    ast: &mut Ast,
    args: &[NodeId],
    ty: Option<Type>,
    plain: impl FnOnce(&[NodeId]) -> NodeKind,
) -> NodeKind {
    let (&out, rest) = match args.split_first() {
        Some(split) => split,
        None => return plain(args),
    };
    if !ast.is_lvalue(out) {
        return plain(rest);
    }
    let right = ast.alloc(plain(rest));
    ast.node_mut(right).ty = ty;
    NodeKind::Assign {
        op: AssignOp::Assign,
        left: out,
        right,
    }
}

fn typed_ident(ast: &mut Ast, name: &str, ty: Option<Type>) -> NodeId {
    let id = ast.alloc(NodeKind::Ident {
        name: name.to_owned(),
    });
    ast.node_mut(id).ty = ty;
    id
}
