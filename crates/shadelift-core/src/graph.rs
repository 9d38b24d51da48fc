//! Structural queries over the arena: children, descendants, parents.

use crate::ast::{Ast, NodeId, NodeKind};

impl NodeKind {
    /// Structural children in source order.
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            Self::Program { body } | Self::Block { body } => body.clone(),
            Self::Function { id, params, body } => {
                let mut out = Vec::with_capacity(params.len() + 2);
                out.push(*id);
                out.extend(params);
                out.push(*body);
                out
            }
            Self::VarDecl { declarators } => declarators.clone(),
            Self::Declarator { id, init } => std::iter::once(*id).chain(*init).collect(),
            Self::ExprStmt { expr } => vec![*expr],
            Self::If {
                test,
                consequent,
                alternate,
            } => [*test, *consequent].into_iter().chain(*alternate).collect(),
            Self::For {
                init,
                test,
                update,
                body,
            } => init
                .iter()
                .chain(test)
                .chain(update)
                .copied()
                .chain(std::iter::once(*body))
                .collect(),
            Self::Return { argument } => argument.iter().copied().collect(),
            Self::Conditional {
                test,
                consequent,
                alternate,
            } => vec![*test, *consequent, *alternate],
            Self::Binary { left, right, .. } | Self::Assign { left, right, .. } => {
                vec![*left, *right]
            }
            Self::Unary { argument, .. } | Self::Update { argument, .. } => vec![*argument],
            Self::Call { callee, args } => std::iter::once(*callee).chain(args.clone()).collect(),
            Self::Member {
                object, property, ..
            } => vec![*object, *property],
            Self::Array { elements } => elements.clone(),
            Self::Sequence { exprs } => exprs.clone(),
            Self::Discard
            | Self::Ident { .. }
            | Self::This
            | Self::Literal(_)
            | Self::Raw { .. } => Vec::new(),
        }
    }
}

impl Ast {
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.kind(id).children()
    }

    /// Pre-order walk starting at (and including) `id`.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).into_iter().rev());
        }
        out
    }

    /// Every node reachable from the root, in pre-order.
    pub fn live_nodes(&self) -> Vec<NodeId> {
        self.descendants(self.root())
    }

    /// Recomputes every parent link from the structural children.
    ///
    /// Detached nodes keep whatever parent they had; nothing reachable points at them.
    pub fn link_parents(&mut self) {
        let root = self.root();
        self.node_mut(root).parent = None;
        for id in self.live_nodes() {
            for child in self.children(id) {
                self.node_mut(child).parent = Some(id);
            }
        }
    }

    /// Strict ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&p| self.parent(p))
    }

    /// Nearest function declaration strictly containing `id`.
    pub fn enclosing_function(&self, id: NodeId) -> Option<NodeId> {
        self.ancestors(id)
            .find(|&a| matches!(self.kind(a), NodeKind::Function { .. }))
    }

    /// `id` is the property name of a non-computed member access (`x` in `a.x`).
    pub fn is_property_name(&self, id: NodeId) -> bool {
        match self.parent(id).map(|p| self.kind(p)) {
            Some(NodeKind::Member {
                property,
                computed: false,
                ..
            }) => *property == id,
            _ => false,
        }
    }

    /// Whether the node can stand on the left of an assignment.
    pub fn is_lvalue(&self, id: NodeId) -> bool {
        matches!(
            self.kind(id),
            NodeKind::Ident { .. } | NodeKind::Member { .. }
        )
    }

    /// Whether `func` returns a value anywhere in its own body.
    pub fn returns_value(&self, func: NodeId) -> bool {
        self.returns_of(func).into_iter().any(|r| {
            matches!(
                self.kind(r),
                NodeKind::Return {
                    argument: Some(_)
                }
            )
        })
    }

    /// Return statements belonging to `func` (not to nested functions).
    pub fn returns_of(&self, func: NodeId) -> Vec<NodeId> {
        self.descendants(func)
            .into_iter()
            .filter(|&n| matches!(self.kind(n), NodeKind::Return { .. }))
            .filter(|&n| self.enclosing_function(n) == Some(func))
            .collect()
    }
}
