//! Programmatic construction of shader definitions.
//!
//! ```
//! use shadelift_core::{AstBuilder, BinaryOp};
//!
//! let mut b = AstBuilder::new();
//! let pos = b.path("attributes.position");
//! let ret = b.ret(Some(pos));
//! b.function("VertexPosition", &[], vec![ret]);
//! let one = b.num("1");
//! let two = b.num("2");
//! let sum = b.binary(BinaryOp::Add, one, two);
//! let ret = b.ret(Some(sum));
//! b.function("FragmentColor", &[], vec![ret]);
//! let ast = b.finish();
//! assert_eq!(ast.functions().count(), 2);
//! ```

use crate::ast::{
    AssignOp, Ast, BinaryOp, Literal, Node, NodeId, NodeKind, UnaryOp, UpdateOp,
};

/// Allocates nodes bottom-up; top-level statements are collected in order.
#[derive(Default)]
pub struct AstBuilder {
    nodes: Vec<Node>,
    body: Vec<NodeId>,
}

impl AstBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&mut self, kind: NodeKind) -> NodeId {
        Ast::push(&mut self.nodes, kind)
    }

    /// Appends a top-level statement.
    pub fn statement(&mut self, stmt: NodeId) {
        self.body.push(stmt);
    }

    /// Declares a top-level function and returns the declaration.
    pub fn function(&mut self, name: &str, params: &[&str], body: Vec<NodeId>) -> NodeId {
        let id = self.ident(name);
        let params = params.iter().map(|p| self.ident(p)).collect();
        let body = self.block(body);
        let func = self.node(NodeKind::Function { id, params, body });
        self.statement(func);
        func
    }

    pub fn finish(self) -> Ast {
        Ast::from_parts(self.nodes, self.body)
    }

    // Statements

    /// `var name = init;`
    pub fn var(&mut self, name: &str, init: Option<NodeId>) -> NodeId {
        let id = self.ident(name);
        let declarator = self.node(NodeKind::Declarator { id, init });
        self.node(NodeKind::VarDecl {
            declarators: vec![declarator],
        })
    }

    pub fn expr_stmt(&mut self, expr: NodeId) -> NodeId {
        self.node(NodeKind::ExprStmt { expr })
    }

    pub fn ret(&mut self, argument: Option<NodeId>) -> NodeId {
        self.node(NodeKind::Return { argument })
    }

    pub fn block(&mut self, body: Vec<NodeId>) -> NodeId {
        self.node(NodeKind::Block { body })
    }

    pub fn if_else(
        &mut self,
        test: NodeId,
        consequent: NodeId,
        alternate: Option<NodeId>,
    ) -> NodeId {
        self.node(NodeKind::If {
            test,
            consequent,
            alternate,
        })
    }

    pub fn for_loop(
        &mut self,
        init: Option<NodeId>,
        test: Option<NodeId>,
        update: Option<NodeId>,
        body: NodeId,
    ) -> NodeId {
        self.node(NodeKind::For {
            init,
            test,
            update,
            body,
        })
    }

    // Expressions

    pub fn ident(&mut self, name: &str) -> NodeId {
        self.node(NodeKind::Ident {
            name: name.to_owned(),
        })
    }

    /// Builds `a.b.c` as nested member access; a `this` segment becomes the receiver.
    pub fn path(&mut self, dotted: &str) -> NodeId {
        let mut segments = dotted.split('.');
        let head = segments.next().unwrap_or_default();
        let mut object = match head {
            "this" => self.node(NodeKind::This),
            name => self.ident(name),
        };
        for segment in segments {
            object = self.member(object, segment);
        }
        object
    }

    /// `object.name`
    pub fn member(&mut self, object: NodeId, name: &str) -> NodeId {
        let property = self.ident(name);
        self.node(NodeKind::Member {
            object,
            property,
            computed: false,
        })
    }

    /// `object[index]`
    pub fn index(&mut self, object: NodeId, index: NodeId) -> NodeId {
        self.node(NodeKind::Member {
            object,
            property: index,
            computed: true,
        })
    }

    /// Numeric literal in source spelling, e.g. `"1"` or `"0.5"`.
    pub fn num(&mut self, raw: &str) -> NodeId {
        self.node(NodeKind::Literal(Literal::Number(raw.to_owned())))
    }

    pub fn bool(&mut self, value: bool) -> NodeId {
        self.node(NodeKind::Literal(Literal::Bool(value)))
    }

    pub fn binary(&mut self, op: BinaryOp, left: NodeId, right: NodeId) -> NodeId {
        self.node(NodeKind::Binary { op, left, right })
    }

    /// `left = right`
    pub fn assign(&mut self, left: NodeId, right: NodeId) -> NodeId {
        self.assign_op(AssignOp::Assign, left, right)
    }

    pub fn assign_op(&mut self, op: AssignOp, left: NodeId, right: NodeId) -> NodeId {
        self.node(NodeKind::Assign { op, left, right })
    }

    pub fn unary(&mut self, op: UnaryOp, argument: NodeId) -> NodeId {
        self.node(NodeKind::Unary { op, argument })
    }

    pub fn update(&mut self, op: UpdateOp, prefix: bool, argument: NodeId) -> NodeId {
        self.node(NodeKind::Update {
            op,
            prefix,
            argument,
        })
    }

    pub fn conditional(&mut self, test: NodeId, consequent: NodeId, alternate: NodeId) -> NodeId {
        self.node(NodeKind::Conditional {
            test,
            consequent,
            alternate,
        })
    }

    pub fn call(&mut self, callee: NodeId, args: Vec<NodeId>) -> NodeId {
        self.node(NodeKind::Call { callee, args })
    }

    /// Call through a dotted path: `call_path("Math.cos", args)`.
    pub fn call_path(&mut self, dotted: &str, args: Vec<NodeId>) -> NodeId {
        let callee = self.path(dotted);
        self.call(callee, args)
    }

    pub fn array(&mut self, elements: Vec<NodeId>) -> NodeId {
        self.node(NodeKind::Array { elements })
    }

    pub fn sequence(&mut self, exprs: Vec<NodeId>) -> NodeId {
        self.node(NodeKind::Sequence { exprs })
    }
}
