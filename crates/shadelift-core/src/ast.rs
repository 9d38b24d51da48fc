//! Arena-allocated syntax tree for the shader dialect.
//!
//! Nodes are addressed by [`NodeId`] and mutated in place by the compiler
//! passes. Parent links are derived data: every pass that restructures the
//! tree calls [`Ast::link_parents`] afterwards.

use crate::Type;

/// Index of a node in its [`Ast`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Eq,
    NotEq,
    StrictEq,
    StrictNotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    And,
    Or,
}

impl BinaryOp {
    /// Parses a binary or logical operator in source spelling.
    pub fn from_source(op: &str) -> Option<Self> {
        Some(match op {
            "+" => Self::Add,
            "-" => Self::Sub,
            "*" => Self::Mul,
            "/" => Self::Div,
            "%" => Self::Rem,
            "==" => Self::Eq,
            "!=" => Self::NotEq,
            "===" => Self::StrictEq,
            "!==" => Self::StrictNotEq,
            "<" => Self::Lt,
            "<=" => Self::LtEq,
            ">" => Self::Gt,
            ">=" => Self::GtEq,
            "&&" => Self::And,
            "||" => Self::Or,
            _ => return None,
        })
    }

    /// Spelling in the target language. Strict comparisons collapse to plain ones.
    ///
    /// `%` is reserved there; printers lower `Rem` to a `mod(a, b)` call.
    pub const fn as_glsl(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
            Self::Eq | Self::StrictEq => "==",
            Self::NotEq | Self::StrictNotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::And => "&&",
            Self::Or => "||",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum AssignOp {
    Assign,
    Add,
    Sub,
    Mul,
    Div,
}

impl AssignOp {
    pub fn from_source(op: &str) -> Option<Self> {
        Some(match op {
            "=" => Self::Assign,
            "+=" => Self::Add,
            "-=" => Self::Sub,
            "*=" => Self::Mul,
            "/=" => Self::Div,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Assign => "=",
            Self::Add => "+=",
            Self::Sub => "-=",
            Self::Mul => "*=",
            Self::Div => "/=",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum UnaryOp {
    Neg,
    Plus,
    Not,
}

impl UnaryOp {
    pub fn from_source(op: &str) -> Option<Self> {
        Some(match op {
            "-" => Self::Neg,
            "+" => Self::Plus,
            "!" => Self::Not,
            _ => return None,
        })
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum UpdateOp {
    Increment,
    Decrement,
}

impl UpdateOp {
    pub fn from_source(op: &str) -> Option<Self> {
        match op {
            "++" => Some(Self::Increment),
            "--" => Some(Self::Decrement),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Increment => "++",
            Self::Decrement => "--",
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Literal {
    /// Numeric literal, kept in its source spelling.
    Number(String),
    Bool(bool),
}

impl Literal {
    /// Value of an integral numeric literal, used for constant indices.
    pub fn as_index(&self) -> Option<u32> {
        match self {
            Self::Number(raw) => raw.parse().ok(),
            Self::Bool(_) => None,
        }
    }
}

/// Node payload. Child references are [`NodeId`]s into the same arena.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum NodeKind {
    Program {
        body: Vec<NodeId>,
    },
    Function {
        id: NodeId,
        params: Vec<NodeId>,
        body: NodeId,
    },
    VarDecl {
        declarators: Vec<NodeId>,
    },
    Declarator {
        id: NodeId,
        init: Option<NodeId>,
    },
    Block {
        body: Vec<NodeId>,
    },
    ExprStmt {
        expr: NodeId,
    },
    If {
        test: NodeId,
        consequent: NodeId,
        alternate: Option<NodeId>,
    },
    For {
        init: Option<NodeId>,
        test: Option<NodeId>,
        update: Option<NodeId>,
        body: NodeId,
    },
    Return {
        argument: Option<NodeId>,
    },
    /// Abandons the current fragment.
    Discard,
    Conditional {
        test: NodeId,
        consequent: NodeId,
        alternate: NodeId,
    },
    Binary {
        op: BinaryOp,
        left: NodeId,
        right: NodeId,
    },
    Assign {
        op: AssignOp,
        left: NodeId,
        right: NodeId,
    },
    Unary {
        op: UnaryOp,
        argument: NodeId,
    },
    Update {
        op: UpdateOp,
        prefix: bool,
        argument: NodeId,
    },
    Call {
        callee: NodeId,
        args: Vec<NodeId>,
    },
    Member {
        object: NodeId,
        property: NodeId,
        computed: bool,
    },
    Array {
        elements: Vec<NodeId>,
    },
    Ident {
        name: String,
    },
    This,
    Literal(Literal),
    Sequence {
        exprs: Vec<NodeId>,
    },
    /// Pre-rendered target source, emitted verbatim.
    Raw {
        source: String,
    },
}

/// One arena slot: the payload plus the facts passes attach to it.
#[derive(Clone, Debug)]
pub struct Node {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    /// Resolved type; written once by inference.
    pub ty: Option<Type>,
    /// Set when `ty` came from fallback defaulting rather than evidence.
    pub guessed: bool,
    /// Largest literal index observed against this node.
    pub min_size: Option<u32>,
    /// Author-supplied type used when nothing else fixes this node.
    pub hint: Option<Type>,
    /// Parameter written by the callee (`out` qualifier).
    pub out_param: bool,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            ty: None,
            guessed: false,
            min_size: None,
            hint: None,
            out_param: false,
        }
    }
}

/// The syntax tree of one shader definition.
#[derive(Clone, Debug)]
pub struct Ast {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Ast {
    /// Wraps `body` in a program node and links parents.
    pub(crate) fn from_parts(mut nodes: Vec<Node>, body: Vec<NodeId>) -> Self {
        let root = NodeId(nodes.len() as u32);
        nodes.push(Node::new(NodeKind::Program { body }));
        let mut ast = Self { nodes, root };
        ast.link_parents();
        ast
    }

    pub(crate) fn push(nodes: &mut Vec<Node>, kind: NodeKind) -> NodeId {
        let id = NodeId(nodes.len() as u32);
        nodes.push(Node::new(kind));
        id
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of allocated nodes, detached ones included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    #[inline]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    #[inline]
    pub fn ty(&self, id: NodeId) -> Option<Type> {
        self.node(id).ty
    }

    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Allocates a detached node. The caller splices it in and relinks.
    pub fn alloc(&mut self, kind: NodeKind) -> NodeId {
        Self::push(&mut self.nodes, kind)
    }

    /// Replaces the payload of `id`, keeping its slot and attached facts.
    pub fn replace(&mut self, id: NodeId, kind: NodeKind) {
        self.node_mut(id).kind = kind;
    }

    pub fn ident_name(&self, id: NodeId) -> Option<&str> {
        match self.kind(id) {
            NodeKind::Ident { name } => Some(name),
            _ => None,
        }
    }

    /// Renames an identifier node in place; other kinds are left untouched.
    pub fn rename(&mut self, id: NodeId, new_name: impl Into<String>) {
        if let NodeKind::Ident { name } = &mut self.node_mut(id).kind {
            *name = new_name.into();
        }
    }

    /// Top-level function declarations, in source order.
    pub fn functions(&self) -> impl Iterator<Item = NodeId> + '_ {
        let body: &[NodeId] = match self.kind(self.root) {
            NodeKind::Program { body } => body,
            _ => &[],
        };
        body.iter()
            .copied()
            .filter(|&id| matches!(self.kind(id), NodeKind::Function { .. }))
    }

    /// Name of a function declaration.
    pub fn function_name(&self, func: NodeId) -> Option<&str> {
        match self.kind(func) {
            NodeKind::Function { id, .. } => self.ident_name(*id),
            _ => None,
        }
    }

    /// Finds the top-level function declared as `name`.
    pub fn find_function(&self, name: &str) -> Option<NodeId> {
        self.functions()
            .find(|&f| self.function_name(f) == Some(name))
    }

    /// Dotted path of an identifier or a chain of non-computed member accesses.
    ///
    /// `Math.cos` yields `"Math.cos"`; anything else in the chain yields `None`.
    pub fn dotted_path(&self, id: NodeId) -> Option<String> {
        match self.kind(id) {
            NodeKind::Ident { name } => Some(name.clone()),
            NodeKind::Member {
                object,
                property,
                computed: false,
            } => {
                let head = self.dotted_path(*object)?;
                let tail = self.ident_name(*property)?;
                Some(format!("{head}.{tail}"))
            }
            _ => None,
        }
    }
}
