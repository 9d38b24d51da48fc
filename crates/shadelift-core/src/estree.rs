//! ESTree JSON intake.
//!
//! Mainstream JavaScript parsers emit ESTree; this module deserializes the
//! subset the shader dialect admits and lowers it into the arena. Position
//! fields (`range`, `loc`, `start`, `end`) and unrelated flags are ignored.

use serde::Deserialize;
use serde_json::Value;

use crate::ast::{
    AssignOp, Ast, BinaryOp, Literal, Node, NodeId, NodeKind, UnaryOp, UpdateOp,
};

/// Errors raised while reading an ESTree document.
#[derive(Debug, thiserror::Error)]
pub enum AstError {
    #[error("invalid ESTree JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported syntax: {0} is not part of the shader dialect")]
    UnsupportedNode(String),

    #[error("unsupported operator '{0}'")]
    UnsupportedOperator(String),

    #[error("unsupported literal {0}: only numbers and booleans are allowed")]
    UnsupportedLiteral(String),

    #[error("expected a Program at the top level, found {0}")]
    NotAProgram(String),
}

const SUPPORTED: &[&str] = &[
    "Program",
    "FunctionDeclaration",
    "VariableDeclaration",
    "VariableDeclarator",
    "BlockStatement",
    "ExpressionStatement",
    "EmptyStatement",
    "IfStatement",
    "ForStatement",
    "ReturnStatement",
    "ConditionalExpression",
    "BinaryExpression",
    "LogicalExpression",
    "AssignmentExpression",
    "UnaryExpression",
    "UpdateExpression",
    "CallExpression",
    "MemberExpression",
    "ArrayExpression",
    "Identifier",
    "ThisExpression",
    "Literal",
    "SequenceExpression",
];

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum EsNode {
    Program {
        body: Vec<EsNode>,
    },
    FunctionDeclaration {
        id: Box<EsNode>,
        params: Vec<EsNode>,
        body: Box<EsNode>,
    },
    VariableDeclaration {
        declarations: Vec<EsNode>,
    },
    VariableDeclarator {
        id: Box<EsNode>,
        init: Option<Box<EsNode>>,
    },
    BlockStatement {
        body: Vec<EsNode>,
    },
    ExpressionStatement {
        expression: Box<EsNode>,
    },
    EmptyStatement {},
    IfStatement {
        test: Box<EsNode>,
        consequent: Box<EsNode>,
        alternate: Option<Box<EsNode>>,
    },
    ForStatement {
        init: Option<Box<EsNode>>,
        test: Option<Box<EsNode>>,
        update: Option<Box<EsNode>>,
        body: Box<EsNode>,
    },
    ReturnStatement {
        argument: Option<Box<EsNode>>,
    },
    ConditionalExpression {
        test: Box<EsNode>,
        consequent: Box<EsNode>,
        alternate: Box<EsNode>,
    },
    BinaryExpression {
        operator: String,
        left: Box<EsNode>,
        right: Box<EsNode>,
    },
    LogicalExpression {
        operator: String,
        left: Box<EsNode>,
        right: Box<EsNode>,
    },
    AssignmentExpression {
        operator: String,
        left: Box<EsNode>,
        right: Box<EsNode>,
    },
    UnaryExpression {
        operator: String,
        argument: Box<EsNode>,
    },
    UpdateExpression {
        operator: String,
        prefix: bool,
        argument: Box<EsNode>,
    },
    CallExpression {
        callee: Box<EsNode>,
        arguments: Vec<EsNode>,
    },
    MemberExpression {
        object: Box<EsNode>,
        property: Box<EsNode>,
        computed: bool,
    },
    ArrayExpression {
        elements: Vec<EsNode>,
    },
    Identifier {
        name: String,
    },
    ThisExpression {},
    Literal {
        value: Value,
        raw: Option<String>,
    },
    SequenceExpression {
        expressions: Vec<EsNode>,
    },
}

impl Ast {
    /// Reads an ESTree `Program` document.
    pub fn from_estree_json(json: &str) -> Result<Self, AstError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_estree_value(value)
    }

    pub fn from_estree_value(value: Value) -> Result<Self, AstError> {
        check_supported(&value)?;
        let EsNode::Program { body } = EsNode::deserialize(&value)? else {
            let found = value.get("type").and_then(Value::as_str).unwrap_or("a non-node");
            return Err(AstError::NotAProgram(found.to_owned()));
        };

        let mut lowering = Lowering::default();
        let mut stmts = Vec::with_capacity(body.len());
        for stmt in body {
            if let Some(id) = lowering.statement(stmt)? {
                stmts.push(id);
            }
        }
        Ok(Ast::from_parts(lowering.nodes, stmts))
    }
}

/// Rejects the first node whose `type` falls outside the dialect, so the
/// error names it instead of surfacing serde's variant list.
fn check_supported(value: &Value) -> Result<(), AstError> {
    match value {
        Value::Object(map) => {
            if let Some(Value::String(ty)) = map.get("type")
                && !SUPPORTED.contains(&ty.as_str())
            {
                return Err(AstError::UnsupportedNode(ty.clone()));
            }
            for (key, child) in map {
                if matches!(key.as_str(), "loc" | "range" | "value" | "regex") {
                    continue;
                }
                check_supported(child)?;
            }
            Ok(())
        }
        Value::Array(items) => items.iter().try_for_each(check_supported),
        _ => Ok(()),
    }
}

#[derive(Default)]
struct Lowering {
    nodes: Vec<Node>,
}

impl Lowering {
    fn push(&mut self, kind: NodeKind) -> NodeId {
        Ast::push(&mut self.nodes, kind)
    }

    /// Lowers a statement; empty statements vanish.
    fn statement(&mut self, node: EsNode) -> Result<Option<NodeId>, AstError> {
        let kind = match node {
            EsNode::EmptyStatement {} => return Ok(None),
            EsNode::FunctionDeclaration { id, params, body } => {
                let id = self.expr(*id)?;
                let params = params
                    .into_iter()
                    .map(|p| self.expr(p))
                    .collect::<Result<_, _>>()?;
                let body = self.body(*body)?;
                NodeKind::Function { id, params, body }
            }
            EsNode::VariableDeclaration { declarations } => {
                let declarators = declarations
                    .into_iter()
                    .map(|d| self.declarator(d))
                    .collect::<Result<_, _>>()?;
                NodeKind::VarDecl { declarators }
            }
            EsNode::BlockStatement { body } => {
                let mut stmts = Vec::with_capacity(body.len());
                for stmt in body {
                    stmts.extend(self.statement(stmt)?);
                }
                NodeKind::Block { body: stmts }
            }
            EsNode::ExpressionStatement { expression } => NodeKind::ExprStmt {
                expr: self.expr(*expression)?,
            },
            EsNode::IfStatement {
                test,
                consequent,
                alternate,
            } => NodeKind::If {
                test: self.expr(*test)?,
                consequent: self.body(*consequent)?,
                alternate: alternate.map(|a| self.body(*a)).transpose()?,
            },
            EsNode::ForStatement {
                init,
                test,
                update,
                body,
            } => {
                let init = match init.map(|i| *i) {
                    Some(decl @ EsNode::VariableDeclaration { .. }) => self.statement(decl)?,
                    Some(expr) => Some(self.expr(expr)?),
                    None => None,
                };
                NodeKind::For {
                    init,
                    test: test.map(|t| self.expr(*t)).transpose()?,
                    update: update.map(|u| self.expr(*u)).transpose()?,
                    body: self.body(*body)?,
                }
            }
            EsNode::ReturnStatement { argument } => NodeKind::Return {
                argument: argument.map(|a| self.expr(*a)).transpose()?,
            },
            other => {
                return Err(AstError::UnsupportedNode(format!(
                    "{} as a statement",
                    other.type_name()
                )));
            }
        };
        Ok(Some(self.push(kind)))
    }

    /// Statement position that must produce a node (bodies of `if`/`for`/functions).
    fn body(&mut self, node: EsNode) -> Result<NodeId, AstError> {
        match self.statement(node)? {
            Some(id) => Ok(id),
            None => Ok(self.push(NodeKind::Block { body: Vec::new() })),
        }
    }

    fn declarator(&mut self, node: EsNode) -> Result<NodeId, AstError> {
        let EsNode::VariableDeclarator { id, init } = node else {
            return Err(AstError::UnsupportedNode(node.type_name().to_owned()));
        };
        let kind = NodeKind::Declarator {
            id: self.expr(*id)?,
            init: init.map(|i| self.expr(*i)).transpose()?,
        };
        Ok(self.push(kind))
    }

    fn exprs(&mut self, nodes: Vec<EsNode>) -> Result<Vec<NodeId>, AstError> {
        nodes.into_iter().map(|n| self.expr(n)).collect()
    }

    fn expr(&mut self, node: EsNode) -> Result<NodeId, AstError> {
        let kind = match node {
            EsNode::ConditionalExpression {
                test,
                consequent,
                alternate,
            } => NodeKind::Conditional {
                test: self.expr(*test)?,
                consequent: self.expr(*consequent)?,
                alternate: self.expr(*alternate)?,
            },
            EsNode::BinaryExpression {
                operator,
                left,
                right,
            }
            | EsNode::LogicalExpression {
                operator,
                left,
                right,
            } => NodeKind::Binary {
                op: BinaryOp::from_source(&operator)
                    .ok_or(AstError::UnsupportedOperator(operator))?,
                left: self.expr(*left)?,
                right: self.expr(*right)?,
            },
            EsNode::AssignmentExpression {
                operator,
                left,
                right,
            } => NodeKind::Assign {
                op: AssignOp::from_source(&operator)
                    .ok_or(AstError::UnsupportedOperator(operator))?,
                left: self.expr(*left)?,
                right: self.expr(*right)?,
            },
            EsNode::UnaryExpression { operator, argument } => NodeKind::Unary {
                op: UnaryOp::from_source(&operator)
                    .ok_or(AstError::UnsupportedOperator(operator))?,
                argument: self.expr(*argument)?,
            },
            EsNode::UpdateExpression {
                operator,
                prefix,
                argument,
            } => NodeKind::Update {
                op: UpdateOp::from_source(&operator)
                    .ok_or(AstError::UnsupportedOperator(operator))?,
                prefix,
                argument: self.expr(*argument)?,
            },
            EsNode::CallExpression { callee, arguments } => NodeKind::Call {
                callee: self.expr(*callee)?,
                args: self.exprs(arguments)?,
            },
            EsNode::MemberExpression {
                object,
                property,
                computed,
            } => NodeKind::Member {
                object: self.expr(*object)?,
                property: self.expr(*property)?,
                computed,
            },
            EsNode::ArrayExpression { elements } => NodeKind::Array {
                elements: self.exprs(elements)?,
            },
            EsNode::SequenceExpression { expressions } => NodeKind::Sequence {
                exprs: self.exprs(expressions)?,
            },
            EsNode::Identifier { name } => NodeKind::Ident { name },
            EsNode::ThisExpression {} => NodeKind::This,
            EsNode::Literal { value, raw } => NodeKind::Literal(literal(value, raw)?),
            other => {
                return Err(AstError::UnsupportedNode(format!(
                    "{} as an expression",
                    other.type_name()
                )));
            }
        };
        Ok(self.push(kind))
    }
}

fn literal(value: Value, raw: Option<String>) -> Result<Literal, AstError> {
    match value {
        Value::Bool(b) => Ok(Literal::Bool(b)),
        Value::Number(n) => Ok(Literal::Number(raw.unwrap_or_else(|| n.to_string()))),
        other => Err(AstError::UnsupportedLiteral(
            raw.unwrap_or_else(|| other.to_string()),
        )),
    }
}

impl EsNode {
    fn type_name(&self) -> &'static str {
        match self {
            Self::Program { .. } => "Program",
            Self::FunctionDeclaration { .. } => "FunctionDeclaration",
            Self::VariableDeclaration { .. } => "VariableDeclaration",
            Self::VariableDeclarator { .. } => "VariableDeclarator",
            Self::BlockStatement { .. } => "BlockStatement",
            Self::ExpressionStatement { .. } => "ExpressionStatement",
            Self::EmptyStatement {} => "EmptyStatement",
            Self::IfStatement { .. } => "IfStatement",
            Self::ForStatement { .. } => "ForStatement",
            Self::ReturnStatement { .. } => "ReturnStatement",
            Self::ConditionalExpression { .. } => "ConditionalExpression",
            Self::BinaryExpression { .. } => "BinaryExpression",
            Self::LogicalExpression { .. } => "LogicalExpression",
            Self::AssignmentExpression { .. } => "AssignmentExpression",
            Self::UnaryExpression { .. } => "UnaryExpression",
            Self::UpdateExpression { .. } => "UpdateExpression",
            Self::CallExpression { .. } => "CallExpression",
            Self::MemberExpression { .. } => "MemberExpression",
            Self::ArrayExpression { .. } => "ArrayExpression",
            Self::Identifier { .. } => "Identifier",
            Self::ThisExpression {} => "ThisExpression",
            Self::Literal { .. } => "Literal",
            Self::SequenceExpression { .. } => "SequenceExpression",
        }
    }
}
