//! Rendering of typed statements and expressions as GLSL.

use shadelift_core::{Ast, BinaryOp, Literal, NodeId, NodeKind, Type, UnaryOp};

pub(crate) struct Printer<'a> {
    ast: &'a Ast,
    indent: &'a str,
    level: usize,
    out: String,
}

impl<'a> Printer<'a> {
    pub(crate) fn new(ast: &'a Ast, indent: &'a str) -> Self {
        Self {
            ast,
            indent,
            level: 0,
            out: String::new(),
        }
    }

    pub(crate) fn finish(self) -> String {
        self.out
    }

    /// Renders any node: expressions inline, statements as source lines.
    pub(crate) fn node_text(mut self, id: NodeId) -> String {
        if is_expression(self.ast.kind(id)) {
            return self.expr(id);
        }
        self.stmt(id);
        self.out.trim_end().to_owned()
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.level {
            self.out.push_str(self.indent);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    /// A function declaration. `declared` forces the return type of entry
    /// points, which always produce a value.
    pub(crate) fn function(&mut self, func: NodeId, declared: bool) {
        let NodeKind::Function { id, params, body } = self.ast.kind(func) else {
            return;
        };
        let ret = if declared || self.ast.returns_value(func) {
            self.type_of(*id).name()
        } else {
            "void"
        };
        let params = params
            .iter()
            .map(|&p| {
                let qualifier = if self.ast.node(p).out_param { "out " } else { "" };
                format!("{qualifier}{} {}", self.type_of(p), self.expr(p))
            })
            .collect::<Vec<_>>()
            .join(", ");
        let name = self.expr(*id);

        self.line(&format!("{ret} {name}({params}) {{"));
        self.nested(*body);
        self.line("}");
    }

    pub(crate) fn stmt(&mut self, id: NodeId) {
        match self.ast.kind(id) {
            NodeKind::VarDecl { declarators } => {
                for &d in declarators {
                    let text = self.declarator(d);
                    self.line(&format!("{text};"));
                }
            }
            NodeKind::Declarator { .. } => {
                let text = self.declarator(id);
                self.line(&format!("{text};"));
            }
            NodeKind::ExprStmt { expr } => match self.ast.kind(*expr) {
                NodeKind::Sequence { exprs } if exprs.len() > 1 => {
                    for &e in exprs {
                        let text = self.expr(e);
                        self.line(&format!("{text};"));
                    }
                }
                _ => {
                    let text = self.expr(*expr);
                    self.line(&format!("{text};"));
                }
            },
            NodeKind::Return { argument: None } => self.line("return;"),
            NodeKind::Return {
                argument: Some(arg),
            } => {
                let text = self.expr(*arg);
                self.line(&format!("return {text};"));
            }
            NodeKind::Discard => self.line("discard;"),
            NodeKind::Block { body } => {
                self.line("{");
                self.level += 1;
                for &s in body {
                    self.stmt(s);
                }
                self.level -= 1;
                self.line("}");
            }
            NodeKind::If { .. } => self.if_chain(id),
            NodeKind::For {
                init,
                test,
                update,
                body,
            } => {
                let init = match init {
                    Some(i) => match self.ast.kind(*i) {
                        NodeKind::VarDecl { declarators } => self.declarators(declarators),
                        _ => self.expr(*i),
                    },
                    None => String::new(),
                };
                let test = test.map(|t| self.expr(t)).unwrap_or_default();
                let update = update.map(|u| self.expr(u)).unwrap_or_default();
                self.line(&format!("for ({init}; {test}; {update}) {{"));
                self.nested(*body);
                self.line("}");
            }
            NodeKind::Function { .. } => self.function(id, false),
            NodeKind::Program { body } => {
                for &s in body {
                    self.stmt(s);
                }
            }
            _ => {
                let text = self.expr(id);
                self.line(&format!("{text};"));
            }
        }
    }

    /// Statements of a braced body one level deeper; a lone statement counts as one.
    fn nested(&mut self, body: NodeId) {
        self.level += 1;
        match self.ast.kind(body) {
            NodeKind::Block { body } => {
                for &s in body {
                    self.stmt(s);
                }
            }
            _ => self.stmt(body),
        }
        self.level -= 1;
    }

    fn if_chain(&mut self, id: NodeId) {
        let mut current = id;
        let mut opener = "if";
        while let NodeKind::If {
            test,
            consequent,
            alternate,
        } = self.ast.kind(current)
        {
            let condition = self.condition(*test);
            self.line(&format!("{opener} {condition} {{"));
            self.nested(*consequent);
            match alternate {
                Some(alt) if matches!(self.ast.kind(*alt), NodeKind::If { .. }) => {
                    current = *alt;
                    opener = "} else if";
                }
                Some(alt) => {
                    self.line("} else {");
                    self.nested(*alt);
                    self.line("}");
                    return;
                }
                None => {
                    self.line("}");
                    return;
                }
            }
        }
    }

    /// Condition text with exactly one pair of surrounding parentheses.
    fn condition(&self, test: NodeId) -> String {
        let text = self.expr(test);
        match self.ast.kind(test) {
            NodeKind::Binary { .. } | NodeKind::Conditional { .. } => text,
            _ => format!("({text})"),
        }
    }

    fn declarator(&self, id: NodeId) -> String {
        let NodeKind::Declarator { id: name, init } = self.ast.kind(id) else {
            return self.expr(id);
        };
        let ty = self.type_of(*name);
        match init {
            Some(init) => format!("{ty} {} = {}", self.expr(*name), self.expr(*init)),
            None => format!("{ty} {}", self.expr(*name)),
        }
    }

    /// `float i = 0., j = 1.` for loop headers.
    fn declarators(&self, declarators: &[NodeId]) -> String {
        declarators
            .iter()
            .enumerate()
            .map(|(i, &d)| {
                let text = self.declarator(d);
                match (i, text.split_once(' ')) {
                    (0, _) | (_, None) => text,
                    (_, Some((_, rest))) => rest.to_owned(),
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn type_of(&self, id: NodeId) -> Type {
        self.ast.ty(id).unwrap_or(Type::Float)
    }

    pub(crate) fn expr(&self, id: NodeId) -> String {
        match self.ast.kind(id) {
            NodeKind::Ident { name } => name.clone(),
            NodeKind::This => "this".to_owned(),
            NodeKind::Literal(Literal::Bool(b)) => b.to_string(),
            NodeKind::Literal(Literal::Number(raw)) => {
                let integral = raw.bytes().all(|b| b.is_ascii_digit());
                if integral && self.ast.ty(id) == Some(Type::Float) {
                    format!("{raw}.")
                } else {
                    raw.clone()
                }
            }
            NodeKind::Binary {
                op: BinaryOp::Rem,
                left,
                right,
            } => format!("mod({}, {})", self.expr(*left), self.expr(*right)),
            NodeKind::Binary { op, left, right } => format!(
                "({} {} {})",
                self.expr(*left),
                op.as_glsl(),
                self.expr(*right)
            ),
            NodeKind::Assign { op, left, right } => format!(
                "{} {} {}",
                self.expr(*left),
                op.as_str(),
                self.expr(*right)
            ),
            NodeKind::Unary { op, argument } => {
                let inner = self.expr(*argument);
                let sign = match op {
                    UnaryOp::Plus => return inner,
                    UnaryOp::Neg => "-",
                    UnaryOp::Not => "!",
                };
                if inner.starts_with(sign) {
                    format!("{sign}({inner})")
                } else {
                    format!("{sign}{inner}")
                }
            }
            NodeKind::Update {
                op,
                prefix,
                argument,
            } => {
                let inner = self.expr(*argument);
                if *prefix {
                    format!("{}{inner}", op.as_str())
                } else {
                    format!("{inner}{}", op.as_str())
                }
            }
            NodeKind::Conditional {
                test,
                consequent,
                alternate,
            } => format!(
                "({} ? {} : {})",
                self.expr(*test),
                self.expr(*consequent),
                self.expr(*alternate)
            ),
            NodeKind::Call { callee, args } => {
                format!("{}({})", self.expr(*callee), self.list(args))
            }
            NodeKind::Member {
                object,
                property,
                computed: false,
            } => format!("{}.{}", self.expr(*object), self.expr(*property)),
            NodeKind::Member {
                object,
                property,
                computed: true,
            } => self.index(*object, *property),
            NodeKind::Array { elements } => {
                let ty = match self.ast.ty(id) {
                    Some(ty) => ty.to_string(),
                    None => format!("vec{}", elements.len()),
                };
                format!("{ty}({})", self.list(elements))
            }
            NodeKind::Sequence { exprs } => match exprs.as_slice() {
                [single] => self.expr(*single),
                _ => format!("({})", self.list(exprs)),
            },
            NodeKind::Raw { source } => source.clone(),
            _ => Printer::new(self.ast, self.indent).node_text(id),
        }
    }

    /// `v[i]`; matrices are indexed linearly, column-major.
    fn index(&self, object: NodeId, property: NodeId) -> String {
        let target = self.expr(object);
        let Some(n) = self.ast.ty(object).and_then(Type::dimension) else {
            return format!("{target}[{}]", self.expr(property));
        };
        let literal = match self.ast.kind(property) {
            NodeKind::Literal(lit) => lit.as_index(),
            _ => None,
        };
        match literal {
            Some(k) => format!("{target}[{}][{}]", k as usize / n, k as usize % n),
            None => {
                let i = self.expr(property);
                format!("{target}[({i} / {n})][({i} - (({i} / {n}) * {n}))]")
            }
        }
    }

    fn list(&self, items: &[NodeId]) -> String {
        items
            .iter()
            .map(|&i| self.expr(i))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn is_expression(kind: &NodeKind) -> bool {
    !matches!(
        kind,
        NodeKind::Program { .. }
            | NodeKind::Function { .. }
            | NodeKind::VarDecl { .. }
            | NodeKind::Declarator { .. }
            | NodeKind::Block { .. }
            | NodeKind::ExprStmt { .. }
            | NodeKind::If { .. }
            | NodeKind::For { .. }
            | NodeKind::Return { .. }
            | NodeKind::Discard
    )
}
