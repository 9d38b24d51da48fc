//! Assembly of one complete program per stage.

use shadelift_core::{Ast, NodeId, NodeKind, Type};

use super::CompileOptions;
use super::printer::Printer;
use crate::EntryPoints;
use crate::desugar::{Bucket, FieldDecl};
use crate::reach::StageItem;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Stage {
    Vertex,
    Fragment,
}

impl Stage {
    /// Buckets whose fields the stage declares.
    fn declares(self, bucket: Bucket) -> bool {
        match self {
            Self::Vertex => true,
            Self::Fragment => bucket != Bucket::Attributes,
        }
    }
}

/// GLSL emitter for a single stage.
pub(crate) struct Emitter<'a> {
    ast: &'a Ast,
    entries: &'a EntryPoints,
    options: &'a CompileOptions,
    /// Output buffer
    output: String,
}

impl<'a> Emitter<'a> {
    pub(crate) fn new(ast: &'a Ast, entries: &'a EntryPoints, options: &'a CompileOptions) -> Self {
        Self {
            ast,
            entries,
            options,
            output: String::new(),
        }
    }

    pub(crate) fn emit(mut self, stage: Stage, decls: &[FieldDecl], items: &[StageItem]) -> String {
        self.output.push_str(&format!(
            "precision {} float;\n\n",
            self.options.precision.as_str()
        ));

        let mut header = String::new();
        for decl in decls.iter().filter(|d| stage.declares(d.bucket)) {
            header.push_str(&format!(
                "{} {} {};\n",
                decl.bucket.qualifier(),
                decl.ty,
                decl.name
            ));
        }
        if !header.is_empty() {
            self.output.push_str(&header);
            self.output.push('\n');
        }

        for item in items {
            match *item {
                StageItem::Library(source) => self.output.push_str(source.trim_end()),
                StageItem::Global(decl) => {
                    let mut printer = Printer::new(self.ast, &self.options.indent);
                    printer.stmt(decl);
                    self.output.push_str(printer.finish().trim_end());
                }
                StageItem::Function(func) => {
                    let declared = self.entries.iter().any(|(_, e, _)| e == func);
                    let mut printer = Printer::new(self.ast, &self.options.indent);
                    printer.function(func, declared);
                    self.output.push_str(printer.finish().trim_end());
                }
            }
            self.output.push_str("\n\n");
        }

        self.emit_main(stage);
        self.output
    }

    fn emit_main(&mut self, stage: Stage) {
        let options = self.options;
        let indent = options.indent.as_str();
        let mut body = Vec::new();
        match stage {
            Stage::Vertex => {
                body.push(format!(
                    "gl_Position = {};",
                    self.output_value(self.entries.vertex_position)
                ));
                if let Some(size) = self.entries.point_size {
                    body.push(format!("gl_PointSize = {};", self.call_text(size)));
                }
            }
            Stage::Fragment => body.push(format!(
                "gl_FragColor = {};",
                self.output_value(self.entries.fragment_color)
            )),
        }

        self.output.push_str("void main() {\n");
        for line in body {
            self.output.push_str(indent);
            self.output.push_str(&line);
            self.output.push('\n');
        }
        self.output.push_str("}\n");
    }

    /// The entry point's result padded to `vec4` with zeros and a final `1.0`.
    fn output_value(&self, func: NodeId) -> String {
        let call = self.call_text(func);
        let width = self
            .entry_type(func)
            .and_then(Type::width)
            .unwrap_or(4);
        if width >= 4 {
            return call;
        }
        let mut parts = vec![call];
        parts.extend((width..3).map(|_| "0.0".to_owned()));
        parts.push("1.0".to_owned());
        format!("vec4({})", parts.join(", "))
    }

    fn call_text(&self, func: NodeId) -> String {
        let name = self.ast.function_name(func).unwrap_or_default();
        format!("{name}()")
    }

    fn entry_type(&self, func: NodeId) -> Option<Type> {
        match *self.ast.kind(func) {
            NodeKind::Function { id, .. } => self.ast.ty(id),
            _ => None,
        }
    }
}
