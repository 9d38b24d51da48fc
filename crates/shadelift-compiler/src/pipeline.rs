//! The compilation pipeline, pass by pass.

use serde::Serialize;
use shadelift_core::Ast;

use crate::codegen::{self, CompileOptions};
use crate::desugar::desugar;
use crate::infer::infer_types;
use crate::reach::{Stages, strip_prefixes};
use crate::remap::{apply_rewrites, resolve_calls};
use crate::{EntryPoints, Result};

/// The two emitted programs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ShaderSource {
    pub vertex: String,
    pub fragment: String,
}

pub(crate) fn compile(
    mut ast: Ast,
    entries: EntryPoints,
    options: &CompileOptions,
) -> Result<ShaderSource> {
    let fields = desugar(&mut ast, &entries);
    entries.attach_hints(&mut ast);

    let mut calls = resolve_calls(&ast);
    let stages = Stages::extract(&ast, &entries, &calls);
    stages.raise_errors(&ast, &mut calls)?;
    if calls.error_count() > 0 {
        log::debug!(
            "{} call(s) outside both stages were not checked",
            calls.error_count()
        );
    }

    infer_types(&mut ast, &calls)?;
    codegen::check_entry_types(&ast, &entries)?;
    codegen::lower_discards(&mut ast, entries.fragment_color);
    apply_rewrites(&mut ast, &calls);

    let declared = fields.declarations(&ast);
    let decls = strip_prefixes(&mut ast, &declared);
    Ok(codegen::generate(&ast, &decls, &stages, &entries, options))
}
