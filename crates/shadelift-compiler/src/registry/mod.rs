//! Closed whitelist of callables the dialect may invoke.
//!
//! Every call site that is not a user-defined function must match an entry
//! here by its fully-qualified name (`sin`, `Math.cos`, `vec3.add`). The table
//! is built once per process and shared read-only.

mod builtins;
mod entry;
mod glmatrix;
mod library;

use std::collections::HashSet;
use std::sync::LazyLock;

use indexmap::IndexMap;

use crate::invariants;

pub use entry::{KnownFunction, Rewrite};

static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::build);

/// The process-wide registry.
pub fn registry() -> &'static Registry {
    &REGISTRY
}

/// Words the target language reserves, beyond builtin function names.
const KEYWORDS: &[&str] = &[
    "attribute", "const", "uniform", "varying", "break", "continue", "do", "for", "while", "if",
    "else", "in", "out", "inout", "float", "int", "void", "bool", "true", "false", "lowp",
    "mediump", "highp", "precision", "invariant", "discard", "return", "mat2", "mat3", "mat4",
    "vec2", "vec3", "vec4", "ivec2", "ivec3", "ivec4", "bvec2", "bvec3", "bvec4", "sampler2D",
    "samplerCube", "struct", "main", "asm", "class", "union", "enum", "typedef", "template",
    "this", "packed", "goto", "switch", "default", "inline", "noinline", "volatile", "public",
    "static", "extern", "external", "interface", "long", "short", "double", "half", "fixed",
    "unsigned", "input", "output", "sizeof", "cast", "namespace", "using",
];

pub struct Registry {
    entries: Vec<KnownFunction>,
    by_name: IndexMap<String, Vec<usize>>,
    reserved: HashSet<String>,
}

impl Registry {
    fn build() -> Self {
        let mut entries = Vec::new();
        builtins::push_all(&mut entries);
        glmatrix::push_all(&mut entries);

        let mut by_name: IndexMap<String, Vec<usize>> = IndexMap::new();
        for (i, entry) in entries.iter().enumerate() {
            invariants::ensure_rewrite_arity(entry);
            by_name.entry(entry.name.clone()).or_default().push(i);
        }

        let mut reserved: HashSet<String> = KEYWORDS.iter().map(|&k| k.to_owned()).collect();
        for entry in &entries {
            if !entry.name.contains('.') {
                reserved.insert(entry.name.clone());
            }
            if let Rewrite::Rename(to) | Rewrite::OutRename(to) = &entry.rewrite {
                reserved.insert(to.clone());
            }
        }
        reserved.extend(library::SNIPPETS.iter().map(|&(name, _)| name.to_owned()));

        Self {
            entries,
            by_name,
            reserved,
        }
    }

    /// Finds the entry for a call site.
    ///
    /// A name with one entry matches regardless of `arg_count`, leaving the
    /// arity check to the caller. Overloads are told apart by parameter count
    /// only; the first entry of the right arity wins, and when none has it the
    /// first entry is returned so the mismatch gets reported.
    pub fn lookup(&self, name: &str, arg_count: usize) -> Option<&KnownFunction> {
        let candidates = self.by_name.get(name)?;
        let first = *candidates.first()?;
        let chosen = candidates
            .iter()
            .copied()
            .find(|&i| self.entries[i].arity() == arg_count)
            .unwrap_or(first);
        Some(&self.entries[chosen])
    }

    pub fn entries(&self) -> &[KnownFunction] {
        &self.entries
    }

    /// Every accepted signature, one per line, for whitelist errors.
    pub fn signatures(&self) -> String {
        self.entries
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join(",\n")
    }

    /// Target source of a library helper invoked as `name`.
    pub fn library_source(&self, name: &str) -> Option<&'static str> {
        library::SNIPPETS
            .iter()
            .find(|&&(n, _)| n == name)
            .map(|&(_, src)| src)
    }

    /// Names a user identifier must not take in emitted source.
    pub fn is_reserved(&self, name: &str) -> bool {
        name.starts_with("gl_") || self.reserved.contains(name)
    }
}

#[cfg(test)]
mod registry_tests;
