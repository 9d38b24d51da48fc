//! Object-model desugaring.
//!
//! Shader functions read their inputs through three buckets:
//! `attributes.position`, `varyings.uv`, `uniforms.time`. The target language
//! has flat declarations instead, so every bucket access becomes a prefixed
//! identifier (`attributes_position`). Locally declared variables get the
//! `_local_` marker so they can never capture a bucket or helper name; the
//! marker is stripped again after reachability where that is safe.

use indexmap::IndexSet;
use shadelift_core::{Ast, NodeId, NodeKind, Scopes, Type};

use crate::EntryPoints;

/// Marker prepended to locally declared variables.
pub const LOCAL_PREFIX: &str = "_local_";

/// Name given to a parameter spelled `out`, which the target reserves.
pub const OUT_PARAM: &str = "out_param";

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Bucket {
    Attributes,
    Varyings,
    Uniforms,
}

impl Bucket {
    pub const ALL: [Bucket; 3] = [Bucket::Attributes, Bucket::Varyings, Bucket::Uniforms];

    /// Object name used in shader functions.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Attributes => "attributes",
            Self::Varyings => "varyings",
            Self::Uniforms => "uniforms",
        }
    }

    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Attributes => "attributes_",
            Self::Varyings => "varyings_",
            Self::Uniforms => "uniforms_",
        }
    }

    /// Storage qualifier of the declaration.
    pub const fn qualifier(self) -> &'static str {
        match self {
            Self::Attributes => "attribute",
            Self::Varyings => "varying",
            Self::Uniforms => "uniform",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.name() == name)
    }

    pub fn flat_name(self, field: &str) -> String {
        format!("{}{field}", self.prefix())
    }
}

/// Fields accessed through each bucket, in order of first use.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BucketFields {
    attributes: IndexSet<String>,
    varyings: IndexSet<String>,
    uniforms: IndexSet<String>,
}

impl BucketFields {
    pub fn get(&self, bucket: Bucket) -> &IndexSet<String> {
        match bucket {
            Bucket::Attributes => &self.attributes,
            Bucket::Varyings => &self.varyings,
            Bucket::Uniforms => &self.uniforms,
        }
    }

    fn get_mut(&mut self, bucket: Bucket) -> &mut IndexSet<String> {
        match bucket {
            Bucket::Attributes => &mut self.attributes,
            Bucket::Varyings => &mut self.varyings,
            Bucket::Uniforms => &mut self.uniforms,
        }
    }

    /// `(bucket, field)` pairs, bucket by bucket.
    pub fn iter(&self) -> impl Iterator<Item = (Bucket, &str)> {
        Bucket::ALL
            .into_iter()
            .flat_map(move |b| self.get(b).iter().map(move |f| (b, f.as_str())))
    }

    /// How many buckets declare `field`.
    pub fn bucket_count(&self, field: &str) -> usize {
        Bucket::ALL
            .into_iter()
            .filter(|&b| self.get(b).contains(field))
            .count()
    }

    /// Declarations with the types inference settled on.
    ///
    /// A field whose identifier never got a type is declared `float`.
    pub fn declarations(&self, ast: &Ast) -> Vec<FieldDecl> {
        let live = ast.live_nodes();
        self.iter()
            .map(|(bucket, field)| {
                let name = bucket.flat_name(field);
                let ty = live
                    .iter()
                    .filter(|&&n| ast.ident_name(n) == Some(name.as_str()))
                    .find_map(|&n| ast.ty(n))
                    .unwrap_or(Type::Float);
                FieldDecl {
                    bucket,
                    field: field.to_owned(),
                    name,
                    ty,
                }
            })
            .collect()
    }
}

/// One bucket field as declared in the emitted programs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDecl {
    pub bucket: Bucket,
    pub field: String,
    /// Identifier used in emitted source.
    pub name: String,
    pub ty: Type,
}

/// Rewrites the object model into flat identifiers and returns the bucket fields.
pub fn desugar(ast: &mut Ast, entries: &EntryPoints) -> BucketFields {
    strip_receiver(ast);
    drop_entry_params(ast, entries);
    let fields = flatten_buckets(ast);
    ast.link_parents();

    let scopes = Scopes::resolve(ast);
    mark_out_params(ast, &scopes);
    prefix_locals(ast, &scopes);
    fields
}

/// `this.x` becomes `x`.
fn strip_receiver(ast: &mut Ast) {
    for id in ast.live_nodes() {
        let NodeKind::Member {
            object,
            property,
            computed: false,
        } = *ast.kind(id)
        else {
            continue;
        };
        if *ast.kind(object) != NodeKind::This {
            continue;
        }
        if let Some(name) = ast.ident_name(property) {
            let name = name.to_owned();
            ast.replace(id, NodeKind::Ident { name });
        }
    }
}

fn drop_entry_params(ast: &mut Ast, entries: &EntryPoints) {
    for (name, func, _) in entries.iter() {
        let NodeKind::Function { id, params, body } = ast.kind(func) else {
            continue;
        };
        if params.is_empty() {
            continue;
        }
        let dropped: Vec<_> = params
            .iter()
            .filter_map(|&p| ast.ident_name(p))
            .collect();
        log::warn!(
            "{name} takes no parameters; ignoring {}",
            dropped.join(", ")
        );
        let (id, body) = (*id, *body);
        ast.replace(
            func,
            NodeKind::Function {
                id,
                params: Vec::new(),
                body,
            },
        );
    }
}

/// `attributes.x` becomes `attributes_x`, recording `x`.
fn flatten_buckets(ast: &mut Ast) -> BucketFields {
    let mut fields = BucketFields::default();
    for id in ast.live_nodes() {
        let NodeKind::Member {
            object,
            property,
            computed: false,
        } = *ast.kind(id)
        else {
            continue;
        };
        let Some(bucket) = ast.ident_name(object).and_then(Bucket::from_name) else {
            continue;
        };
        let Some(field) = ast.ident_name(property) else {
            continue;
        };
        let name = bucket.flat_name(field);
        fields.get_mut(bucket).insert(field.to_owned());
        ast.replace(id, NodeKind::Ident { name });
    }
    fields
}

fn mark_out_params(ast: &mut Ast, scopes: &Scopes) {
    let funcs: Vec<NodeId> = ast.functions().collect();
    for func in funcs {
        let NodeKind::Function { params, .. } = ast.kind(func) else {
            continue;
        };
        let outs: Vec<NodeId> = params
            .iter()
            .copied()
            .filter(|&p| ast.ident_name(p) == Some("out"))
            .collect();
        for param in outs {
            ast.node_mut(param).out_param = true;
            for occurrence in scopes.occurrences(param) {
                ast.rename(occurrence, OUT_PARAM);
            }
        }
    }
}

fn prefix_locals(ast: &mut Ast, scopes: &Scopes) {
    let mut done = IndexSet::new();
    for id in ast.live_nodes() {
        let NodeKind::Declarator { id: name, .. } = *ast.kind(id) else {
            continue;
        };
        let Some(binding) = scopes.binding_of(name) else {
            continue;
        };
        if !done.insert(binding) {
            continue;
        }
        let binding = scopes.get(binding);
        let prefixed = format!("{LOCAL_PREFIX}{}", binding.name);
        for &occurrence in &binding.occurrences {
            ast.rename(occurrence, prefixed.as_str());
        }
    }
}
