//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::scope::{Binding, BindingId};

#[inline]
pub(crate) fn ensure_binding(binding: Option<&Binding>, id: BindingId) -> &Binding {
    binding.unwrap_or_else(|| {
        panic!("Scopes: binding {id:?} not found (ids are only minted by Scopes::resolve)")
    })
}
