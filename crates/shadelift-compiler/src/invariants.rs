//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::registry::{KnownFunction, Rewrite};

/// Rewrites that take their operands positionally need exactly that many.
#[inline]
pub(crate) fn ensure_rewrite_arity(entry: &KnownFunction) {
    let expected = match entry.rewrite {
        Rewrite::Infix(_) | Rewrite::Assign | Rewrite::OutUnary(_) => Some(2),
        Rewrite::Unary(_) | Rewrite::Identity => Some(1),
        Rewrite::OutInfix(_) => Some(3),
        Rewrite::OutRename(_) if entry.arity() == 0 => {
            panic!("registry: {entry} writes into an output argument it does not take")
        }
        _ => None,
    };
    if let Some(expected) = expected {
        assert_eq!(
            entry.arity(),
            expected,
            "registry: {entry} does not match the arity of its rewrite"
        );
    }
}
