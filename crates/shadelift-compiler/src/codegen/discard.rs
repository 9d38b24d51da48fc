//! Bare `return;` in `FragmentColor` abandons the fragment.

use shadelift_core::{Ast, Literal, NodeId, NodeKind, Type};

/// Rewrites each bare `return;` of `func` into `discard;` followed by a
/// return of zeros in the function's type.
pub(crate) fn lower_discards(ast: &mut Ast, func: NodeId) {
    let NodeKind::Function { id, .. } = *ast.kind(func) else {
        return;
    };
    let ty = ast.ty(id).unwrap_or(Type::Float);
    let Some(width) = ty.width() else {
        return;
    };

    for ret in ast.returns_of(func) {
        if *ast.kind(ret) != (NodeKind::Return { argument: None }) {
            continue;
        }
        let value = zeros(ast, ty, width);
        let discard = ast.alloc(NodeKind::Discard);
        let parent = ast.parent(ret);

        match parent.map(|p| (p, ast.kind(p).clone())) {
            Some((block, NodeKind::Block { mut body })) => {
                let at = body.iter().position(|&s| s == ret).unwrap_or(body.len());
                body.insert(at, discard);
                ast.replace(block, NodeKind::Block { body });
                ast.replace(
                    ret,
                    NodeKind::Return {
                        argument: Some(value),
                    },
                );
            }
            _ => {
                let returned = ast.alloc(NodeKind::Return {
                    argument: Some(value),
                });
                ast.replace(
                    ret,
                    NodeKind::Block {
                        body: vec![discard, returned],
                    },
                );
            }
        }
    }
    ast.link_parents();
}

fn zeros(ast: &mut Ast, ty: Type, width: usize) -> NodeId {
    if width == 1 {
        return zero(ast);
    }
    let callee = ast.alloc(NodeKind::Ident {
        name: ty.name().to_owned(),
    });
    let args = (0..width).map(|_| zero(ast)).collect();
    let call = ast.alloc(NodeKind::Call { callee, args });
    ast.node_mut(callee).ty = Some(ty);
    ast.node_mut(call).ty = Some(ty);
    call
}

fn zero(ast: &mut Ast) -> NodeId {
    let lit = ast.alloc(NodeKind::Literal(Literal::Number("0".to_owned())));
    ast.node_mut(lit).ty = Some(Type::Float);
    lit
}
