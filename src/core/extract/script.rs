//! `Craft.t(category, message)` calls in JavaScript sources.

use swc_common::SourceMap;
use swc_ecma_ast::{BinaryOp, CallExpr, Callee, Expr, Lit, MemberProp};
use swc_ecma_visit::{Visit, VisitWith};

use crate::core::extract::{ExtractionContext, Extractor};
use crate::core::parsers::script::parse_script_source;
use crate::core::{CatalogSet, ExtractError};

const MARKER_OBJECT: &str = "Craft";
const MARKER_METHOD: &str = "t";

#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptExtractor;

impl Extractor for ScriptExtractor {
    fn extract(&self, ctx: &ExtractionContext<'_>) -> Result<CatalogSet, ExtractError> {
        let parsed = parse_script_source(ctx.content, ctx.file_path)?;
        let mut collector = MarkerCallCollector {
            ctx,
            source_map: &parsed.source_map,
            result: CatalogSet::new(),
        };
        parsed.program.visit_with(&mut collector);
        Ok(collector.result)
    }
}

struct MarkerCallCollector<'a, 'c> {
    ctx: &'a ExtractionContext<'c>,
    source_map: &'a SourceMap,
    result: CatalogSet,
}

fn unwrap_paren(expr: &Expr) -> &Expr {
    match expr {
        Expr::Paren(paren) => unwrap_paren(&paren.expr),
        _ => expr,
    }
}

fn is_marker_callee(callee: &Callee) -> bool {
    let Callee::Expr(expr) = callee else {
        return false;
    };
    let Expr::Member(member) = unwrap_paren(expr) else {
        return false;
    };
    matches!(&*member.obj, Expr::Ident(obj) if obj.sym.as_str() == MARKER_OBJECT)
        && matches!(&member.prop, MemberProp::Ident(prop) if prop.sym.as_str() == MARKER_METHOD)
}

/// Resolve an expression built only from string literals, substitution-free
/// template literals and `+` concatenations of those.
fn resolve_string(expr: &Expr) -> Option<String> {
    match unwrap_paren(expr) {
        Expr::Lit(Lit::Str(s)) => s.value.as_str().map(|s| s.to_string()),
        Expr::Tpl(tpl) if tpl.exprs.is_empty() => tpl
            .quasis
            .first()
            .and_then(|q| q.cooked.as_ref())
            .and_then(|s| s.as_str())
            .map(|s| s.to_string()),
        Expr::Bin(bin) if bin.op == BinaryOp::Add => {
            let left = resolve_string(&bin.left)?;
            let right = resolve_string(&bin.right)?;
            Some(left + right.as_str())
        }
        _ => None,
    }
}

impl MarkerCallCollector<'_, '_> {
    fn collect(&mut self, node: &CallExpr) {
        if !is_marker_callee(&node.callee) {
            return;
        }
        // Spread arguments make positions unknowable.
        if node.args.iter().take(2).any(|arg| arg.spread.is_some()) {
            return;
        }
        let (Some(category_arg), Some(message_arg)) = (node.args.first(), node.args.get(1)) else {
            return;
        };
        let (Some(category), Some(message)) = (
            resolve_string(&category_arg.expr),
            resolve_string(&message_arg.expr),
        ) else {
            return;
        };
        let Some(category) = self.ctx.accept(Some(category.as_str())) else {
            return;
        };

        let line = self.source_map.lookup_char_pos(node.span.lo).line;
        self.result
            .add_reference(category, &message, self.ctx.reference(Some(line)));
    }
}

impl Visit for MarkerCallCollector<'_, '_> {
    fn visit_call_expr(&mut self, node: &CallExpr) {
        self.collect(node);
        node.visit_children_with(self);
    }
}
