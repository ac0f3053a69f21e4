// Copyright (C) 2024-2026 The Rillc Team
// This file is part of the rillc library.

// The rillc library is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// The rillc library is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with the rillc library. If not, see <https://www.gnu.org/licenses/>.

//! The 15-level precedence-climbing expression parser. Level numbering and
//! associativity follow the table this crate was built against: 0 primary, 1
//! postfix, 2 unary, 3-12 binary (left-associative), 13 ternary
//! (right-associative), 14 assignment (right-associative via recursion on
//! the right operand), 15 comma (left-associative).

use super::context::ParserContext;
use super::decl::{is_typename, parse_const_expr, parse_declarator, parse_declspec, parse_function_definition, parse_typename};
use crate::tokenizer::TokenKind;
use rillc_ast::{BinaryOp, Designator, ExprId, ExprKind, GenericEntry, InitNode, LocalSymbolKind, TypeId, TypeKind, UnaryOp};
use rillc_errors::{ParserError, Result};
use rillc_span::Span;
use tracing::trace;

/// `parse_expr(cursor) → expr_index`: a full comma-expression (level 15).
pub fn parse_expr(ctx: &mut ParserContext) -> Result<ExprId> {
    trace!("parse_expr");
    let start = ctx.peek().span;
    let mut lhs = parse_assignment(ctx)?;
    while ctx.check(&TokenKind::Comma) {
        ctx.advance();
        let rhs = parse_assignment(ctx)?;
        let span = ctx.span_since(start);
        lhs = ctx.ast.alloc_expr(ExprKind::Binary { op: BinaryOp::Comma, lhs, rhs }, span);
    }
    Ok(lhs)
}

/// Level 14: assignment family, right-associative via recursion on the
/// right-hand operand (`a = b = c` parses as `a = (b = c)`, spec P3).
pub fn parse_assignment(ctx: &mut ParserContext) -> Result<ExprId> {
    let start = ctx.peek().span;
    let lhs = parse_ternary(ctx)?;

    let op = match ctx.peek().kind {
        TokenKind::Eq => BinaryOp::Assign,
        TokenKind::PlusEq => BinaryOp::AddAssign,
        TokenKind::MinusEq => BinaryOp::SubAssign,
        TokenKind::StarEq => BinaryOp::MulAssign,
        TokenKind::SlashEq => BinaryOp::DivAssign,
        TokenKind::PercentEq => BinaryOp::ModAssign,
        TokenKind::ShlEq => BinaryOp::ShlAssign,
        TokenKind::ShrEq => BinaryOp::ShrAssign,
        TokenKind::AmpEq => BinaryOp::AndAssign,
        TokenKind::PipeEq => BinaryOp::OrAssign,
        TokenKind::CaretEq => BinaryOp::XorAssign,
        _ => return Ok(lhs),
    };
    ctx.advance();
    debug_assert!(op.is_assignment());
    let rhs = parse_assignment(ctx)?;
    let span = ctx.span_since(start);
    Ok(ctx.ast.alloc_expr(ExprKind::Binary { op, lhs, rhs }, span))
}

/// Level 13: `?:`, right-associative; the middle operand is a full
/// expression (comma included), the else-operand recurses into level 13.
pub fn parse_ternary(ctx: &mut ParserContext) -> Result<ExprId> {
    let start = ctx.peek().span;
    let cond = parse_logical_or(ctx)?;
    if ctx.eat(&TokenKind::Question).is_some() {
        let then_branch = parse_expr(ctx)?;
        ctx.expect(&TokenKind::Colon)?;
        let else_branch = parse_ternary(ctx)?;
        let span = ctx.span_since(start);
        return Ok(ctx.ast.alloc_expr(ExprKind::Ternary { cond, then_branch, else_branch }, span));
    }
    Ok(cond)
}

macro_rules! left_assoc_level {
    ($name:ident, $next:ident, [$($tok:pat => $op:expr),+ $(,)?]) => {
        fn $name(ctx: &mut ParserContext) -> Result<ExprId> {
            let start = ctx.peek().span;
            let mut lhs = $next(ctx)?;
            loop {
                let op = match ctx.peek().kind {
                    $($tok => $op,)+
                    _ => break,
                };
                ctx.advance();
                let rhs = $next(ctx)?;
                let span = ctx.span_since(start);
                lhs = ctx.ast.alloc_expr(ExprKind::Binary { op, lhs, rhs }, span);
            }
            Ok(lhs)
        }
    };
}

left_assoc_level!(parse_logical_or, parse_logical_and, [TokenKind::PipePipe => BinaryOp::LogOr]);
left_assoc_level!(parse_logical_and, parse_bit_or, [TokenKind::AmpAmp => BinaryOp::LogAnd]);
left_assoc_level!(parse_bit_or, parse_bit_xor, [TokenKind::Pipe => BinaryOp::BitOr]);
left_assoc_level!(parse_bit_xor, parse_bit_and, [TokenKind::Caret => BinaryOp::BitXor]);
left_assoc_level!(parse_bit_and, parse_equality, [TokenKind::Amp => BinaryOp::BitAnd]);
left_assoc_level!(parse_equality, parse_relational, [
    TokenKind::EqEq => BinaryOp::Eq,
    TokenKind::Ne => BinaryOp::Ne,
]);
left_assoc_level!(parse_relational, parse_shift, [
    TokenKind::Lt => BinaryOp::Lt,
    TokenKind::Le => BinaryOp::Le,
    TokenKind::Gt => BinaryOp::Gt,
    TokenKind::Ge => BinaryOp::Ge,
]);
left_assoc_level!(parse_shift, parse_additive, [
    TokenKind::Shl => BinaryOp::Shl,
    TokenKind::Shr => BinaryOp::Shr,
]);
left_assoc_level!(parse_additive, parse_multiplicative, [
    TokenKind::Plus => BinaryOp::Add,
    TokenKind::Minus => BinaryOp::Sub,
]);
left_assoc_level!(parse_multiplicative, parse_unary, [
    TokenKind::Star => BinaryOp::Mul,
    TokenKind::Slash => BinaryOp::Div,
    TokenKind::Percent => BinaryOp::Mod,
]);

/// Level 2: unary prefix operators. `&x`/`++x`/`--x` take a level-1
/// (postfix) operand; every other unary form takes a level-2 operand,
/// recursing through this function. `+x` is transparent (no node); `!!x`
/// canonicalizes to a cast to the synthetic boolean type.
pub fn parse_unary(ctx: &mut ParserContext) -> Result<ExprId> {
    let start = ctx.peek().span;
    match ctx.peek().kind {
        TokenKind::KwSizeof => return parse_sizeof_or_alignof(ctx, false),
        TokenKind::KwAlignof => return parse_sizeof_or_alignof(ctx, true),
        TokenKind::Star => {
            ctx.advance();
            let operand = parse_unary(ctx)?;
            return Ok(ctx.ast.alloc_expr(ExprKind::Unary { op: UnaryOp::Deref, operand }, ctx.span_since(start)));
        }
        TokenKind::Amp => {
            ctx.advance();
            let operand = parse_postfix(ctx)?;
            return Ok(ctx.ast.alloc_expr(ExprKind::Unary { op: UnaryOp::AddrOf, operand }, ctx.span_since(start)));
        }
        TokenKind::Plus => {
            ctx.advance();
            return parse_unary(ctx);
        }
        TokenKind::Minus => {
            ctx.advance();
            let operand = parse_unary(ctx)?;
            return Ok(ctx.ast.alloc_expr(ExprKind::Unary { op: UnaryOp::Negate, operand }, ctx.span_since(start)));
        }
        TokenKind::Bang => {
            ctx.advance();
            let operand = parse_unary(ctx)?;
            return Ok(ctx.ast.alloc_expr(ExprKind::Unary { op: UnaryOp::LogicalNot, operand }, ctx.span_since(start)));
        }
        TokenKind::BangBang => {
            ctx.advance();
            let operand = parse_unary(ctx)?;
            return Ok(ctx.ast.alloc_expr(ExprKind::Cast { ty: TypeId::BOOL, expr: operand }, ctx.span_since(start)));
        }
        TokenKind::Tilde => {
            ctx.advance();
            let operand = parse_unary(ctx)?;
            return Ok(ctx.ast.alloc_expr(ExprKind::Unary { op: UnaryOp::BitNot, operand }, ctx.span_since(start)));
        }
        TokenKind::PlusPlus => {
            ctx.advance();
            let operand = parse_postfix(ctx)?;
            return Ok(ctx.ast.alloc_expr(ExprKind::Unary { op: UnaryOp::PreInc, operand }, ctx.span_since(start)));
        }
        TokenKind::MinusMinus => {
            ctx.advance();
            let operand = parse_postfix(ctx)?;
            return Ok(ctx.ast.alloc_expr(ExprKind::Unary { op: UnaryOp::PreDec, operand }, ctx.span_since(start)));
        }
        _ => {}
    }
    parse_postfix(ctx)
}

/// `sizeof`/`_Alignof` ambiguity, shared between both keywords since they
/// differ only in which operand/type node they build.
fn parse_sizeof_or_alignof(ctx: &mut ParserContext, is_alignof: bool) -> Result<ExprId> {
    let expr_op = if is_alignof { UnaryOp::AlignofExpr } else { UnaryOp::SizeofExpr };
    let start = ctx.peek().span;
    ctx.advance(); // `sizeof` / `_Alignof`

    if ctx.check(&TokenKind::LParen) {
        let paren_mark = ctx.save_position();
        let open_span = ctx.peek().span;
        ctx.advance(); // `(`

        if is_typename(ctx) {
            let ty = parse_typename(ctx)?;
            ctx.expect_closing_paren(open_span)?;

            if ctx.check(&TokenKind::LBrace) {
                // `sizeof (T){...}`: the `(T)` was a compound-literal type,
                // not a bare type operand (spec scenario 6) — rebuild as
                // `sizeof` of the compound-literal expression.
                let brace_span = ctx.peek().span;
                ctx.advance();
                let compound = parse_initializer(ctx, ty, brace_span)?;
                return Ok(ctx.ast.alloc_expr(ExprKind::Unary { op: expr_op, operand: compound }, ctx.span_since(start)));
            }

            let kind = if is_alignof { ExprKind::AlignofType { ty } } else { ExprKind::SizeofType { ty } };
            return Ok(ctx.ast.alloc_expr(kind, ctx.span_since(start)));
        }

        // Not a type: rewind all the way to the `(` so the level-1 operand
        // parse sees and matches it itself. A redundant closing-paren check
        // here would just repeat what that nested parse already does.
        ctx.restore_position(paren_mark);
    }

    let operand = parse_unary(ctx)?;
    Ok(ctx.ast.alloc_expr(ExprKind::Unary { op: expr_op, operand }, ctx.span_since(start)))
}

/// Level 1: postfix operators, plus the compound-literal/cast ambiguity this
/// level resolves on encountering `(`.
pub fn parse_postfix(ctx: &mut ParserContext) -> Result<ExprId> {
    let start = ctx.peek().span;
    let mut base = parse_postfix_base(ctx)?;
    let _ = start;
    let base_start = ctx.ast.expr(base).span;

    let mut seen_inc_dec = false;
    loop {
        match ctx.peek().kind {
            TokenKind::LBracket => {
                ctx.advance();
                let index = parse_expr(ctx)?;
                ctx.expect(&TokenKind::RBracket)?;
                base = ctx.ast.alloc_expr(ExprKind::Subscript { base, index }, base_start + ctx.prev_span());
            }
            TokenKind::LParen => {
                let open_span = ctx.peek().span;
                ctx.advance();
                let mark = ctx.arg_scratch.mark();
                if !ctx.check(&TokenKind::RParen) {
                    loop {
                        let arg = match parse_assignment(ctx) {
                            Ok(a) => a,
                            Err(e) => {
                                ctx.arg_scratch.restore(mark);
                                return Err(e);
                            }
                        };
                        ctx.arg_scratch.push(arg);
                        if ctx.eat(&TokenKind::Comma).is_some() {
                            continue;
                        }
                        break;
                    }
                }
                let staged: Vec<ExprId> = ctx.arg_scratch.slice_from(mark).to_vec();
                ctx.arg_scratch.restore(mark);
                ctx.expect_closing_paren(open_span)?;
                let args = ctx.ast.alloc_args(&staged);
                base = ctx.ast.alloc_expr(ExprKind::Call { target: base, args }, base_start + ctx.prev_span());
            }
            TokenKind::Dot | TokenKind::Arrow => {
                let arrow = matches!(ctx.peek().kind, TokenKind::Arrow);
                let op_span = ctx.peek().span;
                ctx.advance();
                let name = match ctx.peek().kind.ident() {
                    Some(name) => {
                        ctx.advance();
                        name
                    }
                    None => {
                        let op = if arrow { "->" } else { "." };
                        return Err(ctx.handler.emit_err(ParserError::expected_identifier_after_member_access(op, op_span)));
                    }
                };
                base = ctx.ast.alloc_expr(ExprKind::Member { base, name, arrow }, base_start + ctx.prev_span());
            }
            TokenKind::PlusPlus | TokenKind::MinusMinus if !seen_inc_dec => {
                let op = if matches!(ctx.peek().kind, TokenKind::PlusPlus) { UnaryOp::PostInc } else { UnaryOp::PostDec };
                ctx.advance();
                seen_inc_dec = true;
                base = ctx.ast.alloc_expr(ExprKind::Unary { op, operand: base }, base_start + ctx.prev_span());
                break;
            }
            _ => break,
        }
    }
    Ok(base)
}

/// Resolves the compound-literal/cast ambiguity at a leading `(`, falling
/// through to [`parse_primary`] for every other token and for a `(` that
/// turns out to just be a parenthesized expression.
fn parse_postfix_base(ctx: &mut ParserContext) -> Result<ExprId> {
    if !ctx.check(&TokenKind::LParen) {
        return parse_primary(ctx);
    }

    let paren_mark = ctx.save_position();
    let start = ctx.peek().span;
    let open_span = ctx.peek().span;
    ctx.advance();

    if !is_typename(ctx) {
        ctx.restore_position(paren_mark);
        return parse_primary(ctx);
    }

    let ty = parse_typename(ctx)?;
    ctx.expect_closing_paren(open_span)?;

    if ctx.check(&TokenKind::LBrace) {
        let brace_span = ctx.peek().span;
        ctx.advance();
        return parse_initializer(ctx, ty, brace_span);
    }

    // Cast: the operand is a level-2 (unary) expression.
    let operand = parse_unary(ctx)?;
    Ok(ctx.ast.alloc_expr(ExprKind::Cast { ty, expr: operand }, ctx.span_since(start)))
}

/// Level 0: primary expressions.
pub fn parse_primary(ctx: &mut ParserContext) -> Result<ExprId> {
    let start = ctx.peek().span;
    match ctx.peek().kind.clone() {
        TokenKind::Int { value, suffix } => {
            ctx.advance();
            Ok(ctx.ast.alloc_expr(ExprKind::IntLiteral { value, suffix }, start))
        }
        TokenKind::Float { value, is_f32 } => {
            ctx.advance();
            let width = if is_f32 { rillc_ast::FloatWidth::F32 } else { rillc_ast::FloatWidth::F64 };
            Ok(ctx.ast.alloc_expr(ExprKind::FloatLiteral { value, width }, start))
        }
        TokenKind::Char(value) => {
            ctx.advance();
            Ok(ctx.ast.alloc_expr(ExprKind::CharLiteral { value }, start))
        }
        TokenKind::Str { .. } => parse_string_concat(ctx),
        TokenKind::Ident(name) => {
            ctx.advance();
            Ok(resolve_identifier(ctx, name, start))
        }
        TokenKind::LParen => {
            let open_span = ctx.peek().span;
            ctx.advance();
            let inner = parse_expr(ctx)?;
            ctx.expect_closing_paren(open_span)?;
            Ok(inner)
        }
        TokenKind::KwGeneric => parse_generic(ctx),
        TokenKind::At => parse_function_literal(ctx),
        _ => {
            let span = ctx.peek().span;
            Err(ctx.handler.emit_err(ParserError::could_not_parse_expression(span)))
        }
    }
}

fn resolve_identifier(ctx: &mut ParserContext, name: rillc_span::Symbol, span: Span) -> ExprId {
    if let Some(local) = ctx.symbols.find_local_symbol(name) {
        let kind = match local {
            LocalSymbolKind::Parameter(ordinal) => ExprKind::ParamRef { ordinal },
            LocalSymbolKind::Statement(stmt) => ExprKind::SymbolRef { stmt },
        };
        return ctx.ast.alloc_expr(kind, span);
    }
    if let Some(stmt) = ctx.symbols.find_label(name) {
        return ctx.ast.alloc_expr(ExprKind::SymbolRef { stmt }, span);
    }
    if ctx.settings.out_of_order_decls {
        if let Some(stmt) = ctx.symbols.find_global_symbol(name) {
            return ctx.ast.alloc_expr(ExprKind::SymbolRef { stmt }, span);
        }
    }
    ctx.ast.alloc_expr(ExprKind::UnknownSymbol { name }, span)
}

/// Concatenates adjacent narrow/wide string tokens (spec property P4) with
/// the same two-pass shape as the original: a first pass over the already
/// per-segment-decoded interiors to compute the total length, then a single
/// allocation the second pass copies into. The lexer decodes each segment's
/// escapes up front (see `tokenizer::lexer::scan_string_body`), so unlike the
/// original this pass concatenates decoded bytes rather than raw source
/// bytes stripped of their quote characters — the two-pass shape and the
/// single final allocation are preserved, which is what P4 constrains.
fn parse_string_concat(ctx: &mut ParserContext) -> Result<ExprId> {
    let start = ctx.peek().span;
    let mut segments: Vec<(Box<[u8]>, bool)> = Vec::new();
    while let TokenKind::Str { bytes, wide } = ctx.peek().kind.clone() {
        ctx.advance();
        segments.push((bytes, wide));
    }

    let total_len: usize = segments.iter().map(|(bytes, _)| bytes.len()).sum();
    let mut out = Vec::with_capacity(total_len);
    for (bytes, _) in &segments {
        out.extend_from_slice(bytes);
    }
    // The original computes `is_wide` once from the first segment, before the
    // concatenation loop even runs, and never revisits it for later segments
    // (`expr_parser.h:324-334`) — so `"a" L"b"` stays narrow.
    let wide = segments[0].1;

    Ok(ctx.ast.alloc_expr(ExprKind::StringLiteral { bytes: out.into_boxed_slice(), wide }, ctx.span_since(start)))
}

fn parse_generic(ctx: &mut ParserContext) -> Result<ExprId> {
    let start = ctx.peek().span;
    ctx.advance(); // `_Generic`
    let open_span = ctx.peek().span;
    ctx.expect(&TokenKind::LParen)?;
    let controlling = parse_assignment(ctx)?;
    ctx.expect(&TokenKind::Comma)?;

    let mark = ctx.generic_scratch.mark();
    let mut seen_default: Option<Span> = None;
    loop {
        if ctx.check(&TokenKind::RParen) {
            break;
        }
        if ctx.check(&TokenKind::KwDefault) {
            let default_span = ctx.peek().span;
            ctx.advance();
            if let Some(_prior) = seen_default {
                ctx.generic_scratch.restore(mark);
                return Err(ctx.handler.emit_err(ParserError::generic_duplicate_default(default_span)));
            }
            seen_default = Some(default_span);
            ctx.expect(&TokenKind::Colon)?;
            let value = parse_assignment(ctx)?;
            ctx.generic_scratch.push(GenericEntry { key: TypeId::NONE, value });
        } else {
            let ty = match parse_typename(ctx) {
                Ok(ty) => ty,
                Err(e) => {
                    ctx.generic_scratch.restore(mark);
                    return Err(e);
                }
            };
            ctx.expect(&TokenKind::Colon)?;
            let value = parse_assignment(ctx)?;
            ctx.generic_scratch.push(GenericEntry { key: ty, value });
        }
        if ctx.eat(&TokenKind::Comma).is_some() {
            continue;
        }
        break;
    }

    let staged: Vec<GenericEntry> = ctx.generic_scratch.slice_from(mark).to_vec();
    ctx.generic_scratch.restore(mark);
    ctx.expect_closing_paren(open_span)?;
    let cases = ctx.ast.alloc_generic_entries(&staged);
    Ok(ctx.ast.alloc_expr(ExprKind::Generic { controlling, cases }, ctx.span_since(start)))
}

/// Function-literal extension (`@(decl){ body }` or `@{ body }`): parses the
/// declared function type (or inherits one, here a narrow placeholder
/// function type with no declared return/parameters, since there is no
/// enclosing declaration context to inherit from at this layer), resolves
/// through at most one pointer indirection, and parses the body with the
/// local-symbol frame saved and restored so the nested function can't
/// capture or leak the caller's local names.
fn parse_function_literal(ctx: &mut ParserContext) -> Result<ExprId> {
    let start = ctx.peek().span;
    ctx.advance(); // `@`

    if ctx.settings.pedantic {
        return Err(ctx.handler.emit_err(ParserError::function_literal_is_extension(start)));
    }

    let (mut ty, name) = if ctx.check(&TokenKind::LParen) {
        ctx.advance();
        let open_span = ctx.prev_span();
        let base = parse_declspec(ctx)?;
        let (ty, name) = parse_declarator(ctx, base)?;
        ctx.expect_closing_paren(open_span)?;
        (ty, name)
    } else {
        (ctx.types.alloc(TypeKind::Function { ret: TypeId::NONE, params: smallvec::smallvec![], variadic: false }), None)
    };

    if ctx.types.is_pointer(ty) {
        ty = ctx.types.pointee(ty).expect("is_pointer implies pointee");
    }
    if !ctx.types.is_function(ty) {
        return Err(ctx.handler.emit_err(ParserError::function_literal_base_not_a_function(start)));
    }

    let frame = ctx.symbols.save_local_frame();
    let result = parse_function_definition(ctx, ty, name);
    ctx.symbols.restore_local_frame(frame);
    let stmt = result?;

    Ok(ctx.ast.alloc_expr(ExprKind::FunctionLiteral { stmt }, ctx.span_since(start)))
}

/// Brace-enclosed initializer list, called with the opening `{` already
/// consumed (`brace_span` is its span). Builds the flat preorder sequence of
/// [`InitNode`]s (spec invariant P5) and wraps it in a `CompoundInit` node.
pub fn parse_initializer(ctx: &mut ParserContext, ty: TypeId, brace_span: Span) -> Result<ExprId> {
    let count = parse_init_list_body(ctx, brace_span)?;
    let mark = ctx.init_scratch.mark() - count as usize;
    let staged: Vec<InitNode> = ctx.init_scratch.slice_from(mark).to_vec();
    ctx.init_scratch.restore(mark);
    let init = ctx.ast.alloc_init_nodes(&staged);
    Ok(ctx.ast.alloc_expr(ExprKind::CompoundInit { ty, init }, ctx.span_since(brace_span)))
}

/// Parses `elem, elem, ...` up to and including the closing `}`, leaving the
/// staged [`InitNode`]s on `ctx.init_scratch` (caller copies them out and
/// restores the mark). Returns how many were pushed.
fn parse_init_list_body(ctx: &mut ParserContext, open_span: Span) -> Result<u32> {
    let mark = ctx.init_scratch.mark();
    if !ctx.check(&TokenKind::RBrace) {
        loop {
            if let Err(e) = parse_init_element(ctx) {
                ctx.init_scratch.restore(mark);
                return Err(e);
            }
            if ctx.eat(&TokenKind::Comma).is_some() {
                if ctx.check(&TokenKind::RBrace) {
                    break;
                }
                continue;
            }
            break;
        }
    }
    ctx.expect_closing(&TokenKind::RBrace, "{", open_span)?;
    Ok((ctx.init_scratch.mark() - mark) as u32)
}

/// One designated (or undesignated) initializer element: a designator chain
/// terminated by `=`, or none at all, followed by either a nested
/// brace-enclosed sublist or a leaf assignment-expression.
fn parse_init_element(ctx: &mut ParserContext) -> Result<()> {
    let elem_start = ctx.peek().span;
    let mut chain: Vec<usize> = Vec::new();

    loop {
        match ctx.peek().kind {
            TokenKind::LBracket => {
                ctx.advance();
                let lo = parse_const_expr(ctx)?;
                let mut hi = None;
                if ctx.eat(&TokenKind::Ellipsis).is_some() {
                    hi = Some(parse_const_expr(ctx)?);
                }
                ctx.expect(&TokenKind::RBracket)?;

                if let Some(hi_id) = hi {
                    if let (ExprKind::IntLiteral { value: lo_v, .. }, ExprKind::IntLiteral { value: hi_v, .. }) =
                        (&ctx.ast.expr(lo).kind, &ctx.ast.expr(hi_id).kind)
                    {
                        if hi_v < lo_v {
                            return Err(ctx.handler.emit_err(ParserError::array_designator_range_invalid(ctx.span_since(elem_start))));
                        }
                    }
                }

                let idx = ctx.init_scratch.mark();
                ctx.init_scratch.push(InitNode {
                    span: ctx.span_since(elem_start),
                    designator: Designator::Array { start: lo, end: hi },
                    kids_count: 1,
                    leaf: None,
                });
                chain.push(idx);
            }
            TokenKind::Dot => {
                let op_span = ctx.peek().span;
                ctx.advance();
                let name = match ctx.peek().kind.ident() {
                    Some(name) => {
                        ctx.advance();
                        name
                    }
                    None => return Err(ctx.handler.emit_err(ParserError::expected_identifier_after_member_access(".", op_span))),
                };
                let idx = ctx.init_scratch.mark();
                ctx.init_scratch.push(InitNode {
                    span: ctx.span_since(elem_start),
                    designator: Designator::Member(name),
                    kids_count: 1,
                    leaf: None,
                });
                chain.push(idx);
            }
            _ => break,
        }
    }

    let head_idx = if chain.is_empty() {
        let idx = ctx.init_scratch.mark();
        ctx.init_scratch.push(InitNode { span: elem_start, designator: Designator::None, kids_count: 0, leaf: None });
        idx
    } else {
        ctx.expect(&TokenKind::Eq)?;
        *chain.last().unwrap()
    };

    if ctx.check(&TokenKind::LBrace) {
        let brace_span = ctx.peek().span;
        ctx.advance();
        let kids = parse_init_list_body(ctx, brace_span)?;
        ctx.init_scratch.get_mut(head_idx).kids_count = kids;
    } else {
        let leaf = parse_assignment(ctx)?;
        let node = ctx.init_scratch.get_mut(head_idx);
        node.kids_count = 0;
        node.leaf = Some(leaf);
    }

    Ok(())
}
