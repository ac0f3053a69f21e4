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

//! Narrow declaration-layer stand-ins: just enough type-specifier and
//! declarator grammar to resolve the compound-literal/cast and
//! `sizeof`/`_Alignof` ambiguities and to parse a function literal's type,
//! without implementing the full C declarator grammar (bitfields, K&R
//! parameter lists, `_Atomic` qualifiers, and so on stay out of scope).

use super::context::ParserContext;
use crate::tokenizer::TokenKind;
use rillc_ast::{ScalarKind, StmtKind, Statement, TypeId, TypeKind};
use rillc_errors::{ParserError, Result};
use rillc_span::Symbol;
use smallvec::SmallVec;

fn builtin_type_keyword(name: &str) -> bool {
    matches!(
        name,
        "void" | "char" | "short" | "int" | "long" | "float" | "double" | "signed" | "unsigned" | "_Bool" | "struct" | "union" | "enum"
    )
}

/// `true` if the upcoming tokens could begin a type name: either a built-in
/// type-specifier keyword (lexed as a plain identifier, since the lexer
/// doesn't distinguish keywords from identifiers) or a name previously
/// declared as a typedef in `ctx.typedef_names`.
pub fn is_typename(ctx: &ParserContext) -> bool {
    match ctx.peek().kind.ident() {
        Some(sym) => builtin_type_keyword(sym.as_str()) || ctx.typedef_names.contains(&sym),
        None => false,
    }
}

/// Parses a minimal declaration-specifier sequence: any run of built-in
/// type-specifier keywords, or a single typedef name, followed by any number
/// of `*` pointer declarators.
pub fn parse_typename(ctx: &mut ParserContext) -> Result<TypeId> {
    let base = parse_declspec(ctx)?;
    parse_pointer_suffix(ctx, base)
}

pub fn parse_declspec(ctx: &mut ParserContext) -> Result<TypeId> {
    let Some(sym) = ctx.peek().kind.ident() else {
        let found = ctx.peek().kind.describe();
        let span = ctx.peek().span;
        return Err(ctx.handler.emit_err(ParserError::unexpected_token(found, "a type name", span)));
    };
    let name = sym.as_str();

    if !builtin_type_keyword(name) {
        ctx.advance();
        return Ok(ctx.types.alloc(TypeKind::Named(sym)));
    }

    // Greedily collect the run of built-in specifier keywords (`unsigned
    // long long int`, `signed char`, ...) the way a real declspec parser
    // folds multi-word specifiers into one scalar kind.
    let mut words = Vec::new();
    while let Some(s) = ctx.peek().kind.ident() {
        if !builtin_type_keyword(s.as_str()) {
            break;
        }
        words.push(s.as_str());
        ctx.advance();
    }

    let scalar = scalar_from_words(&words);
    Ok(ctx.types.alloc(TypeKind::Scalar(scalar)))
}

fn scalar_from_words(words: &[&str]) -> ScalarKind {
    let unsigned = words.contains(&"unsigned");
    let long_count = words.iter().filter(|w| **w == "long").count();
    if words.contains(&"double") {
        return if long_count > 0 { ScalarKind::LongDouble } else { ScalarKind::Double };
    }
    if words.contains(&"float") {
        return ScalarKind::Float;
    }
    if words.contains(&"_Bool") {
        return ScalarKind::Char;
    }
    if words.contains(&"char") {
        return if unsigned { ScalarKind::UChar } else { ScalarKind::Char };
    }
    if words.contains(&"short") {
        return if unsigned { ScalarKind::UShort } else { ScalarKind::Short };
    }
    if long_count >= 2 {
        return if unsigned { ScalarKind::ULongLong } else { ScalarKind::LongLong };
    }
    if long_count == 1 {
        return if unsigned { ScalarKind::ULong } else { ScalarKind::Long };
    }
    if words.contains(&"void") {
        return ScalarKind::Void;
    }
    if unsigned {
        return ScalarKind::UInt;
    }
    ScalarKind::Int
}

fn parse_pointer_suffix(ctx: &mut ParserContext, mut ty: TypeId) -> Result<TypeId> {
    while ctx.check(&TokenKind::Star) {
        ctx.advance();
        ty = ctx.types.alloc(TypeKind::Pointer(ty));
    }
    Ok(ty)
}

/// Parses a (possibly abstract) declarator applied to `base`: pointer
/// prefixes, then either a parameter list making `base` a function's return
/// type, or nothing. Returns the resulting type and the declared name, if
/// any.
pub fn parse_declarator(ctx: &mut ParserContext, base: TypeId) -> Result<(TypeId, Option<Symbol>)> {
    let pointee = parse_pointer_suffix(ctx, base)?;

    let name = match ctx.peek().kind.ident() {
        Some(sym) if !is_typename(ctx) => {
            ctx.advance();
            Some(sym)
        }
        _ => None,
    };

    if ctx.check(&TokenKind::LParen) {
        let open_span = ctx.peek().span;
        ctx.advance();
        let mut params = SmallVec::new();
        let mut variadic = false;
        if !ctx.check(&TokenKind::RParen) {
            loop {
                if ctx.check(&TokenKind::Ellipsis) {
                    ctx.advance();
                    variadic = true;
                    break;
                }
                let param_base = parse_declspec(ctx)?;
                let (param_ty, _param_name) = parse_declarator(ctx, param_base)?;
                params.push(param_ty);
                if ctx.eat(&TokenKind::Comma).is_some() {
                    continue;
                }
                break;
            }
        }
        ctx.expect_closing_paren(open_span)?;
        let fn_ty = ctx.types.alloc(TypeKind::Function { ret: pointee, params, variadic });
        return Ok((fn_ty, name));
    }

    Ok((pointee, name))
}

/// Parses a function body after its declarator, standing in for full
/// statement parsing: the brace-enclosed body is skipped as a balanced-brace
/// run (statement semantics are out of scope for the expression parser), and
/// a [`Statement`] recording the function's type is allocated.
pub fn parse_function_definition(ctx: &mut ParserContext, ty: TypeId, name: Option<Symbol>) -> Result<rillc_ast::StmtId> {
    let open_span = ctx.peek().span;
    ctx.expect(&TokenKind::LBrace)?;
    let mut depth = 1u32;
    while depth > 0 {
        match ctx.peek().kind {
            TokenKind::LBrace => {
                depth += 1;
                ctx.advance();
            }
            TokenKind::RBrace => {
                depth -= 1;
                ctx.advance();
            }
            TokenKind::Eof => {
                return Err(ctx.handler.emit_err(ParserError::unclosed_delimiter("{", open_span)));
            }
            _ => {
                ctx.advance();
            }
        }
    }
    Ok(ctx.statements.alloc(Statement {
        kind: StmtKind::Function { ty, is_root: true, is_inline: true },
        name,
    }))
}

/// Constant-expression entry point used by array-designator bounds: C grammar
/// puts `constant-expression` at the conditional-expression level, excluding
/// assignment and comma.
pub fn parse_const_expr(ctx: &mut ParserContext) -> Result<rillc_ast::ExprId> {
    super::expression::parse_ternary(ctx)
}
