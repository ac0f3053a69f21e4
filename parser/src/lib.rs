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

//! The rillc expression parser: lexing ([`tokenizer`]) and recursive-descent
//! parsing ([`parser`]) of the C expression grammar, plus the narrow
//! declaration-layer stand-ins the expression grammar's ambiguities need.

pub mod parser;
pub mod tokenizer;

pub use parser::{ParserContext, Settings};
pub use tokenizer::{Token, TokenKind};

use rillc_ast::{Ast, ExprId, StmtTable, SymbolTables, TypeTable};
use rillc_errors::{Handler, Result};
use rillc_span::create_session_if_not_set_then;
use std::sync::Arc;

/// Parses one complete comma-expression out of `source`, registering its
/// text with `handler`'s source map for later diagnostic rendering.
///
/// Wraps the whole parse in [`create_session_if_not_set_then`] so every
/// identifier interned while parsing `source` shares one [`rillc_span::Symbol`]
/// index space, matching the single-translation-unit-per-session contract
/// `Symbol::intern` assumes.
pub fn parse_expression(handler: &Handler, source: &str, filepath: &str) -> Result<(ExprId, ParsedTables)> {
    parse_expression_with_settings(handler, source, filepath, Settings::default())
}

/// Same as [`parse_expression`] but with caller-supplied [`Settings`]
/// (`pedantic`, `out_of_order_decls`, `thin_errors`).
pub fn parse_expression_with_settings(handler: &Handler, source: &str, filepath: &str, settings: Settings) -> Result<(ExprId, ParsedTables)> {
    create_session_if_not_set_then(|| {
        let tokens = {
            let mut map = handler.source_map_mut();
            tokenizer::tokenize(source, Arc::from(filepath), &mut map)
        };
        let mut ctx = ParserContext::new(tokens, handler, settings);
        let expr = parser::expression::parse_expr(&mut ctx)?;
        ctx.expect(&TokenKind::Eof)?;
        Ok((
            expr,
            ParsedTables {
                ast: ctx.ast,
                types: ctx.types,
                symbols: ctx.symbols,
                statements: ctx.statements,
            },
        ))
    })
}

/// The tables a parse populates, handed back alongside the root [`ExprId`]
/// since `ParserContext` itself borrows the [`Handler`] and doesn't outlive
/// the parse call.
pub struct ParsedTables {
    pub ast: Ast,
    pub types: TypeTable,
    pub symbols: SymbolTables,
    pub statements: StmtTable,
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;
    use rillc_ast::{BinaryOp, ExprKind};

    fn parse_one(source: &str) -> (ExprId, ParsedTables, Handler) {
        let handler = Handler::new();
        let (expr, tables) = parse_expression(&handler, source, "<test>").expect("parse should succeed");
        (expr, tables, handler)
    }

    #[test]
    fn parses_precedence_of_addition_over_multiplication() {
        let (expr, tables, _handler) = parse_one("1 + 2 * 3");
        match &tables.ast.expr(expr).kind {
            ExprKind::Binary { op: BinaryOp::Add, rhs, .. } => {
                assert!(matches!(tables.ast.expr(*rhs).kind, ExprKind::Binary { op: BinaryOp::Mul, .. }));
            }
            other => panic!("expected a top-level addition, got {other:?}"),
        }
    }

    #[test]
    fn assignment_is_right_associative() {
        let (expr, tables, _handler) = parse_one("a = b = 3");
        match &tables.ast.expr(expr).kind {
            ExprKind::Binary { op: BinaryOp::Assign, rhs, .. } => {
                assert!(matches!(tables.ast.expr(*rhs).kind, ExprKind::Binary { op: BinaryOp::Assign, .. }));
            }
            other => panic!("expected a top-level assignment, got {other:?}"),
        }
    }

    #[test]
    fn adjacent_string_literals_concatenate() {
        let (expr, tables, _handler) = parse_one("\"foo\" \"bar\"");
        match &tables.ast.expr(expr).kind {
            ExprKind::StringLiteral { bytes, wide } => {
                assert_eq!(&**bytes, b"foobar");
                assert!(!wide);
            }
            other => panic!("expected a concatenated string literal, got {other:?}"),
        }
    }

    #[test]
    fn reports_unclosed_delimiter_at_the_opener() {
        let handler = Handler::new();
        let result = parse_expression(&handler, "(1 + 2", "<test>");
        assert!(result.is_err());
        assert!(handler.had_errors());
    }
}
