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

use crate::tokenizer::{Token, TokenKind};
use indexmap::IndexSet;
use rillc_ast::{Ast, ExprId, GenericEntry, InitNode, Scratch, StmtTable, SymbolTables, TypeTable};
use rillc_errors::{Handler, ParserError};
use rillc_span::{Span, Symbol};

/// Runtime configuration the declaration layer and diagnostic engine read;
/// replaces the original engine's compile-time `#if` switches with fields a
/// driver sets per parse.
#[derive(Copy, Clone, Debug)]
pub struct Settings {
    /// Reject the `@` function-literal extension.
    pub pedantic: bool,
    /// Consult the global symbol table before emitting an unknown-symbol
    /// placeholder for an unresolved identifier.
    pub out_of_order_decls: bool,
    /// Single-line, no-underline diagnostic rendering.
    pub thin_errors: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            pedantic: false,
            out_of_order_decls: false,
            thin_errors: false,
        }
    }
}

/// Owns the token stream position, the AST/type/symbol tables being built,
/// and the diagnostic handle. Plays the role the spec's "token cursor" and
/// "declaration-layer collaborator" interfaces together describe, the same
/// way the teacher's `ParserContext` bundles a token cursor with parse state
/// rather than keeping them as separate objects threaded through every call.
///
/// Single-threaded: nothing here is `Sync`, matching §5's "the parser is
/// single-threaded per translation unit".
pub struct ParserContext<'a> {
    pub(crate) tokens: Vec<Token>,
    pos: usize,
    pub handler: &'a Handler,
    pub settings: Settings,
    pub ast: Ast,
    pub types: TypeTable,
    pub symbols: SymbolTables,
    pub statements: StmtTable,
    /// Names previously declared `typedef`, consulted by `is_typename`
    /// alongside the fixed set of built-in type-specifier keywords.
    pub typedef_names: IndexSet<Symbol>,

    /// Staging buffers for sequences built during parsing before being
    /// copied into `ast`'s permanent storage (call arguments, `_Generic`
    /// arms, designated-initializer preorder records). Every parse routine
    /// that marks one of these must restore it before returning.
    pub arg_scratch: Scratch<ExprId>,
    pub generic_scratch: Scratch<GenericEntry>,
    pub init_scratch: Scratch<InitNode>,
}

impl<'a> ParserContext<'a> {
    pub fn new(tokens: Vec<Token>, handler: &'a Handler, settings: Settings) -> Self {
        ParserContext {
            tokens,
            pos: 0,
            handler,
            settings,
            ast: Ast::new(),
            types: TypeTable::new(),
            symbols: SymbolTables::new(settings.out_of_order_decls),
            statements: StmtTable::new(),
            typedef_names: IndexSet::new(),
            arg_scratch: Scratch::new(),
            generic_scratch: Scratch::new(),
            init_scratch: Scratch::new(),
        }
    }

    pub fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    pub fn peek_at(&self, offset: usize) -> &Token {
        self.tokens.get(self.pos + offset).unwrap_or_else(|| self.tokens.last().expect("token stream always has EOF"))
    }

    pub fn is_eof(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    /// Consumes and returns the current token, not moving past the trailing
    /// `Eof` sentinel.
    pub fn advance(&mut self) -> Token {
        let tok = self.tokens[self.pos].clone();
        if !matches!(tok.kind, TokenKind::Eof) {
            self.pos += 1;
        }
        tok
    }

    /// Moves the cursor back by `n` tokens, used by the compound-literal/cast
    /// and `sizeof`/`_Alignof` ambiguity resolutions to un-consume a
    /// speculatively parsed prefix.
    pub fn rewind(&mut self, n: usize) {
        self.pos = self.pos.saturating_sub(n);
    }

    pub fn save_position(&self) -> usize {
        self.pos
    }

    pub fn restore_position(&mut self, saved: usize) {
        self.pos = saved;
    }

    pub fn check(&self, kind: &TokenKind) -> bool {
        &self.peek().kind == kind
    }

    /// Consumes the current token if it matches `kind`.
    pub fn eat(&mut self, kind: &TokenKind) -> Option<Token> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    /// Advances past `kind`, or emits `unexpected_token` and returns `Err`.
    pub fn expect(&mut self, kind: &TokenKind) -> rillc_errors::Result<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            let found = self.peek().kind.describe();
            let span = self.peek().span;
            Err(self.handler.emit_err(ParserError::unexpected_token(found, kind.describe(), span)))
        }
    }

    /// Like [`ParserContext::expect`] for a closing delimiter, but reports at
    /// `opening_span` (where the unmatched opener sits) rather than at the
    /// current, likely unrelated, token.
    pub fn expect_closing(&mut self, closer: &TokenKind, opener: &str, opening_span: Span) -> rillc_errors::Result<Token> {
        if self.check(closer) {
            Ok(self.advance())
        } else {
            Err(self.handler.emit_err(ParserError::unclosed_delimiter(opener, opening_span)))
        }
    }

    pub fn expect_closing_paren(&mut self, opening_span: Span) -> rillc_errors::Result<Token> {
        self.expect_closing(&TokenKind::RParen, "(", opening_span)
    }

    /// The span of the most recently consumed token; used to build a span
    /// covering a construct just finished parsing.
    pub fn prev_span(&self) -> Span {
        self.tokens[self.pos.saturating_sub(1)].span
    }

    pub fn span_since(&self, start: Span) -> Span {
        start + self.prev_span()
    }
}
