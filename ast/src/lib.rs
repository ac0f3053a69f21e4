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

//! Expression AST, arenas, and the narrow type/symbol tables the rillc
//! expression parser calls into.
//!
//! Scope mirrors the teacher compiler's `leo-ast` crate: the data model for
//! one syntactic layer (here, expressions) plus the small amount of
//! supporting machinery (arenas, a type table, symbol scoping) that layer
//! needs, with everything downstream (semantic analysis, codegen) left to
//! other crates this workspace doesn't implement.

mod arena;
mod expr;
mod scratch;
mod symbols;
mod types;

pub use arena::Ast;
pub use expr::{
    BinaryOp, Designator, ExprId, ExprKind, ExprNode, ExprRange, FloatWidth, GenericEntry, GenericRange, InitNode,
    InitRange, IntSuffix, StmtId, UnaryOp,
};
pub use scratch::Scratch;
pub use symbols::{LocalSymbolKind, Statement, StmtKind, StmtTable, SymbolTables};
pub use types::{ScalarKind, TypeId, TypeKind, TypeTable};
