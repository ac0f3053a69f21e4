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

use crate::types::TypeId;
use rillc_span::{Span, Symbol};
use serde::{Deserialize, Serialize};

/// Index into an [`crate::arena::Ast`]'s expression table. Stable under
/// growth: the table is append-only and node indices increase strictly with
/// source order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ExprId(pub u32);

/// Opaque handle to a declaration-layer statement (a function definition, for
/// now): the expression parser only ever creates or references these, it
/// never inspects their contents.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StmtId(pub u32);

/// A contiguous run of [`ExprId`]s in the arena's argument-list table: call
/// arguments, or designated-initializer leaves reached via an `InitNode`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExprRange {
    pub start: u32,
    pub count: u32,
}

impl ExprRange {
    pub const EMPTY: ExprRange = ExprRange { start: 0, count: 0 };
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntSuffix {
    None,
    Unsigned,
    Long,
    UnsignedLong,
    LongLong,
    UnsignedLongLong,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum FloatWidth {
    F32,
    F64,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    Deref,
    AddrOf,
    LogicalNot,
    BitNot,
    Negate,
    PreInc,
    PreDec,
    PostInc,
    PostDec,
    SizeofExpr,
    AlignofExpr,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    Mul,
    Div,
    Mod,
    Add,
    Sub,
    Shl,
    Shr,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
    BitAnd,
    BitXor,
    BitOr,
    LogAnd,
    LogOr,
    Comma,
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    ModAssign,
    ShlAssign,
    ShrAssign,
    AndAssign,
    XorAssign,
    OrAssign,
}

impl BinaryOp {
    /// `true` for the plain `=` and every compound-assignment operator; used
    /// by level 14 to decide whether the right operand recurses into another
    /// assignment-expression.
    pub fn is_assignment(self) -> bool {
        matches!(
            self,
            BinaryOp::Assign
                | BinaryOp::AddAssign
                | BinaryOp::SubAssign
                | BinaryOp::MulAssign
                | BinaryOp::DivAssign
                | BinaryOp::ModAssign
                | BinaryOp::ShlAssign
                | BinaryOp::ShrAssign
                | BinaryOp::AndAssign
                | BinaryOp::XorAssign
                | BinaryOp::OrAssign
        )
    }
}

/// The designator a single [`InitNode`] carries. `None` is the sentinel
/// emitted for an element with no designator at all.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Designator {
    None,
    /// `[start]` or the GNU range extension `[start ... end]`.
    Array { start: ExprId, end: Option<ExprId> },
    Member(Symbol),
}

/// One record in the flat preorder representation of a designated-initializer
/// tree (spec invariant P5): a designator head owns the next `kids_count`
/// records that follow it in the sequence; a leaf (`kids_count == 0`) carries
/// the assignment-expression it initializes.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct InitNode {
    pub span: Span,
    pub designator: Designator,
    pub kids_count: u32,
    pub leaf: Option<ExprId>,
}

/// A contiguous run of [`InitNode`]s in the arena's init-node table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitRange {
    pub start: u32,
    pub count: u32,
}

/// One `type: expr` (or `default: expr`) arm of a `_Generic` selection.
/// `key` is [`TypeId::NONE`] for the `default` arm.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct GenericEntry {
    pub key: TypeId,
    pub value: ExprId,
}

/// A contiguous run of [`GenericEntry`] records.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericRange {
    pub start: u32,
    pub count: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum ExprKind {
    IntLiteral { value: i128, suffix: IntSuffix },
    FloatLiteral { value: f64, width: FloatWidth },
    CharLiteral { value: u32 },
    /// Narrow (`"..."`) or wide (`L"..."`) string literal. Concatenation of
    /// adjacent tokens has already happened by the time this variant is
    /// built (spec property P4); `bytes` holds the quoted interior only.
    StringLiteral { bytes: Box<[u8]>, wide: bool },
    ParamRef { ordinal: u32 },
    SymbolRef { stmt: StmtId },
    UnknownSymbol { name: Symbol },
    Member { base: ExprId, name: Symbol, arrow: bool },
    Subscript { base: ExprId, index: ExprId },
    Call { target: ExprId, args: ExprRange },
    Cast { ty: TypeId, expr: ExprId },
    SizeofType { ty: TypeId },
    AlignofType { ty: TypeId },
    CompoundInit { ty: TypeId, init: InitRange },
    Generic { controlling: ExprId, cases: GenericRange },
    FunctionLiteral { stmt: StmtId },
    Unary { op: UnaryOp, operand: ExprId },
    Binary { op: BinaryOp, lhs: ExprId, rhs: ExprId },
    Ternary { cond: ExprId, then_branch: ExprId, else_branch: ExprId },
    /// Placeholder left behind where a fatal syntax error prevented building
    /// a real node, so the surrounding tree stays well-formed for recovery.
    Error,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExprNode {
    pub kind: ExprKind,
    pub span: Span,
}
