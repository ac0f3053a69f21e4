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

use crate::expr::{ExprId, ExprKind, ExprNode, ExprRange, GenericEntry, GenericRange, InitNode, InitRange};
use rillc_span::Span;

/// Permanent, append-only storage for one translation unit's expression
/// tree: nodes are addressed by [`ExprId`] and indices increase strictly
/// with source order (spec invariant I1), so callers may rely on index order
/// for stable iteration without holding a reference into the arena.
#[derive(Default, Debug)]
pub struct Ast {
    exprs: Vec<ExprNode>,
    init_nodes: Vec<InitNode>,
    generic_entries: Vec<GenericEntry>,
    /// Flattened storage for call-argument and array-initializer lists;
    /// individual lists are addressed by an [`ExprRange`] into this table.
    arg_lists: Vec<ExprId>,
}

impl Ast {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc_expr(&mut self, kind: ExprKind, span: Span) -> ExprId {
        let id = ExprId(self.exprs.len() as u32);
        self.exprs.push(ExprNode { kind, span });
        id
    }

    pub fn expr(&self, id: ExprId) -> &ExprNode {
        &self.exprs[id.0 as usize]
    }

    pub fn len_exprs(&self) -> usize {
        self.exprs.len()
    }

    /// Copies a staged argument/array-element slice into permanent storage,
    /// returning the range to store on the owning node (`Call`, array
    /// `Designator`, etc).
    pub fn alloc_args(&mut self, args: &[ExprId]) -> ExprRange {
        let start = self.arg_lists.len() as u32;
        self.arg_lists.extend_from_slice(args);
        ExprRange { start, count: args.len() as u32 }
    }

    pub fn args(&self, range: ExprRange) -> &[ExprId] {
        let start = range.start as usize;
        &self.arg_lists[start..start + range.count as usize]
    }

    /// Copies a staged preorder designated-initializer sequence into
    /// permanent storage (spec invariant P5: flat preorder, reconstructible
    /// by walking in order).
    pub fn alloc_init_nodes(&mut self, nodes: &[InitNode]) -> InitRange {
        let start = self.init_nodes.len() as u32;
        self.init_nodes.extend_from_slice(nodes);
        InitRange { start, count: nodes.len() as u32 }
    }

    pub fn init_nodes(&self, range: InitRange) -> &[InitNode] {
        let start = range.start as usize;
        &self.init_nodes[start..start + range.count as usize]
    }

    /// Copies a staged `_Generic` association-list into permanent storage
    /// after the closing `)` has been seen.
    pub fn alloc_generic_entries(&mut self, entries: &[GenericEntry]) -> GenericRange {
        let start = self.generic_entries.len() as u32;
        self.generic_entries.extend_from_slice(entries);
        GenericRange { start, count: entries.len() as u32 }
    }

    pub fn generic_entries(&self, range: GenericRange) -> &[GenericEntry] {
        let start = range.start as usize;
        &self.generic_entries[start..start + range.count as usize]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::expr::IntSuffix;

    #[test]
    fn expr_ids_increase_with_allocation_order() {
        let mut ast = Ast::new();
        let a = ast.alloc_expr(ExprKind::IntLiteral { value: 1, suffix: IntSuffix::None }, Span::dummy());
        let b = ast.alloc_expr(ExprKind::IntLiteral { value: 2, suffix: IntSuffix::None }, Span::dummy());
        assert!(a.0 < b.0);
        assert_eq!(ast.len_exprs(), 2);
    }

    #[test]
    fn arg_ranges_round_trip() {
        let mut ast = Ast::new();
        let a = ast.alloc_expr(ExprKind::IntLiteral { value: 1, suffix: IntSuffix::None }, Span::dummy());
        let b = ast.alloc_expr(ExprKind::IntLiteral { value: 2, suffix: IntSuffix::None }, Span::dummy());
        let range = ast.alloc_args(&[a, b]);
        assert_eq!(ast.args(range), &[a, b]);
    }
}
