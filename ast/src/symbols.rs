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

use crate::expr::StmtId;
use crate::types::TypeId;
use indexmap::IndexMap;
use rillc_span::Symbol;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LocalSymbolKind {
    Parameter(u32),
    Statement(StmtId),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StmtKind {
    /// A function definition reached through the `@` function-literal
    /// extension, or (eventually) ordinary top-level definitions.
    Function { ty: TypeId, is_root: bool, is_inline: bool },
}

#[derive(Clone, Debug)]
pub struct Statement {
    pub kind: StmtKind,
    pub name: Option<Symbol>,
}

/// Append-only table of declaration-layer statements. The expression parser
/// only ever allocates entries (via function literals) or holds opaque
/// [`StmtId`]s; it never walks statement bodies.
#[derive(Default, Debug)]
pub struct StmtTable {
    statements: Vec<Statement>,
}

impl StmtTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, statement: Statement) -> StmtId {
        let id = StmtId(self.statements.len() as u32);
        self.statements.push(statement);
        id
    }

    pub fn get(&self, id: StmtId) -> &Statement {
        &self.statements[id.0 as usize]
    }
}

/// One level of local-scope nesting. Pushed on block/function entry, popped
/// on exit, mirroring the declaration layer's scope discipline.
#[derive(Default, Debug)]
struct LocalScope {
    symbols: IndexMap<Symbol, LocalSymbolKind>,
}

/// Local, label, and (optional) global symbol resolution, narrowed to what
/// the expression parser's identifier lookup needs: it reads these tables,
/// it never writes to them except via [`SymbolTables::declare_local`], which
/// only the function-literal and declaration-layer collaborators call.
#[derive(Debug)]
pub struct SymbolTables {
    scopes: Vec<LocalScope>,
    labels: IndexMap<Symbol, StmtId>,
    globals: Option<IndexMap<Symbol, StmtId>>,
}

impl SymbolTables {
    pub fn new(with_globals: bool) -> Self {
        SymbolTables {
            scopes: vec![LocalScope::default()],
            labels: IndexMap::new(),
            globals: with_globals.then(IndexMap::new),
        }
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(LocalScope::default());
    }

    pub fn pop_scope(&mut self) {
        self.scopes.pop();
        debug_assert!(!self.scopes.is_empty(), "popped the outermost local scope");
    }

    /// Returns a mark that [`SymbolTables::restore_local_frame`] can use to
    /// drop every scope pushed since, so a function literal can parse its
    /// body without capturing or leaking its enclosing scope's names.
    pub fn save_local_frame(&mut self) -> usize {
        let mark = self.scopes.len();
        self.scopes.push(LocalScope::default());
        mark
    }

    pub fn restore_local_frame(&mut self, mark: usize) {
        self.scopes.truncate(mark);
    }

    pub fn declare_local(&mut self, name: Symbol, kind: LocalSymbolKind) {
        self.scopes
            .last_mut()
            .expect("local scope stack is never empty")
            .symbols
            .insert(name, kind);
    }

    pub fn declare_label(&mut self, name: Symbol, stmt: StmtId) {
        self.labels.insert(name, stmt);
    }

    /// Innermost-first search over the active scope stack.
    pub fn find_local_symbol(&self, name: Symbol) -> Option<LocalSymbolKind> {
        self.scopes.iter().rev().find_map(|scope| scope.symbols.get(&name).copied())
    }

    pub fn find_label(&self, name: Symbol) -> Option<StmtId> {
        self.labels.get(&name).copied()
    }

    pub fn find_global_symbol(&self, name: Symbol) -> Option<StmtId> {
        self.globals.as_ref().and_then(|g| g.get(&name).copied())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn local_frame_save_restore_hides_enclosing_names() {
        let mut tables = SymbolTables::new(false);
        let outer = Symbol::intern("outer");
        let inner = Symbol::intern("inner");
        tables.declare_local(outer, LocalSymbolKind::Parameter(0));

        let mark = tables.save_local_frame();
        tables.declare_local(inner, LocalSymbolKind::Parameter(1));
        assert!(tables.find_local_symbol(inner).is_some());
        assert!(tables.find_local_symbol(outer).is_none());

        tables.restore_local_frame(mark);
        assert!(tables.find_local_symbol(inner).is_none());
        assert!(tables.find_local_symbol(outer).is_some());
    }
}
