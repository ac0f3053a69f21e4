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

use crate::Span;
use std::sync::Arc;

/// A single physical line of source text, either from a real file or a
/// synthetic location (macro expansion body, builtin injection). Synthetic
/// filepaths begin with `<`, e.g. `<built-in>`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SourceLine {
    pub filepath: Arc<str>,
    pub line: u32,
    pub text: Arc<str>,
}

impl SourceLine {
    pub fn is_synthetic(&self) -> bool {
        self.filepath.starts_with('<')
    }
}

/// Index into [`SourceMap`]'s line table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct LineId(pub u32);

/// Index into [`SourceMap`]'s location table. Stable under growth: the table
/// is append-only.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct SourceLocId(pub u32);

/// Whether a [`SourceLoc`] sits directly in physical source or was produced
/// by expanding a macro invocation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LocKind {
    File,
    Macro,
}

/// A derived location: which line, what column range on that line, and
/// (optionally) the expansion site that produced it.
///
/// `parent` is `None` for locations that sit directly in physical source.
/// When present, it points at the [`SourceLoc`] of the macro invocation (or
/// `#include` directive) that produced this location, forming a chain that
/// the diagnostic engine walks to print a backtrace.
#[derive(Copy, Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct SourceLoc {
    pub line: LineId,
    pub columns: u32,
    pub length: u32,
    pub parent: Option<SourceLocId>,
    pub kind: LocKind,
    pub span: Span,
}

/// Immutable (append-only) table of source lines and derived locations for a
/// translation unit. Tokens carry a [`SourceLocId`] rather than owning their
/// own copy of this data, keeping the per-token footprint small and letting
/// the diagnostic engine recover full provenance from a single integer.
#[derive(Debug, Default)]
pub struct SourceMap {
    lines: Vec<SourceLine>,
    locs: Vec<SourceLoc>,
}

impl SourceMap {
    pub fn new() -> Self {
        SourceMap::default()
    }

    pub fn add_line(&mut self, filepath: Arc<str>, line: u32, text: Arc<str>) -> LineId {
        let id = LineId(self.lines.len() as u32);
        self.lines.push(SourceLine { filepath, line, text });
        id
    }

    pub fn add_loc(
        &mut self,
        line: LineId,
        columns: u32,
        length: u32,
        parent: Option<SourceLocId>,
        kind: LocKind,
        span: Span,
    ) -> SourceLocId {
        let id = SourceLocId(self.locs.len() as u32);
        self.locs.push(SourceLoc {
            line,
            columns,
            length,
            parent,
            kind,
            span,
        });
        id
    }

    pub fn line(&self, id: LineId) -> &SourceLine {
        &self.lines[id.0 as usize]
    }

    pub fn loc(&self, id: SourceLocId) -> &SourceLoc {
        &self.locs[id.0 as usize]
    }

    pub fn len_locs(&self) -> usize {
        self.locs.len()
    }

    /// Finds the most recently registered location whose span starts at or
    /// contains `span`'s low bound. Used to recover a `SourceLocId` (and
    /// therefore macro-backtrace provenance) from a bare `Span` carried on an
    /// AST node or diagnostic that only stored the lighter-weight value.
    pub fn loc_for_span(&self, span: Span) -> Option<SourceLocId> {
        self.locs
            .iter()
            .enumerate()
            .rev()
            .find(|(_, loc)| loc.span.lo <= span.lo && span.lo < loc.span.hi)
            .map(|(i, _)| SourceLocId(i as u32))
    }
}
