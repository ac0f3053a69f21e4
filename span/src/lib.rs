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

//! Source location handling for the rillc C front end.
//!
//! This crate owns byte positions, spans, the global identifier interner,
//! and the [`SourceMap`] that the diagnostic engine walks to render
//! backtraces through macro expansions. It mirrors the role of the teacher
//! compiler's `leo-span` crate.

mod pos;
mod source_map;
mod symbol;

pub use pos::{BytePos, Span};
pub use source_map::{LineId, LocKind, SourceLine, SourceLoc, SourceLocId, SourceMap};
pub use symbol::{create_session_if_not_set_then, sym, Symbol};
