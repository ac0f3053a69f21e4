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

//! Diagnostic engine and error catalogue for the rillc C front end.
//!
//! Mirrors the split in the teacher's `leo-errors` crate: a `create_messages!`
//! macro builds one enum per diagnosable subsystem, and a separate render
//! layer ([`diagnostic`]) turns a diagnostic plus a [`rillc_span::SourceMap`]
//! location into printed output and a running tally.

#[macro_use]
pub mod macros;

pub mod diagnostic;
pub mod emitter;

mod errors {
    pub mod parser_error;
}

pub use diagnostic::{DiagnosticEngine, ReportLevel, ReportOutcome};
pub use emitter::Handler;
pub use errors::parser_error::ParserError;

/// Re-exported so `create_messages!` call sites elsewhere in the workspace
/// don't need a direct `rillc-span` dependency of their own.
pub mod __reexport {
    pub use rillc_span::Span;
}

pub type Result<T> = std::result::Result<T, ParserError>;
