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

//! `rillc`: the expression parser and diagnostic engine for a small C front
//! end. Re-exports the workspace's `span`/`errors`/`ast`/`parser` crates so a
//! driver only needs this one dependency.

pub use rillc_ast as ast;
pub use rillc_errors as errors;
pub use rillc_parser as parser;
pub use rillc_span as span;

pub use rillc_errors::{DiagnosticEngine, Handler, ParserError, Result};
pub use rillc_parser::{parse_expression, parse_expression_with_settings, ParsedTables, Settings};

use tracing_subscriber::EnvFilter;

/// Installs a `tracing` subscriber reading its filter from `RUST_LOG`,
/// falling back to `warn` level. Idempotent: a driver may call this once at
/// startup; a second call is a harmless no-op (the underlying
/// `set_global_default` error is swallowed, matching how test harnesses that
/// call it once per test would otherwise panic on the second invocation).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Parses `source` as a single expression, printing any diagnostics to
/// stdout via `handler`, and returns the parsed tree alongside its tables.
/// Thin convenience wrapper over [`rillc_parser::parse_expression`] for
/// callers that just have a string and a path and want the common case.
pub fn parse_source(source: &str, filepath: &str) -> Result<(rillc_ast::ExprId, ParsedTables)> {
    let handler = Handler::new();
    parse_expression(&handler, source, filepath)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_a_trivial_expression() {
        let result = parse_source("1 + 1", "<test>");
        assert!(result.is_ok());
    }
}
