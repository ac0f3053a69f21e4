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

//! The recursive-descent parser itself: cursor/state ([`context`]), the
//! narrow declaration-layer stand-ins ([`decl`]) it needs to resolve
//! ambiguities, and the expression grammar proper ([`expression`]).

pub mod context;
pub mod decl;
pub mod expression;

pub use context::{ParserContext, Settings};
pub use expression::{parse_expr, parse_initializer};
