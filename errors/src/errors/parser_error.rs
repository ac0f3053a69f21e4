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

use crate::create_messages;
use std::fmt::Display;

create_messages!(
    /// `ParserError` enumerates every diagnosable condition the expression
    /// parser can raise. Every entry here corresponds to one of the "Error
    /// conditions (parser)" listed for the expression-parser core.
    ParserError,
    code_mask: 2000i32,
    code_prefix: "PAR",

    @formatted
    unexpected_token {
        code: 1,
        args: (found: impl Display, expected: impl Display),
        msg: format!("unexpected token `{found}`, expected {expected}"),
        help: None,
    }

    @formatted
    could_not_parse_expression {
        code: 2,
        args: (),
        msg: "could not parse expression".to_string(),
        help: None,
    }

    @formatted
    unclosed_delimiter {
        code: 3,
        args: (opener: impl Display),
        msg: format!("unclosed delimiter, expected a closing match for `{opener}`"),
        help: None,
    }

    @formatted
    expected_identifier_after_member_access {
        code: 4,
        args: (op: impl Display),
        msg: format!("expected an identifier after member access `{op}`"),
        help: None,
    }

    @formatted
    function_literal_base_not_a_function {
        code: 5,
        args: (),
        msg: "function literal base type is not a function type".to_string(),
        help: None,
    }

    @formatted
    function_literal_is_extension {
        code: 6,
        args: (),
        msg: "function literals are a non-standard extension, rejected under pedantic mode".to_string(),
        help: Some("drop `-pedantic` or rewrite without the `@` function-literal form".to_string()),
    }

    @formatted
    generic_duplicate_default {
        code: 7,
        args: (),
        msg: "multiple `default` cases in `_Generic` selector".to_string(),
        help: None,
    }

    @formatted
    array_designator_range_invalid {
        code: 8,
        args: (),
        msg: "array initializer range is empty or negative".to_string(),
        help: None,
    }

    @formatted
    could_not_resolve_symbol {
        code: 9,
        args: (name: impl Display),
        msg: format!("could not resolve symbol: {name}"),
        help: None,
    }

    @formatted
    unexpected_eof {
        code: 10,
        args: (expected: impl Display),
        msg: format!("unexpected end of input, expected {expected}"),
        help: None,
    }
);
