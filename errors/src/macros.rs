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

/// Declares a message catalogue enum in the shape the teacher's error crate
/// uses: a numeric `code_mask`, a short `code_prefix`, and one `@formatted`
/// entry per diagnosable condition. Each entry becomes a constructor
/// function taking its `args` plus a [`Span`](crate::__reexport::Span) and
/// returning a value of the enum, carrying a precomputed message, numeric
/// code, and optional help string.
///
/// Differs from the teacher's macro in one respect: codes are assigned
/// explicitly per entry (`code: N`) rather than by enum position, so
/// reordering or removing an entry never silently renumbers its neighbours.
#[macro_export]
macro_rules! create_messages {
    (
        $(#[$meta:meta])*
        $name:ident,
        code_mask: $mask:expr,
        code_prefix: $prefix:expr,

        $(
            @formatted
            $title:ident {
                code: $code:expr,
                args: ($($arg_name:ident : $arg_ty:ty),* $(,)?),
                msg: $msg:expr,
                help: $help:expr,
            }
        )*
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug)]
        pub enum $name {
            $(
                $title {
                    message: String,
                    code: i32,
                    span: $crate::__reexport::Span,
                    help: Option<String>,
                },
            )*
        }

        impl $name {
            $(
                #[allow(clippy::too_many_arguments)]
                pub fn $title($($arg_name: $arg_ty,)* span: $crate::__reexport::Span) -> Self {
                    let message: String = $msg;
                    let help: Option<String> = $help;
                    $name::$title { message, code: $mask + $code, span, help }
                }
            )*

            /// The numeric code (`code_mask` + the entry's own `code`).
            pub fn code(&self) -> i32 {
                match self {
                    $( $name::$title { code, .. } => *code, )*
                }
            }

            /// The code rendered as `<prefix><code>`, e.g. `PAR0001`.
            pub fn code_str(&self) -> String {
                format!("{}{:04}", $prefix, self.code())
            }

            pub fn message(&self) -> &str {
                match self {
                    $( $name::$title { message, .. } => message, )*
                }
            }

            pub fn span(&self) -> $crate::__reexport::Span {
                match self {
                    $( $name::$title { span, .. } => *span, )*
                }
            }

            pub fn help(&self) -> Option<&str> {
                match self {
                    $( $name::$title { help, .. } => help.as_deref(), )*
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}: {}", self.code_str(), self.message())
            }
        }

        impl std::error::Error for $name {}
    };
}
