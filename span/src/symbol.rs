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

use fxhash::FxBuildHasher;
use indexmap::IndexSet;
use std::cell::RefCell;
use std::fmt;

/// An interned identifier or member name.
///
/// Equality after interning degrades to a cheap index comparison, matching
/// the atom-interner contract in the spec: "equality is pointer-equal after
/// interning".
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct Symbol(u32);

impl Symbol {
    pub fn intern(string: &str) -> Self {
        with_session_globals(|globals| globals.symbol_interner.borrow_mut().intern(string))
    }

    pub fn as_str(self) -> &'static str {
        with_session_globals(|globals| {
            let interner = globals.symbol_interner.borrow();
            // SAFETY-free: the interner never removes or reallocates its stored
            // strings, and the session lives for the thread's duration, so this
            // coercion to `'static` reflects the interner's real lifetime.
            let s: &str = interner.get(self);
            unsafe { std::mem::transmute::<&str, &'static str>(s) }
        })
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

struct Interner {
    strings: IndexSet<Box<str>, FxBuildHasher>,
}

impl Interner {
    fn new() -> Self {
        Interner {
            strings: IndexSet::default(),
        }
    }

    fn intern(&mut self, string: &str) -> Symbol {
        if let Some(idx) = self.strings.get_index_of(string) {
            return Symbol(idx as u32);
        }
        let (idx, _) = self.strings.insert_full(string.into());
        Symbol(idx as u32)
    }

    fn get(&self, symbol: Symbol) -> &str {
        self.strings
            .get_index(symbol.0 as usize)
            .expect("interned symbol out of range")
    }
}

/// Thread-local interning session, mirroring the teacher's `leo_span` global
/// symbol table (built on `scoped-tls` so each compiler thread gets its own
/// arena without a process-wide lock).
struct SessionGlobals {
    symbol_interner: RefCell<Interner>,
}

impl SessionGlobals {
    fn new() -> Self {
        SessionGlobals {
            symbol_interner: RefCell::new(Interner::new()),
        }
    }
}

scoped_tls::scoped_thread_local!(static SESSION_GLOBALS: SessionGlobals);

fn with_session_globals<R>(f: impl FnOnce(&SessionGlobals) -> R) -> R {
    if SESSION_GLOBALS.is_set() {
        SESSION_GLOBALS.with(f)
    } else {
        // No session has been created yet on this thread; create one that
        // lives for the duration of this single call. Most parser entry
        // points call `create_session_if_not_set_then` instead so all symbols
        // produced during a parse share one interner.
        let globals = SessionGlobals::new();
        SESSION_GLOBALS.set(&globals, || SESSION_GLOBALS.with(f))
    }
}

/// Runs `f` inside a fresh interning session if one isn't already active on
/// this thread, otherwise reuses the active one.
pub fn create_session_if_not_set_then<R>(f: impl FnOnce() -> R) -> R {
    if SESSION_GLOBALS.is_set() {
        f()
    } else {
        let globals = SessionGlobals::new();
        SESSION_GLOBALS.set(&globals, f)
    }
}

/// Well-known interned symbols, analogous to the teacher's `leo_span::sym`
/// module.
pub mod sym {
    use super::Symbol;

    pub fn default_case() -> Symbol {
        Symbol::intern("default")
    }
}
