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

use rillc_span::Symbol;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Index into a [`TypeTable`]. `NONE` and `BOOL` are fixed sentinels present
/// in every table, matching the `TYPE_NONE`/`TYPE_BOOL` sentinels the
/// expression parser's collaborators expose.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TypeId(pub u32);

impl TypeId {
    /// Marks the `default:` arm of a `_Generic` selection.
    pub const NONE: TypeId = TypeId(0);
    pub const BOOL: TypeId = TypeId(1);
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScalarKind {
    Void,
    Char,
    SChar,
    UChar,
    Short,
    UShort,
    Int,
    UInt,
    Long,
    ULong,
    LongLong,
    ULongLong,
    Float,
    Double,
    LongDouble,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum TypeKind {
    /// Sentinel occupying index 0; never a real type.
    None,
    /// Sentinel occupying index 1; the synthetic boolean type `!!x` casts to.
    Bool,
    Scalar(ScalarKind),
    Pointer(TypeId),
    /// Most C function declarators list a handful of parameters, so the
    /// common case stores inline rather than spilling to the heap (the same
    /// tradeoff the pack's `ArrayDimensions` makes for dimension lists).
    Function { ret: TypeId, params: SmallVec<[TypeId; 4]>, variadic: bool },
    /// A typedef name or struct/union/enum tag the declaration layer hasn't
    /// resolved further than its name; sufficient for cast/sizeof spelling.
    Named(Symbol),
}

/// Small append-only arena of type records, standing in for the full type
/// system: enough for cast targets, `sizeof`/`_Alignof` operands, and
/// `_Generic` selector keys. No layout computation, no conversion rules.
#[derive(Debug)]
pub struct TypeTable {
    types: Vec<TypeKind>,
}

impl Default for TypeTable {
    fn default() -> Self {
        TypeTable {
            types: vec![TypeKind::None, TypeKind::Bool],
        }
    }
}

impl TypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, kind: TypeKind) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.types.push(kind);
        id
    }

    pub fn get(&self, id: TypeId) -> &TypeKind {
        &self.types[id.0 as usize]
    }

    pub fn is_pointer(&self, id: TypeId) -> bool {
        matches!(self.get(id), TypeKind::Pointer(_))
    }

    pub fn is_function(&self, id: TypeId) -> bool {
        matches!(self.get(id), TypeKind::Function { .. })
    }

    /// The pointee of a pointer type, or `None` if `id` isn't a pointer.
    pub fn pointee(&self, id: TypeId) -> Option<TypeId> {
        match self.get(id) {
            TypeKind::Pointer(inner) => Some(*inner),
            _ => None,
        }
    }
}
