//! Deterministic hash of a reflected type's name.
//!
//! [`TypeHash`] is the fast-path key of the type registry. It is computed
//! from the canonical type name with XXHash64, so the same name always
//! produces the same hash regardless of registration order.
//!
//! The hash is never trusted on its own: every registry entry keeps its name
//! and lookups compare it, and two distinct names that hash to the same value
//! are rejected at registration time.
//!
//! # Examples
//!
//! ```
//! use reflection_core::TypeHash;
//!
//! let a = TypeHash::from_name("Point");
//! let b = TypeHash::from_name("Point");
//! assert_eq!(a, b);
//! assert_ne!(a, TypeHash::from_name("Circle"));
//! ```

use std::fmt;
use xxhash_rust::xxh64::xxh64;

/// Domain marker mixed into every type hash.
const TYPE_DOMAIN: u64 = 0x2fac10b63a6cc57c;

/// A deterministic 64-bit hash identifying a reflected type by name.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TypeHash(pub u64);

impl TypeHash {
    /// Create a type hash from a canonical type name.
    #[inline]
    pub fn from_name(name: &str) -> Self {
        TypeHash(TYPE_DOMAIN ^ xxh64(name.as_bytes(), 0))
    }
}

impl fmt::Debug for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeHash({:#018x})", self.0)
    }
}

impl fmt::Display for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}
