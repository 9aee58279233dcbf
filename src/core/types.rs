/*!
 * Core Types
 * Opaque identity tokens shared across the tracker
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Size type for instance sizes in bytes
pub type Size = usize;

/// Opaque identifier for a tracked object type
///
/// Stable for the process lifetime. Hosts typically derive it from a class
/// pointer, vtable address, or interned type index; the tracker only compares
/// and hashes the token and never dereferences it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeTag(u64);

impl TypeTag {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

/// Opaque, non-owning identifier for a single object instance
///
/// Unique only while the object is live; the host allocator may reuse it
/// after deallocation. The tracker drops every copy of an identity when its
/// deallocation event arrives and never extends the object's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(u64);

impl ObjectId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}
