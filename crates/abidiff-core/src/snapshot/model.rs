//! Snapshot value types.
//!
//! All types implement `Debug, Clone, Serialize, Deserialize, PartialEq, Eq`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fully-qualified class identity in JVM internal form, e.g.
/// `com/example/Outer$Inner`.
///
/// Unique within one snapshot collection.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassId(String);

impl ClassId {
    pub fn new(internal_name: impl Into<String>) -> Self {
        Self(internal_name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Package part in internal form (`com/example`); empty for the default package.
    pub fn package(&self) -> &str {
        match self.0.rfind('/') {
            Some(idx) => &self.0[..idx],
            None => "",
        }
    }

    /// Class name without its package (`Outer$Inner`).
    pub fn simple_name(&self) -> &str {
        match self.0.rfind('/') {
            Some(idx) => &self.0[idx + 1..],
            None => &self.0,
        }
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClassId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ClassId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Opaque digest of a class's or member's observable binary interface.
///
/// Equal hashes are treated as equal interfaces; collisions are assumed not
/// to occur.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct AbiHash(u64);

impl AbiHash {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for AbiHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

impl From<u64> for AbiHash {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// Interface shape of one field or one method.
///
/// Overloads share a `name` but never an `abi_hash`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberSnapshot {
    pub name: String,
    pub abi_hash: AbiHash,
}

impl MemberSnapshot {
    pub fn new(name: impl Into<String>, abi_hash: u64) -> Self {
        Self {
            name: name.into(),
            abi_hash: AbiHash(abi_hash),
        }
    }
}

/// Binary interface of one class in one build.
///
/// `shape_hash` covers everything about the class except its members
/// (supertypes, modifiers, annotations). Member order in `fields` and
/// `methods` carries no meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSnapshot {
    pub class_id: ClassId,
    pub shape_hash: AbiHash,
    #[serde(default)]
    pub fields: Vec<MemberSnapshot>,
    #[serde(default)]
    pub methods: Vec<MemberSnapshot>,
}

impl ClassSnapshot {
    /// Snapshot with no members.
    pub fn new(class_id: impl Into<ClassId>, shape_hash: u64) -> Self {
        Self {
            class_id: class_id.into(),
            shape_hash: AbiHash(shape_hash),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, abi_hash: u64) -> Self {
        self.fields.push(MemberSnapshot::new(name, abi_hash));
        self
    }

    pub fn with_method(mut self, name: impl Into<String>, abi_hash: u64) -> Self {
        self.methods.push(MemberSnapshot::new(name, abi_hash));
        self
    }
}
