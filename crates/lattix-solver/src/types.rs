//! Structural type descriptors and their interning keys.
//!
//! A descriptor is identified by a [`TypeId`], an index into the
//! [`TypeInterner`](crate::intern::TypeInterner). The structural content
//! behind an id is a [`TypeKey`]: the kind tag plus the kind's structural
//! fields. Interning gives the equality contract the engine relies on:
//! two descriptors with identical kind and fields share one `TypeId`, so
//! descriptor equality (including use as map keys) is id equality, O(1).
//!
//! Descriptors are immutable after interning. The single write-once
//! exception, an alias's target link, lives in the
//! [`DefinitionStore`](crate::def::DefinitionStore); the `Alias` key only
//! carries the definition handle.

use crate::def::DefId;
use crate::version::VersionRange;
use lattix_common::interner::Atom;
use std::fmt;

/// Interned descriptor handle. Equality is structural equality of the
/// underlying descriptor.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

/// Interned list of descriptor handles (variant members, tuple elements,
/// pattern regexps).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeListId(pub u32);

/// Interned struct shape (ordered member list).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct StructShapeId(pub u32);

impl TypeId {
    // Well-known singletons, pre-registered by `TypeInterner::new()` in
    // exactly this order. Everything else is freely constructible value
    // data.
    pub const ANY: Self = Self(0);
    pub const UNIT: Self = Self(1);
    pub const UNDEF: Self = Self(2);
    pub const DEFAULT: Self = Self(3);
    pub const BOOLEAN: Self = Self(4);
    pub const INTEGER: Self = Self(5);
    pub const FLOAT: Self = Self(6);
    pub const NUMERIC: Self = Self(7);
    pub const STRING: Self = Self(8);
    pub const REGEXP: Self = Self(9);
    pub const SCALAR: Self = Self(10);
    pub const SCALAR_DATA: Self = Self(11);
    pub const COLLECTION: Self = Self(12);
    pub const ARRAY: Self = Self(13);
    pub const HASH: Self = Self(14);
    pub const EMPTY_ARRAY: Self = Self(15);
    pub const EMPTY_HASH: Self = Self(16);
    pub const SEMVER: Self = Self(17);
    pub const SEMVER_RANGE: Self = Self(18);
    pub const TYPE: Self = Self(19);
    pub const DATA: Self = Self(20);
}

/// Total ordering wrapper for `f64` so float bounds can participate in
/// `Eq`/`Hash` (and therefore in interning keys).
#[derive(Copy, Clone, Debug)]
pub struct OrderedFloat(pub f64);

impl PartialEq for OrderedFloat {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for OrderedFloat {}

impl std::hash::Hash for OrderedFloat {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl PartialOrd for OrderedFloat {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderedFloat {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for OrderedFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Inclusive element-count bounds for sized container descriptors.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SizeRange {
    pub min: u64,
    pub max: u64,
}

impl SizeRange {
    /// The unbounded range, `0..=u64::MAX`.
    pub const DEFAULT: Self = Self {
        min: 0,
        max: u64::MAX,
    };

    pub const fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    /// Range admitting exactly `n` elements.
    pub const fn exact(n: u64) -> Self {
        Self { min: n, max: n }
    }

    pub const fn is_default(self) -> bool {
        self.min == 0 && self.max == u64::MAX
    }

    /// Is `other` a sub-range of `self`?
    pub const fn contains(self, other: Self) -> bool {
        self.min <= other.min && other.max <= self.max
    }

    pub const fn includes(self, n: u64) -> bool {
        self.min <= n && n <= self.max
    }

    /// Smallest range covering both operands.
    pub fn merge(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

impl Default for SizeRange {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// One member of a struct descriptor: a literal string key mapped to a
/// value descriptor. Optional members may be absent from instances.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StructMember {
    pub key: Atom,
    pub value: TypeId,
    pub optional: bool,
}

impl StructMember {
    pub fn required(key: Atom, value: TypeId) -> Self {
        Self {
            key,
            value,
            optional: false,
        }
    }

    pub fn optional(key: Atom, value: TypeId) -> Self {
        Self {
            key,
            value,
            optional: true,
        }
    }
}

/// Ordered member list of a struct descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StructShape {
    pub members: Vec<StructMember>,
}

impl StructShape {
    pub fn find(&self, key: Atom) -> Option<&StructMember> {
        self.members.iter().find(|m| m.key == key)
    }

    pub fn required_count(&self) -> u64 {
        self.members.iter().filter(|m| !m.optional).count() as u64
    }

    /// The element-count range instances of this struct can have:
    /// every required member up to every member.
    pub fn size_range(&self) -> SizeRange {
        SizeRange::new(self.required_count(), self.members.len() as u64)
    }
}

/// Structural content of a descriptor: kind tag plus kind-specific fields.
///
/// This is the interning key; see the module docs for the equality
/// contract. Unbounded scalar ranges use the extreme representable bounds
/// so that the default and the explicitly-unbounded forms intern to the
/// same descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKey {
    /// Top: every descriptor and every value is acceptable.
    Any,
    /// Bottom: assignable to everything, instantiable from nothing.
    /// Identity element of the inference join.
    Unit,
    Undef,
    /// The DSL's `default` marker value.
    Default,
    Boolean,
    Integer {
        min: i64,
        max: i64,
    },
    Float {
        min: OrderedFloat,
        max: OrderedFloat,
    },
    /// Lattice anchor: Integer ∪ Float.
    Numeric,
    /// `value` is the literal form; a literal string always carries its
    /// exact length as `size`.
    String {
        size: SizeRange,
        value: Option<Atom>,
    },
    /// Classifies regexp values. `None` matches any regexp.
    Regexp {
        pattern: Option<Atom>,
    },
    /// Strings matching at least one of the listed Regexp descriptors
    /// (full-match semantics).
    Pattern {
        patterns: TypeListId,
    },
    /// Versions inside at least one of the ranges; an empty range list is
    /// the unconstrained form.
    SemVer {
        ranges: Vec<VersionRange>,
    },
    /// Classifies version-range values.
    SemVerRange,
    /// Lattice anchor: all scalar kinds.
    Scalar,
    /// Lattice anchor: Integer ∪ Float ∪ String ∪ Boolean.
    ScalarData,
    /// Array ∪ Hash, constrained only by size.
    Collection {
        size: SizeRange,
    },
    Array {
        element: TypeId,
        size: SizeRange,
    },
    /// Positional element types; arity is the list length.
    Tuple {
        elements: TypeListId,
    },
    Hash {
        key: TypeId,
        value: TypeId,
        size: SizeRange,
    },
    Struct {
        shape: StructShapeId,
    },
    /// Equivalent to Variant[inner, Undef].
    Optional {
        inner: TypeId,
    },
    /// `inner` minus Undef.
    NotUndef {
        inner: TypeId,
    },
    /// Union; assignable from a source only when every source arm is.
    Variant {
        members: TypeListId,
    },
    /// User-defined alias. The target link lives in the definition store
    /// and may close a cycle back to this node.
    Alias {
        def: DefId,
    },
    /// Classifies type values. `None` matches any type value.
    Type {
        inner: Option<TypeId>,
    },
    /// Opaque foreign value kind: a host runtime name plus the concrete
    /// class name within it. `class_name == None` matches any class of
    /// that runtime.
    Runtime {
        runtime: Atom,
        class_name: Option<Atom>,
    },
}

impl TypeKey {
    /// The kind name: the tag alone, no structural fields.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Any => "Any",
            Self::Unit => "Unit",
            Self::Undef => "Undef",
            Self::Default => "Default",
            Self::Boolean => "Boolean",
            Self::Integer { .. } => "Integer",
            Self::Float { .. } => "Float",
            Self::Numeric => "Numeric",
            Self::String { .. } => "String",
            Self::Regexp { .. } => "Regexp",
            Self::Pattern { .. } => "Pattern",
            Self::SemVer { .. } => "SemVer",
            Self::SemVerRange => "SemVerRange",
            Self::Scalar => "Scalar",
            Self::ScalarData => "ScalarData",
            Self::Collection { .. } => "Collection",
            Self::Array { .. } => "Array",
            Self::Tuple { .. } => "Tuple",
            Self::Hash { .. } => "Hash",
            Self::Struct { .. } => "Struct",
            Self::Optional { .. } => "Optional",
            Self::NotUndef { .. } => "NotUndef",
            Self::Variant { .. } => "Variant",
            Self::Alias { .. } => "Alias",
            Self::Type { .. } => "Type",
            Self::Runtime { .. } => "Runtime",
        }
    }
}

#[cfg(test)]
#[path = "../tests/types_tests.rs"]
mod types_tests;
