//! Alias definition identifiers and storage.
//!
//! A type alias is the one place the otherwise immutable descriptor model
//! has a mutation point: an alias is declared first (recording only its
//! forward-reference name) and resolved to its target descriptor exactly
//! once, by an external resolution pass, before any assignability query
//! traverses it. The target may close a cycle back to the alias itself or
//! to an enclosing Variant/Optional.
//!
//! [`DefId`] is the stable handle the `Alias` descriptor kind carries and
//! the key the recursion guard tracks during cyclic assignability checks.

use crate::db::TypeDatabase;
use crate::types::TypeId;
use crate::visitor;
use dashmap::DashMap;
use lattix_common::interner::Atom;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::trace;

/// Handle of an alias definition.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DefId(pub u32);

impl DefId {
    /// Sentinel value for invalid `DefId`.
    pub const INVALID: Self = Self(0);

    /// First valid `DefId`.
    pub const FIRST_VALID: u32 = 1;

    pub const fn is_valid(self) -> bool {
        self.0 >= Self::FIRST_VALID
    }
}

impl fmt::Display for DefId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "def#{}", self.0)
    }
}

#[derive(Clone, Debug)]
struct AliasDefinition {
    /// Forward-reference name; reported by the unresolved-reference walk
    /// while `body` is still `None`.
    name: Atom,
    body: Option<TypeId>,
    /// Whether the resolved body reaches back to this definition.
    /// Computed lazily on first query (after the resolution pass has run)
    /// and cached.
    recursive: Option<bool>,
}

/// Error from [`DefinitionStore::resolve`]: the write-once contract was
/// violated or the handle is unknown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolveError {
    AlreadyResolved { def: DefId, name: String },
    UnknownDefinition { def: DefId },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyResolved { def, name } => {
                write!(f, "alias '{name}' ({def}) has already been resolved")
            }
            Self::UnknownDefinition { def } => {
                write!(f, "no alias definition registered for {def}")
            }
        }
    }
}

impl std::error::Error for ResolveError {}

/// Thread-safe storage for alias definitions.
///
/// Registration and resolution go through `DashMap` entries so concurrent
/// first-use never observes a partially constructed definition.
pub struct DefinitionStore {
    definitions: DashMap<DefId, AliasDefinition>,
    next_id: AtomicU32,
}

impl Default for DefinitionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DefinitionStore {
    pub fn new() -> Self {
        Self {
            definitions: DashMap::new(),
            next_id: AtomicU32::new(DefId::FIRST_VALID),
        }
    }

    /// Register an unresolved alias under `name` and return its handle.
    pub fn register(&self, name: Atom) -> DefId {
        let def = DefId(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.definitions.insert(
            def,
            AliasDefinition {
                name,
                body: None,
                recursive: None,
            },
        );
        def
    }

    /// Resolve `def` to `body`. Write-once: resolving twice is an error.
    pub fn resolve(&self, def: DefId, body: TypeId, name_text: &str) -> Result<(), ResolveError> {
        let Some(mut entry) = self.definitions.get_mut(&def) else {
            return Err(ResolveError::UnknownDefinition { def });
        };
        if entry.body.is_some() {
            return Err(ResolveError::AlreadyResolved {
                def,
                name: name_text.to_string(),
            });
        }
        trace!(%def, body = body.0, "resolving alias definition");
        entry.body = Some(body);
        entry.recursive = None;
        Ok(())
    }

    pub fn name(&self, def: DefId) -> Option<Atom> {
        self.definitions.get(&def).map(|entry| entry.name)
    }

    /// The resolved target, or `None` while the alias is still a forward
    /// reference.
    pub fn body(&self, def: DefId) -> Option<TypeId> {
        self.definitions.get(&def).and_then(|entry| entry.body)
    }

    pub fn contains(&self, def: DefId) -> bool {
        self.definitions.contains_key(&def)
    }

    /// Whether the resolved body of `def` reaches back to `def`.
    ///
    /// Lazily computed outside the entry lock (two racing callers compute
    /// the same answer) and cached. Unresolved aliases are not recursive.
    pub fn is_recursive(&self, db: &dyn TypeDatabase, def: DefId) -> bool {
        let body = {
            let Some(entry) = self.definitions.get(&def) else {
                return false;
            };
            if let Some(cached) = entry.recursive {
                return cached;
            }
            match entry.body {
                Some(body) => body,
                None => return false,
            }
        };
        let recursive = visitor::reaches_definition(db, body, def);
        if let Some(mut entry) = self.definitions.get_mut(&def) {
            entry.recursive = Some(recursive);
        }
        recursive
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
#[path = "../tests/def_tests.rs"]
mod def_tests;
