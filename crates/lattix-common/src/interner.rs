//! String interning for descriptor structural fields.
//!
//! Every identifier-like string in the type system (struct keys, literal
//! string values, regexp sources, alias names, foreign class names) is
//! interned to an [`Atom`], a `Copy` handle that compares and hashes in
//! O(1). This is what keeps type descriptors cheap to clone and usable as
//! map keys.
//!
//! The interner is safe for concurrent first-use: both directions of the
//! mapping live in `DashMap`s and insertion goes through an
//! insert-if-absent entry, so two threads interning the same string race
//! to a single winner and both observe the same `Atom`.

use dashmap::DashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

/// Interned string handle.
///
/// Atoms are only meaningful relative to the [`Interner`] that produced
/// them. Equal atoms imply equal strings; distinct atoms imply distinct
/// strings.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Atom(pub u32);

/// Thread-safe string interner.
pub struct Interner {
    atoms: DashMap<Arc<str>, Atom>,
    strings: DashMap<Atom, Arc<str>>,
    next: AtomicU32,
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}

impl Interner {
    pub fn new() -> Self {
        Self {
            atoms: DashMap::new(),
            strings: DashMap::new(),
            next: AtomicU32::new(0),
        }
    }

    /// Intern a string, returning its canonical `Atom`.
    pub fn intern(&self, text: &str) -> Atom {
        if let Some(existing) = self.atoms.get(text) {
            return *existing;
        }
        let key: Arc<str> = Arc::from(text);
        // entry() holds the shard lock for this key, so the id allocation
        // and the reverse-mapping insert happen exactly once per string.
        *self.atoms.entry(Arc::clone(&key)).or_insert_with(|| {
            let atom = Atom(self.next.fetch_add(1, Ordering::SeqCst));
            self.strings.insert(atom, key);
            atom
        })
    }

    /// Resolve an atom back to its string.
    ///
    /// Atoms from a different interner resolve to the empty string rather
    /// than panicking; mixing interners is a caller bug but not one worth
    /// aborting over.
    pub fn resolve(&self, atom: Atom) -> Arc<str> {
        self.strings
            .get(&atom)
            .map(|entry| Arc::clone(&entry))
            .unwrap_or_else(|| Arc::from(""))
    }

    /// Number of distinct strings interned so far.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_deduplicates() {
        let interner = Interner::new();
        let a = interner.intern("size");
        let b = interner.intern("size");
        let c = interner.intern("mode");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(&*interner.resolve(a), "size");
        assert_eq!(&*interner.resolve(c), "mode");
    }

    #[test]
    fn unknown_atom_resolves_to_empty() {
        let interner = Interner::new();
        assert_eq!(&*interner.resolve(Atom(42)), "");
    }

    #[test]
    fn concurrent_first_use_agrees() {
        let interner = Interner::new();
        let atoms: Vec<Atom> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| interner.intern("owner")))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert!(atoms.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(interner.len(), 1);
    }
}
