//! Cycle-safe walks over the descriptor graph.
//!
//! The descriptor graph may be cyclic through resolved aliases, so every
//! walk here carries a visited set keyed by `TypeId`. Aliases contribute
//! their resolved body as a child; an unresolved alias is a leaf.

use crate::db::TypeDatabase;
use crate::def::DefId;
use crate::types::{TypeId, TypeKey};
use rustc_hash::FxHashSet;
use std::sync::Arc;

/// Invoke `f` once per direct child descriptor of `id`.
pub fn for_each_child(db: &dyn TypeDatabase, id: TypeId, f: &mut dyn FnMut(TypeId)) {
    match db.lookup(id) {
        Some(TypeKey::Optional { inner }) | Some(TypeKey::NotUndef { inner }) => f(inner),
        Some(TypeKey::Variant { members }) => {
            for &member in db.type_list(members).iter() {
                f(member);
            }
        }
        Some(TypeKey::Pattern { patterns }) => {
            for &pattern in db.type_list(patterns).iter() {
                f(pattern);
            }
        }
        Some(TypeKey::Array { element, .. }) => f(element),
        Some(TypeKey::Tuple { elements }) => {
            for &element in db.type_list(elements).iter() {
                f(element);
            }
        }
        Some(TypeKey::Hash { key, value, .. }) => {
            f(key);
            f(value);
        }
        Some(TypeKey::Struct { shape }) => {
            for member in &db.struct_shape(shape).members {
                f(member.value);
            }
        }
        Some(TypeKey::Type { inner: Some(inner) }) => f(inner),
        Some(TypeKey::Alias { def }) => {
            if let Some(body) = db.alias_body(def) {
                f(body);
            }
        }
        _ => {}
    }
}

/// Depth-first walk from `root`; `visit` sees every reachable descriptor
/// once. Returning `false` from `visit` stops the walk.
pub fn walk_type_graph(
    db: &dyn TypeDatabase,
    root: TypeId,
    visit: &mut dyn FnMut(TypeId, &TypeKey) -> bool,
) {
    let mut visited = FxHashSet::default();
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        if !visited.insert(id) {
            continue;
        }
        let Some(key) = db.lookup(id) else { continue };
        if !visit(id, &key) {
            return;
        }
        for_each_child(db, id, &mut |child| stack.push(child));
    }
}

/// Diagnostic walk: the forward-reference name of the first unresolved
/// alias reachable from `root`, if any.
///
/// An unresolved reference is not an error here; resolution is an
/// external pass, and this merely reports what that pass still owes.
pub fn find_unresolved(db: &dyn TypeDatabase, root: TypeId) -> Option<Arc<str>> {
    let mut unresolved = None;
    walk_type_graph(db, root, &mut |_, key| {
        if let TypeKey::Alias { def } = key
            && db.alias_body(*def).is_none()
        {
            unresolved = Some(db.alias_name(*def));
            return false;
        }
        true
    });
    unresolved
}

/// Does the graph rooted at `root` reach the alias definition `target`?
/// Used to decide whether a freshly resolved alias is self-referential.
pub fn reaches_definition(db: &dyn TypeDatabase, root: TypeId, target: DefId) -> bool {
    let mut reached = false;
    walk_type_graph(db, root, &mut |_, key| {
        if let TypeKey::Alias { def } = key
            && *def == target
        {
            reached = true;
            return false;
        }
        true
    });
    reached
}
