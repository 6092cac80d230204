//! Declarative entity filters.
//!
//! A [`Filter`] is a composable predicate over component kinds, evaluated
//! against the live store on every call. There is no caching or index:
//! results always reflect the store as it is at the moment of the call, so
//! a system that mutates the store mid-tick sees its own changes in the
//! next query.

use crate::store::{ComponentKind, EntityId, Store};

/// Composable component-presence predicate.
#[derive(Debug, Clone)]
pub enum Filter {
    /// Matches entities carrying every listed component kind.
    HasAll(Vec<ComponentKind>),
    /// Matches when both sub-filters match.
    And(Box<Filter>, Box<Filter>),
    /// Matches when either sub-filter matches.
    Or(Box<Filter>, Box<Filter>),
    /// Matches when the sub-filter does not.
    Not(Box<Filter>),
}

impl Filter {
    /// Filter for entities carrying all of the given component kinds.
    #[must_use]
    pub fn has_all(kinds: &[ComponentKind]) -> Self {
        Self::HasAll(kinds.to_vec())
    }

    /// Filter for entities carrying a single component kind.
    #[must_use]
    pub fn has(kind: ComponentKind) -> Self {
        Self::HasAll(vec![kind])
    }

    /// Conjunction with another filter.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        Self::And(Box::new(self), Box::new(other))
    }

    /// Disjunction with another filter.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        Self::Or(Box::new(self), Box::new(other))
    }

    /// Negation.
    #[must_use]
    pub fn not(self) -> Self {
        Self::Not(Box::new(self))
    }

    /// Evaluate the filter against one entity.
    #[must_use]
    pub fn matches(&self, store: &Store, id: EntityId) -> bool {
        match self {
            Self::HasAll(kinds) => kinds.iter().all(|&kind| store.has(id, kind)),
            Self::And(a, b) => a.matches(store, id) && b.matches(store, id),
            Self::Or(a, b) => a.matches(store, id) || b.matches(store, id),
            Self::Not(inner) => store.contains(id) && !inner.matches(store, id),
        }
    }

    /// All currently matching entities, in store iteration order.
    #[must_use]
    pub fn entities(&self, store: &Store) -> Vec<EntityId> {
        store
            .ids()
            .into_iter()
            .filter(|&id| self.matches(store, id))
            .collect()
    }

    /// Visit every currently matching entity.
    pub fn for_each(&self, store: &Store, mut visit: impl FnMut(EntityId)) {
        for id in store.ids() {
            if self.matches(store, id) {
                visit(id);
            }
        }
    }

    /// First matching entity in store iteration order, if any.
    #[must_use]
    pub fn first(&self, store: &Store) -> Option<EntityId> {
        store.ids().into_iter().find(|&id| self.matches(store, id))
    }
}
