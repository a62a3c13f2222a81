//! Normalized entity storage: a lookup table plus an ordered id list.
//!
//! Every mutation returns a new [`EntityStore`] snapshot. Records that did
//! not change, and the id list when the order did not change, are shared
//! with the previous snapshot through `Arc`, so consumers can detect
//! changes with `Arc::ptr_eq`.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

/// A record that can live in an [`EntityStore`].
pub trait Entity: Clone + PartialEq {
    type Id: Clone + Eq + Hash + fmt::Debug;

    fn id(&self) -> &Self::Id;

    /// Ordering of the id list.
    fn sort_cmp(a: &Self, b: &Self) -> Ordering;

    /// Merge an incoming copy of the same record into `self`.
    fn merge(&mut self, incoming: Self);
}

pub struct EntityStore<T: Entity> {
    ids: Arc<Vec<T::Id>>,
    entities: Arc<HashMap<T::Id, Arc<T>>>,
}

impl<T: Entity> EntityStore<T> {
    pub fn new() -> Self {
        Self {
            ids: Arc::new(Vec::new()),
            entities: Arc::new(HashMap::new()),
        }
    }

    /// Ids in sort order.
    pub fn ids(&self) -> &Arc<Vec<T::Id>> {
        &self.ids
    }

    pub fn entities(&self) -> &Arc<HashMap<T::Id, Arc<T>>> {
        &self.entities
    }

    pub fn get(&self, id: &T::Id) -> Option<&Arc<T>> {
        self.entities.get(id)
    }

    /// All records in sort order.
    pub fn all(&self) -> Vec<Arc<T>> {
        self.ids
            .iter()
            .filter_map(|id| self.entities.get(id).cloned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Whether both snapshots share the same underlying storage.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.ids, &other.ids) && Arc::ptr_eq(&self.entities, &other.entities)
    }

    /// Insert records whose id is absent and merge the others into the
    /// stored copy.
    pub fn upsert_many<I>(&self, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut entities: Option<HashMap<T::Id, Arc<T>>> = None;
        let mut ids: Vec<T::Id> = (*self.ids).clone();

        for item in items {
            let map = entities.get_or_insert_with(|| (*self.entities).clone());
            match map.get_mut(item.id()) {
                Some(existing) => {
                    let mut merged = T::clone(existing);
                    merged.merge(item);
                    if merged != **existing {
                        *existing = Arc::new(merged);
                    }
                }
                None => {
                    ids.push(item.id().clone());
                    map.insert(item.id().clone(), Arc::new(item));
                }
            }
        }

        match entities {
            Some(map) => self.rebuild(ids, map),
            None => self.clone(),
        }
    }

    /// Single-record form of [`EntityStore::upsert_many`].
    pub fn add_one(&self, item: T) -> Self {
        self.upsert_many(std::iter::once(item))
    }

    /// Apply `f` to the record with `id`. Absent ids leave the store untouched.
    pub fn update<F>(&self, id: &T::Id, f: F) -> Self
    where
        F: FnOnce(&mut T),
    {
        let Some(existing) = self.entities.get(id) else {
            return self.clone();
        };

        let mut updated = T::clone(existing);
        f(&mut updated);
        if updated == **existing {
            return self.clone();
        }

        let mut map = (*self.entities).clone();
        map.insert(id.clone(), Arc::new(updated));
        self.rebuild((*self.ids).clone(), map)
    }

    fn rebuild(&self, mut ids: Vec<T::Id>, map: HashMap<T::Id, Arc<T>>) -> Self {
        // Unchanged records keep their Arc, so equal maps mean nothing moved.
        let unchanged = map.len() == self.entities.len()
            && map
                .iter()
                .all(|(id, rec)| self.entities.get(id).is_some_and(|old| Arc::ptr_eq(old, rec)));
        if unchanged {
            return self.clone();
        }

        ids.sort_by(|a, b| match (map.get(a), map.get(b)) {
            (Some(a), Some(b)) => T::sort_cmp(a, b),
            _ => Ordering::Equal,
        });

        let ids = if ids == *self.ids {
            Arc::clone(&self.ids)
        } else {
            Arc::new(ids)
        };

        Self {
            ids,
            entities: Arc::new(map),
        }
    }
}

impl<T: Entity> Clone for EntityStore<T> {
    fn clone(&self) -> Self {
        Self {
            ids: Arc::clone(&self.ids),
            entities: Arc::clone(&self.entities),
        }
    }
}

impl<T: Entity> Default for EntityStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity + fmt::Debug> fmt::Debug for EntityStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityStore")
            .field("ids", &self.ids)
            .field("entities", &self.entities)
            .finish()
    }
}
