//! Selection set.
//!
//! # Responsibility
//! - Track which entries are selected, in insertion order.
//! - Materialize the display order required by `SelectionOrder`.
//!
//! # Invariants
//! - An id appears at most once.
//! - `toggle` is its own inverse.

use crate::config::SelectionOrder;
use crate::model::entry::EntryId;

#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    // Insertion order; most recent last.
    ids: Vec<EntryId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `id` if absent, removes it if present.
    ///
    /// Returns whether `id` is selected afterwards.
    pub fn toggle(&mut self, id: EntryId) -> bool {
        if self.remove(&id) {
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    /// Removes `id`; returns whether it was selected.
    pub fn remove(&mut self, id: &EntryId) -> bool {
        match self.ids.iter().position(|selected| selected == id) {
            Some(position) => {
                self.ids.remove(position);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, id: &EntryId) -> bool {
        self.ids.contains(id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Ids in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &EntryId> {
        self.ids.iter()
    }

    /// The most recently added id still selected.
    pub fn most_recent(&self) -> Option<&EntryId> {
        self.ids.last()
    }

    /// Drops every id for which `keep` returns false and returns the dropped ids.
    pub fn evict(&mut self, mut keep: impl FnMut(&EntryId) -> bool) -> Vec<EntryId> {
        let mut evicted = Vec::new();
        self.ids.retain(|id| {
            if keep(id) {
                true
            } else {
                evicted.push(id.clone());
                false
            }
        });
        evicted
    }

    /// Ids in display order.
    pub fn ordered(&self, order: SelectionOrder) -> Vec<&EntryId> {
        let mut ids: Vec<&EntryId> = self.ids.iter().collect();
        if order == SelectionOrder::NewestFirst {
            // Stable: equal y keeps insertion order.
            ids.sort_by(|a, b| b.y().total_cmp(&a.y()));
        }
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::SelectionSet;
    use crate::config::SelectionOrder;
    use crate::model::category::CategoryKey;
    use crate::model::entry::EntryId;

    fn id(category: &str, y: f64) -> EntryId {
        EntryId::new(CategoryKey::new(category), y)
    }

    #[test]
    fn toggle_is_its_own_inverse() {
        let mut selection = SelectionSet::new();
        selection.toggle(id("lee", 1.0));

        assert!(selection.toggle(id("park", 2.0)));
        assert!(!selection.toggle(id("park", 2.0)));
        assert!(!selection.contains(&id("park", 2.0)));
        assert!(selection.contains(&id("lee", 1.0)));
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn newest_first_sorts_by_descending_y() {
        let mut selection = SelectionSet::new();
        selection.toggle(id("lee", 5.0));
        selection.toggle(id("park", 30.0));
        selection.toggle(id("main", 12.0));

        let ordered: Vec<String> = selection
            .ordered(SelectionOrder::NewestFirst)
            .into_iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(ordered, ["park@30", "main@12", "lee@5"]);

        let inserted: Vec<String> = selection
            .ordered(SelectionOrder::Insertion)
            .into_iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(inserted, ["lee@5", "park@30", "main@12"]);
    }

    #[test]
    fn equal_y_keeps_insertion_order() {
        let mut selection = SelectionSet::new();
        selection.toggle(id("park", 7.0));
        selection.toggle(id("lee", 7.0));

        let ordered = selection.ordered(SelectionOrder::NewestFirst);
        assert_eq!(ordered[0], &id("park", 7.0));
        assert_eq!(ordered[1], &id("lee", 7.0));
    }

    #[test]
    fn most_recent_tracks_insertion_not_display_order() {
        let mut selection = SelectionSet::new();
        selection.toggle(id("park", 30.0));
        selection.toggle(id("lee", 1.0));
        assert_eq!(selection.most_recent(), Some(&id("lee", 1.0)));

        selection.toggle(id("lee", 1.0));
        assert_eq!(selection.most_recent(), Some(&id("park", 30.0)));
    }

    #[test]
    fn evict_returns_dropped_ids() {
        let mut selection = SelectionSet::new();
        selection.toggle(id("lee", 1.0));
        selection.toggle(id("park", 2.0));
        selection.toggle(id("lee", 3.0));

        let evicted = selection.evict(|id| id.category().as_str() != "lee");
        assert_eq!(evicted, vec![id("lee", 1.0), id("lee", 3.0)]);
        assert_eq!(selection.len(), 1);
    }
}
