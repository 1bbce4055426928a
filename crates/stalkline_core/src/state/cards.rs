//! Card reference side-table.
//!
//! Maps a selected entry to the on-screen rectangle of its detail card, as
//! last reported by the host. The projector reads it; it never owns entries.

use crate::model::entry::EntryId;
use crate::projection::ScreenRect;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct CardLayout {
    rects: HashMap<EntryId, ScreenRect>,
}

impl CardLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, id: EntryId, rect: ScreenRect) {
        self.rects.insert(id, rect);
    }

    pub fn remove(&mut self, id: &EntryId) -> Option<ScreenRect> {
        self.rects.remove(id)
    }

    pub fn get(&self, id: &EntryId) -> Option<&ScreenRect> {
        self.rects.get(id)
    }

    pub fn clear(&mut self) {
        self.rects.clear();
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}
