//! Tab - A container for panes arranged in a split tree

use std::collections::HashMap;

use super::layout::{Layout, SplitDirection};
use super::pane::{Pane, PaneId};

/// Unique identifier for a tab
pub type TabId = u64;

/// A tab containing one or more panes.
///
/// Exactly one pane is active at any time; the layout tree and the pane map
/// always hold the same set of ids.
#[derive(Debug, Clone)]
pub struct Tab {
    /// Unique identifier
    pub id: TabId,
    /// Tab name
    pub name: String,
    /// Layout tree
    layout: Layout,
    /// All panes in this tab
    panes: HashMap<PaneId, Pane>,
    /// Currently active pane
    active_pane: PaneId,
}

impl Tab {
    /// Create a new tab with a single, active pane
    pub fn new(id: TabId, pane_id: PaneId) -> Self {
        let mut pane = Pane::new(pane_id, id);
        pane.active = true;

        let mut panes = HashMap::new();
        panes.insert(pane_id, pane);

        Self {
            id,
            name: format!("tab {}", id),
            layout: Layout::new(pane_id),
            panes,
            active_pane: pane_id,
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn pane_count(&self) -> usize {
        self.panes.len()
    }

    /// Pane ids in document order of the split tree
    pub fn pane_ids(&self) -> Vec<PaneId> {
        self.layout.pane_ids()
    }

    /// Panes in document order
    pub fn panes(&self) -> impl Iterator<Item = &Pane> + '_ {
        self.layout.pane_ids().into_iter().filter_map(move |id| self.panes.get(&id))
    }

    pub fn pane(&self, pane_id: PaneId) -> Option<&Pane> {
        self.panes.get(&pane_id)
    }

    pub fn active_pane_id(&self) -> PaneId {
        self.active_pane
    }

    /// Get the active pane
    pub fn active_pane(&self) -> Option<&Pane> {
        self.panes.get(&self.active_pane)
    }

    /// Split the active pane, placing `new_pane_id` after it along `direction`.
    ///
    /// The new pane becomes active. Returns `None` (tab untouched) if the id is
    /// already taken or the active pane is missing from the tree.
    pub fn split(&mut self, direction: SplitDirection, new_pane_id: PaneId) -> Option<PaneId> {
        if self.panes.contains_key(&new_pane_id) {
            return None;
        }
        if !self.layout.split(self.active_pane, new_pane_id, direction) {
            return None;
        }

        self.panes.insert(new_pane_id, Pane::new(new_pane_id, self.id));
        self.activate_pane(new_pane_id);

        Some(new_pane_id)
    }

    /// Close the active pane and return the newly active one.
    ///
    /// Returns `None` when the active pane is the only pane; the caller then
    /// closes the whole tab.
    pub fn close_active_pane(&mut self) -> Option<PaneId> {
        let pane_id = self.active_pane;
        let successor = self.layout.remove(pane_id)?;

        self.panes.remove(&pane_id);
        self.activate_pane(successor);

        Some(successor)
    }

    /// Make `pane_id` the active pane. Returns false if it is not in this tab.
    pub fn activate_pane(&mut self, pane_id: PaneId) -> bool {
        if !self.panes.contains_key(&pane_id) {
            return false;
        }

        if let Some(pane) = self.panes.get_mut(&self.active_pane) {
            pane.active = false;
        }
        if let Some(pane) = self.panes.get_mut(&pane_id) {
            pane.active = true;
        }
        self.active_pane = pane_id;
        true
    }

    /// Activate the next pane in document order, wrapping around
    pub fn activate_next_pane(&mut self) -> PaneId {
        self.step_active_pane(true)
    }

    /// Activate the previous pane in document order, wrapping around
    pub fn activate_previous_pane(&mut self) -> PaneId {
        self.step_active_pane(false)
    }

    fn step_active_pane(&mut self, forward: bool) -> PaneId {
        let pane_ids = self.layout.pane_ids();
        if let Some(pos) = pane_ids.iter().position(|&id| id == self.active_pane) {
            let len = pane_ids.len();
            let target = if forward {
                (pos + 1) % len
            } else if pos == 0 {
                len - 1
            } else {
                pos - 1
            };
            self.activate_pane(pane_ids[target]);
        }
        self.active_pane
    }

    /// Get display title
    pub fn display_title(&self) -> String {
        match self.active_pane() {
            Some(pane) if self.panes.len() > 1 => {
                format!("{} [{}]", self.name, pane.display_title())
            }
            _ => self.name.clone(),
        }
    }
}
