//! Pane - a single interactive surface within a tab

use super::tab::TabId;

/// Unique identifier for a pane (unique across the whole workspace)
pub type PaneId = u64;

/// A leaf of a tab's split tree
#[derive(Debug, Clone, PartialEq)]
pub struct Pane {
    /// Unique identifier
    pub id: PaneId,
    /// Containing tab (back reference, the tab owns the pane)
    pub tab: TabId,
    /// Whether this is the active pane of its tab
    pub active: bool,
}

impl Pane {
    /// Create a new, inactive pane
    pub fn new(id: PaneId, tab: TabId) -> Self {
        Self {
            id,
            tab,
            active: false,
        }
    }

    /// Get display title
    pub fn display_title(&self) -> String {
        format!("pane {}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_pane_is_inactive() {
        let pane = Pane::new(7, 2);
        assert!(!pane.active);
        assert_eq!(pane.tab, 2);
        assert_eq!(pane.display_title(), "pane 7");
    }
}
