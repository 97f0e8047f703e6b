//! Workspace - the ordered tabs of one window plus focus state
//!
//! All workspace navigation goes through this type. Operations that cannot
//! apply (nothing focused, stale target) return a [`NavError`] and leave the
//! workspace exactly as it was, so commands fired from stale menu state are
//! safe to ignore.

use thiserror::Error;
use tracing::debug;

use super::layout::SplitDirection;
use super::pane::{Pane, PaneId};
use super::tab::{Tab, TabId};

/// Why a navigation command did not apply
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavError {
    #[error("workspace has no tabs")]
    EmptyWorkspace,

    /// Split target missing: no focused tab (`None`), or a pane the tree rejects
    #[error("invalid split target{}", .0.map(|id| format!(": pane {}", id)).unwrap_or_default())]
    InvalidTarget(Option<PaneId>),
}

/// Result of closing the focused pane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// A pane closed inside a tab that still has panes
    Pane { closed: PaneId, active: PaneId },
    /// The pane was the tab's last one, so the tab closed too
    Tab { closed: TabId, focused: Option<TabId> },
}

/// Workspace - tabs in display order and the focused index
#[derive(Debug, Clone)]
pub struct Workspace {
    /// All tabs, left to right
    tabs: Vec<Tab>,
    /// Index of the focused tab (meaningful only when `tabs` is non-empty)
    focused: usize,
    /// Next tab ID
    next_tab_id: TabId,
    /// Next pane ID
    next_pane_id: PaneId,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

impl Workspace {
    /// Create an empty workspace
    pub fn new() -> Self {
        Self {
            tabs: Vec::new(),
            focused: 0,
            next_tab_id: 1,
            next_pane_id: 1,
        }
    }

    /// Create a workspace with `count` tabs, the last one focused
    pub fn with_tabs(count: usize) -> Self {
        let mut workspace = Self::new();
        for _ in 0..count {
            workspace.add_tab();
        }
        workspace
    }

    fn alloc_pane_id(&mut self) -> PaneId {
        let id = self.next_pane_id;
        self.next_pane_id += 1;
        id
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Tabs in display order
    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn focused_index(&self) -> Option<usize> {
        (!self.tabs.is_empty()).then_some(self.focused)
    }

    /// Get the focused tab
    pub fn focused_tab(&self) -> Option<&Tab> {
        self.tabs.get(self.focused)
    }

    fn focused_tab_mut(&mut self) -> Result<&mut Tab, NavError> {
        self.tabs.get_mut(self.focused).ok_or(NavError::EmptyWorkspace)
    }

    /// Get the active pane of the focused tab
    pub fn active_pane(&self) -> Option<&Pane> {
        self.focused_tab()?.active_pane()
    }

    /// Append a tab with one pane and focus it
    pub fn add_tab(&mut self) -> TabId {
        let tab_id = self.next_tab_id;
        self.next_tab_id += 1;
        let pane_id = self.alloc_pane_id();

        self.tabs.push(Tab::new(tab_id, pane_id));
        self.focused = self.tabs.len() - 1;

        debug!(tab = tab_id, pane = pane_id, "tab added");
        tab_id
    }

    /// Close the focused tab and all its panes.
    ///
    /// Focus moves to the tab on the left, or to the new leftmost tab when
    /// the first tab closed. Returns the newly focused tab, `None` if the
    /// workspace is now empty.
    pub fn close_focused_tab(&mut self) -> Result<Option<TabId>, NavError> {
        if self.tabs.is_empty() {
            return Err(NavError::EmptyWorkspace);
        }

        let closed = self.tabs.remove(self.focused);
        self.focused = self.focused.saturating_sub(1);

        let focused = self.focused_tab().map(|tab| tab.id);
        debug!(tab = closed.id, ?focused, "tab closed");
        Ok(focused)
    }

    /// Focus the tab to the left, wrapping from the first to the last
    pub fn activate_previous_tab(&mut self) -> Result<TabId, NavError> {
        let len = self.tabs.len();
        if len == 0 {
            return Err(NavError::EmptyWorkspace);
        }
        self.focused = if self.focused == 0 { len - 1 } else { self.focused - 1 };
        Ok(self.tabs[self.focused].id)
    }

    /// Focus the tab to the right, wrapping from the last to the first
    pub fn activate_next_tab(&mut self) -> Result<TabId, NavError> {
        let len = self.tabs.len();
        if len == 0 {
            return Err(NavError::EmptyWorkspace);
        }
        self.focused = (self.focused + 1) % len;
        Ok(self.tabs[self.focused].id)
    }

    /// Split the active pane of the focused tab; the new pane becomes active.
    ///
    /// With no focused tab there is nothing to split, reported as
    /// `InvalidTarget(None)`.
    pub fn add_pane(&mut self, direction: SplitDirection) -> Result<PaneId, NavError> {
        let new_pane_id = self.next_pane_id;
        let tab = self
            .tabs
            .get_mut(self.focused)
            .ok_or(NavError::InvalidTarget(None))?;
        let target = tab.active_pane_id();

        let pane_id = tab
            .split(direction, new_pane_id)
            .ok_or(NavError::InvalidTarget(Some(target)))?;
        self.next_pane_id += 1;

        debug!(target, pane = pane_id, ?direction, "pane split");
        Ok(pane_id)
    }

    /// Activate the previous pane of the focused tab in document order
    pub fn activate_previous_pane(&mut self) -> Result<PaneId, NavError> {
        Ok(self.focused_tab_mut()?.activate_previous_pane())
    }

    /// Activate the next pane of the focused tab in document order
    pub fn activate_next_pane(&mut self) -> Result<PaneId, NavError> {
        Ok(self.focused_tab_mut()?.activate_next_pane())
    }

    /// Close the active pane of the focused tab.
    ///
    /// The sibling subtree takes the closed pane's place; if the pane was the
    /// tab's only pane, the tab closes as in [`Workspace::close_focused_tab`].
    pub fn close_focused_pane(&mut self) -> Result<CloseOutcome, NavError> {
        let tab = self.focused_tab_mut()?;
        let closed = tab.active_pane_id();

        if let Some(active) = tab.close_active_pane() {
            debug!(pane = closed, active, "pane closed");
            return Ok(CloseOutcome::Pane { closed, active });
        }

        let tab_id = tab.id;
        let focused = self.close_focused_tab()?;
        Ok(CloseOutcome::Tab { closed: tab_id, focused })
    }
}
