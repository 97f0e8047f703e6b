//! Workspace model - tabs of split panes and their navigation.
//!
//! - **workspace**: `Workspace`, the ordered tabs of one window plus focus
//! - **tab**: Individual tabs owning a split tree of panes
//! - **pane**: Leaf surfaces inside a tab
//! - **layout**: Binary split tree (split, remove, traversal, geometry)
//!
//! # Module Hierarchy
//!
//! ```text
//! wm/
//! ├── mod.rs        - Module exports
//! ├── workspace.rs  - Workspace (tabs + focus, single writer)
//! ├── tab.rs        - Tab (split tree + active pane)
//! ├── pane.rs       - Pane
//! └── layout.rs     - Split tree
//! ```

pub mod layout;
pub mod pane;
pub mod tab;
pub mod workspace;

pub use layout::{Layout, SplitDirection};
pub use pane::{Pane, PaneId};
pub use tab::{Tab, TabId};
pub use workspace::{CloseOutcome, NavError, Workspace};
