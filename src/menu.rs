//! Application menu definitions.
//!
//! Declarative menu tree handed to whatever renders it (the native menu bar
//! of a windowed host, or `--print-menu` in the terminal front-end). Every
//! accelerator shown here comes from the [`ActionRegistry`].

use unicode_width::UnicodeWidthStr;

use crate::action::{Accelerator, Action, ActionRegistry, Platform, RegistryError};

/// Operations the host performs natively, without going through the workspace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    About,
    HideOthers,
    Undo,
    Redo,
    Cut,
    Copy,
    Paste,
    SelectAll,
}

impl Role {
    /// Native role backing an action, if any
    pub fn for_action(action: Action) -> Option<Role> {
        match action {
            Action::AppHideOthers => Some(Role::HideOthers),
            Action::EditUndo => Some(Role::Undo),
            Action::EditRedo => Some(Role::Redo),
            Action::EditCut => Some(Role::Cut),
            Action::EditCopy => Some(Role::Copy),
            Action::EditPaste => Some(Role::Paste),
            Action::EditSelectAll => Some(Role::SelectAll),
            _ => None,
        }
    }
}

/// A single entry in a menu
#[derive(Debug, Clone, PartialEq)]
pub enum MenuItem {
    /// Entry bound to an action, optionally backed by a native role
    Action {
        label: &'static str,
        accelerator: Accelerator,
        action: Action,
        role: Option<Role>,
    },
    /// Role-only entry without an accelerator
    Role { label: &'static str, role: Role },
    Separator,
}

impl MenuItem {
    fn action(registry: &ActionRegistry, action: Action) -> Self {
        MenuItem::Action {
            label: registry.describe(action),
            accelerator: registry.accelerator_for(action),
            action,
            role: Role::for_action(action),
        }
    }

    pub fn label(&self) -> Option<&'static str> {
        match self {
            MenuItem::Action { label, .. } | MenuItem::Role { label, .. } => Some(*label),
            MenuItem::Separator => None,
        }
    }

    /// Host accelerator string, e.g. `CmdOrCtrl+T`
    pub fn accelerator_string(&self) -> Option<String> {
        match self {
            MenuItem::Action { accelerator, .. } => Some(accelerator.to_string()),
            _ => None,
        }
    }
}

/// A top-level menu
#[derive(Debug, Clone, PartialEq)]
pub struct Menu {
    pub label: &'static str,
    pub items: Vec<MenuItem>,
}

/// Build the application menus
pub fn app_menus(registry: &ActionRegistry) -> Vec<Menu> {
    let item = |action| MenuItem::action(registry, action);

    vec![
        Menu {
            label: "termdeck",
            items: vec![
                MenuItem::Role { label: "About termdeck", role: Role::About },
                MenuItem::Separator,
                item(Action::AppHide),
                item(Action::AppHideOthers),
                MenuItem::Separator,
                item(Action::AppQuit),
            ],
        },
        Menu {
            label: "Edit",
            items: vec![
                item(Action::EditUndo),
                item(Action::EditRedo),
                MenuItem::Separator,
                item(Action::EditFind),
                MenuItem::Separator,
                item(Action::EditCut),
                item(Action::EditCopy),
                item(Action::EditPaste),
                item(Action::EditSelectAll),
            ],
        },
        Menu {
            label: "View",
            items: vec![
                item(Action::ViewReload),
                item(Action::ViewToggleFullScreen),
                item(Action::DeveloperToggleTools),
            ],
        },
        Menu {
            label: "Tab",
            items: vec![
                item(Action::TabNew),
                MenuItem::Separator,
                item(Action::TabPrevious),
                item(Action::TabNext),
                MenuItem::Separator,
                item(Action::TabClose),
            ],
        },
        Menu {
            label: "Pane",
            items: vec![
                item(Action::PaneSplitHorizontally),
                item(Action::PaneSplitVertically),
                MenuItem::Separator,
                item(Action::PanePrevious),
                item(Action::PaneNext),
                MenuItem::Separator,
                item(Action::PaneClose),
            ],
        },
        Menu {
            label: "Help",
            items: vec![item(Action::HelpRepository)],
        },
    ]
}

/// Actions reachable from the menus, in menu order
pub fn visible_actions(menus: &[Menu]) -> Vec<(Action, Accelerator)> {
    menus
        .iter()
        .flat_map(|menu| menu.items.iter())
        .filter_map(|item| match item {
            MenuItem::Action { action, accelerator, .. } => Some((*action, *accelerator)),
            _ => None,
        })
        .collect()
}

/// Reject two visible entries sharing an accelerator on `platform`
pub fn check_accelerators(menus: &[Menu], platform: Platform) -> Result<(), RegistryError> {
    let visible = visible_actions(menus);
    for (i, &(first, accel)) in visible.iter().enumerate() {
        let resolved = accel.resolve(platform);
        if let Some(&(second, _)) = visible[i + 1..]
            .iter()
            .find(|(_, other)| other.resolve(platform) == resolved)
        {
            return Err(RegistryError::Conflict {
                first,
                second,
                accelerator: accel,
                platform,
            });
        }
    }
    Ok(())
}

/// Plain-text rendering of the menu tree with aligned accelerator hints
pub fn render_text(menus: &[Menu], platform: Platform) -> String {
    let mut out = String::new();
    for menu in menus {
        out.push_str(menu.label);
        out.push('\n');

        let label_width = menu
            .items
            .iter()
            .filter_map(MenuItem::label)
            .map(|label| label.width())
            .max()
            .unwrap_or(0);

        for item in &menu.items {
            match item {
                MenuItem::Separator => {
                    out.push_str("  ");
                    out.push_str(&"─".repeat(label_width));
                }
                MenuItem::Role { label, .. } => {
                    out.push_str("  ");
                    out.push_str(label);
                }
                MenuItem::Action { label, accelerator, .. } => {
                    let pad = label_width - label.width();
                    out.push_str("  ");
                    out.push_str(label);
                    out.push_str(&" ".repeat(pad + 4));
                    out.push_str(&accelerator.display(platform));
                }
            }
            out.push('\n');
        }
    }
    out
}
