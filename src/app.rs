//! Action dispatch - binds every [`Action`] to the host window or the workspace.
//!
//! Menu clicks and accelerator presses both end up in [`App::dispatch`]. The
//! workspace never triggers rendering itself; the returned [`Effect`] tells
//! the caller whether to redraw or close the window.

use tracing::{debug, info};

use crate::action::{Accelerator, Action, ActionRegistry, Platform};
use crate::config::WorkspaceConfig;
use crate::menu::{app_menus, Menu, MenuItem, Role};
use crate::wm::{NavError, SplitDirection, Workspace};

pub const REPOSITORY_URL: &str = "https://github.com/user/termdeck";

/// Window-level operations the workspace does not model
pub trait Host {
    fn hide(&mut self);
    fn quit(&mut self);
    fn reload(&mut self);
    fn toggle_full_screen(&mut self);
    fn toggle_dev_tools(&mut self);
    /// Move keyboard focus to the search field
    fn focus_search(&mut self);
    fn perform_role(&mut self, role: Role);
    fn open_external(&mut self, url: &str);
}

/// What the caller should do after a dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Workspace changed; redraw
    Refresh,
    /// Handled by the host
    Host,
    /// Nothing applied (e.g. stale menu state on an empty workspace)
    Ignored,
    /// Last tab closed and the window should follow
    CloseWindow,
}

/// Workspace plus the bindings that drive it
pub struct App {
    workspace: Workspace,
    registry: ActionRegistry,
    settings: WorkspaceConfig,
}

impl App {
    pub fn new(registry: ActionRegistry, settings: WorkspaceConfig) -> Self {
        Self {
            workspace: Workspace::with_tabs(settings.initial_tabs),
            registry,
            settings,
        }
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    pub fn menus(&self) -> Vec<Menu> {
        app_menus(&self.registry)
    }

    /// Discard the workspace and start over, as a window reload does
    pub fn reload(&mut self) {
        info!(tabs = self.settings.initial_tabs, "workspace reloaded");
        self.workspace = Workspace::with_tabs(self.settings.initial_tabs);
    }

    /// Dispatch the action bound to a key chord, `None` if nothing is bound
    pub fn handle_key(
        &mut self,
        chord: &Accelerator,
        platform: Platform,
        host: &mut dyn Host,
    ) -> Option<Effect> {
        let action = self.registry.lookup(chord, platform)?;
        Some(self.dispatch(action, host))
    }

    /// Handle a click on a menu entry
    pub fn activate(&mut self, item: &MenuItem, host: &mut dyn Host) -> Effect {
        match item {
            MenuItem::Action { action, .. } => self.dispatch(*action, host),
            MenuItem::Role { role, .. } => {
                host.perform_role(*role);
                Effect::Host
            }
            MenuItem::Separator => Effect::Ignored,
        }
    }

    pub fn dispatch(&mut self, action: Action, host: &mut dyn Host) -> Effect {
        debug!(%action, "dispatch");

        if let Some(role) = Role::for_action(action) {
            host.perform_role(role);
            return Effect::Host;
        }

        let result = match action {
            Action::AppHide => return host_effect(host, |h| h.hide()),
            Action::AppQuit => return host_effect(host, |h| h.quit()),
            Action::EditFind => return host_effect(host, |h| h.focus_search()),
            Action::ViewReload => return host_effect(host, |h| h.reload()),
            Action::ViewToggleFullScreen => return host_effect(host, |h| h.toggle_full_screen()),
            Action::DeveloperToggleTools => return host_effect(host, |h| h.toggle_dev_tools()),
            Action::HelpRepository => return host_effect(host, |h| h.open_external(REPOSITORY_URL)),

            Action::TabNew => {
                self.workspace.add_tab();
                Ok(())
            }
            Action::TabPrevious => self.workspace.activate_previous_tab().map(drop),
            Action::TabNext => self.workspace.activate_next_tab().map(drop),
            Action::TabClose => self.workspace.close_focused_tab().map(drop),
            Action::PaneSplitHorizontally => {
                self.workspace.add_pane(SplitDirection::Horizontal).map(drop)
            }
            Action::PaneSplitVertically => {
                self.workspace.add_pane(SplitDirection::Vertical).map(drop)
            }
            Action::PanePrevious => self.workspace.activate_previous_pane().map(drop),
            Action::PaneNext => self.workspace.activate_next_pane().map(drop),
            Action::PaneClose => self.workspace.close_focused_pane().map(drop),

            // Role-backed actions were handled above
            Action::AppHideOthers
            | Action::EditUndo
            | Action::EditRedo
            | Action::EditCut
            | Action::EditCopy
            | Action::EditPaste
            | Action::EditSelectAll => return Effect::Host,
        };

        self.settle(action, result)
    }

    fn settle(&self, action: Action, result: Result<(), NavError>) -> Effect {
        match result {
            Err(err) => {
                debug!(%action, %err, "ignored");
                Effect::Ignored
            }
            Ok(()) if self.workspace.is_empty() && self.settings.close_window_on_empty => {
                info!(%action, "last tab closed");
                Effect::CloseWindow
            }
            Ok(()) => Effect::Refresh,
        }
    }
}

fn host_effect(host: &mut dyn Host, f: impl FnOnce(&mut dyn Host)) -> Effect {
    f(host);
    Effect::Host
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{Key, Modifiers};

    #[derive(Default)]
    struct RecordingHost {
        calls: Vec<String>,
    }

    impl Host for RecordingHost {
        fn hide(&mut self) {
            self.calls.push("hide".into());
        }
        fn quit(&mut self) {
            self.calls.push("quit".into());
        }
        fn reload(&mut self) {
            self.calls.push("reload".into());
        }
        fn toggle_full_screen(&mut self) {
            self.calls.push("full_screen".into());
        }
        fn toggle_dev_tools(&mut self) {
            self.calls.push("dev_tools".into());
        }
        fn focus_search(&mut self) {
            self.calls.push("search".into());
        }
        fn perform_role(&mut self, role: Role) {
            self.calls.push(format!("role:{:?}", role));
        }
        fn open_external(&mut self, url: &str) {
            self.calls.push(format!("open:{}", url));
        }
    }

    fn app(close_window_on_empty: bool) -> App {
        App::new(
            ActionRegistry::default(),
            WorkspaceConfig {
                initial_tabs: 1,
                close_window_on_empty,
            },
        )
    }

    #[test]
    fn test_workspace_actions_refresh() {
        let mut app = app(true);
        let mut host = RecordingHost::default();

        assert_eq!(app.dispatch(Action::TabNew, &mut host), Effect::Refresh);
        assert_eq!(app.dispatch(Action::PaneSplitVertically, &mut host), Effect::Refresh);
        assert_eq!(app.dispatch(Action::PanePrevious, &mut host), Effect::Refresh);
        assert_eq!(app.dispatch(Action::TabPrevious, &mut host), Effect::Refresh);

        assert_eq!(app.workspace().len(), 2);
        assert_eq!(app.workspace().tabs()[1].pane_count(), 2);
        assert!(host.calls.is_empty());
    }

    #[test]
    fn test_host_actions_reach_host() {
        let mut app = app(true);
        let mut host = RecordingHost::default();

        for action in [
            Action::AppHide,
            Action::EditFind,
            Action::ViewToggleFullScreen,
            Action::DeveloperToggleTools,
            Action::ViewReload,
            Action::HelpRepository,
            Action::EditCopy,
            Action::AppQuit,
        ] {
            assert_eq!(app.dispatch(action, &mut host), Effect::Host);
        }
        assert_eq!(
            host.calls,
            vec![
                "hide".to_string(),
                "search".into(),
                "full_screen".into(),
                "dev_tools".into(),
                "reload".into(),
                format!("open:{}", REPOSITORY_URL),
                "role:Copy".into(),
                "quit".into(),
            ]
        );
    }

    #[test]
    fn test_closing_last_pane_closes_window() {
        let mut app = app(true);
        let mut host = RecordingHost::default();
        assert_eq!(app.dispatch(Action::PaneClose, &mut host), Effect::CloseWindow);
        assert!(app.workspace().is_empty());
    }

    #[test]
    fn test_empty_workspace_commands_are_ignored() {
        let mut app = app(false);
        let mut host = RecordingHost::default();
        assert_eq!(app.dispatch(Action::TabClose, &mut host), Effect::Refresh);
        assert!(app.workspace().is_empty());

        for action in [
            Action::TabClose,
            Action::TabNext,
            Action::TabPrevious,
            Action::PaneSplitHorizontally,
            Action::PaneNext,
            Action::PaneClose,
        ] {
            assert_eq!(app.dispatch(action, &mut host), Effect::Ignored, "{}", action);
        }
        assert!(app.workspace().is_empty());

        // A new tab brings the workspace back
        assert_eq!(app.dispatch(Action::TabNew, &mut host), Effect::Refresh);
        assert!(app.workspace().active_pane().is_some());
    }

    #[test]
    fn test_menu_click_and_key_take_same_path() {
        let mut by_menu = app(true);
        let mut by_key = app(true);
        let mut host = RecordingHost::default();

        let menus = by_menu.menus();
        let split = menus
            .iter()
            .flat_map(|m| m.items.iter())
            .find(|item| matches!(item, MenuItem::Action { action: Action::PaneSplitHorizontally, .. }))
            .cloned()
            .unwrap();
        assert_eq!(by_menu.activate(&split, &mut host), Effect::Refresh);

        let chord = Accelerator::new(Modifiers::CONTROL, Key::Char('-'));
        assert_eq!(by_key.handle_key(&chord, Platform::Other, &mut host), Some(Effect::Refresh));

        assert_eq!(
            by_menu.workspace().focused_tab().unwrap().layout(),
            by_key.workspace().focused_tab().unwrap().layout()
        );
    }

    #[test]
    fn test_unbound_key() {
        let mut app = app(true);
        let mut host = RecordingHost::default();
        let chord = Accelerator::new(Modifiers::CONTROL | Modifiers::ALT, Key::Char('Q'));
        assert_eq!(app.handle_key(&chord, Platform::Other, &mut host), None);
    }

    #[test]
    fn test_role_only_entry() {
        let mut app = app(true);
        let mut host = RecordingHost::default();
        let about = MenuItem::Role { label: "About termdeck", role: Role::About };
        assert_eq!(app.activate(&about, &mut host), Effect::Host);
        assert_eq!(app.activate(&MenuItem::Separator, &mut host), Effect::Ignored);
        assert_eq!(host.calls, vec!["role:About".to_string()]);
    }

    #[test]
    fn test_reload_resets_workspace() {
        let mut app = app(true);
        let mut host = RecordingHost::default();
        app.dispatch(Action::TabNew, &mut host);
        app.dispatch(Action::PaneSplitHorizontally, &mut host);
        app.reload();
        assert_eq!(app.workspace().len(), 1);
        assert_eq!(app.workspace().focused_tab().unwrap().pane_count(), 1);
    }
}
