//! Action registry - the closed set of user commands and their accelerators.
//!
//! Both the menu builder and the raw key-event path read accelerators from
//! [`ActionRegistry`], so what the menu shows and what the keyboard does
//! always agree.
//!
//! # Accelerator format
//!
//! ```text
//! CmdOrCtrl+Shift+Z     platform command + shift + Z
//! CmdOrCtrl+Alt+K       platform command + alt + K
//! F11                   function key, no modifiers
//! CmdOrCtrl+Plus        `+` is spelled `Plus`
//! ```
//!
//! Modifiers are always rendered in the order `CmdOrCtrl`, `Ctrl`, `Alt`,
//! `Shift`, followed by the key token.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use thiserror::Error;

bitflags! {
    /// Modifier keys of an accelerator
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Cmd on macOS, Ctrl everywhere else
        const COMMAND = 0b0001;
        const CONTROL = 0b0010;
        const ALT     = 0b0100;
        const SHIFT   = 0b1000;
    }
}

/// Platform an accelerator is resolved for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Platform {
    MacOs,
    Other,
}

impl Platform {
    pub const ALL: [Platform; 2] = [Platform::MacOs, Platform::Other];

    /// Platform this binary was built for
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Other
        }
    }
}

/// A single key token
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Printable character (letters are stored upper-case)
    Char(char),
    /// Function key F1..F24
    F(u8),
    Left,
    Right,
    Up,
    Down,
    Tab,
    Enter,
    Escape,
    Backspace,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    Space,
}

impl Key {
    /// Build a character key, normalizing letters and space
    pub fn char(ch: char) -> Self {
        if ch == ' ' {
            Key::Space
        } else {
            Key::Char(ch.to_ascii_uppercase())
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char('+') => f.write_str("Plus"),
            Key::Char(ch) => write!(f, "{}", ch),
            Key::F(n) => write!(f, "F{}", n),
            Key::Left => f.write_str("Left"),
            Key::Right => f.write_str("Right"),
            Key::Up => f.write_str("Up"),
            Key::Down => f.write_str("Down"),
            Key::Tab => f.write_str("Tab"),
            Key::Enter => f.write_str("Enter"),
            Key::Escape => f.write_str("Esc"),
            Key::Backspace => f.write_str("Backspace"),
            Key::Delete => f.write_str("Delete"),
            Key::Home => f.write_str("Home"),
            Key::End => f.write_str("End"),
            Key::PageUp => f.write_str("PageUp"),
            Key::PageDown => f.write_str("PageDown"),
            Key::Space => f.write_str("Space"),
        }
    }
}

impl FromStr for Key {
    type Err = ParseAcceleratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            return Ok(Key::char(ch));
        }

        let key = match s.to_ascii_lowercase().as_str() {
            "plus" => Key::Char('+'),
            "space" => Key::Space,
            "left" => Key::Left,
            "right" => Key::Right,
            "up" => Key::Up,
            "down" => Key::Down,
            "tab" => Key::Tab,
            "enter" | "return" => Key::Enter,
            "esc" | "escape" => Key::Escape,
            "backspace" => Key::Backspace,
            "delete" | "del" => Key::Delete,
            "home" => Key::Home,
            "end" => Key::End,
            "pageup" => Key::PageUp,
            "pagedown" => Key::PageDown,
            other => {
                let n = other
                    .strip_prefix('f')
                    .and_then(|n| n.parse::<u8>().ok())
                    .filter(|n| (1..=24).contains(n));
                match n {
                    Some(n) => Key::F(n),
                    None => return Err(ParseAcceleratorError::UnknownKey(s.to_string())),
                }
            }
        };
        Ok(key)
    }
}

/// Error parsing an accelerator string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseAcceleratorError {
    #[error("accelerator is empty")]
    Empty,

    #[error("accelerator has no key token")]
    MissingKey,

    #[error("unknown modifier `{0}`")]
    UnknownModifier(String),

    #[error("unknown key `{0}`")]
    UnknownKey(String),
}

/// Keyboard accelerator: modifier set plus one key
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Accelerator {
    pub modifiers: Modifiers,
    pub key: Key,
}

impl Accelerator {
    pub const fn new(modifiers: Modifiers, key: Key) -> Self {
        Self { modifiers, key }
    }

    /// Accelerator with the platform command modifier
    const fn cmd(key: Key) -> Self {
        Self::new(Modifiers::COMMAND, key)
    }

    /// Map `COMMAND` onto the physical modifier of `platform`.
    ///
    /// On macOS `COMMAND` stays as the Cmd key; elsewhere it becomes `CONTROL`.
    pub fn resolve(self, platform: Platform) -> Self {
        match platform {
            Platform::MacOs => self,
            Platform::Other => {
                let mut modifiers = self.modifiers;
                if modifiers.contains(Modifiers::COMMAND) {
                    modifiers.remove(Modifiers::COMMAND);
                    modifiers.insert(Modifiers::CONTROL);
                }
                Self::new(modifiers, self.key)
            }
        }
    }

    /// User-facing hint, e.g. `⇧⌘Z` on macOS or `Ctrl+Shift+Z` elsewhere
    pub fn display(&self, platform: Platform) -> String {
        let resolved = self.resolve(platform);
        let mods = resolved.modifiers;
        match platform {
            Platform::MacOs => {
                let mut out = String::new();
                if mods.contains(Modifiers::CONTROL) {
                    out.push('⌃');
                }
                if mods.contains(Modifiers::ALT) {
                    out.push('⌥');
                }
                if mods.contains(Modifiers::SHIFT) {
                    out.push('⇧');
                }
                if mods.contains(Modifiers::COMMAND) {
                    out.push('⌘');
                }
                match resolved.key {
                    Key::Char('+') => out.push('+'),
                    key => out.push_str(&key.to_string()),
                }
                out
            }
            Platform::Other => {
                let mut parts: Vec<String> = Vec::new();
                if mods.contains(Modifiers::CONTROL) {
                    parts.push("Ctrl".into());
                }
                if mods.contains(Modifiers::ALT) {
                    parts.push("Alt".into());
                }
                if mods.contains(Modifiers::SHIFT) {
                    parts.push("Shift".into());
                }
                parts.push(resolved.key.to_string());
                parts.join("+")
            }
        }
    }
}

impl fmt::Display for Accelerator {
    /// Host accelerator string, e.g. `CmdOrCtrl+Shift+Z`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const TOKENS: [(Modifiers, &str); 4] = [
            (Modifiers::COMMAND, "CmdOrCtrl"),
            (Modifiers::CONTROL, "Ctrl"),
            (Modifiers::ALT, "Alt"),
            (Modifiers::SHIFT, "Shift"),
        ];
        for (flag, token) in TOKENS {
            if self.modifiers.contains(flag) {
                write!(f, "{}+", token)?;
            }
        }
        write!(f, "{}", self.key)
    }
}

impl FromStr for Accelerator {
    type Err = ParseAcceleratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseAcceleratorError::Empty);
        }

        let mut tokens: Vec<&str> = s.split('+').map(str::trim).collect();
        let key = match tokens.pop() {
            Some(token) if !token.is_empty() => token.parse::<Key>()?,
            _ => return Err(ParseAcceleratorError::MissingKey),
        };

        let mut modifiers = Modifiers::empty();
        for token in tokens {
            let flag = match token.to_ascii_lowercase().as_str() {
                "cmdorctrl" | "commandorcontrol" | "cmd" | "command" => Modifiers::COMMAND,
                "ctrl" | "control" => Modifiers::CONTROL,
                "alt" | "option" => Modifiers::ALT,
                "shift" => Modifiers::SHIFT,
                _ => return Err(ParseAcceleratorError::UnknownModifier(token.to_string())),
            };
            modifiers.insert(flag);
        }

        Ok(Self::new(modifiers, key))
    }
}

/// Subsystem an action belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionGroup {
    App,
    Edit,
    View,
    Developer,
    Tab,
    Pane,
    Help,
}

impl ActionGroup {
    pub fn label(self) -> &'static str {
        match self {
            ActionGroup::App => "App",
            ActionGroup::Edit => "Edit",
            ActionGroup::View => "View",
            ActionGroup::Developer => "Developer",
            ActionGroup::Tab => "Tab",
            ActionGroup::Pane => "Pane",
            ActionGroup::Help => "Help",
        }
    }
}

/// Semantic user action
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Action {
    AppHide,
    AppHideOthers,
    AppQuit,
    EditUndo,
    EditRedo,
    EditFind,
    EditCut,
    EditCopy,
    EditPaste,
    EditSelectAll,
    ViewReload,
    ViewToggleFullScreen,
    DeveloperToggleTools,
    TabNew,
    TabPrevious,
    TabNext,
    TabClose,
    PaneSplitHorizontally,
    PaneSplitVertically,
    PanePrevious,
    PaneNext,
    PaneClose,
    HelpRepository,
}

impl Action {
    pub const COUNT: usize = 23;

    /// Every action, in declaration order
    pub const ALL: [Action; Action::COUNT] = [
        Action::AppHide,
        Action::AppHideOthers,
        Action::AppQuit,
        Action::EditUndo,
        Action::EditRedo,
        Action::EditFind,
        Action::EditCut,
        Action::EditCopy,
        Action::EditPaste,
        Action::EditSelectAll,
        Action::ViewReload,
        Action::ViewToggleFullScreen,
        Action::DeveloperToggleTools,
        Action::TabNew,
        Action::TabPrevious,
        Action::TabNext,
        Action::TabClose,
        Action::PaneSplitHorizontally,
        Action::PaneSplitVertically,
        Action::PanePrevious,
        Action::PaneNext,
        Action::PaneClose,
        Action::HelpRepository,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// Stable identifier used in config files and logs
    pub fn name(self) -> &'static str {
        match self {
            Action::AppHide => "app_hide",
            Action::AppHideOthers => "app_hide_others",
            Action::AppQuit => "app_quit",
            Action::EditUndo => "edit_undo",
            Action::EditRedo => "edit_redo",
            Action::EditFind => "edit_find",
            Action::EditCut => "edit_cut",
            Action::EditCopy => "edit_copy",
            Action::EditPaste => "edit_paste",
            Action::EditSelectAll => "edit_select_all",
            Action::ViewReload => "view_reload",
            Action::ViewToggleFullScreen => "view_toggle_full_screen",
            Action::DeveloperToggleTools => "developer_toggle_tools",
            Action::TabNew => "tab_new",
            Action::TabPrevious => "tab_previous",
            Action::TabNext => "tab_next",
            Action::TabClose => "tab_close",
            Action::PaneSplitHorizontally => "pane_split_horizontally",
            Action::PaneSplitVertically => "pane_split_vertically",
            Action::PanePrevious => "pane_previous",
            Action::PaneNext => "pane_next",
            Action::PaneClose => "pane_close",
            Action::HelpRepository => "help_repository",
        }
    }

    /// Menu label
    pub fn label(self) -> &'static str {
        match self {
            Action::AppHide => "Hide termdeck",
            Action::AppHideOthers => "Hide Others",
            Action::AppQuit => "Quit",
            Action::EditUndo => "Undo",
            Action::EditRedo => "Redo",
            Action::EditFind => "Find",
            Action::EditCut => "Cut",
            Action::EditCopy => "Copy",
            Action::EditPaste => "Paste",
            Action::EditSelectAll => "Select All",
            Action::ViewReload => "Reload",
            Action::ViewToggleFullScreen => "Toggle Full Screen",
            Action::DeveloperToggleTools => "Toggle Developer Tools",
            Action::TabNew => "New Tab",
            Action::TabPrevious | Action::PanePrevious => "Previous",
            Action::TabNext | Action::PaneNext => "Next",
            Action::TabClose | Action::PaneClose => "Close",
            Action::PaneSplitHorizontally => "Split Horizontally",
            Action::PaneSplitVertically => "Split Vertically",
            Action::HelpRepository => "GitHub Repository",
        }
    }

    pub fn group(self) -> ActionGroup {
        match self {
            Action::AppHide | Action::AppHideOthers | Action::AppQuit => ActionGroup::App,
            Action::EditUndo
            | Action::EditRedo
            | Action::EditFind
            | Action::EditCut
            | Action::EditCopy
            | Action::EditPaste
            | Action::EditSelectAll => ActionGroup::Edit,
            Action::ViewReload | Action::ViewToggleFullScreen => ActionGroup::View,
            Action::DeveloperToggleTools => ActionGroup::Developer,
            Action::TabNew | Action::TabPrevious | Action::TabNext | Action::TabClose => {
                ActionGroup::Tab
            }
            Action::PaneSplitHorizontally
            | Action::PaneSplitVertically
            | Action::PanePrevious
            | Action::PaneNext
            | Action::PaneClose => ActionGroup::Pane,
            Action::HelpRepository => ActionGroup::Help,
        }
    }

    /// Label with its group, for places without menu context ("Pane: Close")
    pub fn qualified_label(self) -> String {
        format!("{}: {}", self.group().label(), self.label())
    }

    /// Built-in accelerator
    pub fn default_accelerator(self) -> Accelerator {
        use Key::{Char, F};
        match self {
            Action::AppHide => Accelerator::cmd(Char('H')),
            Action::AppHideOthers => {
                Accelerator::new(Modifiers::COMMAND.union(Modifiers::ALT), Char('H'))
            }
            Action::AppQuit => Accelerator::cmd(Char('Q')),
            Action::EditUndo => Accelerator::cmd(Char('Z')),
            Action::EditRedo => {
                Accelerator::new(Modifiers::COMMAND.union(Modifiers::SHIFT), Char('Z'))
            }
            Action::EditFind => Accelerator::cmd(Char('F')),
            Action::EditCut => Accelerator::cmd(Char('X')),
            Action::EditCopy => Accelerator::cmd(Char('C')),
            Action::EditPaste => Accelerator::cmd(Char('V')),
            Action::EditSelectAll => Accelerator::cmd(Char('A')),
            Action::ViewReload => Accelerator::cmd(Char('R')),
            Action::ViewToggleFullScreen => Accelerator::new(Modifiers::empty(), F(11)),
            Action::DeveloperToggleTools => {
                Accelerator::new(Modifiers::COMMAND.union(Modifiers::ALT), Char('I'))
            }
            Action::TabNew => Accelerator::cmd(Char('T')),
            Action::TabPrevious => Accelerator::cmd(Char('K')),
            Action::TabNext => Accelerator::cmd(Char('J')),
            Action::TabClose => Accelerator::cmd(Char('W')),
            Action::PaneSplitHorizontally => Accelerator::cmd(Char('-')),
            Action::PaneSplitVertically => Accelerator::cmd(Char('\\')),
            Action::PanePrevious => {
                Accelerator::new(Modifiers::COMMAND.union(Modifiers::ALT), Char('K'))
            }
            Action::PaneNext => {
                Accelerator::new(Modifiers::COMMAND.union(Modifiers::ALT), Char('J'))
            }
            Action::PaneClose => Accelerator::cmd(Char('D')),
            Action::HelpRepository => Accelerator::new(Modifiers::empty(), F(1)),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Action {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .iter()
            .copied()
            .find(|action| action.name() == s)
            .ok_or_else(|| RegistryError::UnknownAction(s.to_string()))
    }
}

/// Errors building or validating an [`ActionRegistry`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("unknown action `{0}`")]
    UnknownAction(String),

    #[error("invalid accelerator `{input}` for `{action}`: {source}")]
    InvalidAccelerator {
        action: Action,
        input: String,
        #[source]
        source: ParseAcceleratorError,
    },

    #[error("`{first}` and `{second}` are both bound to {accelerator} on {platform:?}")]
    Conflict {
        first: Action,
        second: Action,
        accelerator: Accelerator,
        platform: Platform,
    },
}

/// One accelerator per action; the single source of truth for menus and key dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRegistry {
    bindings: [Accelerator; Action::COUNT],
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self {
            bindings: Action::ALL.map(Action::default_accelerator),
        }
    }
}

impl ActionRegistry {
    /// Built-in bindings with `overrides` (action name -> accelerator string) applied.
    ///
    /// The resulting table is validated before it is returned.
    pub fn with_overrides<I, K, V>(overrides: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut registry = Self::default();
        for (name, accel) in overrides {
            let action: Action = name.as_ref().parse()?;
            let accelerator = accel.as_ref().parse::<Accelerator>().map_err(|source| {
                RegistryError::InvalidAccelerator {
                    action,
                    input: accel.as_ref().to_string(),
                    source,
                }
            })?;
            tracing::debug!(%action, %accelerator, "keybinding override");
            registry.bindings[action.index()] = accelerator;
        }
        registry.validate()?;
        Ok(registry)
    }

    pub fn accelerator_for(&self, action: Action) -> Accelerator {
        self.bindings[action.index()]
    }

    pub fn describe(&self, action: Action) -> &'static str {
        action.label()
    }

    /// All (action, accelerator) pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (Action, Accelerator)> + '_ {
        Action::ALL.iter().map(move |&action| (action, self.accelerator_for(action)))
    }

    /// Action bound to a key chord on `platform`
    pub fn lookup(&self, chord: &Accelerator, platform: Platform) -> Option<Action> {
        let chord = chord.resolve(platform);
        self.iter()
            .find(|(_, accel)| accel.resolve(platform) == chord)
            .map(|(action, _)| action)
    }

    /// Reject two actions sharing an accelerator on any platform
    pub fn validate(&self) -> Result<(), RegistryError> {
        for platform in Platform::ALL {
            for (i, &first) in Action::ALL.iter().enumerate() {
                let accelerator = self.accelerator_for(first).resolve(platform);
                let clash = Action::ALL[i + 1..]
                    .iter()
                    .find(|&&other| self.accelerator_for(other).resolve(platform) == accelerator);
                if let Some(&second) = clash {
                    return Err(RegistryError::Conflict {
                        first,
                        second,
                        accelerator: self.accelerator_for(first),
                        platform,
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_in_declaration_order() {
        for (i, action) in Action::ALL.iter().enumerate() {
            assert_eq!(action.index(), i, "{} out of place", action);
        }
    }

    #[test]
    fn test_default_table_is_valid() {
        let registry = ActionRegistry::default();
        assert_eq!(registry.validate(), Ok(()));
        for (action, accel) in registry.iter() {
            assert!(!accel.to_string().is_empty(), "{} has no accelerator", action);
        }
    }

    #[test]
    fn test_host_string_format() {
        let registry = ActionRegistry::default();
        assert_eq!(registry.accelerator_for(Action::TabNew).to_string(), "CmdOrCtrl+T");
        assert_eq!(registry.accelerator_for(Action::EditRedo).to_string(), "CmdOrCtrl+Shift+Z");
        assert_eq!(registry.accelerator_for(Action::PaneNext).to_string(), "CmdOrCtrl+Alt+J");
        assert_eq!(
            registry.accelerator_for(Action::ViewToggleFullScreen).to_string(),
            "F11"
        );
        assert_eq!(
            registry.accelerator_for(Action::PaneSplitVertically).to_string(),
            "CmdOrCtrl+\\"
        );
    }

    #[test]
    fn test_parse_accelerator() {
        let accel: Accelerator = "CommandOrControl+shift+z".parse().unwrap();
        assert_eq!(accel, Accelerator::new(Modifiers::COMMAND | Modifiers::SHIFT, Key::Char('Z')));

        let accel: Accelerator = "Ctrl+Option+Plus".parse().unwrap();
        assert_eq!(accel, Accelerator::new(Modifiers::CONTROL | Modifiers::ALT, Key::Char('+')));
        assert_eq!(accel.to_string(), "Ctrl+Alt+Plus");

        let accel: Accelerator = "f5".parse().unwrap();
        assert_eq!(accel, Accelerator::new(Modifiers::empty(), Key::F(5)));

        assert_eq!("".parse::<Accelerator>(), Err(ParseAcceleratorError::Empty));
        assert_eq!("Ctrl+".parse::<Accelerator>(), Err(ParseAcceleratorError::MissingKey));
        assert_eq!(
            "Hyper+K".parse::<Accelerator>(),
            Err(ParseAcceleratorError::UnknownModifier("Hyper".into()))
        );
        assert_eq!(
            "Ctrl+F99".parse::<Accelerator>(),
            Err(ParseAcceleratorError::UnknownKey("F99".into()))
        );
    }

    #[test]
    fn test_resolve_and_display() {
        let redo = Action::EditRedo.default_accelerator();
        assert_eq!(
            redo.resolve(Platform::Other),
            Accelerator::new(Modifiers::CONTROL | Modifiers::SHIFT, Key::Char('Z'))
        );
        assert_eq!(redo.resolve(Platform::MacOs), redo);
        assert_eq!(redo.display(Platform::Other), "Ctrl+Shift+Z");
        assert_eq!(redo.display(Platform::MacOs), "⇧⌘Z");
    }

    #[test]
    fn test_action_names_round_trip() {
        for action in Action::ALL {
            assert_eq!(action.name().parse::<Action>(), Ok(action));
        }
        assert_eq!(
            "tab_explode".parse::<Action>(),
            Err(RegistryError::UnknownAction("tab_explode".into()))
        );
    }

    #[test]
    fn test_lookup_resolves_command_per_platform() {
        let registry = ActionRegistry::default();
        let ctrl_t = Accelerator::new(Modifiers::CONTROL, Key::Char('T'));
        assert_eq!(registry.lookup(&ctrl_t, Platform::Other), Some(Action::TabNew));
        // Ctrl+T is not Cmd+T on macOS
        assert_eq!(registry.lookup(&ctrl_t, Platform::MacOs), None);

        let cmd_t = Accelerator::new(Modifiers::COMMAND, Key::Char('T'));
        assert_eq!(registry.lookup(&cmd_t, Platform::MacOs), Some(Action::TabNew));

        let ctrl_alt_k = Accelerator::new(Modifiers::CONTROL | Modifiers::ALT, Key::Char('K'));
        assert_eq!(registry.lookup(&ctrl_alt_k, Platform::Other), Some(Action::PanePrevious));
    }

    #[test]
    fn test_overrides_apply() {
        let registry =
            ActionRegistry::with_overrides([("tab_new", "CmdOrCtrl+Shift+T")]).unwrap();
        assert_eq!(registry.accelerator_for(Action::TabNew).to_string(), "CmdOrCtrl+Shift+T");
        assert_eq!(
            registry.accelerator_for(Action::TabClose),
            Action::TabClose.default_accelerator()
        );
    }

    #[test]
    fn test_overrides_reject_conflicts() {
        let err = ActionRegistry::with_overrides([("pane_close", "CmdOrCtrl+W")]).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::Conflict { first: Action::TabClose, second: Action::PaneClose, .. }
        ));
    }

    #[test]
    fn test_overrides_conflict_after_resolution() {
        // Ctrl+T and CmdOrCtrl+T only collide once CmdOrCtrl becomes Ctrl
        let err = ActionRegistry::with_overrides([("pane_next", "Ctrl+T")]).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::Conflict { platform: Platform::Other, .. }
        ));
    }

    #[test]
    fn test_overrides_reject_bad_input() {
        assert_eq!(
            ActionRegistry::with_overrides([("nope", "F2")]),
            Err(RegistryError::UnknownAction("nope".into()))
        );
        assert!(matches!(
            ActionRegistry::with_overrides([("tab_new", "Ctrl+")]),
            Err(RegistryError::InvalidAccelerator { action: Action::TabNew, .. })
        ));
    }
}
