//! Terminal host - window operations as far as a terminal can honor them

use tracing::info;

use crate::app::Host;
use crate::menu::Role;

/// [`Host`] for the terminal front-end.
///
/// Requests the main loop has to act on are recorded as flags; anything a
/// terminal application cannot do is reported through the status message.
#[derive(Debug, Default)]
pub struct TerminalHost {
    pub quit_requested: bool,
    pub reload_requested: bool,
    /// Tab bar and status bar hidden
    pub full_screen: bool,
    /// Layout debug overlay
    pub dev_tools: bool,
    pub search_active: bool,
    /// One-shot status bar message
    pub message: Option<String>,
}

impl TerminalHost {
    /// Take the pending status message
    pub fn take_message(&mut self) -> Option<String> {
        self.message.take()
    }

    fn say(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }
}

impl Host for TerminalHost {
    fn hide(&mut self) {
        self.say("hide is up to your terminal emulator");
    }

    fn quit(&mut self) {
        info!("quit requested");
        self.quit_requested = true;
    }

    fn reload(&mut self) {
        self.reload_requested = true;
        self.say("workspace reloaded");
    }

    fn toggle_full_screen(&mut self) {
        self.full_screen = !self.full_screen;
    }

    fn toggle_dev_tools(&mut self) {
        self.dev_tools = !self.dev_tools;
    }

    fn focus_search(&mut self) {
        self.search_active = !self.search_active;
        if self.search_active {
            self.say("search: no scrollback in this build");
        }
    }

    fn perform_role(&mut self, role: Role) {
        match role {
            Role::About => self.say(format!(
                "termdeck {} - {}",
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_DESCRIPTION")
            )),
            other => self.say(format!("{:?} is handled by your terminal emulator", other)),
        }
    }

    fn open_external(&mut self, url: &str) {
        self.say(url.to_string());
    }
}
