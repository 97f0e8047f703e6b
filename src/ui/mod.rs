//! Terminal front-end.
//!
//! - **host**: window operations a terminal can honor
//! - **keymapper**: crossterm key events to accelerator chords
//! - **renderer**: tab bar, pane boxes and status bar

pub mod host;
pub mod keymapper;
pub mod renderer;

pub use host::TerminalHost;
pub use keymapper::KeyMapper;
pub use renderer::{Renderer, View};
