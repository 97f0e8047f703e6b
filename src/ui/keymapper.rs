//! Key mapping for accelerator dispatch
//!
//! Converts crossterm key events into accelerator chords that the action
//! registry can look up.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::action::{Accelerator, Key, Modifiers, Platform};

impl Modifiers {
    /// Physical modifiers of a key event on `platform`
    pub fn from_key_modifiers(mods: KeyModifiers, platform: Platform) -> Self {
        let mut result = Modifiers::empty();
        if mods.contains(KeyModifiers::SHIFT) {
            result |= Modifiers::SHIFT;
        }
        if mods.contains(KeyModifiers::CONTROL) {
            result |= Modifiers::CONTROL;
        }
        if mods.contains(KeyModifiers::ALT) {
            result |= Modifiers::ALT;
        }
        // Cmd only reaches a terminal application with the kitty keyboard protocol
        if platform == Platform::MacOs && mods.intersects(KeyModifiers::SUPER | KeyModifiers::META) {
            result |= Modifiers::COMMAND;
        }
        result
    }
}

/// Key mapper for converting key events to chords
pub struct KeyMapper;

impl KeyMapper {
    /// Platform to resolve chords against for this terminal.
    ///
    /// Without the kitty keyboard protocol a terminal never reports Cmd, so
    /// on macOS the physical Ctrl key stands in for it.
    pub fn input_platform(platform: Platform, keyboard_enhanced: bool) -> Platform {
        match platform {
            Platform::MacOs if !keyboard_enhanced => Platform::Other,
            other => other,
        }
    }

    /// Map a crossterm KeyEvent to an accelerator chord, `None` for keys
    /// that can never be bound (modifier-only presses, media keys, ...)
    pub fn chord(event: &KeyEvent, platform: Platform) -> Option<Accelerator> {
        let mut mods = Modifiers::from_key_modifiers(event.modifiers, platform);

        let key = match event.code {
            KeyCode::Char(ch) => Self::map_char(ch, &mut mods),
            KeyCode::F(n) if (1..=24).contains(&n) => Key::F(n),
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            // Legacy terminals send Ctrl+Alt+I as ESC TAB
            KeyCode::Tab if mods.contains(Modifiers::ALT) && !mods.contains(Modifiers::CONTROL) => {
                mods |= Modifiers::CONTROL;
                Key::Char('I')
            }
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => {
                mods |= Modifiers::SHIFT;
                Key::Tab
            }
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Escape,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            _ => return None,
        };

        Some(Accelerator::new(mods, key))
    }

    /// Map a character with modifiers
    fn map_char(ch: char, mods: &mut Modifiers) -> Key {
        // Legacy terminals send Ctrl+\ .. Ctrl+_ as 0x1C..0x1F, which
        // crossterm reports as Ctrl+4 .. Ctrl+7. Ctrl+- also arrives as 0x1F.
        if mods.contains(Modifiers::CONTROL) {
            match ch {
                '4' => return Key::Char('\\'),
                '5' => return Key::Char(']'),
                '6' => return Key::Char('^'),
                '7' => return Key::Char('-'),
                _ => {}
            }
        }

        // Some terminals report Shift+letter only through the case
        if ch.is_ascii_uppercase() {
            *mods |= Modifiers::SHIFT;
        }

        Key::char(ch)
    }
}
