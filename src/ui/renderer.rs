//! Workspace renderer.
//!
//! Draws the tab bar, the focused tab's split tree and the status bar.
//!
//! # Rendering Architecture
//!
//! Every frame is wrapped in a synchronized update so the terminal never
//! shows a half-drawn layout:
//!
//! ```text
//! begin_frame()  → Hide cursor, disable autowrap, start sync
//!     ↓
//! render content → Tab bar, pane boxes, status bar, layout overlay
//!     ↓
//! end_frame()    → Enable autowrap, end sync, flush
//! ```

use std::io::{self, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    style::{Color, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::wm::{PaneId, Tab, Workspace};

const TAB_BAR_BG: Color = Color::DarkGrey;
const TAB_ACTIVE_BG: Color = Color::Blue;
const STATUS_BAR_BG: Color = Color::DarkGrey;
const BORDER: Color = Color::Grey;
const BORDER_ACTIVE: Color = Color::Cyan;
const OVERLAY: Color = Color::Yellow;

/// Begin a synchronized frame: hide cursor, disable autowrap, start sync
fn begin_frame<W: Write>(out: &mut W) -> io::Result<()> {
    write!(out, "\x1b[?2026h")?;
    write!(out, "\x1b[?7l")?;
    execute!(out, Hide)?;
    Ok(())
}

/// End a synchronized frame: re-enable autowrap, end sync, flush
fn end_frame<W: Write>(out: &mut W) -> io::Result<()> {
    write!(out, "\x1b[?7h")?;
    write!(out, "\x1b[?2026l")?;
    out.flush()
}

/// Run `f` inside a synchronized frame
fn with_frame<W: Write>(out: &mut W, f: impl FnOnce(&mut W) -> io::Result<()>) -> io::Result<()> {
    begin_frame(out)?;
    let result = f(out);
    // Always close the frame, even if rendering failed
    let closed = end_frame(out);
    result.and(closed)
}

/// Box drawing characters
struct BorderChars {
    top_left: char,
    top_right: char,
    bottom_left: char,
    bottom_right: char,
    horizontal: char,
    vertical: char,
}

impl BorderChars {
    fn single() -> Self {
        Self {
            top_left: '┌',
            top_right: '┐',
            bottom_left: '└',
            bottom_right: '┘',
            horizontal: '─',
            vertical: '│',
        }
    }
}

/// Window state the renderer needs besides the workspace
#[derive(Debug, Clone, Default)]
pub struct View<'a> {
    /// Hide tab bar and status bar
    pub full_screen: bool,
    /// Draw the layout overlay
    pub dev_tools: bool,
    /// Status bar message
    pub message: Option<&'a str>,
    /// Right-aligned status bar hints
    pub hints: &'a str,
}

/// Screen region of one pane, relative to the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneRect {
    pub id: PaneId,
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

/// Workspace renderer
pub struct Renderer {
    initialized: bool,
    /// Kitty keyboard protocol pushed, so Cmd arrives as SUPER
    keyboard_enhanced: bool,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            initialized: false,
            keyboard_enhanced: false,
        }
    }

    /// Whether the terminal reports disambiguated key events
    pub fn keyboard_enhanced(&self) -> bool {
        self.keyboard_enhanced
    }

    /// Initialize the terminal
    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            Clear(ClearType::All)
        )?;

        if terminal::supports_keyboard_enhancement().unwrap_or(false) {
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
            )?;
            self.keyboard_enhanced = true;
        }
        stdout.flush()?;

        self.initialized = true;
        Ok(())
    }

    /// Cleanup
    pub fn cleanup(&mut self) -> io::Result<()> {
        if !self.initialized {
            return Ok(());
        }

        let mut stdout = io::stdout();

        // Restore terminal state (in case of abnormal exit)
        write!(stdout, "\x1b[?7h")?;
        write!(stdout, "\x1b[?2026l")?;
        if self.keyboard_enhanced {
            execute!(stdout, PopKeyboardEnhancementFlags)?;
            self.keyboard_enhanced = false;
        }
        stdout.flush()?;

        execute!(stdout, Show, terminal::LeaveAlternateScreen)?;
        terminal::disable_raw_mode()?;
        self.initialized = false;
        Ok(())
    }

    /// Render a full frame
    pub fn render(&mut self, workspace: &Workspace, view: &View<'_>) -> io::Result<()> {
        let (width, height) = terminal::size()?;
        let stdout = io::stdout();
        let mut out = io::BufWriter::with_capacity(65536, stdout.lock());

        with_frame(&mut out, |out| {
            execute!(out, ResetColor, Clear(ClearType::All))?;

            let bars = if view.full_screen { 0 } else { 1 };
            if !view.full_screen {
                render_tab_bar(out, workspace, width)?;
                render_status_bar(out, workspace, view, width, height)?;
            }

            let body_height = height.saturating_sub(2 * bars);
            match workspace.focused_tab() {
                Some(tab) => {
                    let rects = pane_rects(tab, bars, width, body_height);
                    for rect in &rects {
                        render_pane(out, tab, rect)?;
                    }
                    if view.dev_tools {
                        render_overlay(out, tab, &rects)?;
                    }
                }
                None => render_empty(out, bars, width, body_height)?,
            }
            Ok(())
        })
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

/// Pane boxes of `tab` laid out in the body area starting at row `top`
pub fn pane_rects(tab: &Tab, top: u16, width: u16, height: u16) -> Vec<PaneRect> {
    tab.layout()
        .calculate_positions(0, top, width, height)
        .into_iter()
        .map(|(id, x, y, width, height)| PaneRect { id, x, y, width, height })
        .collect()
}

/// Tab bar entries: `(text, focused)`
pub fn tab_segments(workspace: &Workspace) -> Vec<(String, bool)> {
    let focused = workspace.focused_index();
    workspace
        .tabs()
        .iter()
        .enumerate()
        .map(|(i, tab)| (format!(" {} ", tab.display_title()), Some(i) == focused))
        .collect()
}

/// Left half of the status bar
pub fn status_text(workspace: &Workspace, message: Option<&str>) -> String {
    if let Some(message) = message {
        return message.to_string();
    }
    match (workspace.focused_index(), workspace.focused_tab()) {
        (Some(index), Some(tab)) => format!(
            "tab {}/{} | pane {} | {} panes",
            index + 1,
            workspace.len(),
            tab.active_pane_id(),
            tab.pane_count()
        ),
        _ => "no tabs".to_string(),
    }
}

/// Status bar line: `left` followed by right-aligned `right`, fitted to `width`
pub fn status_line(left: &str, right: &str, width: u16) -> String {
    let width = width as usize;
    let used = left.width() + right.width() + 2;
    if used > width {
        return fit(&format!(" {}", left), width);
    }
    format!(" {}{:pad$}{} ", left, "", right, pad = width - used)
}

/// Truncate or pad `text` to exactly `width` columns
pub fn fit(text: &str, width: usize) -> String {
    let mut out = String::with_capacity(width);
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.extend(std::iter::repeat(' ').take(width - used));
    out
}

/// Render the tab bar
fn render_tab_bar<W: Write>(out: &mut W, workspace: &Workspace, width: u16) -> io::Result<()> {
    execute!(out, MoveTo(0, 0), SetBackgroundColor(TAB_BAR_BG), SetForegroundColor(Color::White))?;
    write!(out, "{:width$}", "", width = width as usize)?;
    execute!(out, MoveTo(0, 0))?;

    let segments = tab_segments(workspace);
    let mut remaining = width as usize;
    for (i, (text, focused)) in segments.iter().enumerate() {
        if remaining == 0 {
            break;
        }
        let bg = if *focused { TAB_ACTIVE_BG } else { TAB_BAR_BG };
        execute!(out, SetBackgroundColor(bg))?;
        let shown = fit(text, text.width().min(remaining));
        remaining -= shown.width();
        write!(out, "{}", shown)?;

        if i < segments.len() - 1 && remaining > 0 {
            execute!(out, SetBackgroundColor(TAB_BAR_BG))?;
            write!(out, "│")?;
            remaining -= 1;
        }
    }

    execute!(out, ResetColor)?;
    Ok(())
}

/// Render the status bar
fn render_status_bar<W: Write>(
    out: &mut W,
    workspace: &Workspace,
    view: &View<'_>,
    width: u16,
    height: u16,
) -> io::Result<()> {
    if height < 2 {
        return Ok(());
    }
    execute!(
        out,
        MoveTo(0, height - 1),
        SetBackgroundColor(STATUS_BAR_BG),
        SetForegroundColor(Color::White)
    )?;
    let left = status_text(workspace, view.message);
    write!(out, "{}", status_line(&left, view.hints, width))?;
    execute!(out, ResetColor)?;
    Ok(())
}

/// Render a pane box with its title in the top border
fn render_pane<W: Write>(out: &mut W, tab: &Tab, rect: &PaneRect) -> io::Result<()> {
    if rect.width < 2 || rect.height < 2 {
        return Ok(());
    }
    let chars = BorderChars::single();
    let active = tab.active_pane_id() == rect.id;
    let color = if active { BORDER_ACTIVE } else { BORDER };
    execute!(out, SetForegroundColor(color))?;

    let title = tab
        .pane(rect.id)
        .map(|pane| pane.display_title())
        .unwrap_or_default();
    let inner = (rect.width - 2) as usize;
    let title = fit(&title, title.width().min(inner.saturating_sub(2)));
    let remaining = inner - title.width();
    let left_pad = remaining / 2;

    execute!(out, MoveTo(rect.x, rect.y))?;
    let mut top = String::with_capacity(rect.width as usize * 3);
    top.push(chars.top_left);
    top.extend(std::iter::repeat(chars.horizontal).take(left_pad));
    top.push_str(&title);
    top.extend(std::iter::repeat(chars.horizontal).take(remaining - left_pad));
    top.push(chars.top_right);
    write!(out, "{}", top)?;

    for row in 1..rect.height - 1 {
        execute!(out, MoveTo(rect.x, rect.y + row))?;
        write!(out, "{}", chars.vertical)?;
        execute!(out, MoveTo(rect.x + rect.width - 1, rect.y + row))?;
        write!(out, "{}", chars.vertical)?;
    }

    execute!(out, MoveTo(rect.x, rect.y + rect.height - 1))?;
    let mut bottom = String::with_capacity(rect.width as usize * 3);
    bottom.push(chars.bottom_left);
    bottom.extend(std::iter::repeat(chars.horizontal).take(inner));
    bottom.push(chars.bottom_right);
    write!(out, "{}", bottom)?;

    execute!(out, ResetColor)?;
    Ok(())
}

/// Layout debug lines for one pane
pub fn overlay_lines(tab: &Tab, rect: &PaneRect) -> Vec<String> {
    let mut lines = vec![
        format!("id {}", rect.id),
        format!("{}x{} at {},{}", rect.width, rect.height, rect.x, rect.y),
    ];
    if tab.active_pane_id() == rect.id {
        lines.push(format!("active, depth {}", tab.layout().depth()));
    }
    lines
}

/// Render the layout overlay inside each pane box
fn render_overlay<W: Write>(out: &mut W, tab: &Tab, rects: &[PaneRect]) -> io::Result<()> {
    execute!(out, SetForegroundColor(OVERLAY))?;
    for rect in rects {
        if rect.width < 3 || rect.height < 3 {
            continue;
        }
        let inner = (rect.width - 2) as usize;
        for (row, line) in overlay_lines(tab, rect)
            .iter()
            .take((rect.height - 2) as usize)
            .enumerate()
        {
            execute!(out, MoveTo(rect.x + 1, rect.y + 1 + row as u16))?;
            write!(out, "{}", fit(line, line.width().min(inner)))?;
        }
    }
    execute!(out, ResetColor)?;
    Ok(())
}

/// Placeholder for a workspace without tabs
fn render_empty<W: Write>(out: &mut W, top: u16, width: u16, height: u16) -> io::Result<()> {
    let text = "no tabs open";
    let x = (width as usize).saturating_sub(text.width()) / 2;
    execute!(out, MoveTo(x as u16, top + height / 2))?;
    write!(out, "{}", fit(text, text.width().min(width as usize)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wm::SplitDirection;

    #[test]
    fn test_fit_pads_and_truncates() {
        assert_eq!(fit("abc", 5), "abc  ");
        assert_eq!(fit("abcdef", 3), "abc");
        // Wide characters are never split
        assert_eq!(fit("日本語", 5), "日本 ");
        assert_eq!(fit("", 0), "");
    }

    #[test]
    fn test_status_line_alignment() {
        assert_eq!(status_line("left", "right", 20), format!(" left{}right ", " ".repeat(9)));
        assert_eq!(status_line("left", "right", 20).width(), 20);
        // Hints dropped when space runs out
        assert_eq!(status_line("left", "right", 8), " left   ");
    }

    #[test]
    fn test_status_text() {
        let mut workspace = Workspace::with_tabs(2);
        workspace.add_pane(SplitDirection::Horizontal).unwrap();
        assert_eq!(status_text(&workspace, None), "tab 2/2 | pane 3 | 2 panes");
        assert_eq!(status_text(&workspace, Some("hello")), "hello");

        let empty = Workspace::new();
        assert_eq!(status_text(&empty, None), "no tabs");
    }

    #[test]
    fn test_tab_segments_mark_focus() {
        let mut workspace = Workspace::with_tabs(3);
        workspace.activate_next_tab().unwrap();
        let segments = tab_segments(&workspace);
        assert_eq!(
            segments,
            vec![
                (" tab 1 ".to_string(), true),
                (" tab 2 ".to_string(), false),
                (" tab 3 ".to_string(), false),
            ]
        );
    }

    #[test]
    fn test_pane_rects_cover_body() {
        let mut workspace = Workspace::new();
        workspace.add_tab();
        workspace.add_pane(SplitDirection::Horizontal).unwrap();
        let tab = workspace.focused_tab().unwrap();

        let rects = pane_rects(tab, 1, 80, 22);
        assert_eq!(
            rects,
            vec![
                PaneRect { id: 1, x: 0, y: 1, width: 40, height: 22 },
                PaneRect { id: 2, x: 40, y: 1, width: 40, height: 22 },
            ]
        );
    }

    #[test]
    fn test_overlay_marks_active_pane() {
        let mut workspace = Workspace::new();
        workspace.add_tab();
        workspace.add_pane(SplitDirection::Vertical).unwrap();
        let tab = workspace.focused_tab().unwrap();
        let rects = pane_rects(tab, 0, 40, 20);

        assert_eq!(overlay_lines(tab, &rects[0]).len(), 2);
        assert_eq!(
            overlay_lines(tab, &rects[1]),
            vec!["id 2".to_string(), "40x10 at 0,10".into(), "active, depth 1".into()]
        );
    }
}
