//! Keyboard input handling for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::runtime::App;

/// Maps a key event to an application action.
///
/// Guards on [`KeyEventKind::Press`] to avoid double-fire on some terminals.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit = true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit = true,
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => app.select_next(),
        KeyCode::Right | KeyCode::Char('+' | '=' | 'l') => app.adjust(1),
        KeyCode::Left | KeyCode::Char('-' | 'h') => app.adjust(-1),
        KeyCode::Enter | KeyCode::Char('a') => app.add_device(),
        KeyCode::Char('x') => app.reset_ledger(),
        _ => {}
    }
}
