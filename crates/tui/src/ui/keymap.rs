use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::route::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    TogglePrompt,
    DismissToast,
    Quit,
    Back,
    Open(Route),
    None,
}

/// Control chords, honored even while a page captures text.
pub fn map_control(key: KeyEvent) -> AppAction {
    if !key.modifiers.contains(KeyModifiers::CONTROL) {
        return AppAction::None;
    }
    match key.code {
        KeyCode::Char('c') => AppAction::Quit,
        KeyCode::Char('p') => AppAction::TogglePrompt,
        KeyCode::Char('x') => AppAction::DismissToast,
        _ => AppAction::None,
    }
}

/// Shortcuts for keys the mounted page left unhandled.
pub fn map_global(key: KeyEvent) -> AppAction {
    match key.code {
        KeyCode::Char('q') => AppAction::Quit,
        KeyCode::Char('1') => AppAction::Open(Route::Inventory),
        KeyCode::Char('2') => AppAction::Open(Route::Rooms),
        KeyCode::Char('3') => AppAction::Open(Route::ItemCreate),
        KeyCode::Char('b') | KeyCode::Esc => AppAction::Back,
        _ => AppAction::None,
    }
}
