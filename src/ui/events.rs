// Keyboard/mouse -> AppEvent mapping
// Three modes: the playlist view, the add form and the help overlay each get their own keymap

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use super::screen::LayoutHits;
use crate::controller::{Command, RowAction};

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Goes straight to the controller.
    Command(Command),
    /// A row button pressed on whatever row is highlighted.
    Row(RowAction),
    /// Mouse click on a playlist row: highlight it and play it.
    ClickRow(usize),
    HighlightUp,
    HighlightDown,
    OpenForm,
    ToggleHelp,

    FormInput(char),
    FormBackspace,
    FormNextField,
    FormPreviousField,
    FormSubmit,
    FormCancel,
}

pub fn key_to_app_event(key: KeyEvent, volume_step: f32) -> Option<AppEvent> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(AppEvent::Command(Command::Quit)),
        (KeyCode::Char('q'), KeyModifiers::NONE) | (KeyCode::Esc, _) => {
            Some(AppEvent::Command(Command::Quit))
        }

        // Playback
        (KeyCode::Char(' '), _) => Some(AppEvent::Command(Command::TogglePlayPause)),
        (KeyCode::Right, _) => Some(AppEvent::Command(Command::Next)),
        (KeyCode::Left, _) => Some(AppEvent::Command(Command::Previous)),
        (KeyCode::Char('+'), _) | (KeyCode::Char('='), _) => {
            Some(AppEvent::Command(Command::AdjustVolume(volume_step)))
        }
        (KeyCode::Char('-'), _) => Some(AppEvent::Command(Command::AdjustVolume(-volume_step))),
        (KeyCode::Char(c), KeyModifiers::NONE) if c.is_ascii_digit() => {
            let tenth = c.to_digit(10).unwrap_or(0);
            Some(AppEvent::Command(Command::SeekFraction(f64::from(tenth) / 10.0)))
        }

        // Playlist rows
        (KeyCode::Up, _) | (KeyCode::Char('k'), KeyModifiers::NONE) => Some(AppEvent::HighlightUp),
        (KeyCode::Down, _) | (KeyCode::Char('j'), KeyModifiers::NONE) => {
            Some(AppEvent::HighlightDown)
        }
        (KeyCode::Enter, _) | (KeyCode::Char('s'), KeyModifiers::NONE) => {
            Some(AppEvent::Row(RowAction::Set))
        }
        (KeyCode::Char('t'), KeyModifiers::NONE) => Some(AppEvent::Row(RowAction::Trending)),
        (KeyCode::Char('d'), KeyModifiers::NONE) | (KeyCode::Delete, _) => {
            Some(AppEvent::Row(RowAction::Delete))
        }
        (KeyCode::Char('a'), KeyModifiers::NONE) => Some(AppEvent::OpenForm),

        // Help overlay - Shift+/ arrives as '?' with or without the SHIFT bit
        (KeyCode::Char('?'), KeyModifiers::NONE) | (KeyCode::Char('?'), KeyModifiers::SHIFT) => {
            Some(AppEvent::ToggleHelp)
        }

        _ => None,
    }
}

pub fn key_to_form_event(key: KeyEvent) -> Option<AppEvent> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(AppEvent::Command(Command::Quit)),
        (KeyCode::Esc, _) => Some(AppEvent::FormCancel),
        (KeyCode::Enter, _) => Some(AppEvent::FormSubmit),
        (KeyCode::Tab, _) | (KeyCode::Down, _) => Some(AppEvent::FormNextField),
        (KeyCode::BackTab, _) | (KeyCode::Up, _) => Some(AppEvent::FormPreviousField),
        (KeyCode::Backspace, _) => Some(AppEvent::FormBackspace),
        (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT)
            if !c.is_control() =>
        {
            Some(AppEvent::FormInput(c))
        }
        _ => None,
    }
}

pub fn key_to_help_event(key: KeyEvent) -> Option<AppEvent> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(AppEvent::Command(Command::Quit)),
        (KeyCode::Char('q'), KeyModifiers::NONE) => Some(AppEvent::Command(Command::Quit)),
        (KeyCode::Char('?'), _) | (KeyCode::Esc, _) | (KeyCode::Enter, _) => {
            Some(AppEvent::ToggleHelp)
        }
        _ => None,
    }
}

/// Left clicks: on the progress bar seek to that spot, on a row play that track.
pub fn mouse_to_app_event(mouse: MouseEvent, hits: &LayoutHits) -> Option<AppEvent> {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return None;
    }

    if let Some(fraction) = hits
        .progress
        .and_then(|gauge| gauge.fraction_at(mouse.column, mouse.row))
    {
        return Some(AppEvent::Command(Command::SeekFraction(fraction)));
    }

    hits.row_at(mouse.column, mouse.row).map(AppEvent::ClickRow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::screen::{HitBox, RowHit};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_playback_keys() {
        assert_eq!(
            key_to_app_event(key(KeyCode::Char(' ')), 0.1),
            Some(AppEvent::Command(Command::TogglePlayPause))
        );
        assert_eq!(
            key_to_app_event(key(KeyCode::Right), 0.1),
            Some(AppEvent::Command(Command::Next))
        );
        assert_eq!(
            key_to_app_event(key(KeyCode::Left), 0.1),
            Some(AppEvent::Command(Command::Previous))
        );
        assert_eq!(
            key_to_app_event(key(KeyCode::Char('-')), 0.1),
            Some(AppEvent::Command(Command::AdjustVolume(-0.1)))
        );
        assert_eq!(
            key_to_app_event(key(KeyCode::Char('5')), 0.1),
            Some(AppEvent::Command(Command::SeekFraction(0.5)))
        );
    }

    #[test]
    fn test_row_keys() {
        assert_eq!(
            key_to_app_event(key(KeyCode::Enter), 0.1),
            Some(AppEvent::Row(RowAction::Set))
        );
        assert_eq!(
            key_to_app_event(key(KeyCode::Char('t')), 0.1),
            Some(AppEvent::Row(RowAction::Trending))
        );
        assert_eq!(
            key_to_app_event(key(KeyCode::Delete), 0.1),
            Some(AppEvent::Row(RowAction::Delete))
        );
        assert_eq!(key_to_app_event(key(KeyCode::Char('j')), 0.1), Some(AppEvent::HighlightDown));
    }

    #[test]
    fn test_quit_keys() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        for event in [key(KeyCode::Char('q')), key(KeyCode::Esc), ctrl_c] {
            assert_eq!(
                key_to_app_event(event, 0.1),
                Some(AppEvent::Command(Command::Quit))
            );
        }
    }

    #[test]
    fn test_form_swallows_letters() {
        // 'q' and 'd' are text in the form, not quit/delete
        assert_eq!(key_to_form_event(key(KeyCode::Char('q'))), Some(AppEvent::FormInput('q')));
        assert_eq!(
            key_to_form_event(KeyEvent::new(KeyCode::Char('D'), KeyModifiers::SHIFT)),
            Some(AppEvent::FormInput('D'))
        );
        assert_eq!(key_to_form_event(key(KeyCode::BackTab)), Some(AppEvent::FormPreviousField));
        assert_eq!(key_to_form_event(key(KeyCode::Esc)), Some(AppEvent::FormCancel));
    }

    #[test]
    fn test_help_closes_on_escape() {
        assert_eq!(key_to_help_event(key(KeyCode::Esc)), Some(AppEvent::ToggleHelp));
        assert_eq!(key_to_help_event(key(KeyCode::Char(' '))), None);
    }

    #[test]
    fn test_click_on_progress_bar_seeks() {
        let hits = LayoutHits {
            progress: Some(HitBox { x: 0, y: 20, width: 100, height: 1 }),
            rows: Vec::new(),
        };
        assert_eq!(
            mouse_to_app_event(click(25, 20), &hits),
            Some(AppEvent::Command(Command::SeekFraction(0.25)))
        );
        assert_eq!(mouse_to_app_event(click(25, 3), &hits), None);
        assert_eq!(mouse_to_app_event(click(25, 20), &LayoutHits::default()), None);
    }

    #[test]
    fn test_click_on_row_plays_it() {
        let hits = LayoutHits {
            progress: Some(HitBox { x: 0, y: 20, width: 100, height: 1 }),
            rows: vec![RowHit { index: 2, area: HitBox { x: 1, y: 6, width: 60, height: 1 } }],
        };
        assert_eq!(mouse_to_app_event(click(10, 6), &hits), Some(AppEvent::ClickRow(2)));

        let release = MouseEvent {
            kind: MouseEventKind::Up(MouseButton::Left),
            ..click(10, 6)
        };
        assert_eq!(mouse_to_app_event(release, &hits), None);
    }
}
