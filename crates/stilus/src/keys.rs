use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// The symbolic key set the dispatcher understands.
///
/// Beyond the arrow keys, the terminal's standard multi-byte sequences
/// (`ESC [ 1~`, `ESC [ 4~`, `ESC [ 3~`, `ESC [ 5~`, `ESC [ 6~`) resolve to
/// Home/End/Delete/PageUp/PageDown here. A lone escape byte still decodes
/// to `Escape` rather than stalling on a sequence that never completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKey {
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    Delete,
    PageUp,
    PageDown,
    Enter,
    Backspace,
    Escape,
    Ctrl(char),
    Char(char),
}

/// Maps a terminal key event onto [`EditorKey`]. Keys with no editing
/// meaning (function keys, other control chords) map to `None` and are
/// ignored upstream.
pub fn decode(event: KeyEvent) -> Option<EditorKey> {
    match event.code {
        KeyCode::Left => Some(EditorKey::Left),
        KeyCode::Right => Some(EditorKey::Right),
        KeyCode::Up => Some(EditorKey::Up),
        KeyCode::Down => Some(EditorKey::Down),
        KeyCode::Home => Some(EditorKey::Home),
        KeyCode::End => Some(EditorKey::End),
        KeyCode::Delete => Some(EditorKey::Delete),
        KeyCode::PageUp => Some(EditorKey::PageUp),
        KeyCode::PageDown => Some(EditorKey::PageDown),
        KeyCode::Enter => Some(EditorKey::Enter),
        KeyCode::Backspace => Some(EditorKey::Backspace),
        KeyCode::Esc => Some(EditorKey::Escape),
        // A tab is inserted as a literal byte; the render cache expands it.
        KeyCode::Tab => Some(EditorKey::Char('\t')),
        KeyCode::Char(c) if event.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(EditorKey::Ctrl(c.to_ascii_lowercase()))
        }
        KeyCode::Char(c) => Some(EditorKey::Char(c)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrow_keys_decode() {
        assert_eq!(decode(key(KeyCode::Up)), Some(EditorKey::Up));
        assert_eq!(decode(key(KeyCode::Down)), Some(EditorKey::Down));
        assert_eq!(decode(key(KeyCode::Left)), Some(EditorKey::Left));
        assert_eq!(decode(key(KeyCode::Right)), Some(EditorKey::Right));
    }

    #[test]
    fn test_extended_keys_decode() {
        assert_eq!(decode(key(KeyCode::Home)), Some(EditorKey::Home));
        assert_eq!(decode(key(KeyCode::End)), Some(EditorKey::End));
        assert_eq!(decode(key(KeyCode::Delete)), Some(EditorKey::Delete));
        assert_eq!(decode(key(KeyCode::PageUp)), Some(EditorKey::PageUp));
        assert_eq!(decode(key(KeyCode::PageDown)), Some(EditorKey::PageDown));
    }

    #[test]
    fn test_ctrl_chords_decode_case_insensitively() {
        let event = KeyEvent::new(KeyCode::Char('Q'), KeyModifiers::CONTROL);
        assert_eq!(decode(event), Some(EditorKey::Ctrl('q')));
        let event = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(decode(event), Some(EditorKey::Ctrl('s')));
    }

    #[test]
    fn test_printable_chars_decode_literally() {
        assert_eq!(decode(key(KeyCode::Char('a'))), Some(EditorKey::Char('a')));
        assert_eq!(decode(key(KeyCode::Char(' '))), Some(EditorKey::Char(' ')));
    }

    #[test]
    fn test_tab_decodes_to_literal_tab() {
        assert_eq!(decode(key(KeyCode::Tab)), Some(EditorKey::Char('\t')));
    }

    #[test]
    fn test_bare_escape_decodes_to_escape() {
        assert_eq!(decode(key(KeyCode::Esc)), Some(EditorKey::Escape));
    }

    #[test]
    fn test_unmapped_keys_are_ignored() {
        assert_eq!(decode(key(KeyCode::F(5))), None);
        assert_eq!(decode(key(KeyCode::Insert)), None);
    }
}
