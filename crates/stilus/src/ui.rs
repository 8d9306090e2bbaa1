use std::io::Write;

use anyhow::Result;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{Clear, ClearType},
};

use crate::app::App;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Longest filename shown in the status bar before truncation.
const STATUS_NAME_WIDTH: usize = 20;

/// Composes one full frame into `out`: hide cursor, home, document rows,
/// status bar, message bar, cursor placement, show cursor. The caller
/// writes the buffer to the terminal in a single burst.
pub fn render(out: &mut impl Write, app: &App) -> Result<()> {
    queue!(out, Hide, MoveTo(0, 0))?;

    draw_rows(out, app)?;
    draw_status_bar(out, app)?;
    draw_message_bar(out, app)?;

    let row = (app.cy() - app.rowoff()) as u16;
    let col = (app.rx() - app.coloff()) as u16;
    queue!(out, MoveTo(col, row), Show)?;
    Ok(())
}

fn draw_rows(out: &mut impl Write, app: &App) -> Result<()> {
    for y in 0..app.screenrows() {
        let filerow = y + app.rowoff();
        if let Some(row) = app.document().row(filerow) {
            let visible: String = row
                .render()
                .chars()
                .skip(app.coloff())
                .take(app.screencols())
                .collect();
            queue!(out, Print(visible))?;
        } else if app.document().is_empty() && y == app.screenrows() / 3 {
            draw_welcome(out, app.screencols())?;
        } else {
            queue!(out, Print("~"))?;
        }
        queue!(out, Clear(ClearType::UntilNewLine), Print("\r\n"))?;
    }
    Ok(())
}

fn draw_welcome(out: &mut impl Write, width: usize) -> Result<()> {
    let mut welcome = format!("Stilus editor -- version {}", VERSION);
    welcome.truncate(width);
    let padding = width.saturating_sub(welcome.len()) / 2;
    if padding > 0 {
        queue!(out, Print("~"), Print(" ".repeat(padding - 1)))?;
    }
    queue!(out, Print(welcome))?;
    Ok(())
}

/// Reverse-video bar: filename (truncated) and line count on the left, the
/// current-line/total-lines indicator flush right, spaces in between.
fn draw_status_bar(out: &mut impl Write, app: &App) -> Result<()> {
    let name = app.file_name().unwrap_or_else(|| "[No Name]".to_string());
    let name: String = name.chars().take(STATUS_NAME_WIDTH).collect();
    let left = format!("{} - {} lines", name, app.document().len());
    let right = format!("{}/{}", app.cy() + 1, app.document().len());

    let width = app.screencols();
    let mut bar: String = left.chars().take(width).collect();
    let mut len = bar.chars().count();
    let right_len = right.chars().count();
    while len < width {
        if width - len == right_len {
            bar.push_str(&right);
            len += right_len;
        } else {
            bar.push(' ');
            len += 1;
        }
    }

    queue!(
        out,
        SetAttribute(Attribute::Reverse),
        Print(bar),
        SetAttribute(Attribute::Reset),
        Print("\r\n")
    )?;
    Ok(())
}

fn draw_message_bar(out: &mut impl Write, app: &App) -> Result<()> {
    queue!(out, Clear(ClearType::UntilNewLine))?;
    if let Some(message) = app.status().current() {
        let visible: String = message.content().chars().take(app.screencols()).collect();
        queue!(out, Print(visible))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::EditorKey;

    fn render_to_string(app: &App) -> String {
        let mut frame = Vec::new();
        render(&mut frame, app).unwrap();
        String::from_utf8(frame).unwrap()
    }

    fn app_with_text(lines: &[&str], cols: usize, rows: usize) -> App {
        let mut app = App::new(cols, rows);
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                app.handle_key(EditorKey::Enter);
            }
            for ch in line.chars() {
                app.handle_key(EditorKey::Char(ch));
            }
        }
        app
    }

    #[test]
    fn test_frame_hides_cursor_first_and_shows_it_last() {
        let mut app = App::new(80, 24);
        app.scroll();
        let frame = render_to_string(&app);

        assert!(frame.starts_with("\x1b[?25l\x1b[1;1H"));
        assert!(frame.ends_with("\x1b[?25h"));
    }

    #[test]
    fn test_empty_document_shows_welcome_banner() {
        let mut app = App::new(80, 24);
        app.scroll();
        let frame = render_to_string(&app);

        assert!(frame.contains("Stilus editor -- version"));
        // Continuation markers on the other empty rows.
        assert!(frame.contains("~\x1b[K\r\n"));
    }

    #[test]
    fn test_non_empty_document_has_no_banner() {
        let mut app = app_with_text(&["hello"], 80, 24);
        app.scroll();
        let frame = render_to_string(&app);

        assert!(!frame.contains("Stilus editor"));
        assert!(frame.contains("hello\x1b[K\r\n"));
    }

    #[test]
    fn test_rows_render_tab_expanded_slice() {
        let mut app = app_with_text(&["a\tb"], 80, 24);
        app.scroll();
        let frame = render_to_string(&app);

        assert!(frame.contains("a       b\x1b[K\r\n"));
    }

    #[test]
    fn test_status_bar_is_reverse_video_with_counts() {
        let mut app = app_with_text(&["one", "two"], 80, 24);
        app.scroll();
        let frame = render_to_string(&app);

        let start = frame.find("\x1b[7m").expect("reverse video on");
        let end = frame.find("\x1b[0m").expect("reverse video off");
        let bar = &frame[start + 4..end];
        assert_eq!(bar.chars().count(), 80);
        assert!(bar.starts_with("[No Name] - 2 lines"));
        // Cursor ended on the second row after typing.
        assert!(bar.ends_with("2/2"));
    }

    #[test]
    fn test_status_bar_truncates_long_file_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a_name_well_past_twenty_characters.txt");
        std::fs::write(&path, "hi\n").unwrap();

        let mut app = App::new(80, 24);
        app.open(path.clone()).unwrap();
        app.scroll();
        let frame = render_to_string(&app);

        let shown: String = path.display().to_string().chars().take(20).collect();
        assert!(frame.contains(&format!("{} - 1 lines", shown)));
    }

    #[test]
    fn test_message_bar_shows_fresh_message() {
        let mut app = App::new(80, 24);
        app.set_status("HELP: Ctrl-S = save | Ctrl-Q = quit");
        app.scroll();
        let frame = render_to_string(&app);

        assert!(frame.contains("HELP: Ctrl-S = save | Ctrl-Q = quit"));
    }

    #[test]
    fn test_cursor_is_positioned_from_render_column() {
        let mut app = app_with_text(&["a\tb"], 80, 24);
        // Cursor sits after the tab (cx 2), which renders at column 8.
        app.handle_key(EditorKey::Left);
        app.scroll();
        let frame = render_to_string(&app);

        assert!(frame.ends_with("\x1b[1;9H\x1b[?25h"));
    }

    #[test]
    fn test_horizontal_scroll_slices_rendered_row() {
        let mut app = app_with_text(&["abcdefghij"], 5, 24);
        app.scroll();
        let frame = render_to_string(&app);

        // Cursor at cx 10 forces coloff to 6; the visible slice is the tail.
        assert_eq!(app.coloff(), 6);
        assert!(frame.contains("ghij\x1b[K\r\n"));
    }
}
