use std::path::PathBuf;

use anyhow::Result;

use rowcore::Document;

use crate::file_manager::FileManager;
use crate::keys::EditorKey;
use crate::status_manager::StatusManager;

/// The whole editor state: document, cursor, viewport, status message and
/// file association. One explicit value, owned by the control loop and
/// passed by `&mut` into every component call.
pub struct App {
    document: Document,
    file_manager: FileManager,
    status: StatusManager,
    // Logical cursor: column into the row's chars, row into the document.
    cx: usize,
    cy: usize,
    // Rendered cursor column, derived from cx each frame in scroll().
    rx: usize,
    // Scroll origins.
    rowoff: usize,
    coloff: usize,
    // Visible frame, two terminal rows reserved for the bars.
    screenrows: usize,
    screencols: usize,
    should_quit: bool,
}

impl App {
    /// `cols`/`rows` is the full terminal size; two rows are reserved for
    /// the status and message bars.
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            document: Document::new(),
            file_manager: FileManager::new(),
            status: StatusManager::new(),
            cx: 0,
            cy: 0,
            rx: 0,
            rowoff: 0,
            coloff: 0,
            screenrows: rows.saturating_sub(2),
            screencols: cols,
            should_quit: false,
        }
    }

    /// Loads `path` into the document. Open failure is fatal; the caller
    /// propagates it out of the control loop.
    pub fn open(&mut self, path: PathBuf) -> Result<()> {
        let lines = self.file_manager.open_file(path)?;
        self.document = Document::from_lines(lines);
        Ok(())
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn status(&self) -> &StatusManager {
        &self.status
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status.set(message);
    }

    /// Lazy expiry of the status message, once per loop iteration.
    pub fn update_status(&mut self) {
        self.status.update();
    }

    pub fn file_name(&self) -> Option<String> {
        self.file_manager
            .current_path()
            .map(|path| path.display().to_string())
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Re-applied on terminal resize events; the next `scroll()` brings the
    /// viewport invariant back.
    pub fn set_frame_size(&mut self, cols: usize, rows: usize) {
        self.screencols = cols;
        self.screenrows = rows.saturating_sub(2);
    }

    pub fn cy(&self) -> usize {
        self.cy
    }

    pub fn rx(&self) -> usize {
        self.rx
    }

    pub fn rowoff(&self) -> usize {
        self.rowoff
    }

    pub fn coloff(&self) -> usize {
        self.coloff
    }

    pub fn screenrows(&self) -> usize {
        self.screenrows
    }

    pub fn screencols(&self) -> usize {
        self.screencols
    }

    /// Maps each decoded key to exactly one action. There is a single
    /// implicit mode: no command mode, no prefix keys.
    pub fn handle_key(&mut self, key: EditorKey) {
        match key {
            EditorKey::Ctrl('q') => self.should_quit = true,
            EditorKey::Ctrl('s') => self.save(),
            EditorKey::Left | EditorKey::Right | EditorKey::Up | EditorKey::Down => {
                self.move_cursor(key)
            }
            EditorKey::Home => self.cx = 0,
            EditorKey::End => {
                self.cx = self.row_len(self.cy);
            }
            EditorKey::PageUp | EditorKey::PageDown => self.page_scroll(key),
            EditorKey::Enter => self.insert_newline(),
            EditorKey::Backspace | EditorKey::Ctrl('h') => self.delete_char(),
            EditorKey::Delete => {
                self.move_cursor(EditorKey::Right);
                self.delete_char();
            }
            // Ctrl-L (refresh) and a bare escape are deliberately inert.
            EditorKey::Escape | EditorKey::Ctrl(_) => {}
            EditorKey::Char(c) => self.insert_char(c),
        }
    }

    /// Brings the scroll origins back in range for the current cursor.
    /// Called once per frame, before rendering; jumps are instantaneous.
    pub fn scroll(&mut self) {
        self.rx = self
            .document
            .row(self.cy)
            .map_or(0, |row| row.cx_to_rx(self.cx));

        if self.cy < self.rowoff {
            self.rowoff = self.cy;
        }
        if self.cy >= self.rowoff + self.screenrows {
            self.rowoff = self.cy - self.screenrows + 1;
        }
        if self.rx < self.coloff {
            self.coloff = self.rx;
        }
        if self.rx >= self.coloff + self.screencols {
            self.coloff = self.rx - self.screencols + 1;
        }
    }

    fn move_cursor(&mut self, key: EditorKey) {
        match key {
            EditorKey::Left => {
                if self.cx > 0 {
                    self.cx -= 1;
                } else if self.cy > 0 {
                    self.cy -= 1;
                    self.cx = self.row_len(self.cy);
                }
            }
            EditorKey::Right => {
                if let Some(row) = self.document.row(self.cy) {
                    if self.cx < row.len() {
                        self.cx += 1;
                    } else {
                        self.cy += 1;
                        self.cx = 0;
                    }
                }
            }
            EditorKey::Up => {
                if self.cy > 0 {
                    self.cy -= 1;
                }
            }
            EditorKey::Down => {
                if self.cy + 1 < self.document.len() {
                    self.cy += 1;
                }
            }
            _ => {}
        }

        // Rows differ in length; snap the column after a vertical move.
        let len = self.row_len(self.cy);
        if self.cx > len {
            self.cx = len;
        }
    }

    fn page_scroll(&mut self, key: EditorKey) {
        let motion = match key {
            EditorKey::PageUp => {
                self.cy = self.rowoff;
                EditorKey::Up
            }
            EditorKey::PageDown => {
                let bottom = (self.rowoff + self.screenrows).saturating_sub(1);
                self.cy = bottom.min(self.document.len());
                EditorKey::Down
            }
            _ => return,
        };
        for _ in 0..self.screenrows {
            self.move_cursor(motion);
        }
    }

    fn insert_char(&mut self, c: char) {
        self.document.insert_char(self.cy, self.cx, c);
        self.cx += 1;
    }

    fn insert_newline(&mut self) {
        self.document.insert_newline(self.cy, self.cx);
        self.cy += 1;
        self.cx = 0;
    }

    fn delete_char(&mut self) {
        if self.cy == self.document.len() {
            return;
        }
        if self.cx == 0 && self.cy == 0 {
            return;
        }
        let (cy, cx) = self.document.delete_char(self.cy, self.cx);
        self.cy = cy;
        self.cx = cx;
    }

    fn save(&mut self) {
        if !self.file_manager.has_file() {
            log::debug!("save requested with no associated path");
            return;
        }
        match self.file_manager.save_file(&self.document) {
            Ok(lines) => self.status.set(format!("{} lines written", lines)),
            Err(err) => {
                log::error!("save failed: {:#}", err);
                self.status.set(format!("Save failed: {}", err));
            }
        }
    }

    fn row_len(&self, at: usize) -> usize {
        self.document.row(at).map_or(0, |row| row.len())
    }
}
