/// Column interval to which a tab character advances the rendered column.
pub const TAB_STOP: usize = 8;

/// One line of text: the logical content (`chars`) plus its display-ready
/// form (`render`), in which every tab is expanded with spaces up to the
/// next tab stop. Columns are character indices.
///
/// `render` is recomputed by every mutating method before it returns, so it
/// is never observable in a stale state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    chars: String,
    render: String,
}

impl Row {
    pub fn new(text: &str) -> Self {
        let mut row = Self {
            chars: text.to_string(),
            render: String::new(),
        };
        row.update_render();
        row
    }

    /// Logical length in characters.
    pub fn len(&self) -> usize {
        self.chars.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn chars(&self) -> &str {
        &self.chars
    }

    pub fn render(&self) -> &str {
        &self.render
    }

    /// Rendered length in characters.
    pub fn render_len(&self) -> usize {
        self.render.chars().count()
    }

    /// Inserts `ch` at column `at`, clamped to the end of the row.
    pub fn insert_char(&mut self, at: usize, ch: char) {
        let at = at.min(self.len());
        let idx = self.byte_index(at);
        self.chars.insert(idx, ch);
        self.update_render();
    }

    /// Removes the character at column `at`; out of range is a no-op.
    pub fn delete_char(&mut self, at: usize) {
        if at >= self.len() {
            return;
        }
        let idx = self.byte_index(at);
        self.chars.remove(idx);
        self.update_render();
    }

    pub fn append(&mut self, text: &str) {
        self.chars.push_str(text);
        self.update_render();
    }

    /// Splits the row at column `at`, keeping the prefix in place and
    /// returning the suffix as a new row.
    pub fn split_off(&mut self, at: usize) -> Row {
        let idx = self.byte_index(at);
        let suffix = self.chars.split_off(idx);
        self.update_render();
        Row::new(&suffix)
    }

    /// Maps a logical column to its rendered column: ordinary characters
    /// advance by one, a tab advances to the next multiple of [`TAB_STOP`].
    /// Pure; shared by cursor placement and tests.
    pub fn cx_to_rx(&self, cx: usize) -> usize {
        let mut rx = 0;
        for ch in self.chars.chars().take(cx) {
            if ch == '\t' {
                rx += TAB_STOP - (rx % TAB_STOP);
            } else {
                rx += 1;
            }
        }
        rx
    }

    // Recomputes `render` wholesale from `chars`. O(row length), which is
    // fine for interactively sized rows.
    fn update_render(&mut self) {
        self.render.clear();
        let mut width = 0;
        for ch in self.chars.chars() {
            if ch == '\t' {
                self.render.push(' ');
                width += 1;
                while width % TAB_STOP != 0 {
                    self.render.push(' ');
                    width += 1;
                }
            } else {
                self.render.push(ch);
                width += 1;
            }
        }
    }

    fn byte_index(&self, at: usize) -> usize {
        self.chars
            .char_indices()
            .nth(at)
            .map(|(idx, _)| idx)
            .unwrap_or(self.chars.len())
    }
}
