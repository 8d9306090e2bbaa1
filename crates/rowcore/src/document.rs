use crate::row::Row;

/// An ordered sequence of rows. Rows are referenced by index only; any
/// insertion or deletion shifts the indices above it, and callers re-derive
/// positions from the new index space.
#[derive(Debug, Clone, Default)]
pub struct Document {
    rows: Vec<Row>,
}

impl Document {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Builds a document by inserting the given lines in order. Lines are
    /// expected to arrive with line endings already stripped.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut document = Self::new();
        for line in lines {
            document.insert_row(document.len(), line.as_ref());
        }
        document
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, at: usize) -> Option<&Row> {
        self.rows.get(at)
    }

    /// Inserts a new row holding `text` at `at`, clamped into `0..=len`.
    pub fn insert_row(&mut self, at: usize, text: &str) {
        let at = at.min(self.rows.len());
        self.rows.insert(at, Row::new(text));
    }

    /// Removes the row at `at`; out of range is a no-op.
    pub fn delete_row(&mut self, at: usize) {
        if at >= self.rows.len() {
            log::debug!("delete_row out of range: {} >= {}", at, self.rows.len());
            return;
        }
        self.rows.remove(at);
    }

    /// Inserts `ch` at `(row, col)`. When `row` is one past the last line,
    /// an empty row is appended first; `col` is clamped to the row length.
    pub fn insert_char(&mut self, row: usize, col: usize, ch: char) {
        if row == self.rows.len() {
            self.rows.push(Row::default());
        }
        if let Some(r) = self.rows.get_mut(row) {
            r.insert_char(col, ch);
        }
    }

    /// Deletes the character before `(row, col)`. At column 0 the row is
    /// merged into the previous one, which is how backspace joins lines.
    /// Returns the cursor position after the edit: the join point on a
    /// merge, the position of the removed character otherwise.
    pub fn delete_char(&mut self, row: usize, col: usize) -> (usize, usize) {
        if row >= self.rows.len() {
            return (row, col);
        }
        if col > 0 {
            self.rows[row].delete_char(col - 1);
            (row, col - 1)
        } else if row > 0 {
            let merged = self.rows.remove(row);
            let previous = &mut self.rows[row - 1];
            let join = previous.len();
            previous.append(merged.chars());
            (row - 1, join)
        } else {
            (0, 0)
        }
    }

    /// Splits the row at `(row, col)`: the prefix stays at `row`, the
    /// suffix becomes a new row at `row + 1`. On the line past the end of
    /// the document this appends an empty row instead.
    pub fn insert_newline(&mut self, row: usize, col: usize) {
        if row >= self.rows.len() {
            self.insert_row(self.rows.len(), "");
            return;
        }
        let suffix = self.rows[row].split_off(col);
        self.rows.insert(row + 1, suffix);
    }

    /// Serializes every row followed by exactly one `\n`, including the
    /// last one.
    pub fn rows_to_text(&self) -> String {
        let mut text = String::new();
        for row in &self.rows {
            text.push_str(row.chars());
            text.push('\n');
        }
        text
    }
}
