//! Multi-line code buffer behind the editor pane
//!
//! Cursor columns are character indices, not byte offsets, so multi-byte
//! characters move and delete as one unit.

/// Spaces inserted for the Tab key
pub const TAB_INSERT: &str = "  ";

#[derive(Debug, Clone)]
pub struct Editor {
    lines: Vec<String>,
    row: usize,
    col: usize,
    scroll: usize,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new("")
    }
}

impl Editor {
    pub fn new(text: &str) -> Self {
        let mut editor = Self { lines: vec![String::new()], row: 0, col: 0, scroll: 0 };
        editor.set_text(text);
        editor
    }

    /// Full buffer contents, lines joined with `\n`
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Replace the buffer; the cursor moves to the start
    pub fn set_text(&mut self, text: &str) {
        let normalized = text.replace("\r\n", "\n");
        self.lines = normalized.split('\n').map(str::to_string).collect();
        self.row = 0;
        self.col = 0;
        self.scroll = 0;
    }

    pub fn clear(&mut self) {
        self.set_text("");
    }

    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(|l| l.trim().is_empty())
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// (row, column) of the cursor, zero-based, column in characters
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// First visible row
    pub fn scroll(&self) -> usize {
        self.scroll
    }

    fn current_len(&self) -> usize {
        self.lines[self.row].chars().count()
    }

    fn byte_index(line: &str, col: usize) -> usize {
        line.char_indices().nth(col).map(|(i, _)| i).unwrap_or(line.len())
    }

    pub fn insert_char(&mut self, c: char) {
        if c == '\n' {
            self.newline();
            return;
        }
        let line = &mut self.lines[self.row];
        let idx = Self::byte_index(line, self.col);
        line.insert(idx, c);
        self.col += 1;
    }

    pub fn insert_str(&mut self, s: &str) {
        for c in s.chars() {
            self.insert_char(c);
        }
    }

    pub fn insert_tab(&mut self) {
        self.insert_str(TAB_INSERT);
    }

    /// Split the current line at the cursor
    pub fn newline(&mut self) {
        let line = &mut self.lines[self.row];
        let idx = Self::byte_index(line, self.col);
        let rest = line.split_off(idx);
        self.lines.insert(self.row + 1, rest);
        self.row += 1;
        self.col = 0;
    }

    /// Delete before the cursor, joining lines at column zero.
    /// Returns false when there was nothing to delete.
    pub fn backspace(&mut self) -> bool {
        if self.col > 0 {
            let line = &mut self.lines[self.row];
            let idx = Self::byte_index(line, self.col - 1);
            line.remove(idx);
            self.col -= 1;
            true
        } else if self.row > 0 {
            let line = self.lines.remove(self.row);
            self.row -= 1;
            self.col = self.current_len();
            self.lines[self.row].push_str(&line);
            true
        } else {
            false
        }
    }

    /// Delete under the cursor, joining the next line at end of line
    pub fn delete(&mut self) -> bool {
        if self.col < self.current_len() {
            let line = &mut self.lines[self.row];
            let idx = Self::byte_index(line, self.col);
            line.remove(idx);
            true
        } else if self.row + 1 < self.lines.len() {
            let next = self.lines.remove(self.row + 1);
            self.lines[self.row].push_str(&next);
            true
        } else {
            false
        }
    }

    pub fn move_left(&mut self) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            self.row -= 1;
            self.col = self.current_len();
        }
    }

    pub fn move_right(&mut self) {
        if self.col < self.current_len() {
            self.col += 1;
        } else if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = 0;
        }
    }

    pub fn move_up(&mut self) {
        if self.row > 0 {
            self.row -= 1;
            self.col = self.col.min(self.current_len());
        }
    }

    pub fn move_down(&mut self) {
        if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = self.col.min(self.current_len());
        }
    }

    pub fn move_home(&mut self) {
        self.col = 0;
    }

    pub fn move_end(&mut self) {
        self.col = self.current_len();
    }

    /// Adjust the scroll offset so the cursor row is inside a viewport of `height` rows
    pub fn ensure_visible(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.row < self.scroll {
            self.scroll = self.row;
        } else if self.row >= self.scroll + height {
            self.scroll = self.row + 1 - height;
        }
    }
}
