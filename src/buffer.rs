use std::fmt;

/// Editable text addressed by char position, so multi-byte characters
/// count as one step for the cursor.
pub struct TextBuffer {
    text: String,
}

impl Default for TextBuffer {
    fn default() -> Self {
        TextBuffer::new("")
    }
}

impl TextBuffer {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self, position: usize) -> usize {
        self.text
            .char_indices()
            .nth(position)
            .map(|(idx, _)| idx)
            .unwrap_or(self.text.len())
    }

    pub fn insert(&mut self, position: usize, text: &str) {
        let at = self.byte_index(position);
        self.text.insert_str(at, text);
    }

    /// Removes [start, end) and returns the removed text.
    pub fn delete_range(&mut self, start: usize, end: usize) -> String {
        let start_byte = self.byte_index(start);
        let end_byte = self.byte_index(end);
        let removed = self.text[start_byte..end_byte].to_string();
        self.text.replace_range(start_byte..end_byte, "");
        removed
    }

    pub fn slice(&self, start: usize, end: usize) -> String {
        self.text[self.byte_index(start)..self.byte_index(end)].to_string()
    }

    /// Replaces the whole content, e.g. after a load.
    pub fn replace(&mut self, text: String) {
        self.text = text;
    }

    /// Splits on `\n`, keeping a trailing empty line so the cursor can sit
    /// after a final newline. Always yields at least one line.
    pub fn lines(&self) -> Vec<String> {
        self.text.split('\n').map(|line| line.to_string()).collect()
    }

    pub fn line_count(&self) -> usize {
        self.text.split('\n').count()
    }

    pub fn line_len(&self, y: usize) -> usize {
        self.text
            .split('\n')
            .nth(y)
            .map(|line| line.chars().count())
            .unwrap_or(0)
    }

    /// Char index of screen position (x, y), clamped into the buffer.
    pub fn index_of(&self, x: usize, y: usize) -> usize {
        let mut index = 0;
        for (cur_y, line) in self.text.split('\n').enumerate() {
            let len = line.chars().count();
            if cur_y == y {
                return index + x.min(len);
            }
            index += len + 1;
        }
        self.char_len()
    }

    /// Screen position (x, y) of a char index, clamped into the buffer.
    pub fn position_of(&self, index: usize) -> (usize, usize) {
        let mut remaining = index.min(self.char_len());
        for (y, line) in self.text.split('\n').enumerate() {
            let len = line.chars().count();
            if remaining <= len {
                return (remaining, y);
            }
            remaining -= len + 1;
        }
        (0, 0)
    }
}

impl fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
