use crate::buffer::TextBuffer;
use crate::editor::{CursorController, KeyHandler, Mode, PromptAction};
use crate::file;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::io;

impl Default for KeyHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyHandler {
    pub fn new() -> Self {
        KeyHandler {
            mode: Mode::Edit,
            anchor: None,
            clipboard: String::new(),
            prompt_input: String::new(),
        }
    }

    /// The selected char range, ordered, or None when nothing is selected.
    pub fn selection(
        &self,
        buffer: &TextBuffer,
        cursor: &CursorController,
    ) -> Option<(usize, usize)> {
        let anchor = self.anchor?;
        let here = buffer.index_of(cursor.cursor_x, cursor.cursor_y);
        if anchor == here {
            return None;
        }
        Some((anchor.min(here), anchor.max(here)))
    }

    pub fn edit_keypress(
        &mut self,
        key_event: KeyEvent,
        buffer: &mut TextBuffer,
        cursor: &mut CursorController,
        file_path: &mut Option<String>,
    ) -> io::Result<bool> {
        match key_event {
            KeyEvent {
                code: KeyCode::Char('q'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => return quit(),

            KeyEvent {
                code: KeyCode::Char('s'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => self.open_prompt(PromptAction::Save, file_path),

            KeyEvent {
                code: KeyCode::Char('o'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => self.open_prompt(PromptAction::Load, file_path),

            KeyEvent {
                code: KeyCode::Char('a'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => self.select_all(buffer, cursor),

            KeyEvent {
                code: KeyCode::Char('x'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => self.cut(buffer, cursor),

            KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => self.copy(buffer, cursor),

            KeyEvent {
                code: KeyCode::Char('v'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => self.paste(buffer, cursor),

            KeyEvent {
                code: KeyCode::Left,
                modifiers: KeyModifiers::SHIFT,
                ..
            } => {
                self.start_selection(buffer, cursor);
                move_left(buffer, cursor);
            }

            KeyEvent {
                code: KeyCode::Right,
                modifiers: KeyModifiers::SHIFT,
                ..
            } => {
                self.start_selection(buffer, cursor);
                move_right(buffer, cursor);
            }

            KeyEvent {
                code: KeyCode::Up,
                modifiers: KeyModifiers::SHIFT,
                ..
            } => {
                self.start_selection(buffer, cursor);
                move_up(buffer, cursor);
            }

            KeyEvent {
                code: KeyCode::Down,
                modifiers: KeyModifiers::SHIFT,
                ..
            } => {
                self.start_selection(buffer, cursor);
                move_down(buffer, cursor);
            }

            KeyEvent {
                code: KeyCode::Home,
                modifiers: KeyModifiers::SHIFT,
                ..
            } => {
                self.start_selection(buffer, cursor);
                move_home(cursor);
            }

            KeyEvent {
                code: KeyCode::End,
                modifiers: KeyModifiers::SHIFT,
                ..
            } => {
                self.start_selection(buffer, cursor);
                move_end(buffer, cursor);
            }

            KeyEvent {
                code: KeyCode::Left,
                ..
            } => {
                self.anchor = None;
                move_left(buffer, cursor);
            }

            KeyEvent {
                code: KeyCode::Right,
                ..
            } => {
                self.anchor = None;
                move_right(buffer, cursor);
            }

            KeyEvent {
                code: KeyCode::Up, ..
            } => {
                self.anchor = None;
                move_up(buffer, cursor);
            }

            KeyEvent {
                code: KeyCode::Down,
                ..
            } => {
                self.anchor = None;
                move_down(buffer, cursor);
            }

            KeyEvent {
                code: KeyCode::Home,
                ..
            } => {
                self.anchor = None;
                move_home(cursor);
            }

            KeyEvent {
                code: KeyCode::End, ..
            } => {
                self.anchor = None;
                move_end(buffer, cursor);
            }

            KeyEvent {
                code: KeyCode::Esc, ..
            } => self.anchor = None,

            KeyEvent {
                code: KeyCode::Enter,
                ..
            } => self.type_str(buffer, cursor, "\n"),

            KeyEvent {
                code: KeyCode::Backspace,
                ..
            } => self.backspace(buffer, cursor),

            KeyEvent {
                code: KeyCode::Delete,
                ..
            } => self.delete(buffer, cursor),

            KeyEvent {
                code: KeyCode::Char(ch),
                modifiers: KeyModifiers::NONE | KeyModifiers::SHIFT,
                ..
            } => self.type_str(buffer, cursor, &ch.to_string()),

            _ => {}
        }

        Ok(true)
    }

    pub fn prompt_keypress(
        &mut self,
        key_event: KeyEvent,
        buffer: &mut TextBuffer,
        cursor: &mut CursorController,
        file_path: &mut Option<String>,
    ) -> io::Result<bool> {
        match key_event {
            KeyEvent {
                code: KeyCode::Esc, ..
            } => {
                self.prompt_input.clear();
                self.mode = Mode::Edit;
            }

            KeyEvent {
                code: KeyCode::Enter,
                ..
            } => self.confirm_prompt(buffer, cursor, file_path),

            KeyEvent {
                code: KeyCode::Backspace,
                ..
            } => {
                self.prompt_input.pop();
            }

            KeyEvent {
                code: KeyCode::Char(ch),
                modifiers: KeyModifiers::NONE | KeyModifiers::SHIFT,
                ..
            } => self.prompt_input.push(ch),

            _ => {}
        }

        Ok(true)
    }

    fn open_prompt(&mut self, action: PromptAction, file_path: &Option<String>) {
        self.prompt_input = match action {
            // resaving the current file only takes Ctrl-S then Enter
            PromptAction::Save => file_path.clone().unwrap_or_default(),
            PromptAction::Load => String::new(),
        };
        self.mode = Mode::Prompt(action);
    }

    fn confirm_prompt(
        &mut self,
        buffer: &mut TextBuffer,
        cursor: &mut CursorController,
        file_path: &mut Option<String>,
    ) {
        let Mode::Prompt(action) = self.mode else {
            return;
        };
        let path = std::mem::take(&mut self.prompt_input);
        self.mode = Mode::Edit;
        if path.is_empty() {
            return;
        }

        match action {
            PromptAction::Save => {
                // failures are logged by the helper; the editor keeps going
                file::save_file(&path, &buffer.to_string());
            }
            PromptAction::Load => {
                let text = file::load_file(&path);
                buffer.replace(text);
                self.anchor = None;
                cursor.cursor_x = 0;
                cursor.cursor_y = 0;
                cursor.desired_cursor_x = 0;
            }
        }
        *file_path = Some(path);
    }

    fn start_selection(&mut self, buffer: &TextBuffer, cursor: &CursorController) {
        if self.anchor.is_none() {
            self.anchor = Some(buffer.index_of(cursor.cursor_x, cursor.cursor_y));
        }
    }

    fn select_all(&mut self, buffer: &TextBuffer, cursor: &mut CursorController) {
        self.anchor = Some(0);
        place_cursor(buffer, cursor, buffer.char_len());
    }

    fn cut(&mut self, buffer: &mut TextBuffer, cursor: &mut CursorController) {
        if let Some((start, end)) = self.selection(buffer, cursor) {
            self.clipboard = buffer.delete_range(start, end);
            self.anchor = None;
            place_cursor(buffer, cursor, start);
        }
    }

    fn copy(&mut self, buffer: &TextBuffer, cursor: &CursorController) {
        if let Some((start, end)) = self.selection(buffer, cursor) {
            self.clipboard = buffer.slice(start, end);
        }
    }

    fn paste(&mut self, buffer: &mut TextBuffer, cursor: &mut CursorController) {
        if self.clipboard.is_empty() {
            return;
        }
        let text = self.clipboard.clone();
        self.type_str(buffer, cursor, &text);
    }

    /// Inserts at the cursor, replacing the selection when one is active.
    fn type_str(&mut self, buffer: &mut TextBuffer, cursor: &mut CursorController, text: &str) {
        let at = self.insertion_point(buffer, cursor);
        buffer.insert(at, text);
        place_cursor(buffer, cursor, at + text.chars().count());
    }

    fn insertion_point(&mut self, buffer: &mut TextBuffer, cursor: &mut CursorController) -> usize {
        if let Some((start, end)) = self.selection(buffer, cursor) {
            buffer.delete_range(start, end);
            self.anchor = None;
            place_cursor(buffer, cursor, start);
            start
        } else {
            buffer.index_of(cursor.cursor_x, cursor.cursor_y)
        }
    }

    fn backspace(&mut self, buffer: &mut TextBuffer, cursor: &mut CursorController) {
        if let Some((start, end)) = self.selection(buffer, cursor) {
            buffer.delete_range(start, end);
            self.anchor = None;
            place_cursor(buffer, cursor, start);
            return;
        }
        let at = buffer.index_of(cursor.cursor_x, cursor.cursor_y);
        if at == 0 {
            return;
        }
        buffer.delete_range(at - 1, at);
        place_cursor(buffer, cursor, at - 1);
    }

    fn delete(&mut self, buffer: &mut TextBuffer, cursor: &mut CursorController) {
        if let Some((start, end)) = self.selection(buffer, cursor) {
            buffer.delete_range(start, end);
            self.anchor = None;
            place_cursor(buffer, cursor, start);
            return;
        }
        let at = buffer.index_of(cursor.cursor_x, cursor.cursor_y);
        if at >= buffer.char_len() {
            return;
        }
        buffer.delete_range(at, at + 1);
        place_cursor(buffer, cursor, at);
    }
}

fn quit() -> io::Result<bool> {
    Ok(false)
}

fn place_cursor(buffer: &TextBuffer, cursor: &mut CursorController, index: usize) {
    let (x, y) = buffer.position_of(index);
    cursor.cursor_x = x;
    cursor.cursor_y = y;
    cursor.desired_cursor_x = x;
}

fn move_left(buffer: &TextBuffer, cursor: &mut CursorController) {
    if cursor.cursor_x > 0 {
        cursor.cursor_x -= 1;
    } else if cursor.cursor_y > 0 {
        cursor.cursor_y -= 1;
        cursor.cursor_x = buffer.line_len(cursor.cursor_y);
    }
    cursor.desired_cursor_x = cursor.cursor_x;
}

fn move_right(buffer: &TextBuffer, cursor: &mut CursorController) {
    if cursor.cursor_x < buffer.line_len(cursor.cursor_y) {
        cursor.cursor_x += 1;
    } else if cursor.cursor_y + 1 < buffer.line_count() {
        cursor.cursor_y += 1;
        cursor.cursor_x = 0;
    }
    cursor.desired_cursor_x = cursor.cursor_x;
}

fn move_up(buffer: &TextBuffer, cursor: &mut CursorController) {
    if cursor.cursor_y > 0 {
        cursor.cursor_y -= 1;
        cursor.cursor_x = cursor
            .desired_cursor_x
            .min(buffer.line_len(cursor.cursor_y));
    }
}

fn move_down(buffer: &TextBuffer, cursor: &mut CursorController) {
    if cursor.cursor_y + 1 < buffer.line_count() {
        cursor.cursor_y += 1;
        cursor.cursor_x = cursor
            .desired_cursor_x
            .min(buffer.line_len(cursor.cursor_y));
    }
}

fn move_home(cursor: &mut CursorController) {
    cursor.cursor_x = 0;
    cursor.desired_cursor_x = 0;
}

fn move_end(buffer: &TextBuffer, cursor: &mut CursorController) {
    cursor.cursor_x = buffer.line_len(cursor.cursor_y);
    cursor.desired_cursor_x = cursor.cursor_x;
}
