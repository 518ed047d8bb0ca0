use crate::buffer::TextBuffer;
use crossterm::event::*;
use crossterm::style::Attribute;
use crossterm::terminal::ClearType;
use crossterm::{cursor, event, execute, queue, terminal};
use std::io;
use std::io::{stdout, Write};

pub struct CleanUp;

impl Drop for CleanUp {
    fn drop(&mut self) {
        terminal::disable_raw_mode().expect("Could not turn off raw mode");
        Output::clear_screen().expect("Error");
    }
}

#[derive(Clone, Copy, PartialEq)]
pub enum PromptAction {
    Save,
    Load,
}

#[derive(Clone, Copy, PartialEq)]
pub enum Mode {
    Edit,
    Prompt(PromptAction),
}

pub struct KeyHandler {
    pub mode: Mode,
    pub anchor: Option<usize>,
    pub clipboard: String,
    pub prompt_input: String,
}

pub struct CursorController {
    pub cursor_x: usize,
    pub desired_cursor_x: usize,
    pub cursor_y: usize,

    pub screen_columns: usize,
    pub screen_rows: usize,
}

impl CursorController {
    fn new(win_size: (usize, usize)) -> Self {
        Self {
            cursor_x: 0,
            desired_cursor_x: 0,
            cursor_y: 0,
            screen_columns: win_size.0,
            screen_rows: win_size.1,
        }
    }
}

#[derive(Debug)]
struct EditorContents {
    content: String,
}

impl EditorContents {
    fn new() -> Self {
        Self {
            content: String::new(),
        }
    }

    fn push_str(&mut self, string: &str) {
        let mut result = String::new();
        for ch in string.chars() {
            result.push(ch);
            if ch == '\n' {
                result.push('\r');
            }
        }
        self.content.push_str(&result)
    }
}

impl Write for EditorContents {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match std::str::from_utf8(buf) {
            Ok(s) => {
                self.content.push_str(s);
                Ok(s.len())
            }
            Err(_) => Err(io::ErrorKind::WriteZero.into()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        let out = write!(stdout(), "{}", self.content);
        stdout().flush()?;
        self.content.clear();
        out
    }
}

fn char_slice(s: &str, from: usize, to: usize) -> &str {
    let start = s
        .char_indices()
        .nth(from)
        .map(|(idx, _)| idx)
        .unwrap_or(s.len());
    let end = s
        .char_indices()
        .nth(to)
        .map(|(idx, _)| idx)
        .unwrap_or(s.len());
    &s[start..end]
}

struct Output {
    editor_contents: EditorContents,
    cursor_controller: CursorController,
    scroll_y: usize,
}

impl Output {
    fn new() -> Self {
        let win_size = terminal::size()
            .map(|(x, y)| (x as usize, y as usize))
            .unwrap_or((80, 24));
        // bottom row is reserved for the status / prompt line
        let text_rows = win_size.1.saturating_sub(1).max(1);
        Self {
            editor_contents: EditorContents::new(),
            cursor_controller: CursorController::new((win_size.0, text_rows)),
            scroll_y: 0,
        }
    }

    fn clear_screen() -> io::Result<()> {
        execute!(stdout(), terminal::Clear(ClearType::All))?;
        execute!(stdout(), cursor::MoveTo(0, 0))
    }

    fn draw_rows(
        &mut self,
        lines: &[String],
        mut line_start: usize,
        selection: Option<(usize, usize)>,
    ) {
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                self.editor_contents.push_str("\n");
            }
            let len = line.chars().count();
            match selection {
                Some((start, end)) if start < line_start + len && end > line_start => {
                    let from = start.saturating_sub(line_start);
                    let to = (end - line_start).min(len);
                    self.editor_contents.push_str(char_slice(line, 0, from));
                    self.editor_contents
                        .push_str(&Attribute::Reverse.to_string());
                    self.editor_contents.push_str(char_slice(line, from, to));
                    self.editor_contents.push_str(&Attribute::Reset.to_string());
                    self.editor_contents.push_str(char_slice(line, to, len));
                }
                _ => self.editor_contents.push_str(line),
            }
            line_start += len + 1;
        }
    }

    fn refresh_screen(
        &mut self,
        buffer: &TextBuffer,
        selection: Option<(usize, usize)>,
        status: &str,
        prompt_cursor: Option<usize>,
    ) -> io::Result<()> {
        queue!(
            self.editor_contents,
            cursor::Hide,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0)
        )?;

        let cursor_y = self.cursor_controller.cursor_y;
        let rows = self.cursor_controller.screen_rows;

        if cursor_y >= self.scroll_y + rows {
            self.scroll_y = cursor_y - rows + 1;
        } else if cursor_y < self.scroll_y {
            self.scroll_y = cursor_y;
        }

        let lines = buffer.lines();
        let end_of_displayed = lines.len().min(self.scroll_y + rows);
        let displayed_lines = &lines[self.scroll_y..end_of_displayed];
        let first_line_start = buffer.index_of(0, self.scroll_y);

        self.draw_rows(displayed_lines, first_line_start, selection);

        queue!(self.editor_contents, cursor::MoveTo(0, rows as u16))?;
        let status: String = status
            .chars()
            .take(self.cursor_controller.screen_columns)
            .collect();
        self.editor_contents.push_str(&status);

        let (col, row) = match prompt_cursor {
            Some(col) => (col, rows),
            None => (self.cursor_controller.cursor_x, cursor_y - self.scroll_y),
        };
        queue!(
            self.editor_contents,
            cursor::MoveTo(col as u16, row as u16),
            cursor::Show
        )?;
        self.editor_contents.flush()
    }
}

struct Reader;

impl Reader {
    fn read_key(&self) -> io::Result<KeyEvent> {
        loop {
            if let Event::Key(event) = event::read()? {
                return Ok(event);
            }
        }
    }
}

pub struct Editor {
    reader: Reader,
    output: Output,
    buffer: TextBuffer,
    key_handler: KeyHandler,
    file_path: Option<String>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new("", None)
    }
}

impl Editor {
    pub fn new(original_text: &str, file_path: Option<String>) -> Self {
        Self {
            reader: Reader,
            output: Output::new(),
            buffer: TextBuffer::new(original_text),
            key_handler: KeyHandler::new(),
            file_path,
        }
    }

    fn handle_keypress(&mut self, key_event: KeyEvent) -> io::Result<bool> {
        match self.key_handler.mode {
            Mode::Edit => self.key_handler.edit_keypress(
                key_event,
                &mut self.buffer,
                &mut self.output.cursor_controller,
                &mut self.file_path,
            ),
            Mode::Prompt(_) => self.key_handler.prompt_keypress(
                key_event,
                &mut self.buffer,
                &mut self.output.cursor_controller,
                &mut self.file_path,
            ),
        }
    }

    fn process_keypress(&mut self) -> io::Result<bool> {
        let key_event = self.reader.read_key()?;
        self.handle_keypress(key_event)
    }

    fn status_line(&self) -> String {
        match self.key_handler.mode {
            Mode::Prompt(PromptAction::Save) => {
                format!("Save to: {}", self.key_handler.prompt_input)
            }
            Mode::Prompt(PromptAction::Load) => {
                format!("Load from: {}", self.key_handler.prompt_input)
            }
            Mode::Edit => format!(
                "{} | Ctrl-S save  Ctrl-O load  Ctrl-Q quit",
                self.file_path.as_deref().unwrap_or("[scratch]")
            ),
        }
    }

    fn refresh_screen(&mut self) -> io::Result<()> {
        let status = self.status_line();
        let prompt_cursor = match self.key_handler.mode {
            Mode::Prompt(_) => Some(status.chars().count()),
            Mode::Edit => None,
        };
        let selection = self
            .key_handler
            .selection(&self.buffer, &self.output.cursor_controller);
        self.output
            .refresh_screen(&self.buffer, selection, &status, prompt_cursor)
    }

    pub fn run(&mut self) -> io::Result<bool> {
        self.refresh_screen()?;
        self.process_keypress()
    }

    pub fn test_run(&mut self, key_event: KeyEvent) -> io::Result<bool> {
        self.refresh_screen()?;
        self.handle_keypress(key_event)
    }
}
