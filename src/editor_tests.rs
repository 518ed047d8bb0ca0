#[cfg(test)]
mod tests {
    use crate::editor::Editor;
    use crate::utils::{control_key_event, create_key_event, shift_key_event, string_to_key_events};
    use crossterm::event::{KeyCode, KeyEvent};
    use std::fs;
    use tempfile::tempdir;

    fn feed(editor: &mut Editor, key_events: Vec<KeyEvent>) {
        for key_event in key_events {
            editor.test_run(key_event).expect("key handling failed");
        }
    }

    fn save_keys(path: &str) -> Vec<KeyEvent> {
        let mut keys = vec![control_key_event(KeyCode::Char('s'))];
        keys.extend(string_to_key_events(path.to_string()));
        keys.push(create_key_event(KeyCode::Enter));
        keys
    }

    #[test]
    fn typing_then_saving_writes_the_buffer() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("note.txt");
        let path_str = path.to_str().unwrap();

        let mut editor = Editor::default();
        let mut keys = string_to_key_events(String::from("Hello, world!"));
        keys.push(create_key_event(KeyCode::Enter));
        keys.extend(string_to_key_events(String::from("Second line")));
        keys.extend(save_keys(path_str));
        keys.push(control_key_event(KeyCode::Char('q')));
        feed(&mut editor, keys);

        let saved = fs::read_to_string(&path).expect("Failed to read saved file");
        assert_eq!(saved, "Hello, world!\nSecond line");
    }

    #[test]
    fn select_all_then_typing_replaces_everything() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("note.txt");

        let mut editor = Editor::default();
        let mut keys = string_to_key_events(String::from("draft\nno longer wanted"));
        keys.push(control_key_event(KeyCode::Char('a')));
        keys.extend(string_to_key_events(String::from("final")));
        keys.extend(save_keys(path.to_str().unwrap()));
        feed(&mut editor, keys);

        let saved = fs::read_to_string(&path).expect("Failed to read saved file");
        assert_eq!(saved, "final");
    }

    #[test]
    fn cut_and_paste_moves_the_selection() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("note.txt");

        let mut editor = Editor::default();
        let mut keys = string_to_key_events(String::from("abc"));
        keys.push(create_key_event(KeyCode::Enter));
        keys.extend(string_to_key_events(String::from("def")));

        // select "def" backwards, cut it, join the lines, paste it back
        keys.push(shift_key_event(KeyCode::Home));
        keys.push(control_key_event(KeyCode::Char('x')));
        keys.push(create_key_event(KeyCode::Backspace));
        keys.push(control_key_event(KeyCode::Char('v')));

        keys.extend(save_keys(path.to_str().unwrap()));
        feed(&mut editor, keys);

        let saved = fs::read_to_string(&path).expect("Failed to read saved file");
        assert_eq!(saved, "abcdef");
    }

    #[test]
    fn copy_keeps_the_selection_in_place() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("note.txt");

        let mut editor = Editor::default();
        let mut keys = string_to_key_events(String::from("dup"));
        keys.push(control_key_event(KeyCode::Char('a')));
        keys.push(control_key_event(KeyCode::Char('c')));
        keys.push(create_key_event(KeyCode::End));
        keys.push(control_key_event(KeyCode::Char('v')));
        keys.extend(save_keys(path.to_str().unwrap()));
        feed(&mut editor, keys);

        let saved = fs::read_to_string(&path).expect("Failed to read saved file");
        assert_eq!(saved, "dupdup");
    }

    #[test]
    fn loading_replaces_the_buffer_and_prefills_the_save_prompt() {
        let dir = tempdir().expect("Failed to create temp dir");
        let source = dir.path().join("source.txt");
        fs::write(&source, "alpha\nbeta\n").expect("Failed to write fixture");

        let mut editor = Editor::default();
        let mut keys = vec![control_key_event(KeyCode::Char('o'))];
        keys.extend(string_to_key_events(source.to_str().unwrap().to_string()));
        keys.push(create_key_event(KeyCode::Enter));

        // cursor is back at the origin; prepend a marker, then resave with
        // the prompt prefilled by the loaded path
        keys.extend(string_to_key_events(String::from("# ")));
        keys.push(control_key_event(KeyCode::Char('s')));
        keys.push(create_key_event(KeyCode::Enter));
        feed(&mut editor, keys);

        let saved = fs::read_to_string(&source).expect("Failed to read saved file");
        assert_eq!(saved, "# alpha\nbeta\n");
    }

    #[test]
    fn failed_load_replaces_the_buffer_with_nothing() {
        let dir = tempdir().expect("Failed to create temp dir");
        let missing = dir.path().join("absent.txt");
        let path = dir.path().join("note.txt");

        let mut editor = Editor::default();
        let mut keys = string_to_key_events(String::from("keep me"));
        keys.push(control_key_event(KeyCode::Char('o')));
        keys.extend(string_to_key_events(missing.to_str().unwrap().to_string()));
        keys.push(create_key_event(KeyCode::Enter));

        // save prompt is prefilled with the failed load path; clear it first
        keys.push(control_key_event(KeyCode::Char('s')));
        for _ in 0..missing.to_str().unwrap().chars().count() {
            keys.push(create_key_event(KeyCode::Backspace));
        }
        keys.extend(string_to_key_events(path.to_str().unwrap().to_string()));
        keys.push(create_key_event(KeyCode::Enter));
        feed(&mut editor, keys);

        let saved = fs::read_to_string(&path).expect("Failed to read saved file");
        assert_eq!(saved, "");
    }
}
