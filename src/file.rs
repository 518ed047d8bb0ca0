use log::error;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};

/// Writes `content` verbatim to `path`, creating or truncating the file.
///
/// Returns false on any I/O failure; the error is logged. There is no
/// atomicity guarantee, a failure mid-write leaves a partial file behind.
pub fn save_file(path: &str, content: &str) -> bool {
    let mut file = match File::create(path) {
        Ok(file) => file,
        Err(e) => {
            error!("Could not open {} for writing: {}", path, e);
            return false;
        }
    };
    if let Err(e) = file.write_all(content.as_bytes()) {
        error!("Could not write to {}: {}", path, e);
        return false;
    }
    true
}

/// Reads `path` line by line, appending a newline after each line.
///
/// On any failure the error is logged and whatever accumulated so far
/// (possibly nothing) is returned.
pub fn load_file(path: &str) -> String {
    let mut result = String::new();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            error!("Could not open {} for reading: {}", path, e);
            return result;
        }
    };
    for line in BufReader::new(file).lines() {
        match line {
            Ok(line) => {
                result.push_str(&line);
                result.push('\n');
            }
            Err(e) => {
                error!("Could not read from {}: {}", path, e);
                break;
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::{load_file, save_file};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("out.txt");
        let path = path.to_str().unwrap();

        let content = "Hello, world!\nSecond line\n";
        assert!(save_file(path, content));
        assert_eq!(load_file(path), content);
    }

    #[test]
    fn save_to_unwritable_path_returns_false() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("missing").join("out.txt");
        assert!(!save_file(path.to_str().unwrap(), "text"));
    }

    #[test]
    fn load_of_missing_file_returns_empty() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("absent.txt");
        assert_eq!(load_file(path.to_str().unwrap()), "");
    }

    #[test]
    fn load_terminates_every_line_with_a_newline() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("lines.txt");
        fs::write(&path, "one\ntwo\nthree").expect("Failed to write fixture");

        let loaded = load_file(path.to_str().unwrap());
        assert_eq!(loaded, "one\ntwo\nthree\n");
        assert_eq!(loaded.matches('\n').count(), 3);
    }
}
