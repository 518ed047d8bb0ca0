use crossterm::terminal;
use jot::editor::{CleanUp, Editor};
use log::{error, info};
use std::io;

fn main() -> io::Result<()> {
    env_logger::init();
    info!("Logging initialized");

    let _clean_up = CleanUp;
    if let Err(e) = terminal::enable_raw_mode() {
        error!("Error enabling raw mode: {}", e);
    };

    let mut editor = Editor::default();
    while editor.run()? {}

    Ok(())
}
