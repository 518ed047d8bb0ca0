pub mod buffer;
pub mod editor;
pub mod file;
pub mod key_handler;
pub mod utils;

#[cfg(test)]
mod editor_tests;
