//! Output sink for playback and printing.
//!
//! Playing or printing content produces lines of text. Where those lines go
//! is up to the caller: the shell writes them to stdout, tests collect them.

/// Receives lines produced by play/print operations
pub trait Console {
    fn line(&mut self, text: &str);
}

/// Writes every line to standard output
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutConsole;

impl Console for StdoutConsole {
    fn line(&mut self, text: &str) {
        println!("{}", text);
    }
}

/// Collects lines in memory
impl Console for Vec<String> {
    fn line(&mut self, text: &str) {
        self.push(text.to_string());
    }
}
