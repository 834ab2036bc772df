use srcvet_core::PromptSource;
use std::io::{self, BufRead, Write};

/// Production prompt source: writes the prompt to stdout and blocks on one
/// line of stdin. End of input yields `None`, which aborts the session with
/// a partial report.
pub struct TerminalPrompts;

impl PromptSource for TerminalPrompts {
    fn next_response(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let mut stdout = io::stdout();
        stdout.write_all(prompt.as_bytes())?;
        stdout.flush()?;

        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_owned()))
    }
}
