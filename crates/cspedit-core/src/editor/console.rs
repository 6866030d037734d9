//! Line-oriented terminal collaborator.

use std::collections::VecDeque;
use std::io::{self, BufRead, StdinLock, Stdout, Write};

/// Reads lines from and writes text to the user.
pub trait Console {
    /// Show `message` and wait for one line of input.
    ///
    /// Returns `Ok(None)` when input is closed. The returned line carries no
    /// line terminator.
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>>;

    /// Write `text` followed by a newline.
    fn display(&mut self, text: &str) -> io::Result<()>;
}

impl<T: Console + ?Sized> Console for &mut T {
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        (**self).prompt(message)
    }

    fn display(&mut self, text: &str) -> io::Result<()> {
        (**self).display(text)
    }
}

/// Console over a buffered reader and a writer, stdin/stdout by default.
pub struct StdConsole<R = StdinLock<'static>, W = Stdout> {
    input: R,
    output: W,
}

impl StdConsole {
    /// Console on the process's standard streams.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> StdConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Console for StdConsole<R, W> {
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        self.output.write_all(message.as_bytes())?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn display(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")?;
        self.output.flush()
    }
}

/// Console fed from a fixed script of input lines.
///
/// Records every prompt and displayed text so tests can assert on the
/// transcript. Running out of script behaves like closed input.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    inputs: VecDeque<String>,
    prompts: Vec<String>,
    displayed: Vec<String>,
}

impl ScriptedConsole {
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    pub fn displayed(&self) -> &[String] {
        &self.displayed
    }

    /// Lines not consumed by the session.
    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }
}

impl Console for ScriptedConsole {
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        self.prompts.push(message.to_string());
        Ok(self.inputs.pop_front())
    }

    fn display(&mut self, text: &str) -> io::Result<()> {
        self.displayed.push(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn std_console_strips_line_endings() {
        let mut console = StdConsole::new(Cursor::new("2\r\n'none'\n"), Vec::new());
        assert_eq!(console.prompt("> ").unwrap().as_deref(), Some("2"));
        assert_eq!(console.prompt("> ").unwrap().as_deref(), Some("'none'"));
        assert_eq!(console.prompt("> ").unwrap(), None);
        assert_eq!(console.into_output(), b"> > > ");
    }

    #[test]
    fn std_console_keeps_last_line_without_newline() {
        let mut console = StdConsole::new(Cursor::new("q"), Vec::new());
        assert_eq!(console.prompt("").unwrap().as_deref(), Some("q"));
    }

    #[test]
    fn std_console_display_appends_newline() {
        let mut console = StdConsole::new(Cursor::new(""), Vec::new());
        console.display("hello").unwrap();
        assert_eq!(console.into_output(), b"hello\n");
    }

    #[test]
    fn scripted_console_records_transcript() {
        let mut console = ScriptedConsole::new(["1"]);
        assert_eq!(console.prompt("pick: ").unwrap().as_deref(), Some("1"));
        assert_eq!(console.prompt("pick: ").unwrap(), None);
        console.display("done").unwrap();

        assert_eq!(console.prompts(), ["pick: ", "pick: "]);
        assert_eq!(console.displayed(), ["done"]);
        assert_eq!(console.remaining(), 0);
    }
}
