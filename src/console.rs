use anyhow::{Context, Result};
use std::io::{self, BufRead, StdinLock, Stdout, Write};

/// Line-oriented text console the session talks through
pub trait Console {
    /// Show `message` (no newline) and read one line of input.
    /// Returns None at end of input.
    fn prompt(&mut self, message: &str) -> Result<Option<String>>;

    /// Write one line of output
    fn println(&mut self, line: &str) -> Result<()>;
}

/// Console over any buffered reader and writer
pub struct IoConsole<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> IoConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        IoConsole { input, output }
    }

    /// Everything written so far
    pub fn output(&self) -> &W {
        &self.output
    }
}

impl IoConsole<StdinLock<'static>, Stdout> {
    /// Console bound to the process stdin/stdout
    pub fn stdio() -> Self {
        IoConsole::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console for IoConsole<R, W> {
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{}", message).context("Failed to write prompt")?;
        self.output.flush().context("Failed to flush output")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read from stdin")?;
        if read == 0 {
            log::debug!("End of input at prompt {:?}", message.trim_end());
            return Ok(None);
        }

        let line = line.strip_suffix('\n').unwrap_or(&line);
        let line = line.strip_suffix('\r').unwrap_or(line);
        Ok(Some(line.to_string()))
    }

    fn println(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{}", line).context("Failed to write output")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_prompt_reads_lines_until_eof() {
        let mut console = IoConsole::new(Cursor::new("first\r\n second \n"), Vec::new());

        assert_eq!(console.prompt("> ").unwrap(), Some("first".to_string()));
        assert_eq!(console.prompt("> ").unwrap(), Some(" second ".to_string()));
        assert_eq!(console.prompt("> ").unwrap(), None);
        assert_eq!(String::from_utf8_lossy(console.output()), "> > > ");
    }

    #[test]
    fn test_last_line_without_newline() {
        let mut console = IoConsole::new(Cursor::new("q"), Vec::new());
        assert_eq!(console.prompt("").unwrap(), Some("q".to_string()));
    }

    #[test]
    fn test_println() {
        let mut console = IoConsole::new(Cursor::new(""), Vec::new());
        console.println("hello").unwrap();
        assert_eq!(console.output(), b"hello\n");
    }
}
