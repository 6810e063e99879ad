use std::io::{self, BufRead, Write};

/// Prompts for and reads one line at a time.
pub struct LineReader<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
        }
    }

    /// `None` at end of input, after moving `out` to a fresh line.
    pub fn next_line(&mut self, prompt: &str, out: &mut dyn Write) -> io::Result<Option<String>> {
        write!(out, "{prompt}")?;
        out.flush()?;

        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            writeln!(out)?;
            out.flush()?;
            return Ok(None);
        }

        let line = String::from_utf8_lossy(&self.buf);
        Ok(Some(line.trim_end_matches(|c| c == '\n' || c == '\r').to_string()))
    }
}
