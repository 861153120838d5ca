use std::fs::File;
use std::io::{self, BufRead, BufReader, Seek, SeekFrom};

/// Line-at-a-time reader over a log file that counts lines as it goes.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected, so a
/// stray binary write into the log never stops a scan.
#[derive(Debug)]
pub struct LineReader {
    reader: BufReader<File>,
    line_no: usize,
    buf: Vec<u8>,
}

impl LineReader {
    pub fn new(file: File) -> Self {
        Self {
            reader: BufReader::new(file),
            line_no: 0,
            buf: Vec::new(),
        }
    }

    /// Number of the last line returned (0 before the first read).
    pub fn line_no(&self) -> usize {
        self.line_no
    }

    /// Next line without its trailing newline, paired with its 1-based index.
    pub fn next_line(&mut self) -> io::Result<Option<(usize, String)>> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        self.line_no += 1;
        let text = String::from_utf8_lossy(&self.buf);
        Ok(Some((self.line_no, text.trim_end_matches('\n').to_string())))
    }

    /// Back to the start of the file.
    pub fn rewind(&mut self) -> io::Result<()> {
        self.reader.seek(SeekFrom::Start(0))?;
        self.line_no = 0;
        Ok(())
    }

    /// Discard lines so the next read returns line `index`, or hits EOF.
    pub fn skip_to(&mut self, index: usize) -> io::Result<()> {
        while self.line_no + 1 < index {
            self.buf.clear();
            if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
                break;
            }
            self.line_no += 1;
        }
        Ok(())
    }
}
