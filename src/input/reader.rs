use std::io::{self, BufRead};

/// Source of numbered input lines.
pub trait LineReader {
    /// Replaces the contents of `buf` with the next line, line ending
    /// stripped, and returns its 1-based number. `None` at EOF.
    fn next_line(&mut self, buf: &mut Vec<u8>) -> io::Result<Option<usize>>;
}

/// Splits a byte stream on `\n`, dropping a `\r` right before it.
pub struct NumberedLines<R> {
    inner: R,
    line_no: usize,
}

impl<R: BufRead> NumberedLines<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, line_no: 0 }
    }

    pub fn line_no(&self) -> usize {
        self.line_no
    }
}

impl<R: BufRead> LineReader for NumberedLines<R> {
    fn next_line(&mut self, buf: &mut Vec<u8>) -> io::Result<Option<usize>> {
        buf.clear();
        if self.inner.read_until(b'\n', buf)? == 0 {
            return Ok(None);
        }

        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }

        self.line_no += 1;
        Ok(Some(self.line_no))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_line() -> io::Result<()> {
        #[rustfmt::skip]
        let tests: [(&[u8], Vec<(usize, &str)>); 5] = [
            (b"", vec![]),
            (b"a x=1\nb x=2", vec![(1, "a x=1"), (2, "b x=2")]),
            (b"a x=1\r\nb x=2\r\n", vec![(1, "a x=1"), (2, "b x=2")]),
            (b"\n\na x=1\n", vec![(1, ""), (2, ""), (3, "a x=1")]),
            (b"a x=\"\r\"\n", vec![(1, "a x=\"\r\"")]),
        ];

        for (input, expected) in &tests {
            let mut reader = NumberedLines::new(*input);
            let mut buf = Vec::new();
            let mut lines = vec![];
            while let Some(no) = reader.next_line(&mut buf)? {
                lines.push((no, String::from_utf8_lossy(&buf).into_owned()));
            }

            let expected: Vec<_> = expected.iter().map(|(n, s)| (*n, s.to_string())).collect();
            assert_eq!(lines, expected, "while reading {:?}", input);
            assert_eq!(reader.line_no(), expected.len());
        }
        Ok(())
    }
}
