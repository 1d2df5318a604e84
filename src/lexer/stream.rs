//! Octet source with one octet of lookahead and pushback.

use std::io::{self, BufRead, BufReader, ErrorKind, Read};

pub struct ByteStream<R> {
    input: BufReader<R>,
    pushback: Option<u8>,
    offset: u32,
}

impl<R: Read> ByteStream<R> {
    pub fn new(reader: R) -> Self {
        ByteStream {
            input: BufReader::new(reader),
            pushback: None,
            offset: 0,
        }
    }

    /// Offset of the next octet `read` would return.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Consumes the next octet. `Ok(None)` is end of input.
    pub fn read(&mut self) -> io::Result<Option<u8>> {
        let next = match self.pushback.take() {
            Some(c) => Some(c),
            None => {
                let next = self.fill()?;
                if next.is_some() {
                    self.input.consume(1);
                }
                next
            }
        };

        if next.is_some() {
            self.offset = self.offset.saturating_add(1);
        }
        Ok(next)
    }

    /// Returns the next octet without consuming it.
    pub fn peek(&mut self) -> io::Result<Option<u8>> {
        match self.pushback {
            Some(c) => Ok(Some(c)),
            None => self.fill(),
        }
    }

    /// Returns `c`, the octet last consumed, to the stream.
    pub fn unread(&mut self, c: u8) {
        debug_assert!(self.pushback.is_none(), "only one octet of pushback");
        self.pushback = Some(c);
        self.offset = self.offset.saturating_sub(1);
    }

    fn fill(&mut self) -> io::Result<Option<u8>> {
        loop {
            match self.input.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ByteStream;

    #[test]
    fn test_peek_does_not_consume() {
        let mut stream = ByteStream::new("ab".as_bytes());

        assert_eq!(stream.peek().unwrap(), Some(b'a'));
        assert_eq!(stream.read().unwrap(), Some(b'a'));
        assert_eq!(stream.offset(), 1);
        assert_eq!(stream.peek().unwrap(), Some(b'b'));
        assert_eq!(stream.read().unwrap(), Some(b'b'));
        assert_eq!(stream.peek().unwrap(), None);
        assert_eq!(stream.read().unwrap(), None);
        assert_eq!(stream.offset(), 2);
    }

    #[test]
    fn test_unread_returns_octet() {
        let mut stream = ByteStream::new("xy".as_bytes());

        let c = stream.read().unwrap().unwrap();
        stream.unread(c);
        assert_eq!(stream.offset(), 0);
        assert_eq!(stream.peek().unwrap(), Some(b'x'));
        assert_eq!(stream.read().unwrap(), Some(b'x'));
        assert_eq!(stream.read().unwrap(), Some(b'y'));
    }
}
