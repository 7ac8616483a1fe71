//! Minimal character scanner shared by the reference and annotation parsers.

/// Cursor over a borrowed line of text.
#[derive(Debug, Clone)]
pub(crate) struct Scanner<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    /// Unconsumed input.
    pub(crate) fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    pub(crate) fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    /// Consume `expected` if the input starts with it.
    pub(crate) fn eat(&mut self, expected: &str) -> bool {
        if self.rest().starts_with(expected) {
            self.pos += expected.len();
            true
        } else {
            false
        }
    }

    /// Consume a run of ASCII digits and parse it.
    pub(crate) fn unsigned(&mut self) -> Option<usize> {
        let rest = self.rest();
        let len = rest.bytes().take_while(u8::is_ascii_digit).count();
        if len == 0 {
            return None;
        }
        let value = rest[..len].parse().ok()?;
        self.pos += len;
        Some(value)
    }

    /// Consume everything before the first `stop` character, leaving `stop` unconsumed.
    pub(crate) fn until(&mut self, stop: char) -> Option<&'a str> {
        let rest = self.rest();
        let end = rest.find(stop)?;
        self.pos += end;
        Some(&rest[..end])
    }
}
