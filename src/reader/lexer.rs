//! Line classification and tokenizing for PIX text.

use crate::util::{Error, Result};

/// Kind of a logical line, with comments after values already removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Line<'a> {
    Blank,
    /// Full-line comment; holds the trimmed line including `#`.
    Comment(&'a str),
    /// `<kind> {`
    Open(&'a str),
    Close,
    /// Line starting with a row index.
    Row(&'a str),
    /// `key: value`
    Prop(&'a str),
}

/// Line source with 1-based line numbers.
pub(crate) struct Cursor<'a> {
    lines: std::str::Lines<'a>,
    line_no: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
            line_no: 0,
        }
    }

    /// Number of the line returned last.
    #[inline]
    pub fn line_no(&self) -> usize {
        self.line_no
    }

    /// Next raw line with comments stripped and whitespace trimmed.
    pub fn next_raw(&mut self) -> Option<&'a str> {
        let line = self.lines.next()?;
        self.line_no += 1;
        Some(strip_comment(line).trim())
    }

    /// Next raw line, failing at end of input.
    pub fn expect_raw(&mut self, what: &str) -> Result<&'a str> {
        match self.next_raw() {
            Some(line) => Ok(line),
            None => Err(Error::parse(self.line_no + 1, format!("unexpected end of input, expected {}", what))),
        }
    }

    /// Next classified line.
    pub fn next_line(&mut self) -> Option<Result<Line<'a>>> {
        let raw = self.lines.next()?;
        self.line_no += 1;
        Some(classify(raw, self.line_no))
    }

    /// Parse error at the current line.
    pub fn error(&self, message: impl Into<String>) -> Error {
        Error::parse(self.line_no, message)
    }
}

fn classify(raw: &str, line_no: usize) -> Result<Line<'_>> {
    let trimmed = raw.trim();
    if trimmed.starts_with('#') {
        return Ok(Line::Comment(trimmed));
    }

    let line = strip_comment(raw).trim();
    if line.is_empty() {
        return Ok(Line::Blank);
    }
    if line == "}" {
        return Ok(Line::Close);
    }
    if let Some(head) = line.strip_suffix('{') {
        let kind = head.trim();
        if kind.is_empty() || kind.contains(char::is_whitespace) {
            return Err(Error::parse(line_no, format!("invalid section header '{}'", line)));
        }
        return Ok(Line::Open(kind));
    }
    if line.starts_with(|c: char| c.is_ascii_digit()) {
        return Ok(Line::Row(line));
    }
    if line.contains(':') {
        return Ok(Line::Prop(line));
    }

    Err(Error::parse(line_no, format!("unrecognized line '{}'", line)))
}

/// Cut a trailing `#` comment that is not inside a quoted string.
pub(crate) fn strip_comment(line: &str) -> &str {
    let mut quoted = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => quoted = !quoted,
            '#' if !quoted => return &line[..i],
            _ => {}
        }
    }
    line
}

/// Split on whitespace, keeping quoted strings (quotes included) whole.
pub(crate) fn tokenize(text: &str) -> std::result::Result<Vec<&str>, String> {
    let mut tokens = Vec::new();
    let mut rest = text.trim_start();

    while !rest.is_empty() {
        let end = if let Some(body) = rest.strip_prefix('"') {
            match body.find('"') {
                Some(close) => close + 2,
                None => return Err(format!("unterminated string in '{}'", text)),
            }
        } else {
            rest.find(char::is_whitespace).unwrap_or(rest.len())
        };

        tokens.push(&rest[..end]);
        rest = rest[end..].trim_start();
    }

    Ok(tokens)
}

/// Strip enclosing quotes.
pub(crate) fn unquote(token: &str) -> Option<&str> {
    token
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
}
