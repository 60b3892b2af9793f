//! Statement splitter.
//!
//! Segments a raw SQL script into standalone statements. Comments are
//! discarded, quoted literals are kept intact, and `;` only terminates a
//! statement when it appears outside a literal.

use std::fmt;

use serde::Serialize;

/// One statement of a script, comments stripped and whitespace trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RawStatement {
    text: String,
}

impl RawStatement {
    /// Wraps already-split statement text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Returns the statement text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consumes the statement, returning its text.
    #[must_use]
    pub fn into_text(self) -> String {
        self.text
    }
}

impl fmt::Display for RawStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Normal,
    LineComment,
    BlockComment,
    SingleQuote,
    DoubleQuote,
}

/// Character scanner over a script.
struct Splitter<'a> {
    input: &'a str,
    /// The current byte position.
    pos: usize,
    mode: Mode,
    current: String,
    statements: Vec<RawStatement>,
}

impl<'a> Splitter<'a> {
    const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            mode: Mode::Normal,
            current: String::new(),
            statements: Vec::new(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn run(mut self) -> Vec<RawStatement> {
        while let Some(c) = self.advance() {
            match self.mode {
                Mode::Normal => self.normal(c),
                Mode::LineComment => {
                    if c == '\n' {
                        // Keep the line break so tokens on either side stay apart.
                        self.current.push('\n');
                        self.mode = Mode::Normal;
                    }
                }
                Mode::BlockComment => {
                    if c == '*' && self.peek() == Some('/') {
                        self.advance();
                        self.current.push(' ');
                        self.mode = Mode::Normal;
                    }
                }
                Mode::SingleQuote => self.quoted(c, '\''),
                Mode::DoubleQuote => self.quoted(c, '"'),
            }
        }
        self.flush();
        self.statements
    }

    fn normal(&mut self, c: char) {
        match c {
            '-' if self.peek() == Some('-') => {
                self.advance();
                self.mode = Mode::LineComment;
            }
            '#' => self.mode = Mode::LineComment,
            '/' if self.peek() == Some('*') => {
                self.advance();
                self.mode = Mode::BlockComment;
            }
            '\'' => {
                self.current.push(c);
                self.mode = Mode::SingleQuote;
            }
            '"' => {
                self.current.push(c);
                self.mode = Mode::DoubleQuote;
            }
            ';' => self.flush(),
            _ => self.current.push(c),
        }
    }

    fn quoted(&mut self, c: char, quote: char) {
        self.current.push(c);
        if c != quote {
            return;
        }
        // A doubled quote is an escaped quote, not the end of the literal.
        if self.peek() == Some(quote) {
            self.advance();
            self.current.push(quote);
        } else {
            self.mode = Mode::Normal;
        }
    }

    fn flush(&mut self) {
        let text = self.current.trim();
        if !text.is_empty() {
            self.statements.push(RawStatement::new(text));
        }
        self.current.clear();
    }
}

/// Splits a script into its statements, in source order.
///
/// Never fails: an unterminated literal or comment simply runs to the end
/// of the input, and a final statement without `;` is still returned.
#[must_use]
pub fn split(script: &str) -> Vec<RawStatement> {
    Splitter::new(script).run()
}
