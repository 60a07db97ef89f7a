//! Single-pass document parser.
//!
//! The parser walks the input once, left to right, and builds the tree
//! directly. There is no token stream: characters accumulate in a token
//! buffer that is resolved into a scalar at each structural boundary
//! (`,`, a closing bracket, or end of input).
//!
//! # State
//!
//! ```text
//!            '"'
//!   Neutral ─────▶ InQuotes
//!      ▲              │
//!      └──────────────┘
//!            '"'
//! ```
//!
//! Brackets, `:` and `,` only mean something in `Neutral`. Whitespace and
//! line breaks are dropped in `Neutral` and kept verbatim in `InQuotes`.
//! Open containers live on an explicit stack, so nesting depth never turns
//! into call-stack depth.
//!
//! The grammar is lenient by design: missing or doubled commas, bare words
//! and quoted numbers are all accepted. Only bracket imbalance, an
//! unterminated string and a malformed escape are fatal.

use std::mem;
use std::str::FromStr;

use memchr::memchr2;
use tracing::{debug, trace};

use crate::error::ParseError;
use crate::node::Node;
use crate::options::ParseOptions;

/// Parse a document with the default options.
///
/// ```
/// let doc = jsonode_core::parse(r#"{"a": 1, "b": [true, false, null]}"#).unwrap();
/// assert!(doc["b"][0].as_bool());
/// assert_eq!(doc["c"].as_int(), 0);
/// ```
pub fn parse(text: &str) -> Result<Node, ParseError> {
    parse_with(text, &ParseOptions::default())
}

/// Parse a document under explicit resource limits.
pub fn parse_with(text: &str, options: &ParseOptions) -> Result<Node, ParseError> {
    Parser::new(text, *options).parse()
}

impl Node {
    /// Parse a document with the default options. Same as [`parse`].
    pub fn parse(text: &str) -> Result<Node, ParseError> {
        parse(text)
    }
}

impl FromStr for Node {
    type Err = ParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        parse(text)
    }
}

// ============================================================================
// Parser
// ============================================================================

/// An open container and the key it will be stored under in its parent.
struct Frame {
    node: Node,
    key: String,
}

struct Parser<'a> {
    text: &'a str,
    options: ParseOptions,
    /// Open containers, innermost last.
    stack: Vec<Frame>,
    /// Text of the value currently being scanned.
    token: String,
    /// Key for the next value stored into an object.
    key: String,
    /// Offset of the opening quote while inside a string literal.
    quote_start: Option<usize>,
    /// First top-level container to close.
    root: Option<Node>,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str, options: ParseOptions) -> Self {
        Parser {
            text,
            options,
            stack: Vec::new(),
            token: String::new(),
            key: String::new(),
            quote_start: None,
            root: None,
        }
    }

    fn parse(mut self) -> Result<Node, ParseError> {
        let len = self.text.len();
        trace!(len, "parsing document");

        if let Some(limit) = self.options.max_input_len() {
            if len > limit {
                return Err(ParseError::InputTooLarge { len, limit });
            }
        }

        let text = self.text;
        let bytes = text.as_bytes();
        let mut pos = 0;
        while pos < bytes.len() {
            if self.quote_start.is_some() {
                pos = self.scan_quoted(pos)?;
                continue;
            }

            match bytes[pos] {
                b @ (b'{' | b'[') => self.open(b, pos)?,
                b @ (b'}' | b']') => self.close(b, pos)?,
                b':' => self.key = mem::take(&mut self.token),
                b'"' => self.quote_start = Some(pos),
                b',' => self.separator(),
                b'\r' | b'\n' | b' ' | b'\t' => {}
                b'\\' => {
                    // Outside a string an escape has no meaning; drop it
                    // together with the character it escapes.
                    let escaped = text[pos + 1..].chars().next();
                    pos += 1 + escaped.map_or(0, char::len_utf8);
                    continue;
                }
                _ => {
                    pos = self.scan_bare(pos);
                    continue;
                }
            }
            pos += 1;
        }

        self.finish()
    }

    /// Append a run of ordinary characters to the token.
    fn scan_bare(&mut self, pos: usize) -> usize {
        let end = self.text.as_bytes()[pos..]
            .iter()
            .position(|&b| is_special(b))
            .map_or(self.text.len(), |n| pos + n);
        self.token.push_str(&self.text[pos..end]);
        end
    }

    /// Consume string content up to and including the next quote or escape.
    fn scan_quoted(&mut self, pos: usize) -> Result<usize, ParseError> {
        let text = self.text;
        let bytes = text.as_bytes();
        match memchr2(b'"', b'\\', &bytes[pos..]) {
            None => {
                self.token.push_str(&text[pos..]);
                Ok(bytes.len())
            }
            Some(n) => {
                let at = pos + n;
                self.token.push_str(&text[pos..at]);
                if bytes[at] == b'"' {
                    self.quote_start = None;
                    Ok(at + 1)
                } else {
                    self.escape(at)
                }
            }
        }
    }

    /// Decode the escape sequence whose backslash sits at `at`.
    fn escape(&mut self, at: usize) -> Result<usize, ParseError> {
        let c = self.text[at + 1..]
            .chars()
            .next()
            .ok_or(ParseError::DanglingEscape { offset: at })?;
        let decoded = match c {
            't' => '\t',
            'r' => '\r',
            'n' => '\n',
            'b' => '\u{0008}',
            'f' => '\u{000C}',
            'u' => return self.unicode_escape(at),
            other => other,
        };
        self.token.push(decoded);
        Ok(at + 1 + c.len_utf8())
    }

    /// Decode `\uXXXX`, joining a high surrogate with an immediately
    /// following low surrogate escape.
    fn unicode_escape(&mut self, at: usize) -> Result<usize, ParseError> {
        let unit = self
            .text
            .get(at..)
            .and_then(code_unit)
            .ok_or(ParseError::InvalidUnicodeEscape { offset: at })?;
        let mut next = at + 6;

        let decoded = match unit {
            0xD800..=0xDBFF => match self.text.get(next..).and_then(code_unit) {
                Some(low @ 0xDC00..=0xDFFF) => {
                    next += 6;
                    let scalar =
                        0x10000 + ((u32::from(unit) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
                    char::from_u32(scalar).unwrap_or(char::REPLACEMENT_CHARACTER)
                }
                _ => char::REPLACEMENT_CHARACTER,
            },
            _ => char::from_u32(u32::from(unit)).unwrap_or(char::REPLACEMENT_CHARACTER),
        };
        self.token.push(decoded);
        Ok(next)
    }

    fn open(&mut self, bracket: u8, pos: usize) -> Result<(), ParseError> {
        if let Some(limit) = self.options.max_depth() {
            if self.stack.len() >= limit {
                return Err(ParseError::DepthLimitExceeded { limit, offset: pos });
            }
        }
        if !self.token.is_empty() {
            debug!(token = %self.token, offset = pos, "discarding token before container");
            self.token.clear();
        }

        let node = if bracket == b'{' {
            Node::object()
        } else {
            Node::array()
        };
        self.stack.push(Frame {
            node,
            key: mem::take(&mut self.key),
        });
        Ok(())
    }

    fn close(&mut self, bracket: u8, pos: usize) -> Result<(), ParseError> {
        let mut frame = self.stack.pop().ok_or(ParseError::UnmatchedCloser {
            bracket: char::from(bracket),
            offset: pos,
        })?;

        let token = mem::take(&mut self.token);
        let key = mem::take(&mut self.key);
        if let Some(value) = Node::from_literal(&token) {
            attach(&mut frame.node, key, value);
        }

        match self.stack.last_mut() {
            Some(parent) => attach(&mut parent.node, frame.key, frame.node),
            None if self.root.is_none() => self.root = Some(frame.node),
            None => debug!(offset = pos, "ignoring top-level container after the root"),
        }
        Ok(())
    }

    fn separator(&mut self) {
        let token = mem::take(&mut self.token);
        let key = mem::take(&mut self.key);
        if let Some(value) = Node::from_literal(&token) {
            match self.stack.last_mut() {
                Some(frame) => attach(&mut frame.node, key, value),
                None => debug!(token = %token, "discarding value outside any container"),
            }
        }
    }

    fn finish(self) -> Result<Node, ParseError> {
        if let Some(offset) = self.quote_start {
            return Err(ParseError::UnterminatedString { offset });
        }
        if !self.stack.is_empty() {
            return Err(ParseError::UnclosedContainer {
                open: self.stack.len(),
                offset: self.text.len(),
            });
        }

        let root = match self.root {
            Some(root) => {
                if !self.token.is_empty() {
                    debug!(token = %self.token, "ignoring content after the root");
                }
                root
            }
            None => Node::from_literal(&self.token).unwrap_or_default(),
        };
        trace!(tag = ?root.tag(), children = root.count(), "parsed document");
        Ok(root)
    }
}

/// Store a finished value into an open container.
fn attach(container: &mut Node, key: String, value: Node) {
    match container {
        Node::Array(items) => items.push(value),
        Node::Object(map) => {
            if key.is_empty() {
                debug!("storing object value under an empty key");
            }
            map.insert(key, value);
        }
        _ => {}
    }
}

/// Bytes that end a run of ordinary characters outside a string.
#[inline]
fn is_special(b: u8) -> bool {
    matches!(
        b,
        b'{' | b'}' | b'[' | b']' | b':' | b'"' | b',' | b'\r' | b'\n' | b' ' | b'\t' | b'\\'
    )
}

/// Read the code unit of a `\uXXXX` escape at the start of `s`.
fn code_unit(s: &str) -> Option<u16> {
    let hex = s.strip_prefix("\\u")?.get(..4)?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u16::from_str_radix(hex, 16).ok()
}

// ============================================================================
// Tests
// ============================================================================
