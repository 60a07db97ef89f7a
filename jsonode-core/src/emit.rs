//! Serialization back to JSON text.
//!
//! Output parses back into an equivalent tree. `{}` formats compactly,
//! `{:#}` pretty-prints with two-space indentation.
//!
//! ```
//! use jsonode_core::Node;
//!
//! let mut doc = Node::object();
//! doc.set_key("name", "Stonehenge");
//! doc.set_key("stones", vec![Node::from(30), Node::Null]);
//!
//! assert_eq!(doc.to_json(), r#"{"name":"Stonehenge","stones":[30,null]}"#);
//! ```

use std::fmt::{self, Write};
use std::slice;

use crate::node::{format_number, Node};

/// Indentation unit for pretty output.
const INDENT: &str = "  ";

impl Node {
    /// Compact JSON text.
    pub fn to_json(&self) -> String {
        self.to_string()
    }

    /// Indented, human-readable JSON text.
    pub fn to_pretty_json(&self) -> String {
        format!("{:#}", self)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pretty = f.alternate();
        write_node(self, f, pretty)
    }
}

// ============================================================================
// Writer
// ============================================================================

/// Remaining children of a container that has been opened in the output.
enum Children<'a> {
    Array(slice::Iter<'a, Node>),
    Object(indexmap::map::Iter<'a, String, Node>),
}

struct Open<'a> {
    children: Children<'a>,
    started: bool,
}

/// Write `root` using an explicit stack of open containers.
fn write_node<W: Write>(root: &Node, w: &mut W, pretty: bool) -> fmt::Result {
    let mut open: Vec<Open<'_>> = Vec::new();
    let mut next = Some(root);

    loop {
        if let Some(node) = next.take() {
            match node {
                Node::Array(items) if !items.is_empty() => {
                    w.write_char('[')?;
                    open.push(Open {
                        children: Children::Array(items.iter()),
                        started: false,
                    });
                }
                Node::Object(map) if !map.is_empty() => {
                    w.write_char('{')?;
                    open.push(Open {
                        children: Children::Object(map.iter()),
                        started: false,
                    });
                }
                Node::Array(_) => w.write_str("[]")?,
                Node::Object(_) => w.write_str("{}")?,
                scalar => write_scalar(scalar, w)?,
            }
        }

        let depth = open.len();
        let Some(top) = open.last_mut() else {
            return Ok(());
        };
        let child = match &mut top.children {
            Children::Array(items) => items.next().map(|node| (None, node)),
            Children::Object(entries) => entries
                .next()
                .map(|(key, node)| (Some(key.as_str()), node)),
        };

        match child {
            Some((key, node)) => {
                if top.started {
                    w.write_char(',')?;
                }
                top.started = true;
                if pretty {
                    w.write_char('\n')?;
                    write_indent(w, depth)?;
                }
                if let Some(key) = key {
                    write_string(key, w)?;
                    w.write_str(if pretty { ": " } else { ":" })?;
                }
                next = Some(node);
            }
            None => {
                let closer = match top.children {
                    Children::Array(_) => ']',
                    Children::Object(_) => '}',
                };
                open.pop();
                if pretty {
                    w.write_char('\n')?;
                    write_indent(w, depth - 1)?;
                }
                w.write_char(closer)?;
            }
        }
    }
}

fn write_scalar<W: Write>(node: &Node, w: &mut W) -> fmt::Result {
    match node {
        Node::String(s) => write_string(s, w),
        Node::Number(n) if n.is_finite() => w.write_str(&format_number(*n)),
        // An exponent past the f64 range reads back as the same infinity.
        Node::Number(n) if *n == f64::INFINITY => w.write_str("1e999"),
        Node::Number(n) if *n == f64::NEG_INFINITY => w.write_str("-1e999"),
        Node::Boolean(b) => w.write_str(if *b { "true" } else { "false" }),
        // NaN and the absence value have no JSON spelling.
        _ => w.write_str("null"),
    }
}

fn write_indent<W: Write>(w: &mut W, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        w.write_str(INDENT)?;
    }
    Ok(())
}

/// Write a quoted string with JSON escapes.
fn write_string<W: Write>(s: &str, w: &mut W) -> fmt::Result {
    w.write_char('"')?;
    let mut start = 0;
    for (i, c) in s.char_indices() {
        let escape = match c {
            '"' => "\\\"",
            '\\' => "\\\\",
            '\n' => "\\n",
            '\r' => "\\r",
            '\t' => "\\t",
            '\u{0008}' => "\\b",
            '\u{000C}' => "\\f",
            '\u{0000}'..='\u{001F}' => "",
            _ => continue,
        };
        w.write_str(&s[start..i])?;
        if escape.is_empty() {
            write!(w, "\\u{:04x}", c as u32)?;
        } else {
            w.write_str(escape)?;
        }
        start = i + c.len_utf8();
    }
    w.write_str(&s[start..])?;
    w.write_char('"')
}
