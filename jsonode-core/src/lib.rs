//! jsonode core
//!
//! A small JSON document model with a lenient single-pass parser.
//! Parsing builds a tree of [`Node`]s that can be probed without knowing its
//! shape: missing children come back as the absence value, failed
//! coercions come back as defaults, and only bracket or quote imbalance is
//! reported as an error.
//!
//! ```
//! use jsonode_core::parse;
//!
//! let body = r#"{"weather": [{"main": "Rain"}], "main": {"temp": 283.4}}"#;
//! let doc = parse(body).unwrap();
//!
//! assert_eq!(doc["weather"][0]["main"].value(), "Rain");
//! assert_eq!(doc["main"]["temp"].as_double(), 283.4);
//! assert_eq!(doc["wind"]["speed"].as_float(), 0.0);
//! ```
//!
//! # Architecture
//!
//! - **node.rs** - `Node` enum, tags, construction and iteration
//! - **access.rs** - coercing accessors and child lookup
//! - **parser.rs** - single-pass parser with an explicit container stack
//! - **emit.rs** - compact and pretty serialization
//! - **options.rs** - parse limits
//! - **error.rs** - structural parse errors

mod access;
mod emit;
pub mod error;
pub mod node;
pub mod options;
pub mod parser;

pub use error::ParseError;
pub use node::{Map, Node, Tag};
pub use options::ParseOptions;
pub use parser::{parse, parse_with};
