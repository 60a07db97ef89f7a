//! Test infrastructure for jsonode
//!
//! Provides document generators and conversions to and from serde_json.

mod convert;
mod generators;

#[allow(unused_imports)]
pub use convert::{from_serde, to_serde};
#[allow(unused_imports)]
pub use generators::{document, key_text, leaf, number, string_text};
