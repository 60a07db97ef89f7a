//! proptest strategies for documents that survive a serialize/parse cycle.
//!
//! Quoted text resolves like bare text, so generated strings must not look
//! like `null`, a boolean or a number, and must not be empty.

use jsonode_core::Node;
use proptest::prelude::*;

/// Finite numbers, biased toward integers.
pub fn number() -> impl Strategy<Value = f64> {
    prop_oneof![
        3 => (-1_000_000i64..1_000_000).prop_map(|n| n as f64),
        2 => -1.0e6f64..1.0e6,
        1 => any::<f64>().prop_filter("finite", |n| n.is_finite()),
    ]
}

/// Non-empty text that stays a string after parsing.
pub fn string_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 _.,:\\-\"\\\\/{}\\[\\]\t\n\r\u{1}\u{e9}\u{2600}]{1,12}".prop_filter(
        "text must not resolve to another scalar",
        |s| matches!(Node::from_literal(s), Some(Node::String(_))),
    )
}

/// Object keys; any text works, including the empty string.
pub fn key_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 _:,\"\\\\{\\[]{0,8}"
}

pub fn leaf() -> impl Strategy<Value = Node> {
    prop_oneof![
        Just(Node::Null),
        any::<bool>().prop_map(Node::Boolean),
        number().prop_map(Node::Number),
        string_text().prop_map(Node::String),
    ]
}

/// Arbitrary documents up to four levels deep.
pub fn document() -> impl Strategy<Value = Node> {
    leaf().prop_recursive(4, 64, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Node::Array),
            prop::collection::vec((key_text(), inner), 0..6)
                .prop_map(|entries| entries.into_iter().collect::<Node>()),
        ]
    })
}
