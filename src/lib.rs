//! Nested-map tries keyed by scalar tokens.
//!
//! A [`TrieNode`](trie::TrieNode) maps [`Key`](trie::Key) tokens to either a nested node or a
//! leaf value. Derived trees returned by merge and delete share untouched subtrees with their
//! inputs and never mutate them.

#[macro_use]
extern crate serde_derive;

pub mod trie;
