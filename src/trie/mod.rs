//! Nested-map trie keyed by scalar tokens.

mod key;
mod node;
mod record;
mod tree;

pub use self::key::{Key, Symbol};
pub use self::node::{Entry, EntryRef, Iter, Leaves, TrieNode};
pub use self::record::RawRecord;

use std::error;
use std::fmt;
use std::result;

/// Errors for input that does not describe a well-formed trie.
///
/// A missing path is never an error: lookups return `None` or `false` and deletes are no-ops.
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// A node was requested from an empty path, which can only describe a bare leaf.
    EmptyPath,
    /// The record at `index` has a terminator but no path.
    EmptyRecord { index: usize },
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::EmptyPath => write!(f, "cannot build a trie node from an empty path"),
            Error::EmptyRecord { index } => write!(f, "record {} has an empty path", index),
        }
    }
}

/// Convenience `Result` type for trie construction.
pub type Result<T> = result::Result<T, Error>;
