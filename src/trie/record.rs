use crate::trie::key::Key;

/// A flat `(path, terminator)` pair used for bulk construction.
///
/// # Examples
///
/// ```
/// use token_trie::trie::{Key, RawRecord};
///
/// let record = RawRecord::new(vec!["a", "b"], 1);
/// assert_eq!(record.path, vec![Key::from("a"), Key::from("b")]);
/// assert_eq!(record.terminator, 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord<V> {
    pub path: Vec<Key>,
    pub terminator: V,
}

impl<V> RawRecord<V> {
    pub fn new<I, K>(path: I, terminator: V) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        RawRecord {
            path: path.into_iter().map(Into::into).collect(),
            terminator,
        }
    }

    pub fn depth(&self) -> usize {
        self.path.len()
    }
}

impl<V> From<(Vec<Key>, V)> for RawRecord<V> {
    fn from((path, terminator): (Vec<Key>, V)) -> Self {
        RawRecord { path, terminator }
    }
}
