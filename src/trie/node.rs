use crate::trie::key::Key;
use crate::trie::record::RawRecord;
use crate::trie::tree;
use crate::trie::{Error, Result};
use std::ops::Index;
use std::slice;
use std::sync::Arc;
use tracing::debug;

/// An entry stored under a key: either a nested node or a terminal value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Entry<V> {
    Branch(Arc<TrieNode<V>>),
    Leaf(V),
}

impl<V> Entry<V> {
    /// Builds the chain `path[0] -> ... -> path[n - 1] -> terminator`. An empty path yields the
    /// terminator itself as a leaf.
    ///
    /// # Examples
    ///
    /// ```
    /// use token_trie::trie::{Entry, Key};
    ///
    /// assert_eq!(Entry::from_path(&[], 1), Entry::Leaf(1));
    ///
    /// let entry = Entry::from_path(&[Key::from("a")], 1);
    /// assert_eq!(entry.as_branch().unwrap().get(&Key::from("a")), Some(&Entry::Leaf(1)));
    /// ```
    pub fn from_path(path: &[Key], terminator: V) -> Self {
        tree::chain(path, terminator)
    }

    pub fn is_branch(&self) -> bool {
        match self {
            Entry::Branch(_) => true,
            Entry::Leaf(_) => false,
        }
    }

    pub fn is_leaf(&self) -> bool {
        !self.is_branch()
    }

    pub fn as_branch(&self) -> Option<&Arc<TrieNode<V>>> {
        match self {
            Entry::Branch(node) => Some(node),
            Entry::Leaf(_) => None,
        }
    }

    pub fn as_leaf(&self) -> Option<&V> {
        match self {
            Entry::Branch(_) => None,
            Entry::Leaf(value) => Some(value),
        }
    }
}

/// A borrowed view of whatever sits at the end of a path.
///
/// An empty path resolves to the node it was looked up in.
#[derive(Debug, PartialEq, Eq)]
pub enum EntryRef<'a, V>
where
    V: 'a,
{
    Branch(&'a TrieNode<V>),
    Leaf(&'a V),
}

// Manual impls: deriving would require `V: Clone`.
impl<'a, V> Clone for EntryRef<'a, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, V> Copy for EntryRef<'a, V> {}

impl<'a, V> EntryRef<'a, V> {
    pub fn as_branch(self) -> Option<&'a TrieNode<V>> {
        match self {
            EntryRef::Branch(node) => Some(node),
            EntryRef::Leaf(_) => None,
        }
    }

    pub fn as_leaf(self) -> Option<&'a V> {
        match self {
            EntryRef::Branch(_) => None,
            EntryRef::Leaf(value) => Some(value),
        }
    }
}

impl<'a, V> From<&'a Entry<V>> for EntryRef<'a, V> {
    fn from(entry: &'a Entry<V>) -> Self {
        match entry {
            Entry::Branch(node) => EntryRef::Branch(node),
            Entry::Leaf(value) => EntryRef::Leaf(value),
        }
    }
}

/// A node of a trie keyed by scalar tokens.
///
/// Each key of a node maps to exactly one `Entry`: a nested node or a leaf value. Keys keep the
/// order in which they were first inserted. Nested nodes are reference counted, so the trees
/// returned by `merge` and `delete_path` share every subtree they did not change with their
/// inputs. Neither operation is observable through the input tree.
///
/// # Examples
///
/// ```
/// use token_trie::trie::{Key, RawRecord, TrieNode};
///
/// let trie = TrieNode::from_records(vec![
///     RawRecord::new(vec!["a", "b", "c"], 1),
///     RawRecord::new(vec!["a", "b", "d"], 2),
///     RawRecord::new(vec!["a", "e"], 3),
/// ])
/// .unwrap();
///
/// let c = [Key::from("a"), Key::from("b"), Key::from("c")];
/// assert!(trie.contains_path(&c));
/// assert_eq!(trie.get_value(&c).and_then(|entry| entry.as_leaf()), Some(&1));
///
/// let deleted = trie.delete_path(&c);
/// assert!(!deleted.contains_path(&c));
/// assert!(trie.contains_path(&c));
///
/// let mut visited = 0;
/// trie.traverse(|_, _| visited += 1);
/// assert_eq!(visited, 5);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrieNode<V> {
    pub(crate) entries: Vec<(Key, Entry<V>)>,
}

impl<V> TrieNode<V> {
    /// Constructs a new, empty `TrieNode<V>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use token_trie::trie::TrieNode;
    ///
    /// let trie: TrieNode<u32> = TrieNode::new();
    /// assert!(trie.is_empty());
    /// ```
    pub fn new() -> Self {
        TrieNode {
            entries: Vec::new(),
        }
    }

    pub(crate) fn singleton(key: Key, entry: Entry<V>) -> Self {
        TrieNode {
            entries: vec![(key, entry)],
        }
    }

    /// Builds a single chain `path[0] -> ... -> path[n - 1] -> terminator` without branching.
    /// Returns `Error::EmptyPath` if `path` is empty; use `Entry::from_path` to get a bare leaf
    /// instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use token_trie::trie::{Error, Key, TrieNode};
    ///
    /// let path = [Key::from("x"), Key::from("y"), Key::from("z")];
    /// let trie = TrieNode::from_path(&path, 10).unwrap();
    /// assert_eq!(trie.count_entries(), 3);
    /// assert_eq!(TrieNode::from_path(&[], 10), Err(Error::EmptyPath));
    /// ```
    pub fn from_path(path: &[Key], terminator: V) -> Result<Self> {
        tree::chain_node(path, terminator).ok_or(Error::EmptyPath)
    }

    /// Builds a trie by merging the chain of every record in order. When two records share a
    /// full path, the later terminator wins. Returns `Error::EmptyRecord` for the first record
    /// without a path.
    ///
    /// # Examples
    ///
    /// ```
    /// use token_trie::trie::{Key, RawRecord, TrieNode};
    ///
    /// let trie = TrieNode::from_records(vec![
    ///     RawRecord::new(vec!["f"], 4),
    ///     RawRecord::new(vec!["f"], 5),
    /// ])
    /// .unwrap();
    /// assert_eq!(trie[&Key::from("f")].as_leaf(), Some(&5));
    /// ```
    pub fn from_records<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = RawRecord<V>>,
        V: Clone,
    {
        let mut trie = TrieNode::new();
        let mut count = 0;
        for (index, record) in records.into_iter().enumerate() {
            let RawRecord { path, terminator } = record;
            let chain = tree::chain_node(&path, terminator).ok_or(Error::EmptyRecord { index })?;
            tree::merge_into(&mut trie, &chain);
            count += 1;
        }
        debug!(records = count, keys = trie.len(), "constructed trie from records");
        Ok(trie)
    }

    /// Returns the number of entries directly under this node.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of entries in the whole tree, counting every branch and every leaf.
    pub fn count_entries(&self) -> usize {
        tree::count_entries(self)
    }

    pub(crate) fn position(&self, key: &Key) -> Option<usize> {
        self.entries.iter().position(|(curr_key, _)| curr_key == key)
    }

    /// Returns the entry directly under `key`, or `None` if the key does not exist.
    pub fn get(&self, key: &Key) -> Option<&Entry<V>> {
        self.position(key).map(|index| &self.entries[index].1)
    }

    pub fn get_mut(&mut self, key: &Key) -> Option<&mut Entry<V>> {
        match self.position(key) {
            Some(index) => Some(&mut self.entries[index].1),
            None => None,
        }
    }

    pub fn contains_key(&self, key: &Key) -> bool {
        self.position(key).is_some()
    }

    /// Inserts an entry directly under `key`. If the key already exists, its entry is replaced in
    /// place and the old entry is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use token_trie::trie::{Entry, Key, TrieNode};
    ///
    /// let mut trie = TrieNode::new();
    /// assert_eq!(trie.insert(Key::from("a"), Entry::Leaf(1)), None);
    /// assert_eq!(trie.insert(Key::from("a"), Entry::Leaf(2)), Some(Entry::Leaf(1)));
    /// assert_eq!(trie.len(), 1);
    /// ```
    pub fn insert(&mut self, key: Key, entry: Entry<V>) -> Option<Entry<V>> {
        match self.get_mut(&key) {
            Some(slot) => Some(std::mem::replace(slot, entry)),
            None => {
                self.entries.push((key, entry));
                None
            },
        }
    }

    /// Removes the entry directly under `key`, keeping the order of the remaining keys.
    pub fn remove(&mut self, key: &Key) -> Option<Entry<V>> {
        self.position(key).map(|index| self.entries.remove(index).1)
    }

    /// Returns an iterator over the entries directly under this node in insertion order.
    pub fn iter(&self) -> Iter<V> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    /// Returns an iterator over every leaf of the tree with its full path, in depth-first
    /// pre-order.
    ///
    /// # Examples
    ///
    /// ```
    /// use token_trie::trie::{Key, RawRecord, TrieNode};
    ///
    /// let trie = TrieNode::from_records(vec![
    ///     RawRecord::new(vec!["a", "b"], 1),
    ///     RawRecord::new(vec!["c"], 2),
    /// ])
    /// .unwrap();
    ///
    /// let mut leaves = trie.leaves();
    /// assert_eq!(leaves.next(), Some((vec![Key::from("a"), Key::from("b")], &1)));
    /// assert_eq!(leaves.next(), Some((vec![Key::from("c")], &2)));
    /// assert_eq!(leaves.next(), None);
    /// ```
    pub fn leaves(&self) -> Leaves<V> {
        Leaves {
            prefix: Vec::new(),
            stack: vec![self.entries.iter()],
        }
    }

    /// Returns a new tree holding the union of `self` and `other`. Nested nodes present in both
    /// are merged recursively; any other conflict is resolved in favour of `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use token_trie::trie::{Key, TrieNode};
    ///
    /// let left = TrieNode::from_path(&[Key::from("a"), Key::from("b")], 1).unwrap();
    /// let right = TrieNode::from_path(&[Key::from("a"), Key::from("c")], 2).unwrap();
    ///
    /// let merged = left.merge(&right);
    /// assert_eq!(merged.count_entries(), 3);
    /// assert_eq!(left.count_entries(), 2);
    /// ```
    pub fn merge(&self, other: &TrieNode<V>) -> TrieNode<V>
    where
        V: Clone,
    {
        tree::merge(self, other)
    }

    /// Merges `other` into `self` in place with the same rules as `merge`.
    pub fn merge_from(&mut self, other: &TrieNode<V>)
    where
        V: Clone,
    {
        tree::merge_into(self, other);
    }

    /// Returns `true` if every key of `path` resolves, whether the last one holds a nested node
    /// or a leaf. An empty path always resolves.
    pub fn contains_path(&self, path: &[Key]) -> bool {
        tree::walk(self, path).is_some()
    }

    /// Returns whatever sits at the end of `path`, or `None` as soon as a key is missing.
    ///
    /// # Examples
    ///
    /// ```
    /// use token_trie::trie::{EntryRef, Key, TrieNode};
    ///
    /// let trie = TrieNode::from_path(&[Key::from("a"), Key::from(1)], "x").unwrap();
    /// assert_eq!(trie.get_value(&[Key::from("a"), Key::from(1)]), Some(EntryRef::Leaf(&"x")));
    /// assert!(trie.get_value(&[Key::from("a")]).unwrap().as_branch().is_some());
    /// assert_eq!(trie.get_value(&[Key::from("a"), Key::from("1")]), None);
    /// ```
    pub fn get_value(&self, path: &[Key]) -> Option<EntryRef<V>> {
        tree::walk(self, path)
    }

    /// Returns the node or leaf at the end of `path`. Behaves exactly like `get_value`.
    pub fn find_node(&self, path: &[Key]) -> Option<EntryRef<V>> {
        tree::walk(self, path)
    }

    /// Returns a new tree without the entry at `path`. Only the nodes from the root down to the
    /// parent of the removed entry are copied. A path that does not exist yields an unchanged
    /// copy.
    ///
    /// # Examples
    ///
    /// ```
    /// use token_trie::trie::{Key, TrieNode};
    ///
    /// let trie = TrieNode::from_path(&[Key::from("a"), Key::from("b")], 1).unwrap();
    /// let deleted = trie.delete_path(&[Key::from("a"), Key::from("b")]);
    ///
    /// assert!(deleted.contains_path(&[Key::from("a")]));
    /// assert!(!deleted.contains_path(&[Key::from("a"), Key::from("b")]));
    /// assert_eq!(trie.delete_path(&[Key::from("nope")]), trie);
    /// ```
    pub fn delete_path(&self, path: &[Key]) -> TrieNode<V>
    where
        V: Clone,
    {
        tree::delete(self, path)
    }

    /// Walks the tree depth-first in pre-order, calling `callback` with the full path of every
    /// entry before descending into it.
    ///
    /// # Examples
    ///
    /// ```
    /// use token_trie::trie::{Key, TrieNode};
    ///
    /// let trie = TrieNode::from_path(&[Key::from("a"), Key::from("b")], 1).unwrap();
    ///
    /// let mut paths = Vec::new();
    /// trie.traverse(|path, _| paths.push(path.to_vec()));
    /// assert_eq!(
    ///     paths,
    ///     vec![vec![Key::from("a")], vec![Key::from("a"), Key::from("b")]],
    /// );
    /// ```
    pub fn traverse<F>(&self, callback: F)
    where
        F: FnMut(&[Key], &Entry<V>),
    {
        self.traverse_from(&[], callback);
    }

    /// Same as `traverse`, but every reported path starts with `prefix`.
    pub fn traverse_from<F>(&self, prefix: &[Key], mut callback: F)
    where
        F: FnMut(&[Key], &Entry<V>),
    {
        let mut path = prefix.to_vec();
        tree::traverse(self, &mut path, &mut callback);
    }
}

impl<V> Default for TrieNode<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, V> Index<&'a Key> for TrieNode<V> {
    type Output = Entry<V>;

    fn index(&self, key: &Key) -> &Self::Output {
        self.get(key).expect("Error: key does not exist.")
    }
}

impl<'a, V> IntoIterator for &'a TrieNode<V>
where
    V: 'a,
{
    type IntoIter = Iter<'a, V>;
    type Item = (&'a Key, &'a Entry<V>);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the entries directly under a `TrieNode<V>`, in insertion order.
pub struct Iter<'a, V>
where
    V: 'a,
{
    inner: slice::Iter<'a, (Key, Entry<V>)>,
}

impl<'a, V> Iterator for Iter<'a, V>
where
    V: 'a,
{
    type Item = (&'a Key, &'a Entry<V>);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, entry)| (key, entry))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// An iterator over the leaves of a `TrieNode<V>`.
///
/// This iterator walks the tree depth-first in pre-order and yields the full path of every leaf.
pub struct Leaves<'a, V>
where
    V: 'a,
{
    prefix: Vec<Key>,
    stack: Vec<slice::Iter<'a, (Key, Entry<V>)>>,
}

impl<'a, V> Iterator for Leaves<'a, V>
where
    V: 'a,
{
    type Item = (Vec<Key>, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let next = match self.stack.last_mut() {
                Some(entries) => entries.next(),
                None => return None,
            };
            match next {
                Some((key, Entry::Leaf(value))) => {
                    let mut path = self.prefix.clone();
                    path.push(key.clone());
                    return Some((path, value));
                },
                Some((key, Entry::Branch(child))) => {
                    self.prefix.push(key.clone());
                    self.stack.push(child.entries.iter());
                },
                None => {
                    self.stack.pop();
                    self.prefix.pop();
                },
            }
        }
    }
}
