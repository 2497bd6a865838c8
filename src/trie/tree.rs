use crate::trie::key::Key;
use crate::trie::node::{Entry, EntryRef, TrieNode};
use std::sync::Arc;
use tracing::{debug, trace};

pub fn chain<V>(path: &[Key], terminator: V) -> Entry<V> {
    path.iter().rev().fold(Entry::Leaf(terminator), |child, key| {
        Entry::Branch(Arc::new(TrieNode::singleton(key.clone(), child)))
    })
}

pub fn chain_node<V>(path: &[Key], terminator: V) -> Option<TrieNode<V>> {
    let (first, rest) = path.split_first()?;
    Some(TrieNode::singleton(first.clone(), chain(rest, terminator)))
}

// Branches of `node` that are shared elsewhere are copied before they are written to.
pub fn merge_into<V>(node: &mut TrieNode<V>, other: &TrieNode<V>)
where
    V: Clone,
{
    for (key, theirs) in &other.entries {
        let index = match node.position(key) {
            Some(index) => index,
            None => {
                node.entries.push((key.clone(), theirs.clone()));
                continue;
            },
        };
        match (&mut node.entries[index].1, theirs) {
            (Entry::Branch(ours), Entry::Branch(theirs)) => {
                if !Arc::ptr_eq(ours, theirs) {
                    merge_into(Arc::make_mut(ours), theirs);
                }
            },
            (slot, theirs) => {
                if slot.is_branch() != theirs.is_branch() {
                    trace!(key = %key, "entry kind changed during merge");
                }
                *slot = theirs.clone();
            },
        }
    }
}

pub fn merge<V>(node: &TrieNode<V>, other: &TrieNode<V>) -> TrieNode<V>
where
    V: Clone,
{
    let mut merged = node.clone();
    merge_into(&mut merged, other);
    merged
}

pub fn walk<'a, V>(node: &'a TrieNode<V>, path: &[Key]) -> Option<EntryRef<'a, V>> {
    let mut curr = EntryRef::Branch(node);
    for key in path {
        curr = match curr {
            EntryRef::Branch(node) => EntryRef::from(node.get(key)?),
            EntryRef::Leaf(_) => return None,
        };
    }
    Some(curr)
}

pub fn delete<V>(node: &TrieNode<V>, path: &[Key]) -> TrieNode<V>
where
    V: Clone,
{
    let mut ret = node.clone();
    let (last, parents) = match path.split_last() {
        Some(split) => split,
        None => return ret,
    };
    match walk(node, parents) {
        Some(EntryRef::Branch(parent)) if parent.contains_key(last) => {
            remove_path(&mut ret, parents, last);
        },
        _ => debug!(depth = path.len(), "delete of missing path is a no-op"),
    }
    ret
}

// Only the nodes on the way to `last` are copied; the caller has checked the path exists.
fn remove_path<V>(node: &mut TrieNode<V>, parents: &[Key], last: &Key)
where
    V: Clone,
{
    match parents.split_first() {
        Some((key, rest)) => {
            if let Some(Entry::Branch(child)) = node.get_mut(key) {
                remove_path(Arc::make_mut(child), rest, last);
            }
        },
        None => {
            node.remove(last);
        },
    }
}

pub fn traverse<V, F>(node: &TrieNode<V>, path: &mut Vec<Key>, callback: &mut F)
where
    F: FnMut(&[Key], &Entry<V>),
{
    for (key, entry) in &node.entries {
        path.push(key.clone());
        callback(path, entry);
        if let Entry::Branch(child) = entry {
            traverse(child, path, callback);
        }
        path.pop();
    }
}

pub fn count_entries<V>(node: &TrieNode<V>) -> usize {
    node.entries
        .iter()
        .map(|(_, entry)| match entry {
            Entry::Branch(child) => 1 + count_entries(child),
            Entry::Leaf(_) => 1,
        })
        .sum()
}
