extern crate bincode;
extern crate rand;
extern crate token_trie;

use self::rand::Rng;
use std::collections::HashMap;
use token_trie::trie::{Entry, EntryRef, Key, RawRecord, Symbol, TrieNode};

const STR_KEYS: [&str; 3] = ["a", "b", "1"];

fn random_path<R: Rng>(rng: &mut R) -> Vec<Key> {
    let len = rng.gen_range(1, 5);
    (0..len)
        .map(|_| {
            if rng.gen() {
                Key::from(STR_KEYS[rng.gen_range(0, STR_KEYS.len())])
            } else {
                Key::from(rng.gen_range(0i64, 3))
            }
        })
        .collect()
}

// Leaves keyed by full path, updated with the same rules a merged chain follows: leaves on a
// proper prefix of the new path turn into branches, and everything at or below it is replaced.
fn model_insert(model: &mut HashMap<Vec<Key>, u32>, path: &[Key], value: u32) {
    model.retain(|leaf_path, _| !path.starts_with(leaf_path) && !leaf_path.starts_with(path));
    model.insert(path.to_vec(), value);
}

fn model_delete(model: &mut HashMap<Vec<Key>, u32>, path: &[Key]) {
    model.retain(|leaf_path, _| !leaf_path.starts_with(path));
}

fn sorted_leaves(trie: &TrieNode<u32>) -> Vec<(Vec<Key>, u32)> {
    let mut leaves: Vec<(Vec<Key>, u32)> =
        trie.leaves().map(|(path, value)| (path, *value)).collect();
    leaves.sort();
    leaves
}

fn sorted_model(model: &HashMap<Vec<Key>, u32>) -> Vec<(Vec<Key>, u32)> {
    let mut leaves: Vec<(Vec<Key>, u32)> =
        model.iter().map(|(path, value)| (path.clone(), *value)).collect();
    leaves.sort();
    leaves
}

#[test]
fn int_test_trie() {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut records = Vec::new();
    let mut expected = HashMap::new();
    for _ in 0..2_000 {
        let path = random_path(&mut rng);
        let val = rng.gen::<u32>();
        model_insert(&mut expected, &path, val);
        records.push(RawRecord::new(path, val));
    }

    let trie = TrieNode::from_records(records).unwrap();
    assert_eq!(sorted_leaves(&trie), sorted_model(&expected));

    for (path, value) in &expected {
        assert!(trie.contains_path(path));
        assert_eq!(trie.get_value(path), Some(EntryRef::Leaf(value)));
        assert_eq!(trie.find_node(path), trie.get_value(path));
    }

    let mut visited = 0;
    trie.traverse(|path, entry| {
        visited += 1;
        assert!(!path.is_empty());
        assert_eq!(trie.get_value(path), Some(EntryRef::from(entry)));
    });
    assert_eq!(visited, trie.count_entries());

    let mut curr = trie.clone();
    for _ in 0..500 {
        let path = random_path(&mut rng);
        let next = curr.delete_path(&path);
        if curr.contains_path(&path) {
            model_delete(&mut expected, &path);
            assert!(!next.contains_path(&path));
        } else {
            assert_eq!(next, curr);
        }
        assert_eq!(sorted_leaves(&next), sorted_model(&expected));
        curr = next;
    }

    assert_eq!(trie, TrieNode::from_records(vec![]).unwrap().merge(&trie));
}

#[test]
fn int_test_merge_right_operand_wins() {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([2, 2, 2, 2]);
    let mut records = Vec::new();
    for _ in 0..1_000 {
        let path = random_path(&mut rng);
        records.push(RawRecord::new(path, rng.gen::<u32>()));
    }

    let right = records.split_off(records.len() / 2);
    let left = TrieNode::from_records(records).unwrap();
    let right = TrieNode::from_records(right).unwrap();

    let mut expected: HashMap<Vec<Key>, u32> = left
        .leaves()
        .map(|(path, value)| (path, *value))
        .collect();
    for (path, value) in right.leaves() {
        model_insert(&mut expected, &path, *value);
    }

    let left_before = left.clone();
    let merged = left.merge(&right);
    assert_eq!(sorted_leaves(&merged), sorted_model(&expected));
    assert_eq!(left, left_before);
}

#[test]
fn test_merge_keeps_left_leaves_under_shared_branch() {
    let left = TrieNode::from_records(vec![RawRecord::new(vec!["k", "x"], 1)]).unwrap();
    let right = TrieNode::from_records(vec![
        RawRecord::new(vec!["k"], 2),
        RawRecord::new(vec!["k", "y"], 3),
    ])
    .unwrap();
    let whole = TrieNode::from_records(vec![
        RawRecord::new(vec!["k", "x"], 1),
        RawRecord::new(vec!["k"], 2),
        RawRecord::new(vec!["k", "y"], 3),
    ])
    .unwrap();

    let key = |keys: &[&str]| keys.iter().map(|k| Key::from(*k)).collect::<Vec<Key>>();
    assert_eq!(
        sorted_leaves(&left.merge(&right)),
        vec![(key(&["k", "x"]), 1), (key(&["k", "y"]), 3)],
    );
    assert_eq!(sorted_leaves(&whole), vec![(key(&["k", "y"]), 3)]);
}

#[test]
fn test_example_records() {
    let trie = TrieNode::from_records(vec![
        RawRecord::new(vec!["a", "b", "c"], 1),
        RawRecord::new(vec!["a", "b", "d"], 2),
        RawRecord::new(vec!["a", "e"], 3),
        RawRecord::new(vec!["f"], 4),
        RawRecord::new(vec![1], 5),
    ])
    .unwrap();

    let mut expected = TrieNode::new();
    let mut b = TrieNode::new();
    b.insert(Key::from("c"), Entry::Leaf(1));
    b.insert(Key::from("d"), Entry::Leaf(2));
    let mut a = TrieNode::new();
    a.insert(Key::from("b"), Entry::Branch(b.into()));
    a.insert(Key::from("e"), Entry::Leaf(3));
    expected.insert(Key::from("a"), Entry::Branch(a.into()));
    expected.insert(Key::from("f"), Entry::Leaf(4));
    expected.insert(Key::from(1), Entry::Leaf(5));

    assert_eq!(trie, expected);
}

#[test]
fn test_bincode_round_trip() {
    let tag = Symbol::new("tag");
    let trie = TrieNode::from_records(vec![
        RawRecord::new(vec![Key::from("a"), Key::from(1)], String::from("x")),
        RawRecord::new(vec![Key::from(tag.clone())], String::from("y")),
    ])
    .unwrap();

    let bytes = bincode::serialize(&trie).unwrap();
    let decoded: TrieNode<String> = bincode::deserialize(&bytes).unwrap();
    assert_eq!(decoded, trie);
    assert!(decoded.contains_key(&Key::from(tag)));
}
