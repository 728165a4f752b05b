use std::{collections::BTreeSet, ops::Range};

use proptest::prelude::*;

use crate::model::{self, reference_height, reference_is_avl};

use super::*;

fn insert_find_all(keys: &[Key]) {
    let mut tree = Tree::new();

    for &key in keys {
        tree.insert(key);
        tree.assert_invariants();
    }

    for &key in keys {
        let node = tree.get(key).expect("item not found");
        assert_eq!(node.key(), key);
    }

    let mut expected = keys.to_vec();
    expected.sort_unstable();
    expected.dedup();
    assert_eq!(tree.iter().collect::<Vec<_>>(), expected);
}

#[test]
fn zero_elems_find() {
    insert_find_all(&[]);
}

#[test]
fn single_elem_find() {
    insert_find_all(&[0]);
}

#[test]
fn two_elems_find() {
    insert_find_all(&[0, 1]);
    insert_find_all(&[1, 0]);
}

#[test]
fn three_elems_find() {
    insert_find_all(&[0, 1, 2]);
    insert_find_all(&[0, 2, 1]);
    insert_find_all(&[1, 0, 2]);
    insert_find_all(&[1, 2, 0]);
    insert_find_all(&[2, 0, 1]);
    insert_find_all(&[2, 1, 0]);
}

#[test]
fn duplicates_find() {
    insert_find_all(&[1, 1]);
    insert_find_all(&[2, 1, 2, 1, 2]);
    insert_find_all(&[-3, 7, -3, 0, 7, 7]);
}

#[test]
fn duplicate_insert_is_noop() {
    let mut tree: Tree = [2, 1, 3].into_iter().collect();

    assert!(!tree.insert(2));
    assert!(!tree.insert(3));
    assert_eq!(tree.len(), 3);
    assert_eq!(tree.height(), 1);
}

// Every permutation of `keys`, via Heap's algorithm.
fn permutations(keys: &[Key]) -> Vec<Vec<Key>> {
    fn generate(k: usize, keys: &mut Vec<Key>, out: &mut Vec<Vec<Key>>) {
        if k <= 1 {
            out.push(keys.clone());
            return;
        }

        generate(k - 1, keys, out);
        for i in 0..k - 1 {
            if k % 2 == 0 {
                keys.swap(i, k - 1);
            } else {
                keys.swap(0, k - 1);
            }
            generate(k - 1, keys, out);
        }
    }

    let mut keys = keys.to_vec();
    let mut out = Vec::new();
    generate(keys.len(), &mut keys, &mut out);
    out
}

fn insert_delete_all(keys: &[Key]) {
    let mut tree: Tree = keys.iter().copied().collect();
    let mut remaining: BTreeSet<Key> = keys.iter().copied().collect();

    for &key in keys {
        assert!(tree.delete(key), "{key} not found in {tree:?}");
        remaining.remove(&key);
        model::assert_equivalent(&tree, &remaining);
    }

    assert!(tree.is_empty());

    tree.extend(keys.iter().copied());
    remaining.extend(keys.iter().copied());

    for &key in keys.iter().rev() {
        assert!(tree.delete(key), "{key} not found in {tree:?}");
        remaining.remove(&key);
        model::assert_equivalent(&tree, &remaining);
    }

    assert!(tree.is_empty());
}

#[test]
fn delete_one() {
    insert_delete_all(&[0]);
}

#[test]
fn delete_two() {
    insert_delete_all(&[0, 1]);
    insert_delete_all(&[1, 0]);
}

#[test]
fn delete_three() {
    for keys in permutations(&[0, 1, 2]) {
        insert_delete_all(&keys);
    }
}

#[test]
fn delete_four() {
    let all = permutations(&[0, 1, 2, 3]);
    assert_eq!(all.len(), 24);

    for keys in all {
        insert_delete_all(&keys);
    }
}

#[test]
fn delete_five() {
    for keys in permutations(&[0, 1, 2, 3, 4]) {
        insert_delete_all(&keys);
    }
}

#[test]
fn delete_missing_is_noop() {
    let mut tree: Tree = [5, 3, 8].into_iter().collect();

    assert!(!tree.delete(4));
    assert!(!tree.delete(100));
    assert_eq!(tree.iter().collect::<Vec<_>>(), [3, 5, 8]);
    assert_eq!(tree.len(), 3);

    let mut empty = Tree::new();
    assert!(!empty.delete(0));
    assert!(empty.is_empty());
}

#[test]
fn delete_two_children_uses_successor() {
    let mut tree: Tree = [50, 30, 70, 20, 40, 60, 80, 65].into_iter().collect();

    assert!(tree.delete(50));
    tree.assert_invariants();

    // 60 is the least key right of the root; it takes the root's place and its right child 65
    // moves up into its old slot.
    let root = tree.root().expect("tree is not empty");
    assert_eq!(root.key(), 60);
    assert_eq!(tree.get(70).and_then(Node::left).map(Node::key), Some(65));
    assert_eq!(
        tree.iter().collect::<Vec<_>>(),
        [20, 30, 40, 60, 65, 70, 80]
    );
}

#[test]
fn delete_one_child_elevates_child() {
    let mut tree: Tree = [10, 5, 1].into_iter().collect();

    assert!(tree.delete(5));
    tree.assert_invariants();
    assert_eq!(tree.root().and_then(Node::left).map(Node::key), Some(1));
}

#[test]
fn delete_descends_both_ways() {
    let mut tree: Tree = [50, 25, 75, 12, 37, 62, 87, 30, 70].into_iter().collect();

    // Left then right, right then left, and leaves at depth three.
    assert!(tree.delete(37));
    assert!(tree.delete(62));
    assert!(tree.delete(30));
    assert!(tree.delete(70));
    assert!(!tree.delete(31));
    tree.assert_invariants();

    assert_eq!(tree.iter().collect::<Vec<_>>(), [12, 25, 50, 75, 87]);
    assert!(tree.get(25).and_then(Node::right).is_none());
    assert!(tree.get(75).and_then(Node::left).is_none());
}

#[test]
fn leaves() {
    let mut tree: Tree = [2, 1, 3].into_iter().collect();

    assert!(!tree.root().is_some_and(Node::is_leaf));
    assert!(tree.get(1).is_some_and(Node::is_leaf));
    assert!(tree.get(3).is_some_and(Node::is_leaf));

    tree.delete(1);
    tree.delete(3);
    assert!(tree.root().is_some_and(Node::is_leaf));
}

#[test]
fn find_min_and_max() {
    let tree: Tree = [5, 3, 8, 1, 4, 7, 9].into_iter().collect();
    let root = tree.root().expect("tree is not empty");

    assert_eq!(find_min(root).key(), 1);
    assert_eq!(find_max(root).key(), 9);
    assert_eq!(root.right().map(|r| find_min(r).key()), Some(7));
    assert_eq!((tree.first(), tree.last()), (Some(1), Some(9)));
    assert_eq!(Tree::new().first(), None);
}

#[test]
fn pop_first_and_last() {
    let mut tree: Tree = [4, 2, 6, 1, 3, 5, 7].into_iter().collect();

    assert_eq!(tree.pop_first(), Some(1));
    assert_eq!(tree.pop_last(), Some(7));
    assert_eq!(tree.pop_last(), Some(6));
    tree.assert_invariants();
    assert_eq!(tree.iter().collect::<Vec<_>>(), [2, 3, 4, 5]);

    while tree.pop_first().is_some() {}
    assert!(tree.is_empty());
    assert_eq!(tree.pop_last(), None);
}

#[test]
fn inorder_visits_ascending() {
    let tree: Tree = [9, -2, 14, 0, 3, -7].into_iter().collect();

    let mut seen = Vec::new();
    tree.inorder(|key| seen.push(key));
    assert_eq!(seen, [-7, -2, 0, 3, 9, 14]);

    let mut again = Vec::new();
    tree.inorder(|key| again.push(key));
    assert_eq!(seen, again);
}

#[test]
fn balanced_scenario() {
    let tree: Tree = [5, 3, 8, 1, 4, 7, 9].into_iter().collect();

    assert_eq!(tree.iter().collect::<Vec<_>>(), [1, 3, 4, 5, 7, 8, 9]);
    assert_eq!(tree.height(), 2);
    assert!(tree.is_avl());
}

#[test]
fn degenerate_scenario() {
    let tree: Tree = [1, 2, 3, 4, 5].into_iter().collect();

    assert_eq!(tree.height(), 4);
    assert!(!tree.is_avl());
    assert_eq!(tree.balance_factor(1), Some(4));

    // Right-leaning chain: no node has a left child.
    let mut cur = tree.root();
    while let Some(node) = cur {
        assert!(node.left().is_none());
        cur = node.right();
    }
}

#[test]
fn empty_scenario() {
    let tree = Tree::new();

    assert_eq!(tree.height(), -1);
    assert!(tree.is_avl());
    assert!(tree.balance_factors().is_empty());
    assert!(matches!(tree.statistics(), Err(Error::EmptyTree)));
}

#[test]
fn clear_and_reuse() {
    let mut tree: Tree = [8, 4, 12, 2, 6, 10, 14].into_iter().collect();

    tree.clear();
    assert!(tree.is_empty());
    assert_eq!(tree.root().map(Node::key), None);

    tree.insert(1);
    tree.assert_invariants();
    assert_eq!(tree.len(), 1);
}

#[test]
fn long_chain_analysis() {
    // Analyses and drop must not recurse once per level.
    let mut tree: Tree = (0..20_000).rev().collect();

    assert_eq!(tree.height(), 19_999);
    assert!(!tree.is_avl());
    assert_eq!(tree.balance_factor(19_999), Some(-19_999));
    assert_eq!(tree.statistics().map(|s| s.count).ok(), Some(20_000));
    assert!(tree.delete(19_999));
    assert_eq!(tree.pop_first(), Some(0));

    drop(tree);
}

#[cfg(miri)]
const FUZZ_RANGE: Range<usize> = 0..10;

#[cfg(not(miri))]
const FUZZ_RANGE: Range<usize> = 0..200;

proptest::proptest! {
    #![proptest_config(ProptestConfig {
        max_shrink_iters: 65536,
        .. ProptestConfig::default()
    })]

    #[test]
    fn btree_equivalence(ops in proptest::collection::vec(model::op_strategy(), FUZZ_RANGE)) {
        model::run_btree_equivalence(ops);
    }

    #[test]
    fn inorder_is_sorted_dedup(keys in proptest::collection::vec(any::<Key>(), 0..300)) {
        let tree: Tree = keys.iter().copied().collect();

        let expected: Vec<Key> = keys.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();
        prop_assert_eq!(tree.iter().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn avl_matches_definition(keys in proptest::collection::vec(-50i32..50, 0..40)) {
        let tree: Tree = keys.iter().copied().collect();

        prop_assert_eq!(tree.height(), reference_height(tree.root()));
        prop_assert_eq!(tree.is_avl(), reference_is_avl(tree.root()));
        prop_assert_eq!(
            tree.is_avl(),
            tree.balance_factors().iter().all(|bf| !bf.is_violation())
        );
    }

    #[test]
    fn delete_preserves_order(
        keys in proptest::collection::vec(-100i32..100, 1..60),
        pick in any::<proptest::sample::Index>(),
    ) {
        let mut tree: Tree = keys.iter().copied().collect();
        let key = keys[pick.index(keys.len())];

        prop_assert!(tree.delete(key));
        tree.assert_invariants();

        let mut expected: BTreeSet<Key> = keys.iter().copied().collect();
        expected.remove(&key);
        prop_assert!(expected.iter().copied().eq(tree.iter()));
    }
}
