//! Model-based checking of [`Tree`] against `BTreeSet` and straightforward recursive
//! definitions of height and AVL validity.

use std::collections::BTreeSet;

use arbitrary::Arbitrary;
use proptest::strategy::{Just, Strategy};

use crate::{Key, Node, Statistics, Tree};

#[derive(Copy, Clone, Debug, Arbitrary)]
pub enum ItemValue {
    Index(usize),
    Random(Key),
}

proptest::prop_compose! {
    fn index_strategy()(
        index in 0usize..1000,
    ) -> ItemValue {
        ItemValue::Index(index)
    }
}

proptest::prop_compose! {
    fn random_strategy()(
        random in -500 as Key..500,
    ) -> ItemValue {
        ItemValue::Random(random)
    }
}

fn value_strategy() -> impl Strategy<Value = ItemValue> {
    proptest::prop_oneof![index_strategy(), random_strategy()]
}

#[derive(Copy, Clone, Debug, Arbitrary)]
pub enum Op {
    Insert(ItemValue),
    Delete(ItemValue),
    Contains(ItemValue),
    First,
    PopFirst,
    Last,
    PopLast,
}

impl Op {
    fn finalize(self, sorted: &[Key]) -> FinalOp {
        // An index picks an existing key, so deletes and lookups hit something most of the time.
        fn get_value(v: &[Key], i: ItemValue) -> Key {
            match i {
                ItemValue::Index(idx) => {
                    if v.is_empty() {
                        idx as Key
                    } else {
                        v[idx % v.len()]
                    }
                }
                ItemValue::Random(v) => v,
            }
        }

        match self {
            Op::Insert(item) => FinalOp::Insert(get_value(sorted, item)),
            Op::Delete(item) => FinalOp::Delete(get_value(sorted, item)),
            Op::Contains(item) => FinalOp::Contains(get_value(sorted, item)),
            Op::First => FinalOp::First,
            Op::PopFirst => FinalOp::PopFirst,
            Op::Last => FinalOp::Last,
            Op::PopLast => FinalOp::PopLast,
        }
    }
}

#[derive(Copy, Clone, Debug)]
enum FinalOp {
    Insert(Key),
    Delete(Key),
    Contains(Key),
    First,
    PopFirst,
    Last,
    PopLast,
}

pub fn op_strategy() -> impl Strategy<Value = Op> {
    proptest::prop_oneof![
        value_strategy().prop_map(Op::Insert),
        value_strategy().prop_map(Op::Delete),
        value_strategy().prop_map(Op::Contains),
        Just(Op::First),
        Just(Op::PopFirst),
        Just(Op::Last),
        Just(Op::PopLast),
    ]
}

/// Height by direct recursion on the definition.
pub fn reference_height(node: Option<&Node>) -> isize {
    match node {
        None => -1,
        Some(n) => 1 + reference_height(n.left()).max(reference_height(n.right())),
    }
}

/// AVL validity by direct recursion on the definition.
pub fn reference_is_avl(node: Option<&Node>) -> bool {
    match node {
        None => true,
        Some(n) => {
            let lh = reference_height(n.left());
            let rh = reference_height(n.right());

            (lh - rh).abs() <= 1 && reference_is_avl(n.left()) && reference_is_avl(n.right())
        }
    }
}

/// Checks every derived value of `tree` against the reference definitions and `btree`.
pub fn assert_equivalent(tree: &Tree, btree: &BTreeSet<Key>) {
    tree.assert_invariants();

    assert_eq!(btree.len(), tree.len());
    assert!(btree.iter().copied().eq(tree.iter()));

    assert_eq!(tree.height(), reference_height(tree.root()));
    assert_eq!(tree.is_avl(), reference_is_avl(tree.root()));

    for bf in tree.balance_factors() {
        let node = tree.get(bf.key).expect("reported key is in the tree");
        let expected = reference_height(node.right()) - reference_height(node.left());
        assert_eq!(bf.factor, expected, "balance factor of {}", bf.key);
    }

    match (btree.first(), btree.last()) {
        (Some(&min), Some(&max)) => {
            let expected = Statistics {
                min,
                max,
                sum: btree.iter().copied().map(i64::from).sum(),
                count: btree.len(),
            };
            assert_eq!(tree.statistics().ok(), Some(expected));
        }
        _ => assert!(tree.statistics().is_err()),
    }
}

pub fn run_btree_equivalence(ops: Vec<Op>) {
    let mut sorted_values = Vec::with_capacity(ops.len());
    let mut btree = BTreeSet::new();
    let mut tree = Tree::new();

    fn insert_sorted(v: &mut Vec<Key>, value: Key) {
        if let Err(idx) = v.binary_search(&value) {
            v.insert(idx, value);
        }
    }

    fn remove_sorted(v: &mut Vec<Key>, value: Key) {
        if let Ok(idx) = v.binary_search(&value) {
            v.remove(idx);
        }
    }

    for (op_id, op) in ops.into_iter().enumerate() {
        let final_op = op.finalize(&sorted_values);

        match final_op {
            FinalOp::Insert(value) => {
                insert_sorted(&mut sorted_values, value);

                let from_btree = btree.insert(value);
                let from_tree = tree.insert(value);

                assert_eq!(from_btree, from_tree, "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::Delete(value) => {
                remove_sorted(&mut sorted_values, value);

                let from_btree = btree.remove(&value);
                let from_tree = tree.delete(value);

                assert_eq!(from_btree, from_tree, "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::Contains(value) => {
                let from_btree = btree.contains(&value);
                let from_tree = tree.contains(value);

                assert_eq!(from_btree, from_tree, "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::First => {
                let from_btree = btree.first().copied();
                let from_tree = tree.first();

                assert_eq!(from_btree, from_tree, "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::PopFirst => {
                let from_btree = btree.pop_first();
                if let Some(value) = from_btree {
                    remove_sorted(&mut sorted_values, value);
                }
                let from_tree = tree.pop_first();

                assert_eq!(from_btree, from_tree, "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::Last => {
                let from_btree = btree.last().copied();
                let from_tree = tree.last();

                assert_eq!(from_btree, from_tree, "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::PopLast => {
                let from_btree = btree.pop_last();
                if let Some(value) = from_btree {
                    remove_sorted(&mut sorted_values, value);
                }
                let from_tree = tree.pop_last();

                assert_eq!(from_btree, from_tree, "FinalOp #{op_id}: {final_op:?}");
            }
        }

        assert_equivalent(&tree, &btree);
    }
}
