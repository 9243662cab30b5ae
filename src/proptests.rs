use std::collections::BTreeSet;

use proptest::prelude::*;
use proptest_derive::Arbitrary;

use crate::AdaptiveRadixTree;

/// Reference model: a plain ordered set of byte strings.
#[derive(Default, Clone)]
struct Model {
    set: BTreeSet<Vec<u8>>,
}

impl Model {
    /// Mirrors the tree's inverted polarity: `true` if already present.
    fn insert(&mut self, key: Vec<u8>) -> bool {
        !self.set.insert(key)
    }

    fn len(&self) -> usize {
        self.set.len()
    }

    fn prefix(&self, prefix: &[u8]) -> BTreeSet<Vec<u8>> {
        self.set.iter().filter(|k| k.starts_with(prefix)).cloned().collect()
    }
}

/// Actions to test against both implementations.
#[derive(Arbitrary, Debug, Clone)]
enum Action {
    Insert(Key),
    PrefixScan(Key),
}

/// Wrapper for key generation with a custom strategy that exercises both
/// short/adversarial inputs and keys sharing long common stems.
#[derive(Debug, Clone)]
struct Key(Vec<u8>);

impl Arbitrary for Key {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            Just(Key(vec![])),
            prop::collection::vec(any::<u8>(), 1..4).prop_map(Key),
            prop::collection::vec(any::<u8>(), 4..64).prop_map(Key),
            // Keys that share a stem longer than MAX_INLINE_PREFIX, to
            // exercise the descendant-leaf fallback for prefix overflow.
            "[a-z]{12,20}".prop_map(|s| Key(s.into_bytes())),
            "[a-z]{4,8}\\.[a-z]{1,8}".prop_map(|s| Key(s.into_bytes())),
            // Keys containing the zero byte, which must not collide with
            // the "key exhausted" zero-suffix slot.
            prop::collection::vec(prop_oneof![Just(0u8), any::<u8>()], 0..8).prop_map(Key),
        ]
        .boxed()
    }
}

/// Test harness that executes actions on both the tree and the model.
#[derive(Default)]
struct Test {
    tree: AdaptiveRadixTree,
    model: Model,
}

impl Test {
    fn execute(&mut self, action: Action) {
        match action {
            Action::Insert(key) => {
                let tree_result = self.tree.insert(&key.0);
                let model_result = self.model.insert(key.0.clone());
                assert_eq!(
                    tree_result, model_result,
                    "insert mismatch: key={:?}, tree={:?}, model={:?}",
                    key.0, tree_result, model_result
                );
            }
            Action::PrefixScan(key) => {
                let tree_result: BTreeSet<Vec<u8>> =
                    self.tree.for_each_key_prefix(&key.0).into_iter().collect();
                let model_result = self.model.prefix(&key.0);
                assert_eq!(
                    tree_result, model_result,
                    "prefix scan mismatch for prefix={:?}",
                    key.0
                );
            }
        }
        assert_eq!(
            self.tree.size(),
            self.model.len(),
            "size mismatch after action: tree={}, model={}",
            self.tree.size(),
            self.model.len()
        );
        assert!(self.tree.verify_integrity().is_empty());
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        failure_persistence: None,
        ..ProptestConfig::default()
    })]

    #[test]
    fn proptest_vs_btreeset(actions in prop::collection::vec(any::<Action>(), 1..128)) {
        let mut test = Test::default();
        for action in actions {
            test.execute(action);
        }
    }

    #[test]
    fn proptest_order_independent_key_set(keys in prop::collection::vec(any::<Key>(), 0..64)) {
        let mut forward = AdaptiveRadixTree::new();
        for k in &keys {
            forward.insert(&k.0);
        }
        let mut reverse = AdaptiveRadixTree::new();
        for k in keys.iter().rev() {
            reverse.insert(&k.0);
        }
        let forward_set: BTreeSet<Vec<u8>> = forward.for_each_key_prefix(b"").into_iter().collect();
        let reverse_set: BTreeSet<Vec<u8>> = reverse.for_each_key_prefix(b"").into_iter().collect();
        prop_assert_eq!(forward_set, reverse_set);
    }
}
