use super::*;

use proptest::prelude::*;
use std::collections::BTreeMap;

use crate::node::Link;

/// Walks the whole tree and checks the structural invariants: unique sibling
/// labels, no dead branches, consistent parent links, cached keys matching
/// their paths, the element counter, and arena bookkeeping.
fn validate_tree<V>(t: &Trie<V>) {
    let nodes = &t.nodes;
    assert!(nodes[NodeId::ROOT].up.is_none(), "root must not have a parent");

    let mut stack: Vec<(NodeId, String)> = vec![(NodeId::ROOT, String::new())];
    let mut reachable = 0usize;
    let mut payloads = 0usize;
    while let Some((id, path)) = stack.pop() {
        reachable += 1;
        let node = &nodes[id];

        if id != NodeId::ROOT {
            assert!(
                node.payload.is_some() || !node.edges.is_empty(),
                "dead node at {path:?}"
            );
        }
        if let Some(payload) = &node.payload {
            payloads += 1;
            assert_eq!(&*payload.key, path, "cached key must match its path");
        }

        let labels: Vec<char> = node.edges.iter().map(|edge| edge.label).collect();
        let mut unique = labels.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), labels.len(), "duplicate labels at {path:?}");
        if nodes.order() == EdgeOrder::Lexicographic {
            assert_eq!(unique, labels, "edges must be sorted at {path:?}");
        }

        for edge in &node.edges {
            assert_eq!(
                nodes[edge.to].up,
                Some(Link {
                    parent: id,
                    label: edge.label
                }),
                "parent link mismatch below {path:?}"
            );
            let mut child_path = path.clone();
            child_path.push(edge.label);
            stack.push((edge.to, child_path));
        }
    }

    assert_eq!(payloads, t.len(), "payload count must match Trie::len");
    assert_eq!(reachable, t.node_count(), "every live node must be reachable");
}

#[derive(Clone, Debug)]
enum Op {
    Insert(String, u64),
    Remove(String),
    Get(String),
    Clear,
}

fn key_strategy() -> impl Strategy<Value = String> + Clone {
    // A tiny alphabet forces shared prefixes, nested keys and deep pruning;
    // the non-ASCII chars exercise multi-byte labels.
    "[abé🦀]{0,6}"
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    let key = key_strategy();
    let op = prop_oneof![
        50 => (key.clone(), any::<u64>()).prop_map(|(k, v)| Op::Insert(k, v)),
        25 => key.clone().prop_map(Op::Remove),
        24 => key.clone().prop_map(Op::Get),
        1 => Just(Op::Clear),
    ];
    prop::collection::vec(op, 0..=500)
}

fn trie_with(order: EdgeOrder) -> Trie<u64> {
    Trie::with_config(TrieConfig {
        edge_order: order,
        ..TrieConfig::default()
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 50_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence(order in any::<EdgeOrder>(), ops in ops_strategy()) {
        let mut t = trie_with(order);
        let mut m: BTreeMap<String, u64> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(key, value) => {
                    let old_t = t.insert(&key, value);
                    let old_m = m.insert(key, value);
                    prop_assert_eq!(old_t, old_m);
                }
                Op::Remove(key) => {
                    let old_t = t.remove(&key);
                    let old_m = m.remove(&key);
                    prop_assert_eq!(old_t, old_m);
                    prop_assert!(!t.contains_key(&key));
                }
                Op::Get(key) => {
                    prop_assert_eq!(t.get(&key), m.get(&key));
                    prop_assert_eq!(t.contains_key(&key), m.contains_key(&key));
                }
                Op::Clear => {
                    t.clear();
                    m.clear();
                }
            }

            prop_assert_eq!(t.len(), m.len());
            prop_assert_eq!(t.entries().len(), m.len());
        }

        validate_tree(&t);

        let mut got: Vec<(String, u64)> = t.iter().map(|(k, v)| (k.to_owned(), *v)).collect();
        let expected: Vec<(String, u64)> = m.iter().map(|(k, v)| (k.clone(), *v)).collect();
        if order == EdgeOrder::Insertion {
            got.sort();
        }
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_preorder_puts_prefixes_first(order in any::<EdgeOrder>(), keys in prop::collection::vec(key_strategy(), 0..64)) {
        let mut t = trie_with(order);
        for (i, key) in keys.iter().enumerate() {
            t.insert(key, i as u64);
        }

        let seen: Vec<&str> = t.keys().collect();
        prop_assert_eq!(seen.len(), t.len());
        for (i, key) in seen.iter().enumerate() {
            for later in &seen[i + 1..] {
                prop_assert!(!key.starts_with(*later) || key == later);
            }
        }
    }

    #[test]
    fn prop_equal_maps_hash_equal(ops in ops_strategy()) {
        let mut insertion = trie_with(EdgeOrder::Insertion);
        let mut lexicographic = trie_with(EdgeOrder::Lexicographic);
        for op in &ops {
            match op {
                Op::Insert(key, value) => {
                    insertion.insert(key, *value);
                    lexicographic.insert(key, *value);
                }
                Op::Remove(key) => {
                    insertion.remove(key);
                }
                Op::Get(_) | Op::Clear => {}
            }
        }
        // Replay the removals on the second map in the opposite order.
        for op in ops.iter().rev() {
            if let Op::Remove(key) = op {
                if !insertion.contains_key(key) {
                    lexicographic.remove(key);
                }
            }
        }

        validate_tree(&insertion);
        validate_tree(&lexicographic);
        prop_assert_eq!(&insertion, &lexicographic);
        prop_assert_eq!(insertion.hash_code(), lexicographic.hash_code());
    }
}

fn for_each_permutation<T: Clone>(items: &[T], mut f: impl FnMut(Vec<T>)) {
    fn rec<T: Clone>(items: &[T], used: &mut [bool], out: &mut Vec<T>, f: &mut impl FnMut(Vec<T>)) {
        if out.len() == items.len() {
            f(out.clone());
            return;
        }
        for i in 0..items.len() {
            if used[i] {
                continue;
            }
            used[i] = true;
            out.push(items[i].clone());
            rec(items, used, out, f);
            out.pop();
            used[i] = false;
        }
    }

    let mut used = vec![false; items.len()];
    let mut out = Vec::with_capacity(items.len());
    rec(items, &mut used, &mut out, &mut f);
}

const SMALL_SET: [&str; 6] = ["", "a", "b", "ab", "abc", "ba"];

#[test]
fn exhaustive_insert_order_small_set() {
    let mut reference: Option<Trie<u64>> = None;

    for_each_permutation(&SMALL_SET, |perm| {
        let mut t = trie_with(EdgeOrder::Lexicographic);
        for k in &perm {
            let v = SMALL_SET.iter().position(|s| s == k).unwrap_or(0) as u64;
            assert_eq!(t.insert(k, v), None);
        }

        validate_tree(&t);
        assert_eq!(t.node_count(), 6);
        let keys: Vec<&str> = t.keys().collect();
        assert_eq!(keys, ["", "a", "ab", "abc", "b", "ba"]);

        if reference.is_none() {
            reference = Some(t);
        } else {
            assert_eq!(reference.as_ref(), Some(&t));
        }
    });
}

#[test]
fn exhaustive_remove_order_small_set() {
    let mut base = trie_with(EdgeOrder::Insertion);
    let mut base_map: BTreeMap<String, u64> = BTreeMap::new();
    for (i, k) in SMALL_SET.iter().enumerate() {
        let v = i as u64;
        assert_eq!(base.insert(k, v), base_map.insert(k.to_string(), v));
    }

    for_each_permutation(&SMALL_SET, |perm| {
        let mut t = base.clone();
        let mut m = base_map.clone();

        for k in perm {
            assert_eq!(t.remove(k), m.remove(k));
            assert_eq!(t.len(), m.len());
            validate_tree(&t);
        }
        assert_eq!(t.len(), 0);
        assert_eq!(t.node_count(), 1);
    });
}
