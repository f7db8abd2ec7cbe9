use super::*;

use proptest::prelude::*;
use std::collections::BTreeMap;

#[derive(Clone, Debug)]
enum Op {
    Put(u8, i32),
    Remove(u8),
    PutFirst(u8, i32),
    PutLast(u8, i32),
    MoveFirst(u8),
    MoveLast(u8),
    PollFirst,
    PollLast,
    Get(u8),
    CursorRemove(usize),
    Clear,
}

fn key_strategy() -> impl Strategy<Value = u8> + Clone {
    // A narrow key range so puts collide with live keys often.
    0u8..48
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    let key = key_strategy();
    let op = prop_oneof![
        30 => (key.clone(), any::<i32>()).prop_map(|(k, v)| Op::Put(k, v)),
        15 => key.clone().prop_map(Op::Remove),
        8 => (key.clone(), any::<i32>()).prop_map(|(k, v)| Op::PutFirst(k, v)),
        8 => (key.clone(), any::<i32>()).prop_map(|(k, v)| Op::PutLast(k, v)),
        8 => key.clone().prop_map(Op::MoveFirst),
        8 => key.clone().prop_map(Op::MoveLast),
        5 => Just(Op::PollFirst),
        5 => Just(Op::PollLast),
        8 => key.clone().prop_map(Op::Get),
        4 => any::<usize>().prop_map(Op::CursorRemove),
        1 => Just(Op::Clear),
    ];
    prop::collection::vec(op, 0..=400)
}

/// Insertion-ordered reference model.
#[derive(Default)]
struct Model {
    entries: Vec<(u8, i32)>,
}

impl Model {
    fn position(&self, key: u8) -> Option<usize> {
        self.entries.iter().position(|(k, _)| *k == key)
    }

    fn put(&mut self, key: u8, value: i32) -> Option<i32> {
        match self.position(key) {
            Some(i) => Some(std::mem::replace(&mut self.entries[i].1, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    fn remove(&mut self, key: u8) -> Option<i32> {
        let i = self.position(key)?;
        Some(self.entries.remove(i).1)
    }

    fn put_first(&mut self, key: u8, value: i32) -> Option<i32> {
        let old = self.remove(key);
        self.entries.insert(0, (key, value));
        old
    }

    fn put_last(&mut self, key: u8, value: i32) -> Option<i32> {
        let old = self.remove(key);
        self.entries.push((key, value));
        old
    }

    fn move_first(&mut self, key: u8) -> bool {
        match self.position(key) {
            Some(i) if i > 0 => {
                let entry = self.entries.remove(i);
                self.entries.insert(0, entry);
                true
            }
            _ => false,
        }
    }

    fn move_last(&mut self, key: u8) -> bool {
        match self.position(key) {
            Some(i) if i + 1 < self.entries.len() => {
                let entry = self.entries.remove(i);
                self.entries.push(entry);
                true
            }
            _ => false,
        }
    }

    fn keys(&self) -> Vec<u8> {
        self.entries.iter().map(|(k, _)| *k).collect()
    }
}

#[cfg(feature = "linked")]
fn validate_linked(map: &LinkedDenseMap<u8, i32>, model: &Model) -> std::result::Result<(), TestCaseError> {
    prop_assert_eq!(map.len(), model.entries.len());
    prop_assert_eq!(map.len(), map.store.presence().count_ones());

    let forward: Vec<(u8, i32)> = map.iter().map(|(k, v)| (*k, *v)).collect();
    prop_assert_eq!(&forward, &model.entries);

    let mut backward: Vec<u8> = map.keys().rev().copied().collect();
    backward.reverse();
    prop_assert_eq!(backward, model.keys());

    prop_assert_eq!(map.first_key().copied(), model.entries.first().map(|e| e.0));
    prop_assert_eq!(map.last_key().copied(), model.entries.last().map(|e| e.0));
    for key in 0..=255u8 {
        prop_assert_eq!(map.contains_key(&key), map.store.is_present(key as usize));
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 10_000,
        .. ProptestConfig::default()
    })]

    #[cfg(feature = "linked")]
    #[test]
    fn prop_linked_map_matches_model(ops in ops_strategy()) {
        let mut map: LinkedDenseMap<u8, i32> = LinkedDenseMap::new();
        let mut model = Model::default();

        for op in ops {
            match op {
                Op::Put(k, v) => prop_assert_eq!(map.put(k, v), model.put(k, v)),
                Op::Remove(k) => prop_assert_eq!(map.remove(&k), model.remove(k)),
                Op::PutFirst(k, v) => {
                    prop_assert_eq!(map.put_and_move_to_first(k, v), model.put_first(k, v))
                }
                Op::PutLast(k, v) => {
                    prop_assert_eq!(map.put_and_move_to_last(k, v), model.put_last(k, v))
                }
                Op::MoveFirst(k) => prop_assert_eq!(map.move_to_first(&k), model.move_first(k)),
                Op::MoveLast(k) => prop_assert_eq!(map.move_to_last(&k), model.move_last(k)),
                Op::PollFirst => {
                    let expected = (!model.entries.is_empty()).then(|| model.entries.remove(0).0);
                    prop_assert_eq!(map.poll_first_key(), expected);
                }
                Op::PollLast => {
                    let expected = model.entries.pop().map(|e| e.0);
                    prop_assert_eq!(map.poll_last_key(), expected);
                }
                Op::Get(k) => {
                    let expected = model.position(k).map(|i| model.entries[i].1);
                    prop_assert_eq!(map.get(&k).copied(), expected);
                }
                Op::CursorRemove(n) => {
                    if !model.entries.is_empty() {
                        let target = n % model.entries.len();
                        let mut cursor = map.cursor();
                        for _ in 0..=target {
                            cursor.next_entry().unwrap();
                        }
                        let removed = cursor.remove().unwrap();
                        prop_assert_eq!(cursor.next_index(), target);
                        prop_assert_eq!(removed, model.entries.remove(target).1);
                    }
                }
                Op::Clear => {
                    map.clear();
                    model.entries.clear();
                }
            }
            validate_linked(&map, &model)?;
        }

        let copy = map.clone();
        prop_assert_eq!(&copy, &map);
        let drained: Vec<(u8, i32)> = copy.into_iter().collect();
        prop_assert_eq!(drained, model.entries);
    }

    #[cfg(feature = "array")]
    #[test]
    fn prop_array_map_matches_model(ops in ops_strategy()) {
        let mut map: ArrayMap<u8, i32> = ArrayMap::new();
        let mut model = Model::default();

        for op in ops {
            match op {
                Op::Put(k, v) => prop_assert_eq!(map.put(k, v), model.put(k, v)),
                Op::Remove(k) => prop_assert_eq!(map.remove(&k), model.remove(k)),
                Op::PutFirst(k, v) => {
                    prop_assert_eq!(map.put_and_move_to_first(k, v), model.put_first(k, v))
                }
                Op::PutLast(k, v) => {
                    prop_assert_eq!(map.put_and_move_to_last(k, v), model.put_last(k, v))
                }
                Op::MoveFirst(k) => prop_assert_eq!(map.move_to_first(&k), model.move_first(k)),
                Op::MoveLast(k) => prop_assert_eq!(map.move_to_last(&k), model.move_last(k)),
                Op::PollFirst => {
                    let expected = (!model.entries.is_empty()).then(|| model.entries.remove(0).0);
                    prop_assert_eq!(map.poll_first_key(), expected);
                }
                Op::PollLast => {
                    let expected = model.entries.pop().map(|e| e.0);
                    prop_assert_eq!(map.poll_last_key(), expected);
                }
                Op::Get(k) => {
                    let expected = model.position(k).map(|i| model.entries[i].1);
                    prop_assert_eq!(map.get(&k).copied(), expected);
                }
                Op::CursorRemove(n) => {
                    if !model.entries.is_empty() {
                        let (key, value) = model.entries.remove(n % model.entries.len());
                        prop_assert_eq!(map.remove(&key), Some(value));
                    }
                }
                Op::Clear => {
                    map.clear();
                    model.entries.clear();
                }
            }
            prop_assert_eq!(map.len(), model.entries.len());
        }

        let got: Vec<(u8, i32)> = map.iter().map(|(k, v)| (*k, *v)).collect();
        prop_assert_eq!(&got, &model.entries);
        let back: Vec<(u8, i32)> = map.iter().rev().map(|(k, v)| (*k, *v)).collect();
        prop_assert!(back.iter().eq(model.entries.iter().rev()));
    }

    #[test]
    fn prop_dense_map_matches_btree(ops in ops_strategy()) {
        let mut map: DenseMap<u8, i32> = DenseMap::new();
        let mut model: BTreeMap<u8, i32> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Put(k, v) | Op::PutFirst(k, v) | Op::PutLast(k, v) => {
                    prop_assert_eq!(map.put(k, v), model.insert(k, v));
                }
                Op::Remove(k) | Op::MoveFirst(k) | Op::MoveLast(k) => {
                    prop_assert_eq!(map.remove(&k), model.remove(&k));
                }
                Op::Get(k) => prop_assert_eq!(map.get(&k), model.get(&k)),
                Op::PollFirst | Op::PollLast => {
                    prop_assert_eq!(map.keys().next(), model.keys().next());
                    prop_assert_eq!(map.keys().next_back(), model.keys().next_back());
                }
                Op::CursorRemove(n) => {
                    if !model.is_empty() {
                        let target = n % model.len();
                        let key = *model.keys().nth(target).unwrap();
                        let mut cursor = map.cursor_back();
                        for _ in target..model.len() {
                            cursor.previous_entry().unwrap();
                        }
                        prop_assert_eq!(cursor.current_key(), Some(&key));
                        prop_assert_eq!(cursor.remove().ok(), model.remove(&key));
                    }
                }
                Op::Clear => {
                    map.clear();
                    model.clear();
                }
            }
            prop_assert_eq!(map.len(), model.len());
            prop_assert_eq!(map.len(), map.store.presence().count_ones());
        }

        let got: Vec<(u8, i32)> = map.iter().map(|(k, v)| (*k, *v)).collect();
        let expected: Vec<(u8, i32)> = model.iter().map(|(k, v)| (*k, *v)).collect();
        prop_assert_eq!(got, expected);
    }
}

#[test]
fn test_every_removal_position_on_small_maps() {
    // Exhaustive over every insertion permutation of four keys and every
    // cursor removal position.
    fn permutations(items: &[u8]) -> Vec<Vec<u8>> {
        if items.len() <= 1 {
            return vec![items.to_vec()];
        }
        let mut out = Vec::new();
        for i in 0..items.len() {
            let mut rest = items.to_vec();
            let head = rest.remove(i);
            for mut tail in permutations(&rest) {
                tail.insert(0, head);
                out.push(tail);
            }
        }
        out
    }

    for order in permutations(&[3, 1, 4, 0]) {
        for target in 0..order.len() {
            #[cfg(feature = "linked")]
            {
                let mut map: LinkedDenseMap<u8, i32> =
                    order.iter().map(|&k| (k, k as i32)).collect();
                let mut cursor = map.cursor();
                for _ in 0..=target {
                    cursor.next_entry().unwrap();
                }
                cursor.remove().unwrap();

                let mut expected = order.clone();
                expected.remove(target);
                assert_eq!(map.keys().copied().collect::<Vec<_>>(), expected);
                let mut back: Vec<u8> = map.keys().rev().copied().collect();
                back.reverse();
                assert_eq!(back, expected);
                assert_eq!(map.first_key(), expected.first());
                assert_eq!(map.last_key(), expected.last());
            }

            let mut map: DenseMap<u8, i32> = order.iter().map(|&k| (k, k as i32)).collect();
            let key = order[target];
            let mut cursor = map.cursor_from(&key).unwrap();
            cursor.previous_entry().unwrap();
            assert_eq!(cursor.remove(), Ok(key as i32));
            assert!(!map.contains_key(&key));
            assert_eq!(map.len(), order.len() - 1);
        }
    }
}
