use rand::{Rng, SeedableRng, XorShiftRng};
use std::collections::BTreeMap;
use std::vec::Vec;
use treap_map::treap::TreapMap;
use treap_map::{Error, OrderedMap};

fn sample_treap() -> TreapMap<u32, &'static str> {
    let mut t = TreapMap::new();
    t.set(5, "a");
    t.set(3, "b");
    t.set(8, "c");
    t.set(1, "d");
    t.set(4, "e");
    t
}

fn longer_treap() -> TreapMap<u32, &'static str> {
    let mut t = TreapMap::new();
    t.set(10, "x");
    t.set(5, "y");
    t.set(15, "z");
    t.set(12, "a");
    t.set(18, "b");
    t.set(3, "c");
    t
}

fn keys<V>(t: &TreapMap<u32, V>) -> Vec<u32> {
    t.keys().cloned().collect()
}

#[test]
fn test_get() {
    let t = sample_treap();
    for &(key, value) in &[(5, "a"), (3, "b"), (8, "c"), (1, "d"), (4, "e")] {
        assert_eq!(t.get(&key), Ok(&value));
        assert!(t.contains(&key));
    }
}

#[test]
fn test_insert_and_update() {
    let mut t = sample_treap();
    t.set(7, "f");
    t.set(6, "g");
    t.set(5, "z");
    assert_eq!(t.get(&5), Ok(&"z"));
    assert_eq!(keys(&t), vec![1, 3, 4, 5, 6, 7, 8]);
    assert_eq!(t.len(), 7);
    assert!(t.is_valid());
}

#[test]
fn test_scenario_sample() {
    let mut t = sample_treap();
    assert_eq!(keys(&t), vec![1, 3, 4, 5, 8]);
    assert_eq!(t.get(&5), Ok(&"a"));
    assert_eq!(t.delete(&3), Ok(()));
    assert!(!t.contains(&3));
    assert_eq!(t.len(), 4);
    assert_eq!(keys(&t), vec![1, 4, 5, 8]);
    assert!(t.is_valid());
}

#[test]
fn test_deletion_structure() {
    let cases: Vec<(Vec<u32>, Vec<u32>)> = vec![
        (vec![1], vec![3, 4, 5, 8]),
        (vec![1, 3], vec![4, 5, 8]),
        (vec![1, 3, 5], vec![4, 8]),
    ];
    for (to_delete, expected) in cases {
        let mut t = sample_treap();
        for key in &to_delete {
            assert_eq!(t.delete(key), Ok(()));
        }
        assert_eq!(keys(&t), expected);
        assert!(t.is_valid());
    }
}

#[test]
fn test_delete_missing() {
    let mut t = sample_treap();
    assert_eq!(t.delete(&10), Err(Error::KeyNotFound));
    assert_eq!(t.len(), 5);
    assert_eq!(keys(&t), vec![1, 3, 4, 5, 8]);
}

#[test]
fn test_delete_empty() {
    let mut t: TreapMap<u32, u32> = TreapMap::new();
    for key in 0..10 {
        assert_eq!(t.delete(&key), Err(Error::KeyNotFound));
    }
    assert!(t.is_empty());
}

#[test]
fn test_mixed_insertion_deletion_structure() {
    let mut t = longer_treap();
    assert_eq!(keys(&t), vec![3, 5, 10, 12, 15, 18]);

    t.delete(&15).unwrap();
    assert_eq!(keys(&t), vec![3, 5, 10, 12, 18]);

    t.delete(&10).unwrap();
    assert_eq!(keys(&t), vec![3, 5, 12, 18]);

    t.set(6, "d");
    assert_eq!(keys(&t), vec![3, 5, 6, 12, 18]);

    t.delete(&6).unwrap();
    assert_eq!(keys(&t), vec![3, 5, 12, 18]);
    assert!(t.is_valid());
}

#[test]
fn test_len() {
    let mut t = sample_treap();
    assert_eq!(t.len(), 5);
    t.delete(&5).unwrap();
    assert_eq!(t.len(), 4);
}

#[test]
fn test_reversed_iteration() {
    let t = sample_treap();
    assert_eq!(t.keys_rev().cloned().collect::<Vec<u32>>(), vec![8, 5, 4, 3, 1]);
}

#[test]
fn test_explicit_priorities() {
    let mut t = TreapMap::new();
    t.set_with_priority(10, "x", 50);
    t.set_with_priority(5, "y", 70);
    t.set_with_priority(15, "z", 30);
    t.set_with_priority(12, "a", 90);
    t.set_with_priority(18, "b", 10);
    t.set_with_priority(3, "c", 60);
    assert!(t.is_valid());

    // 12 has the highest priority, so it is the root and both of its subtrees are non-empty.
    t.delete(&12).unwrap();
    assert_eq!(keys(&t), vec![3, 5, 10, 15, 18]);
    assert!(t.is_valid());

    t.set_with_priority(12, "a", 0);
    assert_eq!(keys(&t), vec![3, 5, 10, 12, 15, 18]);
    assert!(t.is_valid());
}

#[test]
fn test_random_operations() {
    let mut rng: XorShiftRng = SeedableRng::from_seed([1, 1, 1, 1]);
    let mut t = TreapMap::from_seed([5, 6, 7, 8]);
    let mut expected = BTreeMap::new();

    for _ in 0..20_000 {
        let key = rng.gen_range(0, 1_000u32);
        let value = rng.next_u32();
        match rng.next_u32() % 3 {
            0 => assert_eq!(t.delete(&key).is_ok(), expected.remove(&key).is_some()),
            _ => assert_eq!(t.insert(key, value), expected.insert(key, value)),
        }
        assert_eq!(t.len(), expected.len());
    }

    assert!(t.is_valid());
    assert_eq!(t.iter().collect::<Vec<_>>(), expected.iter().collect::<Vec<_>>());
    assert_eq!(t.iter_rev().collect::<Vec<_>>(), expected.iter().rev().collect::<Vec<_>>());
}

#[test]
fn test_emptying() {
    let mut rng: XorShiftRng = SeedableRng::from_seed([2, 3, 5, 7]);
    let mut t = TreapMap::new();
    let mut inserted = Vec::new();
    for _ in 0..10_000 {
        let key = rng.gen::<u32>();
        if t.insert(key, key).is_none() {
            inserted.push(key);
        }
    }
    assert_eq!(t.len(), inserted.len());

    rng.shuffle(&mut inserted);
    for key in &inserted {
        assert_eq!(t.remove(key), Ok((*key, *key)));
    }

    assert!(t.is_empty());
    assert_eq!(t.iter().next(), None);
    assert!(t.is_valid());
}

#[test]
fn test_sorted_elements() {
    let mut rng = rand::thread_rng();
    let mut t = TreapMap::new();
    let mut expected = Vec::new();
    for _ in 0..100_000 {
        let key = rng.gen::<u32>();
        let val = rng.gen::<u32>();

        if !t.contains(&key) {
            t.insert(key, val);
            expected.push((key, val));
        }
    }

    expected.sort();
    expected.dedup_by_key(|pair| pair.0);

    let actual = t.iter().map(|(key, value)| (*key, *value)).collect::<Vec<(u32, u32)>>();
    assert_eq!(expected, actual);
    assert_eq!(t.len(), actual.len());
}

#[test]
fn test_ordered_map_trait() {
    let mut t: TreapMap<u32, u32> = TreapMap::new();
    {
        let map: &mut dyn OrderedMap<u32, u32> = &mut t;
        for key in (0..100).rev() {
            map.set(key, key + 1);
        }
        for key in (0..100).filter(|key| key % 2 == 0) {
            map.delete(&key).unwrap();
        }
        assert_eq!(map.len(), 50);
        assert!(!map.contains(&0));
        assert_eq!(map.get(&1), Ok(&2));
        assert_eq!(map.iter().map(|(key, _)| *key).next(), Some(1));
        assert_eq!(map.iter_rev().map(|(key, _)| *key).next(), Some(99));
    }
    assert!(t.is_valid());
}
