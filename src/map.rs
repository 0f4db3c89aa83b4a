//! Generic ordered mapping capability.

use crate::error::Result;
use crate::treap::TreapMap;
use rand::Rng;

/// Boxed iterator over the entries of an ordered map.
pub type MapIter<'a, K, V> = dyn Iterator<Item = (&'a K, &'a V)> + 'a;

/// An ordered map from keys of type `K` to values of type `V`.
///
/// Implementations keep their keys unique and totally ordered. `iter` yields entries in ascending
/// order of keys and `iter_rev` yields exactly the reverse sequence.
///
/// # Examples
///
/// ```
/// use treap_map::treap::TreapMap;
/// use treap_map::OrderedMap;
///
/// fn fill<M: OrderedMap<u32, u32>>(map: &mut M) {
///     for key in 0..4 {
///         map.set(key, key * 2);
///     }
/// }
///
/// let mut t = TreapMap::new();
/// fill(&mut t);
/// assert_eq!(OrderedMap::len(&t), 4);
/// assert_eq!(OrderedMap::get(&t, &3), Ok(&6));
/// ```
pub trait OrderedMap<K, V> {
    /// Returns the value associated with `key`, or `Error::KeyNotFound`.
    fn get(&self, key: &K) -> Result<&V>;

    /// Associates `value` with `key`, replacing the value of an existing key.
    fn set(&mut self, key: K, value: V);

    /// Removes `key`, or returns `Error::KeyNotFound` without modifying the map.
    fn delete(&mut self, key: &K) -> Result<()>;

    /// Returns `true` if `get` would succeed for `key`.
    fn contains(&self, key: &K) -> bool {
        self.get(key).is_ok()
    }

    /// Returns a fresh iterator over the entries in ascending order of keys.
    fn iter<'a>(&'a self) -> Box<MapIter<'a, K, V>>
    where
        K: 'a,
        V: 'a;

    /// Returns a fresh iterator over the entries in descending order of keys. It yields exactly
    /// the reverse of `iter`.
    fn iter_rev<'a>(&'a self) -> Box<MapIter<'a, K, V>>
    where
        K: 'a,
        V: 'a;

    /// Returns the number of entries in the map.
    fn len(&self) -> usize;

    /// Returns `true` if the map has no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, V, R> OrderedMap<K, V> for TreapMap<K, V, R>
where
    K: Ord,
    R: Rng,
{
    fn get(&self, key: &K) -> Result<&V> {
        TreapMap::get(self, key)
    }

    fn set(&mut self, key: K, value: V) {
        TreapMap::set(self, key, value)
    }

    fn delete(&mut self, key: &K) -> Result<()> {
        TreapMap::delete(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        TreapMap::contains(self, key)
    }

    fn iter<'a>(&'a self) -> Box<MapIter<'a, K, V>>
    where
        K: 'a,
        V: 'a,
    {
        Box::new(TreapMap::iter(self))
    }

    fn iter_rev<'a>(&'a self) -> Box<MapIter<'a, K, V>>
    where
        K: 'a,
        V: 'a,
    {
        Box::new(TreapMap::iter_rev(self))
    }

    fn len(&self) -> usize {
        TreapMap::len(self)
    }
}

#[cfg(test)]
mod tests {
    use super::OrderedMap;
    use crate::error::Error;
    use crate::treap::TreapMap;

    fn scenario<M: OrderedMap<u32, &'static str>>(map: &mut M) {
        map.set(5, "a");
        map.set(3, "b");
        map.set(8, "c");
        map.set(1, "d");
        map.set(4, "e");

        assert_eq!(map.iter().map(|(key, _)| *key).collect::<Vec<u32>>(), vec![1, 3, 4, 5, 8]);
        assert_eq!(map.get(&5), Ok(&"a"));
        assert_eq!(map.delete(&3), Ok(()));
        assert!(!map.contains(&3));
        assert_eq!(map.len(), 4);
        assert_eq!(map.iter_rev().map(|(key, _)| *key).collect::<Vec<u32>>(), vec![8, 5, 4, 1]);
        assert_eq!(map.delete(&3), Err(Error::KeyNotFound));
    }

    #[test]
    fn test_treap_map_as_ordered_map() {
        let mut map = TreapMap::new();
        scenario(&mut map);
        assert!(map.is_valid());
    }

    #[test]
    fn test_trait_object() {
        let mut map: Box<dyn OrderedMap<u32, u32>> = Box::new(TreapMap::new());
        assert!(map.is_empty());
        map.set(2, 4);
        map.set(1, 2);
        assert_eq!(map.get(&2), Ok(&4));
        assert_eq!(map.len(), 2);
        assert_eq!(map.iter().collect::<Vec<(&u32, &u32)>>(), vec![(&1, &2), (&2, &4)]);
    }
}
