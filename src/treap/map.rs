use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::treap::node::Node;
use crate::treap::tree;
use log::{debug, trace, warn};
use rand::{Rng, SeedableRng, XorShiftRng};
use std::fmt;
use std::iter::FromIterator;
use std::ops::Index;

/// An ordered map implemented by a treap.
///
/// A treap is a tree that satisfies both the binary search tree property and a heap property. Each
/// node has a key, a value, and a priority. The key of any node is greater than all keys in its
/// left subtree and less than all keys occurring in its right subtree. The priority of a node is
/// greater than or equal to the priority of its children. By randomly generating priorities, the
/// expected height of the tree is proportional to the logarithm of the number of keys.
///
/// Priorities are drawn from a random number generator owned by the map, so two maps never
/// interfere with each other and a seeded map always builds the same shape.
///
/// # Examples
///
/// ```
/// use treap_map::treap::TreapMap;
/// use treap_map::Error;
///
/// let mut t = TreapMap::new();
/// t.set(5, "a");
/// t.set(3, "b");
/// t.set(8, "c");
///
/// assert_eq!(t.get(&5), Ok(&"a"));
/// assert_eq!(t.get(&1), Err(Error::KeyNotFound));
/// assert_eq!(t.len(), 3);
///
/// assert_eq!(t.delete(&3), Ok(()));
/// assert_eq!(t.delete(&3), Err(Error::KeyNotFound));
/// assert_eq!(t.keys().collect::<Vec<&u32>>(), vec![&5, &8]);
/// assert_eq!(t.keys_rev().collect::<Vec<&u32>>(), vec![&8, &5]);
/// ```
pub struct TreapMap<K, V, R = XorShiftRng> {
    root: tree::Tree<K, V>,
    rng: R,
    len: usize,
}

impl<K, V> TreapMap<K, V>
where
    K: Ord,
{
    /// Constructs a new, empty `TreapMap<K, V>` whose priorities come from an unseeded xorshift
    /// generator.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_map::treap::TreapMap;
    ///
    /// let t: TreapMap<u32, u32> = TreapMap::new();
    /// ```
    pub fn new() -> Self {
        TreapMap::with_rng(XorShiftRng::new_unseeded())
    }

    /// Constructs a new, empty `TreapMap<K, V>` whose priorities come from a xorshift generator
    /// seeded with `seed`. Maps built from the same seed and the same operations have the same
    /// shape. An all-zero seed is not valid for xorshift, so it falls back to the unseeded
    /// generator.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_map::treap::TreapMap;
    ///
    /// let mut t = TreapMap::from_seed([1, 2, 3, 4]);
    /// t.set(1, 1);
    /// assert_eq!(t.len(), 1);
    /// ```
    pub fn from_seed(seed: [u32; 4]) -> Self {
        if seed == [0; 4] {
            warn!("all-zero xorshift seed; falling back to the unseeded generator");
            return TreapMap::new();
        }
        TreapMap::with_rng(XorShiftRng::from_seed(seed))
    }
}

impl<K, V, R> TreapMap<K, V, R>
where
    K: Ord,
    R: Rng,
{
    /// Constructs a new, empty `TreapMap<K, V, R>` that draws priorities from `rng`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rand::{SeedableRng, XorShiftRng};
    /// use treap_map::treap::TreapMap;
    ///
    /// let mut t = TreapMap::with_rng(XorShiftRng::from_seed([4, 3, 2, 1]));
    /// t.set(1, 1);
    /// assert!(t.contains(&1));
    /// ```
    pub fn with_rng(rng: R) -> Self {
        TreapMap {
            root: None,
            rng,
            len: 0,
        }
    }

    /// Inserts a key-value pair into the treap. If the key already exists in the treap, its value
    /// is replaced in place and the old value is returned. The node keeps its priority and its
    /// position in the tree, and the length of the map does not change.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_map::treap::TreapMap;
    ///
    /// let mut t = TreapMap::new();
    /// assert_eq!(t.insert(1, 1), None);
    /// assert_eq!(t.insert(1, 2), Some(1));
    /// assert_eq!(t.get(&1), Ok(&2));
    /// assert_eq!(t.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let priority = self.rng.next_u32();
        self.insert_with_priority(key, value, priority)
    }

    /// Inserts a key-value pair into the treap, replacing the value of an existing key. This is
    /// `insert` without the replaced value; use `insert` to get it back.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_map::treap::TreapMap;
    ///
    /// let mut t = TreapMap::new();
    /// t.set(1, "a");
    /// t.set(1, "b");
    /// assert_eq!(t.get(&1), Ok(&"b"));
    /// assert_eq!(t.len(), 1);
    /// ```
    pub fn set(&mut self, key: K, value: V) {
        self.insert(key, value);
    }
}

impl<K, V, R> TreapMap<K, V, R>
where
    K: Ord,
{
    /// Inserts a key-value pair into the treap with an explicit priority instead of one drawn
    /// from the generator. The priority is ignored if the key already exists.
    ///
    /// Chosen priorities can make the tree arbitrarily deep (for example, sorted keys with
    /// monotone priorities form a chain). Insertion and removal walk the tree with an explicit
    /// stack, so such trees cost linear time per operation but never exhaust the call stack.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_map::treap::TreapMap;
    ///
    /// let mut t = TreapMap::new();
    /// t.insert_with_priority(2, "b", 10);
    /// t.insert_with_priority(1, "a", 20);
    /// assert_eq!(t.keys().collect::<Vec<&u32>>(), vec![&1, &2]);
    /// ```
    pub fn insert_with_priority(&mut self, key: K, value: V, priority: u32) -> Option<V> {
        let ret = tree::insert(&mut self.root, Node::new(key, value, priority));
        match ret {
            Some(_) => trace!("replaced value of existing key"),
            None => {
                self.len += 1;
                trace!("inserted new key with priority {}, len = {}", priority, self.len);
            },
        }
        ret
    }

    /// Inserts a key-value pair with an explicit priority, replacing the value of an existing key.
    /// This is `insert_with_priority` without the replaced value.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_map::treap::TreapMap;
    ///
    /// let mut t = TreapMap::new();
    /// t.set_with_priority(1, 1, 7);
    /// assert_eq!(t.get(&1), Ok(&1));
    /// ```
    pub fn set_with_priority(&mut self, key: K, value: V, priority: u32) {
        self.insert_with_priority(key, value, priority);
    }

    /// Removes a key-value pair from the treap and returns it. Returns `Error::KeyNotFound` and
    /// leaves the treap unchanged if the key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_map::treap::TreapMap;
    /// use treap_map::Error;
    ///
    /// let mut t = TreapMap::new();
    /// t.insert(1, 1);
    /// assert_eq!(t.remove(&1), Ok((1, 1)));
    /// assert_eq!(t.remove(&1), Err(Error::KeyNotFound));
    /// ```
    pub fn remove(&mut self, key: &K) -> Result<(K, V)> {
        let entry = tree::remove(&mut self.root, key).ok_or(Error::KeyNotFound)?;
        self.len -= 1;
        trace!("removed key, len = {}", self.len);
        Ok(entry.into_pair())
    }

    /// Removes a key from the treap. Returns `Error::KeyNotFound` and leaves the treap unchanged
    /// if the key does not exist. This is `remove` without the removed pair; use `remove` to take
    /// ownership of it.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_map::treap::TreapMap;
    ///
    /// let mut t = TreapMap::new();
    /// t.insert(1, 1);
    /// assert!(t.delete(&1).is_ok());
    /// assert!(t.delete(&1).is_err());
    /// ```
    pub fn delete(&mut self, key: &K) -> Result<()> {
        self.remove(key).map(|_| ())
    }

    /// Checks if a key exists in the treap.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_map::treap::TreapMap;
    ///
    /// let mut t = TreapMap::new();
    /// t.insert(1, 1);
    /// assert!(!t.contains(&0));
    /// assert!(t.contains(&1));
    /// ```
    pub fn contains(&self, key: &K) -> bool {
        self.get(key).is_ok()
    }

    /// Returns an immutable reference to the value associated with a particular key. Returns
    /// `Error::KeyNotFound` if the key does not exist in the treap.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_map::treap::TreapMap;
    /// use treap_map::Error;
    ///
    /// let mut t = TreapMap::new();
    /// t.insert(1, 1);
    /// assert_eq!(t.get(&0), Err(Error::KeyNotFound));
    /// assert_eq!(t.get(&1), Ok(&1));
    /// ```
    pub fn get(&self, key: &K) -> Result<&V> {
        tree::get(&self.root, key)
            .map(|entry| &entry.value)
            .ok_or(Error::KeyNotFound)
    }

    /// Returns a mutable reference to the value associated with a particular key. Returns
    /// `Error::KeyNotFound` if the key does not exist in the treap.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_map::treap::TreapMap;
    ///
    /// let mut t = TreapMap::new();
    /// t.insert(1, 1);
    /// if let Ok(value) = t.get_mut(&1) {
    ///     *value = 2;
    /// }
    /// assert_eq!(t.get(&1), Ok(&2));
    /// ```
    pub fn get_mut(&mut self, key: &K) -> Result<&mut V> {
        tree::get_mut(&mut self.root, key)
            .map(|entry| &mut entry.value)
            .ok_or(Error::KeyNotFound)
    }

    /// Returns `true` if the binary search tree order and the heap order hold for every node and
    /// the recorded length matches the number of nodes.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_map::treap::TreapMap;
    ///
    /// let mut t = TreapMap::new();
    /// t.insert(1, 1);
    /// t.insert(2, 2);
    /// assert!(t.is_valid());
    /// ```
    pub fn is_valid(&self) -> bool {
        tree::is_valid(&self.root, self.len)
    }
}

impl<K, V, R> TreapMap<K, V, R> {
    /// Returns the number of elements in the treap.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_map::treap::TreapMap;
    ///
    /// let mut t = TreapMap::new();
    /// t.insert(1, 1);
    /// assert_eq!(t.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the treap has no elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_map::treap::TreapMap;
    ///
    /// let mut t = TreapMap::new();
    /// assert!(t.is_empty());
    /// t.insert(1, 1);
    /// assert!(!t.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Clears the treap, removing all values. The generator keeps its state.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_map::treap::TreapMap;
    ///
    /// let mut t = TreapMap::new();
    /// t.insert(1, 1);
    /// t.insert(2, 2);
    /// t.clear();
    /// assert_eq!(t.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        debug!("clearing treap with {} entries", self.len);
        tree::clear(&mut self.root);
        self.len = 0;
    }

    /// Returns the minimum key of the treap. Returns `None` if the treap is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_map::treap::TreapMap;
    ///
    /// let mut t = TreapMap::new();
    /// t.insert(1, 1);
    /// t.insert(3, 3);
    /// assert_eq!(t.min(), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&K> {
        tree::min(&self.root).map(|entry| &entry.key)
    }

    /// Returns the maximum key of the treap. Returns `None` if the treap is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_map::treap::TreapMap;
    ///
    /// let mut t = TreapMap::new();
    /// t.insert(1, 1);
    /// t.insert(3, 3);
    /// assert_eq!(t.max(), Some(&3));
    /// ```
    pub fn max(&self) -> Option<&K> {
        tree::max(&self.root).map(|entry| &entry.key)
    }

    /// Returns an iterator over the treap. The iterator will yield key-value pairs in ascending
    /// order of keys. Every call starts a fresh traversal of the current tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_map::treap::TreapMap;
    ///
    /// let mut t = TreapMap::new();
    /// t.insert(1, 1);
    /// t.insert(3, 3);
    ///
    /// let mut iterator = t.iter();
    /// assert_eq!(iterator.next(), Some((&1, &1)));
    /// assert_eq!(iterator.next(), Some((&3, &3)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            current: &self.root,
            stack: Vec::new(),
        }
    }

    /// Returns an iterator over the treap that yields key-value pairs in descending order of keys.
    /// It yields exactly the reverse of `iter`.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_map::treap::TreapMap;
    ///
    /// let mut t = TreapMap::new();
    /// t.insert(1, 1);
    /// t.insert(3, 3);
    ///
    /// let mut iterator = t.iter_rev();
    /// assert_eq!(iterator.next(), Some((&3, &3)));
    /// assert_eq!(iterator.next(), Some((&1, &1)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter_rev(&self) -> RevIter<'_, K, V> {
        RevIter {
            current: &self.root,
            stack: Vec::new(),
        }
    }

    /// Returns a mutable iterator over the treap. The iterator will yield key-value pairs in
    /// ascending order of keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_map::treap::TreapMap;
    ///
    /// let mut t = TreapMap::new();
    /// t.insert(1, 1);
    /// t.insert(3, 3);
    ///
    /// for (_, value) in &mut t {
    ///     *value += 1;
    /// }
    ///
    /// let mut iterator = t.iter_mut();
    /// assert_eq!(iterator.next(), Some((&1, &mut 2)));
    /// assert_eq!(iterator.next(), Some((&3, &mut 4)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            current: self.root.as_mut().map(|node| &mut **node),
            stack: Vec::new(),
        }
    }

    /// Returns an iterator over the keys of the treap in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_map::treap::TreapMap;
    ///
    /// let mut t = TreapMap::new();
    /// t.insert(3, 1);
    /// t.insert(1, 3);
    /// assert_eq!(t.keys().collect::<Vec<&u32>>(), vec![&1, &3]);
    /// ```
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over the keys of the treap in descending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_map::treap::TreapMap;
    ///
    /// let mut t = TreapMap::new();
    /// t.insert(3, 1);
    /// t.insert(1, 3);
    /// assert_eq!(t.keys_rev().collect::<Vec<&u32>>(), vec![&3, &1]);
    /// ```
    pub fn keys_rev(&self) -> impl Iterator<Item = &K> {
        self.iter_rev().map(|(key, _)| key)
    }

    /// Returns an iterator over the values of the treap in ascending order of their keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_map::treap::TreapMap;
    ///
    /// let mut t = TreapMap::new();
    /// t.insert(3, 1);
    /// t.insert(1, 3);
    /// assert_eq!(t.values().collect::<Vec<&u32>>(), vec![&3, &1]);
    /// ```
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }
}

impl<K, V, R> Drop for TreapMap<K, V, R> {
    fn drop(&mut self) {
        tree::clear(&mut self.root);
    }
}

impl<K, V, R> IntoIterator for TreapMap<K, V, R> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(mut self) -> Self::IntoIter {
        IntoIter {
            current: self.root.take(),
            stack: Vec::new(),
        }
    }
}

impl<'a, K, V, R> IntoIterator for &'a TreapMap<K, V, R>
where
    K: 'a,
    V: 'a,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, R> IntoIterator for &'a mut TreapMap<K, V, R>
where
    K: 'a,
    V: 'a,
{
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// An owning iterator for `TreapMap<K, V>`.
///
/// This iterator traverses the elements of a treap in ascending order of keys and yields owned
/// entries.
pub struct IntoIter<K, V> {
    current: tree::Tree<K, V>,
    stack: Vec<Node<K, V>>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(mut node) = self.current.take() {
            self.current = node.left.take();
            self.stack.push(*node);
        }
        self.stack.pop().map(|node| {
            let Node { entry, right, .. } = node;
            self.current = right;
            entry.into_pair()
        })
    }
}

impl<K, V> Drop for IntoIter<K, V> {
    fn drop(&mut self) {
        tree::clear(&mut self.current);
        for node in &mut self.stack {
            tree::clear(&mut node.right);
        }
    }
}

/// An iterator for `TreapMap<K, V>`.
///
/// This iterator traverses the elements of a treap in ascending order of keys and yields
/// immutable references.
pub struct Iter<'a, K, V> {
    current: &'a tree::Tree<K, V>,
    stack: Vec<&'a Node<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V>
where
    K: 'a,
    V: 'a,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.current {
            self.current = &node.left;
            self.stack.push(node);
        }
        self.stack.pop().map(|node| {
            let Node { entry: Entry { key, value }, right, .. } = node;
            self.current = right;
            (key, value)
        })
    }
}

/// A reverse iterator for `TreapMap<K, V>`.
///
/// This iterator traverses the elements of a treap in descending order of keys and yields
/// immutable references.
pub struct RevIter<'a, K, V> {
    current: &'a tree::Tree<K, V>,
    stack: Vec<&'a Node<K, V>>,
}

impl<'a, K, V> Iterator for RevIter<'a, K, V>
where
    K: 'a,
    V: 'a,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.current {
            self.current = &node.right;
            self.stack.push(node);
        }
        self.stack.pop().map(|node| {
            let Node { entry: Entry { key, value }, left, .. } = node;
            self.current = left;
            (key, value)
        })
    }
}

/// A mutable iterator for `TreapMap<K, V>`.
///
/// This iterator traverses the elements of a treap in ascending order of keys and yields mutable
/// references to the values.
pub struct IterMut<'a, K, V> {
    current: Option<&'a mut Node<K, V>>,
    stack: Vec<(&'a K, &'a mut V, Option<&'a mut Node<K, V>>)>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V>
where
    K: 'a,
    V: 'a,
{
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.current.take() {
            let Node { entry: Entry { key, value }, left, right, .. } = node;
            self.current = left.as_mut().map(|node| &mut **node);
            self.stack.push((&*key, value, right.as_mut().map(|node| &mut **node)));
        }
        self.stack.pop().map(|(key, value, right)| {
            self.current = right;
            (key, value)
        })
    }
}

impl<K, V> Default for TreapMap<K, V>
where
    K: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, R> Extend<(K, V)> for TreapMap<K, V, R>
where
    K: Ord,
    R: Rng,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for TreapMap<K, V>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = TreapMap::new();
        map.extend(iter);
        map
    }
}

impl<K, V, R> Index<&K> for TreapMap<K, V, R>
where
    K: Ord,
{
    type Output = V;

    fn index(&self, key: &K) -> &V {
        self.get(key).expect("Key does not exist.")
    }
}

impl<K, V, R> fmt::Debug for TreapMap<K, V, R>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
