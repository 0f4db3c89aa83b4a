use crate::entry::Entry;
use crate::treap::tree::Tree;

/// A struct representing an internal node of a treap.
pub struct Node<K, V> {
    pub entry: Entry<K, V>,
    pub priority: u32,
    pub left: Tree<K, V>,
    pub right: Tree<K, V>,
}

impl<K, V> Node<K, V> {
    pub fn new(key: K, value: V, priority: u32) -> Self {
        Node {
            entry: Entry { key, value },
            priority,
            left: None,
            right: None,
        }
    }

    /// Returns `true` if the root of `subtree` outranks this node.
    pub fn is_heap_property_violated(&self, subtree: &Tree<K, V>) -> bool {
        match subtree {
            Some(child) => child.priority > self.priority,
            None => false,
        }
    }
}
