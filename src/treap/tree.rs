use crate::entry::Entry;
use crate::treap::node::Node;
use std::cmp::Ordering;
use std::mem;

pub type Tree<K, V> = Option<Box<Node<K, V>>>;

/// Makes the right child of `node` the new local root. A node without a right child is returned
/// unchanged.
pub fn rotate_left<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let mut child = match node.right.take() {
        Some(child) => child,
        None => return node,
    };
    node.right = child.left.take();
    child.left = Some(node);
    child
}

/// Makes the left child of `node` the new local root. A node without a left child is returned
/// unchanged.
pub fn rotate_right<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let mut child = match node.left.take() {
        Some(child) => child,
        None => return node,
    };
    node.left = child.right.take();
    child.right = Some(node);
    child
}

// Nodes detached on the way down, each tagged with the side its detached child hangs from.
type Path<K, V> = Vec<(Box<Node<K, V>>, Ordering)>;

// Hangs `subtree` back under the detached nodes of `path`, bottom-up.
fn reattach<K, V>(mut path: Path<K, V>, mut subtree: Tree<K, V>) -> Tree<K, V> {
    while let Some((mut parent, side)) = path.pop() {
        match side {
            Ordering::Less => parent.left = subtree,
            _ => parent.right = subtree,
        }
        subtree = Some(parent);
    }
    subtree
}

/// Inserts `new_node` into `tree`. If the key already exists, only the value is replaced and the
/// old value is returned; the existing node keeps its priority and position.
///
/// The search path is held in an explicit stack, so the depth of `tree` is bounded only by memory.
pub fn insert<K, V>(tree: &mut Tree<K, V>, new_node: Node<K, V>) -> Option<V>
where
    K: Ord,
{
    let mut path: Path<K, V> = Vec::new();
    let mut curr = tree.take();
    let mut ret = None;

    let mut subtree = loop {
        match curr {
            None => break Box::new(new_node),
            Some(mut node) => match new_node.entry.key.cmp(&node.entry.key) {
                Ordering::Less => {
                    curr = node.left.take();
                    path.push((node, Ordering::Less));
                },
                Ordering::Greater => {
                    curr = node.right.take();
                    path.push((node, Ordering::Greater));
                },
                Ordering::Equal => {
                    let Node { entry: Entry { value, .. }, .. } = new_node;
                    ret = Some(mem::replace(&mut node.entry.value, value));
                    break node;
                },
            },
        }
    };

    while let Some((mut parent, side)) = path.pop() {
        match side {
            Ordering::Less => {
                parent.left = Some(subtree);
                if parent.is_heap_property_violated(&parent.left) {
                    parent = rotate_right(parent);
                }
            },
            _ => {
                parent.right = Some(subtree);
                if parent.is_heap_property_violated(&parent.right) {
                    parent = rotate_left(parent);
                }
            },
        }
        debug_assert!(
            !parent.is_heap_property_violated(&parent.left)
                && !parent.is_heap_property_violated(&parent.right)
        );
        subtree = parent;
    }

    *tree = Some(subtree);
    ret
}

/// Removes the entry with `key` from `tree`. Returns `None` and leaves `tree` untouched if the key
/// does not exist.
///
/// The node being removed is pushed down toward its higher priority child (to the right only if
/// the right child's priority is strictly greater) until it has at most one child, at which point
/// that child takes its place. Like `insert`, this walks the tree with an explicit stack.
pub fn remove<K, V>(tree: &mut Tree<K, V>, key: &K) -> Option<Entry<K, V>>
where
    K: Ord,
{
    let mut path: Path<K, V> = Vec::new();
    let mut curr = tree.take();

    let mut node = loop {
        match curr {
            None => {
                *tree = reattach(path, None);
                return None;
            },
            Some(mut node) => match key.cmp(&node.entry.key) {
                Ordering::Less => {
                    curr = node.left.take();
                    path.push((node, Ordering::Less));
                },
                Ordering::Greater => {
                    curr = node.right.take();
                    path.push((node, Ordering::Greater));
                },
                Ordering::Equal => break node,
            },
        }
    };

    let (entry, replacement) = loop {
        match (node.left.take(), node.right.take()) {
            (None, child) | (child, None) => {
                let Node { entry, .. } = *node;
                break (entry, child);
            },
            (Some(left_node), Some(right_node)) => {
                let rotate_toward_right = right_node.priority > left_node.priority;
                node.left = Some(left_node);
                node.right = Some(right_node);
                let mut new_root;
                if rotate_toward_right {
                    new_root = rotate_left(node);
                    node = match new_root.left.take() {
                        Some(node) => node,
                        None => unreachable!(),
                    };
                    path.push((new_root, Ordering::Less));
                } else {
                    new_root = rotate_right(node);
                    node = match new_root.right.take() {
                        Some(node) => node,
                        None => unreachable!(),
                    };
                    path.push((new_root, Ordering::Greater));
                }
            },
        }
    };

    *tree = reattach(path, replacement);
    Some(entry)
}

pub fn get<'a, K, V>(tree: &'a Tree<K, V>, key: &K) -> Option<&'a Entry<K, V>>
where
    K: Ord,
{
    let mut curr = tree;
    while let Some(node) = curr {
        match key.cmp(&node.entry.key) {
            Ordering::Less => curr = &node.left,
            Ordering::Greater => curr = &node.right,
            Ordering::Equal => return Some(&node.entry),
        }
    }
    None
}

pub fn get_mut<'a, K, V>(tree: &'a mut Tree<K, V>, key: &K) -> Option<&'a mut Entry<K, V>>
where
    K: Ord,
{
    let mut curr = tree;
    loop {
        match curr {
            Some(node) => match key.cmp(&node.entry.key) {
                Ordering::Less => curr = &mut node.left,
                Ordering::Greater => curr = &mut node.right,
                Ordering::Equal => return Some(&mut node.entry),
            },
            None => return None,
        }
    }
}

pub fn min<K, V>(tree: &Tree<K, V>) -> Option<&Entry<K, V>> {
    tree.as_ref().map(|node| {
        let mut curr = node;
        while let Some(ref left_node) = curr.left {
            curr = left_node;
        }
        &curr.entry
    })
}

pub fn max<K, V>(tree: &Tree<K, V>) -> Option<&Entry<K, V>> {
    tree.as_ref().map(|node| {
        let mut curr = node;
        while let Some(ref right_node) = curr.right {
            curr = right_node;
        }
        &curr.entry
    })
}

/// Releases every node of `tree` without recursing, so trees of any depth can be dropped.
pub fn clear<K, V>(tree: &mut Tree<K, V>) {
    let mut stack: Vec<Box<Node<K, V>>> = tree.take().into_iter().collect();
    while let Some(mut node) = stack.pop() {
        stack.extend(node.left.take());
        stack.extend(node.right.take());
    }
}

/// Checks the binary search tree order, the heap order and that `tree` holds exactly `len` nodes.
pub fn is_valid<K, V>(tree: &Tree<K, V>, len: usize) -> bool
where
    K: Ord,
{
    let mut count = 0;
    let mut stack: Vec<(&Node<K, V>, Option<&K>, Option<&K>)> = Vec::new();
    if let Some(ref node) = tree {
        stack.push((&**node, None, None));
    }

    while let Some((node, lower, upper)) = stack.pop() {
        count += 1;
        let key = &node.entry.key;
        if lower.map_or(false, |lower| key <= lower) || upper.map_or(false, |upper| key >= upper) {
            return false;
        }
        if node.is_heap_property_violated(&node.left) || node.is_heap_property_violated(&node.right) {
            return false;
        }
        if let Some(ref left_node) = node.left {
            stack.push((&**left_node, lower, Some(key)));
        }
        if let Some(ref right_node) = node.right {
            stack.push((&**right_node, Some(key), upper));
        }
    }

    count == len
}
