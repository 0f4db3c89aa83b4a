//! Probabilistic binary search tree where each node also maintains the heap invariant.

mod map;
mod node;
mod tree;

pub use self::map::{IntoIter, Iter, IterMut, RevIter, TreapMap};
