//! An in-memory ordered map implemented by a treap.
//!
//! The crate exposes [`TreapMap`](treap/struct.TreapMap.html), a binary search tree keyed by an
//! ordered type in which every node also carries a random priority kept in max-heap order. The
//! generic [`OrderedMap`](map/trait.OrderedMap.html) trait describes the mapping capability
//! independently of the tree.

mod entry;
mod error;
pub mod map;
pub mod treap;

pub use crate::error::{Error, Result};
pub use crate::map::OrderedMap;
