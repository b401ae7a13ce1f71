//! Lala Hash Tree Implementation
//!
//! This module provides a recursively nested associative tree: every value
//! stored under a key is itself another `HashTree`. Leaves are simply keys
//! whose subtree is empty, so there is no separate value type.
//!
//! Children are owned by value by exactly one parent map. A tree can never
//! contain itself, and grafting a subtree always copies or moves its
//! structure instead of aliasing it.

mod error;
mod interop;
mod path;
mod traversal;

use std::borrow::Borrow;
use std::hash::Hash;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

pub use error::HashTreeError;
pub use traversal::{
    KeySearcher, PathCollector, RenderOptions, TraversalStats, TreeRenderer, Visitor,
};

/// Result type for hash tree operations
pub type HashTreeResult<T> = Result<T, HashTreeError>;

/// A node of the recursive tree: a mapping from keys to child trees.
///
/// Key features:
/// * Idempotent `add` that never overwrites existing content
/// * Destructive `set` family for explicit replacement
/// * Path-based insertion and lookup (see [`HashTree::ensure`] and [`HashTree::resolve`])
/// * Depth-first traversal through a [`Visitor`]
/// * Deep structural equality
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
#[serde(bound(
    serialize = "K: Serialize + Eq + Hash",
    deserialize = "K: Deserialize<'de> + Eq + Hash"
))]
pub struct HashTree<K> {
    /// Child trees keyed by their key at this level
    children: HashMap<K, HashTree<K>>,
}

impl<K> HashTree<K> {
    /// Returns the number of immediate children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns `true` if this node has no children, i.e. it is a leaf.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Removes every child of this node.
    pub fn clear(&mut self) {
        if !self.children.is_empty() {
            debug!(removed = self.children.len(), "clearing tree node");
        }
        self.children.clear();
    }

    /// Iterates over the immediate child keys.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.children.keys()
    }

    /// Collects the immediate child keys. Order is unspecified.
    pub fn list(&self) -> Vec<&K> {
        self.children.keys().collect()
    }

    /// Iterates over the immediate child subtrees.
    pub fn values(&self) -> impl Iterator<Item = &HashTree<K>> + '_ {
        self.children.values()
    }

    /// Iterates over `(key, subtree)` pairs at this level.
    pub fn iter(&self) -> hashbrown::hash_map::Iter<'_, K, HashTree<K>> {
        self.children.iter()
    }
}

impl<K: Eq + Hash> HashTree<K> {
    /// Creates a new empty `HashTree`.
    pub fn new() -> Self {
        Self {
            children: HashMap::new(),
        }
    }

    /// Creates a tree holding `key` as its only (empty) child.
    pub fn with_key(key: K) -> Self {
        let mut tree = Self::new();
        tree.add(key);
        tree
    }

    /// Creates a tree with every key of `keys` as an empty top-level child.
    pub fn from_keys<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
    {
        keys.into_iter().collect()
    }

    /// Ensures `key` exists as a child and returns its subtree.
    ///
    /// If the key is absent an empty child is created. If it is present the
    /// existing child is returned untouched, so calling `add` repeatedly with
    /// the same key never destroys content below it.
    ///
    /// # Arguments
    ///
    /// * `key` - The key to add at this level.
    ///
    /// # Returns
    ///
    /// A mutable reference to the child stored under `key`.
    pub fn add(&mut self, key: K) -> &mut HashTree<K> {
        self.children.entry(key).or_default()
    }

    /// Adds `key` and merges `subtree` into the node stored under it.
    pub fn add_tree(&mut self, key: K, subtree: HashTree<K>) {
        self.add(key).merge(subtree);
    }

    /// Merges `subtree` under `key` like [`HashTree::add_tree`], handing back
    /// a copy of what was stored there before the merge.
    ///
    /// # Returns
    ///
    /// The prior subtree under `key`, or `None` if `key` was absent.
    pub fn put(&mut self, key: K, subtree: HashTree<K>) -> Option<HashTree<K>>
    where
        K: Clone,
    {
        let previous = self.children.get(&key).cloned();
        self.add_tree(key, subtree);
        previous
    }

    /// Adds each key of `keys` at this level.
    pub fn add_keys<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = K>,
    {
        for key in keys {
            self.add(key);
        }
    }

    /// Adds `key`, then adds each of `values` as a child of that key's node.
    pub fn add_values<I>(&mut self, key: K, values: I)
    where
        I: IntoIterator<Item = K>,
    {
        self.add(key).add_keys(values);
    }

    /// Merges the structure of `other` into this tree.
    ///
    /// This is a structural union: keys already present are reused and
    /// extended recursively, keys only present in `other` are moved in.
    /// Nothing already stored in `self` is destroyed.
    pub fn merge(&mut self, other: HashTree<K>) {
        for (key, subtree) in other.children {
            self.add(key).merge(subtree);
        }
    }

    /// Same as [`HashTree::merge`], but copies from a borrowed tree.
    pub fn merge_from(&mut self, other: &HashTree<K>)
    where
        K: Clone,
    {
        for (key, subtree) in &other.children {
            match self.children.get_mut(key) {
                Some(existing) => existing.merge_from(subtree),
                None => {
                    self.children.insert(key.clone(), subtree.clone());
                }
            }
        }
    }

    /// Replaces whatever is stored under `key` with a single leaf `value`.
    pub fn set(&mut self, key: K, value: K) -> Option<HashTree<K>> {
        self.set_tree(key, HashTree::with_key(value))
    }

    /// Replaces whatever is stored under `key` with exactly `values` as leaves.
    pub fn set_values<I>(&mut self, key: K, values: I) -> Option<HashTree<K>>
    where
        I: IntoIterator<Item = K>,
    {
        self.set_tree(key, values.into_iter().collect())
    }

    /// Stores `subtree` under `key`, discarding any prior content there.
    ///
    /// # Returns
    ///
    /// The subtree previously stored under `key`, if any.
    pub fn set_tree(&mut self, key: K, subtree: HashTree<K>) -> Option<HashTree<K>> {
        let previous = self.children.insert(key, subtree);
        trace!(replaced = previous.is_some(), "set subtree");
        previous
    }

    /// Clears this node and adds each of `values` as a top-level key.
    pub fn set_keys<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = K>,
    {
        self.clear();
        self.add_keys(values);
    }

    /// Returns the subtree stored under `key`, if present.
    pub fn get<Q>(&self, key: &Q) -> Option<&HashTree<K>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.children.get(key)
    }

    /// Returns a mutable reference to the subtree stored under `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut HashTree<K>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.children.get_mut(key)
    }

    /// Lists the child keys of the node stored under `key`.
    ///
    /// Returns `None` if `key` is not an immediate child.
    pub fn list_key<Q>(&self, key: &Q) -> Option<Vec<&K>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get(key).map(HashTree::list)
    }

    /// Returns `true` if `key` is an immediate child.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.children.contains_key(key)
    }

    /// Detaches the subtree stored under `key` and hands it back.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<HashTree<K>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let removed = self.children.remove(key);
        trace!(found = removed.is_some(), "removed subtree");
        removed
    }

    /// Moves the subtree stored under `old_key` so it lives under `new_key`.
    ///
    /// Any content previously stored under `new_key` is discarded.
    ///
    /// # Returns
    ///
    /// `false` if `old_key` was not present, in which case nothing changes.
    pub fn replace_key<Q>(&mut self, old_key: &Q, new_key: K) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.children.remove(old_key) {
            Some(subtree) => {
                let clobbered = self.children.insert(new_key, subtree);
                debug!(clobbered = clobbered.is_some(), "replaced key");
                true
            }
            None => false,
        }
    }

    /// Counts keys at every depth below this node.
    ///
    /// This requires traversing the entire tree, so it's an O(n) operation.
    pub fn total_keys(&self) -> usize {
        self.stats().enters
    }

    /// Height of the tree: 0 for an empty tree, 1 when every child is a leaf.
    pub fn depth(&self) -> usize {
        self.stats().max_depth
    }

    /// Collects every root-to-leaf key path.
    pub fn leaf_paths(&self) -> Vec<Vec<&K>> {
        let mut collector = PathCollector::new();
        let _ = self.traverse(&mut collector);
        collector.into_paths()
    }

    /// Runs a [`TraversalStats`] visitor over the whole tree.
    pub fn stats(&self) -> TraversalStats {
        let mut stats = TraversalStats::default();
        let _ = self.traverse(&mut stats);
        stats
    }
}

impl<K> Default for HashTree<K> {
    fn default() -> Self {
        Self {
            children: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash> PartialEq for HashTree<K> {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.children.iter().all(|(key, subtree)| {
            other
                .children
                .get(key)
                .is_some_and(|theirs| subtree == theirs)
        })
    }
}

impl<K: Eq + Hash> Eq for HashTree<K> {}

impl<K: Eq + Hash> FromIterator<K> for HashTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.add_keys(iter);
        tree
    }
}

/// Extending with bare keys adds them at this level, like [`HashTree::add_keys`].
impl<K: Eq + Hash> Extend<K> for HashTree<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        self.add_keys(iter);
    }
}

/// Extending with `(key, subtree)` pairs merges, it never overwrites.
impl<K: Eq + Hash> Extend<(K, HashTree<K>)> for HashTree<K> {
    fn extend<I: IntoIterator<Item = (K, HashTree<K>)>>(&mut self, iter: I) {
        for (key, subtree) in iter {
            self.add_tree(key, subtree);
        }
    }
}

impl<K> IntoIterator for HashTree<K> {
    type Item = (K, HashTree<K>);
    type IntoIter = hashbrown::hash_map::IntoIter<K, HashTree<K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.children.into_iter()
    }
}

impl<'a, K> IntoIterator for &'a HashTree<K> {
    type Item = (&'a K, &'a HashTree<K>);
    type IntoIter = hashbrown::hash_map::Iter<'a, K, HashTree<K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.children.iter()
    }
}
