//! Path walking for the hash tree.
//!
//! Every path-taking operation funnels into one of two primitives:
//! [`HashTree::resolve`] descends without creating anything and yields `None`
//! on the first missing segment, while [`HashTree::ensure`] creates missing
//! segments as empty nodes and always reaches the end of the path.

use std::borrow::Borrow;
use std::hash::Hash;

use super::HashTree;

impl<K: Eq + Hash> HashTree<K> {
    /// Descends along `path` without modifying the tree.
    ///
    /// An empty path resolves to `self`.
    ///
    /// # Arguments
    ///
    /// * `path` - Keys to follow, outermost first.
    ///
    /// # Returns
    ///
    /// The node at the end of the path, or `None` if any segment is missing.
    pub fn resolve<'q, Q, I>(&self, path: I) -> Option<&HashTree<K>>
    where
        I: IntoIterator<Item = &'q Q>,
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq + 'q,
    {
        path.into_iter().try_fold(self, |node, key| node.get(key))
    }

    /// Mutable counterpart of [`HashTree::resolve`].
    pub fn resolve_mut<'q, Q, I>(&mut self, path: I) -> Option<&mut HashTree<K>>
    where
        I: IntoIterator<Item = &'q Q>,
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq + 'q,
    {
        path.into_iter().try_fold(self, |node, key| node.get_mut(key))
    }

    /// Descends along `path`, creating each missing segment with [`HashTree::add`].
    ///
    /// Never fails. Existing nodes on the way are reused untouched.
    pub fn ensure<I>(&mut self, path: I) -> &mut HashTree<K>
    where
        I: IntoIterator<Item = K>,
    {
        path.into_iter().fold(self, |node, key| node.add(key))
    }

    /// Creates `path` if needed and returns the node it ends at.
    #[inline]
    pub fn add_path<I>(&mut self, path: I) -> &mut HashTree<K>
    where
        I: IntoIterator<Item = K>,
    {
        self.ensure(path)
    }

    /// Creates `path` if needed, then adds each of `values` at its end.
    pub fn add_path_values<P, V>(&mut self, path: P, values: V)
    where
        P: IntoIterator<Item = K>,
        V: IntoIterator<Item = K>,
    {
        self.ensure(path).add_keys(values);
    }

    /// Creates `path` if needed, adds `value` at its end and returns the new node.
    pub fn add_path_value<P>(&mut self, path: P, value: K) -> &mut HashTree<K>
    where
        P: IntoIterator<Item = K>,
    {
        self.ensure(path).add(value)
    }

    /// Creates `path` if needed, then replaces the whole child set of the
    /// node at its end with `values`.
    ///
    /// All content previously stored below that node is discarded.
    pub fn set_path<P, V>(&mut self, path: P, values: V)
    where
        P: IntoIterator<Item = K>,
        V: IntoIterator<Item = K>,
    {
        self.ensure(path).set_keys(values);
    }

    /// Returns the subtree at `path`, or `None` if it does not exist.
    #[inline]
    pub fn get_path<'q, Q, I>(&self, path: I) -> Option<&HashTree<K>>
    where
        I: IntoIterator<Item = &'q Q>,
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq + 'q,
    {
        self.resolve(path)
    }

    #[inline]
    pub fn get_path_mut<'q, Q, I>(&mut self, path: I) -> Option<&mut HashTree<K>>
    where
        I: IntoIterator<Item = &'q Q>,
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq + 'q,
    {
        self.resolve_mut(path)
    }

    /// Lists the child keys of the node at `path`.
    pub fn list_path<'q, Q, I>(&self, path: I) -> Option<Vec<&K>>
    where
        I: IntoIterator<Item = &'q Q>,
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq + 'q,
    {
        self.resolve(path).map(HashTree::list)
    }
}
