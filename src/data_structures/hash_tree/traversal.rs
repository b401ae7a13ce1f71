//! Depth-first traversal of a hash tree.
//!
//! A [`Visitor`] observes a pre-order walk through three hooks:
//!
//! * `on_enter` fires when the walk descends into a key, at every level,
//!   leaves included.
//! * `on_leaf` fires right after entering a node that has no children.
//! * `on_exit` fires once per entered node, after all of its descendants.
//!
//! The root itself never fires `on_enter` or `on_exit`. Each hook returns a
//! [`ControlFlow`]; a `Break` stops the walk at once and is handed back to
//! the caller of [`HashTree::traverse`]. Sibling order is unspecified.

use std::borrow::Borrow;
use std::fmt::{self, Display, Write as _};
use std::hash::Hash;
use std::ops::ControlFlow;

use tracing::trace;

use super::HashTree;

/// Observer driven by [`HashTree::traverse`].
///
/// `'t` is the lifetime of the traversed tree, so visitors may keep
/// references to keys and nodes they see.
pub trait Visitor<'t, K: 't> {
    /// Value produced when the visitor stops the walk early.
    type Break;

    /// Called when the walk descends into `key`, whose subtree is `node`.
    fn on_enter(&mut self, key: &'t K, node: &'t HashTree<K>) -> ControlFlow<Self::Break> {
        let _ = (key, node);
        ControlFlow::Continue(())
    }

    /// Called once for every node without children.
    fn on_leaf(&mut self) -> ControlFlow<Self::Break> {
        ControlFlow::Continue(())
    }

    /// Called when the walk leaves a node.
    fn on_exit(&mut self) -> ControlFlow<Self::Break> {
        ControlFlow::Continue(())
    }
}

impl<K> HashTree<K> {
    /// Walks the tree depth-first, pre-order, reporting to `visitor`.
    ///
    /// # Returns
    ///
    /// * `ControlFlow::Continue(())` - The whole tree was visited.
    /// * `ControlFlow::Break(value)` - The visitor stopped the walk with `value`.
    pub fn traverse<'t, V>(&'t self, visitor: &mut V) -> ControlFlow<V::Break>
    where
        V: Visitor<'t, K> + ?Sized,
    {
        for (key, subtree) in &self.children {
            visitor.on_enter(key, subtree)?;
            subtree.traverse_into(visitor)?;
        }
        ControlFlow::Continue(())
    }

    fn traverse_into<'t, V>(&'t self, visitor: &mut V) -> ControlFlow<V::Break>
    where
        V: Visitor<'t, K> + ?Sized,
    {
        if self.children.is_empty() {
            visitor.on_leaf()?;
        } else {
            for (key, subtree) in &self.children {
                visitor.on_enter(key, subtree)?;
                subtree.traverse_into(visitor)?;
            }
        }
        visitor.on_exit()
    }
}

impl<K: Eq + Hash> HashTree<K> {
    /// Finds the subtree stored under `key`.
    ///
    /// An immediate child wins. Otherwise the whole tree is searched
    /// depth-first for the first node holding `key` as an immediate child,
    /// and that child is returned.
    ///
    /// # Returns
    ///
    /// The matching subtree, or `None` if `key` appears nowhere.
    pub fn search<Q>(&self, key: &Q) -> Option<&HashTree<K>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        if let Some(found) = self.get(key) {
            return Some(found);
        }
        trace!("key not at top level, searching descendants");
        match self.traverse(&mut KeySearcher::new(key)) {
            ControlFlow::Break(found) => Some(found),
            ControlFlow::Continue(()) => None,
        }
    }
}

/// Visitor that stops at the first entered node holding a target key.
#[derive(Debug)]
pub struct KeySearcher<'q, Q: ?Sized> {
    target: &'q Q,
}

impl<'q, Q: ?Sized> KeySearcher<'q, Q> {
    pub fn new(target: &'q Q) -> Self {
        Self { target }
    }
}

impl<'t, 'q, K, Q> Visitor<'t, K> for KeySearcher<'q, Q>
where
    K: Eq + Hash + Borrow<Q> + 't,
    Q: ?Sized + Hash + Eq,
{
    type Break = &'t HashTree<K>;

    fn on_enter(&mut self, _key: &'t K, node: &'t HashTree<K>) -> ControlFlow<Self::Break> {
        match node.get(self.target) {
            Some(found) => ControlFlow::Break(found),
            None => ControlFlow::Continue(()),
        }
    }
}

/// Layout options for [`TreeRenderer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Spaces added per level of depth
    pub indent: usize,

    /// Optional first line printed above the keys
    pub header: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            header: None,
        }
    }
}

/// Renders a tree as one key per line, indented by depth.
///
/// Keys appear in traversal order and each key at each depth appears
/// exactly once. Top-level keys are not indented.
#[derive(Debug, Default)]
pub struct TreeRenderer {
    options: RenderOptions,
    output: String,
    depth: usize,
    /// Set once any line, header included, has been written
    started: bool,
}

impl TreeRenderer {
    pub fn new(options: RenderOptions) -> Self {
        let mut output = String::new();
        let started = options.header.is_some();
        if let Some(header) = &options.header {
            output.push_str(header);
        }
        Self {
            options,
            output,
            depth: 0,
            started,
        }
    }

    /// Consumes the renderer, returning the rendered text.
    pub fn finish(self) -> String {
        self.output
    }
}

impl<'t, K: Display + 't> Visitor<'t, K> for TreeRenderer {
    type Break = fmt::Error;

    fn on_enter(&mut self, key: &'t K, _node: &'t HashTree<K>) -> ControlFlow<Self::Break> {
        if self.started {
            self.output.push('\n');
        }
        self.started = true;
        let width = self.depth * self.options.indent;
        match write!(self.output, "{:width$}{key}", "") {
            Ok(()) => {
                self.depth += 1;
                ControlFlow::Continue(())
            }
            Err(err) => ControlFlow::Break(err),
        }
    }

    fn on_exit(&mut self) -> ControlFlow<Self::Break> {
        self.depth = self.depth.saturating_sub(1);
        ControlFlow::Continue(())
    }
}

impl<K: Display> HashTree<K> {
    /// Renders the tree with the given layout.
    pub fn render(&self, options: RenderOptions) -> String {
        let mut renderer = TreeRenderer::new(options);
        let _ = self.traverse(&mut renderer);
        renderer.finish()
    }
}

impl<K: Display> Display for HashTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut renderer = TreeRenderer::new(RenderOptions::default());
        if let ControlFlow::Break(err) = self.traverse(&mut renderer) {
            return Err(err);
        }
        f.write_str(&renderer.finish())
    }
}

/// Counts traversal events.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TraversalStats {
    /// Number of `on_enter` events, i.e. keys at every depth
    pub enters: usize,

    /// Number of leaves
    pub leaves: usize,

    /// Number of `on_exit` events
    pub exits: usize,

    /// Deepest level reached; top-level keys are depth 1
    pub max_depth: usize,

    depth: usize,
}

impl<'t, K: 't> Visitor<'t, K> for TraversalStats {
    type Break = std::convert::Infallible;

    fn on_enter(&mut self, _key: &'t K, _node: &'t HashTree<K>) -> ControlFlow<Self::Break> {
        self.enters += 1;
        self.depth += 1;
        self.max_depth = self.max_depth.max(self.depth);
        ControlFlow::Continue(())
    }

    fn on_leaf(&mut self) -> ControlFlow<Self::Break> {
        self.leaves += 1;
        ControlFlow::Continue(())
    }

    fn on_exit(&mut self) -> ControlFlow<Self::Break> {
        self.exits += 1;
        self.depth -= 1;
        ControlFlow::Continue(())
    }
}

/// Collects the key path leading to every leaf.
#[derive(Debug)]
pub struct PathCollector<'t, K> {
    current: Vec<&'t K>,
    paths: Vec<Vec<&'t K>>,
}

impl<'t, K> PathCollector<'t, K> {
    pub fn new() -> Self {
        Self {
            current: Vec::new(),
            paths: Vec::new(),
        }
    }

    pub fn into_paths(self) -> Vec<Vec<&'t K>> {
        self.paths
    }
}

impl<'t, K> Default for PathCollector<'t, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'t, K: 't> Visitor<'t, K> for PathCollector<'t, K> {
    type Break = std::convert::Infallible;

    fn on_enter(&mut self, key: &'t K, _node: &'t HashTree<K>) -> ControlFlow<Self::Break> {
        self.current.push(key);
        ControlFlow::Continue(())
    }

    fn on_leaf(&mut self) -> ControlFlow<Self::Break> {
        self.paths.push(self.current.clone());
        ControlFlow::Continue(())
    }

    fn on_exit(&mut self) -> ControlFlow<Self::Break> {
        self.current.pop();
        ControlFlow::Continue(())
    }
}
