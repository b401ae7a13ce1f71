//! Tests for depth-first traversal.
//!
//! This module checks the visitor contract: event pairing, completeness,
//! early termination, and the renderer built on top of it.

use std::ops::ControlFlow;

use crate::data_structures::hash_tree::{TraversalStats, TreeRenderer};
use crate::data_structures::{HashTree, RenderOptions, Visitor};
use crate::tests::{owned, tree_strategy};
use proptest::prelude::*;

/// Visitor that checks enter/exit pairing while counting events.
#[derive(Default)]
struct BalanceChecker {
    open: usize,
    enters: usize,
    leaves: usize,
    leaf_without_enter: bool,
}

impl<'t> Visitor<'t, String> for BalanceChecker {
    type Break = ();

    fn on_enter(&mut self, _key: &'t String, _node: &'t HashTree<String>) -> ControlFlow<()> {
        self.open += 1;
        self.enters += 1;
        ControlFlow::Continue(())
    }

    fn on_leaf(&mut self) -> ControlFlow<()> {
        self.leaves += 1;
        if self.open == 0 {
            self.leaf_without_enter = true;
        }
        ControlFlow::Continue(())
    }

    fn on_exit(&mut self) -> ControlFlow<()> {
        match self.open.checked_sub(1) {
            Some(open) => {
                self.open = open;
                ControlFlow::Continue(())
            }
            // Unbalanced exit
            None => ControlFlow::Break(()),
        }
    }
}

/// Visitor that stops after a fixed number of enters.
struct StopAfter {
    remaining: usize,
    seen: usize,
}

impl<'t> Visitor<'t, String> for StopAfter {
    type Break = usize;

    fn on_enter(&mut self, _key: &'t String, _node: &'t HashTree<String>) -> ControlFlow<usize> {
        self.seen += 1;
        if self.seen == self.remaining {
            ControlFlow::Break(self.seen)
        } else {
            ControlFlow::Continue(())
        }
    }
}

fn count_leaves(tree: &HashTree<String>) -> usize {
    tree.values()
        .map(|child| if child.is_empty() { 1 } else { count_leaves(child) })
        .sum()
}

fn sample_tree() -> HashTree<String> {
    let mut tree = HashTree::from_keys(owned(&["A", "B"]));
    tree.add_path_values(owned(&["A", "x"]), owned(&["1", "2"]));
    tree.add_values("B".to_string(), owned(&["y"]));
    tree
}

#[test]
fn test_stats_on_sample_tree() {
    let stats = sample_tree().stats();

    assert_eq!(stats.enters, 6);
    assert_eq!(stats.exits, 6);
    assert_eq!(stats.leaves, 3);
    assert_eq!(stats.max_depth, 3);
}

#[test]
fn test_early_break_is_returned() {
    let tree = sample_tree();
    let mut visitor = StopAfter {
        remaining: 2,
        seen: 0,
    };

    assert_eq!(tree.traverse(&mut visitor), ControlFlow::Break(2));
    assert_eq!(visitor.seen, 2);
}

#[test]
fn test_render_lists_every_key_once() {
    let tree = sample_tree();
    let rendered = tree.render(RenderOptions::default());

    let mut keys: Vec<&str> = rendered.lines().map(str::trim).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["1", "2", "A", "B", "x", "y"]);

    for line in rendered.lines() {
        let indent = line.len() - line.trim_start().len();
        let expected = match line.trim() {
            "A" | "B" => 0,
            "x" | "y" => 2,
            _ => 4,
        };
        assert_eq!(indent, expected, "wrong indent for {line:?}");
    }
}

#[test]
fn test_renderer_used_directly() {
    let tree = HashTree::with_key("solo".to_string());
    let mut renderer = TreeRenderer::new(RenderOptions {
        indent: 3,
        header: Some("HashTree{".to_string()),
    });

    assert_eq!(tree.traverse(&mut renderer), ControlFlow::Continue(()));
    assert_eq!(renderer.finish(), "HashTree{\nsolo");
}

/// An empty-string key loaded from JSON still renders on its own line.
#[test]
fn test_render_keeps_empty_key_from_json() {
    let tree = HashTree::from_json_str(r#"{"": {"inner": null}}"#).unwrap();
    let rendered = tree.render(RenderOptions::default());

    assert_eq!(rendered.lines().collect::<Vec<_>>(), vec!["", "  inner"]);
    assert_eq!(rendered.lines().count(), tree.total_keys());
}

proptest! {
    // Property: enters equal keys at every depth, one leaf event per leaf
    #[test]
    fn prop_traversal_is_complete(tree in tree_strategy()) {
        let mut checker = BalanceChecker::default();
        prop_assert_eq!(tree.traverse(&mut checker), ControlFlow::Continue(()));
        prop_assert_eq!(checker.open, 0);
        prop_assert!(!checker.leaf_without_enter);

        let stats: TraversalStats = tree.stats();
        prop_assert_eq!(checker.enters, stats.enters);
        prop_assert_eq!(stats.enters, stats.exits);
        prop_assert_eq!(checker.leaves, count_leaves(&tree));
        prop_assert_eq!(stats.leaves, tree.leaf_paths().len());
    }

    // Property: the rendering has exactly one line per key
    #[test]
    fn prop_render_has_one_line_per_key(tree in tree_strategy()) {
        let rendered = tree.to_string();
        prop_assert_eq!(rendered.lines().count(), tree.total_keys());
    }
}
