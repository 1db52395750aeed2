use crate::tree::{NodeId, Sink, Tree};
use regex::Regex;

/// Copies the rows of `tree` whose label or value matches `pattern`.
///
/// Ancestors of a match are kept so the match stays reachable, and a row that
/// matches itself keeps its whole subtree.
pub fn filter_tree(tree: &Tree, pattern: &Regex) -> Tree {
    let mut keep = vec![false; tree.len() + 1];
    let root = tree.root();
    for &child in tree[root].children() {
        mark(tree, child, pattern, false, &mut keep);
    }

    let mut filtered = Tree::new();
    let filtered_root = filtered.root();
    copy_kept(tree, root, &keep, &mut filtered, filtered_root);
    filtered
}

fn matches(tree: &Tree, id: NodeId, pattern: &Regex) -> bool {
    let node = &tree[id];
    pattern.is_match(&node.label) || pattern.is_match(&node.value)
}

fn mark(tree: &Tree, id: NodeId, pattern: &Regex, inside_match: bool, keep: &mut [bool]) -> bool {
    let self_match = inside_match || matches(tree, id, pattern);
    let mut any_child = false;
    for &child in tree[id].children() {
        any_child |= mark(tree, child, pattern, self_match, keep);
    }
    let kept = self_match || any_child;
    keep[id.index()] = kept;
    kept
}

fn copy_kept(tree: &Tree, from: NodeId, keep: &[bool], out: &mut Tree, to: NodeId) {
    for &child in tree[from].children() {
        if !keep[child.index()] {
            continue;
        }
        let node = &tree[child];
        let Some(copied) = out.add_entry(&node.label, &node.value, to) else {
            return;
        };
        copy_kept(tree, child, keep, out, copied);
        if !node.enabled {
            out.set_enabled_recursive(copied, false);
        }
    }
}
