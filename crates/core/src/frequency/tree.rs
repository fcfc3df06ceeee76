//! AVL keyword frequency index.
//!
//! A self-balancing binary search tree keyed by keyword, storing how many
//! times each distinct keyword has been queried. Inserting an existing
//! keyword increments its count in place; a new keyword starts at one.
//! Heights are refreshed on the unwind of every insertion and the four
//! classic rotation cases keep every node's balance factor within ±1, so
//! lookups stay logarithmic in the query vocabulary.

use std::cmp::Ordering;

use crate::ranking::{heap_rank, ScoredKey};

type Link = Option<Box<Node>>;

/// A single tree node: keyword, occurrence count, subtree height, children.
#[derive(Debug)]
struct Node {
    keyword: String,
    frequency: u64,
    height: i32,
    left: Link,
    right: Link,
}

impl Node {
    fn new(keyword: String) -> Self {
        Self {
            keyword,
            frequency: 1,
            height: 1,
            left: None,
            right: None,
        }
    }
}

/// Self-balancing index of query keywords and their occurrence counts.
///
/// The only mutation is [`insert_or_increment`](Self::insert_or_increment);
/// everything else reads. Keywords are stored exactly as given; callers
/// normalize before inserting so `Milk` and `milk` share one node.
#[derive(Debug, Default)]
pub struct KeywordFrequencyIndex {
    root: Link,
    distinct: usize,
}

impl KeywordFrequencyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct keywords in the index.
    pub fn len(&self) -> usize {
        self.distinct
    }

    pub fn is_empty(&self) -> bool {
        self.distinct == 0
    }

    /// Records one occurrence of `keyword` and returns its updated count.
    ///
    /// Either increments the matching node in place or inserts a fresh node
    /// with count one, rebalancing on the way back up. The tree is fully
    /// consistent again before this returns.
    pub fn insert_or_increment(&mut self, keyword: &str) -> u64 {
        let (root, count, inserted) = insert(self.root.take(), keyword);
        self.root = Some(root);
        if inserted {
            self.distinct += 1;
        }
        count
    }

    /// Looks up the occurrence count for `keyword`.
    pub fn frequency(&self, keyword: &str) -> Option<u64> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match keyword.cmp(node.keyword.as_str()) {
                Ordering::Equal => return Some(node.frequency),
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
            };
        }
        None
    }

    /// Every (keyword, count) pair in ascending keyword order.
    pub fn in_order(&self) -> Vec<(String, u64)> {
        let mut entries = Vec::with_capacity(self.distinct);
        collect_in_order(self.root.as_deref(), &mut entries);
        entries
    }

    /// The `k` most frequent keywords: descending count, ties by ascending
    /// keyword.
    pub fn top_k(&self, k: usize) -> Vec<ScoredKey> {
        let entries = self
            .in_order()
            .into_iter()
            .map(|(key, score)| ScoredKey { key, score });
        heap_rank(entries, k)
    }

    #[cfg(test)]
    fn height(&self) -> i32 {
        height(&self.root)
    }
}

fn height(link: &Link) -> i32 {
    link.as_deref().map_or(0, |node| node.height)
}

fn balance_factor(node: &Node) -> i32 {
    height(&node.left) - height(&node.right)
}

fn update_height(node: &mut Node) {
    node.height = 1 + height(&node.left).max(height(&node.right));
}

/// Recursive insert-or-increment. Returns the (possibly new) subtree root,
/// the keyword's updated count, and whether a node was created.
fn insert(link: Link, keyword: &str) -> (Box<Node>, u64, bool) {
    let mut node = match link {
        None => return (Box::new(Node::new(keyword.to_string())), 1, true),
        Some(node) => node,
    };

    let (count, inserted) = match keyword.cmp(node.keyword.as_str()) {
        Ordering::Equal => {
            node.frequency += 1;
            (node.frequency, false)
        }
        Ordering::Less => {
            let (child, count, inserted) = insert(node.left.take(), keyword);
            node.left = Some(child);
            (count, inserted)
        }
        Ordering::Greater => {
            let (child, count, inserted) = insert(node.right.take(), keyword);
            node.right = Some(child);
            (count, inserted)
        }
    };

    update_height(&mut node);
    (rebalance(node), count, inserted)
}

/// Restores the AVL balance rule at `node` after an insertion below it.
///
/// A left-right (or right-left) imbalance is reduced to the simple case by
/// first rotating the child, then the node itself.
fn rebalance(mut node: Box<Node>) -> Box<Node> {
    let balance = balance_factor(&node);
    if balance > 1 {
        if node.left.as_deref().map_or(0, balance_factor) < 0 {
            if let Some(left) = node.left.take() {
                node.left = Some(rotate_left(left));
            }
        }
        rotate_right(node)
    } else if balance < -1 {
        if node.right.as_deref().map_or(0, balance_factor) > 0 {
            if let Some(right) = node.right.take() {
                node.right = Some(rotate_right(right));
            }
        }
        rotate_left(node)
    } else {
        node
    }
}

/// Re-parents the left child as the local root. A node without a left child
/// is returned unchanged; the rebalance rule only rotates when one exists.
fn rotate_right(mut node: Box<Node>) -> Box<Node> {
    match node.left.take() {
        Some(mut pivot) => {
            node.left = pivot.right.take();
            update_height(&mut node);
            pivot.right = Some(node);
            update_height(&mut pivot);
            pivot
        }
        None => node,
    }
}

/// Mirror image of [`rotate_right`].
fn rotate_left(mut node: Box<Node>) -> Box<Node> {
    match node.right.take() {
        Some(mut pivot) => {
            node.right = pivot.left.take();
            update_height(&mut node);
            pivot.left = Some(node);
            update_height(&mut pivot);
            pivot
        }
        None => node,
    }
}

fn collect_in_order(link: Option<&Node>, entries: &mut Vec<(String, u64)>) {
    if let Some(node) = link {
        collect_in_order(node.left.as_deref(), entries);
        entries.push((node.keyword.clone(), node.frequency));
        collect_in_order(node.right.as_deref(), entries);
    }
}
