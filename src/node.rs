//! Module define the node record shared by every tree in the forest.
//!
//! An absent child is `None`, playing the role of the null sentinel; an
//! `External` node is the root of a detached auxiliary tree hanging off a
//! preferred path. Both count as an *empty* subtree for the llrb
//! operations, which is why the accessors here take `Option<&Node>` and
//! fold the two cases together.

use std::cmp;

/// Owning reference to a subtree, `None` for the null sentinel.
pub type Link = Option<Box<Node>>;

/// Color of the link from a node to its parent.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Color {
    Red,
    Black,
}

/// Node role within the tango forest.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Kind {
    /// On the preferred path of the auxiliary tree it lives in.
    Regular,
    /// Root of a detached auxiliary tree.
    External,
}

/// Node corresponds to a single key in one auxiliary tree.
pub struct Node {
    pub(crate) key: i64,
    pub(crate) left: Link,     // store: left child
    pub(crate) right: Link,    // store: right child
    pub(crate) color: Color,   // store: parent link color
    pub(crate) kind: Kind,
    pub(crate) size: usize,    // store: subtree size
    pub(crate) height: i64,    // store: subtree black height
    pub(crate) depth: i64,     // store: depth in the reference tree
    pub(crate) min_depth: i64, // store: subtree min reference depth
    pub(crate) max_depth: i64, // store: subtree max reference depth
}

impl Node {
    pub(crate) fn new(key: i64) -> Node {
        Node {
            key,
            left: None,
            right: None,
            color: Color::Red,
            kind: Kind::Regular,
            size: 1,
            height: 0,
            depth: 0,
            min_depth: 0,
            max_depth: 0,
        }
    }

    #[inline]
    pub fn key(&self) -> i64 {
        self.key
    }

    #[inline]
    pub fn is_black(&self) -> bool {
        self.color == Color::Black
    }

    #[inline]
    pub fn is_external(&self) -> bool {
        self.kind == Kind::External
    }

    #[inline]
    pub(crate) fn set_red(&mut self) {
        self.color = Color::Red
    }

    #[inline]
    pub(crate) fn set_black(&mut self) {
        self.color = Color::Black
    }

    #[inline]
    pub(crate) fn toggle_link(&mut self) {
        self.color = match self.color {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }

    #[inline]
    pub(crate) fn as_left_ref(&self) -> Option<&Node> {
        self.left.as_deref()
    }

    #[inline]
    pub(crate) fn as_right_ref(&self) -> Option<&Node> {
        self.right.as_deref()
    }

    /// Recompute `size`, `height`, `min_depth` and `max_depth` from the
    /// children. Empty children, external ones included, contribute the
    /// identity of each aggregate.
    pub(crate) fn update(&mut self) {
        let (lsize, rsize) = (size(self.as_left_ref()), size(self.as_right_ref()));
        self.size = lsize + rsize + 1;

        let lh = {
            let left = self.as_left_ref();
            height(left) + if is_red(left) { 0 } else { 1 }
        };
        let rh = {
            let right = self.as_right_ref();
            if is_empty(right) {
                0
            } else {
                height(right) + 1
            }
        };
        self.height = cmp::max(lh, rh);

        let (lmin, rmin) = (min_depth(self.as_left_ref()), min_depth(self.as_right_ref()));
        let (lmax, rmax) = (max_depth(self.as_left_ref()), max_depth(self.as_right_ref()));
        self.min_depth = cmp::min(self.depth, cmp::min(lmin, rmin));
        self.max_depth = cmp::max(self.depth, cmp::max(lmax, rmax));
    }

    /// Unhook both children and return them, leaving this node black,
    /// with the aggregates of a singleton.
    pub(crate) fn detach(&mut self) -> (Link, Link) {
        let left = self.left.take();
        let right = self.right.take();
        self.set_black();
        self.update();
        (left, right)
    }
}

/// An empty subtree: the null sentinel, or the boundary to a detached
/// auxiliary tree.
#[inline]
pub fn is_empty(node: Option<&Node>) -> bool {
    node.map_or(true, |n| n.is_external())
}

/// Empty subtrees hang on black links.
#[inline]
pub fn is_red(node: Option<&Node>) -> bool {
    match node {
        Some(n) if !n.is_external() => !n.is_black(),
        _ => false,
    }
}

/// Number of keys stored in the subtree, 0 when empty.
#[inline]
pub fn size(node: Option<&Node>) -> usize {
    match node {
        Some(n) if !n.is_external() => n.size,
        _ => 0,
    }
}

/// Black height of the subtree, -1 when empty.
#[inline]
pub fn height(node: Option<&Node>) -> i64 {
    match node {
        Some(n) if !n.is_external() => n.height,
        _ => -1,
    }
}

/// Reference depth of the node itself, -inf when empty.
#[inline]
pub fn depth(node: Option<&Node>) -> i64 {
    match node {
        Some(n) if !n.is_external() => n.depth,
        _ => i64::MIN,
    }
}

/// Least reference depth in the subtree, +inf when empty.
#[inline]
pub fn min_depth(node: Option<&Node>) -> i64 {
    match node {
        Some(n) if !n.is_external() => n.min_depth,
        _ => i64::MAX,
    }
}

/// Greatest reference depth in the subtree, -inf when empty.
#[inline]
pub fn max_depth(node: Option<&Node>) -> i64 {
    match node {
        Some(n) if !n.is_external() => n.max_depth,
        _ => i64::MIN,
    }
}

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;
