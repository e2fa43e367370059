//! Module provide the balanced-tree engine behind every auxiliary tree.
//!
//! The engine is a [left-leaning-red-black][wiki-llrb] tree over `i64`
//! keys, written as free functions over [Link] so that ownership of
//! subtrees can be handed around by the split and join surgery:
//!
//! - CRUD on a single set: [insert], [contains], [search], [remove],
//!   [remove_min], [remove_max], [min], [max].
//! - Order surgery: [split], [join], [extract_min], [extract_max].
//! - Reference-depth queries for the tango layer: [predecessor],
//!   [successor].
//!
//! Every mutator maintains the subtree aggregates (`size`, black `height`,
//! `min_depth`, `max_depth`) on its way back up. A child marked
//! [External](crate::node::Kind) is treated as an empty subtree throughout,
//! so a whole detached auxiliary travels with whichever node it hangs off,
//! untouched and invisible to the balance arithmetic.
//!
//! [wiki-llrb]: https://en.wikipedia.org/wiki/Left-leaning_red-black_tree

use std::cmp::Ordering;
use std::fmt::Write;

use crate::node::{self, Link, Node};
use crate::{Error, Result};

/// Insert key into tree, returning the new root. Inserting a key already
/// present leaves the set unchanged.
pub fn insert(t: Link, key: i64) -> Link {
    let mut root = insert_rec(t, key);
    root.set_black();
    Some(root)
}

fn insert_rec(t: Link, key: i64) -> Box<Node> {
    let mut h = match t {
        Some(h) => h,
        None => return Box::new(Node::new(key)),
    };

    match key.cmp(&h.key) {
        Ordering::Less => {
            h.left = Some(insert_rec(h.left.take(), key));
        }
        Ordering::Greater => {
            h.right = Some(insert_rec(h.right.take(), key));
        }
        Ordering::Equal => (),
    }

    balance(h)
}

/// Find the node carrying key, along with its parent. The search stops at
/// an empty subtree, so the first component is the external boundary node
/// when the descent runs into a detached auxiliary, and `None` when the key
/// is simply absent.
pub fn search<'a>(t: Option<&'a Node>, key: i64) -> (Option<&'a Node>, Option<&'a Node>) {
    let mut h = t;
    let mut parent = None;
    loop {
        let n = match h {
            Some(n) if !n.is_external() => n,
            _ => break (h, parent),
        };
        match key.cmp(&n.key) {
            Ordering::Equal => break (h, parent),
            Ordering::Less => {
                parent = h;
                h = n.as_left_ref();
            }
            Ordering::Greater => {
                parent = h;
                h = n.as_right_ref();
            }
        }
    }
}

/// Check whether key is present in the tree.
pub fn contains(t: Option<&Node>, key: i64) -> bool {
    !node::is_empty(search(t, key).0)
}

/// Return the minimum node of the tree.
pub fn min(t: Option<&Node>) -> Result<&Node> {
    if node::is_empty(t) {
        return err_at!(EmptyTree, msg: "min on an empty tree");
    }
    Ok(min_node(t.unwrap()))
}

/// Return the maximum node of the tree.
pub fn max(t: Option<&Node>) -> Result<&Node> {
    if node::is_empty(t) {
        return err_at!(EmptyTree, msg: "max on an empty tree");
    }
    Ok(max_node(t.unwrap()))
}

fn min_node(mut h: &Node) -> &Node {
    while !node::is_empty(h.as_left_ref()) {
        h = h.as_left_ref().unwrap();
    }
    h
}

fn max_node(mut h: &Node) -> &Node {
    while !node::is_empty(h.as_right_ref()) {
        h = h.as_right_ref().unwrap();
    }
    h
}

/// Remove the minimum key from the tree.
pub fn remove_min(t: Link) -> Result<Link> {
    let (_, rest) = extract_min(t)?;
    Ok(rest)
}

/// Remove the maximum key from the tree.
pub fn remove_max(t: Link) -> Result<Link> {
    let (rest, _) = extract_max(t)?;
    Ok(rest)
}

/// Remove the minimum key and hand its node back along with the remaining
/// tree. The node keeps its left link: for a self-contained tree that link
/// is `None`, while inside the tango splice it may still carry the detached
/// auxiliary hanging below the path boundary, which the caller harvests.
pub fn extract_min(t: Link) -> Result<(Box<Node>, Link)> {
    let mut root = match t {
        Some(root) if !root.is_external() => root,
        _ => return err_at!(EmptyTree, msg: "extract_min on an empty tree"),
    };

    if !node::is_red(root.as_left_ref()) && !node::is_red(root.as_right_ref()) {
        root.set_red();
    }

    let (m, rest) = extract_min_rec(root);
    let rest = rest.map(|mut root| {
        root.set_black();
        root
    });
    Ok((m, rest))
}

fn extract_min_rec(mut h: Box<Node>) -> (Box<Node>, Link) {
    if node::is_empty(h.as_left_ref()) {
        let rest = h.right.take();
        h.update();
        return (h, rest);
    }
    if !node::is_red(h.as_left_ref()) && !node::is_red(h.as_left_ref().unwrap().as_left_ref()) {
        h = move_red_left(h);
    }
    let (m, rest) = extract_min_rec(h.left.take().unwrap());
    h.left = rest;
    (m, Some(balance(h)))
}

/// Mirror image of [extract_min]: the handed-out maximum keeps its right
/// link for the caller to harvest.
pub fn extract_max(t: Link) -> Result<(Link, Box<Node>)> {
    let mut root = match t {
        Some(root) if !root.is_external() => root,
        _ => return err_at!(EmptyTree, msg: "extract_max on an empty tree"),
    };

    if !node::is_red(root.as_left_ref()) && !node::is_red(root.as_right_ref()) {
        root.set_red();
    }

    let (rest, m) = extract_max_rec(root);
    let rest = rest.map(|mut root| {
        root.set_black();
        root
    });
    Ok((rest, m))
}

fn extract_max_rec(mut h: Box<Node>) -> (Link, Box<Node>) {
    if node::is_red(h.as_left_ref()) {
        h = rotate_right(h);
    }
    if node::is_empty(h.as_right_ref()) {
        let rest = h.left.take();
        h.update();
        return (rest, h);
    }
    if !node::is_red(h.as_right_ref()) && !node::is_red(h.as_right_ref().unwrap().as_left_ref()) {
        h = move_red_right(h);
    }
    let (rest, m) = extract_max_rec(h.right.take().unwrap());
    h.right = rest;
    (Some(balance(h)), m)
}

/// Remove key from the tree. Removing an absent key is a no-op.
pub fn remove(t: Link, key: i64) -> Link {
    if !contains(t.as_deref(), key) {
        return t;
    }

    let mut root = t.unwrap();
    if !node::is_red(root.as_left_ref()) && !node::is_red(root.as_right_ref()) {
        root.set_red();
    }

    match remove_rec(root, key) {
        Some(mut root) => {
            root.set_black();
            Some(root)
        }
        None => None,
    }
}

fn remove_rec(mut h: Box<Node>, key: i64) -> Link {
    if key < h.key {
        if !node::is_red(h.as_left_ref()) && !node::is_red(h.as_left_ref().unwrap().as_left_ref())
        {
            h = move_red_left(h);
        }
        h.left = remove_rec(h.left.take().unwrap(), key);
    } else {
        if node::is_red(h.as_left_ref()) {
            h = rotate_right(h);
        }
        if key == h.key && node::is_empty(h.as_right_ref()) {
            return h.right.take();
        }
        if !node::is_red(h.as_right_ref())
            && !node::is_red(h.as_right_ref().unwrap().as_left_ref())
        {
            h = move_red_right(h);
        }
        if key == h.key {
            // replace with the in-order successor, then drop that node.
            let (m, rest) = extract_min_rec(h.right.take().unwrap());
            h.key = m.key;
            h.right = rest;
        } else {
            h.right = remove_rec(h.right.take().unwrap(), key);
        }
    }
    Some(balance(h))
}

/// Join two trees around node x, where every key in t1 is smaller than
/// `x.key` and every key in t2 greater. x must be detached. The recursion
/// walks down the taller side until the heights meet, seats x there on a
/// red link and rebalances on the way out.
pub fn join(t1: Link, mut x: Box<Node>, t2: Link) -> Box<Node> {
    debug_assert!(x.left.is_none() && x.right.is_none());
    debug_assert!(node::is_empty(t1.as_deref()) || max_node(t1.as_deref().unwrap()).key < x.key);
    debug_assert!(node::is_empty(t2.as_deref()) || min_node(t2.as_deref().unwrap()).key > x.key);

    let mut root = join_rec(t1, x, t2);
    root.set_black();
    root
}

fn join_rec(t1: Link, mut x: Box<Node>, t2: Link) -> Box<Node> {
    let (h1, h2) = (node::height(t1.as_deref()), node::height(t2.as_deref()));

    if h1 < h2 {
        let mut t2 = t2.unwrap();
        t2.left = Some(join_rec(t1, x, t2.left.take()));
        balance(t2)
    } else if h1 > h2 {
        let mut t1 = t1.unwrap();
        t1.right = Some(join_rec(t1.right.take(), x, t2));
        balance(t1)
    } else {
        x.set_red(); // keeps the height difference within one
        x.left = t1;
        x.right = t2;
        balance(x)
    }
}

/// Split the tree at key, returning the tree of smaller keys, the detached
/// node carrying key, and the tree of greater keys.
pub fn split(t: Link, key: i64) -> Result<(Link, Box<Node>, Link)> {
    if !contains(t.as_deref(), key) {
        return err_at!(KeyNotFound, msg: "split on missing key {}", key);
    }
    Ok(split_rec(t.unwrap(), key))
}

fn split_rec(mut h: Box<Node>, key: i64) -> (Link, Box<Node>, Link) {
    match key.cmp(&h.key) {
        Ordering::Greater => {
            let (l, x, r) = split_rec(h.right.take().unwrap(), key);
            let (mut kept, _) = h.detach();
            if let Some(kept) = kept.as_mut() {
                kept.set_black();
            }
            (Some(join(kept, h, l)), x, r)
        }
        Ordering::Less => {
            let (l, x, r) = split_rec(h.left.take().unwrap(), key);
            let (_, mut kept) = h.detach();
            if let Some(kept) = kept.as_mut() {
                kept.set_black();
            }
            (l, x, Some(join(r, h, kept)))
        }
        Ordering::Equal => {
            let (mut l, mut r) = h.detach();
            if let Some(n) = l.as_mut() {
                n.set_black();
            }
            if let Some(n) = r.as_mut() {
                n.set_black();
            }
            (l, h, r)
        }
    }
}

/// Within tree h, locate the shallowest node whose reference depth reaches
/// the threshold d by always preferring the left subtree, and return
/// `(k_pred, k_tm)`: `k_tm` is that node's key and `k_pred` the greatest
/// key smaller than `k_tm` whose region also reaches depth d, `None` when
/// no such key exists.
///
/// The caller must guarantee `max_depth(h) >= d`.
pub fn predecessor(h: &Node, d: i64) -> (Option<i64>, i64) {
    if node::max_depth(h.as_left_ref()) >= d {
        return predecessor(h.as_left_ref().unwrap(), d);
    }
    if h.depth >= d {
        let pred = match h.as_left_ref() {
            left if node::is_empty(left) => None,
            left => Some(max_node(left.unwrap()).key),
        };
        return (pred, h.key);
    }
    assert!(
        node::max_depth(h.as_right_ref()) >= d,
        "predecessor: no node at depth {} ? call the programmer",
        d
    );
    let (pred, tm) = predecessor(h.as_right_ref().unwrap(), d);
    (pred.or(Some(h.key)), tm)
}

/// Mirror image of [predecessor]: descend right first, return
/// `(k_succ, k_tm)` with the smallest key greater than `k_tm` whose region
/// also reaches depth d.
pub fn successor(h: &Node, d: i64) -> (Option<i64>, i64) {
    if node::max_depth(h.as_right_ref()) >= d {
        return successor(h.as_right_ref().unwrap(), d);
    }
    if h.depth >= d {
        let succ = match h.as_right_ref() {
            right if node::is_empty(right) => None,
            right => Some(min_node(right.unwrap()).key),
        };
        return (succ, h.key);
    }
    assert!(
        node::max_depth(h.as_left_ref()) >= d,
        "successor: no node at depth {} ? call the programmer",
        d
    );
    let (succ, tm) = successor(h.as_left_ref().unwrap(), d);
    (succ.or(Some(h.key)), tm)
}

//--------- rotation routines for 2-3 algorithm ----------------

//              (i)                       (i)
//               |                         |
//              node                       x
//              /  \                      / \
//             /    (r)                 (r)  \
//            /       \                 /     \
//          left       x             node      xr
//                    / \            /  \
//                  xl   xr       left   xl
//
fn rotate_left(mut node: Box<Node>) -> Box<Node> {
    if !node::is_red(node.as_right_ref()) {
        panic!("rotate_left(): rotating a black link ? call the programmer");
    }
    let mut x = node.right.take().unwrap();
    node.right = x.left.take();
    x.color = node.color;
    node.set_red();
    node.update();
    x.left = Some(node);
    x.update();
    x
}

//              (i)                       (i)
//               |                         |
//              node                       x
//              /  \                      / \
//            (r)   \                   (r)  \
//           /       \                 /      \
//          x       right             xl      node
//         / \                                / \
//       xl   xr                             xr  right
//
fn rotate_right(mut node: Box<Node>) -> Box<Node> {
    if !node::is_red(node.as_left_ref()) {
        panic!("rotate_right(): rotating a black link ? call the programmer");
    }
    let mut x = node.left.take().unwrap();
    node.left = x.right.take();
    x.color = node.color;
    node.set_red();
    node.update();
    x.right = Some(node);
    x.update();
    x
}

//        (x)                   (!x)
//         |                     |
//        node                  node
//        / \                   / \
//      (y) (z)              (!y) (!z)
//     /      \              /      \
//   left    right         left    right
//
fn flip_colors(node: &mut Node) {
    debug_assert!(!node::is_empty(node.as_left_ref()) && !node::is_empty(node.as_right_ref()));

    node.toggle_link();
    node.left.as_mut().unwrap().toggle_link();
    node.right.as_mut().unwrap().toggle_link();
}

// Restoration step applied on the way up every recursive mutator:
// left-lean a red right link, lift a pair of consecutive red left links,
// break up a 4-node, then refresh the aggregates.
fn balance(mut node: Box<Node>) -> Box<Node> {
    if !node::is_red(node.as_left_ref()) && node::is_red(node.as_right_ref()) {
        node = rotate_left(node);
    }
    let left = node.as_left_ref();
    if node::is_red(left) && node::is_red(left.unwrap().as_left_ref()) {
        node = rotate_right(node);
    }
    if node::is_red(node.as_left_ref()) && node::is_red(node.as_right_ref()) {
        flip_colors(&mut node);
    }
    node.update();
    node
}

fn move_red_left(mut node: Box<Node>) -> Box<Node> {
    flip_colors(&mut node);
    if node::is_red(node.right.as_ref().unwrap().as_left_ref()) {
        node.right = Some(rotate_right(node.right.take().unwrap()));
        node = rotate_left(node);
        flip_colors(&mut node);
    }
    node
}

fn move_red_right(mut node: Box<Node>) -> Box<Node> {
    flip_colors(&mut node);
    if node::is_red(node.left.as_ref().unwrap().as_left_ref()) {
        node = rotate_right(node);
        flip_colors(&mut node);
    }
    node
}

/// Render the tree in-order, one node per line, three spaces of indent per
/// level, stopping at empty subtrees.
pub fn show(t: Option<&Node>) -> String {
    let mut out = String::new();
    show_rec(t, 0, &mut out);
    out
}

fn show_rec(t: Option<&Node>, indent: usize, out: &mut String) {
    if !node::is_empty(t) {
        let n = t.unwrap();
        show_rec(n.as_left_ref(), indent + 3, out);
        let color = if n.is_black() { "BLACK" } else { "RED" };
        writeln!(out, "{:indent$}({}, {})", "", n.key, color, indent = indent).unwrap();
        show_rec(n.as_right_ref(), indent + 3, out);
    }
}

/// Validate the tree with following rules:
///
/// * From root to any leaf, no consecutive reds allowed in its path.
/// * No red link hanging to the right.
/// * Number of blacks should be same under left child and right child.
/// * Keys must be in sort order, also across auxiliary boundaries.
/// * Stored aggregates must equal their recomputation from the children.
/// * The root must hang on a black link.
pub fn validate(t: Option<&Node>) -> Result<()> {
    if node::is_red(t) {
        return err_at!(Fatal, msg: "root on a red link");
    }
    validate_tree(t, node::is_red(t), 0)?;
    Ok(())
}

// Validate one auxiliary tree from its root node, regardless of the
// root's kind. The tango layer points this at external roots, which
// [validate] would otherwise skip over as empty subtrees.
pub(crate) fn validate_aux(root: &Node) -> Result<()> {
    if !root.is_black() {
        return err_at!(Fatal, msg: "auxiliary root {} on a red link", root.key);
    }
    validate_node(root, false, 0)?;
    Ok(())
}

fn validate_tree(t: Option<&Node>, fromred: bool, n_blacks: usize) -> Result<usize> {
    match t {
        Some(n) if !n.is_external() => validate_node(n, fromred, n_blacks),
        _ => Ok(n_blacks),
    }
}

fn validate_node(n: &Node, fromred: bool, mut n_blacks: usize) -> Result<usize> {
    let red = !n.is_black();
    if fromred && red {
        return err_at!(Fatal, msg: "consecutive red links above {}", n.key);
    }
    if node::is_red(n.as_right_ref()) {
        return err_at!(Fatal, msg: "right leaning red link at {}", n.key);
    }

    if !red {
        n_blacks += 1;
    }

    let lblacks = validate_tree(n.as_left_ref(), red, n_blacks)?;
    let rblacks = validate_tree(n.as_right_ref(), red, n_blacks)?;
    if lblacks != rblacks {
        return err_at!(Fatal, msg: "unbalanced blacks {} {} at {}", lblacks, rblacks, n.key);
    }

    if let Some(left) = n.left.as_deref() {
        if left.key >= n.key {
            return err_at!(Fatal, msg: "sort lkey:{} parent:{}", left.key, n.key);
        }
    }
    if let Some(right) = n.right.as_deref() {
        if right.key <= n.key {
            return err_at!(Fatal, msg: "sort rkey:{} parent:{}", right.key, n.key);
        }
    }

    let (left, right) = (n.as_left_ref(), n.as_right_ref());
    let size = node::size(left) + node::size(right) + 1;
    if n.size != size {
        return err_at!(Fatal, msg: "size {} != {} at {}", n.size, size, n.key);
    }
    let lh = node::height(left) + if node::is_red(left) { 0 } else { 1 };
    let rh = if node::is_empty(right) {
        0
    } else {
        node::height(right) + 1
    };
    if n.height != std::cmp::max(lh, rh) {
        return err_at!(Fatal, msg: "height {} != {} at {}", n.height, std::cmp::max(lh, rh), n.key);
    }
    let min_depth = n.depth.min(node::min_depth(left)).min(node::min_depth(right));
    let max_depth = n.depth.max(node::max_depth(left)).max(node::max_depth(right));
    if n.min_depth != min_depth || n.max_depth != max_depth {
        return err_at!(Fatal, msg: "depth aggregates off at {}", n.key);
    }

    Ok(lblacks)
}

#[cfg(test)]
#[path = "llrb_test.rs"]
mod llrb_test;
