//! Module provide the tango tree implemented by [TangoTree] type.
//!
//! The structure mirrors a *reference tree*, the perfectly balanced BST
//! over the fixed key universe `{1..n}`, which is never materialized; only
//! its per-key depths are recorded on the nodes. The keys are partitioned
//! into *preferred paths*, maximal root-to-descendant chains of the
//! reference tree along which search has most recently descended. Each
//! preferred path is stored as one llrb *auxiliary tree*, and the
//! auxiliaries hang off each other through [External](Kind) root nodes.
//!
//! [TangoTree::search] walks the stitched forest like any BST. Each time
//! the walk crosses into a detached auxiliary, the *tango* splice cuts the
//! portion of the old preferred path below the crossing point out of the
//! walked tree and concatenates the entered path in its place, with a
//! bounded number of splits and joins. After the walk ends, the whole
//! search path lies on one preferred path.

use std::cmp::Ordering;
use std::fmt::Write;

use crate::llrb;
use crate::node::{self, Kind, Link, Node};
use crate::{Error, Result};

const RED_COLOR: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Which child slot of the splice parent the entered auxiliary hangs off.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Side {
    Left,
    Right,
}

enum Probe {
    Hit,
    Miss,
    Detour { parent: i64, side: Side },
}

/// TangoTree manage a single search structure over the key universe
/// `{1..n}`, competitive within O(log log n) of the offline optimal
/// binary search tree.
pub struct TangoTree {
    root: Link,
    n: i64, // number of keys in the universe.
}

impl TangoTree {
    /// Build the initial structure over keys `{1..n}`. Every auxiliary
    /// tree starts out as a single node, the reference-tree root being the
    /// only one on a preferred path.
    ///
    /// Panics when `n` is not positive.
    pub fn new(n: i64) -> TangoTree {
        assert!(n > 0, "tango tree needs a positive key universe");

        let mut root = build_rec(1, n, 0).unwrap();
        root.kind = Kind::Regular;
        TangoTree { root: Some(root), n }
    }

    /// Return the size of the key universe.
    #[inline]
    pub fn len(&self) -> usize {
        self.n as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        false // the universe is fixed and positive
    }

    /// Search for key, re-splicing the forest so the whole search path
    /// becomes one preferred path. Return whether key is in the universe.
    pub fn search(&mut self, key: i64) -> bool {
        loop {
            let probe = {
                let (q, p) = llrb::search(self.root.as_deref(), key);
                match q {
                    Some(n) if n.is_external() => {
                        let p = p.expect("external node at the root ? call the programmer");
                        let side = if n.key() < p.key() { Side::Left } else { Side::Right };
                        Probe::Detour { parent: p.key(), side }
                    }
                    Some(_) => Probe::Hit,
                    None => Probe::Miss,
                }
            };
            match probe {
                Probe::Hit => break true,
                Probe::Miss => break false,
                Probe::Detour { parent, side } => {
                    let root = tango(self.root.take(), parent, side);
                    self.root = Some(root);
                }
            }
        }
    }

    /// Render the whole forest in-order, one node per line, three spaces
    /// of indent per level of the stitched tree, preferred-path nodes in
    /// ANSI red.
    pub fn show(&self) -> String {
        let mut out = String::new();
        show_rec(self.root.as_deref(), 0, &mut out);
        out
    }

    /// Validate the forest with following rules:
    ///
    /// * The overall root is on a preferred path.
    /// * Every auxiliary tree, the detached ones included, is a
    ///   well-formed llrb tree with correct aggregates.
    /// * In-order traversal of the stitched forest yields exactly the key
    ///   universe `{1..n}`, in ascending order.
    pub fn validate(&self) -> Result<()> {
        let root = match self.root.as_deref() {
            Some(root) => root,
            None => return err_at!(Fatal, msg: "tango tree lost its root"),
        };
        if root.is_external() {
            return err_at!(Fatal, msg: "tango root is external");
        }

        llrb::validate_aux(root)?;

        let mut keys = Vec::with_capacity(self.n as usize);
        validate_forest(root, &mut keys)?;
        let ok = keys.len() == self.n as usize
            && keys.iter().zip(1..=self.n).all(|(got, want)| *got == want);
        if !ok {
            return err_at!(Fatal, msg: "key universe broken: {} keys for n={}", keys.len(), self.n);
        }
        Ok(())
    }
}

fn build_rec(l: i64, r: i64, d: i64) -> Link {
    if l > r {
        return None;
    }
    let m = (l + r + 1) / 2; // midpoint, rounded up

    let mut x = Box::new(Node::new(m));
    x.set_black();
    x.kind = Kind::External;
    x.depth = d;
    x.left = build_rec(l, m - 1, d + 1);
    x.right = build_rec(m + 1, r, d + 1);
    x.update();
    Some(x)
}

/// Splice the auxiliary hanging off the `side` slot of the node carrying
/// `pkey` into the walked tree h, evicting whatever portion of h's
/// preferred path lies below the splice point.
fn tango(h: Link, pkey: i64, side: Side) -> Box<Node> {
    let h_max = node::max_depth(h.as_deref());

    let mut h = h;
    let mut q = child_slot(&mut h, pkey, side)
        .take()
        .expect("tango on a vacant slot ? call the programmer");
    debug_assert!(q.is_external());
    q.kind = Kind::Regular; // q joins the preferred path for good

    if h_max < q.min_depth {
        // the old preferred path has nothing below the splice point; cut
        // h at the parent key and seat q's path between the halves
        let (anchor, qrest, hang) = cut_boundary(q, side);
        *child_slot(&mut h, pkey, side) = hang;

        let (tl, y, tg) = match llrb::split(h, pkey) {
            Ok(parts) => parts,
            Err(err) => panic!("tango: splice key vanished: {}", err),
        };
        match side {
            Side::Left => {
                let taux = llrb::join(qrest, y, tg);
                llrb::join(tl, anchor, Some(taux))
            }
            Side::Right => {
                let taux = llrb::join(tl, y, qrest);
                llrb::join(Some(taux), anchor, tg)
            }
        }
    } else {
        // the keys of depth >= d form the contiguous segment (l, r) of the
        // old path that must be evicted in favour of q's path
        let (d, qkey) = (q.min_depth, q.key());
        let (l, tm_left) = llrb::predecessor(h.as_deref().unwrap(), d);
        let (r, _) = llrb::successor(h.as_deref().unwrap(), d);

        let cut = if tm_left < qkey { Side::Right } else { Side::Left };
        let (anchor, qrest, hang) = cut_boundary(q, cut);
        *child_slot(&mut h, pkey, side) = hang;

        let (tl, xl, ta) = match l {
            Some(l) => {
                let (tl, xl, ta) = split_at(h, l);
                (tl, Some(xl), ta)
            }
            None => (None, None, h),
        };
        let (mut tm, xr, tr) = match r {
            Some(r) => {
                let (tm, xr, tr) = split_at(ta, r);
                (tm, Some(xr), tr)
            }
            None => (ta, None, None),
        };

        // the evicted segment becomes a detached auxiliary of its own
        let tm_key = {
            let tm = tm.as_mut().expect("tango: empty residue ? call the programmer");
            tm.kind = Kind::External;
            tm.key()
        };

        if tm_key < qkey {
            let tp = match xl {
                Some(xl) => Some(llrb::join(tl, xl, tm)),
                None => tm,
            };
            let xr = xr.expect("tango: no boundary right of the residue ? call the programmer");
            let tpp = llrb::join(tp, xr, qrest);
            llrb::join(Some(tpp), anchor, tr)
        } else {
            let tp = match xr {
                Some(xr) => Some(llrb::join(tm, xr, tr)),
                None => tm,
            };
            let xl = xl.expect("tango: no boundary left of the residue ? call the programmer");
            let tpp = llrb::join(qrest, xl, tp);
            llrb::join(tl, anchor, Some(tpp))
        }
    }
}

// Pull the boundary node off the entered auxiliary: its minimum when the
// splice faces left, its maximum when it faces right. Returns the boundary
// node (detached, the splice anchor), the remainder of the auxiliary, and
// the hanger, the detached subtree that sat outside the boundary and goes
// back into the parent's child slot.
fn cut_boundary(q: Box<Node>, side: Side) -> (Box<Node>, Link, Link) {
    match side {
        Side::Left => {
            let (mut m, rest) = match llrb::extract_min(Some(q)) {
                Ok(out) => out,
                Err(err) => panic!("tango: {}", err),
            };
            let (hang, _) = m.detach();
            (m, rest, hang)
        }
        Side::Right => {
            let (rest, mut m) = match llrb::extract_max(Some(q)) {
                Ok(out) => out,
                Err(err) => panic!("tango: {}", err),
            };
            let (_, hang) = m.detach();
            (m, rest, hang)
        }
    }
}

fn split_at(t: Link, key: i64) -> (Link, Box<Node>, Link) {
    match llrb::split(t, key) {
        Ok(parts) => parts,
        Err(err) => panic!("tango: boundary key vanished: {}", err),
    }
}

// Walk down to the node carrying pkey and return its child slot on the
// given side. The path to a splice parent never leaves the top auxiliary.
fn child_slot(link: &mut Link, pkey: i64, side: Side) -> &mut Link {
    let n = link
        .as_mut()
        .expect("tango: lost the splice parent ? call the programmer");
    match pkey.cmp(&n.key()) {
        Ordering::Less => child_slot(&mut n.left, pkey, side),
        Ordering::Greater => child_slot(&mut n.right, pkey, side),
        Ordering::Equal => match side {
            Side::Left => &mut n.left,
            Side::Right => &mut n.right,
        },
    }
}

fn show_rec(t: Option<&Node>, indent: usize, out: &mut String) {
    if let Some(n) = t {
        show_rec(n.left.as_deref(), indent + 3, out);
        if n.is_external() {
            writeln!(out, "{:indent$}({}, d={})", "", n.key(), n.depth, indent = indent).unwrap();
        } else {
            writeln!(
                out,
                "{:indent$}{}({}, d={}){}",
                "",
                RED_COLOR,
                n.key(),
                n.depth,
                RESET,
                indent = indent
            )
            .unwrap();
        }
        show_rec(n.right.as_deref(), indent + 3, out);
    }
}

// In-order walk across the whole stitched forest, validating every
// detached auxiliary at its root and collecting the keys.
fn validate_forest(n: &Node, keys: &mut Vec<i64>) -> Result<()> {
    if let Some(left) = n.left.as_deref() {
        if left.is_external() {
            llrb::validate_aux(left)?;
        }
        validate_forest(left, keys)?;
    }
    keys.push(n.key());
    if let Some(right) = n.right.as_deref() {
        if right.is_external() {
            llrb::validate_aux(right)?;
        }
        validate_forest(right, keys)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "tango_test.rs"]
mod tango_test;
