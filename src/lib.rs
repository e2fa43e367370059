//! Package implement Tango Tree.
//!
//! Quoting from [Wikipedia][wiki-tango]:
//!
//! > A tango tree is a type of binary search tree proposed by Erik D. Demaine,
//! > Dion Harmon, John Iacono, and Mihai Patrascu in 2004. It is an online
//! > binary search tree that achieves an O(log log n) competitive ratio
//! > relative to the offline optimal binary search tree.
//!
//! Following modules implement the structure, bottom up:
//!
//! * [node] supplies the node record shared by every tree in the forest,
//!   with per-subtree `size`, black `height` and reference-depth aggregates.
//! * [llrb] implements the set operations over a
//!   [left-leaning-red-black][wiki-llrb] tree, extended with `split`, `join`,
//!   `extract_min`, `extract_max` and the depth-ordered `predecessor` /
//!   `successor` queries.
//! * [TangoTree] stitches one llrb tree per preferred path into the search
//!   structure, over the fixed key universe `{1..n}`.
//!
//! Searching a key reorganizes the forest so that the whole search path
//! becomes one preferred path:
//!
//! ```
//! use tangotree::TangoTree;
//!
//! let mut index = TangoTree::new(15);
//! assert_eq!(index.len(), 15);
//!
//! index.search(4);
//! index.search(10);
//! index.search(9);
//! assert!(index.validate().is_ok());
//! ```
//!
//! The key universe is fixed at construction; there is no insert or delete.
//! Not thread safe.
//!
//! [wiki-tango]: https://en.wikipedia.org/wiki/Tango_tree
//! [wiki-llrb]: https://en.wikipedia.org/wiki/Left-leaning_red-black_tree

use std::{error, fmt, result};

// Short form to compose Error values.
//
// Here are few possible ways:
//
// ```ignore
// use crate::Error;
// err_at!(KeyNotFound, msg: format!("bad argument"));
// ```
//
// ```ignore
// use crate::Error;
// err_at!(Fatal, std::fs::read(file_path));
// ```
//
macro_rules! err_at {
    ($v:ident, msg: $($arg:expr),+) => {{
        let prefix = format!("{}:{}", file!(), line!());
        Err(Error::$v(prefix, format!($($arg),+)))
    }};
    ($v:ident, $e:expr) => {{
        match $e {
            Ok(val) => Ok(val),
            Err(err) => {
                let prefix = format!("{}:{}", file!(), line!());
                Err(Error::$v(prefix, format!("{}", err)))
            }
        }
    }};
}

pub mod llrb;
pub mod node;
mod tango;

pub use tango::TangoTree;

/// Error variants that are returned by this package's API.
///
/// Each variant carries a prefix, typically identifying the
/// error location.
pub enum Error {
    Fatal(String, String),
    EmptyTree(String, String),
    KeyNotFound(String, String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        use Error::*;

        match self {
            Fatal(p, msg) => write!(f, "{} Fatal: {}", p, msg),
            EmptyTree(p, msg) => write!(f, "{} EmptyTree: {}", p, msg),
            KeyNotFound(p, msg) => write!(f, "{} KeyNotFound: {}", p, msg),
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        write!(f, "{}", self)
    }
}

impl error::Error for Error {}

/// Type alias for Result return type, used by this package.
pub type Result<T> = result::Result<T, Error>;
