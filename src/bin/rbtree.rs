//! Menu interface over a map of independent red-black trees.
//!
//! ```text
//! 1 <id> <val>        - insert val into tree id
//! 2 <id> <val>        - does tree id contain val, prints True/False
//! 3 <id> <val>        - remove val from tree id
//! 4 <id1> <val> <id2> - join tree id1 and tree id2 around a fresh node
//!                       carrying val, print the result, store it as id1
//! 5 <id> <key>        - split tree id at key, print the three parts
//! 6 <id>              - print tree id
//! ```
//!
//! Example:
//!
//! ```text
//! 1 1 1
//! 1 1 3
//! 1 1 7
//! 6 1
//! 1 2 10
//! 1 2 15
//! 4 1 9 2
//! ```

use std::collections::HashMap;
use std::io::{self, Read};

use tangotree::llrb;
use tangotree::node::Link;

fn main() {
    let mut input = String::new();
    io::stdin().read_to_string(&mut input).unwrap();
    let mut tokens = input.split_whitespace();

    let mut trees: HashMap<i64, Link> = HashMap::new();

    while let Some(op) = tokens.next() {
        match op {
            "1" => {
                let (id, val) = match (parse(tokens.next()), parse(tokens.next())) {
                    (Some(id), Some(val)) => (id, val),
                    _ => {
                        println!("Invalid Operation");
                        continue;
                    }
                };
                let t = trees.remove(&id).unwrap_or(None);
                trees.insert(id, llrb::insert(t, val));
            }
            "2" => {
                let (id, val) = match (parse(tokens.next()), parse(tokens.next())) {
                    (Some(id), Some(val)) => (id, val),
                    _ => {
                        println!("Invalid Operation");
                        continue;
                    }
                };
                let t = trees.get(&id).and_then(|t| t.as_deref());
                println!("{}", if llrb::contains(t, val) { "True" } else { "False" });
            }
            "3" => {
                let (id, val) = match (parse(tokens.next()), parse(tokens.next())) {
                    (Some(id), Some(val)) => (id, val),
                    _ => {
                        println!("Invalid Operation");
                        continue;
                    }
                };
                match trees.remove(&id) {
                    Some(t) => {
                        trees.insert(id, llrb::remove(t, val));
                    }
                    None => println!("Invalid ID"),
                }
            }
            "4" => {
                let (id1, val, id2) = match (
                    parse(tokens.next()),
                    parse(tokens.next()),
                    parse(tokens.next()),
                ) {
                    (Some(id1), Some(val), Some(id2)) => (id1, val, id2),
                    _ => {
                        println!("Invalid Operation");
                        continue;
                    }
                };
                let t1 = trees.remove(&id1).unwrap_or(None);
                let t2 = trees.remove(&id2).unwrap_or(None);
                let x = llrb::insert(None, val).unwrap();
                let root = llrb::join(t1, x, t2);
                print!("{}", llrb::show(Some(root.as_ref())));
                trees.insert(id1, Some(root));
            }
            "5" => {
                let (id, key) = match (parse(tokens.next()), parse(tokens.next())) {
                    (Some(id), Some(key)) => (id, key),
                    _ => {
                        println!("Invalid Operation");
                        continue;
                    }
                };
                match trees.remove(&id) {
                    Some(t) if llrb::contains(t.as_deref(), key) => {
                        let (l, x, r) = llrb::split(t, key).unwrap();
                        println!("L tree:");
                        print!("{}", llrb::show(l.as_deref()));
                        println!("x node:");
                        print!("{}", llrb::show(Some(x.as_ref())));
                        println!("R tree:");
                        print!("{}", llrb::show(r.as_deref()));
                    }
                    Some(t) => {
                        println!("key {} not in tree {}", key, id);
                        trees.insert(id, t);
                    }
                    None => println!("Invalid ID"),
                }
            }
            "6" => {
                let id = match parse(tokens.next()) {
                    Some(id) => id,
                    _ => {
                        println!("Invalid Operation");
                        continue;
                    }
                };
                match trees.get(&id) {
                    Some(t) => print!("{}", llrb::show(t.as_deref())),
                    None => println!("Invalid ID"),
                }
            }
            _ => println!("Invalid Operation"),
        }
    }
}

fn parse(tok: Option<&str>) -> Option<i64> {
    tok.and_then(|tok| tok.parse().ok())
}
