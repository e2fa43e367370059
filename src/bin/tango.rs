//! Interactive tango-tree driver.
//!
//! First off, type the tree size (must be a positive integer). After this
//! you can perform search and show operations using:
//!
//! ```text
//! 1 <key>  - Search the key <key> in the tango tree
//! 2        - Show the current tango configuration
//! ```
//!
//! Example:
//!
//! ```text
//! 15
//! 1 4
//! 2
//! ```

use std::io::{self, Read};
use std::process::exit;

use tangotree::TangoTree;

fn main() {
    let mut input = String::new();
    io::stdin().read_to_string(&mut input).unwrap();
    let mut tokens = input.split_whitespace();

    let n = match tokens.next().and_then(|tok| tok.parse::<i64>().ok()) {
        Some(n) if n > 0 => n,
        _ => {
            eprintln!("first token must be a positive tree size");
            exit(1);
        }
    };
    let mut index = TangoTree::new(n);

    while let Some(op) = tokens.next() {
        match op {
            "1" => match tokens.next().and_then(|tok| tok.parse::<i64>().ok()) {
                Some(key) => {
                    index.search(key);
                }
                None => println!("Invalid operation"),
            },
            "2" => print!("{}", index.show()),
            _ => println!("Invalid operation"),
        }
    }
}
