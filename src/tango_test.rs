use rand::{prelude::random, rngs::SmallRng, Rng, SeedableRng};

use super::*;

#[test]
fn test_build() {
    let index = TangoTree::new(15);
    assert_eq!(index.len(), 15);
    index.validate().unwrap();

    let root = index.root.as_deref().unwrap();
    assert_eq!(root.key(), 8);
    assert!(!root.is_external());

    // only the reference root starts out on a preferred path
    assert_eq!(regular_keys(&index), vec![8]);
    assert_eq!(top_keys(&index), vec![8]);

    // reference depths for n = 15
    for (key, depth) in [
        (8, 0),
        (4, 1),
        (12, 1),
        (2, 2),
        (6, 2),
        (10, 2),
        (14, 2),
        (1, 3),
        (3, 3),
        (5, 3),
        (7, 3),
        (9, 3),
        (11, 3),
        (13, 3),
        (15, 3),
    ] {
        assert_eq!(find(&index, key).depth, depth, "key {}", key);
    }
}

#[test]
fn test_reference_scenarios() {
    let mut index = TangoTree::new(15);

    // searching the root leaves the structure alone
    let before = index.show();
    assert!(index.search(8));
    assert_eq!(index.show(), before);
    index.validate().unwrap();

    // the preferred path grows to {8, 4}
    assert!(index.search(4));
    index.validate().unwrap();
    assert_eq!(top_keys(&index), vec![4, 8]);
    assert_eq!(regular_keys(&index), vec![4, 8]);
    assert_eq!(index.show().matches(RED_COLOR).count(), 2);

    // the path flips to {8, 12, 10}; the evicted 4 now roots its own
    // auxiliary
    assert!(index.search(10));
    index.validate().unwrap();
    assert_eq!(top_keys(&index), vec![8, 10, 12]);
    assert_eq!(regular_keys(&index), vec![8, 10, 12]);
    assert!(find(&index, 4).is_external());

    // the path flips to {8, 4, 2, 1}; the evicted {12, 10} segment keeps
    // 10 on its own path, and its subtree is untouched
    assert!(index.search(1));
    index.validate().unwrap();
    assert_eq!(top_keys(&index), vec![1, 2, 4, 8]);
    assert_eq!(regular_keys(&index), vec![1, 2, 4, 8, 10]);
    let twelve = find(&index, 12);
    assert!(twelve.is_external());
    assert!(!find(&index, 10).is_external());
    assert_eq!(subtree_keys(twelve), (9..=15).collect::<Vec<i64>>());

    // 9 ends up reachable without crossing a detached auxiliary
    assert!(index.search(9));
    index.validate().unwrap();
    assert!(!find(&index, 9).is_external());
    assert!(top_keys(&index).contains(&9));
    assert_eq!(top_keys(&index), vec![8, 9, 10, 12]);
    assert_eq!(regular_keys(&index), vec![1, 4, 8, 9, 10, 12]);
}

#[test]
fn test_search_idempotent() {
    let mut index = TangoTree::new(255);
    for key in [128, 17, 250, 3, 99, 100] {
        assert!(index.search(key));
        let before = index.show();
        assert!(index.search(key));
        assert_eq!(index.show(), before);
        index.validate().unwrap();
    }
}

#[test]
fn test_search_out_of_universe() {
    let mut index = TangoTree::new(31);
    assert!(!index.search(0));
    assert!(!index.search(-5));
    assert!(!index.search(32));
    assert!(!index.search(1000));
    index.validate().unwrap();
}

#[test]
fn test_sweep() {
    let mut index = TangoTree::new(31);
    for key in 1..=31 {
        assert!(index.search(key), "key {}", key);
        index.validate().unwrap();
        assert!(top_keys(&index).contains(&key));
    }
    for key in (1..=31).rev() {
        assert!(index.search(key), "key {}", key);
        index.validate().unwrap();
    }
}

#[test]
fn test_search_storm() {
    let seed: u64 = random();
    // let seed: u64 = 6876023341921816297;
    println!("test_search_storm {}", seed);
    let mut rng = SmallRng::seed_from_u64(seed);

    for n in [1, 2, 3, 7, 64, 100, 255] {
        let mut index = TangoTree::new(n);
        index.validate().unwrap();

        for _i in 0..500 {
            let key = rng.gen_range(-2..=(n + 2));
            let hit = index.search(key);
            assert_eq!(hit, (1..=n).contains(&key), "n {} key {}", n, key);
            index.validate().unwrap();
            if hit {
                assert!(!find(&index, key).is_external());
                assert!(top_keys(&index).contains(&key));
            }
        }
    }
}

#[test]
fn test_show_format() {
    let index = TangoTree::new(3);
    let text = index.show();
    assert_eq!(text, "   (1, d=1)\n\x1b[31m(2, d=0)\x1b[0m\n   (3, d=1)\n");
}

#[test]
#[should_panic]
fn test_build_empty_universe() {
    TangoTree::new(0);
}

// Walk down the stitched forest to the node carrying key; the global BST
// order holds across auxiliary boundaries.
fn find(index: &TangoTree, key: i64) -> &Node {
    let mut n = index.root.as_deref().unwrap();
    loop {
        n = match key.cmp(&n.key()) {
            Ordering::Equal => break n,
            Ordering::Less => n.left.as_deref().unwrap(),
            Ordering::Greater => n.right.as_deref().unwrap(),
        };
    }
}

fn subtree_keys(n: &Node) -> Vec<i64> {
    let mut keys = vec![];
    fn inorder(t: Option<&Node>, keys: &mut Vec<i64>) {
        if let Some(n) = t {
            inorder(n.left.as_deref(), keys);
            keys.push(n.key());
            inorder(n.right.as_deref(), keys);
        }
    }
    inorder(Some(n), &mut keys);
    keys
}

// Keys on any preferred path, across the whole forest.
fn regular_keys(index: &TangoTree) -> Vec<i64> {
    let mut keys = vec![];
    fn inorder(t: Option<&Node>, keys: &mut Vec<i64>) {
        if let Some(n) = t {
            inorder(n.left.as_deref(), keys);
            if !n.is_external() {
                keys.push(n.key());
            }
            inorder(n.right.as_deref(), keys);
        }
    }
    inorder(index.root.as_deref(), &mut keys);
    keys
}

// Keys of the top auxiliary tree, the preferred path of the root.
fn top_keys(index: &TangoTree) -> Vec<i64> {
    let mut keys = vec![];
    fn inorder(t: Option<&Node>, keys: &mut Vec<i64>) {
        match t {
            Some(n) if !n.is_external() => {
                inorder(n.left.as_deref(), keys);
                keys.push(n.key());
                inorder(n.right.as_deref(), keys);
            }
            _ => (),
        }
    }
    inorder(index.root.as_deref(), &mut keys);
    keys
}
