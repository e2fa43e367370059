use super::*;

#[test]
fn test_empty_defaults() {
    assert!(is_empty(None));
    assert!(!is_red(None));
    assert_eq!(size(None), 0);
    assert_eq!(height(None), -1);
    assert_eq!(depth(None), i64::MIN);
    assert_eq!(min_depth(None), i64::MAX);
    assert_eq!(max_depth(None), i64::MIN);
}

#[test]
fn test_external_is_empty() {
    let mut n = Node::new(10);
    n.kind = Kind::External;
    n.depth = 3;
    n.update();

    let link: Link = Some(Box::new(n));
    let r = link.as_deref();

    // an external subtree is empty to every accessor, whatever its
    // own fields say
    assert!(is_empty(r));
    assert!(!is_red(r));
    assert_eq!(size(r), 0);
    assert_eq!(height(r), -1);
    assert_eq!(depth(r), i64::MIN);
    assert_eq!(min_depth(r), i64::MAX);
    assert_eq!(max_depth(r), i64::MIN);
}

#[test]
fn test_update() {
    let mut left = Box::new(Node::new(2));
    left.set_black();
    left.depth = 1;
    left.update();

    let mut right = Box::new(Node::new(8));
    right.set_black();
    right.depth = 1;
    right.update();

    let mut root = Node::new(5);
    root.set_black();
    root.left = Some(left);
    root.right = Some(right);
    root.update();

    assert_eq!(root.size, 3);
    assert_eq!(root.height, 1);
    assert_eq!(root.min_depth, 0);
    assert_eq!(root.max_depth, 1);
}

#[test]
fn test_update_red_left() {
    // a red left child does not add to the black height
    let mut left = Box::new(Node::new(2));
    left.depth = 1;
    left.update();

    let mut root = Node::new(5);
    root.set_black();
    root.left = Some(left);
    root.update();

    assert_eq!(root.size, 2);
    assert_eq!(root.height, 0);
}

#[test]
fn test_detach() {
    let mut root = Node::new(5);
    root.set_black();
    root.left = Some(Box::new(Node::new(2)));
    root.right = Some(Box::new(Node::new(8)));
    root.update();

    let (l, r) = root.detach();
    assert_eq!(l.unwrap().key(), 2);
    assert_eq!(r.unwrap().key(), 8);
    assert!(root.is_black());
    assert_eq!(root.size, 1);
    assert_eq!(root.height, 0);
    assert_eq!(root.min_depth, 0);
    assert_eq!(root.max_depth, 0);
}
