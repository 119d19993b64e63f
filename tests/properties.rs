//! Algebraic properties of criteria conjunction, checked against real
//! parsed Java rather than synthetic stand-ins.

use anno_locator::find::{self, Criteria, Criterion};
use anno_locator::tree::{preorder, JavaParser, TreeKind, TreePath};
use proptest::prelude::*;

const FIXTURE: &str = r#"
package com.example.demo;

public class Bar {
    private int count;

    public void foo(String a, int b) {
        int total = b;
    }
}
"#;

fn pool() -> Vec<Criterion> {
    vec![
        find::is(TreeKind::Method, "foo").unwrap(),
        find::in_class("Bar").unwrap(),
        find::in_class("Baz").unwrap(),
        find::in_method("foo").unwrap(),
        find::not_in_method(),
        find::in_package("com.example.demo"),
        find::in_package("com.example.other"),
        find::param("foo", 1).unwrap(),
        find::field("count").unwrap(),
        find::enclosed_by(TreeKind::Class),
    ]
}

proptest! {
    /// Criteria satisfaction is exactly the conjunction of its members'.
    #[test]
    fn conjunction_equals_fold_of_members(
        picks in proptest::collection::vec(0usize..10, 0..8),
    ) {
        let mut parser = JavaParser::new().unwrap();
        let unit = parser.parse_with_source(FIXTURE).unwrap();
        let pool = pool();

        let leaf = preorder(unit.root_node())
            .find(|n| TreeKind::from_node(*n) == Some(TreeKind::Method))
            .unwrap();
        let path = TreePath::from_leaf(&unit, leaf);

        let mut criteria = Criteria::new();
        for &i in &picks {
            criteria.add(pool[i].clone());
        }

        let expected = picks.iter().all(|&i| pool[i].is_satisfied_by(Some(&path)));
        prop_assert_eq!(criteria.is_satisfied_by(Some(&path)), expected);
    }

    /// Adding every criterion twice changes neither the set size nor any
    /// satisfaction result.
    #[test]
    fn duplicate_adds_are_inert(
        picks in proptest::collection::vec(0usize..10, 1..6),
    ) {
        let mut parser = JavaParser::new().unwrap();
        let unit = parser.parse_with_source(FIXTURE).unwrap();
        let pool = pool();

        let leaf = preorder(unit.root_node())
            .find(|n| TreeKind::from_node(*n) == Some(TreeKind::Parameter))
            .unwrap();
        let path = TreePath::from_leaf(&unit, leaf);

        let mut once = Criteria::new();
        let mut twice = Criteria::new();
        for &i in &picks {
            once.add(pool[i].clone());
            twice.add(pool[i].clone());
            twice.add(pool[i].clone());
        }

        prop_assert_eq!(once.len(), twice.len());
        prop_assert_eq!(
            once.is_satisfied_by(Some(&path)),
            twice.is_satisfied_by(Some(&path))
        );
        prop_assert_eq!(once.is_on_receiver(), twice.is_on_receiver());
    }
}
