//! End-to-end matching tests
//!
//! Every test parses real Java, builds a path to a known node, and checks
//! which addresses re-identify it.

use anno_locator::find::{self, Criteria};
use anno_locator::tree::{preorder, JavaParser, ParsedSource, TreeKind, TreePath};
use anno_locator::{BoundLocation, InnerTypeLocation, LocalLocation, TypeStep};
use tree_sitter::Node;

const FIXTURE: &str = r#"
package com.example.demo;

import java.util.List;

public class Bar {
    private int count;

    public Bar(int seed) {
        this.count = seed;
    }

    public void foo(String a, int b, List<String> c) {
        int total = b;
        Object o = (Object) a;
        String s = (String) o;
        Bar other = new Bar(b);
        if (o instanceof String) {
            total = total + 1;
        }
    }

    public void foo(int x) {
    }
}

class Baz {
    void foo(String a, int b, List<String> c) {
    }
}
"#;

fn parse<'a>(parser: &mut JavaParser, source: &'a str) -> ParsedSource<'a> {
    let unit = parser.parse_with_source(source).unwrap();
    assert!(!unit.has_errors(), "fixture must parse cleanly");
    unit
}

fn decl<'a>(unit: &'a ParsedSource<'a>, kind: TreeKind, name: &str) -> Node<'a> {
    preorder(unit.root_node())
        .find(|n| TreeKind::from_node(*n) == Some(kind) && unit.declared_name(*n) == Some(name))
        .expect("declaration present in fixture")
}

fn method_in<'a>(unit: &'a ParsedSource<'a>, class_name: &str, method_name: &str) -> Node<'a> {
    preorder(decl(unit, TreeKind::Class, class_name))
        .find(|n| {
            TreeKind::from_node(*n).is_some_and(TreeKind::is_method_like)
                && unit.declared_name(*n) == Some(method_name)
        })
        .expect("method present in fixture")
}

fn node_of<'a>(unit: &'a ParsedSource<'a>, kind: TreeKind, text: &str) -> Node<'a> {
    preorder(unit.root_node())
        .find(|n| TreeKind::from_node(*n) == Some(kind) && unit.node_text(*n) == text)
        .expect("node present in fixture")
}

#[test]
fn kind_and_name_with_enclosing_class() {
    let mut parser = JavaParser::new().unwrap();
    let unit = parse(&mut parser, FIXTURE);

    let mut criteria = Criteria::new();
    criteria.add(find::is(TreeKind::Method, "foo").unwrap());
    criteria.add(find::in_class("Bar").unwrap());

    let in_bar = TreePath::from_leaf(&unit, method_in(&unit, "Bar", "foo"));
    assert!(criteria.is_satisfied_by(Some(&in_bar)));

    let in_baz = TreePath::from_leaf(&unit, method_in(&unit, "Baz", "foo"));
    assert!(!criteria.is_satisfied_by(Some(&in_baz)));
    assert_eq!(
        criteria
            .first_unsatisfied(Some(&in_baz))
            .unwrap()
            .to_string(),
        "in class 'Bar'"
    );
}

#[test]
fn parameter_positions_are_zero_based() {
    let mut parser = JavaParser::new().unwrap();
    let unit = parse(&mut parser, FIXTURE);

    let method = method_in(&unit, "Bar", "foo");
    let params: Vec<Node> = preorder(method)
        .filter(|n| TreeKind::from_node(*n) == Some(TreeKind::Parameter))
        .collect();
    assert_eq!(params.len(), 3);

    let third = find::param("foo", 2).unwrap();
    assert!(third.is_satisfied_by(Some(&TreePath::from_leaf(&unit, params[2]))));
    for earlier in &params[..2] {
        let path = TreePath::from_leaf(&unit, *earlier);
        assert!(!third.is_satisfied_by(Some(&path)));
    }
    assert!(find::param("foo", 0)
        .unwrap()
        .is_satisfied_by(Some(&TreePath::from_leaf(&unit, params[0]))));
}

#[test]
fn not_in_method_separates_fields_from_locals() {
    let mut parser = JavaParser::new().unwrap();
    let unit = parse(&mut parser, FIXTURE);

    let field_path = TreePath::from_leaf(&unit, decl(&unit, TreeKind::Field, "count"));
    assert!(find::not_in_method().is_satisfied_by(Some(&field_path)));

    let local_path = TreePath::from_leaf(&unit, decl(&unit, TreeKind::LocalVariable, "total"));
    assert!(!find::not_in_method().is_satisfied_by(Some(&local_path)));
}

#[test]
fn class_bound_requires_both_facts() {
    let mut parser = JavaParser::new().unwrap();
    let unit = parse(
        &mut parser,
        "class Box<T extends Comparable<T> & java.io.Serializable, U> { }",
    );

    let serializable = preorder(unit.root_node())
        .find(|n| {
            n.kind() == "scoped_type_identifier" && unit.node_text(*n) == "java.io.Serializable"
        })
        .unwrap();
    let path = TreePath::from_leaf(&unit, serializable);

    let loc = BoundLocation::new(0, 1);
    assert!(find::class_bound("Box", loc)
        .unwrap()
        .is_satisfied_by(Some(&path)));

    // changing either fact alone flips the result
    assert!(!find::class_bound("Other", loc)
        .unwrap()
        .is_satisfied_by(Some(&path)));
    assert!(!find::class_bound("Box", BoundLocation::new(0, 0))
        .unwrap()
        .is_satisfied_by(Some(&path)));

    // the same address composed from separate criteria agrees
    let mut composed = Criteria::new();
    composed.add(find::in_class("Box").unwrap());
    composed.add(find::at_bound_location(loc));
    assert!(composed.is_satisfied_by(Some(&path)));
}

#[test]
fn method_bound_addressing() {
    let mut parser = JavaParser::new().unwrap();
    let unit = parse(
        &mut parser,
        "class M { <T extends Number> T pick(T x) { return x; } }",
    );

    let number = preorder(unit.root_node())
        .find(|n| n.kind() == "type_identifier" && unit.node_text(*n) == "Number")
        .unwrap();
    let path = TreePath::from_leaf(&unit, number);
    assert!(find::method_bound("pick", BoundLocation::new(0, 0))
        .unwrap()
        .is_satisfied_by(Some(&path)));
    assert!(!find::method_bound("other", BoundLocation::new(0, 0))
        .unwrap()
        .is_satisfied_by(Some(&path)));
}

#[test]
fn receiver_addressing() {
    let mut parser = JavaParser::new().unwrap();
    let unit = parse(&mut parser, "class R { void m(R this, int x) { } }");

    let receiver_node = preorder(unit.root_node())
        .find(|n| TreeKind::from_node(*n) == Some(TreeKind::ReceiverParameter))
        .unwrap();
    let path = TreePath::from_leaf(&unit, receiver_node);

    let mut criteria = Criteria::new();
    criteria.add(find::in_class("R").unwrap());
    criteria.add(find::receiver("m").unwrap());
    assert!(criteria.is_on_receiver());
    assert!(criteria.is_satisfied_by(Some(&path)));

    let mut plain = Criteria::new();
    plain.add(find::in_class("R").unwrap());
    plain.add(find::param("m", 0).unwrap());
    assert!(!plain.is_on_receiver());
}

#[test]
fn occurrence_offsets_within_method() {
    let mut parser = JavaParser::new().unwrap();
    let unit = parse(&mut parser, FIXTURE);

    let second_cast = node_of(&unit, TreeKind::Cast, "(String) o");
    let path = TreePath::from_leaf(&unit, second_cast.child_by_field_name("type").unwrap());
    assert!(find::cast("foo", 1).unwrap().is_satisfied_by(Some(&path)));
    assert!(!find::cast("foo", 0).unwrap().is_satisfied_by(Some(&path)));

    let creation = node_of(&unit, TreeKind::NewObject, "new Bar(b)");
    let path = TreePath::from_leaf(&unit, creation.child_by_field_name("type").unwrap());
    assert!(find::new_object("foo", 0)
        .unwrap()
        .is_satisfied_by(Some(&path)));

    let test_expr = node_of(&unit, TreeKind::InstanceOf, "o instanceof String");
    let path = TreePath::from_leaf(&unit, test_expr.child_by_field_name("right").unwrap());
    assert!(find::instance_of("foo", 0)
        .unwrap()
        .is_satisfied_by(Some(&path)));
    assert!(!find::instance_of("foo", 1)
        .unwrap()
        .is_satisfied_by(Some(&path)));
}

#[test]
fn occurrence_numbering_is_stable_across_parses() {
    let mut parser = JavaParser::new().unwrap();
    let criterion = find::cast("foo", 1).unwrap();

    for _ in 0..3 {
        let unit = parse(&mut parser, FIXTURE);
        let second_cast = node_of(&unit, TreeKind::Cast, "(String) o");
        let path = TreePath::from_leaf(&unit, second_cast.child_by_field_name("type").unwrap());
        assert!(criterion.is_satisfied_by(Some(&path)));
    }
}

#[test]
fn local_variable_addressing() {
    let mut parser = JavaParser::new().unwrap();
    let unit = parse(&mut parser, FIXTURE);

    let declaration = decl(&unit, TreeKind::LocalVariable, "total");
    let path = TreePath::from_leaf(&unit, declaration);

    assert!(find::local("foo", LocalLocation::new("total", 0))
        .unwrap()
        .is_satisfied_by(Some(&path)));
    assert!(!find::local("foo", LocalLocation::new("total", 1))
        .unwrap()
        .is_satisfied_by(Some(&path)));
    assert!(!find::local("other", LocalLocation::new("total", 0))
        .unwrap()
        .is_satisfied_by(Some(&path)));
}

#[test]
fn return_type_addressing() {
    let mut parser = JavaParser::new().unwrap();
    let unit = parse(&mut parser, FIXTURE);

    let method = method_in(&unit, "Bar", "foo");
    let return_type = method.child_by_field_name("type").unwrap();
    let path = TreePath::from_leaf(&unit, return_type);
    assert!(find::return_type("foo")
        .unwrap()
        .is_satisfied_by(Some(&path)));

    // a parameter is not within the return type position
    let param = preorder(method)
        .find(|n| TreeKind::from_node(*n) == Some(TreeKind::Parameter))
        .unwrap();
    let path = TreePath::from_leaf(&unit, param);
    assert!(!find::return_type("foo")
        .unwrap()
        .is_satisfied_by(Some(&path)));
}

#[test]
fn signature_distinguishes_overloads() {
    let mut parser = JavaParser::new().unwrap();
    let unit = parse(&mut parser, FIXTURE);

    let overloads: Vec<Node> = preorder(decl(&unit, TreeKind::Class, "Bar"))
        .filter(|n| {
            TreeKind::from_node(*n) == Some(TreeKind::Method)
                && unit.declared_name(*n) == Some("foo")
        })
        .collect();
    assert_eq!(overloads.len(), 2);

    let sig = find::is_sig_method("foo(String,int,List<String>)").unwrap();
    assert!(sig.is_satisfied_by(Some(&TreePath::from_leaf(&unit, overloads[0]))));
    assert!(!sig.is_satisfied_by(Some(&TreePath::from_leaf(&unit, overloads[1]))));

    let bare = find::is_sig_method("foo").unwrap();
    for overload in &overloads {
        assert!(bare.is_satisfied_by(Some(&TreePath::from_leaf(&unit, *overload))));
    }
}

#[test]
fn inner_type_location_addressing() {
    let mut parser = JavaParser::new().unwrap();
    let unit = parse(&mut parser, FIXTURE);

    let method = method_in(&unit, "Bar", "foo");
    let c_param = preorder(method)
        .filter(|n| TreeKind::from_node(*n) == Some(TreeKind::Parameter))
        .nth(2)
        .unwrap();

    let string_arg = preorder(c_param)
        .find(|n| n.kind() == "type_identifier" && unit.node_text(*n) == "String")
        .unwrap();
    let path = TreePath::from_leaf(&unit, string_arg);
    assert!(find::at_location(InnerTypeLocation::new(vec![TypeStep::TypeArg(0)]))
        .is_satisfied_by(Some(&path)));
    assert!(!find::at_outermost_location().is_satisfied_by(Some(&path)));

    let outer = c_param.child_by_field_name("type").unwrap();
    let path = TreePath::from_leaf(&unit, outer);
    assert!(find::at_outermost_location().is_satisfied_by(Some(&path)));
}

#[test]
fn package_criteria_and_unit_fallback() {
    let mut parser = JavaParser::new().unwrap();
    let unit = parse(&mut parser, FIXTURE);

    let method_path = TreePath::from_leaf(&unit, method_in(&unit, "Bar", "foo"));
    assert!(find::in_package("com.example.demo").is_satisfied_by(Some(&method_path)));
    assert!(!find::in_package("com.example.other").is_satisfied_by(Some(&method_path)));

    // the compilation-unit case has no path at all
    assert!(find::package_decl("com.example.demo").is_satisfied_within(None, &unit));
    assert!(!find::package_decl("com.example.other").is_satisfied_within(None, &unit));

    let pkg = preorder(unit.root_node())
        .find(|n| TreeKind::from_node(*n) == Some(TreeKind::Package))
        .unwrap();
    let pkg_path = TreePath::from_leaf(&unit, pkg);
    assert!(find::package_decl("com.example.demo").is_satisfied_by(Some(&pkg_path)));

    let unnamed = parse(&mut parser, "class A { }");
    assert!(find::in_package("").is_satisfied_within(None, &unnamed));
    assert!(!find::in_package("com.example.demo").is_satisfied_within(None, &unnamed));
}

#[test]
fn empty_criteria_matches_everything() {
    let mut parser = JavaParser::new().unwrap();
    let unit = parse(&mut parser, FIXTURE);
    let criteria = Criteria::new();

    assert!(criteria.is_satisfied_by(None));
    assert!(criteria.is_satisfied_within(None, &unit));
    let path = TreePath::from_leaf(&unit, unit.root_node());
    assert!(criteria.is_satisfied_by(Some(&path)));
}

#[test]
fn fail_fast_follows_insertion_order() {
    let mut parser = JavaParser::new().unwrap();
    let unit = parse(&mut parser, FIXTURE);
    let path = TreePath::from_leaf(&unit, method_in(&unit, "Bar", "foo"));

    // both criteria fail; the first in insertion order is reported
    let mut criteria = Criteria::new();
    criteria.add(find::in_class("Nope").unwrap());
    criteria.add(find::in_method("missing").unwrap());
    assert_eq!(
        criteria.first_unsatisfied(Some(&path)).unwrap().to_string(),
        "in class 'Nope'"
    );

    let mut reversed = Criteria::new();
    reversed.add(find::in_method("missing").unwrap());
    reversed.add(find::in_class("Nope").unwrap());
    assert_eq!(
        reversed.first_unsatisfied(Some(&path)).unwrap().to_string(),
        "in method 'missing'"
    );
}

#[test]
fn enclosed_by_scans_the_whole_chain() {
    let mut parser = JavaParser::new().unwrap();
    let unit = parse(&mut parser, FIXTURE);

    let local_path = TreePath::from_leaf(&unit, decl(&unit, TreeKind::LocalVariable, "total"));
    assert!(find::enclosed_by(TreeKind::Class).is_satisfied_by(Some(&local_path)));
    assert!(find::enclosed_by(TreeKind::Method).is_satisfied_by(Some(&local_path)));

    let root_path = TreePath::from_leaf(&unit, unit.root_node());
    assert!(!find::enclosed_by(TreeKind::Class).is_satisfied_by(Some(&root_path)));
}
