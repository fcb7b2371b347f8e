use std::path::Path;

use classlink_parser::java::JavaParser;
use classlink_parser::parser::{ParseError, SourceParser};
use classlink_parser::unit::{ImportDecl, TypeKind};

fn parse(source: &str) -> classlink_parser::unit::ParsedUnit {
    JavaParser::new()
        .unwrap()
        .parse_source(Path::new("Test.java"), source)
        .unwrap()
}

#[test]
fn java_package_and_imports() {
    let source = r"package com.ex.orders;

import java.util.List;
import com.ex.billing.Invoice;
import static com.ex.util.Strings.isBlank;
import com.ex.model.*;
import static com.ex.util.Dates.*;

public class OrderService {}
";
    let unit = parse(source);
    assert_eq!(unit.package.as_deref(), Some("com.ex.orders"));
    assert_eq!(unit.imports.len(), 5);
    assert_eq!(unit.imports[0], ImportDecl::single("java.util.List"));
    assert_eq!(unit.imports[1], ImportDecl::single("com.ex.billing.Invoice"));
    assert_eq!(
        unit.imports[2],
        ImportDecl::static_member("com.ex.util.Strings.isBlank")
    );
    assert_eq!(unit.imports[3].name, "com.ex.model");
    assert!(unit.imports[3].is_wildcard);
    assert!(!unit.imports[3].is_static);
    assert_eq!(unit.imports[4].name, "com.ex.util.Dates");
    assert!(unit.imports[4].is_wildcard);
    assert!(unit.imports[4].is_static);
}

#[test]
fn java_class_extends_and_implements() {
    let source = "package a;\npublic class Dog extends Animal implements Pet, com.ex.Named {}";
    let unit = parse(source);
    assert_eq!(unit.types.len(), 1);
    let dog = &unit.types[0];
    assert_eq!(dog.name, "Dog");
    assert_eq!(dog.kind, TypeKind::Class);
    assert_eq!(dog.extends, vec!["Animal"]);
    assert_eq!(dog.implements, vec!["Pet", "com.ex.Named"]);
}

#[test]
fn java_generic_supertypes_lose_type_arguments() {
    let source =
        "class Repo extends com.ex.Base<Order, Long> implements Comparable<Repo>, Source<List<String>> {}";
    let unit = parse(source);
    let repo = &unit.types[0];
    assert_eq!(repo.extends, vec!["com.ex.Base"]);
    assert_eq!(repo.implements, vec!["Comparable", "Source"]);
}

#[test]
fn java_interface_extends_list() {
    let source = "interface Shape extends Drawable, com.ex.Sized {}";
    let unit = parse(source);
    let shape = &unit.types[0];
    assert_eq!(shape.kind, TypeKind::Interface);
    assert_eq!(shape.extends, vec!["Drawable", "com.ex.Sized"]);
    assert!(shape.implements.is_empty());
}

#[test]
fn java_enum_and_record_implements() {
    let source = r"
enum Color implements Named { RED, GREEN }
record Point(int x, int y) implements Shape {}
";
    let unit = parse(source);
    assert_eq!(unit.types.len(), 2);
    assert_eq!(unit.types[0].kind, TypeKind::Enum);
    assert_eq!(unit.types[0].implements, vec!["Named"]);
    assert_eq!(unit.types[1].kind, TypeKind::Record);
    assert_eq!(unit.types[1].implements, vec!["Shape"]);
}

#[test]
fn java_nested_types_are_not_top_level() {
    let source = r"
class Outer {
    static class Inner extends Hidden {}
}
";
    let unit = parse(source);
    assert_eq!(unit.types.len(), 1);
    assert_eq!(unit.types[0].name, "Outer");
    assert!(unit.types[0].extends.is_empty());
}

#[test]
fn java_unit_without_package() {
    let unit = parse("class Loose extends Base {}");
    assert!(unit.package.is_none());
    assert_eq!(unit.package_name(), "");
}

#[test]
fn parse_file_rejects_missing_and_wrong_extension() {
    let parser = JavaParser::new().unwrap();
    let err = parser
        .parse_file(Path::new("/definitely/missing/Foo.java"))
        .unwrap_err();
    assert!(matches!(err, ParseError::NotFound(_)));

    let tmp = tempfile::tempdir().unwrap();
    let txt = tmp.path().join("Foo.txt");
    std::fs::write(&txt, "class Foo {}").unwrap();
    let err = parser.parse_file(&txt).unwrap_err();
    assert!(matches!(err, ParseError::WrongExtension(_)));
}

#[test]
fn parse_file_rejects_malformed_source() {
    let tmp = tempfile::tempdir().unwrap();
    let bad = tmp.path().join("Bad.java");
    std::fs::write(&bad, "package a;\nclass Bad extends {").unwrap();
    let err = JavaParser::new().unwrap().parse_file(&bad).unwrap_err();
    assert!(matches!(err, ParseError::Syntax { .. }));
}

#[test]
fn parse_file_reads_from_disk() {
    let tmp = tempfile::tempdir().unwrap();
    let file = tmp.path().join("A.java");
    std::fs::write(&file, "package com.ex;\nimport com.ex.B;\npublic class A {}\n").unwrap();
    let unit = JavaParser::new().unwrap().parse_file(&file).unwrap();
    assert_eq!(unit.package_name(), "com.ex");
    assert_eq!(unit.imports, vec![ImportDecl::single("com.ex.B")]);
}
