mod common;

use std::fs;

use common::{ACC_PUBLIC, ACC_STATIC, Annotation, ClassBuilder, Value, write_jar};
use kiln_core::Coordinates;
use kiln_index::{ElementKind, IndexError, MarkerValue, ScanRoot, Scanner, SymbolSource, parse_class};
use tempfile::TempDir;

const BEAN: &str = "org.apache.camel.spi.annotations.Bean";
const METADATA: &str = "org.apache.camel.spi.Metadata";

fn bean_class(name: &str, bean_name: &str) -> Vec<u8> {
    ClassBuilder::new(name)
        .annotate(Annotation::new(BEAN).value("name", bean_name))
        .build()
}

#[test]
fn test_parse_class_annotations_and_setters() {
    let bytes = ClassBuilder::new("com.acme.FooBean")
        .annotate(
            Annotation::new(BEAN)
                .value("name", "foo")
                .value("description", "The foo bean"),
        )
        .field(
            "timeout",
            "J",
            vec![
                Annotation::new(METADATA)
                    .value("defaultValue", "1000")
                    .value("required", Value::Bool(true)),
            ],
        )
        .method(ACC_PUBLIC, "setTimeout", "(J)V")
        .method(ACC_PUBLIC | ACC_STATIC, "setGlobal", "(Z)V")
        .method(ACC_PUBLIC, "getTimeout", "()J")
        .build();

    let class = parse_class(&bytes).unwrap();
    assert_eq!(class.name, "com.acme.FooBean");
    assert_eq!(class.super_class.as_deref(), Some("java.lang.Object"));
    assert_eq!(class.markers.len(), 1);
    assert_eq!(class.markers[0].name, BEAN);
    assert_eq!(
        class.markers[0].attributes.get("name"),
        Some(&MarkerValue::Str("foo".into()))
    );
    assert_eq!(class.fields[0].java_type, "long");
    assert_eq!(
        class.fields[0].markers[0].attributes.get("required"),
        Some(&MarkerValue::Bool(true))
    );
    assert_eq!(class.methods.len(), 3);
}

#[test]
fn test_enum_array_and_class_values() {
    let bytes = ClassBuilder::new("com.acme.Thing")
        .annotate(
            Annotation::new("org.acme.Marker")
                .value(
                    "category",
                    Value::Enum("Lorg/acme/Category;".into(), "CORE".into()),
                )
                .value(
                    "labels",
                    Value::Array(vec![Value::from("a"), Value::from("b")]),
                )
                .value("type", Value::Class("Ljava/lang/String;".into()))
                .value("weight", Value::Int(7)),
        )
        .build();

    let class = parse_class(&bytes).unwrap();
    let attrs = &class.markers[0].attributes;
    assert_eq!(
        attrs.get("category"),
        Some(&MarkerValue::Enum {
            type_name: "org.acme.Category".into(),
            constant: "CORE".into(),
        })
    );
    assert_eq!(attrs["labels"].as_str_list(), vec!["a", "b"]);
    assert_eq!(attrs.get("type"), Some(&MarkerValue::Class("java.lang.String".into())));
    assert_eq!(attrs.get("weight"), Some(&MarkerValue::Int(7)));
}

#[test]
fn test_scan_classes_directory() {
    let temp = TempDir::new().unwrap();
    let classes = temp.path().join("classes");
    fs::create_dir_all(classes.join("com/acme")).unwrap();
    fs::write(classes.join("com/acme/Foo.class"), bean_class("com.acme.Foo", "foo")).unwrap();
    fs::write(
        classes.join("com/acme/Bar.class"),
        ClassBuilder::new("com.acme.Bar")
            .deprecated()
            .annotate(Annotation::new(BEAN).value("name", "bar"))
            .deprecated_field("legacy", "Ljava/lang/String;", vec![Annotation::new(METADATA)])
            .build(),
    )
    .unwrap();
    fs::write(classes.join("com/acme/notes.txt"), "not a class").unwrap();

    let (index, stats) = Scanner::new().root(ScanRoot::new(&classes)).scan();

    assert_eq!(stats.roots, 1);
    assert_eq!(stats.classes, 2);
    assert!(stats.skipped.is_empty());

    let beans = index.lookup(BEAN);
    assert_eq!(beans.len(), 2);
    assert_eq!(beans[0].owner, "com.acme.Bar");
    assert!(beans[0].deprecated);
    assert_eq!(beans[1].owner, "com.acme.Foo");
    assert!(!beans[1].deprecated);
    assert!(beans[1].artifact.is_none());

    let fields = index.lookup(METADATA);
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].element.kind, ElementKind::Field);
    assert_eq!(fields[0].element.java_type.as_deref(), Some("java.lang.String"));
    assert!(fields[0].deprecated);
}

#[test]
fn test_scan_jar_tags_artifact() {
    let temp = TempDir::new().unwrap();
    let jar = temp.path().join("dep.jar");
    write_jar(
        &jar,
        &[
            ("META-INF/MANIFEST.MF", b"Manifest-Version: 1.0\n".to_vec()),
            ("com/dep/Dep.class", bean_class("com.dep.Dep", "dep")),
            ("module-info.class", vec![0, 1, 2]),
        ],
    );
    let coords: Coordinates = "com.dep:dep:1.0".parse().unwrap();

    let (index, stats) = Scanner::new()
        .root(ScanRoot::with_artifact(&jar, coords.clone()))
        .scan();

    assert_eq!(stats.classes, 1);
    assert!(stats.skipped.is_empty());
    let beans = index.lookup(BEAN);
    assert_eq!(beans.len(), 1);
    assert_eq!(beans[0].artifact.as_ref(), Some(&coords));
    assert_eq!(index.class("com.dep.Dep").unwrap().artifact.as_ref(), Some(&coords));
}

#[test]
fn test_malformed_class_is_skipped() {
    let temp = TempDir::new().unwrap();
    let classes = temp.path().join("classes");
    fs::create_dir_all(&classes).unwrap();
    fs::write(classes.join("Broken.class"), [0xCA, 0xFE, 0xBA, 0xBE, 0x00]).unwrap();
    fs::write(classes.join("Good.class"), bean_class("Good", "good")).unwrap();

    let (index, stats) = Scanner::new().root(ScanRoot::new(&classes)).scan();

    assert_eq!(stats.classes, 1);
    assert_eq!(stats.skipped.len(), 1);
    assert!(matches!(stats.skipped[0], IndexError::ClassFile { .. }));
    assert!(stats.skipped[0].path().ends_with("Broken.class"));
    assert_eq!(index.lookup(BEAN).len(), 1);
}

#[test]
fn test_first_root_wins_for_duplicate_classes() {
    let temp = TempDir::new().unwrap();
    let first = temp.path().join("first");
    let second = temp.path().join("second");
    fs::create_dir_all(&first).unwrap();
    fs::create_dir_all(&second).unwrap();
    fs::write(first.join("Dup.class"), bean_class("Dup", "one")).unwrap();
    fs::write(second.join("Dup.class"), bean_class("Dup", "two")).unwrap();

    let (index, stats) = Scanner::new()
        .root(ScanRoot::new(&first))
        .root(ScanRoot::new(&second))
        .scan();

    assert_eq!(stats.classes, 1);
    assert_eq!(stats.duplicates, 1);
    let beans = index.lookup(BEAN);
    assert_eq!(beans.len(), 1);
    assert_eq!(beans[0].get_str("name"), Some("one"));
}

#[test]
fn test_setters_across_scanned_hierarchy() {
    let temp = TempDir::new().unwrap();
    let classes = temp.path().join("classes");
    fs::create_dir_all(&classes).unwrap();
    fs::write(
        classes.join("Base.class"),
        ClassBuilder::new("a.Base")
            .method(ACC_PUBLIC, "setHost", "(Ljava/lang/String;)V")
            .method(ACC_PUBLIC, "setPort", "(I)V")
            .build(),
    )
    .unwrap();
    fs::write(
        classes.join("Child.class"),
        ClassBuilder::new("a.Child")
            .extends("a.Base")
            .method(ACC_PUBLIC, "setPort", "(J)V")
            .method(0x0002, "setHidden", "(I)V")
            .method(ACC_PUBLIC, "setTwo", "(II)V")
            .method(ACC_PUBLIC, "setURL", "(Ljava/lang/String;)Ljava/lang/Object;")
            .build(),
    )
    .unwrap();

    let (index, _) = Scanner::new().root(ScanRoot::new(&classes)).scan();
    let setters = index.setters("a.Child");
    let names: Vec<_> = setters.iter().map(|s| (s.property.as_str(), s.java_type.as_str())).collect();
    assert_eq!(names, vec![("port", "long"), ("host", "java.lang.String")]);
}

#[test]
fn test_records_serialize_for_listing() {
    let temp = TempDir::new().unwrap();
    let classes = temp.path().join("classes");
    fs::create_dir_all(&classes).unwrap();
    fs::write(classes.join("Foo.class"), bean_class("com.acme.Foo", "foo")).unwrap();

    let (index, _) = Scanner::new().root(ScanRoot::new(&classes)).scan();
    let json = serde_json::to_value(index.lookup(BEAN)).unwrap();
    assert_eq!(json[0]["owner"], "com.acme.Foo");
    assert_eq!(json[0]["element"]["kind"], "class");
    assert_eq!(json[0]["attributes"]["name"], "foo");
}
