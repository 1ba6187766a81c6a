use std::collections::BTreeMap;
use std::ops::Range;

use indexmap::IndexMap;
use kiln_core::Coordinates;

use crate::classfile::ParsedClass;
use crate::record::SymbolRecord;
use crate::source::{ClassInfo, Setter, SymbolSource};

/// In-memory symbol index built once per pass.
#[derive(Debug, Default, Clone)]
pub struct SymbolIndex {
    records: Vec<SymbolRecord>,
    by_marker: IndexMap<String, Range<usize>>,
    classes: BTreeMap<String, ClassInfo>,
}

impl SymbolIndex {
    pub fn builder() -> IndexBuilder {
        IndexBuilder::default()
    }

    pub fn records(&self) -> &[SymbolRecord] {
        &self.records
    }

    pub fn classes(&self) -> impl Iterator<Item = &ClassInfo> {
        self.classes.values()
    }

    pub fn markers(&self) -> impl Iterator<Item = &str> {
        self.by_marker.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl SymbolSource for SymbolIndex {
    fn lookup(&self, marker: &str) -> &[SymbolRecord] {
        match self.by_marker.get(marker) {
            Some(range) => &self.records[range.clone()],
            None => &[],
        }
    }

    fn class(&self, name: &str) -> Option<&ClassInfo> {
        self.classes.get(name)
    }

    fn records_of(&self, owner: &str) -> Vec<&SymbolRecord> {
        self.records.iter().filter(|r| r.owner == owner).collect()
    }
}

/// Accumulates records and classes, then freezes them into a [`SymbolIndex`].
#[derive(Debug, Default)]
pub struct IndexBuilder {
    records: Vec<SymbolRecord>,
    classes: BTreeMap<String, ClassInfo>,
}

impl IndexBuilder {
    /// Add a record. The owner is registered as a bare class if unknown.
    pub fn record(mut self, record: SymbolRecord) -> Self {
        self.push_record(record);
        self
    }

    /// Add structural class information. The first definition of a name wins.
    pub fn class(mut self, info: ClassInfo) -> Self {
        self.push_class(info);
        self
    }

    pub fn push_record(&mut self, record: SymbolRecord) {
        if !self.classes.contains_key(&record.owner) {
            let mut info = ClassInfo::new(record.owner.clone());
            info.artifact = record.artifact.clone();
            self.classes.insert(record.owner.clone(), info);
        }
        self.records.push(record);
    }

    /// Returns `false` when a class of the same name was already present.
    pub fn push_class(&mut self, info: ClassInfo) -> bool {
        match self.classes.get_mut(&info.name) {
            // Placeholder created from a record; replace with the real structure.
            Some(existing) if existing.setters.is_empty() && existing.super_class.is_none() => {
                let artifact = existing.artifact.take();
                *existing = ClassInfo {
                    artifact: info.artifact.or(artifact),
                    ..info
                };
                true
            }
            Some(_) => false,
            None => {
                self.classes.insert(info.name.clone(), info);
                true
            }
        }
    }

    pub fn contains_class(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Add a parsed class: structure plus one record per marker occurrence.
    ///
    /// Returns `false` and ignores the class if its name was already added.
    pub fn push_parsed(&mut self, class: ParsedClass, artifact: Option<&Coordinates>) -> bool {
        if self.classes.contains_key(&class.name) {
            return false;
        }

        let setters = class
            .methods
            .iter()
            .filter(|m| {
                m.is_public()
                    && !m.is_static()
                    && !m.is_synthetic()
                    && m.name.len() > 3
                    && m.name.starts_with("set")
                    && m.parameters.len() == 1
                    && m.java_type == "void"
            })
            .map(|m| Setter {
                property: kiln_core::decapitalize(&m.name[3..]),
                method: m.name.clone(),
                java_type: m.parameters[0].clone(),
            })
            .collect();

        let info = ClassInfo {
            name: class.name.clone(),
            super_class: class.super_class.clone(),
            interfaces: class.interfaces.clone(),
            deprecated: class.deprecated,
            artifact: artifact.cloned(),
            setters,
        };
        self.classes.insert(class.name.clone(), info);

        let stamp = |mut record: SymbolRecord, deprecated: bool| {
            record.deprecated = deprecated;
            record.artifact = artifact.cloned();
            record
        };

        for marker in class.markers {
            let mut record = SymbolRecord::on_class(&class.name, marker.name);
            record.attributes = marker.attributes;
            self.records.push(stamp(record, class.deprecated));
        }
        for field in class.fields {
            for marker in field.markers {
                let mut record =
                    SymbolRecord::on_field(&class.name, &field.name, &field.java_type, marker.name);
                record.attributes = marker.attributes;
                self.records.push(stamp(record, field.deprecated));
            }
        }
        for method in class.methods {
            for marker in method.markers {
                let mut record = SymbolRecord::on_method(
                    &class.name,
                    &method.name,
                    &method.java_type,
                    marker.name,
                );
                record.attributes = marker.attributes;
                self.records.push(stamp(record, method.deprecated));
            }
        }
        true
    }

    pub fn build(self) -> SymbolIndex {
        let mut records = self.records;
        records.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

        let mut by_marker: IndexMap<String, Range<usize>> = IndexMap::new();
        for (i, record) in records.iter().enumerate() {
            by_marker
                .entry(record.marker.clone())
                .and_modify(|range| range.end = i + 1)
                .or_insert(i..i + 1);
        }

        SymbolIndex {
            records,
            by_marker,
            classes: self.classes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ElementKind;

    const BEAN: &str = "org.apache.camel.spi.annotations.Bean";
    const META: &str = "org.apache.camel.spi.Metadata";

    #[test]
    fn test_lookup_is_sorted_and_scoped() {
        let index = SymbolIndex::builder()
            .record(SymbolRecord::on_class("com.acme.Zed", BEAN).attr("name", "zed"))
            .record(SymbolRecord::on_field("com.acme.Zed", "size", "int", META))
            .record(SymbolRecord::on_class("com.acme.Alpha", BEAN).attr("name", "alpha"))
            .build();

        let beans = index.lookup(BEAN);
        assert_eq!(beans.len(), 2);
        assert_eq!(beans[0].owner, "com.acme.Alpha");
        assert_eq!(beans[1].owner, "com.acme.Zed");
        assert_eq!(index.lookup(META).len(), 1);
        assert!(index.lookup("org.unknown.Marker").is_empty());
    }

    #[test]
    fn test_records_of_owner() {
        let index = SymbolIndex::builder()
            .record(SymbolRecord::on_class("com.acme.Foo", BEAN))
            .record(SymbolRecord::on_field("com.acme.Foo", "a", "int", META))
            .record(SymbolRecord::on_field("com.acme.Bar", "b", "int", META))
            .build();

        let records = index.records_of("com.acme.Foo");
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.owner == "com.acme.Foo"));
        assert_eq!(records[0].element.kind, ElementKind::Class);
    }

    #[test]
    fn test_setters_walk_superclasses_with_shadowing() {
        let index = SymbolIndex::builder()
            .class(
                ClassInfo::new("com.acme.Base")
                    .setter("timeout", "long")
                    .setter("name", "java.lang.String"),
            )
            .class(
                ClassInfo::new("com.acme.Child")
                    .extends("com.acme.Base")
                    .setter("timeout", "int"),
            )
            .build();

        let setters = index.setters("com.acme.Child");
        assert_eq!(setters.len(), 2);
        assert_eq!(setters[0].property, "timeout");
        assert_eq!(setters[0].java_type, "int");
        assert_eq!(setters[1].property, "name");
    }

    #[test]
    fn test_setters_tolerate_cycles() {
        let index = SymbolIndex::builder()
            .class(ClassInfo::new("a.A").extends("a.B").setter("x", "int"))
            .class(ClassInfo::new("a.B").extends("a.A").setter("y", "int"))
            .build();
        assert_eq!(index.setters("a.A").len(), 2);
    }

    #[test]
    fn test_inherited_records_shadowing() {
        let index = SymbolIndex::builder()
            .class(ClassInfo::new("a.Base"))
            .class(ClassInfo::new("a.Child").extends("a.Base"))
            .record(SymbolRecord::on_field("a.Base", "host", "java.lang.String", META))
            .record(SymbolRecord::on_field("a.Base", "port", "int", META))
            .record(
                SymbolRecord::on_field("a.Child", "port", "int", META).attr("defaultValue", "80"),
            )
            .build();

        let records = index.inherited_records("a.Child", META);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].owner, "a.Child");
        assert_eq!(records[1].element.name.as_deref(), Some("host"));
    }

    #[test]
    fn test_first_class_definition_wins() {
        let mut builder = SymbolIndex::builder();
        assert!(builder.push_class(ClassInfo::new("a.A").setter("x", "int")));
        assert!(!builder.push_class(ClassInfo::new("a.A").setter("y", "int")));
        let index = builder.build();
        assert_eq!(index.setters("a.A")[0].property, "x");
    }

    #[test]
    fn test_record_owner_registered_as_class() {
        let index = SymbolIndex::builder()
            .record(SymbolRecord::on_class("a.A", BEAN))
            .class(ClassInfo::new("a.A").setter("x", "int"))
            .build();
        assert!(index.class("a.A").is_some());
        assert_eq!(index.setters("a.A").len(), 1);
    }
}
