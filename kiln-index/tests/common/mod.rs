//! Hand-assembled class files for scanner tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

pub const ACC_PUBLIC: u16 = 0x0001;
pub const ACC_STATIC: u16 = 0x0008;

pub enum Value {
    Str(String),
    Bool(bool),
    Int(i32),
    Enum(String, String),
    Class(String),
    Array(Vec<Value>),
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

pub struct Annotation {
    descriptor: String,
    values: Vec<(String, Value)>,
}

impl Annotation {
    /// `name` is a dotted class name, e.g. `org.apache.camel.spi.annotations.Bean`.
    pub fn new(name: &str) -> Self {
        Self {
            descriptor: format!("L{};", name.replace('.', "/")),
            values: Vec::new(),
        }
    }

    pub fn value(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.values.push((key.to_string(), value.into()));
        self
    }
}

struct Member {
    access: u16,
    name: String,
    descriptor: String,
    annotations: Vec<Annotation>,
    deprecated: bool,
}

pub struct ClassBuilder {
    name: String,
    super_name: Option<String>,
    annotations: Vec<Annotation>,
    fields: Vec<Member>,
    methods: Vec<Member>,
    deprecated: bool,
}

impl ClassBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.replace('.', "/"),
            super_name: Some("java/lang/Object".to_string()),
            annotations: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            deprecated: false,
        }
    }

    pub fn extends(mut self, name: &str) -> Self {
        self.super_name = Some(name.replace('.', "/"));
        self
    }

    pub fn annotate(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    pub fn field(mut self, name: &str, descriptor: &str, annotations: Vec<Annotation>) -> Self {
        self.fields.push(Member {
            access: 0x0002,
            name: name.to_string(),
            descriptor: descriptor.to_string(),
            annotations,
            deprecated: false,
        });
        self
    }

    pub fn deprecated_field(mut self, name: &str, descriptor: &str, annotations: Vec<Annotation>) -> Self {
        self.fields.push(Member {
            access: 0x0002,
            name: name.to_string(),
            descriptor: descriptor.to_string(),
            annotations,
            deprecated: true,
        });
        self
    }

    pub fn method(mut self, access: u16, name: &str, descriptor: &str) -> Self {
        self.methods.push(Member {
            access,
            name: name.to_string(),
            descriptor: descriptor.to_string(),
            annotations: Vec::new(),
            deprecated: false,
        });
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut pool = Pool::default();
        let mut body = Vec::new();

        u2(&mut body, ACC_PUBLIC);
        let this_class = pool.class(&self.name);
        u2(&mut body, this_class);
        let super_class = self.super_name.as_deref().map_or(0, |s| pool.class(s));
        u2(&mut body, super_class);
        u2(&mut body, 0);

        for members in [&self.fields, &self.methods] {
            u2(&mut body, members.len() as u16);
            for member in members {
                u2(&mut body, member.access);
                u2(&mut body, pool.utf8(&member.name));
                u2(&mut body, pool.utf8(&member.descriptor));
                write_attributes(&mut body, &mut pool, &member.annotations, member.deprecated);
            }
        }
        write_attributes(&mut body, &mut pool, &self.annotations, self.deprecated);

        let mut out = Vec::new();
        out.extend_from_slice(&0xCAFEBABEu32.to_be_bytes());
        u2(&mut out, 0);
        u2(&mut out, 61);
        u2(&mut out, pool.entries.len() as u16 + 1);
        for entry in &pool.entries {
            out.extend_from_slice(entry);
        }
        out.extend_from_slice(&body);
        out
    }
}

#[derive(Default)]
struct Pool {
    entries: Vec<Vec<u8>>,
    lookup: HashMap<Vec<u8>, u16>,
}

impl Pool {
    fn intern(&mut self, entry: Vec<u8>) -> u16 {
        if let Some(index) = self.lookup.get(&entry) {
            return *index;
        }
        self.entries.push(entry.clone());
        let index = self.entries.len() as u16;
        self.lookup.insert(entry, index);
        index
    }

    fn utf8(&mut self, s: &str) -> u16 {
        let mut entry = vec![1];
        u2(&mut entry, s.len() as u16);
        entry.extend_from_slice(s.as_bytes());
        self.intern(entry)
    }

    fn class(&mut self, name: &str) -> u16 {
        let name_index = self.utf8(name);
        let mut entry = vec![7];
        u2(&mut entry, name_index);
        self.intern(entry)
    }

    fn integer(&mut self, value: i32) -> u16 {
        let mut entry = vec![3];
        entry.extend_from_slice(&value.to_be_bytes());
        self.intern(entry)
    }
}

fn u2(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_be_bytes());
}

fn write_attributes(out: &mut Vec<u8>, pool: &mut Pool, annotations: &[Annotation], deprecated: bool) {
    let count = u16::from(!annotations.is_empty()) + u16::from(deprecated);
    u2(out, count);
    if deprecated {
        u2(out, pool.utf8("Deprecated"));
        out.extend_from_slice(&0u32.to_be_bytes());
    }
    if !annotations.is_empty() {
        let mut data = Vec::new();
        u2(&mut data, annotations.len() as u16);
        for annotation in annotations {
            write_annotation(&mut data, pool, annotation);
        }
        u2(out, pool.utf8("RuntimeInvisibleAnnotations"));
        out.extend_from_slice(&(data.len() as u32).to_be_bytes());
        out.extend_from_slice(&data);
    }
}

fn write_annotation(out: &mut Vec<u8>, pool: &mut Pool, annotation: &Annotation) {
    u2(out, pool.utf8(&annotation.descriptor));
    u2(out, annotation.values.len() as u16);
    for (key, value) in &annotation.values {
        u2(out, pool.utf8(key));
        write_value(out, pool, value);
    }
}

fn write_value(out: &mut Vec<u8>, pool: &mut Pool, value: &Value) {
    match value {
        Value::Str(s) => {
            out.push(b's');
            u2(out, pool.utf8(s));
        }
        Value::Bool(b) => {
            out.push(b'Z');
            u2(out, pool.integer(i32::from(*b)));
        }
        Value::Int(i) => {
            out.push(b'I');
            u2(out, pool.integer(*i));
        }
        Value::Enum(type_desc, constant) => {
            out.push(b'e');
            u2(out, pool.utf8(type_desc));
            u2(out, pool.utf8(constant));
        }
        Value::Class(desc) => {
            out.push(b'c');
            u2(out, pool.utf8(desc));
        }
        Value::Array(values) => {
            out.push(b'[');
            u2(out, values.len() as u16);
            for v in values {
                write_value(out, pool, v);
            }
        }
    }
}

/// Write `(entry name, bytes)` pairs into a jar.
pub fn write_jar(path: &Path, entries: &[(&str, Vec<u8>)]) {
    let file = std::fs::File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    let options = zip::write::FileOptions::default();
    for (name, bytes) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(bytes).unwrap();
    }
    zip.finish().unwrap();
}
