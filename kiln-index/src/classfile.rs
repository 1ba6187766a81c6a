//! Minimal class-file reader: structure, annotations and descriptors.

use indexmap::IndexMap;
use thiserror::Error;

use crate::record::{Marker, MarkerValue};

pub(crate) const ACC_PUBLIC: u16 = 0x0001;
pub(crate) const ACC_STATIC: u16 = 0x0008;
pub(crate) const ACC_BRIDGE: u16 = 0x0040;
pub(crate) const ACC_SYNTHETIC: u16 = 0x1000;

const DEPRECATED_MARKER: &str = "java.lang.Deprecated";

#[derive(Debug, Error)]
pub enum ClassParseError {
    #[error("unexpected end of class file")]
    UnexpectedEof,
    #[error("invalid class file magic header")]
    InvalidMagic,
    #[error("unsupported constant pool tag {tag}")]
    UnsupportedConstant { tag: u8 },
    #[error("invalid constant pool index {index}")]
    InvalidConstantIndex { index: u16 },
    #[error("unsupported element value tag '{tag}'")]
    UnsupportedElementValue { tag: char },
    #[error("malformed descriptor: {0}")]
    InvalidDescriptor(String),
}

/// A field or method of a parsed class.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedMember {
    pub name: String,
    pub access: u16,
    pub descriptor: String,
    /// Field type, or return type for methods. Generic signatures are used
    /// when present.
    pub java_type: String,
    /// Parameter types; empty for fields.
    pub parameters: Vec<String>,
    pub deprecated: bool,
    pub markers: Vec<Marker>,
}

impl ParsedMember {
    pub fn is_public(&self) -> bool {
        self.access & ACC_PUBLIC != 0
    }

    pub fn is_static(&self) -> bool {
        self.access & ACC_STATIC != 0
    }

    pub fn is_synthetic(&self) -> bool {
        self.access & (ACC_SYNTHETIC | ACC_BRIDGE) != 0
    }
}

/// Everything the index keeps from one class file.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedClass {
    /// Binary name with dots, e.g. `com.acme.Outer$Inner`.
    pub name: String,
    pub super_class: Option<String>,
    pub interfaces: Vec<String>,
    pub deprecated: bool,
    pub markers: Vec<Marker>,
    pub fields: Vec<ParsedMember>,
    pub methods: Vec<ParsedMember>,
}

pub fn parse_class(bytes: &[u8]) -> Result<ParsedClass, ClassParseError> {
    let mut reader = ClassReader::new(bytes);
    reader.expect_magic()?;
    let _minor_version = reader.read_u2()?;
    let _major_version = reader.read_u2()?;
    let pool = ConstantPool::parse(&mut reader)?;

    let _access_flags = reader.read_u2()?;
    let this_class = reader.read_u2()?;
    let super_class = reader.read_u2()?;

    let interfaces_count = reader.read_u2()?;
    let mut interfaces = Vec::with_capacity(interfaces_count as usize);
    for _ in 0..interfaces_count {
        let index = reader.read_u2()?;
        interfaces.push(pool.class_name(index)?.replace('/', "."));
    }

    let fields_count = reader.read_u2()?;
    let mut fields = Vec::with_capacity(fields_count as usize);
    for _ in 0..fields_count {
        fields.push(parse_member(&mut reader, &pool, MemberKind::Field)?);
    }

    let methods_count = reader.read_u2()?;
    let mut methods = Vec::with_capacity(methods_count as usize);
    for _ in 0..methods_count {
        methods.push(parse_member(&mut reader, &pool, MemberKind::Method)?);
    }

    let attributes_count = reader.read_u2()?;
    let attributes = parse_attributes(&mut reader, &pool, attributes_count)?;

    let name = pool.class_name(this_class)?.replace('/', ".");
    let super_class = if super_class == 0 {
        None
    } else {
        Some(pool.class_name(super_class)?.replace('/', "."))
    };

    Ok(ParsedClass {
        name,
        super_class,
        interfaces,
        deprecated: attributes.deprecated,
        markers: attributes.markers,
        fields,
        methods,
    })
}

#[derive(Clone, Copy)]
enum MemberKind {
    Field,
    Method,
}

fn parse_member(
    reader: &mut ClassReader<'_>,
    pool: &ConstantPool,
    kind: MemberKind,
) -> Result<ParsedMember, ClassParseError> {
    let access = reader.read_u2()?;
    let name_index = reader.read_u2()?;
    let descriptor_index = reader.read_u2()?;
    let attributes_count = reader.read_u2()?;

    let name = pool.utf8(name_index)?.to_string();
    let descriptor = pool.utf8(descriptor_index)?.to_string();
    let attributes = parse_attributes(reader, pool, attributes_count)?;

    let (java_type, parameters) = match kind {
        MemberKind::Field => {
            let java_type = attributes
                .signature
                .as_deref()
                .and_then(|s| signature_to_java(s).ok())
                .map_or_else(|| descriptor_to_java(&descriptor), Ok)?;
            (java_type, Vec::new())
        }
        MemberKind::Method => {
            let (parameters, return_type) = parse_method_descriptor(&descriptor)?;
            (return_type, parameters)
        }
    };

    Ok(ParsedMember {
        name,
        access,
        descriptor,
        java_type,
        parameters,
        deprecated: attributes.deprecated,
        markers: attributes.markers,
    })
}

#[derive(Default)]
struct Attributes {
    deprecated: bool,
    signature: Option<String>,
    markers: Vec<Marker>,
}

fn parse_attributes(
    reader: &mut ClassReader<'_>,
    pool: &ConstantPool,
    count: u16,
) -> Result<Attributes, ClassParseError> {
    let mut attributes = Attributes::default();
    for _ in 0..count {
        let name_index = reader.read_u2()?;
        let length = reader.read_u4()? as usize;
        let slice = reader.read_slice(length)?;
        match pool.utf8(name_index)? {
            "Deprecated" => attributes.deprecated = true,
            "Signature" => {
                let mut sub = ClassReader::new(slice);
                attributes.signature = Some(pool.utf8(sub.read_u2()?)?.to_string());
            }
            "RuntimeVisibleAnnotations" | "RuntimeInvisibleAnnotations" => {
                let mut sub = ClassReader::new(slice);
                let num = sub.read_u2()?;
                for _ in 0..num {
                    let marker = parse_annotation(&mut sub, pool)?;
                    if marker.name == DEPRECATED_MARKER {
                        attributes.deprecated = true;
                    }
                    attributes.markers.push(marker);
                }
            }
            _ => {}
        }
    }
    Ok(attributes)
}

fn parse_annotation(
    reader: &mut ClassReader<'_>,
    pool: &ConstantPool,
) -> Result<Marker, ClassParseError> {
    let type_index = reader.read_u2()?;
    let name = descriptor_to_java(pool.utf8(type_index)?)?;
    let pairs = reader.read_u2()?;
    let mut attributes = IndexMap::with_capacity(pairs as usize);
    for _ in 0..pairs {
        let key = pool.utf8(reader.read_u2()?)?.to_string();
        let value = parse_element_value(reader, pool)?;
        attributes.insert(key, value);
    }
    Ok(Marker { name, attributes })
}

fn parse_element_value(
    reader: &mut ClassReader<'_>,
    pool: &ConstantPool,
) -> Result<MarkerValue, ClassParseError> {
    let tag = reader.read_u1()?;
    let value = match tag {
        b'B' | b'S' | b'I' | b'J' => MarkerValue::Int(pool.integer(reader.read_u2()?)?),
        b'Z' => MarkerValue::Bool(pool.integer(reader.read_u2()?)? != 0),
        b'C' => {
            let code = pool.integer(reader.read_u2()?)?;
            let c = u32::try_from(code)
                .ok()
                .and_then(char::from_u32)
                .unwrap_or(char::REPLACEMENT_CHARACTER);
            MarkerValue::Char(c)
        }
        b'F' | b'D' => MarkerValue::Float(pool.float(reader.read_u2()?)?),
        b's' => MarkerValue::Str(pool.utf8(reader.read_u2()?)?.to_string()),
        b'e' => {
            let type_name = descriptor_to_java(pool.utf8(reader.read_u2()?)?)?;
            let constant = pool.utf8(reader.read_u2()?)?.to_string();
            MarkerValue::Enum {
                type_name,
                constant,
            }
        }
        b'c' => MarkerValue::Class(return_descriptor_to_java(pool.utf8(reader.read_u2()?)?)?),
        b'@' => MarkerValue::Nested(parse_annotation(reader, pool)?),
        b'[' => {
            let num = reader.read_u2()?;
            let mut values = Vec::with_capacity(num as usize);
            for _ in 0..num {
                values.push(parse_element_value(reader, pool)?);
            }
            MarkerValue::Array(values)
        }
        other => {
            return Err(ClassParseError::UnsupportedElementValue { tag: other as char });
        }
    };
    Ok(value)
}

#[derive(Debug, Clone)]
enum Constant {
    Utf8(String),
    Integer(i32),
    Float(f32),
    Long(i64),
    Double(f64),
    Class { name_index: u16 },
    Other,
    Unusable,
}

struct ConstantPool {
    entries: Vec<Constant>,
}

impl ConstantPool {
    fn parse(reader: &mut ClassReader<'_>) -> Result<Self, ClassParseError> {
        let count = reader.read_u2()? as usize;
        let mut entries = Vec::with_capacity(count);
        entries.push(Constant::Unusable);

        let mut index = 1;
        while index < count {
            let tag = reader.read_u1()?;
            let entry = match tag {
                1 => {
                    let length = reader.read_u2()? as usize;
                    let bytes = reader.read_slice(length)?;
                    // Modified UTF-8 only differs for NUL and supplementary chars.
                    Constant::Utf8(String::from_utf8_lossy(bytes).into_owned())
                }
                3 => Constant::Integer(reader.read_u4()? as i32),
                4 => Constant::Float(f32::from_bits(reader.read_u4()?)),
                5 | 6 => {
                    let high = u64::from(reader.read_u4()?);
                    let low = u64::from(reader.read_u4()?);
                    let bits = (high << 32) | low;
                    let entry = if tag == 5 {
                        Constant::Long(bits as i64)
                    } else {
                        Constant::Double(f64::from_bits(bits))
                    };
                    entries.push(entry);
                    entries.push(Constant::Unusable);
                    index += 2;
                    continue;
                }
                7 => Constant::Class {
                    name_index: reader.read_u2()?,
                },
                8 | 16 | 19 | 20 => {
                    reader.skip(2)?;
                    Constant::Other
                }
                9 | 10 | 11 | 12 | 17 | 18 => {
                    reader.skip(4)?;
                    Constant::Other
                }
                15 => {
                    reader.skip(3)?;
                    Constant::Other
                }
                other => return Err(ClassParseError::UnsupportedConstant { tag: other }),
            };

            entries.push(entry);
            index += 1;
        }

        Ok(Self { entries })
    }

    fn get(&self, index: u16) -> Result<&Constant, ClassParseError> {
        self.entries
            .get(index as usize)
            .ok_or(ClassParseError::InvalidConstantIndex { index })
    }

    fn utf8(&self, index: u16) -> Result<&str, ClassParseError> {
        match self.get(index)? {
            Constant::Utf8(value) => Ok(value.as_str()),
            _ => Err(ClassParseError::InvalidConstantIndex { index }),
        }
    }

    fn integer(&self, index: u16) -> Result<i64, ClassParseError> {
        match self.get(index)? {
            Constant::Integer(v) => Ok(i64::from(*v)),
            Constant::Long(v) => Ok(*v),
            _ => Err(ClassParseError::InvalidConstantIndex { index }),
        }
    }

    fn float(&self, index: u16) -> Result<f64, ClassParseError> {
        match self.get(index)? {
            Constant::Float(v) => Ok(f64::from(*v)),
            Constant::Double(v) => Ok(*v),
            _ => Err(ClassParseError::InvalidConstantIndex { index }),
        }
    }

    fn class_name(&self, index: u16) -> Result<&str, ClassParseError> {
        match self.get(index)? {
            Constant::Class { name_index } => self.utf8(*name_index),
            _ => Err(ClassParseError::InvalidConstantIndex { index }),
        }
    }
}

struct ClassReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ClassReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn expect_magic(&mut self) -> Result<(), ClassParseError> {
        const MAGIC: u32 = 0xCAFEBABE;
        if self.read_u4()? != MAGIC {
            return Err(ClassParseError::InvalidMagic);
        }
        Ok(())
    }

    fn read_u1(&mut self) -> Result<u8, ClassParseError> {
        let value = *self
            .data
            .get(self.pos)
            .ok_or(ClassParseError::UnexpectedEof)?;
        self.pos += 1;
        Ok(value)
    }

    fn read_u2(&mut self) -> Result<u16, ClassParseError> {
        let bytes = self.read_slice(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    fn read_u4(&mut self) -> Result<u32, ClassParseError> {
        let bytes = self.read_slice(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn read_slice(&mut self, len: usize) -> Result<&'a [u8], ClassParseError> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.data.len())
            .ok_or(ClassParseError::UnexpectedEof)?;
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn skip(&mut self, len: usize) -> Result<(), ClassParseError> {
        self.read_slice(len).map(|_| ())
    }
}

/// Convert a field descriptor to a Java type name (`[Ljava/lang/String;` -> `java.lang.String[]`).
pub(crate) fn descriptor_to_java(descriptor: &str) -> Result<String, ClassParseError> {
    let mut parser = DescriptorParser::new(descriptor);
    let ty = parser.parse_type()?;
    if parser.remaining() != 0 {
        return Err(ClassParseError::InvalidDescriptor(descriptor.to_string()));
    }
    Ok(ty)
}

fn return_descriptor_to_java(descriptor: &str) -> Result<String, ClassParseError> {
    if descriptor == "V" {
        Ok("void".to_string())
    } else {
        descriptor_to_java(descriptor)
    }
}

fn parse_method_descriptor(descriptor: &str) -> Result<(Vec<String>, String), ClassParseError> {
    let mut parser = DescriptorParser::new(descriptor);
    parser.expect(b'(')?;
    let mut parameters = Vec::new();
    while !parser.peek(b')')? {
        parameters.push(parser.parse_type()?);
    }
    parser.expect(b')')?;
    let return_type = if parser.peek(b'V')? {
        parser.pos += 1;
        "void".to_string()
    } else {
        parser.parse_type()?
    };

    if parser.remaining() != 0 {
        return Err(ClassParseError::InvalidDescriptor(descriptor.to_string()));
    }
    Ok((parameters, return_type))
}

/// Convert a field signature to a Java type, keeping type arguments.
///
/// Type variables resolve to `java.lang.Object`; wildcards keep their bound.
fn signature_to_java(signature: &str) -> Result<String, ClassParseError> {
    let mut parser = DescriptorParser::new(signature);
    let ty = parser.parse_signature_type()?;
    if parser.remaining() != 0 {
        return Err(ClassParseError::InvalidDescriptor(signature.to_string()));
    }
    Ok(ty)
}

struct DescriptorParser<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> DescriptorParser<'a> {
    fn new(descriptor: &'a str) -> Self {
        Self {
            bytes: descriptor.as_bytes(),
            pos: 0,
        }
    }

    fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.pos)
    }

    fn current(&self) -> Result<u8, ClassParseError> {
        self.bytes
            .get(self.pos)
            .copied()
            .ok_or_else(|| ClassParseError::InvalidDescriptor("unexpected end".into()))
    }

    fn peek(&self, ch: u8) -> Result<bool, ClassParseError> {
        Ok(self.current()? == ch)
    }

    fn expect(&mut self, ch: u8) -> Result<(), ClassParseError> {
        if self.current()? != ch {
            return Err(ClassParseError::InvalidDescriptor(format!(
                "expected '{}' in descriptor",
                ch as char
            )));
        }
        self.pos += 1;
        Ok(())
    }

    fn primitive(tag: u8) -> Option<&'static str> {
        Some(match tag {
            b'B' => "byte",
            b'C' => "char",
            b'D' => "double",
            b'F' => "float",
            b'I' => "int",
            b'J' => "long",
            b'S' => "short",
            b'Z' => "boolean",
            _ => return None,
        })
    }

    fn parse_type(&mut self) -> Result<String, ClassParseError> {
        let tag = self.current()?;
        if let Some(primitive) = Self::primitive(tag) {
            self.pos += 1;
            return Ok(primitive.to_string());
        }
        match tag {
            b'L' => {
                self.pos += 1;
                let name = self.take_until(|b| b == b';')?;
                self.pos += 1;
                Ok(name.replace('/', "."))
            }
            b'[' => {
                self.pos += 1;
                Ok(format!("{}[]", self.parse_type()?))
            }
            other => Err(ClassParseError::InvalidDescriptor(format!(
                "unexpected descriptor tag '{}'",
                other as char
            ))),
        }
    }

    fn parse_signature_type(&mut self) -> Result<String, ClassParseError> {
        let tag = self.current()?;
        if let Some(primitive) = Self::primitive(tag) {
            self.pos += 1;
            return Ok(primitive.to_string());
        }
        match tag {
            b'L' => {
                self.pos += 1;
                let mut name = self.take_until(|b| b == b';' || b == b'<')?.replace('/', ".");
                if self.peek(b'<')? {
                    self.pos += 1;
                    let mut args = Vec::new();
                    while !self.peek(b'>')? {
                        args.push(self.parse_type_argument()?);
                    }
                    self.pos += 1;
                    name = format!("{}<{}>", name, args.join(", "));
                }
                // Inner class suffixes of parameterized outers (`.Inner`) are appended as-is.
                while self.peek(b'.')? {
                    self.pos += 1;
                    let inner = self.take_until(|b| b == b';' || b == b'<' || b == b'.')?;
                    name = format!("{}${}", name, inner);
                    if self.peek(b'<')? {
                        self.pos += 1;
                        let mut args = Vec::new();
                        while !self.peek(b'>')? {
                            args.push(self.parse_type_argument()?);
                        }
                        self.pos += 1;
                        name = format!("{}<{}>", name, args.join(", "));
                    }
                }
                self.expect(b';')?;
                Ok(name)
            }
            b'T' => {
                self.pos += 1;
                self.take_until(|b| b == b';')?;
                self.pos += 1;
                Ok("java.lang.Object".to_string())
            }
            b'[' => {
                self.pos += 1;
                Ok(format!("{}[]", self.parse_signature_type()?))
            }
            other => Err(ClassParseError::InvalidDescriptor(format!(
                "unexpected signature tag '{}'",
                other as char
            ))),
        }
    }

    fn parse_type_argument(&mut self) -> Result<String, ClassParseError> {
        match self.current()? {
            b'*' => {
                self.pos += 1;
                Ok("?".to_string())
            }
            b'+' => {
                self.pos += 1;
                Ok(format!("? extends {}", self.parse_signature_type()?))
            }
            b'-' => {
                self.pos += 1;
                Ok(format!("? super {}", self.parse_signature_type()?))
            }
            _ => self.parse_signature_type(),
        }
    }

    fn take_until(&mut self, stop: impl Fn(u8) -> bool) -> Result<&'a str, ClassParseError> {
        let start = self.pos;
        while self.pos < self.bytes.len() && !stop(self.bytes[self.pos]) {
            self.pos += 1;
        }
        if self.pos >= self.bytes.len() {
            return Err(ClassParseError::InvalidDescriptor(
                "unterminated reference descriptor".into(),
            ));
        }
        let bytes = self.bytes;
        std::str::from_utf8(&bytes[start..self.pos])
            .map_err(|e| ClassParseError::InvalidDescriptor(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_to_java() {
        assert_eq!(descriptor_to_java("I").unwrap(), "int");
        assert_eq!(
            descriptor_to_java("Ljava/lang/String;").unwrap(),
            "java.lang.String"
        );
        assert_eq!(descriptor_to_java("[[J").unwrap(), "long[][]");
        assert_eq!(
            descriptor_to_java("Lcom/acme/Outer$Inner;").unwrap(),
            "com.acme.Outer$Inner"
        );
        assert!(descriptor_to_java("Q").is_err());
        assert!(descriptor_to_java("II").is_err());
    }

    #[test]
    fn test_method_descriptor() {
        let (params, ret) = parse_method_descriptor("(Ljava/lang/String;Z)V").unwrap();
        assert_eq!(params, vec!["java.lang.String", "boolean"]);
        assert_eq!(ret, "void");

        let (params, ret) = parse_method_descriptor("()[I").unwrap();
        assert!(params.is_empty());
        assert_eq!(ret, "int[]");
    }

    #[test]
    fn test_signature_to_java() {
        assert_eq!(
            signature_to_java("Ljava/util/List<Ljava/lang/String;>;").unwrap(),
            "java.util.List<java.lang.String>"
        );
        assert_eq!(
            signature_to_java("Ljava/util/Map<Ljava/lang/String;+Ljava/lang/Number;>;").unwrap(),
            "java.util.Map<java.lang.String, ? extends java.lang.Number>"
        );
        assert_eq!(
            signature_to_java("Ljava/util/List<*>;").unwrap(),
            "java.util.List<?>"
        );
        assert_eq!(signature_to_java("TT;").unwrap(), "java.lang.Object");
    }

    #[test]
    fn test_rejects_bad_magic() {
        let err = parse_class(&[0, 0, 0, 0]).unwrap_err();
        assert!(matches!(err, ClassParseError::InvalidMagic));
    }

    #[test]
    fn test_truncated_input() {
        let err = parse_class(&[0xCA, 0xFE]).unwrap_err();
        assert!(matches!(err, ClassParseError::UnexpectedEof));
    }
}
