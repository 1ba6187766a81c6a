use serde::{Serialize, Serializer};

/// Where an option is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    /// Part of the endpoint URI path.
    Path,
    /// URI query parameter.
    Parameter,
    /// Bean property.
    Property,
}

/// Default value of an option, typed by the option's Java type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultValue {
    /// Rendered quoted.
    Text(String),
    /// Boolean or numeric value, rendered bare.
    Literal(String),
}

impl DefaultValue {
    /// Type `raw` by `java_type`: booleans and numbers become literals
    /// when the text parses as one, everything else is text.
    pub fn typed(java_type: &str, raw: &str) -> Self {
        let literal = match json_type(java_type, false) {
            "boolean" => raw == "true" || raw == "false",
            "integer" => raw.parse::<i64>().is_ok(),
            "number" => raw.parse::<f64>().is_ok_and(f64::is_finite),
            _ => false,
        };
        if literal {
            DefaultValue::Literal(raw.to_string())
        } else {
            DefaultValue::Text(raw.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            DefaultValue::Text(s) | DefaultValue::Literal(s) => s,
        }
    }

    /// Java expression for the value as an instance of `java_type`.
    pub fn java_literal(&self, java_type: &str) -> String {
        match self {
            DefaultValue::Literal(s) => {
                let simple = java_type.trim().strip_prefix("java.lang.").unwrap_or(java_type.trim());
                match simple {
                    "long" | "Long" => format!("{}L", s),
                    "float" | "Float" => format!("{}F", s),
                    _ => s.clone(),
                }
            }
            DefaultValue::Text(s) => format!("\"{}\"", escape_java(s)),
        }
    }
}

impl Serialize for DefaultValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DefaultValue::Text(s) => serializer.serialize_str(s),
            DefaultValue::Literal(s) => {
                if let Ok(b) = s.parse::<bool>() {
                    serializer.serialize_bool(b)
                } else if let Ok(i) = s.parse::<i64>() {
                    serializer.serialize_i64(i)
                } else if let Ok(f) = s.parse::<f64>() {
                    serializer.serialize_f64(f)
                } else {
                    serializer.serialize_str(s)
                }
            }
        }
    }
}

fn escape_java(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

/// JSON schema type of a Java type.
pub fn json_type(java_type: &str, has_enums: bool) -> &'static str {
    if has_enums {
        return "string";
    }
    let erased = java_type.split('<').next().unwrap_or(java_type).trim();
    if erased.ends_with("[]") {
        return "array";
    }
    let simple = erased.strip_prefix("java.lang.").unwrap_or(erased);
    match simple {
        "boolean" | "Boolean" => "boolean",
        "byte" | "short" | "int" | "long" | "Byte" | "Short" | "Integer" | "Long" => "integer",
        "float" | "double" | "Float" | "Double" => "number",
        "char" | "Character" | "String" => "string",
        "java.time.Duration" => "duration",
        "java.util.List" | "java.util.Set" | "java.util.Collection" => "array",
        _ => "object",
    }
}

/// One configurable option of an endpoint or bean.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionModel {
    pub name: String,
    pub kind: OptionKind,
    pub display_name: String,
    pub group: String,
    pub label: Option<String>,
    pub required: bool,
    pub java_type: String,
    pub enums: Vec<String>,
    pub deprecated: bool,
    pub secret: bool,
    pub default_value: Option<DefaultValue>,
    pub description: String,
}

impl OptionModel {
    pub fn new(name: impl Into<String>, kind: OptionKind, java_type: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            display_name: kiln_core::to_title(&name),
            name,
            kind,
            group: "common".to_string(),
            label: None,
            required: false,
            java_type: java_type.into(),
            enums: Vec::new(),
            deprecated: false,
            secret: false,
            default_value: None,
            description: String::new(),
        }
    }

    pub fn json_type(&self) -> &'static str {
        json_type(&self.java_type, !self.enums.is_empty())
    }
}
