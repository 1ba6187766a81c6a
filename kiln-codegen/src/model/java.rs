//! Java name helpers.

/// Source form of a binary class name (`a.Outer$Inner` -> `a.Outer.Inner`).
pub fn java_source_name(binary: &str) -> String {
    binary.replace('$', ".")
}

/// Package of a binary class name; empty for the default package.
pub fn package_of(binary: &str) -> &str {
    binary.rsplit_once('.').map(|(p, _)| p).unwrap_or("")
}

/// Simple name of a binary class name (`a.Outer$Inner` -> `Inner`).
pub fn simple_name(binary: &str) -> &str {
    let tail = binary.rsplit('.').next().unwrap_or(binary);
    tail.rsplit('$').next().unwrap_or(tail)
}

/// Class literal for a Java type, without type arguments:
/// `java.util.List<java.lang.String>` -> `java.util.List.class`.
pub fn class_literal(java_type: &str) -> String {
    let mut erased = String::with_capacity(java_type.len());
    let mut depth = 0usize;
    for c in java_type.chars() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            c if depth == 0 => erased.push(c),
            _ => {}
        }
    }
    format!("{}.class", java_source_name(erased.trim()))
}
