use serde::Serialize;

/// Render a value as two-space indented JSON followed by a newline.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use super::*;

    #[test]
    fn test_pretty_with_trailing_newline() {
        let mut map = IndexMap::new();
        map.insert("b", 1);
        map.insert("a", 2);
        assert_eq!(to_json(&map).unwrap(), "{\n  \"b\": 1,\n  \"a\": 2\n}\n");
    }
}
