//! Shared naming utilities for extraction and rendering.

use std::cmp::Ordering;

/// Convert camelCase into dash format (e.g., "helloGreatWorld" -> "hello-great-world").
///
/// Underscores become dashes and runs of capitals are kept together, so
/// "URLEncoder" becomes "url-encoder".
pub fn camel_case_to_dash(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev: Option<char> = None;

    for (i, &c) in chars.iter().enumerate() {
        let next = chars.get(i + 1).copied();
        if c == '-' || c == '_' {
            result.push('-');
        } else if c.is_uppercase()
            && prev.is_some_and(|p| !p.is_uppercase() || next.is_some_and(char::is_lowercase))
        {
            if prev.is_some_and(|p| p != '-' && p != '_') {
                result.push('-');
            }
            result.extend(c.to_lowercase());
        } else {
            result.extend(c.to_lowercase());
        }
        prev = Some(c);
    }

    result
}

/// Convert dash format into camelCase (e.g., "hello-great-world" -> "helloGreatWorld").
pub fn dash_to_camel_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut upper_next = false;
    for c in s.chars() {
        if c == '-' {
            upper_next = !result.is_empty();
        } else if upper_next {
            result.extend(c.to_uppercase());
            upper_next = false;
        } else {
            result.push(c);
        }
    }
    result
}

/// Uppercase the first character (e.g., "hello" -> "Hello").
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().chain(chars).collect(),
    }
}

/// Lowercase the first character following JavaBeans rules.
///
/// A name starting with two capitals is left untouched ("URL" stays "URL").
pub fn decapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (None, _) => String::new(),
        (Some(a), Some(b)) if a.is_uppercase() && b.is_uppercase() => s.to_string(),
        (Some(a), _) => a.to_lowercase().chain(s.chars().skip(1)).collect(),
    }
}

/// Derive a display title from a dash or camelCase identifier.
///
/// A `:`-delimited suffix becomes a parenthesized qualifier:
/// "foo-bar:advanced" -> "Foo Bar (Advanced)".
pub fn to_title(name: &str) -> String {
    match name.split_once(':') {
        Some((main, qualifier)) if !qualifier.is_empty() => {
            let main = words_title(main);
            let qualifier = words_title(qualifier);
            if main.is_empty() {
                format!("({})", qualifier)
            } else {
                format!("{} ({})", main, qualifier)
            }
        }
        Some((main, _)) => words_title(main),
        None => words_title(name),
    }
}

fn words_title(s: &str) -> String {
    camel_case_to_dash(s)
        .split(['-', ' ', '.'])
        .filter(|w| !w.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Ordering used for every generated collection.
///
/// Names compare case-insensitively, ties fall back to the secondary key
/// (usually the class name) and finally to the exact name so the result is
/// total.
pub fn natural_order(name_a: &str, key_a: &str, name_b: &str, key_b: &str) -> Ordering {
    name_a
        .to_lowercase()
        .cmp(&name_b.to_lowercase())
        .then_with(|| key_a.cmp(key_b))
        .then_with(|| name_a.cmp(name_b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_to_dash() {
        assert_eq!(camel_case_to_dash("helloGreatWorld"), "hello-great-world");
        assert_eq!(camel_case_to_dash("fooBarBaz"), "foo-bar-baz");
        assert_eq!(camel_case_to_dash("URLEncoder"), "url-encoder");
        assert_eq!(camel_case_to_dash("aws2S3"), "aws2-s3");
        assert_eq!(camel_case_to_dash("foo_bar"), "foo-bar");
        assert_eq!(camel_case_to_dash("foo-Bar"), "foo-bar");
        assert_eq!(camel_case_to_dash(""), "");
    }

    #[test]
    fn test_dash_to_camel_case() {
        assert_eq!(dash_to_camel_case("hello-great-world"), "helloGreatWorld");
        assert_eq!(dash_to_camel_case("foo"), "foo");
        assert_eq!(dash_to_camel_case("-foo"), "foo");
        assert_eq!(dash_to_camel_case(""), "");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("hello"), "Hello");
        assert_eq!(capitalize("Hello"), "Hello");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_decapitalize() {
        assert_eq!(decapitalize("FooBar"), "fooBar");
        assert_eq!(decapitalize("URL"), "URL");
        assert_eq!(decapitalize("X"), "x");
        assert_eq!(decapitalize(""), "");
    }

    #[test]
    fn test_to_title() {
        assert_eq!(to_title("foo-bar"), "Foo Bar");
        assert_eq!(to_title("foo-bar:advanced"), "Foo Bar (Advanced)");
        assert_eq!(to_title("fooBarBaz"), "Foo Bar Baz");
        assert_eq!(
            to_title("aws2-s3:application-cloudevents"),
            "Aws2 S3 (Application Cloudevents)"
        );
        assert_eq!(to_title("route"), "Route");
        assert_eq!(to_title("foo:"), "Foo");
        assert_eq!(to_title(""), "");
    }

    #[test]
    fn test_natural_order() {
        let mut names = vec!["b", "A", "c"];
        names.sort_by(|a, b| natural_order(a, "", b, ""));
        assert_eq!(names, vec!["A", "b", "c"]);
    }

    #[test]
    fn test_natural_order_ties() {
        assert_eq!(
            natural_order("foo", "com.b.Foo", "Foo", "com.a.Foo"),
            Ordering::Greater
        );
        assert_eq!(natural_order("Foo", "x", "foo", "x"), Ordering::Less);
        assert_eq!(natural_order("foo", "x", "foo", "x"), Ordering::Equal);
    }
}
