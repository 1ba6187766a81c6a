//! `.properties` files.

use std::path::PathBuf;

use kiln_core::{GENERATED_MARKER, GeneratedFile, OutputRoot, RenderError};

/// Escape a property value the way `java.util.Properties` reads it back.
pub fn escape_property(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for (i, c) in value.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ' ' if i == 0 => out.push_str("\\ "),
            c => out.push(c),
        }
    }
    out
}

/// An ordered list of `key=value` pairs under a marker comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertiesFile {
    path: PathBuf,
    entries: Vec<(String, String)>,
}

impl PropertiesFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Vec::new(),
        }
    }

    pub fn entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.push((key.into(), value.into()));
        self
    }

    /// Add an entry only when `value` is present.
    pub fn optional(self, key: impl Into<String>, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.entry(key, v),
            None => self,
        }
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }
}

impl GeneratedFile for PropertiesFile {
    fn root(&self) -> OutputRoot {
        OutputRoot::Resources
    }

    fn path(&self) -> PathBuf {
        self.path.clone()
    }

    fn render(&self) -> String {
        let mut out = format!("# {}\n", GENERATED_MARKER);
        for (key, value) in &self.entries {
            out.push_str(key);
            out.push('=');
            out.push_str(&escape_property(value));
            out.push('\n');
        }
        out
    }
}

/// Aggregate listing of every name of one artifact kind, e.g.
/// `bean.properties` with `bean=Foo bar`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    path: PathBuf,
    key: String,
    names: Vec<String>,
    trailer: Vec<(String, String)>,
}

impl Listing {
    /// `names` must already be in natural order.
    pub fn new(path: impl Into<PathBuf>, key: impl Into<String>, names: Vec<String>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
            names,
            trailer: Vec::new(),
        }
    }

    /// Entry rendered after the listing line.
    pub fn entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.trailer.push((key.into(), value.into()));
        self
    }

    pub fn optional(self, key: impl Into<String>, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.entry(key, v),
            None => self,
        }
    }

    fn as_properties(&self) -> PropertiesFile {
        let file = PropertiesFile::new(&self.path).entry(&self.key, self.names.join(" "));
        self.trailer
            .iter()
            .fold(file, |file, (k, v)| file.entry(k, v))
    }
}

impl GeneratedFile for Listing {
    fn root(&self) -> OutputRoot {
        OutputRoot::Resources
    }

    fn path(&self) -> PathBuf {
        self.path.clone()
    }

    fn check(&self) -> Result<(), RenderError> {
        if self.names.is_empty() {
            return Err(RenderError::new(&self.path, "listing has no entries"));
        }
        if let Some(name) = self.names.iter().find(|n| n.trim().is_empty() || n.contains(' ')) {
            return Err(RenderError::new(
                &self.path,
                format!("listed name '{}' is empty or contains a space", name),
            ));
        }
        Ok(())
    }

    fn render(&self) -> String {
        self.as_properties().render()
    }
}

#[cfg(test)]
mod tests {
    use kiln_core::RenderedArtifact;

    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape_property("a\\b"), "a\\\\b");
        assert_eq!(escape_property("line\nnext"), "line\\nnext");
        assert_eq!(escape_property(" lead"), "\\ lead");
        assert_eq!(escape_property("mid space"), "mid space");
    }

    #[test]
    fn test_properties_render() {
        let file = PropertiesFile::new("x.properties")
            .entry("groupId", "org.acme")
            .optional("projectName", None)
            .optional("projectDescription", Some("Foo\nBar"));
        assert_eq!(
            file.render(),
            format!(
                "# {}\ngroupId=org.acme\nprojectDescription=Foo\\nBar\n",
                GENERATED_MARKER
            )
        );
    }

    #[test]
    fn test_listing_joins_names() {
        let listing = Listing::new("bean.properties", "bean", vec!["bar".into(), "Foo".into()])
            .entry("groupId", "org.acme");
        let artifact = RenderedArtifact::from_file(&listing).unwrap();
        assert_eq!(
            artifact.content,
            format!("# {}\nbean=bar Foo\ngroupId=org.acme\n", GENERATED_MARKER)
        );
    }

    #[test]
    fn test_empty_listing_is_render_error() {
        let listing = Listing::new("bean.properties", "bean", Vec::new());
        let err = RenderedArtifact::from_file(&listing).unwrap_err();
        assert_eq!(err.reason, "listing has no entries");
    }
}
