//! Manifest parsing from files and strings.

use std::{path::Path, str::FromStr};

use super::Manifest;
use crate::{Error, Result, error::SourceContext};

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, "kiln.toml")
    }
}

impl Manifest {
    /// Parse a kiln.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_manifest(&content, &path.display().to_string())
    }

    /// Parse a kiln.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }
}

/// Parse a manifest from content with the given filename for error reporting.
pub fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let source_ctx = SourceContext::new(content, filename);
    let manifest: Manifest = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;
    validate_manifest(&manifest, &source_ctx)?;
    Ok(manifest)
}

fn validate_manifest(manifest: &Manifest, ctx: &SourceContext) -> Result<()> {
    let project = &manifest.project;
    for (key, value) in [
        ("group", &project.group),
        ("artifact", &project.artifact),
        ("version", &project.version),
    ] {
        if value.trim().is_empty() {
            return Err(ctx.validation_error(
                format!("project {} must not be empty", key),
                Some(key),
            ));
        }
        if value.contains(':') || value.contains(char::is_whitespace) {
            return Err(ctx.validation_error(
                format!("project {} '{}' must not contain ':' or whitespace", key, value),
                Some(value),
            ));
        }
    }

    let mut seen = std::collections::HashSet::new();
    for dependency in &manifest.build.dependencies {
        if !seen.insert(&dependency.path) {
            let path = dependency.path.display().to_string();
            return Err(ctx.validation_error(
                format!("dependency '{}' is listed twice", path),
                Some(&path),
            ));
        }
    }

    for (kind, goal) in manifest.goals.iter() {
        if let Some(marker) = &goal.marker {
            if !is_qualified_name(marker) {
                return Err(ctx.validation_error(
                    format!("marker '{}' of goal '{}' is not a qualified class name", marker, kind),
                    Some(marker),
                ));
            }
        }
        if !goal.classes.is_empty() && kind != "configurer" {
            return Err(ctx.misplaced_key_error(kind, "classes"));
        }
        if !goal.option_markers.is_empty() && kind != "component" && kind != "urifactory" {
            return Err(ctx.misplaced_key_error(kind, "option-markers"));
        }
        for class in goal.classes.iter().chain(&goal.option_markers) {
            if !is_qualified_name(class) {
                return Err(ctx.validation_error(
                    format!("'{}' is not a qualified class name", class),
                    Some(class),
                ));
            }
        }
    }

    Ok(())
}

/// `a.b.C` style name: dot separated Java identifiers, `$` allowed.
pub(crate) fn is_qualified_name(name: &str) -> bool {
    !name.is_empty()
        && name.split('.').all(|part| {
            let mut chars = part.chars();
            chars
                .next()
                .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
                && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        })
}
