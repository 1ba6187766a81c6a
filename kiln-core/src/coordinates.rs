use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Artifact coordinates (`group:artifact:version`).
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Coordinates {
    pub group: String,
    pub artifact: String,
    pub version: String,
}

impl Coordinates {
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
            version: version.into(),
        }
    }

    /// A filesystem-safe key identifying the project (`group_artifact`).
    pub fn key(&self) -> String {
        format!("{}_{}", self.group, self.artifact)
    }
}

impl TryFrom<String> for Coordinates {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Coordinates> for String {
    fn from(c: Coordinates) -> Self {
        c.to_string()
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact, self.version)
    }
}

impl FromStr for Coordinates {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != 3 || parts.iter().any(|p| p.trim().is_empty()) {
            return Err(format!(
                "invalid coordinates '{}', expected 'group:artifact:version'",
                s
            ));
        }
        Ok(Self::new(parts[0].trim(), parts[1].trim(), parts[2].trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let c: Coordinates = "org.acme:acme-foo:1.2.3".parse().unwrap();
        assert_eq!(c.group, "org.acme");
        assert_eq!(c.artifact, "acme-foo");
        assert_eq!(c.version, "1.2.3");
    }

    #[test]
    fn test_parse_invalid() {
        assert!("org.acme:acme-foo".parse::<Coordinates>().is_err());
        assert!("a:b:c:d".parse::<Coordinates>().is_err());
        assert!("a::c".parse::<Coordinates>().is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        let c = Coordinates::new("g", "a", "1.0");
        assert_eq!(c.to_string(), "g:a:1.0");
    }

    #[test]
    fn test_key() {
        let c = Coordinates::new("org.acme", "acme-foo", "1.0");
        assert_eq!(c.key(), "org.acme_acme-foo");
    }
}
