use super::java::{java_source_name, package_of, simple_name};

/// One settable property of a configurer target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurerOption {
    pub name: String,
    pub java_type: String,
    pub setter: String,
    pub getter: String,
}

impl ConfigurerOption {
    /// Accessors follow JavaBeans naming; primitive booleans read through `is`.
    pub fn new(name: impl Into<String>, java_type: impl Into<String>) -> Self {
        let name = name.into();
        let java_type = java_type.into();
        let capitalized = kiln_core::capitalize(&name);
        let getter = if java_type == "boolean" {
            format!("is{}", capitalized)
        } else {
            format!("get{}", capitalized)
        };
        Self {
            setter: format!("set{}", capitalized),
            getter,
            name,
            java_type,
        }
    }
}

/// Options of one class a property configurer is generated for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurerOptionSet {
    /// Binary name of the configured class.
    pub target: String,
    /// Options in natural order of their names.
    pub options: Vec<ConfigurerOption>,
    /// Configurer is only used while bootstrapping.
    pub bootstrap: bool,
    /// Configurer exposes option metadata as well.
    pub extended: bool,
}

impl ConfigurerOptionSet {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            options: Vec::new(),
            bootstrap: false,
            extended: false,
        }
    }

    pub fn package(&self) -> &str {
        package_of(&self.target)
    }

    /// Simple name of the generated class (`FooConfigurer`).
    pub fn class_name(&self) -> String {
        format!("{}Configurer", simple_name(&self.target))
    }

    /// Fully qualified name of the generated class.
    pub fn configurer_fqcn(&self) -> String {
        match self.package() {
            "" => self.class_name(),
            package => format!("{}.{}", package, self.class_name()),
        }
    }

    /// Source name of the configured class.
    pub fn target_source_name(&self) -> String {
        java_source_name(&self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessor_names() {
        let flag = ConfigurerOption::new("bridgeErrorHandler", "boolean");
        assert_eq!(flag.setter, "setBridgeErrorHandler");
        assert_eq!(flag.getter, "isBridgeErrorHandler");
        let boxed = ConfigurerOption::new("enabled", "java.lang.Boolean");
        assert_eq!(boxed.getter, "getEnabled");
    }

    #[test]
    fn test_names() {
        let set = ConfigurerOptionSet::new("org.acme.FooComponent$Config");
        assert_eq!(set.package(), "org.acme");
        assert_eq!(set.class_name(), "ConfigConfigurer");
        assert_eq!(set.configurer_fqcn(), "org.acme.ConfigConfigurer");
        assert_eq!(set.target_source_name(), "org.acme.FooComponent.Config");
    }
}
