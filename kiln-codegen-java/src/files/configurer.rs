use std::{collections::HashSet, path::PathBuf};

use kiln_codegen::{
    builder::CodeFragment,
    model::{ConfigurerOption, ConfigurerOptionSet, class_literal},
};
use kiln_core::{GENERATED_MARKER, GeneratedFile, OutputRoot};

use super::{quote, source_path};
use crate::{
    JavaFile,
    ast::{Case, JavaClass, Method, Switch},
};

const SUPPORT_CLASS: &str = "org.apache.camel.support.component.PropertyConfigurerSupport";
const SELECTOR: &str = "ignoreCase ? name.toLowerCase() : name";

/// `<Target>Configurer.java`: sets and reads the options of a class by
/// name without reflection.
pub struct PropertyConfigurer<'a> {
    set: &'a ConfigurerOptionSet,
}

impl<'a> PropertyConfigurer<'a> {
    pub fn new(set: &'a ConfigurerOptionSet) -> Self {
        Self { set }
    }

    /// One case per option; a lower-case alias precedes names with
    /// upper-case letters unless it would clash with another label.
    fn cases(&self, statement: impl Fn(&ConfigurerOption) -> String) -> Vec<Case> {
        let mut seen: HashSet<String> = self.set.options.iter().map(|o| o.name.clone()).collect();
        self.set
            .options
            .iter()
            .map(|option| {
                let case = Case::new(&option.name, statement(option));
                let lower = option.name.to_lowercase();
                if seen.insert(lower.clone()) {
                    case.alias(lower)
                } else {
                    case
                }
            })
            .collect()
    }

    fn declaration(&self) -> String {
        let mut interfaces = vec!["GeneratedPropertyConfigurer"];
        interfaces.push(if self.set.extended {
            "ExtendedPropertyConfigurerGetter"
        } else {
            "PropertyConfigurerGetter"
        });
        if self.set.bootstrap {
            interfaces.push("BootstrapCloseable");
        }
        format!(
            "public class {} extends {} implements {}",
            self.set.class_name(),
            SUPPORT_CLASS,
            interfaces.join(", ")
        )
    }

    fn all_options(&self) -> Vec<CodeFragment> {
        let mut body = vec![CodeFragment::line(
            "Map<String, Object> map = new CaseInsensitiveMap();",
        )];
        body.extend(self.set.options.iter().map(|option| {
            CodeFragment::Line(format!(
                "map.put({}, {});",
                quote(&kiln_core::capitalize(&option.name)),
                class_literal(&option.java_type)
            ))
        }));
        body.push(CodeFragment::line("ALL_OPTIONS = map;"));
        vec![
            CodeFragment::line("private static final Map<String, Object> ALL_OPTIONS;"),
            CodeFragment::block("static {", body),
        ]
    }
}

impl GeneratedFile for PropertyConfigurer<'_> {
    fn root(&self) -> OutputRoot {
        OutputRoot::Java
    }

    fn path(&self) -> PathBuf {
        source_path(self.set.package(), &self.set.class_name())
    }

    fn render(&self) -> String {
        let target = self.set.target_source_name();
        let cast = format!("{0} target = ({0}) obj;", target);

        let configure = Method::overriding(
            "public boolean configure(CamelContext camelContext, Object obj, String name, Object value, boolean ignoreCase)",
        )
        .line(&cast)
        .push(&Switch::new(SELECTOR, "return false;").cases(self.cases(|o| {
            format!(
                "target.{}(property(camelContext, {}, value)); return true;",
                o.setter,
                class_literal(&o.java_type)
            )
        })));

        let option_type = Method::overriding("public Class<?> getOptionType(String name, boolean ignoreCase)")
            .push(&Switch::new(SELECTOR, "return null;").cases(
                self.cases(|o| format!("return {};", class_literal(&o.java_type))),
            ));

        let option_value = Method::overriding(
            "public Object getOptionValue(Object obj, String name, boolean ignoreCase)",
        )
        .line(&cast)
        .push(&Switch::new(SELECTOR, "return null;").cases(
            self.cases(|o| format!("return target.{}();", o.getter)),
        ));

        let mut class = JavaClass::new(self.declaration())
            .javadoc(GENERATED_MARKER)
            .annotation("SuppressWarnings(\"unchecked\")");
        if self.set.extended {
            class = class.member(&self.all_options());
        }
        class = class
            .member(&configure)
            .member(&option_type)
            .member(&option_value);
        if self.set.extended {
            class = class.member(
                &Method::overriding("public Map<String, Object> getAllOptions(Object target)")
                    .line("return ALL_OPTIONS;"),
            );
        }
        if self.set.bootstrap {
            class = class.member(&Method::overriding("public void close()"));
        }

        let mut imports = vec![
            "org.apache.camel.CamelContext",
            "org.apache.camel.spi.GeneratedPropertyConfigurer",
            "org.apache.camel.spi.PropertyConfigurerGetter",
        ];
        if self.set.extended {
            imports.extend([
                "java.util.Map",
                "org.apache.camel.spi.ExtendedPropertyConfigurerGetter",
                "org.apache.camel.util.CaseInsensitiveMap",
            ]);
        }
        if self.set.bootstrap {
            imports.push("org.apache.camel.spi.BootstrapCloseable");
        }

        JavaFile::new(self.set.package())
            .imports(imports)
            .add(&class)
            .render()
    }
}
