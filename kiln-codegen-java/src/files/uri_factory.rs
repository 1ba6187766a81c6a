use std::path::PathBuf;

use kiln_codegen::{builder::CodeFragment, model::ComponentModel};
use kiln_core::{GENERATED_MARKER, GeneratedFile, OutputRoot, RenderError, natural_order};

use super::{quote, source_path};
use crate::{
    JavaFile,
    ast::{JavaClass, Method},
};

const SUPPORT_CLASS: &str = "org.apache.camel.support.component.EndpointUriFactorySupport";

/// `<Endpoint>UriFactory.java`: assembles endpoint URIs from property
/// maps for every scheme of an endpoint class.
pub struct EndpointUriFactory<'a> {
    model: &'a ComponentModel,
}

impl<'a> EndpointUriFactory<'a> {
    /// `model` is the descriptor of the endpoint's first scheme.
    pub fn new(model: &'a ComponentModel) -> Self {
        Self { model }
    }

    pub fn class_name(&self) -> String {
        format!("{}UriFactory", self.model.endpoint_simple_name())
    }

    /// Fully qualified name of the generated class.
    pub fn fqcn(&self) -> String {
        match self.model.endpoint_package() {
            "" => self.class_name(),
            package => format!("{}.{}", package, self.class_name()),
        }
    }

    /// Schemes the factory answers for.
    pub fn schemes(&self) -> Vec<&str> {
        if self.model.alternative_schemes.is_empty() {
            vec![self.model.scheme.as_str()]
        } else {
            self.model.alternative_schemes.iter().map(String::as_str).collect()
        }
    }

    fn name_set(field: &str, local: &str, mut names: Vec<&str>) -> Vec<CodeFragment> {
        if names.is_empty() {
            return vec![CodeFragment::Line(format!("{} = Collections.emptySet();", field))];
        }
        names.sort_by(|a, b| natural_order(a, "", b, ""));
        names.dedup();
        let mut lines = vec![CodeFragment::Line(format!(
            "Set<String> {} = new HashSet<>({});",
            local,
            names.len()
        ))];
        lines.extend(
            names
                .iter()
                .map(|name| CodeFragment::Line(format!("{}.add({});", local, quote(name)))),
        );
        lines.push(CodeFragment::Line(format!(
            "{} = Collections.unmodifiableSet({});",
            field, local
        )));
        lines
    }

    fn constants(&self) -> Vec<CodeFragment> {
        let mut init = Self::name_set("PROPERTY_NAMES", "props", self.model.option_names());
        init.extend(Self::name_set(
            "SECRET_PROPERTY_NAMES",
            "secretProps",
            self.model.secret_names(),
        ));
        vec![
            CodeFragment::Line(format!(
                "private static final String BASE = {};",
                quote(self.model.syntax_tail().unwrap_or_default())
            )),
            CodeFragment::Blank,
            CodeFragment::line("private static final Set<String> PROPERTY_NAMES;"),
            CodeFragment::line("private static final Set<String> SECRET_PROPERTY_NAMES;"),
            CodeFragment::block("static {", init),
        ]
    }

    fn build_uri(&self) -> Method {
        let mut method = Method::overriding(
            "public String buildUri(String scheme, Map<String, Object> properties, boolean encode) throws URISyntaxException",
        )
        .line("String syntax = scheme + BASE;")
        .line("String uri = syntax;")
        .blank()
        .line("Map<String, Object> copy = new HashMap<>(properties);")
        .blank();
        for option in self.model.path_options() {
            let default = option
                .default_value
                .as_ref()
                .map(|d| d.java_literal(&option.java_type))
                .unwrap_or_else(|| "null".to_string());
            method = method.line(format!(
                "uri = buildPathParameter(syntax, uri, {}, {}, {}, copy);",
                quote(&option.name),
                default,
                option.required
            ));
        }
        method
            .line("uri = buildQueryParameters(uri, copy, encode);")
            .line("return uri;")
    }
}

impl GeneratedFile for EndpointUriFactory<'_> {
    fn root(&self) -> OutputRoot {
        OutputRoot::Java
    }

    fn path(&self) -> PathBuf {
        source_path(self.model.endpoint_package(), &self.class_name())
    }

    fn check(&self) -> Result<(), RenderError> {
        if self.model.syntax_tail().is_none() {
            return Err(RenderError::new(
                self.path(),
                format!(
                    "syntax '{}' does not start with '{}:'",
                    self.model.syntax, self.model.scheme
                ),
            ));
        }
        Ok(())
    }

    fn render(&self) -> String {
        let enabled = self
            .schemes()
            .iter()
            .map(|scheme| format!("{}.equals(scheme)", quote(scheme)))
            .collect::<Vec<_>>()
            .join(" || ");

        let class = JavaClass::new(format!(
            "public class {} extends {} implements EndpointUriFactory",
            self.class_name(),
            SUPPORT_CLASS
        ))
        .javadoc(GENERATED_MARKER)
        .member(&self.constants())
        .member(
            &Method::overriding("public boolean isEnabled(String scheme)")
                .line(format!("return {};", enabled)),
        )
        .member(&self.build_uri())
        .member(
            &Method::overriding("public Set<String> propertyNames()").line("return PROPERTY_NAMES;"),
        )
        .member(
            &Method::overriding("public Set<String> secretPropertyNames()")
                .line("return SECRET_PROPERTY_NAMES;"),
        )
        .member(
            &Method::overriding("public boolean isLenientProperties()")
                .line(format!("return {};", self.model.lenient_properties)),
        );

        JavaFile::new(self.model.endpoint_package())
            .imports([
                "java.net.URISyntaxException",
                "java.util.Collections",
                "java.util.HashMap",
                "java.util.HashSet",
                "java.util.Map",
                "java.util.Set",
                "org.apache.camel.spi.EndpointUriFactory",
            ])
            .add(&class)
            .render()
    }
}
