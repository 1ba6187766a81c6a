//! Option models from field level records.

use kiln_index::{ElementKind, SymbolRecord, SymbolSource};

use super::markers;
use crate::model::{DefaultValue, OptionKind, OptionModel};

/// Member name an option is declared on; setters lose their `set` prefix.
pub(crate) fn member_name(record: &SymbolRecord) -> String {
    let name = record.element.name.as_deref().unwrap_or_default();
    match record.element.kind {
        ElementKind::Method => name
            .strip_prefix("set")
            .filter(|rest| !rest.is_empty())
            .map(kiln_core::decapitalize)
            .unwrap_or_else(|| name.to_string()),
        _ => name.to_string(),
    }
}

/// `Metadata` record on the same member, if any.
fn metadata_for<'a>(source: &'a dyn SymbolSource, record: &SymbolRecord) -> Option<&'a SymbolRecord> {
    source.lookup(markers::METADATA).iter().find(|m| {
        m.owner == record.owner
            && m.element.kind == record.element.kind
            && m.element.name == record.element.name
    })
}

/// Build an option from a member record, merging in its `Metadata`.
///
/// Attributes on the record itself win over the metadata record.
pub(crate) fn option_from_record(
    source: &dyn SymbolSource,
    record: &SymbolRecord,
    kind: OptionKind,
    prefix: &str,
) -> OptionModel {
    let metadata = if record.marker == markers::METADATA {
        None
    } else {
        metadata_for(source, record)
    };
    let text = |key: &str| {
        record
            .get_str(key)
            .or_else(|| metadata.and_then(|m| m.get_str(key)))
            .map(str::to_string)
    };
    let flag = |key: &str| {
        record.get_bool(key).unwrap_or(false)
            || metadata.and_then(|m| m.get_bool(key)).unwrap_or(false)
    };

    let base = text("name").unwrap_or_else(|| member_name(record));
    let name = format!("{}{}", prefix, base);
    let java_type = text("javaType")
        .or_else(|| record.element.java_type.clone())
        .unwrap_or_else(|| "java.lang.Object".to_string());

    let mut option = OptionModel::new(name, kind, java_type);
    if let Some(display_name) = text("displayName") {
        option.display_name = display_name;
    }
    option.label = text("label");
    option.required = flag("required");
    option.secret = flag("secret");
    option.deprecated = record.deprecated || metadata.is_some_and(|m| m.deprecated);
    option.description = text("description").unwrap_or_default();
    option.enums = {
        let enums = record.get_list("enums");
        if enums.is_empty() {
            metadata.map(|m| m.get_list("enums")).unwrap_or_default()
        } else {
            enums
        }
    };
    option.default_value = text("defaultValue").map(|raw| DefaultValue::typed(&option.java_type, &raw));
    option
}

#[cfg(test)]
mod tests {
    use kiln_index::SymbolIndex;

    use super::*;

    #[test]
    fn test_member_name() {
        let field = SymbolRecord::on_field("a.A", "timeout", "long", markers::URI_PARAM);
        assert_eq!(member_name(&field), "timeout");
        let method = SymbolRecord::on_method("a.A", "setBufferSize", "void", markers::URI_PARAM);
        assert_eq!(member_name(&method), "bufferSize");
    }

    #[test]
    fn test_metadata_merged() {
        let index = SymbolIndex::builder()
            .record(
                SymbolRecord::on_field("a.FooEndpoint", "password", "java.lang.String", markers::URI_PARAM)
                    .attr("label", "security"),
            )
            .record(
                SymbolRecord::on_field("a.FooEndpoint", "password", "java.lang.String", markers::METADATA)
                    .attr("secret", true)
                    .attr("label", "ignored")
                    .attr("description", "The password"),
            )
            .build();
        let record = &index.lookup(markers::URI_PARAM)[0];
        let option = option_from_record(&index, record, OptionKind::Parameter, "");
        assert_eq!(option.name, "password");
        assert_eq!(option.display_name, "Password");
        assert_eq!(option.label.as_deref(), Some("security"));
        assert!(option.secret);
        assert_eq!(option.description, "The password");
    }

    #[test]
    fn test_typed_default_and_prefix() {
        let index = SymbolIndex::builder()
            .record(
                SymbolRecord::on_field("a.Config", "delay", "long", markers::URI_PARAM)
                    .attr("defaultValue", "500")
                    .attr("enums", "100,500"),
            )
            .build();
        let record = &index.lookup(markers::URI_PARAM)[0];
        let option = option_from_record(&index, record, OptionKind::Parameter, "scheduler.");
        assert_eq!(option.name, "scheduler.delay");
        assert_eq!(option.default_value, Some(DefaultValue::Literal("500".into())));
        assert_eq!(option.enums, vec!["100", "500"]);
        assert_eq!(option.json_type(), "string");
    }
}
