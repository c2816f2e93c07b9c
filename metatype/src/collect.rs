//! Attribute collection.
//!
//! Walks a [`ConfigurationType`]'s declarations in order and resolves the
//! canonical id and effective type of each one. The result is immutable and
//! shared by the metadata serializer and the source stub generator.

use crate::error::ConfigurationError;
use crate::ident::{method_name_to_id, type_name_to_id};
use crate::model::{AttributeDeclaration, ConfigurationType, PrefixField, ResolvedAttribute};
use crate::types::effective_type;

/// The collected model of one configuration type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectedConfiguration {
    /// Resolved attributes in declaration order.
    pub attributes: Vec<ResolvedAttribute>,
    /// Exactly one attribute, named `value` in any case.
    pub single_element: bool,
    /// Prefix applied to every attribute id (empty when absent or malformed).
    pub prefix: String,
    /// Non-fatal problems found while collecting.
    pub diagnostics: Vec<ConfigurationError>,
}

/// Returns true when the declarations form a single-element configuration.
#[must_use]
pub fn is_single_element(attributes: &[AttributeDeclaration]) -> bool {
    match attributes {
        [only] => only.name.eq_ignore_ascii_case("value"),
        _ => false,
    }
}

/// Collects and resolves the attributes of `config`.
///
/// Duplicate ids are not detected; each declaration yields its own record.
#[must_use]
pub fn collect(config: &ConfigurationType) -> CollectedConfiguration {
    let mut diagnostics = Vec::new();
    let prefix = match &config.prefix {
        Some(PrefixField::Constant(value)) => value.clone(),
        Some(PrefixField::NonConstant { expression }) => {
            let err = ConfigurationError::NonConstantPrefix {
                type_name: config.name.clone(),
                expression: expression.clone(),
            };
            tracing::warn!(configuration = %config.id, "{err}");
            diagnostics.push(err);
            String::new()
        }
        None => String::new(),
    };

    let single_element = is_single_element(&config.attributes);
    let attributes = config
        .attributes
        .iter()
        .map(|declaration| {
            let local = if single_element {
                type_name_to_id(&config.name)
            } else {
                method_name_to_id(&declaration.name)
            };
            ResolvedAttribute {
                declaration: declaration.clone(),
                id: format!("{prefix}{local}"),
                effective_type: effective_type(declaration),
            }
        })
        .collect();

    CollectedConfiguration {
        attributes,
        single_element,
        prefix,
        diagnostics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AttributeType, ValueType};

    fn solr_config() -> ConfigurationType {
        ConfigurationType::new("ethz.solr", "SolrConfiguration")
            .with_attribute(AttributeDeclaration::new(
                "ethz_id_knowhow_config_solr",
                ValueType::string(),
            ))
            .with_attribute(AttributeDeclaration::new("max$_$rows", ValueType::scalar("int")))
    }

    #[test]
    fn resolves_ids_and_types_in_order() {
        let collected = collect(&solr_config());
        assert!(!collected.single_element);
        let ids: Vec<&str> = collected.attributes.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["ethz.id.knowhow.config.solr", "max-rows"]);
        assert_eq!(collected.attributes[0].effective_type, AttributeType::String);
        assert_eq!(collected.attributes[1].effective_type, AttributeType::Integer);
        assert!(collected.diagnostics.is_empty());
    }

    #[test]
    fn constant_prefix_is_prepended() {
        let config = solr_config().with_prefix(PrefixField::Constant("acme.".to_owned()));
        let collected = collect(&config);
        assert_eq!(collected.prefix, "acme.");
        assert!(collected.attributes.iter().any(|a| a.id == "acme.max-rows"));
    }

    #[test]
    fn non_constant_prefix_degrades_to_empty() {
        let config = solr_config().with_prefix(PrefixField::NonConstant {
            expression: "System.getProperty(\"p\")".to_owned(),
        });
        let collected = collect(&config);
        assert_eq!(collected.prefix, "");
        assert_eq!(collected.diagnostics.len(), 1);
        assert!(collected.attributes.iter().any(|a| a.id == "max-rows"));
    }

    #[test]
    fn single_value_attribute_uses_type_name() {
        for name in ["value", "Value", "VALUE"] {
            let config = ConfigurationType::new("my.vpn", "MyVPnConfiguration")
                .with_prefix(PrefixField::Constant("x.".to_owned()))
                .with_attribute(AttributeDeclaration::new(name, ValueType::scalar("int")));
            let collected = collect(&config);
            assert!(collected.single_element);
            assert_eq!(collected.attributes[0].id, "x.my.vpn.configuration");
        }
    }

    #[test]
    fn value_among_others_is_not_single_element() {
        let config = ConfigurationType::new("cfg", "Cfg")
            .with_attribute(AttributeDeclaration::new("value", ValueType::string()))
            .with_attribute(AttributeDeclaration::new("other", ValueType::string()));
        let collected = collect(&config);
        assert!(!collected.single_element);
        assert_eq!(collected.attributes[0].id, "value");
    }

    #[test]
    fn duplicate_ids_are_kept() {
        let config = ConfigurationType::new("cfg", "Cfg")
            .with_attribute(AttributeDeclaration::new("a_b", ValueType::string()))
            .with_attribute(AttributeDeclaration::new("a$b", ValueType::string()))
            .with_attribute(AttributeDeclaration::new("ab", ValueType::string()));
        let collected = collect(&config);
        let ids: Vec<&str> = collected.attributes.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["a.b", "ab", "ab"]);
    }

    #[test]
    fn collection_leaves_input_untouched() {
        let config = solr_config();
        let before = config.clone();
        let first = collect(&config);
        let second = collect(&config);
        assert_eq!(config, before);
        assert_eq!(first, second);
    }
}
