//! Declared value type → Java spelling, and field/accessor naming.

use metatype::ident::{capitalize, id_to_field_name};
use metatype::{AttributeDeclaration, ValueType};

/// The type a generated field is declared with.
///
/// The string type is written by its simple name; every other type keeps
/// the host's spelling, array suffix included.
#[must_use]
pub fn java_type_name(value_type: &ValueType) -> String {
    if value_type.is_string() {
        return "String".to_owned();
    }
    let name = value_type.to_string();
    if name.ends_with("String[]") {
        "String[]".to_owned()
    } else {
        name
    }
}

/// Name of the field holding `declaration`'s value.
#[must_use]
pub fn field_name(declaration: &AttributeDeclaration) -> String {
    id_to_field_name(&declaration.name)
}

/// Name of the accessor for `field`.
#[must_use]
pub fn getter_name(field: &str) -> String {
    format!("get{}", capitalize(field))
}

/// Quotes `value` as a Java string literal.
#[must_use]
pub fn java_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn java_type_names() {
        assert_eq!(java_type_name(&ValueType::string()), "String");
        assert_eq!(java_type_name(&ValueType::array_of("java.lang.String")), "String[]");
        assert_eq!(java_type_name(&ValueType::scalar("int")), "int");
        assert_eq!(java_type_name(&ValueType::array_of("long")), "long[]");
        assert_eq!(
            java_type_name(&ValueType::scalar("java.lang.Integer")),
            "java.lang.Integer"
        );
    }

    #[test]
    fn string_literals_are_escaped() {
        assert_eq!(java_string("my.app"), "\"my.app\"");
        assert_eq!(java_string("a\"b\\c"), "\"a\\\"b\\\\c\"");
    }

    #[test]
    fn accessor_names() {
        let decl = AttributeDeclaration::new("ethz_id_knowhow_config_solr", ValueType::string());
        let field = field_name(&decl);
        assert_eq!(field, "ethzIdKnowhowConfigSolr");
        assert_eq!(getter_name(&field), "getEthzIdKnowhowConfigSolr");
    }
}
