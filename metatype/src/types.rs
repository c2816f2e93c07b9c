//! Value type → attribute type resolution.

use crate::model::{AttributeDeclaration, AttributeType};

/// Host type names with a fixed attribute type. Anything else is `String`.
const TYPE_TABLE: &[(&str, AttributeType)] = &[
    ("java.lang.String", AttributeType::String),
    ("String", AttributeType::String),
    ("long", AttributeType::Long),
    ("java.lang.Long", AttributeType::Long),
    ("int", AttributeType::Integer),
    ("java.lang.Integer", AttributeType::Integer),
    ("short", AttributeType::Short),
    ("java.lang.Short", AttributeType::Short),
    ("char", AttributeType::Character),
    ("java.lang.Character", AttributeType::Character),
    ("byte", AttributeType::Byte),
    ("java.lang.Byte", AttributeType::Byte),
    ("double", AttributeType::Double),
    ("java.lang.Double", AttributeType::Double),
    ("float", AttributeType::Float),
    ("java.lang.Float", AttributeType::Float),
    ("boolean", AttributeType::Boolean),
    ("java.lang.Boolean", AttributeType::Boolean),
];

/// Maps a normalized (array suffix stripped) type name to its attribute type.
#[must_use]
pub fn resolve(type_name: &str) -> AttributeType {
    match TYPE_TABLE.iter().find(|(name, _)| *name == type_name) {
        Some((_, resolved)) => *resolved,
        None => {
            tracing::debug!(type_name, "unmapped value type, using String");
            AttributeType::String
        }
    }
}

/// The type written to `AD@type` for a declaration.
///
/// An explicit override wins, except that the default `String` override on
/// a value that is not the string type defers to the value type itself.
#[must_use]
pub fn effective_type(declaration: &AttributeDeclaration) -> AttributeType {
    if declaration.type_override == AttributeType::String && !declaration.value_type.is_string() {
        resolve(declaration.value_type.normalized())
    } else {
        declaration.type_override
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ValueType;

    #[test]
    fn primitives_and_boxed_share_tags() {
        assert_eq!(resolve("int"), AttributeType::Integer);
        assert_eq!(resolve("java.lang.Integer"), AttributeType::Integer);
        assert_eq!(resolve("char"), AttributeType::Character);
        assert_eq!(resolve("java.lang.Boolean"), AttributeType::Boolean);
    }

    #[test]
    fn unknown_names_are_strings() {
        assert_eq!(resolve("com.acme.Mode"), AttributeType::String);
        assert_eq!(resolve(""), AttributeType::String);
    }

    #[test]
    fn default_override_defers_to_value_type() {
        let decl = AttributeDeclaration::new("timeout", ValueType::scalar("int"));
        assert_eq!(effective_type(&decl), AttributeType::Integer);

        let decl = AttributeDeclaration::new("ports", ValueType::array_of("long"));
        assert_eq!(effective_type(&decl), AttributeType::Long);

        let decl = AttributeDeclaration::new("hosts", ValueType::array_of("java.lang.String"));
        assert_eq!(effective_type(&decl), AttributeType::String);
    }

    #[test]
    fn explicit_override_wins() {
        let decl =
            AttributeDeclaration::new("secret", ValueType::string()).with_type(AttributeType::Password);
        assert_eq!(effective_type(&decl), AttributeType::Password);

        let decl = AttributeDeclaration::new("level", ValueType::scalar("int"))
            .with_type(AttributeType::Short);
        assert_eq!(effective_type(&decl), AttributeType::Short);
    }

    #[test]
    fn enum_valued_attribute_stays_string() {
        let decl = AttributeDeclaration::new("mode", ValueType::scalar("com.acme.Mode"));
        assert_eq!(effective_type(&decl), AttributeType::String);
    }
}
