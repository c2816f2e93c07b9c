//! Core metatype model types.
//!
//! A [`ConfigurationType`] is the host's description of one configuration
//! interface: its object class metadata plus the ordered attribute
//! declarations it owns. The collector turns it into [`ResolvedAttribute`]s,
//! which both the metadata serializer and the source stub generator consume.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueTypeError;

/// Attribute type tag of an `AD` element.
///
/// The closed set of `AD` types understood by OSGi metatype consumers.
/// [`AttributeType::as_str`] yields the external tag written
/// to the `type` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttributeType {
    /// `String` (the default for undeclared types).
    #[default]
    String,
    /// `Long`.
    Long,
    /// `Integer`.
    Integer,
    /// `Short`.
    Short,
    /// `Character`.
    Character,
    /// `Byte`.
    Byte,
    /// `Double`.
    Double,
    /// `Float`.
    Float,
    /// `Boolean`.
    Boolean,
    /// `Password`: a string the UI should mask. Only reachable as an explicit override.
    Password,
}

impl AttributeType {
    /// Returns the tag written to the `type` attribute of an `AD` element.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AttributeType::String => "String",
            AttributeType::Long => "Long",
            AttributeType::Integer => "Integer",
            AttributeType::Short => "Short",
            AttributeType::Character => "Character",
            AttributeType::Byte => "Byte",
            AttributeType::Double => "Double",
            AttributeType::Float => "Float",
            AttributeType::Boolean => "Boolean",
            AttributeType::Password => "Password",
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully qualified name of the string type as the host spells it.
pub const STRING_TYPE: &str = "java.lang.String";

/// The declared value type of an attribute, as spelled by the host.
///
/// `name` is the element type (`int`, `java.lang.Integer`, `java.lang.String`,
/// `com.acme.Mode`); `array` marks a one-dimensional array of it. The textual
/// form appends `[]` for arrays: `"long[]"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct ValueType {
    /// Element type name without the array suffix.
    pub name: String,
    /// Whether the attribute holds an array of `name`.
    pub array: bool,
}

impl ValueType {
    /// A scalar value type.
    pub fn scalar(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            array: false,
        }
    }

    /// A one-dimensional array of `name`.
    pub fn array_of(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            array: true,
        }
    }

    /// The (scalar) string type.
    #[must_use]
    pub fn string() -> Self {
        Self::scalar(STRING_TYPE)
    }

    /// Returns true only for the scalar string type.
    ///
    /// `String[]` is not the string type: an array of strings goes through
    /// type resolution like any other non-string value.
    #[must_use]
    pub fn is_string(&self) -> bool {
        !self.array && (self.name == STRING_TYPE || self.name == "String")
    }

    /// The type name with the array suffix stripped.
    #[must_use]
    pub fn normalized(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.array {
            write!(f, "{}[]", self.name)
        } else {
            f.write_str(&self.name)
        }
    }
}

impl FromStr for ValueType {
    type Err = ValueTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (name, array) = match trimmed.strip_suffix("[]") {
            Some(element) => (element.trim_end(), true),
            None => (trimmed, false),
        };
        if name.is_empty() {
            return Err(ValueTypeError::Empty);
        }
        if name.ends_with("[]") {
            return Err(ValueTypeError::MultiDimensional(trimmed.to_owned()));
        }
        Ok(Self {
            name: name.to_owned(),
            array,
        })
    }
}

impl TryFrom<String> for ValueType {
    type Error = ValueTypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ValueType> for String {
    fn from(value: ValueType) -> Self {
        value.to_string()
    }
}

/// One `Option` child of an `AD` element.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionEntry {
    /// The option's value.
    pub value: String,
    /// Human-readable label.
    pub label: String,
}

impl OptionEntry {
    /// Creates an option entry.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[cfg(feature = "serde")]
fn default_required() -> bool {
    true
}

/// A single annotated attribute of a configuration type.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeDeclaration {
    /// Raw identifier as declared (method or property name).
    pub name: String,
    /// Declared value type.
    pub value_type: ValueType,
    /// Display name (`AD@name`).
    #[cfg_attr(feature = "serde", serde(default))]
    pub display_name: String,
    /// Description (`AD@description`).
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    /// Default values in declaration order.
    #[cfg_attr(feature = "serde", serde(default, rename = "default"))]
    pub default_values: Vec<String>,
    /// Lower bound, if any.
    #[cfg_attr(feature = "serde", serde(default))]
    pub min: String,
    /// Upper bound, if any.
    #[cfg_attr(feature = "serde", serde(default))]
    pub max: String,
    /// Whether a value must be supplied.
    #[cfg_attr(feature = "serde", serde(default = "default_required"))]
    pub required: bool,
    /// Cardinality; `0` means unspecified, only the magnitude is emitted.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cardinality: i32,
    /// Explicit type override (`AD@type` as declared).
    #[cfg_attr(feature = "serde", serde(default, rename = "type"))]
    pub type_override: AttributeType,
    /// Allowed options in declaration order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub options: Vec<OptionEntry>,
}

impl AttributeDeclaration {
    /// Creates a declaration with every annotation element at its default.
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
            display_name: String::new(),
            description: String::new(),
            default_values: Vec::new(),
            min: String::new(),
            max: String::new(),
            required: true,
            cardinality: 0,
            type_override: AttributeType::String,
            options: Vec::new(),
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the default values.
    #[must_use]
    pub fn with_defaults<I, S>(mut self, defaults: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_values = defaults.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the bounds.
    #[must_use]
    pub fn with_bounds(mut self, min: impl Into<String>, max: impl Into<String>) -> Self {
        self.min = min.into();
        self.max = max.into();
        self
    }

    /// Marks the attribute as optional (`required = false`).
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Sets the cardinality.
    #[must_use]
    pub fn with_cardinality(mut self, cardinality: i32) -> Self {
        self.cardinality = cardinality;
        self
    }

    /// Sets the explicit type override.
    #[must_use]
    pub fn with_type(mut self, type_override: AttributeType) -> Self {
        self.type_override = type_override;
        self
    }

    /// Appends an option.
    #[must_use]
    pub fn with_option(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        self.options.push(OptionEntry::new(value, label));
        self
    }
}

/// What the host found for the special `PREFIX_` field of a configuration type.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum PrefixField {
    /// A compile-time constant string; its value prefixes every attribute id.
    Constant(String),
    /// The field exists but is not a constant string.
    NonConstant {
        /// The field's initializer as written, for diagnostics.
        #[cfg_attr(feature = "serde", serde(default))]
        expression: String,
    },
}

/// A configuration type: object class metadata plus its attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConfigurationType {
    /// Object class id, also used as the configuration PID.
    pub id: String,
    /// Simple name of the declaring type (no package, no outer class).
    pub name: String,
    /// Display name (`OCD@name`).
    #[cfg_attr(feature = "serde", serde(default))]
    pub display_name: String,
    /// Description (`OCD@description`).
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    /// Package of the declaring type; the generated stub lands there.
    #[cfg_attr(feature = "serde", serde(default))]
    pub package: String,
    /// The `PREFIX_` field, when the type declares one.
    #[cfg_attr(feature = "serde", serde(default))]
    pub prefix: Option<PrefixField>,
    /// Attribute declarations in declaration order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub attributes: Vec<AttributeDeclaration>,
}

impl ConfigurationType {
    /// Creates a configuration type without attributes.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            display_name: String::new(),
            description: String::new(),
            package: String::new(),
            prefix: None,
            attributes: Vec::new(),
        }
    }

    /// Sets display name and description.
    #[must_use]
    pub fn with_labels(
        mut self,
        display_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.display_name = display_name.into();
        self.description = description.into();
        self
    }

    /// Sets the package.
    #[must_use]
    pub fn in_package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    /// Sets the `PREFIX_` field.
    #[must_use]
    pub fn with_prefix(mut self, prefix: PrefixField) -> Self {
        self.prefix = Some(prefix);
        self
    }

    /// Appends an attribute declaration.
    #[must_use]
    pub fn with_attribute(mut self, attribute: AttributeDeclaration) -> Self {
        self.attributes.push(attribute);
        self
    }
}

/// An attribute after id and type resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAttribute {
    /// The declaration this record was resolved from.
    pub declaration: AttributeDeclaration,
    /// Canonical `AD` id, prefix included.
    pub id: String,
    /// Type written to `AD@type`.
    pub effective_type: AttributeType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_array_value_types() {
        let ty: ValueType = "long[]".parse().unwrap();
        assert_eq!(ty, ValueType::array_of("long"));
        assert_eq!(ty.to_string(), "long[]");
        assert_eq!(ty.normalized(), "long");
    }

    #[test]
    fn rejects_nested_arrays() {
        assert_eq!(
            "int[][]".parse::<ValueType>(),
            Err(ValueTypeError::MultiDimensional("int[][]".to_owned()))
        );
        assert_eq!("  ".parse::<ValueType>(), Err(ValueTypeError::Empty));
    }

    #[test]
    fn string_array_is_not_the_string_type() {
        assert!(ValueType::string().is_string());
        assert!(ValueType::scalar("String").is_string());
        assert!(!ValueType::array_of(STRING_TYPE).is_string());
        assert!(!ValueType::scalar("int").is_string());
    }

    #[test]
    fn attribute_type_tags() {
        assert_eq!(AttributeType::default(), AttributeType::String);
        assert_eq!(AttributeType::Integer.to_string(), "Integer");
        assert_eq!(AttributeType::Character.as_str(), "Character");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_declaration_defaults() {
        let decl: AttributeDeclaration = serde_json::from_value(serde_json::json!({
            "name": "timeoutSeconds",
            "value_type": "int",
            "default": ["30"]
        }))
        .unwrap();
        assert_eq!(decl.value_type, ValueType::scalar("int"));
        assert!(decl.required);
        assert_eq!(decl.cardinality, 0);
        assert_eq!(decl.type_override, AttributeType::String);
        assert_eq!(decl.default_values, vec!["30".to_owned()]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_prefix_variants() {
        let constant: PrefixField =
            serde_json::from_value(serde_json::json!({ "constant": "acme." })).unwrap();
        assert_eq!(constant, PrefixField::Constant("acme.".to_owned()));

        let computed: PrefixField = serde_json::from_value(serde_json::json!({
            "non_constant": { "expression": "compute()" }
        }))
        .unwrap();
        assert_eq!(
            computed,
            PrefixField::NonConstant {
                expression: "compute()".to_owned()
            }
        );
    }
}
