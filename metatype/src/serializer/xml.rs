//! Metatype XML serializer.
//!
//! [`MetaTypeDocument::build`] projects a collected configuration onto the
//! `MetaData` / `OCD` / `AD` / `Designate` structure, applying the omission
//! policy for optional `AD` attributes. [`to_xml`] renders it as indented
//! XML.

use std::borrow::Cow;

use quick_xml::escape::escape;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::name::QName;
use quick_xml::Writer;

use crate::collect::CollectedConfiguration;
use crate::error::RenderError;
use crate::model::{AttributeType, ConfigurationType, OptionEntry, ResolvedAttribute};

/// Namespace of the metatype 1.4 schema.
pub const METATYPE_NAMESPACE: &str = "http://www.osgi.org/xmlns/metatype/v1.4.0";

const ROOT: &str = "metatype:MetaData";

/// An `AD` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDefinition {
    /// `id`, always present.
    pub id: String,
    /// `name`, when non-blank.
    pub name: Option<String>,
    /// `description`, when non-blank.
    pub description: Option<String>,
    /// `default`, the default values joined with `", "`.
    pub default: Option<String>,
    /// `min`, when non-blank.
    pub min: Option<String>,
    /// `max`, when non-blank.
    pub max: Option<String>,
    /// `required`; only `false` is written.
    pub required: bool,
    /// `cardinality`, the magnitude of a non-zero declaration.
    pub cardinality: Option<u32>,
    /// `type`.
    pub type_: AttributeType,
    /// `Option` children.
    pub options: Vec<OptionEntry>,
}

impl AttributeDefinition {
    /// Projects a resolved attribute onto its `AD` element.
    #[must_use]
    pub fn from_resolved(attribute: &ResolvedAttribute) -> Self {
        let decl = &attribute.declaration;
        let default = if decl.default_values.is_empty() {
            None
        } else {
            non_blank(&decl.default_values.join(", "))
        };
        Self {
            id: attribute.id.clone(),
            name: non_blank(&decl.display_name),
            description: non_blank(&decl.description),
            default,
            min: non_blank(&decl.min),
            max: non_blank(&decl.max),
            required: decl.required,
            cardinality: match decl.cardinality {
                0 => None,
                n => Some(n.unsigned_abs()),
            },
            type_: attribute.effective_type,
            options: decl.options.clone(),
        }
    }

    /// The XML attributes of this element in output order.
    #[must_use]
    pub fn xml_attributes(&self) -> Vec<(&'static str, Cow<'_, str>)> {
        let mut attrs = vec![("id", Cow::Borrowed(self.id.as_str()))];
        let optional = [
            ("name", &self.name),
            ("description", &self.description),
            ("default", &self.default),
            ("min", &self.min),
            ("max", &self.max),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                attrs.push((key, Cow::Borrowed(value.as_str())));
            }
        }
        if !self.required {
            attrs.push(("required", Cow::Borrowed("false")));
        }
        if let Some(cardinality) = self.cardinality {
            attrs.push(("cardinality", Cow::Owned(cardinality.to_string())));
        }
        attrs.push(("type", Cow::Borrowed(self.type_.as_str())));
        attrs
    }
}

/// The `OCD` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectClassDefinition {
    /// `id`.
    pub id: String,
    /// `name`.
    pub name: String,
    /// `description`.
    pub description: String,
    /// `AD` children in declaration order.
    pub attributes: Vec<AttributeDefinition>,
}

/// The `Designate` element with its single `Object` child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Designate {
    /// `Designate@pid`.
    pub pid: String,
    /// `Object@ocdref`.
    pub ocdref: String,
}

/// A complete metatype document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaTypeDocument {
    /// The object class definition.
    pub ocd: ObjectClassDefinition,
    /// The designate binding the configuration PID to the OCD.
    pub designate: Designate,
}

impl MetaTypeDocument {
    /// Builds the document for a configuration type and its collected attributes.
    #[must_use]
    pub fn build(config: &ConfigurationType, collected: &CollectedConfiguration) -> Self {
        Self {
            ocd: ObjectClassDefinition {
                id: config.id.clone(),
                name: config.display_name.clone(),
                description: config.description.clone(),
                attributes: collected
                    .attributes
                    .iter()
                    .map(AttributeDefinition::from_resolved)
                    .collect(),
            },
            designate: Designate {
                pid: config.id.clone(),
                ocdref: config.id.clone(),
            },
        }
    }
}

/// File name of the metadata document for a configuration id.
///
/// Path separators in the id become `_`, so the name never leaves the
/// metadata directory.
#[must_use]
pub fn metadata_file_name(id: &str) -> String {
    let stem: String = id
        .to_lowercase()
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    format!("{stem}.xml")
}

/// Renders a metatype document as indented XML.
///
/// # Errors
///
/// Returns [`RenderError`] if the writer fails; writing to memory does not
/// fail in practice.
pub fn to_xml(doc: &MetaTypeDocument) -> Result<String, RenderError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);

    emit(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
    )?;

    let mut root = BytesStart::new(ROOT);
    root.push_attribute(attribute("xmlns:metatype", METATYPE_NAMESPACE));
    emit(&mut writer, Event::Start(root))?;

    let mut ocd = BytesStart::new("OCD");
    ocd.push_attribute(attribute("id", &doc.ocd.id));
    ocd.push_attribute(attribute("name", &doc.ocd.name));
    ocd.push_attribute(attribute("description", &doc.ocd.description));
    if doc.ocd.attributes.is_empty() {
        emit(&mut writer, Event::Empty(ocd))?;
    } else {
        emit(&mut writer, Event::Start(ocd))?;
        for ad in &doc.ocd.attributes {
            write_attribute_definition(&mut writer, ad)?;
        }
        emit(&mut writer, Event::End(BytesEnd::new("OCD")))?;
    }

    let mut designate = BytesStart::new("Designate");
    designate.push_attribute(attribute("pid", &doc.designate.pid));
    emit(&mut writer, Event::Start(designate))?;
    let mut object = BytesStart::new("Object");
    object.push_attribute(attribute("ocdref", &doc.designate.ocdref));
    emit(&mut writer, Event::Empty(object))?;
    emit(&mut writer, Event::End(BytesEnd::new("Designate")))?;

    emit(&mut writer, Event::End(BytesEnd::new(ROOT)))?;

    let mut xml = String::from_utf8(writer.into_inner())?;
    xml.push('\n');
    Ok(xml)
}

fn write_attribute_definition(
    writer: &mut Writer<Vec<u8>>,
    ad: &AttributeDefinition,
) -> Result<(), RenderError> {
    let mut start = BytesStart::new("AD");
    for (key, value) in ad.xml_attributes() {
        start.push_attribute(attribute(key, &value));
    }
    if ad.options.is_empty() {
        return emit(writer, Event::Empty(start));
    }
    emit(writer, Event::Start(start))?;
    for option in &ad.options {
        let mut opt = BytesStart::new("Option");
        opt.push_attribute(attribute("value", &option.value));
        opt.push_attribute(attribute("label", &option.label));
        emit(writer, Event::Empty(opt))?;
    }
    emit(writer, Event::End(BytesEnd::new("AD")))
}

/// An escaped attribute. Tab, line feed and carriage return become character
/// references so that readers do not normalize them to spaces.
fn attribute<'a>(key: &'a str, value: &str) -> Attribute<'a> {
    let mut escaped = String::with_capacity(value.len());
    for c in escape(value).chars() {
        match c {
            '\n' => escaped.push_str("&#10;"),
            '\r' => escaped.push_str("&#13;"),
            '\t' => escaped.push_str("&#9;"),
            c => escaped.push(c),
        }
    }
    Attribute {
        key: QName(key.as_bytes()),
        value: Cow::Owned(escaped.into_bytes()),
    }
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), RenderError> {
    writer
        .write_event(event)
        .map_err(|err| RenderError::Xml(err.to_string()))
}

fn non_blank(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_owned())
    }
}
