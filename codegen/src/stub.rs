//! Component stub blocks: field declarations, the `activate` body, and
//! accessors. Each block is one line (or getter) per resolved attribute,
//! in declaration order.

use std::fmt::Write as FmtWrite;

use metatype::CollectedConfiguration;

use crate::emit::INDENT;
use crate::mapping::{field_name, getter_name, java_string, java_type_name};

/// One `private` field per attribute. String fields start out empty.
#[must_use]
pub fn field_declarations(collected: &CollectedConfiguration) -> String {
    collected
        .attributes
        .iter()
        .map(|attr| {
            let decl = &attr.declaration;
            let init = if decl.value_type.is_string() {
                " = \"\""
            } else {
                ""
            };
            format!(
                "{INDENT}private {} {}{init};",
                java_type_name(&decl.value_type),
                field_name(decl)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Assignments reading each field from the configuration map by `AD` id.
#[must_use]
pub fn activate_block(collected: &CollectedConfiguration) -> String {
    let indent = INDENT.repeat(3);
    collected
        .attributes
        .iter()
        .map(|attr| {
            let decl = &attr.declaration;
            format!(
                "{indent}this.{} = ({}) configuration.getOrDefault({}, null);",
                field_name(decl),
                java_type_name(&decl.value_type),
                java_string(&attr.id)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One getter per field; each is preceded by an empty line.
#[must_use]
pub fn getters(collected: &CollectedConfiguration) -> String {
    let mut out = String::new();
    for (i, attr) in collected.attributes.iter().enumerate() {
        let decl = &attr.declaration;
        let field = field_name(decl);
        if i > 0 {
            out.push('\n');
        }
        let _ = write!(
            out,
            "\n{INDENT}public {} {}() {{\n{INDENT}{INDENT}return {field};\n{INDENT}}}",
            java_type_name(&decl.value_type),
            getter_name(&field)
        );
    }
    out
}
