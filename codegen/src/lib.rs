//! Metatype code generator.
//!
//! Projects a collected configuration onto the `AppConfiguration` component
//! stub: a declarative-services component bound to the configuration PID
//! that copies every attribute out of the configuration map into a typed
//! field and exposes it through a getter.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod emit;
pub mod mapping;
pub mod stub;

use metatype::{CollectedConfiguration, ConfigurationType};

use emit::JavaFile;
use mapping::java_string;

/// Class name of the generated component in the caller's source tree.
pub const TARGET_CLASS_NAME: &str = "AppConfiguration";
/// Name the component is first generated under.
pub const TARGET_TMP_NAME: &str = "TmpAppConfiguration";
/// Source file extension.
pub const JAVA_EXT: &str = ".java";

/// Generates the component stub source for `config`.
///
/// An empty package yields a stub in the default package.
#[must_use]
pub fn generate_source(config: &ConfigurationType, collected: &CollectedConfiguration) -> String {
    let class = TARGET_CLASS_NAME;
    let mut f = JavaFile::new();

    if !config.package.is_empty() {
        f.line(&format!("package {};", config.package));
        f.blank();
    }
    f.line("import java.util.Map;");
    f.blank();
    f.line("import org.osgi.service.component.annotations.Activate;");
    f.line("import org.osgi.service.component.annotations.Component;");
    f.line("import org.osgi.service.component.annotations.Modified;");
    f.blank();
    f.line("/** Generated */");
    f.line(&format!(
        "@Component(immediate = true, configurationPid = {class}.CONFIG_PID, service = {{ {class}.class }})"
    ));
    f.line(&format!("public class {class} {{"));
    f.indented(
        1,
        &format!(
            "public static final String CONFIG_PID = {};",
            java_string(&config.id)
        ),
    );
    f.blank();
    f.line(&stub::field_declarations(collected));
    f.blank();
    f.indented(1, "@Activate");
    f.indented(1, "@Modified");
    f.indented(
        1,
        "protected void activate(final Map<String, Object> configuration) {",
    );
    f.indented(2, "if (configuration != null) {");
    f.line(&stub::activate_block(collected));
    f.indented(2, "}");
    f.indented(1, "}");
    f.line(&stub::getters(collected));
    f.blank();
    f.line("}");
    f.finish()
}
