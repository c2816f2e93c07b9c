//! OSGi metatype model and metadata generation.
//!
//! The `metatype` crate turns a declarative description of a configuration
//! type (its attributes with descriptions, bounds, defaults and options)
//! into the metatype XML document, and exposes the collected attribute
//! model that `metatype-codegen` projects into a component stub.
//!
//! # Entry Point
//!
//! ```
//! use metatype::{collect, AttributeDeclaration, ConfigurationType, ValueType};
//!
//! let config = ConfigurationType::new("my.app", "MyApp").with_attribute(
//!     AttributeDeclaration::new("timeoutSeconds", ValueType::scalar("int")).with_defaults(["30"]),
//! );
//! let collected = collect(&config);
//! assert_eq!(collected.attributes[0].id, "timeoutSeconds");
//! ```
//!
//! # Serialization
//!
//! ```
//! # use metatype::{collect, ConfigurationType};
//! use metatype::serializer::xml::{to_xml, MetaTypeDocument};
//!
//! let config = ConfigurationType::new("my.app", "MyApp");
//! let doc = MetaTypeDocument::build(&config, &collect(&config));
//! let xml = to_xml(&doc).unwrap();
//! assert!(xml.contains("<Object ocdref=\"my.app\"/>"));
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod collect;
pub mod error;
pub mod ident;
pub mod model;
pub mod serializer;
pub mod types;

pub use collect::{collect, CollectedConfiguration};
pub use error::{ConfigurationError, RenderError, ValueTypeError};
pub use model::{
    AttributeDeclaration, AttributeType, ConfigurationType, OptionEntry, PrefixField,
    ResolvedAttribute, ValueType,
};
