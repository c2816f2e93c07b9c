//! Serializers for collected configurations.
//!
//! - **Metatype XML** ([`xml`]): the `OSGI-INF/metatype/<id>.xml` document
//!   read by the configuration admin tooling.

pub mod xml;
