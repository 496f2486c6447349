//! OpenDocument (`.odp`) packages.
//!
//! ODF packages carry no relationship parts. Cross-part references are
//! written as hrefs into the markup, and every part is listed in
//! `META-INF/manifest.xml` together with its media type.

pub mod constants;
pub mod manifest;
pub mod odp;

pub use odp::Odp;
