//! Deckpack - deterministic package assembly for presentation documents
//!
//! Deckpack turns an in-memory presentation model into a complete package:
//! a PresentationML `.pptx` or an OpenDocument `.odp` ZIP container. It
//! resolves every identity before writing any markup. Styles are
//! deduplicated by content, binary resources are stored once no matter how
//! many shapes use them, and every cross-part reference resolves to exactly
//! one entry of its owner's manifest.
//!
//! # Features
//!
//! - **Content-keyed styles**: fonts, paragraph styles, bullets, fills and
//!   backgrounds are interned per family and referenced by stable ids
//! - **Resource index**: pictures and charts are registered once per content
//!   key, with collision-free archive names
//! - **Relationship allocation**: `rIdN` ids per owning part, rendered as
//!   `.rels` parts for PPTX and as hrefs for ODP
//! - **Deterministic output**: fixed entry order and timestamps, so the same
//!   model always produces the same bytes
//!
//! # Example
//!
//! ```no_run
//! use deckpack::model::{
//!     Color, Fill, Font, Frame, Geometry, GraphicStyle, Presentation, Shape, Slide, TextBody,
//! };
//! use deckpack::ooxml::Pptx;
//! use deckpack::package::{PackageAssembler, PackageOptions, ZipSink};
//!
//! # fn main() -> deckpack::Result<()> {
//! let mut presentation = Presentation::new().with_title("Quarterly review");
//! presentation.add_slide(Slide::new(vec![
//!     Shape::text_box(
//!         "Title",
//!         Frame::new(457_200, 274_638, 8_229_600, 1_143_000),
//!         TextBody::plain("Q3 results", Font::new("Calibri", 40.0).bold(true)),
//!     ),
//!     Shape::auto_shape(
//!         "Marker",
//!         Frame::new(457_200, 1_600_200, 914_400, 914_400),
//!         Geometry::Ellipse,
//!         GraphicStyle {
//!             fill: Fill::Solid(Color::rgb(0x44, 0x72, 0xC4)),
//!             border: None,
//!         },
//!     ),
//! ]));
//!
//! let options = PackageOptions::from_yaml_str("application: Reporting\n")?;
//! let mut assembler = PackageAssembler::new(Pptx::new()).with_options(options);
//!
//! let mut sink = ZipSink::new(std::fs::File::create("review.pptx")?);
//! assembler.assemble(&mut presentation, &mut sink)?;
//! sink.finish()?;
//! # Ok(())
//! # }
//! ```

/// Errors, XML helpers and unit conversions shared by every module
pub mod common;

/// Picture format detection and payload providers
pub mod media;

/// The in-memory presentation model
pub mod model;

/// Format-neutral registries, the package assembler and container sinks
pub mod package;

/// Office Open XML (`.pptx`) writer
#[cfg(feature = "ooxml")]
pub mod ooxml;

/// OpenDocument (`.odp`) writer
#[cfg(feature = "odf")]
pub mod odf;

pub use common::{Error, Result};
