//! OpenDocument Presentation (`.odp`) packages.
//!
//! ```no_run
//! use deckpack::model::{Font, Frame, Presentation, Shape, Slide, TextBody};
//! use deckpack::odf::Odp;
//! use deckpack::package::{PackageAssembler, ZipSink};
//!
//! # fn main() -> deckpack::Result<()> {
//! let mut presentation = Presentation::new().with_title("Hello");
//! presentation.add_slide(Slide::new(vec![Shape::text_box(
//!     "Title",
//!     Frame::new(914_400, 914_400, 7_315_200, 914_400),
//!     TextBody::plain("Hello, world", Font::default()),
//! )]));
//!
//! let file = std::fs::File::create("hello.odp")?;
//! let mut sink = ZipSink::new(file);
//! PackageAssembler::new(Odp::new()).assemble(&mut presentation, &mut sink)?;
//! sink.finish()?;
//! # Ok(())
//! # }
//! ```

pub mod chart;
pub mod content;
mod format;
pub mod meta;
pub mod style;

pub use format::Odp;
