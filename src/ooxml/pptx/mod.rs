//! PresentationML (`.pptx`) packages.
//!
//! ```no_run
//! use deckpack::model::{Font, Frame, Presentation, Shape, Slide, TextBody};
//! use deckpack::ooxml::Pptx;
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
//! let file = std::fs::File::create("hello.pptx")?;
//! let mut sink = ZipSink::new(file);
//! PackageAssembler::new(Pptx::new()).assemble(&mut presentation, &mut sink)?;
//! sink.finish()?;
//! # Ok(())
//! # }
//! ```

mod format;
pub mod template;
pub mod writer;

pub use format::Pptx;
