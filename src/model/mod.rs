//! In-memory presentation model.
//!
//! An owned tree: [`Presentation`] → [`Slide`] → [`Shape`] → text and styles.
//! Every node that can be referenced from another part carries a `resolved`
//! slot. The assembler fills those slots during indexing; the format writers
//! only read them.

pub mod chart;
pub mod presentation;
pub mod shape;
pub mod style;
pub mod text;

pub use chart::{Chart, ChartSeries, ChartType};
pub use presentation::{DocumentProperties, Presentation, Slide, SlideRefs, SlideSize};
pub use shape::{Frame, Geometry, MediaSource, Shape, ShapeKind, ShapeRefs};
pub use style::{
    Alignment, Border, Bullet, BulletKind, Color, Fill, Font, GraphicStyle, LineStyle,
    NumberScheme, ParagraphStyle, Underline,
};
pub use text::{Hyperlink, HyperlinkTarget, Paragraph, ParagraphRefs, RunRefs, TextBody, TextRun};
