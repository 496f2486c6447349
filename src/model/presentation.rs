//! The presentation root and its slides.
use std::collections::BTreeMap;

use crate::model::shape::{Shape, ShapeKind};
use crate::model::style::Fill;
use crate::package::format::Reference;
use crate::package::part::PartName;
use crate::package::style_registry::StyleId;

/// Slide dimensions in EMUs. Defaults to 16:9 at 13.333in x 7.5in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideSize {
    pub cx: i64,
    pub cy: i64,
}

impl Default for SlideSize {
    fn default() -> Self {
        Self {
            cx: 12_192_000,
            cy: 6_858_000,
        }
    }
}

impl SlideSize {
    /// Classic 4:3 size (10in x 7.5in).
    pub const STANDARD: SlideSize = SlideSize {
        cx: 9_144_000,
        cy: 6_858_000,
    };
}

/// Document metadata written to the core properties / meta part.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentProperties {
    pub title: Option<String>,
    pub subject: Option<String>,
    pub creator: Option<String>,
    pub keywords: Option<String>,
    pub description: Option<String>,
}

/// Ids stamped onto a slide during indexing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlideRefs {
    /// Part carrying the slide markup
    pub part: Option<PartName>,
    /// Reference from the presentation part to the slide
    pub presentation_ref: Option<Reference>,
    pub background_style: Option<StyleId>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Slide {
    pub name: Option<String>,
    pub background: Option<Fill>,
    pub shapes: Vec<Shape>,
    pub resolved: SlideRefs,
}

impl Slide {
    pub fn new(shapes: Vec<Shape>) -> Self {
        Self {
            shapes,
            ..Self::default()
        }
    }

    /// Builder method: set the slide name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builder method: set the background fill.
    pub fn with_background(mut self, fill: Fill) -> Self {
        self.background = Some(fill);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Presentation {
    pub properties: DocumentProperties,
    pub slide_size: SlideSize,
    pub slides: Vec<Slide>,
}

impl Presentation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a slide and return its 0-based index.
    pub fn add_slide(&mut self, slide: Slide) -> usize {
        self.slides.push(slide);
        self.slides.len() - 1
    }

    /// Builder method: set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.properties.title = Some(title.into());
        self
    }

    /// The first chart shape of every chart resource, keyed by resource
    /// ordinal. Empty until the presentation has been indexed.
    pub fn chart_shapes(&self) -> BTreeMap<u32, &Shape> {
        fn collect<'a>(shapes: &'a [Shape], charts: &mut BTreeMap<u32, &'a Shape>) {
            for shape in shapes {
                match &shape.kind {
                    ShapeKind::Chart(_) => {
                        if let Some(ordinal) = shape.resolved.resource {
                            charts.entry(ordinal).or_insert(shape);
                        }
                    }
                    ShapeKind::Group(children) => collect(children, charts),
                    _ => {}
                }
            }
        }

        let mut charts = BTreeMap::new();
        for slide in &self.slides {
            collect(&slide.shapes, &mut charts);
        }
        charts
    }
}
