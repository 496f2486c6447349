//! Shapes placed on a slide.
use std::sync::Arc;

use crate::model::chart::Chart;
use crate::model::style::GraphicStyle;
use crate::model::text::{Hyperlink, TextBody};
use crate::package::format::Reference;
use crate::package::style_registry::StyleId;

/// Position and size in EMUs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Frame {
    pub x: i64,
    pub y: i64,
    pub cx: i64,
    pub cy: i64,
}

impl Frame {
    pub const fn new(x: i64, y: i64, cx: i64, cy: i64) -> Self {
        Self { x, y, cx, cy }
    }
}

/// Preset geometry of an auto shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Geometry {
    #[default]
    Rectangle,
    RoundRectangle,
    Ellipse,
    Triangle,
}

impl Geometry {
    /// OOXML `prstGeom` name.
    pub fn ooxml_preset(&self) -> &'static str {
        match self {
            Self::Rectangle => "rect",
            Self::RoundRectangle => "roundRect",
            Self::Ellipse => "ellipse",
            Self::Triangle => "triangle",
        }
    }

    /// ODF `draw:enhanced-geometry` type.
    pub fn odf_type(&self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::RoundRectangle => "round-rectangle",
            Self::Ellipse => "ellipse",
            Self::Triangle => "isosceles-triangle",
        }
    }
}

/// Where picture bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaSource {
    /// Path resolved through the assembler's resource provider
    Path(String),
    /// Inline bytes
    Bytes(Arc<[u8]>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    TextBox {
        body: TextBody,
    },
    AutoShape {
        geometry: Geometry,
        style: GraphicStyle,
        body: Option<TextBody>,
    },
    Picture {
        source: MediaSource,
        /// MIME type supplied by the caller; sniffed from the bytes when absent
        mime_hint: Option<String>,
        description: Option<String>,
    },
    Chart(Chart),
    Group(Vec<Shape>),
}

/// Ids stamped onto a shape during indexing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShapeRefs {
    /// Drawing object id, unique within the slide
    pub drawing_id: u32,
    pub graphic_style: Option<StyleId>,
    /// Reference to the picture or chart part
    pub target: Option<Reference>,
    /// Ordinal of the registered picture or chart resource
    pub resource: Option<u32>,
    /// Reference for the shape-level hyperlink
    pub hyperlink: Option<Reference>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub name: String,
    pub frame: Frame,
    pub kind: ShapeKind,
    pub hyperlink: Option<Hyperlink>,
    pub resolved: ShapeRefs,
}

impl Shape {
    pub fn new(name: impl Into<String>, frame: Frame, kind: ShapeKind) -> Self {
        Self {
            name: name.into(),
            frame,
            kind,
            hyperlink: None,
            resolved: ShapeRefs::default(),
        }
    }

    pub fn text_box(name: impl Into<String>, frame: Frame, body: TextBody) -> Self {
        Self::new(name, frame, ShapeKind::TextBox { body })
    }

    pub fn auto_shape(
        name: impl Into<String>,
        frame: Frame,
        geometry: Geometry,
        style: GraphicStyle,
    ) -> Self {
        Self::new(
            name,
            frame,
            ShapeKind::AutoShape {
                geometry,
                style,
                body: None,
            },
        )
    }

    pub fn picture(name: impl Into<String>, frame: Frame, source: MediaSource) -> Self {
        Self::new(
            name,
            frame,
            ShapeKind::Picture {
                source,
                mime_hint: None,
                description: None,
            },
        )
    }

    pub fn chart(name: impl Into<String>, frame: Frame, chart: Chart) -> Self {
        Self::new(name, frame, ShapeKind::Chart(chart))
    }

    pub fn group(name: impl Into<String>, frame: Frame, children: Vec<Shape>) -> Self {
        Self::new(name, frame, ShapeKind::Group(children))
    }

    /// Builder method: attach a shape-level hyperlink.
    pub fn with_hyperlink(mut self, hyperlink: Hyperlink) -> Self {
        self.hyperlink = Some(hyperlink);
        self
    }

    /// Text body of a text box or auto shape.
    pub fn text_body(&self) -> Option<&TextBody> {
        match &self.kind {
            ShapeKind::TextBox { body } => Some(body),
            ShapeKind::AutoShape { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    /// Count this shape and every shape nested below it.
    pub fn count_nested(&self) -> usize {
        match &self.kind {
            ShapeKind::Group(children) => 1 + children.iter().map(Shape::count_nested).sum::<usize>(),
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::style::Font;

    #[test]
    fn test_count_nested() {
        let leaf = Shape::text_box("t", Frame::default(), TextBody::plain("x", Font::default()));
        let inner = Shape::group("g1", Frame::default(), vec![leaf.clone(), leaf.clone()]);
        let outer = Shape::group("g0", Frame::default(), vec![inner, leaf]);
        assert_eq!(outer.count_nested(), 5);
    }

    #[test]
    fn test_text_body_access() {
        let shape = Shape::auto_shape(
            "box",
            Frame::default(),
            Geometry::Ellipse,
            GraphicStyle::default(),
        );
        assert!(shape.text_body().is_none());
        assert_eq!(Geometry::Ellipse.ooxml_preset(), "ellipse");
        assert_eq!(Geometry::Triangle.odf_type(), "isosceles-triangle");
    }
}
