//! Text content: bodies, paragraphs and runs.
use crate::model::style::{Bullet, Font, ParagraphStyle};
use crate::package::format::Reference;
use crate::package::style_registry::StyleId;

/// Where a hyperlink points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HyperlinkTarget {
    /// External URL
    Url(String),
    /// Another slide of the same presentation, 0-based
    Slide(usize),
}

/// A hyperlink on a run or on a whole shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hyperlink {
    pub target: HyperlinkTarget,
    pub tooltip: Option<String>,
}

impl Hyperlink {
    pub fn url(url: impl Into<String>) -> Self {
        Self {
            target: HyperlinkTarget::Url(url.into()),
            tooltip: None,
        }
    }

    pub fn slide(index: usize) -> Self {
        Self {
            target: HyperlinkTarget::Slide(index),
            tooltip: None,
        }
    }

    /// Builder method: set the tooltip.
    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }
}

/// Ids stamped onto a run during indexing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunRefs {
    pub style: Option<StyleId>,
    pub hyperlink: Option<Reference>,
}

/// A span of uniformly formatted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub text: String,
    pub font: Font,
    pub hyperlink: Option<Hyperlink>,
    pub resolved: RunRefs,
}

impl TextRun {
    pub fn new(text: impl Into<String>, font: Font) -> Self {
        Self {
            text: text.into(),
            font,
            hyperlink: None,
            resolved: RunRefs::default(),
        }
    }

    /// Builder method: attach a hyperlink.
    pub fn with_hyperlink(mut self, hyperlink: Hyperlink) -> Self {
        self.hyperlink = Some(hyperlink);
        self
    }
}

/// Ids stamped onto a paragraph during indexing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParagraphRefs {
    pub style: Option<StyleId>,
    pub list_style: Option<StyleId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    pub style: ParagraphStyle,
    pub bullet: Option<Bullet>,
    pub runs: Vec<TextRun>,
    pub resolved: ParagraphRefs,
}

impl Paragraph {
    pub fn new(runs: Vec<TextRun>) -> Self {
        Self {
            runs,
            ..Self::default()
        }
    }

    /// Builder method: set the paragraph style.
    pub fn with_style(mut self, style: ParagraphStyle) -> Self {
        self.style = style;
        self
    }

    /// Builder method: set the bullet.
    pub fn with_bullet(mut self, bullet: Bullet) -> Self {
        self.bullet = Some(bullet);
        self
    }

    /// Concatenated text of all runs.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBody {
    pub paragraphs: Vec<Paragraph>,
}

impl TextBody {
    pub fn new(paragraphs: Vec<Paragraph>) -> Self {
        Self { paragraphs }
    }

    /// A body holding one paragraph with one run.
    pub fn plain(text: impl Into<String>, font: Font) -> Self {
        Self::new(vec![Paragraph::new(vec![TextRun::new(text, font)])])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_text() {
        let para = Paragraph::new(vec![
            TextRun::new("Hello, ", Font::default()),
            TextRun::new("world", Font::default().bold(true)),
        ]);
        assert_eq!(para.text(), "Hello, world");
        assert!(para.resolved.style.is_none());
    }
}
