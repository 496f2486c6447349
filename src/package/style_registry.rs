//! Style interning keyed by content fingerprint.
//!
//! Each [`StyleDeduplicator`] owns one style family. Interning a value that
//! was seen before returns the id it got the first time; a new value gets the
//! next ordinal of its family. Entries keep first-seen order, which is the
//! order the writers emit them in.
use std::collections::HashMap;
use std::fmt;

use crate::common::{Error, Result};
use crate::model::style::{Bullet, Fill, Font, GraphicStyle, ParagraphStyle};
use crate::package::fingerprint::{Fingerprint, Fingerprintable};

/// Style families, each with its own id space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StyleFamily {
    /// Character styles (fonts)
    Text,
    Paragraph,
    /// Bullet and numbering styles
    List,
    /// Fill and outline of drawing objects
    Graphic,
    /// Slide backgrounds
    DrawingPage,
}

impl StyleFamily {
    /// Prefix of the rendered style name.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Text => "T",
            Self::Paragraph => "P",
            Self::List => "L",
            Self::Graphic => "gr",
            Self::DrawingPage => "dp",
        }
    }

    /// ODF `style:family` value.
    pub fn odf_family(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Paragraph => "paragraph",
            Self::List => "list",
            Self::Graphic => "graphic",
            Self::DrawingPage => "drawing-page",
        }
    }
}

/// Interned style id, rendered as family prefix plus 1-based ordinal (`T1`, `gr3`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StyleId {
    pub family: StyleFamily,
    pub ordinal: u32,
}

impl fmt::Display for StyleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = itoa::Buffer::new();
        f.write_str(self.family.prefix())?;
        f.write_str(buf.format(self.ordinal))
    }
}

/// One interned value.
#[derive(Debug, Clone)]
pub struct StyleEntry<T> {
    pub fingerprint: Fingerprint,
    pub id: StyleId,
    pub payload: T,
}

/// Fingerprint-keyed interner for one style family.
#[derive(Debug)]
pub struct StyleDeduplicator<T> {
    family: StyleFamily,
    entries: Vec<StyleEntry<T>>,
    /// fingerprint -> index into `entries`
    lookup: HashMap<Fingerprint, usize>,
    closed: bool,
}

impl<T: Fingerprintable + Clone + PartialEq + fmt::Debug> StyleDeduplicator<T> {
    pub fn new(family: StyleFamily) -> Self {
        Self {
            family,
            entries: Vec::new(),
            lookup: HashMap::new(),
            closed: false,
        }
    }

    pub fn family(&self) -> StyleFamily {
        self.family
    }

    /// Return the id for `value`, allocating the next ordinal if it is new.
    ///
    /// # Errors
    ///
    /// `InvalidState` once the deduplicator is closed.
    pub fn intern(&mut self, value: &T) -> Result<StyleId> {
        if self.closed {
            return Err(Error::InvalidState(format!(
                "{:?} style registry is closed",
                self.family
            )));
        }

        let fingerprint = value.fingerprint();
        if let Some(&index) = self.lookup.get(&fingerprint) {
            let entry = &self.entries[index];
            debug_assert_eq!(
                &entry.payload, value,
                "fingerprint collision in {:?} styles",
                self.family
            );
            return Ok(entry.id);
        }

        let id = StyleId {
            family: self.family,
            ordinal: self.entries.len() as u32 + 1,
        };
        self.lookup.insert(fingerprint, self.entries.len());
        self.entries.push(StyleEntry {
            fingerprint,
            id,
            payload: value.clone(),
        });
        Ok(id)
    }

    /// Entries in first-seen order.
    pub fn entries(&self) -> &[StyleEntry<T>] {
        &self.entries
    }

    pub fn get(&self, id: StyleId) -> Option<&StyleEntry<T>> {
        if id.family != self.family || id.ordinal == 0 {
            return None;
        }
        self.entries.get(id.ordinal as usize - 1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Freeze the family; later `intern` calls fail.
    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

/// One deduplicator per style family, closed together when indexing ends.
#[derive(Debug)]
pub struct StyleRegistry {
    pub text: StyleDeduplicator<Font>,
    pub paragraph: StyleDeduplicator<ParagraphStyle>,
    pub list: StyleDeduplicator<Bullet>,
    pub graphic: StyleDeduplicator<GraphicStyle>,
    pub drawing_page: StyleDeduplicator<Fill>,
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self {
            text: StyleDeduplicator::new(StyleFamily::Text),
            paragraph: StyleDeduplicator::new(StyleFamily::Paragraph),
            list: StyleDeduplicator::new(StyleFamily::List),
            graphic: StyleDeduplicator::new(StyleFamily::Graphic),
            drawing_page: StyleDeduplicator::new(StyleFamily::DrawingPage),
        }
    }

    pub fn close(&mut self) {
        self.text.close();
        self.paragraph.close();
        self.list.close();
        self.graphic.close();
        self.drawing_page.close();
    }

    pub fn is_closed(&self) -> bool {
        self.text.is_closed()
    }

    /// Total number of interned styles across all families.
    pub fn len(&self) -> usize {
        self.text.len()
            + self.paragraph.len()
            + self.list.len()
            + self.graphic.len()
            + self.drawing_page.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
