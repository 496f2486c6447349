//! The seam between the assembler and a concrete package format.
//!
//! The assembler owns every registry and drives the run. A [`PackageFormat`]
//! decides part names, turns links into references, renders markup from the
//! resolved model, and lays out the sealed container.
use std::collections::BTreeMap;
use std::fmt;

use crate::common::Result;
use crate::model::chart::Chart;
use crate::model::presentation::Presentation;
use crate::package::content_types::ContentTypeRegistry;
use crate::package::options::PackageOptions;
use crate::package::part::{PackagePart, PartName, RenderedPart};
use crate::package::rel::{RelId, RelationshipAllocator, TargetMode};
use crate::package::resource::{ContentKey, PayloadSource, ResourceEntry, ResourceIndex};
use crate::package::sink::PackageSink;
use crate::package::style_registry::StyleRegistry;

/// What the assembler stamps into a resolved slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference {
    /// Relationship id in the owner part's `.rels`
    Relationship(RelId),
    /// Path or URL written straight into the markup
    Href(String),
}

impl Reference {
    pub fn rel_id(&self) -> Option<RelId> {
        match self {
            Self::Relationship(id) => Some(*id),
            Self::Href(_) => None,
        }
    }

    pub fn href(&self) -> Option<&str> {
        match self {
            Self::Relationship(_) => None,
            Self::Href(href) => Some(href),
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Relationship(id) => write!(f, "{id}"),
            Self::Href(href) => f.write_str(href),
        }
    }
}

/// Where a link points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    Part(PartName),
    /// Absolute URL outside the package
    External(String),
    /// Another slide, 0-based
    Slide(usize),
}

/// Why one part refers to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkKind {
    Image,
    Chart,
    Hyperlink,
    /// Hyperlink jumping to another slide
    SlideJump,
    /// Presentation to slide
    Slide,
    SlideLayout,
    SlideMaster,
    Theme,
    /// Embedded package such as a chart workbook
    Package,
    OfficeDocument,
    CoreProperties,
    ExtendedProperties,
    PresentationProperties,
    ViewProperties,
    TableStyles,
}

/// Mutable registry access handed to format hooks while indexing.
pub struct IndexContext<'a> {
    pub(crate) allocators: &'a mut BTreeMap<PartName, RelationshipAllocator>,
    pub(crate) resources: &'a mut ResourceIndex,
    pub(crate) slide_count: usize,
}

impl<'a> IndexContext<'a> {
    pub fn new(
        allocators: &'a mut BTreeMap<PartName, RelationshipAllocator>,
        resources: &'a mut ResourceIndex,
        slide_count: usize,
    ) -> Self {
        Self {
            allocators,
            resources,
            slide_count,
        }
    }

    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    /// The allocator owned by `owner`, created on first use.
    pub fn allocator(&mut self, owner: &PartName) -> &mut RelationshipAllocator {
        self.allocators
            .entry(owner.clone())
            .or_insert_with(|| RelationshipAllocator::new(owner.clone()))
    }

    /// Allocate an internal relationship from `owner` to `target`.
    pub fn relate(&mut self, owner: &PartName, reltype: &str, target: &PartName) -> Result<RelId> {
        self.allocator(owner).allocate_part(reltype, target)
    }

    /// Allocate an external relationship from `owner` to `url`.
    pub fn relate_external(&mut self, owner: &PartName, reltype: &str, url: &str) -> Result<RelId> {
        self.allocator(owner)
            .allocate(reltype, url, TargetMode::External)
    }

    /// Register a resource and return a copy of its entry.
    pub fn register_resource(
        &mut self,
        key: ContentKey,
        source: PayloadSource,
        mime_hint: Option<&str>,
    ) -> Result<ResourceEntry> {
        self.resources.register(key, source, mime_hint).cloned()
    }

    pub fn resources(&self) -> &ResourceIndex {
        self.resources
    }
}

/// Read-only registry access handed to format writers while emitting.
pub struct RenderContext<'a> {
    pub styles: &'a StyleRegistry,
    pub resources: &'a ResourceIndex,
    pub options: &'a PackageOptions,
    pub(crate) allocators: &'a BTreeMap<PartName, RelationshipAllocator>,
}

impl<'a> RenderContext<'a> {
    pub fn new(
        styles: &'a StyleRegistry,
        resources: &'a ResourceIndex,
        options: &'a PackageOptions,
        allocators: &'a BTreeMap<PartName, RelationshipAllocator>,
    ) -> Self {
        Self {
            styles,
            resources,
            options,
            allocators,
        }
    }

    pub fn relationships(&self, owner: &PartName) -> Option<&RelationshipAllocator> {
        self.allocators.get(owner)
    }

    /// First relationship from `owner` to `target`.
    pub fn relationship_to(&self, owner: &PartName, target: &PartName) -> Option<RelId> {
        self.relationships(owner)?.find_target(target)
    }
}

/// A concrete package format.
pub trait PackageFormat {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Part carrying slide `index`.
    fn slide_part(&self, index: usize) -> Result<PartName>;

    /// Part a registered resource is stored under.
    fn resource_part(&self, entry: &ResourceEntry) -> Result<PartName>;

    /// Allocate package-level links before any slide is walked.
    fn index_package(&self, ctx: &mut IndexContext<'_>, presentation: &Presentation) -> Result<()>;

    /// Allocate the links of slide `index` stored at `part`, returning the
    /// presentation's reference to it, if the format has one.
    fn index_slide(
        &self,
        ctx: &mut IndexContext<'_>,
        index: usize,
        part: &PartName,
    ) -> Result<Option<Reference>>;

    /// Called once per distinct chart, right after its first registration.
    fn index_chart(
        &self,
        _ctx: &mut IndexContext<'_>,
        _chart: &Chart,
        _entry: &ResourceEntry,
    ) -> Result<()> {
        Ok(())
    }

    /// Turn a link from `owner` into a reference.
    fn link(
        &self,
        ctx: &mut IndexContext<'_>,
        owner: &PartName,
        kind: LinkKind,
        target: &LinkTarget,
    ) -> Result<Reference>;

    /// Render every markup part from the resolved model.
    fn render(&self, ctx: &RenderContext<'_>, presentation: &Presentation)
    -> Result<Vec<RenderedPart>>;

    /// Declare the content type of one emitted part.
    fn declare_content_type(
        &self,
        registry: &mut ContentTypeRegistry,
        part: &PartName,
        content_type: &str,
    ) -> Result<()>;

    /// Hand every part to the sink in the format's order, together with the
    /// content-type manifest.
    fn seal(
        &self,
        content_types: &ContentTypeRegistry,
        parts: &[PackagePart],
        sink: &mut dyn PackageSink,
    ) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_accessors() {
        let mut allocators = BTreeMap::new();
        let mut resources = ResourceIndex::default();
        let mut ctx = IndexContext::new(&mut allocators, &mut resources, 1);

        let owner = PartName::new("/ppt/slides/slide1.xml").unwrap();
        let id = ctx
            .relate_external(&owner, "urn:test", "https://example.com")
            .unwrap();
        let reference = Reference::Relationship(id);

        assert_eq!(reference.to_string(), "rId1");
        assert_eq!(reference.rel_id(), Some(id));
        assert!(reference.href().is_none());
        assert_eq!(Reference::Href("#page2".into()).href(), Some("#page2"));
        assert_eq!(allocators[&owner].len(), 1);
    }
}
