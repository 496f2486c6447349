//! Package assembly: identity resolution first, markup second.
//!
//! The assembler walks the model once to intern styles, register resources
//! and allocate every reference (indexing), then lets the format render its
//! parts from the resolved model (emitting), then hands the finished parts to
//! a sink (sealing). The state machine makes the order impossible to break:
//!
//! ```text
//! Initialized -> Indexing -> Emitting -> Sealed
//!      \____________\___________\_______> Failed
//! ```
//!
//! A call made in the wrong state is rejected without changing the state. An
//! error raised while an operation runs moves the assembler to `Failed`, after
//! which every call is rejected; nothing reaches the sink.
use std::collections::{BTreeMap, BTreeSet};

use crate::common::{Error, Result};
use crate::media::provider::ResourceProvider;
use crate::model::presentation::{Presentation, Slide};
use crate::model::shape::{MediaSource, Shape, ShapeKind};
use crate::model::text::{Hyperlink, HyperlinkTarget, TextBody};
use crate::package::content_types::ContentTypeRegistry;
use crate::package::fingerprint::{fingerprint, fingerprint_bytes};
use crate::package::format::{
    IndexContext, LinkKind, LinkTarget, PackageFormat, Reference, RenderContext,
};
use crate::package::options::PackageOptions;
use crate::package::part::{PackagePart, PartName, RenderedPart};
use crate::package::rel::{RELATIONSHIPS_CONTENT_TYPE, RelationshipAllocator};
use crate::package::resource::{ContentKey, PayloadSource, ResourceEntry, ResourceIndex};
use crate::package::sink::PackageSink;
use crate::package::style_registry::StyleRegistry;

/// Lifecycle of one generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblerState {
    Initialized,
    Indexing,
    Emitting,
    Sealed,
    Failed,
}

/// Drives one package generation run.
pub struct PackageAssembler {
    format: Box<dyn PackageFormat>,
    options: PackageOptions,
    state: AssemblerState,
    indexed: bool,
    styles: StyleRegistry,
    resources: ResourceIndex,
    allocators: BTreeMap<PartName, RelationshipAllocator>,
    content_types: ContentTypeRegistry,
    parts: Vec<PackagePart>,
}

impl PackageAssembler {
    pub fn new(format: impl PackageFormat + 'static) -> Self {
        Self {
            format: Box::new(format),
            options: PackageOptions::default(),
            state: AssemblerState::Initialized,
            indexed: false,
            styles: StyleRegistry::new(),
            resources: ResourceIndex::default(),
            allocators: BTreeMap::new(),
            content_types: ContentTypeRegistry::new(),
            parts: Vec::new(),
        }
    }

    /// Builder method: set the options.
    pub fn with_options(mut self, options: PackageOptions) -> Self {
        self.options = options;
        self
    }

    /// Builder method: load path-keyed resources through `provider`.
    pub fn with_provider(mut self, provider: Box<dyn ResourceProvider>) -> Self {
        self.resources = ResourceIndex::new(provider);
        self
    }

    pub fn state(&self) -> AssemblerState {
        self.state
    }

    pub fn options(&self) -> &PackageOptions {
        &self.options
    }

    pub fn styles(&self) -> &StyleRegistry {
        &self.styles
    }

    pub fn resources(&self) -> &ResourceIndex {
        &self.resources
    }

    pub fn content_types(&self) -> &ContentTypeRegistry {
        &self.content_types
    }

    /// Relationship manifest owned by `owner`, if it has one.
    pub fn relationships(&self, owner: &PartName) -> Option<&RelationshipAllocator> {
        self.allocators.get(owner)
    }

    /// Emitted parts, available between `emit` and `seal`.
    pub fn parts(&self) -> &[PackagePart] {
        &self.parts
    }

    fn check(&self, allowed: &[AssemblerState], operation: &str) -> Result<()> {
        match self.state {
            AssemblerState::Sealed => Err(Error::AlreadySealed),
            AssemblerState::Failed => Err(Error::InvalidState(format!(
                "cannot {operation}: an earlier step failed"
            ))),
            state if allowed.contains(&state) => Ok(()),
            state => Err(Error::InvalidState(format!(
                "cannot {operation} in state {state:?}"
            ))),
        }
    }

    fn settle<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            log::debug!("{} assembler failed: {e}", self.format.name());
            self.state = AssemblerState::Failed;
        }
        result
    }

    /// Register a resource ahead of indexing.
    pub fn register_resource(
        &mut self,
        key: ContentKey,
        source: PayloadSource,
        mime_hint: Option<&str>,
    ) -> Result<ResourceEntry> {
        self.check(
            &[AssemblerState::Initialized, AssemblerState::Indexing],
            "register a resource",
        )?;
        let result = self.resources.register(key, source, mime_hint).cloned();
        self.settle(result)
    }

    /// Resolve every identity in `presentation` and stamp the results into its
    /// resolved slots. Closes the style registry when done.
    pub fn index(&mut self, presentation: &mut Presentation) -> Result<()> {
        self.check(&[AssemblerState::Initialized], "index")?;
        self.state = AssemblerState::Indexing;

        let result = self.run_index(presentation);
        let result = self.settle(result);
        if result.is_ok() {
            self.indexed = true;
            log::debug!(
                "indexed {} slides: {} styles, {} resources, {} relationship owners",
                presentation.slides.len(),
                self.styles.len(),
                self.resources.len(),
                self.allocators.len()
            );
        }
        result
    }

    fn run_index(&mut self, presentation: &mut Presentation) -> Result<()> {
        let mut indexer = Indexer {
            format: self.format.as_ref(),
            styles: &mut self.styles,
            ctx: IndexContext::new(
                &mut self.allocators,
                &mut self.resources,
                presentation.slides.len(),
            ),
            next_ids: BTreeMap::new(),
        };

        indexer
            .format
            .index_package(&mut indexer.ctx, presentation)?;
        for (index, slide) in presentation.slides.iter_mut().enumerate() {
            indexer.index_slide(index, slide)?;
        }

        self.styles.close();
        Ok(())
    }

    /// Render every part and attach relationships and content types.
    pub fn emit(&mut self, presentation: &Presentation) -> Result<()> {
        self.check(&[AssemblerState::Indexing], "emit")?;
        if !self.indexed {
            return Err(Error::InvalidState(
                "cannot emit before indexing completes".to_string(),
            ));
        }
        self.state = AssemblerState::Emitting;

        let result = self.run_emit(presentation);
        self.settle(result)
    }

    fn run_emit(&mut self, presentation: &Presentation) -> Result<()> {
        let ctx = RenderContext::new(
            &self.styles,
            &self.resources,
            &self.options,
            &self.allocators,
        );
        let mut rendered = self.format.render(&ctx, presentation)?;

        for entry in self.resources.all() {
            if let Some(data) = entry.payload.bytes() {
                let name = self.format.resource_part(entry)?;
                rendered.push(RenderedPart::new(name, entry.mime_type.clone(), data));
            }
        }

        let mut emitted = BTreeSet::new();
        for part in &rendered {
            if !emitted.insert(part.name.clone()) {
                return Err(Error::InvalidState(format!(
                    "part '{}' emitted twice",
                    part.name
                )));
            }
        }

        for (owner, allocator) in &self.allocators {
            if !owner.is_package() && !emitted.contains(owner) {
                return Err(Error::InvalidState(format!(
                    "relationships allocated for '{owner}', which was never emitted"
                )));
            }
            for record in allocator.manifest() {
                if let Some(target) = &record.target_part
                    && !emitted.contains(target)
                {
                    return Err(Error::InvalidTarget(format!(
                        "{} {} points at '{}', which was never emitted",
                        owner, record.id, target
                    )));
                }
            }
        }

        let mut parts = Vec::with_capacity(rendered.len() + self.allocators.len());
        for part in rendered {
            let relationships = self
                .allocators
                .get(&part.name)
                .map(|a| a.manifest().to_vec())
                .unwrap_or_default();
            log::debug!("emitted {} ({} bytes)", part.name, part.data.len());
            parts.push(PackagePart {
                name: part.name,
                content_type: part.content_type,
                data: part.data,
                relationships,
            });
        }

        for allocator in self.allocators.values().filter(|a| !a.is_empty()) {
            let name = allocator.rels_part_name();
            if !emitted.insert(name.clone()) {
                return Err(Error::InvalidState(format!("part '{name}' emitted twice")));
            }
            parts.push(PackagePart {
                name,
                content_type: RELATIONSHIPS_CONTENT_TYPE.to_string(),
                data: allocator.to_xml().into_bytes(),
                relationships: Vec::new(),
            });
        }

        for part in &parts {
            self.format
                .declare_content_type(&mut self.content_types, &part.name, &part.content_type)?;
        }

        self.parts = parts;
        Ok(())
    }

    /// Hand every part to `sink`. The assembler is inert afterwards.
    pub fn seal<S: PackageSink>(&mut self, sink: &mut S) -> Result<()> {
        self.check(&[AssemblerState::Emitting], "seal")?;
        sink.set_compression(self.options.compression);

        let result = self.format.seal(&self.content_types, &self.parts, sink);
        self.settle(result)?;

        log::info!(
            "sealed {} package with {} parts",
            self.format.name(),
            self.parts.len()
        );
        self.state = AssemblerState::Sealed;
        self.parts.clear();
        Ok(())
    }

    /// Index, emit and seal in one call.
    pub fn assemble<S: PackageSink>(
        &mut self,
        presentation: &mut Presentation,
        sink: &mut S,
    ) -> Result<()> {
        self.index(presentation)?;
        self.emit(presentation)?;
        self.seal(sink)
    }
}

/// Document-order walk over the model during indexing.
struct Indexer<'a> {
    format: &'a dyn PackageFormat,
    styles: &'a mut StyleRegistry,
    ctx: IndexContext<'a>,
    /// Next drawing id per slide part. Slides sharing a part keep counting.
    next_ids: BTreeMap<PartName, u32>,
}

impl Indexer<'_> {
    fn index_slide(&mut self, index: usize, slide: &mut Slide) -> Result<()> {
        let part = self.format.slide_part(index)?;
        slide.resolved.presentation_ref = self.format.index_slide(&mut self.ctx, index, &part)?;
        slide.resolved.background_style = match &slide.background {
            Some(fill) => Some(self.styles.drawing_page.intern(fill)?),
            None => None,
        };

        // Id 1 belongs to the slide's shape tree
        let mut next_id = self.next_ids.get(&part).copied().unwrap_or(2);
        for shape in &mut slide.shapes {
            self.index_shape(&part, shape, &mut next_id)?;
        }
        self.next_ids.insert(part.clone(), next_id);
        slide.resolved.part = Some(part);
        Ok(())
    }

    fn index_shape(&mut self, part: &PartName, shape: &mut Shape, next_id: &mut u32) -> Result<()> {
        shape.resolved.drawing_id = *next_id;
        *next_id += 1;

        if let Some(link) = &shape.hyperlink {
            shape.resolved.hyperlink = Some(self.hyperlink(part, link)?);
        }

        match &mut shape.kind {
            ShapeKind::TextBox { body } => self.index_body(part, body)?,
            ShapeKind::AutoShape { style, body, .. } => {
                shape.resolved.graphic_style = Some(self.styles.graphic.intern(style)?);
                if let Some(body) = body {
                    self.index_body(part, body)?;
                }
            }
            ShapeKind::Picture {
                source, mime_hint, ..
            } => {
                let (key, payload) = match source {
                    MediaSource::Path(path) => {
                        (ContentKey::Path(path.clone()), PayloadSource::File(path.clone()))
                    }
                    MediaSource::Bytes(data) => (
                        ContentKey::Digest(fingerprint_bytes(data)),
                        PayloadSource::Bytes(data.clone()),
                    ),
                };
                let entry = self
                    .ctx
                    .register_resource(key, payload, mime_hint.as_deref())?;
                let target = LinkTarget::Part(self.format.resource_part(&entry)?);
                shape.resolved.resource = Some(entry.ordinal);
                shape.resolved.target =
                    Some(self.format.link(&mut self.ctx, part, LinkKind::Image, &target)?);
            }
            ShapeKind::Chart(chart) => {
                let key = ContentKey::Digest(fingerprint(&*chart));
                let first_seen = !self.ctx.resources().contains(&key);
                let entry = self.ctx.register_resource(key, PayloadSource::Chart, None)?;
                if first_seen {
                    self.format.index_chart(&mut self.ctx, chart, &entry)?;
                }
                let target = LinkTarget::Part(self.format.resource_part(&entry)?);
                shape.resolved.resource = Some(entry.ordinal);
                shape.resolved.target =
                    Some(self.format.link(&mut self.ctx, part, LinkKind::Chart, &target)?);
            }
            ShapeKind::Group(children) => {
                for child in children {
                    self.index_shape(part, child, next_id)?;
                }
            }
        }
        Ok(())
    }

    fn index_body(&mut self, part: &PartName, body: &mut TextBody) -> Result<()> {
        for paragraph in &mut body.paragraphs {
            paragraph.resolved.style = Some(self.styles.paragraph.intern(&paragraph.style)?);
            paragraph.resolved.list_style = match &paragraph.bullet {
                Some(bullet) => Some(self.styles.list.intern(bullet)?),
                None => None,
            };
            for run in &mut paragraph.runs {
                run.resolved.style = Some(self.styles.text.intern(&run.font)?);
                if let Some(link) = &run.hyperlink {
                    run.resolved.hyperlink = Some(self.hyperlink(part, link)?);
                }
            }
        }
        Ok(())
    }

    fn hyperlink(&mut self, part: &PartName, link: &Hyperlink) -> Result<Reference> {
        match &link.target {
            HyperlinkTarget::Url(url) => {
                if url.is_empty() {
                    return Err(Error::InvalidTarget(format!("empty hyperlink on '{part}'")));
                }
                let target = LinkTarget::External(url.clone());
                self.format
                    .link(&mut self.ctx, part, LinkKind::Hyperlink, &target)
            }
            HyperlinkTarget::Slide(index) => {
                if *index >= self.ctx.slide_count() {
                    return Err(Error::InvalidTarget(format!(
                        "hyperlink on '{part}' jumps to slide {index}, but there are {} slides",
                        self.ctx.slide_count()
                    )));
                }
                self.format
                    .link(&mut self.ctx, part, LinkKind::SlideJump, &LinkTarget::Slide(*index))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::shape::Frame;
    use crate::model::style::Font;
    use crate::model::text::{Paragraph, TextRun};
    use crate::package::sink::MemorySink;
    use std::fmt::Write as _;
    use std::sync::Arc;

    const REL: &str = "urn:test:rel";
    const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    /// Minimal relationship-based format: one part per slide listing the
    /// references it holds.
    struct FlatFormat;

    impl PackageFormat for FlatFormat {
        fn name(&self) -> &'static str {
            "flat"
        }

        fn slide_part(&self, index: usize) -> Result<PartName> {
            PartName::new(format!("/slides/slide{}.xml", index + 1))
        }

        fn resource_part(&self, entry: &ResourceEntry) -> Result<PartName> {
            PartName::new(format!("/media/{}", entry.filename))
        }

        fn index_package(&self, _ctx: &mut IndexContext<'_>, _p: &Presentation) -> Result<()> {
            Ok(())
        }

        fn index_slide(
            &self,
            ctx: &mut IndexContext<'_>,
            _index: usize,
            part: &PartName,
        ) -> Result<Option<Reference>> {
            let id = ctx.relate(&PartName::package(), REL, part)?;
            Ok(Some(Reference::Relationship(id)))
        }

        fn link(
            &self,
            ctx: &mut IndexContext<'_>,
            owner: &PartName,
            _kind: LinkKind,
            target: &LinkTarget,
        ) -> Result<Reference> {
            let id = match target {
                LinkTarget::Part(part) => ctx.relate(owner, REL, part)?,
                LinkTarget::External(url) => ctx.relate_external(owner, REL, url)?,
                LinkTarget::Slide(index) => ctx.relate(owner, REL, &self.slide_part(*index)?)?,
            };
            Ok(Reference::Relationship(id))
        }

        fn render(
            &self,
            _ctx: &RenderContext<'_>,
            presentation: &Presentation,
        ) -> Result<Vec<RenderedPart>> {
            let mut parts = Vec::new();
            for slide in &presentation.slides {
                let mut xml = String::from("<slide>");
                for shape in &slide.shapes {
                    if let Some(target) = &shape.resolved.target {
                        write!(xml, "<ref id=\"{target}\"/>")?;
                    }
                }
                xml.push_str("</slide>");
                let name = slide
                    .resolved
                    .part
                    .clone()
                    .ok_or_else(|| Error::InvalidState("unindexed slide".into()))?;
                parts.push(RenderedPart::new(name, "application/x-slide", xml));
            }
            Ok(parts)
        }

        fn declare_content_type(
            &self,
            registry: &mut ContentTypeRegistry,
            part: &PartName,
            content_type: &str,
        ) -> Result<()> {
            registry.add_override(part.as_str(), content_type)
        }

        fn seal(
            &self,
            content_types: &ContentTypeRegistry,
            parts: &[PackagePart],
            sink: &mut dyn PackageSink,
        ) -> Result<()> {
            sink.add_part("[Content_Types].xml", content_types.to_xml().as_bytes())?;
            for part in parts {
                sink.add_part(part.name.membername(), &part.data)?;
            }
            Ok(())
        }
    }

    fn picture(name: &str) -> Shape {
        Shape::picture(name, Frame::default(), MediaSource::Bytes(Arc::from(PNG)))
    }

    fn deck() -> Presentation {
        let mut presentation = Presentation::new();
        presentation.add_slide(Slide::new(vec![picture("a"), picture("b")]));
        presentation.add_slide(Slide::new(vec![picture("c")]));
        presentation
    }

    #[test]
    fn test_shared_image_registered_once() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut presentation = deck();
        let mut assembler = PackageAssembler::new(FlatFormat);
        assembler.index(&mut presentation).unwrap();

        assert_eq!(assembler.resources().len(), 1);
        let slide1 = PartName::new("/slides/slide1.xml").unwrap();
        let slide2 = PartName::new("/slides/slide2.xml").unwrap();
        assert_eq!(assembler.relationships(&slide1).unwrap().len(), 2);
        assert_eq!(assembler.relationships(&slide2).unwrap().len(), 1);

        let shapes = &presentation.slides[0].shapes;
        assert_eq!(shapes[0].resolved.drawing_id, 2);
        assert_eq!(shapes[1].resolved.drawing_id, 3);
        assert_ne!(shapes[0].resolved.target, shapes[1].resolved.target);
        assert_eq!(shapes[0].resolved.resource, Some(1));
    }

    #[test]
    fn test_full_run_reaches_sink() {
        let mut presentation = deck();
        let mut assembler = PackageAssembler::new(FlatFormat);
        let mut sink = MemorySink::new();
        assembler.assemble(&mut presentation, &mut sink).unwrap();

        assert_eq!(assembler.state(), AssemblerState::Sealed);
        assert_eq!(sink.paths()[0], "[Content_Types].xml");
        assert!(sink.get("media/image1.png").is_some());
        assert!(sink.get("_rels/.rels").is_some());
        let rels = sink.get_str("slides/_rels/slide1.xml.rels").unwrap();
        assert!(rels.contains(r#"Id="rId2" Type="urn:test:rel" Target="../media/image1.png""#));
        let slide = sink.get_str("slides/slide1.xml").unwrap();
        assert_eq!(slide, r#"<slide><ref id="rId1"/><ref id="rId2"/></slide>"#);
    }

    #[test]
    fn test_calls_after_seal_fail() {
        let mut presentation = deck();
        let mut assembler = PackageAssembler::new(FlatFormat);
        assembler
            .assemble(&mut presentation, &mut MemorySink::new())
            .unwrap();

        assert!(matches!(
            assembler.index(&mut presentation),
            Err(Error::AlreadySealed)
        ));
        assert!(matches!(
            assembler.register_resource(
                ContentKey::Path("x.png".into()),
                PayloadSource::Bytes(Arc::from(PNG)),
                None
            ),
            Err(Error::AlreadySealed)
        ));
        assert!(matches!(
            assembler.seal(&mut MemorySink::new()),
            Err(Error::AlreadySealed)
        ));
    }

    #[test]
    fn test_out_of_order_calls_rejected() {
        let presentation = deck();
        let mut assembler = PackageAssembler::new(FlatFormat);

        assert!(matches!(assembler.emit(&presentation), Err(Error::InvalidState(_))));
        assert!(matches!(
            assembler.seal(&mut MemorySink::new()),
            Err(Error::InvalidState(_))
        ));
        // Misuse leaves the state alone
        assert_eq!(assembler.state(), AssemblerState::Initialized);
    }

    #[test]
    fn test_failure_is_terminal() {
        let mut presentation = Presentation::new();
        presentation.add_slide(Slide::new(vec![Shape::picture(
            "missing",
            Frame::default(),
            MediaSource::Path("missing.png".into()),
        )]));

        let mut assembler = PackageAssembler::new(FlatFormat);
        let err = assembler.index(&mut presentation).unwrap_err();
        assert!(matches!(err, Error::UnreadableResource { .. }));
        assert_eq!(assembler.state(), AssemblerState::Failed);
        assert!(matches!(assembler.emit(&presentation), Err(Error::InvalidState(_))));
    }

    #[test]
    fn test_slide_jump_out_of_range() {
        let mut presentation = Presentation::new();
        let body = TextBody::new(vec![Paragraph::new(vec![
            TextRun::new("next", Font::default()).with_hyperlink(Hyperlink::slide(5)),
        ])]);
        presentation.add_slide(Slide::new(vec![Shape::text_box(
            "t",
            Frame::default(),
            body,
        )]));

        let mut assembler = PackageAssembler::new(FlatFormat);
        assert!(matches!(
            assembler.index(&mut presentation),
            Err(Error::InvalidTarget(_))
        ));
    }

    #[test]
    fn test_styles_closed_after_index() {
        let mut presentation = deck();
        let mut assembler = PackageAssembler::new(FlatFormat);
        assembler.index(&mut presentation).unwrap();
        assert!(assembler.styles().is_closed());
        assert!(assembler.styles().text.is_empty());
    }
}
